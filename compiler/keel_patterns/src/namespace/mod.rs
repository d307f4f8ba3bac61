//! Persistent namespace.
//!
//! An immutable binary search tree keyed by [`Name`]. Inserting copies the
//! path from the root to the new leaf and shares every other node, so a
//! namespace captured by a block stays valid while the caller keeps
//! extending its own.

use std::fmt;
use std::rc::Rc;

use keel_ir::Name;
use keel_stack::ensure_sufficient_stack;

use crate::errors::{already_bound, bad_binding_key, unbound};
use crate::{EvalError, MapValue, Value};

struct Node<T> {
    key: Name,
    value: T,
    left: Option<Rc<Node<T>>>,
    right: Option<Rc<Node<T>>>,
}

impl<T> Drop for Node<T> {
    // A tree built from sorted inserts is a chain; dropping it recursively
    // would recurse once per binding.
    fn drop(&mut self) {
        let mut pending: Vec<Rc<Node<T>>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(node) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(node) {
                pending.extend(node.left.take());
                pending.extend(node.right.take());
            }
        }
    }
}

/// Immutable name-to-value mapping with cheap snapshots.
pub struct Namespace<T> {
    root: Option<Rc<Node<T>>>,
    len: usize,
}

impl<T> Namespace<T> {
    pub fn new() -> Self {
        Namespace { root: None, len: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(node.key.as_str()) {
                std::cmp::Ordering::Less => node.left.as_deref(),
                std::cmp::Ordering::Greater => node.right.as_deref(),
                std::cmp::Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Like [`get`](Self::get), failing with an unbound-name error.
    pub fn must_get(&self, key: &Name) -> Result<&T, EvalError> {
        self.get(key.as_str()).ok_or_else(|| unbound(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.descend(self.root.as_deref());
        iter
    }
}

impl<T: Clone> Namespace<T> {
    /// A new namespace with `key` bound, or `None` if `key` is already bound.
    /// `self` is left untouched either way.
    pub fn insert(&self, key: Name, value: T) -> Option<Self> {
        let root = insert_node(self.root.as_ref(), key, value)?;
        Some(Namespace {
            root: Some(root),
            len: self.len + 1,
        })
    }

    pub fn must_insert(&self, key: Name, value: T) -> Result<Self, EvalError> {
        self.insert(key.clone(), value)
            .ok_or_else(|| already_bound(&key))
    }
}

impl Namespace<Value> {
    /// Bind every entry of `bindings`. Keys must be atoms; their names
    /// become the bound names.
    pub fn with_bindings(&self, bindings: &MapValue) -> Result<Self, EvalError> {
        let mut ns = self.clone();
        for (key, value) in bindings.iter() {
            let Value::Atom(name) = key else {
                return Err(bad_binding_key(key));
            };
            ns = ns.must_insert(name.clone(), value.clone())?;
        }
        Ok(ns)
    }
}

fn insert_node<T: Clone>(node: Option<&Rc<Node<T>>>, key: Name, value: T) -> Option<Rc<Node<T>>> {
    let Some(node) = node else {
        return Some(Rc::new(Node {
            key,
            value,
            left: None,
            right: None,
        }));
    };
    let (left, right) = match key.cmp(&node.key) {
        std::cmp::Ordering::Equal => return None,
        std::cmp::Ordering::Less => {
            let left = ensure_sufficient_stack(|| insert_node(node.left.as_ref(), key, value))?;
            (Some(left), node.right.clone())
        }
        std::cmp::Ordering::Greater => {
            let right = ensure_sufficient_stack(|| insert_node(node.right.as_ref(), key, value))?;
            (node.left.clone(), Some(right))
        }
    };
    Some(Rc::new(Node {
        key: node.key.clone(),
        value: node.value.clone(),
        left,
        right,
    }))
}

impl<T> Clone for Namespace<T> {
    fn clone(&self) -> Self {
        Namespace {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for Namespace<T> {
    fn default() -> Self {
        Namespace::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Namespace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order iterator over a [`Namespace`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn descend(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a Name, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}

impl<'a, T> IntoIterator for &'a Namespace<T> {
    type Item = (&'a Name, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
