//! Runtime values for the Keel interpreter.
//!
//! All heap allocations go through factory methods on `Value`
//! (`Value::string`, `Value::list`, ...). The [`Heap<T>`] wrapper has a
//! private constructor, so code outside this module cannot build heap
//! variants directly.
//!
//! Values are immutable except for [`MutCell`], which is shared by every
//! copy of the `Mut` value that holds it.

mod block;
mod heap;
mod map;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use keel_ir::Name;
use keel_stack::ensure_sufficient_stack;
use num_bigint::BigInt;

pub use block::{BlockBody, BlockValue, CompiledBody, NativeFn};
pub use heap::Heap;
pub use map::MapValue;

/// Shared mutable cell. Clones share the cell; writes are last-write-wins.
///
/// A cell may end up holding itself (`set m m`). Equality, formatting and
/// matching track the cells they are inside of, so such cycles terminate.
#[derive(Clone)]
pub struct MutCell(Rc<RefCell<Value>>);

/// Pairs of cells being compared further up the current comparison.
type CellPairs = Vec<(*const RefCell<Value>, *const RefCell<Value>)>;

thread_local! {
    /// Cells whose contents are being formatted on this thread.
    static FORMATTING: RefCell<Vec<*const RefCell<Value>>> = const { RefCell::new(Vec::new()) };
}

impl MutCell {
    pub fn load(&self) -> Value {
        self.0.borrow().clone()
    }

    /// Overwrite the contents, returning the previous value.
    pub fn store(&self, value: Value) -> Value {
        self.0.replace(value)
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn as_ptr(&self) -> *const RefCell<Value> {
        Rc::as_ptr(&self.0)
    }

    /// Format the contents with `write`, or `...` when this cell is already
    /// being formatted further up.
    fn fmt_contents(
        &self,
        f: &mut fmt::Formatter<'_>,
        write: impl FnOnce(&Value, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        let ptr = self.as_ptr();
        let reentered = FORMATTING.with(|open| {
            let mut open = open.borrow_mut();
            if open.contains(&ptr) {
                return true;
            }
            open.push(ptr);
            false
        });
        if reentered {
            return f.write_str("...");
        }
        let result = write(&self.0.borrow(), f);
        FORMATTING.with(|open| open.borrow_mut().pop());
        result
    }
}

/// Token equal only to itself and its clones.
#[derive(Clone)]
pub struct UniqueToken(Rc<()>);

impl UniqueToken {
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

/// Runtime value in the Keel interpreter.
#[derive(Clone)]
pub enum Value {
    Unit,
    Bool(bool),
    /// Arbitrary-precision integer.
    Number(Heap<BigInt>),
    Str(Heap<String>),
    /// Compared by name. In pattern position an atom binds its name.
    Atom(Name),
    List(Heap<Vec<Value>>),
    Map(Heap<MapValue>),
    Mut(MutCell),
    /// Early-exit wrapper, the result of a `return` that escaped every loop.
    Return(Heap<Value>),
    Unique(UniqueToken),
    Block(BlockValue),
}

impl Value {
    #[inline]
    pub fn number(n: impl Into<BigInt>) -> Self {
        Value::Number(Heap::new(n.into()))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn atom(name: impl Into<Name>) -> Self {
        Value::Atom(name.into())
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn map(map: MapValue) -> Self {
        Value::Map(Heap::new(map))
    }

    /// A fresh mutable cell holding `value`.
    pub fn new_mut(value: Value) -> Self {
        Value::Mut(MutCell(Rc::new(RefCell::new(value))))
    }

    pub fn returning(value: Value) -> Self {
        Value::Return(Heap::new(value))
    }

    /// A fresh token, distinct from every other.
    pub fn unique() -> Self {
        Value::Unique(UniqueToken(Rc::new(())))
    }

    #[inline]
    pub fn block(block: BlockValue) -> Self {
        Value::Block(block)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&BigInt> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&BlockValue> {
        match self {
            Value::Block(b) => Some(b),
            _ => None,
        }
    }

    /// Kind name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Atom(_) => "atom",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Mut(_) => "mut",
            Value::Return(_) => "return",
            Value::Unique(_) => "unique",
            Value::Block(_) => "block",
        }
    }

    /// Structural equality.
    ///
    /// Blocks are never equal to anything, themselves included. `Unique`
    /// compares by identity. Values of different kinds are unequal. Two
    /// cells met again while already comparing them are taken as equal.
    pub fn equals(&self, other: &Value) -> bool {
        self.equals_in(other, &mut CellPairs::new())
    }

    fn equals_in(&self, other: &Value, cells: &mut CellPairs) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals_in(y, cells))
            }
            (Value::Map(a), Value::Map(b)) => a.equals_in(b, cells),
            (Value::Mut(a), Value::Mut(b)) => {
                let pair = (a.as_ptr(), b.as_ptr());
                if MutCell::ptr_eq(a, b) || cells.contains(&pair) {
                    return true;
                }
                cells.push(pair);
                let equal = a.0.borrow().equals_in(&b.0.borrow(), cells);
                cells.pop();
                equal
            }
            (Value::Return(a), Value::Return(b)) => a.equals_in(b, cells),
            (Value::Unique(a), Value::Unique(b)) => UniqueToken::ptr_eq(a, b),
            _ => false,
        })
    }

    /// Move uniquely owned children into `out`, leaving this value's
    /// containers empty. Shared children are left to their other owners.
    fn detach_children(&mut self, out: &mut Vec<Value>) {
        match self {
            Value::List(items) => {
                if let Some(items) = Heap::get_mut(items) {
                    out.append(items);
                }
            }
            Value::Map(map) => {
                if let Some(map) = Heap::get_mut(map) {
                    map.drain_into(out);
                }
            }
            Value::Return(inner) => {
                if let Some(inner) = Heap::get_mut(inner) {
                    out.push(std::mem::replace(inner, Value::Unit));
                }
            }
            Value::Mut(cell) => {
                if let Some(cell) = Rc::get_mut(&mut cell.0) {
                    out.push(std::mem::replace(cell.get_mut(), Value::Unit));
                }
            }
            _ => {}
        }
    }

    /// Display for user output: a top-level string prints without quotes.
    pub fn display_value(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.to_string(),
        }
    }
}

/// Nested containers are torn down with a work list instead of one native
/// frame per level.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}

/// Free-function form of [`Value::equals`].
#[inline]
pub fn value_equals(a: &Value, b: &Value) -> bool {
    a.equals(b)
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_display(f))
    }
}

impl Value {
    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", &**n),
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::Atom(name) => write!(f, "'{name}"),
            Value::List(items) => {
                f.write_str("[")?;
                write_seq(f, items.iter())?;
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Mut(cell) => {
                f.write_str("mut(")?;
                cell.fmt_contents(f, <Value as fmt::Display>::fmt)?;
                f.write_str(")")
            }
            Value::Return(v) => write!(f, "return({})", &**v),
            Value::Unique(_) => f.write_str("<unique>"),
            Value::Block(block) => match block.native_name() {
                Some(name) => write!(f, "<builtin {name}>"),
                None => f.write_str("<block>"),
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_debug(f))
    }
}

impl Value {
    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "Unit"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({})", &**n),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Atom(name) => write!(f, "Atom({name})"),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Mut(cell) => {
                f.write_str("Mut(")?;
                cell.fmt_contents(f, <Value as fmt::Debug>::fmt)?;
                f.write_str(")")
            }
            Value::Return(v) => write!(f, "Return({:?})", &**v),
            Value::Unique(token) => write!(f, "Unique({:p})", Rc::as_ptr(&token.0)),
            Value::Block(block) => write!(f, "{block:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::number(n)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
mod tests;
