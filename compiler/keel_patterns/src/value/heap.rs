use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Shared, immutable heap allocation for [`Value`](super::Value) payloads.
///
/// The constructor is private to the value module, so every heap value is
/// built through a `Value::` factory method.
#[derive(Clone, PartialEq, Eq)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Mutable access when this handle is the only owner.
    #[inline]
    pub(super) fn get_mut(this: &mut Self) -> Option<&mut T> {
        Rc::get_mut(&mut this.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
