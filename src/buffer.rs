use std::cell::Cell;
use std::fmt::{self, Debug};
use std::rc::Rc;

/// A reference-counted block of elements: the storage shared by every view of
/// an [`Array`].
///
/// Cloning a `Buffer` (or calling [`share()`]) does not copy any elements;
/// it returns another handle to the same memory. The memory is freed when the
/// last handle is dropped. A `Buffer` never moves or resizes once created.
///
/// Elements are held in [`Cell`]s, so that every holder can both read and
/// write them. Two arrays observe each other's writes if and only if they
/// hold handles to the same `Buffer`.
///
/// [`Array`]: super::Array
/// [`share()`]: Buffer::share()
pub struct Buffer<T> {
    cells: Rc<[Cell<T>]>,
}

impl<T> Buffer<T> {
    /// Allocates a `Buffer` holding `items`.
    pub fn from_vec(items: Vec<T>) -> Self {
        tracing::trace!(
            len = items.len(),
            bytes = items.len() * std::mem::size_of::<T>(),
            "allocating buffer"
        );
        Self { cells: items.into_iter().map(Cell::new).collect() }
    }

    /// Allocates a `Buffer` of `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> Self where T: Copy {
        Self::from_vec(vec![value; len])
    }

    /// Returns another handle to the same memory.
    pub fn share(&self) -> Self {
        Self { cells: Rc::clone(&self.cells) }
    }

    /// The number of elements.
    pub fn len(&self) -> usize { self.cells.len() }

    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    /// The number of live handles to this memory.
    pub fn holders(&self) -> usize { Rc::strong_count(&self.cells) }

    /// Returns `true` if `self` and `other` are handles to the same memory.
    pub fn same_allocation(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }

    /// Borrow the element at `offset`.
    #[inline(always)]
    pub fn cell(&self, offset: usize) -> &Cell<T> { &self.cells[offset] }

    /// Returns the element at `offset`.
    #[inline(always)]
    pub fn get(&self, offset: usize) -> T where T: Copy { self.cells[offset].get() }

    /// Overwrite the element at `offset`.
    #[inline(always)]
    pub fn set(&self, offset: usize, value: T) { self.cells[offset].set(value) }

    /// All elements, in storage order.
    pub fn cells(&self) -> &[Cell<T>] { &self.cells }

    /// A raw pointer to the first element.
    ///
    /// The pointer is valid for as long as any handle is alive. Writing
    /// through it while a [`Cell`] borrow of the same element is in use is the
    /// caller's responsibility.
    pub fn as_ptr(&self) -> *const T { self.cells.as_ptr() as *const T }
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self { self.share() }
}

impl<T> Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("holders", &self.holders())
            .finish()
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharing() {
        let a = Buffer::from_vec(vec![1, 2, 3]);
        assert_eq!(a.holders(), 1);
        let b = a.share();
        assert_eq!(a.holders(), 2);
        assert!(a.same_allocation(&b));
        b.set(1, 20);
        assert_eq!(a.get(1), 20);
        drop(b);
        assert_eq!(a.holders(), 1);
    }

    #[test]
    fn distinct_allocations() {
        let a = Buffer::filled(3, 0u8);
        let b = Buffer::filled(3, 0u8);
        assert!(!a.same_allocation(&b));
        a.set(0, 9);
        assert_eq!(b.get(0), 0);
        assert_eq!(a.len(), 3);
        assert!(!a.is_empty());
    }

    #[test]
    fn raw_pointer() {
        let a = Buffer::from_vec(vec![5.0f64, 6.0]);
        let p = a.as_ptr();
        // SAFETY: `a` is alive and nothing borrows its cells.
        assert_eq!(unsafe { *p.add(1) }, 6.0);
    }
}
