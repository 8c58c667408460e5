//! The traversal engine.
//!
//! Every walk over a coordinate space in this crate, whether it fills,
//! assigns, reduces, searches or iterates, is driven by the same odometer:
//! the last coordinate is incremented, and overflow carries into the
//! preceding axis. Coordinates are therefore visited in row-major order,
//! each exactly once.

use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, ControlFlow, Sub, SubAssign};

use super::shape::{self, default_strides, unravel};
use super::Result;

/// Step `coords` to the next coordinate in row-major order.
///
/// Returns `false` (leaving `coords` all zero) after the last coordinate.
#[inline]
pub(crate) fn advance<const N: usize>(coords: &mut [usize; N], shape: &[usize; N]) -> bool {
    for axis in (0..N).rev() {
        coords[axis] += 1;
        if coords[axis] < shape[axis] { return true; }
        coords[axis] = 0;
    }
    false
}

/// Call `f` on every coordinate of `shape` in row-major order, stopping
/// early if `f` returns [`ControlFlow::Break`].
///
/// ```
/// use std::ops::ControlFlow;
/// use ndview::traverse::try_for_each;
/// let mut seen = Vec::new();
/// let found = try_for_each([2, 3], |c| {
///     seen.push(c);
///     if c[0] * 3 + c[1] == 4 { ControlFlow::Break(c) } else { ControlFlow::Continue(()) }
/// });
/// assert_eq!(found, ControlFlow::Break([1, 1]));
/// assert_eq!(seen, [[0, 0], [0, 1], [0, 2], [1, 0], [1, 1]]);
/// ```
pub fn try_for_each<B, const N: usize>(
    shape: [usize; N],
    mut f: impl FnMut([usize; N]) -> ControlFlow<B>,
) -> ControlFlow<B> {
    if shape::size(&shape) == 0 { return ControlFlow::Continue(()); }
    let mut coords = [0; N];
    loop {
        f(coords)?;
        if !advance(&mut coords, &shape) { return ControlFlow::Continue(()); }
    }
}

/// Call `f` on every coordinate of `shape` in row-major order.
pub fn for_each<const N: usize>(shape: [usize; N], mut f: impl FnMut([usize; N])) {
    let _ = try_for_each::<(), N>(shape, |coords| {
        f(coords);
        ControlFlow::Continue(())
    });
}

// ----------------------------------------------------------------------------

/// An iterator over the coordinates of a shape in row-major order.
///
/// Stepping forward uses the odometer; stepping backward and skipping use
/// [`unravel()`].
///
/// ```
/// use ndview::traverse::Coords;
/// let c: Vec<_> = Coords::new([2, 2]).rev().collect();
/// assert_eq!(c, [[1, 1], [1, 0], [0, 1], [0, 0]]);
/// ```
#[derive(Debug, Clone)]
pub struct Coords<const N: usize> {
    shape: [usize; N],
    strides: [isize; N],
    cursor: [usize; N],
    front: usize,
    back: usize,
}

impl<const N: usize> Coords<N> {
    pub fn new(shape: [usize; N]) -> Self {
        Self {
            shape,
            strides: default_strides(&shape),
            cursor: [0; N],
            front: 0,
            back: shape::size(&shape),
        }
    }

    pub fn shape(&self) -> [usize; N] { self.shape }
}

impl<const N: usize> Iterator for Coords<N> {
    type Item = [usize; N];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back { return None; }
        let coords = self.cursor;
        self.front += 1;
        advance(&mut self.cursor, &self.shape);
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        if self.front < self.back {
            self.cursor = unravel(self.front, &self.strides);
        }
        self.next()
    }
}

impl<const N: usize> DoubleEndedIterator for Coords<N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back { return None; }
        self.back -= 1;
        Some(unravel(self.back, &self.strides))
    }
}

impl<const N: usize> ExactSizeIterator for Coords<N> {}

impl<const N: usize> FusedIterator for Coords<N> {}

// ----------------------------------------------------------------------------

/// A random-access position within a shape, counted in row-major order.
///
/// Positions range over `0..=size`, the last one being one past the end.
///
/// ```
/// use ndview::traverse::Cursor;
/// let begin = Cursor::new([3, 4]);
/// let c = begin + 6;
/// assert_eq!(c.coords(), [1, 2]);
/// assert_eq!(c - begin, 6);
/// assert_eq!((c - 2).coords(), [1, 0]);
/// assert_eq!(Cursor::end([3, 4]) - c, 6);
/// ```
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor<const N: usize> {
    shape: [usize; N],
    index: usize,
}

impl<const N: usize> Cursor<N> {
    /// The first position.
    pub fn new(shape: [usize; N]) -> Self { Self { shape, index: 0 } }

    /// One past the last position.
    pub fn end(shape: [usize; N]) -> Self { Self { shape, index: shape::size(&shape) } }

    /// The position of `coords`.
    pub fn at(shape: [usize; N], coords: [usize; N]) -> Result<Self> {
        shape::check_coords(&shape, &coords)?;
        let index = shape::linear_offset(&coords, &default_strides(&shape)) as usize;
        Ok(Self { shape, index })
    }

    pub fn shape(&self) -> [usize; N] { self.shape }

    /// The number of positions before `self`.
    pub fn index(&self) -> usize { self.index }

    /// Returns `true` for the one-past-the-end position.
    pub fn is_end(&self) -> bool { self.index >= shape::size(&self.shape) }

    /// The coordinates at this position.
    ///
    /// Must not be called on the one-past-the-end position.
    pub fn coords(&self) -> [usize; N] {
        assert!(!self.is_end(), "Cursor {:?} is past the end", self);
        unravel(self.index, &default_strides(&self.shape))
    }

    fn moved(self, delta: isize) -> Self {
        match self.index.checked_add_signed(delta) {
            Some(index) if index <= shape::size(&self.shape) => Self { shape: self.shape, index },
            _ => panic!("Cursor {:?} moved by {} is out of range", self, delta),
        }
    }
}

impl<const N: usize> Add<isize> for Cursor<N> {
    type Output = Self;
    fn add(self, delta: isize) -> Self { self.moved(delta) }
}

impl<const N: usize> Sub<isize> for Cursor<N> {
    type Output = Self;
    fn sub(self, delta: isize) -> Self { self.moved(-delta) }
}

impl<const N: usize> AddAssign<isize> for Cursor<N> {
    fn add_assign(&mut self, delta: isize) { *self = self.moved(delta); }
}

impl<const N: usize> SubAssign<isize> for Cursor<N> {
    fn sub_assign(&mut self, delta: isize) { *self = self.moved(-delta); }
}

impl<const N: usize> Sub for Cursor<N> {
    type Output = isize;
    fn sub(self, other: Self) -> isize {
        assert_eq!(self.shape, other.shape, "Cursors belong to different shapes");
        self.index as isize - other.index as isize
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major() {
        let mut seen = Vec::new();
        for_each([2, 2, 2], |c| seen.push(c));
        assert_eq!(seen, [
            [0, 0, 0], [0, 0, 1], [0, 1, 0], [0, 1, 1],
            [1, 0, 0], [1, 0, 1], [1, 1, 0], [1, 1, 1],
        ]);
    }

    #[test]
    fn scalar_is_visited_once() {
        let mut count = 0;
        for_each::<0>([], |c| {
            assert_eq!(c, [0usize; 0]);
            count += 1;
        });
        assert_eq!(count, 1);
        assert_eq!(Coords::<0>::new([]).count(), 1);
    }

    #[test]
    fn empty_axis_is_never_visited() {
        let mut count = 0;
        for_each([3, 0, 2], |_| count += 1);
        assert_eq!(count, 0);
        assert_eq!(Coords::new([3, 0, 2]).len(), 0);
    }

    #[test]
    fn short_circuit() {
        let mut visited = 0;
        let flow = try_for_each([10, 10], |c| {
            visited += 1;
            if c == [0, 4] { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        });
        assert!(flow.is_break());
        assert_eq!(visited, 5);
    }

    #[test]
    fn coords_both_ends() {
        let mut coords = Coords::new([2, 3]);
        assert_eq!(coords.len(), 6);
        assert_eq!(coords.next(), Some([0, 0]));
        assert_eq!(coords.next_back(), Some([1, 2]));
        assert_eq!(coords.nth(2), Some([1, 0]));
        assert_eq!(coords.len(), 1);
        assert_eq!(coords.next(), Some([1, 1]));
        assert_eq!(coords.next(), None);
        assert_eq!(coords.next_back(), None);
    }

    #[test]
    fn cursor_arithmetic() {
        let shape = [2, 3];
        let mut c = Cursor::at(shape, [1, 0]).unwrap();
        assert_eq!(c.index(), 3);
        c += 2;
        assert_eq!(c.coords(), [1, 2]);
        c -= 5;
        assert_eq!(c, Cursor::new(shape));
        assert!((c + 6).is_end());
        assert!(Cursor::at(shape, [2, 0]).is_err());
    }

    #[test]
    #[should_panic]
    fn cursor_before_begin() {
        let _ = Cursor::new([2, 3]) - 1;
    }
}
