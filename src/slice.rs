//! Rectangular, strided sub-views.
//!
//! An [`AxisSlice`] selects `size` indices of one axis, starting at `start`
//! and advancing by `step` (which may be negative). A [`SliceSpec`] holds one
//! per axis. Applied to an [`Array`] it produces a view sharing the same
//! buffer ([`Array::slice()`]); applied to any other [`View`] it produces a
//! lazy [`SliceView`] ([`View::sliced()`]).
//!
//! [`Array`]: super::Array
//! [`Array::slice()`]: super::Array::slice()
//! [`View`]: super::View
//! [`View::sliced()`]: super::View::sliced()
//! [`SliceView`]: super::structural::SliceView

use std::ops::Range;

use super::{shape, Error, Result};

/// The indices `start, start + step, ..., start + (size - 1) * step` of one
/// axis.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct AxisSlice {
    pub start: usize,
    pub size: usize,
    pub step: isize,
}

impl AxisSlice {
    pub fn new(start: usize, size: usize, step: isize) -> Self { Self { start, size, step } }

    /// The indices `start..end`.
    pub fn range(start: usize, end: usize) -> Self { Self::new(start, end.saturating_sub(start), 1) }

    /// Every index of an axis of length `extent`.
    pub fn full(extent: usize) -> Self { Self::new(0, extent, 1) }

    /// The single index `index`. The axis is kept, with length `1`.
    pub fn index(index: usize) -> Self { Self::new(index, 1, 1) }

    /// The index within the sliced axis that position `i` of the slice
    /// refers to.
    #[inline(always)]
    pub fn source(&self, i: usize) -> usize {
        (self.start as isize + i as isize * self.step) as usize
    }

    /// Returns the slice that results from applying `inner` to the output of
    /// `self`.
    ///
    /// ```
    /// use ndview::AxisSlice;
    /// let evens = AxisSlice::new(0, 5, 2);
    /// let back = AxisSlice::new(4, 3, -1);
    /// assert_eq!(evens.compose(&back), AxisSlice::new(8, 3, -2));
    /// ```
    pub fn compose(&self, inner: &AxisSlice) -> AxisSlice {
        AxisSlice::new(self.source(inner.start), inner.size, self.step * inner.step)
    }

    /// Checks that every selected index is within an axis of length
    /// `extent`.
    ///
    /// An empty slice may start at `extent`.
    pub fn check(&self, axis: usize, extent: usize) -> Result<()> {
        let fits_start = if self.size == 0 { self.start <= extent } else { self.start < extent };
        if !fits_start {
            return Err(Error::Index { axis, index: self.start, size: extent });
        }
        if self.step == 0 {
            return Err(self.length_error(axis, extent));
        }
        if self.size > 0 {
            let last = isize::try_from(self.size - 1)
                .ok()
                .and_then(|n| n.checked_mul(self.step))
                .and_then(|span| span.checked_add(self.start as isize));
            match last {
                Some(last) if last >= 0 && last < extent as isize => {}
                _ => return Err(self.length_error(axis, extent)),
            }
        }
        Ok(())
    }

    fn length_error(&self, axis: usize, extent: usize) -> Error {
        Error::SliceLength { axis, start: self.start, size: self.size, step: self.step, extent }
    }
}

impl From<Range<usize>> for AxisSlice {
    fn from(range: Range<usize>) -> Self { Self::range(range.start, range.end) }
}

// ----------------------------------------------------------------------------

/// One [`AxisSlice`] for each axis of an `N`-dimensional array.
///
/// ```
/// use ndview::{AxisSlice, SliceSpec};
/// let spec = SliceSpec::new([AxisSlice::range(1, 4), AxisSlice::new(1, 2, 1)]);
/// assert_eq!(spec.sizes(), [3, 2]);
/// assert_eq!(spec.source_coords([2, 1]), [3, 2]);
/// assert!(spec.check(&[4, 5]).is_ok());
/// assert!(spec.check(&[3, 5]).is_err());
/// ```
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct SliceSpec<const N: usize> {
    axes: [AxisSlice; N],
}

impl<const N: usize> SliceSpec<N> {
    pub fn new(axes: [AxisSlice; N]) -> Self { Self { axes } }

    /// Selects everything of an array of shape `shape`.
    pub fn full(shape: [usize; N]) -> Self { Self::new(shape.map(AxisSlice::full)) }

    /// Replaces the slice of `axis`.
    pub fn with(mut self, axis: usize, slice: AxisSlice) -> Result<Self> {
        shape::check_axis(axis, N)?;
        self.axes[axis] = slice;
        Ok(self)
    }

    /// Appends `slice` as a new last axis. `M` must be `N + 1`.
    ///
    /// This composes one-dimensional slices left to right into an
    /// `M`-dimensional one.
    ///
    /// ```
    /// use ndview::{AxisSlice, SliceSpec};
    /// let spec = SliceSpec::new([AxisSlice::full(4)])
    ///     .extend::<2>(AxisSlice::new(0, 3, 2))
    ///     .unwrap();
    /// assert_eq!(spec.steps(), [1, 2]);
    /// ```
    pub fn extend<const M: usize>(&self, slice: AxisSlice) -> Result<SliceSpec<M>> {
        shape::check_rank(N + 1, M)?;
        let mut axes = [AxisSlice::full(0); M];
        axes[..N].copy_from_slice(&self.axes);
        axes[N] = slice;
        Ok(SliceSpec::new(axes))
    }

    /// Returns the `SliceSpec` that results from applying `inner` to the output of
    /// `self`, axis by axis.
    pub fn compose(&self, inner: &SliceSpec<N>) -> Self {
        let mut axes = self.axes;
        for (axis, slice) in axes.iter_mut().enumerate() {
            *slice = slice.compose(&inner.axes[axis]);
        }
        Self::new(axes)
    }

    /// Checks that every selected coordinate is within `shape`.
    ///
    /// Fails with [`Error::Index`] if a start is out of range, and with
    /// [`Error::SliceLength`] if a slice runs off its axis or has a zero
    /// step. An empty slice may start one past the end of its axis.
    pub fn check(&self, shape: &[usize; N]) -> Result<()> {
        for (axis, slice) in self.axes.iter().enumerate() {
            slice.check(axis, shape[axis])?;
        }
        Ok(())
    }

    /// The coordinates of the sliced array that `coords` refers to.
    #[inline]
    pub fn source_coords(&self, coords: [usize; N]) -> [usize; N] {
        let mut out = coords;
        for (axis, c) in out.iter_mut().enumerate() {
            *c = self.axes[axis].source(*c);
        }
        out
    }

    pub fn axes(&self) -> &[AxisSlice; N] { &self.axes }

    pub fn starts(&self) -> [usize; N] { self.axes.map(|s| s.start) }

    /// The shape of the result.
    pub fn sizes(&self) -> [usize; N] { self.axes.map(|s| s.size) }

    pub fn steps(&self) -> [isize; N] { self.axes.map(|s| s.step) }
}

impl<const N: usize> From<[AxisSlice; N]> for SliceSpec<N> {
    fn from(axes: [AxisSlice; N]) -> Self { Self::new(axes) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn axis_checks() {
        assert!(AxisSlice::full(5).check(0, 5).is_ok());
        assert!(AxisSlice::new(4, 5, -1).check(0, 5).is_ok());
        assert!(AxisSlice::new(5, 0, 1).check(0, 5).is_ok());
        assert_eq!(
            AxisSlice::new(5, 1, 1).check(2, 5),
            Err(Error::Index { axis: 2, index: 5, size: 5 }),
        );
        assert_eq!(AxisSlice::new(1, 5, 1).check(0, 5).unwrap_err().kind(), ErrorKind::Length);
        assert_eq!(AxisSlice::new(1, 3, 2).check(0, 5).unwrap_err().kind(), ErrorKind::Length);
        assert_eq!(AxisSlice::new(1, 2, -2).check(0, 5).unwrap_err().kind(), ErrorKind::Length);
        assert_eq!(AxisSlice::new(1, 2, 0).check(0, 5).unwrap_err().kind(), ErrorKind::Length);
    }

    #[test]
    fn oversized_slices() {
        let huge = AxisSlice::new(0, 1 << 62, 4);
        assert_eq!(huge.check(0, 5).unwrap_err().kind(), ErrorKind::Length);
        let backwards = AxisSlice::new(4, usize::MAX, -1);
        assert_eq!(backwards.check(0, 5).unwrap_err().kind(), ErrorKind::Length);
        let spec = SliceSpec::new([huge]);
        assert_eq!(spec.check(&[5]).unwrap_err().kind(), ErrorKind::Length);
    }

    #[test]
    fn ranges() {
        assert_eq!(AxisSlice::from(2..5), AxisSlice::new(2, 3, 1));
        assert_eq!(AxisSlice::range(4, 2).size, 0);
        assert_eq!(AxisSlice::index(3), AxisSlice::new(3, 1, 1));
    }

    #[test]
    fn composition() {
        let outer = SliceSpec::new([AxisSlice::new(1, 3, 1), AxisSlice::new(9, 5, -2)]);
        let inner = SliceSpec::new([AxisSlice::new(2, 1, 1), AxisSlice::new(1, 2, 2)]);
        let both = outer.compose(&inner);
        for c in [[0, 0], [0, 1]] {
            assert_eq!(both.source_coords(c), outer.source_coords(inner.source_coords(c)));
        }
        assert_eq!(both.sizes(), [1, 2]);
    }

    #[test]
    fn building() {
        let spec = SliceSpec::full([3, 4]).with(1, AxisSlice::index(2)).unwrap();
        assert_eq!(spec.sizes(), [3, 1]);
        assert_eq!(spec.starts(), [0, 2]);
        assert_eq!(spec.with(2, AxisSlice::full(1)), Err(Error::Axis { axis: 2, rank: 2 }));
        assert_eq!(
            spec.extend::<4>(AxisSlice::full(1)),
            Err(Error::Rank { expected: 3, got: 4 }),
        );
    }
}
