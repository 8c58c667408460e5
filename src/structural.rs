//! Lazy views that rearrange the elements of other views.
//!
//! Each adapter here maps an incoming coordinate to a coordinate of one of
//! its sources and reads the source there. None of them computes new values,
//! so each one is [`Addressable`] when its sources are (except [`Shifted`],
//! whose fill value has no cell, and [`Choose`]).

use std::cell::Cell;

use super::{config, impl_ops_for_view, shape, Addressable, Error, Result, SliceSpec, View};

// ----------------------------------------------------------------------------

/// The result of [`View::reshape()`].
#[derive(Debug, Clone)]
pub struct Reshape<V, const M: usize, const N: usize> {
    source: V,
    shape: [usize; N],
    strides: [isize; N],
    source_strides: [isize; M],
}

impl<V: View<M>, const M: usize, const N: usize> Reshape<V, M, N> {
    pub(crate) fn new(source: V, shape: [usize; N]) -> Result<Self> {
        let source_shape = source.shape();
        let expected = shape::size(&source_shape);
        let got = shape::size(&shape);
        if expected != got {
            return Err(Error::Length { expected, got });
        }
        Ok(Self {
            source,
            shape,
            strides: shape::default_strides(&shape),
            source_strides: shape::default_strides(&source_shape),
        })
    }

    #[inline(always)]
    fn source_coords(&self, coords: [usize; N]) -> [usize; M] {
        let index = shape::linear_offset(&coords, &self.strides) as usize;
        shape::unravel(index, &self.source_strides)
    }
}

impl<V: View<M>, const M: usize, const N: usize> View<N> for Reshape<V, M, N> {
    type T = V::T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.shape }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T { self.source.at(self.source_coords(coords)) }
}

impl<V: Addressable<M>, const M: usize, const N: usize> Addressable<N> for Reshape<V, M, N> {
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<V::T> { self.source.cell(self.source_coords(coords)) }
}

impl_ops_for_view!(N; [V, const M: usize, const N: usize] Reshape<V, M, N>);

// ----------------------------------------------------------------------------

/// The result of [`View::roll()`].
#[derive(Debug, Clone)]
pub struct Roll<V, const N: usize> {
    source: V,
    shift: [isize; N],
}

impl<V: View<N>, const N: usize> Roll<V, N> {
    pub(crate) fn new(source: V, shift: [isize; N]) -> Self { Self { source, shift } }

    #[inline(always)]
    fn source_coords(&self, coords: [usize; N]) -> [usize; N] {
        let shape = self.source.shape();
        let mut out = coords;
        for (axis, c) in out.iter_mut().enumerate() {
            let n = shape[axis];
            if n > 0 {
                let back = self.shift[axis].rem_euclid(n as isize) as usize;
                *c = (*c + n - back) % n;
            }
        }
        out
    }
}

impl<V: View<N>, const N: usize> View<N> for Roll<V, N> {
    type T = V::T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.source.shape() }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T { self.source.at(self.source_coords(coords)) }
}

impl<V: Addressable<N>, const N: usize> Addressable<N> for Roll<V, N> {
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<V::T> { self.source.cell(self.source_coords(coords)) }
}

impl_ops_for_view!(N; [V, const N: usize] Roll<V, N>);

// ----------------------------------------------------------------------------

/// The result of [`View::sliced()`].
#[derive(Debug, Clone)]
pub struct SliceView<V, const N: usize> {
    source: V,
    spec: SliceSpec<N>,
}

impl<V: View<N>, const N: usize> SliceView<V, N> {
    pub(crate) fn new(source: V, spec: &SliceSpec<N>) -> Result<Self> {
        if config::bounds_checking() {
            spec.check(&source.shape())?;
        }
        Ok(Self { source, spec: *spec })
    }

    pub fn spec(&self) -> &SliceSpec<N> { &self.spec }
}

impl<V: View<N>, const N: usize> View<N> for SliceView<V, N> {
    type T = V::T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.spec.sizes() }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T { self.source.at(self.spec.source_coords(coords)) }
}

impl<V: Addressable<N>, const N: usize> Addressable<N> for SliceView<V, N> {
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<V::T> {
        self.source.cell(self.spec.source_coords(coords))
    }
}

impl_ops_for_view!(N; [V, const N: usize] SliceView<V, N>);

// ----------------------------------------------------------------------------

/// The result of [`View::fix_axis()`].
#[derive(Debug, Clone)]
pub struct FixAxis<V, const M: usize, const N: usize> {
    source: V,
    axis: usize,
    index: usize,
}

impl<V: View<M>, const M: usize, const N: usize> FixAxis<V, M, N> {
    pub(crate) fn new(source: V, axis: usize, index: usize) -> Result<Self> {
        shape::check_rank(M, N + 1)?;
        shape::check_axis(axis, M)?;
        let extent = source.shape()[axis];
        if config::bounds_checking() && index >= extent {
            return Err(Error::Index { axis, index, size: extent });
        }
        Ok(Self { source, axis, index })
    }
}

impl<V: View<M>, const M: usize, const N: usize> View<N> for FixAxis<V, M, N> {
    type T = V::T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { shape::remove_axis(&self.source.shape(), self.axis) }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T {
        self.source.at(shape::insert_axis(&coords, self.axis, self.index))
    }
}

impl<V: Addressable<M>, const M: usize, const N: usize> Addressable<N> for FixAxis<V, M, N> {
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<V::T> {
        self.source.cell(shape::insert_axis(&coords, self.axis, self.index))
    }
}

impl_ops_for_view!(N; [V, const M: usize, const N: usize] FixAxis<V, M, N>);

// ----------------------------------------------------------------------------

/// The result of [`View::permute()`].
#[derive(Debug, Clone)]
pub struct Permute<V, const N: usize> {
    source: V,
    axes: [usize; N],
}

impl<V: View<N>, const N: usize> Permute<V, N> {
    pub(crate) fn new(source: V, axes: [usize; N]) -> Result<Self> {
        shape::check_permutation(&axes)?;
        Ok(Self { source, axes })
    }

    #[inline(always)]
    fn source_coords(&self, coords: [usize; N]) -> [usize; N] {
        let mut out = [0; N];
        for (i, &axis) in self.axes.iter().enumerate() {
            out[axis] = coords[i];
        }
        out
    }
}

impl<V: View<N>, const N: usize> View<N> for Permute<V, N> {
    type T = V::T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] {
        let shape = self.source.shape();
        self.axes.map(|axis| shape[axis])
    }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T { self.source.at(self.source_coords(coords)) }
}

impl<V: Addressable<N>, const N: usize> Addressable<N> for Permute<V, N> {
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<V::T> { self.source.cell(self.source_coords(coords)) }
}

impl_ops_for_view!(N; [V, const N: usize] Permute<V, N>);

// ----------------------------------------------------------------------------

/// The result of [`View::concat()`].
///
/// Coordinates before the cut point along `axis` read `first`; the rest read
/// `second`.
#[derive(Debug, Clone)]
pub struct Concat<V, W, const N: usize> {
    first: V,
    second: W,
    axis: usize,
    cut: usize,
}

impl<V: View<N>, W: View<N, T = V::T>, const N: usize> Concat<V, W, N> {
    pub(crate) fn new(first: V, second: W, axis: usize) -> Result<Self> {
        shape::check_axis(axis, N)?;
        let (a, b) = (first.shape(), second.shape());
        if config::bounds_checking() {
            let others_match = (0..N).all(|i| i == axis || a[i] == b[i]);
            if !others_match {
                return Err(Error::mismatch(&a, &b));
            }
        }
        Ok(Self { first, second, axis, cut: a[axis] })
    }
}

impl<V: View<N>, W: View<N, T = V::T>, const N: usize> View<N> for Concat<V, W, N> {
    type T = V::T;

    fn shape(&self) -> [usize; N] {
        let mut shape = self.first.shape();
        shape[self.axis] += self.second.shape()[self.axis];
        shape
    }

    #[inline(always)]
    fn at(&self, mut coords: [usize; N]) -> V::T {
        if coords[self.axis] < self.cut {
            self.first.at(coords)
        } else {
            coords[self.axis] -= self.cut;
            self.second.at(coords)
        }
    }
}

impl<V: Addressable<N>, W: Addressable<N, T = V::T>, const N: usize> Addressable<N> for Concat<V, W, N> {
    #[inline(always)]
    fn cell(&self, mut coords: [usize; N]) -> &Cell<V::T> {
        if coords[self.axis] < self.cut {
            self.first.cell(coords)
        } else {
            coords[self.axis] -= self.cut;
            self.second.cell(coords)
        }
    }
}

impl_ops_for_view!(N; [V, W, const N: usize] Concat<V, W, N>);

// ----------------------------------------------------------------------------

/// Views of rank `M` stacked along a new leading axis, giving rank `N`.
#[derive(Debug, Clone)]
pub struct Stack<V, const M: usize, const N: usize> {
    sources: Vec<V>,
}

/// Stacks `sources`, which must all have the same shape, along a new first
/// axis. `N` must be `M + 1`.
///
/// Fails with [`Error::Range`] if there are no sources.
///
/// ```
/// use ndview::{delayed, stack, View};
/// let rows = (0..3).map(|i| delayed([2], move |[j]| i * 10 + j));
/// let s = stack::<_, 1, 2>(rows).unwrap();
/// assert_eq!(s.shape(), [3, 2]);
/// assert_eq!(s.at([2, 1]), 21);
/// ```
pub fn stack<V: View<M>, const M: usize, const N: usize>(
    sources: impl IntoIterator<Item = V>,
) -> Result<Stack<V, M, N>> {
    shape::check_rank(M + 1, N)?;
    let sources: Vec<V> = sources.into_iter().collect();
    let Some(first) = sources.first() else {
        return Err(Error::Range { index: 0, count: 0 });
    };
    if config::bounds_checking() {
        let shape = first.shape();
        for source in &sources[1..] {
            shape::check_same_shape(&shape, &source.shape())?;
        }
    }
    Ok(Stack { sources })
}

impl<V: View<M>, const M: usize, const N: usize> Stack<V, M, N> {
    pub fn sources(&self) -> &[V] { &self.sources }
}

impl<V: View<M>, const M: usize, const N: usize> View<N> for Stack<V, M, N> {
    type T = V::T;

    fn shape(&self) -> [usize; N] { shape::insert_axis(&self.sources[0].shape(), 0, self.sources.len()) }

    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T {
        self.sources[coords[0]].at(shape::remove_axis(&coords, 0))
    }
}

impl<V: Addressable<M>, const M: usize, const N: usize> Addressable<N> for Stack<V, M, N> {
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<V::T> {
        self.sources[coords[0]].cell(shape::remove_axis(&coords, 0))
    }
}

impl_ops_for_view!(N; [V, const M: usize, const N: usize] Stack<V, M, N>);

// ----------------------------------------------------------------------------

/// The result of [`View::shifted()`].
#[derive(Debug, Clone)]
pub struct Shifted<V: View<N>, const N: usize> {
    source: V,
    shift: [isize; N],
    fill: V::T,
}

impl<V: View<N>, const N: usize> Shifted<V, N> {
    pub(crate) fn new(source: V, shift: [isize; N], fill: V::T) -> Self {
        Self { source, shift, fill }
    }
}

impl<V: View<N>, const N: usize> View<N> for Shifted<V, N> {
    type T = V::T;

    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.source.shape() }

    fn at(&self, coords: [usize; N]) -> V::T {
        let shape = self.source.shape();
        let mut source = [0; N];
        for axis in 0..N {
            match (coords[axis] as isize).checked_sub(self.shift[axis]) {
                Some(c) if c >= 0 && c < shape[axis] as isize => source[axis] = c as usize,
                _ => return self.fill.clone(),
            }
        }
        self.source.at(source)
    }
}

impl_ops_for_view!(N; [V: View<N>, const N: usize] Shifted<V, N>);

// ----------------------------------------------------------------------------

/// Picks each element from the source that a selector names.
#[derive(Debug, Clone)]
pub struct Choose<S, V, const N: usize> {
    selector: S,
    sources: Vec<V>,
}

/// Creates a view whose element at `c` is `sources[selector.at(c)].at(c)`.
///
/// Fails with [`Error::Range`] if a selector value does not name a source,
/// and with [`Error::DimensionMismatch`] if a source's shape differs from the
/// selector's. Both checks happen here, when bound checking is enabled.
///
/// ```
/// use ndview::{choose, delayed, Array, View};
/// let mask = delayed([4], |[i]| i % 2);
/// let low: Array<i32, 1> = Array::from_fn([4], |[i]| i as i32);
/// let high: Array<i32, 1> = Array::from_fn([4], |[i]| -(i as i32));
/// let mixed = choose(mask, vec![low, high]).unwrap();
/// assert_eq!(mixed.collect::<Vec<_>>(), [0, -1, 2, -3]);
/// ```
pub fn choose<S, V, const N: usize>(selector: S, sources: Vec<V>) -> Result<Choose<S, V, N>> where
    S: View<N, T = usize>,
    V: View<N>,
{
    if config::bounds_checking() {
        let shape = selector.shape();
        for source in &sources {
            shape::check_same_shape(&shape, &source.shape())?;
        }
        let count = sources.len();
        if let Some(index) = selector.iter().find(|&index| index >= count) {
            return Err(Error::Range { index, count });
        }
    }
    Ok(Choose { selector, sources })
}

impl<S: View<N, T = usize>, V: View<N>, const N: usize> View<N> for Choose<S, V, N> {
    type T = V::T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.selector.shape() }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T { self.sources[self.selector.at(coords)].at(coords) }
}

impl_ops_for_view!(N; [S, V, const N: usize] Choose<S, V, N>);

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{delayed, Array, AxisSlice, ErrorKind};

    fn grid() -> Array<i32, 2> { Array::from_fn([2, 3], |[i, j]| (i * 3 + j) as i32) }

    #[test]
    fn reshape() {
        let r = grid().reshape([3, 2]).unwrap();
        assert_eq!(r.at([2, 0]), 4);
        assert_eq!(r.collect::<Vec<_>>(), grid().to_vec());
        let a = grid();
        let flat = a.view().reshape([6]).unwrap();
        flat.set([4], 40).unwrap();
        assert_eq!(a.at([1, 1]), 40);
        assert_eq!(grid().reshape([4, 2]).unwrap_err(), Error::Length { expected: 6, got: 8 });
        let t = grid().permute([1, 0]).unwrap().reshape([6]).unwrap();
        assert_eq!(t.collect::<Vec<_>>(), [0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn roll() {
        let r = grid().roll([1, -1]);
        assert_eq!(r.collect::<Vec<_>>(), [4, 5, 3, 1, 2, 0]);
        let a = grid();
        a.view().roll([0, 2]).set([0, 0], 9).unwrap();
        assert_eq!(a.at([0, 1]), 9);
    }

    #[test]
    fn extreme_shifts() {
        let far = grid().roll([isize::MIN, isize::MAX]);
        assert_eq!(far.collect::<Vec<_>>(), grid().roll([0, 1]).collect::<Vec<_>>());
        let gone = grid().shifted([isize::MIN, 0], 7);
        assert!(gone.all(|x| x == 7));
        let gone = grid().shifted([0, isize::MAX], 7);
        assert!(gone.all(|x| x == 7));
        let empty: Array<i32, 2> = Array::zeros([0, 3]);
        assert_eq!(empty.roll([isize::MIN, 1]).size(), 0);
    }

    #[test]
    fn sliced() {
        let a = grid();
        let spec = SliceSpec::new([AxisSlice::full(2), AxisSlice::new(2, 2, -2)]);
        let lazy = delayed([2, 3], |[i, j]| (i * 3 + j) as i32).sliced(&spec).unwrap();
        let eager = a.slice(&spec).unwrap();
        assert_eq!(lazy.collect::<Vec<_>>(), eager.to_vec());
        assert_eq!(lazy.spec().sizes(), [2, 2]);
        let bad = SliceSpec::new([AxisSlice::full(2), AxisSlice::new(1, 3, 1)]);
        assert_eq!(a.view().sliced(&bad).unwrap_err().kind(), ErrorKind::Length);
        a.view().sliced(&spec).unwrap().fill(-1);
        assert_eq!(a.to_vec(), [-1, 1, -1, -1, 4, -1]);
    }

    #[test]
    fn fix_axis() {
        let column = grid().fix_axis::<1>(1, 2).unwrap();
        assert_eq!(column.shape(), [2]);
        assert_eq!(column.collect::<Vec<_>>(), [2, 5]);
        assert_eq!(grid().fix_axis::<1>(2, 0).unwrap_err(), Error::Axis { axis: 2, rank: 2 });
        assert_eq!(grid().fix_axis::<1>(0, 2).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(grid().fix_axis::<2>(0, 0).unwrap_err().kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn permute() {
        let cube = delayed([2, 3, 4], |[i, j, k]| i * 100 + j * 10 + k);
        let p = (&cube).permute([2, 0, 1]).unwrap();
        assert_eq!(p.shape(), [4, 2, 3]);
        assert_eq!(p.at([3, 1, 2]), 123);
        assert_eq!(cube.permute([0, 0, 1]).err(), Some(Error::DuplicateAxis { axis: 0 }));
    }

    #[test]
    fn concat() {
        let a = grid();
        let b: Array<i32, 2> = Array::from_elem([1, 3], 7);
        let c = a.view().concat(b.view(), 0).unwrap();
        assert_eq!(c.shape(), [3, 3]);
        assert_eq!(c.at([2, 1]), 7);
        assert_eq!(c.at([1, 1]), 4);
        c.set([2, 0], 8).unwrap();
        assert_eq!(b.at([0, 0]), 8);
        assert_eq!(a.view().concat(b, 1).unwrap_err().kind(), ErrorKind::DimensionMismatch);
        assert_eq!(a.view().concat(a.view(), 2).unwrap_err().kind(), ErrorKind::Index);
    }

    #[test]
    fn stacking() {
        let planes = vec![grid(), grid().copy(), grid().copy()];
        let s = stack::<_, 2, 3>(planes.clone()).unwrap();
        assert_eq!(s.shape(), [3, 2, 3]);
        s.set([2, 1, 1], 0).unwrap();
        assert_eq!(planes[2].at([1, 1]), 0);
        assert_eq!(s.sources().len(), 3);
        let none: Vec<Array<i32, 2>> = Vec::new();
        assert_eq!(stack::<_, 2, 3>(none).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(stack::<_, 2, 2>(planes.clone()).unwrap_err().kind(), ErrorKind::DimensionMismatch);
        let ragged = vec![grid(), Array::zeros([3, 2])];
        assert_eq!(stack::<_, 2, 3>(ragged).unwrap_err().kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn shifted() {
        let s = grid().shifted([1, 0], -1);
        assert_eq!(s.collect::<Vec<_>>(), [-1, -1, -1, 0, 1, 2]);
        let s = grid().shifted([0, -2], 0);
        assert_eq!(s.collect::<Vec<_>>(), [2, 0, 0, 5, 0, 0]);
    }

    #[test]
    fn choosing() {
        let selector = delayed([2, 3], |[i, _]| i);
        let mixed = choose(selector, vec![grid(), (-grid()).to_array()]).unwrap();
        assert_eq!(mixed.collect::<Vec<_>>(), [0, 1, 2, -3, -4, -5]);
        let bad = choose(delayed([2, 3], |_| 2usize), vec![grid(), grid()]);
        assert_eq!(bad.err(), Some(Error::Range { index: 2, count: 2 }));
        let narrow = choose(delayed([2, 2], |_| 0usize), vec![grid()]);
        assert_eq!(narrow.err().map(|e| e.kind()), Some(ErrorKind::DimensionMismatch));
    }
}
