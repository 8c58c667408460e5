//! Arrays whose elements are computed on demand.

use std::cell::Cell;

use super::{impl_ops_for_view, Addressable, View};

/// An array of shape `shape` whose element at `c` is `f(c)`.
///
/// `f` is called each time an element is read; nothing is cached. Operands
/// captured by `f` (typically [`Array`]s, which are cheap to clone) live as
/// long as the `Delayed` does.
///
/// [`Array`]: super::Array
#[derive(Debug, Clone)]
pub struct Delayed<F, const N: usize> {
    shape: [usize; N],
    f: F,
}

/// Creates a [`Delayed`] array.
///
/// ```
/// use ndview::{delayed, View};
/// let table = delayed([3, 4], |[i, j]| (i + 1) * (j + 1));
/// assert_eq!(table.at([2, 3]), 12);
/// assert_eq!(table.sum(), 60);
/// ```
pub fn delayed<T: Clone, F, const N: usize>(shape: [usize; N], f: F) -> Delayed<F, N> where
    F: Fn([usize; N]) -> T,
{
    Delayed { shape, f }
}

impl<T: Clone, F, const N: usize> View<N> for Delayed<F, N> where F: Fn([usize; N]) -> T {
    type T = T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.shape }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> T { (self.f)(coords) }
}

impl_ops_for_view!(N; [F, const N: usize] Delayed<F, N>);

// ----------------------------------------------------------------------------

/// A [`View`] of rank `N` that reads its elements from a source of rank `M`
/// through a coordinate function.
///
/// This is the general modifiable delayed array: when the source is
/// [`Addressable`], so is the `Remap`, and writing to it writes the source.
#[derive(Debug, Clone)]
pub struct Remap<V, F, const M: usize, const N: usize> {
    source: V,
    shape: [usize; N],
    f: F,
}

impl<V: View<M>, F, const M: usize, const N: usize> Remap<V, F, M, N> where
    F: Fn([usize; N]) -> [usize; M],
{
    pub fn new(source: V, shape: [usize; N], f: F) -> Self { Self { source, shape, f } }

    pub fn source(&self) -> &V { &self.source }
}

/// Creates a [`Remap`] of shape `shape` over `source`.
///
/// ```
/// use ndview::{remap, Addressable, Array, View};
/// let a: Array<i32, 1> = Array::from_vec([4], vec![1, 2, 3, 4]).unwrap();
/// let reversed = remap(a.view(), [4], |[i]| [3 - i]);
/// assert_eq!(reversed.at([0]), 4);
/// reversed.set([0], 40).unwrap();
/// assert_eq!(a.to_vec(), [1, 2, 3, 40]);
/// ```
pub fn remap<V: View<M>, F, const M: usize, const N: usize>(
    source: V,
    shape: [usize; N],
    f: F,
) -> Remap<V, F, M, N> where
    F: Fn([usize; N]) -> [usize; M],
{
    Remap::new(source, shape, f)
}

impl<V: View<M>, F, const M: usize, const N: usize> View<N> for Remap<V, F, M, N> where
    F: Fn([usize; N]) -> [usize; M],
{
    type T = V::T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.shape }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T { self.source.at((self.f)(coords)) }
}

impl<V: Addressable<M>, F, const M: usize, const N: usize> Addressable<N> for Remap<V, F, M, N> where
    F: Fn([usize; N]) -> [usize; M],
{
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<V::T> { self.source.cell((self.f)(coords)) }
}

impl_ops_for_view!(N; [V, F, const M: usize, const N: usize] Remap<V, F, M, N>);

// ----------------------------------------------------------------------------

/// An array of shape `shape` whose every element is `value`.
#[derive(Debug, Clone)]
pub struct Full<T, const N: usize> {
    shape: [usize; N],
    value: T,
}

/// Creates a [`Full`] array.
pub fn full<T: Clone, const N: usize>(shape: [usize; N], value: T) -> Full<T, N> {
    Full { shape, value }
}

impl<T: Clone, const N: usize> View<N> for Full<T, N> {
    type T = T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.shape }
    #[inline(always)]
    fn at(&self, _: [usize; N]) -> T { self.value.clone() }
}

impl_ops_for_view!(N; [T, const N: usize] Full<T, N>);

// ----------------------------------------------------------------------------

/// A zero-dimensional [`View`] holding one value.
///
/// Combine it with arrays of higher rank using [`View::broadcast_binary()`]
/// or [`View::widen()`].
///
/// ```
/// use ndview::{delayed, ops, Scalar, View};
/// let v = delayed([3], |[i]| i as f64);
/// let shifted = v.broadcast_binary::<_, ops::Add, 0, 1>(Scalar(0.5)).unwrap();
/// assert_eq!(shifted.collect::<Vec<_>>(), [0.5, 1.5, 2.5]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scalar<T>(pub T);

impl<T: Clone> View<0> for Scalar<T> {
    type T = T;
    #[inline(always)]
    fn shape(&self) -> [usize; 0] { [] }
    #[inline(always)]
    fn at(&self, _: [usize; 0]) -> T { self.0.clone() }
}

macro_rules! impl_scalar_ops {
    ($($op:ident::$method:ident),*) => {$(
        impl<T: Clone, RHS> std::ops::$op<RHS> for Scalar<T> where
            RHS: View<0>,
            super::ops::$op: super::ops::Binary<T, RHS::T>,
            <super::ops::$op as super::ops::Binary<T, RHS::T> >::Output: Clone,
        {
            type Output = super::view::Zip<Self, RHS, super::ops::$op, 0>;

            fn $method(self, other: RHS) -> Self::Output {
                match View::binary(self, other) {
                    Ok(zip) => zip,
                    Err(e) => panic!("{}", e),
                }
            }
        }
    )*};
}

impl_scalar_ops!(Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, ErrorKind};

    #[test]
    fn recomputed_on_every_read() {
        let calls = Cell::new(0);
        let v = delayed([2], |[i]| {
            calls.set(calls.get() + 1);
            i * 2
        });
        assert_eq!(v.at([1]), 2);
        assert_eq!(v.at([1]), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn captured_arrays_are_live() {
        let a: Array<i32, 1> = Array::from_vec([3], vec![1, 2, 3]).unwrap();
        let captured = a.view();
        let doubled = delayed([3], move |c| captured.at(c) * 2);
        assert_eq!(doubled.at([2]), 6);
        a.set([2], 10).unwrap();
        assert_eq!(doubled.at([2]), 20);
    }

    #[test]
    fn remap_changes_rank() {
        let a: Array<i32, 2> = Array::from_fn([2, 3], |[i, j]| (i * 3 + j) as i32);
        let flat = remap(a.view(), [6], |[k]| [k / 3, k % 3]);
        assert_eq!(flat.collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5]);
        flat.fill(7);
        assert!(a.all(|x| x == 7));
        assert_eq!(flat.source().shape(), [2, 3]);
    }

    #[test]
    fn remap_checks_its_own_shape() {
        let a: Array<i32, 1> = Array::zeros([4]);
        let r = remap(a, [2], |[i]| [i * 2]);
        assert_eq!(r.get([2]).unwrap_err().kind(), ErrorKind::Index);
        assert!(r.set([1], 3).is_ok());
    }

    #[test]
    fn constants() {
        let f = full([2, 2], 1.5);
        assert_eq!(f.sum(), 6.0);
        let s = Scalar(2) * Scalar(21);
        assert_eq!(s.at([]), 42);
        assert_eq!((full([3], 2usize) + delayed([3], |[i]| i)).collect::<Vec<_>>(), [2, 3, 4]);
    }
}
