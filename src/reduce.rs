//! Reductions, over a whole [`View`] or along one axis.
//!
//! A [`Reducer`] turns a sequence of elements into one value. The marker
//! types in this module ([`Sum`], [`Product`], [`Average`], [`Variance`],
//! [`Deviation`]) implement it and can be passed to [`View::reduce()`] or
//! [`View::reduce_axis()`].

use std::marker::PhantomData;
use std::ops::Add;

use num_traits::{Float, NumCast, One, Zero};

use super::{impl_ops_for_view, shape, traverse, Array, Result, View};

/// Combines a sequence of `T` into one value.
///
/// Like [`Binary`], this trait has no methods that take `self`.
///
/// [`Binary`]: super::ops::Binary
pub trait Reducer<T> {
    type Output: Clone;

    fn reduce<I: Iterator<Item = T>>(items: I) -> Self::Output;
}

/// The sum; zero for an empty sequence.
#[derive(Debug, Copy, Clone)]
pub enum Sum {}

impl<T: Zero + Clone> Reducer<T> for Sum {
    type Output = T;
    fn reduce<I: Iterator<Item = T>>(items: I) -> T { items.fold(T::zero(), |a, b| a + b) }
}

/// The product; one for an empty sequence.
#[derive(Debug, Copy, Clone)]
pub enum Product {}

impl<T: One + Clone> Reducer<T> for Product {
    type Output = T;
    fn reduce<I: Iterator<Item = T>>(items: I) -> T { items.fold(T::one(), |a, b| a * b) }
}

/// The arithmetic mean; NaN for an empty sequence.
#[derive(Debug, Copy, Clone)]
pub enum Average {}

impl<T: Float> Reducer<T> for Average {
    type Output = T;
    fn reduce<I: Iterator<Item = T>>(items: I) -> T {
        let (n, total) = items.fold((0, T::zero()), |(n, total), x| (n + 1, total + x));
        if n == 0 { T::nan() } else { total / count(n) }
    }
}

/// The population variance (divides by the count); NaN for an empty
/// sequence.
#[derive(Debug, Copy, Clone)]
pub enum Variance {}

impl<T: Float> Reducer<T> for Variance {
    type Output = T;
    fn reduce<I: Iterator<Item = T>>(items: I) -> T { variance(items) }
}

/// The square root of the [`Variance`].
#[derive(Debug, Copy, Clone)]
pub enum Deviation {}

impl<T: Float> Reducer<T> for Deviation {
    type Output = T;
    fn reduce<I: Iterator<Item = T>>(items: I) -> T { variance(items).sqrt() }
}

fn count<T: Float>(n: usize) -> T { <T as NumCast>::from(n).unwrap_or_else(T::nan) }

/// Welford's single-pass algorithm.
fn variance<T: Float>(items: impl Iterator<Item = T>) -> T {
    let mut n = 0;
    let mut mean = T::zero();
    let mut m2 = T::zero();
    for x in items {
        n += 1;
        let delta = x - mean;
        mean = mean + delta / count(n);
        m2 = m2 + delta * (x - mean);
    }
    if n == 0 { T::nan() } else { m2 / count(n) }
}

// ----------------------------------------------------------------------------

/// The coordinates of the first element `t` for which `better(t, best)` held
/// against every earlier candidate.
pub(crate) fn arg_best<V: View<N>, const N: usize>(
    view: &V,
    better: impl Fn(&V::T, &V::T) -> bool,
) -> Option<[usize; N]> {
    let mut best: Option<(V::T, [usize; N])> = None;
    traverse::for_each(view.shape(), |coords| {
        let t = view.at(coords);
        let replace = match &best {
            Some((b, _)) => better(&t, b),
            None => true,
        };
        if replace { best = Some((t, coords)); }
    });
    best.map(|(_, coords)| coords)
}

pub(crate) fn cumsum<V: View<N>, const N: usize>(view: &V, axis: usize) -> Result<Array<V::T, N>> where
    V::T: Copy + Add<Output = V::T>,
{
    shape::check_axis(axis, N)?;
    let shape = view.shape();
    tracing::trace!(?shape, axis, "cumulative sum");
    let stride = shape::default_strides(&shape)[axis] as usize;
    let mut data: Vec<V::T> = Vec::with_capacity(shape::size(&shape));
    traverse::for_each(shape, |coords| {
        let t = view.at(coords);
        let t = if coords[axis] > 0 { data[data.len() - stride] + t } else { t };
        data.push(t);
    });
    Array::from_vec(shape, data)
}

// ----------------------------------------------------------------------------

/// The result of [`View::reduce_axis()`]: a `View` of rank `N = M - 1` whose
/// element at `c` reduces the elements of the source along `axis` at `c`.
///
/// The reduction is recomputed on every read.
#[derive(Debug, Clone)]
pub struct ReduceAxis<V, R, const M: usize, const N: usize> {
    source: V,
    axis: usize,
    reducer: PhantomData<R>,
}

impl<V: View<M>, R: Reducer<V::T>, const M: usize, const N: usize> ReduceAxis<V, R, M, N> {
    pub(crate) fn new(source: V, axis: usize) -> Result<Self> {
        shape::check_rank(M, N + 1)?;
        shape::check_axis(axis, M)?;
        Ok(Self { source, axis, reducer: PhantomData })
    }

    pub fn axis(&self) -> usize { self.axis }
}

impl<V: View<M>, R: Reducer<V::T>, const M: usize, const N: usize> View<N> for ReduceAxis<V, R, M, N> {
    type T = R::Output;

    #[inline(always)]
    fn shape(&self) -> [usize; N] { shape::remove_axis(&self.source.shape(), self.axis) }

    fn at(&self, coords: [usize; N]) -> R::Output {
        let extent = self.source.shape()[self.axis];
        R::reduce((0..extent).map(|i| self.source.at(shape::insert_axis(&coords, self.axis, i))))
    }
}

impl_ops_for_view!(N; [V, R, const M: usize, const N: usize] ReduceAxis<V, R, M, N>);

// ----------------------------------------------------------------------------
