use std::cell::Cell;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{ControlFlow, Deref};

use num_traits::Float;

use super::broadcast::{self, Broadcast, WidenRight};
use super::delayed::Remap;
use super::ops::{self, Binary};
use super::reduce::{self, Average, Deviation, ReduceAxis, Reducer, Sum, Variance};
use super::structural::{Concat, FixAxis, Permute, Reshape, Roll, Shifted, SliceView};
use super::traverse::{self, Coords};
use super::{config, impl_ops_for_view, shape, Array, Result, SliceSpec};

/// Construct a collection from the elements of a [`View`]. This is used to
/// implement [`View::collect()`].
pub trait FromView<T, const N: usize>: Sized {
    /// Reads every element of `view` exactly once, in row-major order.
    fn from_view<V: View<N, T = T>>(view: &V) -> Self;
}

impl<T: Clone, const N: usize> FromView<T, N> for Vec<T> {
    fn from_view<V: View<N, T = T>>(view: &V) -> Self {
        let mut items = Vec::with_capacity(view.size());
        view.each(|t| items.push(t));
        items
    }
}

// ----------------------------------------------------------------------------

/// Implemented by types that behave like an `N`-dimensional array of
/// `Self::T`s, whether they store their elements ([`Array`]) or compute them
/// on demand (every other implementation in this crate).
///
/// This is the one indexing contract of the crate: a shape and a way to read
/// the element at a coordinate. Everything else, from arithmetic to
/// reductions, is provided on top of those two methods, and works the same
/// for stored and computed arrays.
///
/// ### Laziness
///
/// Methods that return another `View` (e.g. [`map()`], [`roll()`],
/// [`sum_axis()`]) do no work beyond validating their arguments. The result
/// computes each element when it is asked for, every time it is asked for.
/// Call [`to_array()`] or [`collect()`] to materialize one.
///
/// ### Arithmetic
///
/// All implementations of `View` defined in this crate define the standard
/// Rust arithmetic and bitwise operators to mean pointwise arithmetic. For
/// example, `(v + w).at(c)` gives the same answer as `v.at(c) + w.at(c)`.
/// The operands must have the same shape; [`binary()`] is the non-panicking
/// form, and [`broadcast_binary()`] combines operands of different ranks.
///
/// You are encouraged to define your `View`s similarly, e.g. using the macro
/// [`impl_ops_for_view`] which is provided for this purpose.
///
/// ### Ownership
///
/// If `V` implements `View`, then so do `&V`, `Box<V>`, `Rc<V>` and all other
/// types that [`Deref`] to `V`. The `View` structures you build are therefore
/// agnostic about the ownership of the data they access.
///
/// ```
/// use ndview::{delayed, Array, View};
/// let ramp = delayed([2, 3], |[i, j]| i * 3 + j);
/// let a: Array<usize, 2> = std::rc::Rc::new(ramp).to_array();
/// assert_eq!(a.to_vec(), [0, 1, 2, 3, 4, 5]);
/// ```
///
/// [`Array`]: super::Array
/// [`map()`]: View::map()
/// [`roll()`]: View::roll()
/// [`sum_axis()`]: View::sum_axis()
/// [`to_array()`]: View::to_array()
/// [`collect()`]: View::collect()
/// [`binary()`]: View::binary()
/// [`broadcast_binary()`]: View::broadcast_binary()
/// [`impl_ops_for_view`]: crate::impl_ops_for_view
pub trait View<const N: usize>: Sized {
    /// The element type.
    type T: Clone;

    /// The extent of each axis.
    fn shape(&self) -> [usize; N];

    /// Compute the element at `coords`.
    ///
    /// `coords` must be within [`shape()`]. [`Array`] panics on a violation
    /// while bound checking is enabled; otherwise the result is unspecified.
    /// See [`get()`] for the checked form.
    ///
    /// [`Array`]: super::Array
    ///
    /// [`shape()`]: View::shape()
    /// [`get()`]: View::get()
    fn at(&self, coords: [usize; N]) -> Self::T;

    /// The number of elements.
    fn size(&self) -> usize { shape::size(&self.shape()) }

    /// The number of axes.
    fn rank(&self) -> usize { N }

    /// Compute the element at `coords`, checking that it is in range when
    /// bound checking is enabled.
    ///
    /// ```
    /// use ndview::{delayed, ErrorKind, View};
    /// let v = delayed([2, 2], |[i, j]| i + j);
    /// assert_eq!(v.get([1, 1]), Ok(2));
    /// assert_eq!(v.get([2, 0]).unwrap_err().kind(), ErrorKind::Index);
    /// ```
    fn get(&self, coords: [usize; N]) -> Result<Self::T> {
        if config::bounds_checking() {
            shape::check_coords(&self.shape(), &coords)?;
        }
        Ok(self.at(coords))
    }

    // ------------------------------------------------------------------------
    // Traversal.

    /// Apply `f` to every element in row-major order.
    fn each(&self, mut f: impl FnMut(Self::T)) {
        traverse::for_each(self.shape(), |c| f(self.at(c)));
    }

    /// Apply `f` to every coordinate and its element in row-major order.
    fn each_indexed(&self, mut f: impl FnMut([usize; N], Self::T)) {
        traverse::for_each(self.shape(), |c| f(c, self.at(c)));
    }

    /// Returns `true` if `f` holds for some element, stopping at the first.
    fn any(&self, mut f: impl FnMut(Self::T) -> bool) -> bool {
        traverse::try_for_each(self.shape(), |c| {
            if f(self.at(c)) { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        }).is_break()
    }

    /// Returns `true` if `f` holds for every element, stopping at the first
    /// that violates it.
    fn all(&self, mut f: impl FnMut(Self::T) -> bool) -> bool {
        !self.any(|t| !f(t))
    }

    /// The number of elements for which `f` holds.
    fn count(&self, mut f: impl FnMut(Self::T) -> bool) -> usize {
        let mut n = 0;
        self.each(|t| if f(t) { n += 1; });
        n
    }

    /// The coordinates of the first element in row-major order for which `f`
    /// holds.
    ///
    /// ```
    /// use ndview::{delayed, View};
    /// let v = delayed([3, 3], |[i, j]| i * j);
    /// assert_eq!(v.position(|x| x == 2), Some([1, 2]));
    /// assert_eq!(v.position(|x| x == 5), None);
    /// ```
    fn position(&self, mut f: impl FnMut(Self::T) -> bool) -> Option<[usize; N]> {
        match traverse::try_for_each(self.shape(), |c| {
            if f(self.at(c)) { ControlFlow::Break(c) } else { ControlFlow::Continue(()) }
        }) {
            ControlFlow::Break(c) => Some(c),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Iterate over the elements in row-major order.
    fn iter(&self) -> Elements<&Self, N> { Elements::new(self) }

    // ------------------------------------------------------------------------
    // Materialization.

    /// Materialises this `View` into a collection of type `A`, e.g. an
    /// [`Array`] or a `Vec`.
    ///
    /// This method calls [`self.at()`] exactly once for each coordinate.
    ///
    /// [`Array`]: super::Array
    /// [`self.at()`]: Self::at()
    fn collect<A: FromView<Self::T, N>>(&self) -> A { A::from_view(self) }

    /// Materialises this `View` into a new contiguous [`Array`].
    ///
    /// [`Array`]: super::Array
    fn to_array(&self) -> Array<Self::T, N> where Self::T: Copy {
        Array::from_view(self)
    }

    // ------------------------------------------------------------------------
    // Pointwise.

    /// Creates a `View` that applies `f` to the elements of `Self`.
    ///
    /// There is no guarantee that the elements will be passed to `f` in a
    /// particular order, only once, or at all.
    ///
    /// ```
    /// use ndview::{delayed, View};
    /// let squares = delayed([5], |[i]| i).map(|x| x * x);
    /// assert_eq!(squares.collect::<Vec<_>>(), [0, 1, 4, 9, 16]);
    /// ```
    fn map<U: Clone, F: Fn(Self::T) -> U>(self, f: F) -> Map<Self, F, N> { Map(self, f) }

    /// Creates a `View` such that `at(c)` returns `(c, self.at(c))`.
    fn enumerate(self) -> Enumerate<Self, N> { Enumerate(self) }

    /// Creates a `View` of pairs. The shapes must match.
    fn zip<W: View<N>>(self, other: W) -> Result<Zip<Self, W, ops::Pair, N>> {
        self.binary(other)
    }

    /// Creates a `View` that combines `self` and `other` pointwise using `B`.
    /// This is the fallible form of the arithmetic operators.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the shapes differ and bound
    /// checking is enabled.
    ///
    /// ```
    /// use ndview::{delayed, ops, ErrorKind, View};
    /// let a = delayed([3], |[i]| i as i32);
    /// let b = delayed([3], |[i]| 10 * i as i32);
    /// let c = (&a).binary::<_, ops::Sub>(&b).unwrap();
    /// assert_eq!(c.collect::<Vec<_>>(), [0, -9, -18]);
    /// let d = delayed([4], |[i]| i as i32);
    /// let err = a.binary::<_, ops::Add>(d).err().unwrap();
    /// assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    /// ```
    ///
    /// [`Error::DimensionMismatch`]: super::Error::DimensionMismatch
    fn binary<W: View<N>, B>(self, other: W) -> Result<Zip<Self, W, B, N>> where
        B: Binary<Self::T, W::T>,
        B::Output: Clone,
    {
        Zip::new(self, other)
    }

    /// Pointwise `==`.
    fn elem_eq<W: View<N>>(self, other: W) -> Result<Zip<Self, W, ops::Equal, N>> where
        Self::T: PartialEq<W::T>,
    {
        self.binary(other)
    }

    /// Pointwise `!=`.
    fn elem_ne<W: View<N>>(self, other: W) -> Result<Zip<Self, W, ops::NotEqual, N>> where
        Self::T: PartialEq<W::T>,
    {
        self.binary(other)
    }

    /// Pointwise `<`.
    fn elem_lt<W: View<N>>(self, other: W) -> Result<Zip<Self, W, ops::Less, N>> where
        Self::T: PartialOrd<W::T>,
    {
        self.binary(other)
    }

    /// Pointwise `>`.
    fn elem_gt<W: View<N>>(self, other: W) -> Result<Zip<Self, W, ops::Greater, N>> where
        Self::T: PartialOrd<W::T>,
    {
        self.binary(other)
    }

    /// Pointwise `<=`.
    fn elem_le<W: View<N>>(self, other: W) -> Result<Zip<Self, W, ops::LessEqual, N>> where
        Self::T: PartialOrd<W::T>,
    {
        self.binary(other)
    }

    /// Pointwise `>=`.
    fn elem_ge<W: View<N>>(self, other: W) -> Result<Zip<Self, W, ops::GreaterEqual, N>> where
        Self::T: PartialOrd<W::T>,
    {
        self.binary(other)
    }

    // ------------------------------------------------------------------------
    // Structural.

    /// Creates a `View` of shape `shape` such that `at(c)` gives
    /// `self.at(f(c))`. The result is [`Addressable`] if `self` is.
    ///
    /// `f` must map every coordinate of `shape` to a coordinate of `self`.
    fn remap<F, const M: usize>(self, shape: [usize; M], f: F) -> Remap<Self, F, N, M> where
        F: Fn([usize; M]) -> [usize; N],
    {
        Remap::new(self, shape, f)
    }

    /// Reinterpret the elements, in row-major order, as an array of shape
    /// `shape`. Fails with [`Error::Length`] if the sizes differ.
    ///
    /// [`Error::Length`]: super::Error::Length
    fn reshape<const M: usize>(self, shape: [usize; M]) -> Result<Reshape<Self, N, M>> {
        Reshape::new(self, shape)
    }

    /// Rotate every axis: `at(c)` gives `self.at((c - shift) mod shape)`.
    fn roll(self, shift: [isize; N]) -> Roll<Self, N> { Roll::new(self, shift) }

    /// Creates a lazy slice of `self`.
    ///
    /// This validates `spec` exactly like [`Array::slice()`], which is its
    /// zero-cost counterpart for stored arrays.
    ///
    /// [`Array::slice()`]: super::Array::slice()
    fn sliced(self, spec: &SliceSpec<N>) -> Result<SliceView<Self, N>> {
        SliceView::new(self, spec)
    }

    /// Removes axis `axis` by pinning it to `index`. `M` must be `N - 1`.
    fn fix_axis<const M: usize>(self, axis: usize, index: usize) -> Result<FixAxis<Self, N, M>> {
        FixAxis::new(self, axis, index)
    }

    /// Reorders the axes: axis `i` of the result is axis `axes[i]` of `self`.
    fn permute(self, axes: [usize; N]) -> Result<Permute<Self, N>> { Permute::new(self, axes) }

    /// Joins `self` and `other` along `axis`. All other axes must match.
    fn concat<W: View<N, T = Self::T>>(self, other: W, axis: usize) -> Result<Concat<Self, W, N>> {
        Concat::new(self, other, axis)
    }

    /// Translate by `shift`, using `fill` where the source coordinate falls
    /// outside `self`.
    fn shifted(self, shift: [isize; N], fill: Self::T) -> Shifted<Self, N> {
        Shifted::new(self, shift, fill)
    }

    // ------------------------------------------------------------------------
    // Broadcasting.

    /// Creates a `View` of shape `shape` that repeats `self` along the leading
    /// `M - N` axes. The trailing axes of `shape` must equal `self.shape()`.
    fn widen<const M: usize>(self, shape: [usize; M]) -> Result<Broadcast<Self, N, M>> {
        broadcast::widen(shape, self)
    }

    /// Creates a `View` of shape `shape` that repeats `self` along the trailing
    /// `M - N` axes. The leading axes of `shape` must equal `self.shape()`.
    fn widen_right<const M: usize>(self, shape: [usize; M]) -> Result<WidenRight<Self, N, M>> {
        broadcast::widen_right(shape, self)
    }

    /// Creates a `View` of shape `shape` following the NumPy broadcasting
    /// rule: axes are aligned from the right, and every axis of `self` must
    /// equal the target extent or be `1`.
    fn broadcast_to<const M: usize>(self, shape: [usize; M]) -> Result<Broadcast<Self, N, M>> {
        Broadcast::new(self, shape, false)
    }

    /// Combines `self` and `other` pointwise using `B` after broadcasting
    /// both to their common shape, which has rank `R`.
    ///
    /// ```
    /// use ndview::{delayed, ops, View};
    /// let col = delayed([3, 1], |[i, _]| 10 * i);
    /// let row = delayed([4], |[j]| j);
    /// let sum = col.broadcast_binary::<_, ops::Add, 1, 2>(row).unwrap();
    /// assert_eq!(sum.shape(), [3, 4]);
    /// assert_eq!(sum.at([2, 3]), 23);
    /// ```
    fn broadcast_binary<W, B, const M: usize, const R: usize>(
        self,
        other: W,
    ) -> Result<Zip<Broadcast<Self, N, R>, Broadcast<W, M, R>, B, R>> where
        W: View<M>,
        B: Binary<Self::T, W::T>,
        B::Output: Clone,
    {
        let shape = broadcast::broadcast_shape(&self.shape(), &other.shape())?;
        Broadcast::new(self, shape, false)?.binary(Broadcast::new(other, shape, false)?)
    }

    // ------------------------------------------------------------------------
    // Reductions.

    /// Combine all elements in row-major order, starting from `init`.
    fn fold<A>(&self, init: A, f: impl FnMut(A, Self::T) -> A) -> A {
        self.iter().fold(init, f)
    }

    /// Reduce all elements using `R`.
    fn reduce<R: Reducer<Self::T>>(&self) -> R::Output { R::reduce(self.iter()) }

    /// The sum of all elements; zero if there are none.
    ///
    /// ```
    /// use ndview::{delayed, View};
    /// let v = delayed([2, 3, 4], |[i, j, k]| i * 12 + j * 4 + k);
    /// assert_eq!(v.sum(), 276);
    /// ```
    fn sum(&self) -> <Sum as Reducer<Self::T>>::Output where Sum: Reducer<Self::T> {
        self.reduce::<Sum>()
    }

    /// The product of all elements; one if there are none.
    fn product(&self) -> <reduce::Product as Reducer<Self::T>>::Output where
        reduce::Product: Reducer<Self::T>,
    {
        self.reduce::<reduce::Product>()
    }

    /// The arithmetic mean; NaN if there are no elements.
    fn average(&self) -> Self::T where Self::T: Float { self.reduce::<Average>() }

    /// The population variance; NaN if there are no elements.
    fn variance(&self) -> Self::T where Self::T: Float { self.reduce::<Variance>() }

    /// The population standard deviation; NaN if there are no elements.
    fn deviation(&self) -> Self::T where Self::T: Float { self.reduce::<Deviation>() }

    /// The smallest element, or `None` if there are none.
    fn min(&self) -> Option<Self::T> where Self::T: PartialOrd {
        self.iter().reduce(ops::Min::call)
    }

    /// The largest element, or `None` if there are none.
    fn max(&self) -> Option<Self::T> where Self::T: PartialOrd {
        self.iter().reduce(ops::Max::call)
    }

    /// The coordinates of the first smallest element.
    fn argmin(&self) -> Option<[usize; N]> where Self::T: PartialOrd {
        reduce::arg_best(self, |t, best| t < best)
    }

    /// The coordinates of the first largest element.
    fn argmax(&self) -> Option<[usize; N]> where Self::T: PartialOrd {
        reduce::arg_best(self, |t, best| t > best)
    }

    /// Creates a `View` of rank `M = N - 1` that reduces `axis` using `R`.
    fn reduce_axis<R: Reducer<Self::T>, const M: usize>(
        self,
        axis: usize,
    ) -> Result<ReduceAxis<Self, R, N, M>> {
        ReduceAxis::new(self, axis)
    }

    /// Sums along `axis`.
    ///
    /// ```
    /// use ndview::{delayed, View};
    /// let v = delayed([2, 3, 4], |[i, j, k]| i * 12 + j * 4 + k);
    /// let s = v.sum_axis::<2>(0).unwrap();
    /// assert_eq!(s.shape(), [3, 4]);
    /// assert_eq!([s.at([0, 0]), s.at([1, 1]), s.at([2, 3])], [12, 22, 34]);
    /// ```
    fn sum_axis<const M: usize>(self, axis: usize) -> Result<ReduceAxis<Self, Sum, N, M>> where
        Sum: Reducer<Self::T>,
    {
        self.reduce_axis::<Sum, M>(axis)
    }

    /// Averages along `axis`.
    fn average_axis<const M: usize>(self, axis: usize) -> Result<ReduceAxis<Self, Average, N, M>> where
        Self::T: Float,
    {
        self.reduce_axis::<Average, M>(axis)
    }

    /// The population variance along `axis`.
    fn variance_axis<const M: usize>(self, axis: usize) -> Result<ReduceAxis<Self, Variance, N, M>> where
        Self::T: Float,
    {
        self.reduce_axis::<Variance, M>(axis)
    }

    /// The population standard deviation along `axis`.
    fn deviation_axis<const M: usize>(self, axis: usize) -> Result<ReduceAxis<Self, Deviation, N, M>> where
        Self::T: Float,
    {
        self.reduce_axis::<Deviation, M>(axis)
    }

    /// Running sums along `axis`, materialized.
    ///
    /// ```
    /// use ndview::{delayed, View};
    /// let v = delayed([2, 3], |[i, j]| i * 3 + j + 1);
    /// assert_eq!(v.cumsum(1).unwrap().to_vec(), [1, 3, 6, 4, 9, 15]);
    /// ```
    fn cumsum(&self, axis: usize) -> Result<Array<Self::T, N>> where
        Self::T: Copy + std::ops::Add<Output = Self::T>,
    {
        reduce::cumsum(self, axis)
    }
}

impl<P, V, const N: usize> View<N> for P where P: Deref<Target = V>, V: View<N> {
    type T = V::T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { V::shape(self) }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> Self::T { V::at(self, coords) }
}

// ----------------------------------------------------------------------------

/// Implemented by [`View`]s whose every coordinate resolves to a cell of
/// some [`Buffer`], and which can therefore be written through.
///
/// [`Array`] is addressable, and so is every lazy adapter that only moves
/// coordinates around (e.g. [`View::remap()`], [`View::roll()`],
/// [`View::sliced()`]) when its sources are. Adapters that compute values
/// (e.g. [`View::map()`] or the arithmetic operators) never are.
///
/// ```
/// use ndview::{Addressable, Array, View};
/// let a: Array<i32, 2> = Array::zeros([2, 3]);
/// let t = a.view().permute([1, 0]).unwrap();
/// t.set([2, 1], 7).unwrap();
/// assert_eq!(a.at([1, 2]), 7);
/// ```
///
/// [`Buffer`]: super::Buffer
/// [`Array`]: super::Array
pub trait Addressable<const N: usize>: View<N> {
    /// Borrow the cell that holds the element at `coords`.
    ///
    /// The same contract as [`View::at()`] applies to `coords`.
    fn cell(&self, coords: [usize; N]) -> &Cell<Self::T>;

    /// Overwrite the element at `coords`, checking that it is in range when
    /// bound checking is enabled.
    fn set(&self, coords: [usize; N], value: Self::T) -> Result<()> {
        if config::bounds_checking() {
            shape::check_coords(&self.shape(), &coords)?;
        }
        self.cell(coords).set(value);
        Ok(())
    }

    /// Overwrite every element with `value`.
    fn fill(&self, value: Self::T) {
        traverse::for_each(self.shape(), |c| self.cell(c).set(value.clone()));
    }

    /// Copy `source` into `self`, coordinate by coordinate. This is how lazy
    /// views are materialized into existing storage.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the shapes differ and bound
    /// checking is enabled, before anything is written. If `source` reads
    /// cells that `self` writes, later reads observe earlier writes.
    ///
    /// [`Error::DimensionMismatch`]: super::Error::DimensionMismatch
    fn assign<W: View<N, T = Self::T>>(&self, source: &W) -> Result<()> {
        if config::bounds_checking() {
            shape::check_same_shape(&self.shape(), &source.shape())?;
        }
        traverse::for_each(self.shape(), |c| self.cell(c).set(source.at(c)));
        Ok(())
    }
}

impl<P: Deref, const N: usize> Addressable<N> for P where P::Target: Addressable<N> {
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<Self::T> { (**self).cell(coords) }
}

// ----------------------------------------------------------------------------

/// The result of [`View::iter()`].
///
/// Steps through the coordinates with [`Coords`] and reads each element as it
/// is reached.
#[derive(Debug, Clone)]
pub struct Elements<V, const N: usize> {
    view: V,
    coords: Coords<N>,
}

impl<V: View<N>, const N: usize> Elements<V, N> {
    pub fn new(view: V) -> Self {
        let coords = Coords::new(view.shape());
        Self { view, coords }
    }
}

impl<V: View<N>, const N: usize> Iterator for Elements<V, N> {
    type Item = V::T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> { self.coords.next().map(|c| self.view.at(c)) }

    fn size_hint(&self) -> (usize, Option<usize>) { self.coords.size_hint() }

    fn nth(&mut self, n: usize) -> Option<Self::Item> { self.coords.nth(n).map(|c| self.view.at(c)) }
}

impl<V: View<N>, const N: usize> DoubleEndedIterator for Elements<V, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.coords.next_back().map(|c| self.view.at(c))
    }
}

impl<V: View<N>, const N: usize> ExactSizeIterator for Elements<V, N> {}

impl<V: View<N>, const N: usize> FusedIterator for Elements<V, N> {}

// ----------------------------------------------------------------------------

/// The result of [`View::map()`].
#[derive(Debug, Clone)]
pub struct Map<V, F, const N: usize>(V, F);

impl<V: View<N>, U: Clone, F: Fn(V::T) -> U, const N: usize> View<N> for Map<V, F, N> {
    type T = U;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.0.shape() }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> U { self.1(self.0.at(coords)) }
}

impl_ops_for_view!(N; [V, F, const N: usize] Map<V, F, N>);

// ----------------------------------------------------------------------------

/// The result of [`View::enumerate()`].
#[derive(Debug, Clone)]
pub struct Enumerate<V, const N: usize>(V);

impl<V: View<N>, const N: usize> View<N> for Enumerate<V, N> {
    type T = ([usize; N], V::T);
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.0.shape() }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> Self::T { (coords, self.0.at(coords)) }
}

// ----------------------------------------------------------------------------

/// The result of [`View::binary()`], [`View::zip()`] and the arithmetic
/// operators.
#[derive(Debug, Clone)]
pub struct Zip<V, W, B, const N: usize>(V, W, PhantomData<B>);

impl<V: View<N>, W: View<N>, B, const N: usize> Zip<V, W, B, N> where
    B: Binary<V::T, W::T>,
    B::Output: Clone,
{
    pub(crate) fn new(v: V, w: W) -> Result<Self> {
        if config::bounds_checking() {
            shape::check_same_shape(&v.shape(), &w.shape())?;
        }
        Ok(Zip(v, w, PhantomData))
    }
}

impl<V: View<N>, W: View<N>, B, const N: usize> View<N> for Zip<V, W, B, N> where
    B: Binary<V::T, W::T>,
    B::Output: Clone,
{
    type T = B::Output;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.0.shape() }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> Self::T { B::call(self.0.at(coords), self.1.at(coords)) }
}

impl_ops_for_view!(N; [V, W, B, const N: usize] Zip<V, W, B, N>);

// ----------------------------------------------------------------------------
