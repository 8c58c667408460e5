use std::cell::Cell;
use std::fmt::{self, Debug};

use itertools::izip;
use num_traits::{One, Zero};

use super::buffer::Buffer;
use super::delayed::Remap;
use super::traverse::Coords;
use super::view::{Elements, FromView};
use super::{config, impl_ops_for_view, shape, Addressable, Error, Result, SliceSpec, View};

/// A strided `N`-dimensional array of `T`s stored in a shared [`Buffer`].
///
/// An `Array` is a window onto its buffer: a shape, a stride for each axis
/// and the offset of the element at the origin. The element at `c` lives at
/// `offset + Σ c[i] * strides[i]`.
///
/// Cloning an `Array`, calling [`view()`], and slicing ([`slice()`],
/// [`subarray()`], [`permute_axes()`]) never copy elements. The results
/// share the buffer, so writes through any of them are visible through all
/// of them. Use [`copy()`] for an independent array.
///
/// ```
/// use ndview::{Addressable, Array, AxisSlice, SliceSpec, View};
/// let a: Array<i32, 2> = Array::from_fn([4, 5], |[i, j]| (i * 5 + j) as i32);
/// let b = a.slice(&SliceSpec::new([AxisSlice::new(1, 3, 1), AxisSlice::new(1, 2, 1)])).unwrap();
/// assert_eq!(b.shape(), [3, 2]);
/// assert_eq!(b.at([0, 0]), 6);
/// assert_eq!(b.at([2, 1]), 17);
/// b.set([2, 1], -1).unwrap();
/// assert_eq!(a.at([3, 2]), -1);
/// ```
///
/// [`view()`]: Array::view()
/// [`slice()`]: Array::slice()
/// [`subarray()`]: Array::subarray()
/// [`permute_axes()`]: Array::permute_axes()
/// [`copy()`]: Array::copy()
pub struct Array<T, const N: usize> {
    buffer: Buffer<T>,
    shape: [usize; N],
    strides: [isize; N],
    offset: usize,
}

fn identity<const N: usize>(coords: [usize; N]) -> [usize; N] { coords }

impl<T: Copy, const N: usize> Array<T, N> {
    fn contiguous(buffer: Buffer<T>, shape: [usize; N]) -> Self {
        debug_assert_eq!(buffer.len(), shape::size(&shape));
        Self { buffer, shape, strides: shape::default_strides(&shape), offset: 0 }
    }

    /// A new array of shape `shape` filled with `T::default()`.
    pub fn new(shape: [usize; N]) -> Self where T: Default { Self::from_elem(shape, T::default()) }

    /// A new array of shape `shape` filled with `value`.
    pub fn from_elem(shape: [usize; N], value: T) -> Self {
        Self::contiguous(Buffer::filled(shape::size(&shape), value), shape)
    }

    pub fn zeros(shape: [usize; N]) -> Self where T: Zero { Self::from_elem(shape, T::zero()) }

    pub fn ones(shape: [usize; N]) -> Self where T: One { Self::from_elem(shape, T::one()) }

    /// A new array of shape `shape` holding `items` in row-major order.
    ///
    /// Fails with [`Error::Length`] if there are not exactly `size(shape)`
    /// items.
    pub fn from_vec(shape: [usize; N], items: Vec<T>) -> Result<Self> {
        let expected = shape::size(&shape);
        if items.len() != expected {
            return Err(Error::Length { expected, got: items.len() });
        }
        Ok(Self::contiguous(Buffer::from_vec(items), shape))
    }

    /// A new array of shape `shape` whose element at `c` is `f(c)`. `f` is
    /// called once per coordinate, in row-major order.
    pub fn from_fn(shape: [usize; N], f: impl FnMut([usize; N]) -> T) -> Self {
        Self::contiguous(Buffer::from_vec(Coords::new(shape).map(f).collect()), shape)
    }

    /// A new contiguous array holding the elements of `view`.
    pub fn from_view<V: View<N, T = T>>(view: &V) -> Self {
        let shape = view.shape();
        tracing::trace!(?shape, "materializing view");
        Self::contiguous(Buffer::from_vec(Vec::from_view(view)), shape)
    }

    /// An array over an existing buffer.
    ///
    /// Fails with [`Error::Extent`] if some coordinate of `shape` would map
    /// outside `buffer`.
    ///
    /// ```
    /// use ndview::{Array, Buffer, View};
    /// let buffer = Buffer::from_vec((0..6).collect());
    /// let t: Array<i32, 2> = Array::from_parts(buffer.share(), [3, 2], [1, 3], 0).unwrap();
    /// assert_eq!(t.at([2, 1]), 5);
    /// assert!(Array::<i32, 2>::from_parts(buffer.share(), [3, 2], [2, 3], 0).is_err());
    /// assert!(Array::<i32, 1>::from_parts(buffer, [3], [-1], 2).is_ok());
    /// ```
    pub fn from_parts(
        buffer: Buffer<T>,
        shape: [usize; N],
        strides: [isize; N],
        offset: usize,
    ) -> Result<Self> {
        if shape::size(&shape) > 0 {
            let start = isize::try_from(offset).unwrap_or(isize::MAX);
            let (mut low, mut high) = (start, start);
            for (&extent, &stride) in izip!(&shape, &strides) {
                let reach = isize::try_from(extent - 1).ok().and_then(|n| n.checked_mul(stride));
                let moved = match reach {
                    Some(r) if r < 0 => low.checked_add(r).map(|l| low = l),
                    Some(r) => high.checked_add(r).map(|h| high = h),
                    None => None,
                };
                if moved.is_none() {
                    let (low, high) = if stride < 0 { (isize::MIN, high) } else { (low, isize::MAX) };
                    return Err(Error::Extent { low, high, len: buffer.len() });
                }
            }
            if low < 0 || high >= buffer.len() as isize {
                return Err(Error::Extent { low, high, len: buffer.len() });
            }
        }
        Ok(Self { buffer, shape, strides, offset })
    }

    /// Another handle onto the same elements. The same as `clone()`.
    pub fn view(&self) -> Self { self.clone() }

    // ------------------------------------------------------------------------

    #[inline(always)]
    fn locate(&self, coords: &[usize; N]) -> usize {
        if config::bounds_checking() {
            if let Err(e) = shape::check_coords(&self.shape, coords) {
                panic!("{}", e);
            }
        }
        (self.offset as isize + shape::linear_offset(coords, &self.strides)) as usize
    }

    /// The `M`-dimensional array at index `i` of the first axis. `M` must be
    /// `N - 1`.
    ///
    /// ```
    /// use ndview::{Array, View};
    /// let a: Array<u8, 3> = Array::from_fn([2, 3, 4], |[i, j, k]| (i * 12 + j * 4 + k) as u8);
    /// let plane = a.subarray::<2>(1).unwrap();
    /// assert_eq!(plane.shape(), [3, 4]);
    /// assert_eq!(plane.at([1, 1]), 17);
    /// let row = plane.subarray::<1>(2).unwrap();
    /// assert_eq!(row.to_vec(), [20, 21, 22, 23]);
    /// ```
    pub fn subarray<const M: usize>(&self, i: usize) -> Result<Array<T, M>> {
        shape::check_rank(N, M + 1)?;
        if config::bounds_checking() && i >= self.shape[0] {
            return Err(Error::Index { axis: 0, index: i, size: self.shape[0] });
        }
        Ok(Array {
            buffer: self.buffer.share(),
            shape: shape::remove_axis(&self.shape, 0),
            strides: shape::remove_axis(&self.strides, 0),
            offset: (self.offset as isize + i as isize * self.strides[0]) as usize,
        })
    }

    /// A view of the part of `self` selected by `spec`. No elements are
    /// copied.
    ///
    /// Fails with [`Error::Index`] or [`Error::SliceLength`] if `spec` does
    /// not fit within `self`, when bound checking is enabled.
    pub fn slice(&self, spec: &SliceSpec<N>) -> Result<Self> {
        if config::bounds_checking() {
            spec.check(&self.shape)?;
        }
        let starts = spec.starts();
        let steps = spec.steps();
        let mut strides = self.strides;
        for (stride, &step) in strides.iter_mut().zip(&steps) {
            *stride *= step;
        }
        Ok(Self {
            buffer: self.buffer.share(),
            shape: spec.sizes(),
            strides,
            offset: (self.offset as isize + shape::linear_offset(&starts, &self.strides)) as usize,
        })
    }

    /// A view in which axis `i` is axis `axes[i]` of `self`.
    ///
    /// ```
    /// use ndview::{Array, View};
    /// let a: Array<i32, 2> = Array::from_fn([2, 3], |[i, j]| (i * 3 + j) as i32);
    /// let t = a.permute_axes([1, 0]).unwrap();
    /// assert_eq!(t.shape(), [3, 2]);
    /// assert_eq!(t.to_vec(), [0, 3, 1, 4, 2, 5]);
    /// assert!(!t.is_contiguous());
    /// ```
    pub fn permute_axes(&self, axes: [usize; N]) -> Result<Self> {
        shape::check_permutation(&axes)?;
        Ok(Self {
            buffer: self.buffer.share(),
            shape: axes.map(|a| self.shape[a]),
            strides: axes.map(|a| self.strides[a]),
            offset: self.offset,
        })
    }

    /// The same elements in row-major order, with shape `shape`.
    ///
    /// A contiguous array is reshaped in place, sharing its buffer; any other
    /// array is copied first. Fails with [`Error::Length`] if the sizes
    /// differ.
    pub fn to_shape<const M: usize>(&self, shape: [usize; M]) -> Result<Array<T, M>> {
        let expected = shape::size(&self.shape);
        let got = shape::size(&shape);
        if expected != got {
            return Err(Error::Length { expected, got });
        }
        let source = if self.is_contiguous() { self.view() } else { self.copy() };
        Ok(Array {
            buffer: source.buffer,
            shape,
            strides: shape::default_strides(&shape),
            offset: source.offset,
        })
    }

    // ------------------------------------------------------------------------

    /// Returns `true` if the strides are the row-major strides of the shape.
    pub fn is_contiguous(&self) -> bool { shape::is_default_strides(&self.shape, &self.strides) }

    pub fn strides(&self) -> [isize; N] { self.strides }

    /// The buffer offset of the element at the origin.
    pub fn offset(&self) -> usize { self.offset }

    pub fn buffer(&self) -> &Buffer<T> { &self.buffer }

    /// Returns `true` if `self` and `other` view the same buffer.
    pub fn shares_buffer<const M: usize>(&self, other: &Array<T, M>) -> bool {
        self.buffer.same_allocation(&other.buffer)
    }

    /// A new contiguous array with the same elements, sharing nothing with
    /// `self`.
    pub fn copy(&self) -> Self {
        tracing::trace!(shape = ?self.shape, contiguous = self.is_contiguous(), "copying array");
        Self::from_view(self)
    }

    /// The elements in row-major order.
    pub fn to_vec(&self) -> Vec<T> { Vec::from_view(self) }

    /// A pointer to the element at the origin.
    ///
    /// Valid while any handle to the buffer is alive.
    pub fn data(&self) -> *const T { self.buffer.as_ptr().wrapping_add(self.offset) }

    /// The elements in row-major order, if they are stored that way.
    pub fn as_cells(&self) -> Option<&[Cell<T>]> {
        if !self.is_contiguous() {
            return None;
        }
        self.buffer.cells().get(self.offset..self.offset + shape::size(&self.shape))
    }

    /// `self` as a modifiable delayed array: a [`Remap`] through the
    /// identity.
    pub fn delay(&self) -> Remap<Self, fn([usize; N]) -> [usize; N], N, N> {
        Remap::new(self.view(), self.shape, identity::<N> as fn(_) -> _)
    }
}

impl<T, const N: usize> Clone for Array<T, N> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.share(),
            shape: self.shape,
            strides: self.strides,
            offset: self.offset,
        }
    }
}

impl<T: Copy + Debug, const N: usize> Debug for Array<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("elements", &self.to_vec())
            .finish()
    }
}

/// Arrays are equal if they have the same shape and elements, however they
/// are stored.
impl<T: Copy + PartialEq, const N: usize> PartialEq for Array<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.iter().eq(other.iter())
    }
}

impl<T: Copy, const N: usize> View<N> for Array<T, N> {
    type T = T;
    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.shape }
    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> T { self.buffer.get(self.locate(&coords)) }
}

impl<T: Copy, const N: usize> Addressable<N> for Array<T, N> {
    #[inline(always)]
    fn cell(&self, coords: [usize; N]) -> &Cell<T> { self.buffer.cell(self.locate(&coords)) }
}

impl<T: Copy, const N: usize> FromView<T, N> for Array<T, N> {
    fn from_view<V: View<N, T = T>>(view: &V) -> Self { Array::from_view(view) }
}

impl<'a, T: Copy, const N: usize> IntoIterator for &'a Array<T, N> {
    type Item = T;
    type IntoIter = Elements<&'a Array<T, N>, N>;
    fn into_iter(self) -> Self::IntoIter { Elements::new(self) }
}

impl_ops_for_view!(N; [T, const N: usize] Array<T, N>);
impl_ops_for_view!(N; ['a, T, const N: usize] &'a Array<T, N>);

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxisSlice, ErrorKind};

    fn grid() -> Array<i32, 2> { Array::from_fn([4, 5], |[i, j]| (i * 5 + j) as i32) }

    #[test]
    fn construction() {
        let a: Array<f32, 2> = Array::new([2, 2]);
        assert!(a.all(|x| x == 0.0));
        assert!(Array::<u8, 1>::ones([3]).all(|x| x == 1));
        assert_eq!(Array::from_elem([2], 'x').to_vec(), ['x', 'x']);
        assert_eq!(
            Array::<i32, 2>::from_vec([2, 3], vec![1, 2, 3]),
            Err(Error::Length { expected: 6, got: 3 }),
        );
        let s: Array<i32, 0> = Array::from_vec([], vec![9]).unwrap();
        assert_eq!(s.at([]), 9);
        assert_eq!(s.size(), 1);
    }

    #[test]
    fn sharing() {
        let a = grid();
        let b = a.view();
        assert!(a.shares_buffer(&b));
        assert_eq!(a.buffer().holders(), 2);
        b.set([0, 0], 100).unwrap();
        assert_eq!(a.at([0, 0]), 100);
        let c = a.copy();
        assert!(!c.shares_buffer(&a));
        assert_eq!(c, a);
        c.fill(0);
        assert_eq!(a.at([0, 0]), 100);
    }

    #[test]
    fn checked_access() {
        let a = grid();
        assert_eq!(a.get([3, 4]), Ok(19));
        assert_eq!(a.get([4, 0]).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(a.set([0, 5], 1).unwrap_err().kind(), ErrorKind::Index);
    }

    #[test]
    #[should_panic(expected = "index 5 out of range for axis 1 of size 5")]
    fn unchecked_access_panics_while_checking() {
        let _ = grid().at([0, 5]);
    }

    #[test]
    fn slicing() {
        let a = grid();
        let evens = a.slice(&SliceSpec::new([AxisSlice::full(4), AxisSlice::new(0, 3, 2)])).unwrap();
        assert_eq!(evens.to_vec(), [0, 2, 4, 5, 7, 9, 10, 12, 14, 15, 17, 19]);
        assert!(!evens.is_contiguous());
        let reversed = a.slice(&SliceSpec::new([AxisSlice::new(3, 4, -1), AxisSlice::full(5)])).unwrap();
        assert_eq!(reversed.at([0, 0]), 15);
        assert_eq!(reversed.strides(), [-5, 1]);
        let inner = reversed.slice(&SliceSpec::new([AxisSlice::new(1, 2, 1), AxisSlice::index(2)])).unwrap();
        assert_eq!(inner.to_vec(), [12, 7]);
        assert!(inner.shares_buffer(&a));
    }

    #[test]
    fn slice_errors() {
        let a = grid();
        let start = SliceSpec::new([AxisSlice::new(4, 1, 1), AxisSlice::full(5)]);
        assert_eq!(a.slice(&start).unwrap_err().kind(), ErrorKind::Index);
        let long = SliceSpec::new([AxisSlice::new(2, 3, 1), AxisSlice::full(5)]);
        assert_eq!(a.slice(&long).unwrap_err().kind(), ErrorKind::Length);
    }

    #[test]
    fn rows_of_rows() {
        let a = grid();
        let row = a.subarray::<1>(2).unwrap();
        assert_eq!(row.to_vec(), [10, 11, 12, 13, 14]);
        assert!(row.is_contiguous());
        assert_eq!(row.offset(), 10);
        assert_eq!(a.subarray::<1>(4).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(a.subarray::<2>(0).unwrap_err(), Error::Rank { expected: 2, got: 3 });
        let scalar = row.subarray::<0>(3).unwrap();
        assert_eq!(scalar.at([]), 13);
    }

    #[test]
    fn layouts() {
        let a = grid();
        let t = a.permute_axes([1, 0]).unwrap();
        assert_eq!(t.at([4, 3]), 19);
        assert_eq!(a.permute_axes([1, 1]).unwrap_err(), Error::DuplicateAxis { axis: 1 });
        let flat = a.to_shape([20]).unwrap();
        assert!(flat.shares_buffer(&a));
        let flat_t = t.to_shape([20]).unwrap();
        assert!(!flat_t.shares_buffer(&a));
        assert_eq!(flat_t.at([1]), 5);
        assert_eq!(a.to_shape([3, 7]).unwrap_err().kind(), ErrorKind::Length);
    }

    #[test]
    fn huge_strides() {
        let buffer = Buffer::from_vec(vec![1, 2, 3]);
        let forward = Array::<i32, 1>::from_parts(buffer.share(), [3], [isize::MAX], 0);
        assert_eq!(forward.unwrap_err().kind(), ErrorKind::Length);
        let backward = Array::<i32, 1>::from_parts(buffer.share(), [3], [isize::MIN], 2);
        assert!(matches!(backward, Err(Error::Extent { .. })));
        let wide = Array::<i32, 2>::from_parts(buffer, [2, 2], [isize::MAX / 2, isize::MAX / 2], 0);
        assert!(matches!(wide, Err(Error::Extent { .. })));
    }

    #[test]
    fn raw_access() {
        let a = grid();
        let row = a.subarray::<1>(1).unwrap();
        // SAFETY: the buffer is alive and holds at least 10 elements after
        // the row's origin.
        assert_eq!(unsafe { *row.data() }, 5);
        assert_eq!(row.as_cells().map(|c| c.len()), Some(5));
        assert!(a.permute_axes([1, 0]).unwrap().as_cells().is_none());
    }

    #[test]
    fn delay_round_trip() {
        let a = grid();
        let d = a.delay();
        assert_eq!(Array::from_view(&d), a);
        d.set([1, 1], -6).unwrap();
        assert_eq!(a.at([1, 1]), -6);
    }

    #[test]
    fn operators() {
        let a = grid();
        let sum = (&a + &a).to_array();
        assert_eq!(sum.at([3, 4]), 38);
        let diff = a.view() - Array::<i32, 2>::ones([4, 5]);
        assert_eq!(diff.at([0, 0]), -1);
        let neg = -&a;
        assert_eq!(neg.at([1, 0]), -5);
        assert_eq!((&a).into_iter().rev().next(), Some(19));
    }

    #[test]
    fn assignment() {
        let a: Array<i32, 2> = Array::zeros([2, 2]);
        a.assign(&crate::delayed([2, 2], |[i, j]| (i + j) as i32)).unwrap();
        assert_eq!(a.to_vec(), [0, 1, 1, 2]);
        let wrong = Array::<i32, 2>::zeros([2, 3]);
        assert_eq!(a.assign(&wrong).unwrap_err().kind(), ErrorKind::DimensionMismatch);
        assert_eq!(a.to_vec(), [0, 1, 1, 2]);
    }

    #[test]
    fn debug_output() {
        let a: Array<u8, 1> = Array::from_vec([2], vec![1, 2]).unwrap();
        assert_eq!(
            format!("{:?}", a),
            "Array { shape: [2], strides: [1], offset: 0, elements: [1, 2] }",
        );
    }
}
