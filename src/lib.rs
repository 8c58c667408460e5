//! A pure-Rust library providing strided and lazily-evaluated
//! multi-dimensional arrays that share one indexing contract.
//!
//! [`Array<T, N>`] represents an `N`-dimensional array of `T`. The elements
//! are stored in a reference-counted [`Buffer`], and an `Array` is a window
//! onto it: a shape, a stride per axis and a base offset. Cloning an `Array`,
//! slicing it ([`Array::slice()`]), taking a sub-array ([`Array::subarray()`])
//! or transposing it ([`Array::permute_axes()`]) all produce new windows onto
//! the same buffer; nothing is copied until you ask for [`Array::copy()`].
//!
//! Trait [`View`] is the main way to access and manipulate arrays. Unlike
//! `Array`, a `View` need not store anything, but may instead compute values
//! on demand; see [`delayed()`]. In this respect it is a bit like
//! [`std::iter::Iterator`], and indeed `View` offers some of the same methods
//! as `Iterator`, including [`View::map()`], [`View::fold()`] and
//! [`View::collect()`]. However, unlike `Iterator`, `View`s are immutable;
//! getting values using [`View::at()`] does not mutate the `View`. You are
//! encouraged to use `View`s compositionally, like `Iterator`s, and to
//! materialize the result into an `Array` only at the end of a chain of
//! operations.
//!
//! Some views are also [`Addressable`]: each coordinate resolves to a cell of
//! a buffer, so the view can be written through. `Array` is one; so are the
//! rearranging adapters of [`structural`] and [`remap()`] when their sources
//! are.
//!
//! ```
//! use ndview::{delayed, Addressable, Array, AxisSlice, SliceSpec, View};
//! let a: Array<i32, 2> = Array::from_fn([4, 5], |[i, j]| (i * 5 + j) as i32);
//! let b = a.slice(&SliceSpec::new([AxisSlice::range(1, 4), AxisSlice::range(1, 3)])).unwrap();
//! assert_eq!((b.at([0, 0]), b.at([2, 1])), (6, 17));
//!
//! b.assign(&delayed([3, 2], |_| 0)).unwrap();
//! assert_eq!(a.at([3, 2]), 0);
//! assert_eq!(a.sum(), 190 - (6 + 7 + 11 + 12 + 16 + 17));
//! ```
//!
//! Coordinate, slice and shape checks can be switched off at run time; see
//! [`config`].

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod config;

pub mod shape;

mod buffer;
pub use buffer::{Buffer};

pub mod traverse;

pub mod ops;

pub mod view;
pub use view::{View, Addressable, FromView};

mod array;
pub use array::{Array};

pub mod delayed;
pub use delayed::{delayed, remap, full, Delayed, Remap, Full, Scalar};

pub mod slice;
pub use slice::{AxisSlice, SliceSpec};

pub mod structural;
pub use structural::{stack, choose};

pub mod broadcast;
pub use broadcast::{widen, widen_right, broadcast_shape};

pub mod reduce;
pub use reduce::{Reducer};

pub mod math;
