//! Shape and stride arithmetic.
//!
//! Shapes are `[usize; N]` and strides are `[isize; N]`, both measured in
//! elements. Everything here is pure and allocation-free, and holds for
//! `N = 0` (a scalar, whose offset is always `0`).

use super::{Error, Result};

/// Returns the number of elements in an array of shape `shape`.
///
/// The empty shape describes a scalar and has size `1`.
///
/// ```
/// use ndview::shape::size;
/// assert_eq!(size(&[2, 3, 4]), 24);
/// assert_eq!(size(&[]), 1);
/// assert_eq!(size(&[5, 0]), 0);
/// ```
#[inline]
pub fn size<const N: usize>(shape: &[usize; N]) -> usize {
    shape.iter().product()
}

/// Returns the row-major strides for `shape`: the last axis has stride `1`
/// and each preceding axis has the stride of the next one times its extent.
///
/// ```
/// use ndview::shape::default_strides;
/// assert_eq!(default_strides(&[2, 3, 4]), [12, 4, 1]);
/// ```
pub fn default_strides<const N: usize>(shape: &[usize; N]) -> [isize; N] {
    let mut strides = [0; N];
    let mut stride = 1isize;
    for axis in (0..N).rev() {
        strides[axis] = stride;
        stride *= shape[axis] as isize;
    }
    strides
}

/// Returns `Σ coords[i] * strides[i]`.
#[inline]
pub fn linear_offset<const N: usize>(coords: &[usize; N], strides: &[isize; N]) -> isize {
    let mut offset = 0;
    for axis in 0..N {
        offset += coords[axis] as isize * strides[axis];
    }
    offset
}

/// The inverse of [`linear_offset()`] for positive, decreasing strides such
/// as those returned by [`default_strides()`].
///
/// Axes with a zero stride (which only occur next to an empty axis) map to
/// coordinate `0`.
///
/// ```
/// use ndview::shape::{default_strides, unravel};
/// let strides = default_strides(&[2, 3, 4]);
/// assert_eq!(unravel(17, &strides), [1, 1, 1]);
/// ```
pub fn unravel<const N: usize>(index: usize, strides: &[isize; N]) -> [usize; N] {
    let mut coords = [0; N];
    let mut rest = index;
    for axis in 0..N {
        let stride = strides[axis].unsigned_abs();
        if stride != 0 {
            coords[axis] = rest / stride;
            rest %= stride;
        }
    }
    coords
}

/// Returns `true` if `strides` are the default strides for `shape`.
///
/// Axes are compared from the last one, accumulating the expected stride.
pub fn is_default_strides<const N: usize>(shape: &[usize; N], strides: &[isize; N]) -> bool {
    let mut expected = 1isize;
    for axis in (0..N).rev() {
        if strides[axis] != expected {
            return false;
        }
        expected *= shape[axis] as isize;
    }
    true
}

// ----------------------------------------------------------------------------

/// Checks that every coordinate is within `shape`.
pub fn check_coords<const N: usize>(shape: &[usize; N], coords: &[usize; N]) -> Result<()> {
    for axis in 0..N {
        if coords[axis] >= shape[axis] {
            return Err(Error::Index {
                axis,
                index: coords[axis],
                size: shape[axis],
            });
        }
    }
    Ok(())
}

/// Checks that two shapes are equal.
pub fn check_same_shape(left: &[usize], right: &[usize]) -> Result<()> {
    if left != right {
        return Err(Error::mismatch(left, right));
    }
    Ok(())
}

/// Checks that `axis` names an axis of a `rank`-dimensional array.
pub fn check_axis(axis: usize, rank: usize) -> Result<()> {
    if axis >= rank {
        return Err(Error::Axis { axis, rank });
    }
    Ok(())
}

/// Checks a rank relation that the type system cannot express, e.g. that
/// dropping an axis from an `N`-dimensional array gives an `M`-dimensional
/// one.
pub fn check_rank(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(Error::Rank { expected, got });
    }
    Ok(())
}

/// Checks that `axes` lists every axis of an `N`-dimensional array exactly
/// once.
pub fn check_permutation<const N: usize>(axes: &[usize; N]) -> Result<()> {
    let mut seen = [false; N];
    for &axis in axes {
        check_axis(axis, N)?;
        if seen[axis] {
            return Err(Error::DuplicateAxis { axis });
        }
        seen[axis] = true;
    }
    Ok(())
}

// ----------------------------------------------------------------------------

/// Returns `coords` with `value` inserted at position `axis`.
///
/// `N` must be `M + 1` and `axis` must be at most `M`.
#[inline]
pub fn insert_axis<const M: usize, const N: usize>(
    coords: &[usize; M],
    axis: usize,
    value: usize,
) -> [usize; N] {
    debug_assert_eq!(M + 1, N);
    let mut out = [0; N];
    let mut from = 0;
    for (to, slot) in out.iter_mut().enumerate() {
        if to == axis {
            *slot = value;
        } else {
            *slot = coords[from];
            from += 1;
        }
    }
    out
}

/// Returns `items` without position `axis`. Works for coordinates, shapes
/// and strides alike.
///
/// `M` must be `N - 1` and `axis` must be less than `N`.
#[inline]
pub fn remove_axis<T: Copy + Default, const N: usize, const M: usize>(
    items: &[T; N],
    axis: usize,
) -> [T; M] {
    debug_assert_eq!(M + 1, N);
    let mut out = [T::default(); M];
    let mut to = 0;
    for (from, &item) in items.iter().enumerate() {
        if from != axis {
            out[to] = item;
            to += 1;
        }
    }
    out
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn scalar() {
        assert_eq!(size::<0>(&[]), 1);
        assert_eq!(default_strides::<0>(&[]), [0isize; 0]);
        assert_eq!(linear_offset::<0>(&[], &[]), 0);
        assert_eq!(unravel::<0>(0, &[]), [0usize; 0]);
        assert!(is_default_strides::<0>(&[], &[]));
    }

    #[test]
    fn strides() {
        assert_eq!(default_strides(&[4, 5]), [5, 1]);
        assert_eq!(default_strides(&[3, 0, 2]), [0, 2, 1]);
        assert!(is_default_strides(&[4, 5], &[5, 1]));
        assert!(!is_default_strides(&[4, 5], &[10, 1]));
        assert!(!is_default_strides(&[4, 5], &[1, 4]));
    }

    #[test]
    fn offsets() {
        assert_eq!(linear_offset(&[1, 2], &[5, 1]), 7);
        assert_eq!(linear_offset(&[2, 3], &[-5, 2]), -4);
        assert_eq!(unravel(7, &[5, 1]), [1, 2]);
        assert_eq!(unravel(0, &[0, 2, 1]), [0, 0, 0]);
    }

    #[test]
    fn checks() {
        assert!(check_coords(&[2, 3], &[1, 2]).is_ok());
        assert_eq!(
            check_coords(&[2, 3], &[1, 3]),
            Err(Error::Index { axis: 1, index: 3, size: 3 }),
        );
        assert_eq!(check_same_shape(&[2, 3], &[3, 2]).unwrap_err().kind(), ErrorKind::DimensionMismatch);
        assert_eq!(check_axis(2, 2), Err(Error::Axis { axis: 2, rank: 2 }));
        assert_eq!(check_rank(3, 2), Err(Error::Rank { expected: 3, got: 2 }));
        assert!(check_permutation(&[2, 0, 1]).is_ok());
        assert_eq!(check_permutation(&[0, 3, 1]), Err(Error::Axis { axis: 3, rank: 3 }));
        assert_eq!(check_permutation(&[1, 0, 1]), Err(Error::DuplicateAxis { axis: 1 }));
    }

    #[test]
    fn axes() {
        assert_eq!(insert_axis::<2, 3>(&[7, 8], 0, 1), [1, 7, 8]);
        assert_eq!(insert_axis::<2, 3>(&[7, 8], 1, 1), [7, 1, 8]);
        assert_eq!(insert_axis::<2, 3>(&[7, 8], 2, 1), [7, 8, 1]);
        assert_eq!(remove_axis::<usize, 3, 2>(&[1, 7, 8], 0), [7, 8]);
        assert_eq!(remove_axis::<isize, 3, 2>(&[7, -1, 8], 1), [7, 8]);
    }

    proptest! {
        #[test]
        fn size_is_product(shape in prop::array::uniform3(0usize..6)) {
            prop_assert_eq!(size(&shape), shape[0] * shape[1] * shape[2]);
        }

        #[test]
        fn unravel_inverts_linear_offset(
            shape in prop::array::uniform3(1usize..6),
            seed in any::<usize>(),
        ) {
            let strides = default_strides(&shape);
            let index = seed % size(&shape);
            let coords = unravel(index, &strides);
            prop_assert!(check_coords(&shape, &coords).is_ok());
            prop_assert_eq!(linear_offset(&coords, &strides), index as isize);
        }
    }
}
