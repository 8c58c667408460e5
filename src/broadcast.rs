//! Views that replicate a lower-rank source to fill a higher-rank shape.
//!
//! [`Broadcast`] adds leading axes. In strict mode (see [`widen()`]) the
//! trailing axes must match the source exactly; otherwise it follows the
//! NumPy rule, under which a source axis of length `1` is stretched to any
//! length. [`WidenRight`] adds trailing axes instead.
//!
//! Neither adapter is [`Addressable`]: several coordinates share one source
//! element, so writing through them would be ambiguous.
//!
//! [`Addressable`]: super::Addressable

use super::{config, impl_ops_for_view, Error, Result, View};

/// Returns the shape that arrays of shapes `a` and `b` broadcast to.
///
/// The shapes are aligned at their last axis. Along each axis the lengths
/// must be equal or one of them must be `1`; missing leading axes count as
/// `1`. `R` must be the larger of `M` and `N`.
///
/// ```
/// use ndview::broadcast_shape;
/// assert_eq!(broadcast_shape::<2, 3, 3>(&[4, 1], &[2, 1, 5]).unwrap(), [2, 4, 5]);
/// assert!(broadcast_shape::<1, 2, 2>(&[3], &[2, 4]).is_err());
/// ```
pub fn broadcast_shape<const M: usize, const N: usize, const R: usize>(
    a: &[usize; M],
    b: &[usize; N],
) -> Result<[usize; R]> {
    if R != M.max(N) {
        return Err(Error::Rank { expected: M.max(N), got: R });
    }
    let padded = |shape: &[usize], axis: usize| {
        let lead = R - shape.len();
        if axis < lead { 1 } else { shape[axis - lead] }
    };
    let mut out = [0; R];
    for (axis, slot) in out.iter_mut().enumerate() {
        let (x, y) = (padded(&a[..], axis), padded(&b[..], axis));
        *slot = if x == y || y == 1 {
            x
        } else if x == 1 {
            y
        } else if config::bounds_checking() {
            return Err(Error::mismatch(a, b));
        } else {
            x.max(y)
        };
    }
    Ok(out)
}

// ----------------------------------------------------------------------------

/// A `View` of rank `N` that reads a source of rank `M <= N`, ignoring the
/// leading `N - M` coordinates.
#[derive(Debug, Clone)]
pub struct Broadcast<V, const M: usize, const N: usize> {
    source: V,
    source_shape: [usize; M],
    shape: [usize; N],
}

impl<V: View<M>, const M: usize, const N: usize> Broadcast<V, M, N> {
    /// Broadcasts `source` to `shape`.
    ///
    /// If `strict`, the last `M` axes of `shape` must equal the shape of
    /// `source`. Otherwise each may also be stretched from `1`.
    pub fn new(source: V, shape: [usize; N], strict: bool) -> Result<Self> {
        if M > N {
            return Err(Error::Rank { expected: N, got: M });
        }
        let source_shape = source.shape();
        if config::bounds_checking() {
            let fits = source_shape.iter().zip(&shape[N - M..]).all(|(&s, &t)| {
                s == t || (!strict && s == 1)
            });
            if !fits {
                return Err(Error::mismatch(&source_shape, &shape));
            }
        }
        Ok(Self { source, source_shape, shape })
    }

    pub fn source(&self) -> &V { &self.source }
}

/// Widens `source` to `shape` by prepending axes. The last `M` axes of
/// `shape` must equal the shape of `source`.
///
/// ```
/// use ndview::{delayed, widen, View};
/// let row = delayed([4, 5], |[j, k]| j * 5 + k);
/// let w = widen([3, 4, 5], row).unwrap();
/// assert_eq!(w.at([2, 1, 3]), 8);
/// assert_eq!(w.sum(), 3 * 190);
/// ```
pub fn widen<V: View<M>, const M: usize, const N: usize>(
    shape: [usize; N],
    source: V,
) -> Result<Broadcast<V, M, N>> {
    Broadcast::new(source, shape, true)
}

impl<V: View<M>, const M: usize, const N: usize> View<N> for Broadcast<V, M, N> {
    type T = V::T;

    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.shape }

    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T {
        let mut inner = [0; M];
        for (axis, c) in inner.iter_mut().enumerate() {
            if self.source_shape[axis] != 1 {
                *c = coords[N - M + axis];
            }
        }
        self.source.at(inner)
    }
}

impl_ops_for_view!(N; [V, const M: usize, const N: usize] Broadcast<V, M, N>);

// ----------------------------------------------------------------------------

/// A `View` of rank `N` that reads a source of rank `M <= N`, ignoring the
/// trailing `N - M` coordinates.
#[derive(Debug, Clone)]
pub struct WidenRight<V, const M: usize, const N: usize> {
    source: V,
    shape: [usize; N],
}

/// Widens `source` to `shape` by appending axes. The first `M` axes of
/// `shape` must equal the shape of `source`.
///
/// ```
/// use ndview::{delayed, widen_right, View};
/// let col = delayed([3], |[i]| i * 10);
/// let w = widen_right([3, 2], col).unwrap();
/// assert_eq!(w.collect::<Vec<_>>(), [0, 0, 10, 10, 20, 20]);
/// ```
pub fn widen_right<V: View<M>, const M: usize, const N: usize>(
    shape: [usize; N],
    source: V,
) -> Result<WidenRight<V, M, N>> {
    if M > N {
        return Err(Error::Rank { expected: N, got: M });
    }
    let source_shape = source.shape();
    if config::bounds_checking() && source_shape[..] != shape[..M] {
        return Err(Error::mismatch(&source_shape, &shape));
    }
    Ok(WidenRight { source, shape })
}

impl<V, const M: usize, const N: usize> WidenRight<V, M, N> {
    pub fn source(&self) -> &V { &self.source }
}

impl<V: View<M>, const M: usize, const N: usize> View<N> for WidenRight<V, M, N> {
    type T = V::T;

    #[inline(always)]
    fn shape(&self) -> [usize; N] { self.shape }

    #[inline(always)]
    fn at(&self, coords: [usize; N]) -> V::T {
        let mut inner = [0; M];
        inner.copy_from_slice(&coords[..M]);
        self.source.at(inner)
    }
}

impl_ops_for_view!(N; [V, const M: usize, const N: usize] WidenRight<V, M, N>);

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config, delayed, ops, Addressable, Array, ErrorKind, Scalar};

    #[test]
    fn shapes() {
        assert_eq!(broadcast_shape::<2, 2, 2>(&[3, 1], &[1, 4]), Ok([3, 4]));
        assert_eq!(broadcast_shape::<0, 2, 2>(&[], &[2, 2]), Ok([2, 2]));
        assert_eq!(broadcast_shape::<1, 3, 3>(&[0], &[2, 1, 1]), Ok([2, 1, 0]));
        assert_eq!(
            broadcast_shape::<2, 2, 3>(&[1, 1], &[1, 1]),
            Err(Error::Rank { expected: 2, got: 3 }),
        );
        assert_eq!(
            broadcast_shape::<2, 2, 2>(&[2, 3], &[3, 2]).map_err(|e| e.kind()),
            Err(ErrorKind::DimensionMismatch),
        );
        config::with_bounds_checking(false, || {
            assert_eq!(broadcast_shape::<2, 2, 2>(&[2, 3], &[3, 2]), Ok([3, 3]));
        });
    }

    #[test]
    fn widening() {
        let a: Array<i32, 2> = Array::from_fn([4, 5], |[j, k]| (j * 5 + k) as i32);
        let w = widen([3, 4, 5], a.view()).unwrap();
        assert_eq!(w.shape(), [3, 4, 5]);
        for i in 0..3 {
            assert_eq!(w.at([i, 2, 3]), a.at([2, 3]));
        }
        a.set([2, 3], -1).unwrap();
        assert_eq!(w.at([1, 2, 3]), -1);

        assert_eq!(widen([3, 5, 4], a.view()).unwrap_err().kind(), ErrorKind::DimensionMismatch);
        assert_eq!(
            widen::<_, 2, 1>([5], a.view()).unwrap_err(),
            Error::Rank { expected: 1, got: 2 },
        );
        assert_eq!(widen([1, 5], a.view().subarray::<1>(0).unwrap()).unwrap().shape(), [1, 5]);
    }

    #[test]
    fn stretching() {
        let col = delayed([3, 1], |[i, _]| i as i32);
        let b = col.clone().broadcast_to([2, 3, 4]).unwrap();
        assert_eq!(b.at([1, 2, 3]), 2);
        assert_eq!(b.sum(), 2 * 4 * 3);
        assert!(widen([2, 3, 4], delayed([3, 1], |[i, _]| i)).is_err());

        let row = delayed([4], |[j]| j as i32 * 10);
        let table = col.broadcast_binary::<_, ops::Add, 1, 2>(row).unwrap();
        assert_eq!(table.shape(), [3, 4]);
        assert_eq!(table.at([2, 3]), 32);

        let scaled = table.broadcast_binary::<_, ops::Mul, 0, 2>(Scalar(2)).unwrap();
        assert_eq!(scaled.at([1, 1]), 22);
    }

    #[test]
    fn widening_right() {
        let col: Array<f64, 1> = Array::from_vec([2], vec![1.0, 2.0]).unwrap();
        let w = widen_right([2, 3, 2], &col).unwrap();
        assert_eq!(w.shape(), [2, 3, 2]);
        assert_eq!(w.at([1, 2, 1]), 2.0);
        assert_eq!(w.sum(), 18.0);
        assert!(widen_right([3, 2], &col).is_err());
        config::with_bounds_checking(false, || {
            assert!(widen_right([3, 2], &col).is_ok());
        });
    }
}
