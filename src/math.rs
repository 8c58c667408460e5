//! Elementwise floating-point functions.
//!
//! Each function wraps its argument in a [`Map`], so nothing is computed
//! until the result is read.
//!
//! ```
//! use ndview::{delayed, math, View};
//! let v = delayed([3], |[i]| i as f64 - 1.0);
//! assert_eq!(math::abs(v).collect::<Vec<_>>(), [1.0, 0.0, 1.0]);
//! ```

use num_traits::Float;

use super::view::Map;
use super::View;

macro_rules! unary {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {$(
        $(#[$doc])*
        pub fn $name<V: View<N>, const N: usize>(v: V) -> Map<V, fn(V::T) -> V::T, N> where
            V::T: Float,
        {
            v.map(<V::T as Float>::$name as fn(_) -> _)
        }
    )*};
}

unary! {
    /// The absolute value of each element.
    abs,
    sqrt,
    exp,
    /// The natural logarithm of each element.
    ln,
    sin,
    cos,
    tan,
}

/// Raises each element to the integer power `n`.
pub fn powi<V: View<N>, const N: usize>(v: V, n: i32) -> Map<V, impl Fn(V::T) -> V::T, N> where
    V::T: Float,
{
    v.map(move |t: V::T| t.powi(n))
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{delayed, Array, Addressable};

    #[test]
    fn pointwise() {
        let a: Array<f64, 2> = Array::from_vec([2, 2], vec![1.0, 4.0, 9.0, 16.0]).unwrap();
        assert_eq!(sqrt(a.view()).collect::<Vec<_>>(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(powi(&a, 2).at([1, 0]), 81.0);
        assert_eq!(ln(a.view()).at([0, 0]), 0.0);
        assert_eq!(exp(delayed([1], |_| 0.0f64)).at([0]), 1.0);
        assert_eq!(sin(delayed([1], |_| 0.0f32)).at([0]), 0.0);
        assert_eq!(cos(delayed([1], |_| 0.0f32)).at([0]), 1.0);
        assert_eq!(tan(delayed([1], |_| 0.0f64)).at([0]), 0.0);
    }

    #[test]
    fn lazy() {
        let a: Array<f64, 1> = Array::from_vec([2], vec![-1.0, 2.0]).unwrap();
        let m = abs(a.view()) + a.view();
        assert_eq!(m.collect::<Vec<_>>(), [0.0, 4.0]);
        a.set([0], -3.0).unwrap();
        assert_eq!(m.at([0]), 0.0);
        assert_eq!(m.at([1]), 4.0);
    }
}
