//! Generic programming over binary element functions.
//!
//! For each binary operator in [`std::ops`] this module contains a type of the
//! same name that cannot be instantiated and that implements [`Binary`]. For
//! example, [`Add`] corresponds to [`std::ops::Add`]. Comparisons and
//! [`Min`]/[`Max`] have their own marker types. Any of these can be passed as
//! a type parameter to generic code, e.g. [`View::binary()`].
//!
//! [`View::binary()`]: super::View::binary()

/// A function that combines `T` with `U`.
///
/// This trait has no methods that take `self`. It makes sense to implement it
/// for types that cannot be instantiated, such as empty enumerations.
pub trait Binary<T, U> {
    type Output;

    fn call(t: T, u: U) -> Self::Output;
}

// ----------------------------------------------------------------------------

/// An implementation of [`Binary`] that constructs a pair.
#[derive(Debug, Copy, Clone)]
pub enum Pair {}

impl<T, U> Binary<T, U> for Pair {
    type Output = (T, U);
    #[inline(always)]
    fn call(t: T, u: U) -> Self::Output { (t, u) }
}

// ----------------------------------------------------------------------------

macro_rules! arithmetic {
    ($($op:ident :: $method:ident),* $(,)?) => {$(
        #[derive(Debug, Copy, Clone)]
        pub enum $op {}

        impl<T, U> Binary<T, U> for $op where T: std::ops::$op<U> {
            type Output = T::Output;
            #[inline(always)]
            fn call(t: T, u: U) -> Self::Output { t.$method(u) }
        }
    )*};
}

arithmetic! {
    Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem,
    BitAnd::bitand, BitOr::bitor, BitXor::bitxor, Shl::shl, Shr::shr,
}

// ----------------------------------------------------------------------------

macro_rules! comparison {
    ($($op:ident($t:ident, $u:ident) => $e:expr),* $(,)?) => {$(
        #[derive(Debug, Copy, Clone)]
        pub enum $op {}

        impl<T, U> Binary<T, U> for $op where T: PartialOrd<U> {
            type Output = bool;
            #[inline(always)]
            fn call($t: T, $u: U) -> bool { $e }
        }
    )*};
}

/// `t == u`.
#[derive(Debug, Copy, Clone)]
pub enum Equal {}

impl<T, U> Binary<T, U> for Equal where T: PartialEq<U> {
    type Output = bool;
    #[inline(always)]
    fn call(t: T, u: U) -> bool { t == u }
}

/// `t != u`.
#[derive(Debug, Copy, Clone)]
pub enum NotEqual {}

impl<T, U> Binary<T, U> for NotEqual where T: PartialEq<U> {
    type Output = bool;
    #[inline(always)]
    fn call(t: T, u: U) -> bool { t != u }
}

comparison! {
    Less(t, u) => t < u,
    Greater(t, u) => t > u,
    LessEqual(t, u) => t <= u,
    GreaterEqual(t, u) => t >= u,
}

// ----------------------------------------------------------------------------

/// The smaller of two values, preferring the first when they are unordered.
#[derive(Debug, Copy, Clone)]
pub enum Min {}

impl<T: PartialOrd> Binary<T, T> for Min {
    type Output = T;
    #[inline(always)]
    fn call(t: T, u: T) -> T { if u < t { u } else { t } }
}

/// The larger of two values, preferring the first when they are unordered.
#[derive(Debug, Copy, Clone)]
pub enum Max {}

impl<T: PartialOrd> Binary<T, T> for Max {
    type Output = T;
    #[inline(always)]
    fn call(t: T, u: T) -> T { if u > t { u } else { t } }
}

// ----------------------------------------------------------------------------

/// Implement one of the [`std::ops`] binary traits for a type that implements
/// [`View`] of rank `N`.
///
/// The generated operator calls [`View::binary()`] and panics if the operand
/// shapes differ. You perhaps want to use [`impl_ops_for_view`] instead,
/// which calls this.
///
/// The first argument names the rank parameter, the bracketed list gives the
/// generic parameters of the impl, and the rest is the implementing type.
///
/// ```
/// use ndview::{View, impl_op_for_view};
///
/// pub struct Ramp<const N: usize>([usize; N]);
///
/// impl<const N: usize> View<N> for Ramp<N> {
///     type T = usize;
///     fn shape(&self) -> [usize; N] { self.0 }
///     fn at(&self, coords: [usize; N]) -> usize { coords.iter().sum() }
/// }
///
/// impl_op_for_view! { Add::add for N; [const N: usize] Ramp<N> }
///
/// let twice = Ramp([2, 2]) + Ramp([2, 2]);
/// assert_eq!(twice.at([1, 1]), 4);
/// ```
///
/// [`View`]: super::View
/// [`View::binary()`]: super::View::binary()
/// [`impl_ops_for_view`]: crate::impl_ops_for_view
#[macro_export]
macro_rules! impl_op_for_view {
    ($op:ident::$method:ident for $n:ident; [$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*, RHS> std::ops::$op<RHS> for $ty where
            Self: $crate::View<$n>,
            RHS: $crate::View<$n>,
            $crate::ops::$op: $crate::ops::Binary<
                <Self as $crate::View<$n>>::T,
                <RHS as $crate::View<$n>>::T,
            >,
            <$crate::ops::$op as $crate::ops::Binary<
                <Self as $crate::View<$n>>::T,
                <RHS as $crate::View<$n>>::T,
            > >::Output: Clone,
        {
            type Output = $crate::view::Zip<Self, RHS, $crate::ops::$op, $n>;

            fn $method(self, other: RHS) -> Self::Output {
                match $crate::View::binary(self, other) {
                    Ok(zip) => zip,
                    Err(e) => panic!("{}", e),
                }
            }
        }
    };
}

/// Implement [`std::ops::Neg`] for a type that implements [`View`] of rank
/// `N`, as a pointwise [`View::map()`].
///
/// [`View`]: super::View
/// [`View::map()`]: super::View::map()
#[macro_export]
macro_rules! impl_neg_for_view {
    ($n:ident; [$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*> std::ops::Neg for $ty where
            Self: $crate::View<$n>,
            <Self as $crate::View<$n>>::T: std::ops::Neg<Output = <Self as $crate::View<$n>>::T>,
        {
            type Output = $crate::view::Map<
                Self,
                fn(<Self as $crate::View<$n>>::T) -> <Self as $crate::View<$n>>::T,
                $n,
            >;

            fn neg(self) -> Self::Output {
                $crate::View::map(self, std::ops::Neg::neg as fn(_) -> _)
            }
        }
    };
}

/// Implement all of the [`std::ops`] binary traits and [`std::ops::Neg`] for
/// a type that implements [`View`]. The binary implementations call
/// [`View::binary()`].
///
/// ```
/// use ndview::{View, impl_ops_for_view};
///
/// pub struct Ramp<const N: usize>([usize; N]);
///
/// impl<const N: usize> View<N> for Ramp<N> {
///     type T = i64;
///     fn shape(&self) -> [usize; N] { self.0 }
///     fn at(&self, coords: [usize; N]) -> i64 { coords.iter().sum::<usize>() as i64 }
/// }
///
/// impl_ops_for_view!(N; [const N: usize] Ramp<N>);
///
/// let v = -(Ramp([3]) * Ramp([3]));
/// assert_eq!(v.at([2]), -4);
/// ```
///
/// [`View`]: super::View
/// [`View::binary()`]: super::View::binary()
#[macro_export]
macro_rules! impl_ops_for_view {
    ($n:ident; [$($gen:tt)*] $ty:ty) => {
        $crate::impl_op_for_view! { Add::add for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { Sub::sub for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { Mul::mul for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { Div::div for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { Rem::rem for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { BitAnd::bitand for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { BitOr::bitor for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { BitXor::bitxor for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { Shl::shl for $n; [$($gen)*] $ty }
        $crate::impl_op_for_view! { Shr::shr for $n; [$($gen)*] $ty }
        $crate::impl_neg_for_view! { $n; [$($gen)*] $ty }
    };
}

// ----------------------------------------------------------------------------
