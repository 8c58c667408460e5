//! The bound-checking switch.
//!
//! Coordinate ranges, slice extents, operand shapes and composite-array
//! selectors are validated only while bound checking is enabled. It is
//! enabled by default through the `bounds-check` cargo feature.
//!
//! Disabling it removes the checks from the few validation call sites. A
//! violation then yields an unspecified value, or a panic from the
//! underlying buffer index; it never reads or writes outside a buffer.
//!
//! Rank and axis-number checks are part of an operation's structure and are
//! always performed.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable read by [`init_from_env()`].
pub const BOUNDS_CHECK_ENV: &str = "NDVIEW_BOUNDS_CHECK";

static BOUNDS_CHECK: AtomicBool = AtomicBool::new(cfg!(feature = "bounds-check"));

thread_local! {
    static OVERRIDE: Cell<Option<bool>> = const { Cell::new(None) };
}

/// Returns whether bound checking is currently enabled on this thread.
#[inline]
pub fn bounds_checking() -> bool {
    OVERRIDE
        .with(Cell::get)
        .unwrap_or_else(|| BOUNDS_CHECK.load(Ordering::Relaxed))
}

/// Enable or disable bound checking for the whole process, returning the
/// previous setting.
///
/// A [`with_bounds_checking()`] override on the calling thread still takes
/// precedence.
pub fn set_bounds_checking(enabled: bool) -> bool {
    let previous = BOUNDS_CHECK.swap(enabled, Ordering::Relaxed);
    tracing::debug!(enabled, previous, "bound checking changed");
    previous
}

/// Run `f` with bound checking forced to `enabled` on the current thread.
///
/// The previous state is restored when `f` returns or unwinds.
///
/// ```
/// use ndview::{config, Array, View};
/// let a: Array<i32, 1> = Array::from_vec([3], vec![1, 2, 3]).unwrap();
/// assert!(a.get([5]).is_err());
/// let unchecked = config::with_bounds_checking(false, || config::bounds_checking());
/// assert!(!unchecked);
/// assert!(config::bounds_checking());
/// ```
pub fn with_bounds_checking<R>(enabled: bool, f: impl FnOnce() -> R) -> R {
    struct Restore(Option<bool>);

    impl Drop for Restore {
        fn drop(&mut self) {
            OVERRIDE.with(|o| o.set(self.0));
        }
    }

    let _restore = Restore(OVERRIDE.with(|o| o.replace(Some(enabled))));
    f()
}

/// Apply [`BOUNDS_CHECK_ENV`] if it is set, returning the resulting setting.
///
/// Accepted values are `1`, `true`, `on`, `0`, `false` and `off`. Anything
/// else is logged and ignored.
pub fn init_from_env() -> bool {
    if let Ok(value) = std::env::var(BOUNDS_CHECK_ENV) {
        match parse_flag(&value) {
            Some(enabled) => {
                set_bounds_checking(enabled);
            }
            None => tracing::warn!(
                variable = BOUNDS_CHECK_ENV,
                value = value.as_str(),
                "ignoring unrecognised value"
            ),
        }
    }
    bounds_checking()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" On "), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn override_is_scoped() {
        let outer = bounds_checking();
        let inner = with_bounds_checking(!outer, || {
            let nested = with_bounds_checking(outer, bounds_checking);
            assert_eq!(nested, outer);
            bounds_checking()
        });
        assert_eq!(inner, !outer);
        assert_eq!(bounds_checking(), outer);
    }

    #[test]
    fn override_survives_panic() {
        let outer = bounds_checking();
        let result = std::panic::catch_unwind(|| {
            with_bounds_checking(!outer, || panic!("boom"));
        });
        assert!(result.is_err());
        assert_eq!(bounds_checking(), outer);
    }
}
