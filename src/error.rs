//! Errors raised by array construction, slicing and access.

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The coarse classification of an [`Error`].
///
/// These are stable and are what callers should match on; the variants of
/// `Error` carry the details and may grow.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// A coordinate, axis or slice start is out of range.
    Index,
    /// A slice or element count does not fit.
    Length,
    /// Operand shapes or ranks are incompatible.
    DimensionMismatch,
    /// A composite-array selector is out of range.
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("index {index} out of range for axis {axis} of size {size}")]
    Index { axis: usize, index: usize, size: usize },

    #[error("axis {axis} out of range for {rank}-dimensional array")]
    Axis { axis: usize, rank: usize },

    #[error("axis {axis} appears more than once")]
    DuplicateAxis { axis: usize },

    #[error("slice of axis {axis} (start {start}, size {size}, step {step}) exceeds extent {extent}")]
    SliceLength {
        axis: usize,
        start: usize,
        size: usize,
        step: isize,
        extent: usize,
    },

    #[error("layout spans offsets {low}..={high}, outside a buffer of length {len}")]
    Extent { low: isize, high: isize, len: usize },

    #[error("expected {expected} elements, got {got}")]
    Length { expected: usize, got: usize },

    #[error("dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch { left: Vec<usize>, right: Vec<usize> },

    #[error("rank mismatch: expected {expected}, got {got}")]
    Rank { expected: usize, got: usize },

    #[error("selector {index} out of range for {count} sources")]
    Range { index: usize, count: usize },
}

impl Error {
    /// Returns the [`ErrorKind`] of `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Index { .. } | Error::Axis { .. } | Error::DuplicateAxis { .. } => {
                ErrorKind::Index
            }
            Error::SliceLength { .. } | Error::Extent { .. } | Error::Length { .. } => {
                ErrorKind::Length
            }
            Error::DimensionMismatch { .. } | Error::Rank { .. } => ErrorKind::DimensionMismatch,
            Error::Range { .. } => ErrorKind::Range,
        }
    }

    pub(crate) fn mismatch(left: &[usize], right: &[usize]) -> Self {
        Error::DimensionMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }
}

// ----------------------------------------------------------------------------
