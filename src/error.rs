//! Error type shared by grid construction, lattice construction, and evaluation.
use thiserror::Error;

/// Errors produced while building an interpolator or evaluating it.
///
/// Construction errors (`AxisTooShort`, `NotIncreasing`, `NonFiniteBreakpoint`,
/// `ValueLengthMismatch`)
/// are only ever returned by constructors. The remaining variants are per-call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InterpError {
    /// An axis has fewer than the two breakpoints needed to form a cell.
    #[error("axis {dim} has {len} breakpoints; at least 2 are required")]
    AxisTooShort { dim: usize, len: usize },

    /// An axis is not strictly increasing (or contains NaN) at `index`.
    #[error("axis {dim} is not strictly increasing at index {index}")]
    NotIncreasing { dim: usize, index: usize },

    /// The value lattice does not have one entry per grid node.
    #[error("value lattice has {actual} entries, but the grid has {expected} nodes")]
    ValueLengthMismatch { expected: usize, actual: usize },

    /// A point, or a set of axes, does not have the expected number of dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Input and output buffers of a batch call disagree in length.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The point lies outside the grid and the policy forbids extrapolation.
    #[error("coordinate on dimension {dim} is outside the grid")]
    OutOfBounds { dim: usize },

    /// An axis contains an infinite breakpoint at `index`.
    #[error("axis {dim} has a non-finite breakpoint at index {index}")]
    NonFiniteBreakpoint { dim: usize, index: usize },

    /// The coordinate on `dim` is NaN.
    #[error("coordinate on dimension {dim} is NaN")]
    NanCoordinate { dim: usize },

    /// The coordinate on `dim` is so far outside the grid that its normalized
    /// position is not finite, so extrapolation would produce NaN.
    #[error("coordinate on dimension {dim} is too far outside the grid to extrapolate")]
    ExtrapolationOverflow { dim: usize },

    /// Runtime-dispatched entry points only cover a fixed range of dimensions.
    #[error("{ndims} dimensions is not supported here; use the interpolator struct directly")]
    Unsupported { ndims: usize },
}
