//! Multilinear interpolation and extrapolation.
//!
//! Uses all 2^N corners of the grid cell containing each observation point.
//! See [`rectilinear`] for details.

pub mod rectilinear;

pub use rectilinear::MultilinearRectilinear;
