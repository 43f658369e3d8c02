//! Simplicial interpolation and extrapolation on the Kuhn triangulation of the grid.
//!
//! Uses only the N+1 vertices of the simplex containing each observation point,
//! which scales much better than multilinear interpolation in high dimensions.
//! See [`rectilinear`] for details.

pub mod rectilinear;

pub use rectilinear::SimplexRectilinear;
