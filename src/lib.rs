//! N-dimensional multilinear and simplicial interpolation/extrapolation on rectilinear grids,
//! no-std and no-alloc compatible.
//!
//! A rectilinear grid has one strictly increasing (but not necessarily evenly spaced)
//! list of breakpoints per dimension, and one value per grid node stored in C order.
//! Evaluation at an observation point first locates the grid cell on every axis by
//! bisection, then combines the values at some of the cell's corners.
//!
//! # Performance Scalings
//! For a self-consistent multidimensional linear interpolation, there are 2^ndims grid values
//! that contribute to each observation point. Simplicial interpolation splits each cell into
//! simplices and uses only the ndims+1 vertices of one of them, trading some accuracy on
//! curved data for a cost that grows slowly with the number of dimensions.
//!
//! | Method                   | RAM       | Interp. / Extrap. Cost                        |
//! |--------------------------|-----------|-----------------------------------------------|
//! | multilinear::rectilinear | O(ndims)  | O(ndims 2^ndims) + ndims log2(gridsize)       |
//! | simplex::rectilinear     | O(ndims)  | O(ndims log ndims) + ndims log2(gridsize)     |
//!
//! # Extrapolation
//! By default, points outside the grid are extrapolated linearly from the boundary cell.
//! [`Extrapolation::Clamp`] holds the boundary value instead, and [`Extrapolation::Error`]
//! rejects such points.
//!
//! # Example: Multilinear and Simplex
//! ```rust
//! use gridinterp::{multilinear, simplex};
//!
//! // Define a grid
//! let x = [1.0_f64, 2.0, 3.0, 4.0];
//! let y = [0.0_f64, 1.0, 2.0, 3.0];
//!
//! // Grid input for rectilinear method
//! let grids = &[&x[..], &y[..]];
//!
//! // Values at grid points
//! let z = [2.0; 16];
//!
//! // Points to interpolate/extrapolate
//! let xobs = [0.0_f64, 5.0];
//! let yobs = [-1.0, 3.0];
//! let obs = [&xobs[..], &yobs[..]];
//!
//! // Storage for output
//! let mut out = [0.0; 2];
//!
//! // Do interpolation
//! multilinear::rectilinear::interpn(grids, &z, &obs, &mut out).unwrap();
//! simplex::rectilinear::interpn(grids, &z, &obs, &mut out).unwrap();
//! ```
//!
//! # Example: Shared Values
//! ```rust
//! use std::sync::Arc;
//! use gridinterp::{Extrapolation, Interpolate, MultilinearRectilinear, SimplexRectilinear};
//!
//! let x: Arc<[f64]> = Arc::from(vec![0.0, 1.0, 2.0]);
//! let z: Arc<[f64]> = Arc::from(vec![0.0, 1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 3.0, 4.0]);
//!
//! let multilinear = MultilinearRectilinear::new([x.clone(), x.clone()], z.clone()).unwrap();
//! let simplex = SimplexRectilinear::new([x.clone(), x], z)
//!     .unwrap()
//!     .with_extrapolation(Extrapolation::Clamp);
//!
//! assert_eq!(multilinear.interp_one([1.5, 0.25]).unwrap(), 1.75);
//! assert_eq!(simplex.interp_one([5.0, 5.0]).unwrap(), 4.0);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

mod error;
pub use error::InterpError;

pub mod batch;
#[cfg(feature = "rayon")]
pub use batch::ParInterpolate;
pub use batch::Interpolate;

pub mod grid;
pub use grid::{Extrap, Extrapolation, GridAxis, Locate, RectilinearGrid};

pub mod lattice;
pub use lattice::ValueLattice;

pub mod multilinear;
pub use multilinear::MultilinearRectilinear;

pub mod simplex;
pub use simplex::SimplexRectilinear;

pub mod interpolator;
pub use interpolator::{GridInterpolator, Method};

#[cfg(feature = "std")]
pub mod utils;

#[cfg(all(test, feature = "std"))]
pub(crate) mod testing;
