//! Simplicial interpolation/extrapolation on a rectilinear grid.
//!
//! ```rust
//! use gridinterp::simplex::rectilinear;
//!
//! // Define a grid
//! let x = [0.0_f64, 1.0, 2.0];
//! let y = [0.0_f64, 1.0, 2.0];
//! let grids = &[&x[..], &y[..]];
//!
//! // Values at grid points, z = x + y
//! let z = [0.0, 1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 3.0, 4.0];
//!
//! // Points to interpolate/extrapolate
//! let xobs = [0.5_f64, 1.5, 3.0];
//! let yobs = [0.5_f64, 0.25, -1.0];
//! let obs = [&xobs[..], &yobs[..]];
//!
//! let mut out = [0.0; 3];
//! rectilinear::interpn(grids, &z, &obs, &mut out).unwrap();
//! assert_eq!(out, [1.0, 1.75, 2.0]);
//! ```
//!
//! References
//! * https://en.wikipedia.org/wiki/Simplex#Subdividing_a_cube
use core::cmp::Ordering;

use num_traits::Float;

use crate::grid::{Extrapolation, Locate, RectilinearGrid};
use crate::lattice::ValueLattice;
use crate::{InterpError, Interpolate};

/// Evaluate simplicial interpolation on a rectilinear grid in up to 8 dimensions.
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
///
/// This is a convenience function; the interpolator struct can be used directly for
/// any number of dimensions. Points outside the grid are extrapolated.
///
/// # Errors
/// * If the number of grids and observation coordinate slices differ
/// * If the number of dimensions is 0 or more than 8
/// * Any construction or evaluation error from [`SimplexRectilinear`]
pub fn interpn<T: Float>(
    grids: &[&[T]],
    vals: &[T],
    obs: &[&[T]],
    out: &mut [T],
) -> Result<(), InterpError> {
    let ndims = grids.len();
    if obs.len() != ndims {
        return Err(InterpError::DimensionMismatch {
            expected: ndims,
            actual: obs.len(),
        });
    }
    match ndims {
        1 => interpn_n::<T, 1>(grids, vals, obs, out),
        2 => interpn_n::<T, 2>(grids, vals, obs, out),
        3 => interpn_n::<T, 3>(grids, vals, obs, out),
        4 => interpn_n::<T, 4>(grids, vals, obs, out),
        5 => interpn_n::<T, 5>(grids, vals, obs, out),
        6 => interpn_n::<T, 6>(grids, vals, obs, out),
        7 => interpn_n::<T, 7>(grids, vals, obs, out),
        8 => interpn_n::<T, 8>(grids, vals, obs, out),
        _ => Err(InterpError::Unsupported { ndims }),
    }
}

/// Evaluate interpolant, allocating a new Vec for the output.
#[cfg(feature = "std")]
pub fn interpn_alloc<T: Float>(
    grids: &[&[T]],
    vals: &[T],
    obs: &[&[T]],
) -> Result<Vec<T>, InterpError> {
    let n = obs.first().map_or(0, |x| x.len());
    let mut out = vec![T::zero(); n];
    interpn(grids, vals, obs, &mut out)?;
    Ok(out)
}

fn interpn_n<T: Float, const N: usize>(
    grids: &[&[T]],
    vals: &[T],
    obs: &[&[T]],
    out: &mut [T],
) -> Result<(), InterpError> {
    let mismatch = InterpError::DimensionMismatch {
        expected: N,
        actual: grids.len(),
    };
    let grids: [&[T]; N] = grids.try_into().map_err(|_| mismatch)?;
    let obs: &[&[T]; N] = obs.try_into().map_err(|_| mismatch)?;
    SimplexRectilinear::new(grids, vals)?.interp(obs, out)
}

/// An arbitrary-dimensional simplicial interpolator / extrapolator on a rectilinear grid.
///
/// Each grid cell is split into N! simplices by the Kuhn triangulation, and only the
/// N+1 vertices of the simplex containing the point contribute to its value.
/// The simplex is selected by ordering the normalized coordinates from largest to
/// smallest (ties go to the lower dimension index); its vertices are the lower corner
/// of the cell followed by the corners reached by stepping to the high side of each
/// dimension in that order.
///
/// With `t` sorted descending as `t[p0] >= t[p1] >= ...`, the barycentric weights are
/// `1 - t[p0]`, `t[p0] - t[p1]`, ..., `t[p(N-1)]`.
///
/// The result is continuous and piecewise affine. It matches multilinear
/// interpolation at the grid nodes and for affine functions, but uses fewer
/// samples and is generally less accurate for curved data.
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
///
/// Operation Complexity
/// * O(N log N) to pick the simplex, O(N) to sum over its vertices,
///   plus N bisection searches to find the cell.
///
/// Memory Complexity
/// * Peak stack usage is O(N). No allocation.
#[derive(Clone)]
pub struct SimplexRectilinear<T, A, V, const N: usize> {
    grid: RectilinearGrid<T, A, N>,
    vals: ValueLattice<T, V, N>,
    extrapolation: Extrapolation,
}

impl<T: Float, A: AsRef<[T]>, V: AsRef<[T]>, const N: usize> SimplexRectilinear<T, A, V, N> {
    /// Build a new interpolator, using O(N) calculations and storage.
    ///
    /// # Errors
    /// * If any grid has fewer than 2 entries
    /// * If any grid is not strictly increasing
    /// * If the number of values does not match the number of grid nodes
    pub fn new(grids: [A; N], vals: V) -> Result<Self, InterpError> {
        let grid = RectilinearGrid::new(grids)?;
        let vals = ValueLattice::new(vals, *grid.dims())?;
        Self::from_parts(grid, vals)
    }

    /// Build from an already validated grid and value lattice, which may be shared
    /// with other interpolators.
    ///
    /// # Errors
    /// * If the lattice shape does not match the grid
    pub fn from_parts(
        grid: RectilinearGrid<T, A, N>,
        vals: ValueLattice<T, V, N>,
    ) -> Result<Self, InterpError> {
        if grid.dims() != vals.dims() {
            return Err(InterpError::ValueLengthMismatch {
                expected: grid.nodes().unwrap_or(usize::MAX),
                actual: vals.as_slice().len(),
            });
        }
        log::debug!(
            "built simplex interpolator: {N} dims, {} nodes",
            vals.as_slice().len()
        );
        Ok(Self {
            grid,
            vals,
            extrapolation: Extrapolation::default(),
        })
    }

    /// Set the policy for points outside the grid.
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    #[inline]
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    #[inline]
    pub fn grid(&self) -> &RectilinearGrid<T, A, N> {
        &self.grid
    }

    #[inline]
    pub fn lattice(&self) -> &ValueLattice<T, V, N> {
        &self.vals
    }

    /// Visit the N+1 vertices of the simplex containing the point described by
    /// `locs`, passing the flat index of each vertex's value and its weight.
    ///
    /// Vertices are visited starting from the lower corner of the cell.
    /// Weights sum to one, and are all non-negative when every `t` is in `[0, 1]`.
    #[inline]
    pub fn for_each_weight<F: FnMut(usize, T)>(&self, locs: &[Locate<T>; N], mut f: F) {
        let strides = self.vals.strides();

        let mut k = 0; // Flat index of the current vertex, starting at the lower corner
        for j in 0..N {
            k += locs[j].index * strides[j];
        }

        let order = descending_order(locs);

        // Walk from the lower corner toward the upper corner,
        // stepping up on one dimension at a time
        let mut prev = T::one();
        for &j in order.iter() {
            let t = locs[j].t;
            f(k, prev - t);
            k += strides[j];
            prev = t;
        }
        f(k, prev);
    }
}

/// Permutation of dimension indices that sorts the normalized coordinates from
/// largest to smallest, breaking ties by dimension index.
///
/// NaN sorts last, so that the comparison is a total order for any input.
#[inline]
fn descending_order<T: Float, const N: usize>(locs: &[Locate<T>; N]) -> [usize; N] {
    let key = |j: usize| {
        let t = locs[j].t;
        if t.is_nan() {
            T::neg_infinity()
        } else {
            t
        }
    };

    let mut order: [usize; N] = core::array::from_fn(|j| j);
    order.sort_unstable_by(|&a, &b| {
        key(b)
            .partial_cmp(&key(a))
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    order
}

impl<T, A, V, const N: usize> Interpolate<T, N> for SimplexRectilinear<T, A, V, N>
where
    T: Float,
    A: AsRef<[T]>,
    V: AsRef<[T]>,
{
    #[inline]
    fn interp_one(&self, x: [T; N]) -> Result<T, InterpError> {
        let locs = self.grid.locate(&x, self.extrapolation)?;
        let vals = self.vals.as_slice();

        let mut interped = T::zero();
        self.for_each_weight(&locs, |k, w| interped = interped + w * vals[k]);

        Ok(interped)
    }
}
