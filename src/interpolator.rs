//! Choice of interpolation method at construction time.
use num_traits::Float;

use crate::grid::{Extrapolation, RectilinearGrid};
use crate::lattice::ValueLattice;
use crate::{InterpError, Interpolate, MultilinearRectilinear, SimplexRectilinear};

/// Interpolation method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Weighted sum over all 2^N corners of the cell.
    #[default]
    Multilinear,
    /// Barycentric weights over the N+1 vertices of the enclosing Kuhn simplex.
    Simplex,
}

/// An interpolator whose method is selected by a runtime [`Method`] value.
///
/// ```rust
/// use gridinterp::{GridInterpolator, Interpolate, Method};
///
/// let x = [0.0_f64, 1.0, 2.0];
/// let z = [0.0, 1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 3.0, 4.0];
///
/// for method in [Method::Multilinear, Method::Simplex] {
///     let interpolator = GridInterpolator::new([&x[..], &x[..]], &z[..], method).unwrap();
///     assert_eq!(interpolator.interp_one([0.5, 0.5]).unwrap(), 1.0);
/// }
/// ```
#[derive(Clone)]
pub enum GridInterpolator<T, A, V, const N: usize> {
    Multilinear(MultilinearRectilinear<T, A, V, N>),
    Simplex(SimplexRectilinear<T, A, V, N>),
}

impl<T: Float, A: AsRef<[T]>, V: AsRef<[T]>, const N: usize> GridInterpolator<T, A, V, N> {
    /// Build an interpolator with the given method.
    ///
    /// # Errors
    /// * Any construction error from the selected method
    pub fn new(grids: [A; N], vals: V, method: Method) -> Result<Self, InterpError> {
        let grid = RectilinearGrid::new(grids)?;
        let vals = ValueLattice::new(vals, *grid.dims())?;
        Self::from_parts(grid, vals, method)
    }

    /// Build from an already validated grid and value lattice.
    ///
    /// # Errors
    /// * If the lattice shape does not match the grid
    pub fn from_parts(
        grid: RectilinearGrid<T, A, N>,
        vals: ValueLattice<T, V, N>,
        method: Method,
    ) -> Result<Self, InterpError> {
        Ok(match method {
            Method::Multilinear => {
                Self::Multilinear(MultilinearRectilinear::from_parts(grid, vals)?)
            }
            Method::Simplex => Self::Simplex(SimplexRectilinear::from_parts(grid, vals)?),
        })
    }

    /// Set the policy for points outside the grid.
    pub fn with_extrapolation(self, extrapolation: Extrapolation) -> Self {
        match self {
            Self::Multilinear(x) => Self::Multilinear(x.with_extrapolation(extrapolation)),
            Self::Simplex(x) => Self::Simplex(x.with_extrapolation(extrapolation)),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Multilinear(_) => Method::Multilinear,
            Self::Simplex(_) => Method::Simplex,
        }
    }

    pub fn extrapolation(&self) -> Extrapolation {
        match self {
            Self::Multilinear(x) => x.extrapolation(),
            Self::Simplex(x) => x.extrapolation(),
        }
    }

    pub fn grid(&self) -> &RectilinearGrid<T, A, N> {
        match self {
            Self::Multilinear(x) => x.grid(),
            Self::Simplex(x) => x.grid(),
        }
    }

    pub fn lattice(&self) -> &ValueLattice<T, V, N> {
        match self {
            Self::Multilinear(x) => x.lattice(),
            Self::Simplex(x) => x.lattice(),
        }
    }
}

impl<T, A, V, const N: usize> Interpolate<T, N> for GridInterpolator<T, A, V, N>
where
    T: Float,
    A: AsRef<[T]>,
    V: AsRef<[T]>,
{
    #[inline]
    fn interp_one(&self, x: [T; N]) -> Result<T, InterpError> {
        match self {
            Self::Multilinear(interpolator) => interpolator.interp_one(x),
            Self::Simplex(interpolator) => interpolator.interp_one(x),
        }
    }
}
