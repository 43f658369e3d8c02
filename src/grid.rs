//! Rectilinear grid axes and the per-dimension cell search.
//!
//! Each axis is a strictly increasing list of breakpoints. Locating a coordinate
//! on an axis produces the index of the lower breakpoint of the bracketing cell
//! and the normalized position `t` inside that cell, with `t = 0` at the lower
//! breakpoint and `t = 1` at the upper one.
//!
//! Points outside the axis are assigned to the first or last cell. What happens
//! to `t` there is decided by [`Extrapolation`]; the default lets `t` run past
//! `[0, 1]`, which extrapolates linearly using the slope of the boundary cell.
use core::marker::PhantomData;

use num_traits::Float;

use crate::InterpError;

/// Which side of an axis an observation falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrap {
    Inside,
    OutsideLow,
    OutsideHigh,
}

/// Policy for observation points outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Extrapolation {
    /// Use the boundary cell and let the normalized coordinate leave `[0, 1]`,
    /// extrapolating linearly along each dimension.
    #[default]
    Extrapolate,
    /// Use the boundary cell and clip the normalized coordinate to `[0, 1]`,
    /// holding the value on the grid boundary.
    Clamp,
    /// Return [`InterpError::OutOfBounds`].
    Error,
}

/// Location of a coordinate on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Locate<T> {
    /// Index of the lower breakpoint of the cell, always in `0..=len - 2`
    pub index: usize,
    /// Normalized position within the cell
    pub t: T,
}

/// One strictly increasing sequence of breakpoints.
///
/// Storage is anything that can be viewed as a slice, so the breakpoints may be
/// owned (`Vec<T>`), shared (`Arc<[T]>`), or borrowed (`&[T]`).
#[derive(Clone, Debug)]
pub struct GridAxis<T, A> {
    breakpoints: A,
    _marker: PhantomData<T>,
}

impl<T: Float, A: AsRef<[T]>> GridAxis<T, A> {
    /// Validate and wrap a list of breakpoints.
    ///
    /// # Errors
    /// * If there are fewer than 2 breakpoints
    /// * If the breakpoints are not strictly increasing (this includes NaN entries)
    /// * If any breakpoint is infinite
    pub fn new(breakpoints: A) -> Result<Self, InterpError> {
        validate_axis(0, breakpoints.as_ref())?;
        Ok(Self::new_unchecked(breakpoints))
    }

    fn new_unchecked(breakpoints: A) -> Self {
        Self {
            breakpoints,
            _marker: PhantomData,
        }
    }

    /// The breakpoints of this axis.
    #[inline]
    pub fn breakpoints(&self) -> &[T] {
        self.breakpoints.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.breakpoints().len()
    }

    /// Always false; an axis has at least 2 breakpoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lowest breakpoint
    #[inline]
    pub fn first(&self) -> T {
        self.breakpoints()[0]
    }

    /// Highest breakpoint
    #[inline]
    pub fn last(&self) -> T {
        self.breakpoints()[self.len() - 1]
    }

    /// Classify a coordinate as inside, below, or above this axis.
    #[inline]
    pub fn side(&self, x: T) -> Extrap {
        match x {
            x if x < self.first() => Extrap::OutsideLow,
            x if x > self.last() => Extrap::OutsideHigh,
            _ => Extrap::Inside,
        }
    }

    /// Find the cell containing `x` and the normalized position inside it.
    ///
    /// Bisection finds the greatest `i` with `breakpoints[i] <= x`, which is then
    /// clipped to `0..=len - 2` so that every point has a complete cell. At the
    /// last breakpoint this gives the last cell with `t = 1`. Points outside the
    /// axis get a `t` outside `[0, 1]`.
    #[inline]
    pub fn locate(&self, x: T) -> Locate<T> {
        let grid = self.breakpoints();

        // `0` if outside-low, `len` if at or beyond the last breakpoint.
        // Converted to signed so that outside-low can be represented briefly as -1.
        let iloc = grid.partition_point(|b| *b <= x) as isize - 1;

        let imax = (grid.len() - 2) as isize; // maximum index for lower corner
        let index = iloc.max(0).min(imax) as usize;

        let x0 = grid[index];
        let x1 = grid[index + 1];
        let t = (x - x0) / (x1 - x0);

        Locate { index, t }
    }
}

/// Check the invariants of one axis, reporting `dim` in any error.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn validate_axis<T: Float>(dim: usize, breakpoints: &[T]) -> Result<(), InterpError> {
    let len = breakpoints.len();
    if len < 2 {
        return Err(InterpError::AxisTooShort { dim, len });
    }
    // Negated comparison so that NaN fails as well
    if let Some(index) = (1..len).find(|&i| !(breakpoints[i] > breakpoints[i - 1])) {
        return Err(InterpError::NotIncreasing { dim, index });
    }
    if let Some(index) = breakpoints.iter().position(|b| b.is_infinite()) {
        return Err(InterpError::NonFiniteBreakpoint { dim, index });
    }
    Ok(())
}

/// An N-dimensional rectilinear grid: one [`GridAxis`] per dimension.
///
/// Axes may have different lengths. The number of dimensions is fixed by the type.
#[derive(Clone, Debug)]
pub struct RectilinearGrid<T, A, const N: usize> {
    axes: [GridAxis<T, A>; N],

    /// Number of breakpoints on each axis
    dims: [usize; N],
}

impl<T: Float, A: AsRef<[T]>, const N: usize> RectilinearGrid<T, A, N> {
    /// Build a grid from one breakpoint list per dimension.
    ///
    /// # Errors
    /// * If any axis has fewer than 2 breakpoints
    /// * If any axis is not strictly increasing
    /// * If any breakpoint is infinite
    pub fn new(axes: [A; N]) -> Result<Self, InterpError> {
        const {
            assert!(N > 0, "A grid needs at least one dimension");
        }
        for (dim, axis) in axes.iter().enumerate() {
            validate_axis(dim, axis.as_ref())?;
        }

        let mut dims = [0_usize; N];
        (0..N).for_each(|i| dims[i] = axes[i].as_ref().len());
        let axes = axes.map(GridAxis::new_unchecked);

        log::debug!("built {N}-dimensional rectilinear grid with dims {dims:?}");

        Ok(Self { axes, dims })
    }

    /// Number of breakpoints on each axis
    #[inline]
    pub fn dims(&self) -> &[usize; N] {
        &self.dims
    }

    #[inline]
    pub fn axes(&self) -> &[GridAxis<T, A>; N] {
        &self.axes
    }

    #[inline]
    pub fn axis(&self, dim: usize) -> Option<&GridAxis<T, A>> {
        self.axes.get(dim)
    }

    /// Total number of grid nodes, or `None` on overflow.
    pub fn nodes(&self) -> Option<usize> {
        self.dims.iter().try_fold(1_usize, |acc, &n| acc.checked_mul(n))
    }

    /// Locate a point on every axis under the given extrapolation policy.
    ///
    /// # Errors
    /// * If any coordinate is NaN
    /// * If a coordinate is too far outside the grid for its normalized position to
    ///   be finite and the policy is [`Extrapolation::Extrapolate`]
    /// * If the point is outside the grid and the policy is [`Extrapolation::Error`]
    #[inline]
    pub fn locate(&self, x: &[T; N], policy: Extrapolation) -> Result<[Locate<T>; N], InterpError> {
        let mut locs = [Locate {
            index: 0,
            t: T::zero(),
        }; N];
        for dim in 0..N {
            locs[dim] = self.locate_dim(dim, x[dim], policy)?;
        }
        Ok(locs)
    }

    #[inline]
    fn locate_dim(
        &self,
        dim: usize,
        x: T,
        policy: Extrapolation,
    ) -> Result<Locate<T>, InterpError> {
        if x.is_nan() {
            return Err(InterpError::NanCoordinate { dim });
        }
        let axis = &self.axes[dim];
        match policy {
            Extrapolation::Extrapolate => {
                // Covers infinite coordinates and finite ones that overflow `t`
                let loc = axis.locate(x);
                if loc.t.is_finite() {
                    Ok(loc)
                } else {
                    Err(InterpError::ExtrapolationOverflow { dim })
                }
            }
            Extrapolation::Clamp => {
                let mut loc = axis.locate(x);
                loc.t = loc.t.max(T::zero()).min(T::one());
                Ok(loc)
            }
            Extrapolation::Error => match axis.side(x) {
                Extrap::Inside => Ok(axis.locate(x)),
                _ => Err(InterpError::OutOfBounds { dim }),
            },
        }
    }

    /// Whether a point is inside the grid, boundaries included.
    pub fn contains(&self, x: &[T; N]) -> bool {
        (0..N).all(|i| self.axes[i].side(x[i]) == Extrap::Inside)
    }

    /// Check a point against the grid bounds within an absolute tolerance.
    ///
    /// Output entry `i` is `true` if the point is out of bounds on axis `i`
    /// by at least `atol`, and `false` otherwise.
    pub fn check_bounds(&self, x: &[T; N], atol: T) -> [bool; N] {
        let mut out = [false; N];
        for i in 0..N {
            let (lo, hi) = (self.axes[i].first(), self.axes[i].last());
            out[i] = (x[i] - lo) <= -atol || (x[i] - hi) >= atol;
        }
        out
    }
}
