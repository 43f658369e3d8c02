//! Multilinear interpolation/extrapolation on a rectilinear grid.
//!
//! ```rust
//! use gridinterp::multilinear::rectilinear;
//!
//! // Define a grid
//! let x = [1.0_f64, 1.2, 2.0];
//! let y = [1.0_f64, 1.3, 1.5];
//!
//! // Grid input for rectilinear method
//! let grids = &[&x[..], &y[..]];
//!
//! // Values at grid points
//! let z = [2.0; 9];
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
//! rectilinear::interpn(grids, &z, &obs, &mut out).unwrap();
//! assert!(out.iter().all(|&v| (v - 2.0).abs() < 1e-12));
//! ```
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation#Weighted_mean
use num_traits::Float;

use crate::grid::{Extrapolation, Locate, RectilinearGrid};
use crate::lattice::ValueLattice;
use crate::{InterpError, Interpolate};

/// Evaluate multilinear interpolation on a rectilinear grid in up to 8 dimensions.
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
///
/// This is a convenience function; the interpolator struct can be used directly for
/// any number of dimensions. Points outside the grid are extrapolated.
///
/// While this method initializes the interpolator struct on every call, the overhead of doing this
/// is minimal even when using it to evaluate one observation point at a time.
///
/// # Errors
/// * If the number of grids and observation coordinate slices differ
/// * If the number of dimensions is 0 or more than 8
/// * Any construction or evaluation error from [`MultilinearRectilinear`]
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
///
/// For best results, use the `interpn` function with preallocated output;
/// allocation has a significant performance cost, and should be used sparingly.
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
    MultilinearRectilinear::new(grids, vals)?.interp(obs, out)
}

/// An arbitrary-dimensional multilinear interpolator / extrapolator on a rectilinear grid.
///
/// The value at a point is the weighted sum of the values at the 2^N corners of the
/// grid cell containing it. Each corner's weight is the product, over dimensions,
/// of `t` on dimensions where the corner is on the high side of the cell and
/// `1 - t` where it is on the low side. This reproduces any function that is
/// affine in each dimension exactly.
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
///
/// Operation Complexity
/// * O(N * 2^N) for interpolation and extrapolation in all regions,
///   plus N bisection searches to find the cell.
///
/// Memory Complexity
/// * Peak stack usage is O(N). No allocation.
#[derive(Clone)]
pub struct MultilinearRectilinear<T, A, V, const N: usize> {
    grid: RectilinearGrid<T, A, N>,
    vals: ValueLattice<T, V, N>,
    extrapolation: Extrapolation,
}

impl<T: Float, A: AsRef<[T]>, V: AsRef<[T]>, const N: usize> MultilinearRectilinear<T, A, V, N> {
    /// Build a new interpolator, using O(N) calculations and storage.
    ///
    /// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
    ///
    /// # Errors
    /// * If any grid has fewer than 2 entries
    /// * If any grid is not strictly increasing
    /// * If the number of values does not match the number of grid nodes
    pub fn new(grids: [A; N], vals: V) -> Result<Self, InterpError> {
        const {
            assert!(
                N > 0 && N < usize::BITS as usize,
                "Corner enumeration needs 0 < N < usize::BITS"
            );
        }
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
            "built multilinear interpolator: {N} dims, {} nodes",
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

    /// Visit every corner of the cell described by `locs`, passing the flat index
    /// of the corner's value and its weight.
    ///
    /// Corner `c` takes the high side on dimension `d` when bit `d` of `c` is set.
    /// Weights sum to one, and are all non-negative when every `t` is in `[0, 1]`.
    #[inline]
    pub fn for_each_weight<F: FnMut(usize, T)>(&self, locs: &[Locate<T>; N], mut f: F) {
        let strides = self.vals.strides();

        let mut origin = 0; // Flat index of the lower corner of the cell
        for j in 0..N {
            origin += locs[j].index * strides[j];
        }

        let nverts = 1_usize << N;
        for i in 0..nverts {
            let mut k = origin;
            let mut w = T::one();
            for j in 0..N {
                let t = locs[j].t;
                if i & (1 << j) != 0 {
                    k += strides[j];
                    w = w * t;
                } else {
                    w = w * (T::one() - t);
                }
            }
            f(k, w);
        }
    }
}

impl<T, A, V, const N: usize> Interpolate<T, N> for MultilinearRectilinear<T, A, V, N>
where
    T: Float,
    A: AsRef<[T]>,
    V: AsRef<[T]>,
{
    /// Interpolate the value at a point,
    /// using fixed-size intermediate storage of O(ndims) and no allocation.
    #[inline]
    fn interp_one(&self, x: [T; N]) -> Result<T, InterpError> {
        let locs = self.grid.locate(&x, self.extrapolation)?;
        let vals = self.vals.as_slice();

        let mut interped = T::zero();
        self.for_each_weight(&locs, |k, w| interped = interped + w * vals[k]);

        Ok(interped)
    }
}

#[cfg(test)]
mod test {
    use super::{interpn, MultilinearRectilinear};
    use crate::grid::Extrapolation;
    use crate::testing::*;
    use crate::utils::*;
    use crate::{InterpError, Interpolate};

    /// The 3x3 example grid with z = x + y
    #[test]
    fn test_sum_3x3() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        let z = [0.0, 1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 3.0, 4.0];
        let interpolator = MultilinearRectilinear::new([&x[..], &y[..]], &z[..]).unwrap();

        assert_eq!(interpolator.interp_one([0.5, 0.5]).unwrap(), 1.0);
        assert_eq!(interpolator.interp_one([1.5, 0.25]).unwrap(), 1.75);
        assert_eq!(interpolator.interp_one([2.0, 2.0]).unwrap(), 4.0);
        assert_eq!(interpolator.interp_one([0.0, 0.0]).unwrap(), 0.0);
    }

    /// Test with one dimension that is minimum size and one that is not
    #[test]
    fn test_interp_extrap_2d_small() {
        let x = linspace(-1.0, 1.0, 3);
        let y = Vec::from([0.5, 0.6]);
        let z = sample(&[&x, &y], |p| p[0] + p[1]);

        // Observation points all over in 2D space
        let xobs = linspace(-10.0_f64, 10.0, 5);
        let yobs = linspace(-10.0_f64, 10.0, 5);
        let xyobs = meshgrid(Vec::from([&xobs, &yobs]));

        let interpolator = MultilinearRectilinear::new([x, y], z).unwrap();

        xyobs.iter().for_each(|xyi| {
            let zi = xyi[0] + xyi[1];
            let zii = interpolator.interp_one([xyi[0], xyi[1]]).unwrap();
            assert!((zi - zii).abs() < 1e-10)
        });
    }

    /// Iterate from 1 to 8 dimensions, making a minimum-sized grid for each one
    /// to traverse every combination of interpolating or extrapolating high or low on each dimension.
    /// Each test evaluates at 3^ndims locations, largely extrapolated in corner regions.
    #[test]
    fn test_interp_extrap_1d_to_8d() {
        let mut rng = rng_fixed_seed();

        for ndims in 1..=8 {
            println!("Testing in {ndims} dims");
            // Interp grid, linear with noise
            let xs: Vec<Vec<f64>> = (0..ndims)
                .map(|i| jittered_linspace(&mut rng, -5.0 * (i as f64), 5.0 * ((i + 1) as f64), 2))
                .collect();
            let grids: Vec<&[f64]> = xs.iter().map(|x| &x[..]).collect();
            let axes: Vec<&Vec<f64>> = xs.iter().collect();
            let u = sample(&axes, |p| p.iter().sum()); // sum is linear in every direction, good for testing

            // Observation points
            let xobs: Vec<Vec<f64>> = (0..ndims)
                .map(|i| linspace(-7.0 * (i as f64), 7.0 * ((i + 1) as f64), 3))
                .collect();
            let gridobs = meshgrid((0..ndims).map(|i| &xobs[i]).collect());
            let gridobs_t: Vec<Vec<f64>> = (0..ndims)
                .map(|i| gridobs.iter().map(|x| x[i]).collect())
                .collect(); // transpose
            let xobsslice: Vec<&[f64]> = gridobs_t.iter().map(|x| &x[..]).collect();
            let uobs: Vec<f64> = gridobs.iter().map(|x| x.iter().sum()).collect(); // expected output at observation points
            let mut out = vec![0.0; uobs.len()];

            // Evaluate
            interpn(&grids, &u, &xobsslice, &mut out[..]).unwrap();

            // Check that interpolated values match expectation,
            // using an absolute difference because some points are very close to or exactly at zero,
            // and do not do well under a check on relative difference.
            (0..uobs.len()).for_each(|i| assert!((out[i] - uobs[i]).abs() < 1e-10));
        }
    }

    /// Every node returns exactly its stored value, and random interior
    /// points have normalized, non-negative weights, in 1, 2, 3, and 6 dims.
    #[test]
    fn test_nodes_and_weights() {
        fn check<const N: usize>(size: usize) {
            let mut rng = rng_fixed_seed();
            let xs: Vec<Vec<f64>> = (0..N)
                .map(|i| jittered_linspace(&mut rng, 0.0, (i + 1) as f64, size))
                .collect();
            let axes: Vec<&Vec<f64>> = xs.iter().collect();
            let z = randn::<f64>(&mut rng, size.pow(N as u32));
            let grids: [&[f64]; N] = core::array::from_fn(|i| &xs[i][..]);
            let interpolator = MultilinearRectilinear::new(grids, &z[..]).unwrap();

            for (p, zi) in meshgrid(axes).iter().zip(z.iter()) {
                let p: [f64; N] = p[..].try_into().unwrap();
                assert_eq!(interpolator.interp_one(p).unwrap(), *zi);
            }

            for _ in 0..100 {
                let r = randn::<f64>(&mut rng, N);
                let p: [f64; N] = core::array::from_fn(|i| r[i] * (i + 1) as f64);
                let locs = interpolator.grid().locate(&p, Extrapolation::Error).unwrap();
                let mut total = 0.0;
                let mut count = 0;
                interpolator.for_each_weight(&locs, |k, w| {
                    assert!(k < z.len());
                    assert!(w >= 0.0);
                    total += w;
                    count += 1;
                });
                assert_eq!(count, 1 << N);
                assert!((total - 1.0).abs() < 1e-12);
            }
        }

        check::<1>(5);
        check::<2>(4);
        check::<3>(3);
        check::<6>(2);
    }

    /// Interpolate on a hat-shaped function to make sure that the grid cell indexing is aligned properly
    #[test]
    fn test_interp_hat_func() {
        fn hat_func(x: f64) -> f64 {
            if x <= 1.0 {
                x
            } else {
                2.0 - x
            }
        }

        let x = (0..3).map(|x| x as f64).collect::<Vec<f64>>();
        let y = (0..3).map(|x| hat_func(x as f64)).collect::<Vec<f64>>();
        let obs = linspace(-2.0, 4.0, 100);

        let interpolator = MultilinearRectilinear::new([&x[..]], &y[..]).unwrap();

        (0..obs.len()).for_each(|i| {
            assert_eq!(hat_func(obs[i]), interpolator.interp_one([obs[i]]).unwrap());
        })
    }

    #[test]
    fn test_extrapolation_policies() {
        let x = [0.0, 1.0];
        let y = [0.0, 2.0];
        // z = 1 + x + 2y
        let z = [1.0, 5.0, 2.0, 6.0];
        let interpolator = MultilinearRectilinear::new([x, y], z).unwrap();
        assert_eq!(interpolator.extrapolation(), Extrapolation::Extrapolate);

        // Linear extrapolation from the boundary cell
        assert_eq!(interpolator.interp_one([2.0, 1.0]).unwrap(), 5.0);
        assert_eq!(interpolator.interp_one([-1.0, -1.0]).unwrap(), -2.0);
        assert_eq!(
            interpolator.interp_one([f64::INFINITY, 1.0]),
            Err(InterpError::ExtrapolationOverflow { dim: 0 })
        );

        // Hold the boundary value
        let clamped = interpolator.clone().with_extrapolation(Extrapolation::Clamp);
        assert_eq!(clamped.interp_one([2.0, 1.0]).unwrap(), 4.0);
        assert_eq!(clamped.interp_one([-1.0, -1.0]).unwrap(), 1.0);
        assert_eq!(clamped.interp_one([0.5, 1.0]).unwrap(), 3.5);
        assert_eq!(clamped.interp_one([f64::INFINITY, 1.0]).unwrap(), 4.0);

        // Reject
        let strict = interpolator.with_extrapolation(Extrapolation::Error);
        assert_eq!(
            strict.interp_one([0.5, 2.5]),
            Err(InterpError::OutOfBounds { dim: 1 })
        );
        assert_eq!(strict.interp_one([1.0, 2.0]).unwrap(), 6.0);
        assert_eq!(
            strict.interp_one([f64::NEG_INFINITY, 1.0]),
            Err(InterpError::OutOfBounds { dim: 0 })
        );
    }

    #[test]
    fn test_construction_errors() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0];
        assert_eq!(
            MultilinearRectilinear::new([&x[..], &y[..]], &[0.0; 5][..]).err(),
            Some(InterpError::ValueLengthMismatch {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(
            MultilinearRectilinear::new([&x[..], &x[..1]], &[0.0; 3][..]).err(),
            Some(InterpError::AxisTooShort { dim: 1, len: 1 })
        );

        let mut out = [0.0; 1];
        assert_eq!(
            interpn(&[&x[..], &y[..]], &[0.0; 6], &[&[0.0][..]], &mut out),
            Err(InterpError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        let g: Vec<&[f64]> = vec![&y[..]; 9];
        let obs: Vec<&[f64]> = vec![&[0.0][..]; 9];
        assert_eq!(
            interpn(&g, &vec![0.0; 512], &obs, &mut out),
            Err(InterpError::Unsupported { ndims: 9 })
        );
    }
}
