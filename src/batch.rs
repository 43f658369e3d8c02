//! Batch evaluation shared by every interpolation method.
//!
//! Each observation point is evaluated independently and nothing is mutated during
//! evaluation, so batches can be split across threads freely. With the `rayon`
//! feature, [`ParInterpolate`] does exactly that.
use num_traits::Float;

use crate::InterpError;

/// An N-dimensional interpolator / extrapolator.
///
/// Implementors provide [`interp_one`](Interpolate::interp_one); the batch
/// methods are built on top of it.
pub trait Interpolate<T: Float, const N: usize> {
    /// Evaluate the interpolant at one observation point.
    ///
    /// # Errors
    ///   * If any coordinate is NaN
    ///   * If the point is outside the grid and the extrapolation policy rejects it
    fn interp_one(&self, x: [T; N]) -> Result<T, InterpError>;

    /// Evaluate at a point given as a slice, checking its dimensionality.
    ///
    /// # Errors
    ///   * If `x.len() != N`
    ///   * Any error from [`interp_one`](Interpolate::interp_one)
    #[inline]
    fn interp_one_dyn(&self, x: &[T]) -> Result<T, InterpError> {
        let x: [T; N] = x.try_into().map_err(|_| InterpError::DimensionMismatch {
            expected: N,
            actual: x.len(),
        })?;
        self.interp_one(x)
    }

    /// Interpolate on a contiguous list of observation points given as one slice
    /// of coordinates per dimension, like `[&xobs, &yobs, ...]`.
    ///
    /// Lengths are checked before anything is written to `out`.
    ///
    /// # Errors
    ///   * If the length of any coordinate slice does not match `out`
    ///   * Any error from evaluating a point; the batch stops at the first one
    fn interp(&self, x: &[&[T]; N], out: &mut [T]) -> Result<(), InterpError> {
        let n = out.len();

        // Make sure the size of inputs and output match
        if let Some(xx) = x.iter().find(|xx| xx.len() != n) {
            return Err(InterpError::LengthMismatch {
                expected: n,
                actual: xx.len(),
            });
        }
        log::trace!("interpolating {n} points in {N} dims");

        let mut tmp = [T::zero(); N];
        for i in 0..n {
            (0..N).for_each(|j| tmp[j] = x[j][i]);
            out[i] = self.interp_one(tmp)?;
        }

        Ok(())
    }

    /// Interpolate on a list of observation points stored point-by-point.
    ///
    /// # Errors
    ///   * If `x` and `out` differ in length
    ///   * Any error from evaluating a point; the batch stops at the first one
    fn interp_points(&self, x: &[[T; N]], out: &mut [T]) -> Result<(), InterpError> {
        if x.len() != out.len() {
            return Err(InterpError::LengthMismatch {
                expected: out.len(),
                actual: x.len(),
            });
        }
        log::trace!("interpolating {} points in {N} dims", x.len());

        for (xi, yi) in x.iter().zip(out.iter_mut()) {
            *yi = self.interp_one(*xi)?;
        }

        Ok(())
    }

    /// Evaluate, allocating a new Vec for the output.
    ///
    /// # Errors
    ///   * If the coordinate slices differ in length
    ///   * Any error from evaluating a point
    #[cfg(feature = "std")]
    fn interp_alloc(&self, x: &[&[T]; N]) -> Result<Vec<T>, InterpError> {
        let mut out = vec![T::zero(); x[0].len()];
        self.interp(x, &mut out)?;
        Ok(out)
    }

    /// Evaluate each point independently, reporting errors per point.
    ///
    /// The output always has one entry per input point, in input order. A point
    /// with the wrong number of coordinates or an invalid coordinate produces an
    /// `Err` in its own slot and does not affect the others.
    #[cfg(feature = "std")]
    fn eval_batch(&self, points: &[&[T]]) -> Vec<Result<T, InterpError>> {
        log::trace!("evaluating batch of {} points in {N} dims", points.len());
        points.iter().map(|p| self.interp_one_dyn(p)).collect()
    }
}

/// Data-parallel batch evaluation on the rayon thread pool.
///
/// Blanket-implemented for every [`Interpolate`] that can be shared between threads.
/// Results are identical to the sequential methods, in the same order.
#[cfg(feature = "rayon")]
pub trait ParInterpolate<T: Float + Send + Sync, const N: usize>: Interpolate<T, N> + Sync {
    /// Parallel version of [`Interpolate::interp_points`].
    ///
    /// Unlike the sequential version, every point is evaluated even if some fail;
    /// the first error in input order is returned.
    ///
    /// # Errors
    ///   * If `x` and `out` differ in length
    ///   * The first error in input order from evaluating a point
    fn par_interp_points(&self, x: &[[T; N]], out: &mut [T]) -> Result<(), InterpError> {
        use rayon::prelude::*;

        if x.len() != out.len() {
            return Err(InterpError::LengthMismatch {
                expected: out.len(),
                actual: x.len(),
            });
        }
        log::trace!("interpolating {} points in {N} dims on rayon pool", x.len());

        x.par_iter()
            .zip(out.par_iter_mut())
            .map(|(xi, yi)| {
                *yi = self.interp_one(*xi)?;
                Ok(())
            })
            .collect::<Vec<Result<(), InterpError>>>()
            .into_iter()
            .collect()
    }

    /// Parallel version of [`Interpolate::eval_batch`].
    fn par_eval_batch(&self, points: &[&[T]]) -> Vec<Result<T, InterpError>> {
        use rayon::prelude::*;

        log::trace!("evaluating batch of {} points in {N} dims on rayon pool", points.len());
        points.par_iter().map(|p| self.interp_one_dyn(p)).collect()
    }
}

#[cfg(feature = "rayon")]
impl<T, I, const N: usize> ParInterpolate<T, N> for I
where
    T: Float + Send + Sync,
    I: Interpolate<T, N> + Sync,
{
}
