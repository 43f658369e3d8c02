//! Flat, row-major storage of the function values at every grid node.
use core::marker::PhantomData;

use num_traits::Float;

use crate::InterpError;

/// Values at each grid node, C-ordered (the last index varies fastest):
/// `z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...`.
///
/// The storage `V` is anything viewable as a slice. An owned `Vec<T>` copies the
/// data in, an `Arc<[T]>` shares it between any number of interpolators and
/// threads, and a `&[T]` borrows it for the lifetime of the interpolator.
/// The lattice never mutates its storage.
#[derive(Clone, Debug)]
pub struct ValueLattice<T, V, const N: usize> {
    /// Values at each node, size prod(dims)
    vals: V,

    /// Size of each dimension
    dims: [usize; N],

    /// Stride of each dimension in the flat storage
    strides: [usize; N],

    _marker: PhantomData<T>,
}

impl<T: Float, V: AsRef<[T]>, const N: usize> ValueLattice<T, V, N> {
    /// Wrap flat values for a grid with the given number of nodes per axis.
    ///
    /// # Errors
    /// * If `vals` does not have exactly `prod(dims)` entries
    pub fn new(vals: V, dims: [usize; N]) -> Result<Self, InterpError> {
        let actual = vals.as_ref().len();
        let expected = dims
            .iter()
            .try_fold(1_usize, |acc, &n| acc.checked_mul(n))
            .ok_or(InterpError::ValueLengthMismatch {
                expected: usize::MAX,
                actual,
            })?;
        if actual != expected {
            return Err(InterpError::ValueLengthMismatch { expected, actual });
        }

        // Each entry is the cumulative product of the size of dimensions
        // higher than this one, which is the stride between blocks
        // relating to a given index along each dimension.
        let mut strides = [1_usize; N];
        let mut acc = 1;
        for i in (0..N).rev() {
            strides[i] = acc;
            acc *= dims[i];
        }

        Ok(Self {
            vals,
            dims,
            strides,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn dims(&self) -> &[usize; N] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[usize; N] {
        &self.strides
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.vals.as_ref()
    }

    /// The underlying storage handle.
    #[inline]
    pub fn storage(&self) -> &V {
        &self.vals
    }

    pub fn into_storage(self) -> V {
        self.vals
    }

    /// Flat offset of a node. Does not check that `loc` is on the grid.
    #[inline]
    pub fn flat_index(&self, loc: &[usize; N]) -> usize {
        let mut i = 0;
        for j in 0..N {
            i += loc[j] * self.strides[j];
        }
        i
    }

    /// Value at a node, or `None` if any index is off the grid.
    #[inline]
    pub fn get(&self, loc: &[usize; N]) -> Option<T> {
        if (0..N).any(|j| loc[j] >= self.dims[j]) {
            return None;
        }
        Some(self.as_slice()[self.flat_index(loc)])
    }
}
