//! Convenience methods for constructing grids and sampling values on them in a way
//! that echoes, but does not exactly match, methods common in scripting languages.
use itertools::Itertools;
use num_traits::Float;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
///
/// `n == 0` gives an empty Vec and `n == 1` gives `[start]`.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    if n < 2 {
        return (0..n).map(|_| start).collect();
    }
    let dx: T = (stop - start) / T::from(n - 1).unwrap();
    (0..n).map(|i| start + T::from(i).unwrap() * dx).collect()
}

/// Generates a meshgrid in C ordering (x0, y0, z0, x0, y0, z1, ..., x0, yn, zn)
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.iter().map(|y| **y).collect())
        .collect()
}

/// Evaluates `f` at every node of the grid with the given axes,
/// producing values in the C ordering expected by the interpolators.
pub fn sample<T, F>(axes: &[&Vec<T>], f: F) -> Vec<T>
where
    T: Float,
    F: Fn(&[T]) -> T,
{
    meshgrid(axes.to_vec()).iter().map(|p| f(p)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sample_ordering() {
        let x = vec![0.0, 1.0];
        let y = vec![0.0, 10.0, 20.0];
        // Last axis varies fastest
        assert_eq!(
            sample(&[&x, &y], |p| p[0] + p[1]),
            vec![0.0, 10.0, 20.0, 1.0, 11.0, 21.0]
        );
        assert_eq!(linspace(-1.0, 1.0, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_linspace_short() {
        assert_eq!(linspace(2.0, 3.0, 0), Vec::<f64>::new());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert_eq!(linspace(2.0, 3.0, 2), vec![2.0, 3.0]);
    }
}
