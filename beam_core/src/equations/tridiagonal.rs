//! # Tridiagonal Solver
//!
//! Thomas algorithm for `A·x = d` where `A` has a sub-diagonal `a`, diagonal
//! `b` and super-diagonal `c`:
//!
//! ```text
//! | b0 c0          |   | x0 |   | d0 |
//! | a1 b1 c1       |   | x1 |   | d1 |
//! |    a2 b2 c2    | · | x2 | = | d2 |
//! |       ...      |   | .. |   | .. |
//! |          an bn |   | xn |   | dn |
//! ```
//!
//! `a[0]` and `c[n-1]` are ignored. O(n) time, no pivoting; the three-moment
//! system is diagonally dominant so this is stable for valid models.

use crate::errors::{BeamError, BeamResult};

/// Pivots smaller than this (relative to the row's magnitude) are treated as zero
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve a tridiagonal system with the Thomas algorithm
///
/// # Errors
///
/// `NumericalDegeneracy` if a forward-elimination pivot vanishes or is not
/// finite.
pub fn solve_tridiagonal(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> BeamResult<Vec<f64>> {
    let n = b.len();
    debug_assert!(a.len() == n && c.len() == n && d.len() == n);
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    for i in 0..n {
        let (sub, prev_c, prev_d) = if i == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (a[i], c_prime[i - 1], d_prime[i - 1])
        };

        let pivot = b[i] - sub * prev_c;
        let scale = b[i].abs().max(sub.abs()).max(c[i].abs());
        if !pivot.is_finite() || pivot.abs() <= PIVOT_TOLERANCE * scale.max(f64::MIN_POSITIVE) {
            return Err(BeamError::numerical_degeneracy(format!("row {}", i), pivot));
        }

        c_prime[i] = if i + 1 < n { c[i] / pivot } else { 0.0 };
        d_prime[i] = (d[i] - sub * prev_d) / pivot;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_equation() {
        let x = solve_tridiagonal(&[0.0], &[4.0], &[0.0], &[8.0]).unwrap();
        assert_eq!(x, vec![2.0]);
    }

    #[test]
    fn test_three_by_three() {
        // | 2 1 0 |       | 4 |
        // | 1 4 1 | · x = | 12|   → x = [1, 2, 3]
        // | 0 1 2 |       | 8 |
        let x = solve_tridiagonal(&[0.0, 1.0, 1.0], &[2.0, 4.0, 2.0], &[1.0, 1.0, 0.0], &[4.0, 12.0, 8.0])
            .unwrap();
        for (got, want) in x.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-12, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_empty_system() {
        assert!(solve_tridiagonal(&[], &[], &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_zero_pivot_is_degenerate() {
        let err = solve_tridiagonal(&[0.0, 1.0], &[1.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]).unwrap_err();
        assert_eq!(err.error_code(), "NUMERICAL_DEGENERACY");
        assert!(matches!(err, BeamError::NumericalDegeneracy { ref equation, .. } if equation == "row 1"));
    }
}
