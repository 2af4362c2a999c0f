//! Least-squares solver.
//!
//! Every model in this crate reduces to one ordinary least squares problem
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! over a tall design matrix (8,760 hourly rows, a handful of regressor
//! columns).
//!
//! Implementation choices:
//! - SVD rather than QR: nalgebra's `QR::solve` targets square systems and
//!   will panic on tall matrices.
//! - Hourly regressors can come close to collinear (an intercept next to
//!   `hour_sin`/`hour_cos`, or a price column next to its own 1-hour lag),
//!   so we try progressively looser singular-value tolerances before giving
//!   up.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_handles_tall_noisy_system() {
        // y = 1 + 0.5 x1 - 2 x2 over 50 rows, no noise: exact recovery.
        let n = 50;
        let x = DMatrix::from_fn(n, 3, |i, j| match j {
            0 => 1.0,
            1 => i as f64 * 0.1,
            _ => ((i as f64) * 0.3).sin(),
        });
        let y = DVector::from_fn(n, |i, _| {
            1.0 + 0.5 * (i as f64 * 0.1) - 2.0 * ((i as f64) * 0.3).sin()
        });

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 1.0).abs() < 1e-8);
        assert!((beta[1] - 0.5).abs() < 1e-8);
        assert!((beta[2] + 2.0).abs() < 1e-8);
    }
}
