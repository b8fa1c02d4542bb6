//! Ordinary least squares solver.
//!
//! The model is linear in its 13 coefficients, so the whole fit is one
//! least-squares problem:
//!
//! ```text
//! minimize Σ (price_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD rather than normal equations or QR: the design matrix is tall
//!   (one row per observation, 13 columns) and can be rank-deficient when
//!   the history never visits some calendar month, leaving that indicator
//!   column all zero. SVD handles both cases without panicking.
//!   (Nalgebra's `QR::solve` is intended for square systems.)
//! - The parameter dimension is tiny, so SVD cost is irrelevant.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser singular-value tolerances: a strict solve
    // first, then relax for near-singular month columns.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
