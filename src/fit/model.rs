//! OLS fitting of one regression variant over the combined table.
//!
//! A variant is just `{target, features}` (see `RegressionSpec`); the design
//! matrix always gets a leading intercept column. Diagnostics cover what the
//! analysis workflow actually reads off a fit:
//!
//! - per-coefficient estimate, standard error, t-statistic
//! - R², adjusted R², SSE, RMSE
//! - BIC = n·ln(SSE/n) + k·ln(n)
//! - Durbin–Watson statistic of the residuals (serial-correlation check)

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::domain::{RegressionSpec, Table};
use crate::error::AppError;
use crate::math::solve_least_squares;

/// Minimum number of extra observations beyond parameter count.
const MIN_N_BUFFER: usize = 5;

/// Two-sided critical value at the 5% level (normal approximation; with
/// thousands of hourly observations the t and normal quantiles coincide).
pub const T_CRITICAL_5PCT: f64 = 1.96;

/// One fitted coefficient.
#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
}

impl Coefficient {
    /// Significant at the 5% level (normal approximation).
    pub fn is_significant(&self) -> bool {
        self.t_value.abs() >= T_CRITICAL_5PCT
    }
}

/// Fit diagnostics for one regression variant.
#[derive(Debug, Clone, Serialize)]
pub struct FitSummary {
    pub name: String,
    pub target: String,
    pub n: usize,
    /// Parameter count including the intercept.
    pub k: usize,
    pub coefficients: Vec<Coefficient>,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub sse: f64,
    pub rmse: f64,
    pub bic: f64,
    pub durbin_watson: f64,
}

/// Full fit output: diagnostics plus per-row fitted values and residuals.
#[derive(Debug, Clone)]
pub struct FitOutput {
    pub summary: FitSummary,
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
}

/// Fit `spec` on `table` by ordinary least squares.
pub fn fit_ols(table: &Table, spec: &RegressionSpec) -> Result<FitOutput, AppError> {
    let (x, y, names) = build_design(table, spec)?;
    let n = x.nrows();
    let k = x.ncols();

    if n < k + MIN_N_BUFFER {
        return Err(AppError::new(
            3,
            format!("Underdetermined fit `{}`: n={n} < k+{MIN_N_BUFFER}={}", spec.name, k + MIN_N_BUFFER),
        ));
    }

    let beta = solve_least_squares(&x, &y).ok_or_else(|| {
        AppError::new(
            4,
            format!(
                "Ill-conditioned design matrix for `{}`; check the feature set for collinearity (VIF).",
                spec.name
            ),
        )
    })?;

    let fitted = &x * &beta;
    let residuals = &y - &fitted;
    let sse: f64 = residuals.iter().map(|e| e * e).sum();

    let y_mean = y.iter().sum::<f64>() / n as f64;
    let sst: f64 = y.iter().map(|v| (v - y_mean) * (v - y_mean)).sum();
    if sst <= 0.0 {
        return Err(AppError::new(
            4,
            format!("Target `{}` has zero variance; nothing to fit.", spec.target),
        ));
    }

    let r_squared = 1.0 - sse / sst;
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / (n - k) as f64;
    let rmse = (sse / n as f64).sqrt();
    let bic = n as f64 * (sse / n as f64).ln() + k as f64 * (n as f64).ln();

    // Coefficient covariance: σ̂² (XᵀX)⁻¹.
    let sigma2 = sse / (n - k) as f64;
    let xtx = x.transpose() * &x;
    let xtx_inv = xtx.try_inverse().ok_or_else(|| {
        AppError::new(
            4,
            format!("Singular XᵀX for `{}`; standard errors are undefined.", spec.name),
        )
    })?;

    let coefficients = names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let estimate = beta[j];
            let std_error = (sigma2 * xtx_inv[(j, j)]).max(0.0).sqrt();
            let t_value = if std_error > 0.0 {
                estimate / std_error
            } else {
                f64::INFINITY * estimate.signum()
            };
            Coefficient {
                name: name.clone(),
                estimate,
                std_error,
                t_value,
            }
        })
        .collect();

    let durbin_watson = durbin_watson(residuals.as_slice());

    Ok(FitOutput {
        summary: FitSummary {
            name: spec.name.clone(),
            target: spec.target.clone(),
            n,
            k,
            coefficients,
            r_squared,
            adj_r_squared,
            sse,
            rmse,
            bic,
            durbin_watson,
        },
        fitted: fitted.iter().copied().collect(),
        residuals: residuals.iter().copied().collect(),
    })
}

/// Assemble the design matrix (leading intercept column) and target vector.
pub fn build_design(
    table: &Table,
    spec: &RegressionSpec,
) -> Result<(DMatrix<f64>, DVector<f64>, Vec<String>), AppError> {
    let n = table.n_rows();
    let target = table.require_column("combined", &spec.target)?;
    ensure_finite(&spec.target, target)?;

    let mut names = Vec::with_capacity(spec.features.len() + 1);
    names.push("const".to_string());

    let mut x = DMatrix::from_element(n, spec.features.len() + 1, 1.0);
    for (j, feature) in spec.features.iter().enumerate() {
        let values = table.require_column("combined", feature)?;
        ensure_finite(feature, values)?;
        for (i, &v) in values.iter().enumerate() {
            x[(i, j + 1)] = v;
        }
        names.push(feature.clone());
    }

    let y = DVector::from_column_slice(target);
    Ok((x, y, names))
}

fn ensure_finite(name: &str, values: &[f64]) -> Result<(), AppError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AppError::new(
            4,
            format!("Column `{name}` contains non-finite values; cannot fit."),
        ));
    }
    Ok(())
}

/// Durbin–Watson statistic: Σ(e_t − e_{t−1})² / Σ e_t².
///
/// Values near 2 indicate no first-order serial correlation; hourly demand
/// residuals typically land well below 2.
pub fn durbin_watson(residuals: &[f64]) -> f64 {
    let denom: f64 = residuals.iter().map(|e| e * e).sum();
    if denom == 0.0 {
        return f64::NAN;
    }
    let numer: f64 = residuals
        .windows(2)
        .map(|w| (w[1] - w[0]) * (w[1] - w[0]))
        .sum();
    numer / denom
}
