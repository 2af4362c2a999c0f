//! Log-log price elasticity of demand.
//!
//! Fits `ln(demand) ~ ln(price)` over the hours where both are strictly
//! positive (negative market prices do happen; those hours carry no usable
//! log-log information and are dropped, with the drop count reported).
//! The slope is the elasticity estimate.

use serde::Serialize;

use crate::domain::{col, RegressionSpec, Table};
use crate::error::AppError;
use crate::fit::model::{fit_ols, T_CRITICAL_5PCT};

/// Elasticity estimate plus the context needed to judge it.
#[derive(Debug, Clone, Serialize)]
pub struct ElasticityEstimate {
    /// Slope of `ln(demand) ~ ln(price)`.
    pub elasticity: f64,
    /// Intercept `ln(C)` of the log-log fit.
    pub log_intercept: f64,
    pub t_value: f64,
    pub r_squared: f64,
    /// Hours with both series strictly positive (used in the fit).
    pub n_used: usize,
    /// Hours dropped by the positivity filter.
    pub n_dropped: usize,
}

impl ElasticityEstimate {
    /// Significant at the 5% level (normal approximation).
    pub fn is_significant(&self) -> bool {
        self.t_value.abs() >= T_CRITICAL_5PCT
    }
}

/// Estimate the demand elasticity from the combined table's price and
/// demand columns.
pub fn estimate_elasticity(table: &Table) -> Result<ElasticityEstimate, AppError> {
    let price = table.require_column("combined", col::PRICE)?;
    let demand = table.require_column("combined", col::DEMAND)?;

    let mut log_price = Vec::with_capacity(price.len());
    let mut log_demand = Vec::with_capacity(price.len());
    for (&p, &d) in price.iter().zip(demand) {
        if p > 0.0 && d > 0.0 {
            log_price.push(p.ln());
            log_demand.push(d.ln());
        }
    }

    let n_used = log_price.len();
    let n_dropped = price.len() - n_used;
    if n_used == 0 {
        return Err(AppError::new(
            3,
            "No rows with strictly positive price and demand; cannot estimate elasticity.",
        ));
    }

    let mut log_table = Table::new();
    log_table.push_column("log_demand", log_demand)?;
    log_table.push_column("log_price", log_price)?;

    let spec = RegressionSpec::new("elasticity", "log_demand", &["log_price"]);
    let out = fit_ols(&log_table, &spec)?;

    let slope = &out.summary.coefficients[1];
    let intercept = &out.summary.coefficients[0];

    Ok(ElasticityEstimate {
        elasticity: slope.estimate,
        log_intercept: intercept.estimate,
        t_value: slope.t_value,
        r_squared: out.summary.r_squared,
        n_used,
        n_dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_power_law_exponent() {
        // demand = 8000 · price^(-0.25), exactly.
        let n = 400;
        let price: Vec<f64> = (0..n).map(|i| 20.0 + i as f64 * 0.5).collect();
        let demand: Vec<f64> = price.iter().map(|p| 8000.0 * p.powf(-0.25)).collect();

        let mut t = Table::new();
        t.push_column(col::PRICE, price).unwrap();
        t.push_column(col::DEMAND, demand).unwrap();

        let est = estimate_elasticity(&t).unwrap();
        assert!((est.elasticity + 0.25).abs() < 1e-8, "got {}", est.elasticity);
        assert!((est.log_intercept - 8000.0_f64.ln()).abs() < 1e-8);
        assert!(est.r_squared > 0.999999);
        assert_eq!(est.n_used, n);
        assert_eq!(est.n_dropped, 0);
    }

    #[test]
    fn nonpositive_rows_are_dropped() {
        let price = vec![-5.0, 0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];
        let demand: Vec<f64> = price
            .iter()
            .map(|p| if *p > 0.0 { 5000.0 * p.powf(-0.1) } else { 5000.0 })
            .collect();

        let mut t = Table::new();
        t.push_column(col::PRICE, price).unwrap();
        t.push_column(col::DEMAND, demand).unwrap();

        let est = estimate_elasticity(&t).unwrap();
        assert_eq!(est.n_used, 8);
        assert_eq!(est.n_dropped, 2);
        assert!((est.elasticity + 0.1).abs() < 1e-8);
    }

    #[test]
    fn all_nonpositive_prices_fail() {
        let mut t = Table::new();
        t.push_column(col::PRICE, vec![-1.0; 10]).unwrap();
        t.push_column(col::DEMAND, vec![100.0; 10]).unwrap();

        let err = estimate_elasticity(&t).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
