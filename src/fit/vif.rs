//! Variance inflation factors.
//!
//! For each feature f we regress f on the remaining features (plus
//! intercept) and report `VIF = 1 / (1 − R²_aux)`. Values above ~10 flag
//! multicollinearity trouble for the main regression.
//!
//! The auxiliary regressions only need R², never standard errors, so they
//! go through the SVD solver directly: an exactly collinear feature set
//! must still produce a (degenerate) VIF, not an error. The regressions are
//! independent and run in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::domain::{RegressionSpec, Table};
use crate::error::AppError;
use crate::fit::model::build_design;
use crate::math::solve_least_squares;

/// VIF for one feature.
#[derive(Debug, Clone, Serialize)]
pub struct VifEntry {
    pub feature: String,
    /// R² of the auxiliary regression of this feature on the others.
    pub aux_r_squared: f64,
    /// `1 / (1 − R²_aux)`; `inf` for an exactly collinear feature.
    pub vif: f64,
}

/// Compute VIFs for a feature set (order preserved).
///
/// Needs at least two features; a single regressor has nothing to be
/// collinear with.
pub fn vif_table(table: &Table, features: &[String]) -> Result<Vec<VifEntry>, AppError> {
    if features.len() < 2 {
        return Err(AppError::new(
            2,
            "VIF needs at least two features (collinearity is a property of a feature *set*).",
        ));
    }

    features
        .par_iter()
        .map(|feature| {
            let others: Vec<String> = features.iter().filter(|f| *f != feature).cloned().collect();
            let aux_r_squared = aux_r_squared(table, feature, others)?;
            let vif = if aux_r_squared >= 1.0 - 1e-12 {
                f64::INFINITY
            } else {
                1.0 / (1.0 - aux_r_squared)
            };
            Ok(VifEntry {
                feature: feature.clone(),
                aux_r_squared,
                vif,
            })
        })
        .collect()
}

/// R² of regressing `target` on `features` (plus intercept).
fn aux_r_squared(table: &Table, target: &str, features: Vec<String>) -> Result<f64, AppError> {
    let spec = RegressionSpec {
        name: format!("vif:{target}"),
        target: target.to_string(),
        features,
    };
    let (x, y, _) = build_design(table, &spec)?;

    let beta = solve_least_squares(&x, &y).ok_or_else(|| {
        AppError::new(
            4,
            format!("Ill-conditioned auxiliary regression for `{target}`."),
        )
    })?;

    let residuals = &y - &x * beta;
    let sse: f64 = residuals.iter().map(|e| e * e).sum();
    let n = y.len() as f64;
    let y_mean = y.iter().sum::<f64>() / n;
    let sst: f64 = y.iter().map(|v| (v - y_mean) * (v - y_mean)).sum();
    if sst <= 0.0 {
        return Err(AppError::new(
            4,
            format!("Feature `{target}` has zero variance; VIF is undefined."),
        ));
    }

    // Clamp tiny negative rounding artifacts.
    Ok((1.0 - sse / sst).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn orthogonal_features_have_vif_near_one() {
        let n = 240;
        let mut t = Table::new();
        // sin/cos of the same frequency are orthogonal over whole periods.
        t.push_column(
            "s",
            (0..n)
                .map(|i| (2.0 * std::f64::consts::PI * (i % 24) as f64 / 24.0).sin())
                .collect(),
        )
        .unwrap();
        t.push_column(
            "c",
            (0..n)
                .map(|i| (2.0 * std::f64::consts::PI * (i % 24) as f64 / 24.0).cos())
                .collect(),
        )
        .unwrap();

        let vifs = vif_table(&t, &feature_names(&["s", "c"])).unwrap();
        assert_eq!(vifs.len(), 2);
        for entry in vifs {
            assert!(entry.vif < 1.05, "{}: VIF {}", entry.feature, entry.vif);
        }
    }

    #[test]
    fn duplicated_feature_has_degenerate_vif() {
        let n = 120;
        let base: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin() + i as f64 * 0.01).collect();
        let mut t = Table::new();
        t.push_column("a", base.clone()).unwrap();
        t.push_column("b", base).unwrap();
        t.push_column("c", (0..n).map(|i| (i as f64 * 0.11).cos()).collect())
            .unwrap();

        let vifs = vif_table(&t, &feature_names(&["a", "b", "c"])).unwrap();
        let a = vifs.iter().find(|e| e.feature == "a").unwrap();
        assert!(a.vif.is_infinite(), "VIF {}", a.vif);
        // The uninvolved feature stays unremarkable.
        let c = vifs.iter().find(|e| e.feature == "c").unwrap();
        assert!(c.vif < 10.0, "VIF {}", c.vif);
    }

    #[test]
    fn single_feature_is_rejected() {
        let mut t = Table::new();
        t.push_column("a", vec![1.0; 50]).unwrap();
        let err = vif_table(&t, &feature_names(&["a"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
