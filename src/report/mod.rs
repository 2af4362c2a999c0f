//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - pipeline/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::Table;
use crate::fit::elasticity::ElasticityEstimate;
use crate::fit::model::FitSummary;
use crate::fit::vif::VifEntry;
use crate::math::stats::{mean, sample_std};

/// Summarize the combined table: shape plus per-column mean/std/min/max.
pub fn format_table_summary(table: &Table) -> String {
    let mut out = String::new();

    out.push_str("=== loadfit - combined hourly table ===\n");
    out.push_str(&format!(
        "Shape: {} rows x {} columns\n\n",
        table.n_rows(),
        table.n_columns()
    ));

    out.push_str(&format!(
        "{:<22} {:>12} {:>12} {:>12} {:>12}\n",
        "column", "mean", "std", "min", "max"
    ));
    out.push_str(&format!(
        "{:-<22} {:-<12} {:-<12} {:-<12} {:-<12}\n",
        "", "", "", "", ""
    ));

    for (name, values) in table.iter() {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        out.push_str(&format!(
            "{:<22} {:>12.3} {:>12.3} {:>12.3} {:>12.3}\n",
            name,
            mean(values),
            sample_std(values),
            min,
            max
        ));
    }

    out
}

/// Format the fit summary: header, coefficient table, diagnostics.
pub fn format_fit_summary(summary: &FitSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== OLS fit: {} ===\n", summary.name));
    out.push_str(&format!("Target: {} | n={} | k={}\n\n", summary.target, summary.n, summary.k));

    out.push_str(&format!(
        "{:<22} {:>12} {:>12} {:>10}\n",
        "coefficient", "estimate", "std error", "t"
    ));
    out.push_str(&format!("{:-<22} {:-<12} {:-<12} {:-<10}\n", "", "", "", ""));
    for c in &summary.coefficients {
        let marker = if c.is_significant() { " *" } else { "" };
        out.push_str(&format!(
            "{:<22} {:>12.4} {:>12.4} {:>10.3}{marker}\n",
            c.name, c.estimate, c.std_error, c.t_value
        ));
    }
    out.push_str("(* |t| >= 1.96)\n");

    out.push_str(&format!(
        "\nR²={:.4} adj.R²={:.4} RMSE={:.3} BIC={:.1} DW={:.3}\n",
        summary.r_squared, summary.adj_r_squared, summary.rmse, summary.bic, summary.durbin_watson
    ));

    out
}

/// Format the VIF table.
pub fn format_vif_table(entries: &[VifEntry]) -> String {
    let mut out = String::new();

    out.push_str("=== Variance inflation factors ===\n");
    out.push_str(&format!("{:<22} {:>10} {:>10}\n", "feature", "aux R²", "VIF"));
    out.push_str(&format!("{:-<22} {:-<10} {:-<10}\n", "", "", ""));
    for e in entries {
        let vif = if e.vif.is_infinite() {
            "inf".to_string()
        } else {
            format!("{:.2}", e.vif)
        };
        out.push_str(&format!("{:<22} {:>10.4} {:>10}\n", e.feature, e.aux_r_squared, vif));
    }
    out.push_str("(rule of thumb: VIF > 10 signals problematic collinearity)\n");

    out
}

/// Format the elasticity estimate.
pub fn format_elasticity_summary(est: &ElasticityEstimate) -> String {
    let mut out = String::new();

    out.push_str("=== Demand elasticity (log-log) ===\n");
    out.push_str(&format!(
        "ln(demand) ~ {:.4} + {:.4}·ln(price)\n",
        est.log_intercept, est.elasticity
    ));
    out.push_str(&format!(
        "Elasticity: {:.4} | t={:.3} | R²={:.4}\n",
        est.elasticity, est.t_value, est.r_squared
    ));
    out.push_str(&format!(
        "Rows used: {} (dropped {} non-positive)\n",
        est.n_used, est.n_dropped
    ));
    if est.is_significant() {
        out.push_str("-> statistically significant at the 5% level\n");
    } else {
        out.push_str("-> NOT significant at the 5% level\n");
    }

    out
}
