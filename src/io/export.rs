//! Export the combined table and fit results.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts. Output locations are always explicit caller-provided paths.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Table;
use crate::error::AppError;
use crate::fit::model::{FitOutput, FitSummary};

/// Write the combined table to CSV, columns in table order.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create table CSV '{}': {e}", path.display())))?;

    let header = table.column_names().join(",");
    writeln!(file, "{header}")
        .map_err(|e| AppError::new(2, format!("Failed to write table CSV header: {e}")))?;

    for i in 0..table.n_rows() {
        let row = table
            .row(i)
            .iter()
            .map(|v| format!("{v:.6}"))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(file, "{row}")
            .map_err(|e| AppError::new(2, format!("Failed to write table CSV row: {e}")))?;
    }

    Ok(())
}

/// Write per-hour fit results (actual, fitted, residual) to CSV.
pub fn write_residuals_csv(path: &Path, target: &[f64], fit: &FitOutput) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create residuals CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "hour,actual,fitted,residual")
        .map_err(|e| AppError::new(2, format!("Failed to write residuals CSV header: {e}")))?;

    for (i, ((actual, fitted), residual)) in target
        .iter()
        .zip(&fit.fitted)
        .zip(&fit.residuals)
        .enumerate()
    {
        writeln!(file, "{i},{actual:.6},{fitted:.6},{residual:.6}")
            .map_err(|e| AppError::new(2, format!("Failed to write residuals CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the fit summary (coefficients + diagnostics) as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &FitSummary) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegressionSpec;
    use crate::fit::model::fit_ols;

    fn small_table() -> Table {
        let mut t = Table::new();
        t.push_column("y", (0..20).map(|i| 1.0 + 2.0 * i as f64).collect())
            .unwrap();
        t.push_column("x", (0..20).map(|i| i as f64).collect()).unwrap();
        t
    }

    #[test]
    fn table_csv_round_trips_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        let table = small_table();

        write_table_csv(&path, &table).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "y,x");
        assert_eq!(lines.next().unwrap(), "1.000000,0.000000");
        assert_eq!(content.lines().count(), 21);
    }

    #[test]
    fn residuals_csv_has_one_row_per_hour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("residuals.csv");
        let table = small_table();
        let out = fit_ols(&table, &RegressionSpec::new("t", "y", &["x"])).unwrap();

        write_residuals_csv(&path, table.column("y").unwrap(), &out).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 21);
        assert!(content.starts_with("hour,actual,fitted,residual\n"));
    }

    #[test]
    fn summary_json_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fit.json");
        let table = small_table();
        let out = fit_ols(&table, &RegressionSpec::new("t", "y", &["x"])).unwrap();

        write_summary_json(&path, &out.summary).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["target"], "y");
        assert_eq!(parsed["coefficients"].as_array().unwrap().len(), 2);
    }
}
