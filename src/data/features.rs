//! Feature engineering over the combined table.
//!
//! Two families:
//!
//! - z-score standardization, with the per-column `(mean, std)` parameters
//!   returned so the transform can be inverted exactly
//! - lagged copies of a column with mean backfill, for autoregressive price
//!   models

use crate::domain::{col, Table};
use crate::error::DataError;
use crate::math::stats::{mean, sample_std};

/// The parameters used to standardize one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnScaler {
    pub column: String,
    pub mean: f64,
    pub std: f64,
}

impl ColumnScaler {
    /// Invert the standard-score transform: `x = z·std + mean`.
    pub fn invert(&self, z: f64) -> f64 {
        z * self.std + self.mean
    }
}

/// Standardize every column not named in `exclude` by its own sample mean
/// and sample standard deviation.
///
/// Returns a new table (the input is untouched) plus one [`ColumnScaler`]
/// per transformed column. A zero-variance column divides by zero and comes
/// out as NaN — callers are expected to exclude such columns.
pub fn zscore_normalize(table: &Table, exclude: &[&str]) -> Result<(Table, Vec<ColumnScaler>), DataError> {
    let mut out = Table::new();
    let mut scalers = Vec::new();

    for (name, values) in table.iter() {
        if exclude.contains(&name) {
            out.push_column(name, values.to_vec())?;
            continue;
        }

        let m = mean(values);
        let s = sample_std(values);
        let standardized: Vec<f64> = values.iter().map(|v| (v - m) / s).collect();
        out.push_column(name, standardized)?;
        scalers.push(ColumnScaler {
            column: name.to_string(),
            mean: m,
            std: s,
        });
    }

    Ok((out, scalers))
}

/// A lagged copy of `values`: entry i holds `values[i - lag]`; the first
/// `lag` entries are backfilled with the column mean.
pub fn lag_with_mean_fill(values: &[f64], lag: usize) -> Vec<f64> {
    let fill = mean(values);
    (0..values.len())
        .map(|i| if i < lag { fill } else { values[i - lag] })
        .collect()
}

/// Append the standard lag block used by the autoregressive price models:
/// `demand_lag1`, `price_lag1`, `price_lag24`, `price_lag168`.
pub fn add_standard_lags(table: &mut Table) -> Result<(), DataError> {
    let demand = table.require_column("combined", col::DEMAND)?.to_vec();
    let price = table.require_column("combined", col::PRICE)?.to_vec();

    table.push_column(col::DEMAND_LAG1, lag_with_mean_fill(&demand, 1))?;
    table.push_column(col::PRICE_LAG1, lag_with_mean_fill(&price, 1))?;
    table.push_column(col::PRICE_LAG24, lag_with_mean_fill(&price, 24))?;
    table.push_column(col::PRICE_LAG168, lag_with_mean_fill(&price, 168))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_table() -> Table {
        let mut t = Table::new();
        t.push_column("a", vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        t.push_column("b", vec![10.0, 10.0, 20.0, 20.0]).unwrap();
        t
    }

    #[test]
    fn zscore_round_trips_within_tolerance() {
        let table = toy_table();
        let (normalized, scalers) = zscore_normalize(&table, &[]).unwrap();

        for scaler in &scalers {
            let original = table.column(&scaler.column).unwrap();
            let z = normalized.column(&scaler.column).unwrap();
            for (x, &zi) in original.iter().zip(z) {
                assert!((scaler.invert(zi) - x).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn zscore_output_has_zero_mean_unit_std() {
        let table = toy_table();
        let (normalized, _) = zscore_normalize(&table, &[]).unwrap();

        for name in ["a", "b"] {
            let z = normalized.column(name).unwrap();
            assert!(mean(z).abs() < 1e-12);
            assert!((sample_std(z) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn excluded_columns_pass_through_unchanged() {
        let table = toy_table();
        let (normalized, scalers) = zscore_normalize(&table, &["b"]).unwrap();

        assert_eq!(normalized.column("b").unwrap(), table.column("b").unwrap());
        assert_eq!(scalers.len(), 1);
        assert_eq!(scalers[0].column, "a");
    }

    #[test]
    fn zero_variance_column_goes_nan() {
        let mut t = Table::new();
        t.push_column("flat", vec![5.0, 5.0, 5.0]).unwrap();
        let (normalized, _) = zscore_normalize(&t, &[]).unwrap();
        assert!(normalized.column("flat").unwrap().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn lag_shifts_and_backfills_with_mean() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let lagged = lag_with_mean_fill(&values, 2);
        assert_eq!(lagged, vec![2.5, 2.5, 1.0, 2.0]);
    }

    #[test]
    fn standard_lags_are_appended() {
        let n = 200;
        let mut t = Table::new();
        t.push_column(col::PRICE, (0..n).map(|i| i as f64).collect())
            .unwrap();
        t.push_column(col::DEMAND, (0..n).map(|i| (i * 2) as f64).collect())
            .unwrap();

        add_standard_lags(&mut t).unwrap();
        let lag24 = t.column(col::PRICE_LAG24).unwrap();
        assert_eq!(lag24[24], 0.0);
        assert_eq!(lag24[30], 6.0);
        let lag168 = t.column(col::PRICE_LAG168).unwrap();
        assert_eq!(lag168[168], 0.0);
        assert_eq!(lag168[199], 31.0);
        let dlag1 = t.column(col::DEMAND_LAG1).unwrap();
        assert_eq!(dlag1[1], 0.0);
        assert_eq!(dlag1[199], 396.0);
    }
}
