//! Shared domain types.
//!
//! These types are intentionally lightweight and serializable so they can be:
//!
//! - passed from CLI parsing into the pipeline
//! - exported to JSON alongside fit results

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One non-leap year of hours. Every input source must have exactly this
/// many rows; the combined table always has exactly this many rows.
pub const HOURS_PER_YEAR: usize = 8760;

/// Hours per daily cycle, used for the cyclical time-of-day encoding.
pub const HOURS_PER_DAY: usize = 24;

/// Column names of the combined table (and the derived lag columns).
///
/// Kept in one place so regression presets, exports, and tests never drift
/// from the pipeline's output schema.
pub mod col {
    pub const PRICE: &str = "price";
    pub const DEMAND: &str = "demand";
    pub const HOUR_OF_DAY: &str = "hour_of_day";
    pub const TEMPERATURE: &str = "temperature";
    pub const EXPORT: &str = "export";
    pub const IMPORT: &str = "import";
    pub const GENERATION_TOTAL: &str = "generation_total";
    pub const GENERATION_RENEWABLE: &str = "generation_renewable";
    pub const HOUR_SIN: &str = "hour_sin";
    pub const HOUR_COS: &str = "hour_cos";

    pub const DEMAND_LAG1: &str = "demand_lag1";
    pub const PRICE_LAG1: &str = "price_lag1";
    pub const PRICE_LAG24: &str = "price_lag24";
    pub const PRICE_LAG168: &str = "price_lag168";
}

/// Where the five input sources live and which named columns to read.
///
/// Every path and column name is an explicit parameter; the pipeline never
/// consults the working directory or any process-wide state.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    pub demand_path: PathBuf,
    pub price_path: PathBuf,
    pub weather_path: PathBuf,
    pub import_export_path: PathBuf,
    pub generation_path: PathBuf,

    /// Price column in the price source, quoted in ct/kWh.
    pub price_column: String,
    /// Value column in the demand source.
    pub demand_column: String,
    /// Export / import columns in the import-export source.
    pub export_column: String,
    pub import_column: String,
    /// Total / renewable columns in the generation source.
    pub generation_total_column: String,
    pub generation_renewable_column: String,
}

impl PrepareConfig {
    /// Config with the conventional column names for the given paths.
    pub fn with_default_columns(
        demand_path: PathBuf,
        price_path: PathBuf,
        weather_path: PathBuf,
        import_export_path: PathBuf,
        generation_path: PathBuf,
    ) -> Self {
        Self {
            demand_path,
            price_path,
            weather_path,
            import_export_path,
            generation_path,
            price_column: "AT".to_string(),
            demand_column: "Value".to_string(),
            export_column: "export".to_string(),
            import_column: "import".to_string(),
            generation_total_column: "generation_total".to_string(),
            generation_renewable_column: "generation_renewable".to_string(),
        }
    }
}

/// Named regression variants over the combined table.
///
/// Each preset is a `{target, features}` configuration; the pipeline and
/// fitting code are identical across presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelPreset {
    /// demand ~ price + hour_cos + temperature
    DemandCore,
    /// demand ~ hour_cos + import
    DemandImport,
    /// price ~ price_lag1 + price_lag24 + price_lag168
    PriceLags,
    /// price ~ demand_lag1 + temperature + import
    PriceFundamentals,
    /// price ~ demand + temperature + price_lag1
    PriceMixed,
}

/// A single regression to run: target column, feature columns, a label.
///
/// An intercept column is always prepended by the design-matrix builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionSpec {
    pub name: String,
    pub target: String,
    pub features: Vec<String>,
}

impl RegressionSpec {
    pub fn new(name: impl Into<String>, target: impl Into<String>, features: &[&str]) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            features: features.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Resolve a preset to its `{target, features}` configuration.
    pub fn preset(preset: ModelPreset) -> Self {
        match preset {
            ModelPreset::DemandCore => Self::new(
                "demand-core",
                col::DEMAND,
                &[col::PRICE, col::HOUR_COS, col::TEMPERATURE],
            ),
            ModelPreset::DemandImport => {
                Self::new("demand-import", col::DEMAND, &[col::HOUR_COS, col::IMPORT])
            }
            ModelPreset::PriceLags => Self::new(
                "price-lags",
                col::PRICE,
                &[col::PRICE_LAG1, col::PRICE_LAG24, col::PRICE_LAG168],
            ),
            ModelPreset::PriceFundamentals => Self::new(
                "price-fundamentals",
                col::PRICE,
                &[col::DEMAND_LAG1, col::TEMPERATURE, col::IMPORT],
            ),
            ModelPreset::PriceMixed => Self::new(
                "price-mixed",
                col::PRICE,
                &[col::DEMAND, col::TEMPERATURE, col::PRICE_LAG1],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_reference_known_columns() {
        let known = [
            col::PRICE,
            col::DEMAND,
            col::HOUR_OF_DAY,
            col::TEMPERATURE,
            col::EXPORT,
            col::IMPORT,
            col::GENERATION_TOTAL,
            col::GENERATION_RENEWABLE,
            col::HOUR_SIN,
            col::HOUR_COS,
            col::DEMAND_LAG1,
            col::PRICE_LAG1,
            col::PRICE_LAG24,
            col::PRICE_LAG168,
        ];
        for preset in [
            ModelPreset::DemandCore,
            ModelPreset::DemandImport,
            ModelPreset::PriceLags,
            ModelPreset::PriceFundamentals,
            ModelPreset::PriceMixed,
        ] {
            let spec = RegressionSpec::preset(preset);
            assert!(known.contains(&spec.target.as_str()));
            for f in &spec.features {
                assert!(known.contains(&f.as_str()), "unknown feature {f}");
                assert_ne!(f, &spec.target);
            }
        }
    }
}
