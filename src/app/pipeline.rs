//! Shared prepare→fit workflow used by the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core sequence:
//! load sources -> combined table -> lag features -> (optional z-score) -> fit
//!
//! The subcommands then focus on presentation and exports.

use crate::data::features::{add_standard_lags, zscore_normalize};
use crate::data::prepare::prepare_combined_data;
use crate::domain::{col, PrepareConfig, RegressionSpec, Table};
use crate::error::AppError;
use crate::fit::model::{fit_ols, FitOutput};

/// All computed outputs of a single fit run.
#[derive(Debug, Clone)]
pub struct FitRun {
    /// The table the fit actually ran on (lags appended; features possibly
    /// standardized).
    pub table: Table,
    pub output: FitOutput,
}

/// Combined table plus the standard lag block every price model can draw on.
pub fn load_model_table(config: &PrepareConfig) -> Result<Table, AppError> {
    let mut table = prepare_combined_data(config)?;
    add_standard_lags(&mut table)?;
    Ok(table)
}

/// Execute the full pipeline for one regression variant.
///
/// With `zscore` set, the feature columns (and only those) are standardized
/// before fitting; the target stays in its original units.
pub fn run_fit(config: &PrepareConfig, spec: &RegressionSpec, zscore: bool) -> Result<FitRun, AppError> {
    let table = load_model_table(config)?;

    let table = if zscore {
        let exclude: Vec<&str> = table
            .column_names()
            .into_iter()
            .filter(|name| !spec.features.iter().any(|f| f.as_str() == *name))
            .collect();
        let (normalized, _) = zscore_normalize(&table, &exclude)?;
        normalized
    } else {
        table
    };

    let output = fit_ols(&table, spec)?;
    Ok(FitRun { table, output })
}

/// The exogenous regressors of the combined table — the default VIF set.
pub fn default_vif_features() -> Vec<String> {
    [
        col::TEMPERATURE,
        col::EXPORT,
        col::IMPORT,
        col::GENERATION_TOTAL,
        col::GENERATION_RENEWABLE,
        col::HOUR_SIN,
        col::HOUR_COS,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
