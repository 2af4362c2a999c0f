//! Command-line parsing for the hourly demand/price model fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline/fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ModelPreset, PrepareConfig};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "loadfit",
    version,
    about = "Hourly electricity demand & price model fitter"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the combined hourly table, print a summary, optionally export it.
    Prepare(PrepareArgs),
    /// Fit an OLS regression variant on the combined table.
    Fit(FitArgs),
    /// Print variance inflation factors for a feature set.
    Vif(VifArgs),
    /// Estimate the log-log price elasticity of demand.
    Elasticity(ElasticityArgs),
    /// Write synthetic source files for experimentation and smoke tests.
    Sample(SampleArgs),
}

/// The five source files plus column-name overrides.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Hourly demand source (CSV).
    #[arg(long, value_name = "CSV")]
    pub demand: PathBuf,

    /// Hourly price source in ct/kWh (CSV).
    #[arg(long, value_name = "CSV")]
    pub price: PathBuf,

    /// Weather source: 10 metadata lines, then timestamp+temperature (CSV).
    #[arg(long, value_name = "CSV")]
    pub weather: PathBuf,

    /// Hourly import/export source (CSV).
    #[arg(long = "import-export", value_name = "CSV")]
    pub import_export: PathBuf,

    /// Hourly generation source (CSV).
    #[arg(long, value_name = "CSV")]
    pub generation: PathBuf,

    /// Price column name in the price source.
    #[arg(long, default_value = "AT")]
    pub price_column: String,

    /// Value column name in the demand source.
    #[arg(long, default_value = "Value")]
    pub demand_column: String,

    /// Export column name in the import/export source.
    #[arg(long, default_value = "export")]
    pub export_column: String,

    /// Import column name in the import/export source.
    #[arg(long, default_value = "import")]
    pub import_column: String,

    /// Total-generation column name in the generation source.
    #[arg(long, default_value = "generation_total")]
    pub generation_total_column: String,

    /// Renewable-generation column name in the generation source.
    #[arg(long, default_value = "generation_renewable")]
    pub generation_renewable_column: String,
}

impl SourceArgs {
    pub fn to_prepare_config(&self) -> PrepareConfig {
        PrepareConfig {
            demand_path: self.demand.clone(),
            price_path: self.price.clone(),
            weather_path: self.weather.clone(),
            import_export_path: self.import_export.clone(),
            generation_path: self.generation.clone(),
            price_column: self.price_column.clone(),
            demand_column: self.demand_column.clone(),
            export_column: self.export_column.clone(),
            import_column: self.import_column.clone(),
            generation_total_column: self.generation_total_column.clone(),
            generation_renewable_column: self.generation_renewable_column.clone(),
        }
    }
}

/// Options for `loadfit prepare`.
#[derive(Debug, Parser)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Export the combined table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for `loadfit fit`.
#[derive(Debug, Parser)]
pub struct FitArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Named regression variant to fit.
    #[arg(long, value_enum, conflicts_with_all = ["target", "feature"])]
    pub model: Option<ModelPreset>,

    /// Target column for an ad-hoc variant (requires --feature).
    #[arg(long, requires = "feature")]
    pub target: Option<String>,

    /// Feature column for an ad-hoc variant (repeatable).
    #[arg(long, requires = "target")]
    pub feature: Vec<String>,

    /// Standardize the feature columns (z-score) before fitting.
    #[arg(long)]
    pub zscore: bool,

    /// Export per-hour actual/fitted/residual values to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the fit summary to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for `loadfit vif`.
#[derive(Debug, Parser)]
pub struct VifArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Feature column to include (repeatable; defaults to the full
    /// exogenous feature set of the combined table).
    #[arg(long)]
    pub feature: Vec<String>,
}

/// Options for `loadfit elasticity`.
#[derive(Debug, Parser)]
pub struct ElasticityArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
}

/// Options for `loadfit sample`.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Directory the five synthetic source files are written into.
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Seed for the synthetic data generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
