//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the preparation pipeline and the requested analysis
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ElasticityArgs, FitArgs, PrepareArgs, SampleArgs, VifArgs};
use crate::domain::RegressionSpec;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `loadfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Prepare(args) => handle_prepare(args),
        Command::Fit(args) => handle_fit(args),
        Command::Vif(args) => handle_vif(args),
        Command::Elasticity(args) => handle_elasticity(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_prepare(args: PrepareArgs) -> Result<(), AppError> {
    let config = args.sources.to_prepare_config();
    let table = crate::data::prepare::prepare_combined_data(&config)?;

    println!("{}", crate::report::format_table_summary(&table));

    if let Some(path) = &args.export {
        crate::io::export::write_table_csv(path, &table)?;
        println!("Wrote combined table to '{}'.", path.display());
    }

    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = args.sources.to_prepare_config();
    let spec = resolve_spec(&args)?;
    let run = pipeline::run_fit(&config, &spec, args.zscore)?;

    println!("{}", crate::report::format_fit_summary(&run.output.summary));

    if let Some(path) = &args.export {
        let target = run.table.require_column("combined", &spec.target)?;
        crate::io::export::write_residuals_csv(path, target, &run.output)?;
        println!("Wrote residuals to '{}'.", path.display());
    }
    if let Some(path) = &args.export_json {
        crate::io::export::write_summary_json(path, &run.output.summary)?;
        println!("Wrote fit summary to '{}'.", path.display());
    }

    Ok(())
}

fn handle_vif(args: VifArgs) -> Result<(), AppError> {
    let config = args.sources.to_prepare_config();
    let table = pipeline::load_model_table(&config)?;

    let features = if args.feature.is_empty() {
        pipeline::default_vif_features()
    } else {
        args.feature
    };

    let entries = crate::fit::vif::vif_table(&table, &features)?;
    println!("{}", crate::report::format_vif_table(&entries));

    Ok(())
}

fn handle_elasticity(args: ElasticityArgs) -> Result<(), AppError> {
    let config = args.sources.to_prepare_config();
    let table = crate::data::prepare::prepare_combined_data(&config)?;

    let estimate = crate::fit::elasticity::estimate_elasticity(&table)?;
    println!("{}", crate::report::format_elasticity_summary(&estimate));

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    std::fs::create_dir_all(&args.out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output directory '{}': {e}", args.out_dir.display()),
        )
    })?;

    let config = crate::data::sample::write_sample_sources(&args.out_dir, args.seed)?;

    println!("Wrote synthetic sources (seed {}):", args.seed);
    for path in [
        &config.demand_path,
        &config.price_path,
        &config.weather_path,
        &config.import_export_path,
        &config.generation_path,
    ] {
        println!("  {}", path.display());
    }

    Ok(())
}

/// Resolve `--model` / `--target --feature` into one regression spec.
fn resolve_spec(args: &FitArgs) -> Result<RegressionSpec, AppError> {
    if let Some(preset) = args.model {
        return Ok(RegressionSpec::preset(preset));
    }
    if let Some(target) = &args.target {
        if args.feature.is_empty() {
            return Err(AppError::new(2, "Custom fits need at least one --feature."));
        }
        return Ok(RegressionSpec {
            name: "custom".to_string(),
            target: target.clone(),
            features: args.feature.clone(),
        });
    }
    Err(AppError::new(
        2,
        "Specify a variant: --model <preset>, or --target <col> with --feature <col>...",
    ))
}
