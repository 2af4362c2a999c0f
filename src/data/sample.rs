//! Deterministic synthetic source generation.
//!
//! Writes the five hourly source files with plausible structure (daily and
//! seasonal cycles plus seeded noise) so the full pipeline can be exercised
//! without the real market exports. The same generator backs the pipeline
//! tests.
//!
//! Same seed, same files: all randomness goes through one seeded `StdRng`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{HOURS_PER_DAY, HOURS_PER_YEAR, PrepareConfig};
use crate::error::AppError;
use crate::io::ingest::WEATHER_METADATA_LINES;

/// Year the synthetic weather timestamps are drawn from.
const SAMPLE_YEAR: i32 = 2023;

/// Write all five synthetic sources into `dir` and return a config pointing
/// at them (conventional column names).
pub fn write_sample_sources(dir: &Path, seed: u64) -> Result<PrepareConfig, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut temperature = Vec::with_capacity(HOURS_PER_YEAR);
    let mut demand = Vec::with_capacity(HOURS_PER_YEAR);
    let mut price_ct = Vec::with_capacity(HOURS_PER_YEAR);
    let mut exports = Vec::with_capacity(HOURS_PER_YEAR);
    let mut imports = Vec::with_capacity(HOURS_PER_YEAR);
    let mut gen_total = Vec::with_capacity(HOURS_PER_YEAR);
    let mut gen_renewable = Vec::with_capacity(HOURS_PER_YEAR);

    for i in 0..HOURS_PER_YEAR {
        let hour = (i % HOURS_PER_DAY) as f64;
        let day = (i / HOURS_PER_DAY) as f64;
        let hour_angle = 2.0 * std::f64::consts::PI * hour / HOURS_PER_DAY as f64;
        let season_angle = 2.0 * std::f64::consts::PI * day / 365.0;

        // Cold in January, warm in July, mild daily swing.
        let temp = 9.0 - 11.0 * season_angle.cos() + 3.5 * (hour_angle - 2.5).sin()
            + noise.sample(&mut rng);
        temperature.push(temp);

        // Load peaks in the evening and in cold hours.
        let load = 6200.0 - 550.0 * hour_angle.cos() - 35.0 * temp
            + 60.0 * noise.sample(&mut rng);
        demand.push(load);

        // Price in ct/kWh, loosely coupled to load; floored to stay usable
        // for log-log elasticity runs.
        let p = (2.0 + load / 900.0 + 1.2 * hour_angle.sin() + 0.6 * noise.sample(&mut rng))
            .max(0.1);
        price_ct.push(p);

        let renewable = (2000.0 + 900.0 * (hour_angle - 1.0).sin().max(0.0)
            + 120.0 * noise.sample(&mut rng))
        .max(0.0);
        let total = load + 400.0 + 150.0 * noise.sample(&mut rng);
        gen_renewable.push(renewable);
        gen_total.push(total);

        let balance = total - load;
        exports.push(balance.max(0.0) + 30.0 * noise.sample(&mut rng).abs());
        imports.push((-balance).max(0.0) + 30.0 * noise.sample(&mut rng).abs());
    }

    let demand_path = dir.join("demand.csv");
    write_single_column(&demand_path, "Value", &demand)?;

    let price_path = dir.join("prices.csv");
    write_single_column(&price_path, "AT", &price_ct)?;

    let weather_path = dir.join("weather.csv");
    write_weather(&weather_path, &temperature)?;

    let import_export_path = dir.join("import_export.csv");
    write_two_columns(&import_export_path, ("export", &exports), ("import", &imports))?;

    let generation_path = dir.join("generation.csv");
    write_two_columns(
        &generation_path,
        ("generation_total", &gen_total),
        ("generation_renewable", &gen_renewable),
    )?;

    Ok(PrepareConfig::with_default_columns(
        demand_path,
        price_path,
        weather_path,
        import_export_path,
        generation_path,
    ))
}

fn create(path: &Path) -> Result<File, AppError> {
    File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create sample file '{}': {e}", path.display())))
}

fn write_io(path: &Path, result: std::io::Result<()>) -> Result<(), AppError> {
    result.map_err(|e| AppError::new(2, format!("Failed to write sample file '{}': {e}", path.display())))
}

fn write_single_column(path: &Path, header: &str, values: &[f64]) -> Result<(), AppError> {
    let mut file = create(path)?;
    write_io(path, writeln!(file, "{header}"))?;
    for v in values {
        write_io(path, writeln!(file, "{v:.3}"))?;
    }
    Ok(())
}

fn write_two_columns(
    path: &Path,
    (header_a, values_a): (&str, &[f64]),
    (header_b, values_b): (&str, &[f64]),
) -> Result<(), AppError> {
    let mut file = create(path)?;
    write_io(path, writeln!(file, "{header_a},{header_b}"))?;
    for (a, b) in values_a.iter().zip(values_b) {
        write_io(path, writeln!(file, "{a:.3},{b:.3}"))?;
    }
    Ok(())
}

fn write_weather(path: &Path, temperature: &[f64]) -> Result<(), AppError> {
    let mut file = create(path)?;
    for i in 0..WEATHER_METADATA_LINES {
        write_io(path, writeln!(file, "# synthetic weather export, metadata line {}", i + 1))?;
    }
    write_io(path, writeln!(file, "timestamp,temperature"))?;

    let start = NaiveDate::from_ymd_opt(SAMPLE_YEAR, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::new(4, "Invalid sample start date."))?;
    for (i, temp) in temperature.iter().enumerate() {
        let ts = start + chrono::Duration::hours(i as i64);
        write_io(path, writeln!(file, "{},{temp:.2}", ts.format("%Y%m%dT%H%M")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prepare::prepare_combined_data;
    use crate::domain::col;

    #[test]
    fn sample_sources_feed_the_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_sample_sources(dir.path(), 42).unwrap();

        let table = prepare_combined_data(&config).unwrap();
        assert_eq!(table.n_rows(), HOURS_PER_YEAR);

        // Prices are floored positive in ct/kWh, so €/MWh stays positive too.
        assert!(table.column(col::PRICE).unwrap().iter().all(|&p| p > 0.0));
        assert!(table.column(col::DEMAND).unwrap().iter().all(|&d| d > 0.0));
    }

    #[test]
    fn same_seed_reproduces_identical_files() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let config_a = write_sample_sources(dir_a.path(), 9).unwrap();
        let config_b = write_sample_sources(dir_b.path(), 9).unwrap();

        let a = std::fs::read_to_string(config_a.price_path).unwrap();
        let b = std::fs::read_to_string(config_b.price_path).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let config_a = write_sample_sources(dir_a.path(), 1).unwrap();
        let config_b = write_sample_sources(dir_b.path(), 2).unwrap();

        let a = std::fs::read_to_string(config_a.price_path).unwrap();
        let b = std::fs::read_to_string(config_b.price_path).unwrap();
        assert_ne!(a, b);
    }
}
