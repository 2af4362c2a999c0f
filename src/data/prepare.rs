//! Input-data preparation pipeline.
//!
//! Loads the five hourly sources, validates the year-length invariant,
//! derives the calendar/cyclical features, and assembles one combined table.
//! Every downstream model consumes this table and nothing else.
//!
//! Alignment is purely positional: index i of every source corresponds to
//! hour i of the year. The weather source carries real timestamps, but they
//! are only validated, never joined on. If an upstream file were shifted by
//! a row, the table would silently shift with it; the alignment test below
//! pins that down.

use std::f64::consts::PI;

use crate::domain::{col, HOURS_PER_DAY, HOURS_PER_YEAR, PrepareConfig, Table};
use crate::error::DataError;
use crate::io::ingest::{
    self, load_demand_series, load_generation, load_import_export, load_price_series, load_weather,
};

/// The repeating 0..23 hour-of-day cycle for `n` rows.
///
/// Row 0 is assumed to be hour 0 of some day; daylight-saving transitions are
/// deliberately ignored.
pub fn hour_of_day_cycle(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i % HOURS_PER_DAY) as f64).collect()
}

/// Build the combined hourly table from the five configured sources.
///
/// Fails on the first source that violates its schema or the 8,760-row
/// invariant; no partial table is ever returned. The output columns, in
/// order: `price, demand, hour_of_day, temperature, export, import,
/// generation_total, generation_renewable, hour_sin, hour_cos`.
pub fn prepare_combined_data(config: &PrepareConfig) -> Result<Table, DataError> {
    let demand = load_demand_series(&config.demand_path, &config.demand_column)?;
    let price = load_price_series(&config.price_path, &config.price_column)?;
    let weather = load_weather(&config.weather_path)?;
    let flows = load_import_export(
        &config.import_export_path,
        &config.export_column,
        &config.import_column,
    )?;
    let generation = load_generation(
        &config.generation_path,
        &config.generation_total_column,
        &config.generation_renewable_column,
    )?;

    // Year-length check for every source, uniformly, before any assembly.
    for (source_name, len) in [
        (ingest::SOURCE_DEMAND, demand.len()),
        (ingest::SOURCE_PRICE, price.len()),
        (ingest::SOURCE_WEATHER, weather.len()),
        (ingest::SOURCE_IMPORT_EXPORT, flows.export.len()),
        (ingest::SOURCE_GENERATION, generation.total.len()),
    ] {
        if len != HOURS_PER_YEAR {
            return Err(DataError::row_count(source_name, HOURS_PER_YEAR, len));
        }
    }

    let hour_of_day = hour_of_day_cycle(HOURS_PER_YEAR);
    let temperature: Vec<f64> = weather.iter().map(|w| w.temperature).collect();
    let hour_sin: Vec<f64> = hour_of_day
        .iter()
        .map(|h| (2.0 * PI * h / HOURS_PER_DAY as f64).sin())
        .collect();
    let hour_cos: Vec<f64> = hour_of_day
        .iter()
        .map(|h| (2.0 * PI * h / HOURS_PER_DAY as f64).cos())
        .collect();

    let mut table = Table::new();
    table.push_column(col::PRICE, price)?;
    table.push_column(col::DEMAND, demand)?;
    table.push_column(col::HOUR_OF_DAY, hour_of_day)?;
    table.push_column(col::TEMPERATURE, temperature)?;
    table.push_column(col::EXPORT, flows.export)?;
    table.push_column(col::IMPORT, flows.import)?;
    table.push_column(col::GENERATION_TOTAL, generation.total)?;
    table.push_column(col::GENERATION_RENEWABLE, generation.renewable)?;
    table.push_column(col::HOUR_SIN, hour_sin)?;
    table.push_column(col::HOUR_COS, hour_cos)?;

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::write_sample_sources;
    use std::io::Write;

    fn sample_config(dir: &tempfile::TempDir) -> PrepareConfig {
        write_sample_sources(dir.path(), 7).unwrap()
    }

    #[test]
    fn hour_cycle_repeats_every_24_rows() {
        let cycle = hour_of_day_cycle(50);
        assert_eq!(cycle[0], 0.0);
        assert_eq!(cycle[1], 1.0);
        assert_eq!(cycle[23], 23.0);
        assert_eq!(cycle[24], 0.0);
        assert_eq!(cycle[25], 1.0);
        assert_eq!(cycle[47], 23.0);
    }

    #[test]
    fn combined_table_has_expected_shape_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(&dir);

        let table = prepare_combined_data(&config).unwrap();
        assert_eq!(table.n_rows(), HOURS_PER_YEAR);
        assert_eq!(
            table.column_names(),
            vec![
                "price",
                "demand",
                "hour_of_day",
                "temperature",
                "export",
                "import",
                "generation_total",
                "generation_renewable",
                "hour_sin",
                "hour_cos",
            ]
        );
    }

    #[test]
    fn price_column_is_unit_converted() {
        // All-100 ct/kWh prices must come out as all-1000 €/MWh.
        let dir = tempfile::tempdir().unwrap();
        let mut config = sample_config(&dir);

        let price_path = dir.path().join("flat_prices.csv");
        let mut f = std::fs::File::create(&price_path).unwrap();
        writeln!(f, "AT").unwrap();
        for _ in 0..HOURS_PER_YEAR {
            writeln!(f, "100").unwrap();
        }
        config.price_path = price_path;

        let table = prepare_combined_data(&config).unwrap();
        let price = table.column(col::PRICE).unwrap();
        assert!(price.iter().all(|&p| (p - 1000.0).abs() < 1e-12));
    }

    #[test]
    fn cyclical_encoding_is_consistent() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(&dir);

        let table = prepare_combined_data(&config).unwrap();
        let hour = table.column(col::HOUR_OF_DAY).unwrap();
        let sin = table.column(col::HOUR_SIN).unwrap();
        let cos = table.column(col::HOUR_COS).unwrap();

        for (i, &h) in hour.iter().enumerate() {
            assert_eq!(h, (i % 24) as f64);
            let angle = 2.0 * PI * h / 24.0;
            assert!((sin[i] - angle.sin()).abs() < 1e-12);
            assert!((cos[i] - angle.cos()).abs() < 1e-12);
            let norm = sin[i] * sin[i] + cos[i] * cos[i];
            assert!((norm - 1.0).abs() < 1e-9);
        }

        assert_eq!(hour[0], 0.0);
        assert_eq!(hour[23], 23.0);
        assert_eq!(hour[24], 0.0);
        assert_eq!(hour[25], 1.0);
        assert!((sin[0] - 0.0).abs() < 1e-12);
        assert!((cos[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn alignment_is_positional() {
        // Row i of the table must draw from row i of each source, even when
        // weather timestamps say otherwise. Build a weather file whose rows
        // are hours in *reverse* chronological order and check the values
        // land by position, not by timestamp.
        let dir = tempfile::tempdir().unwrap();
        let mut config = sample_config(&dir);

        let weather_path = dir.path().join("reversed_weather.csv");
        let mut f = std::fs::File::create(&weather_path).unwrap();
        for i in 0..10 {
            writeln!(f, "metadata {i}").unwrap();
        }
        writeln!(f, "timestamp,temperature").unwrap();
        let start = chrono::NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        for i in 0..HOURS_PER_YEAR {
            let ts = start - chrono::Duration::hours(i as i64);
            writeln!(f, "{},{}", ts.format("%Y%m%dT%H%M"), i as f64 * 0.001).unwrap();
        }
        config.weather_path = weather_path;

        let table = prepare_combined_data(&config).unwrap();
        let temp = table.column(col::TEMPERATURE).unwrap();
        assert_eq!(temp[0], 0.0);
        assert!((temp[1] - 0.001).abs() < 1e-12);
        assert!((temp[8759] - 8.759).abs() < 1e-12);
    }

    #[test]
    fn short_demand_source_aborts_with_row_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = sample_config(&dir);

        let demand_path = dir.path().join("short_demand.csv");
        let mut f = std::fs::File::create(&demand_path).unwrap();
        writeln!(f, "Value").unwrap();
        for _ in 0..(HOURS_PER_YEAR - 1) {
            writeln!(f, "5000").unwrap();
        }
        config.demand_path = demand_path;

        let err = prepare_combined_data(&config).unwrap_err();
        assert_eq!(
            err,
            DataError::row_count(ingest::SOURCE_DEMAND, HOURS_PER_YEAR, HOURS_PER_YEAR - 1)
        );
    }

    #[test]
    fn short_generation_source_aborts_with_row_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = sample_config(&dir);

        let gen_path = dir.path().join("short_gen.csv");
        let mut f = std::fs::File::create(&gen_path).unwrap();
        writeln!(f, "generation_total,generation_renewable").unwrap();
        for _ in 0..100 {
            writeln!(f, "900,400").unwrap();
        }
        config.generation_path = gen_path;

        let err = prepare_combined_data(&config).unwrap_err();
        assert_eq!(
            err,
            DataError::row_count(ingest::SOURCE_GENERATION, HOURS_PER_YEAR, 100)
        );
    }
}
