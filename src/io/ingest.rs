//! CSV ingest and validation for the five hourly sources.
//!
//! Each loader turns one external file into clean numeric series that are
//! safe to assemble positionally. Design goals:
//!
//! - **Strict schema** for required columns (typed `DataError`s, no guessing)
//! - **Fail fast**: the first bad row aborts the loader. There is no
//!   row-skipping policy, because a dropped hour would silently shift every
//!   later row against the other sources
//! - **No transformation** beyond the documented unit conversion for prices
//! - **Separation of concerns**: no table assembly or fitting logic here

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;

use crate::domain::HOURS_PER_YEAR;
use crate::error::DataError;

/// Source labels used in error messages and validation reports.
pub const SOURCE_DEMAND: &str = "demand";
pub const SOURCE_PRICE: &str = "price";
pub const SOURCE_WEATHER: &str = "weather";
pub const SOURCE_IMPORT_EXPORT: &str = "import_export";
pub const SOURCE_GENERATION: &str = "generation";

/// Leading metadata lines in the weather export, discarded before parsing.
pub const WEATHER_METADATA_LINES: usize = 10;

/// ct/kWh → €/MWh.
pub const PRICE_UNIT_FACTOR: f64 = 10.0;

/// Compact timestamp format used by the weather export.
const WEATHER_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M";

/// One parsed weather observation.
///
/// The timestamp is validated but deliberately not used for joining; the
/// combined table aligns all sources by row position.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
}

/// Hourly cross-border flows.
#[derive(Debug, Clone, Default)]
pub struct ImportExportData {
    pub export: Vec<f64>,
    pub import: Vec<f64>,
}

/// Hourly generation totals.
#[derive(Debug, Clone, Default)]
pub struct GenerationData {
    pub total: Vec<f64>,
    pub renewable: Vec<f64>,
}

/// Load the hourly price column and convert ct/kWh → €/MWh.
pub fn load_price_series(path: &Path, price_column: &str) -> Result<Vec<f64>, DataError> {
    let [series] = read_named_columns(path, SOURCE_PRICE, &[price_column])?;
    Ok(series.into_iter().map(|v| v * PRICE_UNIT_FACTOR).collect())
}

/// Load the hourly demand column. Pass-through extraction, no transformation.
pub fn load_demand_series(path: &Path, value_column: &str) -> Result<Vec<f64>, DataError> {
    let [series] = read_named_columns(path, SOURCE_DEMAND, &[value_column])?;
    Ok(series)
}

/// Load the weather export: skip the metadata preamble, then parse
/// `(timestamp, temperature)` rows.
pub fn load_weather(path: &Path) -> Result<Vec<WeatherRecord>, DataError> {
    let content = fs::read_to_string(path)
        .map_err(|e| DataError::io(SOURCE_WEATHER, format!("failed to read '{}': {e}", path.display())))?;

    // The export carries a fixed-size metadata preamble before the actual
    // two-column header.
    let mut line_iter = content.lines();
    for _ in 0..WEATHER_METADATA_LINES {
        if line_iter.next().is_none() {
            return Err(DataError::schema(
                SOURCE_WEATHER,
                format!("file ends inside the {WEATHER_METADATA_LINES}-line metadata preamble"),
            ));
        }
    }
    let data = line_iter.collect::<Vec<_>>().join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DataError::schema(SOURCE_WEATHER, format!("failed to read header: {e}")))?;
    if headers.len() != 2 {
        return Err(DataError::schema(
            SOURCE_WEATHER,
            format!(
                "expected exactly 2 columns (timestamp, temperature) after the preamble, got {}",
                headers.len()
            ),
        ));
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // 1-based file line: data starts after the preamble and the header.
        let line = idx + WEATHER_METADATA_LINES + 2;

        let record =
            result.map_err(|e| DataError::parse(SOURCE_WEATHER, line, format!("CSV parse error: {e}")))?;
        if record.len() != 2 {
            return Err(DataError::schema(
                SOURCE_WEATHER,
                format!("line {line}: expected 2 fields, got {}", record.len()),
            ));
        }

        let raw_ts = record.get(0).unwrap_or("").trim();
        let timestamp = NaiveDateTime::parse_from_str(raw_ts, WEATHER_TIMESTAMP_FORMAT).map_err(|_| {
            DataError::parse(
                SOURCE_WEATHER,
                line,
                format!("invalid timestamp '{raw_ts}' (expected YYYYMMDDTHHMM)"),
            )
        })?;
        let temperature = parse_cell(SOURCE_WEATHER, line, "temperature", record.get(1))?;

        records.push(WeatherRecord { timestamp, temperature });
    }

    Ok(records)
}

/// Load hourly export/import flows.
///
/// This loader also enforces the year-length invariant itself, so misshapen
/// flow data is reported against this source even when used standalone.
pub fn load_import_export(
    path: &Path,
    export_column: &str,
    import_column: &str,
) -> Result<ImportExportData, DataError> {
    let [export, import] =
        read_named_columns(path, SOURCE_IMPORT_EXPORT, &[export_column, import_column])?;

    if export.len() != HOURS_PER_YEAR {
        return Err(DataError::row_count(
            SOURCE_IMPORT_EXPORT,
            HOURS_PER_YEAR,
            export.len(),
        ));
    }

    Ok(ImportExportData { export, import })
}

/// Load hourly total and renewable generation.
pub fn load_generation(
    path: &Path,
    total_column: &str,
    renewable_column: &str,
) -> Result<GenerationData, DataError> {
    let [total, renewable] =
        read_named_columns(path, SOURCE_GENERATION, &[total_column, renewable_column])?;
    Ok(GenerationData { total, renewable })
}

/// Read the requested named columns from a headered CSV as `f64` series.
///
/// Column presence is validated up front (in the order given) so a missing
/// column is reported before any row is parsed.
fn read_named_columns<const N: usize>(
    path: &Path,
    source_name: &str,
    columns: &[&str; N],
) -> Result<[Vec<f64>; N], DataError> {
    let file = fs::File::open(path)
        .map_err(|e| DataError::io(source_name, format!("failed to open '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DataError::schema(source_name, format!("failed to read header: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let mut indices = [0usize; N];
    for (slot, &name) in columns.iter().enumerate() {
        indices[slot] = header_map
            .get(&normalize_header_name(name))
            .copied()
            .ok_or_else(|| DataError::missing_column(source_name, name))?;
    }

    let mut out: [Vec<f64>; N] = std::array::from_fn(|_| Vec::new());
    for (row_idx, result) in reader.records().enumerate() {
        // records() starts after the header row; CSV line numbers are 1-based.
        let line = row_idx + 2;
        let record =
            result.map_err(|e| DataError::parse(source_name, line, format!("CSV parse error: {e}")))?;

        for (slot, (&col_idx, &name)) in indices.iter().zip(columns).enumerate() {
            let value = parse_cell(source_name, line, name, record.get(col_idx))?;
            out[slot].push(value);
        }
    }

    Ok(out)
}

fn parse_cell(
    source_name: &str,
    line: usize,
    column: &str,
    cell: Option<&str>,
) -> Result<f64, DataError> {
    let raw = cell.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(DataError::parse(
            source_name,
            line,
            format!("empty value in column `{column}`"),
        ));
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| DataError::parse(source_name, line, format!("invalid number '{raw}' in column `{column}`")))?;
    if !value.is_finite() {
        return Err(DataError::parse(
            source_name,
            line,
            format!("non-finite value in column `{column}`"),
        ));
    }
    Ok(value)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿AT"). If we don't strip it, schema validation will
    // incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
