//! A small columnar table of `f64` series.
//!
//! This is the artifact the preparation pipeline hands to every consumer:
//! named columns of equal length, aligned by row position. Columns keep
//! their insertion order so exports are stable.
//!
//! The container is deliberately minimal: the fitting code only ever needs
//! named column lookup and row count, not a general dataframe.

use crate::error::DataError;

/// Named, equally-sized `f64` columns in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<(String, Vec<f64>)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (0 for an empty table).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Look up a column by name, failing with `MissingColumn` otherwise.
    ///
    /// `source_name` identifies the table in the error (e.g. "combined").
    pub fn require_column(&self, source_name: &str, name: &str) -> Result<&[f64], DataError> {
        self.column(name)
            .ok_or_else(|| DataError::missing_column(source_name, name))
    }

    /// Append a column.
    ///
    /// Fails if the name is already taken or the length disagrees with the
    /// existing columns.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), DataError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(DataError::schema(
                "table",
                format!("duplicate column `{name}`"),
            ));
        }
        if !self.columns.is_empty() && values.len() != self.n_rows() {
            return Err(DataError::schema(
                "table",
                format!(
                    "column `{name}` has {} rows, table has {}",
                    values.len(),
                    self.n_rows()
                ),
            ));
        }
        self.columns.push((name, values));
        Ok(())
    }

    /// Iterate `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// One row as values in column order (for exports).
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.columns.iter().map(|(_, v)| v[i]).collect()
    }
}
