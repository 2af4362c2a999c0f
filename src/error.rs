//! Error types.
//!
//! Two layers:
//!
//! - [`DataError`] — typed validation/parsing failures raised by the ingest
//!   loaders and the pipeline. These carry enough structure for callers (and
//!   tests) to match on the failure kind.
//! - [`AppError`] — the boundary error returned to `main`, carrying the
//!   process exit code and a rendered message.
//!
//! Exit codes: 2 = input/config error, 3 = data-shape error, 4 = numeric
//! failure during fitting.

use thiserror::Error;

/// A validation or parsing failure in one of the input sources.
///
/// All variants are fatal: there is no row-skipping or default substitution,
/// and the pipeline never returns a partial table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataError {
    /// A required named column is absent from a loaded source.
    #[error("{source_name}: missing required column `{column}`")]
    MissingColumn { source_name: String, column: String },

    /// A source's row count deviates from the fixed year-length assumption.
    #[error("{source_name}: expected {expected} rows (one non-leap year of hours), got {actual}")]
    RowCountMismatch {
        source_name: String,
        expected: usize,
        actual: usize,
    },

    /// A timestamp or numeric value failed to parse.
    #[error("{source_name}: line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    /// The source's layout does not match the expected shape
    /// (e.g. weather data not reducible to exactly two columns).
    #[error("{source_name}: {message}")]
    Schema { source_name: String, message: String },

    /// The source file could not be opened or read.
    #[error("{source_name}: {message}")]
    Io { source_name: String, message: String },
}

impl DataError {
    pub fn missing_column(source_name: &str, column: &str) -> Self {
        DataError::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        }
    }

    pub fn row_count(source_name: &str, expected: usize, actual: usize) -> Self {
        DataError::RowCountMismatch {
            source_name: source_name.to_string(),
            expected,
            actual,
        }
    }

    pub fn parse(source_name: &str, line: usize, message: impl Into<String>) -> Self {
        DataError::Parse {
            source_name: source_name.to_string(),
            line,
            message: message.into(),
        }
    }

    pub fn schema(source_name: &str, message: impl Into<String>) -> Self {
        DataError::Schema {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }

    pub fn io(source_name: &str, message: impl Into<String>) -> Self {
        DataError::Io {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}

/// Boundary error: message + process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        let exit_code = match err {
            DataError::RowCountMismatch { .. } => 3,
            _ => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_mismatch_maps_to_exit_code_3() {
        let err: AppError = DataError::row_count("demand", 8760, 8759).into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("8759"));
    }

    #[test]
    fn missing_column_maps_to_exit_code_2() {
        let err: AppError = DataError::missing_column("price", "AT").into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("`AT`"));
    }
}
