//! Error types for the duplicate finder pipeline.
//!
//! One enum per layer:
//!
//! - [`CsvError`] - Reading, decoding and parsing the input file
//! - [`SniffError`] - Dialect/header sniffing that could not reach a verdict
//! - [`FinderError`] - Top-level aborts of a run
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading or parsing the input CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not valid UTF-8.
    #[error("Input is not valid UTF-8: {0}")]
    Encoding(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// A data row carries more fields than the header declares.
    #[error("Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Only blank lines, so no header row could be read.
    #[error("No columns to parse from file")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CsvError::Io(io),
            csv::ErrorKind::Utf8 { err, .. } => CsvError::Encoding(err.to_string()),
            other => CsvError::Parse {
                line,
                message: format!("{:?}", other),
            },
        }
    }
}

// =============================================================================
// Sniffing Errors
// =============================================================================

/// The sniffer could not decide on a dialect or header.
///
/// Every variant is treated as "header ambiguous": the run continues and
/// assumes the first row is a header.
#[derive(Debug, Error)]
pub enum SniffError {
    /// No candidate delimiter was consistent across the sample.
    #[error("Could not determine delimiter")]
    NoDelimiter,

    /// The sniffed delimiter cannot drive a byte-oriented CSV reader.
    #[error("Unsupported delimiter: {0:?}")]
    UnsupportedDelimiter(char),

    /// The sample could not be read with the sniffed dialect.
    #[error("Could not read sample: {0}")]
    Sample(String),
}

// =============================================================================
// Run Errors (top-level)
// =============================================================================

/// Conditions that abort a run before duplicates are reported.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The input path does not exist.
    #[error("Input file '{}' not found.", .0.display())]
    InputNotFound(PathBuf),

    /// The sniffer is confident the first row is data.
    #[error("Input file '{}' does not appear to have a header row.", .0.display())]
    HeaderMissing(PathBuf),

    /// The target field is not one of the header names.
    #[error("Column '{field}' not found. Available columns are: {}", format_columns(.available))]
    ColumnNotFound {
        field: String,
        available: Vec<String>,
    },

    /// The duplicate subset could not be written.
    #[error("An error occurred while writing to '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: CsvError,
    },

    /// Reading or parsing the input failed.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),
}

/// Render column names as a bracketed, quoted list: `['id', 'name']`.
pub fn format_columns(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for sniffing operations.
pub type SniffResult<T> = Result<T, SniffError>;

/// Result type for pipeline stages.
pub type FinderResult<T> = Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::NoHeaders;
        let finder_err: FinderError = csv_err.into();
        assert!(finder_err.to_string().contains("No columns"));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let finder_err: FinderError = CsvError::from(io).into();
        assert!(finder_err.to_string().contains("denied"));
    }

    #[test]
    fn test_column_not_found_lists_columns() {
        let err = FinderError::ColumnNotFound {
            field: "foo".into(),
            available: vec!["id".into(), "name".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'foo'"));
        assert!(msg.contains("['id', 'name']"));
    }

    #[test]
    fn test_ragged_row_format() {
        let err = CsvError::RaggedRow {
            line: 3,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "Expected 2 fields in line 3, saw 3");
    }

    #[test]
    fn test_input_not_found_mentions_path() {
        let err = FinderError::InputNotFound(PathBuf::from("missing.csv"));
        assert_eq!(err.to_string(), "Input file 'missing.csv' not found.");
    }
}
