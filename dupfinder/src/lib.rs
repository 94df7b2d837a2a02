//! # Dupfinder - report CSV records sharing a value in one column
//!
//! Reads a CSV file, checks that it has a header row, trims whitespace in
//! one column and writes every record whose trimmed value occurs more than
//! once to a separate CSV file.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│   Report    │
//! │   (UTF-8)   │     │ (sniff+load)│     │ (trim+find) │     │ (CSV+summary)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dupfinder::{run, Console, RunConfig};
//!
//! let config = RunConfig::new("people.csv", "duplicates.csv", "id");
//! let report = run(&config, &mut Console::stdout());
//! assert!(report.total_records().is_some());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Cells, records and datasets
//! - [`parser`] - Decoding, header sniffing and CSV loading
//! - [`transform`] - Normalization, duplicate extraction and the pipeline
//! - [`report`] - Console lines, summary block and CSV export

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod report;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, FinderError, SniffError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CellValue, Dataset, NormalizedValue, Record};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_content, detect_header, has_header, parse_dataset, read_input, sniff_dialect, Dialect, HeaderVerdict};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    classify_column,
    find_duplicates,
    normalize_column,
    ColumnKind,
    DuplicateGroup,
    Duplicates,
    NumericKind,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{run, RunConfig};

// =============================================================================
// Re-exports - Report
// =============================================================================

pub use report::{Console, LogLevel, RecordCount, RunStatus, SummaryReport};
