//! The duplicate finder pipeline.
//!
//! ```text
//! read ─▶ sniff header ─▶ load ─▶ resolve column ─▶ normalize ─▶ find ─▶ write
//!   │          │            │            │                                 │
//!   ▼          ▼            ▼            ▼                                 ▼
//! missing   no header    empty     not found                         write failed
//! ```
//!
//! Each stage is a function returning its data or a [`FinderError`];
//! [`run`] branches on those results, prints status lines and always ends
//! with the summary block.
//!
//! # Example
//!
//! ```rust,no_run
//! use dupfinder::{run, Console, RunConfig};
//!
//! let config = RunConfig::new("people.csv", "dups.csv", "id");
//! let report = run(&config, &mut Console::stdout());
//! println!("{} duplicate records", report.impacted);
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use super::duplicates::{find_duplicates, Duplicates};
use super::normalize::{normalize_column, NormalizedColumn};
use crate::error::{CsvError, FinderError, FinderResult, SniffError};
use crate::models::Dataset;
use crate::parser::{detect_header, parse_dataset, read_input, sample, HeaderVerdict, SAMPLE_CHARS};
use crate::report::{write_duplicates, Console, RunStatus, SummaryReport};

/// Inputs of one run, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub field: String,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            field: field.into(),
        }
    }
}

/// Result of the header gate.
#[derive(Debug)]
pub enum HeaderCheck {
    /// The sniffer found a header.
    Present,
    /// The sniffer had no verdict; a header is assumed.
    Assumed(SniffError),
}

/// Result of the load stage.
#[derive(Debug)]
pub enum Loaded {
    Rows(Dataset),
    /// Header row but no data rows.
    HeaderOnly(Dataset),
    /// Nothing tabular in the file.
    Blank,
}

// =============================================================================
// Stages
// =============================================================================

/// Header gate on the first [`SAMPLE_CHARS`] characters.
pub fn check_header(path: &Path, content: &str) -> FinderResult<HeaderCheck> {
    match detect_header(sample(content, SAMPLE_CHARS)) {
        HeaderVerdict::Present => Ok(HeaderCheck::Present),
        HeaderVerdict::Absent => Err(FinderError::HeaderMissing(path.to_path_buf())),
        HeaderVerdict::Ambiguous(e) => Ok(HeaderCheck::Assumed(e)),
    }
}

/// Full parse of the decoded input.
pub fn load(content: &str) -> FinderResult<Loaded> {
    match parse_dataset(content) {
        Ok(dataset) if dataset.is_empty() => Ok(Loaded::HeaderOnly(dataset)),
        Ok(dataset) => Ok(Loaded::Rows(dataset)),
        Err(CsvError::NoHeaders) => Ok(Loaded::Blank),
        Err(e) => Err(e.into()),
    }
}

/// Position of the target field in the header.
pub fn resolve_column(dataset: &Dataset, field: &str) -> FinderResult<usize> {
    dataset
        .column_index(field)
        .ok_or_else(|| FinderError::ColumnNotFound {
            field: field.to_string(),
            available: dataset.headers.clone(),
        })
}

/// Write the duplicate rows to `path`.
pub fn deliver(
    path: &Path,
    dataset: &Dataset,
    column: usize,
    normalized: &NormalizedColumn,
    duplicates: &Duplicates,
) -> FinderResult<usize> {
    write_duplicates(path, dataset, column, &normalized.values, &duplicates.rows).map_err(|source| {
        FinderError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

// =============================================================================
// Run
// =============================================================================

/// Run the whole pipeline, printing status lines and the summary to `console`.
pub fn run<W: Write>(config: &RunConfig, console: &mut Console<W>) -> SummaryReport {
    let report = find(config, console);
    console.raw(&report);
    report
}

fn find<W: Write>(config: &RunConfig, console: &mut Console<W>) -> SummaryReport {
    let input = config.input.display().to_string();
    let report = SummaryReport::new(input.clone(), config.field.clone());

    // Step 1: read and sniff
    let content = match read_input(&config.input) {
        Ok(content) => content,
        Err(e @ FinderError::InputNotFound(_)) => {
            console.error(e.to_string());
            return aborted(report, "Input file not found");
        }
        Err(e) => {
            console.error(format!("An error occurred while reading '{}': {}", input, e));
            return aborted(report, "Input unreadable");
        }
    };

    if content.is_empty() {
        console.error(format!("Input file '{}' is empty.", input));
        return report.with_status(RunStatus::Empty);
    }

    match check_header(&config.input, &content) {
        Ok(HeaderCheck::Present) => {}
        Ok(HeaderCheck::Assumed(reason)) => {
            console.warning(format!(
                "Could not reliably determine if '{}' has a header ({}). Assuming header is present.",
                input, reason
            ));
        }
        Err(e) => {
            console.error(e.to_string());
            console.info("A header row is required to identify the column to check for duplicates.");
            return aborted(report, "Header missing");
        }
    }

    // Step 2: full load
    let dataset = match load(&content) {
        Ok(Loaded::Rows(dataset)) => dataset,
        Ok(Loaded::HeaderOnly(_)) => {
            console.warning(format!(
                "Input file '{}' contains only a header or is otherwise empty after header.",
                input
            ));
            return report.with_status(RunStatus::Empty);
        }
        Ok(Loaded::Blank) => {
            console.error(format!(
                "Input file '{}' is effectively empty or not valid CSV after header check.",
                input
            ));
            return report.with_status(RunStatus::Empty);
        }
        Err(e) => {
            console.error(format!("An error occurred while reading '{}': {}", input, e));
            return aborted(report, "Input unreadable");
        }
    };
    let report = report.with_total(dataset.len());
    console.success(format!("Read {} records", dataset.len()));
    console.info(format!("CSV has {} columns:", dataset.headers.len()));
    for (i, name) in dataset.headers.iter().enumerate() {
        console.info_indent(format!("[{:2}] {}", i + 1, name), 1);
    }

    // Step 3: target column
    let column = match resolve_column(&dataset, &config.field) {
        Ok(column) => column,
        Err(e) => {
            console.error(e.to_string());
            return report
                .with_note("Specified field not found")
                .with_status(RunStatus::Aborted);
        }
    };

    // Steps 4-5: normalize and find
    let normalized = normalize_column(&dataset, column);
    console.info(format!(
        "Column '{}' compared as {} values after trimming",
        config.field,
        normalized.kind.label()
    ));
    let duplicates = find_duplicates(&normalized.values);

    if duplicates.is_empty() {
        console.info(format!(
            "No duplicate '{}' values found after trimming spaces.",
            config.field
        ));
        return report;
    }
    console.info(format!(
        "{} values shared by {} records",
        duplicates.groups.len(),
        duplicates.len()
    ));

    // Step 6: deliver
    match deliver(&config.output, &dataset, column, &normalized, &duplicates) {
        Ok(_) => {
            console.success(format!(
                "Duplicate records based on '{}' (after trimming) have been saved to '{}'",
                config.field,
                config.output.display()
            ));
            report.with_impacted(duplicates.len())
        }
        Err(e) => {
            console.error(e.to_string());
            // A failed write reports zero impacted records even though
            // duplicates were found.
            // TODO: report the found count with a "not written" note instead.
            report
                .with_note("Output write failed")
                .with_status(RunStatus::WriteFailed)
        }
    }
}

fn aborted(report: SummaryReport, reason: &'static str) -> SummaryReport {
    report
        .without_total(reason)
        .with_note("Processing aborted")
        .with_status(RunStatus::Aborted)
}
