//! The summary block printed at the end of every run.
//!
//! ```text
//!
//! --- Summary Report ---
//! Input Filename         : people.csv
//! Target Field for Duplicates: id
//! Total Records Processed: 3
//! Impacted Records (Duplicates Found): 2
//! ```

use std::fmt;

/// Total records, or why there is no count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCount {
    Counted(usize),
    /// The run stopped before the file was loaded.
    Unavailable(&'static str),
}

impl fmt::Display for RecordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordCount::Counted(n) => write!(f, "{}", n),
            RecordCount::Unavailable(reason) => write!(f, "N/A ({})", reason),
        }
    }
}

/// How far a run got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Duplicates were searched for; any found were written.
    Completed,
    /// Nothing to process: empty file or header only.
    Empty,
    /// A validation gate stopped the run.
    Aborted,
    /// Duplicates were found but the output file could not be written.
    WriteFailed,
}

/// Fixed-format report of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub input: String,
    pub field: String,
    pub total: RecordCount,
    pub impacted: usize,
    /// Shown next to the impacted count.
    pub note: Option<&'static str>,
    pub status: RunStatus,
}

impl SummaryReport {
    /// A report with zero records and zero impacted.
    pub fn new(input: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            field: field.into(),
            total: RecordCount::Counted(0),
            impacted: 0,
            note: None,
            status: RunStatus::Completed,
        }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = RecordCount::Counted(total);
        self
    }

    pub fn without_total(mut self, reason: &'static str) -> Self {
        self.total = RecordCount::Unavailable(reason);
        self
    }

    pub fn with_impacted(mut self, impacted: usize) -> Self {
        self.impacted = impacted;
        self
    }

    pub fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    pub fn with_status(mut self, status: RunStatus) -> Self {
        self.status = status;
        self
    }

    /// Total records read, `None` when the run stopped before loading.
    pub fn total_records(&self) -> Option<usize> {
        match self.total {
            RecordCount::Counted(n) => Some(n),
            RecordCount::Unavailable(_) => None,
        }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Summary Report ---")?;
        writeln!(f, "Input Filename         : {}", self.input)?;
        writeln!(f, "Target Field for Duplicates: {}", self.field)?;
        writeln!(f, "Total Records Processed: {}", self.total)?;
        match self.note {
            Some(note) => writeln!(f, "Impacted Records (Duplicates Found): {} ({})", self.impacted, note),
            None => writeln!(f, "Impacted Records (Duplicates Found): {}", self.impacted),
        }
    }
}
