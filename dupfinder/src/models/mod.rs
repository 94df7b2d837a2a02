//! Domain models for a loaded CSV file.
//!
//! - [`CellValue`] - One raw cell, either null or its original text
//! - [`Record`] - One data row with its position in the file
//! - [`Dataset`] - Header names plus records, in file order

use std::fmt;

static NULL_CELL: CellValue = CellValue::Null;

// =============================================================================
// CellValue
// =============================================================================

/// A single cell as read from the input.
///
/// The original text is kept untouched so records can be written back out
/// with their columns as they were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Empty cell or a recognised null token (`NA`, `null`, ...).
    Null,
    /// Any other cell, verbatim.
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for CellValue {
    /// Nulls render as an empty cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// One data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Zero-based position among the data rows (header excluded).
    pub index: usize,
    /// One cell per header column.
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn new(index: usize, cells: Vec<CellValue>) -> Self {
        Self { index, cells }
    }

    pub fn get(&self, column: usize) -> Option<&CellValue> {
        self.cells.get(column)
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Header plus records, in the order they appear in the file.
///
/// Header names are unique and every record has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a header name, exact match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.records
            .iter()
            .map(move |r| r.get(column).unwrap_or(&NULL_CELL))
    }
}

/// Target field value after null-preserving whitespace trimming.
///
/// `None` is a null and never compares equal to another null when
/// looking for duplicates.
pub type NormalizedValue = Option<String>;
