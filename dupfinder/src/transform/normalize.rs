//! Target column normalization.
//!
//! A column is first classified as [`ColumnKind::Numeric`] or
//! [`ColumnKind::Textual`]. Numeric values are rendered to their canonical
//! string form, then every non-null value is trimmed. Nulls stay nulls.
//!
//! ```text
//! " 7 ", "7", "007"   Integer  ->  "7", "7", "7"
//! "1", "", "2.50"     Float    ->  "1.0", null, "2.5"
//! "x ", "x", ""       Textual  ->  "x", "x", null
//! ```

use crate::models::{CellValue, Dataset, NormalizedValue};

/// How numeric values of a column are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Every value is a 64-bit integer and none is null.
    Integer,
    /// Anything else numeric, including integers next to nulls.
    Float,
}

/// Classification of the target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric(NumericKind),
    Textual,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric(NumericKind::Integer) => "integer",
            ColumnKind::Numeric(NumericKind::Float) => "float",
            ColumnKind::Textual => "text",
        }
    }
}

/// Normalized values of one column, one per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedColumn {
    pub kind: ColumnKind,
    pub values: Vec<NormalizedValue>,
}

/// Classify the values of a column.
///
/// A column without any non-null value is textual.
///
/// Boolean spellings are textual too, so `true` and `TRUE` stay distinct
/// values rather than folding into one boolean.
pub fn classify_column<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> ColumnKind {
    let mut has_null = false;
    let mut has_value = false;
    let mut all_integer = true;

    for cell in cells {
        let Some(text) = cell.as_text() else {
            has_null = true;
            continue;
        };
        has_value = true;
        if parse_integer(text).is_some() {
            continue;
        }
        if parse_float(text).is_none() {
            return ColumnKind::Textual;
        }
        all_integer = false;
    }

    match (has_value, all_integer && !has_null) {
        (false, _) => ColumnKind::Textual,
        (true, true) => ColumnKind::Numeric(NumericKind::Integer),
        (true, false) => ColumnKind::Numeric(NumericKind::Float),
    }
}

/// Normalize one cell for a column of the given kind.
pub fn normalize_cell(cell: &CellValue, kind: ColumnKind) -> NormalizedValue {
    let text = cell.as_text()?;
    let rendered = match kind {
        ColumnKind::Numeric(NumericKind::Integer) => parse_integer(text).map(|n| n.to_string()),
        ColumnKind::Numeric(NumericKind::Float) => parse_float(text).map(format_float),
        ColumnKind::Textual => None,
    };
    let rendered = rendered.as_deref().unwrap_or(text);
    Some(rendered.trim().to_string())
}

/// Classify then normalize column `column` of `dataset`.
pub fn normalize_column(dataset: &Dataset, column: usize) -> NormalizedColumn {
    let kind = classify_column(dataset.column(column));
    let values = dataset
        .column(column)
        .map(|cell| normalize_cell(cell, kind))
        .collect();
    NormalizedColumn { kind, values }
}

fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|x| !x.is_nan())
}

/// Shortest round-trip rendering of a float, always with a fractional part
/// or an exponent: `7.0`, `0.001`, `1.5e-05`, `1e+16`.
pub fn format_float(x: f64) -> String {
    if x.is_infinite() {
        return if x > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0".into() } else { "0.0".into() };
    }

    let sci = format!("{:e}", x);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return x.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return x.to_string();
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exponent) {
        return format!("{}{}e{:+03}", sign, mantissa, exponent);
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{}{}{}.0", sign, digits, zeros)
    } else {
        format!("{}{}.{}", sign, &digits[..int_len], &digits[int_len..])
    }
}
