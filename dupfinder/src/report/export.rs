//! CSV export of the duplicate subset.
//!
//! All columns are written. The target column carries its normalized value,
//! the others their original text; nulls become empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::models::{Dataset, NormalizedValue};

/// Create (or truncate) `path` and write the selected rows to it.
pub fn write_duplicates(
    path: &Path,
    dataset: &Dataset,
    column: usize,
    normalized: &[NormalizedValue],
    rows: &[usize],
) -> CsvResult<usize> {
    let file = File::create(path)?;
    export_csv(dataset, column, normalized, rows, file)
}

/// Write header plus the selected rows, in the order given, to any writer.
pub fn export_csv<W: Write>(
    dataset: &Dataset,
    column: usize,
    normalized: &[NormalizedValue],
    rows: &[usize],
    writer: W,
) -> CsvResult<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(&dataset.headers)?;

    let mut count = 0;
    for &row in rows {
        let Some(record) = dataset.records.get(row) else {
            continue;
        };
        let fields: Vec<String> = record
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == column {
                    normalized.get(row).cloned().flatten().unwrap_or_default()
                } else {
                    cell.to_string()
                }
            })
            .collect();
        csv_writer.write_record(&fields)?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, Record};

    fn dataset() -> Dataset {
        let text = |s: &str| CellValue::Text(s.to_string());
        Dataset::new(
            vec!["id".into(), "name".into()],
            vec![
                Record::new(0, vec![text(" 1"), text("Alice")]),
                Record::new(1, vec![text("2"), CellValue::Null]),
                Record::new(2, vec![text("1 "), text("Carol, Jr.")]),
            ],
        )
    }

    fn normalized() -> Vec<NormalizedValue> {
        vec![Some("1".into()), Some("2".into()), Some("1".into())]
    }

    #[test]
    fn test_export_selected_rows() {
        let mut out = Vec::new();
        let count = export_csv(&dataset(), 0, &normalized(), &[0, 2], &mut out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,name\n1,Alice\n1,\"Carol, Jr.\"\n"
        );
    }

    #[test]
    fn test_nulls_written_empty() {
        let mut out = Vec::new();
        export_csv(&dataset(), 0, &normalized(), &[1], &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "id,name\n2,\n");
    }

    #[test]
    fn test_write_duplicates_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dups.csv");
        std::fs::write(&path, "stale content that is longer than the export\n").unwrap();

        write_duplicates(&path, &dataset(), 0, &normalized(), &[0, 2]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("id,name\n1,Alice\n"));
        assert!(!written.contains("stale"));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dups.csv");

        assert!(write_duplicates(&path, &dataset(), 0, &normalized(), &[0]).is_err());
    }
}
