//! Input loading: decoding, sampling and the full tabular parse.
//!
//! The whole file is read once. The sniffer looks at its first
//! [`SAMPLE_CHARS`] characters; the full parse always uses the comma
//! dialect with standard quoting.

pub mod sniff;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CsvError, CsvResult, FinderError, FinderResult};
use crate::models::{CellValue, Dataset, Record};

pub use sniff::{detect_header, has_header, sniff_dialect, Dialect, HeaderVerdict, SAMPLE_CHARS};

/// Cell contents read as null. Matched exactly, without trimming.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Read and decode the input file.
///
/// A missing file is reported as [`FinderError::InputNotFound`]; every other
/// failure is a [`CsvError`].
pub fn read_input(path: &Path) -> FinderResult<String> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FinderError::InputNotFound(path.to_path_buf()),
        _ => FinderError::Csv(CsvError::Io(e)),
    })?;
    Ok(decode_content(&bytes)?)
}

/// Decode UTF-8 input, dropping a leading byte order mark.
pub fn decode_content(bytes: &[u8]) -> CsvResult<String> {
    let body = match encoding_rs::Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == encoding_rs::UTF_8 => &bytes[bom_len..],
        Some((encoding, _)) => {
            return Err(CsvError::Encoding(format!(
                "{} byte order mark found, expected UTF-8",
                encoding.name()
            )))
        }
        None => bytes,
    };

    encoding_rs::UTF_8
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            let offset = std::str::from_utf8(body).err().map_or(0, |e| e.valid_up_to());
            CsvError::Encoding(format!("invalid byte sequence at offset {}", offset))
        })
}

/// First `max_chars` characters of `content`.
pub fn sample(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((end, _)) => &content[..end],
        None => content,
    }
}

/// Interpret a raw cell.
pub fn parse_cell(raw: &str) -> CellValue {
    if NULL_TOKENS.contains(&raw) {
        CellValue::Null
    } else {
        CellValue::Text(raw.to_string())
    }
}

/// Parse decoded CSV content into a [`Dataset`].
///
/// The first non-blank row is the header. Blank rows are skipped, short rows
/// are padded with nulls and a row longer than the header is an error.
///
/// # Example
/// ```
/// use dupfinder::parser::parse_dataset;
///
/// let ds = parse_dataset("id,name\n1,Alice\n2,\n").unwrap();
/// assert_eq!(ds.headers, vec!["id", "name"]);
/// assert_eq!(ds.len(), 2);
/// assert!(ds.records[1].cells[1].is_null());
/// ```
pub fn parse_dataset(content: &str) -> CsvResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        if is_blank(&row) {
            continue;
        }

        let Some(names) = headers.as_ref() else {
            headers = Some(unique_headers(row.iter()));
            continue;
        };

        if row.len() > names.len() {
            return Err(CsvError::RaggedRow {
                line: row.position().map_or(0, |p| p.line()),
                expected: names.len(),
                found: row.len(),
            });
        }

        let mut cells: Vec<CellValue> = row.iter().map(parse_cell).collect();
        cells.resize(names.len(), CellValue::Null);
        records.push(Record::new(records.len(), cells));
    }

    let headers = headers.ok_or(CsvError::NoHeaders)?;
    Ok(Dataset::new(headers, records))
}

fn is_blank(row: &csv::StringRecord) -> bool {
    row.iter().all(|f| f.trim().is_empty()) && row.len() <= 1
}

/// Name empty header cells after their position and suffix repeats with
/// `.1`, `.2`, ... so every name is unique.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (i, cell) in raw.enumerate() {
        let mut name = if cell.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            cell.to_string()
        };

        let mut seen = counts.get(&name).copied().unwrap_or(0);
        while seen > 0 {
            counts.insert(name.clone(), seen + 1);
            name = format!("{}.{}", name, seen);
            seen = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), seen + 1);
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_simple_csv() {
        let ds = parse_dataset("id,name\n1,Alice\n2,Bob\n1,Carol\n").unwrap();

        assert_eq!(ds.headers, vec!["id", "name"]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[2].cells[1], CellValue::Text("Carol".into()));
        assert_eq!(ds.records[2].index, 2);
    }

    #[test]
    fn test_quoted_values_keep_whitespace() {
        let ds = parse_dataset("code,label\n\" x \",\"a, b\"\n").unwrap();

        assert_eq!(ds.records[0].cells[0], CellValue::Text(" x ".into()));
        assert_eq!(ds.records[0].cells[1], CellValue::Text("a, b".into()));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let ds = parse_dataset("\na,b\n1,2\n\n3,4\n").unwrap();

        assert_eq!(ds.headers, vec!["a", "b"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].index, 1);
    }

    #[test]
    fn test_null_tokens_and_short_rows() {
        let ds = parse_dataset("a,b,c\nNA,,x\n1\n").unwrap();

        assert!(ds.records[0].cells[0].is_null());
        assert!(ds.records[0].cells[1].is_null());
        assert_eq!(ds.records[0].cells[2], CellValue::Text("x".into()));
        assert_eq!(ds.records[1].cells.len(), 3);
        assert!(ds.records[1].cells[2].is_null());
    }

    #[test]
    fn test_whitespace_is_not_null() {
        assert_eq!(parse_cell(" "), CellValue::Text(" ".into()));
        assert_eq!(parse_cell(" NA"), CellValue::Text(" NA".into()));
        assert!(parse_cell("NULL").is_null());
    }

    #[test]
    fn test_long_row_is_error() {
        match parse_dataset("a,b\n1,2\n1,2,3\n") {
            Err(CsvError::RaggedRow { expected, found, line }) => {
                assert_eq!((expected, found, line), (2, 3, 3));
            }
            other => panic!("expected ragged row error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only() {
        let ds = parse_dataset("id,name\n").unwrap();
        assert_eq!(ds.headers.len(), 2);
        assert!(ds.is_empty());
    }

    #[test]
    fn test_blank_content_has_no_headers() {
        assert!(matches!(parse_dataset("\n\n"), Err(CsvError::NoHeaders)));
    }

    #[test]
    fn test_duplicate_and_empty_header_names() {
        let ds = parse_dataset("a,a,,a.1,a\n1,2,3,4,5\n").unwrap();
        assert_eq!(ds.headers, vec!["a", "a.1", "Unnamed: 2", "a.1.1", "a.2"]);
    }

    #[test]
    fn test_sample_is_char_bounded() {
        assert_eq!(sample("héllo", 2), "hé");
        assert_eq!(sample("abc", 10), "abc");
    }

    #[test]
    fn test_bom_is_dropped() {
        let decoded = decode_content(b"\xEF\xBB\xBFid,name\n").unwrap();
        assert!(decoded.starts_with("id"));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = decode_content(&[0x61, 0xFF, 0x62]).unwrap_err();
        assert!(err.to_string().contains("offset 1"));
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(read_input(&missing), Err(FinderError::InputNotFound(_))));
    }

    #[test]
    fn test_read_input_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "id\n1\n").unwrap();
        assert_eq!(read_input(file.path()).unwrap(), "id\n1\n");
    }
}
