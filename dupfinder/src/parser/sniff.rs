//! Header sniffing on a bounded sample of the input.
//!
//! Two passes over the sample:
//!
//! 1. **Dialect** - guess the quote character and delimiter. Quoted fields
//!    are the strongest signal; without them the delimiter is the character
//!    whose per-line count is the most consistent.
//! 2. **Header** - read the first rows with that dialect and compare each
//!    cell of row 1 against what the rest of its column looks like
//!    (numeric, or a fixed length). Row 1 is a header when most comparable
//!    columns disagree with it.
//!
//! ```text
//! id,name        <- "id" is not numeric while 1, 2, 1 are  -> +1
//! 1,Alice           name lengths vary (5, 3, 5)            -> ignored
//! 2,Bob
//! 1,Carol        score 1 > 0  => header present
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{SniffError, SniffResult};

/// Number of characters of the input handed to the sniffer.
pub const SAMPLE_CHARS: usize = 2048;

/// Rows after the first one inspected by the header heuristic, counting
/// rows skipped for a field-count mismatch.
const MAX_CHECKED_ROWS: usize = 21;

/// Lines per frequency chunk when guessing the delimiter.
const CHUNK_LINES: usize = 10;

/// Characters considered as delimiter candidates (7-bit ASCII minus DEL).
const ASCII_RANGE: usize = 127;

/// Minimum share of lines (percent) that must agree on a delimiter count.
const MIN_CONSISTENCY: usize = 90;

/// Tie-break order when several delimiters are equally consistent.
const PREFERRED_DELIMITERS: [char; 5] = [',', '\t', ';', ' ', ':'];

const QUOTE_CHARS: [char; 2] = ['"', '\''];

// =============================================================================
// Dialect
// =============================================================================

/// CSV dialect inferred from the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: char,
    pub quote: char,
    /// Whitespace after a delimiter is not part of the field.
    pub skip_initial_space: bool,
}

/// Outcome of header detection.
#[derive(Debug)]
pub enum HeaderVerdict {
    /// Row 1 looks like column names.
    Present,
    /// Row 1 looks like data.
    Absent,
    /// No verdict could be reached; callers assume a header.
    Ambiguous(SniffError),
}

/// Decide whether the first row of `sample` is a header.
pub fn detect_header(sample: &str) -> HeaderVerdict {
    match has_header(sample) {
        Ok(true) => HeaderVerdict::Present,
        Ok(false) => HeaderVerdict::Absent,
        Err(e) => HeaderVerdict::Ambiguous(e),
    }
}

/// Guess the dialect of `sample`.
pub fn sniff_dialect(sample: &str) -> SniffResult<Dialect> {
    let (quote, delimiter, skip_initial_space) = match guess_quote_and_delimiter(sample) {
        Some(QuoteGuess {
            quote,
            delimiter: Some(d),
            skip_initial_space,
        }) => (quote, d, skip_initial_space),
        Some(QuoteGuess { quote, .. }) => {
            let (d, skip) = guess_delimiter(sample).ok_or(SniffError::NoDelimiter)?;
            (quote, d, skip)
        }
        None => {
            let (d, skip) = guess_delimiter(sample).ok_or(SniffError::NoDelimiter)?;
            ('"', d, skip)
        }
    };

    Ok(Dialect {
        delimiter,
        quote,
        skip_initial_space,
    })
}

// =============================================================================
// Quote-based guess
// =============================================================================

struct QuoteGuess {
    quote: char,
    delimiter: Option<char>,
    skip_initial_space: bool,
}

/// Shapes of a quoted field, tried in order until one matches:
///
/// - `,".*?",` - between two delimiters
/// - `^".*?",` - at line start
/// - `,".*?"$` - at line end
/// - `^".*?"$` - a whole line
///
/// The first shape needs the same delimiter on both sides; that is checked
/// on the captures since the regex engine has no backreferences.
static QUOTE_PATTERNS: Lazy<Vec<Vec<(char, Regex)>>> = Lazy::new(|| {
    let shapes = [
        r#"(?s)(?P<delim>[^\w\n"'])(?P<space> ?)Q.*?Q(?P<close>[^\w\n"'])"#,
        r#"(?sm)(?:^|\n)Q.*?Q(?P<delim>[^\w\n"'])(?P<space> ?)"#,
        r#"(?sm)(?P<delim>[^\w\n"'])(?P<space> ?)Q.*?Q(?:$|\n)"#,
        r#"(?sm)(?:^|\n)Q.*?Q(?:$|\n)"#,
    ];

    shapes
        .iter()
        .map(|shape| {
            QUOTE_CHARS
                .iter()
                .filter_map(|&q| {
                    Regex::new(&shape.replace('Q', &regex::escape(&q.to_string())))
                        .ok()
                        .map(|re| (q, re))
                })
                .collect()
        })
        .collect()
});

fn guess_quote_and_delimiter(sample: &str) -> Option<QuoteGuess> {
    let mut quotes: Vec<(char, usize)> = Vec::new();
    let mut delims: Vec<(char, usize)> = Vec::new();
    let mut spaces = 0;

    for shape in QUOTE_PATTERNS.iter() {
        for (quote, re) in shape {
            for caps in re.captures_iter(sample) {
                let delim = caps.name("delim").and_then(|m| m.as_str().chars().next());
                if let (Some(d), Some(close)) = (delim, caps.name("close")) {
                    if !close.as_str().starts_with(d) {
                        continue;
                    }
                }

                bump(&mut quotes, *quote);
                if let Some(d) = delim {
                    bump(&mut delims, d);
                    if caps.name("space").is_some_and(|m| !m.as_str().is_empty()) {
                        spaces += 1;
                    }
                }
            }
        }
        if !quotes.is_empty() {
            break;
        }
    }

    let quote = most_frequent(&quotes)?;
    let guess = match most_frequent(&delims) {
        Some(d) => {
            let count = delims.iter().find(|(c, _)| *c == d).map_or(0, |(_, n)| *n);
            QuoteGuess {
                quote,
                delimiter: Some(d),
                skip_initial_space: count == spaces,
            }
        }
        // Quoted values with no delimiter around them: a single column.
        None => QuoteGuess {
            quote,
            delimiter: None,
            skip_initial_space: false,
        },
    };
    Some(guess)
}

fn bump(counts: &mut Vec<(char, usize)>, key: char) {
    match counts.iter_mut().find(|(c, _)| *c == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key, 1)),
    }
}

/// Highest count wins; ties go to the first key seen.
fn most_frequent(counts: &[(char, usize)]) -> Option<char> {
    counts
        .iter()
        .fold(None::<(char, usize)>, |best, &(c, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((c, n)),
        })
        .map(|(c, _)| c)
}

// =============================================================================
// Frequency-based guess
// =============================================================================

/// Mode of a character's per-line count: `(count per line, lines agreeing)`,
/// where disagreeing lines are subtracted from the agreement.
type Mode = (usize, isize);

fn guess_delimiter(sample: &str) -> Option<(char, bool)> {
    let lines: Vec<&str> = sample
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.is_empty())
        .collect();
    let chunk = lines.len().min(CHUNK_LINES);

    // Per character: (count per line, number of lines), in first-seen order.
    let mut frequencies: Vec<Vec<(usize, usize)>> = vec![Vec::new(); ASCII_RANGE];
    let mut modes: Vec<Option<Mode>> = vec![None; ASCII_RANGE];
    let mut delims: Vec<(char, Mode)> = Vec::new();

    let mut start = 0;
    let mut iteration = 0;
    while start < lines.len() {
        iteration += 1;
        let end = (start + chunk).min(lines.len());

        for line in &lines[start..end] {
            let mut counts = [0usize; ASCII_RANGE];
            for b in line.bytes() {
                if let Some(n) = counts.get_mut(b as usize) {
                    *n += 1;
                }
            }
            for (freq, &count) in frequencies.iter_mut().zip(counts.iter()) {
                match freq.iter_mut().find(|(c, _)| *c == count) {
                    Some((_, seen)) => *seen += 1,
                    None => freq.push((count, 1)),
                }
            }
        }

        for (mode, freq) in modes.iter_mut().zip(frequencies.iter()) {
            if freq.len() == 1 && freq[0].0 == 0 {
                continue;
            }
            *mode = frequency_mode(freq);
        }

        let total = (chunk * iteration).min(lines.len());
        let mut consistency = 100;
        while delims.is_empty() && consistency >= MIN_CONSISTENCY {
            for (code, mode) in modes.iter().enumerate() {
                if let Some((count, agreeing)) = *mode {
                    if count > 0
                        && agreeing > 0
                        && agreeing as usize * 100 >= consistency * total
                    {
                        delims.push((char::from(code as u8), (count, agreeing)));
                    }
                }
            }
            consistency -= 1;
        }

        if let [(delim, _)] = delims.as_slice() {
            return Some((*delim, skips_initial_space(lines[0], *delim)));
        }

        start = end;
    }

    if delims.is_empty() {
        return None;
    }

    if let Some(&d) = PREFERRED_DELIMITERS
        .iter()
        .find(|d| delims.iter().any(|(c, _)| c == *d))
    {
        return Some((d, skips_initial_space(lines[0], d)));
    }

    let (delim, _) = delims
        .iter()
        .max_by_key(|(c, mode)| (*mode, *c))
        .copied()?;
    Some((delim, skips_initial_space(lines[0], delim)))
}

fn frequency_mode(freq: &[(usize, usize)]) -> Option<Mode> {
    let (pos, &(count, lines)) = freq
        .iter()
        .enumerate()
        .fold(None::<(usize, &(usize, usize))>, |best, (i, item)| match best {
            Some((_, b)) if b.1 >= item.1 => best,
            _ => Some((i, item)),
        })?;
    let others: usize = freq
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != pos)
        .map(|(_, (_, n))| *n)
        .sum();
    Some((count, lines as isize - others as isize))
}

/// Every delimiter on the first line is followed by a space.
fn skips_initial_space(first_line: &str, delim: char) -> bool {
    let spaced = format!("{} ", delim);
    first_line.matches(delim).count() == first_line.matches(spaced.as_str()).count()
}

// =============================================================================
// Header heuristic
// =============================================================================

/// What a column looks like below the first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    /// Parses as a (possibly complex) number.
    Numeric,
    /// Anything else, characterised by its length in characters.
    Length(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnState {
    Unseen,
    Consistent(CellKind),
    Mixed,
}

/// Decide whether row 1 of `sample` is a header.
pub fn has_header(sample: &str) -> SniffResult<bool> {
    let dialect = sniff_dialect(sample)?;
    let mut rows = read_rows(sample, &dialect)?.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| SniffError::Sample("no rows in sample".to_string()))?;

    let mut columns = vec![ColumnState::Unseen; header.len()];
    for row in rows.take(MAX_CHECKED_ROWS) {
        if row.len() != header.len() {
            continue;
        }
        for (state, cell) in columns.iter_mut().zip(row.iter()) {
            let kind = classify_cell(cell);
            *state = match *state {
                ColumnState::Unseen => ColumnState::Consistent(kind),
                ColumnState::Consistent(k) if k == kind => ColumnState::Consistent(k),
                _ => ColumnState::Mixed,
            };
        }
    }

    let score: isize = columns
        .iter()
        .zip(header.iter())
        .map(|(state, name)| match state {
            // Nothing to compare against: the header cell stands out.
            ColumnState::Unseen => 1,
            ColumnState::Consistent(CellKind::Numeric) if is_numeric_literal(name) => -1,
            ColumnState::Consistent(CellKind::Length(n)) if name.chars().count() == *n => -1,
            ColumnState::Consistent(_) => 1,
            ColumnState::Mixed => 0,
        })
        .sum();

    Ok(score > 0)
}

fn classify_cell(cell: &str) -> CellKind {
    if is_numeric_literal(cell) {
        CellKind::Numeric
    } else {
        CellKind::Length(cell.chars().count())
    }
}

/// Real, imaginary or complex literal, optionally parenthesised:
/// `7`, ` -1.5e3 `, `inf`, `2j`, `(1+2j)`.
static NUMERIC_LITERAL: Lazy<Option<Regex>> = Lazy::new(|| {
    let digits = r"\d(?:_?\d)*";
    let real = format!(
        r"(?:(?:{d}\.(?:{d})?|\.{d}|{d})(?:[eE][+-]?{d})?|(?i:inf(?:inity)?|nan))",
        d = digits
    );
    let complex = format!(r"[+-]?(?:{r}(?:[+-](?:{r})?[jJ])?|(?:{r})?[jJ])", r = real);
    Regex::new(&format!(r"^\s*(?:\(\s*{c}\s*\)|{c})\s*$", c = complex)).ok()
});

fn is_numeric_literal(cell: &str) -> bool {
    match &*NUMERIC_LITERAL {
        Some(re) => re.is_match(cell),
        None => false,
    }
}

fn read_rows(sample: &str, dialect: &Dialect) -> SniffResult<Vec<Vec<String>>> {
    let delimiter = ascii_byte(dialect.delimiter)?;
    let quote = ascii_byte(dialect.quote)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .quote(quote)
        .from_reader(sample.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| SniffError::Sample(e.to_string()))?;
        let row = record
            .iter()
            .map(|field| {
                if dialect.skip_initial_space {
                    field.trim_start_matches(' ').to_string()
                } else {
                    field.to_string()
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn ascii_byte(c: char) -> SniffResult<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(SniffError::UnsupportedDelimiter(c))
}
