//! CSV file reading with a single-byte encoding fallback.

use std::fmt;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{UTF_8, WINDOWS_1252};
use nibrs_model::{CleanTable, RawTable, RawValue};
use nibrs_normalize::normalize_table;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

use super::header::read_headers;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Cell values read as missing, matched exactly.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Encoding a source was successfully decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1252,
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Windows1252 => write!(f, "windows-1252"),
        }
    }
}

/// Why a byte buffer could not be turned into a raw table.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is not valid UTF-8")]
    NotUtf8,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("record {record} has {found} fields but the header has {expected}")]
    Ragged {
        record: usize,
        expected: usize,
        found: usize,
    },
}

/// Parses CSV bytes, first as UTF-8 and then once more as Windows-1252.
///
/// The error of the second attempt is returned when both fail.
pub fn parse_raw_table(
    bytes: &[u8],
) -> std::result::Result<(RawTable, SourceEncoding), ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let first_attempt = match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => parse_text(&text),
        None => Err(ParseError::NotUtf8),
    };
    match first_attempt {
        Ok(table) => return Ok((table, SourceEncoding::Utf8)),
        Err(error) => debug!(%error, "UTF-8 parse failed, retrying as windows-1252"),
    }

    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    let table = parse_text(&text)?;
    Ok((table, SourceEncoding::Windows1252))
}

fn parse_text(text: &str) -> std::result::Result<RawTable, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers = match records.next() {
        Some(record) => read_headers(&record?),
        None => return Ok(RawTable::empty()),
    };
    let width = headers.len();

    let mut raw_rows: Vec<StringRecord> = Vec::new();
    for (record_index, record) in records.enumerate() {
        let record = record?;
        if record.len() > width {
            return Err(ParseError::Ragged {
                record: record_index + 1,
                expected: width,
                found: record.len(),
            });
        }
        raw_rows.push(record);
    }

    let numeric: Vec<bool> = (0..width)
        .map(|column| is_number_column(&raw_rows, column))
        .collect();

    let rows = raw_rows
        .iter()
        .map(|record| {
            (0..width)
                .map(|column| typed_cell(record.get(column), numeric[column]))
                .collect()
        })
        .collect();
    Ok(RawTable::new(headers, rows))
}

fn is_null_token(cell: &str) -> bool {
    NULL_TOKENS.contains(&cell)
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// A column reads as numbers when it has values and every one parses.
fn is_number_column(rows: &[StringRecord], column: usize) -> bool {
    let mut values = rows
        .iter()
        .filter_map(|record| record.get(column))
        .filter(|cell| !is_null_token(cell))
        .peekable();
    values.peek().is_some() && values.all(|cell| parse_number(cell).is_some())
}

fn typed_cell(cell: Option<&str>, numeric: bool) -> RawValue {
    match cell {
        None => RawValue::Null,
        Some(cell) if is_null_token(cell) => RawValue::Null,
        Some(cell) if numeric => parse_number(cell).map_or(RawValue::Null, RawValue::Number),
        Some(cell) => RawValue::from(cell),
    }
}

/// Reads a CSV file into a raw table.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let (table, encoding) = parse_raw_table(&bytes).map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(
        path = %path.display(),
        %encoding,
        rows = table.row_count(),
        columns = table.column_count(),
        "read CSV"
    );
    Ok(table)
}

/// Reads and normalizes a CSV file.
///
/// A missing or unreadable source is logged and yields an empty table, so
/// callers can always render something.
pub fn load_clean_table(path: &Path) -> CleanTable {
    match read_raw_table(path) {
        Ok(raw) => normalize_table(&raw),
        Err(error) => {
            warn!(path = %path.display(), %error, "source unavailable, using empty table");
            CleanTable::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> RawTable {
        parse_raw_table(text.as_bytes()).unwrap().0
    }

    #[test]
    fn test_numeric_column_inference() {
        let table = parse("State,Total\nOhio,12\nIowa,3.5\n");
        assert_eq!(table.cell(0, 0), &RawValue::from("Ohio"));
        assert_eq!(table.cell(0, 1), &RawValue::Number(12.0));
        assert_eq!(table.cell(1, 1), &RawValue::Number(3.5));
    }

    #[test]
    fn test_thousands_separators_stay_text() {
        let table = parse("Population\n\"1,234\"\n56\n");
        assert!(table.is_text_column(0));
        assert_eq!(table.cell(1, 0), &RawValue::from("56"));
    }

    #[test]
    fn test_null_tokens() {
        let table = parse("A,B\nNA,x\n,y\n3,N/A\n");
        assert_eq!(table.cell(0, 0), &RawValue::Null);
        assert_eq!(table.cell(1, 0), &RawValue::Null);
        assert_eq!(table.cell(2, 0), &RawValue::Number(3.0));
        assert_eq!(table.cell(2, 1), &RawValue::Null);
    }

    #[test]
    fn test_all_null_column_is_not_text() {
        let table = parse("A,B\n,x\n,y\n");
        assert!(!table.is_text_column(0));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse("A,B,C\n1,2\n");
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.cell(0, 2), &RawValue::Null);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = parse_raw_table(b"A,B\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Ragged {
                record: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = parse("A\n1\n\n2\n");
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let (table, encoding) = parse_raw_table(b"").unwrap();
        assert!(table.is_empty());
        assert_eq!(encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_utf8_bom() {
        let (table, encoding) = parse_raw_table(b"\xEF\xBB\xBFState\nOhio\n").unwrap();
        assert_eq!(table.headers, vec!["State"]);
        assert_eq!(encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let (table, encoding) = parse_raw_table(b"Caf\xe9,Total\nA,1\n").unwrap();
        assert_eq!(encoding, SourceEncoding::Windows1252);
        assert_eq!(table.headers[0], "Caf\u{e9}");
    }

    #[test]
    fn test_mojibake_minus_survives_fallback() {
        // U+2212 as UTF-8 next to a stray 0x96 byte forces the fallback.
        let (table, _) = parse_raw_table(b"10\xe2\x88\x9215,x\x96\n1,2\n").unwrap();
        assert_eq!(table.headers[0], "10\u{e2}\u{2c6}\u{2019}15");
    }

    #[test]
    fn test_whitespace_header_keeps_its_column() {
        let table = parse("State, ,Total\nOhio,Cities,2\n");
        assert_eq!(table.headers, vec!["State", " ", "Total"]);
        assert_eq!(table.cell(0, 1), &RawValue::from("Cities"));

        let clean = normalize_table(&table);
        assert_eq!(clean.labels().collect::<Vec<_>>(), vec!["State", "", "Total"]);
    }

    #[test]
    fn test_repeated_headers_are_suffixed() {
        let table = parse("State,Total,Total\nOhio,1,2\n");
        assert_eq!(table.headers, vec!["State", "Total", "Total.1"]);

        let clean = normalize_table(&table);
        assert_eq!(clean.numeric_labels(), vec!["Total", "Total.1"]);
    }

    #[test]
    fn test_quoted_line_breaks_in_header() {
        let table = parse("\"Victims\nAge\",Total\n1,2\n");
        assert_eq!(table.headers[0], "Victims\nAge");
    }
}
