//! CSV ingestion boundary: bytes on disk to an in-memory [`RecordSet`].

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::constants::ingest::{NA_VALUES, UNNAMED_HEADER_PREFIX};
use crate::data::{CellValue, RecordSet};
use crate::errors::OrderNestError;

/// Read and parse a CSV export. See [`parse_record_set`].
pub fn load_record_set(name: &str, path: &Path) -> Result<RecordSet, OrderNestError> {
    let bytes = fs::read(path)?;
    debug!(table = name, path = %path.display(), bytes = bytes.len(), "read csv export");
    parse_record_set(name, &bytes)
}

/// Parse CSV bytes with a header row.
///
/// Bytes that are not valid UTF-8 are decoded as Latin-1. Header names are
/// trimmed and blank ones become `Unnamed: <position>`. Ragged rows are
/// tolerated. Blank cells and the [`NA_VALUES`] spellings become
/// [`CellValue::Missing`].
pub fn parse_record_set(name: &str, bytes: &[u8]) -> Result<RecordSet, OrderNestError> {
    let text = decode_text(name, bytes);
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&*text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, header)| header_name(idx, header))
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_cell).collect::<Vec<_>>());
    }
    debug!(table = name, columns = headers.len(), rows = rows.len(), "parsed csv export");
    RecordSet::new(name, headers, rows)
}

fn decode_text<'a>(name: &str, bytes: &'a [u8]) -> Cow<'a, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(err) => {
            warn!(table = name, error = %err, "csv export is not utf-8; decoding as latin-1");
            Cow::Owned(bytes.iter().map(|&byte| char::from(byte)).collect())
        }
    }
}

fn header_name(idx: usize, raw: &str) -> String {
    if raw.trim().is_empty() {
        format!("{UNNAMED_HEADER_PREFIX}{idx}")
    } else {
        raw.to_string()
    }
}

fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NA_VALUES.iter().any(|na| *na == trimmed) {
        CellValue::Missing
    } else {
        CellValue::Text(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_cells() {
        let set = parse_record_set(
            "orders",
            b" Sales Order ,Item,Due Date\nSO1,sign,2024-03-01\nSO2,,\n",
        )
        .unwrap();
        assert_eq!(set.columns(), &["Sales Order", "Item", "Due Date"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows()[0].get("Item"), &CellValue::from("sign"));
        assert_eq!(set.rows()[1].get("Item"), &CellValue::Missing);
    }

    #[test]
    fn falls_back_to_latin1() {
        let mut bytes = b"Key,Client\nSO1,Caf".to_vec();
        bytes.push(0xE9);
        bytes.push(b'\n');
        let set = parse_record_set("orders", &bytes).unwrap();
        assert_eq!(set.rows()[0].get("Client"), &CellValue::from("Café"));
    }

    #[test]
    fn tolerates_ragged_rows_and_bom() {
        let set = parse_record_set("plan", "\u{FEFF}Key,A,B\nSO1\nSO2,x,y,z\n".as_bytes())
            .unwrap();
        assert_eq!(set.columns()[0], "Key");
        assert_eq!(set.rows()[0].get("B"), &CellValue::Missing);
        assert_eq!(set.rows()[1].get("B"), &CellValue::from("y"));
    }

    #[test]
    fn nan_and_whitespace_cells_are_missing() {
        let set = parse_record_set("plan", b"Key,Done\nSO1,NaN\nSO2,  \nSO3,done\n").unwrap();
        assert_eq!(set.rows()[0].get("Done"), &CellValue::Missing);
        assert_eq!(set.rows()[1].get("Done"), &CellValue::Missing);
        assert_eq!(set.rows()[2].get("Done"), &CellValue::from("done"));
    }

    #[test]
    fn null_spellings_are_missing_but_lookalikes_are_text() {
        let set = parse_record_set(
            "plan",
            b"Key,Done\nSO1,N/A\nSO2,NULL\nSO3,<NA>\nSO4,Na\nSO5,none\n",
        )
        .unwrap();
        let done: Vec<&CellValue> = set.rows().iter().map(|row| row.get("Done")).collect();
        assert_eq!(
            done,
            vec![
                &CellValue::Missing,
                &CellValue::Missing,
                &CellValue::Missing,
                &CellValue::from("Na"),
                &CellValue::from("none"),
            ]
        );
    }

    #[test]
    fn blank_headers_get_positional_names() {
        let set = parse_record_set("production plan", b"Order,Done,,\nSO1,,,x\n").unwrap();
        assert_eq!(set.columns(), &["Order", "Done", "Unnamed: 2", "Unnamed: 3"]);
        assert_eq!(set.rows()[0].get("Unnamed: 3"), &CellValue::from("x"));
        assert_eq!(set.column_at(3).unwrap(), "Unnamed: 3");
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = parse_record_set("plan", b"Key, Key\n1,2\n").unwrap_err();
        assert!(matches!(err, OrderNestError::DuplicateColumn { .. }));
    }
}
