use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::errors::OrderNestError;
use crate::types::FieldName;

/// One cell of a tabular export.
///
/// Absent, NaN, and blank-on-ingest values are all `Missing`, so downstream
/// stages see a single representation for "no value".
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    /// No value.
    #[default]
    Missing,
    /// Raw cell text, untrimmed.
    Text(String),
    /// Numeric value from a programmatic source.
    Number(f64),
}

static MISSING: CellValue = CellValue::Missing;

impl CellValue {
    /// Build a cell from raw text, mapping empty text to `Missing`.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// True for `Missing`, NaN numbers, and text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(value) => value.is_nan(),
        }
    }

    /// String form of the value, or `None` when missing.
    ///
    /// Integral numbers drop their fractional part (`42.0` -> `42`).
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Missing => None,
            CellValue::Text(text) => Some(Cow::Borrowed(text.as_str())),
            CellValue::Number(value) if value.is_nan() => None,
            CellValue::Number(value) => Some(Cow::Owned(format_number(*value))),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// A single row keyed by field name, in column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<FieldName, CellValue>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by tests and programmatic callers.
    pub fn with(mut self, name: impl Into<FieldName>, value: impl Into<CellValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field value, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<FieldName>, value: impl Into<CellValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value of `name`, or `Missing` when the field is absent.
    pub fn get(&self, name: &str) -> &CellValue {
        self.fields.get(name).unwrap_or(&MISSING)
    }

    /// True when the record carries `name` (even if its value is blank).
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered, schema-checked collection of records from one export.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSet {
    name: String,
    columns: Vec<FieldName>,
    rows: Vec<Record>,
}

impl RecordSet {
    /// Build a set from header names and row-major cells.
    ///
    /// Header names are trimmed and must be unique after trimming. Short rows
    /// are padded with `Missing`; cells beyond the header width are dropped.
    pub fn new<H, R>(name: impl Into<String>, headers: H, rows: R) -> Result<Self, OrderNestError>
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator<Item = Vec<CellValue>>,
    {
        let name = name.into();
        let columns = normalize_headers(&name, headers)?;
        let rows = rows
            .into_iter()
            .map(|cells| {
                let mut cells = cells.into_iter();
                let mut record = Record::new();
                for column in &columns {
                    record.insert(column.clone(), cells.next().unwrap_or_default());
                }
                record
            })
            .collect();
        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    /// Build a set from keyed records; the column order follows first appearance.
    pub fn from_records(
        name: impl Into<String>,
        records: impl IntoIterator<Item = Record>,
    ) -> Result<Self, OrderNestError> {
        let name = name.into();
        let records: Vec<Record> = records.into_iter().collect();
        let mut seen = HashSet::new();
        let mut raw_headers = Vec::new();
        for record in &records {
            for (field, _) in record.iter() {
                if seen.insert(field.to_string()) {
                    raw_headers.push(field.to_string());
                }
            }
        }
        let columns = normalize_headers(&name, &raw_headers)?;
        let rows = records
            .iter()
            .map(|record| {
                let mut row = Record::new();
                for (raw, column) in raw_headers.iter().zip(&columns) {
                    row.insert(column.clone(), record.get(raw).clone());
                }
                row
            })
            .collect();
        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    /// Label used in errors and logs (for example `production plan`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed column names in file order.
    pub fn columns(&self) -> &[FieldName] {
        &self.columns
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when `name` is one of the columns.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Column name at `index`, or a configuration error when out of range.
    pub fn column_at(&self, index: usize) -> Result<&str, OrderNestError> {
        self.columns
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| OrderNestError::ColumnOutOfRange {
                table: self.name.clone(),
                index,
                available: self.columns.len(),
            })
    }

    /// Column name `name`, or a configuration error when absent.
    pub fn column_named(&self, name: &str) -> Result<&str, OrderNestError> {
        let trimmed = name.trim();
        self.columns
            .iter()
            .find(|column| column.as_str() == trimmed)
            .map(String::as_str)
            .ok_or_else(|| OrderNestError::MissingColumn {
                table: self.name.clone(),
                column: trimmed.to_string(),
            })
    }
}

fn normalize_headers<H>(table: &str, headers: H) -> Result<Vec<FieldName>, OrderNestError>
where
    H: IntoIterator,
    H::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for header in headers {
        let trimmed = header.as_ref().trim().to_string();
        if !seen.insert(trimmed.clone()) {
            return Err(OrderNestError::DuplicateColumn {
                table: table.to_string(),
                column: trimmed,
            });
        }
        columns.push(trimmed);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection_covers_missing_whitespace_and_nan() {
        assert!(CellValue::Missing.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(CellValue::Number(f64::NAN).is_blank());
        assert!(!CellValue::from("X").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(1042.0).to_string(), "1042");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Missing.to_string(), "");
    }

    #[test]
    fn record_set_trims_headers_and_pads_short_rows() {
        let set = RecordSet::new(
            "orders",
            [" Sales Order ", "Item", "Due Date"],
            vec![vec![CellValue::from("SO1"), CellValue::from("sign")]],
        )
        .unwrap();
        assert_eq!(set.columns(), &["Sales Order", "Item", "Due Date"]);
        let row = &set.rows()[0];
        assert_eq!(row.get("Sales Order"), &CellValue::from("SO1"));
        assert_eq!(row.get("Due Date"), &CellValue::Missing);
        assert!(row.contains("Due Date"));
    }

    #[test]
    fn record_set_rejects_duplicate_headers_after_trim() {
        let err = RecordSet::new("plan", ["Key", " Key"], Vec::<Vec<CellValue>>::new()).unwrap_err();
        assert!(matches!(
            err,
            OrderNestError::DuplicateColumn { column, .. } if column == "Key"
        ));
    }

    #[test]
    fn from_records_unions_columns_in_first_seen_order() {
        let set = RecordSet::from_records(
            "orders",
            vec![
                Record::new().with("Key", "SO1").with("Item", "a"),
                Record::new().with("Key", "SO2").with("Due", "2024-01-01"),
            ],
        )
        .unwrap();
        assert_eq!(set.columns(), &["Key", "Item", "Due"]);
        assert_eq!(set.rows()[0].get("Due"), &CellValue::Missing);
        assert!(set.rows()[0].contains("Due"));
    }

    #[test]
    fn column_lookup_errors_name_the_table() {
        let set = RecordSet::new("plan", ["Key"], Vec::<Vec<CellValue>>::new()).unwrap();
        assert_eq!(set.column_at(0).unwrap(), "Key");
        assert!(matches!(
            set.column_at(9),
            Err(OrderNestError::ColumnOutOfRange { index: 9, available: 1, .. })
        ));
        assert!(matches!(
            set.column_named("Complete"),
            Err(OrderNestError::MissingColumn { table, .. }) if table == "plan"
        ));
    }
}
