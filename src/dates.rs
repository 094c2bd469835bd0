use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::dates::{DATE_FORMATS, DATETIME_FORMATS};
use crate::constants::display::DUE_DATE_DISPLAY_FORMAT;
use crate::data::CellValue;

/// Comparable due-date key. `Undated` orders after every date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DueKey {
    /// A parsed due date.
    Dated(NaiveDate),
    /// Blank or unparsable due date.
    Undated,
}

impl DueKey {
    /// Sort key for a raw due-date cell.
    pub fn from_cell(value: &CellValue) -> Self {
        parse_due_date(value).map_or(DueKey::Undated, DueKey::Dated)
    }

    /// The parsed date, if any.
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            DueKey::Dated(date) => Some(date),
            DueKey::Undated => None,
        }
    }
}

/// Parse a due-date cell. Returns `None` for blank or unrecognized values.
pub fn parse_due_date(value: &CellValue) -> Option<NaiveDate> {
    let text = value.as_text()?;
    parse_date_str(&text)
}

/// Parse a date string in any of the accepted export formats.
///
/// Date-only formats are tried first, then date-time formats whose time part
/// is dropped. Surrounding whitespace is ignored.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Display form of a due-date cell (`MM/DD/YY`), or `""` when unparsable.
pub fn format_due_date(value: &CellValue) -> String {
    parse_due_date(value)
        .map(|date| date.format(DUE_DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}
