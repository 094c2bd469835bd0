//! Projection of planned sections onto display rows.

use serde::Serialize;

use crate::classify::Category;
use crate::constants::display::{
    DUE_DATE_FIELD, MISSING_TEXT_SENTINELS, ORDER_KEY_HEADER, PREFERRED_HEADERS,
};
use crate::data::{CellValue, Record, RecordSet};
use crate::dates::format_due_date;
use crate::planner::Section;
use crate::types::{CellText, FieldName, SectionTitle};

/// Display-ready report: the sole artifact handed to renderers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// Column headers shared by every section table.
    pub headers: Vec<FieldName>,
    /// Sections in display order.
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// True when no section survived.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total rows across all sections.
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|section| section.rows.len()).sum()
    }
}

/// One titled table of the report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportSection {
    /// Title shown in the section's title bar.
    pub title: SectionTitle,
    /// Category the rows were grouped under.
    pub category: Category,
    /// Rows aligned with [`Report::headers`].
    pub rows: Vec<Vec<CellText>>,
}

/// Maps report headers back to the order fields they read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayColumns {
    columns: Vec<(FieldName, FieldName)>,
}

impl DisplayColumns {
    /// Preferred headers present in `orders` once `order_key` is shown as `Sales Order`.
    ///
    /// When the key column is renamed, an order column literally named
    /// `Sales Order` is shadowed by the key.
    pub fn resolve(orders: &RecordSet, order_key: &str) -> Self {
        let columns = PREFERRED_HEADERS
            .iter()
            .filter_map(|header| {
                if *header == ORDER_KEY_HEADER {
                    return Some((header.to_string(), order_key.to_string()));
                }
                if orders.has_column(header) && *header != order_key {
                    return Some((header.to_string(), header.to_string()));
                }
                None
            })
            .collect();
        Self { columns }
    }

    /// Report header row, in display order.
    pub fn headers(&self) -> Vec<FieldName> {
        self.columns.iter().map(|(header, _)| header.clone()).collect()
    }

    /// Project one order row onto display cells.
    pub fn project(&self, record: &Record) -> Vec<CellText> {
        self.columns
            .iter()
            .map(|(header, source)| {
                let value = record.get(source);
                if header == DUE_DATE_FIELD {
                    format_due_date(value)
                } else {
                    display_text(value)
                }
            })
            .collect()
    }
}

/// Display text for a non-date cell: missing and `nan` render as `""`.
pub fn display_text(value: &CellValue) -> CellText {
    match value.as_text() {
        Some(text)
            if MISSING_TEXT_SENTINELS
                .iter()
                .any(|sentinel| text.eq_ignore_ascii_case(sentinel)) =>
        {
            String::new()
        }
        Some(text) => text.into_owned(),
        None => String::new(),
    }
}

/// Build the display report from planned sections.
pub fn build_report(sections: &[Section], columns: &DisplayColumns) -> Report {
    let sections = sections
        .iter()
        .map(|section| ReportSection {
            title: section.title.clone(),
            category: section.category,
            rows: section
                .records
                .iter()
                .map(|record| columns.project(&record.joined.order))
                .collect(),
        })
        .collect();
    Report {
        headers: columns.headers(),
        sections,
    }
}
