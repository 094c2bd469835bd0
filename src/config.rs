use std::borrow::Cow;

use chrono::NaiveDate;

use crate::constants::reconcile::DEFAULT_COMPLETION_COLUMN_INDEX;
use crate::constants::render::{DEFAULT_TITLE, VIBRANT_PALETTE};
use crate::data::RecordSet;
use crate::errors::OrderNestError;

/// Selects the order-key column in the sales export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyColumn {
    /// Use the first column.
    First,
    /// Use the column with this (trimmed) name.
    Named(String),
}

/// Selects the completion-marker column in the production plan.
///
/// Positional and named selection are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionColumn {
    /// Zero-based column position.
    Position(usize),
    /// Column name.
    Named(String),
}

impl KeyColumn {
    /// Resolve to a concrete column name in `set`.
    pub fn resolve<'a>(&self, set: &'a RecordSet) -> Result<&'a str, OrderNestError> {
        match self {
            KeyColumn::First => set.column_at(0),
            KeyColumn::Named(name) => set.column_named(name),
        }
    }
}

impl CompletionColumn {
    /// Resolve to a concrete column name in `set`.
    pub fn resolve<'a>(&self, set: &'a RecordSet) -> Result<&'a str, OrderNestError> {
        match self {
            CompletionColumn::Position(index) => set.column_at(*index),
            CompletionColumn::Named(name) => set.column_named(name),
        }
    }
}

/// Column selection for reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Order-key column in the sales export.
    pub order_key: KeyColumn,
    /// Completion-marker column in the production plan.
    pub completion: CompletionColumn,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            order_key: KeyColumn::First,
            completion: CompletionColumn::Position(DEFAULT_COMPLETION_COLUMN_INDEX),
        }
    }
}

/// Presentation settings for the rendered document.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Cover title.
    pub title: Cow<'static, str>,
    /// Cover date; `None` uses the local date at render time.
    pub report_date: Option<NaiveDate>,
    /// Section colours, cycled in section order.
    pub palette: Vec<Cow<'static, str>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: Cow::Borrowed(DEFAULT_TITLE),
            report_date: None,
            palette: VIBRANT_PALETTE.iter().map(|c| Cow::Borrowed(*c)).collect(),
        }
    }
}

impl RenderConfig {
    /// Reject palettes the renderer cannot cycle through.
    pub fn validated(self) -> Result<Self, OrderNestError> {
        if self.palette.is_empty() {
            return Err(OrderNestError::Configuration(
                "render palette must contain at least one colour".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Top-level configuration for one report run.
#[derive(Clone, Debug, Default)]
pub struct ReportConfig {
    /// Column selection for reconciliation.
    pub reconcile: ReconcileConfig,
    /// Presentation settings.
    pub render: RenderConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellValue;

    fn plan() -> RecordSet {
        RecordSet::new(
            "plan",
            ["Order", "Graphics Completed"],
            Vec::<Vec<CellValue>>::new(),
        )
        .unwrap()
    }

    #[test]
    fn default_selects_first_key_and_tenth_plan_column() {
        let config = ReconcileConfig::default();
        assert_eq!(config.order_key, KeyColumn::First);
        assert_eq!(config.completion, CompletionColumn::Position(9));
    }

    #[test]
    fn completion_selector_resolves_by_position_or_name() {
        let plan = plan();
        assert_eq!(
            CompletionColumn::Position(1).resolve(&plan).unwrap(),
            "Graphics Completed"
        );
        assert_eq!(
            CompletionColumn::Named(" Graphics Completed ".into())
                .resolve(&plan)
                .unwrap(),
            "Graphics Completed"
        );
        assert!(matches!(
            CompletionColumn::Position(9).resolve(&plan),
            Err(OrderNestError::ColumnOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn empty_palette_is_rejected() {
        let config = RenderConfig {
            palette: Vec::new(),
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(OrderNestError::Configuration(msg)) if msg.contains("palette")
        ));
    }
}
