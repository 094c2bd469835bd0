#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Rule-based material classification.
pub mod classify;
/// Command-line front end shared by the `order_nest` binary.
pub mod cli;
/// Column selection and rendering configuration.
pub mod config;
/// Centralized constants: markers, patterns, display and layout values.
pub mod constants;
/// Cell, record, and record set types.
pub mod data;
/// Due-date parsing and formatting.
pub mod dates;
/// CSV ingestion.
pub mod ingest;
/// Order key normalization.
pub mod normalize;
/// End-to-end report pipeline.
pub mod pipeline;
/// Section grouping and ordering.
pub mod planner;
/// Sales order / production plan join and completion filter.
pub mod reconcile;
/// Paginated document layout and output back ends.
pub mod render;
/// Report projection (display columns and section rows).
pub mod report;
/// Shared type aliases.
pub mod types;

mod errors;

pub use classify::{Category, ClassificationRule, Classifier};
pub use config::{CompletionColumn, KeyColumn, ReconcileConfig, RenderConfig, ReportConfig};
pub use data::{CellValue, Record, RecordSet};
pub use errors::OrderNestError;
pub use ingest::{load_record_set, parse_record_set};
pub use pipeline::{OrderNest, PipelineOutput, build_order_report};
pub use planner::Section;
pub use reconcile::{ReconcileStats, reconcile};
pub use render::{Document, DocumentRenderer, HtmlRenderer, TextRenderer, layout};
pub use report::{Report, ReportSection};
pub use types::{CategoryId, CellText, FieldName, HexColor, OrderKey, SectionTitle};
