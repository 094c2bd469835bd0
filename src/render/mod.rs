//! Paginated document model and renderers.
//!
//! [`layout`] turns a [`Report`] into a flat sequence of [`Block`]s (cover,
//! title bars, tables, page breaks). Back ends implementing
//! [`DocumentRenderer`] turn that sequence into bytes.

use chrono::Local;

use crate::config::RenderConfig;
use crate::constants::render::{
    COLUMN_WIDTHS_IN, COVER_DATE_FORMAT, COVER_TOP_SPACE_IN, DEFAULT_COLUMN_WIDTH_IN,
    EMPTY_PLACEHOLDER, TITLE_BAR_GAP_IN,
};
use crate::errors::OrderNestError;
use crate::report::Report;
use crate::types::{CellText, FieldName, HexColor};

mod html;
mod text;

pub use html::HtmlRenderer;
pub use text::TextRenderer;

/// A laid-out document ready for a back end.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// Document title (HTML `<title>`).
    pub title: String,
    /// Flowables in reading order.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Number of pages implied by the page breaks.
    pub fn page_count(&self) -> usize {
        let breaks = self
            .blocks
            .iter()
            .filter(|block| matches!(block, Block::PageBreak))
            .count();
        match self.blocks.last() {
            Some(Block::PageBreak) => breaks,
            Some(_) => breaks + 1,
            None => 0,
        }
    }
}

/// One flowable element of a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Vertical whitespace.
    Spacer {
        /// Height in inches.
        height_in: f32,
    },
    /// Cover title and date line.
    Cover {
        /// Report title.
        title: String,
        /// Formatted report date.
        date: String,
    },
    /// Coloured full-width bar carrying a section title.
    TitleBar {
        /// Section title.
        text: String,
        /// Bar background.
        color: HexColor,
        /// Bar width in inches (the table width).
        width_in: f32,
    },
    /// One section table.
    Table(TableBlock),
    /// Centered note shown when the report has no sections.
    Placeholder(String),
    /// Start a new page.
    PageBreak,
}

/// A section table with a coloured header row.
#[derive(Clone, Debug, PartialEq)]
pub struct TableBlock {
    /// Header row.
    pub headers: Vec<FieldName>,
    /// Column widths in inches, aligned with `headers`.
    pub column_widths_in: Vec<f32>,
    /// Header row background.
    pub header_color: HexColor,
    /// Body rows aligned with `headers`.
    pub rows: Vec<Vec<CellText>>,
}

impl TableBlock {
    /// Sum of the column widths.
    pub fn total_width_in(&self) -> f32 {
        self.column_widths_in.iter().sum()
    }
}

/// Output back end for a laid-out [`Document`].
pub trait DocumentRenderer {
    /// File extension (without the dot) for rendered output.
    fn file_extension(&self) -> &'static str;
    /// Render the whole document.
    fn render(&self, document: &Document) -> String;
}

/// Column width in inches for a report header.
pub fn column_width_in(header: &str) -> f32 {
    COLUMN_WIDTHS_IN
        .iter()
        .find(|(name, _)| *name == header)
        .map_or(DEFAULT_COLUMN_WIDTH_IN, |(_, width)| *width)
}

/// Lay out `report` as cover page, one page per section, and a placeholder
/// when there are no sections. Section colours cycle through the palette.
pub fn layout(report: &Report, config: &RenderConfig) -> Result<Document, OrderNestError> {
    let config = config.clone().validated()?;
    let date = config
        .report_date
        .unwrap_or_else(|| Local::now().date_naive())
        .format(COVER_DATE_FORMAT)
        .to_string();

    let mut blocks = vec![
        Block::Spacer {
            height_in: COVER_TOP_SPACE_IN,
        },
        Block::Cover {
            title: config.title.to_string(),
            date,
        },
        Block::PageBreak,
    ];

    let column_widths_in: Vec<f32> = report
        .headers
        .iter()
        .map(|header| column_width_in(header))
        .collect();
    let total_width_in: f32 = column_widths_in.iter().sum();

    for (idx, section) in report.sections.iter().enumerate() {
        let color = config.palette[idx % config.palette.len()].to_string();
        blocks.push(Block::TitleBar {
            text: section.title.clone(),
            color: color.clone(),
            width_in: total_width_in,
        });
        blocks.push(Block::Spacer {
            height_in: TITLE_BAR_GAP_IN,
        });
        blocks.push(Block::Table(TableBlock {
            headers: report.headers.clone(),
            column_widths_in: column_widths_in.clone(),
            header_color: color,
            rows: section.rows.clone(),
        }));
        blocks.push(Block::PageBreak);
    }

    if report.is_empty() {
        blocks.push(Block::Placeholder(EMPTY_PLACEHOLDER.to_string()));
    }

    Ok(Document {
        title: config.title.to_string(),
        blocks,
    })
}
