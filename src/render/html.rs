use std::fmt::Write as _;

use super::{Block, Document, DocumentRenderer, TableBlock};
use crate::constants::render::{
    PAGE_HEIGHT_IN, PAGE_WIDTH_IN, SIDE_MARGIN_IN, VERTICAL_MARGIN_IN,
};

/// Self-contained, print-ready HTML (US letter, CSS page breaks).
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

impl DocumentRenderer for HtmlRenderer {
    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, document: &Document) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape(&document.title));
        out.push_str("<style>\n");
        let _ = writeln!(
            out,
            "@page {{ size: {PAGE_WIDTH_IN}in {PAGE_HEIGHT_IN}in; margin: {VERTICAL_MARGIN_IN}in {SIDE_MARGIN_IN}in; }}"
        );
        out.push_str(STYLESHEET);
        out.push_str("</style>\n</head>\n<body>\n");

        for block in &document.blocks {
            render_block(&mut out, block);
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

const STYLESHEET: &str = "\
body { font-family: Helvetica, Arial, sans-serif; color: #111827; }
.cover-title { font-size: 36pt; line-height: 42pt; text-align: center; margin-bottom: 12pt; }
.cover-date { font-size: 12pt; line-height: 14pt; text-align: center; color: #555555; margin-bottom: 6pt; }
.placeholder { font-size: 12pt; text-align: center; color: #555555; }
.title-bar { margin: 0 auto; padding: 6pt; color: #ffffff; font-size: 12pt; line-height: 14pt; font-weight: bold; }
table.section { margin: 0 auto; border-collapse: collapse; table-layout: fixed; border: 0.6pt solid #6B7280; }
table.section th { color: #ffffff; font-size: 9pt; line-height: 11pt; text-align: left; vertical-align: top; padding: 3pt 5pt; border: 0.25pt solid #9CA3AF; }
table.section td { font-size: 7pt; line-height: 9pt; text-align: left; vertical-align: top; padding: 3pt 5pt; border: 0.25pt solid #9CA3AF; word-wrap: break-word; }
table.section tr.even td { background: #F5F5F5; }
table.section tr.odd td { background: #FFFFFF; }
.page-break { page-break-after: always; break-after: page; }
";

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Spacer { height_in } => {
            let _ = writeln!(out, "<div style=\"height: {height_in}in\"></div>");
        }
        Block::Cover { title, date } => {
            let _ = writeln!(out, "<h1 class=\"cover-title\">{}</h1>", escape(title));
            let _ = writeln!(out, "<p class=\"cover-date\">{}</p>", escape(date));
        }
        Block::TitleBar {
            text,
            color,
            width_in,
        } => {
            let _ = writeln!(
                out,
                "<div class=\"title-bar\" style=\"background: {}; width: {width_in}in\">{}</div>",
                escape(color),
                escape(text)
            );
        }
        Block::Table(table) => render_table(out, table),
        Block::Placeholder(text) => {
            let _ = writeln!(out, "<p class=\"placeholder\">{}</p>", escape(text));
        }
        Block::PageBreak => out.push_str("<div class=\"page-break\"></div>\n"),
    }
}

fn render_table(out: &mut String, table: &TableBlock) {
    let _ = writeln!(
        out,
        "<table class=\"section\" style=\"width: {}in\">",
        table.total_width_in()
    );
    out.push_str("<colgroup>");
    for width in &table.column_widths_in {
        let _ = write!(out, "<col style=\"width: {width}in\">");
    }
    out.push_str("</colgroup>\n");

    let _ = write!(
        out,
        "<thead><tr style=\"background: {}\">",
        escape(&table.header_color)
    );
    for header in &table.headers {
        let _ = write!(out, "<th>{}</th>", escape(header));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    // Row 1 is the first body row; even-numbered rows are shaded.
    for (idx, row) in table.rows.iter().enumerate() {
        let class = if (idx + 1) % 2 == 0 { "even" } else { "odd" };
        let _ = write!(out, "<tr class=\"{class}\">");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

/// Minimal HTML escaping for text and attribute values.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document {
            title: "Order Nest".to_string(),
            blocks: vec![
                Block::Cover {
                    title: "Order Nest".to_string(),
                    date: "March 01, 2024".to_string(),
                },
                Block::PageBreak,
                Block::TitleBar {
                    text: "Roll Up".to_string(),
                    color: "#2563EB".to_string(),
                    width_in: 1.8,
                },
                Block::Table(TableBlock {
                    headers: vec!["Sales Order".to_string(), "Item".to_string()],
                    column_widths_in: vec![0.9, 1.9],
                    header_color: "#2563EB".to_string(),
                    rows: vec![
                        vec!["SO1".to_string(), "<b>roll up</b> & stand".to_string()],
                        vec!["SO2".to_string(), String::new()],
                    ],
                }),
                Block::PageBreak,
            ],
        }
    }

    #[test]
    fn renders_sections_with_escaped_cells() {
        let html = HtmlRenderer.render(&document());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1 class=\"cover-title\">Order Nest</h1>"));
        assert!(html.contains("background: #2563EB; width: 1.8in\">Roll Up</div>"));
        assert!(html.contains("<th>Sales Order</th><th>Item</th>"));
        assert!(html.contains("<td>&lt;b&gt;roll up&lt;/b&gt; &amp; stand</td>"));
        assert!(html.contains("<tr class=\"odd\"><td>SO1</td>"));
        assert!(html.contains("<tr class=\"even\"><td>SO2</td><td></td></tr>"));
        assert_eq!(html.matches("class=\"page-break\"").count(), 2);
    }

    #[test]
    fn extension_is_html() {
        assert_eq!(HtmlRenderer.file_extension(), "html");
    }
}
