use super::{Block, Document, DocumentRenderer, TableBlock};
use crate::constants::render::{TEXT_CHARS_PER_INCH, TEXT_PAGE_BREAK};

/// Fixed-width plain-text output; pages are separated by form feeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextRenderer;

impl DocumentRenderer for TextRenderer {
    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &Document) -> String {
        let mut out = String::new();
        for block in &document.blocks {
            match block {
                Block::Spacer { height_in } => {
                    let lines = (*height_in * 2.0).round() as usize;
                    out.push_str(&"\n".repeat(lines.max(1)));
                }
                Block::Cover { title, date } => {
                    out.push_str(title);
                    out.push('\n');
                    out.push_str(date);
                    out.push('\n');
                }
                Block::TitleBar { text, width_in, .. } => {
                    let width = chars_for(*width_in).max(text.chars().count() + 4);
                    out.push_str(&"=".repeat(width));
                    out.push('\n');
                    out.push_str("  ");
                    out.push_str(text);
                    out.push('\n');
                    out.push_str(&"=".repeat(width));
                    out.push('\n');
                }
                Block::Table(table) => render_table(&mut out, table),
                Block::Placeholder(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::PageBreak => out.push_str(TEXT_PAGE_BREAK),
            }
        }
        out
    }
}

fn chars_for(width_in: f32) -> usize {
    (width_in * TEXT_CHARS_PER_INCH).round().max(1.0) as usize
}

fn render_table(out: &mut String, table: &TableBlock) {
    let widths: Vec<usize> = table
        .column_widths_in
        .iter()
        .map(|width| chars_for(*width))
        .collect();
    push_row(out, &table.headers, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(rule.join("-+-").as_str());
    out.push('\n');
    for row in &table.rows {
        push_row(out, row, &widths);
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| fit(cell, *width))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

/// Pad or truncate `cell` to exactly `width` characters.
fn fit(cell: &str, width: usize) -> String {
    let count = cell.chars().count();
    if count <= width {
        format!("{cell:<width$}")
    } else if width <= 1 {
        cell.chars().take(width).collect()
    } else {
        let mut cut: String = cell.chars().take(width - 1).collect();
        cut.push('~');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc~");
        assert_eq!(fit("é", 2), "é ");
    }

    #[test]
    fn renders_placeholder_and_form_feeds() {
        let doc = Document {
            title: "Order Nest".to_string(),
            blocks: vec![
                Block::Cover {
                    title: "Order Nest".to_string(),
                    date: "March 01, 2024".to_string(),
                },
                Block::PageBreak,
                Block::Placeholder("No matching rows to display".to_string()),
            ],
        };
        let text = TextRenderer.render(&doc);
        assert_eq!(
            text,
            "Order Nest\nMarch 01, 2024\n\u{000C}\nNo matching rows to display\n"
        );
    }

    #[test]
    fn renders_table_rows_in_fixed_columns() {
        let doc = Document {
            title: "t".to_string(),
            blocks: vec![Block::Table(TableBlock {
                headers: vec!["Sales Order".to_string(), "Due Date".to_string()],
                column_widths_in: vec![0.9, 0.7],
                header_color: "#000000".to_string(),
                rows: vec![vec!["SO1".to_string(), "01/15/24".to_string()]],
            })],
        };
        let text = TextRenderer.render(&doc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Sales Order | Due Date");
        assert_eq!(lines[1], "------------+---------");
        assert_eq!(lines[2], "SO1         | 01/15/24");
    }
}
