//! Table classification and rendering.
//!
//! Word tables are often used for layout rather than data. Before rendering, each
//! table is classified by shape:
//!
//! - **two-column**: label/value or image/caption layouts, rendered as bold labels
//!   followed by their paragraphs, or as a table row when one side is an image
//! - **multi-category**: three columns of category, component and description,
//!   rendered as level-3 category headings with bold component entries
//! - **standard**: anything else, rendered as a Markdown pipe table
//!
//! The image test for two-column rows is a heuristic: a row is kept as a table row
//! exactly when one of its cells contains an image link.

use super::context::RenderContext;
use super::paragraph::render_paragraph;
use crate::ooxml::docx::{Cell, Table};
use phf::phf_map;
use tracing::debug;

/// Header labels of a multi-category table, by the column they name.
static HEADER_LABELS: phf::Map<&'static str, usize> = phf_map! {
    "category" => 0,
    "categories" => 0,
    "component" => 1,
    "components" => 1,
    "description" => 2,
    "descriptions" => 2,
};

/// The layout a table was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// Two columns and at least one row after the header row
    TwoColumn,
    /// Exactly three columns and more than three rows
    MultiCategory,
    /// Any other shape
    Standard,
}

/// Classify a table from its rendered rows.
pub fn classify_table(rows: &[Vec<String>]) -> TableShape {
    let columns = rows.first().map_or(0, Vec::len);
    match (columns, rows.len()) {
        (2, n) if n >= 2 => TableShape::TwoColumn,
        (3, n) if n > 3 => TableShape::MultiCategory,
        _ => TableShape::Standard,
    }
}

/// Render a table. Tables without any non-blank row render as nothing; every
/// other table ends with a blank line.
pub fn render_table(table: &Table, ctx: &mut RenderContext<'_>) -> String {
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.cells().iter().map(|cell| render_cell(cell, ctx)).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|cell| !cell.trim().is_empty()))
        .collect();
    if rows.is_empty() {
        return String::new();
    }

    let shape = classify_table(&rows);
    debug!(?shape, rows = rows.len(), "classified table");
    let mut out = match shape {
        TableShape::TwoColumn => render_two_column(&rows),
        TableShape::MultiCategory => render_multi_category(&rows),
        TableShape::Standard => render_standard(&rows),
    };

    let content_len = out.trim_end_matches('\n').len();
    out.truncate(content_len);
    out.push_str("\n\n");
    out
}

/// Render the paragraphs of a cell, joined by blank lines, and move a leading
/// bold label onto its own line.
pub fn render_cell(cell: &Cell, ctx: &mut RenderContext<'_>) -> String {
    let mut parts = Vec::with_capacity(cell.paragraphs().len());
    for para in cell.paragraphs() {
        let rendered = render_paragraph(para, ctx);
        let trimmed = rendered.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }
    split_bold_label(parts.join("\n\n"))
}

/// `**Label:** value` becomes `**Label:**` and `value` on separate lines when the
/// first colon lies inside the bold span or right after it.
fn split_bold_label(text: String) -> String {
    if !text.starts_with("**") {
        return text;
    }
    let (Some(colon), Some(bold_end)) = (text.find(':'), text[2..].find("**").map(|i| i + 2)) else {
        return text;
    };
    if colon >= bold_end + 3 {
        return text;
    }
    let (label, rest) = text.split_at(bold_end + 2);
    format!("{}\n{}", label.trim(), rest.trim())
}

/// Strip a leading ATX heading marker, which a bold cell paragraph picks up
/// from the paragraph classifier.
fn strip_heading_marker(text: &str) -> &str {
    let stripped = text.trim_start_matches('#');
    if stripped.len() != text.len() && stripped.starts_with(char::is_whitespace) {
        stripped.trim()
    } else {
        text
    }
}

/// Strip a leading ATX heading marker and wrap in bold unless already bold.
fn bold_label(text: &str) -> String {
    let label = strip_heading_marker(text);
    if is_bold(label) {
        label.to_string()
    } else {
        format!("**{}**", label)
    }
}

fn is_bold(text: &str) -> bool {
    text.len() > 4 && text.starts_with("**") && text.ends_with("**")
}

fn render_two_column(rows: &[Vec<String>]) -> String {
    let mut sections: Vec<String> = Vec::new();
    for row in rows.iter().skip(1) {
        let [left, right, ..] = row.as_slice() else {
            continue;
        };
        let (left, right) = (left.trim(), right.trim());

        if left.contains("![") != right.contains("![") {
            sections.push(format!("| {} | {} |", left, right));
            continue;
        }

        let before = sections.len();
        if !left.is_empty() {
            sections.push(format!("{}\n", bold_label(left)));
        }
        for block in right.split("\n\n").map(str::trim).filter(|b| !b.is_empty()) {
            sections.push(format!("{}\n", block));
        }
        if sections.len() > before {
            sections.push(String::new());
        }
    }
    sections.join("\n")
}

fn normalized_label(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| *c != '*' && *c != '#')
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_header_row(cells: [&str; 3]) -> bool {
    cells
        .iter()
        .enumerate()
        .all(|(column, cell)| HEADER_LABELS.get(normalized_label(cell).as_str()) == Some(&column))
}

fn render_multi_category(rows: &[Vec<String>]) -> String {
    let mut sections: Vec<String> = Vec::new();
    let mut current_category: Option<&str> = None;

    for row in rows {
        let [category, component, description, ..] = row.as_slice() else {
            continue;
        };
        let (category, component, description) = (category.trim(), component.trim(), description.trim());
        if is_header_row([category, component, description]) {
            continue;
        }
        if category.is_empty() && component.is_empty() && description.is_empty() {
            continue;
        }

        let category = plain_category(category);
        if !category.is_empty() && current_category != Some(category) {
            current_category = Some(category);
            sections.push(format!("\n### {}\n", category));
        }

        let formatted = format_description(description);
        match (component.is_empty(), formatted.is_empty()) {
            (false, false) => sections.push(format!("{}: {}\n", bold_component(component), formatted)),
            (false, true) => sections.push(format!("{}\n", bold_component(component))),
            (true, false) => sections.push(format!("{}\n", formatted)),
            (true, true) => {},
        }
    }

    let mut out = sections.join("\n");
    out.push_str("\n\n");
    out
}

/// Category text for a `###` heading: no inner heading marker and no bold.
fn plain_category(category: &str) -> &str {
    let category = strip_heading_marker(category);
    if is_bold(category) {
        category[2..category.len() - 2].trim()
    } else {
        category
    }
}

fn bold_component(component: &str) -> String {
    let component = strip_heading_marker(component);
    if is_bold(component) {
        component.to_string()
    } else {
        format!("**{}**", component)
    }
}

fn is_list_marker_line(line: &str) -> bool {
    if line.starts_with(['•', '-', '*']) {
        return true;
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && matches!(line.as_bytes().get(digits), Some(b'.' | b')')) && line.len() > digits + 1
}

/// Re-flow a description cell.
///
/// Bullet and numbered lines start a new line, indented lines become nested
/// continuation lines, and any other line joins the previous one with a space.
///
/// # Examples
///
/// ```rust
/// use docmark::markdown::format_description;
///
/// let text = "Handles requests\nfrom clients\n- retries\n    backoff";
/// assert_eq!(format_description(text), "Handles requests from clients\n- retries\n  backoff");
/// ```
pub fn format_description(description: &str) -> String {
    let mut out = String::with_capacity(description.len());
    for raw in description.split('\n') {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if raw.starts_with("    ") || raw.starts_with('\t') {
            out.push_str("\n  ");
            out.push_str(line);
        } else if is_list_marker_line(line) {
            out.push('\n');
            out.push_str(line);
        } else {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(line);
        }
    }
    out
}

fn standard_cell(cell: &str) -> String {
    cell.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn render_standard(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let line = |row: &Vec<String>| {
        let cells: Vec<String> = (0..columns)
            .map(|i| row.get(i).map_or_else(String::new, |cell| standard_cell(cell)))
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(line(&rows[0]));
    lines.push(format!("| {} |", vec!["---"; columns].join(" | ")));
    lines.extend(rows[1..].iter().map(line));
    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out
}
