//! Paragraph classification and rendering.
//!
//! Word documents rarely mark structure explicitly, so the shape of a paragraph is
//! inferred from styling cues. Classification walks an ordered rule table and the
//! first rule that matches decides the paragraph kind; the last rule matches
//! every paragraph, so classification is total.
//!
//! | Rule | Matches | Output |
//! |------|---------|--------|
//! | styled heading | `w:pStyle` contains `Heading`, text non-empty | `#`×level, level from the style's first number |
//! | bold heading | every text-bearing run bold | `##` or `###` by text length |
//! | label heading | `**Label:** rest` | `### Label`, then `rest` |
//! | blank | empty text | a single newline |
//! | image only | text starts with `![` | text, single newline |
//! | list item | numbering properties | text, single newline |
//! | plain | anything | text, blank line |

use super::context::RenderContext;
use super::inline::render_inlines;
use crate::ooxml::docx::{Paragraph, StyleFlags};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// `**Label:** rest`, where the rest may span lines.
static LABEL_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\*\*(.+?):\*\*\s*(.*)$").expect("label heading regex must compile")
});

/// The decision made for one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphKind {
    /// Heading from a `Heading N` paragraph style
    StyledHeading { level: u8 },
    /// Heading inferred from a fully bold paragraph
    BoldHeading { level: u8 },
    /// `**Label:** rest` split into a level-3 heading and a paragraph
    LabelHeading { label: String, rest: String },
    /// Empty paragraph
    Blank,
    /// Paragraph holding only an image
    ImageOnly,
    /// Numbered or bulleted paragraph
    ListItem { level: u8 },
    /// Anything else
    Plain,
}

/// What the rules look at for one paragraph.
#[derive(Debug, Clone)]
pub struct ParagraphFeatures<'p> {
    /// The paragraph node
    pub paragraph: &'p Paragraph,
    /// Rendered inline content, trimmed
    pub text: String,
    /// Rendered inline content with bold suppressed when the paragraph is fully
    /// bold, trimmed
    pub heading_text: String,
    /// Whether every text-bearing run is bold
    pub fully_bold: bool,
}

impl<'p> ParagraphFeatures<'p> {
    /// Render the paragraph's inline content and derive its features.
    pub fn extract(paragraph: &'p Paragraph, ctx: &RenderContext<'_>) -> Self {
        let fully_bold = is_fully_bold(paragraph);
        let text = render_inlines(paragraph.content(), ctx, StyleFlags::empty())
            .trim()
            .to_string();
        let heading_text = if fully_bold {
            render_inlines(paragraph.content(), ctx, StyleFlags::BOLD)
                .trim()
                .to_string()
        } else {
            text.clone()
        };
        Self {
            paragraph,
            text,
            heading_text,
            fully_bold,
        }
    }
}

/// Whether the paragraph has at least one text-bearing run and all of them,
/// including runs inside hyperlinks, are bold. Whitespace-only runs are ignored.
pub fn is_fully_bold(paragraph: &Paragraph) -> bool {
    let mut text_runs = paragraph
        .runs()
        .filter(|run| !run.text().trim().is_empty())
        .peekable();
    text_runs.peek().is_some() && text_runs.all(|run| run.style().contains(StyleFlags::BOLD))
}

/// Heading level from a style id: the first number in it, clamped to `1..=6`,
/// or 1 when there is none.
pub fn heading_level_from_style(style: &str) -> u8 {
    let digits: String = style
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 1;
    }
    digits.parse::<u32>().map_or(6, |level| level.clamp(1, 6) as u8)
}

struct Rule {
    name: &'static str,
    classify: fn(&ParagraphFeatures<'_>, &RenderContext<'_>) -> Option<ParagraphKind>,
}

const RULES: &[Rule] = &[
    Rule {
        name: "styled heading",
        classify: styled_heading,
    },
    Rule {
        name: "bold heading",
        classify: bold_heading,
    },
    Rule {
        name: "label heading",
        classify: label_heading,
    },
    Rule {
        name: "blank",
        classify: blank,
    },
    Rule {
        name: "image only",
        classify: image_only,
    },
    Rule {
        name: "list item",
        classify: list_item,
    },
    Rule {
        name: "plain",
        classify: plain,
    },
];

fn styled_heading(f: &ParagraphFeatures<'_>, _: &RenderContext<'_>) -> Option<ParagraphKind> {
    let style = f.paragraph.style()?;
    if !style.contains("Heading") || f.heading_text.is_empty() {
        return None;
    }
    Some(ParagraphKind::StyledHeading {
        level: heading_level_from_style(style),
    })
}

fn bold_heading(f: &ParagraphFeatures<'_>, ctx: &RenderContext<'_>) -> Option<ParagraphKind> {
    if !f.fully_bold || f.heading_text.is_empty() {
        return None;
    }
    let level = if f.heading_text.chars().count() < ctx.options.heading_length_threshold {
        2
    } else {
        3
    };
    Some(ParagraphKind::BoldHeading { level })
}

fn label_heading(f: &ParagraphFeatures<'_>, _: &RenderContext<'_>) -> Option<ParagraphKind> {
    let caps = LABEL_HEADING.captures(&f.text)?;
    let label = caps.get(1)?.as_str().trim();
    if label.is_empty() {
        return None;
    }
    let rest = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(ParagraphKind::LabelHeading {
        label: label.to_string(),
        rest: rest.to_string(),
    })
}

fn blank(f: &ParagraphFeatures<'_>, _: &RenderContext<'_>) -> Option<ParagraphKind> {
    f.text.is_empty().then_some(ParagraphKind::Blank)
}

fn image_only(f: &ParagraphFeatures<'_>, _: &RenderContext<'_>) -> Option<ParagraphKind> {
    f.text.starts_with("![").then_some(ParagraphKind::ImageOnly)
}

fn list_item(f: &ParagraphFeatures<'_>, _: &RenderContext<'_>) -> Option<ParagraphKind> {
    f.paragraph
        .numbering()
        .map(|numbering| ParagraphKind::ListItem { level: numbering.level })
}

fn plain(_: &ParagraphFeatures<'_>, _: &RenderContext<'_>) -> Option<ParagraphKind> {
    Some(ParagraphKind::Plain)
}

/// Pick the kind of a paragraph from its features.
pub fn classify_paragraph(features: &ParagraphFeatures<'_>, ctx: &RenderContext<'_>) -> ParagraphKind {
    for rule in RULES {
        if let Some(kind) = (rule.classify)(features, ctx) {
            debug!(rule = rule.name, text = %features.text, "classified paragraph");
            return kind;
        }
    }
    ParagraphKind::Plain
}

/// Classify and render one paragraph, recording any heading it produces.
pub fn render_paragraph(paragraph: &Paragraph, ctx: &mut RenderContext<'_>) -> String {
    let features = ParagraphFeatures::extract(paragraph, ctx);
    let kind = classify_paragraph(&features, ctx);
    render_kind(kind, features, ctx)
}

fn render_kind(kind: ParagraphKind, features: ParagraphFeatures<'_>, ctx: &mut RenderContext<'_>) -> String {
    match kind {
        ParagraphKind::StyledHeading { level } | ParagraphKind::BoldHeading { level } => {
            let out = format!("{} {}\n\n", "#".repeat(usize::from(level)), features.heading_text);
            ctx.headings.push(level, features.heading_text);
            out
        },
        ParagraphKind::LabelHeading { label, rest } => {
            let mut out = format!("### {}\n\n", label);
            if !rest.is_empty() {
                out.push_str(&rest);
                out.push_str("\n\n");
            }
            ctx.headings.push(3, label);
            out
        },
        ParagraphKind::Blank => "\n".to_string(),
        ParagraphKind::ImageOnly => format!("{}\n", features.text),
        ParagraphKind::ListItem { level } => {
            if ctx.options.list_markers {
                format!("{}- {}\n", "  ".repeat(usize::from(level)), features.text)
            } else {
                format!("{}\n", features.text)
            }
        },
        ParagraphKind::Plain => format!("{}\n\n", features.text),
    }
}
