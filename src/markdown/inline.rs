//! Inline content: runs, hyperlinks and drawings.
//!
//! Emphasis is applied per span of adjacent runs that share the same style, so
//! Word's habit of splitting one bold phrase over several runs renders as a single
//! `**phrase**` instead of `**phr****ase**`. Whitespace at the edges of a span is
//! kept outside the markers, since `** bold**` is not emphasis in Markdown.

use super::context::RenderContext;
use super::drawing::render_drawing;
use crate::ooxml::docx::{Hyperlink, Inline, Run, StyleFlags};

/// Wrap text in the emphasis markers for `style`.
///
/// Bold wraps first as `**`, italic then as `*`, and underline renders as bold
/// unless the text is already bold. Empty text stays empty and whitespace-only
/// text is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use docmark::markdown::wrap_emphasis;
/// use docmark::ooxml::docx::StyleFlags;
///
/// assert_eq!(wrap_emphasis("a", StyleFlags::BOLD | StyleFlags::ITALIC), "***a***");
/// assert_eq!(wrap_emphasis(" note ", StyleFlags::UNDERLINE), " **note** ");
/// ```
pub fn wrap_emphasis(text: &str, style: StyleFlags) -> String {
    let core = text.trim();
    if core.is_empty() || style.is_empty() {
        return text.to_string();
    }

    let start = text.len() - text.trim_start().len();
    let end = start + core.len();

    let mut wrapped = core.to_string();
    if style.contains(StyleFlags::BOLD) {
        wrapped = format!("**{}**", wrapped);
    }
    if style.contains(StyleFlags::ITALIC) {
        wrapped = format!("*{}*", wrapped);
    }
    if style.contains(StyleFlags::UNDERLINE) && !style.contains(StyleFlags::BOLD) {
        wrapped = format!("**{}**", wrapped);
    }

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..start]);
    out.push_str(&wrapped);
    out.push_str(&text[end..]);
    out
}

/// Accumulates the text of adjacent runs that share a style.
struct Span {
    text: String,
    style: StyleFlags,
}

impl Span {
    fn new() -> Self {
        Self {
            text: String::new(),
            style: StyleFlags::empty(),
        }
    }

    fn push(&mut self, text: &str, style: StyleFlags, out: &mut String) {
        if self.style != style && !self.text.is_empty() {
            self.flush(out);
        }
        self.style = style;
        self.text.push_str(text);
    }

    fn flush(&mut self, out: &mut String) {
        if !self.text.is_empty() {
            out.push_str(&wrap_emphasis(&self.text, self.style));
            self.text.clear();
        }
    }
}

/// Render a sequence of runs as one container.
///
/// Flags in `suppress` are ignored, which lets a fully bold heading render
/// without a redundant bold wrapper.
pub fn render_runs<'r>(
    runs: impl IntoIterator<Item = &'r Run>,
    ctx: &RenderContext<'_>,
    suppress: StyleFlags,
) -> String {
    let mut out = String::new();
    let mut span = Span::new();
    for run in runs {
        push_run(run, ctx, suppress, &mut span, &mut out);
    }
    span.flush(&mut out);
    out
}

/// The style a run renders with once `suppress` is applied. Underline renders as
/// bold, so suppressing bold on a bold run also drops its underline.
fn effective_style(style: StyleFlags, suppress: StyleFlags) -> StyleFlags {
    let mut effective = style.difference(suppress);
    if suppress.contains(StyleFlags::BOLD) && style.contains(StyleFlags::BOLD) {
        effective.remove(StyleFlags::UNDERLINE);
    }
    effective
}

fn push_run(run: &Run, ctx: &RenderContext<'_>, suppress: StyleFlags, span: &mut Span, out: &mut String) {
    if run.has_text() {
        span.push(run.text(), effective_style(run.style(), suppress), out);
    }
    if !run.drawings().is_empty() {
        span.flush(out);
        for drawing in run.drawings() {
            out.push_str(&render_drawing(drawing, ctx));
        }
    }
}

/// Render a hyperlink as `[text](url)`, falling back to its plain rendered text
/// when the target does not resolve or the text is empty.
pub fn render_hyperlink(link: &Hyperlink, ctx: &RenderContext<'_>, suppress: StyleFlags) -> String {
    let text = render_runs(link.runs(), ctx, suppress);
    match link.r_id().and_then(|id| ctx.rels.hyperlink(id)) {
        Some(url) if !text.is_empty() => format!("[{}]({})", text, url),
        _ => text,
    }
}

/// Render the inline content of a paragraph in document order.
pub fn render_inlines(content: &[Inline], ctx: &RenderContext<'_>, suppress: StyleFlags) -> String {
    let mut out = String::new();
    let mut span = Span::new();
    for inline in content {
        match inline {
            Inline::Run(run) => push_run(run, ctx, suppress, &mut span, &mut out),
            Inline::Hyperlink(link) => {
                span.flush(&mut out);
                out.push_str(&render_hyperlink(link, ctx, suppress));
            },
            Inline::Drawing(drawing) => {
                span.flush(&mut out);
                out.push_str(&render_drawing(drawing, ctx));
            },
        }
    }
    span.flush(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{HeadingRecord, MarkdownOptions};
    use crate::ooxml::docx::{Drawing, ImageRegistry};
    use crate::ooxml::opc::RelationshipTables;

    fn render(content: &[Inline], rels: &RelationshipTables) -> String {
        let images = ImageRegistry::from_names(["image_001_pic.png"]);
        let options = MarkdownOptions::default();
        let mut headings = HeadingRecord::new();
        let ctx = RenderContext::new(rels, &images, &options, &mut headings);
        render_inlines(content, &ctx, StyleFlags::empty())
    }

    fn run(text: &str, style: StyleFlags) -> Inline {
        Inline::Run(Run::new(text, style))
    }

    #[test]
    fn test_wrap_emphasis_combinations() {
        assert_eq!(wrap_emphasis("x", StyleFlags::BOLD), "**x**");
        assert_eq!(wrap_emphasis("x", StyleFlags::ITALIC), "*x*");
        assert_eq!(wrap_emphasis("x", StyleFlags::UNDERLINE), "**x**");
        assert_eq!(wrap_emphasis("x", StyleFlags::ITALIC | StyleFlags::UNDERLINE), "***x***");
        assert_eq!(wrap_emphasis("x", StyleFlags::all()), "***x***");
        assert_eq!(wrap_emphasis("x", StyleFlags::empty()), "x");
    }

    #[test]
    fn test_whitespace_stays_outside_markers() {
        assert_eq!(wrap_emphasis("  bold ", StyleFlags::BOLD), "  **bold** ");
        assert_eq!(wrap_emphasis("   ", StyleFlags::BOLD), "   ");
        assert_eq!(wrap_emphasis("", StyleFlags::BOLD), "");
    }

    #[test]
    fn test_suppressed_bold_also_drops_underline_of_bold_runs() {
        let bold_underline = StyleFlags::BOLD | StyleFlags::UNDERLINE;
        assert_eq!(effective_style(bold_underline, StyleFlags::BOLD), StyleFlags::empty());
        assert_eq!(
            effective_style(bold_underline | StyleFlags::ITALIC, StyleFlags::BOLD),
            StyleFlags::ITALIC
        );
        assert_eq!(effective_style(StyleFlags::UNDERLINE, StyleFlags::BOLD), StyleFlags::UNDERLINE);
        assert_eq!(effective_style(bold_underline, StyleFlags::empty()), bold_underline);
    }

    #[test]
    fn test_adjacent_runs_are_coalesced() {
        let rels = RelationshipTables::new();
        let content = [
            run("Hel", StyleFlags::BOLD),
            run("lo", StyleFlags::BOLD),
            run("", StyleFlags::ITALIC),
            run(" world", StyleFlags::empty()),
        ];
        assert_eq!(render(&content, &rels), "**Hello** world");
    }

    #[test]
    fn test_hyperlink_resolution() {
        let mut rels = RelationshipTables::new();
        rels.insert_hyperlink("rId1", "https://example.com");
        let linked = [Inline::Hyperlink(Hyperlink::new(
            Some("rId1".to_string()),
            [Run::new("site", StyleFlags::ITALIC)],
        ))];
        assert_eq!(render(&linked, &rels), "[*site*](https://example.com)");

        let unresolved = [Inline::Hyperlink(Hyperlink::new(
            Some("rId9".to_string()),
            [Run::new("plain", StyleFlags::empty())],
        ))];
        assert_eq!(render(&unresolved, &rels), "plain");

        let empty = [Inline::Hyperlink(Hyperlink::new(Some("rId1".to_string()), []))];
        assert_eq!(render(&empty, &rels), "");
    }

    #[test]
    fn test_drawing_follows_run_text() {
        let mut rels = RelationshipTables::new();
        rels.insert_image("rId2", "media/pic.png");
        let mut pictured = Run::new("Figure", StyleFlags::BOLD);
        pictured.push_drawing(Drawing::new("rId2"));
        let content = [Inline::Run(pictured), run(" after", StyleFlags::BOLD)];
        assert_eq!(
            render(&content, &rels),
            "**Figure**![image_001_pic.png](images/image_001_pic.png) **after**"
        );
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_markers_wrap_only_the_core(
                lead in "[ \t]{0,3}",
                core in "[a-z]{1,8}",
                trail in " {0,3}",
                bits in 0u8..8,
            ) {
                let style = StyleFlags::from_bits_truncate(bits);
                let wrapped = wrap_emphasis(&format!("{}{}{}", lead, core, trail), style);
                prop_assert!(wrapped.starts_with(&lead));
                prop_assert!(wrapped.ends_with(&trail));
                prop_assert_eq!(wrapped.trim().trim_matches('*'), core.as_str());
                prop_assert!(!wrapped.contains("*****"));
            }
        }
    }
}
