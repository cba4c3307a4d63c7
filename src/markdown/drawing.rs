//! Image references in the body.
//!
//! A drawing names its image through a relationship id. The id resolves to a media
//! path in the package, and the media path's file name is matched against the names
//! the images were extracted under.

use super::context::RenderContext;
use crate::ooxml::docx::{Drawing, ImageRegistry};
use tracing::debug;

/// Find the extracted name for a media path.
///
/// Candidates are tried in order: a name equal to the media file name, a name
/// ending in `_<file name>`, then a name ending in the file name ignoring case.
///
/// # Examples
///
/// ```rust
/// use docmark::markdown::resolve_image;
/// use docmark::ooxml::docx::ImageRegistry;
///
/// let images = ImageRegistry::from_names(["image_001_image1.png", "image_002_image11.png"]);
/// assert_eq!(resolve_image("media/image1.png", &images), Some("image_001_image1.png"));
/// assert_eq!(resolve_image("media/IMAGE11.PNG", &images), Some("image_002_image11.png"));
/// assert_eq!(resolve_image("media/other.png", &images), None);
/// ```
pub fn resolve_image<'r>(media_path: &str, images: &'r ImageRegistry) -> Option<&'r str> {
    let base = media_path.rsplit('/').next().unwrap_or(media_path);
    if base.is_empty() {
        return None;
    }
    let names = images.names();
    let suffix = format!("_{}", base);
    let lower_base = base.to_lowercase();

    names
        .iter()
        .find(|name| name.as_str() == base)
        .or_else(|| names.iter().find(|name| name.ends_with(&suffix)))
        .or_else(|| names.iter().find(|name| name.to_lowercase().ends_with(&lower_base)))
        .map(String::as_str)
}

/// Render a drawing as a Markdown image, or nothing when it cannot be resolved.
pub fn render_drawing(drawing: &Drawing, ctx: &RenderContext<'_>) -> String {
    let resolved = ctx
        .rels
        .image(drawing.r_embed())
        .and_then(|path| resolve_image(path, ctx.images));

    match resolved {
        Some(name) => format!("![{}]({}/{})", name, ctx.options.images_dir, name),
        None => {
            debug!(r_id = drawing.r_embed(), "drawing does not resolve to an extracted image");
            String::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{HeadingRecord, MarkdownOptions};
    use crate::ooxml::opc::RelationshipTables;

    #[test]
    fn test_suffix_match_does_not_confuse_similar_names() {
        let images = ImageRegistry::from_names(["image_001_image11.png", "image_002_image1.png"]);
        assert_eq!(resolve_image("media/image1.png", &images), Some("image_002_image1.png"));
    }

    #[test]
    fn test_exact_match_wins() {
        let images = ImageRegistry::from_names(["image_001_logo.png", "logo.png"]);
        assert_eq!(resolve_image("media/logo.png", &images), Some("logo.png"));
    }

    #[test]
    fn test_render_drawing() {
        let mut rels = RelationshipTables::new();
        rels.insert_image("rId5", "media/image1.png");
        let images = ImageRegistry::from_names(["image_001_image1.png"]);
        let options = MarkdownOptions::default();
        let mut headings = HeadingRecord::new();
        let ctx = RenderContext::new(&rels, &images, &options, &mut headings);

        assert_eq!(
            render_drawing(&Drawing::new("rId5"), &ctx),
            "![image_001_image1.png](images/image_001_image1.png)"
        );
        assert_eq!(render_drawing(&Drawing::new("rId6"), &ctx), "");
    }

    #[test]
    fn test_unextracted_image_renders_nothing() {
        let mut rels = RelationshipTables::new();
        rels.insert_image("rId5", "media/image9.png");
        let images = ImageRegistry::from_names(["image_001_image1.png"]);
        let options = MarkdownOptions::new().with_images_dir("assets");
        let mut headings = HeadingRecord::new();
        let ctx = RenderContext::new(&rels, &images, &options, &mut headings);
        assert_eq!(render_drawing(&Drawing::new("rId5"), &ctx), "");
    }
}
