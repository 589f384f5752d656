//! # Rendering Context
//!
//! Fonts and image resources, loaded once at process start and passed
//! into the renderer. There is no ambient global registration: every
//! lookup goes through an explicit [`RenderingContext`].
//!
//! Resource absence is never an error. Missing font files fall back to
//! the PDF built-in Helvetica faces with heuristic text metrics, and a
//! brand with no logo file resolves to `None` so the cell renderer can
//! degrade to text. Both are reported once with `[assets]` diagnostics.

use ab_glyph::{Font, FontVec, ScaleFont};
use image::DynamicImage;
use std::collections::HashMap;
use std::path::Path;

use crate::draw::FontStyle;

const PT_PER_PX: f32 = 72.0 / 96.0;
const MM_PER_PT: f64 = 25.4 / 72.0;

/// Average glyph advance as a fraction of the point size, used when no
/// font file is available to measure against (Helvetica-ish).
const HEURISTIC_ADVANCE: f64 = 0.5;

/// Font file names looked up under `<assets>/fonts/`.
const FONT_FILES: [(FontStyle, &str); 3] = [
    (FontStyle::Regular, "regular.ttf"),
    (FontStyle::SemiBold, "semibold.ttf"),
    (FontStyle::Bold, "bold.ttf"),
];

/// One loaded font: the raw bytes for PDF embedding plus parsed
/// metrics for width measurement.
struct FontAsset {
    bytes: Vec<u8>,
    metrics: FontVec,
}

/// Process-wide rendering resources. Built once, shared read-only
/// across requests.
pub struct RenderingContext {
    fonts: HashMap<FontStyle, FontAsset>,
    logos: HashMap<String, DynamicImage>,
}

impl RenderingContext {
    /// Load fonts and logos from an assets directory
    /// (`<dir>/fonts/*.ttf`, `<dir>/logos/*.png`).
    ///
    /// Never fails: anything that cannot be loaded is skipped with a
    /// diagnostic and the context degrades per resource.
    pub fn load(assets_dir: &Path) -> Self {
        let mut ctx = Self::empty();

        for (style, file) in FONT_FILES {
            let path = assets_dir.join("fonts").join(file);
            match std::fs::read(&path) {
                Ok(bytes) => match FontVec::try_from_vec(bytes.clone()) {
                    Ok(metrics) => {
                        ctx.fonts.insert(style, FontAsset { bytes, metrics });
                    }
                    Err(e) => {
                        eprintln!("[assets] Skipping font {}: {}", path.display(), e);
                    }
                },
                Err(_) => {
                    println!(
                        "[assets] Font {} not found, falling back to Helvetica",
                        path.display()
                    );
                }
            }
        }

        let logo_dir = assets_dir.join("logos");
        match std::fs::read_dir(&logo_dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    match image::open(&path) {
                        Ok(img) => {
                            ctx.logos.insert(stem.to_lowercase(), img);
                        }
                        Err(e) => {
                            eprintln!("[assets] Skipping image {}: {}", path.display(), e);
                        }
                    }
                }
                println!("[assets] Loaded {} logo image(s)", ctx.logos.len());
            }
            Err(_) => {
                println!(
                    "[assets] Logo directory {} not found, brand names render as text",
                    logo_dir.display()
                );
            }
        }

        ctx
    }

    /// A context with no loaded resources: built-in PDF fonts,
    /// heuristic metrics, and no resolvable logos.
    pub fn empty() -> Self {
        Self {
            fonts: HashMap::new(),
            logos: HashMap::new(),
        }
    }

    /// Raw TTF bytes for embedding, if this style has a loaded font.
    pub fn font_bytes(&self, style: FontStyle) -> Option<&[u8]> {
        self.fonts.get(&style).map(|f| f.bytes.as_slice())
    }

    /// Advance width of `text` at `size_pt`, in millimeters.
    ///
    /// Measured from the loaded font's glyph advances when available,
    /// otherwise estimated from the average-advance heuristic.
    pub fn text_width_mm(&self, style: FontStyle, size_pt: f32, text: &str) -> f64 {
        if let Some(asset) = self.fonts.get(&style)
            && let Some(scale) = asset.metrics.pt_to_px_scale(size_pt)
        {
            let scaled = asset.metrics.as_scaled(scale);
            let px: f32 = text
                .chars()
                .map(|c| scaled.h_advance(asset.metrics.glyph_id(c)))
                .sum();
            return (px * PT_PER_PX) as f64 * MM_PER_PT;
        }
        text.chars().count() as f64 * size_pt as f64 * HEURISTIC_ADVANCE * MM_PER_PT
    }

    /// Resolve a logo/icon image by name (case-insensitive file stem).
    pub fn resolve_logo(&self, name: &str) -> Option<&DynamicImage> {
        self.logos.get(&name.to_lowercase())
    }

    /// Insert an image under a name. Test hook for exercising the
    /// resolvable-logo paths without an assets directory.
    #[cfg(test)]
    pub fn insert_logo(&mut self, name: &str, img: DynamicImage) {
        self.logos.insert(name.to_lowercase(), img);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_has_no_fonts_or_logos() {
        let ctx = RenderingContext::empty();
        assert!(ctx.font_bytes(FontStyle::Regular).is_none());
        assert!(ctx.resolve_logo("xero").is_none());
    }

    #[test]
    fn test_heuristic_width_scales_with_text_and_size() {
        let ctx = RenderingContext::empty();
        let short = ctx.text_width_mm(FontStyle::Bold, 18.0, "AB");
        let long = ctx.text_width_mm(FontStyle::Bold, 18.0, "ABCD");
        let big = ctx.text_width_mm(FontStyle::Bold, 36.0, "AB");
        assert!(long > short);
        assert!((long - 2.0 * short).abs() < 1e-9);
        assert!((big - 2.0 * short).abs() < 1e-9);
    }

    #[test]
    fn test_logo_resolution_is_case_insensitive() {
        let mut ctx = RenderingContext::empty();
        ctx.insert_logo("Xero", DynamicImage::new_rgb8(2, 2));
        assert!(ctx.resolve_logo("xero").is_some());
        assert!(ctx.resolve_logo("XERO").is_some());
        assert!(ctx.resolve_logo("other").is_none());
    }

    #[test]
    fn test_missing_assets_dir_degrades() {
        let ctx = RenderingContext::load(Path::new("/nonexistent/assets"));
        assert!(ctx.font_bytes(FontStyle::Regular).is_none());
        assert!(ctx.text_width_mm(FontStyle::Regular, 18.0, "hello") > 0.0);
    }
}
