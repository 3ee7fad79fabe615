use std::sync::Arc;

use super::error::FontError;
use super::metrics::{scale_factor, FontMetrics, GlyphMetrics, TextMetrics};
use crate::path::Path;

/// Shared handle to a loaded face. Faces are compared by identity.
pub type FontRef = Arc<dyn Font>;

/// Returns true if both handles point at the same face.
pub fn same_font(a: &FontRef, b: &FontRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

pub(crate) fn same_resolution(a: Option<&FontRef>, b: Option<&FontRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same_font(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Capabilities every loaded face exposes.
///
/// Implementations supply the glyph-level queries; the text-level operations
/// (`measure_text`, `text_path`) are built on top of them and only need to be
/// overridden by faces that can do better. A face never changes after
/// construction.
pub trait Font: Send + Sync {
    fn family_name(&self) -> &str;
    fn style_name(&self) -> &str;

    fn full_name(&self) -> String {
        format!("{} {}", self.family_name(), self.style_name())
    }

    /// Design units per em. Always positive.
    fn units_per_em(&self) -> u16;
    fn metrics(&self) -> &FontMetrics;
    fn num_glyphs(&self) -> u32;

    fn has_glyph(&self, code_point: u32) -> bool;

    /// Glyph for `code_point`, or the notdef glyph (0) when unmapped.
    fn glyph_index(&self, code_point: u32) -> u32;

    /// Fails with [`FontError::InvalidGlyphIndex`] outside the face's range.
    fn glyph_metrics(&self, glyph_index: u32) -> Result<GlyphMetrics, FontError>;

    /// Outline scaled to `font_size`, relative to the glyph's baseline-left
    /// origin with y growing downwards. Empty for glyphs without ink.
    fn glyph_path(&self, glyph_index: u32, font_size: f64) -> Path;

    /// Scaled kerning between two glyphs, 0 when the pair has none.
    fn kerning(&self, left: u32, right: u32, font_size: f64) -> f64;

    /// Measures `text` set entirely in this face.
    fn measure_text(&self, text: &str, font_size: f64) -> TextMetrics {
        let scale = scale_factor(font_size, self.units_per_em());
        let mut width = 0.0;
        let mut ink: Option<(f64, f64)> = None;
        let mut prev_glyph: Option<u32> = None;

        for ch in text.chars() {
            let glyph = self.glyph_index(ch as u32);

            if let Some(prev) = prev_glyph {
                width += self.kerning(prev, glyph, font_size);
            }

            match self.glyph_metrics(glyph) {
                Ok(glyph_metrics) => {
                    width += f64::from(glyph_metrics.advance_width) * scale;

                    let bbox = glyph_metrics.bounding_box;
                    if bbox.width() != 0 || bbox.height() != 0 {
                        let ascent = f64::from(bbox.y_max) * scale;
                        let descent = -f64::from(bbox.y_min) * scale;
                        ink = Some(match ink {
                            Some((a, d)) => (a.max(ascent), d.max(descent)),
                            None => (ascent, descent),
                        });
                    }
                }
                Err(err) => log::debug!("Skipping glyph in '{}': {}", self.full_name(), err),
            }

            prev_glyph = Some(glyph);
        }

        let metrics = self.metrics();
        let (ascent, descent) = ink.unwrap_or((
            f64::from(metrics.ascender) * scale,
            -f64::from(metrics.descender) * scale,
        ));
        let ascent = ascent.max(0.0);
        let descent = descent.max(0.0);

        TextMetrics {
            width,
            height: ascent + descent,
            ascent,
            descent,
            line_height: f64::from(metrics.line_height()) * scale,
        }
    }

    /// Outline of `text` set in this face with the pen starting at `(x, y)`
    /// on the baseline.
    fn text_path(&self, text: &str, x: f64, y: f64, font_size: f64) -> Path {
        let scale = scale_factor(font_size, self.units_per_em());
        let mut path = Path::new();
        let mut pen_x = x;
        let mut prev_glyph: Option<u32> = None;

        for ch in text.chars() {
            let glyph = self.glyph_index(ch as u32);

            if let Some(prev) = prev_glyph {
                pen_x += self.kerning(prev, glyph, font_size);
            }

            let mut glyph_path = self.glyph_path(glyph, font_size);
            glyph_path.translate(pen_x, y);
            path.append(&glyph_path);

            if let Ok(glyph_metrics) = self.glyph_metrics(glyph) {
                pen_x += f64::from(glyph_metrics.advance_width) * scale;
            }

            prev_glyph = Some(glyph);
        }

        path
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A tiny in-memory face for exercising the text-level operations.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::font::metrics::GlyphBoundingBox;

    /// Maps chars to glyphs 1.., each 500 units wide in a 1000 upem face,
    /// drawn as a box from the baseline up to 700 units.
    pub struct BoxFont {
        pub name: String,
        glyphs: HashMap<u32, u32>,
        metrics: FontMetrics,
        kerning: HashMap<(u32, u32), i32>,
        pub has_glyph_calls: AtomicUsize,
    }

    impl BoxFont {
        pub fn new(name: &str, chars: &str) -> Self {
            let glyphs = chars
                .chars()
                .enumerate()
                .map(|(i, ch)| (ch as u32, i as u32 + 1))
                .collect();
            Self {
                name: name.to_string(),
                glyphs,
                metrics: FontMetrics {
                    ascender: 800,
                    descender: -200,
                    line_gap: 100,
                    max_advance_width: 500,
                    max_advance_height: 1000,
                    underline_thickness: 50,
                    underline_position: -100,
                },
                kerning: HashMap::new(),
                has_glyph_calls: AtomicUsize::new(0),
            }
        }

        pub fn with_kerning(mut self, left: char, right: char, value: i32) -> Self {
            let l = self.glyph_index(left as u32);
            let r = self.glyph_index(right as u32);
            self.kerning.insert((l, r), value);
            self
        }

        pub fn calls(&self) -> usize {
            self.has_glyph_calls.load(Ordering::SeqCst)
        }
    }

    impl Font for BoxFont {
        fn family_name(&self) -> &str {
            &self.name
        }

        fn style_name(&self) -> &str {
            "Regular"
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn metrics(&self) -> &FontMetrics {
            &self.metrics
        }

        fn num_glyphs(&self) -> u32 {
            self.glyphs.len() as u32 + 1
        }

        fn has_glyph(&self, code_point: u32) -> bool {
            self.has_glyph_calls.fetch_add(1, Ordering::SeqCst);
            self.glyphs.contains_key(&code_point)
        }

        fn glyph_index(&self, code_point: u32) -> u32 {
            self.glyphs.get(&code_point).copied().unwrap_or(0)
        }

        fn glyph_metrics(&self, glyph_index: u32) -> Result<GlyphMetrics, FontError> {
            if glyph_index >= self.num_glyphs() {
                return Err(FontError::InvalidGlyphIndex {
                    index: glyph_index,
                    count: self.num_glyphs(),
                });
            }
            Ok(GlyphMetrics {
                advance_width: 500,
                advance_height: 1000,
                left_side_bearing: 50,
                top_side_bearing: 100,
                bounding_box: GlyphBoundingBox::new(50, 0, 450, 700),
            })
        }

        fn glyph_path(&self, _glyph_index: u32, font_size: f64) -> Path {
            let s = font_size / 1000.0;
            let mut path = Path::new();
            path.move_to(50.0 * s, 0.0);
            path.line_to(450.0 * s, 0.0);
            path.line_to(450.0 * s, -700.0 * s);
            path.line_to(50.0 * s, -700.0 * s);
            path.close();
            path
        }

        fn kerning(&self, left: u32, right: u32, font_size: f64) -> f64 {
            self.kerning
                .get(&(left, right))
                .map(|&v| f64::from(v) * font_size / 1000.0)
                .unwrap_or(0.0)
        }
    }
}
