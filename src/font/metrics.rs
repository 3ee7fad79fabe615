//! Font-wide, per-glyph and per-text measurements.
//!
//! Font and glyph metrics are integers in font design units. Scaling maps each
//! field by `size / units_per_em` and rounds every field on its own, so derived
//! values computed from scaled fields may differ by one from the same value
//! scaled directly.

/// Converts design units to the target size.
///
/// `units_per_em` is positive for every loaded face; a zero value collapses
/// everything to zero instead of dividing by zero.
pub fn scale_factor(size: f64, units_per_em: u16) -> f64 {
    if units_per_em == 0 {
        0.0
    } else {
        size / f64::from(units_per_em)
    }
}

fn scale_field(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor).round() as i32
}

/// Face-wide metrics in design units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontMetrics {
    pub ascender: i32,
    /// Negative for faces whose descent lies below the baseline.
    pub descender: i32,
    pub line_gap: i32,
    pub max_advance_width: i32,
    pub max_advance_height: i32,
    pub underline_thickness: i32,
    pub underline_position: i32,
}

impl FontMetrics {
    pub fn line_height(&self) -> i32 {
        self.ascender - self.descender + self.line_gap
    }

    /// Scales every field to `size`, rounding each one independently.
    pub fn scale(&self, size: f64, units_per_em: u16) -> FontMetrics {
        let factor = scale_factor(size, units_per_em);
        FontMetrics {
            ascender: scale_field(self.ascender, factor),
            descender: scale_field(self.descender, factor),
            line_gap: scale_field(self.line_gap, factor),
            max_advance_width: scale_field(self.max_advance_width, factor),
            max_advance_height: scale_field(self.max_advance_height, factor),
            underline_thickness: scale_field(self.underline_thickness, factor),
            underline_position: scale_field(self.underline_position, factor),
        }
    }
}

/// Glyph bounds in design units. Zero-sized for glyphs without ink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphBoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl GlyphBoundingBox {
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn scale(&self, size: f64, units_per_em: u16) -> GlyphBoundingBox {
        let factor = scale_factor(size, units_per_em);
        GlyphBoundingBox {
            x_min: scale_field(self.x_min, factor),
            y_min: scale_field(self.y_min, factor),
            x_max: scale_field(self.x_max, factor),
            y_max: scale_field(self.y_max, factor),
        }
    }
}

/// Per-glyph metrics in design units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub advance_width: i32,
    pub advance_height: i32,
    pub left_side_bearing: i32,
    pub top_side_bearing: i32,
    pub bounding_box: GlyphBoundingBox,
}

impl GlyphMetrics {
    pub fn scale(&self, size: f64, units_per_em: u16) -> GlyphMetrics {
        let factor = scale_factor(size, units_per_em);
        GlyphMetrics {
            advance_width: scale_field(self.advance_width, factor),
            advance_height: scale_field(self.advance_height, factor),
            left_side_bearing: scale_field(self.left_side_bearing, factor),
            top_side_bearing: scale_field(self.top_side_bearing, factor),
            bounding_box: self.bounding_box.scale(size, units_per_em),
        }
    }
}

/// Measurements of a laid-out span of text, in the target size's units.
///
/// `descent` is a positive distance below the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
    pub descent: f64,
    pub line_height: f64,
}
