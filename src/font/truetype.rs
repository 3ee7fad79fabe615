//! TrueType/OpenType face backed by `ttf-parser`.

use std::path::Path as FsPath;
use std::sync::Arc;

use ttf_parser::{name_id, GlyphId};

use super::error::FontError;
use super::metrics::{scale_factor, FontMetrics, GlyphBoundingBox, GlyphMetrics};
use super::traits::Font;
use crate::path::Path;

/// A parsed TrueType or OpenType face.
///
/// Keeps the raw bytes plus everything extracted at load time. Glyph queries
/// re-borrow a `ttf_parser::Face` over the bytes, which is cheap (header
/// validation and table offsets, no allocation).
pub struct TrueTypeFont {
    data: Arc<[u8]>,
    index: u32,
    family_name: String,
    style_name: String,
    units_per_em: u16,
    num_glyphs: u16,
    metrics: FontMetrics,
}

impl TrueTypeFont {
    /// Parses the first face in `data`.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        Self::from_shared(Arc::from(data.into_boxed_slice()), 0)
    }

    /// Parses face `index` of a font file or collection.
    pub fn from_shared(data: Arc<[u8]>, index: u32) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|err| FontError::Malformed(err.to_string()))?;

        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(FontError::InvalidUnitsPerEm);
        }

        let family_name = find_name(&face, &[name_id::TYPOGRAPHIC_FAMILY, name_id::FAMILY])
            .unwrap_or_else(|| "Unknown".to_string());
        let style_name = find_name(
            &face,
            &[name_id::TYPOGRAPHIC_SUBFAMILY, name_id::SUBFAMILY],
        )
        .unwrap_or_else(|| "Regular".to_string());

        let metrics = read_font_metrics(&face);
        let num_glyphs = face.number_of_glyphs();

        log::debug!(
            "Parsed face '{} {}': {} glyphs, {} units/em",
            family_name,
            style_name,
            num_glyphs,
            units_per_em
        );

        Ok(Self {
            family_name,
            style_name,
            units_per_em,
            num_glyphs,
            metrics,
            data,
            index,
        })
    }

    /// Reads and parses a font file.
    ///
    /// A missing file is reported as [`FontError::NotFound`], distinct from
    /// data that fails to parse.
    pub fn from_file(path: impl AsRef<FsPath>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|err| FontError::from_io(path, err))?;
        Self::from_bytes(data)
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        // The bytes parsed at construction, so this only fails if they did.
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }

    fn glyph_id(&self, glyph_index: u32) -> Option<GlyphId> {
        u16::try_from(glyph_index)
            .ok()
            .filter(|&id| id < self.num_glyphs)
            .map(GlyphId)
    }
}

fn find_name(face: &ttf_parser::Face<'_>, ids: &[u16]) -> Option<String> {
    ids.iter().find_map(|&id| {
        face.names()
            .into_iter()
            .filter(|name| name.name_id == id && name.is_unicode())
            .find_map(|name| name.to_string())
            .filter(|name| !name.is_empty())
    })
}

fn read_font_metrics(face: &ttf_parser::Face<'_>) -> FontMetrics {
    let ascender = i32::from(face.ascender());
    let descender = i32::from(face.descender());

    let glyphs = (0..face.number_of_glyphs()).map(GlyphId);
    let max_advance_width = glyphs
        .clone()
        .filter_map(|gid| face.glyph_hor_advance(gid))
        .max()
        .map(i32::from)
        .unwrap_or(0);
    let max_advance_height = glyphs
        .filter_map(|gid| face.glyph_ver_advance(gid))
        .max()
        .map(i32::from)
        .unwrap_or(ascender - descender);

    let (underline_position, underline_thickness) = face
        .underline_metrics()
        .map(|line| (i32::from(line.position), i32::from(line.thickness)))
        .unwrap_or((0, 0));

    FontMetrics {
        ascender,
        descender,
        line_gap: i32::from(face.line_gap()),
        max_advance_width,
        max_advance_height,
        underline_thickness,
        underline_position,
    }
}

impl Font for TrueTypeFont {
    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn style_name(&self) -> &str {
        &self.style_name
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    fn num_glyphs(&self) -> u32 {
        u32::from(self.num_glyphs)
    }

    fn has_glyph(&self, code_point: u32) -> bool {
        let Some(ch) = char::from_u32(code_point) else {
            return false;
        };
        // A cmap entry pointing at notdef is not coverage.
        self.face()
            .and_then(|face| face.glyph_index(ch))
            .is_some_and(|gid| gid.0 != 0)
    }

    fn glyph_index(&self, code_point: u32) -> u32 {
        char::from_u32(code_point)
            .and_then(|ch| self.face()?.glyph_index(ch))
            .map(|gid| u32::from(gid.0))
            .unwrap_or(0)
    }

    fn glyph_metrics(&self, glyph_index: u32) -> Result<GlyphMetrics, FontError> {
        let invalid = || FontError::InvalidGlyphIndex {
            index: glyph_index,
            count: u32::from(self.num_glyphs),
        };
        let gid = self.glyph_id(glyph_index).ok_or_else(invalid)?;
        let face = self.face().ok_or_else(invalid)?;

        let bounding_box = face
            .glyph_bounding_box(gid)
            .map(|rect| {
                GlyphBoundingBox::new(
                    i32::from(rect.x_min),
                    i32::from(rect.y_min),
                    i32::from(rect.x_max),
                    i32::from(rect.y_max),
                )
            })
            .unwrap_or_default();

        Ok(GlyphMetrics {
            advance_width: face.glyph_hor_advance(gid).map(i32::from).unwrap_or(0),
            advance_height: face
                .glyph_ver_advance(gid)
                .map(i32::from)
                .unwrap_or(self.metrics.ascender - self.metrics.descender),
            left_side_bearing: face.glyph_hor_side_bearing(gid).map(i32::from).unwrap_or(0),
            top_side_bearing: face.glyph_ver_side_bearing(gid).map(i32::from).unwrap_or(0),
            bounding_box,
        })
    }

    fn glyph_path(&self, glyph_index: u32, font_size: f64) -> Path {
        let mut path = Path::new();
        let (Some(gid), Some(face)) = (self.glyph_id(glyph_index), self.face()) else {
            return path;
        };

        let mut sink = OutlineSink {
            path: &mut path,
            scale: scale_factor(font_size, self.units_per_em),
        };
        // Glyphs without an outline (space) leave the path empty.
        let _ = face.outline_glyph(gid, &mut sink);
        path
    }

    fn kerning(&self, left: u32, right: u32, font_size: f64) -> f64 {
        let (Some(left), Some(right)) = (self.glyph_id(left), self.glyph_id(right)) else {
            return 0.0;
        };
        let Some(face) = self.face() else {
            return 0.0;
        };

        face.tables()
            .kern
            .and_then(|kern| {
                kern.subtables
                    .into_iter()
                    .filter(|subtable| subtable.horizontal)
                    .find_map(|subtable| subtable.glyphs_kerning(left, right))
            })
            .map(|value| f64::from(value) * scale_factor(font_size, self.units_per_em))
            .unwrap_or(0.0)
    }
}

/// Receives `ttf-parser` outline commands, scaling design units to the
/// target size and flipping y so it grows downwards.
struct OutlineSink<'a> {
    path: &'a mut Path,
    scale: f64,
}

impl OutlineSink<'_> {
    fn x(&self, x: f32) -> f64 {
        f64::from(x) * self.scale
    }

    fn y(&self, y: f32) -> f64 {
        -f64::from(y) * self.scale
    }
}

impl ttf_parser::OutlineBuilder for OutlineSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.x(x), self.y(y));
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.x(x), self.y(y));
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1, x, y) = (self.x(x1), self.y(y1), self.x(x), self.y(y));
        self.path.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = (self.x(x1), self.y(y1));
        let (x2, y2) = (self.x(x2), self.y(y2));
        let (x, y) = (self.x(x), self.y(y));
        self.path.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.path.close();
    }
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("family_name", &self.family_name)
            .field("style_name", &self.style_name)
            .field("units_per_em", &self.units_per_em)
            .field("num_glyphs", &self.num_glyphs)
            .field("bytes_len", &self.data.len())
            .finish()
    }
}
