use crate::constants::{LINE_HEIGHT_FACTOR, MISSING_GLYPH_ADVANCE_EM};
use crate::path::Path;

use super::cache::{CacheStats, GlyphFontCache};
use super::metrics::TextMetrics;
use super::run::{FontRun, FontRunIterator};
use super::traits::{same_font, Font, FontRef};

/// Priority-ordered list of faces used to render text that no single face
/// covers.
///
/// Each character is rendered by the first face in the chain that has a
/// glyph for it. Resolutions are memoized per code point; the memo is
/// cleared whenever the face list changes. Duplicates are allowed and order
/// is significant.
pub struct FontFallbackChain {
    fonts: Vec<FontRef>,
    cache: GlyphFontCache,
}

impl FontFallbackChain {
    pub fn new() -> Self {
        Self {
            fonts: Vec::new(),
            cache: GlyphFontCache::new(),
        }
    }

    pub fn with_fonts(fonts: impl IntoIterator<Item = FontRef>) -> Self {
        Self {
            fonts: fonts.into_iter().collect(),
            cache: GlyphFontCache::new(),
        }
    }

    pub fn fonts(&self) -> &[FontRef] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The first face in the chain.
    pub fn primary_font(&self) -> Option<&FontRef> {
        self.fonts.first()
    }

    /// Appends a face at the lowest priority.
    pub fn add_font(&mut self, font: FontRef) {
        self.fonts.push(font);
        self.invalidate();
    }

    /// Inserts a face at `index`, clamped to the end of the chain.
    pub fn insert_font(&mut self, index: usize, font: FontRef) {
        let index = index.min(self.fonts.len());
        self.fonts.insert(index, font);
        self.invalidate();
    }

    /// Removes every occurrence of `font`. Returns false if it was not in
    /// the chain.
    pub fn remove_font(&mut self, font: &FontRef) -> bool {
        let before = self.fonts.len();
        self.fonts.retain(|candidate| !same_font(candidate, font));
        let removed = self.fonts.len() != before;
        if removed {
            self.invalidate();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        if !self.cache.is_empty() {
            log::debug!(
                "Face list changed, dropping {} cached resolutions",
                self.cache.len()
            );
        }
        self.cache.clear();
    }

    /// Resolves the face that renders `code_point`, or `None` if no face in
    /// the chain covers it.
    pub fn font_for_character(&self, code_point: u32) -> Option<FontRef> {
        if let Some(cached) = self.cache.get(code_point) {
            return cached;
        }

        let resolved = self
            .fonts
            .iter()
            .find(|font| font.has_glyph(code_point))
            .cloned();
        self.cache.insert(code_point, resolved.clone());
        resolved
    }

    /// Face for the first character of `text`.
    ///
    /// An empty string yields the primary face, even if it cannot render
    /// anything, so callers always have a default for layout.
    pub fn font_for_string(&self, text: &str) -> Option<FontRef> {
        match text.chars().next() {
            Some(first) => self.font_for_character(first as u32),
            None => self.primary_font().cloned(),
        }
    }

    pub fn has_glyph(&self, code_point: u32) -> bool {
        self.font_for_character(code_point).is_some()
    }

    /// Lazily splits `text` into runs of characters sharing a face.
    pub fn font_runs<'a>(&'a self, text: &'a str) -> FontRunIterator<'a> {
        FontRunIterator::new(self, text)
    }

    /// Splits `text` into maximal runs of characters sharing a face.
    ///
    /// The run texts concatenate back to `text`. Empty text or an empty chain
    /// yields no runs; text no face can render yields runs with no face.
    pub fn split_into_font_runs<'a>(&'a self, text: &'a str) -> Vec<FontRun<'a>> {
        self.font_runs(text).collect()
    }

    /// Measures `text` laid out left to right across all of its runs.
    ///
    /// Widths add up; height, ascent and descent take the largest run. Runs
    /// no face can render count half an em per character and a full em of
    /// height, and draw nothing.
    pub fn measure_text(&self, text: &str, font_size: f64) -> TextMetrics {
        if self.is_empty() {
            return TextMetrics {
                line_height: font_size * LINE_HEIGHT_FACTOR,
                ..TextMetrics::default()
            };
        }

        let mut width = 0.0_f64;
        let mut max_height = 0.0_f64;
        let mut max_ascent = 0.0_f64;
        let mut max_descent = 0.0_f64;

        for run in self.font_runs(text) {
            match &run.font {
                Some(font) => {
                    let metrics = font.measure_text(run.text, font_size);
                    width += metrics.width;
                    max_height = max_height.max(metrics.height);
                    max_ascent = max_ascent.max(metrics.ascent);
                    max_descent = max_descent.max(metrics.descent);
                }
                None => {
                    width += missing_run_advance(&run, font_size);
                    max_height = max_height.max(font_size);
                }
            }
        }

        TextMetrics {
            width,
            height: max_height,
            ascent: max_ascent,
            descent: max_descent,
            line_height: max_height * LINE_HEIGHT_FACTOR,
        }
    }

    /// Outline of `text` with the pen starting at `(x, y)` on the baseline.
    ///
    /// Each run is outlined by its own face at the current pen position and
    /// the pen then moves by the run's measured width. The result is a single
    /// path spanning every run.
    pub fn text_path(&self, text: &str, x: f64, y: f64, font_size: f64) -> Path {
        let mut path = Path::new();
        let mut pen_x = x;

        for run in self.font_runs(text) {
            match &run.font {
                Some(font) => {
                    let run_path = font.text_path(run.text, pen_x, y, font_size);
                    path.extend(run_path.commands().iter().copied());
                    pen_x += font.measure_text(run.text, font_size).width;
                }
                None => pen_x += missing_run_advance(&run, font_size),
            }
        }

        path
    }

    /// Number of code points with a memoized resolution.
    pub fn cached_resolutions(&self) -> usize {
        self.cache.len()
    }

    pub fn is_cached(&self, code_point: u32) -> bool {
        self.cache.contains(code_point)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for FontFallbackChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontFallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFallbackChain")
            .field(
                "fonts",
                &self
                    .fonts
                    .iter()
                    .map(|font| font.full_name())
                    .collect::<Vec<_>>(),
            )
            .field("cached", &self.cache.len())
            .finish()
    }
}

/// Placeholder advance for characters no face can render.
fn missing_run_advance(run: &FontRun<'_>, font_size: f64) -> f64 {
    font_size * MISSING_GLYPH_ADVANCE_EM * run.char_count() as f64
}
