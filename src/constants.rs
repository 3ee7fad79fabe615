/// Line height as a multiple of the tallest run (or of the font size when the
/// chain is empty).
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Placeholder advance, in ems, for each character no face can render.
pub const MISSING_GLYPH_ADVANCE_EM: f64 = 0.5;

pub const DEFAULT_FONT_SIZE: f64 = 16.0;

// Discovery constants
pub const DEFAULT_MAX_FONTS: usize = 10;
pub const FONT_PATH_ENV: &str = "FONTCHAIN_FONT_PATH";
pub const FONT_EXTENSIONS: &[&str] = &[".ttf", ".otf", ".TTF", ".OTF"];
