use std::path::PathBuf;

/// Errors surfaced while loading or querying a font face.
///
/// Coverage gaps (no face has a glyph) are never errors; the fallback chain
/// represents them as unresolved runs instead.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Font file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read font file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed font data: {0}")]
    Malformed(String),
    #[error("Invalid glyph index {index} (face has {count} glyphs)")]
    InvalidGlyphIndex { index: u32, count: u32 },
    #[error("Font reports zero units per em")]
    InvalidUnitsPerEm,
}

impl FontError {
    /// Maps an I/O failure for `path` to the matching variant, keeping
    /// "file not found" distinct from other read failures.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            FontError::NotFound(path)
        } else {
            FontError::Io { path, source }
        }
    }
}
