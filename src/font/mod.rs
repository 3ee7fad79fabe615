mod cache;
mod discovery;
mod error;
mod fallback;
mod metrics;
mod run;
mod traits;
mod truetype;

pub use cache::{CacheStats, GlyphFontCache};
pub use discovery::{
    discover_fonts_with, discover_system_fonts, expand_home, font_directories, DiscoveryOptions,
    COMMON_FONT_NAMES,
};
pub use error::FontError;
pub use fallback::FontFallbackChain;
pub use metrics::{scale_factor, FontMetrics, GlyphBoundingBox, GlyphMetrics, TextMetrics};
pub use run::{FontRun, FontRunIterator};
pub use traits::{same_font, Font, FontRef};
pub use truetype::TrueTypeFont;
