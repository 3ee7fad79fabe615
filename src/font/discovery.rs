//! Best-effort population of a fallback chain from platform font directories.
//!
//! Discovery probes `{directory}{name}{extension}` for a list of well-known
//! file names. Files that fail to load are logged and skipped; finding no
//! fonts at all is a warning, not an error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{DEFAULT_MAX_FONTS, FONT_EXTENSIONS, FONT_PATH_ENV};

use super::error::FontError;
use super::fallback::FontFallbackChain;
use super::traits::{Font, FontRef};
use super::truetype::TrueTypeFont;

/// File names (without extension) tried when the caller supplies none.
/// Ordered so broad Latin coverage comes first and symbol/CJK faces later.
pub const COMMON_FONT_NAMES: &[&str] = &[
    "DejaVuSans",
    "LiberationSans-Regular",
    "NotoSans-Regular",
    "Arial",
    "arial",
    "Helvetica",
    "Roboto-Regular",
    "Ubuntu-R",
    "Cantarell-Regular",
    "FreeSans",
    "Verdana",
    "verdana",
    "segoeui",
    "Tahoma",
    "tahoma",
    "NotoSansSymbols-Regular",
    "NotoSansSymbols2-Regular",
    "NotoSansCJK-Regular",
    "NotoSansCJKsc-Regular",
    "DroidSansFallbackFull",
    "msyh",
    "simsun",
    "Symbola",
    "seguisym",
    "NotoColorEmoji",
    "AppleColorEmoji",
];

#[cfg(target_os = "macos")]
fn platform_font_directories() -> Vec<String> {
    vec![
        "/System/Library/Fonts/".to_string(),
        "/System/Library/Fonts/Supplemental/".to_string(),
        "/Library/Fonts/".to_string(),
        "~/Library/Fonts/".to_string(),
    ]
}

#[cfg(target_os = "windows")]
fn platform_font_directories() -> Vec<String> {
    let windir = std::env::var("WINDIR").unwrap_or_else(|_| "C:\\Windows".to_string());
    let mut directories = vec![format!("{}\\Fonts\\", windir)];
    if let Some(local) = dirs::data_local_dir() {
        directories.push(format!(
            "{}\\Microsoft\\Windows\\Fonts\\",
            local.display()
        ));
    }
    directories
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_font_directories() -> Vec<String> {
    [
        "/usr/share/fonts/truetype/dejavu/",
        "/usr/share/fonts/truetype/liberation/",
        "/usr/share/fonts/truetype/noto/",
        "/usr/share/fonts/truetype/freefont/",
        "/usr/share/fonts/truetype/ubuntu/",
        "/usr/share/fonts/opentype/noto/",
        "/usr/share/fonts/noto/",
        "/usr/share/fonts/noto-cjk/",
        "/usr/share/fonts/dejavu/",
        "/usr/share/fonts/TTF/",
        "/usr/share/fonts/",
        "/usr/local/share/fonts/",
        "~/.local/share/fonts/",
        "~/.fonts/",
    ]
    .iter()
    .map(|dir| dir.to_string())
    .collect()
}

/// Replaces a leading `~` with the current user's home directory.
///
/// Works on path components, so non-UTF-8 directory names pass through
/// untouched.
pub fn expand_home(dir: impl AsRef<Path>) -> PathBuf {
    let dir = dir.as_ref();
    match (dir.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) if rest.as_os_str().is_empty() => home,
        (Ok(rest), Some(home)) => home.join(rest),
        _ => dir.to_path_buf(),
    }
}

/// Font directories for this platform, or the ones listed in
/// `FONTCHAIN_FONT_PATH` when it is set.
pub fn font_directories() -> Vec<PathBuf> {
    match std::env::var_os(FONT_PATH_ENV) {
        Some(paths) if !paths.is_empty() => std::env::split_paths(&paths)
            .map(expand_home)
            .collect(),
        _ => platform_font_directories()
            .iter()
            .map(|dir| expand_home(dir))
            .collect(),
    }
}

/// What to probe and how many faces to keep.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub directories: Vec<PathBuf>,
    pub names: Vec<String>,
    pub max_fonts: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            directories: font_directories(),
            names: COMMON_FONT_NAMES.iter().map(|name| name.to_string()).collect(),
            max_fonts: DEFAULT_MAX_FONTS,
        }
    }
}

/// Builds a chain from system fonts, parsing candidates as TrueType/OpenType.
pub fn discover_system_fonts(options: &DiscoveryOptions) -> FontFallbackChain {
    discover_fonts_with(options, |path| {
        TrueTypeFont::from_file(path).map(|font| Arc::new(font) as FontRef)
    })
}

/// Builds a chain by probing every name across every directory, loading the
/// first candidate per name that `load` accepts.
///
/// Names are tried in order, so the chain keeps their priority. Probing stops
/// once `max_fonts` faces are loaded.
pub fn discover_fonts_with<L>(options: &DiscoveryOptions, mut load: L) -> FontFallbackChain
where
    L: FnMut(&Path) -> Result<FontRef, FontError>,
{
    let mut chain = FontFallbackChain::new();

    for name in &options.names {
        if chain.len() >= options.max_fonts {
            break;
        }

        match load_first_match(&options.directories, name, &mut load) {
            Some(font) => chain.add_font(font),
            None => log::debug!("No usable font file found for '{}'", name),
        }
    }

    if chain.is_empty() {
        log::warn!(
            "No fonts discovered in {} directories; text will render as placeholders",
            options.directories.len()
        );
    } else {
        log::info!("Discovered {} fallback fonts", chain.len());
    }

    chain
}

fn load_first_match<L>(directories: &[PathBuf], name: &str, load: &mut L) -> Option<FontRef>
where
    L: FnMut(&Path) -> Result<FontRef, FontError>,
{
    for directory in directories {
        for extension in FONT_EXTENSIONS {
            let candidate = directory.join(format!("{}{}", name, extension));
            if !candidate.is_file() {
                continue;
            }

            match load(&candidate) {
                Ok(font) => {
                    log::info!(
                        "Loaded font '{}' from {}",
                        font.full_name(),
                        candidate.display()
                    );
                    return Some(font);
                }
                Err(err) => {
                    log::warn!("Skipping font file {}: {}", candidate.display(), err);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::font::traits::test_support::BoxFont;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(tag: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "fontchain-discovery-{}-{}",
                std::process::id(),
                tag
            ));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn touch(&self, file: &str, contents: &str) {
            fs::write(self.0.join(file), contents).unwrap();
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    /// Files containing "bad" fail to parse; anything else becomes a face
    /// named after its contents.
    fn fake_loader(path: &Path) -> Result<FontRef, FontError> {
        let contents = fs::read_to_string(path).map_err(|err| FontError::from_io(path, err))?;
        if contents.contains("bad") {
            Err(FontError::Malformed("bad magic".to_string()))
        } else {
            Ok(Arc::new(BoxFont::new(contents.trim(), "a")))
        }
    }

    fn options(directories: &[&TempDir], names: &[&str], max_fonts: usize) -> DiscoveryOptions {
        DiscoveryOptions {
            directories: directories.iter().map(|dir| dir.0.clone()).collect(),
            names: names.iter().map(|name| name.to_string()).collect(),
            max_fonts,
        }
    }

    fn family_names(chain: &FontFallbackChain) -> Vec<String> {
        chain
            .fonts()
            .iter()
            .map(|font| font.family_name().to_string())
            .collect()
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/usr/share/fonts/"), PathBuf::from("/usr/share/fonts/"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.fonts/"), home.join(".fonts/"));
            assert_eq!(expand_home("~"), home);
        }
        // Only a leading "~/" is expanded.
        assert_eq!(expand_home("~user/fonts"), PathBuf::from("~user/fonts"));
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_home_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/opt/fonts-\xff/");
        assert_eq!(expand_home(raw), PathBuf::from(raw));

        if let Some(home) = dirs::home_dir() {
            let tilde = OsStr::from_bytes(b"~/f\xe9/");
            assert_eq!(
                expand_home(tilde),
                home.join(OsStr::from_bytes(b"f\xe9"))
            );
        }
    }

    #[test]
    fn test_names_keep_priority_order() {
        let dir = TempDir::new("order");
        dir.touch("Beta.ttf", "beta");
        dir.touch("Alpha.otf", "alpha");

        let chain = discover_fonts_with(&options(&[&dir], &["Alpha", "Beta"], 10), fake_loader);

        assert_eq!(family_names(&chain), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_first_directory_wins_per_name() {
        let first = TempDir::new("first");
        let second = TempDir::new("second");
        first.touch("Sans.TTF", "from-first");
        second.touch("Sans.ttf", "from-second");

        let chain =
            discover_fonts_with(&options(&[&first, &second], &["Sans"], 10), fake_loader);

        assert_eq!(family_names(&chain), vec!["from-first"]);
    }

    #[test]
    fn test_unparseable_candidate_is_skipped() {
        let dir = TempDir::new("skip");
        dir.touch("Broken.ttf", "bad");
        dir.touch("Broken.otf", "recovered");
        dir.touch("Other.ttf", "bad");

        let chain =
            discover_fonts_with(&options(&[&dir], &["Broken", "Other"], 10), fake_loader);

        assert_eq!(family_names(&chain), vec!["recovered"]);
    }

    #[test]
    fn test_max_fonts_limits_chain() {
        let dir = TempDir::new("max");
        for name in ["A", "B", "C"] {
            dir.touch(&format!("{}.ttf", name), name);
        }

        let chain = discover_fonts_with(&options(&[&dir], &["A", "B", "C"], 2), fake_loader);

        assert_eq!(family_names(&chain), vec!["A", "B"]);
    }

    #[test]
    fn test_nothing_found_is_empty_chain() {
        let dir = TempDir::new("empty");

        let chain = discover_fonts_with(&options(&[&dir], &["Missing"], 10), fake_loader);

        assert!(chain.is_empty());
    }

    #[test]
    fn test_system_discovery_skips_non_fonts() {
        let dir = TempDir::new("system");
        dir.touch("Fake.ttf", "not really a font");

        let chain = discover_system_fonts(&options(&[&dir], &["Fake"], 10));

        assert!(chain.is_empty());
    }

    #[test]
    fn test_default_options() {
        let options = DiscoveryOptions::default();
        assert_eq!(options.max_fonts, DEFAULT_MAX_FONTS);
        assert_eq!(options.names.len(), COMMON_FONT_NAMES.len());
    }
}
