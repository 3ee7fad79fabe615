use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_FONT_SIZE, DEFAULT_MAX_FONTS};
use crate::font::{expand_home, font_directories, DiscoveryOptions, COMMON_FONT_NAMES};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub text: TextSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TextSettings {
    pub size: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DiscoverySettings {
    /// Directories to probe instead of the platform defaults. `~` expands to
    /// the home directory.
    pub directories: Option<Vec<String>>,
    /// Font file names (without extension), in priority order.
    pub fonts: Option<Vec<String>>,
    pub max_fonts: Option<usize>,
}

impl Config {
    /// Loads the user config, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load() -> Self {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read config file: {}", e);
                return Config::default();
            }
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Config::default()
            }
        }
    }

    pub fn font_size(&self) -> f64 {
        self.text.size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        let settings = &self.discovery;
        DiscoveryOptions {
            directories: settings
                .directories
                .as_ref()
                .map(|list| list.iter().map(|dir| expand_home(dir)).collect())
                .unwrap_or_else(font_directories),
            names: settings.fonts.clone().unwrap_or_else(|| {
                COMMON_FONT_NAMES.iter().map(|name| name.to_string()).collect()
            }),
            max_fonts: settings.max_fonts.unwrap_or(DEFAULT_MAX_FONTS),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Some(config_dir) = std::env::var_os("XDG_CONFIG_HOME") {
        Some(
            PathBuf::from(config_dir)
                .join("fontchain")
                .join("config.toml"),
        )
    } else {
        dirs::home_dir().map(|home| home.join(".config").join("fontchain").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.text.size, None);
        assert_eq!(config.font_size(), DEFAULT_FONT_SIZE);
        assert!(config.discovery.fonts.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [text]
            size = 24.0

            [discovery]
            directories = ["/opt/fonts/"]
            fonts = ["Inter-Regular", "NotoSansCJK-Regular"]
            max_fonts = 3
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.font_size(), 24.0);

        let options = config.discovery_options();
        assert_eq!(options.directories, vec![PathBuf::from("/opt/fonts/")]);
        assert_eq!(options.names, vec!["Inter-Regular", "NotoSansCJK-Regular"]);
        assert_eq!(options.max_fonts, 3);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
            [discovery]
            max_fonts = 1
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.text.size, None);

        let options = config.discovery_options();
        assert_eq!(options.max_fonts, 1);
        assert_eq!(options.names.len(), COMMON_FONT_NAMES.len());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/fontchain/config.toml"));
        assert_eq!(config.font_size(), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("fontchain-config-{}.toml", std::process::id()));
        fs::write(&path, "[text]\nsize = \"large\"\n").unwrap();

        let config = Config::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(config.text.size, None);
    }
}
