use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fontchain")]
#[command(version)]
#[command(about = "Per-character font fallback, measurement and outlines", long_about = None)]
#[command(after_help = "\
FONTS:
    Without --font, the chain is built from system font directories.
    Set FONTCHAIN_FONT_PATH to a list of directories to probe instead,
    or list them under [discovery] in the config file.

CONFIG:
    Settings are read from $XDG_CONFIG_HOME/fontchain/config.toml
    (~/.config/fontchain/config.toml when XDG_CONFIG_HOME is unset).")]
pub struct Cli {
    /// Font file to add to the chain, highest priority first (repeatable)
    #[arg(long = "font", value_name = "FILE", global = true)]
    pub fonts: Vec<PathBuf>,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show how text splits into runs of characters sharing a font
    Runs { text: String },

    /// Measure text laid out on a single line
    Measure {
        text: String,

        /// Font size in pixels
        #[arg(long)]
        size: Option<f64>,
    },

    /// Print the outline of text as SVG path data
    Path {
        text: String,

        /// Font size in pixels
        #[arg(long)]
        size: Option<f64>,

        /// Pen x position
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,

        /// Baseline y position
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
    },

    /// List the fonts in the chain, in priority order
    Fonts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fonts() {
        let cli = Cli::parse_from(["fontchain", "fonts"]);
        assert!(matches!(cli.command, Command::Fonts));
        assert!(cli.fonts.is_empty());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_runs() {
        let cli = Cli::parse_from(["fontchain", "runs", "héllo 世界"]);
        match cli.command {
            Command::Runs { text } => assert_eq!(text, "héllo 世界"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_measure_with_size() {
        let cli = Cli::parse_from(["fontchain", "measure", "abc", "--size", "24"]);
        match cli.command {
            Command::Measure { text, size } => {
                assert_eq!(text, "abc");
                assert_eq!(size, Some(24.0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_path_position() {
        let cli = Cli::parse_from(["fontchain", "path", "A", "--x", "-10", "--y", "32.5"]);
        match cli.command {
            Command::Path { text, size, x, y } => {
                assert_eq!(text, "A");
                assert_eq!(size, None);
                assert_eq!(x, -10.0);
                assert_eq!(y, 32.5);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_font_flag_is_global_and_repeatable() {
        let cli = Cli::parse_from([
            "fontchain",
            "--font",
            "Latin.ttf",
            "runs",
            "abc",
            "--font",
            "Emoji.ttf",
        ]);
        assert_eq!(
            cli.fonts,
            vec![PathBuf::from("Latin.ttf"), PathBuf::from("Emoji.ttf")]
        );
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["fontchain"]).is_err());
    }
}
