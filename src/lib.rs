pub mod cli;
pub mod config;
pub mod constants;
pub mod font;
pub mod path;

use std::sync::Arc;

use log::info;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::font::{discover_system_fonts, FontFallbackChain, FontRef, TrueTypeFont};

pub use crate::font::{Font, FontError, FontRun, TextMetrics};
pub use crate::path::{Path, PathCommand, Point};

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let chain = build_chain(&cli, &config)?;
    info!("Fallback chain has {} fonts", chain.len());

    match &cli.command {
        Command::Runs { text } => {
            for run in chain.split_into_font_runs(text) {
                println!(
                    "{}..{}\t{}\t{:?}",
                    run.start,
                    run.end(),
                    font_label(run.font.as_ref()),
                    run.text
                );
            }
        }
        Command::Measure { text, size } => {
            let size = size.unwrap_or_else(|| config.font_size());
            let metrics = chain.measure_text(text, size);
            println!("width:       {:.3}", metrics.width);
            println!("height:      {:.3}", metrics.height);
            println!("ascent:      {:.3}", metrics.ascent);
            println!("descent:     {:.3}", metrics.descent);
            println!("line height: {:.3}", metrics.line_height);
        }
        Command::Path { text, size, x, y } => {
            let size = size.unwrap_or_else(|| config.font_size());
            let path = chain.text_path(text, *x, *y, size);
            println!("{}", path.to_svg_data());
        }
        Command::Fonts => {
            for (i, font) in chain.fonts().iter().enumerate() {
                println!(
                    "{}\t{}\t{} glyphs\t{} upem",
                    i,
                    font.full_name(),
                    font.num_glyphs(),
                    font.units_per_em()
                );
            }
        }
    }

    Ok(())
}

/// Fonts named on the command line replace discovery entirely; a file that
/// fails to load is an error rather than a skipped candidate.
fn build_chain(cli: &Cli, config: &Config) -> Result<FontFallbackChain, FontError> {
    if cli.fonts.is_empty() {
        return Ok(discover_system_fonts(&config.discovery_options()));
    }

    let mut chain = FontFallbackChain::new();
    for path in &cli.fonts {
        let font = TrueTypeFont::from_file(path)?;
        info!("Loaded font '{}' from {}", font.full_name(), path.display());
        chain.add_font(Arc::new(font) as FontRef);
    }
    Ok(chain)
}

fn font_label(font: Option<&FontRef>) -> String {
    match font {
        Some(font) => font.full_name(),
        None => "<missing>".to_string(),
    }
}
