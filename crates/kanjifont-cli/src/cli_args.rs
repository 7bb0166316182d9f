//! CLI argument definitions for the kanjifont command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use kanjifont_backend::preview::SHEET_COLUMNS;
use kanjifont_cli::input::ConfigOverrides;

/// kanjifont - JIS bitmap font table builder
#[derive(Parser)]
#[command(name = "kanjifont")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build a font table and write it in the configured format
    Generate {
        /// JSON config file (flags override its fields)
        #[arg(short, long)]
        config: Option<String>,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Print one line per glyph
        #[arg(short, long)]
        verbose: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,

        /// Write <name>.report.json next to the artifacts
        #[arg(long)]
        report: bool,
    },

    /// Render characters and print their bit-planes as ASCII art
    Preview {
        /// Characters to render
        #[arg(short, long)]
        text: String,

        /// JSON config file (flags override its fields)
        #[arg(short, long)]
        config: Option<String>,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Also write a grayscale PNG contact sheet
        #[arg(long)]
        png: Option<String>,

        /// Glyphs per sheet row
        #[arg(long, default_value_t = SHEET_COLUMNS)]
        columns: u32,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the header and block table of a FONTX2 file
    Inspect {
        /// FONTX2 file to read
        #[arg(short, long)]
        file: String,

        /// Print the glyph for this code (hex, e.g. 0x3021)
        #[arg(long)]
        code: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the code-set presets and their JIS ranges
    Charsets {
        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}
