//! Config resolution.
//!
//! A run's [`PipelineConfig`] comes from an optional JSON config file with
//! every field overridable by a command-line flag. Flags win.

use anyhow::{Context, Result};
use clap::Args;
use kanjifont_spec::{CodeSet, EncodingAxis, OutputFormat, PipelineConfig, Terminator};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config fields settable from the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Outline font file (TTF/OTF)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Cell width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Cell height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Horizontal render offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub offset_x: Option<i32>,

    /// Vertical render offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub offset_y: Option<i32>,

    /// Character repertoire
    #[arg(long, value_parser = ["full", "level1", "kyoiku", "custom", "minimal"])]
    pub code_set: Option<String>,

    /// Allow-list file for the custom code set
    #[arg(long)]
    pub charlist: Option<PathBuf>,

    /// Render 0xA1-0xDF as half-width katakana
    #[arg(long)]
    pub kana: bool,

    /// Output format
    #[arg(long, value_parser = ["cdata", "binary", "python", "fontx", "bdf"])]
    pub format: Option<String>,

    /// Encoding axis that keys the output
    #[arg(long, value_parser = ["utf8", "sjis", "jis"])]
    pub encoding: Option<String>,

    /// Encoding axis the table is sorted by (default: --encoding)
    #[arg(long, value_parser = ["utf8", "sjis", "jis"])]
    pub sort_by: Option<String>,

    /// Sentinel record appended to the table
    #[arg(long, value_parser = ["none", "zero", "max"])]
    pub terminator: Option<String>,

    /// Write half-width and full-width glyphs to separate files (bdf only)
    #[arg(long)]
    pub split: bool,

    /// Font name used for artifact names and identifiers
    #[arg(long)]
    pub name: Option<String>,

    /// Output directory (default: current directory)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Applies every set field to `config`.
    pub fn apply(&self, mut config: PipelineConfig) -> Result<PipelineConfig> {
        if let Some(ref font) = self.font {
            config.font_path = Some(font.clone());
        }
        if let Some(width) = self.width {
            config.cell.width = width;
        }
        if let Some(height) = self.height {
            config.cell.height = height;
        }
        if let Some(x) = self.offset_x {
            config.offset.x = x;
        }
        if let Some(y) = self.offset_y {
            config.offset.y = y;
        }
        if let Some(ref set) = self.code_set {
            config.code_set = parse_value::<CodeSet>(set)?;
        }
        if let Some(ref path) = self.charlist {
            config.charlist_path = Some(path.clone());
        }
        if self.kana {
            config.kana = true;
        }
        if let Some(ref format) = self.format {
            config.format = parse_value::<OutputFormat>(format)?;
        }
        if let Some(ref axis) = self.encoding {
            config.encoding = parse_value::<EncodingAxis>(axis)?;
        }
        if let Some(ref axis) = self.sort_by {
            config.sort_by = Some(parse_value::<EncodingAxis>(axis)?);
        }
        if let Some(ref terminator) = self.terminator {
            config.terminator = parse_value::<Terminator>(terminator)?;
        }
        if self.split {
            config.split = true;
        }
        if let Some(ref name) = self.name {
            config.font_name = name.clone();
        }
        if let Some(ref dir) = self.out_dir {
            config.output_dir = dir.clone();
        }
        Ok(config)
    }
}

fn parse_value<T>(value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    T::from_str(value).map_err(anyhow::Error::msg)
}

/// Loads a config file, or starts from defaults, then applies `overrides`.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<PipelineConfig> {
    let base = match config_path {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    overrides.apply(base)
}
