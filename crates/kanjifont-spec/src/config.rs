//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is resolved once (JSON file, then CLI overrides),
//! validated, and then passed by reference to every stage. No stage keeps
//! its own copy of run-wide settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::entry::EncodingAxis;
use crate::error::SpecError;

/// Font name used for artifact file names and identifiers when none is given.
pub const DEFAULT_FONT_NAME: &str = "font";

/// Named character repertoires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeSet {
    /// Single-byte block, JIS symbols, level-1 and level-2 kanji.
    #[default]
    Full,
    /// Single-byte block, JIS symbols and level-1 kanji.
    Level1,
    /// Full repertoire filtered down to the compulsory-education kanji.
    Kyoiku,
    /// Full repertoire filtered by a user-supplied character list.
    Custom,
    /// Printable ASCII plus two kanji, for smoke tests.
    Minimal,
}

impl CodeSet {
    /// All code sets in listing order.
    pub const ALL: [CodeSet; 5] = [
        CodeSet::Full,
        CodeSet::Level1,
        CodeSet::Kyoiku,
        CodeSet::Custom,
        CodeSet::Minimal,
    ];

    /// Returns the config/CLI name of this code set.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeSet::Full => "full",
            CodeSet::Level1 => "level1",
            CodeSet::Kyoiku => "kyoiku",
            CodeSet::Custom => "custom",
            CodeSet::Minimal => "minimal",
        }
    }
}

impl fmt::Display for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodeSet::ALL
            .into_iter()
            .find(|set| set.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown code set '{}' (expected full, level1, kyoiku, custom or minimal)",
                    s
                )
            })
    }
}

/// Serialization target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// C header with a record array and a byte array.
    #[default]
    Cdata,
    /// Big-endian record file plus raw bitmap file.
    Binary,
    /// Python module with tuple list and bytes literal.
    Python,
    /// FONTX2 half-width and full-width files.
    Fontx,
    /// BDF glyph-description text.
    Bdf,
}

impl OutputFormat {
    /// All formats in listing order.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Cdata,
        OutputFormat::Binary,
        OutputFormat::Python,
        OutputFormat::Fontx,
        OutputFormat::Bdf,
    ];

    /// Returns the config/CLI name of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Cdata => "cdata",
            OutputFormat::Binary => "binary",
            OutputFormat::Python => "python",
            OutputFormat::Fontx => "fontx",
            OutputFormat::Bdf => "bdf",
        }
    }

    /// Returns whether this format can be keyed by the given axis.
    pub fn supports_axis(&self, axis: EncodingAxis) -> bool {
        match self {
            OutputFormat::Fontx => axis != EncodingAxis::Utf8,
            _ => true,
        }
    }

    /// Returns whether this format writes a record table that can end in a sentinel.
    pub fn supports_terminator(&self) -> bool {
        matches!(
            self,
            OutputFormat::Cdata | OutputFormat::Binary | OutputFormat::Python
        )
    }

    /// Returns whether this format can split half-width and full-width glyphs.
    pub fn supports_split(&self) -> bool {
        matches!(self, OutputFormat::Bdf)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown output format '{}' (expected cdata, binary, python, fontx or bdf)",
                    s
                )
            })
    }
}

/// End-of-table sentinel record policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminator {
    /// No sentinel record.
    #[default]
    None,
    /// A record with every field zero.
    Zero,
    /// A record with every field at its maximum value.
    Max,
}

impl Terminator {
    /// Returns the config/CLI name of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Terminator::None => "none",
            Terminator::Zero => "zero",
            Terminator::Max => "max",
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terminator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Terminator::None),
            "zero" => Ok(Terminator::Zero),
            "max" => Ok(Terminator::Max),
            other => Err(format!(
                "unknown terminator '{}' (expected none, zero or max)",
                other
            )),
        }
    }
}

/// Full-width cell size in pixels. Half-width glyphs use `width / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    /// Width of a half-width cell.
    pub fn half_width(&self) -> u32 {
        self.width / 2
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
        }
    }
}

/// Sub-cell pen position handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderOffset {
    pub x: i32,
    pub y: i32,
}

impl Default for RenderOffset {
    fn default() -> Self {
        Self { x: 0, y: -1 }
    }
}

/// Everything one pipeline run needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Outline font to rasterize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Full-width cell size.
    #[serde(default)]
    pub cell: CellSize,

    /// Pen offset inside the cell.
    #[serde(default)]
    pub offset: RenderOffset,

    /// Character repertoire.
    #[serde(default)]
    pub code_set: CodeSet,

    /// Allow-list file for [`CodeSet::Custom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charlist_path: Option<PathBuf>,

    /// Treat single-byte 0xA1-0xDF as half-width katakana.
    #[serde(default)]
    pub kana: bool,

    /// Serialization target.
    #[serde(default)]
    pub format: OutputFormat,

    /// Identity axis written by the emitter.
    #[serde(default)]
    pub encoding: EncodingAxis,

    /// Table sort key. Defaults to `encoding`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<EncodingAxis>,

    /// End-of-table sentinel.
    #[serde(default)]
    pub terminator: Terminator,

    /// Split BDF output into half-width and full-width files.
    #[serde(default)]
    pub split: bool,

    /// Base name for artifacts and generated identifiers.
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Directory artifacts are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_font_name() -> String {
    DEFAULT_FONT_NAME.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            cell: CellSize::default(),
            offset: RenderOffset::default(),
            code_set: CodeSet::default(),
            charlist_path: None,
            kana: false,
            format: OutputFormat::default(),
            encoding: EncodingAxis::default(),
            sort_by: None,
            terminator: Terminator::default(),
            split: false,
            font_name: default_font_name(),
            output_dir: default_output_dir(),
        }
    }
}

impl PipelineConfig {
    /// Creates a config for the given font with default settings.
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: Some(font_path.into()),
            ..Self::default()
        }
    }

    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    ///
    /// Relative `font_path` and `charlist_path` values are resolved against
    /// the config file's directory.
    pub fn from_path(path: &Path) -> Result<Self, SpecError> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&text)?;
        let base = path.parent().unwrap_or(Path::new("."));
        if let Some(font) = config.font_path.as_mut() {
            if font.is_relative() {
                *font = base.join(&*font);
            }
        }
        if let Some(list) = config.charlist_path.as_mut() {
            if list.is_relative() {
                *list = base.join(&*list);
            }
        }
        Ok(config)
    }

    /// Serializes this config to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The axis the table is sorted by.
    pub fn sort_axis(&self) -> EncodingAxis {
        self.sort_by.unwrap_or(self.encoding)
    }

    /// Sets the full-width cell size.
    pub fn with_cell(mut self, width: u32, height: u32) -> Self {
        self.cell = CellSize { width, height };
        self
    }

    /// Sets the pen offset.
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset = RenderOffset { x, y };
        self
    }

    /// Sets the code set.
    pub fn with_code_set(mut self, code_set: CodeSet) -> Self {
        self.code_set = code_set;
        self
    }

    /// Sets the custom allow-list file.
    pub fn with_charlist(mut self, path: impl Into<PathBuf>) -> Self {
        self.charlist_path = Some(path.into());
        self
    }

    /// Enables or disables half-width kana remapping.
    pub fn with_kana(mut self, kana: bool) -> Self {
        self.kana = kana;
        self
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the identity axis.
    pub fn with_encoding(mut self, encoding: EncodingAxis) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets an explicit sort axis.
    pub fn with_sort_by(mut self, axis: EncodingAxis) -> Self {
        self.sort_by = Some(axis);
        self
    }

    /// Sets the terminator policy.
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Enables half/full split output.
    pub fn with_split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    /// Sets the artifact base name.
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
