//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`, which replaces colored console output
//! with one of these envelopes printed to stdout.

use kanjifont_spec::{BackendError, ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Validation errors (`E00x`) and pipeline errors (`KANJIFONT_00x`) pass
/// through with their own codes.
pub mod error_codes {
    /// Config file could not be loaded or a flag value was invalid
    pub const CONFIG_LOAD: &str = "CLI_001";
    /// Input file could not be read
    pub const FILE_READ: &str = "CLI_002";
    /// Report could not be written
    pub const REPORT_WRITE: &str = "CLI_003";
    /// File is not a valid FONTX2 font
    pub const FONTX_PARSE: &str = "CLI_004";
    /// Code not present in the inspected font
    pub const GLYPH_NOT_FOUND: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E002", "KANJIFONT_005")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Config field the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the config path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Config field the warning refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

/// Converts a config validation error.
pub fn validation_error_to_json(err: &ValidationError) -> JsonError {
    let json = JsonError::new(err.code.code(), err.message.clone());
    match err.path {
        Some(ref path) => json.with_path(path.clone()),
        None => json,
    }
}

/// Converts a config validation warning.
pub fn validation_warning_to_json(warn: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warn.code.code().to_string(),
        message: warn.message.clone(),
        path: warn.path.clone(),
    }
}

/// Converts a pipeline error, keeping its stable code.
pub fn backend_error_to_json(err: &dyn BackendError) -> JsonError {
    JsonError::new(err.code(), err.message())
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
    /// Written report, when `--report` was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
}

impl GenerateOutput {
    pub fn success(
        result: GenerateResult,
        warnings: Vec<JsonWarning>,
        report_path: Option<String>,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
            report_path,
        }
    }

    pub fn failure(
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
        report_path: Option<String>,
    ) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
            report_path,
        }
    }
}

/// Summary of a successful generate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    pub font_name: String,
    pub format: String,
    pub encoding: String,
    pub entry_count: usize,
    pub half_width_count: usize,
    pub full_width_count: usize,
    pub bitmap_bytes: usize,
    pub files: Vec<GeneratedFile>,
    pub duration_ms: u64,
}

/// One written artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub size: u64,
    /// BLAKE3 hash, hex
    pub hash: String,
}

/// Output of `preview --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PreviewResult>,
}

impl PreviewOutput {
    pub fn success(result: PreviewResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Rendered preview glyphs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResult {
    pub glyphs: Vec<PreviewGlyph>,
    /// Characters with no JIS code
    pub missing: Vec<String>,
    /// Written PNG sheet, when `--png` was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
}

/// One glyph rendered as ASCII art.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewGlyph {
    pub symbol: String,
    pub utf8: String,
    pub sjis: String,
    pub jis: String,
    pub width: u8,
    pub height: u8,
    pub rows: Vec<String>,
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
}

impl InspectOutput {
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Header and block table of a FONTX2 file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResult {
    pub file: String,
    pub name: String,
    /// "half" or "full"
    pub code_type: String,
    pub x_size: u8,
    pub y_size: u8,
    pub glyph_size: usize,
    pub glyph_count: usize,
    pub blocks: Vec<BlockInfo>,
    /// ASCII art of the glyph selected with `--code`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<Vec<String>>,
}

/// One FONTX2 code block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInfo {
    pub start: String,
    pub end: String,
    pub len: usize,
}

/// Output of `charsets --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharsetsOutput {
    pub code_sets: Vec<CharsetInfo>,
}

/// One code-set preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharsetInfo {
    pub name: String,
    pub ranges: Vec<RangeInfo>,
    /// Post-filter applied after the ranges are walked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// One named JIS range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeInfo {
    pub name: String,
    pub start: String,
    pub end: String,
}

/// Formats a code value as `0x` plus four hex digits.
pub fn hex_code(code: u32) -> String {
    format!("0x{:04X}", code)
}
