//! Cross-field config validation.
//!
//! Runs before any stage does work, so format/option mismatches abort the
//! run before a single glyph is rendered.

use crate::config::{CodeSet, PipelineConfig, Terminator};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};

/// Largest cell edge; record fields store width and height as `u8`.
pub const MAX_CELL_EDGE: u32 = 255;

/// Validates a resolved config.
///
/// File existence (font, allow-list) is checked by the stages that open
/// them; this only looks at the config values.
pub fn validate_config(config: &PipelineConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if config.font_path.is_none() {
        result.add_error(ValidationError::with_path(
            ErrorCode::MissingFontPath,
            "no font file given",
            "font_path",
        ));
    }

    for (edge, value) in [("cell.width", config.cell.width), ("cell.height", config.cell.height)] {
        if value == 0 || value > MAX_CELL_EDGE {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidCellSize,
                format!("{} must be in 1..={}, got {}", edge, MAX_CELL_EDGE, value),
                edge,
            ));
        }
    }
    if config.cell.width == 1 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidCellSize,
            "cell.width must be at least 2 so half-width glyphs are not empty",
            "cell.width",
        ));
    } else if config.cell.width % 2 == 1 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::OddCellWidth,
            format!(
                "cell.width {} is odd; half-width glyphs are {} pixels wide",
                config.cell.width,
                config.cell.half_width()
            ),
            "cell.width",
        ));
    }

    if !config.format.supports_axis(config.encoding) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedEncodingAxis,
            format!(
                "{} output cannot be keyed by {} (use sjis or jis)",
                config.format, config.encoding
            ),
            "encoding",
        ));
    }

    if config.split && !config.format.supports_split() {
        result.add_error(ValidationError::with_path(
            ErrorCode::FormatConstraint,
            format!("split output is only available for bdf, not {}", config.format),
            "split",
        ));
    }

    if config.terminator != Terminator::None && !config.format.supports_terminator() {
        result.add_error(ValidationError::with_path(
            ErrorCode::FormatConstraint,
            format!(
                "a {} terminator record is only available for cdata, binary and python, not {}",
                config.terminator, config.format
            ),
            "terminator",
        ));
    }

    match (config.code_set, config.charlist_path.is_some()) {
        (CodeSet::Custom, false) => result.add_error(ValidationError::with_path(
            ErrorCode::MissingCharacterList,
            "the custom code set needs a character list file",
            "charlist_path",
        )),
        (set, true) if set != CodeSet::Custom => result.add_warning(ValidationWarning::with_path(
            WarningCode::UnusedCharacterList,
            format!("character list is ignored by the {} code set", set),
            "charlist_path",
        )),
        _ => {}
    }

    if let Some(sort) = config.sort_by {
        if sort != config.encoding && config.format.supports_terminator() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::SortAxisMismatch,
                format!(
                    "table is sorted by {} but keyed by {}; lookups on the emitted table cannot binary-search",
                    sort, config.encoding
                ),
                "sort_by",
            ));
        }
    }

    if !is_valid_font_name(&config.font_name) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFontName,
            format!(
                "font name '{}' must start with a letter and contain only ASCII letters, digits and '_'",
                config.font_name
            ),
            "font_name",
        ));
    }

    result
}

/// Font names become file stems and C/Python identifiers.
pub fn is_valid_font_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= 64 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
