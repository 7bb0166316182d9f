//! Fatal pipeline errors.
//!
//! Every variant aborts the run. Unassigned JIS codes are not errors; the
//! table builder skips them.

use kanjifont_spec::{BackendError, EncodingAxis, ErrorCode, OutputFormat, ValidationError};
use thiserror::Error;

use crate::png::PngError;

/// Errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Font file missing, unreadable, or unusable at the requested size.
    #[error("font resource error: {0}")]
    FontResource(String),

    /// Custom code set without a usable character list.
    #[error("character list error: {0}")]
    CharacterList(String),

    /// The transcoder returned a UTF-8 value that does not decode to one character.
    #[error("JIS code 0x{jis:04X} transcoded to 0x{utf8:08X}, which is not a single UTF-8 character")]
    Decode { jis: u16, utf8: u32 },

    /// The requested axis cannot key the chosen output format.
    #[error("{format} output cannot be keyed by {axis}")]
    UnsupportedEncodingAxis {
        format: OutputFormat,
        axis: EncodingAxis,
    },

    /// The FONTX2 block table would not fit its one-byte count.
    #[error("character set needs {blocks} code blocks but FONTX2 can describe at most {max}")]
    BlockOverflow { blocks: usize, max: usize },

    /// An option was combined with a format that does not support it.
    #[error("format constraint: {0}")]
    FormatConstraint(String),

    /// Any other config validation failure.
    #[error("invalid config: {0}")]
    InvalidConfig(ValidationError),

    /// Preview sheet encoding failed.
    #[error("PNG encoding error: {0}")]
    Png(#[from] PngError),

    /// A text artifact could not be formatted.
    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Artifact write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for PipelineError {
    fn from(err: ValidationError) -> Self {
        match err.code {
            ErrorCode::MissingFontPath => PipelineError::FontResource(err.message),
            ErrorCode::MissingCharacterList => PipelineError::CharacterList(err.message),
            ErrorCode::FormatConstraint => PipelineError::FormatConstraint(err.message),
            _ => PipelineError::InvalidConfig(err),
        }
    }
}

impl BackendError for PipelineError {
    fn code(&self) -> &'static str {
        match self {
            PipelineError::FontResource(_) => "KANJIFONT_001",
            PipelineError::CharacterList(_) => "KANJIFONT_002",
            PipelineError::Decode { .. } => "KANJIFONT_003",
            PipelineError::UnsupportedEncodingAxis { .. } => "KANJIFONT_004",
            PipelineError::BlockOverflow { .. } => "KANJIFONT_005",
            PipelineError::FormatConstraint(_) => "KANJIFONT_006",
            PipelineError::InvalidConfig(_) => "KANJIFONT_007",
            PipelineError::Png(_) => "KANJIFONT_008",
            PipelineError::Io(_) => "KANJIFONT_009",
            PipelineError::Format(_) => "KANJIFONT_010",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            PipelineError::FontResource(_) => "font",
            PipelineError::CharacterList(_) | PipelineError::Decode { .. } => "table",
            PipelineError::UnsupportedEncodingAxis { .. }
            | PipelineError::FormatConstraint(_)
            | PipelineError::InvalidConfig(_) => "config",
            PipelineError::BlockOverflow { .. }
            | PipelineError::Png(_)
            | PipelineError::Io(_)
            | PipelineError::Format(_) => "emit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            PipelineError::FontResource("x".into()),
            PipelineError::CharacterList("x".into()),
            PipelineError::Decode { jis: 0x3021, utf8: 0xFF },
            PipelineError::UnsupportedEncodingAxis {
                format: OutputFormat::Fontx,
                axis: EncodingAxis::Utf8,
            },
            PipelineError::BlockOverflow { blocks: 300, max: 255 },
            PipelineError::FormatConstraint("x".into()),
            PipelineError::Format(std::fmt::Error),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_validation_error_mapping() {
        let err = ValidationError::new(ErrorCode::MissingCharacterList, "no list");
        assert!(matches!(
            PipelineError::from(err),
            PipelineError::CharacterList(_)
        ));

        let err = ValidationError::new(ErrorCode::InvalidCellSize, "zero");
        let mapped = PipelineError::from(err);
        assert_eq!(mapped.code(), "KANJIFONT_007");
        assert_eq!(mapped.category(), "config");
    }

    #[test]
    fn test_format_error_is_emit_failure() {
        let err = PipelineError::from(std::fmt::Error);
        assert_eq!(err.code(), "KANJIFONT_010");
        assert_eq!(err.category(), "emit");
    }

    #[test]
    fn test_block_overflow_message() {
        let err = PipelineError::BlockOverflow { blocks: 300, max: 255 };
        assert_eq!(
            err.to_string(),
            "character set needs 300 code blocks but FONTX2 can describe at most 255"
        );
    }
}
