//! Error types for config validation and pipeline reporting.

use thiserror::Error;

/// Error codes for config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: No font file configured
    MissingFontPath,
    /// E002: Requested axis cannot key the chosen output format
    UnsupportedEncodingAxis,
    /// E003: Option only valid for another output format
    FormatConstraint,
    /// E004: Cell width or height outside 1..=255
    InvalidCellSize,
    /// E005: Custom code set without an allow-list file
    MissingCharacterList,
    /// E006: Font name unusable as a file stem or identifier
    InvalidFontName,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MissingFontPath => "E001",
            ErrorCode::UnsupportedEncodingAxis => "E002",
            ErrorCode::FormatConstraint => "E003",
            ErrorCode::InvalidCellSize => "E004",
            ErrorCode::MissingCharacterList => "E005",
            ErrorCode::InvalidFontName => "E006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Table sort axis differs from the emitted identity axis
    SortAxisMismatch,
    /// W002: Odd cell width; half-width glyphs lose a column
    OddCellWidth,
    /// W003: Allow-list file given but the code set ignores it
    UnusedCharacterList,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::SortAxisMismatch => "W001",
            WarningCode::OddCellWidth => "W002",
            WarningCode::UnusedCharacterList => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional config field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Config field the error refers to (e.g., "encoding").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error pointing at a config field.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional config field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Config field the warning refers to.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning pointing at a config field.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for config loading.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of config validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

/// Common trait for pipeline errors.
///
/// Gives every fatal condition a stable code and a category so the CLI and
/// the generation report can describe failures uniformly.
pub trait BackendError: std::error::Error {
    /// Stable code such as "KANJIFONT_005".
    fn code(&self) -> &'static str;

    /// Human-readable message.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category, e.g. "config", "font", "table", "emit".
    fn category(&self) -> &'static str;
}
