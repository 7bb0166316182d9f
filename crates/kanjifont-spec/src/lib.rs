//! kanjifont data model and configuration
//!
//! This crate holds the types every stage of the font-table pipeline agrees
//! on: the per-glyph [`CodeEntry`] record, the [`PipelineConfig`] that is
//! threaded through the stages, config validation, error codes and the
//! serializable generation report.
//!
//! # Example
//!
//! ```
//! use kanjifont_spec::{CodeSet, EncodingAxis, OutputFormat, PipelineConfig};
//! use kanjifont_spec::validation::validate_config;
//!
//! let config = PipelineConfig::new("fonts/shinonome12.ttf")
//!     .with_cell(12, 12)
//!     .with_code_set(CodeSet::Level1)
//!     .with_format(OutputFormat::Fontx)
//!     .with_encoding(EncodingAxis::Sjis);
//!
//! assert!(validate_config(&config).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`entry`]: glyph identity records and encoding axes
//! - [`config`]: pipeline configuration and its option enums
//! - [`error`]: error codes, validation errors and the backend error trait
//! - [`validation`]: cross-field config checks
//! - [`report`]: generation report written next to emitted artifacts

pub mod config;
pub mod entry;
pub mod error;
pub mod report;
pub mod validation;

pub use config::{
    CellSize, CodeSet, OutputFormat, PipelineConfig, RenderOffset, Terminator,
    DEFAULT_FONT_NAME,
};
pub use entry::{CodeEntry, EncodingAxis, Glyph};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use report::{ArtifactRecord, GenerationReport, ReportBuilder, ReportMessage, REPORT_VERSION};
pub use validation::validate_config;
