//! Generation report written next to emitted artifacts.
//!
//! The report records what was built (entry counts, bitmap size), where
//! each artifact went and its BLAKE3 hash, so two runs can be compared
//! without diffing the artifacts themselves.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::error::{ValidationError, ValidationWarning};

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// One written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactRecord {
    /// Path the artifact was written to.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded BLAKE3 hash of the artifact bytes.
    pub hash: String,
}

/// A coded message in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMessage {
    /// Stable code (e.g., "E002", "W001", "KANJIFONT_005").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Config field the message refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportMessage {
    /// Creates a message with code and text.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Converts a validation error.
    pub fn from_validation_error(err: &ValidationError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }

    /// Converts a validation warning.
    pub fn from_validation_warning(warn: &ValidationWarning) -> Self {
        Self {
            code: warn.code.to_string(),
            message: warn.message.clone(),
            path: warn.path.clone(),
        }
    }
}

/// The outcome of one `generate` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Report schema version.
    pub report_version: u32,
    /// Tool identifier and version (e.g., "kanjifont v0.1.0").
    pub tool_version: String,
    /// Resolved configuration of the run.
    pub config: PipelineConfig,
    /// Whether the run succeeded.
    pub ok: bool,
    /// Fatal errors.
    pub errors: Vec<ReportMessage>,
    /// Non-fatal warnings.
    pub warnings: Vec<ReportMessage>,
    /// Number of table entries.
    pub entry_count: usize,
    /// Number of half-width (single-byte) entries.
    pub half_width_count: usize,
    /// Number of full-width (multi-byte) entries.
    pub full_width_count: usize,
    /// Size of the bitmap blob in bytes.
    pub bitmap_bytes: usize,
    /// Artifacts written.
    pub artifacts: Vec<ArtifactRecord>,
    /// Wall time of the run in milliseconds.
    pub duration_ms: u64,
}

impl GenerationReport {
    /// Creates a new report builder.
    pub fn builder(config: PipelineConfig, tool_version: impl Into<String>) -> ReportBuilder {
        ReportBuilder::new(config, tool_version)
    }

    /// Standard report filename for a font name.
    ///
    /// ```
    /// use kanjifont_spec::GenerationReport;
    ///
    /// assert_eq!(GenerationReport::filename("dot12"), "dot12.report.json");
    /// ```
    pub fn filename(font_name: &str) -> String {
        format!("{}.report.json", font_name)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Builder for [`GenerationReport`].
pub struct ReportBuilder {
    report: GenerationReport,
}

impl ReportBuilder {
    /// Creates a builder for a run of `config`.
    pub fn new(config: PipelineConfig, tool_version: impl Into<String>) -> Self {
        Self {
            report: GenerationReport {
                report_version: REPORT_VERSION,
                tool_version: tool_version.into(),
                config,
                ok: true,
                errors: Vec::new(),
                warnings: Vec::new(),
                entry_count: 0,
                half_width_count: 0,
                full_width_count: 0,
                bitmap_bytes: 0,
                artifacts: Vec::new(),
                duration_ms: 0,
            },
        }
    }

    /// Adds an error and marks the report as failed.
    pub fn error(mut self, error: ReportMessage) -> Self {
        self.report.errors.push(error);
        self.report.ok = false;
        self
    }

    /// Adds a warning.
    pub fn warning(mut self, warning: ReportMessage) -> Self {
        self.report.warnings.push(warning);
        self
    }

    /// Records table statistics.
    pub fn table_stats(mut self, half_width: usize, full_width: usize, bitmap_bytes: usize) -> Self {
        self.report.entry_count = half_width + full_width;
        self.report.half_width_count = half_width;
        self.report.full_width_count = full_width;
        self.report.bitmap_bytes = bitmap_bytes;
        self
    }

    /// Adds a written artifact.
    pub fn artifact(mut self, artifact: ArtifactRecord) -> Self {
        self.report.artifacts.push(artifact);
        self
    }

    /// Sets the run duration.
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.report.duration_ms = duration_ms;
        self
    }

    /// Finishes the report.
    pub fn build(self) -> GenerationReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_report_builder() {
        let report = GenerationReport::builder(PipelineConfig::new("a.ttf"), "kanjifont v0.1.0")
            .table_stats(95, 2, 334)
            .artifact(ArtifactRecord {
                path: PathBuf::from("out/font.h"),
                size: 1024,
                hash: "ab".repeat(32),
            })
            .duration_ms(12)
            .build();

        assert!(report.ok);
        assert_eq!(report.entry_count, 97);
        assert_eq!(report.artifacts.len(), 1);
    }

    #[test]
    fn test_report_error_marks_failed() {
        let err = ValidationError::new(ErrorCode::MissingFontPath, "no font");
        let report = ReportBuilder::new(PipelineConfig::default(), "kanjifont v0.1.0")
            .error(ReportMessage::from_validation_error(&err))
            .build();
        assert!(!report.ok);
        assert_eq!(report.errors[0].code, "E001");
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = ReportBuilder::new(PipelineConfig::new("a.ttf"), "kanjifont v0.1.0")
            .warning(ReportMessage::new("W002", "odd width"))
            .build();
        let json = report.to_json_pretty().unwrap();
        assert_eq!(GenerationReport::from_json(&json).unwrap(), report);
    }
}
