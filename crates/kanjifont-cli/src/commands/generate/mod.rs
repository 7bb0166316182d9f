//! Generate command implementation
//!
//! Resolves a config, runs the full pipeline and writes the artifacts.

mod human;
mod json;

use anyhow::Result;
use kanjifont_backend::{GeneratedFont, PipelineError};
use kanjifont_spec::{
    BackendError, CodeEntry, GenerationReport, PipelineConfig, ReportBuilder, ReportMessage,
    ValidationError, ValidationWarning,
};
use std::process::ExitCode;
use std::time::Instant;

use crate::commands::reporting;
use crate::input::ConfigOverrides;

/// Run the generate command
///
/// # Arguments
/// * `config_path` - Optional JSON config file
/// * `overrides` - Flag values layered over the config file
/// * `verbose` - Print one line per glyph
/// * `json_output` - Whether to output machine-readable JSON diagnostics
/// * `write_report` - Write `<font_name>.report.json` next to the artifacts
///
/// # Returns
/// Exit code: 0 success, 1 config error, 2 generation error
pub fn run(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    verbose: bool,
    json_output: bool,
    write_report: bool,
) -> Result<ExitCode> {
    if json_output {
        json::run_json(config_path, overrides, write_report)
    } else {
        human::run_human(config_path, overrides, verbose, write_report)
    }
}

/// How a run ended, for the report.
enum RunOutcome<'a> {
    Invalid(&'a [ValidationError]),
    Failed(&'a PipelineError),
    Generated(&'a GeneratedFont),
}

fn build_report(
    config: &PipelineConfig,
    warnings: &[ValidationWarning],
    outcome: RunOutcome<'_>,
    duration_ms: u64,
) -> GenerationReport {
    let mut builder = ReportBuilder::new(config.clone(), reporting::tool_version());
    for warning in warnings {
        builder = builder.warning(ReportMessage::from_validation_warning(warning));
    }
    builder = match outcome {
        RunOutcome::Invalid(errors) => errors.iter().fold(builder, |b, e| {
            b.error(ReportMessage::from_validation_error(e))
        }),
        RunOutcome::Failed(err) => builder.error(ReportMessage::new(err.code(), err.message())),
        RunOutcome::Generated(font) => {
            let table = &font.table;
            let builder = builder.table_stats(
                table.half_width_count(),
                table.full_width_count(),
                table.bitmap().len(),
            );
            font.artifacts
                .iter()
                .fold(builder, |b, artifact| b.artifact(artifact.clone()))
        }
    };
    builder.duration_ms(duration_ms).build()
}

/// One `--verbose` line: code triple, glyph, size and bitmap offset.
fn glyph_line(entry: &CodeEntry) -> String {
    format!(
        "{:08x} {:04x} {:04x}  {:<4}  {}x{}  @{:08x}",
        entry.utf8,
        entry.sjis,
        entry.jis,
        entry.glyph.to_string(),
        entry.width,
        entry.height,
        entry.bitmap_offset
    )
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// First 16 hex digits of an artifact hash.
fn short_hash(hash: &str) -> &str {
    hash.get(..16).unwrap_or(hash)
}
