//! JSON output mode for the generate command.

use anyhow::Result;
use kanjifont_backend::{pipeline, JisTranscoder};
use kanjifont_spec::{validate_config, GenerationReport, PipelineConfig};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::{build_report, elapsed_ms, RunOutcome};
use crate::commands::json_output::{
    backend_error_to_json, error_codes, validation_error_to_json, validation_warning_to_json,
    GenerateOutput, GenerateResult, GeneratedFile, JsonError,
};
use crate::commands::reporting;
use crate::input::{resolve_config, ConfigOverrides};

/// Run generate with machine-readable JSON output.
pub fn run_json(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    write_report: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    let config = match resolve_config(config_path.map(Path::new), overrides) {
        Ok(config) => config,
        Err(e) => {
            let mut error = JsonError::new(error_codes::CONFIG_LOAD, format!("{:#}", e));
            if let Some(path) = config_path {
                error = error.with_file(path);
            }
            print_output(&GenerateOutput::failure(vec![error], Vec::new(), None))?;
            return Ok(ExitCode::from(1));
        }
    };

    let validation = validate_config(&config);
    let warnings: Vec<_> = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();

    if !validation.is_ok() {
        let mut errors: Vec<_> = validation
            .errors
            .iter()
            .map(validation_error_to_json)
            .collect();
        let report = build_report(
            &config,
            &validation.warnings,
            RunOutcome::Invalid(&validation.errors),
            elapsed_ms(start),
        );
        let report_path = finish_report(&report, &config, write_report, &mut errors);
        print_output(&GenerateOutput::failure(errors, warnings, report_path))?;
        return Ok(ExitCode::from(1));
    }

    let result = pipeline::open_rasterizer(&config)
        .and_then(|rasterizer| pipeline::generate(&config, &rasterizer, &JisTranscoder));

    match result {
        Ok(font) => {
            let report = build_report(
                &config,
                &validation.warnings,
                RunOutcome::Generated(&font),
                elapsed_ms(start),
            );
            let mut errors = Vec::new();
            let report_path = finish_report(&report, &config, write_report, &mut errors);
            if !errors.is_empty() {
                print_output(&GenerateOutput::failure(errors, warnings, None))?;
                return Ok(ExitCode::from(2));
            }

            let table = &font.table;
            let result = GenerateResult {
                font_name: config.font_name.clone(),
                format: config.format.to_string(),
                encoding: config.encoding.to_string(),
                entry_count: table.len(),
                half_width_count: table.half_width_count(),
                full_width_count: table.full_width_count(),
                bitmap_bytes: table.bitmap().len(),
                files: font
                    .artifacts
                    .iter()
                    .map(|a| GeneratedFile {
                        path: a.path.display().to_string(),
                        size: a.size,
                        hash: a.hash.clone(),
                    })
                    .collect(),
                duration_ms: report.duration_ms,
            };
            print_output(&GenerateOutput::success(result, warnings, report_path))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let mut errors = vec![backend_error_to_json(&e)];
            let report = build_report(
                &config,
                &validation.warnings,
                RunOutcome::Failed(&e),
                elapsed_ms(start),
            );
            let report_path = finish_report(&report, &config, write_report, &mut errors);
            print_output(&GenerateOutput::failure(errors, warnings, report_path))?;
            Ok(ExitCode::from(2))
        }
    }
}

/// Writes the report when requested. A write failure becomes an error entry.
fn finish_report(
    report: &GenerationReport,
    config: &PipelineConfig,
    write: bool,
    errors: &mut Vec<JsonError>,
) -> Option<String> {
    if !write {
        return None;
    }
    match reporting::write_report(report, config) {
        Ok(path) => Some(path.display().to_string()),
        Err(e) => {
            errors.push(JsonError::new(error_codes::REPORT_WRITE, format!("{:#}", e)));
            None
        }
    }
}

fn print_output(output: &GenerateOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
