//! Human-readable (colored) output mode for the generate command.

use anyhow::Result;
use colored::Colorize;
use kanjifont_backend::{pipeline, JisTranscoder};
use kanjifont_spec::{validate_config, BackendError, GenerationReport, PipelineConfig};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::{build_report, elapsed_ms, glyph_line, short_hash, RunOutcome};
use crate::commands::reporting;
use crate::input::{resolve_config, ConfigOverrides};

/// Run generate with human-readable (colored) output.
pub fn run_human(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    verbose: bool,
    write_report: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let config = resolve_config(config_path.map(Path::new), overrides)?;

    println!("{} {}", "Generating:".cyan().bold(), config.font_name);
    if let Some(path) = config_path {
        println!("{} {}", "Config:".dimmed(), path);
    }
    if let Some(ref font) = config.font_path {
        println!("{} {}", "Font:".cyan().bold(), font.display());
    }
    println!(
        "{} {} keyed by {}, {}x{} cells, code set {}",
        "Target:".cyan().bold(),
        config.format,
        config.encoding,
        config.cell.width,
        config.cell.height,
        config.code_set
    );
    println!("{} {}", "Output dir:".cyan().bold(), config.output_dir.display());

    let validation = validate_config(&config);
    for warning in &validation.warnings {
        let location = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} {}{}: {}",
            "!".yellow(),
            warning.code,
            location.dimmed(),
            warning.message
        );
    }

    if !validation.is_ok() {
        for error in &validation.errors {
            let location = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            eprintln!(
                "  {} {}{}: {}",
                "x".red(),
                error.code,
                location.dimmed(),
                error.message
            );
        }
        let report = build_report(
            &config,
            &validation.warnings,
            RunOutcome::Invalid(&validation.errors),
            elapsed_ms(start),
        );
        finish_report(&report, &config, write_report)?;
        println!(
            "\n{} {} config error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    let result = pipeline::open_rasterizer(&config)
        .and_then(|rasterizer| pipeline::generate(&config, &rasterizer, &JisTranscoder));

    let font = match result {
        Ok(font) => font,
        Err(e) => {
            eprintln!("  {} [{}] {}", "x".red(), e.code(), e.message());
            let report = build_report(
                &config,
                &validation.warnings,
                RunOutcome::Failed(&e),
                elapsed_ms(start),
            );
            finish_report(&report, &config, write_report)?;
            println!("\n{} {} error", "FAILED".red().bold(), e.category());
            return Ok(ExitCode::from(2));
        }
    };

    let table = &font.table;
    if verbose {
        for entry in table.entries() {
            println!("  {}", glyph_line(entry).dimmed());
        }
    }
    println!(
        "{} {} ({} half-width, {} full-width)",
        "Entries:".cyan().bold(),
        table.len(),
        table.half_width_count(),
        table.full_width_count()
    );
    println!("{} {} bytes", "Bitmap:".cyan().bold(), table.bitmap().len());
    for artifact in &font.artifacts {
        println!(
            "  {} {} ({} bytes, {})",
            "+".green(),
            artifact.path.display(),
            artifact.size,
            short_hash(&artifact.hash).dimmed()
        );
    }

    let report = build_report(
        &config,
        &validation.warnings,
        RunOutcome::Generated(&font),
        elapsed_ms(start),
    );
    finish_report(&report, &config, write_report)?;

    println!(
        "\n{} {} file(s) in {}ms",
        "SUCCESS".green().bold(),
        font.artifacts.len(),
        report.duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

fn finish_report(report: &GenerationReport, config: &PipelineConfig, write: bool) -> Result<()> {
    if write {
        let path = reporting::write_report(report, config)?;
        println!("{} {}", "Report written to:".dimmed(), path.display());
    }
    Ok(())
}
