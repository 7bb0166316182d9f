//! Preview command implementation
//!
//! Renders a string through the normal classify/render/pack path and dumps
//! each bit-plane as ASCII art, optionally as a PNG contact sheet too.

use anyhow::{Context, Result};
use colored::Colorize;
use kanjifont_backend::preview::{ascii_art, preview_text, sheet_png, Preview};
use kanjifont_backend::{pipeline, JisTranscoder, PipelineError};
use kanjifont_spec::{validate_config, BackendError, ErrorCode, PipelineConfig, ValidationError};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::commands::json_output::{
    backend_error_to_json, error_codes, hex_code, validation_error_to_json, JsonError,
    PreviewGlyph, PreviewOutput, PreviewResult,
};
use crate::input::{resolve_config, ConfigOverrides};

/// Run the preview command
///
/// # Arguments
/// * `config_path` - Optional JSON config file
/// * `overrides` - Flag values layered over the config file
/// * `text` - Characters to render
/// * `png` - Optional path for a PNG contact sheet
/// * `columns` - Glyphs per sheet row
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 success, 1 config error, 2 render error
pub fn run(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    text: &str,
    png: Option<&str>,
    columns: u32,
    json_output: bool,
) -> Result<ExitCode> {
    let config = match resolve_config(config_path.map(Path::new), overrides) {
        Ok(config) => config,
        Err(e) if json_output => {
            let error = JsonError::new(error_codes::CONFIG_LOAD, format!("{:#}", e));
            print_json(&PreviewOutput::failure(vec![error]))?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };

    let errors = render_errors(&config);
    if !errors.is_empty() {
        if json_output {
            let errors = errors.iter().map(validation_error_to_json).collect();
            print_json(&PreviewOutput::failure(errors))?;
        } else {
            for error in &errors {
                eprintln!("  {} {}", "x".red(), error);
            }
            println!("\n{}", "FAILED".red().bold());
        }
        return Ok(ExitCode::from(1));
    }

    let preview = match render(&config, text) {
        Ok(preview) => preview,
        Err(e) => {
            if json_output {
                print_json(&PreviewOutput::failure(vec![backend_error_to_json(&e)]))?;
            } else {
                eprintln!("  {} [{}] {}", "x".red(), e.code(), e.message());
                println!("\n{}", "FAILED".red().bold());
            }
            return Ok(ExitCode::from(2));
        }
    };

    let png_path = match png {
        Some(path) => {
            let bytes = match sheet_png(&preview.table, columns) {
                Ok(bytes) => bytes,
                Err(e) => {
                    if json_output {
                        print_json(&PreviewOutput::failure(vec![backend_error_to_json(&e)]))?;
                    } else {
                        eprintln!("  {} [{}] {}", "x".red(), e.code(), e.message());
                    }
                    return Ok(ExitCode::from(2));
                }
            };
            fs::write(path, bytes)
                .with_context(|| format!("Failed to write preview sheet to: {}", path))?;
            Some(path.to_string())
        }
        None => None,
    };

    if json_output {
        print_json(&PreviewOutput::success(preview_result(&preview, png_path)))?;
    } else {
        print_human(&preview, png_path.as_deref());
    }
    Ok(ExitCode::SUCCESS)
}

/// Config errors that stop rendering. Emitter constraints do not apply here.
fn render_errors(config: &PipelineConfig) -> Vec<ValidationError> {
    validate_config(config)
        .errors
        .into_iter()
        .filter(|e| {
            matches!(
                e.code,
                ErrorCode::MissingFontPath | ErrorCode::InvalidCellSize
            )
        })
        .collect()
}

fn render(config: &PipelineConfig, text: &str) -> Result<Preview, PipelineError> {
    let rasterizer = pipeline::open_rasterizer(config)?;
    preview_text(config, text, &rasterizer, &JisTranscoder)
}

fn preview_result(preview: &Preview, png: Option<String>) -> PreviewResult {
    let table = &preview.table;
    PreviewResult {
        glyphs: table
            .entries()
            .iter()
            .map(|entry| PreviewGlyph {
                symbol: entry.glyph.to_string(),
                utf8: format!("0x{:08X}", entry.utf8),
                sjis: hex_code(u32::from(entry.sjis)),
                jis: hex_code(u32::from(entry.jis)),
                width: entry.width,
                height: entry.height,
                rows: ascii_art(table, entry),
            })
            .collect(),
        missing: preview.missing.iter().map(char::to_string).collect(),
        png,
    }
}

fn print_human(preview: &Preview, png: Option<&str>) {
    let table = &preview.table;
    for entry in table.entries() {
        println!(
            "{} {} {} {}",
            entry.glyph.to_string().cyan().bold(),
            format!("utf8 {:08x}", entry.utf8).dimmed(),
            format!("sjis {:04x}", entry.sjis).dimmed(),
            format!("jis {:04x}", entry.jis).dimmed()
        );
        for row in ascii_art(table, entry) {
            println!("  {}", row);
        }
    }
    for ch in &preview.missing {
        println!("  {} no JIS code for {:?}", "!".yellow(), ch);
    }
    if let Some(path) = png {
        println!("{} {}", "Sheet written to:".dimmed(), path);
    }
}

fn print_json(output: &PreviewOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
