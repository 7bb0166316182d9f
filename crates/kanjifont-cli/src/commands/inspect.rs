//! Inspect command implementation
//!
//! Reads an emitted FONTX2 file back and prints its header, block table and
//! optionally one glyph.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use kanjifont_backend::emit::fontx::{CodeType, FontxFile};
use kanjifont_backend::PlaneView;
use std::fs;
use std::process::ExitCode;

use crate::commands::json_output::{
    error_codes, hex_code, BlockInfo, InspectOutput, InspectResult, JsonError,
};

/// Blocks printed before the listing is elided in human mode.
const BLOCK_LISTING_LIMIT: usize = 32;

/// Run the inspect command
///
/// # Arguments
/// * `path` - FONTX2 file to read
/// * `code` - Optional code (hex) whose glyph is printed as ASCII art
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 success, 1 unreadable or invalid file
pub fn run(path: &str, code: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let code = code.map(parse_code).transpose()?;

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if json_output => {
            let error = JsonError::new(error_codes::FILE_READ, e.to_string()).with_file(path);
            print_json(&InspectOutput::failure(vec![error]))?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read font file: {}", path)),
    };

    let font = match FontxFile::parse(&bytes) {
        Ok(font) => font,
        Err(e) => {
            if json_output {
                let error = JsonError::new(error_codes::FONTX_PARSE, e.to_string()).with_file(path);
                print_json(&InspectOutput::failure(vec![error]))?;
            } else {
                eprintln!("  {} {}: {}", "x".red(), path, e);
                println!("\n{}", "FAILED".red().bold());
            }
            return Ok(ExitCode::from(1));
        }
    };

    let glyph = match code {
        Some(code) => match glyph_rows(&font, code) {
            Some(rows) => Some(rows),
            None => {
                let message = format!("code {} is not in {}", hex_code(u32::from(code)), path);
                if json_output {
                    let error = JsonError::new(error_codes::GLYPH_NOT_FOUND, message);
                    print_json(&InspectOutput::failure(vec![error]))?;
                } else {
                    eprintln!("  {} {}", "x".red(), message);
                }
                return Ok(ExitCode::from(1));
            }
        },
        None => None,
    };

    let result = inspect_result(path, &font, glyph);
    if json_output {
        print_json(&InspectOutput::success(result))?;
    } else {
        print_human(&result);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parses `0x3021`, `3021` or `0X3021` as hex.
fn parse_code(text: &str) -> Result<u16> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16)
        .map_err(|_| anyhow!("invalid code '{}' (expected hex, e.g. 0x3021)", text))
}

fn glyph_rows(font: &FontxFile, code: u16) -> Option<Vec<String>> {
    let bytes = font.glyph(code)?;
    let plane = PlaneView::new(
        bytes,
        u32::from(font.header.x_size),
        u32::from(font.header.y_size),
    );
    Some(
        (0..plane.height())
            .map(|y| plane.row_string(y, '#', '.'))
            .collect(),
    )
}

fn inspect_result(path: &str, font: &FontxFile, glyph: Option<Vec<String>>) -> InspectResult {
    InspectResult {
        file: path.to_string(),
        name: font.header.name.clone(),
        code_type: match font.header.code_type {
            CodeType::Half => "half".to_string(),
            CodeType::Full => "full".to_string(),
        },
        x_size: font.header.x_size,
        y_size: font.header.y_size,
        glyph_size: font.header.glyph_size(),
        glyph_count: font.glyph_count(),
        blocks: font
            .blocks
            .iter()
            .map(|b| BlockInfo {
                start: hex_code(u32::from(b.start)),
                end: hex_code(u32::from(b.end)),
                len: b.len(),
            })
            .collect(),
        glyph,
    }
}

fn print_human(result: &InspectResult) {
    println!("{} {}", "File:".cyan().bold(), result.file);
    println!("{} {}", "Name:".cyan().bold(), result.name);
    println!(
        "{} {} ({}x{}, {} bytes per glyph)",
        "Code type:".cyan().bold(),
        result.code_type,
        result.x_size,
        result.y_size,
        result.glyph_size
    );
    println!("{} {}", "Glyphs:".cyan().bold(), result.glyph_count);
    if !result.blocks.is_empty() {
        println!("{} {}", "Blocks:".cyan().bold(), result.blocks.len());
        for block in result.blocks.iter().take(BLOCK_LISTING_LIMIT) {
            println!("  {}..{} {}", block.start, block.end, format!("({})", block.len).dimmed());
        }
        if result.blocks.len() > BLOCK_LISTING_LIMIT {
            println!(
                "  {}",
                format!("... {} more", result.blocks.len() - BLOCK_LISTING_LIMIT).dimmed()
            );
        }
    }
    if let Some(ref rows) = result.glyph {
        println!("{}", "Glyph:".cyan().bold());
        for row in rows {
            println!("  {}", row);
        }
    }
}

fn print_json(output: &InspectOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
