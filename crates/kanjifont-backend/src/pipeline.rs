//! Pipeline driver.
//!
//! Validate, build the code table, render and pack every entry, emit. Each
//! stage finishes before the next starts, and every run builds its own
//! [`FontTable`] from scratch.

use kanjifont_spec::{
    validate_config, ArtifactRecord, CodeEntry, ErrorCode, PipelineConfig, ValidationError,
    ValidationWarning,
};

use crate::emit::{emitter_for, write_artifacts, Artifact, EmitOptions};
use crate::error::PipelineError;
use crate::font_table::{FontTable, FontTableBuilder};
use crate::pack::pack;
use crate::raster::{OutlineRasterizer, Rasterizer};
use crate::render::GlyphRenderStage;
use crate::table::build_code_table;
use crate::transcode::Transcoder;

/// Result of an in-memory run.
#[derive(Debug)]
pub struct PipelineOutput {
    pub table: FontTable,
    /// Emitted files, not yet written.
    pub artifacts: Vec<Artifact>,
    pub warnings: Vec<ValidationWarning>,
}

/// Result of a run whose artifacts were written to disk.
#[derive(Debug)]
pub struct GeneratedFont {
    pub table: FontTable,
    pub artifacts: Vec<ArtifactRecord>,
    pub warnings: Vec<ValidationWarning>,
}

/// Validates a config. The first error aborts; warnings are returned.
pub fn check_config(config: &PipelineConfig) -> Result<Vec<ValidationWarning>, PipelineError> {
    validate_config(config)
        .into_result()
        .map_err(|errors| match errors.into_iter().next() {
            Some(err) => config_error(config, err),
            None => PipelineError::FormatConstraint("invalid configuration".to_string()),
        })
}

fn config_error(config: &PipelineConfig, err: ValidationError) -> PipelineError {
    match err.code {
        ErrorCode::UnsupportedEncodingAxis => PipelineError::UnsupportedEncodingAxis {
            format: config.format,
            axis: config.encoding,
        },
        _ => PipelineError::from(err),
    }
}

/// Opens the config's font at the cell height.
pub fn open_rasterizer(config: &PipelineConfig) -> Result<OutlineRasterizer, PipelineError> {
    let path = config
        .font_path
        .as_deref()
        .ok_or_else(|| PipelineError::FontResource("no font file given".to_string()))?;
    OutlineRasterizer::open(path, config.cell.height as f32)
}

/// Renders and packs entries into a fresh table.
pub fn build_font_table<R: Rasterizer + ?Sized>(
    config: &PipelineConfig,
    entries: Vec<CodeEntry>,
    rasterizer: &R,
) -> FontTable {
    let stage = GlyphRenderStage::new(rasterizer, config.cell, config.offset);
    let mut builder = FontTableBuilder::new(config.sort_axis(), config.cell);
    for mut entry in entries {
        let pixels = stage.render(&mut entry);
        builder.push(entry, pack(&pixels));
    }
    builder.finish()
}

/// Runs every stage in memory.
pub fn run<R, T>(
    config: &PipelineConfig,
    rasterizer: &R,
    transcoder: &T,
) -> Result<PipelineOutput, PipelineError>
where
    R: Rasterizer + ?Sized,
    T: Transcoder + ?Sized,
{
    let warnings = check_config(config)?;
    let entries = build_code_table(config, transcoder)?;
    let table = build_font_table(config, entries, rasterizer);
    let artifacts = emitter_for(config.format).emit(&table, &EmitOptions::from_config(config))?;
    Ok(PipelineOutput {
        table,
        artifacts,
        warnings,
    })
}

/// Runs every stage and writes the artifacts into `config.output_dir`.
///
/// Nothing is written unless every stage succeeded.
pub fn generate<R, T>(
    config: &PipelineConfig,
    rasterizer: &R,
    transcoder: &T,
) -> Result<GeneratedFont, PipelineError>
where
    R: Rasterizer + ?Sized,
    T: Transcoder + ?Sized,
{
    let output = run(config, rasterizer, transcoder)?;
    let artifacts = write_artifacts(&config.output_dir, &output.artifacts)?;
    Ok(GeneratedFont {
        table: output.table,
        artifacts,
        warnings: output.warnings,
    })
}
