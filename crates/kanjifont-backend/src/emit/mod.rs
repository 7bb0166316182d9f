//! Font table serializers.
//!
//! Each emitter turns a finished [`FontTable`] into one or more in-memory
//! [`Artifact`]s. Nothing touches the filesystem until every artifact of a
//! run has been produced, so a failing emitter leaves no files behind.

pub mod bdf;
pub mod binary;
pub mod cdata;
pub mod fontx;
pub mod python;

use std::path::{Path, PathBuf};

use kanjifont_spec::{
    ArtifactRecord, CodeEntry, EncodingAxis, OutputFormat, PipelineConfig, Terminator,
};

use crate::error::PipelineError;
use crate::font_table::FontTable;

pub use bdf::BdfEmitter;
pub use binary::BinaryEmitter;
pub use cdata::CDataEmitter;
pub use fontx::FontxEmitter;
pub use python::PythonEmitter;

/// One output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name relative to the output directory.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn text(file_name: impl Into<String>, text: String) -> Self {
        Self::new(file_name, text.into_bytes())
    }
}

/// Emitter settings taken from the run config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Base for file names and generated identifiers.
    pub font_name: String,
    /// Identity axis written into the output.
    pub axis: EncodingAxis,
    pub terminator: Terminator,
    /// Write half-width and full-width glyphs to separate files.
    pub split: bool,
}

impl EmitOptions {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            font_name: config.font_name.clone(),
            axis: config.encoding,
            terminator: config.terminator,
            split: config.split,
        }
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

/// A table serializer.
pub trait Emitter {
    /// Serializes `table`. Must not depend on anything but its arguments.
    fn emit(&self, table: &FontTable, options: &EmitOptions) -> Result<Vec<Artifact>, PipelineError>;
}

/// The emitter for a format.
pub fn emitter_for(format: OutputFormat) -> Box<dyn Emitter> {
    match format {
        OutputFormat::Cdata => Box::new(CDataEmitter),
        OutputFormat::Binary => Box::new(BinaryEmitter),
        OutputFormat::Python => Box::new(PythonEmitter),
        OutputFormat::Fontx => Box::new(FontxEmitter),
        OutputFormat::Bdf => Box::new(BdfEmitter),
    }
}

/// The six fixed fields of a table record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub utf8: u32,
    pub sjis: u16,
    pub jis: u16,
    pub width: u8,
    pub height: u8,
    pub offset: u32,
}

impl Record {
    /// Size of one big-endian binary record.
    pub const SIZE: usize = 14;

    pub fn from_entry(entry: &CodeEntry) -> Self {
        Self {
            utf8: entry.utf8,
            sjis: entry.sjis,
            jis: entry.jis,
            width: entry.width,
            height: entry.height,
            offset: entry.bitmap_offset,
        }
    }

    /// The sentinel appended after the last real record, if any.
    pub fn terminator(policy: Terminator) -> Option<Self> {
        match policy {
            Terminator::None => None,
            Terminator::Zero => Some(Self {
                utf8: 0,
                sjis: 0,
                jis: 0,
                width: 0,
                height: 0,
                offset: 0,
            }),
            Terminator::Max => Some(Self {
                utf8: u32::MAX,
                sjis: u16::MAX,
                jis: u16::MAX,
                width: u8::MAX,
                height: u8::MAX,
                offset: u32::MAX,
            }),
        }
    }
}

/// Real records in table order, then the sentinel if one is configured.
pub fn records(table: &FontTable, terminator: Terminator) -> Vec<Record> {
    table
        .entries()
        .iter()
        .map(Record::from_entry)
        .chain(Record::terminator(terminator))
        .collect()
}

/// Turns a font name into a C/Python identifier fragment.
pub fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Writes artifacts into `dir` and returns their size and BLAKE3 hash.
pub fn write_artifacts(
    dir: &Path,
    artifacts: &[Artifact],
) -> Result<Vec<ArtifactRecord>, PipelineError> {
    std::fs::create_dir_all(dir)?;
    artifacts
        .iter()
        .map(|artifact| {
            let path: PathBuf = dir.join(&artifact.file_name);
            std::fs::write(&path, &artifact.bytes)?;
            Ok(ArtifactRecord {
                path,
                size: artifact.bytes.len() as u64,
                hash: blake3::hash(&artifact.bytes).to_hex().to_string(),
            })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_records() {
        assert_eq!(Record::terminator(Terminator::None), None);
        let zero = Record::terminator(Terminator::Zero).unwrap();
        assert_eq!((zero.utf8, zero.width, zero.offset), (0, 0, 0));
        let max = Record::terminator(Terminator::Max).unwrap();
        assert_eq!(
            (max.utf8, max.sjis, max.jis, max.width, max.height, max.offset),
            (0xFFFF_FFFF, 0xFFFF, 0xFFFF, 0xFF, 0xFF, 0xFFFF_FFFF)
        );
    }

    #[test]
    fn test_records_append_terminator() {
        let table = test_support::small_table(EncodingAxis::Utf8);
        assert_eq!(records(&table, Terminator::None).len(), 3);
        let with_sentinel = records(&table, Terminator::Zero);
        assert_eq!(with_sentinel.len(), 4);
        assert_eq!(with_sentinel[3].utf8, 0);
    }

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("dot12"), "dot12");
        assert_eq!(identifier("my-font"), "my_font");
        assert_eq!(identifier("12px"), "_12px");
    }

    #[test]
    fn test_write_artifacts_hashes() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = vec![Artifact::new("a.bin", vec![1, 2, 3])];
        let written = write_artifacts(&dir.path().join("out"), &artifacts).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].size, 3);
        assert_eq!(written[0].hash, blake3::hash(&[1, 2, 3]).to_hex().to_string());
        assert_eq!(std::fs::read(&written[0].path).unwrap(), vec![1, 2, 3]);
    }
}
