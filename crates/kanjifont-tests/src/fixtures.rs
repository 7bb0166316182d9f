//! Config and filesystem fixtures.

use kanjifont_backend::transcode::unpack_utf8;
use kanjifont_backend::{pipeline, GeneratedFont, JisTranscoder, PipelineError, Transcoder};
use kanjifont_spec::{CodeSet, EncodingAxis, OutputFormat, PipelineConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::stub::StubRasterizer;

/// Font path recorded in fixture configs. Never opened.
pub const STUB_FONT: &str = "stub.ttf";

/// A minimal-code-set config for `format` keyed by `axis`, 8×8 cells.
pub fn config(format: OutputFormat, axis: EncodingAxis) -> PipelineConfig {
    PipelineConfig::new(STUB_FONT)
        .with_cell(8, 8)
        .with_code_set(CodeSet::Minimal)
        .with_format(format)
        .with_encoding(axis)
        .with_font_name("stub8")
}

/// Runs the pipeline with the stub rasterizer, writing into `dir`.
pub fn generate_into(config: &PipelineConfig, dir: &Path) -> Result<GeneratedFont, PipelineError> {
    let config = config.clone().with_output_dir(dir);
    pipeline::generate(&config, &StubRasterizer, &JisTranscoder)
}

/// A temporary output directory.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Names of the files in the directory, sorted.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("failed to list temp dir")
            .map(|e| {
                e.expect("bad dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Writes `text` to `name` inside the directory and returns its path.
    pub fn write(&self, name: &str, text: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, text).expect("failed to write fixture file");
        path
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` level-1 kanji, taking every `step`-th JIS code from 0x3021 and
/// staying inside each 94-cell row.
pub fn scattered_kanji(count: usize, step: u16) -> String {
    let mut text = String::new();
    let mut taken = 0;
    'rows: for row in 0x30u16..=0x4E {
        let mut cell = 0x21u16;
        while cell <= 0x7E {
            let jis = (row << 8) | cell;
            if let Some(ch) = JisTranscoder
                .transcode(jis)
                .ok()
                .and_then(|t| unpack_utf8(t.utf8))
            {
                text.push(ch);
                taken += 1;
                if taken == count {
                    break 'rows;
                }
            }
            cell += step;
        }
    }
    text
}
