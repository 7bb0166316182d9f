//! kanjifont backend
//!
//! Turns a character repertoire and an outline font into a device-ready
//! bitmap font table, and serializes that table into one of five formats.
//!
//! The pipeline runs four stages, each fully consuming the previous one:
//!
//! 1. **Classify and build** ([`classify`], [`table`]): walk the requested
//!    code ranges, classify single-byte codes, transcode JIS codes into
//!    Shift-JIS/UTF-8, filter by allow-list, sort by one code axis.
//! 2. **Render** ([`render`]): rasterize each entry at full or half width.
//! 3. **Pack** ([`pack`], [`font_table`]): threshold and pack each glyph into
//!    an MSB-first bit-plane appended to one contiguous blob.
//! 4. **Emit** ([`emit`]): serialize the finished table as C data, raw
//!    binary, a Python module, FONTX2 or BDF.
//!
//! Given the same config and font, every emitted byte is identical across
//! runs.
//!
//! # Example
//!
//! ```no_run
//! use kanjifont_backend::{pipeline, JisTranscoder, OutlineRasterizer};
//! use kanjifont_spec::{CodeSet, PipelineConfig};
//! use std::path::Path;
//!
//! let config = PipelineConfig::new("fonts/shinonome12.ttf").with_code_set(CodeSet::Level1);
//! let rasterizer = OutlineRasterizer::open(Path::new("fonts/shinonome12.ttf"), 12.0).unwrap();
//! let output = pipeline::generate(&config, &rasterizer, &JisTranscoder).unwrap();
//! println!("{} glyphs", output.table.len());
//! ```

pub mod charset;
pub mod classify;
pub mod emit;
pub mod error;
pub mod font_table;
pub mod pack;
pub mod pipeline;
pub mod png;
pub mod preview;
pub mod raster;
pub mod render;
pub mod table;
pub mod transcode;

pub use charset::AllowList;
pub use classify::{classify, Classification, KanaMode};
pub use emit::{Artifact, EmitOptions, Emitter};
pub use error::PipelineError;
pub use font_table::{FontTable, FontTableBuilder};
pub use pack::{pack, BitPlane, PlaneView};
pub use pipeline::{generate, run, GeneratedFont, PipelineOutput};
pub use raster::{OutlineRasterizer, PixelMatrix, Rasterizer, RenderRequest};
pub use render::GlyphRenderStage;
pub use table::CodeTableBuilder;
pub use transcode::{jis_to_sjis, JisTranscoder, Transcoded, Transcoder, Unassigned};
