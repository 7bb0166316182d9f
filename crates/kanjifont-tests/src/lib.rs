//! kanjifont End-to-End Test Infrastructure
//!
//! Integration tests for the full pipeline: config -> code table -> packed
//! bitmap -> emitted files. Every test renders through a stub rasterizer so
//! no font file is needed and output is reproducible.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p kanjifont-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod stub;

pub use determinism::{compute_hash, verify_determinism, DeterminismResult, DiffInfo};
pub use fixtures::{config, generate_into, scattered_kanji, Fixture};
pub use stub::{SolidRasterizer, StubRasterizer};
