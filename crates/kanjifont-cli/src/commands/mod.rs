//! Command implementations for the kanjifont CLI.

pub mod charsets;
pub mod generate;
pub mod inspect;
pub mod json_output;
pub mod preview;
pub mod reporting;
