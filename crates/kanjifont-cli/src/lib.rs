//! kanjifont CLI library.
//!
//! Config resolution and the command implementations behind the
//! `kanjifont` binary.

pub mod commands;
pub mod input;
