//! Raw binary emitter.
//!
//! `<name>_table.bin` holds 14-byte big-endian records:
//!
//! | offset | size | field  |
//! |--------|------|--------|
//! | 0      | 4    | utf8   |
//! | 4      | 2    | sjis   |
//! | 6      | 2    | jis    |
//! | 8      | 1    | width  |
//! | 9      | 1    | height |
//! | 10     | 4    | offset |
//!
//! `<name>_bitmap.bin` is the bitmap blob verbatim.

use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};

use crate::emit::{records, Artifact, EmitOptions, Emitter, Record};
use crate::error::PipelineError;
use crate::font_table::FontTable;

/// `binary` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryEmitter;

impl Record {
    /// Writes this record big-endian.
    pub fn write_be<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<BigEndian>(self.utf8)?;
        writer.write_u16::<BigEndian>(self.sjis)?;
        writer.write_u16::<BigEndian>(self.jis)?;
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u32::<BigEndian>(self.offset)?;
        Ok(())
    }
}

impl Emitter for BinaryEmitter {
    fn emit(&self, table: &FontTable, options: &EmitOptions) -> Result<Vec<Artifact>, PipelineError> {
        let all = records(table, options.terminator);
        let mut buf = Vec::with_capacity(all.len() * Record::SIZE);
        for record in &all {
            record.write_be(&mut buf)?;
        }

        Ok(vec![
            Artifact::new(format!("{}_table.bin", options.font_name), buf),
            Artifact::new(
                format!("{}_bitmap.bin", options.font_name),
                table.bitmap().to_vec(),
            ),
        ])
    }
}
