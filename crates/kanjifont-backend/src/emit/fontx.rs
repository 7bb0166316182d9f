//! FONTX2 emitter and reader.
//!
//! A FONTX2 font is a pair of files. Both start with the same 17 bytes:
//!
//! | offset | size | field                            |
//! |--------|------|----------------------------------|
//! | 0      | 6    | magic `FONTX2`                   |
//! | 6      | 8    | font name, ASCII, space padded   |
//! | 14     | 1    | glyph width (XSize)              |
//! | 15     | 1    | glyph height (YSize)             |
//! | 16     | 1    | code type: 0 half, 1 full        |
//!
//! The half-width file follows with 256 glyphs, one per single-byte code.
//! The full-width file adds a block count byte (Tnum) at offset 17, then
//! Tnum `(start, end)` pairs of little-endian `u16` codes, then the glyphs of
//! every block in order.

use std::io::{self, Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use kanjifont_spec::{CodeEntry, EncodingAxis, OutputFormat};
use thiserror::Error;

use crate::emit::{Artifact, EmitOptions, Emitter};
use crate::error::PipelineError;
use crate::font_table::FontTable;
use crate::pack::row_bytes;

/// FONTX2 magic identifier.
pub const FONTX_MAGIC: &[u8; 6] = b"FONTX2";

/// Length of the font name field.
pub const FONTX_NAME_LEN: usize = 8;

/// Header size shared by both files.
pub const FONTX_HEADER_SIZE: usize = 17;

/// Largest block count the one-byte Tnum field can hold. A 256th block
/// would wrap the count to 0.
pub const FONTX_MAX_BLOCKS: usize = u8::MAX as usize;

/// Number of glyph slots in a half-width file.
pub const FONTX_HALF_GLYPHS: usize = 256;

/// Half-width or full-width file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    Half,
    Full,
}

impl CodeType {
    pub fn as_u8(&self) -> u8 {
        match self {
            CodeType::Half => 0,
            CodeType::Full => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CodeType::Half),
            1 => Some(CodeType::Full),
            _ => None,
        }
    }
}

/// A contiguous run of codes, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlock {
    pub start: u16,
    pub end: u16,
}

impl CodeBlock {
    /// Number of codes in the block.
    pub fn len(&self) -> usize {
        usize::from(self.end) - usize::from(self.start) + 1
    }
}

/// Merges sorted codes into maximal `+1` runs. Repeated codes are ignored.
pub fn code_blocks(codes: &[u16]) -> Vec<CodeBlock> {
    let mut blocks: Vec<CodeBlock> = Vec::new();
    for &code in codes {
        match blocks.last_mut() {
            Some(block) if code == block.end => {}
            Some(block) if block.end.checked_add(1) == Some(code) => block.end = code,
            _ => blocks.push(CodeBlock {
                start: code,
                end: code,
            }),
        }
    }
    blocks
}

/// Fixed FONTX2 header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontxHeader {
    /// Font name, at most 8 ASCII bytes.
    pub name: String,
    pub x_size: u8,
    pub y_size: u8,
    pub code_type: CodeType,
}

impl FontxHeader {
    /// Bytes per glyph.
    pub fn glyph_size(&self) -> usize {
        row_bytes(u32::from(self.x_size)) * usize::from(self.y_size)
    }

    /// Writes the 17 common header bytes.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(FONTX_MAGIC)?;

        let mut name_buf = [b' '; FONTX_NAME_LEN];
        for (slot, ch) in name_buf.iter_mut().zip(self.name.chars()) {
            *slot = if ch.is_ascii_graphic() { ch as u8 } else { b'_' };
        }
        writer.write_all(&name_buf)?;

        writer.write_u8(self.x_size)?;
        writer.write_u8(self.y_size)?;
        writer.write_u8(self.code_type.as_u8())?;
        Ok(())
    }
}

/// Errors reading a FONTX2 file.
#[derive(Debug, Error)]
pub enum FontxReadError {
    #[error("not a FONTX2 file (bad magic)")]
    BadMagic,

    #[error("unknown code type {0}")]
    BadCodeType(u8),

    #[error("file is {actual} bytes but its header describes {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("block {index} has start 0x{start:04X} after end 0x{end:04X}")]
    BadBlock { index: usize, start: u16, end: u16 },

    #[error("truncated FONTX2 file: {0}")]
    Truncated(#[from] io::Error),
}

/// A parsed FONTX2 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontxFile {
    pub header: FontxHeader,
    /// Empty for half-width files.
    pub blocks: Vec<CodeBlock>,
    /// Concatenated glyph planes.
    pub glyphs: Vec<u8>,
}

impl FontxFile {
    pub fn parse(bytes: &[u8]) -> Result<Self, FontxReadError> {
        let mut cursor = Cursor::new(bytes);

        let mut magic = [0u8; 6];
        cursor.read_exact(&mut magic)?;
        if &magic != FONTX_MAGIC {
            return Err(FontxReadError::BadMagic);
        }
        let mut name = [0u8; FONTX_NAME_LEN];
        cursor.read_exact(&mut name)?;
        let name = String::from_utf8_lossy(&name).trim_end().to_string();
        let x_size = cursor.read_u8()?;
        let y_size = cursor.read_u8()?;
        let raw_type = cursor.read_u8()?;
        let code_type = CodeType::from_u8(raw_type).ok_or(FontxReadError::BadCodeType(raw_type))?;
        let header = FontxHeader {
            name,
            x_size,
            y_size,
            code_type,
        };

        let mut blocks = Vec::new();
        let glyph_count = match code_type {
            CodeType::Half => FONTX_HALF_GLYPHS,
            CodeType::Full => {
                let count = cursor.read_u8()?;
                for index in 0..usize::from(count) {
                    let start = cursor.read_u16::<LittleEndian>()?;
                    let end = cursor.read_u16::<LittleEndian>()?;
                    if start > end {
                        return Err(FontxReadError::BadBlock { index, start, end });
                    }
                    blocks.push(CodeBlock { start, end });
                }
                blocks.iter().map(CodeBlock::len).sum()
            }
        };

        let glyph_start = cursor.position() as usize;
        let expected = glyph_start + glyph_count * header.glyph_size();
        if bytes.len() != expected {
            return Err(FontxReadError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            header,
            blocks,
            glyphs: bytes[glyph_start..].to_vec(),
        })
    }

    /// Number of glyphs stored.
    pub fn glyph_count(&self) -> usize {
        match self.header.code_type {
            CodeType::Half => FONTX_HALF_GLYPHS,
            CodeType::Full => self.blocks.iter().map(CodeBlock::len).sum(),
        }
    }

    /// Plane for one code, if present.
    pub fn glyph(&self, code: u16) -> Option<&[u8]> {
        let index = match self.header.code_type {
            CodeType::Half => usize::from(u8::try_from(code).ok()?),
            CodeType::Full => {
                let mut base = 0;
                let mut found = None;
                for block in &self.blocks {
                    if (block.start..=block.end).contains(&code) {
                        found = Some(base + usize::from(code - block.start));
                        break;
                    }
                    base += block.len();
                }
                found?
            }
        };
        let size = self.header.glyph_size();
        self.glyphs.get(index * size..(index + 1) * size)
    }
}

/// `fontx` format: `<name>_hankaku.fnt` and `<name>_zenkaku.fnt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontxEmitter;

impl FontxEmitter {
    fn block_code(entry: &CodeEntry, axis: EncodingAxis) -> u16 {
        match axis {
            EncodingAxis::Jis => entry.jis,
            EncodingAxis::Sjis | EncodingAxis::Utf8 => entry.sjis,
        }
    }

    fn half_file(table: &FontTable, options: &EmitOptions) -> Result<Vec<u8>, PipelineError> {
        let cell = table.cell();
        let header = FontxHeader {
            name: options.font_name.clone(),
            x_size: edge(cell.half_width())?,
            y_size: edge(cell.height)?,
            code_type: CodeType::Half,
        };
        let glyph_size = header.glyph_size();

        let mut slots = vec![0u8; FONTX_HALF_GLYPHS * glyph_size];
        for entry in table.entries().iter().filter(|e| e.is_single_byte()) {
            let plane = table.plane(entry).as_bytes();
            let start = entry.utf8 as usize * glyph_size;
            let len = plane.len().min(glyph_size);
            slots[start..start + len].copy_from_slice(&plane[..len]);
        }

        let mut buf = Vec::with_capacity(FONTX_HEADER_SIZE + slots.len());
        header.write(&mut buf)?;
        buf.extend_from_slice(&slots);
        Ok(buf)
    }

    fn full_file(table: &FontTable, options: &EmitOptions) -> Result<Vec<u8>, PipelineError> {
        let axis = options.axis;
        if !matches!(axis, EncodingAxis::Sjis | EncodingAxis::Jis) {
            return Err(PipelineError::UnsupportedEncodingAxis {
                format: OutputFormat::Fontx,
                axis,
            });
        }

        let glyphs: Vec<&CodeEntry> = table
            .sorted_by(axis)
            .into_iter()
            .filter(|e| !e.is_single_byte())
            .collect();
        let codes: Vec<u16> = glyphs.iter().map(|e| Self::block_code(e, axis)).collect();
        let blocks = code_blocks(&codes);
        if blocks.len() > FONTX_MAX_BLOCKS {
            return Err(PipelineError::BlockOverflow {
                blocks: blocks.len(),
                max: FONTX_MAX_BLOCKS,
            });
        }

        let cell = table.cell();
        let header = FontxHeader {
            name: options.font_name.clone(),
            x_size: edge(cell.width)?,
            y_size: edge(cell.height)?,
            code_type: CodeType::Full,
        };
        let glyph_size = header.glyph_size();

        let mut buf = Vec::with_capacity(
            FONTX_HEADER_SIZE + 1 + blocks.len() * 4 + glyphs.len() * glyph_size,
        );
        header.write(&mut buf)?;
        buf.write_u8(blocks.len() as u8)?;
        for block in &blocks {
            buf.write_u16::<LittleEndian>(block.start)?;
            buf.write_u16::<LittleEndian>(block.end)?;
        }

        let mut previous = None;
        for (entry, code) in glyphs.iter().zip(&codes) {
            if previous == Some(*code) {
                continue;
            }
            previous = Some(*code);
            let mut plane = table.plane(entry).as_bytes().to_vec();
            plane.resize(glyph_size, 0);
            buf.write_all(&plane)?;
        }
        Ok(buf)
    }
}

fn edge(value: u32) -> Result<u8, PipelineError> {
    u8::try_from(value).map_err(|_| {
        PipelineError::FormatConstraint(format!("FONTX2 glyph edge {} exceeds 255", value))
    })
}

impl Emitter for FontxEmitter {
    fn emit(&self, table: &FontTable, options: &EmitOptions) -> Result<Vec<Artifact>, PipelineError> {
        // Build the full-width file first: block overflow must abort before
        // anything is produced.
        let full = Self::full_file(table, options)?;
        let half = Self::half_file(table, options)?;
        Ok(vec![
            Artifact::new(format!("{}_hankaku.fnt", options.font_name), half),
            Artifact::new(format!("{}_zenkaku.fnt", options.font_name), full),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::test_support::small_table;
    use crate::font_table::FontTableBuilder;
    use crate::pack::BitPlane;
    use crate::raster::PixelMatrix;
    use kanjifont_spec::CellSize;

    fn options(axis: EncodingAxis) -> EmitOptions {
        EmitOptions {
            font_name: "dot8".to_string(),
            axis,
            ..EmitOptions::default()
        }
    }

    #[test]
    fn test_code_blocks_two_runs() {
        let blocks = code_blocks(&[0x8140, 0x8141, 0x8142, 0x8150]);
        assert_eq!(
            blocks,
            vec![
                CodeBlock { start: 0x8140, end: 0x8142 },
                CodeBlock { start: 0x8150, end: 0x8150 },
            ]
        );
        assert_eq!(blocks[0].len(), 3);
    }

    #[test]
    fn test_code_blocks_edge_cases() {
        assert!(code_blocks(&[]).is_empty());
        assert_eq!(code_blocks(&[0xFFFF]).len(), 1);
        assert_eq!(code_blocks(&[0x8140, 0x8140, 0x8141]).len(), 1);
    }

    #[test]
    fn test_header_bytes() {
        let header = FontxHeader {
            name: "dot8".to_string(),
            x_size: 8,
            y_size: 16,
            code_type: CodeType::Full,
        };
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        assert_eq!(buf.len(), FONTX_HEADER_SIZE);
        assert_eq!(&buf[..14], b"FONTX2dot8    ");
        assert_eq!(&buf[14..], &[8, 16, 1]);
    }

    #[test]
    fn test_emit_and_parse() {
        let table = small_table(EncodingAxis::Sjis);
        let artifacts = FontxEmitter.emit(&table, &options(EncodingAxis::Sjis)).unwrap();
        assert_eq!(artifacts[0].file_name, "dot8_hankaku.fnt");
        assert_eq!(artifacts[1].file_name, "dot8_zenkaku.fnt");

        let half = FontxFile::parse(&artifacts[0].bytes).unwrap();
        assert_eq!(half.header.code_type, CodeType::Half);
        assert_eq!((half.header.x_size, half.header.y_size), (4, 2));
        assert_eq!(artifacts[0].bytes.len(), FONTX_HEADER_SIZE + 256 * 2);
        assert_eq!(half.glyph(0x41), Some(&[0x90, 0x60][..]));
        assert_eq!(half.glyph(0x42), Some(&[0x00, 0x00][..]));

        let full = FontxFile::parse(&artifacts[1].bytes).unwrap();
        assert_eq!(full.header.name, "dot8");
        assert_eq!(full.blocks, vec![CodeBlock { start: 0x889F, end: 0x889F }]);
        assert_eq!(artifacts[1].bytes[17], 1);
        assert_eq!(&artifacts[1].bytes[18..22], &[0x9F, 0x88, 0x9F, 0x88]);
        assert_eq!(full.glyph(0x889F), Some(&[0xFF, 0xFF][..]));
        assert_eq!(full.glyph(0x88A0), None);
    }

    #[test]
    fn test_jis_axis_blocks() {
        let table = small_table(EncodingAxis::Utf8);
        let artifacts = FontxEmitter.emit(&table, &options(EncodingAxis::Jis)).unwrap();
        let full = FontxFile::parse(&artifacts[1].bytes).unwrap();
        assert_eq!(full.blocks, vec![CodeBlock { start: 0x3021, end: 0x3021 }]);
    }

    #[test]
    fn test_utf8_axis_rejected() {
        let table = small_table(EncodingAxis::Utf8);
        let err = FontxEmitter.emit(&table, &options(EncodingAxis::Utf8)).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedEncodingAxis { .. }));
    }

    #[test]
    fn test_block_overflow() {
        let cell = CellSize { width: 8, height: 1 };
        let mut builder = FontTableBuilder::new(EncodingAxis::Jis, cell);
        let blank = || -> BitPlane { crate::pack::pack(&PixelMatrix::blank(8, 1)) };
        // 256 isolated codes: every other cell of rows 0x30-0x32.
        for i in 0..256u16 {
            let jis = 0x3021 + (i / 47) * 0x100 + (i % 47) * 2;
            let mut entry = CodeEntry::multi_byte(0xE4BA9C + u32::from(i), jis, jis, '亜');
            entry.width = 8;
            entry.height = 1;
            builder.push(entry, blank());
        }
        let table = builder.finish();
        let err = FontxEmitter.emit(&table, &options(EncodingAxis::Jis)).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::BlockOverflow { blocks: 256, max: 255 }
        ));
    }

    #[test]
    fn test_block_limit_fits_count_byte() {
        assert_eq!(u8::try_from(FONTX_MAX_BLOCKS), Ok(u8::MAX));
        assert!(u8::try_from(FONTX_MAX_BLOCKS + 1).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            FontxFile::parse(b"FONTX1dot8    \x08\x10\x00"),
            Err(FontxReadError::BadMagic)
        ));
        assert!(matches!(
            FontxFile::parse(b"FONTX2dot8    \x08\x10\x00"),
            Err(FontxReadError::SizeMismatch { .. })
        ));
        assert!(matches!(
            FontxFile::parse(b"FONTX2"),
            Err(FontxReadError::Truncated(_))
        ));
    }
}
