//! C header emitter.
//!
//! Writes `<name>.h` holding a glyph record array and the bitmap blob as a
//! byte array. Each record line carries the source character as a comment;
//! each bitmap row carries its bits.

use std::fmt::{self, Write};

use crate::emit::{identifier, records, Artifact, EmitOptions, Emitter, Record};
use crate::error::PipelineError;
use crate::font_table::FontTable;

/// `cdata` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct CDataEmitter;

impl Emitter for CDataEmitter {
    fn emit(&self, table: &FontTable, options: &EmitOptions) -> Result<Vec<Artifact>, PipelineError> {
        let text = render_header(table, options)?;
        Ok(vec![Artifact::text(format!("{}.h", options.font_name), text)])
    }
}

fn pascal_case(ident: &str) -> String {
    let pascal: String = ident
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if pascal.is_empty() || pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", pascal)
    } else {
        pascal
    }
}

fn record_line(record: &Record) -> String {
    format!(
        "\t{{ 0x{:08x} , 0x{:04x} , 0x{:04x} , {} , {} , 0x{:08x} }}",
        record.utf8, record.sjis, record.jis, record.width, record.height, record.offset
    )
}

fn render_header(table: &FontTable, options: &EmitOptions) -> Result<String, fmt::Error> {
    let ident = identifier(&options.font_name);
    let upper = ident.to_ascii_uppercase();
    let struct_name = format!("{}Glyph", pascal_case(&ident));
    let cell = table.cell();
    let mut out = String::new();

    writeln!(out, "// {}.h: bitmap font table", options.font_name)?;
    writeln!(
        out,
        "// {} glyphs, cell {}x{}, keyed by {}",
        table.len(),
        cell.width,
        cell.height,
        options.axis
    )?;
    writeln!(out)?;
    writeln!(out, "#ifndef {}_H", upper)?;
    writeln!(out, "#define {}_H", upper)?;
    writeln!(out)?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out)?;
    writeln!(out, "#define {}_COUNT {}", upper, table.len())?;
    writeln!(out, "#define {}_CELL_WIDTH {}", upper, cell.width)?;
    writeln!(out, "#define {}_CELL_HEIGHT {}", upper, cell.height)?;
    writeln!(out, "#define {}_BITMAP_SIZE {}", upper, table.bitmap().len())?;
    writeln!(out)?;
    writeln!(out, "typedef struct {{")?;
    writeln!(out, "\tuint32_t utf8;")?;
    writeln!(out, "\tuint16_t sjis;")?;
    writeln!(out, "\tuint16_t jis;")?;
    writeln!(out, "\tuint8_t width;")?;
    writeln!(out, "\tuint8_t height;")?;
    writeln!(out, "\tuint32_t offset;")?;
    writeln!(out, "}} {};", struct_name)?;
    writeln!(out)?;

    writeln!(out, "static const {} {}Data[] = {{", struct_name, ident)?;
    let all = records(table, options.terminator);
    let last = all.len().saturating_sub(1);
    for (i, record) in all.iter().enumerate() {
        let comma = if i == last { "" } else { "," };
        let comment = match table.entries().get(i) {
            Some(entry) => format!("\"{}\"", entry.glyph),
            None => "terminator".to_string(),
        };
        writeln!(out, "{}{}\t// {}", record_line(record), comma, comment)?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;

    writeln!(out, "static const uint8_t {}Bitmap[] = {{", ident)?;
    for entry in table.entries() {
        let plane = table.plane(entry);
        writeln!(
            out,
            "\t// 0x{:08x} \"{}\" {}x{} @ {}",
            entry.code(options.axis),
            entry.glyph,
            entry.width,
            entry.height,
            entry.bitmap_offset
        )?;
        for (y, row) in plane.rows().enumerate() {
            let bytes: String = row.iter().map(|b| format!("0x{:02x},", b)).collect();
            writeln!(
                out,
                "\t{}\t\t// {}",
                bytes,
                plane.row_string(y as u32, '1', '0')
            )?;
        }
    }
    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "#endif // {}_H", upper)?;
    Ok(out)
}
