//! Python module emitter.

use std::fmt::{self, Write};

use crate::emit::{identifier, records, Artifact, EmitOptions, Emitter};
use crate::error::PipelineError;
use crate::font_table::FontTable;

/// Bytes per line of the bitmap literal.
const BYTES_PER_LINE: usize = 16;

/// `python` format: `<name>.py` with a tuple list and a bytes literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonEmitter;

/// Escapes a glyph label for a `#` comment.
fn comment_label(text: &str) -> String {
    text.chars().flat_map(char::escape_debug).collect()
}

impl Emitter for PythonEmitter {
    fn emit(&self, table: &FontTable, options: &EmitOptions) -> Result<Vec<Artifact>, PipelineError> {
        let text = render_module(table, options)?;
        Ok(vec![Artifact::text(format!("{}.py", options.font_name), text)])
    }
}

fn render_module(table: &FontTable, options: &EmitOptions) -> Result<String, fmt::Error> {
    let ident = identifier(&options.font_name);
    let upper = ident.to_ascii_uppercase();
    let cell = table.cell();
    let mut out = String::new();

    writeln!(out, "# {}.py: bitmap font table", options.font_name)?;
    writeln!(
        out,
        "# fields: (utf8, sjis, jis, width, height, offset), keyed by {}",
        options.axis
    )?;
    writeln!(out)?;
    writeln!(out, "{}_CELL = ({}, {})", upper, cell.width, cell.height)?;
    writeln!(out, "{}_COUNT = {}", upper, table.len())?;
    writeln!(out)?;

    writeln!(out, "{}_data = [", ident)?;
    for (i, record) in records(table, options.terminator).iter().enumerate() {
        let label = match table.entries().get(i) {
            Some(entry) => comment_label(&entry.glyph.to_string()),
            None => "terminator".to_string(),
        };
        writeln!(
            out,
            "    (0x{:08x}, 0x{:04x}, 0x{:04x}, {}, {}, 0x{:08x}),  # {}",
            record.utf8, record.sjis, record.jis, record.width, record.height, record.offset, label
        )?;
    }
    writeln!(out, "]")?;
    writeln!(out)?;

    writeln!(out, "{}_bitmap = bytes([", ident)?;
    for chunk in table.bitmap().chunks(BYTES_PER_LINE) {
        let line: Vec<String> = chunk.iter().map(|b| format!("0x{:02x}", b)).collect();
        writeln!(out, "    {},", line.join(", "))?;
    }
    writeln!(out, "])")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::test_support::small_table;
    use kanjifont_spec::{EncodingAxis, Terminator};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_python_module() {
        let table = small_table(EncodingAxis::Utf8);
        let options = EmitOptions {
            font_name: "dot8".to_string(),
            terminator: Terminator::Max,
            ..EmitOptions::default()
        };
        let artifacts = PythonEmitter.emit(&table, &options).unwrap();
        assert_eq!(artifacts[0].file_name, "dot8.py");
        let text = String::from_utf8(artifacts[0].bytes.clone()).unwrap();

        assert!(text.contains("DOT8_CELL = (8, 2)\n"));
        let data: Vec<_> = text
            .lines()
            .skip_while(|l| *l != "dot8_data = [")
            .skip(1)
            .take_while(|l| *l != "]")
            .collect();
        assert_eq!(
            data,
            vec![
                "    (0x00000000, 0x0000, 0x0000, 4, 2, 0x00000000),  # \\\\x00",
                "    (0x00000041, 0x0041, 0x0041, 4, 2, 0x00000002),  # A",
                "    (0x00e4ba9c, 0x889f, 0x3021, 8, 2, 0x00000004),  # 亜",
                "    (0xffffffff, 0xffff, 0xffff, 255, 255, 0xffffffff),  # terminator",
            ]
        );
        assert!(text.ends_with("dot8_bitmap = bytes([\n    0x00, 0x00, 0x90, 0x60, 0xff, 0xff,\n])\n"));
    }
}
