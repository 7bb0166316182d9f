//! BDF (Glyph Bitmap Distribution Format 2.1) emitter.

use std::fmt::{self, Write};

use kanjifont_spec::{CodeEntry, EncodingAxis, Glyph};

use crate::emit::{Artifact, EmitOptions, Emitter};
use crate::error::PipelineError;
use crate::font_table::FontTable;

/// Resolution written into `SIZE` and the XLFD name.
pub const BDF_DPI: u32 = 72;

/// Which glyphs a BDF file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BdfPart {
    All,
    Half,
    Full,
}

impl BdfPart {
    fn includes(&self, entry: &CodeEntry) -> bool {
        match self {
            BdfPart::All => true,
            BdfPart::Half => entry.is_single_byte(),
            BdfPart::Full => !entry.is_single_byte(),
        }
    }

    fn file_suffix(&self) -> &'static str {
        match self {
            BdfPart::All => "",
            BdfPart::Half => "_half",
            BdfPart::Full => "_full",
        }
    }
}

/// `CHARSET_REGISTRY` and `CHARSET_ENCODING` for a file.
pub fn charset(axis: EncodingAxis, part: BdfPart) -> (&'static str, &'static str) {
    match (axis, part) {
        (EncodingAxis::Utf8, _) => ("ISO10646", "1"),
        (_, BdfPart::Half) => ("JISX0201.1976", "0"),
        (EncodingAxis::Sjis, _) => ("JISX0208.1983", "SJIS"),
        (EncodingAxis::Jis, _) => ("JISX0208.1983", "0"),
    }
}

/// The `ENCODING` value of an entry.
///
/// On the UTF-8 axis this is the Unicode scalar of the glyph; placeholders
/// keep their raw code.
pub fn encoding_value(entry: &CodeEntry, axis: EncodingAxis) -> u32 {
    match (axis, entry.glyph) {
        (EncodingAxis::Utf8, Glyph::Printable(ch)) => u32::from(ch),
        (EncodingAxis::Utf8, Glyph::Placeholder(code)) => u32::from(code),
        (EncodingAxis::Sjis, _) => u32::from(entry.sjis),
        (EncodingAxis::Jis, _) => u32::from(entry.jis),
    }
}

fn glyph_name(entry: &CodeEntry, axis: EncodingAxis) -> String {
    let code = encoding_value(entry, axis);
    match axis {
        EncodingAxis::Utf8 => format!("U+{:04X}", code),
        EncodingAxis::Sjis | EncodingAxis::Jis => format!("{}{:04X}", axis, code),
    }
}

/// `bdf` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BdfEmitter;

impl BdfEmitter {
    /// Renders one BDF file holding the entries of `part`.
    pub fn render(
        table: &FontTable,
        options: &EmitOptions,
        part: BdfPart,
    ) -> Result<String, fmt::Error> {
        let axis = options.axis;
        let cell = table.cell();
        let entries: Vec<&CodeEntry> = table.entries().iter().filter(|e| part.includes(e)).collect();
        let (registry, encoding) = charset(axis, part);

        let max_width = entries
            .iter()
            .map(|e| u32::from(e.width))
            .max()
            .unwrap_or(cell.width);
        let average_width = if entries.is_empty() {
            cell.width * 10
        } else {
            entries.iter().map(|e| u32::from(e.width) * 10).sum::<u32>() / entries.len() as u32
        };

        let mut out = String::new();
        writeln!(out, "STARTFONT 2.1")?;
        writeln!(
            out,
            "FONT -kanjifont-{}-Medium-R-Normal--{}-{}-{}-{}-C-{}-{}-{}",
            options.font_name,
            cell.height,
            cell.height * 10,
            BDF_DPI,
            BDF_DPI,
            average_width,
            registry,
            encoding
        )?;
        writeln!(out, "SIZE {} {} {}", cell.height, BDF_DPI, BDF_DPI)?;
        writeln!(out, "FONTBOUNDINGBOX {} {} 0 0", max_width, cell.height)?;

        let default_char = entries.first().map(|e| encoding_value(e, axis));
        let property_count = if default_char.is_some() { 6 } else { 5 };
        writeln!(out, "STARTPROPERTIES {}", property_count)?;
        writeln!(out, "FONT_ASCENT {}", cell.height)?;
        writeln!(out, "FONT_DESCENT 0")?;
        writeln!(out, "PIXEL_SIZE {}", cell.height)?;
        writeln!(out, "CHARSET_REGISTRY \"{}\"", registry)?;
        writeln!(out, "CHARSET_ENCODING \"{}\"", encoding)?;
        if let Some(code) = default_char {
            writeln!(out, "DEFAULT_CHAR {}", code)?;
        }
        writeln!(out, "ENDPROPERTIES")?;

        writeln!(out, "CHARS {}", entries.len())?;
        for entry in &entries {
            let plane = table.plane(entry);
            let swidth = u32::from(entry.width) * 1000 / cell.height.max(1);
            writeln!(out, "STARTCHAR {}", glyph_name(entry, axis))?;
            writeln!(out, "ENCODING {}", encoding_value(entry, axis))?;
            writeln!(out, "SWIDTH {} 0", swidth)?;
            writeln!(out, "DWIDTH {} 0", entry.width)?;
            writeln!(out, "BBX {} {} 0 0", entry.width, entry.height)?;
            writeln!(out, "BITMAP")?;
            for row in plane.rows() {
                let hex: String = row.iter().map(|b| format!("{:02X}", b)).collect();
                writeln!(out, "{}", hex)?;
            }
            writeln!(out, "ENDCHAR")?;
        }
        writeln!(out, "ENDFONT")?;
        Ok(out)
    }
}

impl Emitter for BdfEmitter {
    fn emit(&self, table: &FontTable, options: &EmitOptions) -> Result<Vec<Artifact>, PipelineError> {
        let parts: &[BdfPart] = if options.split {
            &[BdfPart::Half, BdfPart::Full]
        } else {
            &[BdfPart::All]
        };
        let mut artifacts = Vec::with_capacity(parts.len());
        for &part in parts {
            artifacts.push(Artifact::text(
                format!("{}{}.bdf", options.font_name, part.file_suffix()),
                Self::render(table, options, part)?,
            ));
        }
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::test_support::small_table;
    use pretty_assertions::assert_eq;

    fn options(axis: EncodingAxis, split: bool) -> EmitOptions {
        EmitOptions {
            font_name: "dot8".to_string(),
            axis,
            split,
            ..EmitOptions::default()
        }
    }

    #[test]
    fn test_single_file() {
        let table = small_table(EncodingAxis::Utf8);
        let artifacts = BdfEmitter.emit(&table, &options(EncodingAxis::Utf8, false)).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].file_name, "dot8.bdf");
        let text = String::from_utf8(artifacts[0].bytes.clone()).unwrap();

        assert!(text.starts_with("STARTFONT 2.1\nFONT -kanjifont-dot8-Medium-R-Normal--2-20-72-72-C-53-ISO10646-1\n"));
        assert!(text.contains("CHARS 3\n"));
        assert!(text.contains("DEFAULT_CHAR 0\n"));
        assert!(text.ends_with("ENDFONT\n"));

        let kanji: Vec<_> = text
            .lines()
            .skip_while(|l| *l != "STARTCHAR U+4E9C")
            .take_while(|l| *l != "ENDCHAR")
            .collect();
        assert_eq!(
            kanji,
            vec![
                "STARTCHAR U+4E9C",
                "ENCODING 20124",
                "SWIDTH 4000 0",
                "DWIDTH 8 0",
                "BBX 8 2 0 0",
                "BITMAP",
                "FF",
                "FF",
            ]
        );
    }

    #[test]
    fn test_half_width_rows() {
        let table = small_table(EncodingAxis::Utf8);
        let text = BdfEmitter::render(&table, &options(EncodingAxis::Jis, false), BdfPart::All).unwrap();
        let a: Vec<_> = text
            .lines()
            .skip_while(|l| *l != "STARTCHAR jis0041")
            .take_while(|l| *l != "ENDCHAR")
            .collect();
        assert_eq!(
            a,
            vec![
                "STARTCHAR jis0041",
                "ENCODING 65",
                "SWIDTH 2000 0",
                "DWIDTH 4 0",
                "BBX 4 2 0 0",
                "BITMAP",
                "90",
                "60",
            ]
        );
        assert!(text.contains("ENCODING 12321\n"));
    }

    #[test]
    fn test_split_files() {
        let table = small_table(EncodingAxis::Sjis);
        let artifacts = BdfEmitter.emit(&table, &options(EncodingAxis::Sjis, true)).unwrap();
        let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["dot8_half.bdf", "dot8_full.bdf"]);

        let half = String::from_utf8(artifacts[0].bytes.clone()).unwrap();
        assert!(half.contains("CHARS 2\n"));
        assert!(half.contains("CHARSET_REGISTRY \"JISX0201.1976\"\n"));

        let full = String::from_utf8(artifacts[1].bytes.clone()).unwrap();
        assert!(full.contains("CHARS 1\n"));
        assert!(full.contains("CHARSET_ENCODING \"SJIS\"\n"));
        assert!(full.contains("ENCODING 34975\n"));
    }

    #[test]
    fn test_encoding_value_placeholder() {
        let entry = CodeEntry::single_byte(0x07, Glyph::Placeholder(0x07));
        assert_eq!(encoding_value(&entry, EncodingAxis::Utf8), 7);
        let kana = CodeEntry::single_byte(0xB1, Glyph::Printable('ｱ'));
        assert_eq!(encoding_value(&kana, EncodingAxis::Utf8), 0xFF71);
        assert_eq!(encoding_value(&kana, EncodingAxis::Jis), 0xB1);
    }
}
