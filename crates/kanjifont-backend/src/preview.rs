//! Glyph previews: ASCII art and PNG contact sheets.

use kanjifont_spec::{CodeEntry, PipelineConfig};

use crate::classify::KanaMode;
use crate::error::PipelineError;
use crate::font_table::FontTable;
use crate::pipeline::build_font_table;
use crate::png::{encode_grayscale, PngConfig};
use crate::raster::Rasterizer;
use crate::table::CodeTableBuilder;
use crate::transcode::Transcoder;

/// Glyphs per sheet row.
pub const SHEET_COLUMNS: u32 = 16;

const SHEET_INK: u8 = 0;
const SHEET_PAPER: u8 = 255;
const SHEET_GUTTER: u8 = 160;

/// A preview table plus the characters that had no code.
#[derive(Debug)]
pub struct Preview {
    pub table: FontTable,
    pub missing: Vec<char>,
}

/// Renders the characters of `text` through the normal classify/render/pack
/// path, in text order.
pub fn preview_text<R, T>(
    config: &PipelineConfig,
    text: &str,
    rasterizer: &R,
    transcoder: &T,
) -> Result<Preview, PipelineError>
where
    R: Rasterizer + ?Sized,
    T: Transcoder + ?Sized,
{
    let builder = CodeTableBuilder::new(transcoder, KanaMode::from(config.kana));
    let (entries, missing) = builder.entries_for_text(text)?;
    Ok(Preview {
        table: build_font_table(config, entries, rasterizer),
        missing,
    })
}

/// One line per bitmap row, `#` for ink and `.` for paper.
pub fn ascii_art(table: &FontTable, entry: &CodeEntry) -> Vec<String> {
    let plane = table.plane(entry);
    (0..plane.height())
        .map(|y| plane.row_string(y, '#', '.'))
        .collect()
}

/// Lays every glyph of `table` out on a grid of full-width cells separated
/// by one-pixel gutters. Returns `(pixels, width, height)`.
pub fn sheet_pixels(table: &FontTable, columns: u32) -> (Vec<u8>, u32, u32) {
    let cell = table.cell();
    let columns = columns.max(1);
    let count = table.len() as u32;
    let rows = count.div_ceil(columns).max(1);
    let used_columns = count.clamp(1, columns);

    let pitch_x = cell.width + 1;
    let pitch_y = cell.height + 1;
    let width = used_columns * pitch_x + 1;
    let height = rows * pitch_y + 1;
    let mut pixels = vec![SHEET_GUTTER; (width as usize) * (height as usize)];

    for (index, entry) in table.entries().iter().enumerate() {
        let index = index as u32;
        let origin_x = (index % columns) * pitch_x + 1;
        let origin_y = (index / columns) * pitch_y + 1;
        let plane = table.plane(entry);
        for y in 0..cell.height {
            for x in 0..cell.width {
                let value = if plane.is_set(x, y) {
                    SHEET_INK
                } else {
                    SHEET_PAPER
                };
                let offset = ((origin_y + y) * width + origin_x + x) as usize;
                pixels[offset] = value;
            }
        }
    }
    (pixels, width, height)
}

/// Encodes the table as a grayscale PNG contact sheet.
pub fn sheet_png(table: &FontTable, columns: u32) -> Result<Vec<u8>, PipelineError> {
    let (pixels, width, height) = sheet_pixels(table, columns);
    Ok(encode_grayscale(&pixels, width, height, &PngConfig::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{PixelMatrix, RenderRequest};
    use crate::transcode::JisTranscoder;

    /// Draws a vertical bar in column 1.
    struct Bar;

    impl Rasterizer for Bar {
        fn render(&self, request: &RenderRequest) -> PixelMatrix {
            let mut m = PixelMatrix::blank(request.width, request.height);
            for y in 0..request.height {
                m.set(1, y, 0);
            }
            m
        }
    }

    fn config() -> PipelineConfig {
        PipelineConfig::new("unused.ttf").with_cell(4, 3)
    }

    #[test]
    fn test_preview_ascii() {
        let preview = preview_text(&config(), "A亜\u{1F600}", &Bar, &JisTranscoder).unwrap();
        assert_eq!(preview.missing, vec!['\u{1F600}']);
        assert_eq!(preview.table.len(), 2);

        let a = &preview.table.entries()[0];
        assert_eq!(ascii_art(&preview.table, a), vec![".#", ".#", ".#"]);
        let kanji = &preview.table.entries()[1];
        assert_eq!(ascii_art(&preview.table, kanji), vec![".#..", ".#..", ".#.."]);
    }

    #[test]
    fn test_control_char_preview_is_blank() {
        let preview = preview_text(&config(), "\u{7}", &Bar, &JisTranscoder).unwrap();
        let entry = &preview.table.entries()[0];
        assert_eq!(ascii_art(&preview.table, entry), vec!["..", "..", ".."]);
    }

    #[test]
    fn test_sheet_geometry() {
        let preview = preview_text(&config(), "AB亜", &Bar, &JisTranscoder).unwrap();
        let (pixels, width, height) = sheet_pixels(&preview.table, 2);
        assert_eq!((width, height), (2 * 5 + 1, 2 * 4 + 1));
        assert_eq!(pixels.len(), (width * height) as usize);
        // First glyph, column 1 is ink.
        assert_eq!(pixels[(width + 2) as usize], SHEET_INK);
        assert_eq!(pixels[(width + 1) as usize], SHEET_PAPER);
        assert_eq!(pixels[0], SHEET_GUTTER);

        let png = sheet_png(&preview.table, 2).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
