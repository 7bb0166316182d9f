//! End-to-end generation tests, one per output format.
//!
//! Each test runs the full pipeline with the stub rasterizer over the
//! minimal code set (95 ASCII glyphs plus 亜 and 唖) in 8×8 cells and checks
//! the files that land on disk.

use kanjifont_backend::emit::fontx::{CodeBlock, CodeType, FontxFile};
use kanjifont_spec::{EncodingAxis, OutputFormat, Terminator};
use kanjifont_tests::{compute_hash, config, generate_into, Fixture, StubRasterizer};
use pretty_assertions::assert_eq;
use std::fs;

/// 95 half-width planes and 2 full-width planes, 8 bytes each.
const MINIMAL_BITMAP: usize = 97 * 8;

/// The plane the stub draws for `ch` in an 8-pixel-wide cell, cropped to
/// `width` columns.
fn stub_plane(ch: char, width: u32) -> Vec<u8> {
    (0..8)
        .map(|y| {
            (0..width).fold(0u8, |byte, x| {
                if StubRasterizer::inks(u32::from(ch), x, y) {
                    byte | (0x80 >> x)
                } else {
                    byte
                }
            })
        })
        .collect()
}

#[test]
fn test_cdata_header() {
    let out = Fixture::new();
    let font = generate_into(&config(OutputFormat::Cdata, EncodingAxis::Utf8), out.path()).unwrap();
    assert_eq!(out.file_names(), vec!["stub8.h"]);
    assert_eq!(font.table.len(), 97);

    let text = fs::read_to_string(out.join("stub8.h")).unwrap();
    assert!(text.contains("#define STUB8_COUNT 97\n"));
    assert!(text.contains(&format!("#define STUB8_BITMAP_SIZE {}\n", MINIMAL_BITMAP)));
    assert!(text.contains("static const Stub8Glyph stub8Data[] = {\n"));
    assert!(text.contains("\t{ 0x00e4ba9c , 0x889f , 0x3021 , 8 , 8 , 0x000002f8 },\t// \"亜\"\n"));
    // Last record has no trailing comma.
    assert!(text.contains("\t{ 0x00e59496 , 0x88a0 , 0x3022 , 8 , 8 , 0x00000300 }\t// \"唖\"\n"));
    assert!(text.ends_with("#endif // STUB8_H\n"));
}

#[test]
fn test_binary_table_and_blob() {
    let out = Fixture::new();
    let config = config(OutputFormat::Binary, EncodingAxis::Utf8).with_terminator(Terminator::Max);
    let font = generate_into(&config, out.path()).unwrap();
    assert_eq!(out.file_names(), vec!["stub8_bitmap.bin", "stub8_table.bin"]);

    let table = fs::read(out.join("stub8_table.bin")).unwrap();
    assert_eq!(table.len(), 98 * 14);
    // First record: ' ' with its degenerate code triple, 4x8 at offset 0.
    assert_eq!(
        &table[..14],
        &[0, 0, 0, 0x20, 0, 0x20, 0, 0x20, 4, 8, 0, 0, 0, 0]
    );
    assert_eq!(&table[97 * 14..], &[0xFF; 14]);

    let blob = fs::read(out.join("stub8_bitmap.bin")).unwrap();
    assert_eq!(blob.len(), MINIMAL_BITMAP);
    assert_eq!(blob, font.table.bitmap());
}

#[test]
fn test_python_module() {
    let out = Fixture::new();
    generate_into(&config(OutputFormat::Python, EncodingAxis::Sjis), out.path()).unwrap();
    let text = fs::read_to_string(out.join("stub8.py")).unwrap();
    assert!(text.contains("STUB8_CELL = (8, 8)\n"));
    assert!(text.contains("STUB8_COUNT = 97\n"));
    assert!(text.contains("    (0x00e4ba9c, 0x889f, 0x3021, 8, 8, 0x000002f8),  # 亜\n"));
    assert!(text.contains("stub8_bitmap = bytes([\n"));
}

#[test]
fn test_fontx_pair_sjis() {
    let out = Fixture::new();
    generate_into(&config(OutputFormat::Fontx, EncodingAxis::Sjis), out.path()).unwrap();
    assert_eq!(
        out.file_names(),
        vec!["stub8_hankaku.fnt", "stub8_zenkaku.fnt"]
    );

    let half = FontxFile::parse(&fs::read(out.join("stub8_hankaku.fnt")).unwrap()).unwrap();
    assert_eq!(half.header.name, "stub8");
    assert_eq!(half.header.code_type, CodeType::Half);
    assert_eq!((half.header.x_size, half.header.y_size), (4, 8));
    assert_eq!(half.glyph_count(), 256);
    assert_eq!(half.glyph(0x41).unwrap(), stub_plane('A', 4).as_slice());
    // Codes outside the minimal set are zero-filled.
    assert_eq!(half.glyph(0x00).unwrap(), &[0u8; 8]);
    assert_eq!(half.glyph(0xB1).unwrap(), &[0u8; 8]);

    let full = FontxFile::parse(&fs::read(out.join("stub8_zenkaku.fnt")).unwrap()).unwrap();
    assert_eq!(full.header.code_type, CodeType::Full);
    assert_eq!(
        full.blocks,
        vec![CodeBlock {
            start: 0x889F,
            end: 0x88A0
        }]
    );
    assert_eq!(full.glyph(0x889F).unwrap(), stub_plane('亜', 8).as_slice());
    assert_eq!(full.glyph(0x88A0).unwrap(), stub_plane('唖', 8).as_slice());
}

#[test]
fn test_fontx_blocks_follow_jis_axis() {
    let out = Fixture::new();
    generate_into(&config(OutputFormat::Fontx, EncodingAxis::Jis), out.path()).unwrap();
    let full = FontxFile::parse(&fs::read(out.join("stub8_zenkaku.fnt")).unwrap()).unwrap();
    assert_eq!(
        full.blocks,
        vec![CodeBlock {
            start: 0x3021,
            end: 0x3022
        }]
    );
    // Header (17) + Tnum (1) + one block (4) + two 8-byte glyphs.
    assert_eq!(
        fs::metadata(out.join("stub8_zenkaku.fnt")).unwrap().len(),
        17 + 1 + 4 + 16
    );
}

#[test]
fn test_bdf_single_and_split() {
    let out = Fixture::new();
    generate_into(&config(OutputFormat::Bdf, EncodingAxis::Utf8), out.path()).unwrap();
    let text = fs::read_to_string(out.join("stub8.bdf")).unwrap();
    assert!(text.starts_with("STARTFONT 2.1\n"));
    assert!(text.contains("CHARS 97\n"));
    assert!(text.contains("STARTCHAR U+4E9C\nENCODING 20124\n"));
    assert!(text.ends_with("ENDFONT\n"));

    let out = Fixture::new();
    let config = config(OutputFormat::Bdf, EncodingAxis::Jis).with_split(true);
    generate_into(&config, out.path()).unwrap();
    assert_eq!(out.file_names(), vec!["stub8_full.bdf", "stub8_half.bdf"]);
    let half = fs::read_to_string(out.join("stub8_half.bdf")).unwrap();
    let full = fs::read_to_string(out.join("stub8_full.bdf")).unwrap();
    assert!(half.contains("CHARS 95\n"));
    assert!(full.contains("CHARS 2\n"));
    assert!(full.contains("ENCODING 12321\n"));
}

#[test]
fn test_artifact_records_match_files() {
    let out = Fixture::new();
    let font = generate_into(&config(OutputFormat::Fontx, EncodingAxis::Jis), out.path()).unwrap();
    assert_eq!(font.artifacts.len(), 2);
    for artifact in &font.artifacts {
        let bytes = fs::read(&artifact.path).unwrap();
        assert_eq!(artifact.size, bytes.len() as u64);
        assert_eq!(artifact.hash, compute_hash(&bytes));
    }
}
