//! FONTX2 block-count limit.
//!
//! The full-width file stores its block count in one byte. A repertoire
//! that breaks into more runs than that must fail before anything is
//! written.

use kanjifont_backend::emit::fontx::{FontxFile, FONTX_MAX_BLOCKS};
use kanjifont_backend::PipelineError;
use kanjifont_spec::{BackendError, CodeSet, EncodingAxis, OutputFormat, PipelineConfig};
use kanjifont_tests::{config, generate_into, scattered_kanji, Fixture};
use std::fs;

/// A custom-list FONTX2 config keyed by JIS whose list holds `count`
/// kanji, none adjacent to another.
fn scattered_config(lists: &Fixture, count: usize) -> PipelineConfig {
    let charlist = lists.write("charlist.txt", &scattered_kanji(count, 2));
    config(OutputFormat::Fontx, EncodingAxis::Jis)
        .with_code_set(CodeSet::Custom)
        .with_charlist(charlist)
}

#[test]
fn test_overflow_writes_nothing() {
    let lists = Fixture::new();
    let out = Fixture::new();
    let config = scattered_config(&lists, FONTX_MAX_BLOCKS + 1);

    let err = generate_into(&config, out.path()).unwrap_err();
    match &err {
        PipelineError::BlockOverflow { blocks, max } => {
            assert_eq!(*blocks, FONTX_MAX_BLOCKS + 1);
            assert_eq!(*max, FONTX_MAX_BLOCKS);
        }
        other => panic!("expected BlockOverflow, got {:?}", other),
    }
    assert_eq!(err.code(), "KANJIFONT_005");
    assert!(out.file_names().is_empty());
}

#[test]
fn test_limit_is_inclusive() {
    let lists = Fixture::new();
    let out = Fixture::new();
    let config = scattered_config(&lists, FONTX_MAX_BLOCKS);

    generate_into(&config, out.path()).unwrap();
    let bytes = fs::read(out.join("stub8_zenkaku.fnt")).unwrap();
    assert_eq!(bytes[17], u8::MAX);
    let full = FontxFile::parse(&bytes).unwrap();
    assert_eq!(full.blocks.len(), FONTX_MAX_BLOCKS);
    assert!(full.blocks.iter().all(|b| b.start == b.end));
}

#[test]
fn test_contiguous_list_is_one_block_per_row() {
    let lists = Fixture::new();
    let out = Fixture::new();
    // 94 kanji fill row 0x30 exactly; the 95th starts row 0x31.
    let charlist = lists.write("charlist.txt", &scattered_kanji(95, 1));
    let config = config(OutputFormat::Fontx, EncodingAxis::Jis)
        .with_code_set(CodeSet::Custom)
        .with_charlist(charlist);

    generate_into(&config, out.path()).unwrap();
    let full = FontxFile::parse(&fs::read(out.join("stub8_zenkaku.fnt")).unwrap()).unwrap();
    let blocks: Vec<_> = full.blocks.iter().map(|b| (b.start, b.end)).collect();
    assert_eq!(blocks, vec![(0x3021, 0x307E), (0x3121, 0x3121)]);
}
