//! Byte-identical output across runs, for every format.

use kanjifont_backend::{pipeline, GeneratedFont, JisTranscoder};
use kanjifont_spec::{CodeSet, EncodingAxis, OutputFormat, PipelineConfig, Terminator};
use kanjifont_tests::{config, generate_into, verify_determinism, Fixture, StubRasterizer};

/// All artifact bytes of one in-memory run, concatenated in emit order.
fn emitted_bytes(config: &PipelineConfig) -> Vec<u8> {
    let output = pipeline::run(config, &StubRasterizer, &JisTranscoder).unwrap();
    output
        .artifacts
        .iter()
        .flat_map(|a| a.file_name.bytes().chain(a.bytes.iter().copied()))
        .collect()
}

#[test]
fn test_every_format_is_deterministic() {
    let configs = [
        config(OutputFormat::Cdata, EncodingAxis::Utf8).with_terminator(Terminator::Zero),
        config(OutputFormat::Binary, EncodingAxis::Jis).with_terminator(Terminator::Max),
        config(OutputFormat::Python, EncodingAxis::Sjis),
        config(OutputFormat::Fontx, EncodingAxis::Sjis),
        config(OutputFormat::Bdf, EncodingAxis::Utf8).with_split(true),
    ];
    for config in &configs {
        let result = verify_determinism(|| emitted_bytes(config), 3);
        result.assert_deterministic();
        assert!(result.output_size > 0, "{} produced no output", config.format);
    }
}

#[test]
fn test_level1_fontx_hashes_match_across_directories() {
    let config = config(OutputFormat::Fontx, EncodingAxis::Jis)
        .with_code_set(CodeSet::Level1)
        .with_cell(12, 12);

    let first = Fixture::new();
    let second = Fixture::new();
    let a = generate_into(&config, first.path()).unwrap();
    let b = generate_into(&config, second.path()).unwrap();

    let hashes = |font: &GeneratedFont| -> Vec<String> {
        font.artifacts.iter().map(|r| r.hash.clone()).collect()
    };
    assert_eq!(hashes(&a), hashes(&b));
    assert_eq!(a.table.bitmap(), b.table.bitmap());
}
