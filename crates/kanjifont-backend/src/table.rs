//! Code table construction.

use std::ops::RangeInclusive;

use kanjifont_spec::{CodeEntry, EncodingAxis, Glyph, PipelineConfig};

use crate::charset::{self, AllowList};
use crate::classify::{classify, half_kana_code, Classification, KanaMode, HALF_KANA_CODES};
use crate::error::PipelineError;
use crate::transcode::{unpack_utf8, Transcoder};

/// Walks code ranges and produces unsorted [`CodeEntry`] records.
pub struct CodeTableBuilder<'a, T: Transcoder + ?Sized> {
    transcoder: &'a T,
    kana: KanaMode,
}

impl<'a, T: Transcoder + ?Sized> CodeTableBuilder<'a, T> {
    pub fn new(transcoder: &'a T, kana: KanaMode) -> Self {
        Self { transcoder, kana }
    }

    /// Builds one entry per assigned code, in range order.
    ///
    /// Unassigned JIS codes are skipped. A transcoded value that does not
    /// unpack to one character aborts with [`PipelineError::Decode`].
    pub fn build(&self, ranges: &[RangeInclusive<u32>]) -> Result<Vec<CodeEntry>, PipelineError> {
        let mut entries = Vec::new();
        for range in ranges {
            for code in range.clone() {
                if let Some(entry) = self.entry_for(code)? {
                    entries.push(entry);
                }
            }
        }
        Ok(entries)
    }

    /// Builds the entry for one raw code, or `None` when it is unassigned.
    pub fn entry_for(&self, code: u32) -> Result<Option<CodeEntry>, PipelineError> {
        match classify(code, self.kana) {
            Classification::SingleByte(glyph) => {
                Ok(Some(CodeEntry::single_byte(code as u8, glyph)))
            }
            Classification::HalfKana(ch) => {
                Ok(Some(CodeEntry::single_byte(code as u8, Glyph::Printable(ch))))
            }
            Classification::MultiByte => {
                let Ok(jis) = u16::try_from(code) else {
                    return Ok(None);
                };
                let Ok(t) = self.transcoder.transcode(jis) else {
                    return Ok(None);
                };
                let ch = unpack_utf8(t.utf8).ok_or(PipelineError::Decode { jis, utf8: t.utf8 })?;
                Ok(Some(CodeEntry::multi_byte(t.utf8, t.sjis, jis, ch)))
            }
        }
    }

    /// Builds entries for the characters of `text`, in text order.
    ///
    /// Characters in the single-byte block map to themselves, except that
    /// with kana remapping on, half-width katakana take the 0xA1-0xDF cells
    /// and the Latin-1 characters those cells displace go through the
    /// reverse JIS lookup like everything else. Characters with no code are
    /// returned in the second vector.
    pub fn entries_for_text(
        &self,
        text: &str,
    ) -> Result<(Vec<CodeEntry>, Vec<char>), PipelineError> {
        let mut entries = Vec::new();
        let mut missing = Vec::new();
        for ch in text.chars().filter(|c| !c.is_whitespace()) {
            match self.code_for_char(ch) {
                Some(code) => match self.entry_for(code)? {
                    Some(entry) => entries.push(entry),
                    None => missing.push(ch),
                },
                None => missing.push(ch),
            }
        }
        Ok((entries, missing))
    }

    fn code_for_char(&self, ch: char) -> Option<u32> {
        let kana = self.kana == KanaMode::HalfWidth;
        if let Some(byte) = half_kana_code(ch) {
            return kana.then_some(u32::from(byte));
        }
        match u8::try_from(u32::from(ch)) {
            Ok(byte) if !(kana && HALF_KANA_CODES.contains(&u32::from(byte))) => {
                Some(u32::from(byte))
            }
            _ => self.transcoder.jis_code(ch).map(u32::from),
        }
    }
}

/// Stable ascending sort on one axis.
pub fn sort_entries(entries: &mut [CodeEntry], axis: EncodingAxis) {
    entries.sort_by_key(|entry| axis.key(entry));
}

/// Builds, filters and sorts the code table for a config.
pub fn build_code_table<T: Transcoder + ?Sized>(
    config: &PipelineConfig,
    transcoder: &T,
) -> Result<Vec<CodeEntry>, PipelineError> {
    let allow_list = AllowList::for_config(config)?;
    let builder = CodeTableBuilder::new(transcoder, KanaMode::from(config.kana));
    let mut entries = builder.build(&charset::ranges(config.code_set))?;
    if let Some(list) = allow_list {
        entries = list.retain(entries);
    }
    sort_entries(&mut entries, config.sort_axis());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::{JisTranscoder, Transcoded, Unassigned};
    use kanjifont_spec::CodeSet;

    struct BrokenTranscoder;

    impl Transcoder for BrokenTranscoder {
        fn transcode(&self, _jis: u16) -> Result<Transcoded, Unassigned> {
            Ok(Transcoded {
                sjis: 0x889F,
                utf8: 0xFF_FF,
            })
        }

        fn jis_code(&self, _ch: char) -> Option<u16> {
            None
        }
    }

    #[test]
    fn test_single_byte_codes_are_degenerate() {
        let builder = CodeTableBuilder::new(&JisTranscoder, KanaMode::Off);
        let entries = builder.build(&[0x00..=0xFF]).unwrap();
        assert_eq!(entries.len(), 256);
        for (code, entry) in entries.iter().enumerate() {
            let code = code as u32;
            assert_eq!(
                (entry.utf8, u32::from(entry.sjis), u32::from(entry.jis)),
                (code, code, code)
            );
        }
        assert_eq!(entries[0].glyph, Glyph::Placeholder(0));
    }

    #[test]
    fn test_kana_mode_keeps_codes() {
        let builder = CodeTableBuilder::new(&JisTranscoder, KanaMode::HalfWidth);
        let entry = builder.entry_for(0xB1).unwrap().unwrap();
        assert_eq!(entry.utf8, 0xB1);
        assert_eq!(entry.glyph, Glyph::Printable('ｱ'));
    }

    #[test]
    fn test_unassigned_codes_are_skipped() {
        let builder = CodeTableBuilder::new(&JisTranscoder, KanaMode::Off);
        let entries = builder.build(&[0x3020..=0x3022]).unwrap();
        let jis: Vec<_> = entries.iter().map(|e| e.jis).collect();
        assert_eq!(jis, vec![0x3021, 0x3022]);
        assert_eq!(entries[0].sjis, 0x889F);
        assert_eq!(entries[0].glyph, Glyph::Printable('亜'));
    }

    #[test]
    fn test_bad_utf8_is_fatal() {
        let builder = CodeTableBuilder::new(&BrokenTranscoder, KanaMode::Off);
        let err = builder.build(&[0x3021..=0x3021]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Decode {
                jis: 0x3021,
                utf8: 0xFFFF
            }
        ));
    }

    #[test]
    fn test_entries_for_text() {
        let builder = CodeTableBuilder::new(&JisTranscoder, KanaMode::Off);
        let (entries, missing) = builder.entries_for_text("A亜 😀").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].jis, 0x3021);
        assert_eq!(missing, vec!['😀']);
    }

    #[test]
    fn test_entries_for_text_kana() {
        let kana = CodeTableBuilder::new(&JisTranscoder, KanaMode::HalfWidth);
        let (entries, missing) = kana.entries_for_text("ｱ±§½").unwrap();
        assert_eq!(missing, vec!['½']);
        let glyphs: Vec<_> = entries.iter().map(|e| (e.jis, e.glyph)).collect();
        assert_eq!(
            glyphs,
            vec![
                (0xB1, Glyph::Printable('ｱ')),
                (0x215E, Glyph::Printable('±')),
                (0x2178, Glyph::Printable('§')),
            ]
        );

        let latin = CodeTableBuilder::new(&JisTranscoder, KanaMode::Off);
        let (entries, missing) = latin.entries_for_text("ｱ±").unwrap();
        assert_eq!(missing, vec!['ｱ']);
        assert_eq!(entries[0].jis, 0xB1);
        assert_eq!(entries[0].glyph, Glyph::Printable('±'));
    }

    #[test]
    fn test_build_code_table_sorts_by_axis() {
        let config = PipelineConfig::new("a.ttf")
            .with_code_set(CodeSet::Level1)
            .with_sort_by(EncodingAxis::Utf8);
        let entries = build_code_table(&config, &JisTranscoder).unwrap();
        assert!(entries.windows(2).all(|w| w[0].utf8 <= w[1].utf8));

        let config = config.with_sort_by(EncodingAxis::Sjis);
        let entries = build_code_table(&config, &JisTranscoder).unwrap();
        assert!(entries.windows(2).all(|w| w[0].sjis <= w[1].sjis));
    }

    #[test]
    fn test_minimal_set() {
        let config = PipelineConfig::new("a.ttf").with_code_set(CodeSet::Minimal);
        let entries = build_code_table(&config, &JisTranscoder).unwrap();
        assert_eq!(entries.len(), 95 + 2);
    }
}
