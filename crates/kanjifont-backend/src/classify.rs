//! Raw code point classification.
//!
//! Codes `0x00..=0xFF` are single-byte cells. With kana remapping on,
//! `0xA1..=0xDF` are JIS X 0201 half-width katakana. Everything above
//! `0xFF` is a 2-byte JIS code handed to the transcoder.

use kanjifont_spec::Glyph;
use std::ops::RangeInclusive;

/// Single-byte codes that remap to half-width katakana.
pub const HALF_KANA_CODES: RangeInclusive<u32> = 0xA1..=0xDF;

/// First code point of the Unicode half-width katakana block (U+FF61).
pub const HALF_KANA_BASE: u32 = 0xFF61;

/// Whether single-byte 0xA1-0xDF means half-width katakana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KanaMode {
    /// Latin-1 interpretation.
    #[default]
    Off,
    /// JIS X 0201 katakana interpretation.
    HalfWidth,
}

impl From<bool> for KanaMode {
    fn from(kana: bool) -> Self {
        if kana {
            KanaMode::HalfWidth
        } else {
            KanaMode::Off
        }
    }
}

/// What a raw code turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Single-byte code with its printable char or a placeholder.
    SingleByte(Glyph),
    /// Single-byte code remapped to a half-width katakana char.
    HalfKana(char),
    /// Two-byte JIS code; needs the transcoder.
    MultiByte,
}

/// Classifies a raw code.
pub fn classify(code: u32, kana: KanaMode) -> Classification {
    let Ok(byte) = u8::try_from(code) else {
        return Classification::MultiByte;
    };

    if kana == KanaMode::HalfWidth && HALF_KANA_CODES.contains(&code) {
        return Classification::HalfKana(remap_half_kana(byte));
    }

    let ch = char::from(byte);
    if is_printable(ch) {
        Classification::SingleByte(Glyph::Printable(ch))
    } else {
        Classification::SingleByte(Glyph::Placeholder(byte))
    }
}

/// Maps a single-byte kana code (0xA1-0xDF) into U+FF61-U+FF9F.
pub fn remap_half_kana(code: u8) -> char {
    let scalar = u32::from(code) - *HALF_KANA_CODES.start() + HALF_KANA_BASE;
    // U+FF61..=U+FF9F are all assigned scalar values.
    char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Reverses [`remap_half_kana`]: U+FF61-U+FF9F back to 0xA1-0xDF.
pub fn half_kana_code(ch: char) -> Option<u8> {
    let scalar = u32::from(ch);
    let last = HALF_KANA_BASE + (*HALF_KANA_CODES.end() - *HALF_KANA_CODES.start());
    if (HALF_KANA_BASE..=last).contains(&scalar) {
        u8::try_from(scalar - HALF_KANA_BASE + *HALF_KANA_CODES.start()).ok()
    } else {
        None
    }
}

/// Latin-1 printability: not a control char, not NBSP, not soft hyphen.
pub fn is_printable(ch: char) -> bool {
    !ch.is_control() && ch != '\u{A0}' && ch != '\u{AD}'
}
