//! Glyph identity records.
//!
//! A [`CodeEntry`] carries one glyph's three encodings plus the placement
//! metadata filled in by the render and pack stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a table entry draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// A real drawable character.
    Printable(char),
    /// A non-printable single-byte control code. Rendered as a blank cell.
    Placeholder(u8),
}

impl Glyph {
    /// The drawable character, if any.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Glyph::Printable(c) => Some(*c),
            Glyph::Placeholder(_) => None,
        }
    }

    /// Returns true for the blank stand-in of a control code.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Glyph::Placeholder(_))
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Glyph::Printable(c) => write!(f, "{}", c),
            Glyph::Placeholder(code) => write!(f, "\\x{:02x}", code),
        }
    }
}

/// One of the three code axes a table can be keyed and sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingAxis {
    /// UTF-8 byte sequence packed big-endian.
    #[default]
    Utf8,
    /// Shift-JIS.
    Sjis,
    /// 2-byte JIS X 0208 row/cell code.
    Jis,
}

impl EncodingAxis {
    /// All axes in canonical order.
    pub const ALL: [EncodingAxis; 3] = [EncodingAxis::Utf8, EncodingAxis::Sjis, EncodingAxis::Jis];

    /// Returns the config/CLI name of this axis.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingAxis::Utf8 => "utf8",
            EncodingAxis::Sjis => "sjis",
            EncodingAxis::Jis => "jis",
        }
    }

    /// Reads this axis' code out of an entry.
    pub fn key(&self, entry: &CodeEntry) -> u32 {
        match self {
            EncodingAxis::Utf8 => entry.utf8,
            EncodingAxis::Sjis => u32::from(entry.sjis),
            EncodingAxis::Jis => u32::from(entry.jis),
        }
    }
}

impl fmt::Display for EncodingAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(EncodingAxis::Utf8),
            "sjis" | "shift_jis" | "shift-jis" => Ok(EncodingAxis::Sjis),
            "jis" => Ok(EncodingAxis::Jis),
            other => Err(format!(
                "unknown encoding axis '{}' (expected utf8, sjis or jis)",
                other
            )),
        }
    }
}

/// One glyph's identity and placement in the font table.
///
/// Single-byte entries (`utf8 <= 0xFF`) carry the same value on all three
/// axes. Multi-byte entries carry three independently derived codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    /// UTF-8 bytes packed big-endian, or the raw code for single-byte entries.
    pub utf8: u32,
    /// Shift-JIS code.
    pub sjis: u16,
    /// JIS code.
    pub jis: u16,
    /// What gets drawn for this entry.
    pub glyph: Glyph,
    /// Rendered bitmap width in pixels (0 until rendered).
    pub width: u8,
    /// Rendered bitmap height in pixels (0 until rendered).
    pub height: u8,
    /// Byte offset of this glyph's bit-plane in the bitmap blob (0 until packed).
    pub bitmap_offset: u32,
}

impl CodeEntry {
    /// Creates a single-byte entry whose three codes all equal `code`.
    pub fn single_byte(code: u8, glyph: Glyph) -> Self {
        Self {
            utf8: u32::from(code),
            sjis: u16::from(code),
            jis: u16::from(code),
            glyph,
            width: 0,
            height: 0,
            bitmap_offset: 0,
        }
    }

    /// Creates a multi-byte entry from a transcoded triple.
    pub fn multi_byte(utf8: u32, sjis: u16, jis: u16, ch: char) -> Self {
        Self {
            utf8,
            sjis,
            jis,
            glyph: Glyph::Printable(ch),
            width: 0,
            height: 0,
            bitmap_offset: 0,
        }
    }

    /// Returns true when this entry occupies a half-width (single-byte) cell.
    pub fn is_single_byte(&self) -> bool {
        self.utf8 <= 0xFF
    }

    /// Returns this entry's code on the given axis.
    pub fn code(&self, axis: EncodingAxis) -> u32 {
        axis.key(self)
    }

    /// Size in bytes of this entry's packed bit-plane.
    pub fn plane_len(&self) -> usize {
        usize::from(self.width).div_ceil(8) * usize::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_display_is_four_chars() {
        let glyph = Glyph::Placeholder(0x07);
        assert_eq!(glyph.to_string(), "\\x07");
        assert_eq!(glyph.to_string().chars().count(), 4);
        assert!(glyph.as_char().is_none());
    }

    #[test]
    fn test_single_byte_entry_is_degenerate() {
        let entry = CodeEntry::single_byte(0x41, Glyph::Printable('A'));
        assert_eq!((entry.utf8, entry.sjis, entry.jis), (0x41, 0x41, 0x41));
        assert!(entry.is_single_byte());
    }

    #[test]
    fn test_axis_key() {
        let entry = CodeEntry::multi_byte(0xE4BA9C, 0x889F, 0x3021, '亜');
        assert_eq!(EncodingAxis::Utf8.key(&entry), 0xE4BA9C);
        assert_eq!(EncodingAxis::Sjis.key(&entry), 0x889F);
        assert_eq!(EncodingAxis::Jis.key(&entry), 0x3021);
        assert!(!entry.is_single_byte());
    }

    #[test]
    fn test_plane_len_rounds_width_up() {
        let mut entry = CodeEntry::single_byte(0x41, Glyph::Printable('A'));
        entry.width = 6;
        entry.height = 12;
        assert_eq!(entry.plane_len(), 12);
        entry.width = 12;
        assert_eq!(entry.plane_len(), 24);
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("SJIS".parse::<EncodingAxis>().unwrap(), EncodingAxis::Sjis);
        assert_eq!("utf-8".parse::<EncodingAxis>().unwrap(), EncodingAxis::Utf8);
        assert!("euc".parse::<EncodingAxis>().is_err());
    }
}
