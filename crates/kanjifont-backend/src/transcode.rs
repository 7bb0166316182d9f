//! JIS to Shift-JIS/UTF-8 transcoding.
//!
//! The [`Transcoder`] trait is the seam between the table builder and the
//! legacy encoding tables. [`JisTranscoder`] backs it with `encoding_rs`:
//! a 2-byte JIS code is decoded as an ISO-2022-JP `ESC $ B` sequence and
//! the resulting character is encoded as UTF-8. The Shift-JIS code is the
//! row/cell transform of the JIS code, and a code only counts as assigned
//! when its character encodes back to that same Shift-JIS code. Duplicate
//! characters outside the primary table position (the NEC row 13 math
//! symbols, NEC-selected IBM extensions) are therefore unassigned.

use encoding_rs::{ISO_2022_JP, SHIFT_JIS};
use thiserror::Error;

/// The JIS X 0208 designation escape, `ESC $ B`.
const JIS0208_ESCAPE: [u8; 3] = [0x1B, b'$', b'B'];

/// Shift-JIS and packed UTF-8 for one JIS code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoded {
    pub sjis: u16,
    /// UTF-8 bytes packed big-endian (e.g. 0x00E4BA9C for U+4E9C).
    pub utf8: u32,
}

/// The code has no character assigned. A normal skip, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("JIS code 0x{0:04X} is unassigned")]
pub struct Unassigned(pub u16);

/// Legacy encoding lookups.
pub trait Transcoder {
    /// Maps a 2-byte JIS code to its Shift-JIS code and packed UTF-8 value.
    fn transcode(&self, jis: u16) -> Result<Transcoded, Unassigned>;

    /// Maps a character back to its 2-byte JIS code, if it has one.
    fn jis_code(&self, ch: char) -> Option<u16>;
}

/// `encoding_rs` backed transcoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JisTranscoder;

impl Transcoder for JisTranscoder {
    fn transcode(&self, jis: u16) -> Result<Transcoded, Unassigned> {
        let [hi, lo] = jis.to_be_bytes();
        let sequence = [JIS0208_ESCAPE[0], JIS0208_ESCAPE[1], JIS0208_ESCAPE[2], hi, lo];

        let (text, had_errors) = ISO_2022_JP.decode_without_bom_handling(&sequence);
        if had_errors {
            return Err(Unassigned(jis));
        }
        let mut chars = text.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) if ch != char::REPLACEMENT_CHARACTER => ch,
            _ => return Err(Unassigned(jis)),
        };

        let sjis = jis_to_sjis(jis);
        let mut buf = [0u8; 4];
        let (sjis_bytes, _, had_errors) = SHIFT_JIS.encode(ch.encode_utf8(&mut buf));
        match (had_errors, sjis_bytes.as_ref()) {
            (false, &[b0, b1]) if u16::from_be_bytes([b0, b1]) == sjis => {}
            _ => return Err(Unassigned(jis)),
        }

        let utf8 = pack_utf8(ch);
        if sjis == 0 || utf8 == 0 {
            return Err(Unassigned(jis));
        }
        Ok(Transcoded { sjis, utf8 })
    }

    fn jis_code(&self, ch: char) -> Option<u16> {
        let mut buf = [0u8; 4];
        let (bytes, _, had_errors) = ISO_2022_JP.encode(ch.encode_utf8(&mut buf));
        if had_errors {
            return None;
        }
        // Expect exactly: ESC $ B hi lo ESC ( B
        let jis = match bytes.as_ref() {
            [0x1B, b'$', b'B', hi, lo, 0x1B, b'(', b'B'] => u16::from_be_bytes([*hi, *lo]),
            _ => return None,
        };
        // The encoder folds half-width katakana into full-width ones.
        match self.transcode(jis) {
            Ok(t) if t.utf8 == pack_utf8(ch) => Some(jis),
            _ => None,
        }
    }
}

/// Shift-JIS code of a 2-byte JIS X 0208 code (row and cell in
/// `0x21..=0x7E`). Other inputs give a meaningless value.
pub fn jis_to_sjis(jis: u16) -> u16 {
    let [hi, lo] = jis.to_be_bytes();
    let lead = (hi.wrapping_add(1) >> 1).wrapping_add(if hi <= 0x5E { 0x70 } else { 0xB0 });
    let trail = if hi & 1 == 1 {
        lo.wrapping_add(if lo >= 0x60 { 0x20 } else { 0x1F })
    } else {
        lo.wrapping_add(0x7E)
    };
    u16::from_be_bytes([lead, trail])
}

/// Packs a character's UTF-8 bytes big-endian into a `u32`.
pub fn pack_utf8(ch: char) -> u32 {
    let mut buf = [0u8; 4];
    ch.encode_utf8(&mut buf)
        .bytes()
        .fold(0u32, |acc, b| (acc << 8) | u32::from(b))
}

/// Reverses [`pack_utf8`]. Returns `None` unless the value is exactly one
/// well-formed UTF-8 character.
pub fn unpack_utf8(value: u32) -> Option<char> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0)?;
    let text = std::str::from_utf8(&bytes[start..]).ok()?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
