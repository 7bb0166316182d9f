//! The assembled font table.

use kanjifont_spec::{CellSize, CodeEntry, EncodingAxis};

use crate::pack::{BitPlane, PlaneView};

/// Accumulates packed glyphs and assigns bitmap offsets.
///
/// Each builder starts its offset counter at zero; two runs never share one.
#[derive(Debug)]
pub struct FontTableBuilder {
    axis: EncodingAxis,
    cell: CellSize,
    entries: Vec<CodeEntry>,
    bitmap: Vec<u8>,
}

impl FontTableBuilder {
    pub fn new(axis: EncodingAxis, cell: CellSize) -> Self {
        Self {
            axis,
            cell,
            entries: Vec::new(),
            bitmap: Vec::new(),
        }
    }

    /// Current blob length; the offset the next glyph will get.
    pub fn next_offset(&self) -> u32 {
        self.bitmap.len() as u32
    }

    /// Appends a rendered entry and its plane.
    pub fn push(&mut self, mut entry: CodeEntry, plane: BitPlane) {
        entry.bitmap_offset = self.next_offset();
        self.bitmap.extend_from_slice(plane.as_bytes());
        self.entries.push(entry);
    }

    pub fn finish(self) -> FontTable {
        FontTable {
            axis: self.axis,
            cell: self.cell,
            entries: self.entries,
            bitmap: self.bitmap,
        }
    }
}

/// Ordered entries plus one contiguous bitmap blob. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontTable {
    axis: EncodingAxis,
    cell: CellSize,
    entries: Vec<CodeEntry>,
    bitmap: Vec<u8>,
}

impl FontTable {
    /// Axis the entries are sorted by.
    pub fn axis(&self) -> EncodingAxis {
        self.axis
    }

    /// Full-width cell size.
    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The plane of one entry, sliced out of the blob.
    pub fn plane(&self, entry: &CodeEntry) -> PlaneView<'_> {
        let start = (entry.bitmap_offset as usize).min(self.bitmap.len());
        let end = (start + entry.plane_len()).min(self.bitmap.len());
        PlaneView::new(
            &self.bitmap[start..end],
            u32::from(entry.width),
            u32::from(entry.height),
        )
    }

    /// Entries re-ordered by another axis. The table itself is untouched.
    pub fn sorted_by(&self, axis: EncodingAxis) -> Vec<&CodeEntry> {
        let mut sorted: Vec<&CodeEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|entry| axis.key(entry));
        sorted
    }

    /// Whether entries are non-decreasing on `axis`.
    pub fn is_sorted_by(&self, axis: EncodingAxis) -> bool {
        self.entries
            .windows(2)
            .all(|pair| axis.key(&pair[0]) <= axis.key(&pair[1]))
    }

    pub fn half_width_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_single_byte()).count()
    }

    pub fn full_width_count(&self) -> usize {
        self.len() - self.half_width_count()
    }
}
