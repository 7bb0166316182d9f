//! 1-bit glyph packing.
//!
//! A bit-plane is `ceil(width / 8) * height` bytes, row-major, MSB-first,
//! each row zero-padded on the right to a byte boundary.

use crate::raster::PixelMatrix;

/// Pixels darker than this are ink.
pub const INK_THRESHOLD: u8 = 128;

/// An owned packed glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPlane {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl BitPlane {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn view(&self) -> PlaneView<'_> {
        PlaneView::new(&self.bytes, self.width, self.height)
    }
}

/// Bytes per packed row.
pub fn row_bytes(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

/// Thresholds and packs a pixel matrix.
pub fn pack(pixels: &PixelMatrix) -> BitPlane {
    let stride = row_bytes(pixels.width());
    let mut bytes = vec![0u8; stride * pixels.height() as usize];
    for y in 0..pixels.height() {
        let row = &mut bytes[y as usize * stride..(y as usize + 1) * stride];
        for (x, &value) in pixels.row(y).iter().enumerate() {
            if value < INK_THRESHOLD {
                row[x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    BitPlane {
        width: pixels.width(),
        height: pixels.height(),
        bytes,
    }
}

/// A borrowed bit-plane, usually a slice of a font table's bitmap blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneView<'a> {
    bytes: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PlaneView<'a> {
    pub fn new(bytes: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Packed rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let stride = row_bytes(self.width).max(1);
        self.bytes.chunks(stride).take(self.height as usize)
    }

    /// Whether the pixel at (x, y) is ink.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * row_bytes(self.width) + x as usize / 8;
        self.bytes
            .get(index)
            .is_some_and(|b| b & (0x80 >> (x % 8)) != 0)
    }

    /// Row `y` rendered as `ink`/`paper` characters.
    pub fn row_string(&self, y: u32, ink: char, paper: char) -> String {
        (0..self.width)
            .map(|x| if self.is_set(x, y) { ink } else { paper })
            .collect()
    }
}
