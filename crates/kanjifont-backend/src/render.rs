//! Glyph render stage.

use kanjifont_spec::{CellSize, CodeEntry, Glyph, RenderOffset};

use crate::raster::{PixelMatrix, Rasterizer, RenderRequest};

/// Renders entries at full or half width and records their dimensions.
pub struct GlyphRenderStage<'a, R: Rasterizer + ?Sized> {
    rasterizer: &'a R,
    cell: CellSize,
    offset: RenderOffset,
}

impl<'a, R: Rasterizer + ?Sized> GlyphRenderStage<'a, R> {
    pub fn new(rasterizer: &'a R, cell: CellSize, offset: RenderOffset) -> Self {
        Self {
            rasterizer,
            cell,
            offset,
        }
    }

    /// Renders one entry and sets its `width` and `height`.
    ///
    /// Placeholders are never sent to the rasterizer; they become a blank
    /// half-width cell. Other single-byte entries (including remapped kana)
    /// are drawn in a full cell and cropped to the left half.
    pub fn render(&self, entry: &mut CodeEntry) -> PixelMatrix {
        let half = self.cell.half_width();
        let matrix = match entry.glyph {
            Glyph::Placeholder(_) => PixelMatrix::blank(half, self.cell.height),
            Glyph::Printable(ch) => {
                let full = self.rasterizer.render(&RenderRequest::new(
                    ch,
                    self.cell.width,
                    self.cell.height,
                    self.offset.x,
                    self.offset.y,
                ));
                if entry.is_single_byte() {
                    full.crop(half)
                } else {
                    full
                }
            }
        };
        // Cell edges are validated to fit a byte before any rendering.
        entry.width = u8::try_from(matrix.width()).unwrap_or(u8::MAX);
        entry.height = u8::try_from(matrix.height()).unwrap_or(u8::MAX);
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Inks every pixel and records what it was asked to draw.
    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<char>>,
    }

    impl Rasterizer for Recorder {
        fn render(&self, request: &RenderRequest) -> PixelMatrix {
            self.seen.borrow_mut().push(request.ch);
            PixelMatrix::from_pixels(
                request.width,
                request.height,
                vec![0; (request.width * request.height) as usize],
            )
            .unwrap()
        }
    }

    fn stage(r: &Recorder) -> GlyphRenderStage<'_, Recorder> {
        GlyphRenderStage::new(r, CellSize::default(), RenderOffset::default())
    }

    #[test]
    fn test_placeholder_is_blank_half_cell() {
        let r = Recorder::default();
        let mut entry = CodeEntry::single_byte(0x00, Glyph::Placeholder(0x00));
        let m = stage(&r).render(&mut entry);
        assert_eq!((entry.width, entry.height), (6, 12));
        assert!(m.pixels().iter().all(|&p| p == 255));
        assert!(r.seen.borrow().is_empty());
    }

    #[test]
    fn test_single_byte_is_cropped() {
        let r = Recorder::default();
        let mut entry = CodeEntry::single_byte(0x41, Glyph::Printable('A'));
        let m = stage(&r).render(&mut entry);
        assert_eq!(m.width(), 6);
        assert_eq!((entry.width, entry.height), (6, 12));
        assert_eq!(*r.seen.borrow(), vec!['A']);
    }

    #[test]
    fn test_kana_is_cropped() {
        let r = Recorder::default();
        let mut entry = CodeEntry::single_byte(0xB1, Glyph::Printable('ｱ'));
        stage(&r).render(&mut entry);
        assert_eq!(entry.width, 6);
        assert_eq!(*r.seen.borrow(), vec!['ｱ']);
    }

    #[test]
    fn test_multi_byte_is_full_cell() {
        let r = Recorder::default();
        let mut entry = CodeEntry::multi_byte(0xE4BA9C, 0x889F, 0x3021, '亜');
        let m = GlyphRenderStage::new(&r, CellSize { width: 16, height: 14 }, RenderOffset::default())
            .render(&mut entry);
        assert_eq!((m.width(), m.height()), (16, 14));
        assert_eq!((entry.width, entry.height), (16, 14));
    }
}
