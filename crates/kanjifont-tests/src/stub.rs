//! Deterministic rasterizers for tests.

use kanjifont_backend::{PixelMatrix, Rasterizer, RenderRequest};

/// Inks a diagonal hatch whose phase depends on the codepoint, so
/// neighbouring glyphs get different planes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubRasterizer;

impl StubRasterizer {
    /// Whether the stub inks (x, y) for `codepoint`.
    pub fn inks(codepoint: u32, x: u32, y: u32) -> bool {
        (codepoint + x + 2 * y) % 3 == 0
    }
}

impl Rasterizer for StubRasterizer {
    fn render(&self, request: &RenderRequest) -> PixelMatrix {
        let mut matrix = PixelMatrix::blank(request.width, request.height);
        for y in 0..request.height {
            for x in 0..request.width {
                if Self::inks(request.codepoint, x, y) {
                    matrix.set(x, y, 0);
                }
            }
        }
        matrix
    }
}

/// Inks every pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidRasterizer;

impl Rasterizer for SolidRasterizer {
    fn render(&self, request: &RenderRequest) -> PixelMatrix {
        let pixels = vec![0; (request.width * request.height) as usize];
        PixelMatrix::from_pixels(request.width, request.height, pixels)
            .unwrap_or_else(|| PixelMatrix::blank(request.width, request.height))
    }
}
