//! Glyph rasterization.
//!
//! The [`Rasterizer`] trait is the seam to the outline renderer. It draws one
//! character black-on-white into a fixed-size intensity matrix.
//! [`OutlineRasterizer`] implements it with `fontdue`.

use std::path::Path;

use crate::error::PipelineError;

/// Intensity of an untouched background pixel.
pub const PAPER: u8 = 255;

/// Row-major 8-bit intensity matrix. 0 is full ink, 255 is background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelMatrix {
    /// Creates an all-background matrix.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![PAPER; (width as usize) * (height as usize)],
        }
    }

    /// Wraps existing row-major pixels. Returns `None` on a length mismatch.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at (x, y). Out-of-bounds reads return background.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return PAPER;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Sets the pixel at (x, y). Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = value;
        }
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y * self.width) as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Keeps the left `width` columns.
    pub fn crop(&self, width: u32) -> Self {
        let width = width.min(self.width);
        let mut pixels = Vec::with_capacity((width as usize) * (self.height as usize));
        for y in 0..self.height {
            pixels.extend_from_slice(&self.row(y)[..width as usize]);
        }
        Self {
            width,
            height: self.height,
            pixels,
        }
    }
}

/// Parameters for drawing one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    /// Unicode scalar of `ch`.
    pub codepoint: u32,
    pub ch: char,
    /// Canvas width.
    pub width: u32,
    /// Canvas height; also the em size.
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl RenderRequest {
    pub fn new(ch: char, width: u32, height: u32, x_offset: i32, y_offset: i32) -> Self {
        Self {
            codepoint: u32::from(ch),
            ch,
            width,
            height,
            x_offset,
            y_offset,
        }
    }
}

/// Draws characters into intensity matrices.
///
/// Implementations must be pure: the same request always yields the same
/// matrix, sized exactly `width × height`.
pub trait Rasterizer {
    fn render(&self, request: &RenderRequest) -> PixelMatrix;
}

/// `fontdue` outline font renderer.
pub struct OutlineRasterizer {
    font: fontdue::Font,
    px: f32,
    ascent: f32,
}

impl OutlineRasterizer {
    /// Loads a TrueType/OpenType font for rendering at `px` pixels per em.
    pub fn open(path: &Path, px: f32) -> Result<Self, PipelineError> {
        let bytes = std::fs::read(path).map_err(|e| {
            PipelineError::FontResource(format!("cannot read font {}: {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes, px)
            .map_err(|e| PipelineError::FontResource(format!("{}: {}", path.display(), e)))
    }

    /// Parses font data already in memory.
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self, PipelineError> {
        if !(px.is_finite() && px > 0.0) {
            return Err(PipelineError::FontResource(format!(
                "invalid pixel size {}",
                px
            )));
        }
        let settings = fontdue::FontSettings {
            scale: px,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings)
            .map_err(|e| PipelineError::FontResource(e.to_string()))?;
        let ascent = font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px);
        Ok(Self { font, px, ascent })
    }

    /// Pixel size this rasterizer was opened at.
    pub fn px(&self) -> f32 {
        self.px
    }

    /// Returns whether the font has an outline for `ch`.
    pub fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }
}

impl Rasterizer for OutlineRasterizer {
    fn render(&self, request: &RenderRequest) -> PixelMatrix {
        let mut canvas = PixelMatrix::blank(request.width, request.height);
        let (metrics, coverage) = self.font.rasterize(request.ch, request.height as f32);
        if metrics.width == 0 || metrics.height == 0 {
            return canvas;
        }

        let baseline = request.y_offset + self.ascent.round() as i32;
        let top = baseline - metrics.ymin - metrics.height as i32;
        let left = request.x_offset + metrics.xmin;

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let x = left + gx as i32;
                let y = top + gy as i32;
                if x < 0 || y < 0 {
                    continue;
                }
                let ink = coverage[gy * metrics.width + gx];
                canvas.set(x as u32, y as u32, PAPER - ink);
            }
        }
        canvas
    }
}
