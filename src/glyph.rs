//! Glyph rasterization into fixed-size monochrome bitmaps.

use crate::{LumiglyphError, Result};
use fontdue::{Font, FontSettings};
use std::path::Path;

/// Minimum fontdue coverage (0-255) for a bitmap cell to count as lit.
const COVERAGE_THRESHOLD: u8 = 128;

/// A square boolean grid; `true` marks cells covered by the glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    size: usize,
    cells: Vec<bool>,
}

impl GlyphBitmap {
    /// An empty `size`x`size` bitmap.
    pub fn new(size: usize) -> Self {
        Self { size, cells: vec![false; size * size] }
    }

    pub fn from_fn(size: usize, mut lit: impl FnMut(usize, usize) -> bool) -> Self {
        let mut bitmap = Self::new(size);
        for y in 0..size {
            for x in 0..size {
                bitmap.cells[y * size + x] = lit(x, y);
            }
        }
        bitmap
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.cells[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize, lit: bool) {
        if x < self.size && y < self.size {
            self.cells[y * self.size + x] = lit;
        }
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&lit| lit).count()
    }

    /// Fraction of lit cells, in [0, 1]. An empty bitmap has coverage 0.
    pub fn coverage(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.lit_count() as f32 / self.cells.len() as f32
    }
}

/// Renders a character into a square bitmap of the requested size.
pub trait GlyphRasterizer {
    fn rasterize(&self, ch: char, size: usize) -> GlyphBitmap;
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for &R {
    fn rasterize(&self, ch: char, size: usize) -> GlyphBitmap {
        (**self).rasterize(ch, size)
    }
}

/// Rasterizer backed by an outline font loaded with fontdue.
pub struct FontRasterizer {
    font: Font,
}

impl FontRasterizer {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|source| LumiglyphError::FontFile { path: path.to_path_buf(), source })?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| LumiglyphError::Font(e.to_string()))?;
        Ok(Self { font })
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, ch: char, size: usize) -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::new(size);
        let font_size = size as f32 * 0.875; // leave room below the baseline

        let (metrics, coverage) = self.font.rasterize(ch, font_size);
        if metrics.width == 0 || metrics.height == 0 {
            return bitmap;
        }

        // Baseline at 75% down, glyph centered horizontally
        let side = size as i32;
        let baseline_y = (size as f32 * 0.75) as i32;
        let y_offset = baseline_y - metrics.height as i32 - metrics.ymin;
        let x_offset = (side - metrics.width as i32) / 2;

        for sy in 0..metrics.height {
            for sx in 0..metrics.width {
                let tx = x_offset + sx as i32;
                let ty = y_offset + sy as i32;
                if tx >= 0 && tx < side && ty >= 0 && ty < side {
                    let lit = coverage[sy * metrics.width + sx] >= COVERAGE_THRESHOLD;
                    bitmap.set(tx as usize, ty as usize, lit);
                }
            }
        }

        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bitmap_has_zero_coverage() {
        assert_eq!(GlyphBitmap::new(16).coverage(), 0.0);
        assert_eq!(GlyphBitmap::new(0).coverage(), 0.0);
    }

    #[test]
    fn test_coverage_is_lit_fraction() {
        // Top half lit
        let bitmap = GlyphBitmap::from_fn(4, |_, y| y < 2);
        assert_eq!(bitmap.lit_count(), 8);
        assert_eq!(bitmap.coverage(), 0.5);
    }

    #[test]
    fn test_set_and_get_ignore_out_of_range() {
        let mut bitmap = GlyphBitmap::new(2);
        bitmap.set(1, 0, true);
        bitmap.set(5, 5, true);

        assert!(bitmap.get(1, 0));
        assert!(!bitmap.get(0, 1));
        assert!(!bitmap.get(5, 5));
        assert_eq!(bitmap.lit_count(), 1);
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = FontRasterizer::from_bytes(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(LumiglyphError::Font(_))));
    }

    #[test]
    fn test_missing_font_file() {
        let result = FontRasterizer::from_file("/nonexistent/font.ttf");
        let err = match result {
            Err(err @ LumiglyphError::FontFile { .. }) => err,
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("missing font file loaded"),
        };

        let message = err.to_string();
        assert!(message.contains("/nonexistent/font.ttf"), "{message}");
        assert!(message.contains("--font"), "{message}");
    }
}
