//! Per-session cache of glyph whiteness ratios.

use crate::glyph::GlyphRasterizer;
use std::collections::HashMap;

/// Side length of the bitmap glyphs are rendered into.
pub const DEFAULT_GLYPH_SIZE: usize = 16;

/// Maps characters to the fraction of their glyph bitmap that is lit.
///
/// Entries are computed on first request and never evicted; the glyph shapes
/// are assumed fixed for the lifetime of the cache.
#[derive(Debug, Clone)]
pub struct BrightnessCache {
    glyph_size: usize,
    values: HashMap<char, f32>,
    rasterized: usize,
}

impl Default for BrightnessCache {
    fn default() -> Self {
        Self::new(DEFAULT_GLYPH_SIZE)
    }
}

impl BrightnessCache {
    pub fn new(glyph_size: usize) -> Self {
        Self { glyph_size, values: HashMap::new(), rasterized: 0 }
    }

    /// Whiteness ratio of `ch`, rasterizing it on first use.
    pub fn brightness_of(&mut self, ch: char, rasterizer: &impl GlyphRasterizer) -> f32 {
        if let Some(&value) = self.values.get(&ch) {
            return value;
        }
        let value = rasterizer.rasterize(ch, self.glyph_size).coverage();
        log::debug!("rasterized {:?} at {}px: brightness {:.4}", ch, self.glyph_size, value);
        self.rasterized += 1;
        self.values.insert(ch, value);
        value
    }

    /// Cached value without rasterizing.
    pub fn get(&self, ch: char) -> Option<f32> {
        self.values.get(&ch).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of rasterizer calls made so far.
    pub fn rasterized(&self) -> usize {
        self.rasterized
    }

    pub fn glyph_size(&self) -> usize {
        self.glyph_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphBitmap;
    use std::cell::Cell;

    /// Lights `n` cells for a character with code point `n`.
    struct CountingRasterizer {
        calls: Cell<usize>,
    }

    impl GlyphRasterizer for CountingRasterizer {
        fn rasterize(&self, ch: char, size: usize) -> GlyphBitmap {
            self.calls.set(self.calls.get() + 1);
            let lit = ch as usize % (size * size + 1);
            GlyphBitmap::from_fn(size, |x, y| y * size + x < lit)
        }
    }

    #[test]
    fn test_brightness_is_coverage() {
        let rasterizer = CountingRasterizer { calls: Cell::new(0) };
        let mut cache = BrightnessCache::new(4);

        // '@' is 64; 64 % 17 = 13 lit cells of 16
        assert_eq!(cache.brightness_of('@', &rasterizer), 13.0 / 16.0);
        assert_eq!(cache.glyph_size(), 4);
    }

    #[test]
    fn test_rasterizes_each_char_once() {
        let rasterizer = CountingRasterizer { calls: Cell::new(0) };
        let mut cache = BrightnessCache::default();

        let first = cache.brightness_of('x', &rasterizer);
        let second = cache.brightness_of('x', &rasterizer);

        assert_eq!(first, second);
        assert_eq!(rasterizer.calls.get(), 1);
        assert_eq!(cache.rasterized(), 1);

        cache.brightness_of('y', &rasterizer);
        assert_eq!(rasterizer.calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_does_not_rasterize() {
        let rasterizer = CountingRasterizer { calls: Cell::new(0) };
        let mut cache = BrightnessCache::default();

        assert!(cache.is_empty());
        assert_eq!(cache.get('q'), None);
        cache.brightness_of('q', &rasterizer);
        assert!(cache.get('q').is_some());
        assert_eq!(rasterizer.calls.get(), 1);
    }
}
