//! Brightness matching: picks, per tile, the glyph whose ink coverage best
//! matches the tile's luminance.

use crate::cache::BrightnessCache;
use crate::glyph::GlyphRasterizer;
use crate::raster::{Image, PaddedImage};
use crate::{LumiglyphError, Result};
use image::Rgb;
use rayon::prelude::*;
use std::fmt;

pub const RED_WEIGHT: f32 = 0.2126;
pub const GREEN_WEIGHT: f32 = 0.7152;
pub const BLUE_WEIGHT: f32 = 0.0722;
const MAX_CHANNEL: f64 = 255.0;

/// Rendered characters, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGrid {
    columns: usize,
    rows: usize,
    cells: Vec<char>,
}

impl CharGrid {
    pub fn new(columns: usize, rows: usize, cells: Vec<char>) -> Self {
        assert_eq!(columns * rows, cells.len());
        Self { columns, rows, cells }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, row: usize, column: usize) -> Option<char> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(self.cells[row * self.columns + column])
    }

    /// Each row as a string.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.columns.max(1)).map(|row| row.iter().collect())
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}

/// Perceptual grey value of a color, in channel units (0-255).
pub fn grey_value(color: Rgb<u8>) -> f32 {
    let [r, g, b] = color.0;
    r as f32 * RED_WEIGHT + g as f32 * GREEN_WEIGHT + b as f32 * BLUE_WEIGHT
}

/// Mean grey value of an image scaled to [0, 1]. An empty image is 0.
pub fn luminance<I: Image + ?Sized>(image: &I) -> f32 {
    let count = image.width() as f64 * image.height() as f64;
    if count == 0.0 {
        return 0.0;
    }
    let sum: f64 = image.pixels().map(|color| grey_value(color) as f64).sum();
    (sum / count / MAX_CHANNEL) as f32
}

/// Converts one image into character grids using cached glyph brightness.
///
/// The active brightness map is ordered by code point, so among equally near
/// characters the lowest code point wins.
pub struct BrightnessMatcher<R> {
    image: PaddedImage,
    rasterizer: R,
    cache: BrightnessCache,
    active: Vec<(char, f32)>,
}

impl<R: GlyphRasterizer> BrightnessMatcher<R> {
    pub fn new(image: PaddedImage, rasterizer: R) -> Self {
        Self::with_cache(image, rasterizer, BrightnessCache::default())
    }

    pub fn with_cache(image: PaddedImage, rasterizer: R, cache: BrightnessCache) -> Self {
        Self { image, rasterizer, cache, active: Vec::new() }
    }

    pub fn image(&self) -> &PaddedImage {
        &self.image
    }

    pub fn cache(&self) -> &BrightnessCache {
        &self.cache
    }

    /// Active characters with their normalized brightness, by code point.
    pub fn active(&self) -> &[(char, f32)] {
        &self.active
    }

    /// Replace the active set and rescale its brightness to [0, 1].
    ///
    /// The darkest active glyph maps to 0 and the brightest to 1. When every
    /// active glyph has the same brightness they all map to 0.
    pub fn set_charset(&mut self, chars: impl IntoIterator<Item = char>) {
        let mut raw: Vec<(char, f32)> = chars
            .into_iter()
            .map(|ch| (ch, self.cache.brightness_of(ch, &self.rasterizer)))
            .collect();
        raw.sort_by_key(|&(ch, _)| ch);
        raw.dedup_by_key(|(ch, _)| *ch);

        self.active = normalize(raw);
        log::debug!("active charset rebuilt with {} characters", self.active.len());
    }

    /// Render with `chars`, or with the previous active set when `chars` is empty.
    pub fn render(&mut self, columns: u32, chars: &[char]) -> Result<CharGrid> {
        if !chars.is_empty() {
            self.set_charset(chars.iter().copied());
        }
        self.render_active(columns)
    }

    /// Render with the current active set. Fails when no set is active or
    /// `columns` does not evenly tile the image.
    pub fn render_active(&self, columns: u32) -> Result<CharGrid> {
        let Some((&first, rest)) = self.active.split_first() else {
            return Err(LumiglyphError::EmptyCharset);
        };
        let tile_size = self.tile_size(columns)?;
        let rows = self.image.height() / tile_size;

        let tiles: Vec<_> = self.image.tiles(tile_size)?.collect();
        let cells: Vec<char> = tiles
            .par_iter()
            .map(|tile| nearest(first, rest, luminance(tile)))
            .collect();

        log::info!(
            "rendered {}x{} image as {} columns x {} rows ({}px tiles)",
            self.image.width(),
            self.image.height(),
            columns,
            rows,
            tile_size
        );
        Ok(CharGrid::new(columns as usize, rows as usize, cells))
    }

    /// Side length of the tiles that `columns` characters per row imply.
    pub fn tile_size(&self, columns: u32) -> Result<u32> {
        let (width, height) = (self.image.width(), self.image.height());
        let invalid = LumiglyphError::InvalidColumns { columns, width, height };
        if columns == 0 || columns > width || width % columns != 0 {
            return Err(invalid);
        }
        let size = width / columns;
        if height % size != 0 {
            return Err(invalid);
        }
        Ok(size)
    }
}

fn normalize(raw: Vec<(char, f32)>) -> Vec<(char, f32)> {
    let min = raw.iter().map(|&(_, v)| v).fold(f32::INFINITY, f32::min);
    let max = raw.iter().map(|&(_, v)| v).fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;

    raw.into_iter()
        .map(|(ch, v)| {
            let scaled = if range > 0.0 { (v - min) / range } else { 0.0 };
            (ch, scaled)
        })
        .collect()
}

/// First character in `first, rest` order with the smallest distance to `target`.
fn nearest(first: (char, f32), rest: &[(char, f32)], target: f32) -> char {
    let (mut best, mut best_distance) = (first.0, (first.1 - target).abs());
    for &(ch, value) in rest {
        let distance = (value - target).abs();
        if distance < best_distance {
            best = ch;
            best_distance = distance;
        }
    }
    best
}
