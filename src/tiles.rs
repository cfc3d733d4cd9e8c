//! Raster-order traversal of pixels and equal-size square tiles.

use crate::raster::{Image, SubImage};
use crate::{LumiglyphError, Result};
use image::Rgb;

/// Pixels of an image, row by row.
#[derive(Debug)]
pub struct Pixels<'a, I: Image + ?Sized> {
    image: &'a I,
    x: u32,
    y: u32,
}

impl<'a, I: Image + ?Sized> Pixels<'a, I> {
    pub(crate) fn new(image: &'a I) -> Self {
        Self { image, x: 0, y: 0 }
    }
}

impl<I: Image + ?Sized> Iterator for Pixels<'_, I> {
    type Item = Rgb<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() || self.image.width() == 0 {
            return None;
        }
        let color = self.image.pixel(self.x, self.y);
        self.x += 1;
        if self.x >= self.image.width() {
            self.x = 0;
            self.y += 1;
        }
        Some(color)
    }
}

/// Square sub-images of a fixed size, left to right then top to bottom.
#[derive(Debug)]
pub struct Tiles<'a, I: Image + ?Sized> {
    image: &'a I,
    size: u32,
    x: u32,
    y: u32,
}

impl<'a, I: Image + ?Sized> Tiles<'a, I> {
    pub(crate) fn new(image: &'a I, size: u32) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        if size == 0 || width % size != 0 || height % size != 0 {
            return Err(LumiglyphError::InvalidTileSize { size, width, height });
        }
        Ok(Self { image, size, x: 0, y: 0 })
    }

    /// Tiles per row.
    pub fn columns(&self) -> u32 {
        self.image.width() / self.size
    }

    /// Tile rows.
    pub fn rows(&self) -> u32 {
        self.image.height() / self.size
    }

    pub fn tile_size(&self) -> u32 {
        self.size
    }
}

impl<'a, I: Image + ?Sized> Iterator for Tiles<'a, I> {
    type Item = SubImage<'a, I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let tile = SubImage::within(self.image, self.x, self.y, self.size);
        self.x += self.size;
        if self.x >= self.image.width() {
            self.x = 0;
            self.y += self.size;
        }
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.y >= self.image.height() {
            0
        } else {
            let full_rows = (self.image.height() - self.y) / self.size;
            (full_rows * self.columns() - self.x / self.size) as usize
        };
        (remaining, Some(remaining))
    }
}

impl<I: Image + ?Sized> ExactSizeIterator for Tiles<'_, I> {}
