//! Image abstraction: power-of-two padded images and square sub-image views.

use crate::tiles::{Pixels, Tiles};
use crate::{LumiglyphError, Result};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

/// Color of the border added when padding an image up to power-of-two dimensions.
pub const FILL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// A read-only grid of RGB samples.
pub trait Image {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color at `(x, y)`, or `None` when the coordinate lies outside the image.
    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>>;

    /// Color at `(x, y)`.
    ///
    /// # Panics
    /// If the coordinate lies outside the image.
    fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        match self.get_pixel(x, y) {
            Some(color) => color,
            None => panic!(
                "pixel ({}, {}) out of bounds for {}x{} image",
                x,
                y,
                self.width(),
                self.height()
            ),
        }
    }

    /// Pixels in raster order. Every call starts a new traversal.
    fn pixels(&self) -> Pixels<'_, Self> {
        Pixels::new(self)
    }

    /// Square `size`x`size` sub-images in raster order. Every call starts a new traversal.
    ///
    /// Fails unless `size` is positive and divides both dimensions.
    fn tiles(&self, size: u32) -> Result<Tiles<'_, Self>> {
        Tiles::new(self, size)
    }
}

/// An owned image whose dimensions are powers of two.
///
/// The source content is centered and the added border is [`FILL_COLOR`].
#[derive(Debug, Clone)]
pub struct PaddedImage {
    pixels: RgbImage,
}

impl PaddedImage {
    /// Decode an image file and pad it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path)?;
        Ok(Self::from_dynamic(&image))
    }

    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::from_rgb(&image.to_rgb8())
    }

    /// Pad `source` up to power-of-two dimensions.
    ///
    /// On each axis `floor(padding / 2)` fill lines precede the content and the
    /// remainder follow it.
    pub fn from_rgb(source: &RgbImage) -> Self {
        let (orig_w, orig_h) = source.dimensions();
        let (width, height) = (padded_dimension(orig_w), padded_dimension(orig_h));
        let left = (width - orig_w) / 2;
        let top = (height - orig_h) / 2;

        let pixels = RgbImage::from_fn(width, height, |x, y| {
            if x < left || y < top {
                return FILL_COLOR;
            }
            source
                .get_pixel_checked(x - left, y - top)
                .copied()
                .unwrap_or(FILL_COLOR)
        });

        Self { pixels }
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }
}

impl Image for PaddedImage {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }
}

/// Smallest power of two that is at least `len`, searching upward from 2.
pub fn padded_dimension(len: u32) -> u32 {
    len.max(2).next_power_of_two()
}

/// A borrowed square view into a parent image.
///
/// Holds a reference rather than a copy, so it cannot outlive the parent.
#[derive(Debug)]
pub struct SubImage<'a, I: Image + ?Sized> {
    parent: &'a I,
    x: u32,
    y: u32,
    size: u32,
}

impl<'a, I: Image + ?Sized> SubImage<'a, I> {
    /// View the `size`x`size` square whose top-left corner is `(x, y)`.
    pub fn new(parent: &'a I, x: u32, y: u32, size: u32) -> Result<Self> {
        let fits = |start: u32, limit: u32| {
            start.checked_add(size).is_some_and(|end| end <= limit)
        };
        if size == 0 || !fits(x, parent.width()) || !fits(y, parent.height()) {
            return Err(LumiglyphError::TileOutOfBounds {
                x,
                y,
                size,
                width: parent.width(),
                height: parent.height(),
            });
        }
        Ok(Self::within(parent, x, y, size))
    }

    /// Caller guarantees the square lies inside `parent`.
    pub(crate) fn within(parent: &'a I, x: u32, y: u32, size: u32) -> Self {
        Self { parent, x, y, size }
    }

    /// Top-left corner in parent coordinates.
    pub fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

impl<I: Image + ?Sized> Clone for SubImage<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: Image + ?Sized> Copy for SubImage<'_, I> {}

impl<I: Image + ?Sized> Image for SubImage<'_, I> {
    fn width(&self) -> u32 {
        self.size
    }

    fn height(&self) -> u32 {
        self.size
    }

    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.parent.get_pixel(self.x + x, self.y + y)
    }
}
