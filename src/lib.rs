//! Image to ASCII art converter using glyph brightness matching.

pub mod cache;
pub mod charset;
pub mod config;
pub mod glyph;
pub mod matcher;
pub mod output;
pub mod raster;
pub mod shell;
pub mod tiles;

pub use cache::BrightnessCache;
pub use charset::{CharOp, CharSet, CharTarget};
pub use config::{ConfigError, OutputTarget, Settings};
pub use glyph::{FontRasterizer, GlyphBitmap, GlyphRasterizer};
pub use matcher::{BrightnessMatcher, CharGrid};
pub use output::{AsciiOutput, ConsoleOutput, HtmlOutput};
pub use raster::{Image, PaddedImage, SubImage};
pub use shell::{Command, CommandError, Shell};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LumiglyphError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font error: {0}")]
    Font(String),
    #[error(
        "cannot read font file {}: {source} (use --font PATH or the \"font\" setting)",
        path.display()
    )]
    FontFile { path: std::path::PathBuf, source: std::io::Error },
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{columns} columns do not evenly tile a {width}x{height} image")]
    InvalidColumns { columns: u32, width: u32, height: u32 },
    #[error("tile size {size} does not evenly divide a {width}x{height} image")]
    InvalidTileSize { size: u32, width: u32, height: u32 },
    #[error("{size}x{size} tile at ({x}, {y}) exceeds a {width}x{height} image")]
    TileOutOfBounds { x: u32, y: u32, size: u32, width: u32, height: u32 },
    #[error("no characters are active for rendering")]
    EmptyCharset,
}

pub type Result<T> = std::result::Result<T, LumiglyphError>;
