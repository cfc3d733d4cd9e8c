//! lumiglyph CLI - Convert images to ASCII art interactively

use clap::Parser;
use lumiglyph::{
    BrightnessCache, BrightnessMatcher, FontRasterizer, LumiglyphError, OutputTarget, PaddedImage,
    Settings, Shell,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lumiglyph", about = "Convert images to ASCII art")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Font file used to measure glyph brightness
    /// (default: assets/DejaVuSansMono.ttf, or "font" in the settings file)
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Where rendered art is written
    #[arg(short, long, value_enum)]
    output: Option<OutputTarget>,
    /// HTML file written when output is html
    #[arg(long)]
    html_file: Option<PathBuf>,
    /// Initial characters per row
    #[arg(long)]
    columns: Option<u32>,
}

fn main() -> Result<(), LumiglyphError> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(font) = args.font {
        settings.font = font;
    }
    if let Some(output) = args.output {
        settings.output = output;
    }
    if let Some(html_file) = args.html_file {
        settings.html_file = html_file;
    }
    if let Some(columns) = args.columns {
        settings.initial_columns = columns;
    }
    settings.validate()?;

    let image = match PaddedImage::open(&args.input) {
        Ok(image) => image,
        Err(err) => {
            log::error!("Failed to open image file {}: {}", args.input.display(), err);
            return Err(err);
        }
    };
    let rasterizer = FontRasterizer::from_file(&settings.font)?;
    let cache = BrightnessCache::new(settings.glyph_size);
    let matcher = BrightnessMatcher::with_cache(image, rasterizer, cache);

    let mut shell = Shell::new(matcher, &settings);
    let stdin = std::io::stdin();
    shell.run(stdin.lock(), &mut std::io::stdout())
}
