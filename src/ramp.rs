//! glyph-ramp - Print characters ordered by rendered glyph brightness

use clap::Parser;
use lumiglyph::charset::{FIRST_PRINTABLE, LAST_PRINTABLE};
use lumiglyph::{BrightnessCache, FontRasterizer, LumiglyphError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glyph-ramp", about = "Show how bright each character renders")]
struct Args {
    /// Characters to measure (default: printable ASCII)
    chars: Option<String>,
    /// Font file to rasterize with; any monospace TTF or OTF works
    #[arg(short, long, default_value = "assets/DejaVuSansMono.ttf")]
    font: PathBuf,
    /// Bitmap side length
    #[arg(short, long, default_value = "16")]
    size: usize,
}

fn main() -> Result<(), LumiglyphError> {
    env_logger::init();
    let args = Args::parse();

    let rasterizer = FontRasterizer::from_file(&args.font)?;
    let mut cache = BrightnessCache::new(args.size.max(1));

    let mut chars: Vec<char> = match &args.chars {
        Some(text) => text.chars().collect(),
        None => (FIRST_PRINTABLE..=LAST_PRINTABLE).collect(),
    };
    chars.sort_unstable();
    chars.dedup();

    let mut ramp: Vec<(char, f32)> = chars
        .into_iter()
        .map(|ch| (ch, cache.brightness_of(ch, &rasterizer)))
        .collect();
    ramp.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let min = ramp.first().map_or(0.0, |&(_, v)| v);
    let max = ramp.last().map_or(0.0, |&(_, v)| v);
    let range = max - min;

    for (ch, raw) in &ramp {
        let normalized = if range > 0.0 { (raw - min) / range } else { 0.0 };
        println!("{:?}\t{:.4}\t{:.4}", ch, raw, normalized);
    }

    let line: String = ramp.iter().map(|&(ch, _)| ch).collect();
    println!("{}", line);
    Ok(())
}
