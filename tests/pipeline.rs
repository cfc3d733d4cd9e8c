use image::{Rgb, RgbImage};
use lumiglyph::raster::FILL_COLOR;
use lumiglyph::{
    BrightnessMatcher, GlyphBitmap, GlyphRasterizer, Image, LumiglyphError, OutputTarget,
    PaddedImage, Settings, Shell,
};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// '#' is fully lit, '.' half lit, everything else dark.
struct InkRasterizer;

impl GlyphRasterizer for InkRasterizer {
    fn rasterize(&self, ch: char, size: usize) -> GlyphBitmap {
        let lit = match ch {
            '#' => size * size,
            '.' => size * size / 2,
            _ => 0,
        };
        GlyphBitmap::from_fn(size, |x, y| y * size + x < lit)
    }
}

#[test]
fn test_open_pads_decoded_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    RgbImage::from_pixel(5, 3, BLACK).save(&path).unwrap();

    let image = PaddedImage::open(&path).unwrap();

    // 5x3 -> 8x4: 1 fill column left, 2 right; 0 rows above, 1 below
    assert_eq!((image.width(), image.height()), (8, 4));
    assert_eq!(image.pixel(0, 0), FILL_COLOR);
    assert_eq!(image.pixel(1, 0), BLACK);
    assert_eq!(image.pixel(5, 2), BLACK);
    assert_eq!(image.pixel(6, 2), FILL_COLOR);
    assert_eq!(image.pixel(3, 3), FILL_COLOR);
}

#[test]
fn test_open_missing_file() {
    let result = PaddedImage::open("/nonexistent/photo.png");
    assert!(matches!(result, Err(LumiglyphError::Image(_))));
}

#[test]
fn test_open_undecodable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();

    assert!(PaddedImage::open(&path).is_err());
}

#[test]
fn test_render_quadrants() {
    // Top-left quadrant black, the rest white
    let source = RgbImage::from_fn(8, 8, |x, y| if x < 4 && y < 4 { BLACK } else { WHITE });
    let mut matcher = BrightnessMatcher::new(PaddedImage::from_rgb(&source), InkRasterizer);

    let grid = matcher.render(2, &[' ', '.', '#']).unwrap();
    assert_eq!(grid.to_string(), " #\n##");

    let grid = matcher.render(4, &[]).unwrap();
    assert_eq!(grid.to_string(), "  ##\n  ##\n####\n####");
}

#[test]
fn test_shell_session_writes_html() {
    let dir = tempfile::tempdir().unwrap();
    let html_file = dir.path().join("out.html");
    let settings = Settings {
        html_file: html_file.clone(),
        initial_chars: "#".to_string(),
        ..Settings::default()
    };

    let source = RgbImage::from_fn(4, 4, |x, _| if x < 2 { BLACK } else { WHITE });
    let matcher = BrightnessMatcher::new(PaddedImage::from_rgb(&source), InkRasterizer);
    let mut shell = Shell::new(matcher, &settings);

    let script = "add space\nchars\nrender\nconsole\nrender\nexit\n";
    let mut out = Vec::new();
    shell.run(script.as_bytes(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(shell.output(), OutputTarget::Console);
    assert!(out.contains(">>>   #\n"), "{out}");
    assert!(out.contains(" #\n #\n"), "{out}");

    let html = std::fs::read_to_string(&html_file).unwrap();
    assert!(html.contains("<pre>\n #\n #\n</pre>"), "{html}");
}
