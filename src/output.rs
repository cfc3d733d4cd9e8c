//! Destinations for rendered character grids.

use crate::matcher::CharGrid;
use crate::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Something a finished grid can be sent to.
pub trait AsciiOutput {
    fn emit(&mut self, grid: &CharGrid) -> Result<()>;
}

/// Writes one line per grid row.
pub struct ConsoleOutput<W> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AsciiOutput for ConsoleOutput<W> {
    fn emit(&mut self, grid: &CharGrid) -> Result<()> {
        for line in grid.lines() {
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes a standalone HTML page: light glyphs on a dark background.
pub struct HtmlOutput {
    path: PathBuf,
    font: String,
}

impl HtmlOutput {
    pub fn new(path: impl Into<PathBuf>, font: impl Into<String>) -> Self {
        Self { path: path.into(), font: font.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self, grid: &CharGrid) -> String {
        let family = self.font.replace(['\'', '"', ';', '{', '}'], "");
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>ASCII art</title>\n<style>\n");
        html.push_str("body { background: #000; margin: 0; }\n");
        html.push_str(&format!("pre {{ color: #fff; font-family: '{}', monospace; ", family));
        html.push_str("font-size: 8px; line-height: 1; }\n");
        html.push_str("</style>\n</head>\n<body>\n<pre>\n");
        for line in grid.lines() {
            html.push_str(&escape(&line));
            html.push('\n');
        }
        html.push_str("</pre>\n</body>\n</html>\n");
        html
    }
}

impl AsciiOutput for HtmlOutput {
    fn emit(&mut self, grid: &CharGrid) -> Result<()> {
        std::fs::write(&self.path, self.document(grid))?;
        log::info!("wrote {} rows to {}", grid.rows(), self.path.display());
        Ok(())
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> CharGrid {
        CharGrid::new(3, 2, vec!['a', '<', '&', '#', '>', ' '])
    }

    #[test]
    fn test_console_writes_rows() {
        let mut output = ConsoleOutput::new(Vec::new());
        output.emit(&grid()).unwrap();

        let written = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(written, "a<&\n#> \n");
    }

    #[test]
    fn test_html_escapes_markup() {
        let output = HtmlOutput::new("out.html", "Courier New");
        let html = output.document(&grid());

        assert!(html.contains("<pre>\na&lt;&amp;\n#&gt; \n</pre>"));
        assert!(html.contains("font-family: 'Courier New', monospace"));
        assert!(html.contains(concat!(
            "pre { color: #fff; font-family: 'Courier New', monospace; ",
            "font-size: 8px; line-height: 1; }\n"
        )));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_html_strips_quotes_from_font() {
        let output = HtmlOutput::new("out.html", "Bad'; } body {");
        assert!(output.document(&grid()).contains("font-family: 'Bad  body ', monospace"));
    }

    #[test]
    fn test_html_emit_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.html");
        let mut output = HtmlOutput::new(&path, "Courier New");

        output.emit(&grid()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, output.document(&grid()));
        assert_eq!(output.path(), path.as_path());
    }

    #[test]
    fn test_html_emit_reports_io_error() {
        let mut output = HtmlOutput::new("/nonexistent-dir/out.html", "Courier New");
        assert!(output.emit(&grid()).is_err());
    }
}
