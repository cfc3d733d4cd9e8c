//! Interactive command loop around a [`BrightnessMatcher`].

use crate::charset::{CharOp, CharSet, CharTarget};
use crate::config::{OutputTarget, Settings};
use crate::glyph::GlyphRasterizer;
use crate::matcher::BrightnessMatcher;
use crate::output::{AsciiOutput, ConsoleOutput, HtmlOutput};
use crate::raster::Image;
use crate::{LumiglyphError, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

pub const PROMPT: &str = ">>> ";
pub const RESOLUTION_ERROR: &str = "Did not change due to exceeding boundaries";
pub const EMPTY_CHARSET_ERROR: &str = "Did not render due to an empty character set";
const RESOLUTION_SET: &str = "Width set to";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List the active characters.
    Chars,
    Edit(CharOp, CharTarget),
    Resolution(Resolution),
    Render,
    Output(OutputTarget),
    Exit,
}

/// Rejected input; the message is shown to the user verbatim.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("Did not add due incorrect format")]
    Add,
    #[error("Did not remove due to incorrect format")]
    Remove,
    #[error("Did not executed due to incorrect command")]
    Invalid,
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words[..] {
            ["chars"] => Ok(Command::Chars),
            ["add", ref args @ ..] => parse_edit(CharOp::Add, args),
            ["remove", ref args @ ..] => parse_edit(CharOp::Remove, args),
            ["res", "up"] => Ok(Command::Resolution(Resolution::Up)),
            ["res", "down"] => Ok(Command::Resolution(Resolution::Down)),
            ["render"] => Ok(Command::Render),
            ["console"] => Ok(Command::Output(OutputTarget::Console)),
            ["html"] => Ok(Command::Output(OutputTarget::Html)),
            ["exit"] => Ok(Command::Exit),
            _ => Err(CommandError::Invalid),
        }
    }
}

fn parse_edit(op: CharOp, args: &[&str]) -> std::result::Result<Command, CommandError> {
    let error = match op {
        CharOp::Add => CommandError::Add,
        CharOp::Remove => CommandError::Remove,
    };
    match args {
        [token] => CharTarget::parse(token).map(|target| Command::Edit(op, target)).ok_or(error),
        _ => Err(error),
    }
}

/// Whether the loop keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R> {
    matcher: BrightnessMatcher<R>,
    charset: CharSet,
    columns: u32,
    min_columns: u32,
    max_columns: u32,
    output: OutputTarget,
    html_file: PathBuf,
    font_name: String,
}

impl<R: GlyphRasterizer> Shell<R> {
    /// Column counts are kept to powers of two between `max(1, width / height)`
    /// and `width / min_pixels_per_char`, so every tile size divides the image.
    pub fn new(matcher: BrightnessMatcher<R>, settings: &Settings) -> Self {
        let (width, height) = (matcher.image().width(), matcher.image().height());
        let min_columns = (width / height).max(1);
        let max_columns = floor_power_of_two(width / settings.min_pixels_per_char.max(1));
        let columns = floor_power_of_two(settings.initial_columns)
            .min(max_columns)
            .max(min_columns);

        Self {
            matcher,
            charset: settings.initial_chars.chars().collect(),
            columns,
            min_columns,
            max_columns,
            output: settings.output,
            html_file: settings.html_file.clone(),
            font_name: settings.font_name.clone(),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn column_bounds(&self) -> (u32, u32) {
        (self.min_columns, self.max_columns)
    }

    pub fn charset(&self) -> &CharSet {
        &self.charset
    }

    pub fn output(&self) -> OutputTarget {
        self.output
    }

    pub fn matcher(&self) -> &BrightnessMatcher<R> {
        &self.matcher
    }

    /// Prompt, read and execute commands until `exit` or end of input.
    ///
    /// A line that is not valid UTF-8 is rejected like any other malformed command.
    pub fn run<In: BufRead, W: Write>(&mut self, mut input: In, out: &mut W) -> Result<()> {
        let mut line = Vec::new();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let parsed = match std::str::from_utf8(&line) {
                Ok(text) => Command::parse(text),
                Err(_) => Err(CommandError::Invalid),
            };
            match parsed {
                Ok(command) => {
                    if self.execute(command, out)? == Flow::Exit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "{}", err)?,
            }
        }
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Chars => writeln!(out, "{}", self.charset)?,
            Command::Edit(op, target) => self.charset.apply(op, target),
            Command::Resolution(change) => self.change_resolution(change, out)?,
            Command::Render => self.render(out)?,
            Command::Output(target) => self.output = target,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn change_resolution<W: Write>(&mut self, change: Resolution, out: &mut W) -> Result<()> {
        let next = match change {
            Resolution::Up => self.columns.saturating_mul(2),
            Resolution::Down => self.columns / 2,
        };
        if next > self.max_columns || next < self.min_columns {
            writeln!(out, "{}", RESOLUTION_ERROR)?;
        } else {
            self.columns = next;
            writeln!(out, "{} {}", RESOLUTION_SET, self.columns)?;
        }
        Ok(())
    }

    fn render<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let chars = self.charset.to_vec();
        let grid = match self.matcher.render(self.columns, &chars) {
            Ok(grid) => grid,
            Err(LumiglyphError::EmptyCharset) => {
                writeln!(out, "{}", EMPTY_CHARSET_ERROR)?;
                return Ok(());
            }
            Err(err) => {
                log::warn!("render rejected: {}", err);
                writeln!(out, "{}", RESOLUTION_ERROR)?;
                return Ok(());
            }
        };

        let emitted = {
            let mut output: Box<dyn AsciiOutput + '_> = match self.output {
                OutputTarget::Console => Box::new(ConsoleOutput::new(&mut *out)),
                OutputTarget::Html => Box::new(HtmlOutput::new(&self.html_file, &self.font_name)),
            };
            output.emit(&grid)
        };
        if let Err(err) = emitted {
            log::error!("failed to write output: {}", err);
            writeln!(out, "Did not render: {}", err)?;
        }
        Ok(())
    }
}

/// Largest power of two not above `n`, or 0 for 0.
fn floor_power_of_two(n: u32) -> u32 {
    match n {
        0 => 0,
        _ => 1 << (u32::BITS - 1 - n.leading_zeros()),
    }
}
