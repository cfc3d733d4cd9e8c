//! The set of characters enabled for rendering, and edits to it.

use std::collections::BTreeSet;
use std::fmt;

/// First printable ASCII character (space).
pub const FIRST_PRINTABLE: char = ' ';
/// Last printable ASCII character.
pub const LAST_PRINTABLE: char = '~';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharOp {
    Add,
    Remove,
}

/// The characters an add or remove acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharTarget {
    Single(char),
    /// Inclusive range; endpoints may come in either order.
    Range(char, char),
    /// Every printable ASCII character.
    All,
}

impl CharTarget {
    /// Parse `all`, `space`, a single character, or a range such as `a-z`.
    ///
    /// Range endpoints must be printable ASCII other than space.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "all" => Some(CharTarget::All),
            "space" => Some(CharTarget::Single(' ')),
            _ => {
                let chars: Vec<char> = token.chars().collect();
                match chars[..] {
                    [ch] => Some(CharTarget::Single(ch)),
                    [start, '-', end] if is_range_endpoint(start) && is_range_endpoint(end) => {
                        Some(CharTarget::Range(start, end))
                    }
                    _ => None,
                }
            }
        }
    }

    pub fn chars(self) -> impl Iterator<Item = char> {
        let (low, high) = match self {
            CharTarget::Single(ch) => (ch, ch),
            CharTarget::Range(a, b) => (a.min(b), a.max(b)),
            CharTarget::All => (FIRST_PRINTABLE, LAST_PRINTABLE),
        };
        low..=high
    }
}

fn is_range_endpoint(ch: char) -> bool {
    ch != ' ' && (FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&ch)
}

/// Ordered set of characters; iteration is by code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    chars: BTreeSet<char>,
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove every character of `target`.
    pub fn apply(&mut self, op: CharOp, target: CharTarget) {
        match op {
            CharOp::Add => self.chars.extend(target.chars()),
            CharOp::Remove => {
                for ch in target.chars() {
                    self.chars.remove(&ch);
                }
            }
        }
    }

    pub fn add(&mut self, ch: char) {
        self.apply(CharOp::Add, CharTarget::Single(ch));
    }

    pub fn remove(&mut self, ch: char) {
        self.apply(CharOp::Remove, CharTarget::Single(ch));
    }

    pub fn add_range(&mut self, start: char, end: char) {
        self.apply(CharOp::Add, CharTarget::Range(start, end));
    }

    pub fn remove_range(&mut self, start: char, end: char) {
        self.apply(CharOp::Remove, CharTarget::Range(start, end));
    }

    pub fn add_all(&mut self) {
        self.apply(CharOp::Add, CharTarget::All);
    }

    pub fn remove_all(&mut self) {
        self.apply(CharOp::Remove, CharTarget::All);
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<char> {
        self.iter().collect()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self { chars: iter.into_iter().collect() }
    }
}

impl fmt::Display for CharSet {
    /// Characters separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ch) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
