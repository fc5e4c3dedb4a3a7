//! TextBuffer: the contents of a multi-line text widget.
//!
//! Positions are Tk-style indices: `line.char` with 1-based lines and
//! 0-based characters, or `end`. Like Tk's text widget, the buffer always
//! ends in an implicit newline, so `get(start, end)` of an empty buffer is
//! `"\n"`.

use std::fmt;
use std::str::FromStr;

use super::options::OptionValueError;

/// A position in a [`TextBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextIndex {
    /// `line.char`; both parts clamp to the buffer.
    At { line: usize, ch: usize },
    /// One past the last character.
    End,
}

impl TextIndex {
    /// `1.0`, the first character.
    pub const START: TextIndex = TextIndex::At { line: 1, ch: 0 };
}

impl FromStr for TextIndex {
    type Err = OptionValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "end" {
            return Ok(TextIndex::End);
        }
        let err = || OptionValueError::new("a text index like 1.0 or end", s);
        let (line, ch) = s.split_once('.').ok_or_else(err)?;
        let line: usize = line.parse().map_err(|_| err())?;
        let ch: usize = ch.parse().map_err(|_| err())?;
        if line == 0 {
            return Err(err());
        }
        Ok(TextIndex::At { line, ch })
    }
}

impl fmt::Display for TextIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextIndex::At { line, ch } => write!(f, "{line}.{ch}"),
            TextIndex::End => f.write_str("end"),
        }
    }
}

/// Editable text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            content: text.to_owned(),
        }
    }

    /// Text between two indices, including the implicit final newline when
    /// `to` is [`TextIndex::End`].
    pub fn get(&self, from: TextIndex, to: TextIndex) -> String {
        let start = self.offset(from);
        let end = self.offset(to).max(start);
        let mut text = self.content[start..end].to_owned();
        if to == TextIndex::End {
            text.push('\n');
        }
        text
    }

    /// Insert `text` before `at`.
    pub fn insert(&mut self, at: TextIndex, text: &str) {
        let offset = self.offset(at);
        self.content.insert_str(offset, text);
    }

    /// Delete the characters in `[from, to)`.
    pub fn delete(&mut self, from: TextIndex, to: TextIndex) {
        let start = self.offset(from);
        let end = self.offset(to).max(start);
        self.content.replace_range(start..end, "");
    }

    /// Whole content without the implicit trailing newline.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Lines of content (an empty buffer has one empty line).
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Width of the longest line, in characters.
    pub fn max_line_width(&self) -> usize {
        self.lines().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Byte offset of an index, clamped to the content.
    fn offset(&self, index: TextIndex) -> usize {
        let (line, ch) = match index {
            TextIndex::End => return self.content.len(),
            TextIndex::At { line, ch } => (line, ch),
        };
        let mut line_start = 0;
        for (n, text) in self.content.split('\n').enumerate() {
            if n + 1 == line {
                let within = text
                    .char_indices()
                    .nth(ch)
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                return line_start + within;
            }
            line_start += text.len() + 1;
        }
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_reads_as_newline() {
        let buf = TextBuffer::new();
        assert_eq!(buf.get(TextIndex::START, TextIndex::End), "\n");
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn insert_at_end_and_read_back() {
        let mut buf = TextBuffer::new();
        buf.insert(TextIndex::End, "hello\nworld");
        assert_eq!(buf.get(TextIndex::START, TextIndex::End), "hello\nworld\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.max_line_width(), 5);
    }

    #[test]
    fn line_char_indices() {
        let mut buf = TextBuffer::from_text("abc\ndef");
        assert_eq!(buf.get("2.1".parse().unwrap(), "2.3".parse().unwrap()), "ef");
        buf.insert("1.1".parse().unwrap(), "X");
        assert_eq!(buf.as_str(), "aXbc\ndef");
    }

    #[test]
    fn indices_clamp() {
        let buf = TextBuffer::from_text("ab\ncd");
        assert_eq!(buf.get("1.9".parse().unwrap(), "2.0".parse().unwrap()), "\n");
        assert_eq!(buf.get("7.0".parse().unwrap(), TextIndex::End), "\n");
    }

    #[test]
    fn delete_range() {
        let mut buf = TextBuffer::from_text("one\ntwo");
        buf.delete(TextIndex::START, "2.0".parse().unwrap());
        assert_eq!(buf.as_str(), "two");
        buf.delete(TextIndex::START, TextIndex::End);
        assert!(buf.is_empty());
    }

    #[test]
    fn multibyte_characters() {
        let mut buf = TextBuffer::from_text("héllo");
        buf.delete("1.1".parse().unwrap(), "1.2".parse().unwrap());
        assert_eq!(buf.as_str(), "hllo");
    }

    #[test]
    fn index_parsing() {
        assert_eq!("end".parse::<TextIndex>().unwrap(), TextIndex::End);
        assert_eq!("3.4".parse::<TextIndex>().unwrap().to_string(), "3.4");
        assert!("0.0".parse::<TextIndex>().is_err());
        assert!("x".parse::<TextIndex>().is_err());
    }
}
