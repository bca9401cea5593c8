//! A byte-offset character cursor over one module's source text.
//!
//! The teacher's cursor (`boa`'s `syntax::lexer::cursor::Cursor`) wraps a
//! `Read` byte stream because the engine lexes from arbitrary I/O sources.
//! This bundler only ever lexes an in-memory `&str` already loaded by the CLI
//! shell, so the cursor is a thin index into that string instead — simpler,
//! and it lets every token span be a direct byte offset with no intermediate
//! buffering.

use bundler_ast::ByteOffset;

/// A cursor over `&str` source text, tracking a byte position.
pub struct Cursor<'a> {
    source: &'a str,
    pos: ByteOffset,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    #[must_use]
    pub fn pos(&self) -> ByteOffset {
        self.pos
    }

    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos as usize..]
    }

    /// The next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the next one, without consuming either.
    #[must_use]
    pub fn peek2(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next()?;
        chars.next()
    }

    /// Whether `rest()` starts with `s`.
    #[must_use]
    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consumes and returns the next character, if any.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8() as u32;
        Some(ch)
    }

    /// Consumes the next character iff it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes `s.len()` bytes iff `rest()` starts with `s`.
    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len() as u32;
            true
        } else {
            false
        }
    }

    /// Consumes characters while `pred` holds.
    pub fn bump_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// The source slice `[start, self.pos())`.
    #[must_use]
    pub fn slice_from(&self, start: ByteOffset) -> &'a str {
        &self.source[start as usize..self.pos as usize]
    }
}
