//! Byte-offset source spans.
//!
//! The teacher crate this module is modeled on (`boa_ast::position`) indexes
//! spans by line/column `Position`s, which is the right shape for an engine
//! that reports diagnostics but never rewrites source text. This bundler's
//! transformer instead splices raw bytes out of the original source, so every
//! span here is a plain `[start, end)` byte range — no line/column relationship
//! implied, no re-derivation needed at patch time.

use std::fmt;

/// A byte offset into a module's UTF-8 source text.
pub type ByteOffset = u32;

/// A half-open `[start, end)` byte range into a module's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    start: ByteOffset,
    end: ByteOffset,
}

impl Span {
    /// Creates a new span.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    #[track_caller]
    #[must_use]
    pub fn new(start: ByteOffset, end: ByteOffset) -> Self {
        assert!(start <= end, "a span cannot start after its end");
        Self { start, end }
    }

    /// The empty span at a single offset.
    #[must_use]
    pub const fn at(offset: ByteOffset) -> Self {
        Self { start: offset, end: offset }
    }

    #[must_use]
    pub const fn start(self) -> ByteOffset {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> ByteOffset {
        self.end
    }

    #[must_use]
    pub fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Extracts the slice of `source` this span addresses.
    ///
    /// # Panics
    ///
    /// Panics if the span's offsets do not land on UTF-8 char boundaries of `source`.
    #[must_use]
    pub fn slice(self, source: &str) -> &str {
        &source[self.start as usize..self.end as usize]
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Converts a byte offset into a 1-based `(line, column)` pair for diagnostics.
    #[must_use]
    pub fn line_col_of(source: &str, offset: ByteOffset) -> (u32, u32) {
        let offset = offset as usize;
        let mut line = 1u32;
        let mut col = 1u32;
        for (i, ch) in source.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_takes_the_widest_range() {
        let a = Span::new(5, 10);
        let b = Span::new(2, 7);
        assert_eq!(a.cover(b), Span::new(2, 10));
    }

    #[test]
    fn line_col_counts_newlines() {
        let src = "ab\ncd\nef";
        assert_eq!(Span::line_col_of(src, 0), (1, 1));
        assert_eq!(Span::line_col_of(src, 3), (2, 1));
        assert_eq!(Span::line_col_of(src, 7), (3, 2));
    }
}
