//! The lexer's error boundary, in the teacher's per-crate `thiserror` style.

use bundler_ast::ByteOffset;
use thiserror::Error;

/// Everything that can make tokenizing a source file fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at byte {start}")]
    UnterminatedString { start: ByteOffset },

    #[error("unterminated template literal starting at byte {start}")]
    UnterminatedTemplate { start: ByteOffset },

    #[error("unterminated regular expression literal starting at byte {start}")]
    UnterminatedRegex { start: ByteOffset },

    #[error("unterminated block comment starting at byte {start}")]
    UnterminatedBlockComment { start: ByteOffset },

    #[error("invalid numeric literal at byte {at}")]
    InvalidNumber { at: ByteOffset },

    #[error("invalid escape sequence at byte {at}")]
    InvalidEscape { at: ByteOffset },

    #[error("unexpected character {ch:?} at byte {at}")]
    UnexpectedChar { ch: char, at: ByteOffset },

    #[error("template interpolation closed by an unmatched `}}` at byte {at}")]
    UnbalancedTemplateBrace { at: ByteOffset },
}

impl LexError {
    /// The byte offset the error should be reported at, for line/column translation.
    #[must_use]
    pub fn offset(&self) -> ByteOffset {
        match self {
            Self::UnterminatedString { start }
            | Self::UnterminatedTemplate { start }
            | Self::UnterminatedRegex { start }
            | Self::UnterminatedBlockComment { start } => *start,
            Self::InvalidNumber { at }
            | Self::InvalidEscape { at }
            | Self::UnexpectedChar { at, .. }
            | Self::UnbalancedTemplateBrace { at } => *at,
        }
    }
}
