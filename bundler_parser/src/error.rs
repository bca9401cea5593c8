//! The parser's error boundary, aggregating its own failures with the
//! lexer's (a lex error is reported the same way a parse error is — both
//! abort the build with a file-scoped diagnostic).

use bundler_ast::ByteOffset;
use bundler_lexer::LexError;
use thiserror::Error;

/// Everything that can make parsing one module's token stream fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("unexpected token {found}, expected {expected}, at byte {at}")]
    UnexpectedToken { found: String, expected: String, at: ByteOffset },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("`{name}` is imported more than once in this module")]
    DuplicateBinding { name: Box<str>, at: ByteOffset },

    #[error("a dynamic `import(...)` must take exactly one argument, at byte {at}")]
    MalformedDynamicImport { at: ByteOffset },

    #[error("missing semicolon at byte {at}")]
    MissingSemicolon { at: ByteOffset },

    #[error("a class export must be named unless it's the default export, at byte {at}")]
    AnonymousClassExport { at: ByteOffset },
}

impl ParseError {
    /// The byte offset the error should be reported at, for line/column translation.
    #[must_use]
    pub fn offset(&self) -> ByteOffset {
        match self {
            Self::Lex(e) => e.offset(),
            Self::UnexpectedToken { at, .. }
            | Self::DuplicateBinding { at, .. }
            | Self::MalformedDynamicImport { at }
            | Self::MissingSemicolon { at }
            | Self::AnonymousClassExport { at } => *at,
            Self::UnexpectedEof { .. } => 0,
        }
    }
}
