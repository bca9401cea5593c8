//! A cursor over the lexer's token stream, mirroring the role of `boa`'s
//! `cursor::Cursor` (itself built over a `BufferedLexer`) but simplified to
//! index a `Vec<Token>` produced up front by `bundler_lexer::tokenize`,
//! since this bundler always has the whole module source in memory already.

use bundler_ast::{ByteOffset, Span};
use bundler_lexer::{Keyword, Punctuator, Token, TokenKind};

use crate::error::ParseError;

pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    #[must_use]
    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    #[must_use]
    pub fn peek_at(&self, ahead: usize) -> &Token {
        let idx = (self.pos + ahead).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// The byte offset the current token starts at.
    #[must_use]
    pub fn pos(&self) -> ByteOffset {
        self.peek().span.start()
    }

    /// The byte offset the most recently consumed token ended at.
    #[must_use]
    pub fn prev_end(&self) -> ByteOffset {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].span.end()
        }
    }

    pub fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.peek().is_eof()
    }

    #[must_use]
    pub fn is_punct(&self, p: Punctuator) -> bool {
        matches!(&self.peek().kind, TokenKind::Punctuator(q) if *q == p)
    }

    #[must_use]
    pub fn is_kw(&self, k: Keyword) -> bool {
        matches!(&self.peek().kind, TokenKind::Keyword(q) if *q == k)
    }

    #[must_use]
    pub fn is_ident(&self) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(_))
    }

    pub fn eat_punct(&mut self, p: Punctuator) -> bool {
        if self.is_punct(p) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn eat_kw(&mut self, k: Keyword) -> bool {
        if self.is_kw(k) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn describe(&self) -> String {
        match &self.peek().kind {
            TokenKind::Eof => "end of input".to_owned(),
            TokenKind::Ident(n) => format!("identifier `{n}`"),
            TokenKind::Keyword(k) => format!("keyword `{k:?}`"),
            other => format!("{other:?}"),
        }
    }

    pub fn expect_punct(&mut self, p: Punctuator) -> Result<Span, ParseError> {
        if self.is_punct(p) {
            let span = self.peek().span;
            self.bump();
            Ok(span)
        } else {
            Err(ParseError::UnexpectedToken {
                found: self.describe(),
                expected: format!("`{p:?}`"),
                at: self.pos(),
            })
        }
    }

    pub fn expect_kw(&mut self, k: Keyword) -> Result<Span, ParseError> {
        if self.is_kw(k) {
            let span = self.peek().span;
            self.bump();
            Ok(span)
        } else {
            Err(ParseError::UnexpectedToken {
                found: self.describe(),
                expected: format!("keyword `{k:?}`"),
                at: self.pos(),
            })
        }
    }

    /// Consumes an identifier (but not a reserved keyword), returning its
    /// name and span.
    pub fn expect_ident(&mut self) -> Result<(Box<str>, Span), ParseError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            let span = self.peek().span;
            self.bump();
            Ok((name, span))
        } else {
            Err(ParseError::UnexpectedToken {
                found: self.describe(),
                expected: "identifier".to_owned(),
                at: self.pos(),
            })
        }
    }

    /// Consumes an identifier, *or* one of the contextual keywords this
    /// bundler's grammar subset allows as a binding name outside of strict
    /// reserved-word position (`async`, `of`, `get`, `set`, `static`, `as`,
    /// `from`, `default`) — all of these lex as `Keyword` but are valid
    /// identifiers in most positions in real ECMAScript.
    pub fn expect_binding_name(&mut self) -> Result<(Box<str>, Span), ParseError> {
        if self.is_ident() {
            return self.expect_ident();
        }
        if let TokenKind::Keyword(k) = &self.peek().kind {
            if let Some(text) = contextual_keyword_text(*k) {
                let span = self.peek().span;
                self.bump();
                return Ok((text.into(), span));
            }
        }
        Err(ParseError::UnexpectedToken {
            found: self.describe(),
            expected: "identifier".to_owned(),
            at: self.pos(),
        })
    }

    /// Automatic-semicolon-insertion: consumes an explicit `;` if present;
    /// otherwise the statement is still well-formed if the next token is
    /// preceded by a line terminator, is `}`, or is end-of-input.
    pub fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat_punct(Punctuator::Semicolon) {
            return Ok(());
        }
        if self.is_eof() || self.is_punct(Punctuator::CloseBrace) || self.peek().preceded_by_newline {
            return Ok(());
        }
        Err(ParseError::MissingSemicolon { at: self.pos() })
    }
}

fn contextual_keyword_text(k: Keyword) -> Option<&'static str> {
    match k {
        Keyword::Async => Some("async"),
        Keyword::Of => Some("of"),
        Keyword::Get => Some("get"),
        Keyword::Set => Some("set"),
        Keyword::Static => Some("static"),
        Keyword::As => Some("as"),
        Keyword::From => Some("from"),
        Keyword::Default => Some("default"),
        _ => None,
    }
}
