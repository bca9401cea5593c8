//! **`bundler_lexer`** tokenizes one module's UTF-8 source text into a
//! byte-spanned [`Token`] stream.
//!
//! This crate is the bundler's analogue of `boa`'s `syntax::lexer`: a
//! hand-rolled, context-sensitive tokenizer (it must decide `/` vs. regex,
//! and it must track template-interpolation brace depth) producing tokens
//! tagged with byte spans rather than `boa`'s line/column `Position`s, for
//! the same reason `bundler_ast::span` departs from `boa_ast::position` — see
//! that crate's top-level docs. Scope is narrowed to ASCII identifiers (see
//! [`identifier`]) since the module corpus this bundler processes is
//! teaching-grade source, not arbitrary conformant ECMAScript.
//!
//! # Module map
//! - [`cursor`] — the byte-offset character cursor.
//! - [`token`] — [`TokenKind`] and [`Punctuator`].
//! - [`keyword`] — the reserved-word table (re-exported from this crate for
//!   convenience; it is otherwise a leaf dependency of `bundler_ast`).
//! - [`error`] — [`LexError`].
//! - [`identifier`], [`number`], [`string`], [`template`], [`regex`],
//!   [`comment`] — per-construct scanning helpers called from [`Lexer`].

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::dbg_macro)]

pub mod comment;
pub mod cursor;
pub mod error;
pub mod identifier;
pub mod keyword;
pub mod number;
pub mod regex;
pub mod string;
pub mod template;
pub mod token;

pub use bundler_ast::{ByteOffset, Span};
pub use error::LexError;
pub use keyword::Keyword;
pub use token::{Punctuator, StrPayload, TemplatePart, Token, TokenKind};

use cursor::Cursor;

/// Tokenizes a module's entire source text.
///
/// This is the crate's single entry point; `bundler_parser` never drives the
/// cursor itself, only this function's output.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

/// Tracks, for one open template interpolation, how many ordinary `{`/`}`
/// pairs have been opened inside it since the `${`. A `}` at depth `0`
/// belongs to the template, not to an object literal or block.
struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
    template_brace_depths: Vec<u32>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), tokens: Vec::new(), template_brace_depths: Vec::new() }
    }

    fn last_significant(&self) -> Option<&Token> {
        self.tokens.last()
    }

    fn push(&mut self, kind: TokenKind, start: ByteOffset, preceded_by_newline: bool) {
        let span = Span::new(start, self.cursor.pos());
        self.tokens.push(Token { kind, span, preceded_by_newline });
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            let mut preceded_by_newline = false;
            loop {
                match self.cursor.peek() {
                    Some(c) if c.is_whitespace() => {
                        if c == '\n' {
                            preceded_by_newline = true;
                        }
                        self.cursor.bump();
                    }
                    Some('/') if self.cursor.peek2() == Some('/') => {
                        comment::skip_line_comment(&mut self.cursor);
                    }
                    Some('/') if self.cursor.peek2() == Some('*') => {
                        if comment::skip_block_comment(&mut self.cursor)? {
                            preceded_by_newline = true;
                        }
                    }
                    _ => break,
                }
            }

            let start = self.cursor.pos();
            let Some(ch) = self.cursor.peek() else {
                self.push(TokenKind::Eof, start, preceded_by_newline);
                break;
            };

            match ch {
                c if identifier::is_ident_start(c) => {
                    let name = identifier::scan_ident_name(&mut self.cursor);
                    let kind = match Keyword::lookup(&name) {
                        Some(kw) => TokenKind::Keyword(kw),
                        None => TokenKind::Ident(name),
                    };
                    self.push(kind, start, preceded_by_newline);
                }
                c if c.is_ascii_digit() => {
                    let raw = number::scan_number(&mut self.cursor)?;
                    self.push(TokenKind::Number(raw), start, preceded_by_newline);
                }
                '.' if self.cursor.peek2().is_some_and(|c| c.is_ascii_digit()) => {
                    let raw = number::scan_number(&mut self.cursor)?;
                    self.push(TokenKind::Number(raw), start, preceded_by_newline);
                }
                '"' | '\'' => {
                    let (value, raw) = string::scan_string(&mut self.cursor)?;
                    self.push(TokenKind::Str(StrPayload { value, raw }), start, preceded_by_newline);
                }
                '`' => {
                    self.cursor.bump();
                    let (payload, ended_by_interpolation) =
                        template::scan_template_chunk(&mut self.cursor, start)?;
                    let part = if ended_by_interpolation {
                        self.template_brace_depths.push(0);
                        TemplatePart::Head(payload)
                    } else {
                        TemplatePart::NoSubstitution(payload)
                    };
                    self.push(TokenKind::Template(part), start, preceded_by_newline);
                }
                '/' if self.regex_allowed() => {
                    let raw = regex::scan_regex(&mut self.cursor)?;
                    self.push(TokenKind::Regex(raw), start, preceded_by_newline);
                }
                '}' if self.closes_template_interpolation() => {
                    self.template_brace_depths.pop();
                    self.cursor.bump();
                    let (payload, ended_by_interpolation) =
                        template::scan_template_chunk(&mut self.cursor, start)?;
                    let part = if ended_by_interpolation {
                        self.template_brace_depths.push(0);
                        TemplatePart::Middle(payload)
                    } else {
                        TemplatePart::Tail(payload)
                    };
                    self.push(TokenKind::Template(part), start, preceded_by_newline);
                }
                '{' => {
                    if let Some(depth) = self.template_brace_depths.last_mut() {
                        *depth += 1;
                    }
                    self.cursor.bump();
                    self.push(TokenKind::Punctuator(Punctuator::OpenBrace), start, preceded_by_newline);
                }
                '}' => {
                    if let Some(depth) = self.template_brace_depths.last_mut() {
                        *depth -= 1;
                    }
                    self.cursor.bump();
                    self.push(TokenKind::Punctuator(Punctuator::CloseBrace), start, preceded_by_newline);
                }
                _ => {
                    let p = self.scan_punctuator()?;
                    self.push(TokenKind::Punctuator(p), start, preceded_by_newline);
                }
            }

            if matches!(self.tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
                break;
            }
        }
        Ok(self.tokens)
    }

    fn closes_template_interpolation(&self) -> bool {
        matches!(self.template_brace_depths.last(), Some(0))
    }

    fn regex_allowed(&self) -> bool {
        match self.last_significant() {
            None => true,
            Some(t) => !t.can_end_expression(),
        }
    }

    /// Scans the punctuator at the cursor, longest-match-first.
    fn scan_punctuator(&mut self) -> Result<Punctuator, LexError> {
        use Punctuator::*;

        const THREE: &[(&str, Punctuator)] = &[
            ("...", Spread),
            ("===", StrictEq),
            ("!==", StrictNotEq),
            ("**=", PowAssign),
            ("<<=", ShlAssign),
            (">>=", ShrAssign),
            ("&&=", AndAssign),
            ("||=", OrAssign),
            ("??=", CoalesceAssign),
        ];
        const FOUR: &[(&str, Punctuator)] = &[(">>>=", UShrAssign)];
        const TWO: &[(&str, Punctuator)] = &[
            ("=>", Arrow),
            ("==", Eq),
            ("!=", NotEq),
            ("<=", LtEq),
            (">=", GtEq),
            ("++", Inc),
            ("--", Dec),
            ("**", Pow),
            ("<<", Shl),
            (">>", Shr),
            ("&&", And),
            ("||", Or),
            ("??", QuestionQuestion),
            ("?.", QuestionDot),
            ("+=", AddAssign),
            ("-=", SubAssign),
            ("*=", MulAssign),
            ("/=", DivAssign),
            ("%=", ModAssign),
            ("&=", BitAndAssign),
            ("|=", BitOrAssign),
            ("^=", BitXorAssign),
        ];

        if self.cursor.starts_with(">>>") {
            for (s, p) in FOUR {
                if self.cursor.eat_str(s) {
                    return Ok(*p);
                }
            }
            self.cursor.eat_str(">>>");
            return Ok(UShr);
        }
        for (s, p) in THREE {
            if self.cursor.eat_str(s) {
                return Ok(*p);
            }
        }
        for (s, p) in TWO {
            if self.cursor.eat_str(s) {
                return Ok(*p);
            }
        }

        let at = self.cursor.pos();
        let ch = self.cursor.bump().ok_or(LexError::UnexpectedChar { ch: '\0', at })?;
        Ok(match ch {
            '(' => OpenParen,
            ')' => CloseParen,
            '[' => OpenBracket,
            ']' => CloseBracket,
            '.' => Dot,
            ';' => Semicolon,
            ',' => Comma,
            ':' => Colon,
            '?' => Question,
            '<' => Lt,
            '>' => Gt,
            '=' => Assign,
            '+' => Add,
            '-' => Sub,
            '*' => Mul,
            '/' => Div,
            '%' => Mod,
            '&' => BitAnd,
            '|' => BitOr,
            '^' => BitXor,
            '~' => BitNot,
            '!' => Not,
            other => return Err(LexError::UnexpectedChar { ch: other, at }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_import_declaration() {
        let ks = kinds(r#"import { add, PI } from "./math.js";"#);
        assert!(matches!(ks[0], TokenKind::Keyword(Keyword::Import)));
        assert!(matches!(ks[1], TokenKind::Punctuator(Punctuator::OpenBrace)));
        assert!(matches!(&ks[2], TokenKind::Ident(n) if &**n == "add"));
    }

    #[test]
    fn distinguishes_regex_from_division() {
        let ks = kinds("a / b");
        assert!(matches!(ks[1], TokenKind::Punctuator(Punctuator::Div)));
        let ks = kinds("f(/ab+c/)");
        assert!(matches!(ks[2], TokenKind::Regex(_)));
    }

    #[test]
    fn template_with_interpolation_tracks_brace_depth() {
        let ks = kinds("`a${ {x: 1} }b`");
        assert!(matches!(&ks[0], TokenKind::Template(TemplatePart::Head(_))));
        assert!(matches!(ks[1], TokenKind::Punctuator(Punctuator::OpenBrace)));
        assert!(matches!(ks[5], TokenKind::Punctuator(Punctuator::CloseBrace)));
        assert!(matches!(&ks[6], TokenKind::Template(TemplatePart::Tail(_))));
    }

    #[test]
    fn reports_unterminated_string() {
        let err = tokenize("\"abc").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }
}
