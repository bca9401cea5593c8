//! Token kinds produced by the lexer.

use bundler_ast::Span;

use crate::keyword::Keyword;

/// Every punctuator/operator the lexer recognizes. Grouped roughly the way
/// `boa`'s `syntax::lexer::operator` table is, widest-match-first at the call
/// site rather than here (this is just the closed vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuator {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Dot,
    Spread,
    Semicolon,
    Comma,
    Colon,
    Question,
    QuestionDot,
    QuestionQuestion,
    Arrow,
    Assign,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Inc,
    Dec,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    Not,
    And,
    Or,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    AndAssign,
    OrAssign,
    CoalesceAssign,
}

/// The decoded payload of a string-shaped literal token.
#[derive(Debug, Clone, PartialEq)]
pub struct StrPayload {
    pub value: Box<str>,
    pub raw: Box<str>,
}

/// One chunk of a template literal, as produced by the lexer. The parser
/// assembles a run of `TemplateHead ... (expr tokens) ... TemplateMiddle ...
/// TemplateTail` into a single `TemplateLit` node (§4.0 of the expanded spec).
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// `` `text` `` — a template with no interpolation at all.
    NoSubstitution(StrPayload),
    /// `` `text${ `` — the opening chunk, before the first interpolation.
    Head(StrPayload),
    /// `}text${` — a chunk between two interpolations.
    Middle(StrPayload),
    /// `` }text` `` — the closing chunk, after the last interpolation.
    Tail(StrPayload),
}

/// The kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(Box<str>),
    Keyword(Keyword),
    Number(Box<str>),
    Str(StrPayload),
    Template(TemplatePart),
    Regex(Box<str>),
    Punctuator(Punctuator),
    Eof,
}

/// A single lexed token: its kind, its byte span, and whether a line
/// terminator occurred between it and the previous token — the only piece of
/// trivia the statement parser needs to retain, for automatic-semicolon
/// insertion (§4.0).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub preceded_by_newline: bool,
}

impl Token {
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Whether a token of this kind, seen as the immediately preceding
    /// significant token, means a following `/` should lex as division
    /// rather than the start of a regex literal (§4.0).
    #[must_use]
    pub fn can_end_expression(&self) -> bool {
        match &self.kind {
            TokenKind::Ident(_) | TokenKind::Number(_) | TokenKind::Str(_) | TokenKind::Regex(_) => {
                true
            }
            TokenKind::Template(TemplatePart::NoSubstitution(_) | TemplatePart::Tail(_)) => true,
            TokenKind::Keyword(k) => matches!(
                k,
                Keyword::This | Keyword::Super | Keyword::Null | Keyword::True | Keyword::False
            ),
            TokenKind::Punctuator(p) => matches!(
                p,
                Punctuator::CloseParen | Punctuator::CloseBracket | Punctuator::CloseBrace
            ),
            _ => false,
        }
    }
}
