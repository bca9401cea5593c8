//! Literal expression nodes.

use crate::expression::Expr;
use crate::span::Span;

/// A numeric literal (`42`, `3.14`, `0x1F`). The raw text is kept verbatim;
/// the core never evaluates numbers, only relocates their source text.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    pub raw: Box<str>,
    pub span: Span,
}

/// A single- or double-quoted string literal. `value` is the decoded text,
/// `raw` is the literal's exact source text including quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub value: Box<str>,
    pub raw: Box<str>,
    pub span: Span,
}

/// A `/pattern/flags` regular-expression literal.
#[derive(Debug, Clone, PartialEq)]
pub struct RegexLit {
    pub raw: Box<str>,
    pub span: Span,
}

/// One quasi (literal text run) of a template literal, with its cooked value.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateQuasi {
    pub cooked: Box<str>,
    pub raw: Box<str>,
    pub span: Span,
}

/// A template literal: `` `head${expr}tail` ``. There is always one more
/// quasi than there are interpolated expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLit {
    pub quasis: Vec<TemplateQuasi>,
    pub exprs: Vec<Expr>,
    pub span: Span,
}

/// A tagged template (`` tag`text${e}` ``). The tag is its own expression and
/// is subject to free-reference rewriting and call-site `this` preservation,
/// exactly like an ordinary call callee.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplate {
    pub tag: Box<Expr>,
    pub quasi: TemplateLit,
    pub span: Span,
}
