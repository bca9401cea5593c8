//! Binding patterns: the left-hand side of a variable declarator, a function
//! parameter, or a destructuring assignment target.

use crate::expression::Expr;
use crate::ident::Ident;
use crate::literal::{NumberLit, StrLit};
use crate::span::Span;

/// A property key shared by object literals and object patterns.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Ident(Ident),
    Str(StrLit),
    Number(NumberLit),
    Computed(Box<Expr>),
}

impl PropertyKey {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Ident(i) => i.span,
            Self::Str(s) => s.span,
            Self::Number(n) => n.span,
            Self::Computed(e) => e.span(),
        }
    }
}

/// A destructuring or binding pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// A plain binding name (`let x`, a simple parameter, …).
    Ident(Ident),
    /// `[a, , b]`. A `None` element is an elision.
    Array(ArrayPattern),
    /// `{a, b: c}`.
    Object(ObjectPattern),
    /// `pattern = default`.
    Assign(AssignPattern),
    /// `...rest`.
    Rest(RestPattern),
}

impl Pattern {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Ident(i) => i.span,
            Self::Array(a) => a.span,
            Self::Object(o) => o.span,
            Self::Assign(a) => a.span,
            Self::Rest(r) => r.span,
        }
    }

    /// Every binding identifier introduced by this pattern, in declaration order.
    pub fn binding_idents(&self) -> Vec<&Ident> {
        let mut out = Vec::new();
        self.collect_binding_idents(&mut out);
        out
    }

    fn collect_binding_idents<'a>(&'a self, out: &mut Vec<&'a Ident>) {
        match self {
            Self::Ident(i) => out.push(i),
            Self::Array(a) => {
                for el in a.elements.iter().flatten() {
                    el.collect_binding_idents(out);
                }
            }
            Self::Object(o) => {
                for prop in &o.props {
                    match prop {
                        ObjectPatternProp::KeyValue { value, .. } => value.collect_binding_idents(out),
                        ObjectPatternProp::Shorthand { ident, .. } => out.push(ident),
                        ObjectPatternProp::Rest(r) => r.collect_binding_idents(out),
                    }
                }
            }
            Self::Assign(a) => a.target.collect_binding_idents(out),
            Self::Rest(r) => r.argument.collect_binding_idents(out),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    pub elements: Vec<Option<Pattern>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProp {
    /// `{ key: value }`, where `value` is itself a pattern.
    KeyValue { key: PropertyKey, value: Box<Pattern>, computed: bool },
    /// `{ name }`, shorthand for `{ name: name }`.
    Shorthand { ident: Ident, default: Option<Box<Expr>> },
    /// `{ ...rest }`.
    Rest(Box<Pattern>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub props: Vec<ObjectPatternProp>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignPattern {
    pub target: Box<Pattern>,
    pub default: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestPattern {
    pub argument: Box<Pattern>,
    pub span: Span,
}
