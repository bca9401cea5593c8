//! Identifier nodes and the parent-context tag used by the transformer's
//! scope-aware rewriting pass.

use crate::span::Span;

/// The syntactic role an identifier occurrence plays in its immediate parent,
/// decided once by the parser at construction time rather than re-derived by
/// a later traversal. This is the "ancestor stack threaded through traversal"
/// technique, collapsed to a single field since the parser always knows the
/// context an identifier is being built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentContext {
    /// Ordinary expression position; a candidate for free-reference rewriting.
    Free,
    /// The key of a non-computed object-literal or object-pattern property.
    ObjectKey,
    /// The property of a non-computed member expression (`obj.prop`).
    MemberProperty,
    /// The binding name introduced by a variable declarator or destructuring pattern.
    DeclaratorBinding,
    /// A function or class declaration/expression's own name.
    OwnName,
    /// A function or arrow parameter's binding name.
    Parameter,
    /// A label definition, or the target of `break`/`continue`.
    Label,
}

impl IdentContext {
    /// Whether an identifier in this context is a candidate for free-reference rewriting.
    #[must_use]
    pub const fn is_free_reference(self) -> bool {
        matches!(self, Self::Free)
    }
}

/// A single identifier occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: Box<str>,
    pub span: Span,
    pub context: IdentContext,
}

impl Ident {
    #[must_use]
    pub fn new(name: impl Into<Box<str>>, span: Span, context: IdentContext) -> Self {
        Self { name: name.into(), span, context }
    }

    /// Convenience constructor for a free-reference identifier.
    #[must_use]
    pub fn free(name: impl Into<Box<str>>, span: Span) -> Self {
        Self::new(name, span, IdentContext::Free)
    }
}
