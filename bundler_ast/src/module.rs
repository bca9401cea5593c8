//! The parsed-module root node.

use indexmap::IndexMap;

use crate::declaration::{
    DefaultExportRecord, DynamicImportSite, ImportSite, ImportedBinding, NamedExportRecord,
    NamespaceReexport,
};
use crate::expression::Expr;
use crate::function::{Class, Function};
use crate::span::Span;
use crate::statement::Stmt;

/// The right-hand side of a default export, kept as a real node (rather than
/// just a span) so the transformer can walk it for free-reference rewriting
/// the same way it walks every other statement.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultExportNode {
    Function(Function),
    Class(Class),
    Expr(Expr),
}

/// A fully parsed module: the flattened import/export records plus the
/// statement-level AST of everything else, with import/export syntax already
/// peeled away from `body` (an exported declaration still appears in `body`
/// as a plain declaration; import declarations and specifier-form exports do
/// not appear in `body` at all).
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub source: Box<str>,
    pub imports: Vec<ImportSite>,
    pub named_exports: Vec<NamedExportRecord>,
    pub namespace_reexports: Vec<NamespaceReexport>,
    pub default_export: Option<DefaultExportRecord>,
    pub default_export_node: Option<DefaultExportNode>,
    pub dynamic_imports: Vec<DynamicImportSite>,
    pub imported_bindings: IndexMap<Box<str>, ImportedBinding>,
    pub body: Vec<Stmt>,
    pub span: Span,
}
