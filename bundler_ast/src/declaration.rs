//! The flattened import/export records a parsed module exposes to the rest
//! of the pipeline.
//!
//! These are not raw AST nodes (an `ImportDeclaration` parse node, an
//! `ExportNamedDeclaration` parse node, …) the way `boa_ast::declaration`
//! represents them; the parser flattens those shapes into the records below
//! immediately, because every later stage — the graph builder, the chunk
//! planner, the transformer — only ever needs "what is imported from where"
//! and "what byte range does this export statement occupy", never the
//! declaration's own grammar shape.

use std::path::PathBuf;

use crate::span::Span;

/// What an import specifier binds: a named export, the `default` export, or
/// the whole module namespace (`import * as ns`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedName {
    Named(Box<str>),
    Default,
    Namespace,
}

/// One `{local_name, imported_name}` pair inside an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifierRecord {
    pub local_name: Box<str>,
    pub imported_name: ImportedName,
}

/// A single import site: a literal `import` declaration, or a synthesized
/// stand-in for a `export … from "…"` re-export, treated as import-plus-define
/// so graph traversal reaches the source module.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSite {
    pub specifier: Box<str>,
    pub resolved_absolute_path: Option<PathBuf>,
    pub span: Span,
    pub specifiers: Vec<ImportSpecifierRecord>,
    pub synthesized_from_reexport: bool,
}

/// Whether a default export's right-hand side is a declaration (named
/// function/class, kept in place) or a bare expression (lifted into a
/// synthesized binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultExportKind {
    Declaration,
    Expression,
}

/// The module's default export, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultExportRecord {
    pub kind: DefaultExportKind,
    pub span: Span,
    /// The declared identifier, when the default is a named function/class.
    pub inner_name: Option<Box<str>>,
}

/// One named export. `statement_range` is deduplicated across all records
/// sharing one `export { ... }` statement so the statement is deleted
/// exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedExportRecord {
    pub local_name: Box<str>,
    pub exported_name: Box<str>,
    pub declaration_range: Option<Span>,
    pub statement_range: Span,
    pub reexport_source: Option<Box<str>>,
}

/// A dynamic `import(...)` call site.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicImportSite {
    /// `None` when the argument isn't a string literal (non-static; left untouched).
    pub specifier: Option<Box<str>>,
    pub resolved_absolute_path: Option<PathBuf>,
    pub span: Span,
}

/// The origin of a local binding introduced by an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedBinding {
    pub module_specifier: Box<str>,
    pub imported_name: ImportedName,
}

/// `export * from "./m.js"` or `export * as ns from "./m.js"` — a whole-namespace
/// re-export, kept apart from [`NamedExportRecord`] because it has no fixed
/// local name to key a getter on; the transformer instead spreads (or binds
/// under `ns`) the referenced module's entire namespace object.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceReexport {
    /// `Some(ns)` for `export * as ns from "..."`; `None` for bare `export * from "..."`.
    pub exported_name: Option<Box<str>>,
    pub module_specifier: Box<str>,
    pub statement_range: Span,
}
