//! **`bundler_ast`** defines the syntax tree the bundler's parser produces.
//!
//! # Crate overview
//!
//! This crate is the bundler's analogue of `boa_ast`: it holds node
//! definitions only, no parsing or lowering logic. It differs from its
//! teacher in one structural way the bundler's job demands: every span is a
//! raw byte offset (see [`span::Span`]) rather than a line/column
//! [`Position`], because the transformer (`bundler_transform`) needs to
//! splice bytes directly, and in one semantic way: import/export syntax is
//! flattened into plain records ([`declaration::ImportSite`],
//! [`declaration::NamedExportRecord`], …) by the parser itself, rather than
//! kept as declaration-shaped parse nodes, because every downstream stage
//! only ever queries "what does this module import/export", never the
//! declaration's grammar.
//!
//! # Module map
//! - [`span`] — byte-offset spans.
//! - [`ident`] — identifier occurrences and their parent-context tag.
//! - [`literal`] — number/string/regex/template literals.
//! - [`pattern`] — destructuring and binding patterns.
//! - [`function`] — functions, arrow functions, classes.
//! - [`expression`] — the expression grammar.
//! - [`statement`] — the statement grammar.
//! - [`declaration`] — flattened import/export records.
//! - [`module`] — the parsed-module root, [`module::Program`].

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]

pub mod declaration;
pub mod expression;
pub mod function;
pub mod ident;
pub mod literal;
pub mod module;
pub mod pattern;
pub mod span;
pub mod statement;

pub use declaration::{
    DefaultExportKind, DefaultExportRecord, DynamicImportSite, ImportSite, ImportSpecifierRecord,
    ImportedBinding, ImportedName, NamedExportRecord, NamespaceReexport,
};
pub use expression::Expr;
pub use function::{ArrowFunction, Class, ClassMember, Function};
pub use ident::{Ident, IdentContext};
pub use module::{DefaultExportNode, Program};
pub use pattern::Pattern;
pub use span::{ByteOffset, Span};
pub use statement::{Block, Stmt, VarDecl, VarKind};
