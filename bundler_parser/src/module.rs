//! Module-level parsing: the loop that recognizes `import`/`export` at the
//! top of the token stream and flattens them into `Program`'s records,
//! falling back to the ordinary statement grammar (`stmt.rs`) for everything
//! else.

use bundler_ast::declaration::{
    DefaultExportKind, DefaultExportRecord, ImportSpecifierRecord, ImportedBinding, ImportedName,
    NamedExportRecord, NamespaceReexport,
};
use bundler_ast::{DefaultExportNode, Ident, IdentContext, ImportSite, Program, Span, Stmt};
use bundler_lexer::{Keyword, Punctuator, TokenKind};
use indexmap::IndexMap;

use crate::error::ParseError;
use crate::expr::parse_assignment_expr;
use crate::function::{parse_class_tail, parse_function_decl};
use crate::stmt::parse_stmt;
use crate::stream::TokenStream;
use crate::walk::collect_dynamic_imports;

/// Parses one module's entire source text into a [`Program`].
pub fn parse_module(source: &str) -> Result<Program, ParseError> {
    let tokens = bundler_lexer::tokenize(source)?;
    let mut stream = TokenStream::new(tokens);

    let mut imports = Vec::new();
    let mut named_exports = Vec::new();
    let mut namespace_reexports = Vec::new();
    let mut default_export = None;
    let mut default_export_node = None;
    let mut imported_bindings: IndexMap<Box<str>, ImportedBinding> = IndexMap::new();
    let mut body = Vec::new();

    while !stream.is_eof() {
        if stream.is_kw(Keyword::Import) && !peeks_like_dynamic_import(&stream) {
            let site = parse_import_declaration(&mut stream)?;
            register_bindings(&mut imported_bindings, &site)?;
            imports.push(site);
            continue;
        }
        if stream.is_kw(Keyword::Export) {
            parse_export(
                &mut stream,
                &mut imports,
                &mut named_exports,
                &mut namespace_reexports,
                &mut default_export,
                &mut default_export_node,
                &mut body,
            )?;
            continue;
        }
        body.push(parse_stmt(&mut stream)?);
    }

    let dynamic_imports = collect_dynamic_imports(&body, default_export_node.as_ref());

    Ok(Program {
        source: source.into(),
        imports,
        named_exports,
        namespace_reexports,
        default_export,
        default_export_node,
        dynamic_imports,
        imported_bindings,
        body,
        span: Span::new(0, source.len() as u32),
    })
}

/// `import` is also the keyword for a dynamic `import(...)` call expression;
/// the module-level loop only intercepts the declaration form, so anything
/// that reads `import (` (a call) must fall through to the statement parser.
fn peeks_like_dynamic_import(stream: &TokenStream) -> bool {
    matches!(&stream.peek_at(1).kind, TokenKind::Punctuator(Punctuator::OpenParen))
}

fn register_bindings(
    table: &mut IndexMap<Box<str>, ImportedBinding>,
    site: &ImportSite,
) -> Result<(), ParseError> {
    for spec in &site.specifiers {
        if table.contains_key(&spec.local_name) {
            return Err(ParseError::DuplicateBinding {
                name: spec.local_name.clone(),
                at: site.span.start(),
            });
        }
        table.insert(
            spec.local_name.clone(),
            ImportedBinding {
                module_specifier: site.specifier.clone(),
                imported_name: spec.imported_name.clone(),
            },
        );
    }
    Ok(())
}

fn parse_string_literal(stream: &mut TokenStream) -> Result<Box<str>, ParseError> {
    match stream.peek().kind.clone() {
        TokenKind::Str(payload) => {
            stream.bump();
            Ok(payload.value)
        }
        other => Err(ParseError::UnexpectedToken {
            found: format!("{other:?}"),
            expected: "string literal".to_owned(),
            at: stream.pos(),
        }),
    }
}

/// Parses `import ...;` starting at the `import` keyword, in every specifier
/// combination the grammar allows: side-effect only, default only,
/// namespace only, named only, and default combined with either namespace or
/// named.
fn parse_import_declaration(stream: &mut TokenStream) -> Result<ImportSite, ParseError> {
    let start = stream.expect_kw(Keyword::Import)?.start();

    if let TokenKind::Str(_) = &stream.peek().kind {
        let specifier = parse_string_literal(stream)?;
        let end = stream.prev_end();
        stream.consume_semicolon()?;
        return Ok(ImportSite {
            specifier,
            resolved_absolute_path: None,
            span: Span::new(start, end),
            specifiers: Vec::new(),
            synthesized_from_reexport: false,
        });
    }

    let mut specifiers = Vec::new();

    if stream.is_ident() {
        let (name, _) = stream.expect_ident()?;
        specifiers.push(ImportSpecifierRecord { local_name: name, imported_name: ImportedName::Default });
        if !stream.is_kw(Keyword::From) {
            stream.expect_punct(Punctuator::Comma)?;
        }
    }

    if stream.eat_punct(Punctuator::Mul) {
        stream.expect_kw(Keyword::As)?;
        let (name, _) = stream.expect_binding_name()?;
        specifiers.push(ImportSpecifierRecord { local_name: name, imported_name: ImportedName::Namespace });
    } else if stream.eat_punct(Punctuator::OpenBrace) {
        while !stream.is_punct(Punctuator::CloseBrace) {
            let (imported, _) = stream.expect_binding_name()?;
            let local = if stream.eat_kw(Keyword::As) {
                stream.expect_binding_name()?.0
            } else {
                imported.clone()
            };
            specifiers.push(ImportSpecifierRecord {
                local_name: local,
                imported_name: ImportedName::Named(imported),
            });
            if !stream.is_punct(Punctuator::CloseBrace) {
                stream.expect_punct(Punctuator::Comma)?;
            }
        }
        stream.expect_punct(Punctuator::CloseBrace)?;
    }

    stream.expect_kw(Keyword::From)?;
    let specifier = parse_string_literal(stream)?;
    let end = stream.prev_end();
    stream.consume_semicolon()?;

    Ok(ImportSite {
        specifier,
        resolved_absolute_path: None,
        span: Span::new(start, end),
        specifiers,
        synthesized_from_reexport: false,
    })
}

/// Parses an `export ...;` form, dispatching on what follows the keyword and
/// threading results into the caller's accumulators (this function has many
/// parameters because it is the single seam where every export shape is
/// told where its flattened record belongs — splitting it further would
/// just relocate the same threading into a struct).
#[allow(clippy::too_many_arguments)]
fn parse_export(
    stream: &mut TokenStream,
    imports: &mut Vec<ImportSite>,
    named_exports: &mut Vec<NamedExportRecord>,
    namespace_reexports: &mut Vec<NamespaceReexport>,
    default_export: &mut Option<DefaultExportRecord>,
    default_export_node: &mut Option<DefaultExportNode>,
    body: &mut Vec<Stmt>,
) -> Result<(), ParseError> {
    let start = stream.expect_kw(Keyword::Export)?.start();

    if stream.eat_kw(Keyword::Default) {
        parse_export_default(stream, start, default_export, default_export_node)?;
        return Ok(());
    }

    if stream.eat_punct(Punctuator::Mul) {
        let exported_name = if stream.eat_kw(Keyword::As) {
            Some(stream.expect_binding_name()?.0)
        } else {
            None
        };
        stream.expect_kw(Keyword::From)?;
        let module_specifier = parse_string_literal(stream)?;
        let end = stream.prev_end();
        stream.consume_semicolon()?;
        let statement_range = Span::new(start, end);
        imports.push(ImportSite {
            specifier: module_specifier.clone(),
            resolved_absolute_path: None,
            span: statement_range,
            specifiers: Vec::new(),
            synthesized_from_reexport: true,
        });
        namespace_reexports.push(NamespaceReexport { exported_name, module_specifier, statement_range });
        return Ok(());
    }

    if stream.eat_punct(Punctuator::OpenBrace) {
        let mut entries = Vec::new();
        while !stream.is_punct(Punctuator::CloseBrace) {
            let (local, _) = stream.expect_binding_name()?;
            let exported = if stream.eat_kw(Keyword::As) {
                stream.expect_binding_name()?.0
            } else {
                local.clone()
            };
            entries.push((local, exported));
            if !stream.is_punct(Punctuator::CloseBrace) {
                stream.expect_punct(Punctuator::Comma)?;
            }
        }
        stream.expect_punct(Punctuator::CloseBrace)?;

        let reexport_source = if stream.eat_kw(Keyword::From) {
            Some(parse_string_literal(stream)?)
        } else {
            None
        };
        let end = stream.prev_end();
        stream.consume_semicolon()?;
        let statement_range = Span::new(start, end);

        if let Some(source) = &reexport_source {
            imports.push(ImportSite {
                specifier: source.clone(),
                resolved_absolute_path: None,
                span: statement_range,
                specifiers: Vec::new(),
                synthesized_from_reexport: true,
            });
        }

        for (local_name, exported_name) in entries {
            named_exports.push(NamedExportRecord {
                local_name,
                exported_name,
                declaration_range: None,
                statement_range,
                reexport_source: reexport_source.clone(),
            });
        }
        return Ok(());
    }

    parse_export_inline_declaration(stream, start, named_exports, body)
}

fn parse_export_inline_declaration(
    stream: &mut TokenStream,
    start: bundler_ast::ByteOffset,
    named_exports: &mut Vec<NamedExportRecord>,
    body: &mut Vec<Stmt>,
) -> Result<(), ParseError> {
    let decl_start = stream.pos();

    if stream.is_kw(Keyword::Var) || stream.is_kw(Keyword::Let) || stream.is_kw(Keyword::Const) {
        let decl = crate::stmt::parse_var_decl(stream)?;
        stream.consume_semicolon()?;
        let statement_range = Span::new(start, decl.span.end());
        let declaration_range = Some(Span::new(decl_start, decl.span.end()));
        for declarator in &decl.declarators {
            for ident in declarator.binding.binding_idents() {
                named_exports.push(NamedExportRecord {
                    local_name: ident.name.clone(),
                    exported_name: ident.name.clone(),
                    declaration_range,
                    statement_range,
                    reexport_source: None,
                });
            }
        }
        body.push(Stmt::VarDecl(decl));
        return Ok(());
    }

    let is_async = stream.is_kw(Keyword::Async);
    if is_async {
        stream.bump();
    }
    if stream.is_kw(Keyword::Function) {
        let func = parse_function_decl(stream, is_async)?;
        let name = func
            .name
            .clone()
            .expect("export function declarations are always named");
        let statement_range = Span::new(start, func.span.end());
        let declaration_range = Some(Span::new(decl_start, func.span.end()));
        named_exports.push(NamedExportRecord {
            local_name: name.name.clone(),
            exported_name: name.name,
            declaration_range,
            statement_range,
            reexport_source: None,
        });
        body.push(Stmt::FunctionDecl(func));
        return Ok(());
    }

    if stream.is_kw(Keyword::Class) {
        let class = parse_class_tail(stream)?;
        let Some(name) = class.name.clone() else {
            return Err(ParseError::AnonymousClassExport { at: class.span.start() });
        };
        let statement_range = Span::new(start, class.span.end());
        let declaration_range = Some(Span::new(decl_start, class.span.end()));
        named_exports.push(NamedExportRecord {
            local_name: name.name.clone(),
            exported_name: name.name,
            declaration_range,
            statement_range,
            reexport_source: None,
        });
        body.push(Stmt::ClassDecl(class));
        return Ok(());
    }

    Err(ParseError::UnexpectedToken {
        found: format!("{:?}", stream.peek().kind),
        expected: "a declaration after `export`".to_owned(),
        at: stream.pos(),
    })
}

/// Parses `export default ...;`, starting just after the `default` keyword.
fn parse_export_default(
    stream: &mut TokenStream,
    start: bundler_ast::ByteOffset,
    default_export: &mut Option<DefaultExportRecord>,
    default_export_node: &mut Option<DefaultExportNode>,
) -> Result<(), ParseError> {
    let is_async = stream.is_kw(Keyword::Async)
        && matches!(&stream.peek_at(1).kind, TokenKind::Keyword(Keyword::Function));
    if is_async {
        stream.bump();
    }

    if stream.is_kw(Keyword::Function) {
        let start_kw = stream.pos();
        stream.bump();
        let is_generator = stream.eat_punct(Punctuator::Mul);
        let name = if stream.is_ident() {
            let (n, span) = stream.expect_ident()?;
            Some(Ident::new(n, span, IdentContext::OwnName))
        } else {
            None
        };
        let mut func = crate::function::parse_function_tail(stream, name.clone(), is_async, is_generator)?;
        func.span = Span::new(start_kw, func.span.end());
        let end = func.span.end();
        let kind = if name.is_some() { DefaultExportKind::Declaration } else { DefaultExportKind::Expression };
        *default_export = Some(DefaultExportRecord {
            kind,
            span: Span::new(start, end),
            inner_name: name.map(|n| n.name),
        });
        *default_export_node = Some(DefaultExportNode::Function(func));
        return Ok(());
    }

    if stream.is_kw(Keyword::Class) {
        let class = parse_class_tail(stream)?;
        let end = class.span.end();
        let kind = if class.name.is_some() { DefaultExportKind::Declaration } else { DefaultExportKind::Expression };
        *default_export =
            Some(DefaultExportRecord { kind, span: Span::new(start, end), inner_name: class.name.clone().map(|n| n.name) });
        *default_export_node = Some(DefaultExportNode::Class(class));
        return Ok(());
    }

    // Any other default export is a plain expression: `export default 1 + 2;`,
    // `export default (function() {})`, an arrow function, a class
    // expression reached through parentheses, etc.
    let expr = parse_assignment_expr(stream)?;
    let end = expr.span().end();
    stream.consume_semicolon()?;
    *default_export = Some(DefaultExportRecord {
        kind: DefaultExportKind::Expression,
        span: Span::new(start, end),
        inner_name: None,
    });
    *default_export_node = Some(DefaultExportNode::Expr(expr));
    Ok(())
}
