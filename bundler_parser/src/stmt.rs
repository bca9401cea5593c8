//! Statement parsing, shared by the module top level (via `module.rs`) and
//! by function/block bodies.

use bundler_ast::statement::{
    CatchClause, DoWhileStmt, ForEachKind, ForEachStmt, ForInit, ForStmt, IfStmt, LabeledStmt,
    SwitchCase, SwitchStmt, TryStmt, WhileStmt,
};
use bundler_ast::{
    Block, Ident, IdentContext, Pattern, Span, Stmt, VarDecl, VarDeclarator, VarKind,
};
use bundler_lexer::{Keyword, Punctuator, TokenKind};

use crate::error::ParseError;
use crate::expr::{parse_assignment_expr, parse_expr};
use crate::function::{parse_class_tail, parse_function_decl};
use crate::pattern::parse_binding_pattern;
use crate::stream::TokenStream;

/// Parses a brace-delimited statement list, the body shared by functions,
/// `if`/`for`/`while` blocks, `try` clauses, and class static blocks.
pub fn parse_block(stream: &mut TokenStream) -> Result<Block, ParseError> {
    let start = stream.expect_punct(Punctuator::OpenBrace)?.start();
    let mut stmts = Vec::new();
    while !stream.is_punct(Punctuator::CloseBrace) {
        stmts.push(parse_stmt(stream)?);
    }
    let end = stream.expect_punct(Punctuator::CloseBrace)?.end();
    Ok(Block { stmts, span: Span::new(start, end) })
}

/// Parses one statement. Import and export declarations are not part of this
/// grammar — the module-level loop in `module.rs` intercepts them before
/// falling back to this function, since they flatten into `Program` records
/// rather than appearing as `Stmt` nodes.
pub fn parse_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    match &stream.peek().kind {
        TokenKind::Punctuator(Punctuator::OpenBrace) => Ok(Stmt::Block(parse_block(stream)?)),
        TokenKind::Punctuator(Punctuator::Semicolon) => {
            let span = stream.bump().span;
            Ok(Stmt::Empty(span))
        }
        TokenKind::Keyword(Keyword::Var | Keyword::Let | Keyword::Const) => {
            let decl = parse_var_decl(stream)?;
            stream.consume_semicolon()?;
            Ok(Stmt::VarDecl(decl))
        }
        TokenKind::Keyword(Keyword::Function) => {
            Ok(Stmt::FunctionDecl(parse_function_decl(stream, false)?))
        }
        TokenKind::Keyword(Keyword::Async)
            if matches!(&stream.peek_at(1).kind, TokenKind::Keyword(Keyword::Function)) =>
        {
            stream.bump();
            Ok(Stmt::FunctionDecl(parse_function_decl(stream, true)?))
        }
        TokenKind::Keyword(Keyword::Class) => Ok(Stmt::ClassDecl(parse_class_tail(stream)?)),
        TokenKind::Keyword(Keyword::If) => parse_if_stmt(stream),
        TokenKind::Keyword(Keyword::For) => parse_for_stmt(stream),
        TokenKind::Keyword(Keyword::While) => parse_while_stmt(stream),
        TokenKind::Keyword(Keyword::Do) => parse_do_while_stmt(stream),
        TokenKind::Keyword(Keyword::Switch) => parse_switch_stmt(stream),
        TokenKind::Keyword(Keyword::Try) => parse_try_stmt(stream),
        TokenKind::Keyword(Keyword::Return) => parse_return_stmt(stream),
        TokenKind::Keyword(Keyword::Throw) => parse_throw_stmt(stream),
        TokenKind::Keyword(Keyword::Break) => parse_break_stmt(stream),
        TokenKind::Keyword(Keyword::Continue) => parse_continue_stmt(stream),
        TokenKind::Ident(_)
            if matches!(&stream.peek_at(1).kind, TokenKind::Punctuator(Punctuator::Colon)) =>
        {
            parse_labeled_stmt(stream)
        }
        _ => {
            let start = stream.pos();
            let expr = parse_expr(stream)?;
            let end = stream.prev_end();
            stream.consume_semicolon()?;
            Ok(Stmt::Expr(expr, Span::new(start, end)))
        }
    }
}

/// Parses a `var`/`let`/`const` declaration, not consuming the trailing
/// semicolon (the caller decides: an ordinary statement wants ASI, a `for`
/// head wants an explicit `;`).
pub fn parse_var_decl(stream: &mut TokenStream) -> Result<VarDecl, ParseError> {
    let (kind, start) = if stream.is_kw(Keyword::Var) {
        (VarKind::Var, stream.bump().span.start())
    } else if stream.is_kw(Keyword::Let) {
        (VarKind::Let, stream.bump().span.start())
    } else {
        (VarKind::Const, stream.expect_kw(Keyword::Const)?.start())
    };
    let mut declarators = vec![parse_declarator(stream)?];
    while stream.eat_punct(Punctuator::Comma) {
        declarators.push(parse_declarator(stream)?);
    }
    let end = stream.prev_end();
    Ok(VarDecl { kind, declarators, span: Span::new(start, end) })
}

fn parse_declarator(stream: &mut TokenStream) -> Result<VarDeclarator, ParseError> {
    let binding = parse_binding_pattern(stream, IdentContext::DeclaratorBinding)?;
    let start = binding.span().start();
    let init = if stream.eat_punct(Punctuator::Assign) {
        Some(parse_assignment_expr(stream)?)
    } else {
        None
    };
    let end = init.as_ref().map_or(stream.prev_end(), |e| e.span().end());
    Ok(VarDeclarator { binding, init, span: Span::new(start, end) })
}

fn parse_if_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::If)?.start();
    stream.expect_punct(Punctuator::OpenParen)?;
    let test = parse_expr(stream)?;
    stream.expect_punct(Punctuator::CloseParen)?;
    let consequent = Box::new(parse_stmt(stream)?);
    let alternate = if stream.eat_kw(Keyword::Else) {
        Some(Box::new(parse_stmt(stream)?))
    } else {
        None
    };
    let end = alternate.as_ref().map_or(consequent.span().end(), |a| a.span().end());
    Ok(Stmt::If(IfStmt { test, consequent, alternate, span: Span::new(start, end) }))
}

fn parse_while_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::While)?.start();
    stream.expect_punct(Punctuator::OpenParen)?;
    let test = parse_expr(stream)?;
    stream.expect_punct(Punctuator::CloseParen)?;
    let body = Box::new(parse_stmt(stream)?);
    let end = body.span().end();
    Ok(Stmt::While(WhileStmt { test, body, span: Span::new(start, end) }))
}

fn parse_do_while_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::Do)?.start();
    let body = Box::new(parse_stmt(stream)?);
    stream.expect_kw(Keyword::While)?;
    stream.expect_punct(Punctuator::OpenParen)?;
    let test = parse_expr(stream)?;
    stream.expect_punct(Punctuator::CloseParen)?;
    let end = stream.prev_end();
    stream.consume_semicolon()?;
    Ok(Stmt::DoWhile(DoWhileStmt { body, test, span: Span::new(start, end) }))
}

fn parse_switch_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::Switch)?.start();
    stream.expect_punct(Punctuator::OpenParen)?;
    let discriminant = parse_expr(stream)?;
    stream.expect_punct(Punctuator::CloseParen)?;
    stream.expect_punct(Punctuator::OpenBrace)?;
    let mut cases = Vec::new();
    while !stream.is_punct(Punctuator::CloseBrace) {
        let case_start = stream.pos();
        let test = if stream.eat_kw(Keyword::Case) {
            let t = parse_expr(stream)?;
            stream.expect_punct(Punctuator::Colon)?;
            Some(t)
        } else {
            stream.expect_kw(Keyword::Default)?;
            stream.expect_punct(Punctuator::Colon)?;
            None
        };
        let mut consequent = Vec::new();
        while !stream.is_punct(Punctuator::CloseBrace)
            && !stream.is_kw(Keyword::Case)
            && !stream.is_kw(Keyword::Default)
        {
            consequent.push(parse_stmt(stream)?);
        }
        let case_end = stream.prev_end();
        cases.push(SwitchCase { test, consequent, span: Span::new(case_start, case_end) });
    }
    let end = stream.expect_punct(Punctuator::CloseBrace)?.end();
    Ok(Stmt::Switch(SwitchStmt { discriminant, cases, span: Span::new(start, end) }))
}

fn parse_try_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::Try)?.start();
    let block = parse_block(stream)?;
    let handler = if stream.eat_kw(Keyword::Catch) {
        let catch_start = stream.prev_end();
        let param = if stream.eat_punct(Punctuator::OpenParen) {
            let p = parse_binding_pattern(stream, IdentContext::DeclaratorBinding)?;
            stream.expect_punct(Punctuator::CloseParen)?;
            Some(p)
        } else {
            None
        };
        let body = parse_block(stream)?;
        Some(CatchClause { param, span: Span::new(catch_start, body.span.end()), body })
    } else {
        None
    };
    let finalizer = if stream.eat_kw(Keyword::Finally) { Some(parse_block(stream)?) } else { None };
    let end = finalizer
        .as_ref()
        .map(|f| f.span.end())
        .or_else(|| handler.as_ref().map(|h| h.span.end()))
        .unwrap_or(block.span.end());
    Ok(Stmt::Try(TryStmt { block, handler, finalizer, span: Span::new(start, end) }))
}

fn parse_return_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::Return)?.start();
    let can_have_argument = !stream.peek().preceded_by_newline
        && !stream.is_punct(Punctuator::Semicolon)
        && !stream.is_punct(Punctuator::CloseBrace)
        && !stream.is_eof();
    let argument = if can_have_argument { Some(parse_expr(stream)?) } else { None };
    let end = stream.prev_end();
    stream.consume_semicolon()?;
    Ok(Stmt::Return(argument, Span::new(start, end)))
}

fn parse_throw_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::Throw)?.start();
    let argument = parse_expr(stream)?;
    let end = argument.span().end();
    stream.consume_semicolon()?;
    Ok(Stmt::Throw(argument, Span::new(start, end)))
}

fn parse_break_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::Break)?.start();
    let label = parse_optional_label(stream)?;
    let end = stream.prev_end();
    stream.consume_semicolon()?;
    Ok(Stmt::Break(label, Span::new(start, end)))
}

fn parse_continue_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::Continue)?.start();
    let label = parse_optional_label(stream)?;
    let end = stream.prev_end();
    stream.consume_semicolon()?;
    Ok(Stmt::Continue(label, Span::new(start, end)))
}

fn parse_optional_label(stream: &mut TokenStream) -> Result<Option<Ident>, ParseError> {
    if !stream.peek().preceded_by_newline && stream.is_ident() {
        let (name, span) = stream.expect_ident()?;
        return Ok(Some(Ident::new(name, span, IdentContext::Label)));
    }
    Ok(None)
}

fn parse_labeled_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let (name, span) = stream.expect_ident()?;
    let label = Ident::new(name, span, IdentContext::Label);
    stream.expect_punct(Punctuator::Colon)?;
    let body = Box::new(parse_stmt(stream)?);
    let end = body.span().end();
    Ok(Stmt::Labeled(LabeledStmt { label, body, span: Span::new(span.start(), end) }))
}

fn parse_for_stmt(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.expect_kw(Keyword::For)?.start();
    stream.expect_punct(Punctuator::OpenParen)?;

    if stream.is_punct(Punctuator::Semicolon) {
        stream.bump();
        return parse_for_tail(stream, start, None);
    }

    if stream.is_kw(Keyword::Var) || stream.is_kw(Keyword::Let) || stream.is_kw(Keyword::Const) {
        let kind = if stream.is_kw(Keyword::Var) {
            VarKind::Var
        } else if stream.is_kw(Keyword::Let) {
            VarKind::Let
        } else {
            VarKind::Const
        };
        let kind_start = stream.bump().span.start();
        let binding = parse_binding_pattern(stream, IdentContext::DeclaratorBinding)?;

        if let Some((kind_each, right)) = try_parse_for_each_tail(stream)? {
            let decl_span = Span::new(kind_start, binding.span().end());
            let left = ForInit::VarDecl(VarDecl {
                kind,
                declarators: vec![VarDeclarator { binding, init: None, span: decl_span }],
                span: decl_span,
            });
            return finish_for_each(stream, start, kind_each, left, right);
        }

        let first_init =
            if stream.eat_punct(Punctuator::Assign) { Some(parse_assignment_expr(stream)?) } else { None };
        let first_span = Span::new(
            kind_start,
            first_init.as_ref().map_or(binding.span().end(), |e| e.span().end()),
        );
        let mut declarators = vec![VarDeclarator { binding, init: first_init, span: first_span }];
        while stream.eat_punct(Punctuator::Comma) {
            declarators.push(parse_declarator(stream)?);
        }
        let decl_span = Span::new(kind_start, stream.prev_end());
        stream.expect_punct(Punctuator::Semicolon)?;
        return parse_for_tail(
            stream,
            start,
            Some(ForInit::VarDecl(VarDecl { kind, declarators, span: decl_span })),
        );
    }

    let expr = parse_expr(stream)?;
    if let Some((kind_each, right)) = try_parse_for_each_tail(stream)? {
        return finish_for_each(stream, start, kind_each, ForInit::Expr(expr), right);
    }
    stream.expect_punct(Punctuator::Semicolon)?;
    parse_for_tail(stream, start, Some(ForInit::Expr(expr)))
}

fn try_parse_for_each_tail(
    stream: &mut TokenStream,
) -> Result<Option<(ForEachKind, bundler_ast::Expr)>, ParseError> {
    if stream.eat_kw(Keyword::In) {
        let right = parse_expr(stream)?;
        return Ok(Some((ForEachKind::In, right)));
    }
    if stream.eat_kw(Keyword::Of) {
        let right = parse_assignment_expr(stream)?;
        return Ok(Some((ForEachKind::Of, right)));
    }
    Ok(None)
}

fn finish_for_each(
    stream: &mut TokenStream,
    start: bundler_ast::ByteOffset,
    kind: ForEachKind,
    left: ForInit,
    right: bundler_ast::Expr,
) -> Result<Stmt, ParseError> {
    stream.expect_punct(Punctuator::CloseParen)?;
    let body = Box::new(parse_stmt(stream)?);
    let end = body.span().end();
    Ok(Stmt::ForEach(ForEachStmt { kind, left, right, body, span: Span::new(start, end) }))
}

fn parse_for_tail(
    stream: &mut TokenStream,
    start: bundler_ast::ByteOffset,
    init: Option<ForInit>,
) -> Result<Stmt, ParseError> {
    let test = if stream.is_punct(Punctuator::Semicolon) { None } else { Some(parse_expr(stream)?) };
    stream.expect_punct(Punctuator::Semicolon)?;
    let update = if stream.is_punct(Punctuator::CloseParen) { None } else { Some(parse_expr(stream)?) };
    stream.expect_punct(Punctuator::CloseParen)?;
    let body = Box::new(parse_stmt(stream)?);
    let end = body.span().end();
    Ok(Stmt::For(ForStmt { init, test, update, body, span: Span::new(start, end) }))
}
