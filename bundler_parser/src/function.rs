//! Function, arrow function, and class parsing.

use bundler_ast::{
    ArrowBody, ArrowFunction, Class, ClassMember, Expr, Function, Ident, IdentContext, MethodKind,
    Pattern, Span,
};
use bundler_lexer::{Keyword, Punctuator, TokenKind};

use crate::error::ParseError;
use crate::expr::parse_assignment_expr;
use crate::pattern::{parse_binding_element, parse_property_key};
use crate::stmt::parse_block;
use crate::stream::TokenStream;

/// Parses the parenthesized parameter list shared by functions, methods, and
/// parenthesized arrow functions.
pub fn parse_params(stream: &mut TokenStream) -> Result<Vec<Pattern>, ParseError> {
    stream.expect_punct(Punctuator::OpenParen)?;
    let mut params = Vec::new();
    while !stream.is_punct(Punctuator::CloseParen) {
        if stream.is_punct(Punctuator::Spread) {
            let start = stream.bump().span.start();
            let inner = crate::pattern::parse_binding_pattern(stream, IdentContext::Parameter)?;
            let span = Span::new(start, inner.span().end());
            params.push(Pattern::Rest(bundler_ast::RestPattern { argument: Box::new(inner), span }));
        } else {
            params.push(parse_binding_element(stream, IdentContext::Parameter)?);
        }
        if !stream.is_punct(Punctuator::CloseParen) {
            stream.expect_punct(Punctuator::Comma)?;
        }
    }
    stream.expect_punct(Punctuator::CloseParen)?;
    Ok(params)
}

/// Parses `(params) { body }`, given the function's name (if any), and
/// `async`/`*` already consumed by the caller. Shared by function
/// declarations, function expressions, object-literal methods, and class
/// methods.
pub fn parse_function_tail(
    stream: &mut TokenStream,
    name: Option<Ident>,
    is_async: bool,
    is_generator: bool,
) -> Result<Function, ParseError> {
    let start = name.as_ref().map_or(stream.pos(), |n| n.span.start());
    let params = parse_params(stream)?;
    let body = parse_block(stream)?;
    let span = Span::new(start, body.span.end());
    Ok(Function { name, params, body, is_async, is_generator, span })
}

/// Parses a `function` declaration or expression, starting at the `function`
/// keyword (with `async` already consumed by the caller, if present).
pub fn parse_function_expr(stream: &mut TokenStream, is_async: bool) -> Result<Expr, ParseError> {
    let start = stream.expect_kw(Keyword::Function)?.start();
    let is_generator = stream.eat_punct(Punctuator::Mul);
    let name = if stream.is_ident() {
        let (n, span) = stream.expect_ident()?;
        Some(Ident::new(n, span, IdentContext::OwnName))
    } else {
        None
    };
    let mut func = parse_function_tail(stream, name, is_async, is_generator)?;
    func.span = Span::new(start, func.span.end());
    Ok(Expr::Function(func))
}

/// Parses a `function` declaration at statement level.
pub fn parse_function_decl(stream: &mut TokenStream, is_async: bool) -> Result<Function, ParseError> {
    let start = stream.expect_kw(Keyword::Function)?.start();
    let is_generator = stream.eat_punct(Punctuator::Mul);
    let (n, span) = stream.expect_ident()?;
    let name = Some(Ident::new(n, span, IdentContext::OwnName));
    let mut func = parse_function_tail(stream, name, is_async, is_generator)?;
    func.span = Span::new(start, func.span.end());
    Ok(func)
}

/// Parses an arrow function, with `async` (if any) already consumed by the
/// caller's lookahead in `expr.rs`.
pub fn parse_arrow_function(stream: &mut TokenStream, is_async: bool) -> Result<Expr, ParseError> {
    let start = stream.pos();
    let params = if stream.is_punct(Punctuator::OpenParen) {
        parse_params(stream)?
    } else {
        vec![crate::pattern::parse_binding_pattern(stream, IdentContext::Parameter)?]
    };
    stream.expect_punct(Punctuator::Arrow)?;
    let body = if stream.is_punct(Punctuator::OpenBrace) {
        ArrowBody::Block(parse_block(stream)?)
    } else {
        ArrowBody::Expr(Box::new(parse_assignment_expr(stream)?))
    };
    let end = match &body {
        ArrowBody::Block(b) => b.span.end(),
        ArrowBody::Expr(e) => e.span().end(),
    };
    Ok(Expr::Arrow(ArrowFunction { params, body, is_async, span: Span::new(start, end) }))
}

/// Parses a class expression, starting at the `class` keyword.
pub fn parse_class_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    Ok(Expr::Class(parse_class_tail(stream)?))
}

/// Parses a class declaration or expression body, starting at `class`.
pub fn parse_class_tail(stream: &mut TokenStream) -> Result<Class, ParseError> {
    let start = stream.expect_kw(Keyword::Class)?.start();
    let name = if stream.is_ident() {
        let (n, span) = stream.expect_ident()?;
        Some(Ident::new(n, span, IdentContext::OwnName))
    } else {
        None
    };
    let super_class = if stream.eat_kw(Keyword::Extends) {
        Some(Box::new(crate::expr::parse_lhs_expr(stream)?))
    } else {
        None
    };
    stream.expect_punct(Punctuator::OpenBrace)?;
    let mut body = Vec::new();
    while !stream.is_punct(Punctuator::CloseBrace) {
        if stream.eat_punct(Punctuator::Semicolon) {
            continue;
        }
        body.push(parse_class_member(stream)?);
    }
    let end = stream.expect_punct(Punctuator::CloseBrace)?.end();
    Ok(Class { name, super_class, body, span: Span::new(start, end) })
}

fn parse_class_member(stream: &mut TokenStream) -> Result<ClassMember, ParseError> {
    let is_static = stream.is_kw(Keyword::Static)
        && !matches!(
            &stream.peek_at(1).kind,
            TokenKind::Punctuator(Punctuator::OpenParen | Punctuator::Assign)
        );
    if is_static {
        stream.bump();
    }
    if is_static && stream.is_punct(Punctuator::OpenBrace) {
        let block = parse_block(stream)?;
        return Ok(ClassMember::StaticBlock(block));
    }

    let is_async = stream.is_kw(Keyword::Async)
        && !matches!(
            &stream.peek_at(1).kind,
            TokenKind::Punctuator(Punctuator::OpenParen | Punctuator::Assign)
        );
    if is_async {
        stream.bump();
    }
    let is_generator = stream.eat_punct(Punctuator::Mul);

    let is_accessor = (stream.is_kw(Keyword::Get) || stream.is_kw(Keyword::Set))
        && !matches!(
            &stream.peek_at(1).kind,
            TokenKind::Punctuator(Punctuator::OpenParen | Punctuator::Assign | Punctuator::Semicolon)
        );
    let accessor_kind = if is_accessor {
        let k = if stream.is_kw(Keyword::Get) { MethodKind::Get } else { MethodKind::Set };
        stream.bump();
        Some(k)
    } else {
        None
    };

    let (key, computed) = parse_property_key(stream)?;

    if stream.is_punct(Punctuator::OpenParen) {
        let kind = accessor_kind.unwrap_or_else(|| {
            if !computed {
                if let bundler_ast::PropertyKey::Ident(i) = &key {
                    if &*i.name == "constructor" && !is_static {
                        return MethodKind::Constructor;
                    }
                }
            }
            MethodKind::Method
        });
        let function = parse_function_tail(stream, None, is_async, is_generator)?;
        return Ok(ClassMember::Method { key, computed, is_static, kind, function });
    }

    let value = if stream.eat_punct(Punctuator::Assign) {
        Some(parse_assignment_expr(stream)?)
    } else {
        None
    };
    let span = key.span();
    stream.consume_semicolon()?;
    Ok(ClassMember::Field { key, computed, is_static, value, span })
}
