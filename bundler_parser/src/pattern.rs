//! Binding pattern parsing: the left-hand side of `var`/`let`/`const`
//! declarators, function parameters, and destructuring assignment targets.

use bundler_ast::literal::{NumberLit, StrLit};
use bundler_ast::{
    ArrayPattern, AssignPattern, Ident, IdentContext, ObjectPattern, ObjectPatternProp, Pattern,
    PropertyKey, RestPattern, Span,
};
use bundler_lexer::{Punctuator, TokenKind};

use crate::error::ParseError;
use crate::expr::parse_assignment_expr;
use crate::stream::TokenStream;

/// Parses a single binding pattern (array pattern, object pattern, or a
/// plain identifier), tagging any bare identifier with `context`.
pub fn parse_binding_pattern(
    stream: &mut TokenStream,
    context: IdentContext,
) -> Result<Pattern, ParseError> {
    if stream.is_punct(Punctuator::OpenBracket) {
        return parse_array_pattern(stream, context);
    }
    if stream.is_punct(Punctuator::OpenBrace) {
        return parse_object_pattern(stream, context);
    }
    let (name, span) = stream.expect_binding_name()?;
    Ok(Pattern::Ident(Ident::new(name, span, context)))
}

/// Parses a pattern, then wraps it in `Pattern::Assign` if followed by `= default`.
pub fn parse_binding_element(
    stream: &mut TokenStream,
    context: IdentContext,
) -> Result<Pattern, ParseError> {
    let target = parse_binding_pattern(stream, context)?;
    if stream.eat_punct(Punctuator::Assign) {
        let default = parse_assignment_expr(stream)?;
        let span = target.span().cover(default.span());
        return Ok(Pattern::Assign(AssignPattern {
            target: Box::new(target),
            default: Box::new(default),
            span,
        }));
    }
    Ok(target)
}

fn parse_array_pattern(
    stream: &mut TokenStream,
    context: IdentContext,
) -> Result<Pattern, ParseError> {
    let start = stream.expect_punct(Punctuator::OpenBracket)?.start();
    let mut elements = Vec::new();
    while !stream.is_punct(Punctuator::CloseBracket) {
        if stream.eat_punct(Punctuator::Comma) {
            elements.push(None);
            continue;
        }
        if stream.is_punct(Punctuator::Spread) {
            let rest_start = stream.bump().span.start();
            let inner = parse_binding_pattern(stream, context)?;
            let span = Span::new(rest_start, inner.span().end());
            elements.push(Some(Pattern::Rest(RestPattern { argument: Box::new(inner), span })));
            break;
        }
        elements.push(Some(parse_binding_element(stream, context)?));
        if !stream.is_punct(Punctuator::CloseBracket) {
            stream.expect_punct(Punctuator::Comma)?;
        }
    }
    let end = stream.expect_punct(Punctuator::CloseBracket)?.end();
    Ok(Pattern::Array(ArrayPattern { elements, span: Span::new(start, end) }))
}

fn parse_object_pattern(
    stream: &mut TokenStream,
    context: IdentContext,
) -> Result<Pattern, ParseError> {
    let start = stream.expect_punct(Punctuator::OpenBrace)?.start();
    let mut props = Vec::new();
    while !stream.is_punct(Punctuator::CloseBrace) {
        if stream.is_punct(Punctuator::Spread) {
            let rest_start = stream.bump().span.start();
            let inner = parse_binding_pattern(stream, context)?;
            let span = Span::new(rest_start, inner.span().end());
            props.push(ObjectPatternProp::Rest(Box::new(Pattern::Rest(RestPattern {
                argument: Box::new(inner),
                span,
            }))));
        } else {
            let (key, computed) = parse_property_key(stream)?;
            if stream.eat_punct(Punctuator::Colon) {
                let value = parse_binding_element(stream, context)?;
                props.push(ObjectPatternProp::KeyValue { key, value: Box::new(value), computed });
            } else {
                let ident = match &key {
                    PropertyKey::Ident(i) => Ident::new(i.name.clone(), i.span, context),
                    _ => {
                        return Err(ParseError::UnexpectedToken {
                            found: "computed or literal property key".to_owned(),
                            expected: "shorthand identifier".to_owned(),
                            at: stream.pos(),
                        })
                    }
                };
                let default = if stream.eat_punct(Punctuator::Assign) {
                    Some(Box::new(parse_assignment_expr(stream)?))
                } else {
                    None
                };
                props.push(ObjectPatternProp::Shorthand { ident, default });
            }
        }
        if !stream.is_punct(Punctuator::CloseBrace) {
            stream.expect_punct(Punctuator::Comma)?;
        }
    }
    let end = stream.expect_punct(Punctuator::CloseBrace)?.end();
    Ok(Pattern::Object(ObjectPattern { props, span: Span::new(start, end) }))
}

/// Parses a property key shared by object literals and object patterns.
/// The identifier form is tagged `IdentContext::ObjectKey` when non-computed
/// so the transformer's scope-aware rewriting skips it as a free reference.
pub fn parse_property_key(stream: &mut TokenStream) -> Result<(PropertyKey, bool), ParseError> {
    if stream.eat_punct(Punctuator::OpenBracket) {
        let expr = parse_assignment_expr(stream)?;
        stream.expect_punct(Punctuator::CloseBracket)?;
        return Ok((PropertyKey::Computed(Box::new(expr)), true));
    }
    match stream.peek().kind.clone() {
        TokenKind::Str(payload) => {
            let span = stream.bump().span;
            Ok((PropertyKey::Str(StrLit { value: payload.value, raw: payload.raw, span }), false))
        }
        TokenKind::Number(raw) => {
            let span = stream.bump().span;
            Ok((PropertyKey::Number(NumberLit { raw, span }), false))
        }
        _ => {
            let (name, span) = stream.expect_binding_name()?;
            Ok((PropertyKey::Ident(Ident::new(name, span, IdentContext::ObjectKey)), false))
        }
    }
}
