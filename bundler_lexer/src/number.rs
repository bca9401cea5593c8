//! Numeric literal scanning.
//!
//! The core never evaluates numbers (§3 of the expanded spec — the
//! transformer only ever relocates source bytes), so this scanner's only job
//! is to recognize the full extent of a numeric literal's raw text, not to
//! compute its value. Mirrors the shape of `boa`'s `number.rs` minus the
//! `f64`/`JsBigInt` conversion it performs for evaluation.

use bundler_ast::ByteOffset;

use crate::cursor::Cursor;
use crate::error::LexError;

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Scans a numeric literal. Expects the cursor to be positioned at its first
/// digit (or at `.` immediately followed by a digit).
pub fn scan_number(cursor: &mut Cursor<'_>) -> Result<Box<str>, LexError> {
    let start = cursor.pos();

    if cursor.peek() == Some('0') && matches!(cursor.peek2(), Some('x' | 'X')) {
        cursor.bump();
        cursor.bump();
        cursor.bump_while(|c| c.is_ascii_hexdigit() || c == '_');
        return finish(cursor, start);
    }
    if cursor.peek() == Some('0') && matches!(cursor.peek2(), Some('o' | 'O')) {
        cursor.bump();
        cursor.bump();
        cursor.bump_while(|c| ('0'..='7').contains(&c) || c == '_');
        return finish(cursor, start);
    }
    if cursor.peek() == Some('0') && matches!(cursor.peek2(), Some('b' | 'B')) {
        cursor.bump();
        cursor.bump();
        cursor.bump_while(|c| c == '0' || c == '1' || c == '_');
        return finish(cursor, start);
    }

    cursor.bump_while(|c| is_digit(c) || c == '_');
    if cursor.peek() == Some('.') {
        cursor.bump();
        cursor.bump_while(|c| is_digit(c) || c == '_');
    }
    if matches!(cursor.peek(), Some('e' | 'E')) {
        let exponent_at = cursor.pos();
        cursor.bump();
        if matches!(cursor.peek(), Some('+' | '-')) {
            cursor.bump();
        }
        if cursor.peek().map(is_digit) == Some(true) {
            cursor.bump_while(is_digit);
        } else {
            return Err(LexError::InvalidNumber { at: exponent_at });
        }
    }
    finish(cursor, start)
}

fn finish(cursor: &mut Cursor<'_>, start: ByteOffset) -> Result<Box<str>, LexError> {
    // A trailing `n` marks a BigInt literal; kept verbatim in the raw text.
    cursor.eat('n');
    Ok(cursor.slice_from(start).into())
}
