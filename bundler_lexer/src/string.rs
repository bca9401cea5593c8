//! String and template-chunk escape decoding, shared by `lib.rs`'s string
//! literal and template literal scanning (mirrors `boa`'s `string.rs`, which
//! the template lexer also calls into for its cooked value).

use crate::cursor::Cursor;
use crate::error::LexError;

/// Scans one escape sequence, starting just after the consumed `\`, appending
/// its decoded form to `out`. Unknown escapes decode to the escaped character
/// itself, per the ES spec's `NonEscapeCharacter` production.
pub fn scan_escape(cursor: &mut Cursor<'_>, out: &mut String) -> Result<(), LexError> {
    let at = cursor.pos();
    let ch = cursor.bump().ok_or(LexError::InvalidEscape { at })?;
    match ch {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{c}'),
        'v' => out.push('\u{b}'),
        '0' if !cursor.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
        '\n' => {} // line continuation: escaped newline contributes nothing
        '\r' => {
            cursor.eat('\n');
        }
        'x' => {
            let digits = take_hex_digits(cursor, 2).ok_or(LexError::InvalidEscape { at })?;
            push_code_point(out, &digits, at)?;
        }
        'u' => {
            if cursor.eat('{') {
                let start = cursor.pos();
                cursor.bump_while(|c| c.is_ascii_hexdigit());
                let digits = cursor.slice_from(start).to_owned();
                if !cursor.eat('}') {
                    return Err(LexError::InvalidEscape { at });
                }
                push_code_point(out, &digits, at)?;
            } else {
                let digits = take_hex_digits(cursor, 4).ok_or(LexError::InvalidEscape { at })?;
                push_code_point(out, &digits, at)?;
            }
        }
        other => out.push(other),
    }
    Ok(())
}

fn take_hex_digits(cursor: &mut Cursor<'_>, count: usize) -> Option<String> {
    let start = cursor.pos();
    for _ in 0..count {
        if !cursor.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        cursor.bump();
    }
    Some(cursor.slice_from(start).to_owned())
}

fn push_code_point(out: &mut String, digits: &str, at: u32) -> Result<(), LexError> {
    let code = u32::from_str_radix(digits, 16).map_err(|_| LexError::InvalidEscape { at })?;
    let ch = char::from_u32(code).ok_or(LexError::InvalidEscape { at })?;
    out.push(ch);
    Ok(())
}

/// Scans a single- or double-quoted string literal. Expects the cursor to be
/// positioned at the opening quote.
pub fn scan_string(cursor: &mut Cursor<'_>) -> Result<(Box<str>, Box<str>), LexError> {
    let start = cursor.pos();
    let quote = cursor.bump().expect("caller checked for a quote character");
    let mut value = String::new();
    loop {
        match cursor.peek() {
            None => return Err(LexError::UnterminatedString { start }),
            Some(c) if c == quote => {
                cursor.bump();
                break;
            }
            Some('\n') => return Err(LexError::UnterminatedString { start }),
            Some('\\') => {
                cursor.bump();
                scan_escape(cursor, &mut value)?;
            }
            Some(c) => {
                cursor.bump();
                value.push(c);
            }
        }
    }
    let raw = cursor.slice_from(start);
    Ok((value.into_boxed_str(), raw.into()))
}
