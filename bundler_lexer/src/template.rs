//! Template-literal chunk scanning.
//!
//! A template's backtick-delimited text is scanned the same way a string
//! literal's body is (same escape table, via `string::scan_escape`), just
//! with two possible terminators instead of one: the closing backtick, or the
//! `${` that opens an interpolation. `lib.rs`'s main loop decides whether the
//! resulting chunk is a `Head`/`Middle`/`Tail`/`NoSubstitution` from the
//! lexing context (whether this is the template's first chunk, and which
//! terminator ended it); this module only produces the cooked/raw pair.

use bundler_ast::ByteOffset;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::string::scan_escape;
use crate::token::StrPayload;

/// Scans one template chunk. Expects the cursor positioned just after the
/// opening delimiter (the backtick, or a previous interpolation's `}`).
/// Returns the chunk plus whether it was terminated by `${` (as opposed to
/// the closing backtick).
pub fn scan_template_chunk(
    cursor: &mut Cursor<'_>,
    chunk_start: ByteOffset,
) -> Result<(StrPayload, bool), LexError> {
    let mut value = String::new();
    let ended_by_interpolation;
    loop {
        match cursor.peek() {
            None => return Err(LexError::UnterminatedTemplate { start: chunk_start }),
            Some('`') => {
                cursor.bump();
                ended_by_interpolation = false;
                break;
            }
            Some('$') if cursor.peek2() == Some('{') => {
                cursor.bump();
                cursor.bump();
                ended_by_interpolation = true;
                break;
            }
            Some('\\') => {
                cursor.bump();
                scan_escape(cursor, &mut value)?;
            }
            Some('\r') => {
                // Template literals normalize CRLF/CR to LF in the cooked value.
                cursor.bump();
                cursor.eat('\n');
                value.push('\n');
            }
            Some(c) => {
                cursor.bump();
                value.push(c);
            }
        }
    }
    let raw = cursor.slice_from(chunk_start).into();
    Ok((StrPayload { value: value.into_boxed_str(), raw }, ended_by_interpolation))
}
