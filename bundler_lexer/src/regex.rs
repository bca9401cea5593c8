//! Regular-expression literal scanning.
//!
//! Whether a `/` opens a regex literal or is the division operator is a
//! context-sensitive decision the caller (`lib.rs`) makes by consulting the
//! previous significant token (`Token::can_end_expression`, §4.0); this
//! module only scans the literal once that decision has already been made,
//! the same split `boa`'s `regex.rs` and `mod.rs` make.

use crate::cursor::Cursor;
use crate::error::LexError;

/// Scans a `/pattern/flags` literal. Expects the cursor positioned at the
/// opening `/`.
pub fn scan_regex(cursor: &mut Cursor<'_>) -> Result<Box<str>, LexError> {
    let start = cursor.pos();
    cursor.bump(); // opening `/`
    let mut in_class = false;
    loop {
        match cursor.peek() {
            None | Some('\n') => return Err(LexError::UnterminatedRegex { start }),
            Some('\\') => {
                cursor.bump();
                if cursor.bump().is_none() {
                    return Err(LexError::UnterminatedRegex { start });
                }
            }
            Some('[') => {
                in_class = true;
                cursor.bump();
            }
            Some(']') => {
                in_class = false;
                cursor.bump();
            }
            Some('/') if !in_class => {
                cursor.bump();
                break;
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
    cursor.bump_while(|c| c.is_ascii_alphabetic());
    Ok(cursor.slice_from(start).into())
}
