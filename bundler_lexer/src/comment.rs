//! Comment skipping.
//!
//! Comments are scanned and discarded, never retained as trivia (§4.0 — the
//! expanded spec's Non-goals already exclude source maps/minification, the
//! only consumers that would ever want comment text back).

use bundler_ast::ByteOffset;

use crate::cursor::Cursor;
use crate::error::LexError;

/// Skips a `//` line comment. Expects the cursor positioned at the first `/`.
pub fn skip_line_comment(cursor: &mut Cursor<'_>) {
    cursor.bump_while(|c| c != '\n');
}

/// Skips a `/* ... */` block comment. Expects the cursor positioned at the
/// first `/`. Returns whether the comment spanned a line terminator, since
/// that still counts for automatic-semicolon-insertion purposes.
pub fn skip_block_comment(cursor: &mut Cursor<'_>) -> Result<bool, LexError> {
    let start: ByteOffset = cursor.pos();
    cursor.bump();
    cursor.bump();
    let mut saw_newline = false;
    loop {
        match cursor.peek() {
            None => return Err(LexError::UnterminatedBlockComment { start }),
            Some('\n') => {
                saw_newline = true;
                cursor.bump();
            }
            Some('*') if cursor.peek2() == Some('/') => {
                cursor.bump();
                cursor.bump();
                return Ok(saw_newline);
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}
