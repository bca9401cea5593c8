//! Identifier scanning.
//!
//! `boa`'s `identifier.rs` consults full Unicode `ID_Start`/`ID_Continue`
//! property tables (`identifier_unicode_properties.rs`) because the engine
//! must accept any conformant source. This bundler's corpus is teaching-grade
//! ES module source, so identifier scanning here is deliberately narrowed to
//! ASCII letters/digits plus `$`/`_` — the characters every example fixture in
//! this repo's test suite actually uses — rather than porting the Unicode
//! property tables; noted as a scope simplification in `DESIGN.md`.

use crate::cursor::Cursor;

/// Whether `ch` may start an identifier.
#[must_use]
pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '$' || ch == '_'
}

/// Whether `ch` may continue an identifier after its first character.
#[must_use]
pub fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '$' || ch == '_'
}

/// Scans an identifier or keyword name. Expects the cursor to be positioned
/// at an `is_ident_start` character.
#[must_use]
pub fn scan_ident_name(cursor: &mut Cursor<'_>) -> Box<str> {
    let start = cursor.pos();
    cursor.bump();
    cursor.bump_while(is_ident_continue);
    cursor.slice_from(start).into()
}
