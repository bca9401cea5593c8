//! The transformer's error boundary: both variants are internal invariant
//! violations, not recoverable input errors (a well-formed graph never
//! triggers them).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(
        "overlapping edits in module {module_id}: an edit ending at {a_end} starts after one beginning at {b_start}"
    )]
    OverlappingEdits { module_id: Box<str>, a_end: u32, b_start: u32 },

    #[error("dynamic import in {module_id} resolved to a module with no planned chunk")]
    UnknownDynamicImportTarget { module_id: Box<str> },
}
