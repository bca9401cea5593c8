//! The range-based patching buffer. Edits are `(start, end, replacement)`
//! triples over an immutable source slice, applied in descending `start`
//! order so earlier offsets stay valid as later ones are spliced in.

use bundler_ast::Span;

use crate::error::TransformError;

#[derive(Debug, Clone)]
pub struct Edit {
    pub span: Span,
    pub replacement: String,
}

impl Edit {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self { span, replacement: replacement.into() }
    }
}

/// Applies every edit to `source`. Two edits addressing overlapping ranges
/// indicate a bundler bug (the parser produced a malformed span tree), not
/// a recoverable input error.
pub fn apply_edits(module_id: &str, source: &str, mut edits: Vec<Edit>) -> Result<String, TransformError> {
    edits.sort_by(|a, b| b.span.start().cmp(&a.span.start()));

    let mut out = source.to_owned();
    let mut previous_start: Option<u32> = None;
    for edit in &edits {
        if let Some(start) = previous_start {
            if edit.span.end() > start {
                return Err(TransformError::OverlappingEdits {
                    module_id: module_id.into(),
                    a_end: edit.span.end(),
                    b_start: start,
                });
            }
        }
        out.replace_range(edit.span.start() as usize..edit.span.end() as usize, &edit.replacement);
        previous_start = Some(edit.span.start());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn applies_edits_in_reverse_offset_order() {
        let source = "import x from \"./x.js\";\nx();";
        let edits = vec![
            Edit::new(Span::new(0, 24), String::new()),
            Edit::new(Span::new(25, 26), "_x_.default".to_owned()),
        ];
        let patched = apply_edits("./a.js", source, edits).unwrap();
        assert_eq!(patched, "\n_x_.default();");
    }

    #[test]
    fn rejects_overlapping_edits() {
        let source = "abcdef";
        let edits = vec![Edit::new(Span::new(0, 4), String::new()), Edit::new(Span::new(2, 3), String::new())];
        let err = apply_edits("./a.js", source, edits).unwrap_err();
        assert!(matches!(err, TransformError::OverlappingEdits { .. }));
    }
}
