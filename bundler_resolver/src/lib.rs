//! **`bundler_resolver`** maps an import specifier and its referring
//! directory to an absolute file path on disk.
//!
//! Only relative specifiers (`./...`, `../...`) are supported; bare
//! specifiers (`node_modules`-style package names) are out of scope for this
//! bundler and rejected outright. Resolution tries a fixed, ordered list of
//! candidate suffixes and returns the first that names an existing regular
//! file.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::dbg_macro)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The ordered suffixes tried against the normalized candidate base, in
/// priority order: the bare path, then `.js`, then `.json`, then an index
/// file inside it as a directory.
const CANDIDATE_SUFFIXES: &[&str] = &["", ".js", ".json", "/index.js"];

/// Everything that can make resolution fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The specifier does not start with `.` or `..`.
    #[error("bare specifier `{specifier}` is not supported (referenced from {referrer})")]
    BareSpecifier {
        /// The specifier as written in the source.
        specifier: String,
        /// The absolute path of the module that referenced it.
        referrer: PathBuf,
    },

    /// None of the candidate suffixes named an existing regular file.
    #[error(
        "cannot resolve `{specifier}` from {referrer}: tried {}",
        candidates.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    UnresolvedModule {
        /// The specifier as written in the source.
        specifier: String,
        /// The absolute path of the module that referenced it.
        referrer: PathBuf,
        /// Every candidate path tried, in order.
        candidates: Vec<PathBuf>,
    },
}

/// Resolves `specifier` (as written in an import/export/dynamic-import site)
/// relative to `referrer_dir`, the directory the referencing module lives
/// in. Returns the canonicalized absolute path of the first candidate that
/// exists as a regular file.
pub fn resolve(specifier: &str, referrer_dir: &Path) -> Result<PathBuf, ResolveError> {
    if !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return Err(ResolveError::BareSpecifier {
            specifier: specifier.to_owned(),
            referrer: referrer_dir.to_path_buf(),
        });
    }

    let base = normalize(&referrer_dir.join(specifier));
    let mut candidates = Vec::with_capacity(CANDIDATE_SUFFIXES.len());

    for suffix in CANDIDATE_SUFFIXES {
        let candidate = append(&base, suffix);
        tracing::debug!(candidate = %candidate.display(), "trying resolver candidate");
        if candidate.is_file() {
            return Ok(candidate.canonicalize().unwrap_or(candidate));
        }
        candidates.push(candidate);
    }

    Err(ResolveError::UnresolvedModule {
        specifier: specifier.to_owned(),
        referrer: referrer_dir.to_path_buf(),
        candidates,
    })
}

/// Appends a literal suffix to a path without going through `Path`'s
/// extension-replacing joins, since `/index.js` needs to land as a sibling
/// path component rather than a join.
fn append(base: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return base.to_path_buf();
    }
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// Collapses `.`/`..` path components lexically (the path need not exist
/// yet, so `Path::canonicalize` isn't usable here).
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn rejects_bare_specifier() {
        let dir = tempdir().unwrap();
        let err = resolve("lodash", dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::BareSpecifier { .. }));
    }

    #[test]
    fn resolves_exact_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("math.js"), "export const x = 1;").unwrap();
        let resolved = resolve("./math.js", dir.path()).unwrap();
        assert_eq!(resolved.file_name().unwrap(), "math.js");
    }

    #[test]
    fn resolves_with_implicit_js_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("math.js"), "export const x = 1;").unwrap();
        let resolved = resolve("./math", dir.path()).unwrap();
        assert_eq!(resolved.file_name().unwrap(), "math.js");
    }

    #[test]
    fn resolves_with_implicit_json_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("data.json"), "{}").unwrap();
        let resolved = resolve("./data", dir.path()).unwrap();
        assert_eq!(resolved.file_name().unwrap(), "data.json");
    }

    #[test]
    fn resolves_directory_index() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("feature");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("index.js"), "export const x = 1;").unwrap();
        let resolved = resolve("./feature", dir.path()).unwrap();
        assert_eq!(resolved.file_name().unwrap(), "index.js");
    }

    #[test]
    fn prefers_exact_file_over_extension_guesses() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("math.js"), "// exact").unwrap();
        fs::create_dir(dir.path().join("math.js.d")).unwrap();
        let resolved = resolve("./math.js", dir.path()).unwrap();
        assert_eq!(fs::read_to_string(resolved).unwrap(), "// exact");
    }

    #[test]
    fn reports_every_candidate_when_unresolved() {
        let dir = tempdir().unwrap();
        let err = resolve("./missing", dir.path()).unwrap_err();
        match err {
            ResolveError::UnresolvedModule { candidates, .. } => assert_eq!(candidates.len(), 4),
            other => panic!("expected UnresolvedModule, got {other:?}"),
        }
    }

    #[test]
    fn resolves_parent_relative_specifier() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("src");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("root.js"), "export const x = 1;").unwrap();
        let resolved = resolve("../root.js", &sub).unwrap();
        assert_eq!(resolved.file_name().unwrap(), "root.js");
    }
}
