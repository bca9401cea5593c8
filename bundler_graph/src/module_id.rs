//! Module id derivation: a project-relative, POSIX-style path prefixed with
//! `./`, used as the registry key in the emitted bundle.

use std::path::{Component, Path};

use crate::error::GraphError;

/// Derives `absolute`'s module id relative to `root` (the common ancestor
/// directory of every path the graph BFS reached), joining path components
/// with `/` regardless of host path separator so the emitted registry key is
/// stable across platforms.
pub fn compute_module_id(root: &Path, absolute: &Path) -> Result<Box<str>, GraphError> {
    let relative = absolute.strip_prefix(root).map_err(|_| GraphError::PathOutsideRoot {
        path: absolute.to_path_buf(),
        root: root.to_path_buf(),
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            parts.push(segment.to_string_lossy().into_owned());
        }
    }
    Ok(format!("./{}", parts.join("/")).into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn derives_nested_module_id() {
        let root = Path::new("/project");
        let id = compute_module_id(root, Path::new("/project/src/utils/math.js")).unwrap();
        assert_eq!(&*id, "./src/utils/math.js");
    }

    #[test]
    fn derives_top_level_module_id() {
        let root = Path::new("/project");
        let id = compute_module_id(root, Path::new("/project/index.js")).unwrap();
        assert_eq!(&*id, "./index.js");
    }
}
