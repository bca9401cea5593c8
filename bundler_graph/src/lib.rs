//! **`bundler_graph`** builds the full module dependency graph reached from
//! one entry file, by BFS over static and dynamic import edges.
//!
//! Every module is parsed at most once: the BFS is keyed on canonical
//! absolute path, so a module reached through two different import sites is
//! only read and parsed the first time it's dequeued.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::dbg_macro)]

mod error;
mod module;
mod module_id;

pub use error::GraphError;
pub use module::{Graph, ModuleRecord};

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use bundler_ast::Program;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use module_id::compute_module_id;

/// Builds the module graph reached from `entry_path`, resolving every
/// static and literal-dynamic import along the way.
///
/// Module ids are derived relative to the common ancestor directory of every
/// path the BFS actually reaches, not the entry's own parent directory: an
/// import can resolve to a sibling or ancestor of the entry's directory
/// (`../shared/util.js` from a nested entry, say), so the root has to widen
/// to cover it rather than being fixed before the graph is known. This is
/// why construction runs in two passes: the first discovers every reached
/// path, the second (once the root is known) derives each one's module id.
pub fn build_graph(entry_path: &Path) -> Result<Graph, GraphError> {
    let entry_absolute =
        entry_path.canonicalize().map_err(|_| GraphError::EntryNotFound(entry_path.to_path_buf()))?;

    tracing::debug!(entry = %entry_absolute.display(), "starting graph BFS");

    let mut programs: IndexMap<PathBuf, (Box<str>, Program)> = IndexMap::new();
    let mut visited: FxHashSet<PathBuf> = FxHashSet::default();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();

    visited.insert(entry_absolute.clone());
    queue.push_back(entry_absolute.clone());

    while let Some(absolute_path) = queue.pop_front() {
        let source = fs::read_to_string(&absolute_path)
            .map_err(|source| GraphError::Io { path: absolute_path.clone(), source })?;

        let mut program = bundler_parser::parse_module(&source)
            .map_err(|source| GraphError::Parse { path: absolute_path.clone(), source })?;

        let referrer_dir = absolute_path.parent().unwrap_or_else(|| Path::new("."));

        for import in &mut program.imports {
            let resolved = bundler_resolver::resolve(&import.specifier, referrer_dir)?;
            import.resolved_absolute_path = Some(resolved.clone());
            enqueue_if_unseen(resolved, &mut visited, &mut queue);
        }

        for dynamic_import in &mut program.dynamic_imports {
            let Some(specifier) = &dynamic_import.specifier else { continue };
            let resolved = bundler_resolver::resolve(specifier, referrer_dir)?;
            dynamic_import.resolved_absolute_path = Some(resolved.clone());
            enqueue_if_unseen(resolved, &mut visited, &mut queue);
        }

        programs.insert(absolute_path, (source.into(), program));
    }

    let root = common_ancestor_dir(programs.keys());
    let entry_module_id = compute_module_id(&root, &entry_absolute)?;

    let mut modules: IndexMap<Box<str>, ModuleRecord> = IndexMap::new();
    let mut by_path: IndexMap<PathBuf, Box<str>> = IndexMap::new();
    let mut owner_of_id: IndexMap<Box<str>, PathBuf> = IndexMap::new();

    for (absolute_path, (source, program)) in programs {
        let module_id = compute_module_id(&root, &absolute_path)?;

        if let Some(first_path) = owner_of_id.insert(module_id.clone(), absolute_path.clone()) {
            return Err(GraphError::ModuleIdCollision { module_id, first_path, second_path: absolute_path });
        }

        by_path.insert(absolute_path.clone(), module_id.clone());
        modules.insert(module_id.clone(), ModuleRecord { absolute_path, module_id, source, program });
    }

    tracing::debug!(module_count = modules.len(), "graph BFS complete");

    Ok(Graph { entry_module_id, modules, by_path })
}

fn enqueue_if_unseen(path: PathBuf, visited: &mut FxHashSet<PathBuf>, queue: &mut VecDeque<PathBuf>) {
    if visited.insert(path.clone()) {
        queue.push_back(path);
    }
}

/// The common ancestor directory of every path in `paths`. With a single
/// path (an entry with no imports reaching outside its own directory) this
/// is that file's parent; with more, it's the deepest directory every path
/// shares, computed by component-wise prefix matching so it's correct
/// regardless of how far an import's `../` climbs.
fn common_ancestor_dir<'a>(paths: impl Iterator<Item = &'a PathBuf>) -> PathBuf {
    let mut common: Option<Vec<std::path::Component<'a>>> = None;
    let mut count = 0;
    for path in paths {
        count += 1;
        common = Some(match common {
            None => path.components().collect(),
            Some(prev) => {
                let next: Vec<_> = path.components().collect();
                let shared = prev.iter().zip(next.iter()).take_while(|(a, b)| a == b).count();
                prev.into_iter().take(shared).collect()
            }
        });
    }
    let mut common = common.unwrap_or_default();
    if count <= 1 {
        // A single reached path is a file, not a directory: its own
        // components include its filename, so the root is its parent.
        common.pop();
    }
    common.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn builds_graph_for_static_only_entry() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import { add } from \"./math.js\";\nadd(1, 2);").unwrap();
        fs::write(dir.path().join("math.js"), "export function add(a, b) { return a + b; }").unwrap();

        let graph = build_graph(&dir.path().join("index.js")).unwrap();
        assert_eq!(graph.modules.len(), 2);
        assert_eq!(&*graph.entry_module_id, "./index.js");
        assert_eq!(graph.static_targets("./index.js"), vec![Box::<str>::from("./math.js")]);
    }

    #[test]
    fn deduplicates_module_visited_from_two_sites() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("index.js"),
            "import { a } from \"./a.js\";\nimport { b } from \"./b.js\";",
        )
        .unwrap();
        fs::write(dir.path().join("a.js"), "import \"./shared.js\";\nexport const a = 1;").unwrap();
        fs::write(dir.path().join("b.js"), "import \"./shared.js\";\nexport const b = 2;").unwrap();
        fs::write(dir.path().join("shared.js"), "export const shared = 3;").unwrap();

        let graph = build_graph(&dir.path().join("index.js")).unwrap();
        assert_eq!(graph.modules.len(), 4);
    }

    #[test]
    fn follows_literal_dynamic_imports() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import(\"./lazy.js\");").unwrap();
        fs::write(dir.path().join("lazy.js"), "export const x = 1;").unwrap();

        let graph = build_graph(&dir.path().join("index.js")).unwrap();
        assert_eq!(graph.dynamic_targets("./index.js"), vec![Box::<str>::from("./lazy.js")]);
    }

    #[test]
    fn skips_non_literal_dynamic_imports() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import(path);").unwrap();

        let graph = build_graph(&dir.path().join("index.js")).unwrap();
        assert_eq!(graph.modules.len(), 1);
        assert!(graph.dynamic_targets("./index.js").is_empty());
    }

    #[test]
    fn handles_cyclic_static_imports() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "import { b } from \"./b.js\";\nexport const a = 1;").unwrap();
        fs::write(dir.path().join("b.js"), "import { a } from \"./a.js\";\nexport const b = 2;").unwrap();

        let graph = build_graph(&dir.path().join("a.js")).unwrap();
        assert_eq!(graph.modules.len(), 2);
    }

    #[test]
    fn looks_up_module_id_by_resolved_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import { add } from \"./math.js\";").unwrap();
        fs::write(dir.path().join("math.js"), "export function add(a, b) { return a + b; }").unwrap();

        let graph = build_graph(&dir.path().join("index.js")).unwrap();
        let math_path = dir.path().join("math.js").canonicalize().unwrap();
        assert_eq!(graph.module_id_for_path(&math_path), Some("./math.js"));
        assert_eq!(graph.module_id_for_path(Path::new("/no/such/file.js")), None);
    }

    #[test]
    fn widens_root_for_entry_nested_below_an_import_target() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(
            dir.path().join("src/index.js"),
            "import { helper } from \"../shared/util.js\";\nhelper();",
        )
        .unwrap();
        fs::create_dir(dir.path().join("shared")).unwrap();
        fs::write(dir.path().join("shared/util.js"), "export function helper() {}").unwrap();

        let graph = build_graph(&dir.path().join("src/index.js")).unwrap();
        assert_eq!(&*graph.entry_module_id, "./src/index.js");
        assert_eq!(graph.static_targets("./src/index.js"), vec![Box::<str>::from("./shared/util.js")]);
    }

    #[test]
    fn reports_entry_not_found() {
        let dir = tempdir().unwrap();
        let err = build_graph(&dir.path().join("missing.js")).unwrap_err();
        assert!(matches!(err, GraphError::EntryNotFound(_)));
    }

    #[test]
    fn propagates_unresolved_module_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import { x } from \"./missing.js\";").unwrap();
        let err = build_graph(&dir.path().join("index.js")).unwrap_err();
        assert!(matches!(err, GraphError::Resolve(_)));
    }
}
