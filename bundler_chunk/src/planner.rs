//! The chunk planner: turns a [`bundler_graph::Graph`] into a [`ChunkPlan`].

use std::collections::VecDeque;

use bundler_graph::Graph;
use indexmap::{IndexMap, IndexSet};

use crate::chunk::{derive_chunk_id, Chunk, ChunkKind, ChunkPlan};

/// Computes the main chunk, every lazy chunk, the shared chunks extracted
/// from them, and the chunk-group install order, in one pass over `graph`.
///
/// Infallible: a [`Graph`] built by `bundler_graph` is already a closed,
/// fully-resolved set of modules, so planning can't fail on it.
#[must_use]
pub fn plan_chunks(graph: &Graph) -> ChunkPlan {
    let main_members = bfs_static(graph, &graph.entry_module_id);
    let main_set: IndexSet<Box<str>> = main_members.iter().cloned().collect();

    let main_chunk = Chunk {
        chunk_id: "main".into(),
        kind: ChunkKind::Entry,
        member_module_ids: main_members,
        entry_module_id: Some(graph.entry_module_id.clone()),
    };

    let mut lazy_targets: IndexSet<Box<str>> = IndexSet::new();
    for module_id in graph.modules.keys() {
        for target in graph.dynamic_targets(module_id) {
            lazy_targets.insert(target);
        }
    }

    let mut lazy_chunks: Vec<Chunk> = lazy_targets
        .iter()
        .map(|target| Chunk {
            chunk_id: derive_chunk_id(target).into(),
            kind: ChunkKind::Lazy,
            member_module_ids: bfs_static_pruned(graph, target, &main_set),
            entry_module_id: Some(target.clone()),
        })
        .collect();

    let (shared_chunks, module_to_shared_chunk, group_refs) = extract_shared_chunks(graph, &lazy_chunks);

    for chunk in &mut lazy_chunks {
        chunk.member_module_ids.retain(|module_id| !module_to_shared_chunk.contains_key(module_id));
    }

    let mut chunk_group_map: IndexMap<Box<str>, Vec<Box<str>>> = IndexMap::new();
    for chunk in &lazy_chunks {
        let mut group: Vec<Box<str>> = group_refs.get(&chunk.chunk_id).cloned().unwrap_or_default();
        group.sort();
        group.push(chunk.chunk_id.clone());
        chunk_group_map.insert(chunk.chunk_id.clone(), group);
    }

    tracing::debug!(
        lazy_chunks = lazy_chunks.len(),
        shared_chunks = shared_chunks.len(),
        "chunk plan complete"
    );

    ChunkPlan { main_chunk, lazy_chunks, shared_chunks, chunk_group_map }
}

/// Groups modules referenced by two or more lazy chunks by their exact
/// referencing set, producing one shared chunk per distinct set.
///
/// Returns the shared chunks, a module id -> shared chunk id map, and a
/// lazy chunk id -> referencing shared chunk ids map.
fn extract_shared_chunks(
    graph: &Graph,
    lazy_chunks: &[Chunk],
) -> (Vec<Chunk>, IndexMap<Box<str>, Box<str>>, IndexMap<Box<str>, Vec<Box<str>>>) {
    let mut membership: IndexMap<Box<str>, IndexSet<Box<str>>> = IndexMap::new();
    for chunk in lazy_chunks {
        for module_id in &chunk.member_module_ids {
            membership.entry(module_id.clone()).or_default().insert(chunk.chunk_id.clone());
        }
    }

    let mut groups: IndexMap<Vec<Box<str>>, Vec<Box<str>>> = IndexMap::new();
    for module_id in graph.modules.keys() {
        let Some(refs) = membership.get(module_id) else { continue };
        if refs.len() < 2 {
            continue;
        }
        let mut sorted_refs: Vec<Box<str>> = refs.iter().cloned().collect();
        sorted_refs.sort();
        groups.entry(sorted_refs).or_default().push(module_id.clone());
    }

    let mut shared_chunks = Vec::new();
    let mut module_to_shared_chunk: IndexMap<Box<str>, Box<str>> = IndexMap::new();
    let mut group_refs: IndexMap<Box<str>, Vec<Box<str>>> = IndexMap::new();

    for (ref_set, members) in groups {
        let mut sorted_members = members.clone();
        sorted_members.sort();
        let chunk_id: Box<str> = format!("shared_{}", derive_chunk_id(&sorted_members[0])).into();

        for module_id in &members {
            module_to_shared_chunk.insert(module_id.clone(), chunk_id.clone());
        }
        for lazy_chunk_id in &ref_set {
            group_refs.entry(lazy_chunk_id.clone()).or_default().push(chunk_id.clone());
        }
        shared_chunks.push(Chunk {
            chunk_id,
            kind: ChunkKind::Shared,
            member_module_ids: members,
            entry_module_id: None,
        });
    }

    (shared_chunks, module_to_shared_chunk, group_refs)
}

/// BFS over static import edges only, starting from `start`. Returns the
/// reached module ids in discovery order, `start` included.
fn bfs_static(graph: &Graph, start: &str) -> Vec<Box<str>> {
    let mut visited: IndexSet<Box<str>> = IndexSet::new();
    let mut queue: VecDeque<Box<str>> = VecDeque::new();

    visited.insert(start.into());
    queue.push_back(start.into());

    while let Some(module_id) = queue.pop_front() {
        for target in graph.static_targets(&module_id) {
            if visited.insert(target.clone()) {
                queue.push_back(target);
            }
        }
    }

    visited.into_iter().collect()
}

/// Like [`bfs_static`], but a module already in `exclude` is neither
/// included nor traversed past (every static descendant of a main-chunk
/// module is itself in the main chunk, so there's nothing to find there).
fn bfs_static_pruned(graph: &Graph, start: &str, exclude: &IndexSet<Box<str>>) -> Vec<Box<str>> {
    if exclude.contains(start) {
        return Vec::new();
    }

    let mut visited: IndexSet<Box<str>> = IndexSet::new();
    let mut queue: VecDeque<Box<str>> = VecDeque::new();

    visited.insert(start.into());
    queue.push_back(start.into());

    while let Some(module_id) = queue.pop_front() {
        for target in graph.static_targets(&module_id) {
            if exclude.contains(&target) {
                continue;
            }
            if visited.insert(target.clone()) {
                queue.push_back(target);
            }
        }
    }

    visited.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn main_chunk_covers_the_static_closure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import { add } from \"./math.js\";\nadd(1, 2);").unwrap();
        fs::write(dir.path().join("math.js"), "export function add(a, b) { return a + b; }").unwrap();

        let graph = bundler_graph::build_graph(&dir.path().join("index.js")).unwrap();
        let plan = plan_chunks(&graph);

        assert_eq!(plan.main_chunk.kind, ChunkKind::Entry);
        assert_eq!(
            plan.main_chunk.member_module_ids,
            vec![Box::<str>::from("./index.js"), Box::<str>::from("./math.js")]
        );
        assert!(plan.lazy_chunks.is_empty());
        assert!(plan.shared_chunks.is_empty());
    }

    #[test]
    fn dynamic_import_target_becomes_its_own_lazy_chunk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import(\"./feature.js\");").unwrap();
        fs::write(
            dir.path().join("feature.js"),
            "import { helper } from \"./helper.js\";\nexport const x = helper();",
        )
        .unwrap();
        fs::write(dir.path().join("helper.js"), "export function helper() { return 1; }").unwrap();

        let graph = bundler_graph::build_graph(&dir.path().join("index.js")).unwrap();
        let plan = plan_chunks(&graph);

        assert_eq!(plan.lazy_chunks.len(), 1);
        let lazy = &plan.lazy_chunks[0];
        assert_eq!(&*lazy.chunk_id, "feature_js");
        assert_eq!(lazy.entry_module_id.as_deref(), Some("./feature.js"));
        assert_eq!(
            lazy.member_module_ids,
            vec![Box::<str>::from("./feature.js"), Box::<str>::from("./helper.js")]
        );
        assert_eq!(
            plan.chunk_group_map.get("feature_js").cloned(),
            Some(vec![Box::<str>::from("feature_js")])
        );
    }

    #[test]
    fn main_chunk_modules_are_excluded_from_lazy_chunks() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("index.js"),
            "import { helper } from \"./helper.js\";\nimport(\"./feature.js\");",
        )
        .unwrap();
        fs::write(
            dir.path().join("feature.js"),
            "import { helper } from \"./helper.js\";\nexport const x = helper();",
        )
        .unwrap();
        fs::write(dir.path().join("helper.js"), "export function helper() { return 1; }").unwrap();

        let graph = bundler_graph::build_graph(&dir.path().join("index.js")).unwrap();
        let plan = plan_chunks(&graph);

        let lazy = &plan.lazy_chunks[0];
        assert_eq!(lazy.member_module_ids, vec![Box::<str>::from("./feature.js")]);
    }

    #[test]
    fn modules_shared_by_two_lazy_chunks_are_extracted() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("index.js"),
            "import(\"./a.js\");\nimport(\"./b.js\");",
        )
        .unwrap();
        fs::write(
            dir.path().join("a.js"),
            "import { helper } from \"./shared.js\";\nexport const a = helper();",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.js"),
            "import { helper } from \"./shared.js\";\nexport const b = helper();",
        )
        .unwrap();
        fs::write(dir.path().join("shared.js"), "export function helper() { return 1; }").unwrap();

        let graph = bundler_graph::build_graph(&dir.path().join("index.js")).unwrap();
        let plan = plan_chunks(&graph);

        assert_eq!(plan.shared_chunks.len(), 1);
        let shared = &plan.shared_chunks[0];
        assert_eq!(&*shared.chunk_id, "shared_shared_js");
        assert_eq!(shared.member_module_ids, vec![Box::<str>::from("./shared.js")]);

        for lazy in &plan.lazy_chunks {
            assert!(!lazy.member_module_ids.contains(&Box::<str>::from("./shared.js")));
            let group = plan.chunk_group_map.get(&lazy.chunk_id).unwrap();
            assert_eq!(group.as_slice(), [Box::<str>::from("shared_shared_js"), lazy.chunk_id.clone()]);
        }
    }

    #[test]
    fn module_reached_by_only_one_lazy_chunk_is_not_shared() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("index.js"),
            "import(\"./a.js\");\nimport(\"./b.js\");",
        )
        .unwrap();
        fs::write(dir.path().join("a.js"), "import \"./only-a.js\";\nexport const a = 1;").unwrap();
        fs::write(dir.path().join("b.js"), "export const b = 2;").unwrap();
        fs::write(dir.path().join("only-a.js"), "export const x = 1;").unwrap();

        let graph = bundler_graph::build_graph(&dir.path().join("index.js")).unwrap();
        let plan = plan_chunks(&graph);

        assert!(plan.shared_chunks.is_empty());
    }
}
