//! The chunk and chunk-plan data model.

use indexmap::IndexMap;

/// What role a chunk plays in the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// The main chunk: carries the runtime and every statically-reachable module.
    Entry,
    /// A chunk created for one dynamic-import target.
    Lazy,
    /// A chunk extracted because its members are reachable from two or more lazy chunks.
    Shared,
}

/// One unit of network delivery: a set of module factories emitted into a
/// single output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk's stable identifier; also its filename stem (entry chunk aside).
    pub chunk_id: Box<str>,
    pub kind: ChunkKind,
    /// Member module ids, in BFS discovery order.
    pub member_module_ids: Vec<Box<str>>,
    /// The dynamic-import target this chunk was created for, if it is a lazy chunk.
    pub entry_module_id: Option<Box<str>>,
}

/// The complete output of chunk planning: the three disjoint layers plus the
/// per-lazy-chunk install order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    pub main_chunk: Chunk,
    /// One per distinct dynamic-import target, in first-discovery order.
    pub lazy_chunks: Vec<Chunk>,
    /// One per distinct reference set of lazy chunks sharing modules.
    pub shared_chunks: Vec<Chunk>,
    /// For each lazy chunk id, the ordered list of chunk ids (shared chunks
    /// first, the lazy chunk itself last) that must all be installed before
    /// that chunk's entry module may execute.
    pub chunk_group_map: IndexMap<Box<str>, Vec<Box<str>>>,
}

/// Derives a chunk id from a module id by stripping the leading `./` and
/// replacing every `/` and `.` with `_` (so `./src/feature-a.js` becomes
/// `src_feature-a_js`).
#[must_use]
pub fn derive_chunk_id(module_id: &str) -> String {
    let stripped = module_id.strip_prefix("./").unwrap_or(module_id);
    stripped.chars().map(|c| if c == '/' || c == '.' { '_' } else { c }).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn derives_chunk_id_from_nested_module_id() {
        assert_eq!(derive_chunk_id("./src/feature-a.js"), "src_feature-a_js");
    }

    #[test]
    fn derives_chunk_id_from_top_level_module_id() {
        assert_eq!(derive_chunk_id("./a.js"), "a_js");
    }
}
