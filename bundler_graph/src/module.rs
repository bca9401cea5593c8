//! The module record and the graph that owns every record reached from the
//! entry.

use std::path::PathBuf;

use bundler_ast::Program;
use indexmap::IndexMap;

/// One module reached from the entry: its identity, its source, and its
/// parsed AST (with every import/dynamic-import already resolved to an
/// absolute path by the time graph construction finishes).
#[derive(Debug)]
pub struct ModuleRecord {
    /// Canonical OS path; the primary key during graph traversal.
    pub absolute_path: PathBuf,
    /// Project-relative POSIX-style path, e.g. `./src/utils/math.js`.
    pub module_id: Box<str>,
    /// The original UTF-8 source text.
    pub source: Box<str>,
    /// The parsed module tree, byte-ranged into `source`.
    pub program: Program,
}

/// The full set of modules reached from one entry point, keyed by
/// `module_id` in BFS discovery order.
#[derive(Debug)]
pub struct Graph {
    /// The entry module's id.
    pub entry_module_id: Box<str>,
    /// Every reached module, in the order the BFS first discovered it.
    pub modules: IndexMap<Box<str>, ModuleRecord>,
    /// Reverse index from absolute path to module id, built once at
    /// construction time so edge resolution doesn't rescan every module.
    pub(crate) by_path: IndexMap<PathBuf, Box<str>>,
}

impl Graph {
    /// The entry module's record.
    #[must_use]
    pub fn entry(&self) -> &ModuleRecord {
        &self.modules[&self.entry_module_id]
    }

    /// The module id registered for a canonical absolute path, if any module
    /// reached from the entry resolves to it.
    #[must_use]
    pub fn module_id_for_path(&self, path: &std::path::Path) -> Option<&str> {
        self.by_path.get(path).map(Box::as_ref)
    }

    /// The module ids every static import (including synthesized
    /// re-export imports) of `module_id` resolves to, in source order.
    /// Two imports of the same source still only appear once.
    #[must_use]
    pub fn static_targets(&self, module_id: &str) -> Vec<Box<str>> {
        let mut seen = indexmap::IndexSet::new();
        let Some(record) = self.modules.get(module_id) else { return Vec::new() };
        for import in &record.program.imports {
            if let Some(path) = &import.resolved_absolute_path {
                if let Some(target) = self.by_path.get(path) {
                    seen.insert(target.clone());
                }
            }
        }
        seen.into_iter().collect()
    }

    /// The module ids every literal dynamic import of `module_id` targets,
    /// in source order, skipping non-literal (unresolved) sites.
    #[must_use]
    pub fn dynamic_targets(&self, module_id: &str) -> Vec<Box<str>> {
        let Some(record) = self.modules.get(module_id) else { return Vec::new() };
        record
            .program
            .dynamic_imports
            .iter()
            .filter_map(|site| {
                let path = site.resolved_absolute_path.as_ref()?;
                self.by_path.get(path).cloned()
            })
            .collect()
    }
}
