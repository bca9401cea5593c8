//! **`bundler_codegen`** turns a resolved [`bundler_graph::Graph`] and its
//! [`bundler_chunk::ChunkPlan`] into the finished set of output files: one
//! entry bundle carrying the runtime plus the main chunk's modules, and one
//! JSONP-envelope file per lazy and shared chunk.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::dbg_macro)]

mod chunk_bundle;
mod entry;
mod error;
mod runtime;

pub use error::CodegenError;

use bundler_chunk::ChunkPlan;
use bundler_graph::Graph;
use indexmap::IndexMap;

/// The complete emitted output: one entry keyed by filename per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
    pub files: IndexMap<Box<str>, String>,
}

/// Transforms every module reached from the entry and emits the bundle's
/// complete set of output files.
pub fn emit_bundle(graph: &Graph, plan: &ChunkPlan) -> Result<BundleOutput, CodegenError> {
    let chunk_of = bundler_transform::dynamic_import_chunk_map(plan);

    let mut factories: IndexMap<Box<str>, String> = IndexMap::new();
    for (module_id, record) in &graph.modules {
        let body = bundler_transform::transform_module(record, graph, &chunk_of)?;
        factories.insert(module_id.clone(), String::from(body));
    }

    tracing::debug!(
        modules = factories.len(),
        lazy_chunks = plan.lazy_chunks.len(),
        shared_chunks = plan.shared_chunks.len(),
        "emitting bundle"
    );

    let mut files: IndexMap<Box<str>, String> = IndexMap::new();
    files.insert("main.js".into(), entry::emit_entry_bundle(&plan.main_chunk, plan, &factories)?);
    for chunk in plan.lazy_chunks.iter().chain(plan.shared_chunks.iter()) {
        let filename: Box<str> = format!("{}.js", chunk.chunk_id).into();
        files.insert(filename, chunk_bundle::emit_chunk_bundle(chunk, &factories));
    }

    Ok(BundleOutput { files })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn emits_only_an_entry_bundle_when_there_are_no_dynamic_imports() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import { add } from \"./math.js\";\nadd(1, 2);").unwrap();
        fs::write(dir.path().join("math.js"), "export function add(a, b) { return a + b; }").unwrap();

        let graph = bundler_graph::build_graph(&dir.path().join("index.js")).unwrap();
        let plan = bundler_chunk::plan_chunks(&graph);
        let output = emit_bundle(&graph, &plan).unwrap();

        assert_eq!(output.files.len(), 1);
        let main = &output.files["main.js"];
        assert!(main.starts_with("(function () {\n\"use strict\";\n"));
        assert!(main.contains("var moduleRegistry = {"));
        assert!(main.contains("\"./index.js\": (module, exports, loadModule) => {"));
        assert!(main.contains("\"./math.js\": (module, exports, loadModule) => {"));
        assert!(!main.contains("loadChunk"));
        assert!(main.contains("loadModule(\"./index.js\");"));
    }

    #[test]
    fn emits_a_chunk_bundle_and_lazy_load_runtime_for_dynamic_imports() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import(\"./feature.js\").then(m => m.run());").unwrap();
        fs::write(dir.path().join("feature.js"), "export function run() { return 1; }").unwrap();

        let graph = bundler_graph::build_graph(&dir.path().join("index.js")).unwrap();
        let plan = bundler_chunk::plan_chunks(&graph);
        let output = emit_bundle(&graph, &plan).unwrap();

        assert_eq!(output.files.len(), 2);
        let main = &output.files["main.js"];
        assert!(main.contains("function loadChunk(chunkId)"));
        assert!(main.contains("loadChunk(\"feature_js\").then(loadModule.bind(loadModule, \"./feature.js\"))"));

        let chunk = &output.files["feature_js.js"];
        assert!(chunk.starts_with("(self[\"bundlerChunkCallbacks\"]"));
        assert!(chunk.contains("\"./feature.js\": (module, exports, loadModule) => {"));
        assert!(chunk.contains("function run() { return 1; }"));
    }
}
