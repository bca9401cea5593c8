//! Assembles the entry bundle: the module registry, cache, loader, runtime
//! helpers, the lazy-load runtime when the plan has lazy chunks, and the
//! entry kick-off call. The whole thing is wrapped in a single strict-mode IIFE.

use bundler_chunk::{Chunk, ChunkPlan};
use indexmap::IndexMap;

use crate::error::CodegenError;
use crate::runtime;

pub fn emit_entry_bundle(
    main_chunk: &Chunk,
    plan: &ChunkPlan,
    factories: &IndexMap<Box<str>, String>,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    out.push_str("(function () {\n");
    out.push_str("\"use strict\";\n");
    out.push('\n');

    out.push_str(&module_registry(main_chunk, factories));
    out.push('\n');
    out.push_str(&runtime::module_cache());
    out.push('\n');
    out.push_str(&runtime::module_loader());
    out.push('\n');
    out.push_str(&runtime::runtime_helpers());

    if !plan.lazy_chunks.is_empty() {
        out.push('\n');
        out.push_str(&runtime::lazy_load_runtime(plan)?);
    }

    out.push('\n');
    out.push_str("// Entry kick-off\n");
    let entry_id = main_chunk.entry_module_id.as_deref().unwrap_or_default();
    out.push_str(&format!("loadModule({entry_id:?});\n"));
    out.push_str("})();\n");
    Ok(out)
}

fn module_registry(main_chunk: &Chunk, factories: &IndexMap<Box<str>, String>) -> String {
    let mut out = String::new();
    out.push_str("// Module registry (webpack: __webpack_modules__)\n");
    out.push_str("var moduleRegistry = {\n");
    for module_id in &main_chunk.member_module_ids {
        let body = factories.get(module_id).map(String::as_str).unwrap_or_default();
        out.push_str(&format!("  {:?}: (module, exports, loadModule) => {{\n", module_id.as_ref()));
        for line in body.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("  },\n");
    }
    out.push_str("};\n");
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use bundler_chunk::ChunkKind;

    #[test]
    fn registry_indents_each_factory_body_under_its_module_id() {
        let main_chunk = Chunk {
            chunk_id: "main".into(),
            kind: ChunkKind::Entry,
            member_module_ids: vec!["./index.js".into()],
            entry_module_id: Some("./index.js".into()),
        };
        let mut factories = IndexMap::new();
        factories.insert(Box::<str>::from("./index.js"), "loadModule.markEsModule(exports);".to_owned());

        let text = module_registry(&main_chunk, &factories);
        assert!(text.contains("\"./index.js\": (module, exports, loadModule) => {"));
        assert!(text.contains("    loadModule.markEsModule(exports);"));
    }

    #[test]
    fn entry_bundle_omits_the_lazy_load_runtime_when_there_are_no_lazy_chunks() {
        let main_chunk = Chunk {
            chunk_id: "main".into(),
            kind: ChunkKind::Entry,
            member_module_ids: vec!["./index.js".into()],
            entry_module_id: Some("./index.js".into()),
        };
        let plan = ChunkPlan {
            main_chunk: main_chunk.clone(),
            lazy_chunks: vec![],
            shared_chunks: vec![],
            chunk_group_map: IndexMap::new(),
        };
        let mut factories = IndexMap::new();
        factories.insert(Box::<str>::from("./index.js"), "loadModule.markEsModule(exports);".to_owned());

        let text = emit_entry_bundle(&main_chunk, &plan, &factories).unwrap();
        assert!(!text.contains("loadChunk"));
        assert!(text.contains("loadModule(\"./index.js\");"));
        assert!(text.ends_with("})();\n"));
    }
}
