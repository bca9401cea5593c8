//! The non-entry bundle: a single JSONP-envelope push statement carrying
//! the chunk's own id and its member module factories.

use bundler_chunk::Chunk;
use indexmap::IndexMap;

pub fn emit_chunk_bundle(chunk: &Chunk, factories: &IndexMap<Box<str>, String>) -> String {
    let mut out = String::new();
    out.push_str("(self[\"bundlerChunkCallbacks\"] = self[\"bundlerChunkCallbacks\"] || []).push([\n");
    out.push_str(&format!("  [{:?}],\n", chunk.chunk_id.as_ref()));
    out.push_str("  {\n");
    for module_id in &chunk.member_module_ids {
        let body = factories.get(module_id).map(String::as_str).unwrap_or_default();
        out.push_str(&format!("    {:?}: (module, exports, loadModule) => {{\n", module_id.as_ref()));
        for line in body.lines() {
            out.push_str("      ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("    },\n");
    }
    out.push_str("  }\n");
    out.push_str("]);\n");
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use bundler_chunk::ChunkKind;

    #[test]
    fn wraps_member_factories_in_one_jsonp_push() {
        let chunk = Chunk {
            chunk_id: "feature_js".into(),
            kind: ChunkKind::Lazy,
            member_module_ids: vec!["./feature.js".into()],
            entry_module_id: Some("./feature.js".into()),
        };
        let mut factories = IndexMap::new();
        factories.insert(Box::<str>::from("./feature.js"), "loadModule.markEsModule(exports);".to_owned());

        let text = emit_chunk_bundle(&chunk, &factories);
        assert!(text.starts_with("(self[\"bundlerChunkCallbacks\"] = self[\"bundlerChunkCallbacks\"] || []).push([\n"));
        assert!(text.contains("[\"feature_js\"],\n"));
        assert!(text.contains("\"./feature.js\": (module, exports, loadModule) => {\n"));
        assert!(text.contains("      loadModule.markEsModule(exports);\n"));
        assert!(text.ends_with("]);\n"));
    }
}
