//! The runtime text shared by every entry bundle: the module cache, the
//! loader, the two helpers factories call (`markEsModule`, `defineExports`),
//! and, when the plan has at least one lazy chunk, the lazy-load runtime.

use bundler_chunk::ChunkPlan;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::CodegenError;

/// webpack calls this `__webpack_module_cache__`.
pub fn module_cache() -> String {
    let mut out = String::new();
    out.push_str("// Module cache (webpack: __webpack_module_cache__)\n");
    out.push_str("var moduleCache = {};\n");
    out
}

/// webpack calls this `__webpack_require__`. Modules already in the cache are
/// returned without re-running their factory, so a module with a cycle back
/// to itself sees a partially-populated `exports` rather than looping forever.
pub fn module_loader() -> String {
    let mut out = String::new();
    out.push_str("// Module loader (webpack: __webpack_require__)\n");
    out.push_str("function loadModule(id) {\n");
    out.push_str("  if (moduleCache[id]) {\n");
    out.push_str("    return moduleCache[id].exports;\n");
    out.push_str("  }\n");
    out.push_str("  var module = { exports: {} };\n");
    out.push_str("  moduleCache[id] = module;\n");
    out.push_str("  moduleRegistry[id](module, module.exports, loadModule);\n");
    out.push_str("  return module.exports;\n");
    out.push_str("}\n");
    out
}

/// webpack splits these across `__webpack_require__.r` / `.d` / `.o`; here
/// they hang off `loadModule` itself since it's the only thing every factory
/// already has in scope.
pub fn runtime_helpers() -> String {
    let mut out = String::new();
    out.push_str("// Runtime helpers (webpack: __webpack_require__.r / .d / .o)\n");
    out.push_str("loadModule.markEsModule = function(exports) {\n");
    out.push_str("  Object.defineProperty(exports, \"__esModule\", { value: true });\n");
    out.push_str("  if (typeof Symbol !== \"undefined\" && Symbol.toStringTag) {\n");
    out.push_str("    Object.defineProperty(exports, Symbol.toStringTag, { value: \"Module\" });\n");
    out.push_str("  }\n");
    out.push_str("};\n");
    out.push('\n');
    out.push_str("loadModule.hasOwn = function(obj, key) {\n");
    out.push_str("  return Object.prototype.hasOwnProperty.call(obj, key);\n");
    out.push_str("};\n");
    out.push('\n');
    out.push_str("loadModule.defineExports = function(exports, definition) {\n");
    out.push_str("  for (var key in definition) {\n");
    out.push_str("    if (loadModule.hasOwn(definition, key) && !loadModule.hasOwn(exports, key)) {\n");
    out.push_str("      Object.defineProperty(exports, key, { enumerable: true, get: definition[key] });\n");
    out.push_str("    }\n");
    out.push_str("  }\n");
    out.push_str("};\n");
    out
}

/// webpack's jsonp chunk loading (`__webpack_require__.e` plus the
/// `webpackJsonp` install callback), collapsed into one status table, one
/// loader, and one installer. A chunk's promise never rejects on its own; a
/// failed script load just logs and leaves that chunk's promise unresolved.
pub fn lazy_load_runtime(plan: &ChunkPlan) -> Result<String, CodegenError> {
    let chunk_group_map_json = chunk_group_map_json(&plan.chunk_group_map)?;

    let mut out = String::new();
    out.push_str("// Lazy-load runtime (webpack: jsonp chunk loading, __webpack_require__.e)\n");
    out.push_str("var chunkStatus = {};\n");
    out.push_str("var publicPath = \"\";\n");
    out.push_str("function chunkFilename(chunkId) {\n");
    out.push_str("  return chunkId + \".js\";\n");
    out.push_str("}\n");
    out.push_str(&format!("var chunkGroupMap = {chunk_group_map_json};\n"));
    out.push('\n');

    out.push_str("function injectScript(chunkId) {\n");
    out.push_str("  var script = document.createElement(\"script\");\n");
    out.push_str("  script.src = publicPath + chunkFilename(chunkId);\n");
    out.push_str("  script.onerror = function() {\n");
    out.push_str("    console.error(\"failed to load chunk \" + chunkId);\n");
    out.push_str("  };\n");
    out.push_str("  document.head.appendChild(script);\n");
    out.push_str("}\n");
    out.push('\n');

    out.push_str("function loadChunk(chunkId) {\n");
    out.push_str("  var group = chunkGroupMap[chunkId] || [chunkId];\n");
    out.push_str("  var promises = [];\n");
    out.push_str("  for (var i = 0; i < group.length; i++) {\n");
    out.push_str("    var id = group[i];\n");
    out.push_str("    var status = chunkStatus[id];\n");
    out.push_str("    if (status === 0) {\n");
    out.push_str("      continue;\n");
    out.push_str("    }\n");
    out.push_str("    if (status) {\n");
    out.push_str("      promises.push(status[2]);\n");
    out.push_str("      continue;\n");
    out.push_str("    }\n");
    out.push_str("    var resolve, reject;\n");
    out.push_str("    var promise = new Promise(function(res, rej) {\n");
    out.push_str("      resolve = res;\n");
    out.push_str("      reject = rej;\n");
    out.push_str("    });\n");
    out.push_str("    chunkStatus[id] = [resolve, reject, promise];\n");
    out.push_str("    promises.push(promise);\n");
    out.push_str("    injectScript(id);\n");
    out.push_str("  }\n");
    out.push_str("  return Promise.all(promises);\n");
    out.push_str("}\n");
    out.push('\n');

    out.push_str("(function installJsonpRuntime() {\n");
    out.push_str("  var callbacks = self[\"bundlerChunkCallbacks\"] = self[\"bundlerChunkCallbacks\"] || [];\n");
    out.push_str("  var install = function(data) {\n");
    out.push_str("    var chunkIds = data[0];\n");
    out.push_str("    var factories = data[1];\n");
    out.push_str("    for (var id in factories) {\n");
    out.push_str("      if (loadModule.hasOwn(factories, id) && !loadModule.hasOwn(moduleRegistry, id)) {\n");
    out.push_str("        moduleRegistry[id] = factories[id];\n");
    out.push_str("      }\n");
    out.push_str("    }\n");
    out.push_str("    for (var i = 0; i < chunkIds.length; i++) {\n");
    out.push_str("      var chunkId = chunkIds[i];\n");
    out.push_str("      var status = chunkStatus[chunkId];\n");
    out.push_str("      if (status) {\n");
    out.push_str("        status[0]();\n");
    out.push_str("      }\n");
    out.push_str("      chunkStatus[chunkId] = 0;\n");
    out.push_str("    }\n");
    out.push_str("  };\n");
    out.push_str("  callbacks.forEach(install);\n");
    out.push_str("  callbacks.push = install;\n");
    out.push_str("})();\n");

    Ok(out)
}

fn chunk_group_map_json(map: &IndexMap<Box<str>, Vec<Box<str>>>) -> Result<String, CodegenError> {
    let mut obj = Map::new();
    for (chunk_id, group) in map {
        obj.insert(chunk_id.to_string(), Value::Array(group.iter().map(|id| Value::String(id.to_string())).collect()));
    }
    Ok(serde_json::to_string(&Value::Object(obj))?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use bundler_chunk::{Chunk, ChunkKind};

    #[test]
    fn serializes_an_empty_chunk_group_map() {
        let map: IndexMap<Box<str>, Vec<Box<str>>> = IndexMap::new();
        assert_eq!(chunk_group_map_json(&map).unwrap(), "{}");
    }

    #[test]
    fn lazy_load_runtime_embeds_the_chunk_group_map() {
        let mut chunk_group_map = IndexMap::new();
        chunk_group_map.insert(Box::<str>::from("feature_js"), vec![Box::<str>::from("shared_a_js"), "feature_js".into()]);
        let plan = ChunkPlan {
            main_chunk: Chunk { chunk_id: "main".into(), kind: ChunkKind::Entry, member_module_ids: vec![], entry_module_id: None },
            lazy_chunks: vec![],
            shared_chunks: vec![],
            chunk_group_map,
        };
        let text = lazy_load_runtime(&plan).unwrap();
        assert!(text.contains("\"feature_js\":[\"shared_a_js\",\"feature_js\"]"));
    }
}
