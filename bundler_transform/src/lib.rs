//! **`bundler_transform`** turns one module's parsed record into the body
//! text of its factory function, via a range-based patching buffer applied
//! over the module's original source (`edits.rs`), plus a scope-aware
//! free-reference rewriting pass (`rewrite.rs`) and the getter-definition
//! object the factory installs on its exports (`getters.rs`).

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]

mod edits;
mod error;
mod getters;
mod names;
mod rewrite;

pub use error::TransformError;
pub use names::loader_var_name;

use bundler_ast::{ByteOffset, DefaultExportKind, DefaultExportNode, Span};
use bundler_chunk::ChunkPlan;
use bundler_graph::{Graph, ModuleRecord};
use indexmap::{IndexMap, IndexSet};

use edits::{apply_edits, Edit};
use getters::{bare_star_reexport_getters, default_export_getter, named_export_getters, namespace_reexport_getters, GetterEntry};
use names::{collect_declared_names, default_export_name};
use rewrite::collect_rewrite_edits;

/// Maps every lazy chunk's dynamic-import target module id to its chunk id:
/// the lookup the transformer needs to rewrite `import("...")` call sites
/// into `loadChunk(...)` calls.
#[must_use]
pub fn dynamic_import_chunk_map(plan: &ChunkPlan) -> IndexMap<Box<str>, Box<str>> {
    plan.lazy_chunks
        .iter()
        .filter_map(|chunk| chunk.entry_module_id.clone().map(|target| (target, chunk.chunk_id.clone())))
        .collect()
}

/// Transforms one module into the body text of its factory function.
pub fn transform_module(
    record: &ModuleRecord,
    graph: &Graph,
    dynamic_import_chunk_of: &IndexMap<Box<str>, Box<str>>,
) -> Result<Box<str>, TransformError> {
    tracing::debug!(module_id = %record.module_id, "transforming module");

    let program = &record.program;
    let mut edits: Vec<Edit> = Vec::new();

    let mut whole_statement_spans: IndexSet<Span> = IndexSet::new();
    for import in &program.imports {
        whole_statement_spans.insert(import.span);
    }
    for export in &program.named_exports {
        if export.declaration_range.is_none() {
            whole_statement_spans.insert(export.statement_range);
        }
    }
    for reexport in &program.namespace_reexports {
        whole_statement_spans.insert(reexport.statement_range);
    }
    for span in &whole_statement_spans {
        edits.push(Edit::new(*span, String::new()));
    }

    let mut export_prefix_spans: IndexSet<Span> = IndexSet::new();
    for export in &program.named_exports {
        if let Some(declaration_range) = export.declaration_range {
            export_prefix_spans.insert(Span::new(export.statement_range.start(), declaration_range.start()));
        }
    }
    for span in &export_prefix_spans {
        edits.push(Edit::new(*span, String::new()));
    }

    let declared_names = collect_declared_names(program);
    let mut default_resolved_name: Option<String> = None;
    if let (Some(default_export), Some(node)) = (&program.default_export, &program.default_export_node) {
        let node_start = default_export_node_start(node);
        let prefix = Span::new(default_export.span.start(), node_start);
        match default_export.kind {
            DefaultExportKind::Declaration => {
                edits.push(Edit::new(prefix, String::new()));
                default_resolved_name = default_export.inner_name.as_ref().map(ToString::to_string);
            }
            DefaultExportKind::Expression => {
                let name = default_export_name(&declared_names);
                edits.push(Edit::new(prefix, format!("var {name} = ")));
                default_resolved_name = Some(name);
            }
        }
    }

    let loader_var_of: IndexMap<Box<str>, String> = program
        .imports
        .iter()
        .map(|site| site.specifier.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(|specifier| {
            let var = loader_var_name(&specifier);
            (specifier, var)
        })
        .collect();

    collect_rewrite_edits(
        &program.body,
        program.default_export_node.as_ref(),
        &program.imported_bindings,
        &loader_var_of,
        &mut edits,
    );

    for dynamic_import in &program.dynamic_imports {
        let (Some(_specifier), Some(resolved_path)) =
            (&dynamic_import.specifier, &dynamic_import.resolved_absolute_path)
        else {
            continue;
        };
        let Some(target_module_id) = graph.module_id_for_path(resolved_path) else { continue };
        let Some(chunk_id) = dynamic_import_chunk_of.get(target_module_id) else {
            return Err(TransformError::UnknownDynamicImportTarget { module_id: record.module_id.clone() });
        };
        let replacement =
            format!("loadChunk(\"{chunk_id}\").then(loadModule.bind(loadModule, \"{target_module_id}\"))");
        edits.push(Edit::new(dynamic_import.span, replacement));
    }

    let patched_body = apply_edits(&record.module_id, &program.source, edits)?;

    let mut getters: Vec<GetterEntry> = named_export_getters(&program.named_exports, &program.imported_bindings);
    getters.extend(namespace_reexport_getters(&program.namespace_reexports));
    for reexport in &program.namespace_reexports {
        if reexport.exported_name.is_none() {
            getters.extend(bare_star_reexport_getters(reexport, program, graph));
        }
    }
    if let (Some(default_export), Some(name)) = (&program.default_export, &default_resolved_name) {
        getters.push(default_export_getter(default_export, name));
    }

    Ok(render_factory_body(&loader_var_of, &getters, &patched_body).into())
}

fn default_export_node_start(node: &DefaultExportNode) -> ByteOffset {
    match node {
        DefaultExportNode::Function(f) => f.span.start(),
        DefaultExportNode::Class(c) => c.span.start(),
        DefaultExportNode::Expr(e) => e.span().start(),
    }
}

fn render_factory_body(loader_var_of: &IndexMap<Box<str>, String>, getters: &[GetterEntry], patched_body: &str) -> String {
    let mut out = String::new();
    out.push_str("loadModule.markEsModule(exports);\n");

    if !getters.is_empty() {
        out.push_str("loadModule.defineExports(exports, {\n");
        for getter in getters {
            out.push_str(&format!(
                "  {}: function() {{ return {}; }},\n",
                property_key(&getter.exported_name),
                getter.value_expr
            ));
        }
        out.push_str("});\n");
    }

    for (specifier, var) in loader_var_of {
        out.push_str(&format!("var {var} = loadModule(\"{specifier}\");\n"));
    }

    out.push_str(patched_body.trim());
    out.push('\n');
    out
}

fn property_key(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_owned()
    } else {
        format!("\"{name}\"")
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn build(dir: &std::path::Path, entry: &str) -> (Graph, ChunkPlan) {
        let graph = bundler_graph::build_graph(&dir.join(entry)).unwrap();
        let plan = bundler_chunk::plan_chunks(&graph);
        (graph, plan)
    }

    #[test]
    fn transforms_named_import_and_export() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import { add } from \"./math.js\";\nadd(1, 2);").unwrap();
        fs::write(dir.path().join("math.js"), "export function add(a, b) { return a + b; }").unwrap();

        let (graph, plan) = build(dir.path(), "index.js");
        let chunk_of = dynamic_import_chunk_map(&plan);

        let index = &graph.modules["./index.js"];
        let body = transform_module(index, &graph, &chunk_of).unwrap();
        assert!(body.contains("var _math_ = loadModule(\"./math.js\");"));
        assert!(body.contains("(0, _math_.add)(1, 2);"));
        assert!(!body.contains("import"));

        let math = &graph.modules["./math.js"];
        let math_body = transform_module(math, &graph, &chunk_of).unwrap();
        assert!(math_body.contains("add: function() { return add; }"));
        assert!(math_body.contains("function add(a, b)"));
        assert!(!math_body.contains("export"));
    }

    #[test]
    fn rewrites_default_export_expression_with_synthesized_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "export default 1 + 2;").unwrap();

        let (graph, plan) = build(dir.path(), "index.js");
        let chunk_of = dynamic_import_chunk_map(&plan);
        let body = transform_module(&graph.modules["./index.js"], &graph, &chunk_of).unwrap();

        assert!(body.contains("var __default_export__ = 1 + 2;"));
        assert!(body.contains("default: function() { return __default_export__; }"));
    }

    #[test]
    fn rewrites_named_default_function_export_in_place() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "export default function greet() { return 1; }").unwrap();

        let (graph, plan) = build(dir.path(), "index.js");
        let chunk_of = dynamic_import_chunk_map(&plan);
        let body = transform_module(&graph.modules["./index.js"], &graph, &chunk_of).unwrap();

        assert!(body.contains("function greet() { return 1; }"));
        assert!(!body.contains("export default"));
        assert!(body.contains("default: function() { return greet; }"));
    }

    #[test]
    fn rewrites_dynamic_import_into_a_chunk_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "import(\"./feature.js\");").unwrap();
        fs::write(dir.path().join("feature.js"), "export const x = 1;").unwrap();

        let (graph, plan) = build(dir.path(), "index.js");
        let chunk_of = dynamic_import_chunk_map(&plan);
        let body = transform_module(&graph.modules["./index.js"], &graph, &chunk_of).unwrap();

        assert!(body.contains("loadChunk(\"feature_js\").then(loadModule.bind(loadModule, \"./feature.js\"))"));
    }

    #[test]
    fn reexport_getter_reads_through_the_source_module() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "export { value } from \"./source.js\";").unwrap();
        fs::write(dir.path().join("source.js"), "export const value = 1;").unwrap();

        let (graph, plan) = build(dir.path(), "index.js");
        let chunk_of = dynamic_import_chunk_map(&plan);
        let body = transform_module(&graph.modules["./index.js"], &graph, &chunk_of).unwrap();

        assert!(body.contains("value: function() { return _source_.value; }"));
        assert!(!body.contains("export"));
    }
}
