//! Builds the value expressions fed into the factory's `defineExports` call:
//! one getter-body expression per named export, re-export, default export,
//! and named namespace re-export.

use bundler_ast::{DefaultExportRecord, ImportedBinding, ImportedName, NamedExportRecord, NamespaceReexport, Program};
use bundler_graph::Graph;
use indexmap::IndexMap;

use crate::names::loader_var_name;

/// One exported name paired with the expression its getter should return.
pub struct GetterEntry {
    pub exported_name: Box<str>,
    pub value_expr: String,
}

fn accessor_for(binding: &ImportedBinding) -> String {
    let var = loader_var_name(&binding.module_specifier);
    match &binding.imported_name {
        ImportedName::Named(name) => format!("{var}.{name}"),
        ImportedName::Default => format!("{var}[\"default\"]"),
        ImportedName::Namespace => var,
    }
}

/// One getter per [`NamedExportRecord`]: a re-export reads the referenced
/// module's namespace variable; an export of an already-imported local name
/// reads that same accessor; a genuine local declaration reads its binding
/// directly.
#[must_use]
pub fn named_export_getters(
    named_exports: &[NamedExportRecord],
    imported_bindings: &IndexMap<Box<str>, ImportedBinding>,
) -> Vec<GetterEntry> {
    named_exports
        .iter()
        .map(|record| {
            let value_expr = match &record.reexport_source {
                Some(source) => format!("{}.{}", loader_var_name(source), record.local_name),
                None => match imported_bindings.get(&record.local_name) {
                    Some(binding) => accessor_for(binding),
                    None => record.local_name.to_string(),
                },
            };
            GetterEntry { exported_name: record.exported_name.clone(), value_expr }
        })
        .collect()
}

/// A getter for the module's default export, reading whichever name the
/// transformer resolved it to (the declared name, or the synthesized one).
#[must_use]
pub fn default_export_getter(_record: &DefaultExportRecord, resolved_name: &str) -> GetterEntry {
    GetterEntry { exported_name: "default".into(), value_expr: resolved_name.to_owned() }
}

/// A getter for every `export * as ns from "..."`: reads the whole
/// referenced module's namespace object.
#[must_use]
pub fn namespace_reexport_getters(reexports: &[NamespaceReexport]) -> Vec<GetterEntry> {
    reexports
        .iter()
        .filter_map(|r| {
            let name = r.exported_name.as_ref()?;
            Some(GetterEntry { exported_name: name.clone(), value_expr: loader_var_name(&r.module_specifier) })
        })
        .collect()
}

/// Flattens one level of a bare `export * from "..."`: a getter per named
/// export the referenced module itself defines, reading it off that
/// module's namespace variable. Re-exports of the referenced module's own
/// bare `export *` are not followed further (a deliberate simplification).
#[must_use]
pub fn bare_star_reexport_getters(reexport: &NamespaceReexport, program: &Program, graph: &Graph) -> Vec<GetterEntry> {
    let var = loader_var_name(&reexport.module_specifier);
    let Some(site) = program.imports.iter().find(|site| site.span == reexport.statement_range) else {
        return Vec::new();
    };
    let Some(path) = &site.resolved_absolute_path else { return Vec::new() };
    let Some(target_id) = graph.module_id_for_path(path) else { return Vec::new() };
    let Some(target) = graph.modules.get(target_id) else { return Vec::new() };

    target
        .program
        .named_exports
        .iter()
        .map(|export| GetterEntry {
            exported_name: export.exported_name.clone(),
            value_expr: format!("{var}.{}", export.exported_name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn local_declaration_getter_reads_the_binding_directly() {
        let record = NamedExportRecord {
            local_name: "add".into(),
            exported_name: "add".into(),
            declaration_range: Some(bundler_ast::Span::new(0, 1)),
            statement_range: bundler_ast::Span::new(0, 1),
            reexport_source: None,
        };
        let getters = named_export_getters(std::slice::from_ref(&record), &IndexMap::new());
        assert_eq!(getters[0].value_expr, "add");
    }

    #[test]
    fn reexport_getter_reads_from_the_source_module_variable() {
        let record = NamedExportRecord {
            local_name: "a".into(),
            exported_name: "b".into(),
            declaration_range: None,
            statement_range: bundler_ast::Span::new(0, 1),
            reexport_source: Some("./m.js".into()),
        };
        let getters = named_export_getters(std::slice::from_ref(&record), &IndexMap::new());
        assert_eq!(getters[0].value_expr, "_m_.a");
    }
}
