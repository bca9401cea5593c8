//! Identifier synthesis: loader variable names and collision-free default
//! export names.

use bundler_ast::{Class, ClassMember, Function, Pattern, Program, Stmt, VarDecl};
use rustc_hash::FxHashSet;

/// Derives the loader variable name for one import source: strips `./`,
/// trims a trailing `.js`, replaces every non-alphanumeric with `_`, and
/// wraps the result in leading/trailing underscores. `./src/math.js`
/// becomes `_src_math_`.
#[must_use]
pub fn loader_var_name(specifier: &str) -> String {
    let trimmed = specifier.strip_prefix("./").unwrap_or(specifier);
    let trimmed = trimmed.strip_suffix(".js").unwrap_or(trimmed);

    let mut out = String::with_capacity(trimmed.len() + 2);
    out.push('_');
    for ch in trimmed.chars() {
        out.push(if ch.is_ascii_alphanumeric() { ch } else { '_' });
    }
    out.push('_');
    out
}

/// Picks a name for an anonymous/expression default export that cannot
/// collide with any binding already declared in the module, suffixing a
/// fresh counter onto the base name whenever it does.
#[must_use]
pub fn default_export_name(declared_names: &FxHashSet<&str>) -> String {
    const BASE: &str = "__default_export__";
    if !declared_names.contains(BASE) {
        return BASE.to_owned();
    }
    (0u32..)
        .map(|n| format!("{BASE}{n}"))
        .find(|candidate| !declared_names.contains(candidate.as_str()))
        .expect("an unbounded counter always finds a free name")
}

/// Every binding name declared anywhere in the module body, at any nesting
/// depth, so [`default_export_name`] can pick a name guaranteed unused.
#[must_use]
pub fn collect_declared_names(program: &Program) -> FxHashSet<&str> {
    let mut names = FxHashSet::default();
    for stmt in &program.body {
        collect_stmt_names(stmt, &mut names);
    }
    names
}

fn collect_stmt_names<'a>(stmt: &'a Stmt, names: &mut FxHashSet<&'a str>) {
    match stmt {
        Stmt::VarDecl(decl) => collect_var_decl_names(decl, names),
        Stmt::FunctionDecl(f) => collect_function_names(f, names),
        Stmt::ClassDecl(c) => collect_class_names(c, names),
        Stmt::Block(b) => b.stmts.iter().for_each(|s| collect_stmt_names(s, names)),
        Stmt::If(i) => {
            collect_stmt_names(&i.consequent, names);
            if let Some(alt) = &i.alternate {
                collect_stmt_names(alt, names);
            }
        }
        Stmt::For(f) => {
            if let Some(bundler_ast::statement::ForInit::VarDecl(decl)) = &f.init {
                collect_var_decl_names(decl, names);
            }
            collect_stmt_names(&f.body, names);
        }
        Stmt::ForEach(f) => {
            if let bundler_ast::statement::ForInit::VarDecl(decl) = &f.left {
                collect_var_decl_names(decl, names);
            }
            collect_stmt_names(&f.body, names);
        }
        Stmt::While(w) => collect_stmt_names(&w.body, names),
        Stmt::DoWhile(d) => collect_stmt_names(&d.body, names),
        Stmt::Switch(s) => {
            for case in &s.cases {
                case.consequent.iter().for_each(|s| collect_stmt_names(s, names));
            }
        }
        Stmt::Try(t) => {
            t.block.stmts.iter().for_each(|s| collect_stmt_names(s, names));
            if let Some(handler) = &t.handler {
                handler.body.stmts.iter().for_each(|s| collect_stmt_names(s, names));
            }
            if let Some(finalizer) = &t.finalizer {
                finalizer.stmts.iter().for_each(|s| collect_stmt_names(s, names));
            }
        }
        Stmt::Labeled(l) => collect_stmt_names(&l.body, names),
        Stmt::Expr(..)
        | Stmt::Return(..)
        | Stmt::Throw(..)
        | Stmt::Break(..)
        | Stmt::Continue(..)
        | Stmt::Empty(_) => {}
    }
}

fn collect_var_decl_names<'a>(decl: &'a VarDecl, names: &mut FxHashSet<&'a str>) {
    for declarator in &decl.declarators {
        for ident in declarator.binding.binding_idents() {
            names.insert(&ident.name);
        }
    }
}

fn collect_function_names<'a>(f: &'a Function, names: &mut FxHashSet<&'a str>) {
    if let Some(name) = &f.name {
        names.insert(&name.name);
    }
    for param in &f.params {
        collect_pattern_names(param, names);
    }
    f.body.stmts.iter().for_each(|s| collect_stmt_names(s, names));
}

fn collect_class_names<'a>(c: &'a Class, names: &mut FxHashSet<&'a str>) {
    if let Some(name) = &c.name {
        names.insert(&name.name);
    }
    for member in &c.body {
        match member {
            ClassMember::Method { function, .. } => collect_function_names(function, names),
            ClassMember::Field { .. } | ClassMember::StaticBlock(_) => {}
        }
    }
}

fn collect_pattern_names<'a>(pattern: &'a Pattern, names: &mut FxHashSet<&'a str>) {
    for ident in pattern.binding_idents() {
        names.insert(&ident.name);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn derives_loader_var_name_from_nested_specifier() {
        assert_eq!(loader_var_name("./src/math.js"), "_src_math_");
    }

    #[test]
    fn picks_unused_base_name_when_no_collision() {
        let declared = FxHashSet::default();
        assert_eq!(default_export_name(&declared), "__default_export__");
    }

    #[test]
    fn suffixes_counter_on_collision() {
        let mut declared = FxHashSet::default();
        declared.insert("__default_export__");
        declared.insert("__default_export__0");
        assert_eq!(default_export_name(&declared), "__default_export__1");
    }
}
