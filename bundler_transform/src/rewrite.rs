//! Scope-aware free-reference rewriting. Walks the same statement/expression
//! grammar `bundler_parser::walk` traverses to collect dynamic imports, but
//! looks for identifier occurrences bound to an import and turns each into
//! an [`Edit`] against the owning module's variable for that import source.

use bundler_ast::statement::ForInit;
use bundler_ast::{
    ArrowFunction, Block, Class, ClassMember, DefaultExportNode, Expr, Function, ImportedBinding,
    ImportedName, ObjectMember, ObjectPatternProp, Pattern, PropertyKey, Stmt, VarDecl,
};
use indexmap::IndexMap;

use crate::edits::Edit;

type Bindings<'a> = &'a IndexMap<Box<str>, ImportedBinding>;
type LoaderVars<'a> = &'a IndexMap<Box<str>, String>;

fn accessor(var_name: &str, imported_name: &ImportedName) -> String {
    match imported_name {
        ImportedName::Named(name) => format!("{var_name}.{name}"),
        ImportedName::Default => format!("{var_name}[\"default\"]"),
        ImportedName::Namespace => var_name.to_owned(),
    }
}

fn rewrite_of(ident: &bundler_ast::Ident, bindings: Bindings, loader_var_of: LoaderVars) -> Option<String> {
    if !ident.context.is_free_reference() {
        return None;
    }
    let binding = bindings.get(&ident.name)?;
    let var = loader_var_of.get(&binding.module_specifier)?;
    Some(accessor(var, &binding.imported_name))
}

/// Collects one edit per free-reference identifier bound to an import,
/// across every statement in `body` and, if present, the default export's node.
pub fn collect_rewrite_edits(
    body: &[Stmt],
    default_export_node: Option<&DefaultExportNode>,
    bindings: Bindings,
    loader_var_of: LoaderVars,
    edits: &mut Vec<Edit>,
) {
    for stmt in body {
        walk_stmt(stmt, bindings, loader_var_of, edits);
    }
    match default_export_node {
        Some(DefaultExportNode::Function(f)) => walk_function(f, bindings, loader_var_of, edits),
        Some(DefaultExportNode::Class(c)) => walk_class(c, bindings, loader_var_of, edits),
        Some(DefaultExportNode::Expr(e)) => walk_expr(e, bindings, loader_var_of, edits),
        None => {}
    }
}

/// Handles a call callee or tagged-template tag: when it is itself a bound
/// free-reference identifier, its replacement needs the `(0, …)` call-site
/// `this`-suppressing wrap, because substituting a property access in for a
/// bare identifier callee would otherwise change the call's receiver.
fn visit_call_like(expr: &Expr, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    if expr.is_identifier_or_member() {
        if let Expr::Ident(ident) = expr {
            if let Some(replacement) = rewrite_of(ident, bindings, loader_var_of) {
                edits.push(Edit::new(ident.span, format!("(0, {replacement})")));
                return;
            }
        }
    }
    walk_expr(expr, bindings, loader_var_of, edits);
}

fn walk_expr(expr: &Expr, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    match expr {
        Expr::Ident(ident) => {
            if let Some(replacement) = rewrite_of(ident, bindings, loader_var_of) {
                edits.push(Edit::new(ident.span, replacement));
            }
        }
        Expr::Number(_) | Expr::Str(_) | Expr::Bool(..) | Expr::Null(_) | Expr::This(_) | Expr::Regex(_) => {}
        Expr::Template(t) => t.exprs.iter().for_each(|e| walk_expr(e, bindings, loader_var_of, edits)),
        Expr::TaggedTemplate(t) => {
            visit_call_like(&t.tag, bindings, loader_var_of, edits);
            t.quasi.exprs.iter().for_each(|e| walk_expr(e, bindings, loader_var_of, edits));
        }
        Expr::Array(a) => a.elements.iter().flatten().for_each(|e| walk_expr(e, bindings, loader_var_of, edits)),
        Expr::Object(o) => {
            for member in &o.props {
                match member {
                    ObjectMember::Prop(p) => {
                        if p.computed {
                            walk_property_key(&p.key, bindings, loader_var_of, edits);
                        }
                        walk_expr(&p.value, bindings, loader_var_of, edits);
                    }
                    ObjectMember::Spread(e) => walk_expr(e, bindings, loader_var_of, edits),
                }
            }
        }
        Expr::Function(f) => walk_function(f, bindings, loader_var_of, edits),
        Expr::Arrow(a) => walk_arrow(a, bindings, loader_var_of, edits),
        Expr::Class(c) => walk_class(c, bindings, loader_var_of, edits),
        Expr::Unary(u) => walk_expr(&u.argument, bindings, loader_var_of, edits),
        Expr::Update(u) => walk_expr(&u.argument, bindings, loader_var_of, edits),
        Expr::Binary(b) => {
            walk_expr(&b.left, bindings, loader_var_of, edits);
            walk_expr(&b.right, bindings, loader_var_of, edits);
        }
        Expr::Logical(l) => {
            walk_expr(&l.left, bindings, loader_var_of, edits);
            walk_expr(&l.right, bindings, loader_var_of, edits);
        }
        Expr::Assign(a) => {
            walk_expr(&a.target, bindings, loader_var_of, edits);
            walk_expr(&a.value, bindings, loader_var_of, edits);
        }
        Expr::Conditional(c) => {
            walk_expr(&c.test, bindings, loader_var_of, edits);
            walk_expr(&c.consequent, bindings, loader_var_of, edits);
            walk_expr(&c.alternate, bindings, loader_var_of, edits);
        }
        Expr::Call(c) => {
            visit_call_like(&c.callee, bindings, loader_var_of, edits);
            c.arguments.iter().for_each(|a| walk_expr(a, bindings, loader_var_of, edits));
        }
        Expr::New(n) => {
            walk_expr(&n.callee, bindings, loader_var_of, edits);
            n.arguments.iter().for_each(|a| walk_expr(a, bindings, loader_var_of, edits));
        }
        Expr::Member(m) => {
            walk_expr(&m.object, bindings, loader_var_of, edits);
            if m.computed {
                walk_expr(&m.property, bindings, loader_var_of, edits);
            }
        }
        Expr::Spread(s) => walk_expr(&s.argument, bindings, loader_var_of, edits),
        Expr::Sequence(s) => s.expressions.iter().for_each(|e| walk_expr(e, bindings, loader_var_of, edits)),
        Expr::Paren(p) => walk_expr(&p.inner, bindings, loader_var_of, edits),
        Expr::DynamicImport(d) => walk_expr(&d.argument, bindings, loader_var_of, edits),
        Expr::Await(a) => walk_expr(&a.argument, bindings, loader_var_of, edits),
        Expr::Yield(y) => {
            if let Some(arg) = &y.argument {
                walk_expr(arg, bindings, loader_var_of, edits);
            }
        }
    }
}

fn walk_property_key(key: &PropertyKey, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    if let PropertyKey::Computed(e) = key {
        walk_expr(e, bindings, loader_var_of, edits);
    }
}

fn walk_pattern(pattern: &Pattern, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    match pattern {
        Pattern::Ident(_) => {}
        Pattern::Array(a) => a.elements.iter().flatten().for_each(|p| walk_pattern(p, bindings, loader_var_of, edits)),
        Pattern::Object(o) => {
            for prop in &o.props {
                match prop {
                    ObjectPatternProp::KeyValue { key, value, computed } => {
                        if *computed {
                            walk_property_key(key, bindings, loader_var_of, edits);
                        }
                        walk_pattern(value, bindings, loader_var_of, edits);
                    }
                    ObjectPatternProp::Shorthand { default, .. } => {
                        if let Some(d) = default {
                            walk_expr(d, bindings, loader_var_of, edits);
                        }
                    }
                    ObjectPatternProp::Rest(r) => walk_pattern(r, bindings, loader_var_of, edits),
                }
            }
        }
        Pattern::Assign(a) => {
            walk_pattern(&a.target, bindings, loader_var_of, edits);
            walk_expr(&a.default, bindings, loader_var_of, edits);
        }
        Pattern::Rest(r) => walk_pattern(&r.argument, bindings, loader_var_of, edits),
    }
}

fn walk_function(f: &Function, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    f.params.iter().for_each(|p| walk_pattern(p, bindings, loader_var_of, edits));
    walk_block(&f.body, bindings, loader_var_of, edits);
}

fn walk_arrow(a: &ArrowFunction, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    a.params.iter().for_each(|p| walk_pattern(p, bindings, loader_var_of, edits));
    match &a.body {
        bundler_ast::ArrowBody::Block(b) => walk_block(b, bindings, loader_var_of, edits),
        bundler_ast::ArrowBody::Expr(e) => walk_expr(e, bindings, loader_var_of, edits),
    }
}

fn walk_class(c: &Class, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    if let Some(sup) = &c.super_class {
        walk_expr(sup, bindings, loader_var_of, edits);
    }
    for member in &c.body {
        match member {
            ClassMember::Method { key, computed, function, .. } => {
                if *computed {
                    walk_property_key(key, bindings, loader_var_of, edits);
                }
                walk_function(function, bindings, loader_var_of, edits);
            }
            ClassMember::Field { key, computed, value, .. } => {
                if *computed {
                    walk_property_key(key, bindings, loader_var_of, edits);
                }
                if let Some(v) = value {
                    walk_expr(v, bindings, loader_var_of, edits);
                }
            }
            ClassMember::StaticBlock(b) => walk_block(b, bindings, loader_var_of, edits),
        }
    }
}

fn walk_block(b: &Block, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    b.stmts.iter().for_each(|s| walk_stmt(s, bindings, loader_var_of, edits));
}

fn walk_var_decl(v: &VarDecl, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    for declarator in &v.declarators {
        walk_pattern(&declarator.binding, bindings, loader_var_of, edits);
        if let Some(init) = &declarator.init {
            walk_expr(init, bindings, loader_var_of, edits);
        }
    }
}

fn walk_for_init(init: &ForInit, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    match init {
        ForInit::VarDecl(v) => walk_var_decl(v, bindings, loader_var_of, edits),
        ForInit::Expr(e) => walk_expr(e, bindings, loader_var_of, edits),
    }
}

fn walk_stmt(stmt: &Stmt, bindings: Bindings, loader_var_of: LoaderVars, edits: &mut Vec<Edit>) {
    match stmt {
        Stmt::Expr(e, _) => walk_expr(e, bindings, loader_var_of, edits),
        Stmt::VarDecl(v) => walk_var_decl(v, bindings, loader_var_of, edits),
        Stmt::FunctionDecl(f) => walk_function(f, bindings, loader_var_of, edits),
        Stmt::ClassDecl(c) => walk_class(c, bindings, loader_var_of, edits),
        Stmt::Block(b) => walk_block(b, bindings, loader_var_of, edits),
        Stmt::If(i) => {
            walk_expr(&i.test, bindings, loader_var_of, edits);
            walk_stmt(&i.consequent, bindings, loader_var_of, edits);
            if let Some(alt) = &i.alternate {
                walk_stmt(alt, bindings, loader_var_of, edits);
            }
        }
        Stmt::For(f) => {
            if let Some(init) = &f.init {
                walk_for_init(init, bindings, loader_var_of, edits);
            }
            if let Some(test) = &f.test {
                walk_expr(test, bindings, loader_var_of, edits);
            }
            if let Some(update) = &f.update {
                walk_expr(update, bindings, loader_var_of, edits);
            }
            walk_stmt(&f.body, bindings, loader_var_of, edits);
        }
        Stmt::ForEach(f) => {
            walk_for_init(&f.left, bindings, loader_var_of, edits);
            walk_expr(&f.right, bindings, loader_var_of, edits);
            walk_stmt(&f.body, bindings, loader_var_of, edits);
        }
        Stmt::While(w) => {
            walk_expr(&w.test, bindings, loader_var_of, edits);
            walk_stmt(&w.body, bindings, loader_var_of, edits);
        }
        Stmt::DoWhile(d) => {
            walk_stmt(&d.body, bindings, loader_var_of, edits);
            walk_expr(&d.test, bindings, loader_var_of, edits);
        }
        Stmt::Switch(s) => {
            walk_expr(&s.discriminant, bindings, loader_var_of, edits);
            for case in &s.cases {
                if let Some(test) = &case.test {
                    walk_expr(test, bindings, loader_var_of, edits);
                }
                case.consequent.iter().for_each(|s| walk_stmt(s, bindings, loader_var_of, edits));
            }
        }
        Stmt::Try(t) => {
            walk_block(&t.block, bindings, loader_var_of, edits);
            if let Some(handler) = &t.handler {
                if let Some(param) = &handler.param {
                    walk_pattern(param, bindings, loader_var_of, edits);
                }
                walk_block(&handler.body, bindings, loader_var_of, edits);
            }
            if let Some(finalizer) = &t.finalizer {
                walk_block(finalizer, bindings, loader_var_of, edits);
            }
        }
        Stmt::Labeled(l) => walk_stmt(&l.body, bindings, loader_var_of, edits),
        Stmt::Return(Some(e), _) | Stmt::Throw(e, _) => walk_expr(e, bindings, loader_var_of, edits),
        Stmt::Return(None, _) | Stmt::Break(..) | Stmt::Continue(..) | Stmt::Empty(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use bundler_ast::{ImportedBinding, ImportedName};
    use pretty_assertions::assert_eq;

    use super::*;

    fn bindings_with(name: &str, specifier: &str, imported_name: ImportedName) -> IndexMap<Box<str>, ImportedBinding> {
        let mut map = IndexMap::new();
        map.insert(name.into(), ImportedBinding { module_specifier: specifier.into(), imported_name });
        map
    }

    #[test]
    fn rewrites_free_call_callee_with_this_suppressing_wrap() {
        let program = bundler_parser::parse_module("add(2, 3);").unwrap();
        let bindings = bindings_with("add", "./math.js", ImportedName::Named("add".into()));
        let loader_var_of: IndexMap<Box<str>, String> = [("./math.js".into(), "_math_".to_owned())].into();

        let mut edits = Vec::new();
        collect_rewrite_edits(&program.body, None, &bindings, &loader_var_of, &mut edits);

        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].replacement, "(0, _math_.add)");
    }

    #[test]
    fn does_not_wrap_member_access_without_a_call() {
        let program = bundler_parser::parse_module("const x = ns.value;").unwrap();
        let bindings = bindings_with("ns", "./m.js", ImportedName::Namespace);
        let loader_var_of: IndexMap<Box<str>, String> = [("./m.js".into(), "_m_".to_owned())].into();

        let mut edits = Vec::new();
        collect_rewrite_edits(&program.body, None, &bindings, &loader_var_of, &mut edits);

        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].replacement, "_m_");
    }

    #[test]
    fn skips_non_free_occurrences() {
        let program = bundler_parser::parse_module("function add(add) { return add; }").unwrap();
        let bindings = bindings_with("add", "./math.js", ImportedName::Named("add".into()));
        let loader_var_of: IndexMap<Box<str>, String> = [("./math.js".into(), "_math_".to_owned())].into();

        let mut edits = Vec::new();
        collect_rewrite_edits(&program.body, None, &bindings, &loader_var_of, &mut edits);

        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].replacement, "_math_.add");
    }
}
