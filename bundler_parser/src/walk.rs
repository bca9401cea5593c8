//! A narrow tree walk whose only job is to find every dynamic `import(...)`
//! call expression in a parsed module body, in source order, and turn it
//! into a [`DynamicImportSite`]. Literal-string arguments are recorded as
//! resolvable targets; anything else is kept unresolved (`specifier: None`)
//! so the chunk planner leaves the call site untouched instead of guessing.

use bundler_ast::expression::ObjectMember;
use bundler_ast::function::ArrowBody;
use bundler_ast::{
    Block, Class, ClassMember, DefaultExportNode, DynamicImportSite, Expr, Function, Pattern, Stmt,
};

pub fn collect_dynamic_imports(
    body: &[Stmt],
    default_node: Option<&DefaultExportNode>,
) -> Vec<DynamicImportSite> {
    let mut out = Vec::new();
    for stmt in body {
        visit_stmt(stmt, &mut out);
    }
    if let Some(node) = default_node {
        match node {
            DefaultExportNode::Function(f) => visit_function(f, &mut out),
            DefaultExportNode::Class(c) => visit_class(c, &mut out),
            DefaultExportNode::Expr(e) => visit_expr(e, &mut out),
        }
    }
    out
}

fn record(expr: &Expr, out: &mut Vec<DynamicImportSite>) {
    if let Expr::DynamicImport(d) = expr {
        let specifier = match d.argument.as_ref() {
            Expr::Str(s) => Some(s.value.clone()),
            _ => None,
        };
        out.push(DynamicImportSite { specifier, resolved_absolute_path: None, span: d.span });
        visit_expr(&d.argument, out);
    }
}

fn visit_stmt(stmt: &Stmt, out: &mut Vec<DynamicImportSite>) {
    match stmt {
        Stmt::Expr(e, _) => visit_expr(e, out),
        Stmt::VarDecl(v) => {
            for d in &v.declarators {
                visit_pattern(&d.binding, out);
                if let Some(init) = &d.init {
                    visit_expr(init, out);
                }
            }
        }
        Stmt::FunctionDecl(f) => visit_function(f, out),
        Stmt::ClassDecl(c) => visit_class(c, out),
        Stmt::Block(b) => visit_block(b, out),
        Stmt::If(i) => {
            visit_expr(&i.test, out);
            visit_stmt(&i.consequent, out);
            if let Some(alt) = &i.alternate {
                visit_stmt(alt, out);
            }
        }
        Stmt::For(f) => {
            if let Some(init) = &f.init {
                visit_for_init(init, out);
            }
            if let Some(test) = &f.test {
                visit_expr(test, out);
            }
            if let Some(update) = &f.update {
                visit_expr(update, out);
            }
            visit_stmt(&f.body, out);
        }
        Stmt::ForEach(f) => {
            visit_for_init(&f.left, out);
            visit_expr(&f.right, out);
            visit_stmt(&f.body, out);
        }
        Stmt::While(w) => {
            visit_expr(&w.test, out);
            visit_stmt(&w.body, out);
        }
        Stmt::DoWhile(d) => {
            visit_stmt(&d.body, out);
            visit_expr(&d.test, out);
        }
        Stmt::Switch(s) => {
            visit_expr(&s.discriminant, out);
            for case in &s.cases {
                if let Some(test) = &case.test {
                    visit_expr(test, out);
                }
                for stmt in &case.consequent {
                    visit_stmt(stmt, out);
                }
            }
        }
        Stmt::Try(t) => {
            visit_block(&t.block, out);
            if let Some(handler) = &t.handler {
                if let Some(param) = &handler.param {
                    visit_pattern(param, out);
                }
                visit_block(&handler.body, out);
            }
            if let Some(f) = &t.finalizer {
                visit_block(f, out);
            }
        }
        Stmt::Labeled(l) => visit_stmt(&l.body, out),
        Stmt::Return(e, _) => {
            if let Some(e) = e {
                visit_expr(e, out);
            }
        }
        Stmt::Throw(e, _) => visit_expr(e, out),
        Stmt::Break(_, _) | Stmt::Continue(_, _) | Stmt::Empty(_) => {}
    }
}

fn visit_for_init(init: &bundler_ast::statement::ForInit, out: &mut Vec<DynamicImportSite>) {
    match init {
        bundler_ast::statement::ForInit::VarDecl(v) => {
            for d in &v.declarators {
                visit_pattern(&d.binding, out);
                if let Some(e) = &d.init {
                    visit_expr(e, out);
                }
            }
        }
        bundler_ast::statement::ForInit::Expr(e) => visit_expr(e, out),
    }
}

fn visit_block(block: &Block, out: &mut Vec<DynamicImportSite>) {
    for stmt in &block.stmts {
        visit_stmt(stmt, out);
    }
}

fn visit_function(f: &Function, out: &mut Vec<DynamicImportSite>) {
    for p in &f.params {
        visit_pattern(p, out);
    }
    visit_block(&f.body, out);
}

fn visit_class(c: &Class, out: &mut Vec<DynamicImportSite>) {
    if let Some(sup) = &c.super_class {
        visit_expr(sup, out);
    }
    for member in &c.body {
        match member {
            ClassMember::Method { function, .. } => visit_function(function, out),
            ClassMember::Field { value, .. } => {
                if let Some(v) = value {
                    visit_expr(v, out);
                }
            }
            ClassMember::StaticBlock(b) => visit_block(b, out),
        }
    }
}

fn visit_pattern(pattern: &Pattern, out: &mut Vec<DynamicImportSite>) {
    match pattern {
        Pattern::Ident(_) => {}
        Pattern::Array(a) => {
            for el in a.elements.iter().flatten() {
                visit_pattern(el, out);
            }
        }
        Pattern::Object(o) => {
            for prop in &o.props {
                match prop {
                    bundler_ast::pattern::ObjectPatternProp::KeyValue { value, .. } => {
                        visit_pattern(value, out);
                    }
                    bundler_ast::pattern::ObjectPatternProp::Shorthand { default, .. } => {
                        if let Some(d) = default {
                            visit_expr(d, out);
                        }
                    }
                    bundler_ast::pattern::ObjectPatternProp::Rest(r) => visit_pattern(r, out),
                }
            }
        }
        Pattern::Assign(a) => {
            visit_pattern(&a.target, out);
            visit_expr(&a.default, out);
        }
        Pattern::Rest(r) => visit_pattern(&r.argument, out),
    }
}

fn visit_expr(expr: &Expr, out: &mut Vec<DynamicImportSite>) {
    match expr {
        Expr::DynamicImport(_) => record(expr, out),
        Expr::Ident(_)
        | Expr::Number(_)
        | Expr::Str(_)
        | Expr::Bool(..)
        | Expr::Null(_)
        | Expr::This(_)
        | Expr::Regex(_) => {}
        Expr::Template(t) => {
            for e in &t.exprs {
                visit_expr(e, out);
            }
        }
        Expr::TaggedTemplate(t) => {
            visit_expr(&t.tag, out);
            for e in &t.quasi.exprs {
                visit_expr(e, out);
            }
        }
        Expr::Array(a) => {
            for el in a.elements.iter().flatten() {
                visit_expr(el, out);
            }
        }
        Expr::Object(o) => {
            for member in &o.props {
                match member {
                    ObjectMember::Prop(p) => visit_expr(&p.value, out),
                    ObjectMember::Spread(e) => visit_expr(e, out),
                }
            }
        }
        Expr::Function(f) => visit_function(f, out),
        Expr::Arrow(a) => {
            for p in &a.params {
                visit_pattern(p, out);
            }
            match &a.body {
                ArrowBody::Block(b) => visit_block(b, out),
                ArrowBody::Expr(e) => visit_expr(e, out),
            }
        }
        Expr::Class(c) => visit_class(c, out),
        Expr::Unary(u) => visit_expr(&u.argument, out),
        Expr::Update(u) => visit_expr(&u.argument, out),
        Expr::Binary(b) => {
            visit_expr(&b.left, out);
            visit_expr(&b.right, out);
        }
        Expr::Logical(l) => {
            visit_expr(&l.left, out);
            visit_expr(&l.right, out);
        }
        Expr::Assign(a) => {
            visit_expr(&a.target, out);
            visit_expr(&a.value, out);
        }
        Expr::Conditional(c) => {
            visit_expr(&c.test, out);
            visit_expr(&c.consequent, out);
            visit_expr(&c.alternate, out);
        }
        Expr::Call(c) => {
            visit_expr(&c.callee, out);
            for a in &c.arguments {
                visit_expr(a, out);
            }
        }
        Expr::New(n) => {
            visit_expr(&n.callee, out);
            for a in &n.arguments {
                visit_expr(a, out);
            }
        }
        Expr::Member(m) => {
            visit_expr(&m.object, out);
            if m.computed {
                visit_expr(&m.property, out);
            }
        }
        Expr::Spread(s) => visit_expr(&s.argument, out),
        Expr::Sequence(s) => {
            for e in &s.expressions {
                visit_expr(e, out);
            }
        }
        Expr::Paren(p) => visit_expr(&p.inner, out),
        Expr::Await(a) => visit_expr(&a.argument, out),
        Expr::Yield(y) => {
            if let Some(a) = &y.argument {
                visit_expr(a, out);
            }
        }
    }
}
