//! **`bundler_parser`** turns `bundler_lexer` tokens into a `bundler_ast`
//! tree, the way `boa_parser` turns `boa_ast::TokenKind` into `boa_ast`.
//!
//! The top-level entry point, [`parse_module`], is module-grammar aware: it
//! recognizes `import`/`export` at the top of the token stream and flattens
//! them directly into [`bundler_ast::Program`]'s records (`module.rs`), and
//! falls back to the ordinary statement grammar (`stmt.rs`) for everything
//! else. Expression parsing (`expr.rs`) is a standard precedence-climbing
//! parser; `function.rs` and `pattern.rs` hold the grammar shared across
//! declarations, expressions, and destructuring.

#![forbid(unsafe_code)]
#![warn(clippy::dbg_macro)]

pub mod error;
pub mod expr;
pub mod function;
pub mod module;
pub mod pattern;
pub mod stmt;
pub mod stream;
pub mod walk;

pub use error::ParseError;
pub use module::parse_module;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_empty_module() {
        let program = parse_module("").unwrap();
        assert!(program.body.is_empty());
        assert!(program.imports.is_empty());
    }

    #[test]
    fn parses_side_effect_import() {
        let program = parse_module("import \"./polyfill.js\";").unwrap();
        assert_eq!(program.imports.len(), 1);
        assert_eq!(&*program.imports[0].specifier, "./polyfill.js");
        assert!(program.imports[0].specifiers.is_empty());
    }

    #[test]
    fn parses_default_and_named_import() {
        let program = parse_module("import foo, { bar, baz as qux } from \"./m.js\";").unwrap();
        let site = &program.imports[0];
        assert_eq!(site.specifiers.len(), 3);
        assert_eq!(program.imported_bindings.len(), 3);
        assert!(program.imported_bindings.contains_key("qux"));
    }

    #[test]
    fn parses_namespace_import() {
        let program = parse_module("import * as ns from \"./m.js\";").unwrap();
        assert_eq!(program.imports[0].specifiers.len(), 1);
        assert!(program.imported_bindings.contains_key("ns"));
    }

    #[test]
    fn duplicate_import_binding_is_an_error() {
        let err = parse_module("import { a } from \"./x.js\";\nimport { a } from \"./y.js\";")
            .unwrap_err();
        assert!(matches!(err, ParseError::DuplicateBinding { .. }));
    }

    #[test]
    fn parses_named_export_declaration() {
        let program = parse_module("export const a = 1, b = 2;").unwrap();
        assert_eq!(program.named_exports.len(), 2);
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn parses_export_function_declaration() {
        let program = parse_module("export function greet() {}").unwrap();
        assert_eq!(program.named_exports.len(), 1);
        assert_eq!(&*program.named_exports[0].local_name, "greet");
    }

    #[test]
    fn parses_export_specifier_list() {
        let program = parse_module("const a = 1;\nexport { a, a as b };").unwrap();
        assert_eq!(program.named_exports.len(), 2);
        assert_eq!(program.named_exports[0].statement_range, program.named_exports[1].statement_range);
    }

    #[test]
    fn parses_reexport_specifier_list() {
        let program = parse_module("export { a } from \"./m.js\";").unwrap();
        assert_eq!(program.imports.len(), 1);
        assert!(program.imports[0].synthesized_from_reexport);
        assert_eq!(program.named_exports[0].reexport_source.as_deref(), Some("./m.js"));
    }

    #[test]
    fn parses_namespace_reexport() {
        let program = parse_module("export * as widgets from \"./widgets.js\";").unwrap();
        assert_eq!(program.namespace_reexports.len(), 1);
        assert_eq!(program.namespace_reexports[0].exported_name.as_deref(), Some("widgets"));
        assert_eq!(program.imports.len(), 1);
    }

    #[test]
    fn parses_bare_namespace_reexport() {
        let program = parse_module("export * from \"./widgets.js\";").unwrap();
        assert!(program.namespace_reexports[0].exported_name.is_none());
    }

    #[test]
    fn parses_named_default_export() {
        let program = parse_module("export default function named() {}").unwrap();
        let default = program.default_export.unwrap();
        assert_eq!(default.kind, bundler_ast::DefaultExportKind::Declaration);
        assert_eq!(default.inner_name.as_deref(), Some("named"));
    }

    #[test]
    fn parses_anonymous_default_export() {
        let program = parse_module("export default function() {}").unwrap();
        let default = program.default_export.unwrap();
        assert_eq!(default.kind, bundler_ast::DefaultExportKind::Expression);
        assert!(default.inner_name.is_none());
    }

    #[test]
    fn parses_expression_default_export() {
        let program = parse_module("export default 1 + 2;").unwrap();
        let default = program.default_export.unwrap();
        assert_eq!(default.kind, bundler_ast::DefaultExportKind::Expression);
    }

    #[test]
    fn parses_dynamic_import_with_literal_specifier() {
        let program = parse_module("const mod = import(\"./lazy.js\");").unwrap();
        assert_eq!(program.dynamic_imports.len(), 1);
        assert_eq!(program.dynamic_imports[0].specifier.as_deref(), Some("./lazy.js"));
    }

    #[test]
    fn dynamic_import_with_computed_specifier_is_unresolved() {
        let program = parse_module("const mod = import(path);").unwrap();
        assert_eq!(program.dynamic_imports.len(), 1);
        assert!(program.dynamic_imports[0].specifier.is_none());
    }

    #[test]
    fn parses_control_flow_statements() {
        let src = "for (let i = 0; i < 10; i++) { if (i) { continue; } else { break; } }";
        let program = parse_module(src).unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn parses_for_of_and_for_in() {
        let program = parse_module("for (const x of xs) {}\nfor (const k in obj) {}").unwrap();
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn parses_try_catch_finally() {
        let program = parse_module("try { risky(); } catch (e) { handle(e); } finally { cleanup(); }")
            .unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn parses_class_declaration() {
        let program = parse_module(
            "class Widget extends Base {\n  static count = 0;\n  constructor() { super(); }\n  render() {}\n}",
        )
        .unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn reports_unexpected_token() {
        let err = parse_module("const = 1;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
