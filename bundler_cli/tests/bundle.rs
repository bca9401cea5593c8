//! Filesystem-driving integration tests: materialize a small multi-file JS
//! project, run the built binary against it, and assert on the emitted files.

use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn bundler_bin() -> &'static str {
    env!("CARGO_BIN_EXE_bundler")
}

#[test]
fn bundles_a_simple_two_module_project() {
    let project = tempdir().unwrap();
    fs::write(
        project.path().join("index.js"),
        "import { add } from \"./math.js\";\nconsole.log(add(1, 2));",
    )
    .unwrap();
    fs::write(project.path().join("math.js"), "export function add(a, b) { return a + b; }").unwrap();

    let output = tempdir().unwrap();
    let status = Command::new(bundler_bin())
        .arg("--entry")
        .arg(project.path().join("index.js"))
        .arg("--output")
        .arg(output.path())
        .status()
        .unwrap();
    assert!(status.success());

    let main = fs::read_to_string(output.path().join("main.js")).unwrap();
    assert!(main.contains("\"./index.js\""));
    assert!(main.contains("\"./math.js\""));
    assert!(main.contains("(0, _math_.add)(1, 2)"));
    assert!(!main.contains("import"));
}

#[test]
fn bundles_a_project_with_a_dynamic_import_into_two_files() {
    let project = tempdir().unwrap();
    fs::write(project.path().join("index.js"), "import(\"./feature.js\");").unwrap();
    fs::write(project.path().join("feature.js"), "export const x = 1;").unwrap();

    let output = tempdir().unwrap();
    let status = Command::new(bundler_bin())
        .arg("--entry")
        .arg(project.path().join("index.js"))
        .arg("--output")
        .arg(output.path())
        .status()
        .unwrap();
    assert!(status.success());

    assert!(output.path().join("main.js").exists());
    assert!(output.path().join("feature_js.js").exists());

    let main = fs::read_to_string(output.path().join("main.js")).unwrap();
    assert!(main.contains("function loadChunk(chunkId)"));
}

#[test]
fn exits_with_the_entry_missing_code_for_a_nonexistent_entry() {
    let output = tempdir().unwrap();
    let status = Command::new(bundler_bin())
        .arg("--entry")
        .arg("/nonexistent/entry.js")
        .arg("--output")
        .arg(output.path())
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(3));
}

#[test]
fn exits_with_the_unresolved_module_code_for_a_missing_import() {
    let project = tempdir().unwrap();
    fs::write(project.path().join("index.js"), "import { x } from \"./missing.js\";").unwrap();

    let output = tempdir().unwrap();
    let status = Command::new(bundler_bin())
        .arg("--entry")
        .arg(project.path().join("index.js"))
        .arg("--output")
        .arg(output.path())
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(4));
}

#[test]
fn exits_with_the_usage_code_when_required_arguments_are_missing() {
    let status = Command::new(bundler_bin()).status().unwrap();
    assert_eq!(status.code(), Some(2));
}
