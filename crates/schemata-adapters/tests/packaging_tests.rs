//! Packaging against real and in-memory workspaces.

use std::fs;
use std::path::Path;

use schemata_adapters::{LocalWorkspace, MemoryWorkspace, NoopCompiler};
use schemata_core::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "$schema": "../node_modules/@angular-devkit/schematics/collection-schema.json",
  "schematics": {
    "foo": {
      "description": "Creates a foo.",
      "factory": "./foo/index#foo",
      "schema": "./foo/schema.json"
    },
    "bar": {
      "factory": "./bar/index#bar"
    }
  }
}"#;

const DESCRIPTOR: &str = r#"{
  "name": "my-schematics",
  "version": "1.2.3",
  "description": "A blank schematics",
  "scripts": { "build": "tsc -p tsconfig.json" },
  "dependencies": {
    "@angular-devkit/core": "^17.0.0",
    "@angular-devkit/schematics": "^17.0.0",
    "typescript": "~5.2.2"
  }
}"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "package.json", DESCRIPTOR);
    write(root, "src/collection.json", MANIFEST);
    write(root, "src/foo/schema.json", r#"{"$id":"foo","type":"object"}"#);
    write(root, "src/foo/index.ts", "export function foo() {}");
    write(root, "src/bar/index.ts", "export function bar() {}");
    write(root, "src/bar/files/greeting.txt", "hello <%= name %>\n");
    write(root, "src/bar/files/nested/schema.json", r#"{"nested":true}"#);
    tmp
}

fn packager(root: &Path) -> PackagingService {
    PackagingService::new(
        Box::new(LocalWorkspace::new()),
        Box::new(NoopCompiler),
        CollectionLayout::new(root),
    )
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn schema_and_template_files_land_at_same_relative_paths() {
    let tmp = sample_project();
    let root = tmp.path();

    packager(root).package().unwrap();

    assert_eq!(read(root, "build/foo/schema.json"), read(root, "src/foo/schema.json"));
    assert_eq!(
        read(root, "build/bar/files/greeting.txt"),
        read(root, "src/bar/files/greeting.txt")
    );
    assert_eq!(
        read(root, "build/bar/files/nested/schema.json"),
        read(root, "src/bar/files/nested/schema.json")
    );
}

#[test]
fn nothing_else_from_bar_is_copied() {
    let tmp = sample_project();
    let root = tmp.path();

    packager(root).package().unwrap();

    let mut bar: Vec<String> = fs::read_dir(root.join("build/bar"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    bar.sort();
    assert_eq!(bar, ["files"]);
    assert!(!root.join("build/foo/index.ts").exists());
}

#[test]
fn packaging_twice_is_byte_identical() {
    let tmp = sample_project();
    let root = tmp.path();
    let service = packager(root);

    let first = service.package().unwrap();
    let manifest = read(root, "build/collection.json");
    let schema = read(root, "build/foo/schema.json");
    let descriptor = read(root, "build/package.json");

    let second = service.package().unwrap();

    assert_eq!(read(root, "build/collection.json"), manifest);
    assert_eq!(read(root, "build/foo/schema.json"), schema);
    assert_eq!(read(root, "build/package.json"), descriptor);
    assert_eq!(first.tree, second.tree);
    assert!(!first.state.removed_previous_build);
    assert!(second.state.removed_previous_build);
}

#[test]
fn manifest_round_trips_except_schema_ref() {
    let tmp = sample_project();
    let root = tmp.path();

    packager(root).package().unwrap();

    let expected = MANIFEST.replace(
        "../node_modules/@angular-devkit/schematics/collection-schema.json",
        "@angular-devkit/schematics/collection-schema.json",
    );
    assert_eq!(read(root, "build/collection.json"), expected);
}

#[test]
fn descriptor_fields_match_project() {
    let tmp = sample_project();
    let root = tmp.path();

    packager(root).package().unwrap();

    let source: serde_json::Value = serde_json::from_str(DESCRIPTOR).unwrap();
    let built: serde_json::Value =
        serde_json::from_str(&read(root, "build/package.json")).unwrap();

    for field in ["name", "version", "description"] {
        assert_eq!(built[field], source[field], "field {field}");
    }
    assert_eq!(built["schematics"], "./collection.json");
    assert_eq!(built["dependencies"]["@angular-devkit/core"], "^17.0.0");
    assert!(built["dependencies"].get("typescript").is_none());
    assert!(built.get("scripts").is_none());
}

#[test]
fn report_lists_build_tree() {
    let tmp = sample_project();
    let report = packager(tmp.path()).package().unwrap();

    assert!(report.state.is_complete());
    assert_eq!(
        report.tree.file_paths(),
        [
            "bar/files/greeting.txt",
            "bar/files/nested/schema.json",
            "collection.json",
            "foo/schema.json",
            "package.json",
        ]
    );
}

#[test]
fn disabled_compiler_ships_no_factory_code() {
    let tmp = sample_project();
    let root = tmp.path();
    write(root, "src/foo/index.js", "exports.foo = () => {};");

    packager(root).package().unwrap();

    assert!(root.join("build/foo/schema.json").exists());
    assert!(!root.join("build/foo/index.js").exists());
    assert!(!root.join("build/foo/index.ts").exists());
}

#[test]
fn missing_manifest_aborts() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "package.json", DESCRIPTOR);
    fs::create_dir_all(tmp.path().join("src")).unwrap();

    let err = packager(tmp.path()).package().unwrap_err();

    assert_eq!(err.category(), ErrorCategory::NotFound);
}

#[test]
fn memory_workspace_packages_the_same_tree() {
    let ws = MemoryWorkspace::new()
        .with_file("/p/package.json", DESCRIPTOR)
        .with_file("/p/src/collection.json", MANIFEST)
        .with_file("/p/src/foo/schema.json", "{}")
        .with_file("/p/src/bar/files/greeting.txt", "hi");

    let service = PackagingService::new(
        Box::new(ws.clone()),
        Box::new(NoopCompiler),
        CollectionLayout::new("/p"),
    );
    let report = service.package().unwrap();

    assert_eq!(
        report.tree.file_paths(),
        [
            "bar/files/greeting.txt",
            "collection.json",
            "foo/schema.json",
            "package.json",
        ]
    );
    assert_eq!(
        ws.read_file(Path::new("/p/build/bar/files/greeting.txt")).as_deref(),
        Some("hi")
    );
}
