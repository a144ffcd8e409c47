//! Integration tests for the schemata binary.
//!
//! Each test builds a throwaway collection project with the compiler
//! disabled and the executor replaced by a shell command.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
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
  "version": "0.1.0",
  "description": "Test collection",
  "dependencies": {
    "@angular-devkit/core": "^17.0.0",
    "@angular-devkit/schematics": "^17.0.0"
  }
}"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Collection project whose executor is `sh -c <script> sh`.
fn project_with_script(script: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "package.json", DESCRIPTOR);
    write(root, "src/collection.json", MANIFEST);
    write(root, "src/foo/schema.json", r#"{"$id":"foo"}"#);
    write(root, "src/bar/index.ts", "export function bar() {}");
    write(root, "src/bar/files/greeting.txt", "hello\n");
    write(
        root,
        "schemata.toml",
        &format!(
            "[compiler]\nenabled = false\n\n[executor]\nprogram = \"sh\"\nargs = [\"-c\", '{script}', \"sh\"]\n"
        ),
    );
    tmp
}

/// The binary, isolated from the user's global config and environment.
fn schemata(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("schemata").unwrap();
    cmd.current_dir(root)
        .env("HOME", root.join(".home"))
        .env("XDG_CONFIG_HOME", root.join(".home/config"))
        .env_remove("SCHEMATA_PROJECT_ROOT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_flag() {
    let tmp = TempDir::new().unwrap();
    schemata(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--list"))
        .stdout(predicate::str::contains("--no-build"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    schemata(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_fails_without_creating_output() {
    let tmp = project_with_script("touch spawned");

    schemata(tmp.path())
        .env_remove("NO_COLOR")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    assert!(!tmp.path().join("output").exists());
    assert!(!tmp.path().join("build").exists());
}

#[test]
fn list_prints_one_line_per_entry() {
    let tmp = project_with_script("touch spawned");

    schemata(tmp.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - foo: Creates a foo.\n"))
        .stdout(predicate::str::contains("  - bar: (no description)\n"));

    assert!(!tmp.path().join("output").exists());
    assert!(!tmp.path().join("build").exists());
}

#[test]
fn build_only_produces_the_build_tree() {
    let tmp = project_with_script("touch spawned");
    let root = tmp.path();

    schemata(root)
        .arg("--build-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("greeting.txt"))
        .stdout(predicate::str::contains("Build completed"));

    assert_eq!(
        fs::read(root.join("build/foo/schema.json")).unwrap(),
        fs::read(root.join("src/foo/schema.json")).unwrap()
    );
    assert_eq!(
        fs::read(root.join("build/bar/files/greeting.txt")).unwrap(),
        b"hello\n"
    );
    assert!(!root.join("build/bar/index.ts").exists());
    assert!(!root.join("output").exists());

    let descriptor: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("build/package.json")).unwrap())
            .unwrap();
    assert_eq!(descriptor["name"], "my-schematics");
    assert_eq!(descriptor["schematics"], "./collection.json");
}

#[cfg(unix)]
#[test]
fn run_spawns_executor_in_output_dir_with_forwarded_args() {
    let tmp = project_with_script(r#"printf "%s\n" "$@" > args.txt"#);
    let root = tmp.path();

    schemata(root)
        .arg("--project-root")
        .arg(root)
        .args(["foo", "--name=test", "--dry-run", "--path=a=b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schematic 'foo' completed"));

    let args = fs::read_to_string(root.join("output/args.txt")).unwrap();
    let expected = format!(
        "{}:foo\n--name=test\n--dry-run\n--path=a=b\n",
        root.join("build").display()
    );
    assert_eq!(args, expected);
    assert!(root.join("build/collection.json").exists());
}

#[cfg(unix)]
#[test]
fn run_mirrors_executor_exit_code() {
    let tmp = project_with_script("exit 3");

    schemata(tmp.path())
        .arg("foo")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Schematic 'foo' failed"));
}

#[cfg(unix)]
#[test]
fn failed_build_never_spawns() {
    let tmp = project_with_script("touch spawned");
    let root = tmp.path();
    write(
        root,
        "schemata.toml",
        "[compiler]\nprogram = \"sh\"\nargs = [\"-c\", \"exit 1\"]\n\n[executor]\nprogram = \"sh\"\nargs = [\"-c\", \"touch spawned\", \"sh\"]\n",
    );

    schemata(root)
        .arg("foo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Compilation failed"));

    assert!(!root.join("output").exists());
}

#[cfg(unix)]
#[test]
fn no_build_skips_packaging() {
    let tmp = project_with_script("touch spawned");
    let root = tmp.path();

    schemata(root).args(["foo", "--no-build"]).assert().success();

    assert!(!root.join("build").exists());
    assert!(root.join("output/spawned").exists());
}

#[cfg(unix)]
#[test]
fn relative_output_resolves_against_invocation_dir() {
    let tmp = project_with_script("touch spawned");
    let root = tmp.path();
    let cwd = root.join("elsewhere");
    fs::create_dir_all(&cwd).unwrap();

    schemata(root)
        .current_dir(&cwd)
        .arg("--project-root")
        .arg(root)
        .args(["foo", "--output=generated"])
        .assert()
        .success();

    assert!(cwd.join("generated/spawned").exists());
    assert!(!root.join("output").exists());
}

/// Project whose configured compiler always fails.
fn project_with_failing_compiler() -> TempDir {
    let tmp = project_with_script("touch spawned");
    write(
        tmp.path(),
        "schemata.toml",
        "[compiler]\nprogram = \"sh\"\nargs = [\"-c\", \"exit 1\"]\n",
    );
    tmp
}

#[test]
fn environment_can_disable_the_compiler() {
    let tmp = project_with_failing_compiler();
    let root = tmp.path();

    schemata(root).arg("--build-only").assert().code(1);

    schemata(root)
        .env("SCHEMATA_COMPILER__ENABLED", "false")
        .arg("--build-only")
        .assert()
        .success();
    assert!(root.join("build/collection.json").exists());
}

#[test]
fn dotenv_file_feeds_the_environment_layer() {
    let tmp = project_with_failing_compiler();
    let root = tmp.path();
    write(root, ".env", "SCHEMATA_COMPILER__ENABLED=false\n");

    schemata(root)
        .env_remove("SCHEMATA_COMPILER__ENABLED")
        .arg("--build-only")
        .assert()
        .success();
    assert!(root.join("build/package.json").exists());
}

#[test]
fn quiet_run_prints_nothing_to_stdout() {
    let tmp = project_with_script("touch spawned");

    schemata(tmp.path())
        .args(["-q", "--build-only"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
