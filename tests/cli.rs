use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// A temporary project with an installed `node_modules` tree.
struct TestProject {
    dir: TempDir,
    binary_path: String,
}

impl TestProject {
    fn new(root_json: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("package.json"), root_json).expect("write root manifest");
        let binary_path = env!("CARGO_BIN_EXE_pkg-license-audit").to_string();
        Self { dir, binary_path }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn install(&self, name: &str, json: &str) {
        let dir = self.path().join("node_modules").join(name);
        std::fs::create_dir_all(&dir).expect("create package dir");
        std::fs::write(dir.join("package.json"), json).expect("write manifest");
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .arg(self.path())
            .args(args)
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to run pkg-license-audit")
    }
}

fn compliant_project() -> TestProject {
    let project = TestProject::new(
        r#"{ "name": "app", "version": "1.0.0", "dependencies": { "left-pad": "^1.0.0" } }"#,
    );
    project.install(
        "left-pad",
        r#"{ "name": "left-pad", "version": "1.3.0", "license": "MIT", "author": "Azer <azer@example.com>" }"#,
    );
    project
}

#[test]
fn test_json_output_with_root() {
    let project = compliant_project();
    let output = project.run(&["-f", "json", "--include-root", "--return-error"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let tree: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(tree["name"], "app");
    assert_eq!(tree["dependencies"][0]["name"], "left-pad");
    assert_eq!(tree["dependencies"][0]["licenses"], serde_json::json!(["MIT"]));
    assert_eq!(tree["dependencies"][0]["publisher"], "Azer");
    assert_eq!(tree["dependencies"][0]["email"], "azer@example.com");
}

#[test]
fn test_return_error_sets_exit_code() {
    let project = TestProject::new(r#"{ "name": "app", "dependencies": { "gpl-thing": "1" } }"#);
    project.install("gpl-thing", r#"{ "name": "gpl-thing", "version": "1.0.0", "license": "GPL-3.0" }"#);

    let lenient = project.run(&[]);
    assert!(lenient.status.success());
    let stderr = String::from_utf8_lossy(&lenient.stderr);
    assert!(stderr.contains("use complex license"));
    assert!(stderr.contains("+ gpl-thing@1.0.0: GPL-3.0"));

    let strict = project.run(&["--return-error"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_missing_dependency_is_not_fatal() {
    let project = TestProject::new(r#"{ "name": "app", "dependencies": { "ghost": "1", "ok": "1" } }"#);
    project.install("ok", r#"{ "name": "ok", "license": "ISC" }"#);

    let output = project.run(&["-f", "json"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found package.json for ghost"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lists: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(lists["dependencies"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_missing_root_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_pkg-license-audit"))
        .arg(dir.path())
        .output()
        .expect("Failed to run pkg-license-audit");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no package.json found"));
}

#[test]
fn test_output_file() {
    let project = compliant_project();

    // nothing requires attribution, so the list is empty and no file is written
    let output = project.run(&["-o", "NOTICE.txt", "-q"]);
    assert!(output.status.success());
    assert!(!project.path().join("NOTICE.txt").exists());

    let output = project.run(&["-o", "NOTICE.txt", "-q", "--output-force"]);
    assert!(output.status.success());
    assert!(project.path().join("NOTICE.txt").exists());

    let output = project.run(&["-o", "licenses.csv", "-f", "csv", "-q"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let csv = std::fs::read_to_string(project.path().join("licenses.csv")).unwrap();
    assert!(csv.contains("app@1.0.0,left-pad,1.3.0,false,MIT"));
}

#[test]
fn test_exclude_and_config_file() {
    let project = TestProject::new(
        r#"{ "name": "app", "dependencies": { "a": "1", "b": "1" }, "devDependencies": { "t": "1" } }"#,
    );
    project.install("a", r#"{ "name": "a", "license": "BSD-4-Clause" }"#);
    project.install("b", r#"{ "name": "b", "license": "BSD-4-Clause" }"#);
    project.install("t", r#"{ "name": "t", "license": "BSD-4-Clause" }"#);
    std::fs::create_dir(project.path().join(".pkg-license-audit")).unwrap();
    std::fs::write(
        project.path().join(".pkg-license-audit").join("config.toml"),
        "[collect]\ndev = true\n",
    )
    .unwrap();

    let output = project.run(&["--exclude", "b"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("+ a\n"));
    assert!(stdout.contains("- t\n"));
    assert!(!stdout.contains("+ b\n"));
}
