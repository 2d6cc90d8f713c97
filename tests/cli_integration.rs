use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r##"
folder_path: code
ignore_folders: [".git", "venv"]
output_path: out/snippets.txt
languages:
  Python:
    extensions: [".py"]
    comment_start: "#"
    identifier: "**%"
    block_type: indentation
  JavaScript:
    extensions: [".js"]
    comment_start: "//"
    identifier: "@snip"
    block_type: brace
"##;

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("echosnip.yaml"), CONFIG).unwrap();
    fs::create_dir_all(root.join("code/venv")).unwrap();
    fs::write(
        root.join("code/cache.py"),
        "#**% Cache eviction\ndef evict():\n    x = 1\n    return x\ndone()\n",
    )
    .unwrap();
    fs::write(
        root.join("code/venv/vendored.py"),
        "#**% cache vendored\nx = 1\n",
    )
    .unwrap();
    fs::write(
        root.join("code/app.js"),
        "// @snip fetch users\nasync function fetchUsers() {\n  return get('/users');\n}\n",
    )
    .unwrap();
    temp_dir
}

fn echosnip(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_echosnip"));
    cmd.current_dir(dir).env("RUST_LOG", "warn");
    cmd
}

#[test]
fn search_prints_plain_report() {
    let temp_dir = workspace();
    let expected_path = fs::canonicalize(temp_dir.path()).unwrap().join("code/cache.py");

    echosnip(temp_dir.path())
        .args(["search", "CACHE", "--language", "Python"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---- Found 1 snippet(s) ----\nSearch completed in "))
        .stdout(predicate::str::contains(format!(
            "--- SNIPPET FOUND IN: {} (Line 1) ---\n--- DESCRIPTION: Cache eviction ---\n\ndef evict():\n    x = 1\n    return x\n{}\n",
            expected_path.display(),
            "=".repeat(70)
        )))
        .stdout(predicate::str::contains("vendored").not());
}

#[test]
fn search_without_matches() {
    let temp_dir = workspace();
    echosnip(temp_dir.path())
        .args(["search", "missing", "-l", "python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("---- Found 0 snippet(s) ----"))
        .stdout(predicate::str::contains("No snippets found matching your criteria."));
}

#[test]
fn unknown_language_fails() {
    let temp_dir = workspace();
    echosnip(temp_dir.path())
        .args(["search", "cache", "-l", "Cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown language 'Cobol'"))
        .stderr(predicate::str::contains("Python, JavaScript"));
}

#[test]
fn blank_description_fails() {
    let temp_dir = workspace();
    echosnip(temp_dir.path())
        .args(["search", "  ", "-l", "Python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a description."));
}

#[test]
fn languages_lists_in_config_order() {
    let temp_dir = workspace();
    echosnip(temp_dir.path())
        .arg("languages")
        .assert()
        .success()
        .stdout("Python\nJavaScript\n");
}

#[test]
fn json_format() {
    let temp_dir = workspace();
    let output = echosnip(temp_dir.path())
        .args(["search", "fetch", "users", "-l", "JavaScript", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_snippets"], 1);
    assert_eq!(value["keywords"], serde_json::json!(["fetch", "users"]));
    assert_eq!(
        value["snippets"][0]["content"],
        "async function fetchUsers() {\n  return get('/users');\n}"
    );
}

#[test]
fn save_writes_to_configured_output_path() {
    let temp_dir = workspace();
    echosnip(temp_dir.path())
        .args(["search", "fetch", "-l", "JavaScript", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results successfully written to"));

    let written = fs::read_to_string(temp_dir.path().join("out/snippets.txt")).unwrap();
    assert!(written.starts_with("---- Found 1 snippet(s) ----"));
    assert!(written.contains("--- DESCRIPTION: fetch users ---"));
}

#[test]
fn path_and_ignore_overrides() {
    let temp_dir = workspace();
    fs::create_dir_all(temp_dir.path().join("other/skip")).unwrap();
    fs::write(
        temp_dir.path().join("other/skip/a.py"),
        "#**% cache elsewhere\nx = 1\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("other/b.py"),
        "#**% cache here\ny = 2\n",
    )
    .unwrap();

    echosnip(temp_dir.path())
        .args(["--path", "other", "--ignore", "skip", "search", "cache", "-l", "Python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DESCRIPTION: cache here"))
        .stdout(predicate::str::contains("elsewhere").not());
}

#[test]
fn log_file_receives_debug_output() {
    let temp_dir = workspace();
    echosnip(temp_dir.path())
        .args(["--verbose", "--log", "logs/run.log", "search", "cache", "-l", "Python"])
        .assert()
        .success();

    let log = fs::read_to_string(temp_dir.path().join("logs/run.log")).unwrap();
    assert!(log.contains("[DEBUG]"));
    assert!(log.contains("MATCH FOUND on line 1"));
}

#[test]
fn missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    echosnip(temp_dir.path())
        .args(["--config", "nope.yaml", "languages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
