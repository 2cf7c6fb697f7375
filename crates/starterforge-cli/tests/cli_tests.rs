use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn starterforge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("starterforge").unwrap();
    cmd.current_dir(dir)
        .env_remove("STARTERFORGE_OUTPUT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

const WEB_APP: &str = r#"{
  "project_type": "web_app",
  "frontend": { "framework": "react" },
  "backend": { "language": "node", "framework": "express" },
  "database": { "engines": ["postgresql"] },
  "auth": { "provider": "auth0" },
  "output": { "format": ["zip"] }
}"#;

#[test]
fn test_generate_from_json() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "starter.json", WEB_APP);

    starterforge(tmp.path())
        .args(["generate", "--config", "starter.json", "--output-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files scaffolded in:"))
        .stdout(predicate::str::contains("scaffold.sh"))
        .stdout(predicate::str::contains("web_app.zip"));

    let dir = tmp.path().join("out/web_app");
    assert!(dir.join("README.md").exists());
    assert!(dir.join("package.json").exists());
    assert!(dir.join("database/schema.prisma").exists());
    assert!(tmp.path().join("out/web_app.zip").exists());
}

#[test]
fn test_generate_from_yaml() {
    let tmp = TempDir::new().unwrap();
    write_config(
        tmp.path(),
        "starter.yaml",
        "project_type: cli_tool\nbackend:\n  language: python\n  framework: click\noutput:\n  format: [zip]\n",
    );

    starterforge(tmp.path())
        .args(["generate", "-c", "starter.yaml", "-o", "out"])
        .assert()
        .success();

    assert!(tmp.path().join("out/cli_tool/requirements.txt").exists());
}

#[test]
fn test_generate_script_only() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "starter.json", WEB_APP);

    starterforge(tmp.path())
        .args(["generate", "-c", "starter.json", "-o", "out", "--mode", "script-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files scaffolded in:").not());

    let dir = tmp.path().join("out/web_app");
    assert!(dir.join("scaffold.sh").exists());
    assert!(!dir.join("README.md").exists());
}

#[test]
fn test_generate_output_dir_from_env() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "starter.json", WEB_APP);

    starterforge(tmp.path())
        .env("STARTERFORGE_OUTPUT_DIR", "from-env")
        .args(["generate", "-c", "starter.json", "--mode", "scaffold-only"])
        .assert()
        .success();

    assert!(tmp.path().join("from-env/web_app/README.md").exists());
}

#[test]
fn test_generate_rejects_invalid_config() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "bad.json", r#"{ "project_type": "spaceship" }"#);

    starterforge(tmp.path())
        .args(["generate", "-c", "bad.json", "-o", "out"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("project_type"))
        .stderr(predicate::str::contains("output"));

    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_generate_missing_config_file() {
    let tmp = TempDir::new().unwrap();

    starterforge(tmp.path())
        .args(["generate", "-c", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_list_project_types() {
    let tmp = TempDir::new().unwrap();

    starterforge(tmp.path())
        .args(["list", "types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web_app"))
        .stdout(predicate::str::contains("browser_extension"));
}

#[test]
fn test_list_backends_as_json() {
    let tmp = TempDir::new().unwrap();

    let output = starterforge(tmp.path())
        .args(["list", "backends", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let backends: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(backends
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["language"] == "node" && b["framework"] == "express"));
}

#[test]
fn test_unknown_mode_is_rejected() {
    let tmp = TempDir::new().unwrap();

    starterforge(tmp.path())
        .args(["generate", "-c", "starter.json", "--mode", "everything"])
        .assert()
        .failure()
        .code(2);
}
