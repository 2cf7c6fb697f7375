use scaffolder_core::config::validate;
use scaffolder_core::generator::{render_project, SCRIPT_NAME};
use scaffolder_core::{generate, Configuration, GenerationMode};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn web_app() -> Configuration {
    validate(&json!({
        "project_type": "web_app",
        "frontend": { "framework": "react", "ui_libraries": ["tailwind"] },
        "backend": { "language": "node", "framework": "express" },
        "database": { "engines": ["postgresql"] },
        "auth": { "provider": "auth0" },
        "output": { "format": ["zip"] }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_web_app_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let report = generate(&web_app(), GenerationMode::All, tmp.path())
        .await
        .unwrap();

    let dir = tmp.path().join("web_app");
    assert_eq!(report.project_dir, dir);

    let readme = fs::read_to_string(dir.join("README.md")).unwrap();
    assert!(readme.contains("Backend**: node (express)"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap();
    assert!(manifest["dependencies"]["express"].is_string());

    let schema = fs::read_to_string(dir.join("database/schema.prisma")).unwrap();
    assert!(schema.contains("provider = \"postgresql\""));

    let auth = fs::read_to_string(dir.join("auth/auth0-config.js")).unwrap();
    assert!(auth.contains("AUTH0_DOMAIN"));

    assert!(dir.join(SCRIPT_NAME).exists());
    assert!(tmp.path().join("web_app.zip").exists());
}

#[tokio::test]
async fn test_generation_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let config = web_app();

    let first = generate(&config, GenerationMode::All, tmp.path()).await.unwrap();
    let snapshot: Vec<(String, Vec<u8>)> = first
        .files_written
        .iter()
        .map(|p| (p.clone(), fs::read(first.project_dir.join(p)).unwrap()))
        .collect();
    let zip = fs::read(tmp.path().join("web_app.zip")).unwrap();

    let second = generate(&config, GenerationMode::All, tmp.path()).await.unwrap();
    assert_eq!(first.files_written, second.files_written);
    for (path, bytes) in &snapshot {
        assert_eq!(&fs::read(second.project_dir.join(path)).unwrap(), bytes, "{path}");
    }
    assert_eq!(fs::read(tmp.path().join("web_app.zip")).unwrap(), zip);
}

#[tokio::test]
async fn test_script_reproduces_scaffold() {
    let config = web_app();
    let tmp = TempDir::new().unwrap();
    let report = generate(&config, GenerationMode::ScriptOnly, tmp.path())
        .await
        .unwrap();

    let script = report.script.unwrap();
    for path in render_project(&config).paths() {
        assert!(script.contains(path), "script is missing {path}");
    }
    assert!(!report.project_dir.join("README.md").exists());
}

#[tokio::test]
async fn test_backend_only_has_no_frontend_files() {
    let config = validate(&json!({
        "project_type": "backend_only",
        "frontend": { "framework": "react" },
        "backend": { "language": "python", "framework": "fastapi" },
        "output": { "format": ["zip"] }
    }))
    .unwrap();

    let files = render_project(&config);
    assert!(files.contains("requirements.txt"));
    assert!(!files.paths().any(|p| p.starts_with("frontend/")));
}
