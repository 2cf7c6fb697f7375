use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use scaffolder_core::{create_app, GenerationRunner, ServerConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(output_root: &TempDir) -> Router {
    create_app(ServerConfig::new(
        "StarterForge",
        output_root.path(),
        GenerationRunner::InProcess,
    ))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = send(app(&tmp), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "StarterForge API is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_index_page() {
    let tmp = TempDir::new().unwrap();
    let response = app(&tmp).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("StarterForge"));
    assert!(html.contains("/api/generate"));
}

#[tokio::test]
async fn test_catalog() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = send(app(&tmp), get("/api/catalog")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step_titles"].as_array().unwrap().len(), 8);
    assert!(body["project_types"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["id"] == "web_app"));
}

#[tokio::test]
async fn test_default_config() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = send(app(&tmp), get("/api/wizard/default")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["project_type"].is_null());
    assert_eq!(body["devops"]["docker"]["enabled"], false);
    assert_eq!(body["output"]["format"], json!(["zip"]));
}

#[tokio::test]
async fn test_wizard_options_flags() {
    let tmp = TempDir::new().unwrap();
    let draft = json!({
        "project_type": "web_app",
        "frontend": { "framework": "react" },
        "backend": { "language": "node", "framework": "express" },
        "database": { "engines": ["postgresql"] }
    });
    let (status, body) = send(app(&tmp), post_json("/api/wizard/options", draft)).await;
    assert_eq!(status, StatusCode::OK);

    let find = |list: &str, id: &str| {
        body[list]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == id)
            .cloned()
            .unwrap()
    };
    assert_eq!(find("ui_libraries", "vuetify")["hidden"], true);
    assert_eq!(find("ui_libraries", "tailwindcss")["recommended"], true);
    assert_eq!(find("orms", "prisma")["recommended"], true);
    assert_eq!(find("orms", "sqlalchemy")["hidden"], true);
}

#[tokio::test]
async fn test_wizard_step_skips_frontend() {
    let tmp = TempDir::new().unwrap();
    let request = json!({ "step": 1, "config": { "project_type": "backend_only" } });
    let (status, body) = send(app(&tmp), post_json("/api/wizard/step", request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["can_proceed"], true);
    assert_eq!(body["next_step"], 3);
    assert_eq!(body["previous_step"], 1);
}

#[tokio::test]
async fn test_wizard_step_out_of_range() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = send(app(&tmp), post_json("/api/wizard/step", json!({ "step": 9 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid step");
}

#[tokio::test]
async fn test_generate_and_preview() {
    let tmp = TempDir::new().unwrap();
    let config = json!({
        "project_type": "backend_only",
        "backend": { "language": "go", "framework": "fiber" },
        "output": { "format": ["zip"] }
    });
    let (status, body) = send(app(&tmp), post_json("/api/generate", config)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["outputPath"].as_str().unwrap().ends_with("backend_only"));
    let names: Vec<&str> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"go.mod"));
    assert!(names.contains(&"src"));

    let (status, body) = send(app(&tmp), get("/api/preview/backend_only")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["structure"]
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["path"] == "backend_only/go.mod"));
}

#[tokio::test]
async fn test_generate_rejects_invalid_config() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = send(
        app(&tmp),
        post_json("/api/generate", json!({ "project_type": "spaceship" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid configuration");
    let issues = body["details"].as_array().unwrap();
    assert!(issues.iter().any(|i| i["path"] == "project_type"));
    assert!(issues.iter().any(|i| i["path"] == "output"));
    assert!(!tmp.path().join("spaceship").exists());
}

#[tokio::test]
async fn test_generate_rejects_malformed_json() {
    let tmp = TempDir::new().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(app(&tmp), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["path"], "");
}

#[tokio::test]
async fn test_preview_missing_project() {
    let tmp = TempDir::new().unwrap();

    let (status, body) = send(app(&tmp), get("/api/preview/web_app")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");

    let response = app(&tmp).oneshot(get("/api/preview/..")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
