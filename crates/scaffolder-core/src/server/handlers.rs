use super::tree::{build_tree, TreeNode};
use super::ServerConfig;
use crate::catalog::{self, Catalog};
use crate::config::{validate, ProjectType};
use crate::error::{Issue, ScaffoldError, ValidationError};
use crate::wizard::{
    self, can_proceed_from_step, get_next_step, get_previous_step, step_title, ConfigDraft,
    WizardOptions, FIRST_STEP, LAST_STEP,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;

static INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Error responses: `{ success: false, error, details? }`
#[derive(Debug)]
pub enum ApiError {
    InvalidConfiguration(ValidationError),
    InvalidStep(u8),
    NotFound,
    Generation(ScaffoldError),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::InvalidConfiguration(err) => (
                StatusCode::BAD_REQUEST,
                "Invalid configuration".to_string(),
                Some(json!(err.issues)),
            ),
            ApiError::InvalidStep(step) => (
                StatusCode::BAD_REQUEST,
                "Invalid step".to_string(),
                Some(json!(format!("step must be between {FIRST_STEP} and {LAST_STEP}, got {step}"))),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Project not found".to_string(), None),
            ApiError::Generation(ScaffoldError::Validation(err)) => (
                StatusCode::BAD_REQUEST,
                "Invalid configuration".to_string(),
                Some(json!(err.issues)),
            ),
            ApiError::Generation(ScaffoldError::Process {
                message,
                diagnostics,
            }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Project generation failed".to_string(),
                Some(json!({ "message": message, "diagnostics": diagnostics })),
            ),
            ApiError::Generation(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Project generation failed".to_string(),
                Some(json!(err.to_string())),
            ),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
                Some(json!(message)),
            ),
        };

        let mut body = json!({ "success": false, "error": error });
        if let (Some(details), Some(object)) = (details, body.as_object_mut()) {
            object.insert("details".to_string(), details);
        }
        (status, Json(body)).into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health(State(config): State<ServerConfig>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": format!("{} API is running", config.product_name),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn catalog() -> Json<Catalog> {
    Json(catalog::catalog())
}

pub async fn default_config() -> Json<ConfigDraft> {
    Json(wizard::create_default_config())
}

pub async fn wizard_options(Json(draft): Json<ConfigDraft>) -> Json<WizardOptions> {
    Json(wizard::options_for(&draft))
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub step: u8,
    #[serde(default)]
    pub config: ConfigDraft,
}

#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub step: u8,
    pub title: &'static str,
    pub can_proceed: bool,
    pub next_step: u8,
    pub previous_step: u8,
}

pub async fn wizard_step(Json(request): Json<StepRequest>) -> Result<Json<StepResponse>, ApiError> {
    let step = request.step;
    let title = step_title(step).ok_or(ApiError::InvalidStep(step))?;
    let project_type = request.config.project_type;
    Ok(Json(StepResponse {
        step,
        title,
        can_proceed: can_proceed_from_step(step, &request.config),
        next_step: get_next_step(step, project_type),
        previous_step: get_previous_step(step, project_type),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub output_path: String,
    pub files: Vec<TreeNode>,
}

pub async fn generate(
    State(config): State<ServerConfig>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let raw: Value = serde_json::from_slice(&body).map_err(|e| {
        ApiError::InvalidConfiguration(ValidationError::new(vec![Issue {
            path: String::new(),
            message: format!("Malformed JSON: {e}"),
        }]))
    })?;
    let configuration = validate(&raw).map_err(|err| {
        tracing::info!(issues = err.issues.len(), "rejected configuration");
        ApiError::InvalidConfiguration(err)
    })?;

    tracing::info!(project_type = %configuration.project_type, "generation requested");
    let project_dir = config
        .runner
        .run(&configuration, &config.output_root)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "generation failed");
            ApiError::Generation(err)
        })?;

    let files = list_tree(config.output_root.clone(), project_dir.clone()).await?;
    Ok(Json(GenerateResponse {
        success: true,
        message: format!("Project generated successfully at {}", project_dir.display()),
        output_path: project_dir.display().to_string(),
        files,
    }))
}

pub async fn preview(
    State(config): State<ServerConfig>,
    Path(project_type): Path<String>,
) -> Result<Json<Value>, ApiError> {
    // Only enum ids reach the filesystem
    let project_type = ProjectType::from_id(&project_type).ok_or(ApiError::NotFound)?;
    let dir = config.output_root.join(project_type.id());
    if !tokio::fs::try_exists(&dir).await.unwrap_or(false) {
        return Err(ApiError::NotFound);
    }

    let structure = list_tree(config.output_root.clone(), dir).await?;
    Ok(Json(json!({ "success": true, "structure": structure })))
}

async fn list_tree(root: PathBuf, dir: PathBuf) -> Result<Vec<TreeNode>, ApiError> {
    tokio::task::spawn_blocking(move || build_tree(&root, &dir))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| ApiError::Internal(e.to_string()))
}

