//! Configuration schema: typed model, validation, and loading from disk

pub mod model;
pub mod schema;

use anyhow::{Context, Result};
use std::path::Path;

pub use model::{
    Auth, Backend, Configuration, Database, DevOps, Docker, Frontend, OptionalFeature, Output,
    ProjectType, Repo, Visibility,
};
pub use schema::validate;

/// Parse a configuration document into an untyped tree.
/// `.yaml`/`.yml` files are read as YAML, everything else as JSON.
pub fn parse_document(path: &Path, content: &str) -> Result<serde_json::Value> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(content)
            .with_context(|| format!("Failed to parse YAML config {}", path.display()))
    } else {
        serde_json::from_str(content)
            .with_context(|| format!("Failed to parse JSON config {}", path.display()))
    }
}

/// Load and validate a configuration file
pub async fn load_config(path: &Path) -> Result<Configuration> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    let raw = parse_document(path, &content)?;
    let config = validate(&raw)
        .with_context(|| format!("Failed to validate config {}", path.display()))?;
    Ok(config)
}
