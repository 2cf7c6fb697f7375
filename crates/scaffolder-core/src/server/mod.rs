//! HTTP front end: JSON API plus the static wizard page
//!
//! Routes:
//! - `GET /` wizard page
//! - `GET /api/health`, `GET /api/catalog`, `GET /api/wizard/default`
//! - `POST /api/wizard/options`, `POST /api/wizard/step`
//! - `POST /api/generate`, `GET /api/preview/{project_type}`

pub mod handlers;
pub mod runner;
pub mod tree;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use runner::GenerationRunner;
pub use tree::{build_tree, NodeKind, TreeNode};

/// Configuration bodies are small
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub product_name: String,
    pub output_root: PathBuf,
    pub runner: GenerationRunner,
}

impl ServerConfig {
    pub fn new(
        product_name: impl Into<String>,
        output_root: impl Into<PathBuf>,
        runner: GenerationRunner,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            output_root: output_root.into(),
            runner,
        }
    }
}

pub fn create_app(config: ServerConfig) -> Router {
    let api_router = Router::new()
        .route("/health", get(handlers::health))
        .route("/catalog", get(handlers::catalog))
        .route("/wizard/default", get(handlers::default_config))
        .route("/wizard/options", post(handlers::wizard_options))
        .route("/wizard/step", post(handlers::wizard_step))
        .route("/generate", post(handlers::generate))
        .route("/preview/{project_type}", get(handlers::preview))
        .with_state(config);

    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
}

/// Bind the API address
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))
}

/// Serve on an already bound listener until the process exits
pub async fn serve(config: ServerConfig, listener: TcpListener) -> Result<()> {
    tracing::info!(
        addr = %listener.local_addr()?,
        output_root = %config.output_root.display(),
        "{} API listening",
        config.product_name
    );
    axum::serve(listener, create_app(config))
        .await
        .context("Server error")
}
