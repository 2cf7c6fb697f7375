//! Scaffolder Core - shared library behind the StarterForge front ends
//!
//! Every front end (CLI, terminal wizard, HTTP API, browser page) consumes the
//! same schema, catalog, wizard logic and generators from this crate.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure logic** - configuration schema ([`config`]), option catalog
//!   ([`catalog`]), wizard filtering and navigation ([`wizard`]), rendering
//!   ([`generator::render_project`], [`generator::render_script`])
//! - **Layer 2: Effects** - writing and packaging projects ([`generator::generate`]),
//!   toolchain detection ([`runtime`])
//! - **Layer 3: Front ends** - HTTP API ([`server`]) and the cliclack-based
//!   terminal wizard ([`tui`], feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based terminal wizard
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{config, generator::{generate, GenerationMode}};
//!
//! let configuration = config::load_config(Path::new("starter.json")).await?;
//! let report = generate(&configuration, GenerationMode::All, Path::new("output")).await?;
//! println!("{}", report.project_dir.display());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod product;
pub mod runtime;
pub mod server;
pub mod wizard;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Configuration, ProjectType};
pub use error::{Issue, ScaffoldError, ValidationError};
pub use generator::{generate, GenerationMode, GenerationReport};
pub use product::ProductConfig;
pub use server::{create_app, GenerationRunner, ServerConfig};

#[cfg(feature = "tui")]
pub use tui::run;
