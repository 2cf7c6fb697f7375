//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to name the product and to supply
//! the defaults and text the shared front ends need.

use crate::config::Configuration;
use std::path::Path;

/// Configuration trait for products built on the scaffolder
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the binary and log targets)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable overriding the output root
    fn output_dir_env(&self) -> &'static str;

    /// Output root used when neither flag nor environment sets one
    fn default_output_dir(&self) -> &'static str {
        "output"
    }

    /// Port the HTTP front end listens on by default
    fn default_port(&self) -> u16 {
        3001
    }

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Instructions printed after a project is generated
    fn next_steps(&self, dir: &Path, config: &Configuration) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;
}
