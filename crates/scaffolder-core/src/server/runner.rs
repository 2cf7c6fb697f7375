//! How the HTTP front end runs a generation

use crate::config::Configuration;
use crate::error::ScaffoldError;
use crate::generator::{self, GenerationMode};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generation strategy for `POST /api/generate`
#[derive(Debug, Clone)]
pub enum GenerationRunner {
    /// Call the generator directly
    InProcess,
    /// Re-invoke `program generate --config <tmp> --mode all --output-dir <root>`
    Subprocess { program: PathBuf },
}

impl GenerationRunner {
    /// Subprocess runner for the running executable
    pub fn current_exe() -> std::io::Result<Self> {
        Ok(Self::Subprocess {
            program: std::env::current_exe()?,
        })
    }

    /// Generate `config` under `output_root`, returning the project directory
    pub async fn run(
        &self,
        config: &Configuration,
        output_root: &Path,
    ) -> Result<PathBuf, ScaffoldError> {
        match self {
            GenerationRunner::InProcess => {
                let report = generator::generate(config, GenerationMode::All, output_root).await?;
                Ok(report.project_dir)
            }
            GenerationRunner::Subprocess { program } => {
                run_subprocess(program, config, output_root).await
            }
        }
    }
}

async fn run_subprocess(
    program: &Path,
    config: &Configuration,
    output_root: &Path,
) -> Result<PathBuf, ScaffoldError> {
    let body = serde_json::to_vec_pretty(config).map_err(|e| ScaffoldError::Process {
        message: "Failed to serialize configuration".to_string(),
        diagnostics: e.to_string(),
    })?;

    // Removed when dropped, after the child has exited
    let mut config_file = tempfile::Builder::new()
        .prefix("starterforge-")
        .suffix(".json")
        .tempfile()
        .map_err(|e| ScaffoldError::filesystem(std::env::temp_dir(), e))?;
    config_file
        .write_all(&body)
        .and_then(|_| config_file.flush())
        .map_err(|e| ScaffoldError::filesystem(config_file.path(), e))?;

    tracing::debug!(program = %program.display(), "spawning generation process");
    let output = tokio::process::Command::new(program)
        .arg("generate")
        .arg("--config")
        .arg(config_file.path())
        .arg("--mode")
        .arg(GenerationMode::All.as_str())
        .arg("--output-dir")
        .arg(output_root)
        .output()
        .await
        .map_err(|e| ScaffoldError::Process {
            message: format!("Failed to start {}", program.display()),
            diagnostics: e.to_string(),
        })?;

    if !output.status.success() {
        let mut diagnostics = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            if !diagnostics.is_empty() {
                diagnostics.push('\n');
            }
            diagnostics.push_str(stdout.trim());
        }
        return Err(ScaffoldError::Process {
            message: format!("Generation process exited with {}", output.status),
            diagnostics,
        });
    }

    Ok(generator::project_dir(config, output_root))
}
