//! Project generation: render files in memory, then materialize them
//!
//! Rendering is pure and deterministic: [`render_project`] maps a
//! configuration to an ordered set of files and [`script::render_script`]
//! turns that set into a shell script. [`generate`] writes the result
//! under `<output_root>/<project_type>` according to the mode.

pub mod archive;
pub mod auth;
pub mod backend;
pub mod database;
pub mod devops;
pub mod docs;
pub mod frontend;
pub mod script;

use crate::config::Configuration;
use crate::error::ScaffoldError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

pub use script::{render_script, SCRIPT_NAME};

/// What a generation run materializes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Write the project files only
    ScaffoldOnly,
    /// Write only the shell script that reproduces the files
    ScriptOnly,
    /// Write both
    #[default]
    All,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::ScaffoldOnly => "scaffold-only",
            GenerationMode::ScriptOnly => "script-only",
            GenerationMode::All => "all",
        }
    }

    pub fn writes_files(&self) -> bool {
        !matches!(self, GenerationMode::ScriptOnly)
    }

    pub fn writes_script(&self) -> bool {
        !matches!(self, GenerationMode::ScaffoldOnly)
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered files keyed by relative path, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFiles {
    files: BTreeMap<String, String>,
}

impl ProjectFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; contents are always newline-terminated
    pub fn add(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        let mut contents = contents.into();
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        self.files.insert(path.into(), contents);
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parent directories of every file, sorted and de-duplicated
    pub fn directories(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = self
            .files
            .keys()
            .filter_map(|p| p.rsplit_once('/').map(|(dir, _)| dir))
            .collect();
        dirs.sort_unstable();
        dirs.dedup();
        dirs
    }
}

/// Render every file for a configuration
pub fn render_project(config: &Configuration) -> ProjectFiles {
    let mut files = ProjectFiles::new();
    docs::render(config, &mut files);
    backend::render(config, &mut files);
    frontend::render(config, &mut files);
    database::render(config, &mut files);
    auth::render(config, &mut files);
    devops::render(config, &mut files);
    files
}

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub project_dir: PathBuf,
    /// Relative paths written inside `project_dir`, in write order
    pub files_written: Vec<String>,
    /// Script text, when the mode emits one
    pub script: Option<String>,
    /// Zip archive path, when `output.format` asks for one
    pub archive: Option<PathBuf>,
}

/// Directory a configuration generates into
pub fn project_dir(config: &Configuration, output_root: &Path) -> PathBuf {
    output_root.join(config.project_type.id())
}

/// Render and write a project. Not transactional: a failure part way
/// through leaves whatever was already written.
///
/// The zip holds exactly what this run produced (rendered files for
/// `scaffold-only`/`all`, the script for `script-only`/`all`), never other
/// files already in the project directory.
pub async fn generate(
    config: &Configuration,
    mode: GenerationMode,
    output_root: &Path,
) -> Result<GenerationReport, ScaffoldError> {
    let project_dir = project_dir(config, output_root);
    let files = render_project(config);

    fs::create_dir_all(&project_dir)
        .await
        .map_err(|e| ScaffoldError::filesystem(&project_dir, e))?;

    let mut report = GenerationReport {
        project_dir: project_dir.clone(),
        files_written: Vec::new(),
        script: None,
        archive: None,
    };

    if mode.writes_files() {
        for (path, contents) in files.iter() {
            write_file(&project_dir, path, contents).await?;
            report.files_written.push(path.to_string());
        }
    }

    if mode.writes_script() {
        let script = render_script(config, &files);
        write_file(&project_dir, SCRIPT_NAME, &script).await?;
        make_executable(&project_dir.join(SCRIPT_NAME)).await?;
        report.files_written.push(SCRIPT_NAME.to_string());
        report.script = Some(script);
    }

    if config.wants_format("zip") {
        let archive_path = output_root.join(format!("{}.zip", config.project_type.id()));
        let packaged = if mode.writes_files() {
            files
        } else {
            ProjectFiles::new()
        };
        let script = report.script.clone();
        let prefix = config.project_type.id();
        let bytes = tokio::task::spawn_blocking(move || {
            archive::package_files(&packaged, script.as_deref(), prefix)
        })
        .await
        .map_err(|e| ScaffoldError::filesystem(&archive_path, std::io::Error::other(e)))??;
        fs::write(&archive_path, &bytes)
            .await
            .map_err(|e| ScaffoldError::filesystem(&archive_path, e))?;
        tracing::debug!(path = %archive_path.display(), bytes = bytes.len(), "wrote archive");
        report.archive = Some(archive_path);
    }

    tracing::info!(
        project_type = %config.project_type,
        mode = %mode,
        files = report.files_written.len(),
        dir = %project_dir.display(),
        "generated project"
    );

    Ok(report)
}

async fn write_file(project_dir: &Path, relative: &str, contents: &str) -> Result<(), ScaffoldError> {
    let target = project_dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::filesystem(parent, e))?;
    }
    fs::write(&target, contents)
        .await
        .map_err(|e| ScaffoldError::filesystem(&target, e))?;
    tracing::debug!(path = %target.display(), "wrote file");
    Ok(())
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<(), ScaffoldError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| ScaffoldError::filesystem(path, e))
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<(), ScaffoldError> {
    Ok(())
}
