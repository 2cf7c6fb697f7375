//! Typed configuration tree produced by schema validation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of project being scaffolded. Drives which other sections are relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    WebApp,
    FrontendOnly,
    BackendOnly,
    CliTool,
    BrowserExtension,
    Microservice,
    Custom,
}

impl ProjectType {
    pub const ALL: [ProjectType; 7] = [
        ProjectType::WebApp,
        ProjectType::FrontendOnly,
        ProjectType::BackendOnly,
        ProjectType::CliTool,
        ProjectType::BrowserExtension,
        ProjectType::Microservice,
        ProjectType::Custom,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ProjectType::WebApp => "web_app",
            ProjectType::FrontendOnly => "frontend_only",
            ProjectType::BackendOnly => "backend_only",
            ProjectType::CliTool => "cli_tool",
            ProjectType::BrowserExtension => "browser_extension",
            ProjectType::Microservice => "microservice",
            ProjectType::Custom => "custom",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Project types with no frontend; the wizard skips the frontend step for these.
    pub fn skips_frontend(&self) -> bool {
        matches!(self, ProjectType::BackendOnly | ProjectType::CliTool)
    }

    /// Heading used in generated docs, e.g. `WEB APP`
    pub fn heading(&self) -> String {
        self.id().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_libraries: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_hosted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_ui: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docker {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compose: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevOps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_targets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_cd: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<Docker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalFeature {
    pub feature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_demo: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub format: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<Repo>,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            format: vec!["zip".to_string()],
            repo: None,
        }
    }
}

/// A validated scaffold request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<Frontend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<Database>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devops: Option<DevOps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_features: Option<Vec<OptionalFeature>>,
    pub output: Output,
}

/// Non-empty string or None
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Configuration {
    /// Minimal configuration: a project type and the default output format
    pub fn minimal(project_type: ProjectType) -> Self {
        Self {
            project_type,
            frontend: None,
            backend: None,
            database: None,
            auth: None,
            devops: None,
            optional_features: None,
            output: Output::default(),
        }
    }

    /// Selected frontend framework, ignoring empty strings and `none`
    pub fn frontend_framework(&self) -> Option<&str> {
        self.frontend
            .as_ref()
            .and_then(|f| non_empty(&f.framework))
            .filter(|f| *f != "none")
    }

    pub fn ui_libraries(&self) -> &[String] {
        self.frontend
            .as_ref()
            .and_then(|f| f.ui_libraries.as_deref())
            .unwrap_or(&[])
    }

    pub fn backend_language(&self) -> Option<&str> {
        self.backend.as_ref().and_then(|b| non_empty(&b.language))
    }

    pub fn backend_framework(&self) -> Option<&str> {
        self.backend.as_ref().and_then(|b| non_empty(&b.framework))
    }

    /// Selected database engines, excluding `none`
    pub fn database_engines(&self) -> Vec<&str> {
        self.database
            .as_ref()
            .and_then(|d| d.engines.as_ref())
            .map(|engines| {
                engines
                    .iter()
                    .map(String::as_str)
                    .filter(|e| !e.is_empty() && *e != "none")
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn orm(&self) -> Option<&str> {
        self.database.as_ref().and_then(|d| non_empty(&d.orm))
    }

    pub fn models(&self) -> &[String] {
        self.database
            .as_ref()
            .and_then(|d| d.models.as_deref())
            .unwrap_or(&[])
    }

    /// Selected auth provider, ignoring empty strings and `none`
    pub fn auth_provider(&self) -> Option<&str> {
        self.auth
            .as_ref()
            .and_then(|a| non_empty(&a.provider))
            .filter(|p| *p != "none")
    }

    pub fn deployment_targets(&self) -> &[String] {
        self.devops
            .as_ref()
            .and_then(|d| d.deployment_targets.as_deref())
            .unwrap_or(&[])
    }

    pub fn ci_cd(&self) -> bool {
        self.devops
            .as_ref()
            .and_then(|d| d.ci_cd)
            .unwrap_or(false)
    }

    pub fn docker(&self) -> Option<&Docker> {
        self.devops
            .as_ref()
            .and_then(|d| d.docker.as_ref())
            .filter(|d| d.enabled)
    }

    pub fn features(&self) -> &[OptionalFeature] {
        self.optional_features.as_deref().unwrap_or(&[])
    }

    pub fn wants_format(&self, format: &str) -> bool {
        self.output.format.iter().any(|f| f == format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_ids_round_trip() {
        for project_type in ProjectType::ALL {
            assert_eq!(ProjectType::from_id(project_type.id()), Some(project_type));
        }
        assert_eq!(ProjectType::from_id("invalid_type"), None);
    }

    #[test]
    fn test_heading() {
        assert_eq!(ProjectType::WebApp.heading(), "WEB APP");
        assert_eq!(ProjectType::Custom.heading(), "CUSTOM");
    }

    #[test]
    fn test_accessors_ignore_none_and_empty() {
        let mut config = Configuration::minimal(ProjectType::WebApp);
        config.frontend = Some(Frontend {
            framework: Some("none".to_string()),
            ui_libraries: None,
        });
        config.database = Some(Database {
            engines: Some(vec!["none".to_string()]),
            ..Default::default()
        });
        config.auth = Some(Auth {
            provider: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(config.frontend_framework(), None);
        assert!(config.database_engines().is_empty());
        assert_eq!(config.auth_provider(), None);
    }

    #[test]
    fn test_disabled_docker_is_ignored() {
        let mut config = Configuration::minimal(ProjectType::Microservice);
        config.devops = Some(DevOps {
            docker: Some(Docker {
                enabled: false,
                compose: Some(true),
            }),
            ..Default::default()
        });
        assert!(config.docker().is_none());
    }
}
