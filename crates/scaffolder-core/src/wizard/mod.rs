//! Wizard logic shared by the terminal wizard and the browser page
//!
//! - [`ConfigDraft`]: the configuration under construction
//! - [`filter`]: derived hidden/recommended flags for filterable tables
//! - [`navigation`]: step validation and step skipping
//! - [`WizardSession`]: step counter plus draft, for driving loops

pub mod filter;
pub mod navigation;

use crate::catalog::{self, STEP_TITLES};
use crate::config::{
    validate, Auth, Backend, Configuration, Database, DevOps, Docker, Frontend, OptionalFeature,
    Output, ProjectType,
};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub use filter::{
    filter_auth_providers, filter_orms, filter_ui_libraries, has_database, recommended_orm, Choice,
};
pub use navigation::{
    can_proceed_from_step, get_next_step, get_previous_step, should_skip_step, FIRST_STEP,
    LAST_STEP,
};

/// Configuration under construction. Unlike [`Configuration`], every
/// section is present and the project type may still be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDraft {
    pub project_type: Option<ProjectType>,
    pub frontend: Frontend,
    pub backend: Backend,
    pub database: Database,
    pub auth: Auth,
    pub devops: DevOps,
    pub optional_features: Vec<OptionalFeature>,
    pub output: Output,
}

/// Empty draft with every field present, as the wizard starts from
pub fn create_default_config() -> ConfigDraft {
    ConfigDraft {
        project_type: None,
        frontend: Frontend {
            framework: Some(String::new()),
            ui_libraries: Some(Vec::new()),
        },
        backend: Backend {
            language: Some(String::new()),
            framework: Some(String::new()),
            features: None,
        },
        database: Database {
            engines: Some(Vec::new()),
            orm: Some(String::new()),
            cloud_hosted: None,
            models: None,
        },
        auth: Auth {
            provider: Some(String::new()),
            features: None,
            include_ui: Some(false),
        },
        devops: DevOps {
            deployment_targets: Some(Vec::new()),
            ci_cd: Some(false),
            docker: Some(Docker {
                enabled: false,
                compose: Some(false),
            }),
        },
        optional_features: Vec::new(),
        output: Output::default(),
    }
}

impl ConfigDraft {
    pub fn engines(&self) -> &[String] {
        self.database.engines.as_deref().unwrap_or(&[])
    }

    pub fn backend_language(&self) -> &str {
        self.backend.language.as_deref().unwrap_or("")
    }

    pub fn frontend_framework(&self) -> &str {
        self.frontend.framework.as_deref().unwrap_or("")
    }

    /// Select a catalog backend option; language and framework change together
    pub fn select_backend(&mut self, option_id: &str) -> bool {
        match catalog::find_backend(option_id) {
            Some(option) => {
                self.backend.language = Some(option.language.to_string());
                self.backend.framework = Some(option.framework.to_string());
                true
            }
            None => false,
        }
    }

    /// Run the draft through the configuration schema
    pub fn finish(&self) -> Result<Configuration, ValidationError> {
        let mut raw = serde_json::to_value(self).map_err(|e| {
            ValidationError::new(vec![crate::error::Issue {
                path: String::new(),
                message: e.to_string(),
            }])
        })?;

        // The frontend section does not apply to these project types
        if self.project_type.is_some_and(|t| t.skips_frontend()) {
            if let Some(obj) = raw.as_object_mut() {
                obj.remove("frontend");
            }
        }

        validate(&raw)
    }
}

/// Filtered option lists for the current draft
#[derive(Debug, Clone, Serialize)]
pub struct WizardOptions {
    pub ui_libraries: Vec<Choice<'static>>,
    pub orms: Vec<Choice<'static>>,
    pub auth_providers: Vec<Choice<'static>>,
}

pub fn options_for(draft: &ConfigDraft) -> WizardOptions {
    WizardOptions {
        ui_libraries: filter_ui_libraries(draft.frontend_framework(), catalog::UI_LIBRARIES),
        orms: filter_orms(draft.backend_language(), draft.engines(), catalog::ORMS),
        auth_providers: filter_auth_providers(draft.engines(), catalog::AUTH_PROVIDERS),
    }
}

/// Display title of a step (1-based); `None` outside 1..=8
pub fn step_title(step: u8) -> Option<&'static str> {
    STEP_TITLES.get(usize::from(step).checked_sub(1)?).copied()
}

/// Result of trying to move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step
    Moved(u8),
    /// Current step is not satisfied yet
    Blocked,
    /// Confirm step passed; ready to generate
    Complete,
}

/// Transient wizard state: current step plus the draft under construction
#[derive(Debug, Clone)]
pub struct WizardSession {
    step: u8,
    pub draft: ConfigDraft,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            step: FIRST_STEP,
            draft: create_default_config(),
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn title(&self) -> &'static str {
        step_title(self.step).unwrap_or_default()
    }

    pub fn can_proceed(&self) -> bool {
        can_proceed_from_step(self.step, &self.draft)
    }

    pub fn advance(&mut self) -> Advance {
        if !self.can_proceed() {
            return Advance::Blocked;
        }
        if self.step == LAST_STEP {
            return Advance::Complete;
        }
        self.step = get_next_step(self.step, self.draft.project_type);
        Advance::Moved(self.step)
    }

    pub fn back(&mut self) -> u8 {
        self.step = get_previous_step(self.step, self.draft.project_type);
        self.step
    }

    pub fn options(&self) -> WizardOptions {
        options_for(&self.draft)
    }
}
