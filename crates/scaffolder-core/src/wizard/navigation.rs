//! Step validation and navigation for the 8-step wizard
//!
//! Steps: 1 project type, 2 frontend, 3 backend, 4 database, 5 auth,
//! 6 deployment, 7 optional features, 8 confirm. Only the frontend step is
//! ever skipped, and only as a function of the project type.

use super::ConfigDraft;
use crate::config::ProjectType;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 8;

const FRONTEND_STEP: u8 = 2;

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

/// Whether the wizard may advance past `step` with the current draft.
/// Step numbers outside 1..=8 always pass.
pub fn can_proceed_from_step(step: u8, draft: &ConfigDraft) -> bool {
    match step {
        1 => draft.project_type.is_some(),
        2 => {
            draft.project_type.is_some_and(|t| t.skips_frontend())
                || filled(&draft.frontend.framework)
        }
        3 => filled(&draft.backend.language) && filled(&draft.backend.framework),
        4 => draft
            .database
            .engines
            .as_ref()
            .is_some_and(|engines| !engines.is_empty()),
        5 => filled(&draft.auth.provider),
        _ => true,
    }
}

/// Whether `step` does not apply to `project_type`
pub fn should_skip_step(step: u8, project_type: Option<ProjectType>) -> bool {
    step == FRONTEND_STEP && project_type.is_some_and(|t| t.skips_frontend())
}

/// Step after `current`, skipping inapplicable steps; clamps at the last step
pub fn get_next_step(current: u8, project_type: Option<ProjectType>) -> u8 {
    let mut next = current.saturating_add(1);
    if should_skip_step(next, project_type) {
        next += 1;
    }
    next.min(LAST_STEP)
}

/// Step before `current`, skipping inapplicable steps; clamps at the first step
pub fn get_previous_step(current: u8, project_type: Option<ProjectType>) -> u8 {
    let mut previous = current.saturating_sub(1);
    if should_skip_step(previous, project_type) {
        previous -= 1;
    }
    previous.max(FIRST_STEP)
}
