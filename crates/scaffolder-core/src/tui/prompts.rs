//! Charm-style wizard prompts using cliclack

use crate::catalog::{
    self, CatalogEntry, BACKEND_OPTIONS, DATABASES, DEPLOYMENT_PLATFORMS, FRONTEND_FRAMEWORKS,
    OPTIONAL_FEATURES, PROJECT_TYPES,
};
use crate::config::{Configuration, OptionalFeature, ProjectType};
use crate::generator::{self, GenerationMode, GenerationReport};
use crate::product::ProductConfig;
use crate::runtime::check;
use crate::wizard::{has_database, Advance, Choice, WizardSession, LAST_STEP};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Root the project directory is created under
    pub output_dir: PathBuf,

    /// What to materialize
    pub mode: GenerationMode,

    /// Skip the final confirmation
    pub yes: bool,
}

/// Generation overwrites files in place; ask before touching a non-empty directory
fn confirm_existing(path: &Path, args: &CreateArgs) -> Result<()> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return Ok(());
    };
    let count = entries.count();
    if count == 0 {
        return Ok(());
    }

    cliclack::log::warning(format!("{} already has {} items", path.display(), count))?;
    let confirm = args.yes
        || cliclack::confirm("Overwrite generated files?")
            .initial_value(true)
            .interact()?;
    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }
    Ok(())
}

/// Run the interactive wizard, then generate
pub async fn run<C: ProductConfig>(product: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(product.display_name())?;

    let configuration = run_wizard(&args)?;

    let report = create_project(&configuration, &args).await?;

    print_next_steps(product, &report.project_dir, &configuration)?;

    if let Some(language) = configuration.backend_language() {
        check_toolchain(language)?;
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn run_wizard(args: &CreateArgs) -> Result<Configuration> {
    let mut session = WizardSession::new();

    loop {
        let step = session.step();
        cliclack::log::step(format!("Step {}/{}: {}", step, LAST_STEP, session.title()))?;

        match step {
            1 => select_project_type(&mut session)?,
            2 => select_frontend(&mut session)?,
            3 => select_backend(&mut session)?,
            4 => select_database(&mut session)?,
            5 => select_auth(&mut session)?,
            6 => select_deployment(&mut session)?,
            7 => select_features(&mut session)?,
            _ => {
                if !confirm_summary(&session, args)? {
                    session.back();
                    continue;
                }
            }
        }

        match session.advance() {
            Advance::Moved(_) => {}
            Advance::Blocked => {
                cliclack::log::warning("A selection is required to continue")?;
            }
            Advance::Complete => break,
        }
    }

    let configuration = session
        .draft
        .finish()
        .context("Wizard produced an invalid configuration")?;
    Ok(configuration)
}

/// Catalog ids matching the draft's current values, for preselection
fn preselected(table: &'static [CatalogEntry], values: &[String]) -> Vec<&'static str> {
    values
        .iter()
        .filter_map(|value| catalog::find(table, value).map(|entry| entry.id))
        .collect()
}

fn recommended_hint(choice: &Choice<'_>) -> &'static str {
    if choice.recommended {
        "recommended"
    } else {
        ""
    }
}

fn select_project_type(session: &mut WizardSession) -> Result<()> {
    let mut select = cliclack::select("What are you building?");
    for entry in PROJECT_TYPES {
        select = select.item(entry.id, entry.name, entry.description);
    }
    if let Some(current) = session.draft.project_type {
        select = select.initial_value(current.id());
    }

    let id: &str = select.interact()?;
    session.draft.project_type = ProjectType::from_id(id);
    Ok(())
}

fn select_frontend(session: &mut WizardSession) -> Result<()> {
    let mut select = cliclack::select("Frontend framework");
    for entry in FRONTEND_FRAMEWORKS {
        select = select.item(entry.id, entry.name, entry.description);
    }
    if let Some(current) = catalog::find(FRONTEND_FRAMEWORKS, session.draft.frontend_framework()) {
        select = select.initial_value(current.id);
    }
    let framework: &str = select.interact()?;
    session.draft.frontend.framework = Some(framework.to_string());

    let options = session.options();
    let visible: Vec<&Choice<'_>> = options.ui_libraries.iter().filter(|c| !c.hidden).collect();
    if framework == "none" || visible.is_empty() {
        session.draft.frontend.ui_libraries = Some(Vec::new());
        return Ok(());
    }

    let mut multi = cliclack::multiselect("UI libraries");
    for choice in &visible {
        multi = multi.item(choice.id(), choice.entry.name, recommended_hint(choice));
    }
    let current = session.draft.frontend.ui_libraries.clone().unwrap_or_default();
    let initial: Vec<&'static str> = visible
        .iter()
        .map(|c| c.id())
        .filter(|id| current.iter().any(|v| v == id))
        .collect();
    let selected: Vec<&str> = multi.initial_values(initial).required(false).interact()?;
    session.draft.frontend.ui_libraries =
        Some(selected.into_iter().map(String::from).collect());
    Ok(())
}

fn select_backend(session: &mut WizardSession) -> Result<()> {
    let mut select = cliclack::select("Backend");
    for option in BACKEND_OPTIONS {
        select = select.item(option.id, option.name, option.description);
    }
    let language = session.draft.backend_language().to_string();
    let framework = session.draft.backend.framework.clone().unwrap_or_default();
    if let Some(current) = catalog::backend_for(&language, &framework) {
        select = select.initial_value(current.id);
    }

    let id: &str = select.interact()?;
    session.draft.select_backend(id);
    Ok(())
}

fn select_database(session: &mut WizardSession) -> Result<()> {
    let mut multi = cliclack::multiselect("Databases");
    for entry in DATABASES {
        multi = multi.item(entry.id, entry.name, entry.description);
    }
    let initial = preselected(DATABASES, session.draft.engines());
    let engines: Vec<&str> = multi.initial_values(initial).required(true).interact()?;
    session.draft.database.engines = Some(engines.iter().map(|e| e.to_string()).collect());

    if !has_database(&engines) {
        session.draft.database.orm = Some(String::new());
        return Ok(());
    }

    let options = session.options();
    let visible: Vec<&Choice<'_>> = options.orms.iter().filter(|c| !c.hidden).collect();
    if visible.is_empty() {
        cliclack::log::remark("No ORM integration for this backend; plain SQL migrations will be generated")?;
        session.draft.database.orm = Some(String::new());
        return Ok(());
    }

    let mut select = cliclack::select("ORM");
    for choice in &visible {
        select = select.item(choice.id(), choice.entry.name, recommended_hint(choice));
    }
    if let Some(recommended) = visible.iter().find(|c| c.recommended) {
        select = select.initial_value(recommended.id());
    }
    let orm: &str = select.interact()?;
    session.draft.database.orm = Some(orm.to_string());

    let models: String = cliclack::input("Data models (comma-separated, optional)")
        .placeholder("post, comment")
        .required(false)
        .interact()?;
    let models: Vec<String> = models
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();
    session.draft.database.models = (!models.is_empty()).then_some(models);
    Ok(())
}

fn select_auth(session: &mut WizardSession) -> Result<()> {
    let options = session.options();
    let visible: Vec<&Choice<'_>> = options.auth_providers.iter().filter(|c| !c.hidden).collect();

    let mut select = cliclack::select("Authentication");
    for choice in &visible {
        select = select.item(choice.id(), choice.entry.name, recommended_hint(choice));
    }
    if let Some(recommended) = visible.iter().find(|c| c.recommended) {
        select = select.initial_value(recommended.id());
    }
    let provider: &str = select.interact()?;
    session.draft.auth.provider = Some(provider.to_string());

    let include_ui = if provider == "none" {
        false
    } else {
        cliclack::confirm("Include a login button component?")
            .initial_value(session.draft.frontend_framework() != "none"
                && !session.draft.frontend_framework().is_empty())
            .interact()?
    };
    session.draft.auth.include_ui = Some(include_ui);
    Ok(())
}

fn select_deployment(session: &mut WizardSession) -> Result<()> {
    let mut multi = cliclack::multiselect("Deployment targets (optional)");
    for entry in DEPLOYMENT_PLATFORMS {
        multi = multi.item(entry.id, entry.name, entry.description);
    }
    let current = session.draft.devops.deployment_targets.clone().unwrap_or_default();
    let targets: Vec<&str> = multi
        .initial_values(preselected(DEPLOYMENT_PLATFORMS, &current))
        .required(false)
        .interact()?;
    session.draft.devops.deployment_targets =
        Some(targets.iter().map(|t| t.to_string()).collect());

    let ci_cd: bool = cliclack::confirm("Add a CI/CD workflow?")
        .initial_value(session.draft.devops.ci_cd.unwrap_or(false))
        .interact()?;
    session.draft.devops.ci_cd = Some(ci_cd);

    let wants_docker = targets.contains(&"docker");
    let docker: bool = cliclack::confirm("Add a Dockerfile?")
        .initial_value(wants_docker)
        .interact()?;
    let compose = if docker {
        cliclack::confirm("Add docker-compose for local services?")
            .initial_value(true)
            .interact()?
    } else {
        false
    };
    session.draft.devops.docker = Some(crate::config::Docker {
        enabled: docker,
        compose: Some(compose),
    });
    Ok(())
}

fn select_features(session: &mut WizardSession) -> Result<()> {
    let mut multi = cliclack::multiselect("Optional features");
    for feature in OPTIONAL_FEATURES {
        multi = multi.item(feature.id, feature.name, feature.description);
    }
    let initial: Vec<&'static str> = OPTIONAL_FEATURES
        .iter()
        .filter(|f| session.draft.optional_features.iter().any(|o| o.feature == f.id))
        .map(|f| f.id)
        .collect();
    let selected: Vec<&str> = multi.initial_values(initial).required(false).interact()?;

    session.draft.optional_features = selected
        .into_iter()
        .map(|id| OptionalFeature {
            feature: id.to_string(),
            tool: catalog::find_feature(id).map(|f| f.tool.to_string()),
            include_demo: None,
        })
        .collect();
    Ok(())
}

/// Show the draft and ask whether to generate; false means go back
fn confirm_summary(session: &WizardSession, args: &CreateArgs) -> Result<bool> {
    let draft = &session.draft;
    let mut lines = Vec::new();
    if let Some(project_type) = draft.project_type {
        lines.push(format!("Project type: {}", project_type));
    }
    if !draft.frontend_framework().is_empty() {
        lines.push(format!("Frontend: {}", draft.frontend_framework()));
    }
    if !draft.backend_language().is_empty() {
        lines.push(format!(
            "Backend: {} ({})",
            draft.backend_language(),
            draft.backend.framework.as_deref().unwrap_or("")
        ));
    }
    if !draft.engines().is_empty() {
        lines.push(format!("Database: {}", draft.engines().join(", ")));
    }
    if let Some(provider) = draft.auth.provider.as_deref().filter(|p| !p.is_empty()) {
        lines.push(format!("Authentication: {}", provider));
    }
    lines.push(format!("Output: {}", args.output_dir.display()));
    lines.push(format!("Mode: {}", args.mode));
    cliclack::note("Summary", lines.join("\n"))?;

    if args.yes {
        return Ok(true);
    }

    let action: &str = cliclack::select("Ready to generate?")
        .item("generate", "Generate project", "")
        .item("back", "Go back", "")
        .interact()?;
    Ok(action == "generate")
}

async fn create_project(config: &Configuration, args: &CreateArgs) -> Result<GenerationReport> {
    confirm_existing(&generator::project_dir(config, &args.output_dir), args)?;

    let spinner = cliclack::spinner();
    spinner.start("Generating project...");

    let report = match generator::generate(config, args.mode, &args.output_dir).await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Generation failed");
            return Err(e).context("Failed to generate project");
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        report.files_written.len(),
        report.project_dir.display()
    ));

    if report.script.is_some() {
        cliclack::log::info(format!(
            "Script saved as: {}",
            report.project_dir.join(generator::SCRIPT_NAME).display()
        ))?;
    }
    if let Some(archive) = &report.archive {
        cliclack::log::info(format!("Archive: {}", archive.display()))?;
    }

    Ok(report)
}

fn check_toolchain(language: &str) -> Result<()> {
    let Some(info) = check::check_backend_toolchain(language) else {
        return Ok(());
    };
    if info.available {
        cliclack::log::success(format!(
            "{} ({})",
            info.name(),
            info.version.as_deref().unwrap_or("unknown")
        ))?;
    } else {
        cliclack::log::warning(format!(
            "{} not found ({})",
            info.name(),
            info.toolchain.install_hint()
        ))?;
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    product: &C,
    project_dir: &Path,
    config: &Configuration,
) -> Result<()> {
    let steps = product.next_steps(project_dir, config);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  Docs: {}", product.docs_url());

    Ok(())
}
