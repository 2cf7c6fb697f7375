//! StarterForge CLI - project scaffold generator

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use scaffolder_core::catalog::{
    self, CatalogEntry, AUTH_PROVIDERS, BACKEND_OPTIONS, DATABASES, DEPLOYMENT_PLATFORMS,
    FRONTEND_FRAMEWORKS, OPTIONAL_FEATURES, ORMS, PROJECT_TYPES, UI_LIBRARIES,
};
use scaffolder_core::config::{self, Configuration, ProjectType};
use scaffolder_core::server::{self, GenerationRunner, ServerConfig};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{GenerationMode, ProductConfig};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const OUTPUT_DIR_ENV: &str = "STARTERFORGE_OUTPUT_DIR";

/// StarterForge product configuration
#[derive(Clone)]
pub struct StarterForge;

impl ProductConfig for StarterForge {
    fn name(&self) -> &'static str {
        "starterforge"
    }

    fn display_name(&self) -> &'static str {
        "StarterForge"
    }

    fn output_dir_env(&self) -> &'static str {
        OUTPUT_DIR_ENV
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/starterforge/starterforge#readme"
    }

    fn cli_description(&self) -> &'static str {
        "Generate ready-to-run project scaffolds from a single configuration"
    }

    fn next_steps(&self, dir: &Path, config: &Configuration) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        steps.push("cp .env.example .env".to_string());

        let cli = config.project_type == ProjectType::CliTool;
        match config.backend_language() {
            Some("node") => {
                steps.push("npm install".to_string());
                steps.push(if cli { "node src/cli.js --help" } else { "npm start" }.to_string());
            }
            Some("python") => {
                steps.push(
                    "Set up Python environment:\n\
                          python3 -m venv .venv && .venv/bin/pip install -r requirements.txt"
                        .to_string(),
                );
                steps.push(if cli { "python src/cli.py --help" } else { "python src/main.py" }.to_string());
            }
            Some("go") => steps.push("go mod tidy && go run ./src".to_string()),
            Some("rust") => steps.push("cargo run".to_string()),
            _ => {}
        }

        if config.docker().is_some_and(|d| d.compose.unwrap_or(false)) {
            steps.push("docker compose up".to_string());
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "starterforge")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a project from a configuration file
    Generate(GenerateArgs),
    /// Build a configuration interactively, then generate
    Create(CliCreateArgs),
    /// List catalog options
    List(ListArgs),
    /// Serve the HTTP API and browser wizard
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Configuration file (JSON, or YAML for .yaml/.yml)
    #[arg(short, long)]
    pub config: PathBuf,

    /// What to write
    #[arg(short, long, value_enum, default_value_t = GenerationMode::All)]
    pub mode: GenerationMode,

    /// Root directory projects are generated under
    #[arg(short, long, env = OUTPUT_DIR_ENV, default_value = "output")]
    pub output_dir: PathBuf,
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Root directory projects are generated under
    #[arg(short, long, env = OUTPUT_DIR_ENV, default_value = "output")]
    pub output_dir: PathBuf,

    /// What to write
    #[arg(short, long, value_enum, default_value_t = GenerationMode::All)]
    pub mode: GenerationMode,

    /// Skip the final confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            output_dir: args.output_dir,
            mode: args.mode,
            yes: args.yes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Types,
    Frameworks,
    UiLibraries,
    Backends,
    Databases,
    Orms,
    Auth,
    Deployments,
    Features,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Catalog table to print
    #[arg(value_enum)]
    pub kind: ListKind,

    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on [default: 3001]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Root directory projects are generated under
    #[arg(short, long, env = OUTPUT_DIR_ENV, default_value = "output")]
    pub output_dir: PathBuf,

    /// Open the wizard page in a browser once listening
    #[arg(long)]
    pub open: bool,
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Logs go to stderr so stdout stays clean for listings
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    let product = StarterForge;
    let matches = Args::command()
        .name(product.name())
        .about(product.cli_description())
        .get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    let interactive = matches!(args.command, None | Some(Command::Create(_)));
    let directive = match (args.verbose, interactive) {
        (true, _) => "starterforge=debug,scaffolder_core=debug,warn",
        // Keep the prompts free of log lines
        (false, true) => "warn",
        (false, false) => "starterforge=info,scaffolder_core=info,warn",
    };
    init_tracing(directive);

    match args.command {
        Some(Command::Generate(generate_args)) => generate(generate_args).await,
        Some(Command::Create(create_args)) => create(&product, create_args.into()).await,
        Some(Command::List(list_args)) => list(list_args),
        Some(Command::Serve(serve_args)) => serve(&product, serve_args).await,
        None => {
            // No subcommand provided, default to the interactive wizard
            let output_dir = std::env::var_os(product.output_dir_env())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(product.default_output_dir()));
            let create_args = CreateArgs {
                output_dir,
                mode: GenerationMode::All,
                yes: false,
            };
            create(&product, create_args).await
        }
    }
}

async fn create(product: &StarterForge, args: CreateArgs) -> Result<()> {
    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let result = scaffolder_core::run(product, args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let configuration = config::load_config(&args.config).await?;

    let report = scaffolder_core::generate(&configuration, args.mode, &args.output_dir)
        .await
        .context("Generation failed")?;

    if args.mode.writes_files() {
        println!(
            "{} {}",
            "Files scaffolded in:".green().bold(),
            report.project_dir.display()
        );
    }
    if report.script.is_some() {
        println!(
            "{} {}",
            "Script saved as:".green().bold(),
            report.project_dir.join(scaffolder_core::generator::SCRIPT_NAME).display()
        );
    }
    if let Some(archive) = &report.archive {
        println!("{} {}", "Archive:".green().bold(), archive.display());
    }

    Ok(())
}

fn table(kind: ListKind) -> (&'static str, Vec<(&'static str, &'static str, &'static str)>) {
    let entries = |table: &'static [CatalogEntry]| -> Vec<(&'static str, &'static str, &'static str)> {
        table.iter().map(|e| (e.id, e.name, e.description)).collect()
    };
    match kind {
        ListKind::Types => ("Project types", entries(PROJECT_TYPES)),
        ListKind::Frameworks => ("Frontend frameworks", entries(FRONTEND_FRAMEWORKS)),
        ListKind::UiLibraries => ("UI libraries", entries(UI_LIBRARIES)),
        ListKind::Backends => (
            "Backends",
            BACKEND_OPTIONS
                .iter()
                .map(|b| (b.id, b.name, b.description))
                .collect(),
        ),
        ListKind::Databases => ("Databases", entries(DATABASES)),
        ListKind::Orms => ("ORMs", entries(ORMS)),
        ListKind::Auth => ("Auth providers", entries(AUTH_PROVIDERS)),
        ListKind::Deployments => ("Deployment platforms", entries(DEPLOYMENT_PLATFORMS)),
        ListKind::Features => (
            "Optional features",
            OPTIONAL_FEATURES
                .iter()
                .map(|f| (f.id, f.name, f.description))
                .collect(),
        ),
    }
}

fn list(args: ListArgs) -> Result<()> {
    if args.json {
        let catalog = catalog::catalog();
        let value = match args.kind {
            ListKind::Types => serde_json::to_value(catalog.project_types),
            ListKind::Frameworks => serde_json::to_value(catalog.frontend_frameworks),
            ListKind::UiLibraries => serde_json::to_value(catalog.ui_libraries),
            ListKind::Backends => serde_json::to_value(catalog.backend_options),
            ListKind::Databases => serde_json::to_value(catalog.databases),
            ListKind::Orms => serde_json::to_value(catalog.orms),
            ListKind::Auth => serde_json::to_value(catalog.auth_providers),
            ListKind::Deployments => serde_json::to_value(catalog.deployment_platforms),
            ListKind::Features => serde_json::to_value(catalog.optional_features),
        }
        .context("Failed to serialize catalog")?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let (title, rows) = table(args.kind);
    println!("{}", title.bold());
    for (id, name, description) in rows {
        println!(
            "  {} {:<22} {}",
            format!("{:<20}", id).cyan(),
            name,
            description.dimmed()
        );
    }
    Ok(())
}

async fn serve(product: &StarterForge, args: ServeArgs) -> Result<()> {
    let runner = GenerationRunner::current_exe().context("Failed to locate the running executable")?;
    let config = ServerConfig::new(product.display_name(), args.output_dir, runner);

    let addr = SocketAddr::new(args.host, args.port.unwrap_or(product.default_port()));
    let listener = server::bind(addr).await?;
    let url = format!("http://{}", listener.local_addr()?);
    println!("{} {}", "Wizard available at".green().bold(), url);

    if args.open {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "failed to open browser");
        }
    }

    server::serve(config, listener).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_generate() {
        let args = Args::try_parse_from([
            "starterforge",
            "generate",
            "--config",
            "starter.json",
            "--mode",
            "script-only",
            "--output-dir",
            "out",
        ])
        .unwrap();
        match args.command {
            Some(Command::Generate(g)) => {
                assert_eq!(g.config, PathBuf::from("starter.json"));
                assert_eq!(g.mode, GenerationMode::ScriptOnly);
                assert_eq!(g.output_dir, PathBuf::from("out"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_list_kinds_cover_catalog() {
        for kind in ListKind::value_variants() {
            let (_, rows) = table(*kind);
            assert!(!rows.is_empty());
        }
        assert_eq!(table(ListKind::Types).1.len(), ProjectType::ALL.len());
    }

    #[test]
    fn test_next_steps_for_node() {
        let config = config::validate(&serde_json::json!({
            "project_type": "web_app",
            "backend": { "language": "node", "framework": "express" },
            "devops": { "docker": { "enabled": true, "compose": true } },
            "output": { "format": ["zip"] }
        }))
        .unwrap();
        let steps = StarterForge.next_steps(Path::new("/nonexistent/web_app"), &config);
        assert_eq!(steps[0], "cd /nonexistent/web_app");
        assert!(steps.contains(&"npm start".to_string()));
        assert!(steps.contains(&"docker compose up".to_string()));
    }
}
