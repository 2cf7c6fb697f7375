//! Container, CI and deployment platform files

use super::backend::package_name;
use super::ProjectFiles;
use crate::config::{Configuration, ProjectType};

pub fn render(config: &Configuration, files: &mut ProjectFiles) {
    if let Some(docker) = config.docker() {
        files.add("Dockerfile", dockerfile(config));
        if docker.compose.unwrap_or(false) {
            files.add("docker-compose.yml", compose(config));
        }
    }
    if config.ci_cd() {
        files.add(".github/workflows/ci.yml", ci_workflow(config));
    }
    for target in config.deployment_targets() {
        match target.as_str() {
            "vercel" => files.add("vercel.json", VERCEL_JSON),
            "netlify" => files.add("netlify.toml", NETLIFY_TOML),
            "render" => files.add("render.yaml", render_yaml(config)),
            "railway" => files.add("railway.json", railway_json(config)),
            _ => {}
        }
    }
}

fn start_command(config: &Configuration) -> String {
    let cli = config.project_type == ProjectType::CliTool;
    match config.backend_language() {
        Some("node") if cli => "node src/cli.js".to_string(),
        Some("node") => "npm start".to_string(),
        Some("python") if cli => "python src/cli.py".to_string(),
        Some("python") => "python src/main.py".to_string(),
        Some("go") => "./app".to_string(),
        Some("rust") => format!("./target/release/{}", package_name(config)),
        _ => "echo 'no start command configured'".to_string(),
    }
}

pub fn dockerfile(config: &Configuration) -> String {
    match config.backend_language() {
        Some("python") => format!(
            "FROM python:3.12-slim\n\nWORKDIR /app\nCOPY requirements.txt .\nRUN pip install --no-cache-dir -r requirements.txt\nCOPY . .\n\nEXPOSE 3000\nCMD [\"sh\", \"-c\", \"{}\"]\n",
            start_command(config)
        ),
        Some("go") => "FROM golang:1.22 AS build\n\nWORKDIR /src\nCOPY . .\nRUN go mod tidy && CGO_ENABLED=0 go build -o /app ./src\n\nFROM gcr.io/distroless/static\nCOPY --from=build /app /app\nEXPOSE 3000\nCMD [\"/app\"]\n".to_string(),
        Some("rust") => format!(
            "FROM rust:1.78 AS build\n\nWORKDIR /src\nCOPY . .\nRUN cargo build --release\n\nFROM debian:bookworm-slim\nCOPY --from=build /src/target/release/{name} /app\nEXPOSE 3000\nCMD [\"/app\"]\n",
            name = package_name(config)
        ),
        Some("node") => format!(
            "FROM node:20-alpine\n\nWORKDIR /app\nCOPY package.json ./\nRUN npm install --omit=dev\nCOPY . .\n\nEXPOSE 3000\nCMD [\"sh\", \"-c\", \"{}\"]\n",
            start_command(config)
        ),
        _ => "FROM nginx:alpine\n\nCOPY frontend/ /usr/share/nginx/html/\nEXPOSE 80\n".to_string(),
    }
}

type Service = (&'static str, &'static str, &'static str, &'static [&'static str]);

/// Compose service per engine: (engine, (service, image, port, environment))
const ENGINE_SERVICES: &[(&str, Service)] = &[
    (
        "postgresql",
        (
            "db",
            "postgres:16",
            "5432",
            &["POSTGRES_USER=user", "POSTGRES_PASSWORD=password", "POSTGRES_DB=app"],
        ),
    ),
    (
        "mysql",
        (
            "db",
            "mysql:8",
            "3306",
            &[
                "MYSQL_USER=user",
                "MYSQL_PASSWORD=password",
                "MYSQL_DATABASE=app",
                "MYSQL_ROOT_PASSWORD=password",
            ],
        ),
    ),
    ("mongodb", ("mongo", "mongo:7", "27017", &[])),
    ("redis", ("redis", "redis:7", "6379", &[])),
];

pub fn compose(config: &Configuration) -> String {
    let mut services: Vec<Service> = Vec::new();
    for engine in config.database_engines() {
        let Some((_, service)) = ENGINE_SERVICES.iter().find(|(id, _)| *id == engine) else {
            continue;
        };
        if !services.iter().any(|s| s.0 == service.0) {
            services.push(*service);
        }
    }

    let mut out = String::from("services:\n  app:\n    build: .\n    ports:\n      - \"3000:3000\"\n    env_file:\n      - .env\n");
    if !services.is_empty() {
        out.push_str("    depends_on:\n");
        for (name, ..) in &services {
            out.push_str(&format!("      - {name}\n"));
        }
    }
    for (name, image, port, environment) in &services {
        out.push_str(&format!(
            "\n  {name}:\n    image: {image}\n    ports:\n      - \"{port}:{port}\"\n"
        ));
        if !environment.is_empty() {
            out.push_str("    environment:\n");
            for var in environment.iter() {
                out.push_str(&format!("      - {var}\n"));
            }
        }
    }
    out
}

pub fn ci_workflow(config: &Configuration) -> String {
    let steps = match config.backend_language() {
        Some("python") => "      - uses: actions/setup-python@v5\n        with:\n          python-version: '3.12'\n      - run: pip install -r requirements.txt\n      - run: python -m compileall src\n",
        Some("go") => "      - uses: actions/setup-go@v5\n        with:\n          go-version: '1.22'\n      - run: go mod tidy\n      - run: go build ./...\n",
        Some("rust") => "      - uses: dtolnay/rust-toolchain@stable\n      - run: cargo build --locked || cargo build\n      - run: cargo test\n",
        Some("node") => "      - uses: actions/setup-node@v4\n        with:\n          node-version: 20\n      - run: npm install\n      - run: npm test --if-present\n",
        _ => "      - run: echo \"No build configured\"\n",
    };
    format!(
        "name: CI\n\non:\n  push:\n    branches: [main]\n  pull_request:\n\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - uses: actions/checkout@v4\n{steps}"
    )
}

const VERCEL_JSON: &str = r#"{
  "$schema": "https://openapi.vercel.sh/vercel.json",
  "cleanUrls": true
}
"#;

const NETLIFY_TOML: &str = r#"[build]
  publish = "frontend"
"#;

fn render_yaml(config: &Configuration) -> String {
    let (env, build) = match config.backend_language() {
        Some("python") => ("python", "pip install -r requirements.txt"),
        Some("go") => ("go", "go build -o app ./src"),
        Some("rust") => ("rust", "cargo build --release"),
        _ => ("node", "npm install"),
    };
    format!(
        "services:\n  - type: web\n    name: {}\n    env: {env}\n    buildCommand: {build}\n    startCommand: {}\n",
        config.project_type.id().replace('_', "-"),
        start_command(config)
    )
}

fn railway_json(config: &Configuration) -> String {
    let manifest = serde_json::json!({
        "$schema": "https://railway.app/railway.schema.json",
        "build": { "builder": if config.docker().is_some() { "DOCKERFILE" } else { "NIXPACKS" } },
        "deploy": { "startCommand": start_command(config) },
    });
    format!("{manifest:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validate;
    use serde_json::json;

    fn render_for(value: serde_json::Value) -> ProjectFiles {
        let mut files = ProjectFiles::new();
        render(&validate(&value).unwrap(), &mut files);
        files
    }

    #[test]
    fn test_docker_and_compose() {
        let files = render_for(json!({
            "project_type": "backend_only",
            "backend": { "language": "node", "framework": "express" },
            "database": { "engines": ["postgresql", "redis"] },
            "devops": { "docker": { "enabled": true, "compose": true } },
            "output": { "format": ["zip"] }
        }));

        assert!(files.get("Dockerfile").unwrap().starts_with("FROM node:20-alpine"));
        let compose = files.get("docker-compose.yml").unwrap();
        assert!(compose.contains("image: postgres:16"));
        assert!(compose.contains("image: redis:7"));
        assert!(compose.contains("depends_on:\n      - db\n      - redis\n"));
    }

    #[test]
    fn test_docker_disabled_renders_nothing() {
        let files = render_for(json!({
            "project_type": "backend_only",
            "devops": { "docker": { "enabled": false, "compose": true } },
            "output": { "format": ["zip"] }
        }));
        assert!(files.is_empty());
    }

    #[test]
    fn test_ci_and_deployment_targets() {
        let files = render_for(json!({
            "project_type": "web_app",
            "backend": { "language": "python", "framework": "fastapi" },
            "devops": { "ci_cd": true, "deployment_targets": ["vercel", "render", "railway", "aws"] },
            "output": { "format": ["zip"] }
        }));

        assert!(files
            .get(".github/workflows/ci.yml")
            .unwrap()
            .contains("actions/setup-python@v5"));
        assert!(files.contains("vercel.json"));
        assert!(files
            .get("render.yaml")
            .unwrap()
            .contains("startCommand: python src/main.py"));
        let railway: serde_json::Value =
            serde_json::from_str(files.get("railway.json").unwrap()).unwrap();
        assert_eq!(railway["build"]["builder"], "NIXPACKS");
        assert!(!files.contains("netlify.toml"));
    }
}
