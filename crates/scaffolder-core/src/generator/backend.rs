//! Backend entrypoint and manifest per language

use super::{database, ProjectFiles};
use crate::config::{Configuration, ProjectType};
use serde_json::{json, Map, Value};

/// Package name used when the configuration names no repository
pub const DEFAULT_PACKAGE_NAME: &str = "starterforge-backend";

const NODE_AUTH_DEPS: &[(&str, &str, &str)] = &[
    ("auth0", "express-oauth2-jwt-bearer", "^1.6.0"),
    ("clerk", "@clerk/clerk-sdk-node", "^5.0.12"),
    ("firebase", "firebase-admin", "^12.1.1"),
    ("supabase", "@supabase/supabase-js", "^2.43.4"),
    ("jwt", "jsonwebtoken", "^9.0.2"),
];

const NODE_FEATURE_DEPS: &[(&str, &str, &str)] = &[
    ("api_docs", "swagger-ui-express", "^5.0.1"),
    ("stripe", "stripe", "^15.12.0"),
    ("email", "@sendgrid/mail", "^8.1.3"),
    ("ai_integration", "openai", "^4.52.0"),
];

const PYTHON_AUTH_REQS: &[(&str, &str)] = &[
    ("auth0", "PyJWT==2.8.0"),
    ("clerk", "PyJWT==2.8.0"),
    ("jwt", "PyJWT==2.8.0"),
    ("firebase", "firebase-admin==6.5.0"),
    ("supabase", "supabase==2.5.0"),
];

const PYTHON_FEATURE_REQS: &[(&str, &str)] = &[
    ("stripe", "stripe==9.12.0"),
    ("email", "sendgrid==6.11.0"),
    ("ai_integration", "openai==1.35.3"),
];

pub fn render(config: &Configuration, files: &mut ProjectFiles) {
    let Some(language) = config.backend_language() else {
        return;
    };
    let cli = config.project_type == ProjectType::CliTool;

    match language {
        "node" => {
            let entry = if cli { "src/cli.js" } else { "src/index.js" };
            let contents = if cli {
                node_cli(config)
            } else if config.backend_framework() == Some("fastify") {
                fastify_entry(config)
            } else {
                express_entry(config)
            };
            files.add(entry, contents);
            files.add("package.json", package_json(config, entry));
        }
        "python" => {
            let (entry, contents) = if cli {
                ("src/cli.py", PYTHON_CLI.to_string())
            } else if config.backend_framework() == Some("django") {
                ("src/main.py", DJANGO_MAIN.to_string())
            } else {
                ("src/main.py", FASTAPI_MAIN.to_string())
            };
            files.add(entry, contents);
            files.add("requirements.txt", requirements(config));
        }
        "go" => {
            files.add("src/main.go", if cli { GO_CLI } else { FIBER_MAIN });
            files.add("go.mod", go_mod(config));
        }
        "rust" => {
            files.add("src/main.rs", if cli { RUST_CLI } else { AXUM_MAIN });
            files.add("Cargo.toml", cargo_toml(config));
        }
        other => tracing::debug!(language = other, "no backend template for language"),
    }
}

/// Repository name when given, else the default package name
pub fn package_name(config: &Configuration) -> &str {
    config
        .output
        .repo
        .as_ref()
        .map(|repo| repo.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_PACKAGE_NAME)
}

fn uses_prisma(config: &Configuration) -> bool {
    database::effective_orm(config) == Some("prisma")
}

fn node_auth(config: &Configuration) -> bool {
    config
        .auth_provider()
        .is_some_and(|p| NODE_AUTH_DEPS.iter().any(|(id, _, _)| *id == p))
}

const EXPRESS_APP: &str = r#"
const app = express();
const PORT = process.env.PORT || 3000;

app.use(express.json());

app.get('/', (req, res) => {
  res.json({ message: 'Hello from Express' });
});

app.get('/health', (req, res) => {
  res.json({ status: 'ok' });
});
"#;

const EXPRESS_PRISMA_ROUTES: &str = r#"
app.get('/api/users', async (req, res) => {
  const users = await prisma.user.findMany();
  res.json(users);
});
"#;

const EXPRESS_AUTH_ROUTES: &str = r#"
app.get('/api/me', requireAuth, (req, res) => {
  res.json({ user: req.user });
});
"#;

const EXPRESS_LISTEN: &str = r#"
app.listen(PORT, () => {
  console.log(`Server listening on port ${PORT}`);
});
"#;

fn express_entry(config: &Configuration) -> String {
    let mut out = String::from("require('dotenv').config();\n\nconst express = require('express');\n");
    if uses_prisma(config) {
        out.push_str("const { PrismaClient } = require('@prisma/client');\n");
    }
    if node_auth(config) {
        out.push_str("const { requireAuth } = require('../auth/middleware');\n");
    }
    out.push_str(EXPRESS_APP);
    if uses_prisma(config) {
        out.push_str("\nconst prisma = new PrismaClient();\n");
        out.push_str(EXPRESS_PRISMA_ROUTES);
    }
    if node_auth(config) {
        out.push_str(EXPRESS_AUTH_ROUTES);
    }
    out.push_str(EXPRESS_LISTEN);
    out
}

const FASTIFY_APP: &str = r#"
const fastify = require('fastify')({ logger: true });

fastify.get('/', async () => ({ message: 'Hello from Fastify' }));

fastify.get('/health', async () => ({ status: 'ok' }));
"#;

const FASTIFY_PRISMA_ROUTES: &str = r#"
const prisma = new PrismaClient();

fastify.get('/api/users', async () => prisma.user.findMany());
"#;

const FASTIFY_LISTEN: &str = r#"
fastify.listen({ port: Number(process.env.PORT) || 3000, host: '0.0.0.0' }).catch((err) => {
  fastify.log.error(err);
  process.exit(1);
});
"#;

fn fastify_entry(config: &Configuration) -> String {
    let mut out = String::from("require('dotenv').config();\n");
    if uses_prisma(config) {
        out.push_str("\nconst { PrismaClient } = require('@prisma/client');\n");
    }
    out.push_str(FASTIFY_APP);
    if uses_prisma(config) {
        out.push_str(FASTIFY_PRISMA_ROUTES);
    }
    out.push_str(FASTIFY_LISTEN);
    out
}

const NODE_CLI_COMMANDS: &str = r#"
program
  .command('hello')
  .description('Print a greeting')
  .argument('[name]', 'who to greet', 'world')
  .action((name) => {
    console.log(`Hello, ${name}!`);
  });

program.parse();
"#;

fn node_cli(config: &Configuration) -> String {
    let mut out = String::from(
        "#!/usr/bin/env node\nconst { Command } = require('commander');\n\nconst program = new Command();\n\n",
    );
    out.push_str("program\n");
    out.push_str(&format!("  .name('{}')\n", package_name(config)));
    out.push_str(&format!(
        "  .description('{} generated by StarterForge')\n",
        config.project_type.heading()
    ));
    out.push_str("  .version('0.1.0');\n");
    out.push_str(NODE_CLI_COMMANDS);
    out
}

fn insert(map: &mut Map<String, Value>, name: &str, version: &str) {
    map.insert(name.to_string(), Value::String(version.to_string()));
}

pub fn package_json(config: &Configuration, entry: &str) -> String {
    let cli = config.project_type == ProjectType::CliTool;
    let mut dependencies = Map::new();
    let mut dev_dependencies = Map::new();

    if cli {
        insert(&mut dependencies, "commander", "^12.1.0");
    } else if config.backend_framework() == Some("fastify") {
        insert(&mut dependencies, "fastify", "^4.28.1");
    } else {
        insert(&mut dependencies, "express", "^4.19.2");
    }
    insert(&mut dependencies, "dotenv", "^16.4.5");

    let orm = database::effective_orm(config);
    match orm {
        Some("prisma") => {
            insert(&mut dependencies, "@prisma/client", "^5.15.0");
            insert(&mut dev_dependencies, "prisma", "^5.15.0");
        }
        Some("typeorm") => {
            insert(&mut dependencies, "typeorm", "^0.3.20");
            insert(&mut dependencies, "reflect-metadata", "^0.2.2");
        }
        Some("sequelize") => insert(&mut dependencies, "sequelize", "^6.37.3"),
        Some("mongoose") => insert(&mut dependencies, "mongoose", "^8.4.1"),
        _ => {}
    }

    // Prisma and Mongoose bundle their own drivers
    let bundled = matches!(orm, Some("prisma") | Some("mongoose"));
    for engine in config.database_engines() {
        match engine {
            "postgresql" if !bundled => insert(&mut dependencies, "pg", "^8.12.0"),
            "mysql" if !bundled => insert(&mut dependencies, "mysql2", "^3.10.0"),
            "sqlite" if !bundled => insert(&mut dependencies, "sqlite3", "^5.1.7"),
            "mongodb" if !bundled => insert(&mut dependencies, "mongodb", "^6.7.0"),
            "redis" => insert(&mut dependencies, "redis", "^4.6.14"),
            _ => {}
        }
    }

    if let Some(provider) = config.auth_provider() {
        if let Some((_, name, version)) = NODE_AUTH_DEPS.iter().find(|(id, _, _)| *id == provider) {
            insert(&mut dependencies, name, version);
        }
    }
    for feature in config.features() {
        if let Some((_, name, version)) = NODE_FEATURE_DEPS
            .iter()
            .find(|(id, _, _)| *id == feature.feature)
        {
            insert(&mut dependencies, name, version);
        }
    }

    let name = package_name(config);
    let mut scripts = Map::new();
    scripts.insert("start".into(), Value::String(format!("node {entry}")));
    scripts.insert("dev".into(), Value::String(format!("node --watch {entry}")));
    if orm == Some("prisma") {
        scripts.insert(
            "db:push".into(),
            Value::String("prisma db push --schema database/schema.prisma".into()),
        );
    }

    let mut manifest = json!({
        "name": name,
        "version": "0.1.0",
        "private": true,
        "main": entry,
        "scripts": scripts,
        "dependencies": dependencies,
    });
    if let Some(object) = manifest.as_object_mut() {
        if cli {
            object.insert("bin".into(), json!({ name: entry }));
        }
        if !dev_dependencies.is_empty() {
            object.insert("devDependencies".into(), Value::Object(dev_dependencies));
        }
    }
    format!("{manifest:#}")
}

const FASTAPI_MAIN: &str = r#"import os

from fastapi import FastAPI

app = FastAPI()


@app.get("/")
def read_root():
    return {"message": "Hello from FastAPI"}


@app.get("/health")
def health():
    return {"status": "ok"}


if __name__ == "__main__":
    import uvicorn

    uvicorn.run(app, host="0.0.0.0", port=int(os.getenv("PORT", "3000")))
"#;

const DJANGO_MAIN: &str = r#"import os
import sys

from django.conf import settings
from django.core.management import execute_from_command_line
from django.http import JsonResponse
from django.urls import path

settings.configure(
    DEBUG=os.getenv("PYTHON_ENV", "development") == "development",
    ROOT_URLCONF=__name__,
    SECRET_KEY=os.getenv("SECRET_KEY", "change-me"),
    ALLOWED_HOSTS=["*"],
)


def index(request):
    return JsonResponse({"message": "Hello from Django"})


def health(request):
    return JsonResponse({"status": "ok"})


urlpatterns = [path("", index), path("health", health)]

if __name__ == "__main__":
    port = os.getenv("PORT", "3000")
    execute_from_command_line([sys.argv[0], "runserver", f"0.0.0.0:{port}"])
"#;

const PYTHON_CLI: &str = r#"import argparse


def main() -> None:
    parser = argparse.ArgumentParser(description="Generated by StarterForge")
    parser.add_argument("name", nargs="?", default="world", help="who to greet")
    args = parser.parse_args()
    print(f"Hello, {args.name}!")


if __name__ == "__main__":
    main()
"#;

pub fn requirements(config: &Configuration) -> String {
    let cli = config.project_type == ProjectType::CliTool;
    let mut reqs: Vec<&str> = Vec::new();

    if !cli {
        if config.backend_framework() == Some("django") {
            reqs.push("Django==5.0.6");
        } else {
            reqs.extend(["fastapi==0.111.0", "uvicorn[standard]==0.30.1"]);
        }
    }
    reqs.push("python-dotenv==1.0.1");

    if database::effective_orm(config) == Some("sqlalchemy") {
        reqs.push("SQLAlchemy==2.0.30");
    }
    for engine in config.database_engines() {
        match engine {
            "postgresql" => reqs.push("psycopg2-binary==2.9.9"),
            "mysql" => reqs.push("PyMySQL==1.1.1"),
            "mongodb" => reqs.push("pymongo==4.7.3"),
            "redis" => reqs.push("redis==5.0.6"),
            _ => {}
        }
    }
    if let Some(provider) = config.auth_provider() {
        if let Some((_, req)) = PYTHON_AUTH_REQS.iter().find(|(id, _)| *id == provider) {
            reqs.push(req);
        }
    }
    for feature in config.features() {
        if let Some((_, req)) = PYTHON_FEATURE_REQS.iter().find(|(id, _)| *id == feature.feature) {
            reqs.push(req);
        }
    }

    let mut seen = Vec::new();
    reqs.retain(|r| {
        let fresh = !seen.contains(r);
        seen.push(*r);
        fresh
    });
    reqs.join("\n")
}

const FIBER_MAIN: &str = r#"package main

import (
	"log"
	"os"

	"github.com/gofiber/fiber/v2"
)

func main() {
	app := fiber.New()

	app.Get("/", func(c *fiber.Ctx) error {
		return c.JSON(fiber.Map{"message": "Hello from Fiber"})
	})

	app.Get("/health", func(c *fiber.Ctx) error {
		return c.JSON(fiber.Map{"status": "ok"})
	})

	port := os.Getenv("PORT")
	if port == "" {
		port = "3000"
	}
	log.Fatal(app.Listen(":" + port))
}
"#;

const GO_CLI: &str = r#"package main

import (
	"flag"
	"fmt"
)

func main() {
	name := flag.String("name", "world", "who to greet")
	flag.Parse()
	fmt.Printf("Hello, %s!\n", *name)
}
"#;

pub fn go_mod(config: &Configuration) -> String {
    let mut requires: Vec<&str> = Vec::new();
    if config.project_type != ProjectType::CliTool {
        requires.push("github.com/gofiber/fiber/v2 v2.52.4");
    }
    if database::effective_orm(config) == Some("gorm") {
        requires.push("gorm.io/gorm v1.25.10");
        if let Some(driver) = database::gorm_driver(config) {
            requires.push(driver.1);
        }
    }

    let mut out = format!("module {}\n\ngo 1.22\n", package_name(config));
    if !requires.is_empty() {
        out.push_str("\nrequire (\n");
        for require in requires {
            out.push_str(&format!("\t{require}\n"));
        }
        out.push_str(")\n");
    }
    out
}

const AXUM_MAIN: &str = r#"use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello from Axum" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
"#;

const RUST_CLI: &str = r#"use clap::Parser;

/// Generated by StarterForge
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Who to greet
    #[arg(short, long, default_value = "world")]
    name: String,
}

fn main() {
    let args = Args::parse();
    println!("Hello, {}!", args.name);
}
"#;

pub fn cargo_toml(config: &Configuration) -> String {
    let name = package_name(config);
    let mut out = format!(
        "[package]\nname = \"{name}\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[[bin]]\nname = \"{name}\"\npath = \"src/main.rs\"\n\n[dependencies]\n"
    );
    if config.project_type == ProjectType::CliTool {
        out.push_str("clap = { version = \"4\", features = [\"derive\"] }\n");
        return out;
    }
    out.push_str("axum = \"0.7\"\nserde_json = \"1\"\ntokio = { version = \"1\", features = [\"full\"] }\n");

    let sqlx_drivers: Vec<&str> = config
        .database_engines()
        .into_iter()
        .filter_map(|engine| match engine {
            "postgresql" => Some("\"postgres\""),
            "mysql" => Some("\"mysql\""),
            "sqlite" => Some("\"sqlite\""),
            _ => None,
        })
        .collect();
    if !sqlx_drivers.is_empty() {
        out.push_str(&format!(
            "sqlx = {{ version = \"0.7\", features = [\"runtime-tokio\", {}] }}\n",
            sqlx_drivers.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validate;

    fn config(value: Value) -> Configuration {
        validate(&value).unwrap()
    }

    fn node_web_app() -> Configuration {
        config(json!({
            "project_type": "web_app",
            "backend": { "language": "node", "framework": "express" },
            "database": { "engines": ["postgresql"] },
            "auth": { "provider": "auth0" },
            "output": { "format": ["zip"] }
        }))
    }

    #[test]
    fn test_express_project() {
        let mut files = ProjectFiles::new();
        render(&node_web_app(), &mut files);

        let index = files.get("src/index.js").unwrap();
        assert!(index.contains("const express = require('express')"));
        assert!(index.contains("Hello from Express"));
        assert!(index.contains("app.listen(PORT"));
        assert!(index.contains("require('../auth/middleware')"));
        assert!(index.contains("prisma.user.findMany()"));

        let manifest: Value = serde_json::from_str(files.get("package.json").unwrap()).unwrap();
        assert_eq!(manifest["name"], DEFAULT_PACKAGE_NAME);
        assert_eq!(manifest["scripts"]["start"], "node src/index.js");
        assert!(manifest["dependencies"]["express"].is_string());
        assert!(manifest["dependencies"]["@prisma/client"].is_string());
        assert!(manifest["dependencies"]["express-oauth2-jwt-bearer"].is_string());
        assert!(manifest["dependencies"].get("pg").is_none());
        assert!(manifest["devDependencies"]["prisma"].is_string());
    }

    #[test]
    fn test_package_json_key_order() {
        let manifest = package_json(&node_web_app(), "src/index.js");
        let name = manifest.find("\"name\"").unwrap();
        let deps = manifest.find("\"dependencies\"").unwrap();
        assert!(name < deps);
    }

    #[test]
    fn test_fastify_project() {
        let mut files = ProjectFiles::new();
        render(
            &config(json!({
                "project_type": "backend_only",
                "backend": { "language": "node", "framework": "fastify" },
                "database": { "engines": ["mysql"], "orm": "sequelize" },
                "output": { "format": ["zip"] }
            })),
            &mut files,
        );

        assert!(files.get("src/index.js").unwrap().contains("Hello from Fastify"));
        let manifest: Value = serde_json::from_str(files.get("package.json").unwrap()).unwrap();
        assert!(manifest["dependencies"]["fastify"].is_string());
        assert!(manifest["dependencies"]["sequelize"].is_string());
        assert!(manifest["dependencies"]["mysql2"].is_string());
        assert!(manifest.get("devDependencies").is_none());
    }

    #[test]
    fn test_node_cli_uses_repo_name() {
        let mut files = ProjectFiles::new();
        render(
            &config(json!({
                "project_type": "cli_tool",
                "backend": { "language": "node" },
                "output": { "format": ["zip"], "repo": { "name": "greeter", "visibility": "public" } }
            })),
            &mut files,
        );

        assert!(files.get("src/cli.js").unwrap().contains(".name('greeter')"));
        let manifest: Value = serde_json::from_str(files.get("package.json").unwrap()).unwrap();
        assert_eq!(manifest["bin"]["greeter"], "src/cli.js");
        assert!(manifest["dependencies"]["commander"].is_string());
    }

    #[test]
    fn test_python_cli() {
        let mut files = ProjectFiles::new();
        render(
            &config(json!({
                "project_type": "cli_tool",
                "backend": { "language": "python" },
                "output": { "format": ["zip"] }
            })),
            &mut files,
        );

        assert!(files.get("src/cli.py").unwrap().contains("argparse"));
        let reqs = files.get("requirements.txt").unwrap();
        assert!(reqs.contains("python-dotenv"));
        assert!(!reqs.contains("fastapi"));
    }

    #[test]
    fn test_python_requirements_deduplicated() {
        let reqs = requirements(&config(json!({
            "project_type": "backend_only",
            "backend": { "language": "python", "framework": "fastapi" },
            "database": { "engines": ["postgresql", "postgresql"] },
            "auth": { "provider": "jwt" },
            "output": { "format": ["zip"] }
        })));

        assert!(reqs.contains("fastapi=="));
        assert!(reqs.contains("SQLAlchemy=="));
        assert!(reqs.contains("PyJWT=="));
        assert_eq!(reqs.matches("psycopg2-binary").count(), 1);
    }

    #[test]
    fn test_go_and_rust_manifests() {
        let go = go_mod(&config(json!({
            "project_type": "microservice",
            "backend": { "language": "go", "framework": "fiber" },
            "database": { "engines": ["postgresql"] },
            "output": { "format": ["zip"] }
        })));
        assert!(go.starts_with("module starterforge-backend"));
        assert!(go.contains("gofiber/fiber/v2"));
        assert!(go.contains("gorm.io/driver/postgres"));

        let cargo = cargo_toml(&config(json!({
            "project_type": "backend_only",
            "backend": { "language": "rust", "framework": "axum" },
            "database": { "engines": ["sqlite"] },
            "output": { "format": ["zip"] }
        })));
        assert!(cargo.contains("axum = \"0.7\""));
        assert!(cargo.contains("\"sqlite\""));
    }

    #[test]
    fn test_unknown_language_renders_nothing() {
        let mut files = ProjectFiles::new();
        render(
            &config(json!({
                "project_type": "backend_only",
                "backend": { "language": "cobol" },
                "output": { "format": ["zip"] }
            })),
            &mut files,
        );
        assert!(files.is_empty());
    }
}
