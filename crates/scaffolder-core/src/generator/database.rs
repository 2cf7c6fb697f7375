//! Schema, model and migration files for the selected database

use super::{docs, ProjectFiles};
use crate::config::Configuration;
use crate::wizard::filter::recommended_orm;

const RELATIONAL: &[&str] = &["postgresql", "mysql", "sqlite"];

/// Engines Prisma can target, in preference order
const PRISMA_PROVIDERS: &[&str] = &["postgresql", "mysql", "sqlite", "mongodb"];

/// GORM driver module per engine
const GORM_DRIVERS: &[(&str, &str)] = &[
    ("postgresql", "gorm.io/driver/postgres v1.5.9"),
    ("mysql", "gorm.io/driver/mysql v1.5.7"),
    ("sqlite", "gorm.io/driver/sqlite v1.5.6"),
];

/// The ORM generation uses: the configured one, else the language's
/// recommended one. None without a real database engine.
pub fn effective_orm(config: &Configuration) -> Option<&str> {
    if config.database_engines().is_empty() {
        return None;
    }
    config
        .orm()
        .filter(|orm| *orm != "none")
        .or_else(|| config.backend_language().and_then(recommended_orm))
}

/// GORM driver for the first engine that has one
pub fn gorm_driver(config: &Configuration) -> Option<(&'static str, &'static str)> {
    config.database_engines().into_iter().find_map(|engine| {
        GORM_DRIVERS
            .iter()
            .find(|(id, _)| *id == engine)
            .copied()
    })
}

pub fn render(config: &Configuration, files: &mut ProjectFiles) {
    let engines = config.database_engines();
    let Some(first) = engines.first().copied() else {
        return;
    };
    let models = model_names(config);

    match effective_orm(config) {
        Some("prisma") => match engines.iter().find(|e| PRISMA_PROVIDERS.contains(e)) {
            Some(provider) => files.add("database/schema.prisma", prisma_schema(provider, &models)),
            None => fallback(&engines, &models, files),
        },
        Some("typeorm") => files.add("database/data-source.ts", typeorm(first, &models)),
        Some("sequelize") => files.add("database/models.js", sequelize(first, &models)),
        Some("mongoose") => files.add("database/models.js", mongoose(&models)),
        Some("sqlalchemy") => files.add("database/models.py", sqlalchemy(&models)),
        Some("gorm") => files.add("database/models.go", gorm(&models)),
        _ => fallback(&engines, &models, files),
    }
}

fn fallback(engines: &[&str], models: &[String], files: &mut ProjectFiles) {
    match engines.iter().find(|e| RELATIONAL.contains(e)) {
        Some(engine) => files.add("database/migrations/001_init.sql", sql_migration(engine, models)),
        None => files.add("database/README.md", engine_notes(engines)),
    }
}

/// Configured model names reduced to identifier characters; `User` is always
/// generated so a configured `user` is dropped. Generators fold case, so
/// names are unique ignoring case, and must not start with a digit.
fn model_names(config: &Configuration) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for model in config.models() {
        let name: String = model
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        let starts_valid = name.chars().next().is_some_and(|c| !c.is_ascii_digit());
        if !starts_valid
            || name.eq_ignore_ascii_case("user")
            || names.iter().any(|n| n.eq_ignore_ascii_case(&name))
        {
            continue;
        }
        names.push(name);
    }
    names
}

pub fn prisma_schema(provider: &str, models: &[String]) -> String {
    let id = if provider == "mongodb" {
        "String   @id @default(auto()) @map(\"_id\") @db.ObjectId"
    } else {
        "Int      @id @default(autoincrement())"
    };

    let mut out = format!(
        "generator client {{\n  provider = \"prisma-client-js\"\n}}\n\ndatasource db {{\n  provider = \"{provider}\"\n  url      = env(\"DATABASE_URL\")\n}}\n\nmodel User {{\n  id        {id}\n  email     String   @unique\n  name      String?\n  createdAt DateTime @default(now())\n}}\n"
    );
    for model in models {
        out.push_str(&format!(
            "\nmodel {model} {{\n  id        {id}\n  createdAt DateTime @default(now())\n  updatedAt DateTime @updatedAt\n}}\n"
        ));
    }
    out
}

fn typeorm(engine: &str, models: &[String]) -> String {
    let kind = match engine {
        "postgresql" => "postgres",
        other => other,
    };
    let mut out = String::from(
        "import 'reflect-metadata';\nimport { DataSource, Entity, PrimaryGeneratedColumn, Column, CreateDateColumn } from 'typeorm';\n\n@Entity()\nexport class User {\n  @PrimaryGeneratedColumn()\n  id!: number;\n\n  @Column({ unique: true })\n  email!: string;\n\n  @Column({ nullable: true })\n  name?: string;\n\n  @CreateDateColumn()\n  createdAt!: Date;\n}\n",
    );
    for model in models {
        out.push_str(&format!(
            "\n@Entity()\nexport class {model} {{\n  @PrimaryGeneratedColumn()\n  id!: number;\n\n  @CreateDateColumn()\n  createdAt!: Date;\n}}\n"
        ));
    }
    let entities: Vec<&str> = std::iter::once("User")
        .chain(models.iter().map(String::as_str))
        .collect();
    out.push_str(&format!(
        "\nexport const AppDataSource = new DataSource({{\n  type: '{kind}',\n  url: process.env.DATABASE_URL,\n  synchronize: process.env.NODE_ENV !== 'production',\n  entities: [{}],\n}});\n",
        entities.join(", ")
    ));
    out
}

fn sequelize(engine: &str, models: &[String]) -> String {
    let dialect = match engine {
        "postgresql" => "postgres",
        other => other,
    };
    let mut out = format!(
        "const {{ Sequelize, DataTypes }} = require('sequelize');\n\nconst sequelize = new Sequelize(process.env.DATABASE_URL, {{ dialect: '{dialect}' }});\n\nconst User = sequelize.define('User', {{\n  email: {{ type: DataTypes.STRING, allowNull: false, unique: true }},\n  name: {{ type: DataTypes.STRING }},\n}});\n"
    );
    for model in models {
        out.push_str(&format!("\nconst {model} = sequelize.define('{model}', {{}});\n"));
    }
    out.push_str(&format!(
        "\nmodule.exports = {{ sequelize, User{} }};\n",
        exports(models)
    ));
    out
}

fn mongoose(models: &[String]) -> String {
    let mut out = String::from(
        "const mongoose = require('mongoose');\n\nconst User = mongoose.model('User', new mongoose.Schema({\n  email: { type: String, required: true, unique: true },\n  name: String,\n}, { timestamps: true }));\n",
    );
    for model in models {
        out.push_str(&format!(
            "\nconst {model} = mongoose.model('{model}', new mongoose.Schema({{}}, {{ timestamps: true }}));\n"
        ));
    }
    out.push_str(&format!(
        "\nfunction connect() {{\n  return mongoose.connect(process.env.DATABASE_URL);\n}}\n\nmodule.exports = {{ connect, User{} }};\n",
        exports(models)
    ));
    out
}

fn exports(models: &[String]) -> String {
    models.iter().map(|m| format!(", {m}")).collect()
}

fn sqlalchemy(models: &[String]) -> String {
    let mut out = String::from(
        "import os\nfrom datetime import datetime\n\nfrom sqlalchemy import DateTime, Integer, String, create_engine\nfrom sqlalchemy.orm import DeclarativeBase, Mapped, mapped_column, sessionmaker\n\nengine = create_engine(os.environ[\"DATABASE_URL\"])\nSessionLocal = sessionmaker(bind=engine)\n\n\nclass Base(DeclarativeBase):\n    pass\n\n\nclass User(Base):\n    __tablename__ = \"users\"\n\n    id: Mapped[int] = mapped_column(Integer, primary_key=True)\n    email: Mapped[str] = mapped_column(String(255), unique=True)\n    name: Mapped[str | None] = mapped_column(String(255))\n    created_at: Mapped[datetime] = mapped_column(DateTime, default=datetime.utcnow)\n",
    );
    for model in models {
        out.push_str(&format!(
            "\n\nclass {model}(Base):\n    __tablename__ = \"{}\"\n\n    id: Mapped[int] = mapped_column(Integer, primary_key=True)\n    created_at: Mapped[datetime] = mapped_column(DateTime, default=datetime.utcnow)\n",
            model.to_lowercase()
        ));
    }
    out
}

fn gorm(models: &[String]) -> String {
    let mut out = String::from(
        "package database\n\nimport \"gorm.io/gorm\"\n\ntype User struct {\n\tgorm.Model\n\tEmail string `gorm:\"uniqueIndex\"`\n\tName  string\n}\n",
    );
    for model in models {
        out.push_str(&format!("\ntype {} struct {{\n\tgorm.Model\n}}\n", exported(model)));
    }
    let all: Vec<String> = std::iter::once("&User{}".to_string())
        .chain(models.iter().map(|m| format!("&{}{{}}", exported(m))))
        .collect();
    out.push_str(&format!(
        "\nfunc Migrate(db *gorm.DB) error {{\n\treturn db.AutoMigrate({})\n}}\n",
        all.join(", ")
    ));
    out
}

/// Go identifiers must start upper-case to be exported
fn exported(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn sql_migration(engine: &str, models: &[String]) -> String {
    let id = match engine {
        "postgresql" => "SERIAL PRIMARY KEY",
        "mysql" => "INT AUTO_INCREMENT PRIMARY KEY",
        _ => "INTEGER PRIMARY KEY AUTOINCREMENT",
    };
    let mut out = format!(
        "-- Initial schema for {engine}\n\nCREATE TABLE users (\n    id {id},\n    email VARCHAR(255) NOT NULL UNIQUE,\n    name VARCHAR(255),\n    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP\n);\n"
    );
    for model in models {
        out.push_str(&format!(
            "\nCREATE TABLE {} (\n    id {id},\n    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP\n);\n",
            model.to_lowercase()
        ));
    }
    out
}

fn engine_notes(engines: &[&str]) -> String {
    let mut lines = vec!["# Database".to_string(), String::new()];
    for engine in engines {
        lines.push(format!("- {engine}: `{}`", docs::database_url(engine)));
    }
    lines.join("\n")
}
