//! Option catalog: static, read-only reference tables for every wizard choice
//!
//! Entries never carry `hidden`/`recommended` state. Those flags are derived
//! per request by [`crate::wizard::filter`] and live on [`crate::wizard::Choice`].

use serde::Serialize;

/// A selectable option: id, display name, icon key and description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// Backend options couple a language and a framework; selecting one sets both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendOption {
    pub id: &'static str,
    pub language: &'static str,
    pub framework: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// Optional features name the tool that implements them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureOption {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub tool: &'static str,
}

const fn entry(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        icon,
        description,
    }
}

pub static STEP_TITLES: [&str; 8] = [
    "Project Type",
    "Frontend Technology",
    "Backend Technology",
    "Database & Storage",
    "Authentication",
    "Deployment & DevOps",
    "Optional Features",
    "Generate & Download",
];

pub static PROJECT_TYPES: &[CatalogEntry] = &[
    entry("web_app", "Web Application", "web-app", "Full-stack web application with frontend and backend"),
    entry("frontend_only", "Frontend Only", "frontend", "Client-side application (SPA, static site)"),
    entry("backend_only", "Backend API", "api", "REST API or GraphQL backend service"),
    entry("cli_tool", "CLI Tool", "terminal", "Command-line interface application"),
    entry("microservice", "Microservice", "microservice", "Small, focused service for distributed architecture"),
    entry("browser_extension", "Browser Extension", "browser-extension", "Browser extension for Chrome, Firefox, etc."),
    entry("custom", "Custom", "custom", "Minimal skeleton to build on freely"),
];

pub static FRONTEND_FRAMEWORKS: &[CatalogEntry] = &[
    entry("react", "React", "react", "Component-based UI library"),
    entry("vue", "Vue.js", "vue", "Progressive JavaScript framework"),
    entry("svelte", "Svelte", "svelte", "Compiler-first UI framework"),
    entry("angular", "Angular", "angular", "Batteries-included TypeScript framework"),
    entry("nextjs", "Next.js", "nextjs", "React framework with server rendering"),
    entry("nuxt", "Nuxt.js", "nuxt", "Vue framework with server rendering"),
    entry("html", "HTML/CSS/JS", "html", "Plain static page"),
    entry("none", "None", "none", "No frontend"),
];

pub static UI_LIBRARIES: &[CatalogEntry] = &[
    entry("tailwindcss", "Tailwind CSS", "tailwindcss", "Utility-first CSS framework"),
    entry("shadcn", "shadcn/ui", "shadcn", "Copy-in React components built on Radix"),
    entry("chakra", "Chakra UI", "chakra", "Accessible React component library"),
    entry("mui", "Material-UI", "mui", "Material Design components"),
    entry("antd", "Ant Design", "antd", "Enterprise-class UI design system"),
    entry("bootstrap", "Bootstrap", "bootstrap", "Classic responsive CSS toolkit"),
    entry("vuetify", "Vuetify", "vuetify", "Material components for Vue"),
    entry("quasar", "Quasar", "quasar", "Vue framework and component suite"),
    entry("primeng", "PrimeNG", "primeng", "Rich UI components for Angular"),
];

pub static BACKEND_OPTIONS: &[BackendOption] = &[
    BackendOption {
        id: "node-express",
        language: "node",
        framework: "express",
        name: "Node.js + Express",
        icon: "nodejs",
        description: "Fast, minimalist web framework for Node.js",
    },
    BackendOption {
        id: "node-fastify",
        language: "node",
        framework: "fastify",
        name: "Node.js + Fastify",
        icon: "fastify",
        description: "Fast and low overhead web framework",
    },
    BackendOption {
        id: "python-fastapi",
        language: "python",
        framework: "fastapi",
        name: "Python + FastAPI",
        icon: "python",
        description: "Modern, fast web framework for building APIs",
    },
    BackendOption {
        id: "python-django",
        language: "python",
        framework: "django",
        name: "Python + Django",
        icon: "django",
        description: "High-level Python web framework",
    },
    BackendOption {
        id: "go-fiber",
        language: "go",
        framework: "fiber",
        name: "Go + Fiber",
        icon: "go",
        description: "Express-inspired web framework written in Go",
    },
    BackendOption {
        id: "rust-axum",
        language: "rust",
        framework: "axum",
        name: "Rust + Axum",
        icon: "rust",
        description: "Ergonomic and modular web framework for Rust",
    },
];

pub static DATABASES: &[CatalogEntry] = &[
    entry("postgresql", "PostgreSQL", "postgresql", "Advanced open source relational database"),
    entry("mysql", "MySQL", "mysql", "Popular open source relational database"),
    entry("sqlite", "SQLite", "sqlite", "Embedded file-based SQL database"),
    entry("mongodb", "MongoDB", "mongodb", "Document-oriented NoSQL database"),
    entry("redis", "Redis", "redis", "In-memory key-value store"),
    entry("none", "None", "none", "No database"),
];

pub static ORMS: &[CatalogEntry] = &[
    entry("prisma", "Prisma", "prisma", "Type-safe ORM for Node.js and TypeScript"),
    entry("typeorm", "TypeORM", "typeorm", "Decorator-based ORM for TypeScript"),
    entry("sequelize", "Sequelize", "sequelize", "Promise-based Node.js ORM"),
    entry("mongoose", "Mongoose", "mongoose", "MongoDB object modeling for Node.js"),
    entry("sqlalchemy", "SQLAlchemy", "sqlalchemy", "Python SQL toolkit and ORM"),
    entry("gorm", "GORM", "gorm", "Developer-friendly ORM for Go"),
];

pub static AUTH_PROVIDERS: &[CatalogEntry] = &[
    entry("none", "No Authentication", "none", "Skip authentication setup"),
    entry("auth0", "Auth0", "auth0", "Complete authentication and authorization platform"),
    entry("clerk", "Clerk", "clerk", "Complete user management platform"),
    entry("firebase", "Firebase Auth", "firebase", "Google Firebase authentication service"),
    entry("supabase", "Supabase Auth", "supabase", "Open source Firebase alternative"),
    entry("jwt", "Custom JWT", "jwt", "Custom JSON Web Token implementation"),
];

pub static DEPLOYMENT_PLATFORMS: &[CatalogEntry] = &[
    entry("vercel", "Vercel", "vercel", "Frontend cloud platform with serverless functions"),
    entry("netlify", "Netlify", "netlify", "All-in-one platform for modern web projects"),
    entry("railway", "Railway", "railway", "Infrastructure platform for full-stack applications"),
    entry("render", "Render", "render", "Cloud platform for modern applications"),
    entry("aws", "AWS", "aws", "Amazon Web Services cloud platform"),
    entry("docker", "Docker", "docker", "Containerized deployment"),
];

pub static OPTIONAL_FEATURES: &[FeatureOption] = &[
    FeatureOption {
        id: "api_docs",
        name: "API Documentation",
        icon: "api-docs",
        description: "Swagger/OpenAPI documentation",
        tool: "swagger",
    },
    FeatureOption {
        id: "admin_panel",
        name: "Admin Panel",
        icon: "admin-panel",
        description: "Administrative dashboard",
        tool: "react-admin",
    },
    FeatureOption {
        id: "stripe",
        name: "Payments",
        icon: "stripe",
        description: "Stripe payment integration",
        tool: "stripe",
    },
    FeatureOption {
        id: "analytics",
        name: "Analytics",
        icon: "analytics",
        description: "Google Analytics integration",
        tool: "google-analytics",
    },
    FeatureOption {
        id: "email",
        name: "Email Service",
        icon: "email",
        description: "Email sending capabilities",
        tool: "sendgrid",
    },
    FeatureOption {
        id: "ai_integration",
        name: "AI/LLM Integration",
        icon: "ai",
        description: "OpenAI API integration",
        tool: "openai",
    },
    FeatureOption {
        id: "dark_mode",
        name: "Dark Mode",
        icon: "dark-mode",
        description: "Light/dark theme toggle",
        tool: "theme",
    },
    FeatureOption {
        id: "i18n",
        name: "Internationalization",
        icon: "i18n",
        description: "Multi-language support",
        tool: "react-i18next",
    },
    FeatureOption {
        id: "pwa",
        name: "Progressive Web App",
        icon: "pwa",
        description: "PWA configuration",
        tool: "workbox",
    },
];

/// Find an entry by id in a table
pub fn find(table: &'static [CatalogEntry], id: &str) -> Option<&'static CatalogEntry> {
    table.iter().find(|e| e.id == id)
}

pub fn find_backend(id: &str) -> Option<&'static BackendOption> {
    BACKEND_OPTIONS.iter().find(|b| b.id == id)
}

/// Backend option matching a language/framework pair
pub fn backend_for(language: &str, framework: &str) -> Option<&'static BackendOption> {
    BACKEND_OPTIONS
        .iter()
        .find(|b| b.language == language && b.framework == framework)
}

pub fn find_feature(id: &str) -> Option<&'static FeatureOption> {
    OPTIONAL_FEATURES.iter().find(|f| f.id == id)
}

/// Every table, as served by the HTTP catalog endpoint
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub step_titles: &'static [&'static str],
    pub project_types: &'static [CatalogEntry],
    pub frontend_frameworks: &'static [CatalogEntry],
    pub ui_libraries: &'static [CatalogEntry],
    pub backend_options: &'static [BackendOption],
    pub databases: &'static [CatalogEntry],
    pub orms: &'static [CatalogEntry],
    pub auth_providers: &'static [CatalogEntry],
    pub deployment_platforms: &'static [CatalogEntry],
    pub optional_features: &'static [FeatureOption],
}

pub fn catalog() -> Catalog {
    Catalog {
        step_titles: &STEP_TITLES,
        project_types: PROJECT_TYPES,
        frontend_frameworks: FRONTEND_FRAMEWORKS,
        ui_libraries: UI_LIBRARIES,
        backend_options: BACKEND_OPTIONS,
        databases: DATABASES,
        orms: ORMS,
        auth_providers: AUTH_PROVIDERS,
        deployment_platforms: DEPLOYMENT_PLATFORMS,
        optional_features: OPTIONAL_FEATURES,
    }
}
