//! Auth provider config, middleware and login button

use super::ProjectFiles;
use crate::catalog::{self, AUTH_PROVIDERS};
use crate::config::Configuration;

/// Environment keys each provider reads
const PROVIDER_ENV: &[(&str, &[&str])] = &[
    (
        "auth0",
        &["AUTH0_DOMAIN", "AUTH0_CLIENT_ID", "AUTH0_CLIENT_SECRET", "AUTH0_AUDIENCE"],
    ),
    ("clerk", &["CLERK_PUBLISHABLE_KEY", "CLERK_SECRET_KEY"]),
    (
        "firebase",
        &["FIREBASE_API_KEY", "FIREBASE_AUTH_DOMAIN", "FIREBASE_PROJECT_ID"],
    ),
    ("supabase", &["SUPABASE_URL", "SUPABASE_ANON_KEY"]),
    ("jwt", &["JWT_SECRET", "JWT_EXPIRES_IN"]),
];

/// Environment keys for a provider; empty for unknown providers
pub fn env_keys(provider: &str) -> &'static [&'static str] {
    PROVIDER_ENV
        .iter()
        .find(|(id, _)| *id == provider)
        .map(|(_, keys)| *keys)
        .unwrap_or(&[])
}

pub fn render(config: &Configuration, files: &mut ProjectFiles) {
    let Some(provider) = config.auth_provider() else {
        return;
    };
    let keys = env_keys(provider);
    if keys.is_empty() {
        tracing::debug!(provider, "no auth template for provider");
        return;
    }
    let display = catalog::find(AUTH_PROVIDERS, provider)
        .map(|entry| entry.name)
        .unwrap_or(provider);

    files.add(format!("auth/{provider}-config.js"), provider_config(provider, keys));

    let (ext, middleware) = match config.backend_language() {
        Some("python") => ("py", python_middleware(provider)),
        Some("go") => ("go", GO_MIDDLEWARE.to_string()),
        Some("rust") => ("rs", RUST_MIDDLEWARE.to_string()),
        _ => ("js", node_middleware(provider)),
    };
    files.add(format!("auth/middleware.{ext}"), middleware);

    if wants_login_ui(config) {
        files.add("auth/LoginButton.tsx", login_button(display));
    }
}

/// Explicit `include_ui`, else whenever a frontend framework is chosen
fn wants_login_ui(config: &Configuration) -> bool {
    match config.auth.as_ref().and_then(|a| a.include_ui) {
        Some(include) => include,
        None => config.frontend_framework().is_some() && !config.project_type.skips_frontend(),
    }
}

/// `AUTH0_CLIENT_ID` -> `clientId`
fn config_key(provider: &str, env_key: &str) -> String {
    let prefix = format!("{}_", provider.to_uppercase());
    let rest = env_key.strip_prefix(&prefix).unwrap_or(env_key);
    let mut out = String::new();
    for (i, part) in rest.split('_').enumerate() {
        let lower = part.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

fn provider_config(provider: &str, keys: &[&str]) -> String {
    let mut out = String::from("module.exports = {\n");
    for key in keys {
        out.push_str(&format!(
            "  {}: process.env.{key},\n",
            config_key(provider, key)
        ));
    }
    out.push_str("};\n");
    out
}

fn node_middleware(provider: &str) -> String {
    let verify = if provider == "jwt" {
        "const jwt = require('jsonwebtoken');\n\nfunction verify(token) {\n  return jwt.verify(token, config.secret);\n}\n"
    } else {
        "function verify(token) {\n  // Replace with the provider SDK's token verification\n  return { token };\n}\n"
    };
    format!(
        "const config = require('./{provider}-config');\n{verify}\nfunction requireAuth(req, res, next) {{\n  const header = req.headers.authorization || '';\n  if (!header.startsWith('Bearer ')) {{\n    return res.status(401).json({{ error: 'Missing bearer token' }});\n  }}\n  try {{\n    req.user = verify(header.slice(7));\n    return next();\n  }} catch (err) {{\n    return res.status(401).json({{ error: 'Invalid token' }});\n  }}\n}}\n\nmodule.exports = {{ requireAuth }};\n"
    )
}

fn python_middleware(provider: &str) -> String {
    let verify = if provider == "jwt" {
        "import jwt\n\n\ndef verify(token: str) -> dict:\n    return jwt.decode(token, os.environ[\"JWT_SECRET\"], algorithms=[\"HS256\"])\n"
    } else {
        "def verify(token: str) -> dict:\n    # Replace with the provider SDK's token verification\n    return {\"token\": token}\n"
    };
    format!(
        "import os\n\nfrom fastapi import Header, HTTPException\n\n{verify}\n\ndef require_auth(authorization: str | None = Header(default=None)) -> dict:\n    if not authorization or not authorization.startswith(\"Bearer \"):\n        raise HTTPException(status_code=401, detail=\"Missing bearer token\")\n    try:\n        return verify(authorization[7:])\n    except Exception as exc:\n        raise HTTPException(status_code=401, detail=\"Invalid token\") from exc\n"
    )
}

const GO_MIDDLEWARE: &str = r#"package auth

import (
	"strings"

	"github.com/gofiber/fiber/v2"
)

// RequireAuth rejects requests without a bearer token
func RequireAuth(c *fiber.Ctx) error {
	header := c.Get("Authorization")
	if !strings.HasPrefix(header, "Bearer ") {
		return c.Status(fiber.StatusUnauthorized).JSON(fiber.Map{"error": "Missing bearer token"})
	}
	c.Locals("token", strings.TrimPrefix(header, "Bearer "))
	return c.Next()
}
"#;

const RUST_MIDDLEWARE: &str = r#"use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Rejects requests without a bearer token
pub async fn require_auth(request: Request, next: Next) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Bearer "));
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}
"#;

fn login_button(display: &str) -> String {
    format!(
        "import React from 'react';\n\nexport default function LoginButton() {{\n  const login = () => {{\n    window.location.href = '/login';\n  }};\n\n  return <button onClick={{login}}>Log in with {display}</button>;\n}}\n"
    )
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
    fn test_auth0_web_app() {
        let files = render_for(json!({
            "project_type": "web_app",
            "frontend": { "framework": "react" },
            "backend": { "language": "node", "framework": "express" },
            "auth": { "provider": "auth0" },
            "output": { "format": ["zip"] }
        }));

        let config = files.get("auth/auth0-config.js").unwrap();
        assert!(config.contains("domain: process.env.AUTH0_DOMAIN,"));
        assert!(config.contains("clientId: process.env.AUTH0_CLIENT_ID,"));
        assert!(files
            .get("auth/middleware.js")
            .unwrap()
            .contains("require('./auth0-config')"));
        assert!(files
            .get("auth/LoginButton.tsx")
            .unwrap()
            .contains("Log in with Auth0"));
    }

    #[test]
    fn test_include_ui_false_and_python_middleware() {
        let files = render_for(json!({
            "project_type": "web_app",
            "frontend": { "framework": "vue" },
            "backend": { "language": "python", "framework": "fastapi" },
            "auth": { "provider": "jwt", "include_ui": false },
            "output": { "format": ["zip"] }
        }));

        assert!(files.contains("auth/jwt-config.js"));
        assert!(files.get("auth/middleware.py").unwrap().contains("import jwt"));
        assert!(!files.contains("auth/LoginButton.tsx"));
    }

    #[test]
    fn test_unknown_or_missing_provider() {
        let unknown = render_for(json!({
            "project_type": "backend_only",
            "auth": { "provider": "keycloak" },
            "output": { "format": ["zip"] }
        }));
        assert!(unknown.is_empty());

        let none = render_for(json!({
            "project_type": "backend_only",
            "auth": { "provider": "none" },
            "output": { "format": ["zip"] }
        }));
        assert!(none.is_empty());
    }

    #[test]
    fn test_config_key() {
        assert_eq!(config_key("auth0", "AUTH0_CLIENT_SECRET"), "clientSecret");
        assert_eq!(config_key("jwt", "JWT_EXPIRES_IN"), "expiresIn");
        assert_eq!(config_key("firebase", "FIREBASE_API_KEY"), "apiKey");
        assert_eq!(env_keys("unknown"), &[] as &[&str]);
    }
}
