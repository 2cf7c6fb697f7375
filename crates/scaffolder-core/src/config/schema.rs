//! Schema validation for raw configuration documents
//!
//! [`validate`] walks an untyped JSON tree, records every violated field
//! path, and only then converts the tree into a typed [`Configuration`].
//! Unknown fields are ignored; absent optional sections stay absent.

use super::model::{Configuration, ProjectType};
use crate::error::{Issue, ValidationError};
use serde_json::{Map, Value};

/// Validate a raw configuration tree
pub fn validate(raw: &Value) -> Result<Configuration, ValidationError> {
    let mut checker = Checker::default();

    let Some(root) = raw.as_object() else {
        checker.report("", format!("Expected object, received {}", kind(raw)));
        return Err(checker.finish());
    };

    checker.project_type(root);
    checker.optional_object(root, "frontend", "", |c, obj, path| {
        c.string(obj, "framework", path, false);
        c.string_array(obj, "ui_libraries", path, false);
    });
    checker.optional_object(root, "backend", "", |c, obj, path| {
        c.string(obj, "language", path, false);
        c.string(obj, "framework", path, false);
        c.string_array(obj, "features", path, false);
    });
    checker.optional_object(root, "database", "", |c, obj, path| {
        c.string_array(obj, "engines", path, false);
        c.string(obj, "orm", path, false);
        c.boolean(obj, "cloud_hosted", path, false);
        c.string_array(obj, "models", path, false);
    });
    checker.optional_object(root, "auth", "", |c, obj, path| {
        c.string(obj, "provider", path, false);
        c.string_array(obj, "features", path, false);
        c.boolean(obj, "include_ui", path, false);
    });
    checker.optional_object(root, "devops", "", |c, obj, path| {
        c.string_array(obj, "deployment_targets", path, false);
        c.boolean(obj, "ci_cd", path, false);
        c.optional_object(obj, "docker", path, |c, docker, path| {
            c.boolean(docker, "enabled", path, true);
            c.boolean(docker, "compose", path, false);
        });
    });
    checker.optional_features(root);
    checker.output(root);

    if !checker.issues.is_empty() {
        return Err(checker.finish());
    }

    serde_json::from_value(raw.clone()).map_err(|e| {
        ValidationError::new(vec![Issue {
            path: String::new(),
            message: e.to_string(),
        }])
    })
}

/// Human-readable JSON type name used in messages
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

#[derive(Default)]
struct Checker {
    issues: Vec<Issue>,
}

impl Checker {
    fn report(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn finish(self) -> ValidationError {
        ValidationError::new(self.issues)
    }

    /// Look up `key`, reporting a missing required field
    fn field<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
    ) -> Option<&'a Value> {
        let value = obj.get(key);
        if value.is_none() && required {
            self.report(join(path, key), "Required");
        }
        value
    }

    fn string(&mut self, obj: &Map<String, Value>, key: &str, path: &str, required: bool) {
        if let Some(value) = self.field(obj, key, path, required) {
            if !value.is_string() {
                self.report(
                    join(path, key),
                    format!("Expected string, received {}", kind(value)),
                );
            }
        }
    }

    fn boolean(&mut self, obj: &Map<String, Value>, key: &str, path: &str, required: bool) {
        if let Some(value) = self.field(obj, key, path, required) {
            if !value.is_boolean() {
                self.report(
                    join(path, key),
                    format!("Expected boolean, received {}", kind(value)),
                );
            }
        }
    }

    /// Check an array of strings; returns the element count when the shape is right
    fn string_array(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
    ) -> Option<usize> {
        let value = self.field(obj, key, path, required)?;
        let field_path = join(path, key);
        let Some(items) = value.as_array() else {
            self.report(
                field_path,
                format!("Expected array, received {}", kind(value)),
            );
            return None;
        };

        let mut valid = true;
        for (idx, item) in items.iter().enumerate() {
            if !item.is_string() {
                valid = false;
                self.report(
                    format!("{}[{}]", field_path, idx),
                    format!("Expected string, received {}", kind(item)),
                );
            }
        }
        valid.then_some(items.len())
    }

    fn optional_object<F>(&mut self, obj: &Map<String, Value>, key: &str, path: &str, check: F)
    where
        F: FnOnce(&mut Self, &Map<String, Value>, &str),
    {
        let Some(value) = obj.get(key) else {
            return;
        };
        let field_path = join(path, key);
        match value.as_object() {
            Some(inner) => check(self, inner, &field_path),
            None => self.report(
                field_path,
                format!("Expected object, received {}", kind(value)),
            ),
        }
    }

    fn project_type(&mut self, root: &Map<String, Value>) {
        let Some(value) = self.field(root, "project_type", "", true) else {
            return;
        };
        match value.as_str() {
            Some(id) if ProjectType::from_id(id).is_some() => {}
            Some(id) => {
                let expected = ProjectType::ALL
                    .iter()
                    .map(|t| format!("'{}'", t.id()))
                    .collect::<Vec<_>>()
                    .join(" | ");
                self.report(
                    "project_type",
                    format!("Invalid enum value. Expected {}, received '{}'", expected, id),
                );
            }
            None => self.report(
                "project_type",
                format!("Expected string, received {}", kind(value)),
            ),
        }
    }

    fn optional_features(&mut self, root: &Map<String, Value>) {
        let Some(value) = root.get("optional_features") else {
            return;
        };
        let Some(items) = value.as_array() else {
            self.report(
                "optional_features",
                format!("Expected array, received {}", kind(value)),
            );
            return;
        };
        for (idx, item) in items.iter().enumerate() {
            let path = format!("optional_features[{}]", idx);
            match item.as_object() {
                Some(feature) => {
                    self.string(feature, "feature", &path, true);
                    self.string(feature, "tool", &path, false);
                    self.boolean(feature, "include_demo", &path, false);
                }
                None => self.report(path, format!("Expected object, received {}", kind(item))),
            }
        }
    }

    fn output(&mut self, root: &Map<String, Value>) {
        let Some(value) = self.field(root, "output", "", true) else {
            return;
        };
        let Some(output) = value.as_object() else {
            self.report("output", format!("Expected object, received {}", kind(value)));
            return;
        };

        if self.string_array(output, "format", "output", true) == Some(0) {
            self.report("output.format", "Array must contain at least 1 element(s)");
        }

        self.optional_object(output, "repo", "output", |c, repo, path| {
            c.string(repo, "name", path, true);
            if let Some(visibility) = c.field(repo, "visibility", path, true) {
                if !matches!(visibility.as_str(), Some("public") | Some("private")) {
                    c.report(
                        join(path, "visibility"),
                        "Invalid enum value. Expected 'public' | 'private'",
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal(project_type: &str) -> Value {
        json!({ "project_type": project_type, "output": { "format": ["zip"] } })
    }

    #[test]
    fn test_minimal_config_valid_for_every_project_type() {
        for project_type in ProjectType::ALL {
            let config = validate(&minimal(project_type.id())).unwrap();
            assert_eq!(config.project_type, project_type);
        }
    }

    #[test]
    fn test_rejects_invalid_project_type() {
        let err = validate(&minimal("invalid_type")).unwrap_err();
        assert!(err.has_issue_at("project_type"));
        assert!(err.to_string().contains("invalid_type"));
    }

    #[test]
    fn test_requires_output_format() {
        let err = validate(&json!({ "project_type": "web_app" })).unwrap_err();
        assert!(err.has_issue_at("output"));

        let err = validate(&json!({ "project_type": "web_app", "output": {} })).unwrap_err();
        assert!(err.has_issue_at("output.format"));

        let err =
            validate(&json!({ "project_type": "web_app", "output": { "format": [] } })).unwrap_err();
        assert!(err.has_issue_at("output.format"));
    }

    #[test]
    fn test_reports_every_violation() {
        let raw = json!({
            "project_type": 42,
            "frontend": { "framework": true, "ui_libraries": ["tailwindcss", 7] },
            "devops": { "docker": { "compose": "yes" } },
            "optional_features": [{ "tool": "swagger" }],
            "output": { "format": "zip", "repo": { "name": "demo", "visibility": "internal" } }
        });

        let err = validate(&raw).unwrap_err();
        for path in [
            "project_type",
            "frontend.framework",
            "frontend.ui_libraries[1]",
            "devops.docker.enabled",
            "devops.docker.compose",
            "optional_features[0].feature",
            "output.format",
            "output.repo.visibility",
        ] {
            assert!(err.has_issue_at(path), "missing issue at {}", path);
        }
        assert_eq!(err.issues.len(), 8);
    }

    #[test]
    fn test_optional_sections_stay_absent() {
        let config = validate(&minimal("cli_tool")).unwrap();
        assert!(config.frontend.is_none());
        assert!(config.database.is_none());
        assert!(config.auth.is_none());
        assert!(config.optional_features.is_none());
    }

    #[test]
    fn test_partial_sections_and_unknown_fields() {
        let raw = json!({
            "project_type": "web_app",
            "frontend": { "ui_libraries": ["tailwindcss", "mui", "bootstrap"] },
            "database": { "engines": ["postgresql", "redis"] },
            "telemetry": { "enabled": true },
            "output": { "format": ["zip"] }
        });

        let config = validate(&raw).unwrap();
        let frontend = config.frontend.unwrap();
        assert_eq!(frontend.framework, None);
        assert_eq!(frontend.ui_libraries.unwrap().len(), 3);
        assert_eq!(config.database.unwrap().engines.unwrap().len(), 2);
    }

    #[test]
    fn test_complete_config() {
        let raw = json!({
            "project_type": "web_app",
            "frontend": { "framework": "react", "ui_libraries": ["tailwindcss", "shadcn"] },
            "backend": { "language": "node", "framework": "express" },
            "database": { "engines": ["postgresql"], "orm": "prisma", "models": ["user", "post"] },
            "auth": { "provider": "auth0", "include_ui": true },
            "devops": {
                "deployment_targets": ["vercel"],
                "ci_cd": true,
                "docker": { "enabled": true, "compose": false }
            },
            "optional_features": [{ "feature": "api_docs", "tool": "swagger", "include_demo": false }],
            "output": { "format": ["zip"], "repo": { "name": "demo", "visibility": "private" } }
        });

        let config = validate(&raw).unwrap();
        assert_eq!(config.backend_language(), Some("node"));
        assert_eq!(config.features()[0].feature, "api_docs");
        assert_eq!(
            config.output.repo.unwrap().visibility,
            super::super::model::Visibility::Private
        );
    }

    #[test]
    fn test_rejects_non_object_root() {
        let err = validate(&json!(["web_app"])).unwrap_err();
        assert!(err.has_issue_at(""));
    }
}
