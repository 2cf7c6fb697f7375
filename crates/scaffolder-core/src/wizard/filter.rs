//! Compatibility filtering over catalog tables
//!
//! Each filter takes the current selection plus a catalog table and returns
//! fresh [`Choice`] values; the table itself is never touched. When an entry
//! is both hidden and recommended by the rules, hidden wins.

use crate::catalog::CatalogEntry;
use serde::Serialize;

/// A catalog entry with flags derived from the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice<'a> {
    #[serde(flatten)]
    pub entry: &'a CatalogEntry,
    pub hidden: bool,
    pub recommended: bool,
}

impl<'a> Choice<'a> {
    pub fn id(&self) -> &'a str {
        self.entry.id
    }
}

/// Hidden and recommended ids keyed by an upstream selection
struct Rule {
    key: &'static str,
    hidden: &'static [&'static str],
    recommended: &'static [&'static str],
}

const UI_LIBRARY_RULES: &[Rule] = &[
    Rule {
        key: "react",
        hidden: &["vuetify", "quasar", "primeng"],
        recommended: &["tailwindcss", "shadcn"],
    },
    Rule {
        key: "vue",
        hidden: &["shadcn", "chakra"],
        recommended: &["tailwindcss", "vuetify"],
    },
    Rule {
        key: "svelte",
        hidden: &["shadcn", "chakra", "vuetify", "mui"],
        recommended: &["tailwindcss"],
    },
    Rule {
        key: "angular",
        hidden: &["shadcn", "chakra", "vuetify"],
        recommended: &["mui", "tailwindcss"],
    },
];

/// ORMs hidden per backend language. Languages not listed hide nothing.
const HIDDEN_ORMS: &[(&str, &[&str])] = &[
    ("node", &["sqlalchemy", "gorm", "diesel"]),
    ("python", &["prisma", "typeorm", "sequelize", "gorm"]),
    ("go", &["prisma", "typeorm", "sqlalchemy", "mongoose"]),
];

/// Most idiomatic ORM per backend language
const RECOMMENDED_ORMS: &[(&str, &str)] = &[("node", "prisma"), ("python", "sqlalchemy"), ("go", "gorm")];

/// Providers that need an application database of their own
const DATABASE_COUPLED_AUTH: &[&str] = &["supabase", "custom-db"];

/// Hosted providers suggested when there is no database
const HOSTED_AUTH: &[&str] = &["auth0", "clerk"];

/// Providers suggested for databases with no dedicated auth pairing
const FLEXIBLE_AUTH: &[&str] = &["auth0", "jwt"];

/// Database engines that ship their own auth provider of the same id
const ENGINE_AUTH: &[(&str, &str)] = &[("supabase", "supabase"), ("firebase", "firebase")];

fn choice(entry: &CatalogEntry, hidden: bool, recommended: bool) -> Choice<'_> {
    Choice {
        entry,
        hidden,
        recommended: recommended && !hidden,
    }
}

/// Engines that count as a real database selection (not empty, not `none`)
fn real_engines<S: AsRef<str>>(engines: &[S]) -> impl Iterator<Item = &str> {
    engines
        .iter()
        .map(|e| AsRef::<str>::as_ref(e))
        .filter(|e| !e.is_empty() && *e != "none")
}

/// Whether any real database engine is selected
pub fn has_database<S: AsRef<str>>(engines: &[S]) -> bool {
    real_engines(engines).next().is_some()
}

/// Recommended ORM id for a backend language, if the language has one
pub fn recommended_orm(language: &str) -> Option<&'static str> {
    RECOMMENDED_ORMS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, orm)| *orm)
}

/// Mark UI libraries incompatible with `framework` hidden and its favourites recommended.
/// Frameworks without a rule leave every library visible and unrecommended.
pub fn filter_ui_libraries<'a>(framework: &str, libraries: &'a [CatalogEntry]) -> Vec<Choice<'a>> {
    let rule = UI_LIBRARY_RULES.iter().find(|r| r.key == framework);

    libraries
        .iter()
        .map(|library| match rule {
            Some(rule) => choice(
                library,
                rule.hidden.contains(&library.id),
                rule.recommended.contains(&library.id),
            ),
            None => choice(library, false, false),
        })
        .collect()
}

/// Filter ORMs by backend language. With no real database every ORM is hidden.
pub fn filter_orms<'a, S: AsRef<str>>(
    language: &str,
    engines: &[S],
    orms: &'a [CatalogEntry],
) -> Vec<Choice<'a>> {
    if !has_database(engines) {
        return orms.iter().map(|orm| choice(orm, true, false)).collect();
    }

    let hidden: &[&str] = HIDDEN_ORMS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, ids)| *ids)
        .unwrap_or_default();
    let recommended = recommended_orm(language);

    orms.iter()
        .map(|orm| choice(orm, hidden.contains(&orm.id), recommended == Some(orm.id)))
        .collect()
}

/// Filter auth providers by database selection
pub fn filter_auth_providers<'a, S: AsRef<str>>(
    engines: &[S],
    providers: &'a [CatalogEntry],
) -> Vec<Choice<'a>> {
    let Some(first_engine) = real_engines(engines).next() else {
        return providers
            .iter()
            .map(|p| {
                choice(
                    p,
                    DATABASE_COUPLED_AUTH.contains(&p.id),
                    HOSTED_AUTH.contains(&p.id),
                )
            })
            .collect();
    };

    let paired = ENGINE_AUTH
        .iter()
        .find(|(engine, _)| *engine == first_engine)
        .map(|(_, provider)| *provider);

    providers
        .iter()
        .map(|p| {
            let recommended = match paired {
                Some(provider) => p.id == provider,
                None => FLEXIBLE_AUTH.contains(&p.id),
            };
            choice(p, false, recommended)
        })
        .collect()
}
