//! Rule-based file role classification
//!
//! Roles are assigned by an ordered list of predicates over the file's stem
//! and the directories between the project root and the file. The first
//! matching rule wins, and the final rule always matches, so every file gets
//! exactly one role.

use crate::models::FileRole;
use std::path::Path;

const CONFIG_STEMS: &[&str] = &[
    "config",
    "settings",
    "configuration",
    "env",
    "environment",
    "constants",
    "defaults",
    "local_settings",
    "dev_settings",
    "prod_settings",
    "test_settings",
];
const CONFIG_DIRS: &[&str] = &["config", "configs", "settings"];
const CONFIG_TOKENS: &[&str] = &["config", "configs", "settings", "configuration", "env", "environment"];
const CONFIG_QUALIFIERS: &[&str] = &["app", "db", "database", "api", "server", "redis"];

/// What the rules look at
#[derive(Debug)]
struct Subject {
    /// Lowercase directory names between the root and the file
    dirs: Vec<String>,
    /// Lowercase file stem
    stem: String,
    /// Stem split on `_` and `-`
    tokens: Vec<String>,
}

impl Subject {
    fn new(path: &Path, root: &Path) -> Self {
        let parent = match path.strip_prefix(root) {
            Ok(relative) => relative.parent(),
            Err(_) => path.parent(),
        };

        let dirs = parent
            .map(|p| {
                p.components()
                    .filter_map(|c| match c {
                        std::path::Component::Normal(name) => Some(name.to_string_lossy().to_lowercase()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let tokens = stem
            .split(['_', '-'])
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        Self { dirs, stem, tokens }
    }

    fn in_dir(&self, names: &[&str]) -> bool {
        self.dirs.iter().any(|d| names.contains(&d.as_str()))
    }

    fn has_token(&self, names: &[&str]) -> bool {
        self.tokens.iter().any(|t| names.contains(&t.as_str()))
    }
}

type Rule = (fn(&Subject) -> bool, FileRole);

/// Classification rules in priority order
const RULES: &[Rule] = &[
    (is_config, FileRole::Config),
    (is_main, FileRole::Main),
    (is_test, FileRole::Test),
    (is_model, FileRole::Model),
    (is_service, FileRole::Service),
    (is_utils, FileRole::Utils),
    (always, FileRole::Other),
];

fn is_config(s: &Subject) -> bool {
    CONFIG_STEMS.contains(&s.stem.as_str())
        || s.in_dir(CONFIG_DIRS)
        || (s.has_token(CONFIG_TOKENS) && s.has_token(CONFIG_QUALIFIERS))
}

fn is_main(s: &Subject) -> bool {
    s.stem == "main" || s.stem == "__main__"
}

fn is_test(s: &Subject) -> bool {
    s.in_dir(&["tests", "test"])
        || s.stem.starts_with("test_")
        || s.stem.ends_with("_test")
        || s.stem == "conftest"
}

fn is_model(s: &Subject) -> bool {
    s.in_dir(&["models"]) || s.stem.contains("model")
}

fn is_service(s: &Subject) -> bool {
    s.in_dir(&["services"]) || s.stem.contains("service") || s.has_token(&["api", "client"])
}

fn is_utils(s: &Subject) -> bool {
    s.in_dir(&["utils"]) || s.stem.contains("config") || s.stem.contains("settings")
}

fn always(_: &Subject) -> bool {
    true
}

/// Assign a role to a file path
pub fn classify(path: &Path, root: &Path) -> FileRole {
    let subject = Subject::new(path, root);
    RULES
        .iter()
        .find(|(matches, _)| matches(&subject))
        .map(|(_, role)| *role)
        .unwrap_or(FileRole::Other)
}
