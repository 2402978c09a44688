use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::RuleSet;
use crate::error::{ReleaseError, Result};

/// File names looked up in the repository root, in order
pub const RULES_FILE_NAMES: [&str; 4] = [
    "semver-release.toml",
    "semver-release.json",
    "semver-release.yaml",
    "semver-release.yml",
];

/// Decoded release rules, grouped by level.
///
/// ```toml
/// [rules]
/// minor = ["feat"]
/// patch = ["fix", "perf", "revert"]
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<String>>,
}

impl RulesConfig {
    /// Decode rules from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| ReleaseError::configuration(format!("invalid TOML rules: {}", e)))
    }

    /// Decode rules from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| ReleaseError::configuration(format!("invalid JSON rules: {}", e)))
    }

    /// Decode rules from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text)
            .map_err(|e| ReleaseError::configuration(format!("invalid YAML rules: {}", e)))
    }

    /// Read and decode a rules file.
    ///
    /// `.json` files are JSON, `.yaml`/`.yml` files are YAML, anything else TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            ReleaseError::configuration(format!(
                "cannot read rules file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Self::from_toml_str(&text),
        }
    }
}

/// Locates a rules file when none is given explicitly.
///
/// Looks in the following order:
/// 1. `semver-release.toml` in `repo_dir`
/// 2. `semver-release.json` in `repo_dir`
/// 3. `semver-release.yaml`, then `semver-release.yml`, in `repo_dir`
/// 4. `semver-release/rules.toml` in the user config directory
pub fn discover_rules_file(repo_dir: &Path) -> Option<PathBuf> {
    RULES_FILE_NAMES
        .iter()
        .map(|name| repo_dir.join(name))
        .chain(dirs::config_dir().map(|dir| dir.join("semver-release").join("rules.toml")))
        .find(|candidate| candidate.is_file())
}

/// Loads the rule set, falling back to the built-in defaults.
///
/// # Arguments
/// * `rules_path` - Explicit rules file; must exist when given
/// * `repo_dir` - Repository root searched by [`discover_rules_file`]
pub fn load_rule_set(rules_path: Option<&Path>, repo_dir: &Path) -> Result<RuleSet> {
    let path = match rules_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_rules_file(repo_dir),
    };

    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading release rules");
            RuleSet::from_config(&RulesConfig::from_file(&path)?)
        }
        None => {
            debug!("no rules file found, using default release rules");
            Ok(RuleSet::default())
        }
    }
}
