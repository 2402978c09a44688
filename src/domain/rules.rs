use std::collections::HashMap;

use crate::config::RulesConfig;
use crate::domain::Precedence;
use crate::error::{ReleaseError, Result};

/// Immutable mapping from commit type tokens to release precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: HashMap<String, Precedence>,
}

impl RuleSet {
    /// Build a rule set from decoded configuration.
    ///
    /// A configuration listing no tokens at all falls back to the built-in
    /// defaults. Unknown level names, empty tokens and tokens listed more
    /// than once are rejected.
    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        let mut rules = HashMap::new();

        for (level_name, tokens) in &config.rules {
            let precedence: Precedence = level_name.parse()?;

            for token in tokens {
                let token = token.trim();
                if token.is_empty() {
                    return Err(ReleaseError::configuration(format!(
                        "empty commit type listed under '{}'",
                        level_name
                    )));
                }

                if let Some(existing) = rules.insert(token.to_string(), precedence) {
                    return Err(ReleaseError::configuration(format!(
                        "commit type '{}' is listed more than once ({} and {})",
                        token, existing, precedence
                    )));
                }
            }
        }

        if rules.is_empty() {
            return Ok(RuleSet::default());
        }

        Ok(RuleSet { rules })
    }

    /// Build a rule set from explicit token/level pairs
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Precedence)>,
        S: Into<String>,
    {
        let mut rules = HashMap::new();
        for (token, precedence) in pairs {
            let token = token.into();
            if token.is_empty() {
                return Err(ReleaseError::configuration("empty commit type"));
            }
            if precedence == Precedence::None {
                return Err(ReleaseError::configuration(format!(
                    "commit type '{}' must map to major, minor or patch",
                    token
                )));
            }
            if rules.insert(token.clone(), precedence).is_some() {
                return Err(ReleaseError::configuration(format!(
                    "commit type '{}' is listed more than once",
                    token
                )));
            }
        }
        Ok(RuleSet { rules })
    }

    /// Precedence for a commit type token; unknown tokens map to `None`
    pub fn resolve(&self, token: &str) -> Precedence {
        self.rules.get(token).copied().unwrap_or(Precedence::None)
    }

    /// Number of configured tokens
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        let rules = [
            ("feat", Precedence::Minor),
            ("fix", Precedence::Patch),
            ("perf", Precedence::Patch),
            ("revert", Precedence::Patch),
        ]
        .into_iter()
        .map(|(token, precedence)| (token.to_string(), precedence))
        .collect();

        RuleSet { rules }
    }
}
