use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::version::Version;
use super::ExclusionError;

/// One `[[rule]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionRule {
    /// First version the rule applies to (inclusive).
    #[serde(default)]
    pub since: Option<String>,
    /// First version the rule no longer applies to (exclusive).
    #[serde(default)]
    pub before: Option<String>,
    pub paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default, rename = "rule")]
    rules: Vec<ExclusionRule>,
}

/// Validated rule set with parsed version bounds.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    rules: Vec<(Option<Version>, Option<Version>, Vec<String>)>,
}

impl ExclusionRules {
    pub fn from_toml(text: &str) -> Result<Self, ExclusionError> {
        let file: RulesFile = toml::from_str(text)?;
        let mut rules = Vec::with_capacity(file.rules.len());
        for (index, rule) in file.rules.into_iter().enumerate() {
            let bound = |raw: &Option<String>| -> Result<Option<Version>, ExclusionError> {
                raw.as_deref()
                    .map(Version::parse)
                    .transpose()
                    .map_err(|e| ExclusionError::InvalidRule {
                        index,
                        reason: e.to_string(),
                    })
            };
            let since = bound(&rule.since)?;
            let before = bound(&rule.before)?;
            if let (Some(s), Some(b)) = (&since, &before) {
                if s >= b {
                    return Err(ExclusionError::InvalidRule {
                        index,
                        reason: format!("empty range {s}..{b}"),
                    });
                }
            }
            rules.push((since, before, rule.paths));
        }
        Ok(Self { rules })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading exclusion rules {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Sorted, de-duplicated paths of every rule whose range contains `version`.
    pub fn generate(&self, version: &Version) -> Vec<String> {
        let matched: BTreeSet<&str> = self
            .rules
            .iter()
            .filter(|(since, before, _)| {
                since.as_ref().map_or(true, |s| version >= s)
                    && before.as_ref().map_or(true, |b| version < b)
            })
            .flat_map(|(_, _, paths)| paths.iter().map(|p| p.trim()))
            .filter(|p| !p.is_empty())
            .collect();
        tracing::debug!(%version, paths = matched.len(), "generated exclusion list");
        matched.into_iter().map(str::to_string).collect()
    }
}
