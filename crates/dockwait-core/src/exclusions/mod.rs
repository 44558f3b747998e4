//! Version-gated exclusion lists for repackaging vendor tarballs.
//!
//! Rules live in a TOML file; each names the paths to drop and the version
//! range it applies to. [`ExclusionRules::generate`] yields the list in the
//! one-path-per-line form `tar --exclude-from` reads.

mod rules;
mod version;

pub use rules::{ExclusionRule, ExclusionRules};
pub use version::Version;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExclusionError {
    #[error("no version number found in {0:?}")]
    InvalidVersion(String),
    #[error("rule {index}: {reason}")]
    InvalidRule { index: usize, reason: String },
    #[error("parsing rules: {0}")]
    Parse(#[from] toml::de::Error),
}
