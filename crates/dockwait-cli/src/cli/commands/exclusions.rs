//! `dockwait exclusions` – print the exclusion list for a version.

use anyhow::Result;
use dockwait_core::exclusions::{ExclusionRules, Version};
use std::path::Path;

pub fn run_exclusions(version: &str, rules: &Path) -> Result<()> {
    let version = Version::parse(version)?;
    let rules = ExclusionRules::load(rules)?;
    for path in rules.generate(&version) {
        println!("{path}");
    }
    Ok(())
}
