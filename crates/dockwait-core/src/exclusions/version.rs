use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::ExclusionError;

/// Dotted numeric version; missing components compare as zero, so `8.1`
/// equals `8.1.0`.
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    /// Parse a bare version (`8.1.2`) or find the first dotted number inside
    /// a package file name (`product-8.1.2-0b8d769cb912-Linux-x86_64.tgz`).
    pub fn parse(input: &str) -> Result<Self, ExclusionError> {
        input
            .split(|c: char| !(c.is_ascii_digit() || c == '.'))
            .filter_map(Self::parse_dotted)
            .next()
            .ok_or_else(|| ExclusionError::InvalidVersion(input.to_string()))
    }

    /// Exactly digits separated by single dots, at least `major.minor`.
    fn parse_dotted(token: &str) -> Option<Self> {
        let token = token.trim_matches('.');
        let parts = token
            .split('.')
            .map(|p| p.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        (parts.len() >= 2).then_some(Self { parts })
    }

    pub fn major(&self) -> u64 {
        self.component(0)
    }

    pub fn minor(&self) -> u64 {
        self.component(1)
    }

    pub fn patch(&self) -> u64 {
        self.component(2)
    }

    fn component(&self, i: usize) -> u64 {
        self.parts.get(i).copied().unwrap_or(0)
    }
}

impl FromStr for Version {
    type Err = ExclusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
