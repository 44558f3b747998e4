use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Selection of containers by label and name, ANDed together by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerFilter {
    /// `key` or `key=value`.
    pub labels: Vec<String>,
    /// Substring match on the container name, as the Docker API does it.
    pub names: Vec<String>,
}

impl ContainerFilter {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.names.is_empty()
    }

    /// The `filters` query parameter of `GET /containers/json`.
    pub fn to_docker_filters(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        if !self.labels.is_empty() {
            map.insert("label".into(), self.labels.clone().into());
        }
        if !self.names.is_empty() {
            map.insert("name".into(), self.names.clone().into());
        }
        serde_json::Value::Object(map)
    }
}

/// One entry of the runtime's container list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerSummary {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Names", default, deserialize_with = "null_as_default")]
    pub names: Vec<String>,
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "Labels", default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    /// Lifecycle state: `created`, `running`, `exited`, `dead`, ...
    #[serde(rename = "State", default)]
    pub state: String,
    /// Human status, e.g. `Up 3 minutes (healthy)`.
    #[serde(rename = "Status", default)]
    pub status: String,
}

impl ContainerSummary {
    /// First name without Docker's leading slash, or the short id.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/'))
            .unwrap_or_else(|| self.id.get(..12).unwrap_or(self.id.as_str()))
    }

    pub fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("running")
    }

    /// Exited or dead: it will not become ready without outside help.
    pub fn has_stopped(&self) -> bool {
        self.state.eq_ignore_ascii_case("exited") || self.state.eq_ignore_ascii_case("dead")
    }

    /// `selector` is `key` (present with any value) or `key=value`.
    pub fn matches_label(&self, selector: &str) -> bool {
        match selector.split_once('=') {
            Some((k, v)) => self.labels.get(k).is_some_and(|actual| actual == v),
            None => self.labels.contains_key(selector),
        }
    }
}

/// Result of running a command inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i64,
    /// Combined stdout and stderr.
    pub output: String,
}

impl ExecOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
