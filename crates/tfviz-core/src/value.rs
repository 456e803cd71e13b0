//! Closed value model for parsed configuration trees.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node of a parsed configuration tree.
///
/// Mappings are key-ordered so the search text and the property-path walk
/// visit keys in the same order on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Empty mapping, the shape of a resource with no arguments.
    pub fn empty_mapping() -> Self {
        Self::Mapping(BTreeMap::new())
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Shape name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Compact JSON rendering with every string kept verbatim.
    pub fn to_search_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Depth-first search for the first dotted path whose string leaf
    /// contains `needle`.
    ///
    /// Sequence elements contribute their index as a path segment
    /// (`ingress.0.cidr_blocks`). Keys are never matched, only string leaves,
    /// so a needle that only appears in a key yields `None`.
    pub fn find_property_path(&self, needle: &str) -> Option<String> {
        find_in(self, needle, "")
    }
}

fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

fn find_in(value: &ConfigValue, needle: &str, parent: &str) -> Option<String> {
    match value {
        ConfigValue::Mapping(entries) => entries
            .iter()
            .find_map(|(key, child)| find_in_child(child, needle, join_path(parent, key))),
        ConfigValue::Sequence(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, child)| find_in_child(child, needle, join_path(parent, &i.to_string()))),
        ConfigValue::Null
        | ConfigValue::Bool(_)
        | ConfigValue::Number(_)
        | ConfigValue::String(_) => None,
    }
}

fn find_in_child(child: &ConfigValue, needle: &str, path: String) -> Option<String> {
    match child {
        ConfigValue::String(s) if s.contains(needle) => Some(path),
        ConfigValue::Mapping(_) | ConfigValue::Sequence(_) => find_in(child, needle, &path),
        ConfigValue::Null
        | ConfigValue::Bool(_)
        | ConfigValue::Number(_)
        | ConfigValue::String(_) => None,
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
