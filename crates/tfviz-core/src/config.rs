//! Core data types and configuration for tfviz extraction runs.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::error::{ExtractError, Result};
use crate::reference::resource_id;
use crate::value::ConfigValue;

/// Where a resource was declared. Line numbers are not tracked and stay 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub file: String,
    #[serde(default)]
    pub line: usize,
}

impl Origin {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            file: path.into(),
            line: 0,
        }
    }
}

/// An output block bound to the resource it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputBinding {
    pub value: ConfigValue,
    #[serde(default)]
    pub description: String,
}

/// A declared infrastructure resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: String,
    pub name: String,
    pub category: Category,
    pub inputs: ConfigValue,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputBinding>,
    pub origin: Origin,
}

impl Resource {
    /// `kind.name`, unique across one resource set.
    pub fn id(&self) -> String {
        resource_id(&self.kind, &self.name)
    }
}

/// One interpolation expression behind a dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Dotted path of the input holding the expression, or empty when the
    /// expression cannot be traced to a single string property.
    pub source_property: String,
    pub target_attribute: String,
    pub raw_expression: String,
}

/// A directed edge `source → target` between resource identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// The assembled resource graph handed to the server and visualiser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramGraph {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// Configuration for an extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub root_path: String,
    pub output_path: Option<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
    /// Extra or replacement kind → category entries.
    #[serde(default)]
    pub category_overrides: HashMap<String, Category>,
}

fn default_max_file_size() -> u64 {
    1_000_000
}
fn default_parallel() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            root_path: String::new(),
            output_path: None,
            exclude_patterns: Vec::new(),
            max_file_size: default_max_file_size(),
            parallel: default_parallel(),
            verbose: false,
            quiet: false,
            category_overrides: HashMap::new(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| ExtractError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
