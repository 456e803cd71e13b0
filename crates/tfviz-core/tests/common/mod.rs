//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::json;
use tfviz_core::categories::{classify, CategoryTable};
use tfviz_core::config::{AnalysisConfig, DiagramGraph, Origin, Resource};
use tfviz_core::pipeline::{self, Extraction};
use tfviz_core::value::ConfigValue;

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

pub fn fixture_config(name: &str) -> AnalysisConfig {
    AnalysisConfig {
        root_path: fixture_path(name).to_string_lossy().to_string(),
        ..Default::default()
    }
}

/// Run the full pipeline on a fixture directory.
pub fn run_fixture(name: &str) -> Extraction {
    pipeline::run_pipeline(&fixture_config(name), None).unwrap()
}

// ---------------------------------------------------------------------------
// In-memory resources
// ---------------------------------------------------------------------------

/// Build a resource the way the resource phase would, from JSON inputs.
pub fn resource(kind: &str, name: &str, inputs: serde_json::Value) -> Resource {
    Resource {
        kind: kind.to_string(),
        name: name.to_string(),
        category: classify(kind),
        inputs: ConfigValue::from(inputs),
        outputs: Default::default(),
        origin: Origin::file("main.tf"),
    }
}

/// A tree with a single `resource` section in the wrapped-block shape.
pub fn resource_tree(entries: &[(&str, &str, serde_json::Value)]) -> ConfigValue {
    let mut kinds = serde_json::Map::new();
    for (kind, name, config) in entries {
        let instances = kinds
            .entry(kind.to_string())
            .or_insert_with(|| json!({}));
        instances[*name] = json!([config]);
    }
    ConfigValue::from(json!({ "resource": kinds }))
}

pub fn builtin() -> &'static CategoryTable {
    CategoryTable::builtin()
}

// ---------------------------------------------------------------------------
// Extractors from DiagramGraph
// ---------------------------------------------------------------------------

pub fn resource_ids(graph: &DiagramGraph) -> Vec<String> {
    graph.resources.iter().map(|r| r.id()).collect()
}

/// Dependency pairs `(source, target)` in output order.
pub fn edge_pairs(graph: &DiagramGraph) -> Vec<(String, String)> {
    graph
        .dependencies
        .iter()
        .map(|d| (d.source.clone(), d.target.clone()))
        .collect()
}

pub fn find_resource<'a>(graph: &'a DiagramGraph, id: &str) -> &'a Resource {
    graph
        .resources
        .iter()
        .find(|r| r.id() == id)
        .unwrap_or_else(|| panic!("missing resource {id}"))
}
