//! Diagram assembly and JSON serialisation of the wire format.

use std::path::Path;

use crate::config::{Dependency, DiagramGraph, Resource};
use crate::error::Result;

/// Combine resources and dependencies, preserving both orders.
pub fn assemble(resources: Vec<Resource>, dependencies: Vec<Dependency>) -> DiagramGraph {
    DiagramGraph {
        resources,
        dependencies,
    }
}

/// Serialise the graph as served at `/api/diagram`.
pub fn to_json(graph: &DiagramGraph, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(graph)?
    } else {
        serde_json::to_string(graph)?
    };
    Ok(json)
}

/// Write the graph to a JSON file, creating parent directories.
pub fn write_output(graph: &DiagramGraph, output_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(graph).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}
