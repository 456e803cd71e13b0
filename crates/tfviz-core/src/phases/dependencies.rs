//! Phase 5: Resolve `${kind.name.attr}` references between resources into edges.
//!
//! Each resource is scanned independently against a read-only id set, so
//! scanning can run on the rayon pool. Results are merged in resource order,
//! which keeps edges in first-discovery order whichever path ran.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::config::{Dependency, Reference, Resource};
use crate::graph::dependency_graph::DependencyGraph;
use crate::reference::scan_references;

/// References found in one resource, in discovery order.
struct ResourceScan {
    source: String,
    found: Vec<(String, Reference)>,
}

fn scan_resource(resource: &Resource, known: &HashSet<String>) -> ResourceScan {
    let source = resource.id();
    let text = resource.inputs.to_search_text();
    let mut found = Vec::new();

    for m in scan_references(&text) {
        let target = m.target_id();
        if target == source {
            log::debug!("{source}: skipping self-reference {}", m.raw);
            continue;
        }
        if !known.contains(&target) {
            log::debug!("{source}: {} does not name a known resource", m.raw);
            continue;
        }
        let source_property = resource
            .inputs
            .find_property_path(&m.raw)
            .unwrap_or_default();
        found.push((
            target,
            Reference {
                source_property,
                target_attribute: m.attribute,
                raw_expression: m.raw,
            },
        ));
    }

    ResourceScan { source, found }
}

/// Scan every resource and accumulate the edges.
pub fn build_dependency_graph(resources: &[Resource], parallel: bool) -> DependencyGraph {
    let known: HashSet<String> = resources.iter().map(Resource::id).collect();

    let scans: Vec<ResourceScan> = if parallel {
        resources
            .par_iter()
            .map(|r| scan_resource(r, &known))
            .collect()
    } else {
        resources.iter().map(|r| scan_resource(r, &known)).collect()
    };

    let mut graph = DependencyGraph::new();
    for scan in scans {
        for (target, reference) in scan.found {
            graph.add_reference(&scan.source, &target, reference);
        }
    }
    graph
}

/// Resolve the dependency edges among `resources`.
///
/// Never fails: self-references and references to unknown resources are
/// dropped, and an expression that cannot be traced to a single string
/// property gets an empty `source_property`.
pub fn resolve_dependencies(resources: &[Resource]) -> Vec<Dependency> {
    build_dependency_graph(resources, false).dependencies()
}

/// Run the dependencies phase.
pub fn run_dependencies_phase(resources: &[Resource], parallel: bool) -> DependencyGraph {
    let graph = build_dependency_graph(resources, parallel);
    log::info!(
        "resolved {} dependencies from {} references",
        graph.edge_count(),
        graph.reference_count()
    );
    graph
}
