//! Sequential phase orchestrator with timing.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

use crate::categories::CategoryTable;
use crate::config::{AnalysisConfig, DiagramGraph};
use crate::error::Result;
use crate::graph::dependency_graph::DependencyGraph;
use crate::graph::resource_index::ResourceIndex;
use crate::output::assemble;
use crate::phases;
use crate::phases::parsing::ParsedFile;

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("discovery", "Finding Terraform files"),
    ("parsing", "Parsing configuration"),
    ("resources", "Building resource inventory"),
    ("outputs", "Binding outputs"),
    ("dependencies", "Resolving dependencies"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

/// Counters and timings of one run. Not part of the wire format.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub files_discovered: usize,
    pub files_parsed: usize,
    pub files_failed: Vec<String>,
    pub resources: usize,
    pub dependencies: usize,
    pub references: usize,
    pub outputs_bound: usize,
    pub categories: BTreeMap<String, usize>,
    /// Resource with the most direct dependents, and their count.
    pub most_depended_upon: Option<(String, usize)>,
    /// Seconds per phase, in run order.
    pub phase_timings: Vec<(String, f64)>,
    pub total_ms: f64,
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub graph: DiagramGraph,
    pub stats: RunStats,
}

fn report(progress: &mut Option<ProgressCallback>, name: &str) {
    if let Some(cb) = progress.as_mut() {
        let label = PHASE_LABELS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, l)| *l)
            .unwrap_or(name);
        cb(name, label);
    }
}

fn timed<T>(
    name: &str,
    progress: &mut Option<ProgressCallback>,
    timings: &mut Vec<(String, f64)>,
    phase: impl FnOnce() -> T,
) -> T {
    report(progress, name);
    let start = Instant::now();
    let out = phase();
    timings.push((name.to_string(), start.elapsed().as_secs_f64()));
    out
}

/// Run the core over already-parsed trees: build, bind, resolve, assemble.
///
/// Entry point for callers that parse configuration themselves.
pub fn extract_from_trees(
    files: &[ParsedFile],
    table: &CategoryTable,
    parallel: bool,
) -> Result<DiagramGraph> {
    let mut index = phases::resources::run_resources_phase(files, table)?;
    phases::outputs::run_outputs_phase(files, &mut index)?;
    let deps = phases::dependencies::run_dependencies_phase(index.as_slice(), parallel);
    Ok(assemble(index.into_resources(), deps.dependencies()))
}

fn most_depended_upon(index: &ResourceIndex, deps: &DependencyGraph) -> Option<(String, usize)> {
    let mut best: Option<(String, usize)> = None;
    for resource in index.iter() {
        let id = resource.id();
        let count = deps.dependents_of(&id).len();
        if count > 0 && best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((id, count));
        }
    }
    best
}

/// Execute the five-phase extraction pipeline and return the graph with stats.
pub fn run_pipeline(
    config: &AnalysisConfig,
    mut progress_callback: Option<ProgressCallback>,
) -> Result<Extraction> {
    let total_start = Instant::now();
    let mut timings = Vec::new();
    let table = CategoryTable::with_overrides(&config.category_overrides);

    let discovered = timed("discovery", &mut progress_callback, &mut timings, || {
        phases::discovery::run_discovery_phase(config)
    })?;

    let parsed = timed("parsing", &mut progress_callback, &mut timings, || {
        phases::parsing::run_parsing_phase(&discovered)
    });

    let mut index = timed("resources", &mut progress_callback, &mut timings, || {
        phases::resources::run_resources_phase(&parsed.files, &table)
    })?;

    let outputs_bound = timed("outputs", &mut progress_callback, &mut timings, || {
        phases::outputs::run_outputs_phase(&parsed.files, &mut index)
    })?;

    let deps = timed("dependencies", &mut progress_callback, &mut timings, || {
        phases::dependencies::run_dependencies_phase(index.as_slice(), config.parallel)
    });

    let mut categories = BTreeMap::new();
    for resource in index.iter() {
        *categories
            .entry(resource.category.as_str().to_string())
            .or_insert(0) += 1;
    }

    let stats = RunStats {
        files_discovered: discovered.len(),
        files_parsed: parsed.files.len(),
        files_failed: parsed.failed,
        resources: index.len(),
        dependencies: deps.edge_count(),
        references: deps.reference_count(),
        outputs_bound,
        categories,
        most_depended_upon: most_depended_upon(&index, &deps),
        phase_timings: timings,
        total_ms: total_start.elapsed().as_secs_f64() * 1000.0,
    };

    Ok(Extraction {
        graph: assemble(index.into_resources(), deps.dependencies()),
        stats,
    })
}
