//! Pipeline orchestration and end-to-end fixture tests.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use tfviz_core::categories::Category;
use tfviz_core::config::{AnalysisConfig, DiagramGraph};
use tfviz_core::error::ExtractError;
use tfviz_core::output::{to_json, write_output};
use tfviz_core::pipeline::{run_pipeline, ProgressCallback};

// ===========================================================================
// Pipeline orchestration
// ===========================================================================

#[test]
fn pipeline_reports_every_phase_in_order() {
    let phases = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let seen = phases.clone();
    let callback: ProgressCallback = Box::new(move |phase, _label| {
        seen.borrow_mut().push(phase.to_string());
    });
    run_pipeline(&fixture_config("aws_basic"), Some(callback)).unwrap();
    assert_eq!(
        *phases.borrow(),
        vec!["discovery", "parsing", "resources", "outputs", "dependencies"]
    );
}

#[test]
fn pipeline_phase_timings() {
    let extraction = run_fixture("aws_basic");
    let names: Vec<&str> = extraction
        .stats
        .phase_timings
        .iter()
        .map(|(n, _)| n.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["discovery", "parsing", "resources", "outputs", "dependencies"]
    );
    assert!(extraction.stats.total_ms >= 0.0);
}

#[test]
fn missing_root_fails() {
    let config = AnalysisConfig {
        root_path: fixture_path("does_not_exist").to_string_lossy().to_string(),
        ..Default::default()
    };
    assert!(matches!(
        run_pipeline(&config, None),
        Err(ExtractError::RootNotFound(_))
    ));
}

// ===========================================================================
// aws_basic end to end
// ===========================================================================

#[test]
fn aws_basic_resources_in_file_order() {
    let extraction = run_fixture("aws_basic");
    assert_eq!(
        resource_ids(&extraction.graph),
        vec![
            "aws_instance.web",
            "aws_s3_bucket.assets",
            "aws_security_group.web",
            "aws_internet_gateway.gw",
            "aws_route_table.public",
            "aws_subnet.public",
            "aws_vpc.main",
        ]
    );
    let vpc = find_resource(&extraction.graph, "aws_vpc.main");
    assert_eq!(vpc.category, Category::Networking);
    assert_eq!(vpc.origin.file, "network.tf");
}

#[test]
fn aws_basic_dependencies() {
    let extraction = run_fixture("aws_basic");
    let graph = &extraction.graph;
    let pairs: Vec<(String, String)> = edge_pairs(graph);
    let expected: Vec<(String, String)> = [
        ("aws_instance.web", "aws_subnet.public"),
        ("aws_instance.web", "aws_vpc.main"),
        ("aws_instance.web", "aws_security_group.web"),
        ("aws_security_group.web", "aws_vpc.main"),
        ("aws_internet_gateway.gw", "aws_vpc.main"),
        ("aws_route_table.public", "aws_internet_gateway.gw"),
        ("aws_route_table.public", "aws_vpc.main"),
        ("aws_subnet.public", "aws_vpc.main"),
    ]
    .iter()
    .map(|(s, t)| (s.to_string(), t.to_string()))
    .collect();
    assert_eq!(pairs, expected);

    let web_to_subnet = &graph.dependencies[0];
    assert_eq!(web_to_subnet.references[0].source_property, "subnet_id");
    assert_eq!(
        web_to_subnet.references[0].raw_expression,
        "${aws_subnet.public[0].id}"
    );
    let web_to_vpc = &graph.dependencies[1];
    assert_eq!(web_to_vpc.references[0].source_property, "tags.Name");

    let route_to_gw = &graph.dependencies[5];
    assert!(route_to_gw.references[0]
        .source_property
        .ends_with("gateway_id"));
}

#[test]
fn aws_basic_outputs_bound() {
    let extraction = run_fixture("aws_basic");
    let graph = &extraction.graph;
    assert!(find_resource(graph, "aws_vpc.main")
        .outputs
        .contains_key("vpc_id"));
    let web = find_resource(graph, "aws_instance.web");
    assert_eq!(
        web.outputs["web_public_ip"].description,
        "Public IP of the web server"
    );
    assert_eq!(extraction.stats.outputs_bound, 2);
}

#[test]
fn aws_basic_stats() {
    let stats = run_fixture("aws_basic").stats;
    assert_eq!(stats.files_discovered, 3);
    assert_eq!(stats.files_parsed, 3);
    assert!(stats.files_failed.is_empty());
    assert_eq!(stats.resources, 7);
    assert_eq!(stats.dependencies, 8);
    assert_eq!(stats.categories.get("networking"), Some(&5));
    assert_eq!(stats.categories.get("compute"), Some(&1));
    assert_eq!(stats.categories.get("storage"), Some(&1));
    assert_eq!(
        stats.most_depended_upon,
        Some(("aws_vpc.main".to_string(), 5))
    );
}

#[test]
fn runs_are_byte_identical() {
    let first = to_json(&run_fixture("aws_basic").graph, true).unwrap();
    let second = to_json(&run_fixture("aws_basic").graph, true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn sequential_run_matches_parallel_run() {
    let parallel = run_fixture("aws_basic").graph;
    let config = AnalysisConfig {
        parallel: false,
        ..fixture_config("aws_basic")
    };
    let sequential = run_pipeline(&config, None).unwrap().graph;
    assert_eq!(parallel, sequential);
}

// ===========================================================================
// Degraded inputs
// ===========================================================================

#[test]
fn broken_file_contributes_nothing() {
    let extraction = run_fixture("with_broken");
    assert_eq!(extraction.stats.files_failed, vec!["broken.tf".to_string()]);
    assert_eq!(
        resource_ids(&extraction.graph),
        vec!["aws_subnet.public", "aws_vpc.main"]
    );
    // the subnet references a vpc that is not declared
    assert!(extraction.graph.dependencies.is_empty());
    let subnet = find_resource(&extraction.graph, "aws_subnet.public");
    assert_eq!(
        subnet.inputs.get("vpc_id").and_then(|v| v.as_str()),
        Some("${aws_vpc.missing.id}")
    );
}

#[test]
fn tree_without_resources_is_empty_graph() {
    let extraction = run_fixture("no_resources");
    assert_eq!(extraction.stats.files_parsed, 1);
    assert_eq!(extraction.graph, DiagramGraph::default());
}

// ===========================================================================
// Output JSON
// ===========================================================================

#[test]
fn output_write_and_read() {
    let extraction = run_fixture("json_config");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json").to_string_lossy().to_string();
    write_output(&extraction.graph, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let top: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(top, vec!["dependencies", "resources"]);
    assert_eq!(value["dependencies"][0]["source"], "aws_subnet.public");
    assert_eq!(
        value["dependencies"][0]["references"][0]["targetAttribute"],
        "id"
    );
    assert_eq!(value["resources"][0]["category"], "networking");
    assert_eq!(
        value["resources"][0]["outputs"]["subnet_id"]["description"],
        "Public subnet"
    );
}
