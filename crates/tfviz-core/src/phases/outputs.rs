//! Phase 4: Attach `output` blocks to the resources their values reference.

use crate::config::OutputBinding;
use crate::error::Result;
use crate::graph::resource_index::ResourceIndex;
use crate::phases::parsing::ParsedFile;
use crate::phases::resources::{invalid_section, unwrap_block};
use crate::reference::scan_references;
use crate::value::ConfigValue;

/// Bind every output in `tree` whose value references a known resource.
///
/// One output may bind to several resources. References to unknown
/// resources are ignored. Returns the number of bindings made.
pub fn bind_outputs(tree: &ConfigValue, origin: &str, resources: &mut ResourceIndex) -> Result<usize> {
    let section = match tree.get("output") {
        None | Some(ConfigValue::Null) => return Ok(0),
        Some(section) => section,
    };
    let outputs = section
        .as_mapping()
        .ok_or_else(|| invalid_section(origin, "output".to_string(), "a mapping", section))?;

    let mut bound = 0;
    for (output_name, body) in outputs {
        let Some(config) = unwrap_block(body, origin, || format!("output.{output_name}"))? else {
            continue;
        };
        let value = match config.get("value") {
            None | Some(ConfigValue::Null) => continue,
            Some(value) => value,
        };
        let description = config
            .get("description")
            .and_then(ConfigValue::as_str)
            .unwrap_or_default();

        for reference in scan_references(&value.to_search_text()) {
            let target = reference.target_id();
            match resources.get_mut(&target) {
                Some(resource) => {
                    resource.outputs.insert(
                        output_name.clone(),
                        OutputBinding {
                            value: value.clone(),
                            description: description.to_string(),
                        },
                    );
                    bound += 1;
                }
                None => log::debug!("output {output_name}: {target} is not a known resource"),
            }
        }
    }
    Ok(bound)
}

/// Run the outputs phase over the retained trees.
pub fn run_outputs_phase(files: &[ParsedFile], resources: &mut ResourceIndex) -> Result<usize> {
    let mut total = 0;
    for file in files {
        total += bind_outputs(&file.tree, &file.path, resources)?;
    }
    log::info!("bound {total} outputs");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryTable;
    use crate::phases::resources::build_resources;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn index_for(tree: &ConfigValue) -> ResourceIndex {
        build_resources(tree, "main.tf", CategoryTable::builtin())
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn binds_output_without_description() {
        let tree = ConfigValue::from(json!({
            "resource": {"aws_vpc": {"main": {"cidr_block": "10.0.0.0/16"}}},
            "output": {"vpc_id": {"value": "${aws_vpc.main.id}"}}
        }));
        let mut index = index_for(&tree);
        assert_eq!(bind_outputs(&tree, "main.tf", &mut index).unwrap(), 1);
        let vpc = index.get("aws_vpc.main").unwrap();
        assert_eq!(
            vpc.outputs.get("vpc_id"),
            Some(&OutputBinding {
                value: ConfigValue::from("${aws_vpc.main.id}"),
                description: String::new(),
            })
        );
    }

    #[test]
    fn indexed_reference_binds_by_kind_and_name() {
        let tree = ConfigValue::from(json!({
            "resource": {"aws_subnet": {"public": {}}},
            "output": {"first_subnet": [{
                "value": "${aws_subnet.public[0].id}",
                "description": "First public subnet"
            }]}
        }));
        let mut index = index_for(&tree);
        bind_outputs(&tree, "main.tf", &mut index).unwrap();
        let binding = &index.get("aws_subnet.public").unwrap().outputs["first_subnet"];
        assert_eq!(binding.description, "First public subnet");
    }

    #[test]
    fn one_output_binds_to_many_resources() {
        let tree = ConfigValue::from(json!({
            "resource": {"aws_vpc": {"a": {}, "b": {}}},
            "output": {"ids": {"value": ["${aws_vpc.a.id}", "${aws_vpc.b.id}", "${aws_vpc.c.id}"]}}
        }));
        let mut index = index_for(&tree);
        assert_eq!(bind_outputs(&tree, "main.tf", &mut index).unwrap(), 2);
        assert!(index.get("aws_vpc.a").unwrap().outputs.contains_key("ids"));
        assert!(index.get("aws_vpc.b").unwrap().outputs.contains_key("ids"));
    }

    #[test]
    fn unknown_targets_and_missing_values_are_ignored() {
        let tree = ConfigValue::from(json!({
            "resource": {"aws_vpc": {"main": {}}},
            "output": {
                "region": {"value": "${var.region}"},
                "other": {"value": "${aws_vpc.missing.id}"},
                "empty": {"description": "no value"}
            }
        }));
        let mut index = index_for(&tree);
        assert_eq!(bind_outputs(&tree, "main.tf", &mut index).unwrap(), 0);
        assert!(index.get("aws_vpc.main").unwrap().outputs.is_empty());
    }

    #[test]
    fn non_mapping_output_section_is_a_hard_error() {
        let tree = ConfigValue::from(json!({"output": ["x"]}));
        let mut index = ResourceIndex::new();
        let err = bind_outputs(&tree, "outputs.tf", &mut index).unwrap_err();
        assert!(err.to_string().contains("outputs.tf"));
        assert!(err.to_string().contains("`output`"));
    }
}
