//! Phase 3: Build resource records from the `resource` section of each tree.

use std::collections::BTreeMap;

use crate::categories::CategoryTable;
use crate::config::{Origin, Resource};
use crate::error::{ExtractError, Result};
use crate::graph::resource_index::ResourceIndex;
use crate::phases::parsing::ParsedFile;
use crate::value::ConfigValue;

pub(crate) fn invalid_section(
    file: &str,
    section: String,
    expected: &'static str,
    found: &ConfigValue,
) -> ExtractError {
    ExtractError::InvalidSection {
        file: file.to_string(),
        section,
        expected,
        found: found.type_name(),
    }
}

/// Unwrap one block body. Parsers that wrap each block in a single-element
/// sequence are handled by taking the first element.
pub(crate) fn unwrap_block<'a>(
    body: &'a ConfigValue,
    file: &str,
    section: impl FnOnce() -> String,
) -> Result<Option<&'a BTreeMap<String, ConfigValue>>> {
    let inner = match body {
        ConfigValue::Sequence(items) => match items.first() {
            Some(first) => first,
            None => return Ok(None),
        },
        other => other,
    };
    match inner {
        ConfigValue::Mapping(config) => Ok(Some(config)),
        ConfigValue::Null => Ok(None),
        other => Err(invalid_section(file, section(), "a mapping", other)),
    }
}

/// Build one resource per `(kind, name)` declared in `tree`.
///
/// A tree without a `resource` section yields nothing. The tree is not
/// modified; inputs are cloned into the records.
pub fn build_resources(
    tree: &ConfigValue,
    origin: &str,
    table: &CategoryTable,
) -> Result<Vec<Resource>> {
    let section = match tree.get("resource") {
        None | Some(ConfigValue::Null) => return Ok(Vec::new()),
        Some(section) => section,
    };
    let kinds = section
        .as_mapping()
        .ok_or_else(|| invalid_section(origin, "resource".to_string(), "a mapping", section))?;

    let mut resources = Vec::new();
    for (kind, instances) in kinds {
        let instances = instances.as_mapping().ok_or_else(|| {
            invalid_section(origin, format!("resource.{kind}"), "a mapping", instances)
        })?;
        let category = table.classify(kind);

        for (name, body) in instances {
            let inputs = match unwrap_block(body, origin, || format!("resource.{kind}.{name}"))? {
                Some(config) => ConfigValue::Mapping(config.clone()),
                None => ConfigValue::empty_mapping(),
            };
            resources.push(Resource {
                kind: kind.clone(),
                name: name.clone(),
                category,
                inputs,
                outputs: BTreeMap::new(),
                origin: Origin::file(origin),
            });
        }
    }
    Ok(resources)
}

/// Run the resources phase over all parsed files, merging by identifier.
pub fn run_resources_phase(files: &[ParsedFile], table: &CategoryTable) -> Result<ResourceIndex> {
    let mut index = ResourceIndex::new();
    for file in files {
        let resources = build_resources(&file.tree, &file.path, table)?;
        log::debug!("{}: {} resources", file.path, resources.len());
        for resource in resources {
            index.insert(resource);
        }
    }
    log::info!("built {} resources", index.len());
    Ok(index)
}
