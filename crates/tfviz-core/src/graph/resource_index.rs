//! Ordered resource collection keyed by `kind.name`.

use std::collections::HashMap;

use crate::config::Resource;

/// Resources in declaration order with O(1) id lookup.
///
/// - `resources`: declaration order, one entry per identifier
/// - `positions`: `kind.name` → index into `resources`
#[derive(Debug, Default)]
pub struct ResourceIndex {
    resources: Vec<Resource>,
    positions: HashMap<String, usize>,
}

impl ResourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource. A redeclared identifier replaces the earlier record
    /// and keeps its position. Returns the replaced record, if any.
    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        let id = resource.id();
        match self.positions.get(&id) {
            Some(&pos) => {
                let previous = std::mem::replace(&mut self.resources[pos], resource);
                log::warn!(
                    "{id} declared in {} replaces the declaration in {}",
                    self.resources[pos].origin.file,
                    previous.origin.file
                );
                Some(previous)
            }
            None => {
                self.positions.insert(id, self.resources.len());
                self.resources.push(resource);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.positions.get(id).map(|&pos| &self.resources[pos])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Resource> {
        let pos = *self.positions.get(id)?;
        Some(&mut self.resources[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }

    pub fn as_slice(&self) -> &[Resource] {
        &self.resources
    }

    pub fn into_resources(self) -> Vec<Resource> {
        self.resources
    }
}

impl FromIterator<Resource> for ResourceIndex {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut index = Self::new();
        for resource in iter {
            index.insert(resource);
        }
        index
    }
}
