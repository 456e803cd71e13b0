//! In-memory indexes built during an extraction run.

pub mod dependency_graph;
pub mod resource_index;
