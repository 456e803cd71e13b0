//! tfviz Core — Resource inventory and dependency graph extraction for Terraform.
//!
//! This crate contains all extraction logic: file discovery, HCL parsing,
//! resource classification, output binding, reference resolution and
//! assembly of the diagram graph served to the visualiser.

pub mod categories;
pub mod config;
pub mod error;
pub mod graph;
pub mod output;
pub mod phases;
pub mod pipeline;
pub mod reference;
pub mod value;

pub use categories::{classify, Category, CategoryTable};
pub use config::{AnalysisConfig, Dependency, DiagramGraph, Origin, OutputBinding, Reference, Resource};
pub use error::{ExtractError, Result};
pub use value::ConfigValue;
