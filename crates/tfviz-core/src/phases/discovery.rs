//! Phase 1: Walk the root directory and collect Terraform files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::AnalysisConfig;
use crate::error::{ExtractError, Result};

/// Directory names never descended into.
const DEFAULT_EXCLUDES: &[&str] = &[".terraform", ".terragrunt-cache", ".git", "node_modules"];

/// Recognised configuration file suffixes.
pub const TERRAFORM_EXTENSIONS: &[&str] = &[".tf", ".tf.json"];

/// A configuration file found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub abs_path: PathBuf,
    /// Path relative to the root, `/`-separated. Used as the resource origin.
    pub rel_path: String,
}

impl DiscoveredFile {
    pub fn is_json(&self) -> bool {
        self.rel_path.ends_with(".tf.json")
    }
}

fn is_terraform_file(name: &str) -> bool {
    TERRAFORM_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Run the discovery phase. Files come back sorted by relative path.
pub fn run_discovery_phase(config: &AnalysisConfig) -> Result<Vec<DiscoveredFile>> {
    let root = Path::new(&config.root_path);
    if !root.is_dir() {
        return Err(ExtractError::RootNotFound(root.to_path_buf()));
    }

    let exclude_patterns: Vec<&str> = DEFAULT_EXCLUDES
        .iter()
        .copied()
        .chain(config.exclude_patterns.iter().map(|s| s.as_str()))
        .collect();

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if exclude_patterns.iter().any(|p| name == *p) {
                return false;
            }
            !(e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                log::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !is_terraform_file(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > config.max_file_size {
            log::warn!(
                "skipping {} ({size} bytes exceeds limit of {})",
                entry.path().display(),
                config.max_file_size
            );
            continue;
        }

        let abs_path = entry.path().to_path_buf();
        let rel_path = abs_path
            .strip_prefix(root)
            .unwrap_or(&abs_path)
            .to_string_lossy()
            .replace('\\', "/");
        files.push(DiscoveredFile { abs_path, rel_path });
    }

    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    log::info!("discovered {} terraform files", files.len());
    Ok(files)
}
