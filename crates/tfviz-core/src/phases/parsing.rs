//! Phase 2: Parse each discovered file once into a retained configuration tree.

use crate::error::{ExtractError, Result};
use crate::phases::discovery::DiscoveredFile;
use crate::value::ConfigValue;

/// A parsed file. Both binding passes run over these retained trees.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    /// Relative path, reported as the origin of its resources.
    pub path: String,
    pub tree: ConfigValue,
}

/// Outcome of the parsing phase.
#[derive(Debug, Default)]
pub struct ParsingOutcome {
    pub files: Vec<ParsedFile>,
    /// Files that could not be read or parsed and contribute nothing.
    pub failed: Vec<String>,
}

/// Parse HCL or Terraform JSON source text into a tree.
///
/// Expressions that are not literals (`aws_vpc.main.id`, function calls,
/// templates) surface as `${...}` strings.
pub fn parse_source(source: &str, file: &str, json: bool) -> Result<ConfigValue> {
    let value: serde_json::Value = if json {
        serde_json::from_str(source).map_err(|e| ExtractError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })?
    } else {
        hcl::from_str(source).map_err(|e| ExtractError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })?
    };
    Ok(ConfigValue::from(value))
}

fn parse_file(file: &DiscoveredFile) -> Result<ParsedFile> {
    let source = std::fs::read_to_string(&file.abs_path).map_err(|source| ExtractError::Io {
        path: file.abs_path.clone(),
        source,
    })?;
    let tree = parse_source(&source, &file.rel_path, file.is_json())?;
    Ok(ParsedFile {
        path: file.rel_path.clone(),
        tree,
    })
}

/// Run the parsing phase. Unreadable or malformed files are logged and
/// skipped; they never abort the run.
pub fn run_parsing_phase(files: &[DiscoveredFile]) -> ParsingOutcome {
    let mut outcome = ParsingOutcome::default();
    for file in files {
        match parse_file(file) {
            Ok(parsed) => {
                log::debug!("parsed {}", parsed.path);
                outcome.files.push(parsed);
            }
            Err(err) => {
                log::warn!("{err}");
                outcome.failed.push(file.rel_path.clone());
            }
        }
    }
    outcome
}
