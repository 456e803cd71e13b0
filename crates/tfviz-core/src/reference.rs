//! Scanning text for `${kind.name.attribute}` interpolation expressions.

use std::sync::LazyLock;

use regex::Regex;

/// `${kind.name.attr}` with an optional numeric subscript on the name.
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_]+)\.([A-Za-z0-9_]+)(?:\[\d+\])?\.([A-Za-z0-9_]+)\}").unwrap()
});

/// One interpolation expression found in scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    pub kind: String,
    pub name: String,
    pub attribute: String,
    /// The full matched text, including `${` and `}`.
    pub raw: String,
}

impl ReferenceMatch {
    /// Identifier of the referenced resource. Any subscript is dropped.
    pub fn target_id(&self) -> String {
        resource_id(&self.kind, &self.name)
    }
}

/// Render a resource identifier.
pub fn resource_id(kind: &str, name: &str) -> String {
    format!("{kind}.{name}")
}

/// All non-overlapping matches in `text`, left to right.
pub fn scan_references(text: &str) -> Vec<ReferenceMatch> {
    REFERENCE_RE
        .captures_iter(text)
        .map(|caps| ReferenceMatch {
            kind: caps[1].to_string(),
            name: caps[2].to_string(),
            attribute: caps[3].to_string(),
            raw: caps[0].to_string(),
        })
        .collect()
}
