/*!
 * Configuration Module
 * YAML configuration for the project root and for each package
 */

pub mod package;
pub mod project;

pub use package::{Enforcement, PackageConfig};
pub use project::{OneOrMany, ProjectConfig};

use crate::core::{PackError, PackResult};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Parse YAML text; an empty or comment-only document counts as an empty mapping
pub(crate) fn parse_yaml<T: DeserializeOwned>(text: &str, path: &Path) -> PackResult<T> {
    let is_blank = text
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
    let source = if is_blank { "{}" } else { text };

    serde_yaml::from_str(source).map_err(|e| PackError::InvalidConfig {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read and parse a YAML file, `None` if it does not exist
pub(crate) fn read_yaml<T: DeserializeOwned>(path: &Path) -> PackResult<Option<T>> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_yaml(&text, path).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PackError::io(path, e)),
    }
}
