/*!
 * Project Configuration
 * Root-level packwerk.yml: package discovery globs and architecture layers
 */

use super::read_yaml;
use crate::core::limits::{DEFAULT_EXCLUDE, DEFAULT_PACKAGE_PATH, PROJECT_CONFIG_FILE};
use crate::core::PackResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single glob or a list of globs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProjectConfig {
    package_paths: Option<OneOrMany>,
    exclude: Option<OneOrMany>,
    #[serde(alias = "architecture_layers")]
    layers: Vec<String>,
}

/// Project-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    /// Globs selecting package directories
    pub package_paths: Vec<String>,
    /// Globs of directories never searched
    pub exclude: Vec<String>,
    /// Ordered architecture layers, highest first
    pub layers: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            package_paths: vec![DEFAULT_PACKAGE_PATH.to_string()],
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            layers: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Load `packwerk.yml` from the project root; a missing file yields defaults
    pub fn load(root: &Path) -> PackResult<Self> {
        let path = root.join(PROJECT_CONFIG_FILE);
        match read_yaml::<RawProjectConfig>(&path)? {
            Some(raw) => Ok(Self::from_raw(raw)),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration text (used for inline fixtures)
    pub fn from_yaml(text: &str) -> PackResult<Self> {
        let raw: RawProjectConfig = super::parse_yaml(text, Path::new(PROJECT_CONFIG_FILE))?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawProjectConfig) -> Self {
        let defaults = Self::default();
        Self {
            package_paths: raw
                .package_paths
                .map(OneOrMany::into_vec)
                .unwrap_or(defaults.package_paths),
            exclude: raw.exclude.map(OneOrMany::into_vec).unwrap_or(defaults.exclude),
            layers: raw.layers,
        }
    }

    /// Position of a layer in the ordered list
    pub fn layer_index(&self, layer: &str) -> Option<usize> {
        self.layers.iter().position(|l| l == layer)
    }
}
