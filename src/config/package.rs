/*!
 * Package Configuration
 * Per-package package.yml: declared dependencies and policy settings
 */

use super::read_yaml;
use crate::core::limits::{DEFAULT_LOAD_PATHS, DEFAULT_PUBLIC_PATH, PACKAGE_CONFIG_FILE};
use crate::core::PackResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Enforcement flag: `true`, `false` or a mode string such as `strict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Enforcement {
    Flag(bool),
    Mode(String),
}

impl Enforcement {
    pub fn is_enabled(&self) -> bool {
        match self {
            Enforcement::Flag(enabled) => *enabled,
            Enforcement::Mode(mode) => matches!(mode.as_str(), "strict" | "true"),
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Enforcement::Mode(mode) if mode == "strict")
    }
}

impl Default for Enforcement {
    fn default() -> Self {
        Enforcement::Flag(false)
    }
}

fn default_public_path() -> String {
    DEFAULT_PUBLIC_PATH.to_string()
}

fn default_load_paths() -> Vec<String> {
    DEFAULT_LOAD_PATHS.iter().map(|s| s.to_string()).collect()
}

/// Contents of a package.yml file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    pub dependencies: Vec<String>,
    pub enforce_dependencies: Enforcement,
    pub enforce_privacy: Enforcement,
    #[serde(default = "default_public_path")]
    pub public_path: String,
    pub private_constants: Vec<String>,
    pub enforce_visibility: Enforcement,
    pub visible_to: Vec<String>,
    pub enforce_folder_privacy: Enforcement,
    pub enforce_layers: Enforcement,
    pub layer: Option<String>,
    #[serde(default = "default_load_paths")]
    pub load_paths: Vec<String>,
    pub metadata: BTreeMap<String, serde_yaml::Value>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            dependencies: Vec::new(),
            enforce_dependencies: Enforcement::default(),
            enforce_privacy: Enforcement::default(),
            public_path: default_public_path(),
            private_constants: Vec::new(),
            enforce_visibility: Enforcement::default(),
            visible_to: Vec::new(),
            enforce_folder_privacy: Enforcement::default(),
            enforce_layers: Enforcement::default(),
            layer: None,
            load_paths: default_load_paths(),
            metadata: BTreeMap::new(),
        }
    }
}

impl PackageConfig {
    /// Load `package.yml` from a package directory, `None` if absent
    pub fn load(dir: &Path) -> PackResult<Option<Self>> {
        read_yaml(&dir.join(PACKAGE_CONFIG_FILE))
    }

    /// Parse configuration text (used for inline fixtures)
    pub fn from_yaml(text: &str) -> PackResult<Self> {
        super::parse_yaml(text, Path::new(PACKAGE_CONFIG_FILE))
    }
}
