/*!
 * Package Descriptor
 * Immutable identity, location, dependencies and policy settings of one package
 */

use crate::config::PackageConfig;
use crate::core::limits::ROOT_PACKAGE_NAME;
use crate::core::{normalize_symbol, PackageName};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Policy settings of a package, resolved from its configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyConfig {
    pub enforce_dependencies: bool,
    pub enforce_privacy: bool,
    /// Public path relative to the package root
    pub public_path: String,
    /// Explicitly private symbols, normalized without a leading `::`
    pub private_symbols: Vec<String>,
    pub enforce_visibility: bool,
    pub visible_to: Vec<PackageName>,
    pub enforce_folder_privacy: bool,
    pub enforce_layers: bool,
    pub layer: Option<String>,
}

impl From<&PackageConfig> for PolicyConfig {
    fn from(config: &PackageConfig) -> Self {
        Self {
            enforce_dependencies: config.enforce_dependencies.is_enabled(),
            enforce_privacy: config.enforce_privacy.is_enabled(),
            public_path: config.public_path.clone(),
            private_symbols: config
                .private_constants
                .iter()
                .map(|s| normalize_symbol(s).to_string())
                .collect(),
            enforce_visibility: config.enforce_visibility.is_enabled(),
            visible_to: config.visible_to.iter().map(|s| clean_package_path(s)).collect(),
            enforce_folder_privacy: config.enforce_folder_privacy.is_enabled(),
            enforce_layers: config.enforce_layers.is_enabled(),
            layer: config.layer.clone(),
        }
    }
}

/// One discovered package
#[derive(Debug, Clone, Serialize)]
pub struct PackageDescriptor {
    pub name: PackageName,
    /// Absolute path of the package directory
    pub location: PathBuf,
    /// Declared dependencies, cleaned, in declaration order
    pub dependencies: Vec<PackageName>,
    pub policy: PolicyConfig,
    /// Source roots relative to the package directory
    pub load_paths: Vec<String>,
    /// Position in discovery order
    pub discovery_index: usize,
}

impl PackageDescriptor {
    pub fn new(name: &str, location: PathBuf, config: &PackageConfig, discovery_index: usize) -> Self {
        Self {
            name: clean_package_path(name),
            location,
            dependencies: config.dependencies.iter().map(|d| clean_package_path(d)).collect(),
            policy: PolicyConfig::from(config),
            load_paths: config.load_paths.clone(),
            discovery_index,
        }
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT_PACKAGE_NAME
    }

    /// Absolute path of the public root
    pub fn public_root(&self) -> PathBuf {
        self.location.join(self.policy.public_path.trim_end_matches('/'))
    }

    /// Absolute paths of the primary source roots
    pub fn load_roots(&self) -> Vec<PathBuf> {
        self.load_paths
            .iter()
            .map(|p| self.location.join(p.trim_end_matches('/')))
            .collect()
    }

    /// Name of the directory containing this package, `None` for the root
    pub fn parent_folder(&self) -> Option<&str> {
        parent_folder(&self.name)
    }

    pub fn layer(&self) -> Option<&str> {
        self.policy.layer.as_deref()
    }

    pub fn location(&self) -> &Path {
        &self.location
    }
}

/// Clean a package path string: `./packs/billing/` -> `packs/billing`
pub fn clean_package_path(path: &str) -> PackageName {
    let cleaned = PathBuf::from(path_clean::clean(path.trim()));
    let cleaned = cleaned.to_string_lossy().replace('\\', "/");
    let cleaned = cleaned.trim_end_matches('/');
    if cleaned.is_empty() {
        ROOT_PACKAGE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Parent directory of a package name; top-level packages live in ""
pub fn parent_folder(name: &str) -> Option<&str> {
    if name == ROOT_PACKAGE_NAME {
        return None;
    }
    Some(name.rfind('/').map(|idx| &name[..idx]).unwrap_or(""))
}
