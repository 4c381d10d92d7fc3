/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Access policies that can deny a cross-package reference or edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Privacy,
    Visibility,
    FolderPrivacy,
    Layer,
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PolicyKind::Privacy => "privacy",
            PolicyKind::Visibility => "visibility",
            PolicyKind::FolderPrivacy => "folder privacy",
            PolicyKind::Layer => "layer",
        };
        f.write_str(name)
    }
}

/// Package boundary errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PackError {
    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(packbox::graph::cycle),
        help("Remove one of the declared dependencies along the cycle.")
    )]
    CircularDependency { cycle: Vec<String> },

    #[error("Package '{package}' depends on '{dependency}', which is not a discovered package")]
    #[diagnostic(
        code(packbox::graph::unresolved_dependency),
        help("Check the path in `dependencies` and that the target directory has a package.yml.")
    )]
    UnresolvedDependency { package: String, dependency: String },

    #[error("Uninitialized symbol {symbol} (referenced from package '{package}')")]
    #[diagnostic(
        code(packbox::resolve::unresolved_symbol),
        help("No direct dependency defines this symbol. Declare the package that does.")
    )]
    UnresolvedSymbol { symbol: String, package: String },

    #[error("Privacy violation: '{symbol}' is private to package '{owner}' (referenced from '{accessor}')")]
    #[diagnostic(
        code(packbox::policy::privacy),
        help("Move the symbol under the package's public path or mark its file public.")
    )]
    PrivacyViolation {
        symbol: String,
        owner: String,
        accessor: String,
    },

    #[error("Visibility violation: package '{owner}' is not visible to '{accessor}' (symbol '{symbol}')")]
    #[diagnostic(
        code(packbox::policy::visibility),
        help("Add the accessing package to `visible_to` of the target package.")
    )]
    VisibilityViolation {
        symbol: String,
        owner: String,
        accessor: String,
    },

    #[error("Folder privacy violation: package '{owner}' is not accessible from '{accessor}' (symbol '{symbol}')")]
    #[diagnostic(
        code(packbox::policy::folder_privacy),
        help("Only sibling, ancestor and root packages may reference a folder-private package.")
    )]
    FolderPrivacyViolation {
        symbol: String,
        owner: String,
        accessor: String,
    },

    #[error("Layer violation: '{package}' (layer '{layer}') cannot depend on '{dependency}' (layer '{dependency_layer}')")]
    #[diagnostic(
        code(packbox::policy::layer),
        help("A package may only depend on packages in its own layer or a lower one.")
    )]
    LayerViolation {
        package: String,
        layer: String,
        dependency: String,
        dependency_layer: String,
    },

    #[error("Host capability missing: {reason}")]
    #[diagnostic(
        code(packbox::host::capability_missing),
        help("The host runtime must provide isolated execution contexts.")
    )]
    HostCapabilityMissing { reason: String },

    #[error("Host failure in package '{package}': {reason}")]
    #[diagnostic(code(packbox::host::failure))]
    HostFailure { package: String, reason: String },

    #[error("Invalid configuration in {path}: {reason}")]
    #[diagnostic(
        code(packbox::config::invalid),
        help("Fix the YAML file; see the package configuration keys in the docs.")
    )]
    InvalidConfig { path: String, reason: String },

    #[error("I/O error at {path}: {reason}")]
    #[diagnostic(code(packbox::io))]
    Io { path: String, reason: String },
}

impl PackError {
    /// Build an I/O error for a path
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        PackError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Structural misconfiguration that aborts the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PackError::CircularDependency { .. }
                | PackError::UnresolvedDependency { .. }
                | PackError::LayerViolation { .. }
                | PackError::HostCapabilityMissing { .. }
                | PackError::InvalidConfig { .. }
        )
    }

    /// Whether an access policy, rather than absence, caused the failure
    pub fn is_policy_denial(&self) -> bool {
        self.policy_kind().is_some()
    }

    /// Policy responsible for a denial
    pub fn policy_kind(&self) -> Option<PolicyKind> {
        match self {
            PackError::PrivacyViolation { .. } => Some(PolicyKind::Privacy),
            PackError::VisibilityViolation { .. } => Some(PolicyKind::Visibility),
            PackError::FolderPrivacyViolation { .. } => Some(PolicyKind::FolderPrivacy),
            PackError::LayerViolation { .. } => Some(PolicyKind::Layer),
            _ => None,
        }
    }

    /// Errors raised at the point of a symbol reference
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            PackError::UnresolvedSymbol { .. }
                | PackError::PrivacyViolation { .. }
                | PackError::VisibilityViolation { .. }
                | PackError::FolderPrivacyViolation { .. }
        )
    }
}
