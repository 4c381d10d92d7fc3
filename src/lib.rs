/*!
 * Packbox Library
 * Package dependency graph, isolated package contexts and policy-gated symbol resolution
 */

pub mod config;
pub mod core;
pub mod graph;
pub mod index;
pub mod monitoring;
pub mod package;
pub mod policy;
pub mod sandbox;

// Re-exports
pub use config::{Enforcement, PackageConfig, ProjectConfig};
pub use crate::core::{PackError, PackResult, PackageName, PolicyKind};
pub use graph::DependencyGraph;
pub use index::{DefaultInflector, Inflector, PublicSymbols, SymbolEntry, SymbolIndex, SymbolScanner};
pub use monitoring::{init_tracing, try_init_tracing};
pub use package::{PackageDescriptor, PackageDiscovery};
pub use policy::{
    AccessPolicy, AccessRequest, FolderPrivacyPolicy, LayerPolicy, PolicyDecision, PolicyEngine,
    PrivacyPolicy, VisibilityPolicy,
};
pub use sandbox::{
    boot_project, BootStats, CrossBoundaryResolver, ExecutionContext, Host, Resolution,
    ResolutionAudit, SandboxOrchestrator, SimulatedHost, SymbolResolver, SymbolValue,
};
