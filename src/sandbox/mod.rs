/*!
 * Sandbox Module
 * Isolated per-package contexts and policy-gated cross-boundary resolution
 */

mod audit;
mod manager;
mod registry;
mod resolver;
mod simulation;
mod traits;
mod types;

pub use audit::{AuditEvent, AuditOutcome, AuditStats, ResolutionAudit};
pub use manager::{boot_project, SandboxOrchestrator};
pub use registry::{BoxRegistry, PackageBox};
pub use resolver::{CrossBoundaryResolver, SearchScope};
pub use simulation::{SimulatedContext, SimulatedHost};
pub use traits::{ExecutionContext, Host, LibraryIsolation, NoLibraryIsolation, SymbolResolver};
pub use types::{
    BootStats, ContextId, HostPlatform, MaterializedSymbol, Resolution, SymbolKind, SymbolValue,
};
