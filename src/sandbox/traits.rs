/*!
 * Sandbox Traits
 * Host-runtime abstractions for isolated per-package execution contexts
 */

use super::types::{ContextId, HostPlatform, SymbolKind, SymbolValue};
use crate::core::PackResult;
use crate::package::PackageDescriptor;
use std::path::Path;
use std::sync::Arc;

/// Host runtime able to create isolated execution contexts
pub trait Host: Send + Sync {
    /// Check if this host can provide isolated contexts at all
    fn is_supported(&self) -> bool;

    /// Get the platform type
    fn platform(&self) -> HostPlatform;

    /// Create a fresh context owned by `package`
    fn create_context(&self, package: &PackageDescriptor) -> PackResult<Arc<dyn ExecutionContext>>;
}

/// Isolated symbol table plus evaluation environment of one package
pub trait ExecutionContext: Send + Sync {
    fn id(&self) -> ContextId;

    /// Name of the owning package
    fn owner(&self) -> &str;

    /// Bound value, without evaluating or invoking the missing-symbol hook
    fn lookup(&self, symbol: &str) -> Option<SymbolValue>;

    fn is_bound(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Bind a value directly
    fn bind(&self, value: SymbolValue);

    /// Register `unit` as the definition of `symbol`, evaluated on first reference
    fn bind_lazy(&self, symbol: &str, unit: &Path, kind: SymbolKind);

    /// Bind an empty namespace container
    fn define_namespace(&self, symbol: &str) -> SymbolValue;

    /// Evaluate a source unit inside this context; at most once per unit
    fn evaluate(&self, unit: &Path) -> PackResult<()>;

    /// Install the hook invoked for references this context cannot satisfy
    fn set_missing_symbol_hook(&self, hook: Arc<dyn SymbolResolver>);

    /// Reference a symbol from inside this context: bound, then lazy, then hook
    fn resolve(&self, symbol: &str) -> PackResult<SymbolValue>;
}

/// Missing-symbol hook
pub trait SymbolResolver: Send + Sync {
    fn resolve_missing(&self, symbol: &str) -> PackResult<SymbolValue>;
}

/// Per-package external-library path isolation
pub trait LibraryIsolation: Send + Sync {
    fn isolate(&self, package: &PackageDescriptor, context: &dyn ExecutionContext) -> PackResult<()>;
}

/// Leaves library paths untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLibraryIsolation;

impl LibraryIsolation for NoLibraryIsolation {
    fn isolate(&self, _package: &PackageDescriptor, _context: &dyn ExecutionContext) -> PackResult<()> {
        Ok(())
    }
}
