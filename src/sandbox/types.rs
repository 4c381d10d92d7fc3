/*!
 * Sandbox Types
 * Context identifiers, materialized symbols, resolution outcomes and boot statistics
 */

use crate::core::{PackError, PackResult, PackageName};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier of an execution context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextId(pub u64);

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

/// Host platform providing the execution contexts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostPlatform {
    /// Runtime with native isolated symbol tables
    Native,
    /// In-process explicit symbol maps
    Simulation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Concrete,
    Namespace,
}

/// A symbol bound in some execution context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializedSymbol {
    pub name: String,
    /// Package whose context defined the symbol
    pub owner: PackageName,
    /// Source unit that defined it; `None` for implicit namespaces
    pub unit: Option<PathBuf>,
    pub kind: SymbolKind,
    /// Context the symbol was defined in
    pub context: ContextId,
}

impl MaterializedSymbol {
    pub fn is_namespace(&self) -> bool {
        self.kind == SymbolKind::Namespace
    }
}

/// Shared handle to a materialized symbol
pub type SymbolValue = Arc<MaterializedSymbol>;

/// Outcome of a cross-boundary lookup
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Materialized from a dependency
    Found { value: SymbolValue, provider: PackageName },
    /// A dependency defines the symbol but a policy refused access
    Denied(PackError),
    /// No searched dependency defines the symbol
    Absent,
    /// The providing context failed to materialize the symbol
    Failed(PackError),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    /// Convert to a result for the host boundary; absence becomes `UnresolvedSymbol`
    pub fn into_result(self, symbol: &str, accessor: &str) -> PackResult<SymbolValue> {
        match self {
            Resolution::Found { value, .. } => Ok(value),
            Resolution::Denied(err) | Resolution::Failed(err) => Err(err),
            Resolution::Absent => Err(PackError::UnresolvedSymbol {
                symbol: symbol.to_string(),
                package: accessor.to_string(),
            }),
        }
    }
}

/// Statistics of one boot run
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct BootStats {
    pub session_id: Uuid,
    /// Packages booted by this run, in boot order
    pub boot_order: Vec<PackageName>,
    pub packages_booted: usize,
    pub symbols_indexed: usize,
    /// Namespaces with a defining unit, evaluated eagerly at boot
    pub namespaces_evaluated: usize,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub elapsed: Duration,
}

impl BootStats {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            boot_order: Vec::new(),
            packages_booted: 0,
            symbols_indexed: 0,
            namespaces_evaluated: 0,
            elapsed: Duration::ZERO,
        }
    }
}
