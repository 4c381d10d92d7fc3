/*!
 * Policy Types
 * Requests, decisions and the access-policy trait
 */

use crate::core::{PackError, PolicyKind};
use crate::index::PublicSymbols;
use crate::package::PackageDescriptor;

/// Policy decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Deny(PackError),
    /// Policy not enforced by the target package
    Abstain,
}

impl PolicyDecision {
    pub fn is_denied(&self) -> bool {
        matches!(self, PolicyDecision::Deny(_))
    }
}

/// A cross-package reference under evaluation
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    /// Fully qualified symbol name
    pub symbol: &'a str,
    /// Package defining the symbol
    pub target: &'a PackageDescriptor,
    /// Package referencing the symbol
    pub accessor: &'a PackageDescriptor,
    /// Public-symbol set of the target
    pub public_symbols: &'a PublicSymbols,
}

impl<'a> AccessRequest<'a> {
    pub fn new(
        symbol: &'a str,
        target: &'a PackageDescriptor,
        accessor: &'a PackageDescriptor,
        public_symbols: &'a PublicSymbols,
    ) -> Self {
        Self {
            symbol,
            target,
            accessor,
            public_symbols,
        }
    }
}

/// Independent, stateless access check applied at resolution time
pub trait AccessPolicy: Send + Sync {
    /// Evaluate a request
    fn evaluate(&self, request: &AccessRequest<'_>) -> PolicyDecision;

    /// Policy kind
    fn kind(&self) -> PolicyKind;
}
