/*!
 * Cross-Boundary Resolver
 * Missing-symbol hook of one package: searches its dependencies, applies the
 * access policies and materializes the symbol from the providing context
 */

use super::audit::{AuditEvent, AuditOutcome, ResolutionAudit};
use super::registry::BoxRegistry;
use super::traits::SymbolResolver;
use super::types::{Resolution, SymbolValue};
use crate::core::{normalize_symbol, PackError, PackResult, PackageName};
use crate::graph::DependencyGraph;
use crate::package::PackageDescriptor;
use crate::policy::{AccessRequest, PolicyEngine};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Which packages a resolver may search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Declared dependencies only
    Declared,
    /// Declared dependencies first, then every other package in discovery order
    Relaxed,
}

impl SearchScope {
    /// Relaxed unless the package enforces its declared dependencies
    pub fn for_package(package: &PackageDescriptor) -> Self {
        if package.policy.enforce_dependencies {
            SearchScope::Declared
        } else {
            SearchScope::Relaxed
        }
    }
}

pub struct CrossBoundaryResolver {
    accessor: Arc<PackageDescriptor>,
    scope: SearchScope,
    /// Packages searched, in search order
    candidates: Vec<PackageName>,
    registry: Weak<BoxRegistry>,
    policies: Arc<PolicyEngine>,
    audit: Arc<ResolutionAudit>,
}

impl CrossBoundaryResolver {
    pub fn new(
        accessor: Arc<PackageDescriptor>,
        graph: &DependencyGraph,
        scope: SearchScope,
        registry: Weak<BoxRegistry>,
        policies: Arc<PolicyEngine>,
        audit: Arc<ResolutionAudit>,
    ) -> Self {
        let mut candidates = accessor.dependencies.clone();
        if scope == SearchScope::Relaxed {
            for name in graph.package_names() {
                if name != accessor.name && !candidates.contains(&name) {
                    candidates.push(name);
                }
            }
        }

        Self {
            accessor,
            scope,
            candidates,
            registry,
            policies,
            audit,
        }
    }

    pub fn accessor(&self) -> &PackageDescriptor {
        &self.accessor
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn candidates(&self) -> &[PackageName] {
        &self.candidates
    }

    /// Search the candidates in order; the first package defining the symbol decides
    pub fn resolve(&self, symbol: &str) -> Resolution {
        let symbol = normalize_symbol(symbol);
        let resolution = self.search(symbol);

        match &resolution {
            Resolution::Found { provider, .. } => {
                debug!(accessor = %self.accessor.name, symbol, provider = %provider, "Symbol resolved")
            }
            Resolution::Denied(err) => {
                warn!(accessor = %self.accessor.name, symbol, error = %err, "Symbol access denied")
            }
            Resolution::Absent => debug!(accessor = %self.accessor.name, symbol, "Symbol not found"),
            Resolution::Failed(err) => {
                warn!(accessor = %self.accessor.name, symbol, error = %err, "Symbol materialization failed")
            }
        }

        self.audit.log(AuditEvent::new(
            self.accessor.name.clone(),
            symbol,
            AuditOutcome::from(&resolution),
        ));
        resolution
    }

    fn search(&self, symbol: &str) -> Resolution {
        let Some(registry) = self.registry.upgrade() else {
            return Resolution::Failed(PackError::HostFailure {
                package: self.accessor.name.clone(),
                reason: "package registry is no longer available".into(),
            });
        };

        for name in &self.candidates {
            // Not booted yet; only possible for relaxed candidates
            let Some(dependency) = registry.get(name) else {
                continue;
            };
            if !dependency.provides(symbol) {
                continue;
            }

            let request = AccessRequest::new(
                symbol,
                &dependency.descriptor,
                &self.accessor,
                &dependency.public_symbols,
            );
            if let Err(err) = self.policies.check(&request) {
                return Resolution::Denied(err);
            }

            return match dependency.materialize(symbol) {
                Ok(value) => Resolution::Found {
                    value,
                    provider: dependency.descriptor.name.clone(),
                },
                Err(err) => Resolution::Failed(err),
            };
        }

        Resolution::Absent
    }
}

impl SymbolResolver for CrossBoundaryResolver {
    fn resolve_missing(&self, symbol: &str) -> PackResult<SymbolValue> {
        self.resolve(symbol).into_result(normalize_symbol(symbol), &self.accessor.name)
    }
}

impl std::fmt::Debug for CrossBoundaryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossBoundaryResolver")
            .field("accessor", &self.accessor.name)
            .field("scope", &self.scope)
            .field("candidates", &self.candidates)
            .finish()
    }
}
