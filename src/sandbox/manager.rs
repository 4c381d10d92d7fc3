/*!
 * Sandbox Orchestrator
 * Boots packages into isolated contexts in dependency order and wires their resolvers
 */

use super::audit::ResolutionAudit;
use super::registry::{BoxRegistry, PackageBox};
use super::resolver::{CrossBoundaryResolver, SearchScope};
use super::traits::{ExecutionContext, Host, LibraryIsolation, NoLibraryIsolation};
use super::types::{BootStats, SymbolKind, SymbolValue};
use crate::core::{PackError, PackResult};
use crate::graph::DependencyGraph;
use crate::index::{DefaultInflector, Inflector, PublicSymbols, SymbolIndex, SymbolScanner};
use crate::monitoring::BootSpan;
use crate::package::PackageDescriptor;
use crate::policy::{LayerPolicy, PolicyEngine};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Scanned symbols of one package
struct ScannedPackage {
    index: SymbolIndex,
    public_symbols: PublicSymbols,
}

/// Boots packages and owns their boxes
pub struct SandboxOrchestrator {
    host: Arc<dyn Host>,
    inflector: Arc<dyn Inflector>,
    isolation: Arc<dyn LibraryIsolation>,
    policies: Arc<PolicyEngine>,
    registry: Arc<BoxRegistry>,
    audit: Arc<ResolutionAudit>,
    session_id: Uuid,
}

impl SandboxOrchestrator {
    /// Fails when the host cannot provide isolated contexts
    pub fn new(host: Arc<dyn Host>) -> PackResult<Self> {
        if !host.is_supported() {
            return Err(PackError::HostCapabilityMissing {
                reason: format!("{:?} host does not support isolated execution contexts", host.platform()),
            });
        }

        let session_id = Uuid::new_v4();
        info!(session = %session_id, platform = ?host.platform(), "Sandbox orchestrator initialized");
        Ok(Self {
            host,
            inflector: Arc::new(DefaultInflector::new()),
            isolation: Arc::new(NoLibraryIsolation),
            policies: Arc::new(PolicyEngine::new()),
            registry: Arc::new(BoxRegistry::new()),
            audit: Arc::new(ResolutionAudit::new()),
            session_id,
        })
    }

    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.inflector = inflector;
        self
    }

    pub fn with_isolation(mut self, isolation: Arc<dyn LibraryIsolation>) -> Self {
        self.isolation = isolation;
        self
    }

    pub fn with_policies(mut self, policies: PolicyEngine) -> Self {
        self.policies = Arc::new(policies);
        self
    }

    /// Boot every package in topological order
    pub fn boot_all(&self, graph: &DependencyGraph) -> PackResult<BootStats> {
        let start = Instant::now();
        let mut stats = BootStats::new(self.session_id);

        for package in graph.topological_order() {
            self.boot_package(graph, &package, &mut stats)?;
        }

        stats.elapsed = start.elapsed();
        info!(
            session = %self.session_id,
            packages = stats.packages_booted,
            symbols = stats.symbols_indexed,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "All packages booted"
        );
        Ok(stats)
    }

    /// Boot one package, booting its missing dependencies first; no-op if already booted
    pub fn boot(&self, graph: &DependencyGraph, package: &Arc<PackageDescriptor>) -> PackResult<BootStats> {
        let start = Instant::now();
        let mut stats = BootStats::new(self.session_id);
        self.boot_package(graph, package, &mut stats)?;
        stats.elapsed = start.elapsed();
        Ok(stats)
    }

    fn boot_package(
        &self,
        graph: &DependencyGraph,
        package: &Arc<PackageDescriptor>,
        stats: &mut BootStats,
    ) -> PackResult<()> {
        if self.registry.contains(&package.name) {
            return Ok(());
        }

        let dependencies = graph.dependencies_of(&package.name);
        for dependency in &dependencies {
            LayerPolicy::validate(package, dependency, graph.layers())?;
        }
        for dependency in &dependencies {
            self.boot_package(graph, dependency, stats)?;
        }

        let span = BootSpan::new(&package.name);
        let result = self.create_box(graph, package);
        let package_box = match result {
            Ok(package_box) => package_box,
            Err(e) => {
                span.record_error(&e.to_string());
                return Err(e);
            }
        };

        let namespaces = package_box.index.iter().filter(|e| e.is_namespace && e.defining_unit.is_some()).count();
        span.record_symbols(package_box.index.len(), namespaces);

        stats.boot_order.push(package.name.clone());
        stats.packages_booted += 1;
        stats.symbols_indexed += package_box.index.len();
        stats.namespaces_evaluated += namespaces;
        Ok(())
    }

    fn create_box(&self, graph: &DependencyGraph, package: &Arc<PackageDescriptor>) -> PackResult<Arc<PackageBox>> {
        let context = self.host.create_context(package)?;
        self.isolation.isolate(package, context.as_ref())?;

        let scanned = self.scan(package)?;
        install_bindings(context.as_ref(), &scanned.index)?;

        let scope = SearchScope::for_package(package);
        let resolver = CrossBoundaryResolver::new(
            Arc::clone(package),
            graph,
            scope,
            Arc::downgrade(&self.registry),
            Arc::clone(&self.policies),
            Arc::clone(&self.audit),
        );
        context.set_missing_symbol_hook(Arc::new(resolver));

        info!(
            package = %package.name,
            context = %context.id(),
            symbols = scanned.index.len(),
            public = scanned.public_symbols.len(),
            scope = ?scope,
            "Package booted"
        );

        Ok(self.registry.insert(PackageBox {
            descriptor: Arc::clone(package),
            context,
            index: Arc::new(scanned.index),
            public_symbols: Arc::new(scanned.public_symbols),
        }))
    }

    /// Scan the primary roots and, when privacy is enforced, the public root separately
    fn scan(&self, package: &PackageDescriptor) -> PackResult<ScannedPackage> {
        if !package.policy.enforce_privacy {
            let index = SymbolScanner::new(self.inflector.as_ref()).scan_all(&package.load_roots())?;
            return Ok(ScannedPackage {
                index,
                public_symbols: PublicSymbols::default(),
            });
        }

        let public_root = package.public_root();
        let mut index = SymbolScanner::new(self.inflector.as_ref())
            .exclude(public_root.clone())
            .scan_all(&package.load_roots())?;
        let public_index = SymbolScanner::new(self.inflector.as_ref()).scan(&public_root)?;
        let public_symbols = PublicSymbols::compute(&public_index, &index)?;

        debug!(
            package = %package.name,
            public_root = %public_root.display(),
            public = public_symbols.len(),
            "Public symbols computed"
        );

        index.merge(public_index);
        Ok(ScannedPackage { index, public_symbols })
    }

    /// Reference `symbol` from inside `accessor`'s context
    pub fn resolve(&self, accessor: &str, symbol: &str) -> PackResult<SymbolValue> {
        let package_box = self.registry.get(accessor).ok_or_else(|| PackError::HostFailure {
            package: accessor.to_string(),
            reason: "package is not booted".into(),
        })?;
        package_box.context.resolve(symbol)
    }

    pub fn package_box(&self, name: &str) -> Option<Arc<PackageBox>> {
        self.registry.get(name)
    }

    pub fn context(&self, name: &str) -> Option<Arc<dyn ExecutionContext>> {
        self.registry.get(name).map(|b| Arc::clone(&b.context))
    }

    pub fn is_booted(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn booted_packages(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn audit(&self) -> &ResolutionAudit {
        &self.audit
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }
}

/// Lazy bindings for concrete symbols, eager evaluation for namespaces with a
/// defining unit, empty containers for implicit namespaces.
///
/// Entries come in name order, so a namespace is materialized before anything
/// nested under it.
fn install_bindings(context: &dyn ExecutionContext, index: &SymbolIndex) -> PackResult<()> {
    for entry in index.iter() {
        match (&entry.defining_unit, entry.is_namespace) {
            (Some(unit), false) => context.bind_lazy(&entry.name, unit, SymbolKind::Concrete),
            (Some(unit), true) => {
                context.bind_lazy(&entry.name, unit, SymbolKind::Namespace);
                context.evaluate(unit)?;
            }
            (None, _) => {
                context.define_namespace(&entry.name);
            }
        }
    }
    Ok(())
}

/// Build the graph under `root` and boot every package on `host`
pub fn boot_project(
    root: &Path,
    host: Arc<dyn Host>,
) -> PackResult<(DependencyGraph, SandboxOrchestrator, BootStats)> {
    let graph = DependencyGraph::build(root)?;
    let orchestrator = SandboxOrchestrator::new(host)?;
    let stats = orchestrator.boot_all(&graph)?;
    Ok((graph, orchestrator, stats))
}
