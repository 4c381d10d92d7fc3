/*!
 * Simulated Host
 * In-process execution contexts backed by explicit symbol maps
 *
 * Each context keeps its own binding table, a table of lazily defined symbols
 * and the missing-symbol hook. Evaluating a unit binds every symbol registered
 * for it and is counted, so callers can observe that a unit is evaluated at
 * most once per context.
 */

use super::traits::{ExecutionContext, Host, SymbolResolver};
use super::types::{ContextId, HostPlatform, MaterializedSymbol, SymbolKind, SymbolValue};
use crate::core::{normalize_symbol, PackError, PackResult, PackageName};
use crate::package::PackageDescriptor;
use ahash::{HashMap, HashSet, RandomState};
use dashmap::DashMap;
use log::info;
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

type EvaluationCounts = DashMap<(ContextId, PathBuf), u64, RandomState>;

/// Simulation-based host
/// Provides the context API without a native isolation primitive
pub struct SimulatedHost {
    supported: bool,
    next_id: Arc<AtomicU64>,
    contexts: Arc<DashMap<ContextId, Arc<SimulatedContext>, RandomState>>,
    evaluations: Arc<EvaluationCounts>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        info!("Package host initialized (simulation mode)");
        Self::with_support(true)
    }

    /// Host reporting no isolation capability
    pub fn unsupported() -> Self {
        Self::with_support(false)
    }

    fn with_support(supported: bool) -> Self {
        Self {
            supported,
            next_id: Arc::new(AtomicU64::new(1)),
            contexts: Arc::new(DashMap::with_hasher(RandomState::new())),
            evaluations: Arc::new(DashMap::with_hasher(RandomState::new())),
        }
    }

    /// How many times `unit` was evaluated inside context `id`
    pub fn evaluation_count(&self, id: ContextId, unit: &Path) -> u64 {
        self.evaluations
            .get(&(id, unit.to_path_buf()))
            .map(|count| *count)
            .unwrap_or(0)
    }

    /// Total unit evaluations inside context `id`
    pub fn total_evaluations(&self, id: ContextId) -> u64 {
        self.evaluations
            .iter()
            .filter(|entry| entry.key().0 == id)
            .map(|entry| *entry.value())
            .sum()
    }

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Context by id
    pub fn context(&self, id: ContextId) -> Option<Arc<SimulatedContext>> {
        self.contexts.get(&id).map(|c| Arc::clone(c.value()))
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SimulatedHost {
    fn clone(&self) -> Self {
        Self {
            supported: self.supported,
            next_id: Arc::clone(&self.next_id),
            contexts: Arc::clone(&self.contexts),
            evaluations: Arc::clone(&self.evaluations),
        }
    }
}

impl Host for SimulatedHost {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn platform(&self) -> HostPlatform {
        HostPlatform::Simulation
    }

    fn create_context(&self, package: &PackageDescriptor) -> PackResult<Arc<dyn ExecutionContext>> {
        if !self.supported {
            return Err(PackError::HostCapabilityMissing {
                reason: "simulated host was created without isolation support".into(),
            });
        }

        let id = ContextId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let context = Arc::new(SimulatedContext::new(
            id,
            package.name.clone(),
            Arc::clone(&self.evaluations),
        ));
        self.contexts.insert(id, Arc::clone(&context));

        debug!(context = %id, package = %package.name, "Created simulated context");
        Ok(context)
    }
}

/// Lazily defined symbol
#[derive(Debug, Clone)]
struct LazyBinding {
    unit: PathBuf,
    kind: SymbolKind,
}

/// One simulated execution context
pub struct SimulatedContext {
    id: ContextId,
    owner: PackageName,
    bindings: RwLock<HashMap<String, SymbolValue>>,
    lazy: RwLock<HashMap<String, LazyBinding>>,
    /// Symbols each unit defines when evaluated, in registration order
    unit_symbols: RwLock<HashMap<PathBuf, Vec<String>>>,
    /// Held for the whole evaluation of a unit
    evaluated: Mutex<HashSet<PathBuf>>,
    hook: RwLock<Option<Arc<dyn SymbolResolver>>>,
    evaluations: Arc<EvaluationCounts>,
}

impl SimulatedContext {
    fn new(id: ContextId, owner: PackageName, evaluations: Arc<EvaluationCounts>) -> Self {
        Self {
            id,
            owner,
            bindings: RwLock::new(HashMap::default()),
            lazy: RwLock::new(HashMap::default()),
            unit_symbols: RwLock::new(HashMap::default()),
            evaluated: Mutex::new(HashSet::default()),
            hook: RwLock::new(None),
            evaluations,
        }
    }

    /// Names currently bound, sorted
    pub fn bound_symbols(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_evaluated(&self, unit: &Path) -> bool {
        self.evaluated.lock().contains(unit)
    }

    fn materialize(&self, name: &str, unit: Option<PathBuf>, kind: SymbolKind) -> SymbolValue {
        Arc::new(MaterializedSymbol {
            name: name.to_string(),
            owner: self.owner.clone(),
            unit,
            kind,
            context: self.id,
        })
    }
}

impl ExecutionContext for SimulatedContext {
    fn id(&self) -> ContextId {
        self.id
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn lookup(&self, symbol: &str) -> Option<SymbolValue> {
        self.bindings.read().get(normalize_symbol(symbol)).cloned()
    }

    fn bind(&self, value: SymbolValue) {
        self.bindings.write().insert(value.name.clone(), value);
    }

    fn bind_lazy(&self, symbol: &str, unit: &Path, kind: SymbolKind) {
        let symbol = normalize_symbol(symbol).to_string();
        self.unit_symbols
            .write()
            .entry(unit.to_path_buf())
            .or_default()
            .push(symbol.clone());
        self.lazy.write().insert(
            symbol,
            LazyBinding {
                unit: unit.to_path_buf(),
                kind,
            },
        );
    }

    fn define_namespace(&self, symbol: &str) -> SymbolValue {
        let symbol = normalize_symbol(symbol);
        let mut bindings = self.bindings.write();
        if let Some(existing) = bindings.get(symbol) {
            return Arc::clone(existing);
        }
        let value = self.materialize(symbol, None, SymbolKind::Namespace);
        bindings.insert(symbol.to_string(), Arc::clone(&value));
        value
    }

    fn evaluate(&self, unit: &Path) -> PackResult<()> {
        let mut evaluated = self.evaluated.lock();
        if evaluated.contains(unit) {
            return Ok(());
        }

        std::fs::metadata(unit).map_err(|e| PackError::HostFailure {
            package: self.owner.clone(),
            reason: format!("cannot evaluate {}: {}", unit.display(), e),
        })?;

        let symbols = self.unit_symbols.read().get(unit).cloned().unwrap_or_default();
        {
            let lazy = self.lazy.read();
            let mut bindings = self.bindings.write();
            for name in &symbols {
                let kind = lazy.get(name).map(|b| b.kind).unwrap_or(SymbolKind::Concrete);
                bindings
                    .entry(name.clone())
                    .or_insert_with(|| self.materialize(name, Some(unit.to_path_buf()), kind));
            }
        }

        evaluated.insert(unit.to_path_buf());
        *self
            .evaluations
            .entry((self.id, unit.to_path_buf()))
            .or_insert(0) += 1;

        trace!(context = %self.id, unit = %unit.display(), symbols = symbols.len(), "Evaluated unit");
        Ok(())
    }

    fn set_missing_symbol_hook(&self, hook: Arc<dyn SymbolResolver>) {
        *self.hook.write() = Some(hook);
    }

    fn resolve(&self, symbol: &str) -> PackResult<SymbolValue> {
        let symbol = normalize_symbol(symbol);

        if let Some(value) = self.lookup(symbol) {
            return Ok(value);
        }

        let lazy_unit = self.lazy.read().get(symbol).map(|b| b.unit.clone());
        if let Some(unit) = lazy_unit {
            self.evaluate(&unit)?;
            if let Some(value) = self.lookup(symbol) {
                return Ok(value);
            }
        }

        // Clone out of the lock; the hook reaches into other contexts
        let hook = self.hook.read().clone();
        if let Some(hook) = hook {
            let value = hook.resolve_missing(symbol)?;
            self.bindings
                .write()
                .entry(symbol.to_string())
                .or_insert_with(|| Arc::clone(&value));
            return Ok(value);
        }

        Err(PackError::UnresolvedSymbol {
            symbol: symbol.to_string(),
            package: self.owner.clone(),
        })
    }
}
