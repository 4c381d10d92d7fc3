/*!
 * Box Registry
 * Booted packages: descriptor, context, symbol index and public set
 */

use super::traits::ExecutionContext;
use super::types::SymbolValue;
use crate::core::{PackError, PackResult, PackageName};
use crate::index::{PublicSymbols, SymbolIndex};
use crate::package::PackageDescriptor;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;

/// One booted package
pub struct PackageBox {
    pub descriptor: Arc<PackageDescriptor>,
    pub context: Arc<dyn ExecutionContext>,
    pub index: Arc<SymbolIndex>,
    pub public_symbols: Arc<PublicSymbols>,
}

impl PackageBox {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Whether this package defines `symbol`, directly or as a namespace prefix.
    ///
    /// A symbol bound in the context only counts when this package owns it;
    /// what it imported from its own dependencies is not re-exported.
    pub fn provides(&self, symbol: &str) -> bool {
        self.index.covers(symbol)
            || self
                .context
                .lookup(symbol)
                .is_some_and(|value| value.owner == self.descriptor.name)
    }

    /// Bound value, evaluating the defining unit inside this package's context if needed
    pub fn materialize(&self, symbol: &str) -> PackResult<SymbolValue> {
        if let Some(value) = self.context.lookup(symbol) {
            return Ok(value);
        }

        if let Some(unit) = self.index.defining_unit_for(symbol) {
            self.context.evaluate(unit)?;
            if let Some(value) = self.context.lookup(symbol) {
                return Ok(value);
            }
            return Err(PackError::HostFailure {
                package: self.descriptor.name.clone(),
                reason: format!("evaluating {} did not define {}", unit.display(), symbol),
            });
        }

        Err(PackError::HostFailure {
            package: self.descriptor.name.clone(),
            reason: format!("no defining unit for {symbol}"),
        })
    }
}

impl std::fmt::Debug for PackageBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageBox")
            .field("package", &self.descriptor.name)
            .field("context", &self.context.id())
            .field("symbols", &self.index.len())
            .field("public", &self.public_symbols.len())
            .finish()
    }
}

/// Registry of booted packages by name
#[derive(Debug)]
pub struct BoxRegistry {
    boxes: DashMap<PackageName, Arc<PackageBox>, RandomState>,
}

impl BoxRegistry {
    pub fn new() -> Self {
        Self {
            boxes: DashMap::with_hasher(RandomState::new()),
        }
    }

    pub fn insert(&self, package_box: PackageBox) -> Arc<PackageBox> {
        let package_box = Arc::new(package_box);
        self.boxes
            .insert(package_box.descriptor.name.clone(), Arc::clone(&package_box));
        package_box
    }

    /// Owned handle; no map guard outlives the call
    pub fn get(&self, name: &str) -> Option<Arc<PackageBox>> {
        self.boxes.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.boxes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Names of booted packages, sorted
    pub fn names(&self) -> Vec<PackageName> {
        let mut names: Vec<PackageName> = self.boxes.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl Default for BoxRegistry {
    fn default() -> Self {
        Self::new()
    }
}
