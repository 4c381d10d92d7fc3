/*!
 * Symbol Index Types
 * Per-package map from symbol name to defining source unit or namespace status
 */

use crate::core::parent_symbol;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One indexed symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    /// Source unit defining the symbol; `None` for implicit namespaces
    pub defining_unit: Option<PathBuf>,
    pub is_namespace: bool,
}

impl SymbolEntry {
    pub fn concrete(name: impl Into<String>, unit: PathBuf) -> Self {
        Self {
            name: name.into(),
            defining_unit: Some(unit),
            is_namespace: false,
        }
    }

    pub fn namespace(name: impl Into<String>, unit: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            defining_unit: unit,
            is_namespace: true,
        }
    }

    /// Namespace with no defining unit of its own
    pub fn is_implicit_namespace(&self) -> bool {
        self.is_namespace && self.defining_unit.is_none()
    }
}

/// Symbol index of one package.
///
/// Ordered by name, so every namespace precedes the symbols nested under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolIndex {
    entries: BTreeMap<String, SymbolEntry>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, merging with an existing entry of the same name.
    ///
    /// A file/directory pair collapses into one namespace entry that keeps the
    /// file as its defining unit. Between two defining units the first wins.
    pub fn insert(&mut self, entry: SymbolEntry) {
        match self.entries.get_mut(&entry.name) {
            None => {
                self.entries.insert(entry.name.clone(), entry);
            }
            Some(existing) => {
                existing.is_namespace |= entry.is_namespace;
                match (&existing.defining_unit, entry.defining_unit) {
                    (None, unit) => existing.defining_unit = unit,
                    (Some(kept), Some(other)) if kept != &other => {
                        warn!(
                            symbol = %existing.name,
                            kept = %kept.display(),
                            ignored = %other.display(),
                            "Symbol defined by more than one source unit"
                        );
                    }
                    _ => {}
                }
            }
        }
    }

    /// Merge another index into this one
    pub fn merge(&mut self, other: SymbolIndex) {
        for (_, entry) in other.entries {
            self.insert(entry);
        }
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether any entry is nested under `prefix`
    pub fn contains_nested(&self, prefix: &str) -> bool {
        let start = format!("{prefix}::");
        self.entries
            .range(start.clone()..)
            .next()
            .is_some_and(|(name, _)| name.starts_with(&start))
    }

    /// Entry itself, or nested entries under it
    pub fn covers(&self, name: &str) -> bool {
        self.contains(name) || self.contains_nested(name)
    }

    /// Defining unit of the entry, or of its nearest ancestor namespace that has one
    pub fn defining_unit_for(&self, name: &str) -> Option<&Path> {
        let mut current = Some(name);
        while let Some(symbol) = current {
            if let Some(unit) = self.entries.get(symbol).and_then(|e| e.defining_unit.as_deref()) {
                return Some(unit);
            }
            current = parent_symbol(symbol);
        }
        None
    }

    /// Entries in name order (parents before children)
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name -> path table of entries that have a defining unit
    pub fn file_index(&self) -> BTreeMap<String, PathBuf> {
        build_file_index(self.iter())
    }
}

/// Flatten entries with a defining unit into a name -> path table
pub fn build_file_index<'a>(entries: impl IntoIterator<Item = &'a SymbolEntry>) -> BTreeMap<String, PathBuf> {
    entries
        .into_iter()
        .filter_map(|e| e.defining_unit.as_ref().map(|unit| (e.name.clone(), unit.clone())))
        .collect()
}
