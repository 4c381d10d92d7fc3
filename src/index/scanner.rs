/*!
 * Symbol Scanner
 * Builds a symbol index from a source directory using the inflector convention
 *
 * Files map to symbols (`line_item.rb` -> `LineItem`), directories to namespaces.
 * A directory with a sibling file of the same derived name is an explicit
 * namespace defined by that file; otherwise it is implicit and only exists
 * when something is defined beneath it.
 */

use super::inflector::Inflector;
use super::types::{SymbolEntry, SymbolIndex};
use crate::core::{join_symbol, PackError, PackResult};
use ahash::{HashMap, HashMapExt};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Scanner over source directories
pub struct SymbolScanner<'a> {
    inflector: &'a dyn Inflector,
    excluded: Vec<PathBuf>,
}

impl<'a> SymbolScanner<'a> {
    pub fn new(inflector: &'a dyn Inflector) -> Self {
        Self {
            inflector,
            excluded: Vec::new(),
        }
    }

    /// Skip a directory (and everything below it) during scans
    pub fn exclude(mut self, path: PathBuf) -> Self {
        self.excluded.push(path);
        self
    }

    /// Scan a source root; a missing root yields an empty index
    pub fn scan(&self, root: &Path) -> PackResult<SymbolIndex> {
        let mut index = SymbolIndex::new();
        if root.is_dir() && !self.is_excluded(root) {
            self.scan_dir(root, None, &mut index)?;
        }
        trace!(root = %root.display(), symbols = index.len(), "Scanned source root");
        Ok(index)
    }

    /// Scan several roots into one index
    pub fn scan_all(&self, roots: &[PathBuf]) -> PackResult<SymbolIndex> {
        let mut index = SymbolIndex::new();
        for root in roots {
            index.merge(self.scan(root)?);
        }
        Ok(index)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|excluded| path.starts_with(excluded))
    }

    /// Returns the number of entries added under `dir`
    fn scan_dir(&self, dir: &Path, namespace: Option<&str>, index: &mut SymbolIndex) -> PackResult<usize> {
        let (files, dirs) = self.list_sorted(dir)?;
        let before = index.len();

        let file_symbols: Vec<(String, PathBuf)> = files
            .into_iter()
            .map(|(stem, path)| (join_symbol(namespace, &self.inflector.camelize(&stem)), path))
            .collect();
        let mut files_by_symbol: HashMap<&str, &Path> = HashMap::with_capacity(file_symbols.len());
        for (symbol, path) in &file_symbols {
            files_by_symbol.entry(symbol.as_str()).or_insert(path.as_path());
        }

        for (name, path) in &dirs {
            let symbol = join_symbol(namespace, &self.inflector.camelize(name));
            let sibling = files_by_symbol.get(symbol.as_str()).map(|p| p.to_path_buf());
            let added = self.scan_dir(path, Some(&symbol), index)?;

            if sibling.is_some() || added > 0 {
                index.insert(SymbolEntry::namespace(symbol, sibling));
            }
        }

        for (symbol, path) in file_symbols {
            index.insert(SymbolEntry::concrete(symbol, path));
        }

        Ok(index.len() - before)
    }

    /// Source files (by stem) and subdirectories, sorted, hidden entries skipped
    #[allow(clippy::type_complexity)]
    fn list_sorted(&self, dir: &Path) -> PackResult<(Vec<(String, PathBuf)>, Vec<(String, PathBuf)>)> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();
        let extension = self.inflector.source_extension();

        let entries = std::fs::read_dir(dir).map_err(|e| PackError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| PackError::io(dir, e))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let file_type = entry.file_type().map_err(|e| PackError::io(&path, e))?;
            if file_type.is_dir() {
                if !self.is_excluded(&path) {
                    dirs.push((name, path));
                }
            } else if path.extension().and_then(|e| e.to_str()) == Some(extension) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    files.push((stem.to_string(), path.clone()));
                }
            }
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok((files, dirs))
    }
}
