/*!
 * Public Symbols
 * Public-path entries plus files carrying the public marker comment
 */

use super::types::SymbolIndex;
use crate::core::limits::{PUBLIC_MARKER, PUBLIC_MARKER_SCAN_LINES};
use crate::core::{is_nested_under, PackError, PackResult};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Whether a source file declares itself public in its leading comment lines
pub fn has_public_marker(path: &Path) -> PackResult<bool> {
    let file = std::fs::File::open(path).map_err(|e| PackError::io(path, e))?;
    for line in BufReader::new(file).lines().take(PUBLIC_MARKER_SCAN_LINES) {
        let line = line.map_err(|e| PackError::io(path, e))?;
        let line = line.trim();
        if line.starts_with('#') && line.trim_start_matches('#').trim() == PUBLIC_MARKER {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Computed public-symbol set of a package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublicSymbols {
    symbols: BTreeSet<String>,
}

impl PublicSymbols {
    /// Public set = every defined entry of the public root, plus marked files elsewhere.
    ///
    /// Implicit namespaces are left out; they stay reachable as prefixes of
    /// their public children without making their other children public.
    pub fn compute(public_index: &SymbolIndex, primary_index: &SymbolIndex) -> PackResult<Self> {
        let mut symbols: BTreeSet<String> = public_index
            .iter()
            .filter(|entry| !entry.is_implicit_namespace())
            .map(|entry| entry.name.clone())
            .collect();

        for entry in primary_index.iter() {
            if let Some(unit) = &entry.defining_unit {
                if has_public_marker(unit)? {
                    symbols.insert(entry.name.clone());
                }
            }
        }

        Ok(Self { symbols })
    }

    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Public when listed or a namespace prefix of a listed symbol.
    ///
    /// Children of a public namespace are not public unless listed themselves.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol) || self.symbols.iter().any(|public| is_nested_under(public, symbol))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}
