/*!
 * Inflector
 * File-name to symbol-name convention
 */

use crate::core::limits::DEFAULT_SOURCE_EXTENSION;
use ahash::HashMap;

/// Naming convention mapping path segments to symbol components
pub trait Inflector: Send + Sync {
    /// `snake_case` basename (no extension) to a symbol component
    fn camelize(&self, basename: &str) -> String;

    /// Extension of source files, without the dot
    fn source_extension(&self) -> &str {
        DEFAULT_SOURCE_EXTENSION
    }
}

/// snake_case -> CamelCase with an override table for acronyms
#[derive(Debug, Clone, Default)]
pub struct DefaultInflector {
    overrides: HashMap<String, String>,
}

impl DefaultInflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a basename to a fixed symbol component, e.g. `html_parser` -> `HTMLParser`
    pub fn with_override(mut self, basename: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.overrides.insert(basename.into(), symbol.into());
        self
    }
}

impl Inflector for DefaultInflector {
    fn camelize(&self, basename: &str) -> String {
        if let Some(symbol) = self.overrides.get(basename) {
            return symbol.clone();
        }

        basename
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }
}
