/*!
 * Symbol Index Module
 * Scans package source trees into symbol indexes
 */

pub mod inflector;
pub mod public;
pub mod scanner;
pub mod types;

pub use inflector::{DefaultInflector, Inflector};
pub use public::{has_public_marker, PublicSymbols};
pub use scanner::SymbolScanner;
pub use types::{build_file_index, SymbolEntry, SymbolIndex};
