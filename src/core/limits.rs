/*!
 * System Limits and Constants
 *
 * Centralized location for reserved names, file conventions and capacities.
 * Organized by domain for maintainability and discoverability.
 */

// =============================================================================
// PACKAGE DISCOVERY
// =============================================================================

/// Reserved name of the root package (the project directory itself)
pub const ROOT_PACKAGE_NAME: &str = ".";

/// Per-package configuration file
pub const PACKAGE_CONFIG_FILE: &str = "package.yml";

/// Root-level project configuration file
pub const PROJECT_CONFIG_FILE: &str = "packwerk.yml";

/// Default glob selecting package directories
pub const DEFAULT_PACKAGE_PATH: &str = "**/";

/// Default globs of directories never searched for packages
pub const DEFAULT_EXCLUDE: &[&str] = &["{bin,node_modules,script,tmp,vendor}/**/*"];

// =============================================================================
// SOURCE LAYOUT
// =============================================================================

/// Default public path, relative to the package root
pub const DEFAULT_PUBLIC_PATH: &str = "public/";

/// Default source roots scanned for symbols, relative to the package root
pub const DEFAULT_LOAD_PATHS: &[&str] = &["lib", "public"];

/// Default source file extension understood by the default inflector
pub const DEFAULT_SOURCE_EXTENSION: &str = "rb";

/// Separator between namespace components of a symbol name
pub const NAMESPACE_SEPARATOR: &str = "::";

// =============================================================================
// PUBLIC MARKER
// =============================================================================

/// Comment token marking a file's symbol public regardless of its location
pub const PUBLIC_MARKER: &str = "pack_public: true";

/// Number of leading lines searched for the public marker
pub const PUBLIC_MARKER_SCAN_LINES: usize = 5;

// =============================================================================
// AUDIT
// =============================================================================

/// Maximum resolution events kept in the global ring buffer
pub const MAX_AUDIT_EVENTS: usize = 10_000;

/// Maximum resolution events kept per accessing package
pub const MAX_AUDIT_EVENTS_PER_PACKAGE: usize = 1_000;

/// Boots slower than this are reported at warn level
pub const SLOW_BOOT_THRESHOLD_MS: u128 = 250;
