/*!
 * Graph Module
 * Declared-dependency graph over discovered packages
 */

pub mod dependency;

pub use dependency::DependencyGraph;
