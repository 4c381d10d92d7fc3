/*!
 * Core Types
 * Common types and symbol-name helpers used across the crate
 */

use super::limits::NAMESPACE_SEPARATOR;

/// Package name: cleaned path relative to the project root, or "."
pub type PackageName = String;

/// Common result type for package operations
pub type PackResult<T> = Result<T, super::errors::PackError>;

/// Strip a leading root qualifier ("::Billing" -> "Billing")
pub fn normalize_symbol(name: &str) -> &str {
    name.trim_start_matches(NAMESPACE_SEPARATOR)
}

/// Join a namespace and a child component
pub fn join_symbol(namespace: Option<&str>, child: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}{NAMESPACE_SEPARATOR}{child}"),
        _ => child.to_string(),
    }
}

/// Enclosing namespace of a symbol, if any
pub fn parent_symbol(name: &str) -> Option<&str> {
    name.rfind(NAMESPACE_SEPARATOR).map(|idx| &name[..idx])
}

/// Whether `name` is strictly nested under namespace `prefix`
pub fn is_nested_under(name: &str, prefix: &str) -> bool {
    name.len() > prefix.len() + NAMESPACE_SEPARATOR.len()
        && name.starts_with(prefix)
        && name[prefix.len()..].starts_with(NAMESPACE_SEPARATOR)
}

/// Whether `name` equals `other` or is nested under it
pub fn is_same_or_nested(name: &str, other: &str) -> bool {
    name == other || is_nested_under(name, other)
}
