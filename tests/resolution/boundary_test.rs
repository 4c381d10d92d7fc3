/*!
 * Boundary Tests
 * Direct-dependency search, declaration-order tie-breaking and relaxed mode
 */

use crate::fixture::Project;
use packbox::PackError;
use pretty_assertions::assert_eq;

fn diamond() -> Project {
    let project = Project::new();
    project
        .package("packs/a", "enforce_dependencies: true\ndependencies:\n  - packs/b\n  - packs/c\n")
        .package("packs/b", "enforce_dependencies: true\ndependencies:\n  - packs/d\n")
        .package("packs/c", "enforce_dependencies: true\ndependencies:\n  - packs/d\n")
        .package("packs/d", "enforce_dependencies: true\n")
        .file("packs/b/lib/gadget.rb", "class Gadget; end\n")
        .file("packs/c/lib/gizmo.rb", "class Gizmo; end\n")
        .file("packs/d/lib/widget.rb", "class Widget; end\n");
    project
}

#[test]
fn test_direct_dependencies_resolve() {
    let project = diamond();
    let booted = project.boot();

    let gadget = booted.orchestrator.resolve("packs/a", "Gadget").unwrap();
    let gizmo = booted.orchestrator.resolve("packs/a", "::Gizmo").unwrap();

    assert_eq!(gadget.owner, "packs/b");
    assert_eq!(gizmo.owner, "packs/c");
}

#[test]
fn test_transitive_dependency_is_invisible_in_a_diamond() {
    let project = diamond();
    let booted = project.boot();

    let err = booted.orchestrator.resolve("packs/a", "Widget").unwrap_err();
    assert_eq!(
        err,
        PackError::UnresolvedSymbol {
            symbol: "Widget".into(),
            package: "packs/a".into()
        }
    );
    assert!(!err.is_policy_denial());
}

#[test]
fn test_imported_symbols_are_not_re_exported() {
    let project = diamond();
    let booted = project.boot();

    // b imports Widget from d; the binding now lives in b's context
    let widget = booted.orchestrator.resolve("packs/b", "Widget").unwrap();
    assert_eq!(widget.owner, "packs/d");
    assert!(booted.orchestrator.context("packs/b").unwrap().is_bound("Widget"));

    let err = booted.orchestrator.resolve("packs/a", "Widget").unwrap_err();
    assert!(matches!(err, PackError::UnresolvedSymbol { .. }));
}

#[test]
fn test_first_declared_dependency_wins() {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\ndependencies:\n  - packs/zeta\n  - packs/alpha\n")
        .package("packs/alpha", "")
        .package("packs/zeta", "")
        .file("packs/alpha/lib/shared.rb", "")
        .file("packs/zeta/lib/shared.rb", "");
    let booted = project.boot();

    let shared = booted.orchestrator.resolve("packs/app", "Shared").unwrap();
    assert_eq!(shared.owner, "packs/zeta");
}

#[test]
fn test_relaxed_package_searches_every_package() {
    let project = Project::new();
    project
        .package("packs/loose", "")
        .package("packs/strict", "enforce_dependencies: true\n")
        .package("packs/tools", "")
        .file("packs/tools/lib/hammer.rb", "");
    let booted = project.boot();

    let hammer = booted.orchestrator.resolve("packs/loose", "Hammer").unwrap();
    assert_eq!(hammer.owner, "packs/tools");

    let err = booted.orchestrator.resolve("packs/strict", "Hammer").unwrap_err();
    assert!(matches!(err, PackError::UnresolvedSymbol { .. }));
}

#[test]
fn test_namespace_prefix_and_nested_symbols() {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\ndependencies:\n  - packs/reporting\n")
        .package("packs/reporting", "")
        .file("packs/reporting/lib/reports/monthly_summary.rb", "");
    let booted = project.boot();

    let namespace = booted.orchestrator.resolve("packs/app", "Reports").unwrap();
    assert!(namespace.is_namespace());
    assert_eq!(namespace.unit, None);

    let nested = booted.orchestrator.resolve("packs/app", "Reports::MonthlySummary").unwrap();
    assert!(!nested.is_namespace());
    assert_eq!(nested.owner, "packs/reporting");
}

#[test]
fn test_own_symbols_resolve_without_the_hook() {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\n")
        .file("packs/app/lib/checkout.rb", "");
    let booted = project.boot();

    let checkout = booted.orchestrator.resolve("packs/app", "Checkout").unwrap();
    assert_eq!(checkout.owner, "packs/app");
    assert!(booted.orchestrator.audit().recent(10).is_empty());
}

#[test]
fn test_unknown_accessor_is_reported() {
    let project = diamond();
    let booted = project.boot();
    let err = booted.orchestrator.resolve("packs/ghost", "Widget").unwrap_err();
    assert!(matches!(err, PackError::HostFailure { .. }));
}
