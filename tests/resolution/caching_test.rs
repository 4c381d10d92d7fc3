/*!
 * Materialization Caching Tests
 * A symbol is materialized once per context and its unit evaluated once
 */

use crate::fixture::Project;
use packbox::sandbox::AuditOutcome;
use std::sync::Arc;

fn project() -> Project {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\ndependencies:\n  - packs/billing\n")
        .package("packs/admin", "enforce_dependencies: true\ndependencies:\n  - packs/billing\n")
        .package("packs/billing", "")
        .file("packs/billing/lib/invoice.rb", "class Invoice; end\n");
    project
}

#[test]
fn test_repeat_resolution_returns_same_value_without_reevaluation() {
    let project = project();
    let booted = project.boot();
    let unit = project.path("packs/billing/lib/invoice.rb");
    let billing = booted.orchestrator.context("packs/billing").unwrap();

    let first = booted.orchestrator.resolve("packs/app", "Invoice").unwrap();
    let second = booted.orchestrator.resolve("packs/app", "Invoice").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(booted.host.evaluation_count(billing.id(), &unit), 1);
    assert_eq!(first.context, billing.id());
}

#[test]
fn test_two_accessors_share_one_evaluation() {
    let project = project();
    let booted = project.boot();
    let unit = project.path("packs/billing/lib/invoice.rb");
    let billing = booted.orchestrator.context("packs/billing").unwrap();

    let from_app = booted.orchestrator.resolve("packs/app", "Invoice").unwrap();
    let from_admin = booted.orchestrator.resolve("packs/admin", "Invoice").unwrap();

    assert!(Arc::ptr_eq(&from_app, &from_admin));
    assert_eq!(booted.host.evaluation_count(billing.id(), &unit), 1);
    assert_eq!(booted.host.total_evaluations(billing.id()), 1);
}

#[test]
fn test_only_the_first_resolution_reaches_the_resolver() {
    let project = project();
    let booted = project.boot();

    booted.orchestrator.resolve("packs/app", "Invoice").unwrap();
    booted.orchestrator.resolve("packs/app", "Invoice").unwrap();

    let events = booted.orchestrator.audit().for_package("packs/app", 10);
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].outcome,
        AuditOutcome::Found {
            provider: "packs/billing".into()
        }
    );
}

#[test]
fn test_nothing_is_evaluated_before_first_reference() {
    let project = project();
    let booted = project.boot();
    let billing = booted.orchestrator.context("packs/billing").unwrap();

    assert!(!billing.is_bound("Invoice"));
    assert_eq!(booted.host.total_evaluations(billing.id()), 0);
}
