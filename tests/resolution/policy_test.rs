/*!
 * Policy Enforcement Tests
 * Privacy, visibility, folder privacy and layering through real boots
 */

use crate::fixture::Project;
use packbox::{PackError, PolicyKind, SandboxOrchestrator, SimulatedHost};
use std::sync::Arc;

fn privacy_project(extra_config: &str) -> Project {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\ndependencies:\n  - packs/billing\n")
        .package("packs/billing", &format!("enforce_privacy: true\n{extra_config}"))
        .file("packs/billing/public/invoice.rb", "class Invoice; end\n")
        .file("packs/billing/lib/secret.rb", "class Secret; end\n");
    project
}

#[test]
fn test_public_symbol_resolves_private_symbol_is_denied() {
    let project = privacy_project("");
    let booted = project.boot();

    let invoice = booted.orchestrator.resolve("packs/app", "Invoice").unwrap();
    assert_eq!(invoice.owner, "packs/billing");

    let err = booted.orchestrator.resolve("packs/app", "Secret").unwrap_err();
    assert_eq!(
        err,
        PackError::PrivacyViolation {
            symbol: "Secret".into(),
            owner: "packs/billing".into(),
            accessor: "packs/app".into()
        }
    );
    assert_eq!(err.policy_kind(), Some(PolicyKind::Privacy));
    assert!(err.to_string().contains("packs/billing"));
}

#[test]
fn test_public_marker_exposes_file_outside_public_root() {
    let project = privacy_project("");
    project.file(
        "packs/billing/lib/refund.rb",
        "# frozen_string_literal: true\n# pack_public: true\nclass Refund; end\n",
    );
    let booted = project.boot();

    assert!(booted.orchestrator.resolve("packs/app", "Refund").is_ok());
}

#[test]
fn test_explicit_private_symbol_beats_public_root() {
    let project = privacy_project("private_constants:\n  - \"::Invoice\"\n");
    let booted = project.boot();

    let err = booted.orchestrator.resolve("packs/app", "Invoice").unwrap_err();
    assert!(matches!(err, PackError::PrivacyViolation { .. }));
}

#[test]
fn test_strict_mode_enables_privacy() {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\ndependencies:\n  - packs/billing\n")
        .package("packs/billing", "enforce_privacy: strict\n")
        .file("packs/billing/lib/secret.rb", "");
    let booted = project.boot();

    let err = booted.orchestrator.resolve("packs/app", "Secret").unwrap_err();
    assert!(err.is_policy_denial());
}

#[test]
fn test_nested_private_symbol_under_public_namespace_is_checked() {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\ndependencies:\n  - packs/billing\n")
        .package("packs/billing", "enforce_privacy: true\n")
        .file("packs/billing/public/billing/invoice.rb", "")
        .file("packs/billing/lib/billing/secret_rate.rb", "");
    let booted = project.boot();

    let namespace = booted.orchestrator.resolve("packs/app", "Billing").unwrap();
    assert!(namespace.is_namespace());
    assert!(booted.orchestrator.resolve("packs/app", "Billing::Invoice").is_ok());

    let err = booted.orchestrator.resolve("packs/app", "Billing::SecretRate").unwrap_err();
    assert!(matches!(err, PackError::PrivacyViolation { ref symbol, .. } if symbol == "Billing::SecretRate"));
}

#[test]
fn test_public_namespace_file_does_not_expose_private_children() {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\ndependencies:\n  - packs/billing\n")
        .package("packs/billing", "enforce_privacy: true\n")
        .file("packs/billing/public/billing.rb", "module Billing; end\n")
        .file("packs/billing/lib/billing/secret_rate.rb", "");
    let booted = project.boot();

    let namespace = booted.orchestrator.resolve("packs/app", "Billing").unwrap();
    assert!(namespace.is_namespace());

    let err = booted.orchestrator.resolve("packs/app", "Billing::SecretRate").unwrap_err();
    assert_eq!(
        err,
        PackError::PrivacyViolation {
            symbol: "Billing::SecretRate".into(),
            owner: "packs/billing".into(),
            accessor: "packs/app".into()
        }
    );
}

#[test]
fn test_public_marker_on_namespace_does_not_expose_unmarked_children() {
    let project = Project::new();
    project
        .package("packs/app", "enforce_dependencies: true\ndependencies:\n  - packs/billing\n")
        .package("packs/billing", "enforce_privacy: true\n")
        .file("packs/billing/lib/billing.rb", "# pack_public: true\nmodule Billing; end\n")
        .file("packs/billing/lib/billing/secret_rate.rb", "class SecretRate; end\n")
        .file("packs/billing/lib/billing/rate.rb", "# pack_public: true\nclass Rate; end\n");
    let booted = project.boot();

    assert!(booted.orchestrator.resolve("packs/app", "Billing").is_ok());
    assert!(booted.orchestrator.resolve("packs/app", "Billing::Rate").is_ok());

    let err = booted.orchestrator.resolve("packs/app", "Billing::SecretRate").unwrap_err();
    assert!(matches!(err, PackError::PrivacyViolation { ref symbol, .. } if symbol == "Billing::SecretRate"));
}

#[test]
fn test_denial_is_terminal_not_a_fallthrough() {
    let project = Project::new();
    project
        .package(
            "packs/app",
            "enforce_dependencies: true\ndependencies:\n  - packs/locked\n  - packs/open\n",
        )
        .package("packs/locked", "enforce_privacy: true\n")
        .package("packs/open", "")
        .file("packs/locked/lib/thing.rb", "")
        .file("packs/open/lib/thing.rb", "");
    let booted = project.boot();

    let err = booted.orchestrator.resolve("packs/app", "Thing").unwrap_err();
    assert!(matches!(err, PackError::PrivacyViolation { ref owner, .. } if owner == "packs/locked"));
    assert_eq!(booted.orchestrator.audit().denial_count("packs/app"), 1);
}

#[test]
fn test_visibility_allow_list() {
    let project = Project::new();
    project
        .package("packs/p", "enforce_visibility: true\nvisible_to:\n  - packs/x\n")
        .package("packs/x", "enforce_dependencies: true\ndependencies:\n  - packs/p\n")
        .package("packs/y", "enforce_dependencies: true\ndependencies:\n  - packs/p\n")
        .file("packs/p/lib/payment.rb", "");
    let booted = project.boot();

    assert!(booted.orchestrator.resolve("packs/x", "Payment").is_ok());

    let err = booted.orchestrator.resolve("packs/y", "Payment").unwrap_err();
    assert_eq!(
        err,
        PackError::VisibilityViolation {
            symbol: "Payment".into(),
            owner: "packs/p".into(),
            accessor: "packs/y".into()
        }
    );
}

#[test]
fn test_folder_privacy_sibling_versus_outsider() {
    let project = Project::new();
    project
        .package("parent/packs/target", "enforce_folder_privacy: true\n")
        .package(
            "parent/packs/sibling",
            "enforce_dependencies: true\ndependencies:\n  - parent/packs/target\n",
        )
        .package(
            "other/packs/outsider",
            "enforce_dependencies: true\ndependencies:\n  - parent/packs/target\n",
        )
        .file("parent/packs/target/lib/asset.rb", "");
    let booted = project.boot();

    assert!(booted.orchestrator.resolve("parent/packs/sibling", "Asset").is_ok());

    let err = booted.orchestrator.resolve("other/packs/outsider", "Asset").unwrap_err();
    assert_eq!(err.policy_kind(), Some(PolicyKind::FolderPrivacy));
}

#[test]
fn test_layer_violation_fails_boot_before_any_resolution() {
    let project = Project::new();
    project
        .project_config("layers:\n  - feature\n  - core\n  - utility\n")
        .package("packs/feature", "layer: feature\n")
        .package(
            "packs/utility",
            "enforce_layers: true\nlayer: utility\ndependencies:\n  - packs/feature\n",
        )
        .file("packs/feature/lib/screen.rb", "");

    let graph = project.graph().unwrap();
    let orchestrator = SandboxOrchestrator::new(Arc::new(SimulatedHost::new())).unwrap();
    let err = orchestrator.boot_all(&graph).unwrap_err();

    assert_eq!(
        err,
        PackError::LayerViolation {
            package: "packs/utility".into(),
            layer: "utility".into(),
            dependency: "packs/feature".into(),
            dependency_layer: "feature".into()
        }
    );
    assert!(err.is_fatal());
    assert!(!orchestrator.is_booted("packs/utility"));
    assert_eq!(orchestrator.audit().stats().total_events, 0);
}

#[test]
fn test_downward_layer_edge_boots() {
    let project = Project::new();
    project
        .project_config("layers:\n  - feature\n  - core\n  - utility\n")
        .package("packs/utility", "layer: utility\n")
        .package(
            "packs/feature",
            "enforce_layers: true\nlayer: feature\nenforce_dependencies: true\ndependencies:\n  - packs/utility\n",
        )
        .file("packs/utility/lib/clock.rb", "");
    let booted = project.boot();

    assert!(booted.orchestrator.resolve("packs/feature", "Clock").is_ok());
}
