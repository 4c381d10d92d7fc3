/*!
 * Discovery and Graph Construction Tests
 * Builds graphs from on-disk projects
 */

use crate::fixture::Project;
use packbox::PackError;
use pretty_assertions::assert_eq;

#[test]
fn test_build_discovers_packages_in_sorted_order() {
    let project = Project::new();
    project
        .package(".", "dependencies:\n  - packs/orders\n")
        .package("packs/orders", "dependencies:\n  - ./packs/billing/\n")
        .package("packs/billing", "")
        .package("packs/billing/ledger", "")
        .package("node_modules/left_pad", "");

    let graph = project.graph().unwrap();

    assert_eq!(
        graph.package_names(),
        vec![".", "packs/billing", "packs/billing/ledger", "packs/orders"]
    );
    assert_eq!(graph.get("packs/orders").unwrap().dependencies, vec!["packs/billing"]);
    assert!(graph.root_package().unwrap().is_root());
}

#[test]
fn test_root_without_package_file_uses_defaults() {
    let project = Project::new();
    project.package("packs/solo", "");

    let graph = project.graph().unwrap();
    let root = graph.root_package().unwrap();

    assert!(root.dependencies.is_empty());
    assert!(!root.policy.enforce_privacy);
    assert_eq!(graph.len(), 2);
}

#[test]
fn test_dangling_dependency_is_fatal() {
    let project = Project::new();
    project.package("packs/orders", "dependencies:\n  - packs/ghost\n");

    let err = project.graph().unwrap_err();
    assert_eq!(
        err,
        PackError::UnresolvedDependency {
            package: "packs/orders".into(),
            dependency: "packs/ghost".into()
        }
    );
    assert!(err.is_fatal());
}

#[test]
fn test_two_package_cycle_is_reported() {
    let project = Project::new();
    project
        .package("packs/a", "dependencies:\n  - packs/b\n")
        .package("packs/b", "dependencies:\n  - packs/a\n");

    match project.graph().unwrap_err() {
        PackError::CircularDependency { cycle } => {
            assert_eq!(cycle, vec!["packs/a", "packs/b", "packs/a"]);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_invalid_yaml_names_the_file() {
    let project = Project::new();
    project.package("packs/broken", "dependencies: [unclosed\n");

    match project.graph().unwrap_err() {
        PackError::InvalidConfig { path, .. } => assert!(path.ends_with("packs/broken/package.yml")),
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn test_project_layers_and_package_paths() {
    let project = Project::new();
    project
        .project_config("architecture_layers:\n  - feature\n  - utility\npackage_paths:\n  - packs/*\n")
        .package("packs/billing", "layer: feature\n")
        .package("components/legacy", "");

    let graph = project.graph().unwrap();

    assert_eq!(graph.layers(), &["feature".to_string(), "utility".to_string()]);
    assert_eq!(graph.package_names(), vec![".", "packs/billing"]);
    assert_eq!(graph.get("packs/billing").unwrap().layer(), Some("feature"));
}
