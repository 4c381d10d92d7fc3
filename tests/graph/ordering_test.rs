/*!
 * Topological Order Properties
 */

use packbox::{DependencyGraph, PackError, PackageConfig, PackageDescriptor, ProjectConfig};
use proptest::prelude::*;
use proptest::sample::Index;
use std::path::{Path, PathBuf};

fn name_of(index: usize) -> String {
    if index == 0 {
        ".".to_string()
    } else {
        format!("packs/p{index}")
    }
}

fn descriptor(index: usize, deps: Vec<String>) -> PackageDescriptor {
    let name = name_of(index);
    let config = PackageConfig {
        dependencies: deps,
        ..PackageConfig::default()
    };
    PackageDescriptor::new(&name, PathBuf::from("/app").join(&name), &config, index)
}

/// Acyclic by construction: node `i` only depends on nodes with a larger index
fn dag(edges: &[Vec<Index>]) -> Vec<PackageDescriptor> {
    let n = edges.len();
    edges
        .iter()
        .enumerate()
        .map(|(i, targets)| {
            let mut deps: Vec<String> = Vec::new();
            if i + 1 < n {
                for target in targets {
                    let dep = name_of(i + 1 + target.index(n - i - 1));
                    if !deps.contains(&dep) {
                        deps.push(dep);
                    }
                }
            }
            descriptor(i, deps)
        })
        .collect()
}

proptest! {
    #[test]
    fn test_dependencies_always_precede_dependents(
        edges in proptest::collection::vec(proptest::collection::vec(any::<Index>(), 0..4), 1..16)
    ) {
        let graph = DependencyGraph::from_packages(Path::new("/app"), ProjectConfig::default(), dag(&edges)).unwrap();
        let order: Vec<String> = graph.topological_order().iter().map(|p| p.name.clone()).collect();

        prop_assert_eq!(order.len(), graph.len());
        for package in graph.packages() {
            let position = order.iter().position(|n| n == &package.name).unwrap();
            for dep in &package.dependencies {
                let dep_position = order.iter().position(|n| n == dep).unwrap();
                prop_assert!(dep_position < position, "{} must precede {}", dep, package.name);
            }
        }

        let again: Vec<String> = graph.topological_order().iter().map(|p| p.name.clone()).collect();
        prop_assert_eq!(order, again);
    }

    #[test]
    fn test_ring_is_always_a_cycle(size in 2usize..10) {
        // Nodes 1..size form a ring; with size 2 the ring is a self-dependency
        let packages: Vec<PackageDescriptor> = (0..size)
            .map(|i| {
                let next = if i + 1 == size { 1 } else { i + 1 };
                let deps = if i == 0 { Vec::new() } else { vec![name_of(next)] };
                descriptor(i, deps)
            })
            .collect();

        let result = DependencyGraph::from_packages(Path::new("/app"), ProjectConfig::default(), packages);
        match result {
            Err(PackError::CircularDependency { cycle }) => {
                prop_assert_eq!(cycle.first(), cycle.last());
                prop_assert_eq!(cycle.len(), size);
            }
            other => prop_assert!(false, "expected a cycle, got {:?}", other),
        }
    }
}
