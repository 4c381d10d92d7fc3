/*!
 * Dependency Graph
 * Package nodes, declared-dependency edges, cycle detection and boot order
 */

use crate::config::ProjectConfig;
use crate::core::limits::ROOT_PACKAGE_NAME;
use crate::core::{PackError, PackResult};
use crate::package::{PackageDescriptor, PackageDiscovery};
use ahash::{HashMap, HashMapExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Validated, read-only graph of discovered packages
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    root: PathBuf,
    project: ProjectConfig,
    /// Nodes in discovery order
    packages: Vec<Arc<PackageDescriptor>>,
    by_name: HashMap<String, usize>,
    /// Edges per node, in declaration order
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Discover packages under `root` and build a validated graph
    pub fn build(root: &Path) -> PackResult<Self> {
        let project = ProjectConfig::load(root)?;
        let packages = PackageDiscovery::new(root, &project).discover()?;
        Self::from_packages(root, project, packages)
    }

    /// Build a validated graph from already-discovered packages
    pub fn from_packages(
        root: &Path,
        project: ProjectConfig,
        packages: Vec<PackageDescriptor>,
    ) -> PackResult<Self> {
        let packages: Vec<Arc<PackageDescriptor>> = packages.into_iter().map(Arc::new).collect();

        let mut by_name = HashMap::with_capacity(packages.len());
        for (idx, pkg) in packages.iter().enumerate() {
            by_name.insert(pkg.name.clone(), idx);
        }

        let mut edges = Vec::with_capacity(packages.len());
        for pkg in &packages {
            let mut targets = Vec::with_capacity(pkg.dependencies.len());
            for dependency in &pkg.dependencies {
                let target = by_name.get(dependency).copied().ok_or_else(|| {
                    PackError::UnresolvedDependency {
                        package: pkg.name.clone(),
                        dependency: dependency.clone(),
                    }
                })?;
                targets.push(target);
            }
            edges.push(targets);
        }

        let graph = Self {
            root: root.to_path_buf(),
            project,
            packages,
            by_name,
            edges,
        };
        graph.validate_acyclic()?;

        info!(
            root = %graph.root.display(),
            packages = graph.packages.len(),
            edges = graph.edges.iter().map(Vec::len).sum::<usize>(),
            "Dependency graph built"
        );
        Ok(graph)
    }

    /// Depth-first search tracking the current path; a node seen on its own path is a cycle
    pub fn validate_acyclic(&self) -> PackResult<()> {
        let mut done = vec![false; self.packages.len()];
        let mut on_path = vec![false; self.packages.len()];
        let mut path = Vec::new();

        for start in 0..self.packages.len() {
            if !done[start] {
                self.visit_for_cycles(start, &mut done, &mut on_path, &mut path)?;
            }
        }
        Ok(())
    }

    fn visit_for_cycles(
        &self,
        node: usize,
        done: &mut [bool],
        on_path: &mut [bool],
        path: &mut Vec<usize>,
    ) -> PackResult<()> {
        on_path[node] = true;
        path.push(node);

        for &dep in &self.edges[node] {
            if on_path[dep] {
                let start = path.iter().position(|&n| n == dep).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[start..].iter().map(|&n| self.packages[n].name.clone()).collect();
                cycle.push(self.packages[dep].name.clone());
                return Err(PackError::CircularDependency { cycle });
            }
            if !done[dep] {
                self.visit_for_cycles(dep, done, on_path, path)?;
            }
        }

        path.pop();
        on_path[node] = false;
        done[node] = true;
        Ok(())
    }

    /// Post-order traversal: every package after all of its dependencies.
    /// Independent subgraphs keep discovery order.
    pub fn topological_order(&self) -> Vec<Arc<PackageDescriptor>> {
        let mut visited = vec![false; self.packages.len()];
        let mut order = Vec::with_capacity(self.packages.len());

        for start in 0..self.packages.len() {
            self.visit_post_order(start, &mut visited, &mut order);
        }

        debug!(
            order = ?order.iter().map(|&i| self.packages[i].name.as_str()).collect::<Vec<_>>(),
            "Topological order computed"
        );
        order.into_iter().map(|i| Arc::clone(&self.packages[i])).collect()
    }

    fn visit_post_order(&self, node: usize, visited: &mut [bool], order: &mut Vec<usize>) {
        if visited[node] {
            return;
        }
        visited[node] = true;
        for &dep in &self.edges[node] {
            self.visit_post_order(dep, visited, order);
        }
        order.push(node);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<PackageDescriptor>> {
        self.by_name.get(name).map(|&idx| &self.packages[idx])
    }

    /// Direct dependencies of a package, in declaration order
    pub fn dependencies_of(&self, name: &str) -> Vec<Arc<PackageDescriptor>> {
        self.by_name
            .get(name)
            .map(|&idx| {
                self.edges[idx]
                    .iter()
                    .map(|&dep| Arc::clone(&self.packages[dep]))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Packages in discovery order
    pub fn packages(&self) -> &[Arc<PackageDescriptor>] {
        &self.packages
    }

    pub fn package_names(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.name.clone()).collect()
    }

    /// Root package, `None` for a graph built from no packages
    pub fn root_package(&self) -> Option<&Arc<PackageDescriptor>> {
        self.get(ROOT_PACKAGE_NAME)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    pub fn layers(&self) -> &[String] {
        &self.project.layers
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
