/*!
 * Package Discovery
 * Walks the project tree and collects every directory carrying a package.yml
 */

use super::descriptor::PackageDescriptor;
use super::glob::{matches_any, GlobPattern};
use crate::config::{PackageConfig, ProjectConfig};
use crate::core::limits::{PACKAGE_CONFIG_FILE, ROOT_PACKAGE_NAME};
use crate::core::{PackError, PackResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Package discovery over a project root
pub struct PackageDiscovery<'a> {
    root: &'a Path,
    include: Vec<GlobPattern>,
    exclude: Vec<GlobPattern>,
}

impl<'a> PackageDiscovery<'a> {
    pub fn new(root: &'a Path, config: &ProjectConfig) -> Self {
        Self {
            root,
            include: config.package_paths.iter().map(|p| GlobPattern::new(p)).collect(),
            exclude: config.exclude.iter().map(|p| GlobPattern::new(p)).collect(),
        }
    }

    /// Discover all packages: the root first, then a sorted depth-first walk
    pub fn discover(&self) -> PackResult<Vec<PackageDescriptor>> {
        let root_config = PackageConfig::load(self.root)?.unwrap_or_default();
        let mut packages = vec![PackageDescriptor::new(
            ROOT_PACKAGE_NAME,
            self.root.to_path_buf(),
            &root_config,
            0,
        )];

        self.walk(self.root, "", &mut packages)?;

        debug!(root = %self.root.display(), count = packages.len(), "Package discovery complete");
        Ok(packages)
    }

    fn walk(&self, dir: &Path, relative: &str, packages: &mut Vec<PackageDescriptor>) -> PackResult<()> {
        for (name, path) in sorted_subdirectories(dir)? {
            if name.starts_with('.') {
                continue;
            }

            let rel = if relative.is_empty() {
                name.clone()
            } else {
                format!("{relative}/{name}")
            };

            if matches_any(&self.exclude, &rel) {
                debug!(path = %rel, "Skipping excluded directory");
                continue;
            }

            if path.join(PACKAGE_CONFIG_FILE).is_file() && matches_any(&self.include, &rel) {
                let config = PackageConfig::load(&path)?.unwrap_or_default();
                let index = packages.len();
                packages.push(PackageDescriptor::new(&rel, path.clone(), &config, index));
            }

            self.walk(&path, &rel, packages)?;
        }
        Ok(())
    }
}

/// Subdirectories of `dir` sorted by name
pub(crate) fn sorted_subdirectories(dir: &Path) -> PackResult<Vec<(String, PathBuf)>> {
    let entries = std::fs::read_dir(dir).map_err(|e| PackError::io(dir, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PackError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| PackError::io(&entry.path(), e))?;
        if file_type.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}
