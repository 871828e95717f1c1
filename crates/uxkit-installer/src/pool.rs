//! The flattened result of walking a recipe's dependency graph.

use indexmap::IndexMap;
use std::path::PathBuf;
use uxkit_kit::{File, ImportmapPackageDependency, NpmPackageDependency, PhpPackageDependency, Recipe};
use uxkit_types::{NpmPackageName, PhpPackageName};

/// Files grouped by the recipe that ships them, keyed by destination.
pub type PoolFiles = IndexMap<PathBuf, IndexMap<PathBuf, File>>;

/// Files to copy and packages to suggest for one installation.
///
/// Merge rules:
/// - a destination keeps the first file registered for it
/// - PHP and npm packages are replaced only by a strictly higher version
/// - importmap packages are replaced unconditionally
#[derive(Debug, Default, Clone)]
pub struct Pool {
    files: PoolFiles,
    php_packages: IndexMap<PhpPackageName, PhpPackageDependency>,
    npm_packages: IndexMap<NpmPackageName, NpmPackageDependency>,
    importmap_packages: IndexMap<String, ImportmapPackageDependency>,
}

impl Pool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file of `recipe`. Returns false if its destination was
    /// already taken within that recipe.
    pub fn add_file(&mut self, recipe: &Recipe, file: File) -> bool {
        let files = self.files.entry(recipe.absolute_path.clone()).or_default();
        if files.contains_key(&file.destination) {
            return false;
        }
        files.insert(file.destination.clone(), file);
        true
    }

    /// Files by recipe path, then by destination.
    pub fn files(&self) -> &PoolFiles {
        &self.files
    }

    /// Total number of files across recipes.
    pub fn file_count(&self) -> usize {
        self.files.values().map(IndexMap::len).sum()
    }

    /// Merge a PHP package declaration.
    pub fn add_php_package_dependency(&mut self, dependency: PhpPackageDependency) {
        if let Some(existing) = self.php_packages.get(&dependency.name) {
            if !dependency.is_higher_than(existing) {
                return;
            }
        }
        self.php_packages.insert(dependency.name.clone(), dependency);
    }

    /// PHP packages in first-seen order.
    pub fn php_package_dependencies(&self) -> Vec<&PhpPackageDependency> {
        self.php_packages.values().collect()
    }

    /// Merge an npm package declaration.
    pub fn add_npm_package_dependency(&mut self, dependency: NpmPackageDependency) {
        if let Some(existing) = self.npm_packages.get(&dependency.name) {
            if !dependency.is_higher_than(existing) {
                return;
            }
        }
        self.npm_packages.insert(dependency.name.clone(), dependency);
    }

    /// npm packages in first-seen order.
    pub fn npm_package_dependencies(&self) -> Vec<&NpmPackageDependency> {
        self.npm_packages.values().collect()
    }

    /// Merge an importmap package declaration; the latest one wins.
    pub fn add_importmap_package_dependency(&mut self, dependency: ImportmapPackageDependency) {
        self.importmap_packages.insert(dependency.package.clone(), dependency);
    }

    /// Importmap packages in first-seen order.
    pub fn importmap_package_dependencies(&self) -> Vec<&ImportmapPackageDependency> {
        self.importmap_packages.values().collect()
    }
}
