//! Walks a recipe's dependency graph into a [`Pool`].

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, trace};
use uxkit_kit::{Dependency, Kit, Recipe};
use uxkit_types::{Result, ToolkitError};

use crate::pool::Pool;

/// Resolves the transitive closure of a recipe within its kit.
#[derive(Debug, Default, Clone, Copy)]
pub struct PoolResolver;

impl PoolResolver {
    /// Create a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Collect the files and packages of `recipe` and of every recipe it
    /// depends on, directly or not.
    ///
    /// Each recipe is visited at most once, so cycles terminate. A recipe
    /// dependency missing from `kit` is an integrity error.
    pub fn resolve_for_recipe(&self, kit: &Kit, recipe: &Recipe) -> Result<Pool> {
        let mut pool = Pool::new();
        let mut visited: HashSet<&Path> = HashSet::new();
        let mut stack: Vec<&Recipe> = vec![recipe];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.path()) {
                trace!("Recipe \"{}\" already visited", current.name);
                continue;
            }
            debug!("Resolving recipe \"{}\"", current.name);

            for file in current.files()? {
                pool.add_file(current, file);
            }

            for dependency in &current.manifest.dependencies {
                match dependency {
                    Dependency::PhpPackage(php) => pool.add_php_package_dependency(php.clone()),
                    Dependency::NpmPackage(npm) => pool.add_npm_package_dependency(npm.clone()),
                    Dependency::ImportmapPackage(importmap) => {
                        pool.add_importmap_package_dependency(importmap.clone())
                    }
                    Dependency::Recipe(dep) => {
                        let next = kit.recipe(&dep.name, None).ok_or_else(|| {
                            ToolkitError::Integrity(format!(
                                "The recipe \"{}\" has a dependency on unregistered recipe \"{}\".",
                                current.name, dep.name
                            ))
                        })?;
                        stack.push(next);
                    }
                }
            }
        }

        debug!(
            "Resolved {} file(s) from {} recipe(s)",
            pool.file_count(),
            visited.len()
        );
        Ok(pool)
    }
}
