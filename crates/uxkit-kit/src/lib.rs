//! # uxkit Kit
//!
//! Everything about kits short of installing them:
//! - Dependency declarations and their manifest syntax
//! - Recipes and the files they copy
//! - Kit loading from a directory on disk
//! - Kit registries (local directory, GitHub archives)
//! - Component template lookup

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dependency;
pub mod factory;
pub mod file;
pub mod finder;
pub mod kit;
pub mod manifest;
pub mod recipe;
pub mod registry;

pub use dependency::{
    parse_dependencies, Dependency, ImportmapPackageDependency, NpmPackageDependency, PhpPackageDependency,
    RecipeDependency,
};
pub use factory::{KitFactory, KitSynchronizer};
pub use file::File;
pub use finder::{ComponentTemplateFinder, TemplateFinderCache, TemplateLocation};
pub use kit::Kit;
pub use manifest::KitManifest;
pub use recipe::{Recipe, RecipeManifest};
pub use registry::{GithubIdentity, GithubRegistry, KitRegistry, LocalRegistry, RegistryFactory};

#[cfg(test)]
pub(crate) mod testing {
    use std::path::{Path, PathBuf};

    /// Absolute path of a kit under the workspace `fixtures/kits` directory.
    pub fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../fixtures/kits")
            .join(name)
            .canonicalize()
            .unwrap()
    }
}
