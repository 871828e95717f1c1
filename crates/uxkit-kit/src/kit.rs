//! Kits: named collections of recipes.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uxkit_types::{bail, RecipeType, Result};

use crate::manifest::KitManifest;
use crate::recipe::Recipe;

/// A kit materialized on disk.
///
/// Recipes are only ever added; a name can be registered once.
#[derive(Debug)]
pub struct Kit {
    /// Absolute path of the kit root
    pub absolute_path: PathBuf,

    /// Kit metadata
    pub manifest: KitManifest,

    /// Installation guide (`INSTALL.md`), if the kit ships one
    pub install_as_markdown: Option<String>,

    recipes: IndexMap<String, Recipe>,

    /// Temporary directory backing a downloaded kit; removed on drop.
    scratch: Option<TempDir>,
}

impl Kit {
    /// Create an empty kit rooted at an absolute path.
    pub fn new(absolute_path: impl Into<PathBuf>, manifest: KitManifest) -> Result<Self> {
        let absolute_path = absolute_path.into();
        if !absolute_path.is_absolute() {
            bail!(Validation, "Kit path \"{}\" is not absolute.", absolute_path.display());
        }

        Ok(Self {
            absolute_path,
            manifest,
            install_as_markdown: None,
            recipes: IndexMap::new(),
            scratch: None,
        })
    }

    /// Tie the lifetime of a temporary directory to this kit.
    pub fn with_scratch(mut self, scratch: TempDir) -> Self {
        self.scratch = Some(scratch);
        self
    }

    /// Kit name.
    pub fn name(&self) -> &str {
        self.manifest.name.as_str()
    }

    /// Absolute path of the kit root.
    pub fn path(&self) -> &Path {
        &self.absolute_path
    }

    /// Register a recipe.
    ///
    /// Fails with an integrity error if the name is taken.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<()> {
        if self.recipes.contains_key(&recipe.name) {
            bail!(
                Integrity,
                "Recipe \"{}\" is already registered in the kit.",
                recipe.manifest.name
            );
        }

        self.recipes.insert(recipe.name.clone(), recipe);
        Ok(())
    }

    /// Recipes in registration order, optionally restricted to one type.
    pub fn recipes(&self, recipe_type: Option<RecipeType>) -> Vec<&Recipe> {
        self.recipes
            .values()
            .filter(|recipe| recipe_type.map_or(true, |t| recipe.recipe_type() == t))
            .collect()
    }

    /// Look up a recipe by name, optionally requiring a type.
    pub fn recipe(&self, name: &str, recipe_type: Option<RecipeType>) -> Option<&Recipe> {
        self.recipes
            .get(name)
            .filter(|recipe| recipe_type.map_or(true, |t| recipe.recipe_type() == t))
    }

    /// Names of every registered recipe.
    pub fn recipe_names(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }
}
