//! Building kits from directories on disk.
//!
//! A kit directory looks like:
//!
//! ```text
//! shadcn/
//! ├── manifest.json        kit manifest
//! ├── INSTALL.md           optional installation guide
//! ├── button/
//! │   ├── manifest.json    recipe manifest
//! │   └── templates/...
//! └── table/
//!     ├── manifest.json
//!     └── templates/...
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;
use uxkit_core::util::slurp;
use uxkit_types::{bail, Result, ToolkitError};
use walkdir::WalkDir;

use crate::kit::Kit;
use crate::manifest::KitManifest;
use crate::recipe::{Recipe, RecipeManifest};

/// Name of the manifest file, at the kit root and in every recipe.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Name of the optional installation guide at the kit root.
pub const INSTALL_FILE: &str = "INSTALL.md";

/// Creates [`Kit`]s from absolute paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct KitFactory {
    synchronizer: KitSynchronizer,
}

impl KitFactory {
    /// Create a kit factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the kit rooted at `path`, with all of its recipes.
    pub fn create_kit_from_absolute_path(&self, path: impl AsRef<Path>) -> Result<Kit> {
        let path = path.as_ref();

        if !path.is_absolute() {
            bail!(Validation, "Path \"{}\" is not absolute.", path.display());
        }
        if !path.exists() {
            bail!(NotFound, "Path \"{}\" does not exist.", path.display());
        }

        let manifest_path = path.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            bail!(NotFound, "File \"{}\" not found.", manifest_path.display());
        }

        let manifest = KitManifest::from_json(&slurp(&manifest_path)?).map_err(|e| match e {
            ToolkitError::Json(e) => {
                ToolkitError::Validation(format!("Unable to parse \"{}\": {}", manifest_path.display(), e))
            }
            other => other,
        })?;

        let mut kit = Kit::new(path, manifest)?;
        self.synchronizer.synchronize(&mut kit)?;

        debug!("Loaded kit \"{}\" with {} recipe(s)", kit.name(), kit.recipes(None).len());
        Ok(kit)
    }
}

/// Populates a [`Kit`] from the files under its root.
#[derive(Debug, Default, Clone, Copy)]
pub struct KitSynchronizer;

impl KitSynchronizer {
    /// Read the installation guide and register every recipe.
    pub fn synchronize(&self, kit: &mut Kit) -> Result<()> {
        let install_path = kit.path().join(INSTALL_FILE);
        if install_path.is_file() {
            kit.install_as_markdown = Some(slurp(&install_path)?);
        }

        let manifests = recipe_manifests(kit.path())?;
        if manifests.is_empty() {
            bail!(NotFound, "No recipes found at \"{}\".", kit.path().display());
        }

        for manifest_path in manifests {
            synchronize_recipe(kit, &manifest_path)?;
        }

        Ok(())
    }
}

/// `manifest.json` files exactly one directory below `root`, sorted by path.
fn recipe_manifests(root: &Path) -> Result<Vec<PathBuf>> {
    let mut manifests = Vec::new();

    for entry in WalkDir::new(root).min_depth(2).max_depth(2) {
        let entry = entry.map_err(|e| ToolkitError::Other(format!("Failed to walk \"{}\": {}", root.display(), e)))?;
        if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE {
            manifests.push(entry.into_path());
        }
    }

    manifests.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    Ok(manifests)
}

fn synchronize_recipe(kit: &mut Kit, manifest_path: &Path) -> Result<()> {
    let manifest = slurp(manifest_path)
        .and_then(|json| RecipeManifest::from_json(&json))
        .map_err(|e| {
            ToolkitError::Validation(format!(
                "Unable to parse manifest file \"{}\": \"{}\"",
                manifest_path.display(),
                e.message()
            ))
        })?;

    let recipe_dir = manifest_path
        .parent()
        .ok_or_else(|| ToolkitError::Other(format!("\"{}\" has no parent directory", manifest_path.display())))?;
    let name = recipe_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ToolkitError::Other(format!("\"{}\" has no directory name", recipe_dir.display())))?;

    debug!("Registering recipe \"{}\" from {:?}", name, recipe_dir);
    kit.add_recipe(Recipe::new(name, recipe_dir, manifest)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::Dependency;
    use crate::testing::fixture;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;
    use uxkit_types::RecipeType;

    fn write_kit_manifest(dir: &Path) {
        fs::write(
            dir.join(MANIFEST_FILE),
            r#"{"name": "kit", "description": "d", "license": "MIT", "homepage": "https://example.com"}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_load_shadcn() {
        let kit = KitFactory::new().create_kit_from_absolute_path(fixture("shadcn")).unwrap();

        assert_eq!(kit.name(), "Shadcn UI");
        assert_eq!(kit.manifest.license, "MIT");
        assert!(kit.install_as_markdown.as_deref().unwrap().starts_with("# Getting started"));
        assert_eq!(
            kit.recipe_names().collect::<Vec<_>>(),
            vec!["button", "card", "hero", "input", "table"]
        );

        let button = kit.recipe("button", Some(RecipeType::Component)).unwrap();
        assert_eq!(button.manifest.name, "Button");
        assert_eq!(button.absolute_path, fixture("shadcn").join("button"));
        assert_eq!(kit.recipes(Some(RecipeType::Block)).len(), 1);
    }

    #[test]
    fn test_load_circular_kit() {
        let kit = KitFactory::new()
            .create_kit_from_absolute_path(fixture("with-circular-components-dependencies"))
            .unwrap();

        let a = kit.recipe("a", None).unwrap();
        assert_eq!(a.manifest.dependencies.len(), 1);
        assert!(matches!(&a.manifest.dependencies[0], Dependency::Recipe(dep) if dep.name == "b"));
    }

    #[test]
    fn test_relative_path_rejected() {
        let err = KitFactory::new().create_kit_from_absolute_path("kits/shadcn").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Path \"kits/shadcn\" is not absolute.");
    }

    #[test]
    fn test_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let err = KitFactory::new()
            .create_kit_from_absolute_path(temp_dir.path().join("missing"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().ends_with("does not exist."));
    }

    #[test]
    fn test_missing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let err = KitFactory::new().create_kit_from_absolute_path(temp_dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Not found: File \"{}\" not found.", temp_dir.path().join("manifest.json").display())
        );
    }

    #[test]
    fn test_kit_without_recipes() {
        let temp_dir = TempDir::new().unwrap();
        write_kit_manifest(temp_dir.path());

        let err = KitFactory::new().create_kit_from_absolute_path(temp_dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Not found: No recipes found at \"{}\".", temp_dir.path().display())
        );
    }

    #[test]
    fn test_nested_manifests_are_not_recipes() {
        let temp_dir = TempDir::new().unwrap();
        write_kit_manifest(temp_dir.path());
        fs::create_dir_all(temp_dir.path().join("button/nested")).unwrap();
        fs::write(
            temp_dir.path().join("button/nested/manifest.json"),
            r#"{"type": "component", "name": "Nested", "description": "d"}"#,
        )
        .unwrap();

        let err = KitFactory::new().create_kit_from_absolute_path(temp_dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_recipe_manifest_is_wrapped() {
        let temp_dir = TempDir::new().unwrap();
        write_kit_manifest(temp_dir.path());
        fs::create_dir_all(temp_dir.path().join("button")).unwrap();
        let manifest_path = temp_dir.path().join("button/manifest.json");
        fs::write(
            &manifest_path,
            r#"{"type": "component", "name": "Button", "description": "d", "dependencies": {"pip": ["x"]}}"#,
        )
        .unwrap();

        let err = KitFactory::new().create_kit_from_absolute_path(temp_dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Validation error: Unable to parse manifest file \"{}\": \"The dependency types \"pip\" are not supported.\"",
                manifest_path.display()
            )
        );
    }
}
