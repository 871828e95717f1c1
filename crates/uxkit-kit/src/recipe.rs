//! Recipes and their manifests.

use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};
use uxkit_core::util::{is_relative, list_files};
use uxkit_types::{bail, RecipeType, Result, ToolkitError};

use crate::dependency::{parse_dependencies, Dependency};
use crate::file::File;

/// Parsed `manifest.json` of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeManifest {
    /// Recipe kind
    pub recipe_type: RecipeType,
    /// Display name (ex: "Button")
    pub name: String,
    /// One-line description
    pub description: String,
    /// Copy rules, source directory to destination directory, both relative
    pub copy_files: IndexMap<String, String>,
    /// Declared dependencies, grouped by type
    pub dependencies: Vec<Dependency>,
}

impl RecipeManifest {
    /// Build a manifest, rejecting non-relative copy rules.
    pub fn new(
        recipe_type: RecipeType,
        name: impl Into<String>,
        description: impl Into<String>,
        copy_files: IndexMap<String, String>,
        dependencies: Vec<Dependency>,
    ) -> Result<Self> {
        for (source, destination) in &copy_files {
            if !is_relative(source) {
                bail!(Validation, "Copy file source \"{}\" must be a relative path.", source);
            }
            if !is_relative(destination) {
                bail!(Validation, "Copy file destination \"{}\" must be a relative path.", destination);
            }
        }

        Ok(Self {
            recipe_type,
            name: name.into(),
            description: description.into(),
            copy_files,
            dependencies,
        })
    }

    /// Parse a recipe manifest from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(json)?;

        let recipe_type: RecipeType = required_str(&data, "type")?.parse()?;

        let dependencies = match data.get("dependencies") {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => parse_dependencies(value)?,
        };

        let name = required_str(&data, "name")?;
        let description = required_str(&data, "description")?;

        let copy_files = match data.get("copy-files") {
            Some(Value::Null) | None => IndexMap::new(),
            Some(Value::Object(rules)) => rules
                .iter()
                .map(|(source, destination)| {
                    destination
                        .as_str()
                        .map(|d| (source.clone(), d.to_string()))
                        .ok_or_else(|| {
                            ToolkitError::Validation(format!(
                                "Copy file destination for \"{}\" must be a string.",
                                source
                            ))
                        })
                })
                .collect::<Result<IndexMap<_, _>>>()?,
            Some(_) => bail!(Validation, "The \"copy-files\" property must be an object."),
        };

        Self::new(recipe_type, name, description, copy_files, dependencies)
    }
}

fn required_str<'a>(data: &'a Value, property: &str) -> Result<&'a str> {
    data.get(property)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ToolkitError::Validation(format!("Property \"{}\" is required.", property)))
}

/// A recipe materialized on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Directory name of the recipe inside its kit (ex: "button")
    pub name: String,
    /// Absolute path of the recipe directory
    pub absolute_path: PathBuf,
    /// Parsed manifest
    pub manifest: RecipeManifest,
}

impl Recipe {
    /// Create a recipe rooted at an absolute path.
    pub fn new(name: impl Into<String>, absolute_path: impl Into<PathBuf>, manifest: RecipeManifest) -> Result<Self> {
        let absolute_path = absolute_path.into();
        if !absolute_path.is_absolute() {
            bail!(Validation, "Recipe path \"{}\" is not absolute.", absolute_path.display());
        }

        Ok(Self {
            name: name.into(),
            absolute_path,
            manifest,
        })
    }

    /// Recipe kind.
    pub fn recipe_type(&self) -> RecipeType {
        self.manifest.recipe_type
    }

    /// Absolute path of the recipe directory.
    pub fn path(&self) -> &Path {
        &self.absolute_path
    }

    /// Every file the recipe copies.
    ///
    /// Copy rules are walked in manifest order; within a rule files are
    /// sorted by their path. Repeated calls return the same list.
    pub fn files(&self) -> Result<Vec<File>> {
        let mut files = Vec::new();

        for (source, destination) in &self.manifest.copy_files {
            for relative in list_files(self.absolute_path.join(source))? {
                files.push(File::new(
                    Path::new(source).join(&relative),
                    Path::new(destination).join(&relative),
                )?);
            }
        }

        Ok(files)
    }
}
