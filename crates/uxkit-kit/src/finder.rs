//! Component template lookup.
//!
//! Component recipes ship their templates under `templates/components/`.
//! A template at `templates/components/Table/Body.html.twig` renders the
//! component `Table:Body`.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::PathBuf;
use uxkit_types::{ComponentName, RecipeType, Result, ToolkitError};

use crate::kit::Kit;

const TEMPLATES_PREFIX: &str = "templates/components/";
const TEMPLATE_SUFFIX: &str = ".html.twig";

/// Where a component's template lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLocation {
    /// Recipe shipping the template
    pub recipe: String,
    /// Template path relative to the recipe
    pub source: PathBuf,
    /// Absolute template path
    pub path: PathBuf,
}

/// Index of the component templates of one kit.
#[derive(Debug, Clone)]
pub struct ComponentTemplateFinder {
    kit: String,
    templates: IndexMap<ComponentName, TemplateLocation>,
}

impl ComponentTemplateFinder {
    /// Index every component template of `kit`.
    ///
    /// When two recipes ship the same component, the first recipe wins.
    pub fn new(kit: &Kit) -> Result<Self> {
        let mut templates = IndexMap::new();

        for recipe in kit.recipes(Some(RecipeType::Component)) {
            for file in recipe.files()? {
                let source = file.source.to_string_lossy().replace('\\', "/");
                let Some(name) = component_name_for(&source) else {
                    continue;
                };
                templates.entry(name).or_insert_with(|| TemplateLocation {
                    recipe: recipe.name.clone(),
                    path: recipe.absolute_path.join(&file.source),
                    source: file.source.clone(),
                });
            }
        }

        Ok(Self {
            kit: kit.name().to_string(),
            templates,
        })
    }

    /// Template for a component name such as `Card:Header`.
    pub fn find(&self, name: &str) -> Result<&TemplateLocation> {
        let name = ComponentName::new(name)?;
        self.templates.get(&name).ok_or_else(|| {
            ToolkitError::NotFound(format!(
                "No template found for component \"{}\" in kit \"{}\".",
                name, self.kit
            ))
        })
    }

    /// Every resolvable component name, in recipe order.
    pub fn component_names(&self) -> impl Iterator<Item = &ComponentName> {
        self.templates.keys()
    }
}

/// `templates/components/Table/Body.html.twig` gives `Table:Body`.
fn component_name_for(source: &str) -> Option<ComponentName> {
    let start = source.rfind(TEMPLATES_PREFIX)? + TEMPLATES_PREFIX.len();
    let stem = source[start..].strip_suffix(TEMPLATE_SUFFIX)?;
    ComponentName::new(stem.replace('/', ":")).ok()
}

/// Finders built so far, keyed by kit name.
///
/// Owned by whoever renders components; nothing is shared process-wide.
#[derive(Debug, Default)]
pub struct TemplateFinderCache {
    finders: HashMap<String, ComponentTemplateFinder>,
}

impl TemplateFinderCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The finder for `kit`, building it on first use.
    pub fn finder_for(&mut self, kit: &Kit) -> Result<&ComponentTemplateFinder> {
        let key = kit.name().to_string();
        if !self.finders.contains_key(&key) {
            let finder = ComponentTemplateFinder::new(kit)?;
            self.finders.insert(key.clone(), finder);
        }
        self.finders
            .get(&key)
            .ok_or_else(|| ToolkitError::Other(format!("No finder cached for kit \"{}\"", key)))
    }

    /// Number of kits indexed.
    pub fn len(&self) -> usize {
        self.finders.len()
    }

    /// Whether no kit has been indexed yet.
    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }
}
