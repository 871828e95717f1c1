//! Dependency declarations carried by recipe manifests.
//!
//! A recipe may depend on a PHP package, an npm package, an importmap
//! package, or another recipe of the same kit.

use serde_json::Value;
use std::fmt;
use uxkit_types::{bail, NpmPackageName, PhpPackageName, Result, ToolkitError, VersionPreference};

/// Dependency type keys recognized in a manifest's `dependencies` object,
/// in the order their entries are emitted.
pub const DEPENDENCY_TYPES: [&str; 4] = ["recipe", "composer", "npm", "importmap"];

/// A dependency on a composer package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpPackageDependency {
    /// Package name (ex: "twig/html-extra")
    pub name: PhpPackageName,
    /// Preferred version constraint, if any
    pub version: Option<VersionPreference>,
}

impl PhpPackageDependency {
    /// Create a PHP package dependency, validating the package name.
    pub fn new(name: &str, version: Option<&str>) -> Result<Self> {
        Ok(Self {
            name: PhpPackageName::new(name)?,
            version: version.map(VersionPreference::new).transpose()?,
        })
    }

    /// Whether this declaration prefers a strictly higher version than `other`.
    ///
    /// Always false when either side has no version.
    pub fn is_higher_than(&self, other: &Self) -> bool {
        match (&self.version, &other.version) {
            (Some(ours), Some(theirs)) => ours.is_higher_than(theirs),
            _ => false,
        }
    }
}

impl fmt::Display for PhpPackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A dependency on an npm package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmPackageDependency {
    /// Package name, possibly scoped (ex: "@hotwired/stimulus")
    pub name: NpmPackageName,
    /// Preferred version constraint, if any
    pub version: Option<VersionPreference>,
}

impl NpmPackageDependency {
    /// Create an npm package dependency, validating the package name.
    pub fn new(name: &str, version: Option<&str>) -> Result<Self> {
        Ok(Self {
            name: NpmPackageName::new(name)?,
            version: version.map(VersionPreference::new).transpose()?,
        })
    }

    /// Whether this declaration prefers a strictly higher version than `other`.
    ///
    /// Always false when either side has no version.
    pub fn is_higher_than(&self, other: &Self) -> bool {
        match (&self.version, &other.version) {
            (Some(ours), Some(theirs)) => ours.is_higher_than(theirs),
            _ => false,
        }
    }
}

impl fmt::Display for NpmPackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A dependency on an importmap package. Importmap entries carry no version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportmapPackageDependency {
    /// Package specifier as passed to `importmap:require`
    pub package: String,
}

impl ImportmapPackageDependency {
    /// Create an importmap dependency.
    pub fn new(package: impl Into<String>) -> Result<Self> {
        let package = package.into();
        if package.is_empty() {
            bail!(Validation, "An importmap package cannot be empty.");
        }
        Ok(Self { package })
    }
}

/// A dependency on another recipe of the same kit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDependency {
    /// Name of the recipe directory
    pub name: String,
}

impl RecipeDependency {
    /// Create a recipe dependency.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            bail!(Validation, "A recipe dependency name cannot be empty.");
        }
        Ok(Self { name })
    }
}

/// Any dependency a recipe can declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// Composer package
    PhpPackage(PhpPackageDependency),
    /// npm package
    NpmPackage(NpmPackageDependency),
    /// Importmap package
    ImportmapPackage(ImportmapPackageDependency),
    /// Sibling recipe
    Recipe(RecipeDependency),
}

impl Dependency {
    /// Whether both declarations name the same thing, ignoring versions.
    pub fn is_equivalent_to(&self, other: &Dependency) -> bool {
        match (self, other) {
            (Dependency::PhpPackage(a), Dependency::PhpPackage(b)) => a.name == b.name,
            (Dependency::NpmPackage(a), Dependency::NpmPackage(b)) => a.name == b.name,
            (Dependency::ImportmapPackage(a), Dependency::ImportmapPackage(b)) => a.package == b.package,
            (Dependency::Recipe(a), Dependency::Recipe(b)) => a.name == b.name,
            _ => false,
        }
    }

    /// Human readable description, used by `debug-kit`.
    pub fn to_debug(&self) -> String {
        match self {
            Dependency::PhpPackage(_) => format!("PHP package \"{}\"", self),
            Dependency::NpmPackage(_) => format!("NPM package \"{}\"", self),
            Dependency::ImportmapPackage(_) => format!("Importmap package \"{}\"", self),
            Dependency::Recipe(_) => format!("Recipe \"{}\"", self),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::PhpPackage(dep) => dep.fmt(f),
            Dependency::NpmPackage(dep) => dep.fmt(f),
            Dependency::ImportmapPackage(dep) => f.write_str(&dep.package),
            Dependency::Recipe(dep) => f.write_str(&dep.name),
        }
    }
}

/// Parse the `dependencies` object of a recipe manifest.
///
/// Entries are returned grouped by type (recipe, composer, npm, importmap),
/// each group in declaration order.
pub fn parse_dependencies(value: &Value) -> Result<Vec<Dependency>> {
    let object = value.as_object().ok_or_else(|| {
        ToolkitError::Validation("The \"dependencies\" property must be an object.".to_string())
    })?;

    let unsupported: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !DEPENDENCY_TYPES.contains(key))
        .collect();

    let mut dependencies = Vec::new();

    for kind in DEPENDENCY_TYPES {
        let Some(entries) = object.get(kind) else {
            continue;
        };

        for (index, entry) in entries_of(kind, entries)?.into_iter().enumerate() {
            let entry = entry.as_str().filter(|s| !s.is_empty()).ok_or_else(|| {
                ToolkitError::Validation(format!(
                    "The dependency #{} of type \"{}\" must be a non-empty string.",
                    index, kind
                ))
            })?;

            let dependency = match kind {
                "recipe" => Dependency::Recipe(RecipeDependency::new(entry)?),
                "composer" => {
                    let (name, version) = split_composer(entry);
                    Dependency::PhpPackage(PhpPackageDependency::new(name, version)?)
                }
                "npm" => {
                    let (name, version) = split_npm(entry);
                    Dependency::NpmPackage(NpmPackageDependency::new(name, version)?)
                }
                _ => Dependency::ImportmapPackage(ImportmapPackageDependency::new(entry)?),
            };
            dependencies.push(dependency);
        }
    }

    if !unsupported.is_empty() {
        bail!(
            Integrity,
            "The dependency types \"{}\" are not supported.",
            unsupported.join("\", \"")
        );
    }

    Ok(dependencies)
}

fn entries_of<'a>(kind: &str, value: &'a Value) -> Result<Vec<&'a Value>> {
    match value {
        Value::Array(items) => Ok(items.iter().collect()),
        _ => Err(ToolkitError::Validation(format!(
            "The dependencies of type \"{}\" must be a list.",
            kind
        ))),
    }
}

/// `name` or `name:version`, split at the first colon.
fn split_composer(entry: &str) -> (&str, Option<&str>) {
    match entry.split_once(':') {
        Some((name, version)) => (name, Some(version)),
        None => (entry, None),
    }
}

/// `name`, `name@version`, `@scope/name` or `@scope/name@version`.
fn split_npm(entry: &str) -> (&str, Option<&str>) {
    match entry.rfind('@') {
        Some(pos) if pos > 0 => (&entry[..pos], Some(&entry[pos + 1..])),
        _ => (entry, None),
    }
}
