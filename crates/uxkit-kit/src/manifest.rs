//! Kit manifest parsing and validation.

use serde::{Deserialize, Serialize};
use url::Url;
use uxkit_types::{KitName, Result, ToolkitError};

/// Kit metadata from the kit's `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitManifest {
    /// Kit name
    pub name: KitName,

    /// Kit description
    pub description: String,

    /// License identifier (ex: "MIT")
    pub license: String,

    /// Kit homepage, a valid URL
    pub homepage: String,
}

/// Manifest as it appears on disk, before required properties are enforced.
#[derive(Debug, Deserialize)]
struct RawKitManifest {
    name: Option<String>,
    description: Option<String>,
    license: Option<String>,
    homepage: Option<String>,
}

impl KitManifest {
    /// Create a manifest, validating the kit name and homepage.
    pub fn new(
        name: impl AsRef<str>,
        description: impl Into<String>,
        license: impl Into<String>,
        homepage: impl Into<String>,
    ) -> Result<Self> {
        let name = KitName::new(name)?;
        let homepage = homepage.into();

        Url::parse(&homepage)
            .map_err(|_| ToolkitError::Validation(format!("Invalid homepage URL \"{}\".", homepage)))?;

        Ok(Self {
            name,
            description: description.into(),
            license: license.into(),
            homepage,
        })
    }

    /// Parse a kit manifest from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawKitManifest = serde_json::from_str(json)?;

        Self::new(
            required(raw.name, "name")?,
            required(raw.description, "description")?,
            required(raw.license, "license")?,
            required(raw.homepage, "homepage")?,
        )
    }
}

fn required(value: Option<String>, property: &str) -> Result<String> {
    value.ok_or_else(|| ToolkitError::Validation(format!("Property \"{}\" is required.", property)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let manifest = KitManifest::from_json(
            r#"{
                "name": "Shadcn UI",
                "description": "Shadcn components.",
                "license": "MIT",
                "homepage": "https://ux.symfony.com/components"
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.name.as_str(), "Shadcn UI");
        assert_eq!(manifest.license, "MIT");
    }

    #[test]
    fn test_required_properties() {
        let err = KitManifest::from_json(r#"{"description": "d", "license": "MIT", "homepage": "https://a.b"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Property \"name\" is required.");

        let err = KitManifest::from_json(r#"{"name": "kit", "description": "d", "license": "MIT"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Property \"homepage\" is required.");
    }

    #[test]
    fn test_invalid_name() {
        let err = KitManifest::new("-my-kit", "d", "MIT", "https://a.b").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid kit name \"-my-kit\".");
    }

    #[test]
    fn test_invalid_homepage() {
        let err = KitManifest::new("my-kit", "d", "MIT", "not a url").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid homepage URL \"not a url\".");
    }
}
