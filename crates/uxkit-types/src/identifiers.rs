//! Type-safe identifiers and version preferences.

use crate::errors::{Result, ToolkitError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static KIT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9](?:[a-zA-Z0-9\-_ ]{0,61}[a-zA-Z0-9])?$").expect("valid kit name regex")
});

// Taken from the composer JSON schema.
static PHP_PACKAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([_.-]?[a-z0-9]+)*/[a-z0-9](([_.]|-{1,2})?[a-z0-9]+)*$")
        .expect("valid php package regex")
});

static NPM_PACKAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(@[a-z0-9\-~][a-z0-9\-._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
        .expect("valid npm package regex")
});

static COMPONENT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][a-zA-Z0-9]*(?::[A-Z][a-zA-Z0-9]*)*$").expect("valid component name regex")
});

macro_rules! validated_name {
    ($(#[$meta:meta])* $ty:ident, $re:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $ty(String);

        impl $ty {
            /// Create a new validated name.
            ///
            /// # Errors
            ///
            /// Returns a validation error naming the offending value.
            pub fn new(name: impl AsRef<str>) -> Result<Self> {
                let name = name.as_ref();
                if !Self::is_valid(name) {
                    return Err(ToolkitError::Validation(format!(
                        concat!("Invalid ", $label, " \"{}\"."),
                        name
                    )));
                }
                Ok(Self(name.to_string()))
            }

            /// Check if a name is valid without allocating.
            pub fn is_valid(name: &str) -> bool {
                $re.is_match(name)
            }

            /// Get the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = ToolkitError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ToolkitError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

validated_name!(
    /// A validated kit name (ex: "Shadcn UI", "tailwind", "my_kit").
    ///
    /// Kit names must:
    /// - Start and end with an ASCII letter or digit
    /// - Contain only letters, digits, hyphens, underscores and spaces
    /// - Be between 1 and 63 characters long
    ///
    /// # Example
    ///
    /// ```
    /// use uxkit_types::KitName;
    ///
    /// assert!(KitName::new("my-kit").is_ok());
    /// assert!(KitName::new("-my-kit").is_err());
    /// ```
    KitName,
    KIT_NAME_RE,
    "kit name"
);

validated_name!(
    /// A validated composer package name (ex: "twig/html-extra").
    PhpPackageName,
    PHP_PACKAGE_RE,
    "PHP package name"
);

validated_name!(
    /// A validated npm package name, optionally scoped (ex: "@hotwired/stimulus").
    NpmPackageName,
    NPM_PACKAGE_RE,
    "NPM package name"
);

validated_name!(
    /// A validated component name (ex: "Button", "Card:Header").
    ComponentName,
    COMPONENT_NAME_RE,
    "component name"
);

/// A version preference declared by a recipe (ex: "^3.12.0", "1", "2.x").
///
/// The preference is kept verbatim. Its only operation is ordering against
/// another preference, which follows semantic-version precedence once the
/// declared constraint is reduced to a plain version.
///
/// # Example
///
/// ```
/// use uxkit_types::VersionPreference;
///
/// let a = VersionPreference::new("1.2.3").unwrap();
/// let b = VersionPreference::new("1.2.3-beta.1").unwrap();
/// assert!(a.is_higher_than(&b));
/// assert!(!b.is_higher_than(&a));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionPreference(String);

impl VersionPreference {
    /// Create a version preference from its declared form.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference is empty.
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        if value.trim().is_empty() {
            return Err(ToolkitError::Validation(
                "A version preference cannot be empty.".to_string(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Get the declared preference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this preference is strictly higher than `other`.
    ///
    /// Preferences that cannot be reduced to a version never compare as higher.
    /// Build metadata takes no part in the comparison.
    pub fn is_higher_than(&self, other: &VersionPreference) -> bool {
        match (self.to_semver(), other.to_semver()) {
            (Some(mine), Some(theirs)) => {
                let precedence = |v: &semver::Version| (v.major, v.minor, v.patch, v.pre.clone());
                precedence(&mine) > precedence(&theirs)
            }
            _ => false,
        }
    }

    /// Reduce the declared constraint to a plain semantic version.
    ///
    /// `^2.0` becomes `2.0.0`, `>=1.2 <2` becomes `1.2.0`, `3.x` becomes `3.0.0`.
    pub fn to_semver(&self) -> Option<semver::Version> {
        let first = self
            .0
            .split("||")
            .next()?
            .trim()
            .trim_start_matches(|c: char| matches!(c, '^' | '~' | '=' | '>' | '<' | 'v' | 'V') || c.is_whitespace());
        let first = first.split(|c: char| c.is_whitespace() || c == ',').next()?;

        let (core, suffix) = match first.find(|c: char| c == '-' || c == '+') {
            Some(idx) => first.split_at(idx),
            None => (first, ""),
        };

        let mut parts: Vec<&str> = core.split('.').collect();
        if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        while parts.len() < 3 {
            parts.push("0");
        }
        let parts: Vec<&str> = parts
            .into_iter()
            .map(|p| if matches!(p, "x" | "X" | "*") { "0" } else { p })
            .collect();

        semver::Version::parse(&format!("{}{}", parts.join("."), suffix)).ok()
    }
}

impl fmt::Display for VersionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VersionPreference {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
