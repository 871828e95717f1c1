//! Error types for uxkit operations.

use thiserror::Error;

/// The main error type for uxkit operations.
///
/// Variants follow the failure kinds the installer distinguishes: malformed
/// input, things that do not exist, broken kit authoring or host wiring, and
/// transient download problems.
#[derive(Error, Debug)]
pub enum ToolkitError {
    /// Malformed name, URL, path or manifest shape
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested kit, recipe, manifest or archive content does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Defect in a kit or in registry wiring (duplicate recipe, dangling
    /// recipe dependency, unsupported dependency type, unregistered registry)
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Remote download failure
    #[error("Download error: {0}")]
    Download(String),

    /// Archive extraction failure
    #[error("Archive error: {0}")]
    Archive(String),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl ToolkitError {
    /// Whether this error means the requested thing does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ToolkitError::NotFound(_))
    }

    /// The message without its kind prefix.
    pub fn message(&self) -> String {
        match self {
            ToolkitError::Validation(msg)
            | ToolkitError::NotFound(msg)
            | ToolkitError::Integrity(msg)
            | ToolkitError::Download(msg)
            | ToolkitError::Archive(msg)
            | ToolkitError::Config(msg)
            | ToolkitError::Other(msg) => msg.clone(),
            ToolkitError::Io(e) => e.to_string(),
            ToolkitError::Yaml(e) => e.to_string(),
            ToolkitError::Json(e) => e.to_string(),
        }
    }
}

/// A specialized Result type for uxkit operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;

/// Helper macro to bail out with a ToolkitError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if !path.is_absolute() {
///     bail!(Validation, "Path \"{}\" is not absolute.", path.display());
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::ToolkitError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::ToolkitError::$variant(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_with_validation() -> Result<()> {
        bail!(Validation, "Invalid kit name \"{}\".", "-kit");
    }

    #[test]
    fn test_bail_macro() {
        let err = fails_with_validation().unwrap_err();
        assert!(matches!(err, ToolkitError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: Invalid kit name \"-kit\".");
    }

    #[test]
    fn test_is_not_found() {
        assert!(ToolkitError::NotFound("kit".to_string()).is_not_found());
        assert!(!ToolkitError::Other("kit".to_string()).is_not_found());
    }

    #[test]
    fn test_message_drops_prefix() {
        let err = ToolkitError::Integrity("Recipe \"a\" is already registered.".to_string());
        assert_eq!(err.message(), "Recipe \"a\" is already registered.");
    }
}
