//! Error types for theme construction and loading.
//!
//! Highlighting itself never fails: a pass with no match leaves the text
//! untouched. The only recoverable failures happen while building a theme
//! from user-supplied configuration.

use thiserror::Error;

/// Error raised while building or loading a [`HelpTheme`](crate::HelpTheme).
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A role name that is not part of the fixed role set.
    #[error("unknown theme role: {0}")]
    UnknownRole(String),

    /// The override document could not be parsed.
    #[error("invalid theme overrides: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The override file could not be read.
    #[error("failed to read theme file {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThemeError::UnknownRole("banner".to_string());
        assert_eq!(err.to_string(), "unknown theme role: banner");
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("[").unwrap_err();
        let err: ThemeError = yaml_err.into();
        assert!(matches!(err, ThemeError::Parse(_)));
    }
}
