//! Error types for Taskboard

use thiserror::Error;

/// Result type alias using Taskboard's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Taskboard error types
#[derive(Error, Debug)]
pub enum Error {
    // Document errors (E001-E099)
    #[error("Template '{0}' not found in the document.")]
    MissingTemplate(String),

    #[error("Host element '#{0}' not found in the document.")]
    MissingHost(String),

    #[error("Element '{0}' not found inside its component.")]
    MissingElement(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Generic errors
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingTemplate(_) => "E001",
            Self::MissingHost(_) => "E002",
            Self::MissingElement(_) => "E003",
            Self::ConfigError(_) => "E600",
            Self::Other(_) | Self::Io(_) => "E9999",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::MissingTemplate("x".into()).code(), "E001");
        assert_eq!(Error::MissingHost("app".into()).code(), "E002");
        assert_eq!(Error::MissingElement("h2".into()).code(), "E003");
        assert_eq!(Error::ConfigError("bad".into()).code(), "E600");
        assert_eq!(Error::Other("?".into()).code(), "E9999");
    }

    #[test]
    fn test_error_messages() {
        let err = Error::MissingHost("app".to_string());
        assert_eq!(err.to_string(), "Host element '#app' not found in the document.");
    }
}
