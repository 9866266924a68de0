//! Error types for subsagg
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in subsagg
#[derive(Debug, Error)]
pub enum SubsaggError {
    /// A tool process could not be started (or was rejected by policy)
    #[error("Invocation error: {0}")]
    Invocation(String),

    /// Writing the final result file failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Malformed or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for subsagg operations
pub type Result<T> = std::result::Result<T, SubsaggError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_error() {
        let err = SubsaggError::Invocation("empty command".to_string());
        assert_eq!(err.to_string(), "Invocation error: empty command");
    }

    #[test]
    fn test_persistence_error() {
        let err = SubsaggError::Persistence("disk full".to_string());
        assert_eq!(err.to_string(), "Persistence error: disk full");
    }

    #[test]
    fn test_config_error() {
        let err = SubsaggError::Config("tool already exists".to_string());
        assert_eq!(err.to_string(), "Configuration error: tool already exists");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SubsaggError = io_err.into();
        assert!(matches!(err, SubsaggError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let err: SubsaggError = yaml_err.into();
        assert!(matches!(err, SubsaggError::Yaml(_)));
    }
}
