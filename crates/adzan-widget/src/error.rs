//! Adzan widget — host error types.

use adzan_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the widget host.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration value is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or file I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A domain rule rejected the configuration.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_is_displayed_transparently() {
        let err = AppError::from(DomainError::Validation("question_count must be positive".into()));
        assert_eq!(
            err.to_string(),
            "validation error: question_count must be positive"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = AppError::Config("ADZAN_CONFIG is empty".into());
        assert_eq!(err.to_string(), "configuration error: ADZAN_CONFIG is empty");
    }
}
