use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ConfigError(String),
    ValidationError(String),
    ParseError(String),
    LLMError(String),
    ApiError { status: u16, body: String },
    SecurityError(String),
    IoError(String),
}

impl AppError {
    /// Errors that happen before any request leaves the process.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AppError::ConfigError(_) | AppError::ValidationError(_) | AppError::ParseError(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::LLMError(msg) => write!(f, "LLM error: {}", msg),
            AppError::ApiError { status, body } => {
                write!(f, "Gemini API error: HTTP {} - {}", status, body)
            }
            AppError::SecurityError(msg) => write!(f, "Security error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_carries_status_and_body() {
        let err = AppError::ApiError {
            status: 403,
            body: "{\"error\":\"forbidden\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Gemini API error: HTTP 403 - {\"error\":\"forbidden\"}"
        );
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_config_error_is_precondition() {
        let err = AppError::ConfigError("missing key".to_string());
        assert!(err.is_precondition());
        assert_eq!(err.to_string(), "Configuration error: missing key");
    }
}
