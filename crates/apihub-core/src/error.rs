use thiserror::Error;

/// Core error types for ApiHub registry operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid store visibility: {0}")]
    InvalidVisibility(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new InvalidVisibility error
    pub fn invalid_visibility(value: impl Into<String>) -> Self {
        Self::InvalidVisibility(value.into())
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_visibility_display() {
        let err = CoreError::invalid_visibility("internal");
        assert_eq!(err.to_string(), "Invalid store visibility: internal");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("{ not json }").unwrap_err();
        let core_err: CoreError = json_err.into();
        assert!(matches!(core_err, CoreError::JsonError(_)));
    }
}
