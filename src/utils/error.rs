use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Checkout failed: {message}")]
    CheckoutError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StorefrontError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } | Self::NotFound { .. } => ErrorSeverity::Low,
            Self::HttpError(_) | Self::ApiError { .. } | Self::Unauthorized { .. } => {
                ErrorSeverity::Medium
            }
            Self::CheckoutError { .. } | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_)
            | Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for showing next to a form or in the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) if e.is_connect() => {
                "Could not reach the store API. Check the base URL and your connection.".to_string()
            }
            Self::HttpError(_) => "The store API request failed.".to_string(),
            Self::ApiError { message, .. } => message.clone(),
            Self::Unauthorized { message } if !message.is_empty() => message.clone(),
            Self::Unauthorized { .. } => "Your session has expired. Please log in again.".to_string(),
            Self::NotFound { resource } => format!("{} was not found.", resource),
            Self::ValidationError { message, .. } => message.clone(),
            Self::CheckoutError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
            ErrorSeverity::High => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = StorefrontError::validation("email", "Email is required");
        assert_eq!(err.to_string(), "email: Email is required");
        assert_eq!(err.user_friendly_message(), "Email is required");
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_api_error_severity_and_exit_code() {
        let err = StorefrontError::ApiError {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "API returned 500: boom");
    }

    #[test]
    fn test_exit_codes_are_distinct_per_severity() {
        let validation = StorefrontError::validation("cvv", "CVV must be 3 digits");
        let checkout = StorefrontError::CheckoutError {
            message: "Your cart is empty".to_string(),
        };
        assert_eq!(validation.exit_code(), 1);
        assert_eq!(checkout.severity(), ErrorSeverity::High);
        assert_eq!(checkout.exit_code(), 4);
    }

    #[test]
    fn test_config_error_is_critical() {
        let err = StorefrontError::ConfigError {
            message: "missing".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
