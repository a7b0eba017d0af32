use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Upload rejected with status {status}: {message}")]
    UploadRejected { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StoreError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::ApiError(_) => ErrorSeverity::Medium,
            StoreError::UploadRejected { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            StoreError::UploadRejected { .. } => ErrorSeverity::High,
            StoreError::IoError(_) | StoreError::SerializationError(_) => ErrorSeverity::High,
            StoreError::ConfigError { .. }
            | StoreError::ConfigValidationError { .. }
            | StoreError::InvalidConfigValueError { .. }
            | StoreError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StoreError::ApiError(_) => {
                "Check network connectivity to the image host and try again".to_string()
            }
            StoreError::IoError(_) => "Check that the file exists and is readable".to_string(),
            StoreError::SerializationError(_) => {
                "The image host returned an unexpected response body".to_string()
            }
            StoreError::ConfigError { .. } | StoreError::ConfigValidationError { .. } => {
                "Review the configuration file syntax".to_string()
            }
            StoreError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            StoreError::MissingConfigError { field } => {
                format!("Set '{}' in the configuration file or environment", field)
            }
            StoreError::UploadRejected { status: 401, .. }
            | StoreError::UploadRejected { status: 403, .. } => {
                "Verify the CDN api key and secret".to_string()
            }
            StoreError::UploadRejected { .. } => {
                "Inspect the upload parameters reported by the image host".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StoreError::ApiError(_) => "Could not reach the image host".to_string(),
            StoreError::IoError(e) => format!("File access failed: {}", e),
            StoreError::UploadRejected { message, .. } => {
                format!("The image host refused the upload: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
