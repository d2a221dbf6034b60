use thiserror::Error;

#[derive(Error, Debug)]
pub enum CreationaryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("No tokio runtime available to schedule debounce timers")]
    RuntimeUnavailable,

    #[error("Navigation failed: {message}")]
    NavigationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Runtime,
    External,
}

impl CreationaryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::ValidationError { .. } | Self::SerializationError(_) => ErrorCategory::Input,
            Self::RuntimeUnavailable => ErrorCategory::Runtime,
            Self::IoError(_) | Self::NavigationError { .. } => ErrorCategory::External,
        }
    }

    /// 給 CLI 使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Config field `{}` is invalid: {}", field, reason)
            }
            Self::ValidationError { field, message } => format!("{}: {}", field, message),
            Self::RuntimeUnavailable => {
                "Internal error: debouncing requires an async runtime".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CreationaryError>;
