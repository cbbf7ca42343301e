use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompassError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Content provider returned status {status} for {operation}: {body}")]
    ProviderStatusError {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response for {operation}: {message}")]
    MalformedResponseError { operation: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInputError { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Content,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CompassError {
    pub fn malformed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponseError {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInputError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::ProviderStatusError { .. } => ErrorCategory::Network,
            Self::MalformedResponseError { .. } | Self::SerializationError(_) => {
                ErrorCategory::Content
            }
            Self::IoError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::InvalidInputError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Content => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Provider rejected the call or answered with something unusable.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Content
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection and API key, then try again",
            ErrorCategory::Content => "The cosmos answered in riddles; try the request again",
            ErrorCategory::Storage => "Check that the selection store path is writable",
            ErrorCategory::Configuration => "Review the configuration file and environment",
            ErrorCategory::Input => "Check the values you entered",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::ProviderStatusError { .. } => {
                "Could not reach the content service. Please try again.".to_string()
            }
            Self::MalformedResponseError { .. } | Self::SerializationError(_) => {
                "Received an unexpected answer from the content service. Please try again."
                    .to_string()
            }
            Self::IoError(e) => format!("Could not access local storage: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::MissingConfigError { field } => {
                format!("Missing required configuration '{}'", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration '{}': {}", field, reason)
            }
            Self::InvalidInputError { field, reason } => format!("{}: {}", field, reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompassError>;
