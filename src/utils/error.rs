use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarsError {
    #[error("planet not found: {what}")]
    NotFound { what: String },

    #[error("invalid identifier '{id}': {reason}")]
    InvalidIdentifier { id: String, reason: String },

    #[error("a planet named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("store error: {message}")]
    StoreError { message: String },

    #[error("counter lookup failed: {message}")]
    CounterError { message: String },

    #[error("counter request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("internal error: {message}")]
    Internal { message: String },
}

/// 錯誤分類，供呼叫端區分錯誤種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    InvalidInput,
    Conflict,
    Store,
    Counter,
    Timeout,
    Configuration,
    Internal,
}

impl StarsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StarsError::NotFound { .. } => ErrorCategory::NotFound,
            StarsError::InvalidIdentifier { .. } | StarsError::ValidationError { .. } => {
                ErrorCategory::InvalidInput
            }
            StarsError::DuplicateName { .. } => ErrorCategory::Conflict,
            StarsError::StoreError { .. }
            | StarsError::IoError(_)
            | StarsError::SerializationError(_) => ErrorCategory::Store,
            StarsError::CounterError { .. } | StarsError::ApiError(_) => ErrorCategory::Counter,
            StarsError::Cancelled | StarsError::DeadlineExceeded => ErrorCategory::Timeout,
            StarsError::ConfigError { .. }
            | StarsError::InvalidConfigValueError { .. }
            | StarsError::MissingConfigError { .. } => ErrorCategory::Configuration,
            StarsError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Store => format!("Planet store unavailable: {}", self),
            ErrorCategory::Counter => format!("Appearance lookup failed: {}", self),
            ErrorCategory::Timeout => "The request did not finish in time".to_string(),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the CLI flags, environment variables or the TOML file",
            ErrorCategory::Store => "Check that the store path is readable and writable",
            ErrorCategory::Counter => "Check SWAPI_URL and network connectivity",
            ErrorCategory::Timeout => "Retry, or raise --request-timeout-secs",
            ErrorCategory::NotFound | ErrorCategory::InvalidInput | ErrorCategory::Conflict => {
                "Fix the request and try again"
            }
            ErrorCategory::Internal => "Please report this as a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, StarsError>;
