use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("Unknown grade token: {token:?}")]
    UnknownGrade { token: String },

    #[error("Course request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Network,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RankerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RankerError::UnknownGrade { .. } | RankerError::Serialization(_) => ErrorCategory::Data,
            RankerError::Http(_) | RankerError::Url(_) => ErrorCategory::Network,
            RankerError::Io(_) | RankerError::Csv(_) => ErrorCategory::Storage,
            RankerError::ConfigValidationError { .. }
            | RankerError::InvalidConfigValueError { .. }
            | RankerError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RankerError::UnknownGrade { token } => {
                format!("The course source returned an unrecognised median grade ({token:?}); no report was written")
            }
            RankerError::Http(_) => {
                format!("Could not reach the course source: {self}")
            }
            RankerError::Io(e) => format!("Could not read or write a file: {e}"),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Data => "Check that the course source reports grades on the standard scale",
            ErrorCategory::Network => "Check the source endpoint and your network connection, then rerun",
            ErrorCategory::Storage => "Check that the course list exists and the output directory is writable",
            ErrorCategory::Configuration => "Fix the configuration value named above and rerun",
        }
    }
}

pub type Result<T> = std::result::Result<T, RankerError>;
