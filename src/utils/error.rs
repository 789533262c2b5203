use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Email delivery failed: {message}")]
    DeliveryError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Delivery,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DigestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DigestError::HttpError(_) | DigestError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            DigestError::IoError(_) => ErrorCategory::Storage,
            DigestError::ConfigError { .. }
            | DigestError::MissingConfigError { .. }
            | DigestError::InvalidConfigValueError { .. }
            | DigestError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DigestError::DeliveryError { .. } => ErrorCategory::Delivery,
            DigestError::SerializationError(_) => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一來源抓取失敗只會讓該來源貢獻零筆
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Delivery => ErrorSeverity::Critical,
        }
    }

    /// 是否可在單一來源/關鍵字範圍內恢復
    pub fn is_recoverable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DigestError::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            DigestError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            DigestError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            DigestError::ConfigError { message } => format!("Configuration problem: {}", message),
            DigestError::HttpError(e) if e.is_timeout() => {
                "A job board did not answer in time".to_string()
            }
            DigestError::HttpError(_) => "Could not reach a job board".to_string(),
            DigestError::HttpStatusError { status, .. } => {
                format!("A job board answered with HTTP {}", status)
            }
            DigestError::IoError(e) => format!("Could not write output file: {}", e),
            DigestError::SerializationError(e) => format!("Could not serialize jobs: {}", e),
            DigestError::DeliveryError { message } => {
                format!("The digest email could not be sent: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check GMAIL_USER, GMAIL_APP_PASSWORD, RECIPIENT_EMAIL and the config file"
            }
            ErrorCategory::Network => "Check network access; the next scheduled run will retry",
            ErrorCategory::Storage => "Check that the output directory exists and is writable",
            ErrorCategory::Delivery => {
                "Verify the app password and SMTP settings; the digest was saved locally"
            }
            ErrorCategory::Processing => "Run with --verbose and inspect the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
