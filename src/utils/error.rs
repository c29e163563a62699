use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown template '{name}'. Available: {available}")]
    UnknownTemplate { name: String, available: String },

    #[error("Recipient input error: {message}")]
    ParseError { message: String },

    #[error("empty contact")]
    EmptyContact,

    #[error("empty name")]
    EmptyName,

    #[error("Provider rejected request (status {status}): {code} {message}")]
    ProviderError {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Template rewrite failed: {message}")]
    RewriteError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Provider,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SmsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SmsError::ConfigError { .. }
            | SmsError::MissingConfigError { .. }
            | SmsError::InvalidConfigValueError { .. }
            | SmsError::UnknownTemplate { .. } => ErrorCategory::Configuration,
            SmsError::CsvError(_)
            | SmsError::ParseError { .. }
            | SmsError::EmptyContact
            | SmsError::EmptyName => ErrorCategory::Input,
            SmsError::Http(_) => ErrorCategory::Network,
            SmsError::ProviderError { .. } | SmsError::RewriteError { .. } => {
                ErrorCategory::Provider
            }
            SmsError::IoError(_) | SmsError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單筆收件人問題，不影響其他收件人
            SmsError::EmptyContact | SmsError::EmptyName => ErrorSeverity::Low,
            SmsError::Http(_) | SmsError::ProviderError { .. } | SmsError::RewriteError { .. } => {
                ErrorSeverity::Medium
            }
            SmsError::ConfigError { .. }
            | SmsError::MissingConfigError { .. }
            | SmsError::InvalidConfigValueError { .. }
            | SmsError::UnknownTemplate { .. }
            | SmsError::CsvError(_)
            | SmsError::ParseError { .. } => ErrorSeverity::High,
            SmsError::IoError(_) | SmsError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SmsError::Http(_) => "Check the network connection and retry the failed recipients".to_string(),
            SmsError::CsvError(_) => {
                "Make sure the first row names the columns (name, contact, date, time, location, role)"
                    .to_string()
            }
            SmsError::IoError(_) => "Check that the file exists and is readable".to_string(),
            SmsError::SerializationError(_) => "The provider returned an unexpected response body".to_string(),
            SmsError::ConfigError { .. } | SmsError::InvalidConfigValueError { .. } => {
                "Fix the value in recruit-sms.toml or the matching environment variable".to_string()
            }
            SmsError::MissingConfigError { field } => {
                format!("Set {} in recruit-sms.toml or as an environment variable", field)
            }
            SmsError::UnknownTemplate { .. } => {
                "Run `recruit-sms templates` to list the template names".to_string()
            }
            SmsError::ParseError { .. } => {
                "Use one recipient per line: 이름 / 연락처 / 날짜 / 시간 / 장소 / 직무".to_string()
            }
            SmsError::EmptyContact => "Fill in the contact number for this recipient".to_string(),
            SmsError::EmptyName => "Fill in the name for this recipient".to_string(),
            SmsError::ProviderError { status, .. } if *status == 401 || *status == 403 => {
                "Check SOLAPI_API_KEY / SOLAPI_API_SECRET and that the sender number is registered"
                    .to_string()
            }
            SmsError::ProviderError { .. } => {
                "Check the recipient number and message length, then resend manually".to_string()
            }
            SmsError::RewriteError { .. } => {
                "The original template was kept; edit it by hand or try again later".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Recipient list problem: {}", self),
            ErrorCategory::Network => format!("Could not reach the service: {}", self),
            ErrorCategory::Provider => format!("The service refused the request: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SmsError>;
