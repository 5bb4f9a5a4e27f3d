use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

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

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{service} returned HTTP {status}: {body}")]
    RemoteStatusError {
        service: String,
        status: u16,
        body: String,
    },

    #[error("{service} response could not be interpreted: {message}")]
    RemoteResponseError { service: String, message: String },

    #[error("No keywords were generated for seed '{seed}'")]
    NoKeywords { seed: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AgentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AgentError::ApiError(_)
            | AgentError::RemoteStatusError { .. }
            | AgentError::RemoteResponseError { .. } => ErrorCategory::Network,
            AgentError::ConfigError { .. }
            | AgentError::MissingConfigError { .. }
            | AgentError::InvalidConfigValueError { .. }
            | AgentError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AgentError::CsvError(_)
            | AgentError::SerializationError(_)
            | AgentError::NoKeywords { .. }
            | AgentError::ProcessingError { .. } => ErrorCategory::Data,
            AgentError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 遠端服務錯誤通常重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AgentError::ApiError(_) => {
                "Check the network connection and that the API endpoint is reachable".to_string()
            }
            AgentError::RemoteStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that the API key or access token is valid".to_string()
            }
            AgentError::RemoteStatusError { status, .. } if *status == 429 => {
                "The service is rate limiting requests; wait and retry".to_string()
            }
            AgentError::RemoteStatusError { .. } | AgentError::RemoteResponseError { .. } => {
                "Retry later; the remote service may be temporarily unavailable".to_string()
            }
            AgentError::MissingConfigError { field } => {
                format!("Set {} in the environment, a .env file or the config file", field)
            }
            AgentError::InvalidConfigValueError { field, .. }
            | AgentError::ConfigValidationError { field, .. } => {
                format!("Fix the value of {} and run again", field)
            }
            AgentError::ConfigError { .. } => "Review the configuration file".to_string(),
            AgentError::NoKeywords { .. } => {
                "Try a broader seed keyword or check the generative API quota".to_string()
            }
            AgentError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            AgentError::CsvError(_)
            | AgentError::SerializationError(_)
            | AgentError::ProcessingError { .. } => {
                "Run again with --verbose for more details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Remote service problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Processing problem: {}", self),
            ErrorCategory::Storage => format!("File system problem: {}", self),
        }
    }

    /// 依嚴重程度對應的程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}
