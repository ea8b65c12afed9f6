use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Client source request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SchedulerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SchedulerError::ConfigError { .. }
            | SchedulerError::ConfigValidationError { .. }
            | SchedulerError::InvalidConfigValueError { .. }
            | SchedulerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SchedulerError::CsvError(_) | SchedulerError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            SchedulerError::HttpError(_) => ErrorCategory::Network,
            SchedulerError::ZipError(_)
            | SchedulerError::IoError(_)
            | SchedulerError::SerializationError(_) => ErrorCategory::Output,
            SchedulerError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SchedulerError::HttpError(_) => ErrorSeverity::Medium,
            SchedulerError::CsvError(_)
            | SchedulerError::ValidationError { .. }
            | SchedulerError::ProcessingError { .. } => ErrorSeverity::High,
            SchedulerError::ConfigError { .. }
            | SchedulerError::ConfigValidationError { .. }
            | SchedulerError::InvalidConfigValueError { .. }
            | SchedulerError::MissingConfigError { .. } => ErrorSeverity::High,
            SchedulerError::ZipError(_)
            | SchedulerError::IoError(_)
            | SchedulerError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags or TOML file; team names must be unique and non-blank"
            }
            ErrorCategory::Input => {
                "Check the client CSV has a header row with at least a Name column"
            }
            ErrorCategory::Network => "Check the client source URL is reachable and retry",
            ErrorCategory::Output => {
                "Check the output directory exists and is writable, and that there is free disk space"
            }
            ErrorCategory::Processing => "Provide at least one client record and retry",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read client records: {}", self),
            ErrorCategory::Network => format!("Could not fetch client records: {}", self),
            ErrorCategory::Output => format!("Could not write the schedule: {}", self),
            ErrorCategory::Processing => format!("Scheduling did not run: {}", self),
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
