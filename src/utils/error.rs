use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillSwapError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("User not found: {email}")]
    UserNotFound { email: String },

    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {message}")]
    PasswordHashError { message: String },

    #[error("Profile source error: {message}")]
    SourceError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Authentication,
    Storage,
    Network,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SkillSwapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. }
            | Self::UserNotFound { .. }
            | Self::DuplicateEmail { .. } => ErrorCategory::Input,
            Self::InvalidCredentials | Self::PasswordHashError { .. } => {
                ErrorCategory::Authentication
            }
            Self::IoError(_) | Self::ZipError(_) => ErrorCategory::Storage,
            Self::HttpError(_) | Self::SourceError { .. } => ErrorCategory::Network,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HttpError(_) | Self::SourceError { .. } => ErrorSeverity::Medium,
            Self::IoError(_) | Self::PasswordHashError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::UserNotFound { email } => format!("No account is registered for {}", email),
            Self::DuplicateEmail { email } => format!("{} is already registered", email),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::ValidationError { message } => format!("Invalid input: {}", message),
            Self::HttpError(_) | Self::SourceError { .. } => {
                "Could not load profiles from the remote source".to_string()
            }
            Self::IoError(e) => format!("Could not access the data directory: {}", e),
            Self::SerializationError(_) => "The profile data file is corrupted".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the configuration file and command-line flags",
            ErrorCategory::Input => "Check the email address and skill names you entered",
            ErrorCategory::Authentication => "Check the password, or register a new account",
            ErrorCategory::Storage => "Make sure the data directory exists and is writable",
            ErrorCategory::Network => "Check the source endpoint and your network connection",
            ErrorCategory::Processing => "Inspect the profile document for malformed records",
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillSwapError>;
