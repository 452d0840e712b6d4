use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

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

    #[error("{provider} provider failed: {message}")]
    ProviderError { provider: String, message: String },

    #[error("Unsupported file format: {path}")]
    UnsupportedFormatError { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    Provider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::IoError(_) => ErrorCategory::Io,
            AdvisorError::SerializationError(_)
            | AdvisorError::CsvError(_)
            | AdvisorError::UnsupportedFormatError { .. } => ErrorCategory::Data,
            AdvisorError::TomlError(_)
            | AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AdvisorError::ProviderError { .. } => ErrorCategory::Provider,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdvisorError::IoError(_) => "Check that the file exists and is readable",
            AdvisorError::SerializationError(_) => {
                "Make sure the JSON file matches the expected catalog/profile layout"
            }
            AdvisorError::CsvError(_) => {
                "CSV catalogs need the header: id,title,category,description,tags,difficulty"
            }
            AdvisorError::TomlError(_) => "Make sure the configuration is valid TOML",
            AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the configuration file"
            }
            AdvisorError::MissingConfigError { .. } => {
                "Add the missing field to the configuration file"
            }
            AdvisorError::ProviderError { .. } => {
                "Retry once the catalog/profile source is reachable"
            }
            AdvisorError::UnsupportedFormatError { .. } => {
                "Catalogs must be .json or .csv files, profiles must be .json"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a required file: {}", self),
            ErrorCategory::Configuration => format!("The advisor configuration is invalid: {}", self),
            ErrorCategory::Data => format!("Input data could not be read: {}", self),
            ErrorCategory::Provider => format!("A data source is unavailable: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
