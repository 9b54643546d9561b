use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Question catalog unavailable at '{path}': {reason}")]
    CatalogUnavailable { path: String, reason: String },

    #[error("Usage file '{path}' is corrupt: {reason}")]
    UsagePersistenceCorrupt { path: String, reason: String },

    #[error("Failed to write usage file '{path}': {reason}")]
    UsagePersistenceWrite { path: String, reason: String },

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

    #[error("Catalog validation found {} issue(s)", .issues.len())]
    CatalogValidationError { issues: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Catalog,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrackerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::IoError(_)
            | TrackerError::SerializationError(_)
            | TrackerError::UsagePersistenceCorrupt { .. }
            | TrackerError::UsagePersistenceWrite { .. } => ErrorCategory::Storage,
            TrackerError::CatalogUnavailable { .. } | TrackerError::CatalogValidationError { .. } => {
                ErrorCategory::Catalog
            }
            TrackerError::ConfigError { .. }
            | TrackerError::ConfigValidationError { .. }
            | TrackerError::InvalidConfigValueError { .. }
            | TrackerError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// How bad the failure is for a running game session.
    ///
    /// Corrupt usage files are rebuilt and write failures leave the in-memory
    /// map authoritative, so neither stops play.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::UsagePersistenceCorrupt { .. } => ErrorSeverity::Low,
            TrackerError::UsagePersistenceWrite { .. } | TrackerError::CatalogValidationError { .. } => {
                ErrorSeverity::Medium
            }
            TrackerError::CatalogUnavailable { .. }
            | TrackerError::SerializationError(_)
            | TrackerError::ConfigError { .. }
            | TrackerError::ConfigValidationError { .. }
            | TrackerError::InvalidConfigValueError { .. }
            | TrackerError::MissingConfigError { .. } => ErrorSeverity::High,
            TrackerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackerError::CatalogUnavailable { path, .. } => {
                format!("Could not load questions from '{}'", path)
            }
            TrackerError::UsagePersistenceCorrupt { path, .. } => {
                format!("Saved progress in '{}' was unreadable and has been reset", path)
            }
            TrackerError::UsagePersistenceWrite { path, .. } => {
                format!("Progress could not be saved to '{}'", path)
            }
            TrackerError::CatalogValidationError { issues } => {
                format!("The question catalog has {} problem(s)", issues.len())
            }
            TrackerError::MissingConfigError { field } => {
                format!("Missing setting: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Storage => "Check that the usage file location is writable",
            ErrorCategory::Catalog => "Check that the catalog file exists and is valid JSON",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failures_are_not_critical() {
        let corrupt = TrackerError::UsagePersistenceCorrupt {
            path: "SaveFile.json".to_string(),
            reason: "expected value".to_string(),
        };
        assert_eq!(corrupt.category(), ErrorCategory::Storage);
        assert_eq!(corrupt.severity(), ErrorSeverity::Low);

        let write = TrackerError::UsagePersistenceWrite {
            path: "SaveFile.json".to_string(),
            reason: "read-only".to_string(),
        };
        assert!(write.severity() < ErrorSeverity::High);
    }

    #[test]
    fn test_user_friendly_message_names_the_file() {
        let err = TrackerError::CatalogUnavailable {
            path: "questions.json".to_string(),
            reason: "missing".to_string(),
        };
        assert!(err.user_friendly_message().contains("questions.json"));
        assert_eq!(err.category(), ErrorCategory::Catalog);
    }
}
