//! Error types and definitions for model-audit
//!
//! Findings about the templates themselves (parse failures, link mismatches,
//! model reconciliation problems) are data, not errors. The types here cover
//! operational failures: configuration, filesystem access and output writing.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for model-audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// The templates directory could not be listed
    #[error("Cannot read templates directory {path}: {message}")]
    TemplatesDirUnreadable { path: PathBuf, message: String },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Generic analysis failure with context
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV buffer could not be turned into text
    #[error("CSV serialization error: {message}")]
    CsvSerialize { message: String },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },
}

impl AuditError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AuditError::JsonParse { .. } => ErrorSeverity::Warning,

            AuditError::Config { .. } => ErrorSeverity::Critical,
            AuditError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            AuditError::ConfigRead { .. } => ErrorSeverity::Critical,
            AuditError::ConfigParse { .. } => ErrorSeverity::Critical,
            AuditError::InvalidPath { .. } => ErrorSeverity::Critical,
            AuditError::PermissionDenied { .. } => ErrorSeverity::Critical,
            AuditError::TemplatesDirUnreadable { .. } => ErrorSeverity::Critical,
            AuditError::OutputWrite { .. } => ErrorSeverity::Critical,
            AuditError::StdoutWrite { .. } => ErrorSeverity::Critical,
            AuditError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Process exit code for an error that aborted the run
    ///
    /// A run that did not complete never exits 0, whatever the severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Critical => 2,
            ErrorSeverity::Warning | ErrorSeverity::Error => 1,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AuditError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            AuditError::JsonParse { file, source } => {
                format!("Invalid JSON in '{}': {}. Please check the file format.", file.display(), source)
            }
            AuditError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            AuditError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid templates directory.", path.display())
            }
            AuditError::TemplatesDirUnreadable { path, message } => {
                format!("Cannot list templates in '{}': {}.", path.display(), message)
            }
            AuditError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            AuditError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            _ => self.to_string(),
        }
    }

    /// A hint for the user, when there is an obvious next step
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AuditError::InvalidPath { .. } | AuditError::TemplatesDirUnreadable { .. } => {
                Some("Check that --templates-dir points to an existing directory")
            }
            AuditError::PermissionDenied { .. } => Some("Grant read access to the templates directory"),
            AuditError::ConfigNotFound { .. } => {
                Some("Run with --init to create a .model-audit.toml, or drop the --config flag")
            }
            AuditError::ConfigParse { .. } => Some("Fix the TOML syntax in the configuration file"),
            AuditError::OutputDirectoryNotFound { .. } => {
                Some("Create the output directory first or specify a different path")
            }
            _ => None,
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        AuditError::Io { source }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AuditError::JsonParse {
            file: file.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        AuditError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        AuditError::PermissionDenied { path: path.into() }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        AuditError::Analysis {
            message: message.into(),
        }
    }

    /// Create an error for a templates directory that cannot be listed
    pub fn templates_dir_unreadable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AuditError::TemplatesDirUnreadable {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::io_error(err)
    }
}

impl From<glob::PatternError> for AuditError {
    fn from(err: glob::PatternError) -> Self {
        AuditError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::JsonSerialize { source: err }
    }
}

impl From<csv::Error> for AuditError {
    fn from(err: csv::Error) -> Self {
        AuditError::Csv { source: err }
    }
}

/// Result type alias for model-audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
