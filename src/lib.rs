//! Contact Store Library
//!
//! A Rust library for serving a contact directory out of a flat CSV file.
//! The file is the source of truth; the library keeps an in-memory,
//! validated copy of it and writes every change straight back.
//!
//! This library provides tools for:
//! - Parsing the four-column contact layout while capturing per-row, per-field
//!   validation diagnostics instead of failing the load
//! - Keeping the raw content of rejected rows so an operator can correct them
//! - Switching to indexed lookups and a bounded search cache for large files
//! - Aggregating load diagnostics into validation reports
//! - Serving CRUD, search, pagination and reporting over HTTP

pub mod config;
pub mod constants;
pub mod telemetry;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod contact_service;
        pub mod contact_validator;
        pub mod record_store;
        pub mod row_parser;
        pub mod validation_report;
    }
}

// HTTP surface
pub mod http;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{
    Contact, ContactPayload, FieldError, LoadResult, RawRowSnapshot, RowError, RowErrorKind,
    SearchCriteria, ValidationReport,
};
pub use app::services::contact_service::ContactService;
pub use app::services::record_store::ContactStore;
pub use config::{AppConfig, ServerConfig, StoreConfig};

/// Result type alias for contact store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`] values
///
/// The HTTP layer maps these to status codes; callers that only need to
/// branch on the failure category should match on this instead of the
/// full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Io,
    Format,
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Server,
}

/// Error types for contact store operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed
    #[error("CSV error in file '{file}': {message}")]
    Csv {
        file: String,
        message: String,
        #[source]
        source: csv::Error,
    },

    /// The source file is structurally unusable
    #[error("Format error in file '{file}': {message}")]
    Format { file: String, message: String },

    /// Request input failed validation
    #[error("Validation failed: {}", summarize_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// No contact with the given key
    #[error("Contact with key {key} not found")]
    NotFound { key: i64 },

    /// A contact with the given key already exists
    #[error("Contact with key {key} already exists")]
    Conflict { key: i64 },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// HTTP server failed to start or stopped unexpectedly
    #[error("Server error: {message}")]
    Server { message: String },
}

fn summarize_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv(file: impl Into<String>, message: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file format error
    pub fn format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a request validation error
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    /// Create a not found error
    pub fn not_found(key: i64) -> Self {
        Self::NotFound { key }
    }

    /// Create a duplicate key error
    pub fn conflict(key: i64) -> Self {
        Self::Conflict { key }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            // csv wraps the underlying file errors, so a failed open or
            // write surfaces here too
            Self::Csv { source, .. } if source.is_io_error() => ErrorKind::Io,
            Self::Csv { .. } | Self::Format { .. } => ErrorKind::Format,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Server { .. } => ErrorKind::Server,
        }
    }

    /// Field errors carried by a validation failure, empty otherwise
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors } => errors,
            _ => &[],
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            file: "unknown".to_string(),
            message: "CSV operation failed".to_string(),
            source: error,
        }
    }
}
