// src/error.rs

//! Unified error handling for the fetchncache application.

use thiserror::Error;

/// Result type alias for fetchncache operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pattern string does not have the 3-component shape
    #[error("pattern {pattern:?} must have 3 components: DateTime-Timezone-Processing")]
    InvalidPattern { pattern: String },

    /// Timezone component is not UTC and not a known IANA name
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    /// Datetime format component is outside the supported set
    #[error(
        "unsupported datetime format: {0} (supported: DateTime, DateOnly, TimeOnly, RFC3339, Kitchen, Stamp, DATETIME_SIMPLE_FS)"
    )]
    UnsupportedDateTimeFormat(String),

    /// Processing component is outside the supported set
    #[error("unsupported processing: {0} (supported: slug, none)")]
    UnsupportedProcessing(String),

    /// Resolved path is empty
    #[error("path cannot be empty")]
    EmptyPath,

    /// Path template lacks the {pattern} placeholder
    #[error("path template must contain {{pattern}} placeholder")]
    MissingPlaceholder,

    /// Header line has no "name: value" separator
    #[error("invalid header format: {0:?} (expected 'name: value')")]
    MalformedHeader(String),

    /// Header name trims to nothing
    #[error("empty header name in: {0:?}")]
    EmptyHeaderName(String),

    /// Server answered with a status other than 200 OK
    #[error("received status {0}")]
    UnexpectedStatus(u16),

    /// Network-level failure that survived the retry budget
    #[error("fetching {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// File write failed
    #[error("writing {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a file-write error with the offending path.
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
