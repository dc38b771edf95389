//! Error module
//!
//! Defines the error type for the CSV recorder using `thiserror`.
//! Every failure of a record call surfaces here; nothing is retried or logged
//! on the caller's behalf.

use std::path::PathBuf;
use thiserror::Error;

/// The error type returned by every fallible operation in this crate.
///
/// # Error Categories
///
/// - **Configuration errors**: unresolvable time zone, unsupported record type,
///   invalid CLI arguments, unreadable config file
/// - **Filesystem errors**: directory creation, file open, write and flush
///   failures, each carrying the offending path
/// - **Serialization errors**: payloads that do not serialize to a
///   string-keyed mapping
///
/// # Example
///
/// ```rust,ignore
/// use csv_recorder::error::RecorderError;
///
/// fn example() -> Result<(), RecorderError> {
///     let file = std::fs::File::open("missing.jsonl")?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum RecorderError {
    /// The reference time zone could not be resolved.
    #[error("failed to resolve time zone {0:?}")]
    TimeZone(String),

    /// The configured granularity is not one of `daily`, `monthly`, `yearly`.
    #[error("unsupported record type: {0:?}. Must be 'daily', 'monthly', or 'yearly'")]
    UnsupportedRecordType(String),

    /// Invalid command-line argument or argument combination.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A JSON config file could not be parsed.
    #[error("invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The target directory (or one of its parents) could not be created.
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target file could not be opened or created.
    #[error("failed to open/create CSV file {path:?}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The size of the target file could not be read.
    #[error("failed to get file info for {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the header or a data row failed.
    #[error("failed to write CSV record to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Flushing buffered rows to the file failed.
    #[error("failed to flush CSV file {path:?}: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload could not be serialized.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The payload serialized to something other than a string-keyed mapping.
    #[error("payload must serialize to a mapping, got {0}")]
    NotAMapping(&'static str),

    /// A line of CLI input is not valid JSON.
    #[error("invalid JSON payload on line {line}: {source}")]
    Payload {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// General I/O error outside the target file, e.g. reading CLI input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecorderError {
    /// Returns true for errors caused by configuration rather than data or I/O.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RecorderError::TimeZone(_)
                | RecorderError::UnsupportedRecordType(_)
                | RecorderError::InvalidArgument(_)
                | RecorderError::Config { .. }
        )
    }

    /// Returns true for errors raised by the filesystem or the CSV writer.
    #[must_use]
    pub fn is_filesystem_error(&self) -> bool {
        matches!(
            self,
            RecorderError::CreateDir { .. }
                | RecorderError::OpenFile { .. }
                | RecorderError::Metadata { .. }
                | RecorderError::Write { .. }
                | RecorderError::Flush { .. }
                | RecorderError::Io(_)
        )
    }
}
