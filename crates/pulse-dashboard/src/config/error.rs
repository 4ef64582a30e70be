//! Configuration error types for loading and parsing TOML config files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("Invalid configuration at {path}:{line}:{column}: {message}")]
    ParseError {
        /// Path to the file containing the error.
        path: PathBuf,
        /// One-based line index of the error (0 if unknown).
        line: usize,
        /// One-based column index of the error (0 if unknown).
        column: usize,
        /// Human-readable description of the parse failure.
        message: String,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    NotFound {
        /// Path that was requested but does not exist.
        path: PathBuf,
    },

    /// A configuration file already exists at the target path.
    #[error("Configuration file already exists: {path}")]
    AlreadyExists {
        /// Path where the file already exists.
        path: PathBuf,
    },

    /// Failed to write a configuration file to disk.
    #[error("Failed to write configuration file: {path}")]
    WriteError {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration to TOML.
    #[error("Failed to serialize configuration: {message}")]
    SerializeError {
        /// Description of the serialization failure.
        message: String,
    },

    /// A duration string could not be parsed.
    #[error("Invalid duration for {field}: {value:?} ({message})")]
    InvalidDuration {
        /// Dotted key of the offending field (e.g. `feed.interval`).
        field: &'static str,
        /// The rejected input.
        value: String,
        /// Parser message.
        message: String,
    },

    /// A value is well-typed but out of range.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Dotted key of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
