//! Core error types for cogniwell-core.
//!
//! This module defines a comprehensive error hierarchy using thiserror
//! for better error handling and reporting across the library.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cogniwell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// State store errors
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Request/response validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Generation service errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Schema validation errors.
///
/// Every variant names the offending field so callers can log a precise
/// diagnostic without inspecting the raw request again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// A field holds a value of the wrong primitive type
    #[error("Field '{field}' must be a {expected}")]
    WrongType { field: String, expected: String },

    /// A required string field is present but empty
    #[error("Field '{field}' must be a non-empty string")]
    EmptyField { field: String },

    /// An enum field holds a value outside its declared set
    #[error("Field '{field}' has value '{value}', expected one of: {allowed}")]
    NotInEnum {
        field: String,
        value: String,
        allowed: String,
    },

    /// The request is not a JSON object at all
    #[error("Request for '{schema}' must be a JSON object")]
    NotAnObject { schema: String },
}

/// Errors from the external generation service boundary.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No API key stored, or endpoint not configured
    #[error("Generation service not configured: {0}")]
    NotConfigured(String),

    /// The HTTP request itself failed (connect, timeout)
    #[error("Generation request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status
    #[error("Generation service error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered but the payload is not usable JSON
    #[error("Malformed generation output: {0}")]
    MalformedOutput(String),

    /// The service answered with an empty completion
    #[error("Generation service returned an empty completion")]
    EmptyOutput,
}

/// State-store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the state document
    #[error("Failed to load state from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the state document
    #[error("Failed to save state to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// The state document exists but cannot be parsed
    #[error("Failed to parse state document: {0}")]
    ParseFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Request(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
