//! Domain error types
//!
//! This module defines the error hierarchy for the workflow tooling.
//! Errors are domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
///
/// Every fallible operation in the crate returns this type. The variants map
/// one-to-one onto the exit codes reported by the CLI.
#[derive(Debug, Error)]
pub enum PhenomlError {
    /// A required key has no value in any configuration source
    #[error("Missing required configuration: {key}. {hint}")]
    Configuration {
        /// Name of the missing key
        key: String,
        /// Remediation hint with an example value
        hint: String,
    },

    /// The configuration store or an input/output file could not be read or written
    #[error("Failed to access {}: {source}", path.display())]
    Persistence {
        /// Path of the store or output file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A supplied value failed a local shape check
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the malformed field or source
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Errors from the remote workflow service, passed through unmodified
    #[error("PhenoML API error: {0}")]
    Api(#[from] ApiError),
}

impl PhenomlError {
    /// Build a configuration error for a missing key
    pub fn configuration(key: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            hint: hint.into(),
        }
    }

    /// Build a persistence error for the given path
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Build a validation error for the given field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => exit_codes::CONFIGURATION,
            Self::Api(_) => exit_codes::REMOTE,
            Self::Persistence { .. } => exit_codes::FATAL,
            Self::Validation { .. } => exit_codes::VALIDATION,
        }
    }
}

/// Remote workflow service errors
///
/// Opaque to the rest of the crate. These errors don't expose the HTTP client
/// types and are never retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the service
    #[error("Failed to connect to PhenoML: {0}")]
    ConnectionFailed(String),

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Non-success HTTP status
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be interpreted
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

/// Process exit codes
pub mod exit_codes {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// Core credentials are incomplete; nothing else can run
    pub const CORE_INCOMPLETE: i32 = 1;
    /// A required configuration key is missing
    pub const CONFIGURATION: i32 = 2;
    /// Provider credentials are incomplete in dedicated mode
    pub const PROVIDER_INCOMPLETE: i32 = 3;
    /// The remote service returned an error
    pub const REMOTE: i32 = 4;
    /// Store I/O or other fatal error
    pub const FATAL: i32 = 5;
    /// A supplied value is malformed
    pub const VALIDATION: i32 = 6;
}
