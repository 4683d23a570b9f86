//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output on stderr
//! - configurable log levels (`--log-level`, `PHENOML_LOG_LEVEL`, `RUST_LOG`)
//! - optional JSON file logging with rotation (`--log-dir`)
//!
//! Secret values never appear in log fields; only key names and sources are
//! recorded.
//!
//! # Example
//!
//! ```no_run
//! use phenoml_workflow::logging::init_logging;
//! use phenoml_workflow::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a persisted generated identifier
///
/// # Example
///
/// ```no_run
/// use phenoml_workflow::log_generated_id;
///
/// log_generated_id!("WORKFLOW_ID", "wf-123", ".env");
/// ```
#[macro_export]
macro_rules! log_generated_id {
    ($key:expr, $id:expr, $path:expr) => {
        tracing::info!(
            key = %$key,
            id = %$id,
            path = %$path,
            "Saved generated identifier"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use phenoml_workflow::log_error_with_context;
/// use phenoml_workflow::domain::PhenomlError;
///
/// let error = PhenomlError::configuration("WORKFLOW_ID", "Set WORKFLOW_ID in .env");
/// log_error_with_context!(&error, "Failed to resolve workflow");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
