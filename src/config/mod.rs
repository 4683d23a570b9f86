//! Configuration and credential state management.
//!
//! # Overview
//!
//! Settings are resolved from layered sources in priority order:
//!
//! 1. Explicit overrides (command-line flags)
//! 2. The process environment
//! 3. The persisted store, a `.env` file of `KEY=VALUE` lines
//!
//! A key is present when any source yields a non-empty value. The resolver is
//! an explicit value passed to every operation; the process environment is
//! never modified.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use phenoml_workflow::config::{ConfigKey, ConfigResolver, EnvStore};
//!
//! # fn example() -> phenoml_workflow::domain::Result<()> {
//! let resolver = ConfigResolver::from_env_file(".env")?;
//! println!("Deployment mode: {}", resolver.deployment_mode());
//!
//! if resolver.resolve(ConfigKey::FhirProviderId, None).is_none() {
//!     EnvStore::new(".env").write(ConfigKey::FhirProviderId.as_str(), "abc123")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`keys`] - The table of recognized keys, categories, flags and examples
//! - [`store`] - Reading and updating the `.env` store
//! - [`resolver`] - Layered sources and resolution
//! - [`mode`] - Shared/dedicated deployment classification
//! - [`schema`] - Typed sections (credentials, logging)
//! - [`secret`] - Redacting wrapper for resolved values

pub mod keys;
pub mod mode;
pub mod resolver;
pub mod schema;
pub mod secret;
pub mod store;

// Re-export commonly used types
pub use keys::{ConfigKey, KeyCategory};
pub use mode::{DeploymentMode, Requirement};
pub use resolver::{
    parse_bool, ConfigResolver, ConfigSource, OverrideSource, ProcessEnvSource, ResolvedConfig,
    ResolvedValue, StoreSource,
};
pub use schema::{validate_http_url, LoggingConfig, PhenomlCredentials};
pub use secret::{secret_string, SecretString, SecretValue};
pub use store::{EnvStore, StoreSnapshot, DEFAULT_ENV_FILE};
