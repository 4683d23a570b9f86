//! CLI command implementations
//!
//! Each command returns a process exit code. Errors from the operations are
//! reported here and mapped through [`PhenomlError::exit_code`].

pub mod check_env;
pub mod create_workflow;
pub mod setup_provider;
pub mod test_workflow;

use crate::adapters::phenoml::PhenomlClient;
use crate::config::{ConfigResolver, EnvStore, PhenomlCredentials};
use crate::domain::{PhenomlError, Result};
use std::path::PathBuf;

/// Global settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Store that generated identifiers are saved to
    pub env_file: PathBuf,
    /// Print JSON documents instead of text
    pub json: bool,
    pub verbose: bool,
}

impl CommandContext {
    pub fn store(&self) -> EnvStore {
        EnvStore::new(&self.env_file)
    }
}

/// Resolve the core credentials and authenticate
pub async fn connect(resolver: &ConfigResolver) -> Result<PhenomlClient> {
    let credentials = PhenomlCredentials::from_resolver(resolver)?;
    PhenomlClient::connect(&credentials).await
}

/// Print `error` and return its exit code
pub fn report_error(context: &CommandContext, error: &PhenomlError) -> i32 {
    crate::log_error_with_context!(error, "Command failed");
    let exit_code = error.exit_code();
    if context.json {
        let body = serde_json::json!({
            "error": error.to_string(),
            "exit_code": exit_code,
        });
        println!("{body}");
    } else {
        println!("❌ {}", error_title(error));
        println!("   Error: {error}");
    }
    exit_code
}

fn error_title(error: &PhenomlError) -> &'static str {
    match error {
        PhenomlError::Configuration { .. } => "Missing configuration",
        PhenomlError::Validation { .. } => "Invalid input",
        PhenomlError::Persistence { .. } => "File access failed",
        PhenomlError::Api(_) => "PhenoML request failed",
    }
}
