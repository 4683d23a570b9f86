//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use crate::config::{ConfigKey, ConfigResolver, LoggingConfig, OverrideSource, DEFAULT_ENV_FILE};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PhenoML workflow tooling - configuration, provider setup and workflow runs
#[derive(Parser, Debug)]
#[command(name = "phenoml-workflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the `KEY=VALUE` configuration store
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE, env = "PHENOML_ENV_FILE")]
    pub env_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "PHENOML_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Also write JSON logs to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Show more detail (raises the default log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// PhenoML username
    #[arg(long, global = true)]
    pub phenoml_username: Option<String>,

    /// PhenoML password
    #[arg(long, global = true)]
    pub phenoml_password: Option<String>,

    /// PhenoML base URL (contains "experiment" on the shared deployment)
    #[arg(long, global = true)]
    pub phenoml_base_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report which settings are present and whether setup can proceed
    CheckEnv(commands::check_env::CheckEnvArgs),

    /// Register a FHIR provider and save FHIR_PROVIDER_ID
    SetupProvider(commands::setup_provider::SetupProviderArgs),

    /// Create a workflow and save WORKFLOW_ID
    CreateWorkflow(commands::create_workflow::CreateWorkflowArgs),

    /// Execute a workflow against test input
    TestWorkflow(commands::test_workflow::TestWorkflowArgs),
}

impl Cli {
    /// Effective log level; `--verbose` raises the default to debug
    pub fn effective_log_level(&self) -> &str {
        match self.log_level.as_deref() {
            Some(level) => level,
            None if self.verbose => "debug",
            None => "info",
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log_dir {
            Some(dir) => LoggingConfig::with_local_path(dir.clone()),
            None => LoggingConfig::default(),
        }
    }

    /// Values supplied by the global credential flags
    pub fn overrides(&self) -> OverrideSource {
        OverrideSource::new()
            .with(ConfigKey::PhenomlUsername, self.phenoml_username.as_deref())
            .with(ConfigKey::PhenomlPassword, self.phenoml_password.as_deref())
            .with(ConfigKey::PhenomlBaseUrl, self.phenoml_base_url.as_deref())
    }

    /// Resolver over the global credential flags, the environment and the
    /// store named by `--env-file`
    pub fn resolver(&self) -> Result<ConfigResolver> {
        Ok(ConfigResolver::from_env_file(&self.env_file)?.with_overrides(self.overrides()))
    }

    /// Shared output settings handed to every command
    pub fn context(&self) -> commands::CommandContext {
        commands::CommandContext {
            env_file: self.env_file.clone(),
            json: self.json,
            verbose: self.verbose,
        }
    }
}
