// PhenoML Workflow - configuration and credential tooling for PhenoML workflows
// Copyright (c) 2025 PhenoML Workflow Contributors
// Licensed under the MIT License

//! # PhenoML Workflow
//!
//! Configuration and credential state management for PhenoML workflow
//! scripts: register a FHIR provider, create a workflow and run it against
//! test data.
//!
//! ## Overview
//!
//! - **Resolving** settings from command-line flags, the process environment
//!   and a `KEY=VALUE` store file, in that order
//! - **Classifying** the deployment as the shared experiment instance or a
//!   dedicated one, which decides whether FHIR provider credentials are needed
//! - **Persisting** generated identifiers (`FHIR_PROVIDER_ID`, `WORKFLOW_ID`)
//!   back to the store without disturbing other lines
//! - **Reporting** configuration status as text or JSON, with exit codes
//!   scripts can gate on
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Operations (status gate, provider setup, workflows)
//! - [`adapters`] - The PhenoML HTTP service
//! - [`domain`] - Identifiers and errors
//! - [`config`] - Keys, sources, resolution and the store
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use phenoml_workflow::config::ConfigResolver;
//! use phenoml_workflow::core::StatusReport;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = ConfigResolver::from_env_file(".env")?;
//! let report = StatusReport::from_config(&resolver.snapshot());
//!
//! println!("{}", report.format_text(false)?);
//! std::process::exit(report.outcome().exit_code());
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`domain::PhenomlError`], whose variants map onto
//! the CLI exit codes in [`domain::exit_codes`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
