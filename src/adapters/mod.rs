//! External system integrations
//!
//! - [`phenoml`] - the PhenoML workflow service (provider registration,
//!   workflow creation and execution)
//!
//! Operations depend on the [`phenoml::WorkflowApi`] trait rather than the
//! HTTP client, so tests substitute an in-memory implementation.

pub mod phenoml;
