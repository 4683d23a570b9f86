//! PhenoML workflow service adapter
//!
//! The [`WorkflowApi`] trait is the seam operations depend on; the reqwest
//! backed [`PhenomlClient`] implements it.

pub mod api;
pub mod client;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use api::WorkflowApi;
pub use client::PhenomlClient;
pub use models::{CreateProviderRequest, CreateWorkflowRequest};
