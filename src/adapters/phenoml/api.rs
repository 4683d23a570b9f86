//! Workflow service trait
//!
//! The remote PhenoML service is an external collaborator. Setup operations
//! depend only on this trait, so they can run against the HTTP client or an
//! in-memory fake.

use super::models::{CreateProviderRequest, CreateWorkflowRequest};
use crate::domain::{ProviderId, Result, WorkflowId};
use async_trait::async_trait;

/// Operations the tooling needs from the workflow service
///
/// Errors are returned as [`crate::domain::PhenomlError::Api`] and are never
/// retried by callers.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Register a FHIR provider and return its identifier
    async fn create_fhir_provider(&self, request: &CreateProviderRequest) -> Result<ProviderId>;

    /// Create a workflow and return its identifier
    async fn create_workflow(&self, request: &CreateWorkflowRequest) -> Result<WorkflowId>;

    /// Run a workflow against `input` and return the raw result document
    async fn execute_workflow(
        &self,
        workflow_id: &WorkflowId,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value>;
}
