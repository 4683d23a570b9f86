//! Request and response payloads for the workflow service

use crate::config::SecretString;
use crate::domain::ProviderId;
use serde::{Deserialize, Serialize};

/// Parameters for registering a FHIR provider
#[derive(Debug, Clone)]
pub struct CreateProviderRequest {
    pub name: String,
    /// Provider type (medplum, athena, epic, cerner, ...)
    pub provider: String,
    pub auth_method: String,
    pub base_url: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

/// Parameters for creating a workflow
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkflowRequest {
    pub name: String,
    pub workflow_instructions: String,
    pub sample_data: serde_json::Value,
    /// Omitted on the shared deployment, which supplies its own provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_provider_id: Option<ProviderId>,
    pub verbose: bool,
    pub dynamic_generation: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderData {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateProviderResponse {
    pub data: ProviderData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateWorkflowResponse {
    pub workflow_id: String,
}
