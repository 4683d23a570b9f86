//! HTTP client for the PhenoML workflow service
//!
//! Authenticates once with basic credentials to obtain a bearer token, then
//! sends JSON requests. Requests are not retried.

use super::api::WorkflowApi;
use super::models::{
    CreateProviderRequest, CreateProviderResponse, CreateWorkflowRequest, CreateWorkflowResponse,
    TokenResponse,
};
use crate::config::PhenomlCredentials;
use crate::domain::{ApiError, ProviderId, Result, WorkflowId};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Authenticated PhenoML client
///
/// # Example
///
/// ```no_run
/// use phenoml_workflow::adapters::phenoml::PhenomlClient;
/// use phenoml_workflow::config::{ConfigResolver, PhenomlCredentials};
///
/// # async fn example() -> phenoml_workflow::domain::Result<()> {
/// let resolver = ConfigResolver::from_env_file(".env")?;
/// let credentials = PhenomlCredentials::from_resolver(&resolver)?;
/// let client = PhenomlClient::connect(&credentials).await?;
/// println!("Connected to {}", client.base_url());
/// # Ok(())
/// # }
/// ```
pub struct PhenomlClient {
    base_url: String,
    client: Client,
    token: String,
}

impl PhenomlClient {
    /// Create a client and authenticate against `{base_url}/auth/token`
    ///
    /// # Errors
    ///
    /// Returns an API error if the service is unreachable, rejects the
    /// credentials or answers with an unexpected body.
    pub async fn connect(credentials: &PhenomlCredentials) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(300))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let base_url = credentials.base_url.trim_end_matches('/').to_string();
        let url = format!("{base_url}/auth/token");

        tracing::debug!(base_url = %base_url, "Requesting PhenoML access token");

        let response = client
            .post(&url)
            .basic_auth(
                &credentials.username,
                Some(credentials.password.expose_secret().as_str()),
            )
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let response = match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::AuthenticationFailed(body).into());
            }
            _ => check_status(response).await?,
        };

        let token: TokenResponse = parse_json(response).await?;
        tracing::info!(base_url = %base_url, "Authenticated with PhenoML");

        Ok(Self {
            base_url,
            client,
            token: token.token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(url = %url, "Sending PhenoML request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        parse_json(check_status(response).await?).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    }
    .into())
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()).into())
}

#[async_trait]
impl WorkflowApi for PhenomlClient {
    async fn create_fhir_provider(&self, request: &CreateProviderRequest) -> Result<ProviderId> {
        let body = serde_json::json!({
            "name": request.name,
            "provider": request.provider,
            "auth_method": request.auth_method,
            "base_url": request.base_url,
            "client_id": request.client_id,
            "client_secret": request.client_secret.expose_secret().as_str(),
        });

        let response: CreateProviderResponse = self.post_json("fhir-provider/create", &body).await?;
        ProviderId::new(response.data.id).map_err(|e| ApiError::InvalidResponse(e).into())
    }

    async fn create_workflow(&self, request: &CreateWorkflowRequest) -> Result<WorkflowId> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode request: {e}")))?;

        let response: CreateWorkflowResponse = self.post_json("workflows/create", &body).await?;
        WorkflowId::new(response.workflow_id).map_err(|e| ApiError::InvalidResponse(e).into())
    }

    async fn execute_workflow(
        &self,
        workflow_id: &WorkflowId,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let body = serde_json::json!({ "input_data": input });
        self.post_json(&format!("workflows/{workflow_id}/execute"), &body)
            .await
    }
}
