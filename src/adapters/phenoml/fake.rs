//! In-memory [`WorkflowApi`] for tests

use super::api::WorkflowApi;
use super::models::{CreateProviderRequest, CreateWorkflowRequest};
use crate::domain::{ApiError, ProviderId, Result, WorkflowId};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// Records requests and answers with fixed identifiers
pub struct FakeApi {
    pub provider_id: String,
    pub workflow_id: String,
    pub result: Value,
    /// When set, every call fails with this HTTP status
    pub fail_status: Option<u16>,
    pub workflow_requests: Mutex<Vec<CreateWorkflowRequest>>,
    pub executions: Mutex<Vec<(String, Value)>>,
    pub provider_requests: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            provider_id: "prov-1".to_string(),
            workflow_id: "wf-1".to_string(),
            result: serde_json::json!({"success": true}),
            fail_status: None,
            workflow_requests: Mutex::new(Vec::new()),
            executions: Mutex::new(Vec::new()),
            provider_requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        match self.fail_status {
            Some(status) => Err(ApiError::Status {
                status,
                message: "fake failure".to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WorkflowApi for FakeApi {
    async fn create_fhir_provider(&self, request: &CreateProviderRequest) -> Result<ProviderId> {
        self.check()?;
        self.provider_requests.lock().unwrap().push(request.name.clone());
        Ok(ProviderId::new(self.provider_id.clone()).unwrap())
    }

    async fn create_workflow(&self, request: &CreateWorkflowRequest) -> Result<WorkflowId> {
        self.check()?;
        self.workflow_requests.lock().unwrap().push(request.clone());
        Ok(WorkflowId::new(self.workflow_id.clone()).unwrap())
    }

    async fn execute_workflow(&self, workflow_id: &WorkflowId, input: &Value) -> Result<Value> {
        self.check()?;
        self.executions
            .lock()
            .unwrap()
            .push((workflow_id.to_string(), input.clone()));
        Ok(self.result.clone())
    }
}
