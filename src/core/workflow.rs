//! Workflow creation and test execution

use crate::adapters::phenoml::{CreateWorkflowRequest, WorkflowApi};
use crate::config::{parse_bool, ConfigKey, ConfigResolver, DeploymentMode, ResolvedValue};
use crate::domain::{PhenomlError, ProviderId, Result, WorkflowId};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line values for workflow creation
#[derive(Debug, Clone, Default)]
pub struct WorkflowOptions {
    pub name: Option<String>,
    pub instructions: Option<String>,
    /// Sample data as a JSON string
    pub sample_data: Option<String>,
    /// Boolean text (`true/1/yes/y`)
    pub dynamic_generation: Option<String>,
    /// Boolean text (`true/1/yes/y`)
    pub verbose: Option<String>,
    pub provider_id: Option<String>,
}

/// Resolve and validate a workflow creation request
///
/// The provider ID is required unless the deployment is the shared
/// experiment, where it is omitted when absent and the service uses its
/// pre-provisioned provider.
pub fn plan_workflow(
    resolver: &ConfigResolver,
    options: &WorkflowOptions,
) -> Result<CreateWorkflowRequest> {
    let name = resolver.require(ConfigKey::WorkflowName, options.name.as_deref())?;
    let instructions =
        resolver.require(ConfigKey::WorkflowInstructions, options.instructions.as_deref())?;
    let sample_data =
        resolver.require(ConfigKey::WorkflowSampleData, options.sample_data.as_deref())?;

    let fhir_provider_id =
        match resolver.resolve(ConfigKey::FhirProviderId, options.provider_id.as_deref()) {
            Some(value) => Some(
                ProviderId::new(value.expose())
                    .map_err(|e| PhenomlError::validation(ConfigKey::FhirProviderId.as_str(), e))?,
            ),
            None if resolver.deployment_mode() == DeploymentMode::Shared => None,
            None => {
                return Err(PhenomlError::configuration(
                    ConfigKey::FhirProviderId.as_str(),
                    ConfigKey::FhirProviderId.hint(),
                ))
            }
        };

    let sample_data = parse_json_value(ConfigKey::WorkflowSampleData, &sample_data)?;

    let flag = |key: ConfigKey, explicit: &Option<String>| {
        resolver
            .resolve_or_default(key, explicit.as_deref())
            .map(|v| parse_bool(&v))
            .unwrap_or(false)
    };

    Ok(CreateWorkflowRequest {
        name: name.expose().to_string(),
        workflow_instructions: instructions.expose().to_string(),
        sample_data,
        fhir_provider_id,
        verbose: flag(ConfigKey::WorkflowVerbose, &options.verbose),
        dynamic_generation: flag(ConfigKey::WorkflowDynamicGeneration, &options.dynamic_generation),
    })
}

/// Create the workflow with the service
pub async fn create_workflow(
    api: &dyn WorkflowApi,
    request: &CreateWorkflowRequest,
) -> Result<WorkflowId> {
    tracing::info!(
        name = %request.name,
        provider_id = ?request.fhir_provider_id.as_ref().map(ProviderId::as_str),
        dynamic_generation = request.dynamic_generation,
        verbose = request.verbose,
        "Creating workflow"
    );

    let workflow_id = api.create_workflow(request).await?;
    tracing::info!(workflow_id = %workflow_id, "Workflow created");
    Ok(workflow_id)
}

/// Command-line values for a workflow test run
#[derive(Debug, Clone, Default)]
pub struct TestOptions {
    pub workflow_id: Option<String>,
    /// Input data as a JSON string
    pub input_data: Option<String>,
    /// Path to a JSON file with input data; takes precedence over `input_data`
    pub input_file: Option<PathBuf>,
}

/// A resolved test run
#[derive(Debug, Clone)]
pub struct TestPlan {
    pub workflow_id: WorkflowId,
    pub input: Value,
}

/// Resolve the workflow ID and test input
///
/// Input precedence: input file, then the inline flag, then
/// `WORKFLOW_TEST_DATA`. Empty input (`null`, `{}`, `[]`, `""`, `false`, `0`)
/// counts as missing.
pub fn plan_test(resolver: &ConfigResolver, options: &TestOptions) -> Result<TestPlan> {
    let workflow_id = resolver.require(ConfigKey::WorkflowId, options.workflow_id.as_deref())?;
    let workflow_id = WorkflowId::new(workflow_id.expose())
        .map_err(|e| PhenomlError::validation(ConfigKey::WorkflowId.as_str(), e))?;

    let input = match &options.input_file {
        Some(path) => Some(read_json_file(path)?),
        None => resolver
            .resolve(ConfigKey::WorkflowTestData, options.input_data.as_deref())
            .map(|value| parse_json_value(ConfigKey::WorkflowTestData, &value))
            .transpose()?,
    };

    match input {
        Some(input) if !is_empty_input(&input) => Ok(TestPlan { workflow_id, input }),
        _ => Err(PhenomlError::configuration(
            ConfigKey::WorkflowTestData.as_str(),
            format!(
                "Input data is required. {}, or use --input-file",
                ConfigKey::WorkflowTestData.hint()
            ),
        )),
    }
}

/// Execute a planned test run
pub async fn run_test(api: &dyn WorkflowApi, plan: &TestPlan) -> Result<Value> {
    tracing::info!(workflow_id = %plan.workflow_id, "Executing workflow");
    let result = api.execute_workflow(&plan.workflow_id, &plan.input).await?;
    tracing::info!(workflow_id = %plan.workflow_id, "Workflow executed");
    Ok(result)
}

/// Write `value` as pretty-printed JSON to `path`
pub fn write_json_output(path: &Path, value: &Value) -> Result<()> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| PhenomlError::validation("output", e.to_string()))?;
    fs::write(path, body).map_err(|e| PhenomlError::persistence(path, e))?;
    tracing::info!(path = %path.display(), "Saved workflow results");
    Ok(())
}

fn parse_json_value(key: ConfigKey, value: &ResolvedValue) -> Result<Value> {
    serde_json::from_str(value.expose()).map_err(|e| {
        let field = if value.source() == "argument" {
            key.flag().to_string()
        } else {
            key.as_str().to_string()
        };
        PhenomlError::validation(field, format!("invalid JSON from {}: {e}", value.source()))
    })
}

fn read_json_file(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|e| PhenomlError::persistence(path, e))?;
    serde_json::from_str(&contents).map_err(|e| {
        PhenomlError::validation(
            "--input-file",
            format!("invalid JSON in file {}: {e}", path.display()),
        )
    })
}

fn is_empty_input(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
