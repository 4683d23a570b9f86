//! Create-workflow command implementation
//!
//! Creates a workflow and saves `WORKFLOW_ID` to the store.

use super::{connect, report_error, CommandContext};
use crate::adapters::phenoml::{CreateWorkflowRequest, WorkflowApi};
use crate::config::{ConfigKey, ConfigResolver};
use crate::core::{create_workflow, plan_workflow, save_generated_id, WorkflowOptions};
use crate::domain::exit_codes;
use clap::Args;

/// Arguments for the create-workflow command
#[derive(Args, Debug, Default)]
pub struct CreateWorkflowArgs {
    /// Workflow name
    #[arg(long)]
    pub name: Option<String>,

    /// Natural-language workflow instructions
    #[arg(long)]
    pub instructions: Option<String>,

    /// Sample input data as a JSON string
    #[arg(long)]
    pub sample_data: Option<String>,

    /// Let the service generate FHIR queries dynamically (true/false) [default: true]
    #[arg(long)]
    pub dynamic_generation: Option<String>,

    /// Ask the service for verbose workflow output (true/false) [default: false]
    #[arg(long)]
    pub workflow_verbose: Option<String>,

    /// FHIR provider ID; optional on the shared experiment deployment
    #[arg(long)]
    pub provider_id: Option<String>,
}

impl CreateWorkflowArgs {
    fn options(&self) -> WorkflowOptions {
        WorkflowOptions {
            name: self.name.clone(),
            instructions: self.instructions.clone(),
            sample_data: self.sample_data.clone(),
            dynamic_generation: self.dynamic_generation.clone(),
            verbose: self.workflow_verbose.clone(),
            provider_id: self.provider_id.clone(),
        }
    }

    /// Execute the create-workflow command
    pub async fn execute(
        &self,
        context: &CommandContext,
        resolver: &ConfigResolver,
    ) -> anyhow::Result<i32> {
        let request = match plan_workflow(resolver, &self.options()) {
            Ok(request) => request,
            Err(e) => return Ok(report_error(context, &e)),
        };

        let client = match connect(resolver).await {
            Ok(client) => client,
            Err(e) => return Ok(report_error(context, &e)),
        };

        Ok(self.create(context, &client, &request).await)
    }

    /// Create the workflow through `api` and save its ID
    pub async fn create(
        &self,
        context: &CommandContext,
        api: &dyn WorkflowApi,
        request: &CreateWorkflowRequest,
    ) -> i32 {
        if !context.json {
            println!("🔧 Creating workflow '{}'", request.name);
            match &request.fhir_provider_id {
                Some(id) => println!("   FHIR provider: {id}"),
                None => println!("   FHIR provider: shared deployment default"),
            }
            println!(
                "   Dynamic generation: {}, verbose: {}",
                request.dynamic_generation, request.verbose
            );
        }

        let workflow_id = match create_workflow(api, request).await {
            Ok(id) => id,
            Err(e) => return report_error(context, &e),
        };

        if context.json {
            println!("{}", serde_json::json!({ "workflow_id": workflow_id }));
        } else {
            println!("✅ Workflow created");
            println!("   WORKFLOW_ID={workflow_id}");
        }

        let store = context.store();
        if let Err(e) = save_generated_id(&store, ConfigKey::WorkflowId, workflow_id.as_str()) {
            return report_error(context, &e);
        }
        if !context.json {
            println!("💾 Saved WORKFLOW_ID to {}", store.path().display());
            println!();
            println!("Next: run `phenoml-workflow test-workflow` to try it");
        }
        exit_codes::SUCCESS
    }
}
