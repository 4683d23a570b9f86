//! Test-workflow command implementation
//!
//! Executes a workflow against test input and prints the result.

use super::{connect, report_error, CommandContext};
use crate::adapters::phenoml::WorkflowApi;
use crate::config::ConfigResolver;
use crate::core::{plan_test, run_test, write_json_output, TestOptions, TestPlan};
use crate::domain::exit_codes;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the test-workflow command
#[derive(Args, Debug, Default)]
pub struct TestWorkflowArgs {
    /// Workflow to execute
    #[arg(long)]
    pub workflow_id: Option<String>,

    /// Input data as a JSON string
    #[arg(long)]
    pub input_data: Option<String>,

    /// Read input data from a JSON file (takes precedence over --input-data)
    #[arg(long)]
    pub input_file: Option<PathBuf>,

    /// Also save the result to this file
    #[arg(long)]
    pub output_file: Option<PathBuf>,
}

impl TestWorkflowArgs {
    fn options(&self) -> TestOptions {
        TestOptions {
            workflow_id: self.workflow_id.clone(),
            input_data: self.input_data.clone(),
            input_file: self.input_file.clone(),
        }
    }

    /// Execute the test-workflow command
    pub async fn execute(
        &self,
        context: &CommandContext,
        resolver: &ConfigResolver,
    ) -> anyhow::Result<i32> {
        let plan = match plan_test(resolver, &self.options()) {
            Ok(plan) => plan,
            Err(e) => return Ok(report_error(context, &e)),
        };

        let client = match connect(resolver).await {
            Ok(client) => client,
            Err(e) => return Ok(report_error(context, &e)),
        };

        self.run(context, &client, &plan).await
    }

    /// Run `plan` through `api`, print the result and save it if requested
    pub async fn run(
        &self,
        context: &CommandContext,
        api: &dyn WorkflowApi,
        plan: &TestPlan,
    ) -> anyhow::Result<i32> {
        if !context.json {
            println!("🧪 Testing workflow {}", plan.workflow_id);
            if context.verbose {
                println!("   Input: {}", serde_json::to_string(&plan.input)?);
            }
        }

        let result = match run_test(api, plan).await {
            Ok(result) => result,
            Err(e) => return Ok(report_error(context, &e)),
        };

        if !context.json {
            println!("✅ Workflow executed");
            println!();
        }
        println!("{}", serde_json::to_string_pretty(&result)?);

        if let Some(path) = &self.output_file {
            if let Err(e) = write_json_output(path, &result) {
                return Ok(report_error(context, &e));
            }
            if !context.json {
                println!();
                println!("💾 Results saved to {}", path.display());
            }
        }

        Ok(exit_codes::SUCCESS)
    }
}
