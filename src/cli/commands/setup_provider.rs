//! Setup-provider command implementation
//!
//! Registers a FHIR provider with PhenoML and saves `FHIR_PROVIDER_ID` to the
//! store. Skipped on the shared experiment deployment unless `--force`.

use super::{connect, report_error, CommandContext};
use crate::adapters::phenoml::{CreateProviderRequest, WorkflowApi};
use crate::config::{ConfigKey, ConfigResolver};
use crate::core::{create_provider, plan_provider, save_generated_id, ProviderOptions, ProviderPlan};
use crate::domain::exit_codes;
use clap::Args;

/// Arguments for the setup-provider command
#[derive(Args, Debug, Default)]
pub struct SetupProviderArgs {
    /// Display name for the provider [default: FHIR Server]
    #[arg(long)]
    pub name: Option<String>,

    /// Provider type (medplum, athena, epic, cerner, ...) [default: medplum]
    #[arg(long)]
    pub provider: Option<String>,

    /// Authentication method [default: client_secret]
    #[arg(long)]
    pub auth_method: Option<String>,

    /// FHIR server base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// OAuth client ID
    #[arg(long)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long)]
    pub client_secret: Option<String>,

    /// Register even on the shared experiment deployment
    #[arg(long)]
    pub force: bool,
}

impl SetupProviderArgs {
    fn options(&self) -> ProviderOptions {
        ProviderOptions {
            name: self.name.clone(),
            provider: self.provider.clone(),
            auth_method: self.auth_method.clone(),
            base_url: self.base_url.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            force: self.force,
        }
    }

    /// Execute the setup-provider command
    pub async fn execute(
        &self,
        context: &CommandContext,
        resolver: &ConfigResolver,
    ) -> anyhow::Result<i32> {
        let request = match self.plan(context, resolver) {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(exit_codes::SUCCESS),
            Err(code) => return Ok(code),
        };

        let client = match connect(resolver).await {
            Ok(client) => client,
            Err(e) => return Ok(report_error(context, &e)),
        };

        Ok(self.register(context, &client, &request).await)
    }

    /// Resolve the request; `Ok(None)` when registration is skipped
    fn plan(
        &self,
        context: &CommandContext,
        resolver: &ConfigResolver,
    ) -> Result<Option<CreateProviderRequest>, i32> {
        match plan_provider(resolver, &self.options()) {
            Ok(ProviderPlan::Create(request)) => Ok(Some(request)),
            Ok(ProviderPlan::UseShared) => {
                if context.json {
                    println!("{}", serde_json::json!({ "skipped": true, "reason": "shared deployment" }));
                } else {
                    println!("ℹ️  Shared experiment deployment detected");
                    println!("   A FHIR provider is already provisioned; no setup needed.");
                    println!("   Use --force to register your own provider anyway.");
                }
                Ok(None)
            }
            Err(e) => Err(report_error(context, &e)),
        }
    }

    /// Register the provider through `api` and save its ID
    ///
    /// The ID is printed before it is saved so a failed write never loses it.
    pub async fn register(
        &self,
        context: &CommandContext,
        api: &dyn WorkflowApi,
        request: &CreateProviderRequest,
    ) -> i32 {
        if !context.json {
            println!("🏥 Creating FHIR provider '{}' ({})", request.name, request.provider);
            println!("   Base URL: {}", request.base_url);
        }

        let provider_id = match create_provider(api, request).await {
            Ok(id) => id,
            Err(e) => return report_error(context, &e),
        };

        if context.json {
            println!("{}", serde_json::json!({ "fhir_provider_id": provider_id }));
        } else {
            println!("✅ FHIR provider created");
            println!("   FHIR_PROVIDER_ID={provider_id}");
        }

        let store = context.store();
        if let Err(e) = save_generated_id(&store, ConfigKey::FhirProviderId, provider_id.as_str()) {
            return report_error(context, &e);
        }
        if !context.json {
            println!("💾 Saved FHIR_PROVIDER_ID to {}", store.path().display());
        }
        exit_codes::SUCCESS
    }
}
