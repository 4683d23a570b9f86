//! FHIR provider registration
//!
//! Provider credentials are only needed on a dedicated deployment. On the
//! shared experiment deployment a provider is pre-provisioned and
//! registration is skipped unless forced.

use crate::adapters::phenoml::{CreateProviderRequest, WorkflowApi};
use crate::config::{validate_http_url, ConfigKey, ConfigResolver, DeploymentMode, KeyCategory};
use crate::domain::{PhenomlError, ProviderId, Result};

/// Example FHIR base URLs shown when the provider URL is missing
pub const FHIR_BASE_URL_EXAMPLES: [(&str, &str); 4] = [
    ("Medplum", "https://api.medplum.com/fhir/R4"),
    ("Athena", "https://api.preview.platform.athenahealth.com/fhir/r4"),
    ("Epic", "https://fhir.epic.com/interconnect-fhir-oauth/api/FHIR/R4"),
    ("Cerner", "https://fhir-myrecord.cerner.com/r4/[tenant-id]"),
];

/// Command-line values for provider registration; `None` falls through to
/// the environment and store
#[derive(Debug, Clone, Default)]
pub struct ProviderOptions {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub auth_method: Option<String>,
    pub base_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Register even on the shared deployment
    pub force: bool,
}

/// What registration will do
#[derive(Debug)]
pub enum ProviderPlan {
    /// Register a new provider with this request
    Create(CreateProviderRequest),
    /// Shared deployment; the pre-provisioned provider is used
    UseShared,
}

/// Resolve and validate everything needed to register a provider
///
/// # Errors
///
/// Returns a configuration error naming the first missing core or provider
/// key, or a validation error when the FHIR base URL is malformed.
pub fn plan_provider(resolver: &ConfigResolver, options: &ProviderOptions) -> Result<ProviderPlan> {
    for key in ConfigKey::in_category(KeyCategory::Core) {
        resolver.require(key, None)?;
    }

    let mode = resolver.deployment_mode();
    if mode == DeploymentMode::Shared && !options.force {
        tracing::info!(mode = %mode, "Skipping provider registration on shared deployment");
        return Ok(ProviderPlan::UseShared);
    }

    let base_url = resolver
        .resolve(ConfigKey::FhirProviderBaseUrl, options.base_url.as_deref())
        .ok_or_else(|| {
            PhenomlError::configuration(
                ConfigKey::FhirProviderBaseUrl.as_str(),
                base_url_hint(),
            )
        })?;
    validate_http_url(ConfigKey::FhirProviderBaseUrl.as_str(), base_url.expose())?;

    let client_id = resolver.require(ConfigKey::FhirProviderClientId, options.client_id.as_deref())?;
    let client_secret = resolver.require(
        ConfigKey::FhirProviderClientSecret,
        options.client_secret.as_deref(),
    )?;

    let setting = |key: ConfigKey, explicit: &Option<String>| {
        resolver
            .resolve_or_default(key, explicit.as_deref())
            .unwrap_or_default()
    };

    Ok(ProviderPlan::Create(CreateProviderRequest {
        name: setting(ConfigKey::FhirProviderName, &options.name),
        provider: setting(ConfigKey::FhirProviderType, &options.provider),
        auth_method: setting(ConfigKey::FhirAuthMethod, &options.auth_method),
        base_url: base_url.expose().to_string(),
        client_id: client_id.expose().to_string(),
        client_secret: client_secret.secret().clone(),
    }))
}

/// Register the provider with the workflow service
pub async fn create_provider(
    api: &dyn WorkflowApi,
    request: &CreateProviderRequest,
) -> Result<ProviderId> {
    tracing::info!(
        name = %request.name,
        provider = %request.provider,
        base_url = %request.base_url,
        auth_method = %request.auth_method,
        "Creating FHIR provider"
    );

    let provider_id = api.create_fhir_provider(request).await?;
    tracing::info!(provider_id = %provider_id, "FHIR provider created");
    Ok(provider_id)
}

fn base_url_hint() -> String {
    let examples = FHIR_BASE_URL_EXAMPLES
        .iter()
        .map(|(vendor, url)| format!("{vendor}: {url}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}. Example values: {examples}", ConfigKey::FhirProviderBaseUrl.hint())
}
