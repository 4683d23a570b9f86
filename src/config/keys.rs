//! Recognized configuration keys
//!
//! The single table of every key the tooling reads or writes, its category,
//! the CLI flag that overrides it and an example value used in remediation
//! hints.

use std::fmt;

/// Category a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// Needed to reach the workflow service at all
    Core,
    /// Needed to register a FHIR provider (dedicated mode only)
    Provider,
    /// Identifiers written back by setup operations
    Generated,
    /// Optional provider registration settings with defaults
    ProviderOptions,
    /// Inputs to workflow creation and testing
    WorkflowParams,
}

/// A named configuration setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    PhenomlUsername,
    PhenomlPassword,
    PhenomlBaseUrl,
    FhirProviderBaseUrl,
    FhirProviderClientId,
    FhirProviderClientSecret,
    FhirProviderId,
    WorkflowId,
    FhirProviderName,
    FhirProviderType,
    FhirAuthMethod,
    WorkflowName,
    WorkflowInstructions,
    WorkflowSampleData,
    WorkflowTestData,
    WorkflowDynamicGeneration,
    WorkflowVerbose,
}

impl ConfigKey {
    /// Every recognized key, in display order
    pub const ALL: [ConfigKey; 17] = [
        ConfigKey::PhenomlUsername,
        ConfigKey::PhenomlPassword,
        ConfigKey::PhenomlBaseUrl,
        ConfigKey::FhirProviderBaseUrl,
        ConfigKey::FhirProviderClientId,
        ConfigKey::FhirProviderClientSecret,
        ConfigKey::FhirProviderId,
        ConfigKey::WorkflowId,
        ConfigKey::FhirProviderName,
        ConfigKey::FhirProviderType,
        ConfigKey::FhirAuthMethod,
        ConfigKey::WorkflowName,
        ConfigKey::WorkflowInstructions,
        ConfigKey::WorkflowSampleData,
        ConfigKey::WorkflowTestData,
        ConfigKey::WorkflowDynamicGeneration,
        ConfigKey::WorkflowVerbose,
    ];

    /// Keys in `category`, in display order
    pub fn in_category(category: KeyCategory) -> Vec<ConfigKey> {
        Self::ALL
            .iter()
            .copied()
            .filter(|key| key.category() == category)
            .collect()
    }

    /// The environment-style name of the key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhenomlUsername => "PHENOML_USERNAME",
            Self::PhenomlPassword => "PHENOML_PASSWORD",
            Self::PhenomlBaseUrl => "PHENOML_BASE_URL",
            Self::FhirProviderBaseUrl => "FHIR_PROVIDER_BASE_URL",
            Self::FhirProviderClientId => "FHIR_PROVIDER_CLIENT_ID",
            Self::FhirProviderClientSecret => "FHIR_PROVIDER_CLIENT_SECRET",
            Self::FhirProviderId => "FHIR_PROVIDER_ID",
            Self::WorkflowId => "WORKFLOW_ID",
            Self::FhirProviderName => "FHIR_PROVIDER_NAME",
            Self::FhirProviderType => "FHIR_PROVIDER_TYPE",
            Self::FhirAuthMethod => "FHIR_AUTH_METHOD",
            Self::WorkflowName => "WORKFLOW_NAME",
            Self::WorkflowInstructions => "WORKFLOW_INSTRUCTIONS",
            Self::WorkflowSampleData => "WORKFLOW_SAMPLE_DATA",
            Self::WorkflowTestData => "WORKFLOW_TEST_DATA",
            Self::WorkflowDynamicGeneration => "WORKFLOW_DYNAMIC_GENERATION",
            Self::WorkflowVerbose => "WORKFLOW_VERBOSE",
        }
    }

    /// Look a key up by its environment-style name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }

    pub fn category(&self) -> KeyCategory {
        match self {
            Self::PhenomlUsername | Self::PhenomlPassword | Self::PhenomlBaseUrl => {
                KeyCategory::Core
            }
            Self::FhirProviderBaseUrl
            | Self::FhirProviderClientId
            | Self::FhirProviderClientSecret => KeyCategory::Provider,
            Self::FhirProviderId | Self::WorkflowId => KeyCategory::Generated,
            Self::FhirProviderName | Self::FhirProviderType | Self::FhirAuthMethod => {
                KeyCategory::ProviderOptions
            }
            Self::WorkflowName
            | Self::WorkflowInstructions
            | Self::WorkflowSampleData
            | Self::WorkflowTestData
            | Self::WorkflowDynamicGeneration
            | Self::WorkflowVerbose => KeyCategory::WorkflowParams,
        }
    }

    /// CLI flag that overrides this key
    pub fn flag(&self) -> &'static str {
        match self {
            Self::PhenomlUsername => "--phenoml-username",
            Self::PhenomlPassword => "--phenoml-password",
            Self::PhenomlBaseUrl => "--phenoml-base-url",
            Self::FhirProviderBaseUrl => "--base-url",
            Self::FhirProviderClientId => "--client-id",
            Self::FhirProviderClientSecret => "--client-secret",
            Self::FhirProviderId => "--provider-id",
            Self::WorkflowId => "--workflow-id",
            Self::FhirProviderName => "--name",
            Self::FhirProviderType => "--provider",
            Self::FhirAuthMethod => "--auth-method",
            Self::WorkflowName => "--name",
            Self::WorkflowInstructions => "--instructions",
            Self::WorkflowSampleData => "--sample-data",
            Self::WorkflowTestData => "--input-data",
            Self::WorkflowDynamicGeneration => "--dynamic-generation",
            Self::WorkflowVerbose => "--workflow-verbose",
        }
    }

    /// Example value shown in remediation hints
    pub fn example(&self) -> &'static str {
        match self {
            Self::PhenomlUsername => "your_username",
            Self::PhenomlPassword => "your_password",
            Self::PhenomlBaseUrl => "https://experiment.app.pheno.ml",
            Self::FhirProviderBaseUrl => "https://api.medplum.com/fhir/R4",
            Self::FhirProviderClientId => "your_client_id",
            Self::FhirProviderClientSecret => "your_client_secret",
            Self::FhirProviderId => "your_provider_id",
            Self::WorkflowId => "your_workflow_id",
            Self::FhirProviderName => "FHIR Server",
            Self::FhirProviderType => "medplum",
            Self::FhirAuthMethod => "client_secret",
            Self::WorkflowName => "Patient Intake",
            Self::WorkflowInstructions => "Create a Patient resource from the intake form",
            Self::WorkflowSampleData => r#"{"patient": "Smith"}"#,
            Self::WorkflowTestData => r#"{"patient": "Smith"}"#,
            Self::WorkflowDynamicGeneration => "true",
            Self::WorkflowVerbose => "false",
        }
    }

    /// Default applied when no source supplies the key
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            Self::FhirProviderName => Some("FHIR Server"),
            Self::FhirProviderType => Some("medplum"),
            Self::FhirAuthMethod => Some("client_secret"),
            Self::WorkflowDynamicGeneration => Some("true"),
            Self::WorkflowVerbose => Some("false"),
            _ => None,
        }
    }

    /// Whether the value must never be echoed
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::PhenomlPassword | Self::FhirProviderClientSecret)
    }

    /// Remediation hint naming the sources that can supply the key
    pub fn hint(&self) -> String {
        let mut hint = format!(
            "Set {key} in .env, or use {flag} (example: {key}={example})",
            key = self.as_str(),
            flag = self.flag(),
            example = self.example()
        );
        match self {
            Self::FhirProviderId => {
                hint.push_str("; run `phenoml-workflow setup-provider` to create one");
            }
            Self::WorkflowId => {
                hint.push_str("; run `phenoml-workflow create-workflow` to create one");
            }
            _ => {}
        }
        hint
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Hint for a key name outside the table
pub fn hint_for(name: &str) -> String {
    match ConfigKey::from_name(name) {
        Some(key) => key.hint(),
        None => format!("Set {name} in .env or the environment (example: {name}=your_value)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_table() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_name(key.as_str()), Some(key));
        }
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(ConfigKey::from_name("workflow_id"), None);
        assert_eq!(ConfigKey::from_name("WORKFLOW_ID"), Some(ConfigKey::WorkflowId));
    }

    #[test]
    fn test_gated_categories() {
        assert_eq!(
            ConfigKey::in_category(KeyCategory::Core),
            vec![
                ConfigKey::PhenomlUsername,
                ConfigKey::PhenomlPassword,
                ConfigKey::PhenomlBaseUrl
            ]
        );
        assert_eq!(
            ConfigKey::in_category(KeyCategory::Provider),
            vec![
                ConfigKey::FhirProviderBaseUrl,
                ConfigKey::FhirProviderClientId,
                ConfigKey::FhirProviderClientSecret
            ]
        );
        assert_eq!(
            ConfigKey::in_category(KeyCategory::Generated),
            vec![ConfigKey::FhirProviderId, ConfigKey::WorkflowId]
        );
    }

    #[test]
    fn test_hint_contains_flag_and_example() {
        let hint = ConfigKey::FhirProviderBaseUrl.hint();
        assert!(hint.contains("--base-url"));
        assert!(hint.contains("FHIR_PROVIDER_BASE_URL=https://api.medplum.com/fhir/R4"));
    }

    #[test]
    fn test_hint_for_unknown_key() {
        let hint = hint_for("CUSTOM_KEY");
        assert!(hint.contains("CUSTOM_KEY=your_value"));
    }

    #[test]
    fn test_secret_keys() {
        assert!(ConfigKey::PhenomlPassword.is_secret());
        assert!(ConfigKey::FhirProviderClientSecret.is_secret());
        assert!(!ConfigKey::PhenomlUsername.is_secret());
    }
}
