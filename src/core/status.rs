//! Configuration status report
//!
//! Reports which configuration keys are present, grouped into core
//! credentials, FHIR provider credentials and generated identifiers. The
//! report holds presence flags only; values never enter it. Text and JSON
//! renderings are both derived from the same [`StatusReport`].

use crate::config::{ConfigKey, DeploymentMode, KeyCategory, Requirement, ResolvedConfig};
use crate::domain::exit_codes;
use serde::ser::{Serialize, Serializer};

/// Categories the gate reports on
const GATED: [KeyCategory; 3] = [KeyCategory::Core, KeyCategory::Provider, KeyCategory::Generated];

/// Ordered key to value mapping, serialized as a JSON object in key order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap<T>(Vec<(ConfigKey, T)>);

impl<T: Copy> KeyMap<T> {
    pub fn get(&self, key: ConfigKey) -> Option<T> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigKey, T)> + '_ {
        self.0.iter().copied()
    }
}

impl<T: Serialize> Serialize for KeyMap<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// Overall result of the status gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Core credentials present and provider credentials satisfied
    Ready,
    /// Core credentials present, provider credentials missing in dedicated mode
    ProviderIncomplete,
    /// Core credentials missing; nothing can run
    CoreIncomplete,
}

impl GateOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Ready => exit_codes::SUCCESS,
            Self::ProviderIncomplete => exit_codes::PROVIDER_INCOMPLETE,
            Self::CoreIncomplete => exit_codes::CORE_INCOMPLETE,
        }
    }
}

/// Presence report for the status gate
///
/// # Example
///
/// ```rust,no_run
/// use phenoml_workflow::config::ConfigResolver;
/// use phenoml_workflow::core::status::StatusReport;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = ConfigResolver::from_env_file(".env")?;
/// let report = StatusReport::from_config(&resolver.snapshot());
/// println!("{}", report.to_json()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatusReport {
    pub deployment_mode: DeploymentMode,
    pub core_credentials: KeyMap<bool>,
    pub fhir_credentials: KeyMap<bool>,
    pub generated_ids: KeyMap<bool>,
    pub requirements: KeyMap<Requirement>,
}

impl StatusReport {
    /// Build the report from a resolved configuration snapshot
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mode = config.deployment_mode();

        let presence = |category: KeyCategory| {
            KeyMap(
                ConfigKey::in_category(category)
                    .into_iter()
                    .map(|key| {
                        let present = config.is_present(key)
                            || requirement_for(key, mode) == Requirement::Defaulted;
                        (key, present)
                    })
                    .collect(),
            )
        };

        let requirements = KeyMap(
            GATED
                .iter()
                .flat_map(|category| ConfigKey::in_category(*category))
                .map(|key| (key, requirement_for(key, mode)))
                .collect(),
        );

        Self {
            deployment_mode: mode,
            core_credentials: presence(KeyCategory::Core),
            fhir_credentials: presence(KeyCategory::Provider),
            generated_ids: presence(KeyCategory::Generated),
            requirements,
        }
    }

    pub fn core_ready(&self) -> bool {
        self.core_credentials.iter().all(|(_, present)| present)
    }

    /// Whether provider credentials are satisfied for the current mode
    pub fn provider_ready(&self) -> bool {
        match self.deployment_mode.provider_requirement() {
            Requirement::NotRequired | Requirement::Defaulted => true,
            Requirement::Required | Requirement::Undetermined => {
                self.fhir_credentials.iter().all(|(_, present)| present)
            }
        }
    }

    pub fn outcome(&self) -> GateOutcome {
        if !self.core_ready() {
            GateOutcome::CoreIncomplete
        } else if !self.provider_ready() {
            GateOutcome::ProviderIncomplete
        } else {
            GateOutcome::Ready
        }
    }

    /// Machine-readable rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable rendering; `verbose` appends the JSON document
    pub fn format_text(&self, verbose: bool) -> serde_json::Result<String> {
        let mut out = String::new();
        let rule = "=".repeat(60);

        out.push_str(&format!("\n{rule}\n"));
        out.push_str("ENVIRONMENT VARIABLES STATUS\n");
        out.push_str(&format!("{rule}\n\n"));
        out.push_str(&format!("Deployment mode: {}\n", describe_mode(self.deployment_mode)));

        out.push_str("\nCore PhenoML Credentials:\n");
        self.write_keys(&mut out, &self.core_credentials);
        if !self.core_ready() {
            out.push_str("\n⚠️  Missing core credentials. Add them to .env file:\n");
            write_examples(&mut out, &self.core_credentials);
        }

        let provider_requirement = self.deployment_mode.provider_requirement();
        out.push_str(&format!("\nFHIR Provider Credentials ({provider_requirement}):\n"));
        self.write_keys(&mut out, &self.fhir_credentials);
        match provider_requirement {
            Requirement::Required if !self.provider_ready() => {
                out.push_str("\n⚠️  Missing FHIR credentials. Add them to .env file:\n");
                write_examples(&mut out, &self.fhir_credentials);
            }
            Requirement::Undetermined => {
                out.push_str("\n💡 Set PHENOML_BASE_URL to determine whether FHIR credentials are needed\n");
            }
            _ => {}
        }

        out.push_str("\nGenerated IDs:\n");
        self.write_keys(&mut out, &self.generated_ids);
        if self.generated_ids.get(ConfigKey::FhirProviderId) == Some(false) {
            out.push_str("\n💡 Run `phenoml-workflow setup-provider` to create FHIR provider\n");
        }
        if self.generated_ids.get(ConfigKey::WorkflowId) == Some(false) {
            out.push_str("💡 Run `phenoml-workflow create-workflow` to create a workflow\n");
        }

        out.push_str(&format!("\n{rule}\n"));
        match self.outcome() {
            GateOutcome::Ready if self.deployment_mode == DeploymentMode::Shared => {
                out.push_str("✅ Ready to create workflows on the shared experiment deployment!\n");
            }
            GateOutcome::Ready => {
                out.push_str("✅ Ready to create FHIR provider and workflows!\n");
            }
            GateOutcome::ProviderIncomplete => {
                out.push_str("✅ Core credentials ready\n");
                out.push_str("⚠️  Add FHIR credentials to proceed with provider setup\n");
            }
            GateOutcome::CoreIncomplete => {
                out.push_str("⚠️  Add missing credentials to .env to proceed\n");
            }
        }
        out.push_str(&format!("{rule}\n"));

        if verbose {
            out.push_str("\nJSON Output:\n");
            out.push_str(&format!("{}\n", self.to_json()?));
        }

        Ok(out)
    }

    fn write_keys(&self, out: &mut String, keys: &KeyMap<bool>) {
        for (key, present) in keys.iter() {
            let mark = if present { "✅" } else { "❌" };
            match self.requirements.get(key) {
                Some(Requirement::Defaulted) => {
                    out.push_str(&format!("  {mark} {key} (provided by deployment)\n"));
                }
                Some(Requirement::NotRequired) if !present => {
                    out.push_str(&format!("  ➖ {key} (not required)\n"));
                }
                _ => {
                    out.push_str(&format!("  {mark} {key}\n"));
                }
            }
        }
    }
}

/// Requirement status of a gated key in `mode`
pub fn requirement_for(key: ConfigKey, mode: DeploymentMode) -> Requirement {
    match key.category() {
        KeyCategory::Core => Requirement::Required,
        KeyCategory::Provider => mode.provider_requirement(),
        KeyCategory::Generated if key == ConfigKey::FhirProviderId => {
            mode.provider_id_requirement()
        }
        _ => Requirement::NotRequired,
    }
}

fn describe_mode(mode: DeploymentMode) -> &'static str {
    match mode {
        DeploymentMode::Shared => "shared (experiment deployment, provider pre-provisioned)",
        DeploymentMode::Dedicated => "dedicated (FHIR provider registration required)",
        DeploymentMode::Unknown => "unknown (PHENOML_BASE_URL not set)",
    }
}

fn write_examples(out: &mut String, keys: &KeyMap<bool>) {
    for (key, present) in keys.iter() {
        if !present {
            out.push_str(&format!("   {}={}\n", key, key.example()));
        }
    }
}
