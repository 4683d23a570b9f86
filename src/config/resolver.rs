//! Layered configuration resolution
//!
//! Sources are queried in priority order: explicit overrides (CLI flags),
//! then the process environment, then the persisted store. The first source
//! yielding a non-empty value wins. Resolution never mutates the process
//! environment; the resolver is an explicit value handed to each operation.

use super::keys::{hint_for, ConfigKey};
use super::mode::DeploymentMode;
use super::secret::{secret_string, SecretString};
use super::store::{EnvStore, StoreSnapshot};
use crate::domain::{PhenomlError, Result};
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// A string-keyed lookup queried by the resolver
pub trait ConfigSource: Send + Sync {
    /// Human-readable name for this source (for logging)
    fn name(&self) -> &str;

    /// Raw value for `key`, if the source defines it
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Values supplied explicitly on the command line
#[derive(Default)]
pub struct OverrideSource {
    values: HashMap<String, SecretString>,
}

impl OverrideSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override; `None` and empty strings are ignored
    pub fn set(&mut self, key: impl AsRef<str>, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.values
                .insert(key.as_ref().to_string(), secret_string(value.to_string()));
        }
    }

    /// Builder-style [`OverrideSource::set`]
    pub fn with(mut self, key: impl AsRef<str>, value: Option<&str>) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigSource for OverrideSource {
    fn name(&self) -> &str {
        "command line"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.expose_secret().as_str().to_string())
    }
}

/// The process environment, read without modification
pub struct ProcessEnvSource;

impl ConfigSource for ProcessEnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A store file loaded once at resolver construction
pub struct StoreSource {
    name: String,
    snapshot: StoreSnapshot,
}

impl StoreSource {
    pub fn new(name: impl Into<String>, snapshot: StoreSnapshot) -> Self {
        Self {
            name: name.into(),
            snapshot,
        }
    }

    /// Load the store file at `store`
    pub fn load(store: &EnvStore) -> Result<Self> {
        Ok(Self::new(store.path().display().to_string(), store.load()?))
    }
}

impl ConfigSource for StoreSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.snapshot.get(key).map(str::to_string)
    }
}

/// A resolved value and the name of the source it came from
#[derive(Clone)]
pub struct ResolvedValue {
    value: SecretString,
    source: String,
}

impl ResolvedValue {
    /// The raw value; callers must not log it for secret keys
    pub fn expose(&self) -> &str {
        self.value.expose_secret().as_str()
    }

    pub fn secret(&self) -> &SecretString {
        &self.value
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedValue")
            .field("value", &self.value)
            .field("source", &self.source)
            .finish()
    }
}

/// Ordered list of configuration sources
///
/// # Example
///
/// ```no_run
/// use phenoml_workflow::config::{ConfigKey, ConfigResolver, OverrideSource};
///
/// # fn example() -> phenoml_workflow::domain::Result<()> {
/// let overrides = OverrideSource::new().with(ConfigKey::WorkflowId, Some("wf-1"));
/// let resolver = ConfigResolver::from_env_file(".env")?.with_overrides(overrides);
/// let workflow_id = resolver.require(ConfigKey::WorkflowId, None)?;
/// println!("{}", workflow_id.expose());
/// # Ok(())
/// # }
/// ```
pub struct ConfigResolver {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    /// Resolver over the given sources, highest priority first
    pub fn new(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        Self { sources }
    }

    /// Process environment over the store file at `path`
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let store = EnvStore::new(path.as_ref());
        Ok(Self::new(vec![
            Box::new(ProcessEnvSource),
            Box::new(StoreSource::load(&store)?),
        ]))
    }

    /// Put `overrides` ahead of every existing source
    pub fn with_overrides(mut self, overrides: OverrideSource) -> Self {
        self.sources.insert(0, Box::new(overrides));
        self
    }

    /// Names of the sources in priority order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Effective value for `key`, or `None` when no source supplies one
    ///
    /// A non-empty `explicit` value takes precedence over every source.
    pub fn resolve(&self, key: impl AsRef<str>, explicit: Option<&str>) -> Option<ResolvedValue> {
        let key = key.as_ref();
        if let Some(value) = explicit.filter(|v| !v.is_empty()) {
            return Some(ResolvedValue {
                value: secret_string(value.to_string()),
                source: "argument".to_string(),
            });
        }

        self.sources.iter().find_map(|source| {
            source
                .lookup(key)
                .filter(|v| !v.is_empty())
                .map(|value| {
                    tracing::trace!(
                        key = key,
                        source = source.name(),
                        value = loggable(key, &value),
                        "Resolved configuration key"
                    );
                    ResolvedValue {
                        value: secret_string(value),
                        source: source.name().to_string(),
                    }
                })
        })
    }

    /// Like [`ConfigResolver::resolve`], failing with a configuration error
    /// that names the key and shows an example value
    pub fn require(&self, key: impl AsRef<str>, explicit: Option<&str>) -> Result<ResolvedValue> {
        let key = key.as_ref();
        self.resolve(key, explicit)
            .ok_or_else(|| PhenomlError::configuration(key, hint_for(key)))
    }

    /// Value for `key`, falling back to its table default
    pub fn resolve_or_default(&self, key: ConfigKey, explicit: Option<&str>) -> Option<String> {
        self.resolve(key, explicit)
            .map(|v| v.expose().to_string())
            .or_else(|| key.default_value().map(str::to_string))
    }

    /// Whether any source supplies a non-empty value for `key`
    pub fn is_present(&self, key: impl AsRef<str>) -> bool {
        self.resolve(key, None).is_some()
    }

    /// Deployment mode derived from the resolved base URL
    pub fn deployment_mode(&self) -> DeploymentMode {
        let base_url = self.resolve(ConfigKey::PhenomlBaseUrl, None);
        DeploymentMode::classify(base_url.as_ref().map(|v| v.expose()))
    }

    /// Resolve every recognized key into a snapshot
    pub fn snapshot(&self) -> ResolvedConfig {
        let values = ConfigKey::ALL
            .iter()
            .filter_map(|key| self.resolve(key, None).map(|v| (*key, v)))
            .collect();
        ResolvedConfig { values }
    }
}

/// Point-in-time resolution of all recognized keys
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    values: HashMap<ConfigKey, ResolvedValue>,
}

impl ResolvedConfig {
    pub fn get(&self, key: ConfigKey) -> Option<&ResolvedValue> {
        self.values.get(&key)
    }

    pub fn is_present(&self, key: ConfigKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Deployment mode derived from this snapshot alone
    pub fn deployment_mode(&self) -> DeploymentMode {
        DeploymentMode::classify(self.get(ConfigKey::PhenomlBaseUrl).map(|v| v.expose()))
    }
}

/// Value as it may appear in logs; secret and unrecognized keys are redacted
fn loggable<'a>(key: &str, value: &'a str) -> &'a str {
    match ConfigKey::from_name(key) {
        Some(key) if !key.is_secret() => value,
        _ => "[REDACTED]",
    }
}

/// Interpret a boolean flag value
///
/// `true`, `1`, `yes` and `y` (any case) are true; everything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    struct MapSource(&'static str, HashMap<String, String>);

    impl MapSource {
        fn of(name: &'static str, pairs: &[(&str, &str)]) -> Box<dyn ConfigSource> {
            Box::new(Self(
                name,
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ))
        }
    }

    impl ConfigSource for MapSource {
        fn name(&self) -> &str {
            self.0
        }

        fn lookup(&self, key: &str) -> Option<String> {
            self.1.get(key).cloned()
        }
    }

    fn layered() -> ConfigResolver {
        ConfigResolver::new(vec![
            MapSource::of("env", &[("A", "env-a"), ("B", "")]),
            MapSource::of("file", &[("A", "file-a"), ("B", "file-b"), ("C", "file-c")]),
        ])
    }

    #[test]
    fn test_priority_order() {
        let resolver = layered();
        let a = resolver.resolve("A", None).unwrap();
        assert_eq!(a.expose(), "env-a");
        assert_eq!(a.source(), "env");
        assert_eq!(resolver.resolve("C", None).unwrap().expose(), "file-c");
    }

    #[test]
    fn test_empty_value_falls_through() {
        let resolver = layered();
        assert_eq!(resolver.resolve("B", None).unwrap().expose(), "file-b");
    }

    #[test]
    fn test_explicit_override_wins_unless_empty() {
        let resolver = layered();
        assert_eq!(resolver.resolve("A", Some("cli")).unwrap().expose(), "cli");
        assert_eq!(resolver.resolve("A", Some("")).unwrap().expose(), "env-a");
    }

    #[test]
    fn test_override_source_goes_first() {
        let overrides = OverrideSource::new()
            .with("C", Some("flag-c"))
            .with("A", Some(""))
            .with("D", None);
        let resolver = layered().with_overrides(overrides);
        assert_eq!(resolver.source_names(), vec!["command line", "env", "file"]);
        assert_eq!(resolver.resolve("C", None).unwrap().expose(), "flag-c");
        assert_eq!(resolver.resolve("A", None).unwrap().expose(), "env-a");
        assert!(resolver.resolve("D", None).is_none());
    }

    #[test]
    fn test_missing_key_is_none_not_empty() {
        assert!(layered().resolve("NOPE", None).is_none());
    }

    #[test]
    fn test_require_reports_key_and_example() {
        let err = layered()
            .require(ConfigKey::WorkflowName, None)
            .unwrap_err();
        match err {
            PhenomlError::Configuration { key, hint } => {
                assert_eq!(key, "WORKFLOW_NAME");
                assert!(hint.contains("--name"));
                assert!(hint.contains("WORKFLOW_NAME="));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_or_default() {
        let resolver = layered();
        assert_eq!(
            resolver.resolve_or_default(ConfigKey::FhirProviderType, None),
            Some("medplum".to_string())
        );
        assert_eq!(
            resolver.resolve_or_default(ConfigKey::FhirProviderType, Some("epic")),
            Some("epic".to_string())
        );
        assert_eq!(resolver.resolve_or_default(ConfigKey::WorkflowName, None), None);
    }

    #[test]
    fn test_deployment_mode_from_resolver_and_snapshot() {
        let resolver = ConfigResolver::new(vec![MapSource::of(
            "env",
            &[("PHENOML_BASE_URL", "https://experiment.app.pheno.ml")],
        )]);
        assert_eq!(resolver.deployment_mode(), DeploymentMode::Shared);
        assert_eq!(resolver.snapshot().deployment_mode(), DeploymentMode::Shared);
        assert_eq!(
            ResolvedConfig::default().deployment_mode(),
            DeploymentMode::Unknown
        );
    }

    #[test]
    fn test_loggable_redacts_secret_keys() {
        assert_eq!(loggable("PHENOML_PASSWORD", "pw"), "[REDACTED]");
        assert_eq!(loggable("FHIR_PROVIDER_CLIENT_SECRET", "cs"), "[REDACTED]");
        assert_eq!(loggable("CUSTOM_TOKEN", "t"), "[REDACTED]");
        assert_eq!(
            loggable("PHENOML_BASE_URL", "https://experiment.app.pheno.ml"),
            "https://experiment.app.pheno.ml"
        );
    }

    #[test]
    fn test_resolved_value_debug_is_redacted() {
        let resolver = ConfigResolver::new(vec![MapSource::of(
            "env",
            &[("PHENOML_PASSWORD", "hunter2")],
        )]);
        let value = resolver.resolve(ConfigKey::PhenomlPassword, None).unwrap();
        assert!(!format!("{value:?}").contains("hunter2"));
    }

    #[test]
    fn test_process_env_source_reads_without_mutation() {
        std::env::set_var("PHENOML_WORKFLOW_RESOLVER_TEST_KEY", "from-env");
        let source = ProcessEnvSource;
        assert_eq!(
            source.lookup("PHENOML_WORKFLOW_RESOLVER_TEST_KEY"),
            Some("from-env".to_string())
        );
        std::env::remove_var("PHENOML_WORKFLOW_RESOLVER_TEST_KEY");
    }

    #[test_case("true", true)]
    #[test_case("TRUE", true)]
    #[test_case("1", true)]
    #[test_case("yes", true)]
    #[test_case("Y", true)]
    #[test_case("false", false)]
    #[test_case("no", false)]
    #[test_case("", false)]
    #[test_case("2", false)]
    fn test_parse_bool(input: &str, expected: bool) {
        assert_eq!(parse_bool(input), expected);
    }
}
