//! Deployment mode classification
//!
//! The service base URL decides whether the tooling talks to the shared
//! experiment deployment (provider pre-provisioned) or a dedicated instance
//! (provider must be registered).

use serde::Serialize;
use std::fmt;

/// Marker that identifies the shared experiment deployment, matched
/// case-insensitively anywhere in the base URL
pub const SHARED_MARKER: &str = "experiment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    /// Multi-tenant experiment deployment, no provider setup needed
    Shared,
    /// Single-tenant instance requiring explicit provider registration
    Dedicated,
    /// No base URL configured
    Unknown,
}

impl DeploymentMode {
    /// Classify a resolved base URL
    ///
    /// ```
    /// use phenoml_workflow::config::DeploymentMode;
    ///
    /// assert_eq!(
    ///     DeploymentMode::classify(Some("https://Experiment.app.pheno.ml")),
    ///     DeploymentMode::Shared
    /// );
    /// assert_eq!(DeploymentMode::classify(Some("")), DeploymentMode::Unknown);
    /// ```
    pub fn classify(base_url: Option<&str>) -> Self {
        match base_url {
            None => Self::Unknown,
            Some(url) if url.is_empty() => Self::Unknown,
            Some(url) if url.to_ascii_lowercase().contains(SHARED_MARKER) => Self::Shared,
            Some(_) => Self::Dedicated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Dedicated => "dedicated",
            Self::Unknown => "unknown",
        }
    }

    /// Whether provider credentials must be supplied in this mode
    pub fn provider_requirement(&self) -> Requirement {
        match self {
            Self::Shared => Requirement::NotRequired,
            Self::Dedicated => Requirement::Required,
            Self::Unknown => Requirement::Undetermined,
        }
    }

    /// Requirement status of the generated provider ID in this mode
    pub fn provider_id_requirement(&self) -> Requirement {
        match self {
            Self::Shared => Requirement::Defaulted,
            Self::Dedicated => Requirement::Required,
            Self::Unknown => Requirement::Undetermined,
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a key must be supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Required,
    NotRequired,
    /// Not needed because the deployment supplies it
    Defaulted,
    /// Depends on input that has not been given yet (no base URL)
    Undetermined,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::NotRequired => "not required",
            Self::Defaulted => "provided by deployment",
            Self::Undetermined => "depends on PHENOML_BASE_URL",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("https://experiment.app.pheno.ml"), DeploymentMode::Shared ; "lowercase marker")]
    #[test_case(Some("https://EXPERIMENT.app.pheno.ml"), DeploymentMode::Shared ; "uppercase marker")]
    #[test_case(Some("https://my-experiments.internal/api"), DeploymentMode::Shared ; "marker in path segment")]
    #[test_case(Some("https://acme.app.pheno.ml"), DeploymentMode::Dedicated ; "dedicated url")]
    #[test_case(Some(""), DeploymentMode::Unknown ; "empty url")]
    #[test_case(None, DeploymentMode::Unknown ; "absent url")]
    fn test_classify(url: Option<&str>, expected: DeploymentMode) {
        assert_eq!(DeploymentMode::classify(url), expected);
    }

    #[test]
    fn test_provider_requirements_by_mode() {
        assert_eq!(
            DeploymentMode::Dedicated.provider_requirement(),
            Requirement::Required
        );
        assert_eq!(
            DeploymentMode::Shared.provider_requirement(),
            Requirement::NotRequired
        );
        assert_eq!(
            DeploymentMode::Unknown.provider_requirement(),
            Requirement::Undetermined
        );
        assert_eq!(
            DeploymentMode::Shared.provider_id_requirement(),
            Requirement::Defaulted
        );
    }

    #[test]
    fn test_mode_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DeploymentMode::Dedicated).unwrap(),
            "\"dedicated\""
        );
        assert_eq!(
            serde_json::to_string(&Requirement::NotRequired).unwrap(),
            "\"not_required\""
        );
    }
}
