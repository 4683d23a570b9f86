//! Operations behind each command
//!
//! - [`status`] - the validation gate and its status report
//! - [`provider`] - FHIR provider registration
//! - [`workflow`] - workflow creation and test execution
//!
//! Every operation takes a [`ConfigResolver`](crate::config::ConfigResolver)
//! explicitly and talks to the service through
//! [`WorkflowApi`](crate::adapters::phenoml::WorkflowApi), so tests can swap
//! in an in-memory implementation.

pub mod provider;
pub mod status;
pub mod workflow;

pub use provider::{create_provider, plan_provider, ProviderOptions, ProviderPlan};
pub use status::{GateOutcome, StatusReport};
pub use workflow::{
    create_workflow, plan_test, plan_workflow, run_test, write_json_output, TestOptions, TestPlan,
    WorkflowOptions,
};

use crate::config::{ConfigKey, EnvStore};
use crate::domain::Result;

/// Persist a newly generated identifier so later runs resolve it
///
/// The caller shows the identifier to the user before calling this, so a
/// failed write never loses it.
pub fn save_generated_id(store: &EnvStore, key: ConfigKey, id: &str) -> Result<()> {
    store.write(key.as_str(), id)?;
    crate::log_generated_id!(key, id, store.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_generated_id_round_trips_through_load() {
        let dir = TempDir::new().unwrap();
        let store = EnvStore::new(dir.path().join(".env"));
        std::fs::write(store.path(), "PHENOML_USERNAME=user\nWORKFLOW_ID=old\n").unwrap();

        save_generated_id(&store, ConfigKey::WorkflowId, "wf-new").unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.get("WORKFLOW_ID"), Some("wf-new"));
        assert_eq!(snapshot.get("PHENOML_USERNAME"), Some("user"));
        assert_eq!(snapshot.occurrences("WORKFLOW_ID"), 1);
    }

    #[test]
    fn test_save_generated_id_reports_unwritable_store() {
        let dir = TempDir::new().unwrap();
        let store = EnvStore::new(dir.path());
        let err = save_generated_id(&store, ConfigKey::FhirProviderId, "abc").unwrap_err();
        assert!(matches!(err, crate::domain::PhenomlError::Persistence { .. }));
    }
}
