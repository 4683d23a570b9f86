//! Integration tests for the `.env` store and layered resolution
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interference between tests.

use phenoml_workflow::config::{
    ConfigKey, ConfigResolver, DeploymentMode, EnvStore, OverrideSource, StoreSource,
};
use phenoml_workflow::domain::PhenomlError;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn store_in(dir: &TempDir) -> EnvStore {
    EnvStore::new(dir.path().join(".env"))
}

#[test]
fn test_write_to_empty_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "").unwrap();

    store.write("FHIR_PROVIDER_ID", "abc123").unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "FHIR_PROVIDER_ID=abc123\n");
}

#[test]
fn test_write_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.write("WORKFLOW_ID", "wf-1").unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "WORKFLOW_ID=wf-1\n");
}

#[test]
fn test_rewrite_in_place_preserves_other_lines() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "A=1\nB=2\n").unwrap();

    store.write("A", "9").unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "A=9\nB=2\n");
}

#[test]
fn test_comments_and_order_survive_updates() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let original = "# PhenoML\nPHENOML_USERNAME=user\n\nFHIR_PROVIDER_ID=old\nWORKFLOW_NAME=Intake\n";
    fs::write(store.path(), original).unwrap();

    store.write("FHIR_PROVIDER_ID", "new").unwrap();
    store.write("WORKFLOW_ID", "wf-9").unwrap();

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "# PhenoML\nPHENOML_USERNAME=user\n\nFHIR_PROVIDER_ID=new\nWORKFLOW_NAME=Intake\nWORKFLOW_ID=wf-9\n"
    );
}

#[test]
fn test_repeat_write_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "PHENOML_USERNAME=user").unwrap();

    store.write("WORKFLOW_ID", "wf-1").unwrap();
    let once = fs::read_to_string(store.path()).unwrap();
    store.write("WORKFLOW_ID", "wf-1").unwrap();
    let twice = fs::read_to_string(store.path()).unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.lines().count(), 2);
}

#[test]
fn test_write_then_fresh_resolution_sees_value() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "WORKFLOW_ID=first\nWORKFLOW_ID=second\n").unwrap();

    store.write("WORKFLOW_ID", "updated").unwrap();

    let snapshot = store.load().unwrap();
    assert_eq!(snapshot.get("WORKFLOW_ID"), Some("updated"));
    assert_eq!(snapshot.occurrences("WORKFLOW_ID"), 2);
}

#[test]
fn test_values_keep_equals_signs_and_spaces() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .write("WORKFLOW_TEST_DATA", r#"{"q": "a=b", "name": "J Smith"}"#)
        .unwrap();

    let snapshot = store.load().unwrap();
    assert_eq!(
        snapshot.get("WORKFLOW_TEST_DATA"),
        Some(r#"{"q": "a=b", "name": "J Smith"}"#)
    );
}

#[test]
fn test_unreadable_store_is_persistence_error() {
    let dir = TempDir::new().unwrap();
    let err = ConfigResolver::from_env_file(dir.path()).err().unwrap();
    assert!(matches!(err, PhenomlError::Persistence { .. }));
}

#[test]
fn test_environment_overrides_store_and_flags_override_both() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(
        store.path(),
        "FHIR_PROVIDER_CLIENT_ID=from-store\nFHIR_PROVIDER_NAME=Store Server\n",
    )
    .unwrap();
    std::env::set_var("FHIR_PROVIDER_CLIENT_ID", "from-env");

    let resolver = ConfigResolver::from_env_file(store.path()).unwrap();
    let client_id = resolver.resolve(ConfigKey::FhirProviderClientId, None).unwrap();
    assert_eq!(client_id.expose(), "from-env");
    assert_eq!(client_id.source(), "environment");
    assert_eq!(
        resolver.resolve(ConfigKey::FhirProviderName, None).unwrap().expose(),
        "Store Server"
    );

    let resolver = resolver.with_overrides(
        OverrideSource::new().with(ConfigKey::FhirProviderClientId, Some("from-flag")),
    );
    assert_eq!(
        resolver.resolve(ConfigKey::FhirProviderClientId, None).unwrap().expose(),
        "from-flag"
    );

    std::env::remove_var("FHIR_PROVIDER_CLIENT_ID");
}

#[test]
fn test_empty_environment_value_falls_through_to_store() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "FHIR_PROVIDER_CLIENT_SECRET=from-store\n").unwrap();
    std::env::set_var("FHIR_PROVIDER_CLIENT_SECRET", "");

    let resolver = ConfigResolver::from_env_file(store.path()).unwrap();
    assert_eq!(
        resolver
            .resolve(ConfigKey::FhirProviderClientSecret, None)
            .unwrap()
            .expose(),
        "from-store"
    );

    std::env::remove_var("FHIR_PROVIDER_CLIENT_SECRET");
}

#[test]
fn test_resolution_does_not_mutate_process_environment() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "PHENOML_WORKFLOW_ONLY_IN_STORE=1\n").unwrap();

    let resolver = ConfigResolver::from_env_file(store.path()).unwrap();
    assert!(resolver.is_present("PHENOML_WORKFLOW_ONLY_IN_STORE"));
    assert!(std::env::var("PHENOML_WORKFLOW_ONLY_IN_STORE").is_err());
}

#[test]
fn test_deployment_mode_from_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "PHENOML_BASE_URL=https://EXPERIMENT.app.pheno.ml\n").unwrap();

    let resolver = ConfigResolver::new(vec![Box::new(StoreSource::load(&store).unwrap())]);
    assert_eq!(resolver.deployment_mode(), DeploymentMode::Shared);
}
