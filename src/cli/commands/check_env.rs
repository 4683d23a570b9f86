//! Check-env command implementation
//!
//! Prints the status report and exits non-zero when setup cannot proceed.

use super::CommandContext;
use crate::config::ConfigResolver;
use crate::core::StatusReport;
use clap::Args;

/// Arguments for the check-env command
#[derive(Args, Debug, Default)]
pub struct CheckEnvArgs {}

impl CheckEnvArgs {
    /// Execute the check-env command
    ///
    /// Exit codes: 0 ready, 1 core credentials missing, 3 provider
    /// credentials missing on a dedicated deployment.
    pub async fn execute(
        &self,
        context: &CommandContext,
        resolver: &ConfigResolver,
    ) -> anyhow::Result<i32> {
        tracing::info!(sources = ?resolver.source_names(), "Checking environment");

        let report = StatusReport::from_config(&resolver.snapshot());
        let outcome = report.outcome();

        if context.json {
            println!("{}", report.to_json()?);
        } else {
            print!("{}", report.format_text(context.verbose)?);
        }

        tracing::info!(
            mode = %report.deployment_mode,
            outcome = ?outcome,
            "Environment check complete"
        );
        Ok(outcome.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigKey, OverrideSource};
    use crate::domain::exit_codes;
    use std::path::PathBuf;

    fn context() -> CommandContext {
        CommandContext {
            env_file: PathBuf::from(".env"),
            json: true,
            verbose: false,
        }
    }

    fn resolver(pairs: &[(ConfigKey, &str)]) -> ConfigResolver {
        let overrides = pairs
            .iter()
            .fold(OverrideSource::new(), |acc, (k, v)| acc.with(k, Some(*v)));
        ConfigResolver::new(Vec::new()).with_overrides(overrides)
    }

    #[tokio::test]
    async fn test_empty_configuration_is_core_incomplete() {
        let code = CheckEnvArgs::default()
            .execute(&context(), &resolver(&[]))
            .await
            .unwrap();
        assert_eq!(code, exit_codes::CORE_INCOMPLETE);
    }

    #[tokio::test]
    async fn test_shared_deployment_is_ready_with_core_only() {
        let resolver = resolver(&[
            (ConfigKey::PhenomlUsername, "user"),
            (ConfigKey::PhenomlPassword, "pass"),
            (ConfigKey::PhenomlBaseUrl, "https://experiment.app.pheno.ml"),
        ]);
        let code = CheckEnvArgs::default().execute(&context(), &resolver).await.unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[tokio::test]
    async fn test_dedicated_without_provider_credentials() {
        let resolver = resolver(&[
            (ConfigKey::PhenomlUsername, "user"),
            (ConfigKey::PhenomlPassword, "pass"),
            (ConfigKey::PhenomlBaseUrl, "https://acme.app.pheno.ml"),
        ]);
        let code = CheckEnvArgs::default().execute(&context(), &resolver).await.unwrap();
        assert_eq!(code, exit_codes::PROVIDER_INCOMPLETE);
    }
}
