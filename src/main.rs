// PhenoML Workflow - configuration and credential tooling for PhenoML workflows
// Copyright (c) 2025 PhenoML Workflow Contributors
// Licensed under the MIT License

use phenoml_workflow::cli::{Cli, Commands};
use phenoml_workflow::domain::exit_codes;
use phenoml_workflow::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // The store is read through the resolver; the process environment is
    // never modified.
    let cli = Cli::parse();

    let guard = match init_logging(cli.effective_log_level(), &cli.logging_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        env_file = %cli.env_file.display(),
        "PhenoML workflow tooling"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            exit_codes::FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let context = cli.context();
    let resolver = match cli.resolver() {
        Ok(resolver) => resolver,
        Err(e) => return Ok(phenoml_workflow::cli::commands::report_error(&context, &e)),
    };

    match &cli.command {
        Commands::CheckEnv(args) => args.execute(&context, &resolver).await,
        Commands::SetupProvider(args) => args.execute(&context, &resolver).await,
        Commands::CreateWorkflow(args) => args.execute(&context, &resolver).await,
        Commands::TestWorkflow(args) => args.execute(&context, &resolver).await,
    }
}
