// logmask - Salted pseudonymization of security log exports
// Copyright (c) 2025 logmask Contributors
// Licensed under the MIT License

use clap::Parser;
use logmask::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use logmask::cli::{Cli, Commands};
use logmask::config::{load_config_or_default, LoggingConfig, LogmaskConfig, PipelineKind};
use logmask::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let loaded = if cli.command.requires_config() {
        load_config_or_default(cli.config.as_deref()).map(Some)
    } else {
        Ok(None)
    };

    let (log_level, logging_config) = match &loaded {
        Ok(Some(config)) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        _ => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logmask starting");

    let exit_code = match loaded {
        Ok(config) => match execute_command(&cli, config) {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(error = %e, "Command execution failed");
                eprintln!("Error: {e}");
                EXIT_FATAL
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("❌ {e}");
            EXIT_CONFIG
        }
    };

    // process::exit skips destructors, so flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: Option<LogmaskConfig>) -> anyhow::Result<i32> {
    let config = config.unwrap_or_default();
    match &cli.command {
        Commands::Iam(args) => args.execute(PipelineKind::Iam, config),
        Commands::Sip(args) => args.execute(PipelineKind::Sip, config),
        Commands::All(args) => args.execute(config),
        Commands::Hash(args) => args.execute(&config),
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref()),
        Commands::Init(args) => args.execute(),
    }
}
