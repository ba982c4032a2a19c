//! Validate config command implementation

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config_or_default, PipelineKind, DEFAULT_SALT};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("(default lookup)");
        tracing::info!(config_path = %source, "Validating configuration");

        println!("🔍 Validating configuration: {source}");
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!(
            "  Salt: {}",
            if config.masking.salt.expose_secret().as_str() == DEFAULT_SALT {
                "built-in default"
            } else {
                "custom"
            }
        );
        println!(
            "  Derived Columns: <label>{} / <label>{}",
            config.masking.id_suffix, config.masking.display_suffix
        );
        for kind in PipelineKind::ALL {
            let profile = config.pipeline(kind);
            println!("  Pipeline {kind}:");
            println!("    Input: {}", profile.input.display());
            println!("    Output: {}", profile.output.display());
            let columns: Vec<&str> = profile.columns.iter().map(|c| c.source.as_str()).collect();
            println!("    Columns: {columns:?}");
            if let Some(ref column) = profile.free_text_column {
                println!("    Free Text: {column} ({})", profile.rule_set);
            }
        }
        println!();
        Ok(EXIT_OK)
    }
}
