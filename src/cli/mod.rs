//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for logmask using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// logmask - Salted pseudonymization of security log exports
#[derive(Parser, Debug)]
#[command(name = "logmask")]
#[command(version, about, long_about = None)]
#[command(author = "logmask Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./logmask.toml if present)
    #[arg(short, long, env = "LOGMASK_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOGMASK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mask an IAM audit log export
    Iam(commands::mask::MaskArgs),

    /// Mask a SIP security device log export
    Sip(commands::mask::MaskArgs),

    /// Run the IAM and SIP pipelines in turn
    All(commands::mask::AllArgs),

    /// Print the identifier a value would receive
    Hash(commands::hash::HashArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command needs the configuration loaded before it runs
    pub fn requires_config(&self) -> bool {
        !matches!(self, Self::ValidateConfig(_) | Self::Init(_))
    }
}
