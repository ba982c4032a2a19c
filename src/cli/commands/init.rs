//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Include comments explaining every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing logmask configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your input and output paths", self.output);
                println!("  2. Set LOGMASK_SALT in the environment or a .env file");
                println!("     (all datasets that must correlate need the same salt)");
                println!("  3. Validate configuration: logmask validate-config");
                println!("  4. Run: logmask all");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# logmask Configuration File

[application]
log_level = "info"
dry_run = false

[masking]
# salt = "${LOGMASK_SALT}"
id_suffix = "_ID"
display_suffix = "_display"
anonymous_placeholder = "anonymous"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"

[pipelines.iam]
input = "iam.xlsx"
output = "iam_masked_final.xlsx"
free_text_column = "详情"
rule_set = "generic"
case_mode = "lowercase"

[[pipelines.iam.columns]]
source = "用户名"
label = "用户"
kind = "text"

[[pipelines.iam.columns]]
source = "源IP"
label = "源地址"
kind = "ip"

[[pipelines.iam.columns]]
source = "目标IP"
label = "目的地址"
kind = "ip"

[pipelines.sip]
input = "sip.xls"
output = "sip_masked_final.xlsx"
free_text_column = "原始日志"
rule_set = "key_value"
case_mode = "preserve"

[[pipelines.sip.columns]]
source = "源地址"
kind = "ip"

[[pipelines.sip.columns]]
source = "目的地址"
kind = "ip"

[[pipelines.sip.columns]]
source = "设备地址"
kind = "ip"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# logmask Configuration File
#
# Every option below shows its built-in default. Options can also be set
# through LOGMASK_* environment variables, and ${VAR} references are
# substituted from the environment when the file is loaded.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
log_level = "info"

# Dry run mode (mask in memory, don't write output files)
dry_run = false

# ============================================================================
# Masking
# ============================================================================
[masking]
# Secret appended to every value before hashing. Identifiers only match
# across files hashed with the same salt. Prefer the environment:
#   LOGMASK_SALT=...
# salt = "${LOGMASK_SALT}"

# Suffix of the identifier column added for each masked column
id_suffix = "_ID"

# Suffix of the display column added for each masked column
display_suffix = "_display"

# Display value for usernames of one character or less
anonymous_placeholder = "anonymous"

# ============================================================================
# Logging
# ============================================================================
[logging]
# Write JSON logs to files in addition to the console
local_enabled = false

# Directory for log files
local_path = "./logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"

# ============================================================================
# IAM pipeline
# ============================================================================
[pipelines.iam]
# Input spreadsheet (.xlsx, .xlsm, .xls, .ods); first sheet, first row is the header
input = "iam.xlsx"

# Output spreadsheet (always written as .xlsx)
output = "iam_masked_final.xlsx"

# Column whose embedded IPs and MACs are hashed in place
free_text_column = "详情"

# generic: bare IPv4 and MAC addresses
# key_value: SrcIP=/DstIP= tagged addresses only
rule_set = "generic"

# lowercase: fold case before hashing (usernames); preserve: hash as-is
case_mode = "lowercase"

# Sensitive columns. Each is replaced by <label>_ID and <label>_display.
# kind = "ip" keeps the first three octets; kind = "text" keeps the first character.
[[pipelines.iam.columns]]
source = "用户名"
label = "用户"
kind = "text"

[[pipelines.iam.columns]]
source = "源IP"
label = "源地址"
kind = "ip"

[[pipelines.iam.columns]]
source = "目标IP"
label = "目的地址"
kind = "ip"

# ============================================================================
# SIP pipeline
# ============================================================================
[pipelines.sip]
input = "sip.xls"
output = "sip_masked_final.xlsx"
free_text_column = "原始日志"
rule_set = "key_value"
case_mode = "preserve"

# label defaults to the source column name
[[pipelines.sip.columns]]
source = "源地址"
kind = "ip"

[[pipelines.sip.columns]]
source = "目的地址"
kind = "ip"

[[pipelines.sip.columns]]
source = "设备地址"
kind = "ip"
"#
        .to_string()
    }
}
