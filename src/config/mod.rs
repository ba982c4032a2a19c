//! Configuration management for logmask.
//!
//! Configuration is optional: without a file, the built-in IAM and SIP
//! profiles and the shared default salt are used. A TOML file can override
//! any of them, with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LOGMASK_*` environment overrides (including `LOGMASK_SALT`)
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [masking]
//! salt = "${LOGMASK_SALT}"
//! display_suffix = "_display"
//!
//! [pipelines.iam]
//! input = "iam.xlsx"
//! output = "iam_masked_final.xlsx"
//! free_text_column = "详情"
//! rule_set = "generic"
//! case_mode = "lowercase"
//!
//! [[pipelines.iam.columns]]
//! source = "用户名"
//! label = "用户"
//! kind = "text"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use logmask::config::load_config_or_default;
//!
//! # fn example() -> logmask::domain::Result<()> {
//! let config = load_config_or_default(None)?;
//! println!("IAM input: {}", config.pipelines.iam.input.display());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{
    ApplicationConfig, ColumnRuleConfig, LoggingConfig, LogmaskConfig, MaskingConfig,
    PipelineConfig, PipelineKind, PipelinesConfig, DEFAULT_SALT,
};
pub use secret::{secret_string, SecretString, SecretValue};
