//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{LogmaskConfig, PipelineKind};
use super::secret::secret_string;
use crate::domain::errors::LogmaskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "logmask.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LogmaskConfig
/// 4. Applies environment variable overrides (LOGMASK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use logmask::config::loader::load_config;
///
/// let config = load_config("logmask.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LogmaskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LogmaskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LogmaskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: LogmaskConfig = toml::from_str(&contents)
        .map_err(|e| LogmaskError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        LogmaskError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Resolve the configuration for a run
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is used
/// if present; otherwise the built-in defaults apply. Environment overrides
/// are applied in every case.
pub fn load_config_or_default(path: Option<&str>) -> Result<LogmaskConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        return load_config(DEFAULT_CONFIG_FILE);
    }

    tracing::debug!("No configuration file found, using built-in defaults");
    let mut config = LogmaskConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        LogmaskError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LogmaskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using LOGMASK_* prefix
///
/// Environment variables follow the pattern: LOGMASK_<SECTION>_<KEY>,
/// for example LOGMASK_APPLICATION_LOG_LEVEL or LOGMASK_IAM_INPUT.
/// The salt is read from LOGMASK_SALT.
fn apply_env_overrides(config: &mut LogmaskConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("LOGMASK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("LOGMASK_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().map_err(|_| {
            LogmaskError::Configuration(format!(
                "Invalid LOGMASK_APPLICATION_DRY_RUN value '{val}', expected true or false"
            ))
        })?;
    }

    // Masking overrides
    if let Ok(val) = std::env::var("LOGMASK_SALT") {
        config.masking.salt = secret_string(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("LOGMASK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LOGMASK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    // Pipeline overrides
    for kind in PipelineKind::ALL {
        let prefix = format!("LOGMASK_{}", kind.to_string().to_uppercase());
        let pipeline = config.pipelines.get_mut(kind);
        if let Ok(val) = std::env::var(format!("{prefix}_INPUT")) {
            pipeline.input = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var(format!("{prefix}_OUTPUT")) {
            pipeline.output = PathBuf::from(val);
        }
    }

    Ok(())
}
