//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields
//! the two built-in pipeline profiles.

use crate::config::{secret_string, SecretString};
use crate::masking::columns::{ColumnRule, DEFAULT_DISPLAY_SUFFIX, DEFAULT_ID_SUFFIX};
use crate::masking::display::{ColumnKind, DEFAULT_ANONYMOUS_PLACEHOLDER};
use crate::masking::hasher::{CaseMode, IdentityHasher};
use crate::masking::rewriter::RuleSetKind;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Salt shared by every pipeline unless overridden. Identifiers are only
/// comparable across datasets hashed with the same salt.
pub const DEFAULT_SALT: &str = "Sec_AnHui_2024";

/// Built-in pipeline profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    /// IAM audit log export
    Iam,
    /// SIP security device log export
    Sip,
}

impl PipelineKind {
    /// All profiles in run order
    pub const ALL: [PipelineKind; 2] = [PipelineKind::Iam, PipelineKind::Sip];
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iam => write!(f, "iam"),
            Self::Sip => write!(f, "sip"),
        }
    }
}

/// Main logmask configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogmaskConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Hashing and redaction settings shared by all pipelines
    #[serde(default)]
    pub masking: MaskingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Pipeline profiles
    #[serde(default)]
    pub pipelines: PipelinesConfig,
}

impl LogmaskConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.masking.validate()?;
        self.logging.validate()?;
        for kind in PipelineKind::ALL {
            self.pipelines
                .get(kind)
                .validate(&self.masking)
                .map_err(|e| format!("pipelines.{kind}: {e}"))?;
        }
        Ok(())
    }

    /// Profile for `kind`
    pub fn pipeline(&self, kind: PipelineKind) -> &PipelineConfig {
        self.pipelines.get(kind)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (transform but don't write output files)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid application.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Hashing and redaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskingConfig {
    /// Shared secret appended to every value before hashing
    #[serde(default = "default_salt")]
    pub salt: SecretString,

    /// Suffix of identifier columns
    #[serde(default = "default_id_suffix")]
    pub id_suffix: String,

    /// Suffix of display columns
    #[serde(default = "default_display_suffix")]
    pub display_suffix: String,

    /// Display value for text of one character or less
    #[serde(default = "default_anonymous_placeholder")]
    pub anonymous_placeholder: String,
}

impl MaskingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.salt.expose_secret().is_empty() {
            return Err("masking.salt cannot be empty".to_string());
        }
        if self.id_suffix.is_empty() || self.display_suffix.is_empty() {
            return Err("masking.id_suffix and masking.display_suffix cannot be empty".to_string());
        }
        if self.id_suffix == self.display_suffix {
            return Err("masking.id_suffix and masking.display_suffix must differ".to_string());
        }
        if self.anonymous_placeholder.is_empty() {
            return Err("masking.anonymous_placeholder cannot be empty".to_string());
        }
        Ok(())
    }

    /// Build a hasher over the shared salt
    pub fn hasher(&self, case_mode: CaseMode) -> IdentityHasher {
        IdentityHasher::new(self.salt.clone(), case_mode)
    }
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            salt: default_salt(),
            id_suffix: default_id_suffix(),
            display_suffix: default_display_suffix(),
            anonymous_placeholder: default_anonymous_placeholder(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// Both pipeline profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelinesConfig {
    /// IAM profile
    #[serde(default = "PipelineConfig::iam_default")]
    pub iam: PipelineConfig,

    /// SIP profile
    #[serde(default = "PipelineConfig::sip_default")]
    pub sip: PipelineConfig,
}

impl PipelinesConfig {
    /// Profile for `kind`
    pub fn get(&self, kind: PipelineKind) -> &PipelineConfig {
        match kind {
            PipelineKind::Iam => &self.iam,
            PipelineKind::Sip => &self.sip,
        }
    }

    /// Mutable profile for `kind`
    pub fn get_mut(&mut self, kind: PipelineKind) -> &mut PipelineConfig {
        match kind {
            PipelineKind::Iam => &mut self.iam,
            PipelineKind::Sip => &mut self.sip,
        }
    }
}

impl Default for PipelinesConfig {
    fn default() -> Self {
        Self {
            iam: PipelineConfig::iam_default(),
            sip: PipelineConfig::sip_default(),
        }
    }
}

/// One pipeline profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input spreadsheet
    pub input: PathBuf,

    /// Output spreadsheet (always written as .xlsx)
    pub output: PathBuf,

    /// Sensitive columns, masked in this order
    #[serde(default)]
    pub columns: Vec<ColumnRuleConfig>,

    /// Free-text column rewritten in place
    #[serde(default)]
    pub free_text_column: Option<String>,

    /// Rule set applied to the free-text column
    pub rule_set: RuleSetKind,

    /// Case folding applied before hashing
    #[serde(default)]
    pub case_mode: CaseMode,
}

impl PipelineConfig {
    /// Profile reproducing the IAM export layout
    pub fn iam_default() -> Self {
        Self {
            input: PathBuf::from("iam.xlsx"),
            output: PathBuf::from("iam_masked_final.xlsx"),
            columns: vec![
                ColumnRuleConfig::new("用户名", Some("用户"), ColumnKind::Text),
                ColumnRuleConfig::new("源IP", Some("源地址"), ColumnKind::Ip),
                ColumnRuleConfig::new("目标IP", Some("目的地址"), ColumnKind::Ip),
            ],
            free_text_column: Some("详情".to_string()),
            rule_set: RuleSetKind::Generic,
            case_mode: CaseMode::Lowercase,
        }
    }

    /// Profile reproducing the SIP export layout
    pub fn sip_default() -> Self {
        Self {
            input: PathBuf::from("sip.xls"),
            output: PathBuf::from("sip_masked_final.xlsx"),
            columns: vec![
                ColumnRuleConfig::new("源地址", None, ColumnKind::Ip),
                ColumnRuleConfig::new("目的地址", None, ColumnKind::Ip),
                ColumnRuleConfig::new("设备地址", None, ColumnKind::Ip),
            ],
            free_text_column: Some("原始日志".to_string()),
            rule_set: RuleSetKind::KeyValue,
            case_mode: CaseMode::Preserve,
        }
    }

    /// Column rules with labels resolved
    pub fn column_rules(&self) -> Vec<ColumnRule> {
        self.columns.iter().map(ColumnRuleConfig::to_rule).collect()
    }

    fn validate(&self, masking: &MaskingConfig) -> Result<(), String> {
        if self.input.as_os_str().is_empty() {
            return Err("input cannot be empty".to_string());
        }
        if self.output.as_os_str().is_empty() {
            return Err("output cannot be empty".to_string());
        }
        if self.input == self.output {
            return Err(format!(
                "output must differ from input ({})",
                self.input.display()
            ));
        }

        let mut sources = HashSet::new();
        let mut derived = HashSet::new();
        for rule in self.column_rules() {
            if rule.source.trim().is_empty() {
                return Err("column source cannot be empty".to_string());
            }
            if rule.label.trim().is_empty() {
                return Err(format!("column '{}' has an empty label", rule.source));
            }
            if !sources.insert(rule.source.clone()) {
                return Err(format!("column '{}' is listed more than once", rule.source));
            }
            for name in [
                format!("{}{}", rule.label, masking.id_suffix),
                format!("{}{}", rule.label, masking.display_suffix),
            ] {
                if name == rule.source || !derived.insert(name.clone()) {
                    return Err(format!("derived column '{name}' would be produced twice"));
                }
            }
        }

        if let Some(ref free_text) = self.free_text_column {
            if free_text.trim().is_empty() {
                return Err("free_text_column cannot be empty".to_string());
            }
            if sources.contains(free_text) {
                return Err(format!(
                    "free_text_column '{free_text}' is also a masked column"
                ));
            }
        }
        Ok(())
    }
}

/// A sensitive column as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRuleConfig {
    /// Column name in the input sheet
    pub source: String,

    /// Prefix of derived columns (defaults to `source`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Display redaction kind
    pub kind: ColumnKind,
}

impl ColumnRuleConfig {
    /// Create a column entry
    pub fn new(source: &str, label: Option<&str>, kind: ColumnKind) -> Self {
        Self {
            source: source.to_string(),
            label: label.map(str::to_string),
            kind,
        }
    }

    /// Resolve into a [`ColumnRule`]
    pub fn to_rule(&self) -> ColumnRule {
        ColumnRule::new(
            self.source.clone(),
            self.label.clone().unwrap_or_else(|| self.source.clone()),
            self.kind,
        )
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_salt() -> SecretString {
    secret_string(DEFAULT_SALT.to_string())
}

fn default_id_suffix() -> String {
    DEFAULT_ID_SUFFIX.to_string()
}

fn default_display_suffix() -> String {
    DEFAULT_DISPLAY_SUFFIX.to_string()
}

fn default_anonymous_placeholder() -> String {
    DEFAULT_ANONYMOUS_PLACEHOLDER.to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LogmaskConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.masking.salt.expose_secret().as_str(), DEFAULT_SALT);
    }

    #[test]
    fn test_default_profiles() {
        let config = LogmaskConfig::default();
        let iam = config.pipeline(PipelineKind::Iam);
        assert_eq!(iam.rule_set, RuleSetKind::Generic);
        assert_eq!(iam.case_mode, CaseMode::Lowercase);
        assert_eq!(iam.free_text_column.as_deref(), Some("详情"));

        let sip = config.pipeline(PipelineKind::Sip);
        assert_eq!(sip.rule_set, RuleSetKind::KeyValue);
        assert_eq!(sip.case_mode, CaseMode::Preserve);
        assert_eq!(sip.input, PathBuf::from("sip.xls"));
    }

    #[test]
    fn test_label_defaults_to_source() {
        let rules = PipelineConfig::sip_default().column_rules();
        assert_eq!(rules[0].source, "源地址");
        assert_eq!(rules[0].label, "源地址");
        let rules = PipelineConfig::iam_default().column_rules();
        assert_eq!(rules[0].label, "用户");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: LogmaskConfig = toml::from_str("").unwrap();
        assert_eq!(config.pipelines.iam, PipelineConfig::iam_default());
        assert_eq!(config.pipelines.sip, PipelineConfig::sip_default());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = LogmaskConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_salt_rejected() {
        let mut config = LogmaskConfig::default();
        config.masking.salt = secret_string(String::new());
        let err = config.validate().unwrap_err();
        assert!(err.contains("salt"));
    }

    #[test]
    fn test_same_suffix_rejected() {
        let mut config = LogmaskConfig::default();
        config.masking.display_suffix = "_ID".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_input_equals_output_rejected() {
        let mut config = LogmaskConfig::default();
        config.pipelines.sip.output = config.pipelines.sip.input.clone();
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("pipelines.sip"));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let mut config = LogmaskConfig::default();
        config.pipelines.iam.columns = vec![
            ColumnRuleConfig::new("源IP", Some("地址"), ColumnKind::Ip),
            ColumnRuleConfig::new("目标IP", Some("地址"), ColumnKind::Ip),
        ];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_free_text_cannot_be_masked_column() {
        let mut config = LogmaskConfig::default();
        config.pipelines.iam.free_text_column = Some("用户名".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = LogmaskConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pipeline_kind_display() {
        assert_eq!(PipelineKind::Iam.to_string(), "iam");
        assert_eq!(PipelineKind::Sip.to_string(), "sip");
    }
}
