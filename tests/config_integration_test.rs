//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they don't
//! interfere with each other.

use logmask::config::{load_config, load_config_or_default, PipelineKind, DEFAULT_SALT};
use logmask::masking::{CaseMode, ColumnKind, RuleSetKind};
use secrecy::ExposeSecret;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("LOGMASK_APPLICATION_LOG_LEVEL");
    std::env::remove_var("LOGMASK_APPLICATION_DRY_RUN");
    std::env::remove_var("LOGMASK_SALT");
    std::env::remove_var("LOGMASK_IAM_INPUT");
    std::env::remove_var("LOGMASK_SIP_OUTPUT");
    std::env::remove_var("TEST_LOGMASK_SALT");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[masking]
salt = "site-salt"
display_suffix = "_展示"
anonymous_placeholder = "匿名"

[logging]
local_enabled = true
local_path = "/tmp/logmask"
local_rotation = "hourly"

[pipelines.iam]
input = "exports/iam.xlsx"
output = "masked/iam.xlsx"
free_text_column = "详情"
rule_set = "generic"
case_mode = "lowercase"

[[pipelines.iam.columns]]
source = "用户名"
label = "用户"
kind = "text"

[pipelines.sip]
input = "exports/sip.xls"
output = "masked/sip.xlsx"
rule_set = "key_value"

[[pipelines.sip.columns]]
source = "设备地址"
kind = "ip"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.masking.salt.expose_secret().as_str(), "site-salt");
    assert_eq!(config.masking.display_suffix, "_展示");
    assert_eq!(config.masking.id_suffix, "_ID");
    assert_eq!(config.logging.local_rotation, "hourly");

    let iam = config.pipeline(PipelineKind::Iam);
    assert_eq!(iam.input, PathBuf::from("exports/iam.xlsx"));
    assert_eq!(iam.columns.len(), 1);
    assert_eq!(iam.columns[0].kind, ColumnKind::Text);
    assert_eq!(iam.case_mode, CaseMode::Lowercase);

    let sip = config.pipeline(PipelineKind::Sip);
    assert_eq!(sip.rule_set, RuleSetKind::KeyValue);
    assert_eq!(sip.case_mode, CaseMode::Preserve);
    assert_eq!(sip.free_text_column, None);
    assert_eq!(sip.column_rules()[0].label, "设备地址");
}

#[test]
fn test_empty_config_uses_builtin_profiles() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.masking.salt.expose_secret().as_str(), DEFAULT_SALT);
    assert_eq!(config.pipelines.iam.input, PathBuf::from("iam.xlsx"));
    assert_eq!(config.pipelines.sip.input, PathBuf::from("sip.xls"));
    assert_eq!(config.pipelines.sip.output, PathBuf::from("sip_masked_final.xlsx"));
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_LOGMASK_SALT", "from-env");

    let file = write_config(
        r#"
[masking]
salt = "${TEST_LOGMASK_SALT}"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.masking.salt.expose_secret().as_str(), "from-env");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[masking]
salt = "${TEST_LOGMASK_SALT}"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_LOGMASK_SALT"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("LOGMASK_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("LOGMASK_SALT", "override-salt");
    std::env::set_var("LOGMASK_IAM_INPUT", "/data/iam-2024.xlsx");
    std::env::set_var("LOGMASK_SIP_OUTPUT", "/data/sip-out.xlsx");

    let file = write_config("[application]\nlog_level = \"debug\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.masking.salt.expose_secret().as_str(), "override-salt");
    assert_eq!(config.pipelines.iam.input, PathBuf::from("/data/iam-2024.xlsx"));
    assert_eq!(config.pipelines.sip.output, PathBuf::from("/data/sip-out.xlsx"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_dry_run_override() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("LOGMASK_APPLICATION_DRY_RUN", "sometimes");

    let file = write_config("");
    assert!(load_config(file.path()).is_err());

    cleanup_env_vars();
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let err = load_config_or_default(Some("no-such-dir/logmask.toml")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_validation_failures() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        ("[application]\nlog_level = \"loud\"\n", "log_level"),
        ("[masking]\nsalt = \"\"\n", "salt"),
        ("[masking]\nid_suffix = \"_x\"\ndisplay_suffix = \"_x\"\n", "must differ"),
        ("[logging]\nlocal_rotation = \"size\"\n", "local_rotation"),
        (
            "[pipelines.sip]\ninput = \"a.xlsx\"\noutput = \"a.xlsx\"\nrule_set = \"key_value\"\n",
            "output must differ",
        ),
        (
            r#"
[pipelines.iam]
input = "iam.xlsx"
output = "out.xlsx"
rule_set = "generic"
free_text_column = "用户名"

[[pipelines.iam.columns]]
source = "用户名"
kind = "text"
"#,
            "also a masked column",
        ),
        (
            r#"
[pipelines.iam]
input = "iam.xlsx"
output = "out.xlsx"
rule_set = "generic"

[[pipelines.iam.columns]]
source = "源IP"
label = "地址"
kind = "ip"

[[pipelines.iam.columns]]
source = "目标IP"
label = "地址"
kind = "ip"
"#,
            "produced twice",
        ),
    ];

    for (content, expected) in cases {
        let file = write_config(content);
        let err = load_config(file.path()).unwrap_err().to_string();
        assert!(err.contains(expected), "expected '{expected}' in '{err}'");
    }
}

#[test]
fn test_unknown_rule_set_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        "[pipelines.iam]\ninput = \"a.xlsx\"\noutput = \"b.xlsx\"\nrule_set = \"fuzzy\"\n",
    );
    assert!(load_config(file.path()).is_err());
}
