//! Hash command implementation
//!
//! Prints the identifier a value receives under a profile's hashing rules,
//! so that a masked row can be matched against a known address or account.

use crate::config::{LogmaskConfig, PipelineKind};
use crate::domain::Cell;
use clap::Args;

/// Arguments for the hash command
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Value to hash (for example an IP address or username)
    pub value: String,

    /// Profile whose case folding applies
    #[arg(long, value_enum, default_value_t = PipelineKind::Iam)]
    pub profile: PipelineKind,
}

impl HashArgs {
    /// Execute the hash command
    pub fn execute(&self, config: &LogmaskConfig) -> anyhow::Result<i32> {
        println!("{}", self.identifier(config));
        Ok(0)
    }

    /// Identifier for the value under the selected profile
    pub fn identifier(&self, config: &LogmaskConfig) -> String {
        let case_mode = config.pipeline(self.profile).case_mode;
        config
            .masking
            .hasher(case_mode)
            .hash(&Cell::text(self.value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::MISSING_SENTINEL;

    fn args(value: &str, profile: PipelineKind) -> HashArgs {
        HashArgs {
            value: value.to_string(),
            profile,
        }
    }

    #[test]
    fn test_iam_profile_folds_case() {
        let config = LogmaskConfig::default();
        assert_eq!(
            args("Alice (admin)", PipelineKind::Iam).identifier(&config),
            args("alice", PipelineKind::Iam).identifier(&config)
        );
    }

    #[test]
    fn test_sip_profile_preserves_case() {
        let config = LogmaskConfig::default();
        assert_ne!(
            args("Alice", PipelineKind::Sip).identifier(&config),
            args("alice", PipelineKind::Sip).identifier(&config)
        );
    }

    #[test]
    fn test_ip_matches_across_profiles() {
        let config = LogmaskConfig::default();
        assert_eq!(
            args("10.0.0.1", PipelineKind::Iam).identifier(&config),
            args("10.0.0.1", PipelineKind::Sip).identifier(&config)
        );
    }

    #[test]
    fn test_empty_value() {
        let config = LogmaskConfig::default();
        assert_eq!(args("", PipelineKind::Iam).identifier(&config), MISSING_SENTINEL);
    }
}
