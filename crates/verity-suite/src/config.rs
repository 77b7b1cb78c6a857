use serde::{Deserialize, Serialize};
use verity_core::MergePolicy;

use crate::error::SuiteError;

/// Environment variable holding the suite name
pub const ENV_SUITE_NAME: &str = "VERITY_SUITE_NAME";
/// Environment variable holding the default merge policy
pub const ENV_MERGE_POLICY: &str = "VERITY_MERGE_POLICY";
/// Environment variable toggling failure logging
pub const ENV_LOG_FAILURES: &str = "VERITY_LOG_FAILURES";

/// Settings attached to an [`AssertionBatch`](crate::AssertionBatch).
///
/// None of these change how assertions evaluate; they only shape logging and
/// the policy callers pick when combining assertions for this suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Name recorded on the execution span
    pub name: String,
    /// Merge policy to use when combining assertions destined for this suite
    pub merge_policy: MergePolicy,
    /// Log the first failing assertion at info level
    pub log_failures: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            merge_policy: MergePolicy::default(),
            log_failures: true,
        }
    }
}

impl SuiteConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a YAML document; missing fields keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SuiteError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read settings from `VERITY_*` environment variables
    pub fn from_env() -> Result<Self, SuiteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SuiteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_SUITE_NAME) {
            config.name = name;
        }
        if let Some(policy) = lookup(ENV_MERGE_POLICY) {
            config.merge_policy = policy.parse()?;
        }
        if let Some(flag) = lookup(ENV_LOG_FAILURES) {
            config.log_failures = parse_flag(ENV_LOG_FAILURES, &flag)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SuiteError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SuiteError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.name, "default");
        assert_eq!(config.merge_policy, MergePolicy::Replace);
        assert!(config.log_failures);
    }

    #[test]
    fn test_from_yaml_with_partial_fields() {
        let config = SuiteConfig::from_yaml_str("name: checkout\nmerge_policy: Concat\n").unwrap();

        assert_eq!(
            config,
            SuiteConfig {
                name: "checkout".to_string(),
                merge_policy: MergePolicy::Concat,
                log_failures: true,
            }
        );
    }

    #[test]
    fn test_from_yaml_accepts_original_policy_name() {
        let config = SuiteConfig::from_yaml_str("merge_policy: RetainOriginal\nlog_failures: false").unwrap();
        assert_eq!(config.merge_policy, MergePolicy::RetainLeft);
        assert!(!config.log_failures);
    }

    #[test]
    fn test_yaml_and_env_accept_same_policy_spellings() {
        for name in ["retain-left", "Retain_Original", "CONCAT"] {
            let from_yaml = SuiteConfig::from_yaml_str(&format!("merge_policy: {}", name)).unwrap();
            let from_env = SuiteConfig::from_lookup(lookup_from(&[(ENV_MERGE_POLICY, name)])).unwrap();
            assert_eq!(from_yaml.merge_policy, from_env.merge_policy);
        }

        let err = SuiteConfig::from_yaml_str("merge_policy: shuffle").unwrap_err();
        assert_eq!(err.error_code(), "ERR_SUITE_YAML_PARSE");
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        let err = SuiteConfig::from_yaml_str("merge_policy: [1, 2]").unwrap_err();
        assert_eq!(err.error_code(), "ERR_SUITE_YAML_PARSE");
    }

    #[test]
    fn test_from_lookup() {
        let config = SuiteConfig::from_lookup(lookup_from(&[
            (ENV_SUITE_NAME, "smoke"),
            (ENV_MERGE_POLICY, "retain_left"),
            (ENV_LOG_FAILURES, "off"),
        ]))
        .unwrap();

        assert_eq!(config.name, "smoke");
        assert_eq!(config.merge_policy, MergePolicy::RetainLeft);
        assert!(!config.log_failures);
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = SuiteConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SuiteConfig::default());
    }

    #[test]
    fn test_from_lookup_invalid_values() {
        let err = SuiteConfig::from_lookup(lookup_from(&[(ENV_MERGE_POLICY, "shuffle")])).unwrap_err();
        assert_eq!(err.error_code(), "ERR_SUITE_MERGE_POLICY");

        let err = SuiteConfig::from_lookup(lookup_from(&[(ENV_LOG_FAILURES, "maybe")])).unwrap_err();
        assert_eq!(err.error_code(), "ERR_SUITE_INVALID_FLAG");
        assert_eq!(err.to_string(), "Invalid value for VERITY_LOG_FAILURES: maybe");
    }
}
