use thiserror::Error;
use verity_core::ParseMergePolicyError;

/// Errors raised while loading suite configuration
#[derive(Error, Debug)]
pub enum SuiteError {
    /// Errors that occur during YAML parsing
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A merge policy name was not recognised
    #[error("Invalid merge policy: {0}")]
    MergePolicy(#[from] ParseMergePolicyError),

    /// A boolean setting held something other than true/false
    #[error("Invalid value for {key}: {value}")]
    InvalidFlag { key: String, value: String },
}

impl SuiteError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SuiteError::YamlError(_) => "ERR_SUITE_YAML_PARSE",
            SuiteError::MergePolicy(_) => "ERR_SUITE_MERGE_POLICY",
            SuiteError::InvalidFlag { .. } => "ERR_SUITE_INVALID_FLAG",
        }
    }
}
