//! Message merge policies applied when two assertions are combined.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the failure messages of two combined assertions become one.
///
/// Deserialisation accepts the same spellings as [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MergePolicy {
    /// Keep the right-hand message
    #[default]
    Replace,

    /// Keep the left-hand message
    RetainLeft,

    /// Join both messages around the connector: `"{left} {connector} {right}"`
    Concat,
}

/// Returned when a merge policy name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown merge policy: {0}")]
pub struct ParseMergePolicyError(pub String);

impl MergePolicy {
    /// Every built-in policy
    pub const ALL: [MergePolicy; 3] = [
        MergePolicy::Replace,
        MergePolicy::RetainLeft,
        MergePolicy::Concat,
    ];

    /// Combine `left` and `right`; `connector` names the operation ("And", "Or")
    pub fn merge(&self, left: &str, right: &str, connector: &str) -> String {
        match self {
            MergePolicy::Replace => right.to_string(),
            MergePolicy::RetainLeft => left.to_string(),
            MergePolicy::Concat => format!("{} {} {}", left, connector, right),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MergePolicy::Replace => "Replace",
            MergePolicy::RetainLeft => "RetainLeft",
            MergePolicy::Concat => "Concat",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MergePolicy {
    type Err = ParseMergePolicyError;

    /// Case-insensitive; `_` and `-` are ignored, so `retain_left`,
    /// `RetainLeft` and `retain-original` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "replace" => Ok(MergePolicy::Replace),
            "retainleft" | "retainoriginal" => Ok(MergePolicy::RetainLeft),
            "concat" => Ok(MergePolicy::Concat),
            _ => Err(ParseMergePolicyError(s.to_string())),
        }
    }
}

impl TryFrom<String> for MergePolicy {
    type Error = ParseMergePolicyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
