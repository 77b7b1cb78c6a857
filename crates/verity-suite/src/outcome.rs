use serde::{Deserialize, Serialize};

/// Result of running an [`AssertionBatch`](crate::AssertionBatch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// True when every assertion passed (or the batch was empty)
    pub success: bool,
    /// Message of the first failing assertion
    pub first_failure: Option<String>,
    /// Position of the first failing assertion
    pub failed_index: Option<usize>,
}

impl BatchOutcome {
    pub fn passed() -> Self {
        Self {
            success: true,
            first_failure: None,
            failed_index: None,
        }
    }

    pub fn failed(index: usize, message: impl Into<String>) -> Self {
        Self {
            success: false,
            first_failure: Some(message.into()),
            failed_index: Some(index),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.first_failure.as_deref()
    }

    /// `(success, first failure message)`
    pub fn into_parts(self) -> (bool, Option<String>) {
        (self.success, self.first_failure)
    }

    /// `Ok(())` on success, otherwise the first failure message
    pub fn into_result(self) -> Result<(), String> {
        match self.first_failure {
            Some(message) if !self.success => Err(message),
            _ => Ok(()),
        }
    }
}
