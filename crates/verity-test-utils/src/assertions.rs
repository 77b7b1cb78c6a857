//! Assertion helpers for validating batch outcomes.

use thiserror::Error;
use verity_suite::BatchOutcome;

/// Error type for batch outcome validation failures
#[derive(Debug, Error)]
pub enum OutcomeValidationError {
    #[error("Expected batch to pass, but it failed at {index:?} with {message:?}")]
    UnexpectedFailure {
        index: Option<usize>,
        message: Option<String>,
    },

    #[error("Expected batch to fail, but it passed")]
    UnexpectedSuccess,

    #[error("Failure message mismatch: expected {expected:?}, got {actual:?}")]
    MessageMismatch {
        expected: String,
        actual: Option<String>,
    },

    #[error("Failure index mismatch: expected {expected}, got {actual:?}")]
    IndexMismatch {
        expected: usize,
        actual: Option<usize>,
    },
}

/// Asserts that a batch outcome reports success.
///
/// # Returns
///
/// * `Ok(())` - If every assertion passed
/// * `Err(OutcomeValidationError)` - If the outcome records a failure
pub fn assert_batch_passed(outcome: &BatchOutcome) -> Result<(), OutcomeValidationError> {
    if !outcome.success {
        return Err(OutcomeValidationError::UnexpectedFailure {
            index: outcome.failed_index,
            message: outcome.first_failure.clone(),
        });
    }

    Ok(())
}

/// Asserts that a batch outcome failed first at `expected_index` with
/// `expected_message`.
///
/// # Returns
///
/// * `Ok(())` - If the outcome matches
/// * `Err(OutcomeValidationError)` - Describing the first mismatch found
pub fn assert_first_failure(
    outcome: &BatchOutcome,
    expected_index: usize,
    expected_message: &str,
) -> Result<(), OutcomeValidationError> {
    if outcome.success {
        return Err(OutcomeValidationError::UnexpectedSuccess);
    }

    if outcome.failed_index != Some(expected_index) {
        return Err(OutcomeValidationError::IndexMismatch {
            expected: expected_index,
            actual: outcome.failed_index,
        });
    }

    if outcome.failure_message() != Some(expected_message) {
        return Err(OutcomeValidationError::MessageMismatch {
            expected: expected_message.to_string(),
            actual: outcome.first_failure.clone(),
        });
    }

    Ok(())
}
