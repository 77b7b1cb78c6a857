//! Step-by-step construction of assertions.

use crate::assertion::Assertion;
use crate::error::AssertionError;
use crate::expr::Condition;

/// Builder for [`Assertion`].
///
/// `build` fails fast when no condition was supplied instead of producing an
/// assertion that could only fail later at execution time.
#[derive(Debug, Default)]
pub struct AssertionBuilder {
    condition: Option<Condition>,
    message: String,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the condition from an infallible closure
    pub fn condition<F>(mut self, expr: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.condition = Some(Condition::from_fn(expr));
        self
    }

    /// Set the condition from a closure that may fail during evaluation
    pub fn fallible<F>(mut self, expr: F) -> Self
    where
        F: Fn() -> anyhow::Result<bool> + 'static,
    {
        self.condition = Some(Condition::from_fallible_fn(expr));
        self
    }

    /// Set the condition from an existing expression tree
    pub fn expression(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set the failure message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Build the assertion
    pub fn build(self) -> Result<Assertion, AssertionError> {
        match self.condition {
            Some(condition) => Ok(Assertion::from_condition(condition, self.message)),
            None => {
                let label = if self.message.is_empty() {
                    "<unnamed assertion>".to_string()
                } else {
                    self.message
                };
                Err(AssertionError::MissingCondition(label))
            }
        }
    }
}
