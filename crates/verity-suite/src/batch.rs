//! Ordered, append-only collection of assertions.

use std::slice;

use tracing::{debug, info, info_span, warn};
use verity_core::{Assertion, AssertionError};

use crate::config::SuiteConfig;
use crate::outcome::BatchOutcome;

/// Assertions executed in insertion order, stopping at the first failure.
///
/// Entries can only be appended; nothing removes or reorders them, and the
/// backing storage is never handed out mutably.
#[derive(Debug, Clone, Default)]
pub struct AssertionBatch {
    assertions: Vec<Assertion>,
    config: SuiteConfig,
}

impl AssertionBatch {
    /// Create an empty batch with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty batch with the given settings
    pub fn with_config(config: SuiteConfig) -> Self {
        Self {
            assertions: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Append an assertion, or anything convertible into one such as a
    /// `(closure, message)` pair
    pub fn add(&mut self, assertion: impl Into<Assertion>) {
        self.assertions.push(assertion.into());
    }

    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Assertion> {
        self.assertions.get(index)
    }

    /// Iterate in insertion order without executing anything
    pub fn iter(&self) -> slice::Iter<'_, Assertion> {
        self.assertions.iter()
    }

    /// Execute the assertion at `index`, if there is one
    pub fn execute_at(&self, index: usize) -> Option<Result<bool, AssertionError>> {
        self.assertions.get(index).map(Assertion::execute)
    }

    /// Execute every assertion in order until one fails.
    ///
    /// An empty batch succeeds. An evaluation error aborts the scan and is
    /// returned unchanged; later assertions are not executed.
    pub fn exec_all(&self) -> Result<BatchOutcome, AssertionError> {
        let span = info_span!(
            "exec_all",
            suite = %self.config.name,
            assertions = self.assertions.len()
        );
        let _guard = span.enter();

        for (index, assertion) in self.assertions.iter().enumerate() {
            let passed = match assertion.execute() {
                Ok(passed) => passed,
                Err(err) => {
                    warn!(index, error = %err, "Assertion evaluation failed");
                    return Err(err);
                }
            };
            debug!(index, passed, "Executed assertion");

            if !passed {
                if self.config.log_failures {
                    info!(index, message = assertion.message(), "Assertion failed");
                }
                return Ok(BatchOutcome::failed(index, assertion.message()));
            }
        }

        debug!("All assertions passed");
        Ok(BatchOutcome::passed())
    }
}

impl From<Vec<Assertion>> for AssertionBatch {
    fn from(assertions: Vec<Assertion>) -> Self {
        Self {
            assertions,
            config: SuiteConfig::default(),
        }
    }
}

impl FromIterator<Assertion> for AssertionBatch {
    fn from_iter<I: IntoIterator<Item = Assertion>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<Assertion> for AssertionBatch {
    fn extend<I: IntoIterator<Item = Assertion>>(&mut self, iter: I) {
        self.assertions.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AssertionBatch {
    type Item = &'a Assertion;
    type IntoIter = slice::Iter<'a, Assertion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for AssertionBatch {
    type Item = Assertion;
    type IntoIter = std::vec::IntoIter<Assertion>;

    fn into_iter(self) -> Self::IntoIter {
        self.assertions.into_iter()
    }
}
