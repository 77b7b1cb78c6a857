//! Conditions that record how often they are evaluated.
//!
//! Short-circuiting is only observable through side effects, so tests build
//! assertions from probes and then check the call counts.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;
use verity_core::{Assertion, Condition};

/// What a probe reports when evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Pass,
    Fail,
    Error,
}

/// Error returned by a probe set to [`ProbeOutcome::Error`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("probe '{label}' raised an error")]
pub struct ProbeError {
    pub label: String,
}

/// A shared, switchable leaf condition that counts its evaluations.
///
/// Clones share the same outcome and counter.
#[derive(Debug, Clone)]
pub struct Probe {
    label: Rc<str>,
    outcome: Rc<Cell<ProbeOutcome>>,
    calls: Rc<Cell<usize>>,
}

impl Probe {
    pub fn new(label: &str, outcome: ProbeOutcome) -> Self {
        Self {
            label: Rc::from(label),
            outcome: Rc::new(Cell::new(outcome)),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn passing(label: &str) -> Self {
        Self::new(label, ProbeOutcome::Pass)
    }

    pub fn failing(label: &str) -> Self {
        Self::new(label, ProbeOutcome::Fail)
    }

    pub fn erroring(label: &str) -> Self {
        Self::new(label, ProbeOutcome::Error)
    }

    /// Probe passing or failing according to `value`
    pub fn returning(label: &str, value: bool) -> Self {
        if value {
            Self::passing(label)
        } else {
            Self::failing(label)
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Change what later evaluations report
    pub fn set_outcome(&self, outcome: ProbeOutcome) {
        self.outcome.set(outcome);
    }

    /// Number of evaluations so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset_calls(&self) {
        self.calls.set(0);
    }

    /// Leaf condition backed by this probe
    pub fn condition(&self) -> Condition {
        let probe = self.clone();
        Condition::from_fallible_fn(move || probe.evaluate())
    }

    /// Assertion backed by this probe, using the label as its message
    pub fn assertion(&self) -> Assertion {
        Assertion::from_condition(self.condition(), self.label.to_string())
    }

    fn evaluate(&self) -> anyhow::Result<bool> {
        self.calls.set(self.calls.get() + 1);
        match self.outcome.get() {
            ProbeOutcome::Pass => Ok(true),
            ProbeOutcome::Fail => Ok(false),
            ProbeOutcome::Error => Err(ProbeError {
                label: self.label.to_string(),
            }
            .into()),
        }
    }
}
