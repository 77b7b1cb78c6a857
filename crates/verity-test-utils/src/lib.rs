//! Testing utilities for Verity.
//!
//! This crate provides shared helpers for exercising assertions and batches:
//! probes that count their own evaluations, shared values that assertions
//! read at execution time, tracing setup for tests, and assertion helpers for
//! batch outcomes.

pub mod assertions;
pub mod logging;
pub mod probe;
pub mod shared;

pub use logging::init_test_tracing;
pub use probe::{Probe, ProbeError, ProbeOutcome};
pub use shared::SharedValue;
