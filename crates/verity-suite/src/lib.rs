//! # Verity Suite
//!
//! Runs a batch of [`Assertion`](verity_core::Assertion)s in insertion order and
//! reports the first one that fails.
//!
//! ```
//! use verity_core::Assertion;
//! use verity_suite::AssertionBatch;
//!
//! let mut batch = AssertionBatch::new();
//! batch.add((|| 1 + 1 == 2, "arithmetic is broken"));
//! batch.add((|| "abc".len() == 4, "length mismatch"));
//! batch.add(Assertion::with_message(|| true, "never reached"));
//!
//! let (success, message) = batch.exec_all().unwrap().into_parts();
//! assert!(!success);
//! assert_eq!(message.as_deref(), Some("length mismatch"));
//! ```

mod batch;
mod config;
mod error;
mod outcome;

pub use batch::AssertionBatch;
pub use config::{SuiteConfig, ENV_LOG_FAILURES, ENV_MERGE_POLICY, ENV_SUITE_NAME};
pub use error::SuiteError;
pub use outcome::BatchOutcome;
