//! # Verity Core
//!
//! Deferred, composable assertions for ad-hoc test checks.
//!
//! An [`Assertion`] pairs a boolean condition with a failure message. The
//! condition is held as an expression tree ([`Expr`]) of leaf closures joined by
//! short-circuit AND/OR nodes, so two assertions built in unrelated scopes can
//! be combined into one tree and evaluated as a unit. Nothing runs until
//! [`Assertion::execute`] is called, and every call evaluates again.
//!
//! ## Features
//!
//! * Short-circuit `and`/`or` combinators that never evaluate eagerly
//! * Pluggable failure message merging through [`MergePolicy`]
//! * Fallible conditions whose errors reach the caller unchanged
//! * Predicates over a subject ([`Predicate`]) that combine the same way
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use verity_core::{Assertion, MergePolicy};
//!
//! let x = Rc::new(Cell::new(7));
//! let over_five = {
//!     let x = Rc::clone(&x);
//!     Assertion::with_message(move || x.get() > 5, "Cool cool cool")
//! };
//! let under_ten = {
//!     let x = Rc::clone(&x);
//!     Assertion::with_message(move || x.get() < 10, "Well well well")
//! };
//!
//! let combined = over_five.and_with(&under_ten, MergePolicy::Concat);
//! assert_eq!(combined.message(), "Cool cool cool And Well well well");
//! assert!(combined.execute().unwrap());
//!
//! x.set(10);
//! assert!(!combined.execute().unwrap());
//! ```

mod assertion;
mod builder;
mod error;

pub mod expr;
pub mod merge;

pub use assertion::Assertion;
pub use builder::AssertionBuilder;
pub use error::AssertionError;
pub use expr::{Condition, Connective, Expr, Predicate};
pub use merge::{MergePolicy, ParseMergePolicyError};

/// Returns a version string for the Verity core crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_function() {
        let ver = version();
        assert!(!ver.is_empty(), "Version string should not be empty");
        assert!(ver.contains('.'), "Version string should contain at least one dot");
    }
}
