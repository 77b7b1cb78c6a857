//! The [`Assertion`] value type and its combinators.

use std::fmt;

use tracing::trace;

use crate::builder::AssertionBuilder;
use crate::error::AssertionError;
use crate::expr::{Condition, Connective, Predicate};
use crate::merge::MergePolicy;

/// A deferred boolean check paired with the message describing its failure.
///
/// Both parts are fixed at construction. Combinators return new assertions and
/// leave their operands as they were, so an assertion can be executed any
/// number of times before and after taking part in a combination.
#[derive(Clone)]
pub struct Assertion {
    condition: Condition,
    message: String,
}

impl Assertion {
    /// Wrap `expr` with an empty failure message. Nothing is evaluated.
    pub fn new<F>(expr: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self::with_message(expr, "")
    }

    /// Wrap `expr` together with its failure message
    pub fn with_message<F, M>(expr: F, message: M) -> Self
    where
        F: Fn() -> bool + 'static,
        M: Into<String>,
    {
        Self::from_condition(Condition::from_fn(expr), message)
    }

    /// Wrap an expression that can itself fail while being evaluated
    pub fn fallible<F, M>(expr: F, message: M) -> Self
    where
        F: Fn() -> anyhow::Result<bool> + 'static,
        M: Into<String>,
    {
        Self::from_condition(Condition::from_fallible_fn(expr), message)
    }

    /// Wrap an already built condition tree
    pub fn from_condition<M>(condition: Condition, message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            condition,
            message: message.into(),
        }
    }

    /// Start building an assertion step by step
    pub fn builder() -> AssertionBuilder {
        AssertionBuilder::new()
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Failure message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the condition now.
    ///
    /// Every call evaluates again, so captured state that changed since the
    /// last call is observed. Errors returned by fallible leaves come back as
    /// [`AssertionError::Evaluation`]; panics inside a condition unwind
    /// through this call untouched.
    pub fn execute(&self) -> Result<bool, AssertionError> {
        self.condition.eval().map_err(AssertionError::Evaluation)
    }

    /// Short-circuit AND, keeping `other`'s message
    pub fn and(&self, other: &Assertion) -> Assertion {
        self.and_with(other, MergePolicy::Replace)
    }

    /// Short-circuit AND with an explicit message policy.
    ///
    /// `other` is only evaluated when `self` evaluates to true.
    pub fn and_with(&self, other: &Assertion, policy: MergePolicy) -> Assertion {
        self.combine(Connective::And, other, policy)
    }

    /// Short-circuit OR, keeping `other`'s message
    pub fn or(&self, other: &Assertion) -> Assertion {
        self.or_with(other, MergePolicy::Replace)
    }

    /// Short-circuit OR with an explicit message policy.
    ///
    /// `other` is only evaluated when `self` evaluates to false.
    pub fn or_with(&self, other: &Assertion, policy: MergePolicy) -> Assertion {
        self.combine(Connective::Or, other, policy)
    }

    /// AND with a bare expression; the current message is kept
    pub fn and_expr<F>(&self, expr: F) -> Assertion
    where
        F: Fn() -> bool + 'static,
    {
        self.and_with(&Assertion::new(expr), MergePolicy::RetainLeft)
    }

    /// AND with a bare expression whose message replaces the current one
    pub fn and_expr_with_message<F, M>(&self, expr: F, message: M) -> Assertion
    where
        F: Fn() -> bool + 'static,
        M: Into<String>,
    {
        self.and_with(&Assertion::with_message(expr, message), MergePolicy::Replace)
    }

    /// OR with a bare expression; the current message is kept
    pub fn or_expr<F>(&self, expr: F) -> Assertion
    where
        F: Fn() -> bool + 'static,
    {
        self.or_with(&Assertion::new(expr), MergePolicy::RetainLeft)
    }

    /// OR with a bare expression whose message replaces the current one
    pub fn or_expr_with_message<F, M>(&self, expr: F, message: M) -> Assertion
    where
        F: Fn() -> bool + 'static,
        M: Into<String>,
    {
        self.or_with(&Assertion::with_message(expr, message), MergePolicy::Replace)
    }

    fn combine(&self, op: Connective, other: &Assertion, policy: MergePolicy) -> Assertion {
        trace!(connective = %op, policy = %policy, "combining assertions");
        Assertion {
            condition: self.condition.combine(op, &other.condition),
            message: policy.merge(&self.message, &other.message, op.as_str()),
        }
    }
}

impl<T: 'static> Predicate<T> {
    /// Turn this predicate into an assertion over the subject produced by
    /// `subject`. The subject is produced again on every execution.
    pub fn applied_to<S, M>(&self, subject: S, message: M) -> Assertion
    where
        S: Fn() -> T + 'static,
        M: Into<String>,
    {
        let predicate = self.clone();
        let condition = Condition::from_fallible_fn(move || predicate.evaluate(&subject()));
        Assertion::from_condition(condition, message)
    }
}

/// Literal-style construction, e.g. `(move || x.get() > 5, "too small").into()`
impl<F, M> From<(F, M)> for Assertion
where
    F: Fn() -> bool + 'static,
    M: Into<String>,
{
    fn from((expr, message): (F, M)) -> Self {
        Assertion::with_message(expr, message)
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("message", &self.message)
            .field("condition", &self.condition)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_reevaluates_after_state_change() {
        let x = Rc::new(Cell::new(7));
        let over_five = {
            let x = Rc::clone(&x);
            Assertion::with_message(move || x.get() > 5, "x must exceed 5")
        };

        assert!(over_five.execute().unwrap());
        x.set(3);
        assert!(!over_five.execute().unwrap());
        x.set(6);
        assert!(over_five.execute().unwrap());
    }

    #[test]
    fn test_message_policies() {
        let a = Assertion::with_message(|| true, "M1");
        let b = Assertion::with_message(|| true, "M2");

        assert_eq!(a.and_with(&b, MergePolicy::Concat).message(), "M1 And M2");
        assert_eq!(a.or_with(&b, MergePolicy::Concat).message(), "M1 Or M2");
        assert_eq!(a.and_with(&b, MergePolicy::Replace).message(), "M2");
        assert_eq!(a.and_with(&b, MergePolicy::RetainLeft).message(), "M1");
        assert_eq!(a.and(&b).message(), "M2");
        assert_eq!(a.or(&b).message(), "M2");
    }

    #[test]
    fn test_expression_overload_defaults() {
        let a = Assertion::with_message(|| true, "M1");

        assert_eq!(a.and_expr(|| true).message(), "M1");
        assert_eq!(a.or_expr(|| false).message(), "M1");
        assert_eq!(a.and_expr_with_message(|| true, "M3").message(), "M3");
        assert_eq!(a.or_expr_with_message(|| true, "M4").message(), "M4");
    }

    #[test]
    fn test_expression_overloads_evaluate() {
        let yes = Assertion::new(|| true);
        let no = Assertion::new(|| false);

        assert!(yes.and_expr(|| true).execute().unwrap());
        assert!(!yes.and_expr(|| false).execute().unwrap());
        assert!(no.or_expr(|| true).execute().unwrap());
        assert!(!no.or_expr_with_message(|| false, "both false").execute().unwrap());
    }

    #[test]
    fn test_combination_leaves_operands_untouched() {
        let a = Assertion::with_message(|| true, "left");
        let b = Assertion::with_message(|| false, "right");
        let c = a.and_with(&b, MergePolicy::Concat);

        assert!(!c.execute().unwrap());
        assert!(a.execute().unwrap());
        assert!(!b.execute().unwrap());
        assert_eq!(a.message(), "left");
        assert_eq!(b.message(), "right");
        assert!(a.condition().is_leaf());
        assert_eq!(c.condition().connective(), Some(Connective::And));
    }

    #[test]
    fn test_fallible_error_is_returned() {
        let divisor = Rc::new(Cell::new(0));
        let ratio = {
            let divisor = Rc::clone(&divisor);
            Assertion::fallible(
                move || {
                    let d = divisor.get();
                    if d == 0 {
                        anyhow::bail!("divisor is zero");
                    }
                    Ok(10 / d > 2)
                },
                "ratio above 2",
            )
        };

        let err = ratio.execute().unwrap_err();
        assert_eq!(err.to_string(), "divisor is zero");
        assert_eq!(err.error_code(), "ERR_ASSERT_EVALUATION");

        divisor.set(2);
        assert!(ratio.execute().unwrap());
    }

    #[test]
    fn test_tuple_conversion() {
        let a: Assertion = (|| 2 + 2 == 4, "arithmetic").into();
        let b = Assertion::from((|| false, String::from("owned message")));

        assert_eq!(a.message(), "arithmetic");
        assert!(a.execute().unwrap());
        assert_eq!(b.message(), "owned message");
    }

    #[test]
    fn test_predicate_applied_to_fresh_subject() {
        let stock = Rc::new(Cell::new(4));
        let positive = Predicate::<i32>::leaf(|n| *n > 0);
        let under_ten = Predicate::<i32>::leaf(|n| *n < 10);
        let in_range = {
            let stock = Rc::clone(&stock);
            positive
                .and(&under_ten)
                .applied_to(move || stock.get(), "stock out of range")
        };

        assert!(in_range.execute().unwrap());
        stock.set(12);
        assert!(!in_range.execute().unwrap());
        assert_eq!(in_range.message(), "stock out of range");
    }

    #[test]
    fn test_debug_shows_message_and_shape() {
        let a = Assertion::with_message(|| true, "a").and_expr(|| true);
        assert_eq!(
            format!("{:?}", a),
            "Assertion { message: \"a\", condition: And(Leaf, Leaf) }"
        );
    }
}
