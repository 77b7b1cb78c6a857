use thiserror::Error;

/// All possible errors raised while building or executing assertions
#[derive(Error, Debug)]
pub enum AssertionError {
    /// A condition reported a failure while being evaluated.
    ///
    /// The caller's error is carried as is; its message is shown unchanged
    /// and the concrete type can be recovered with [`AssertionError::downcast_ref`].
    #[error(transparent)]
    Evaluation(anyhow::Error),

    /// An assertion was built without a condition
    #[error("Assertion has no condition: {0}")]
    MissingCondition(String),
}

impl AssertionError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AssertionError::Evaluation(_) => "ERR_ASSERT_EVALUATION",
            AssertionError::MissingCondition(_) => "ERR_ASSERT_MISSING_CONDITION",
        }
    }

    /// Borrow the caller's evaluation error as its concrete type
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            AssertionError::Evaluation(err) => err.downcast_ref::<E>(),
            AssertionError::MissingCondition(_) => None,
        }
    }

    /// Recover the caller's evaluation error, if this is one
    pub fn into_inner(self) -> Option<anyhow::Error> {
        match self {
            AssertionError::Evaluation(err) => Some(err),
            AssertionError::MissingCondition(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error, PartialEq)]
    #[error("sensor offline: {0}")]
    struct SensorOffline(u8);

    #[test]
    fn test_evaluation_error_keeps_caller_error() {
        let err = AssertionError::Evaluation(SensorOffline(3).into());

        assert_eq!(err.to_string(), "sensor offline: 3");
        assert_eq!(err.downcast_ref::<SensorOffline>(), Some(&SensorOffline(3)));
        assert_eq!(err.error_code(), "ERR_ASSERT_EVALUATION");

        let inner = err.into_inner().unwrap();
        assert!(inner.is::<SensorOffline>());
    }

    #[test]
    fn test_missing_condition_code() {
        let err = AssertionError::MissingCondition("stock check".to_string());

        assert_eq!(err.error_code(), "ERR_ASSERT_MISSING_CONDITION");
        assert_eq!(err.to_string(), "Assertion has no condition: stock check");
        assert!(err.downcast_ref::<SensorOffline>().is_none());
        assert!(err.into_inner().is_none());
    }
}
