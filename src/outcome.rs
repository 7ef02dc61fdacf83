//! Success/failure wrapper for validation results

use crate::error::{Error, Result};

/// Either a validated value or the list of problems found.
///
/// Invalid tables are not errors: a failure is ordinary data the caller
/// branches on. Only asking the wrong side for its payload is an error.
#[derive(Debug, Clone)]
pub enum Outcome<T, E> {
    Success(T),
    Failure(Vec<E>),
}

impl<T, E> Outcome<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// The successful value, or [`Error::Logic`] on failure
    pub fn value(&self) -> Result<&T> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(_) => Err(Error::Logic("Not successful".into())),
        }
    }

    /// Consume the outcome, returning the value or [`Error::Logic`]
    pub fn into_value(self) -> Result<T> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(_) => Err(Error::Logic("Not successful".into())),
        }
    }

    /// The collected issues, or [`Error::Logic`] on success
    pub fn issues(&self) -> Result<&[E]> {
        match self {
            Outcome::Success(_) => Err(Error::Logic("Not a failure".into())),
            Outcome::Failure(issues) => Ok(issues),
        }
    }
}

/// Result of [`crate::DecisionTable::validate`]
pub type ValidationOutcome = Outcome<crate::DecisionTable, crate::validate::Issue>;
