//! Error types for makes-sense
//!
//! Validation issues (missing or duplicate combinations) are *not* errors;
//! they are returned as data inside a [`crate::ValidationOutcome`]. The
//! variants here cover broken contracts between a table, its ruleset and
//! the caller.

use crate::value::Literal;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// makes-sense errors
#[derive(Error, Debug)]
pub enum Error {
    /// The table definition violates a structural invariant
    #[error("Definition error: {0}")]
    Definition(String),

    /// The ruleset has no capability for a declared condition
    #[error("Configuration error: ruleset has no capability for condition `{condition}`")]
    MissingCapability { condition: String },

    /// A capability or computed result asked for an argument the caller did not supply
    #[error("Configuration error: missing runtime argument `{name}`")]
    MissingArgument { name: String },

    /// A capability consumes an argument the table never declared
    #[error("Configuration error: `{capability}` consumes undeclared argument `{name}`")]
    UndeclaredArgument { capability: String, name: String },

    /// No expanded row matches the evaluated condition tuple
    #[error("Unmatched conditions in table `{table}`: {}", format_tuple(.conditions))]
    UnmatchedConditions {
        table: String,
        conditions: Vec<Literal>,
    },

    /// API misuse, e.g. asking a failed outcome for its value
    #[error("Logic error: {0}")]
    Logic(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for the errors that indicate a ruleset/argument mismatch
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingCapability { .. }
                | Error::MissingArgument { .. }
                | Error::UndeclaredArgument { .. }
        )
    }
}

pub(crate) fn format_tuple(values: &[Literal]) -> String {
    let parts: Vec<_> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_message_lists_tuple() {
        let err = Error::UnmatchedConditions {
            table: "FizzBuzz".into(),
            conditions: vec![Literal::Bool(true), Literal::Bool(false)],
        };
        assert_eq!(
            err.to_string(),
            "Unmatched conditions in table `FizzBuzz`: [true, false]"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(Error::MissingArgument { name: "n".into() }.is_configuration());
        assert!(!Error::Logic("Not successful".into()).is_configuration());
    }
}
