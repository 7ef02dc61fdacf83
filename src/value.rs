//! Condition values and the wildcard marker
//!
//! A [`Literal`] is a concrete outcome drawn from a condition's domain.
//! A [`Value`] is what an authored row may hold in a condition cell:
//! either a literal or the [`ANY`] wildcard. Expanded rows only ever
//! carry literals, which the types enforce.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A concrete condition outcome or result value
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Literal {
    /// Returns the boolean payload, if this is a boolean literal
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer literal
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Int(i)
    }
}

impl From<i32> for Literal {
    fn from(i: i32) -> Self {
        Literal::Int(i64::from(i))
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

/// A condition cell in an authored row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A concrete value from the condition's domain
    Literal(Literal),
    /// Matches every value in the condition's domain
    Any,
}

impl Value {
    pub fn is_any(&self) -> bool {
        matches!(self, Value::Any)
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal(l) => Some(l),
            Value::Any => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Literal(l) => write!(f, "{}", l),
            Value::Any => write!(f, "any"),
        }
    }
}

impl From<Literal> for Value {
    fn from(l: Literal) -> Self {
        Value::Literal(l)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Literal(Literal::Bool(b))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Literal(Literal::Int(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Literal(Literal::from(s))
    }
}

/// Wildcard: matches every value of the condition's domain
pub const ANY: Value = Value::Any;

/// Boolean `true` cell
pub const T: Value = Value::Literal(Literal::Bool(true));

/// Boolean `false` cell
pub const F: Value = Value::Literal(Literal::Bool(false));

/// Shorthand for a literal cell
pub fn lit(v: impl Into<Literal>) -> Value {
    Value::Literal(v.into())
}
