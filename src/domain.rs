//! Conditions and their value domains

use crate::error::{Error, Result};
use crate::value::Literal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kind of domain a condition ranges over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainKind {
    /// `[true, false]`, in that order
    Bool,
    /// A fixed, ordered list of string outcomes
    Enum(Vec<String>),
    /// Every integer in `min..=max`, ascending
    Int { min: i64, max: i64 },
}

impl DomainKind {
    /// Materialize the ordered domain.
    ///
    /// True sorts before false for booleans; the universe ordering
    /// depends on it.
    pub fn values(&self) -> Result<Vec<Literal>> {
        match self {
            DomainKind::Bool => Ok(vec![Literal::Bool(true), Literal::Bool(false)]),
            DomainKind::Enum(variants) => {
                if variants.is_empty() {
                    return Err(Error::Definition("Enum domain must not be empty".into()));
                }
                let mut seen = HashSet::new();
                for v in variants {
                    if !seen.insert(v.as_str()) {
                        return Err(Error::Definition(format!(
                            "Enum domain lists `{}` more than once",
                            v
                        )));
                    }
                }
                Ok(variants.iter().map(|v| Literal::String(v.clone())).collect())
            }
            DomainKind::Int { min, max } => {
                if min > max {
                    return Err(Error::Definition(format!(
                        "Int domain is empty: min {} > max {}",
                        min, max
                    )));
                }
                Ok((*min..=*max).map(Literal::Int).collect())
            }
        }
    }

    /// Number of values without materializing them
    pub fn size(&self) -> u64 {
        match self {
            DomainKind::Bool => 2,
            DomainKind::Enum(variants) => variants.len() as u64,
            DomainKind::Int { min, max } => {
                if min > max {
                    0
                } else {
                    (*max as i128 - *min as i128 + 1).min(u64::MAX as i128) as u64
                }
            }
        }
    }
}

/// A named input with a finite, ordered domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    pub domain: Vec<Literal>,
}

impl Condition {
    pub fn new(name: impl Into<String>, kind: &DomainKind) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            domain: kind.values()?,
        })
    }

    pub fn admits(&self, value: &Literal) -> bool {
        self.domain.contains(value)
    }
}
