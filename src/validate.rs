//! Table validation - completeness and uniqueness
//!
//! Detects:
//! - Missing combinations (a universe tuple no expanded row covers)
//! - Duplicate combinations (two expanded rows cover the same tuple)
//!
//! Both checks always run, so one call reports every problem.

use crate::error::format_tuple;
use crate::outcome::{Outcome, ValidationOutcome};
use crate::space::universe;
use crate::table::DecisionTable;
use crate::value::Literal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A problem found while validating a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// No row covers this combination
    Missing {
        expected_conditions: Vec<Literal>,
        /// Condition name → value for the uncovered combination
        expected: BTreeMap<String, Literal>,
    },
    /// More than one row covers this combination
    Duplicate {
        /// Source row of the first covering row, then the colliding row
        rows: Vec<usize>,
        conditions: Vec<Literal>,
    },
}

impl Issue {
    pub fn is_missing(&self) -> bool {
        matches!(self, Issue::Missing { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Issue::Duplicate { .. })
    }

    /// The condition tuple this issue is about
    pub fn conditions(&self) -> &[Literal] {
        match self {
            Issue::Missing {
                expected_conditions,
                ..
            } => expected_conditions,
            Issue::Duplicate { conditions, .. } => conditions,
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Issue::Missing {
                expected_conditions,
                ..
            } => write!(
                f,
                "Missing result condition: {}",
                format_tuple(expected_conditions)
            ),
            Issue::Duplicate { rows, conditions } => {
                let rows: Vec<_> = rows.iter().map(|r| r.to_string()).collect();
                write!(
                    f,
                    "Duplicate conditions {} in rows {}",
                    format_tuple(conditions),
                    rows.join(" and ")
                )
            }
        }
    }
}

/// Validate a table against the full condition universe
pub fn validate(table: &DecisionTable) -> ValidationOutcome {
    let all = universe(table.conditions());
    let expanded = table.expanded();

    let mut issues = Vec::new();

    // 1. Completeness
    let covered: HashSet<&[Literal]> = expanded.iter().map(|r| r.conditions.as_slice()).collect();
    for tuple in &all {
        if !covered.contains(tuple.as_slice()) {
            issues.push(Issue::Missing {
                expected: named(table, tuple),
                expected_conditions: tuple.clone(),
            });
        }
    }

    // 2. Uniqueness
    let mut seen: HashMap<&[Literal], usize> = HashMap::new();
    for row in expanded {
        match seen.get(row.conditions.as_slice()) {
            Some(&first) => issues.push(Issue::Duplicate {
                rows: vec![first, row.source_row],
                conditions: row.conditions.clone(),
            }),
            None => {
                seen.insert(row.conditions.as_slice(), row.source_row);
            }
        }
    }

    tracing::debug!(
        table = table.name(),
        universe = all.len(),
        expanded = expanded.len(),
        issues = issues.len(),
        "validated decision table"
    );

    if issues.is_empty() {
        Outcome::Success(table.clone())
    } else {
        tracing::warn!(
            table = table.name(),
            issues = issues.len(),
            "decision table is not exhaustive and unique"
        );
        Outcome::Failure(issues)
    }
}

fn named(table: &DecisionTable, tuple: &[Literal]) -> BTreeMap<String, Literal> {
    table
        .conditions()
        .iter()
        .zip(tuple)
        .map(|(c, v)| (c.name.clone(), v.clone()))
        .collect()
}

/// Serializable summary of a validation outcome
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub table: String,
    pub fingerprint: String,
    pub is_valid: bool,
    pub missing_count: usize,
    pub duplicate_count: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(table: &DecisionTable, outcome: &ValidationOutcome) -> Self {
        let issues = outcome.issues().map(|i| i.to_vec()).unwrap_or_default();
        Self {
            table: table.name().to_string(),
            fingerprint: table.fingerprint(),
            is_valid: outcome.is_success(),
            missing_count: issues.iter().filter(|i| i.is_missing()).count(),
            duplicate_count: issues.iter().filter(|i| i.is_duplicate()).count(),
            issues,
        }
    }

    /// Human-readable report
    pub fn to_report(&self) -> String {
        if self.is_valid {
            return format!("✓ {}: valid (every combination covered once)", self.table);
        }

        let mut out = format!(
            "✗ {}: {} missing, {} duplicate\n",
            self.table, self.missing_count, self.duplicate_count
        );
        for issue in &self.issues {
            out.push_str(&format!("  {}\n", issue));
            if let Issue::Missing { expected, .. } = issue {
                let pairs: Vec<_> = expected.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                out.push_str(&format!("      expected {{ {} }}\n", pairs.join(", ")));
            }
        }
        out
    }
}
