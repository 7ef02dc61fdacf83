//! Wildcard expansion
//!
//! Rewrites authored rows that contain [`Value::Any`] into the concrete
//! rows they stand for. A row is split left to right into segments: each
//! run of consecutive literals is one fixed segment, each wildcard is a
//! segment holding its condition's whole domain. The cartesian product of
//! the segments, flattened, gives one concrete tuple per combination.

use crate::domain::Condition;
use crate::space::cartesian_product;
use crate::table::{AuthoredRow, RowResult};
use crate::value::{Literal, Value};
use serde::Serialize;

/// A fully concrete row produced by expansion
#[derive(Debug, Clone, Serialize)]
pub struct ExpandedRow {
    pub conditions: Vec<Literal>,
    pub result: RowResult,
    /// Index of the authored row this came from
    pub source_row: usize,
}

/// One piece of a row: a list of alternative literal runs
type Segment = Vec<Vec<Literal>>;

/// Expand every authored row, preserving row order
pub fn expand_rows(rows: &[AuthoredRow], conditions: &[Condition]) -> Vec<ExpandedRow> {
    let mut expanded = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        expanded.extend(expand_row(index, row, conditions));
    }
    tracing::trace!(
        authored = rows.len(),
        expanded = expanded.len(),
        "expanded table rows"
    );
    expanded
}

/// Expand a single authored row
pub fn expand_row(index: usize, row: &AuthoredRow, conditions: &[Condition]) -> Vec<ExpandedRow> {
    if let Some(literals) = fully_concrete(&row.conditions) {
        return vec![ExpandedRow {
            conditions: literals,
            result: row.result.clone(),
            source_row: index,
        }];
    }

    let segments = segments(&row.conditions, conditions);
    cartesian_product(&segments)
        .into_iter()
        .map(|choice| ExpandedRow {
            conditions: choice.into_iter().flatten().collect(),
            result: row.result.clone(),
            source_row: index,
        })
        .collect()
}

fn fully_concrete(values: &[Value]) -> Option<Vec<Literal>> {
    values.iter().map(|v| v.as_literal().cloned()).collect()
}

fn segments(values: &[Value], conditions: &[Condition]) -> Vec<Segment> {
    let mut collected: Vec<Segment> = Vec::new();
    let mut current: Vec<Literal> = Vec::new();

    for (position, value) in values.iter().enumerate() {
        match value {
            Value::Literal(l) => current.push(l.clone()),
            Value::Any => {
                if !current.is_empty() {
                    collected.push(vec![std::mem::take(&mut current)]);
                }
                let domain = conditions
                    .get(position)
                    .map(|c| c.domain.clone())
                    .unwrap_or_default();
                collected.push(domain.into_iter().map(|l| vec![l]).collect());
            }
        }
    }

    if !current.is_empty() {
        collected.push(vec![current]);
    }

    collected
}
