//! Runtime dispatch of a table against a ruleset
//!
//! A [`Dispatcher`] evaluates each condition's capability in declared
//! order, looks the resulting tuple up among the expanded rows and
//! produces that row's result.

use crate::error::{Error, Result};
use crate::ruleset::{invoke, Args, Ruleset};
use crate::table::{DecisionTable, RowResult};
use crate::value::Literal;
use std::collections::HashMap;
use std::sync::Arc;

/// A table bound to a ruleset.
///
/// Immutable and cheap to clone; safe to call from many threads at once.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: DecisionTable,
    ruleset: Arc<Ruleset>,
    /// Condition tuple → index into `table.expanded()`
    index: Arc<HashMap<Vec<Literal>, usize>>,
}

impl Dispatcher {
    /// Bind `ruleset` to `table`.
    ///
    /// Fails if a condition has no capability, or if the table declared
    /// its arguments and a capability or computed result consumes one it
    /// did not declare.
    pub fn new(table: DecisionTable, ruleset: Ruleset) -> Result<Self> {
        for cond in table.conditions() {
            let cap = ruleset.require(&cond.name)?;
            check_declared(&table, &cond.name, cap.params())?;
        }
        for row in table.rows() {
            if let RowResult::Computed(cap) = &row.result {
                check_declared(&table, "computed result", cap.params())?;
            }
        }

        let mut index = HashMap::new();
        for (i, row) in table.expanded().iter().enumerate() {
            // First row wins when an unvalidated table has duplicates.
            index.entry(row.conditions.clone()).or_insert(i);
        }

        tracing::debug!(
            table = table.name(),
            rows = index.len(),
            "bound ruleset to decision table"
        );

        Ok(Self {
            table,
            ruleset: Arc::new(ruleset),
            index: Arc::new(index),
        })
    }

    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    /// Evaluate every condition in declared order
    pub fn evaluate_conditions(&self, args: &Args) -> Result<Vec<Literal>> {
        self.table
            .conditions()
            .iter()
            .map(|cond| {
                let cap = self.ruleset.require(&cond.name)?;
                invoke(cap.as_ref(), args)
            })
            .collect()
    }

    /// Pick the matching row and produce its result
    pub fn dispatch(&self, args: &Args) -> Result<Literal> {
        let tuple = self.evaluate_conditions(args)?;

        let Some(&i) = self.index.get(&tuple) else {
            tracing::warn!(
                table = self.table.name(),
                conditions = %crate::error::format_tuple(&tuple),
                "no row matches evaluated conditions"
            );
            return Err(Error::UnmatchedConditions {
                table: self.table.name().to_string(),
                conditions: tuple,
            });
        };

        let row = &self.table.expanded()[i];
        tracing::trace!(
            table = self.table.name(),
            source_row = row.source_row,
            "dispatched to row"
        );

        match &row.result {
            RowResult::Literal(l) => Ok(l.clone()),
            RowResult::Computed(cap) => invoke(cap.as_ref(), args),
        }
    }
}

fn check_declared(table: &DecisionTable, capability: &str, params: &[String]) -> Result<()> {
    if table.args().is_empty() {
        return Ok(());
    }
    for param in params {
        if !table.args().contains(param) {
            return Err(Error::UndeclaredArgument {
                capability: capability.to_string(),
                name: param.clone(),
            });
        }
    }
    Ok(())
}
