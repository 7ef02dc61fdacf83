//! Decision tables and the builder used to declare them
//!
//! ## Example
//!
//! ```
//! use makes_sense::{DecisionTable, DomainKind, RowResult, F, T};
//!
//! let table = DecisionTable::define("FizzBuzz", |b| {
//!     b.arg("n");
//!     b.cond("divisible_by_three", DomainKind::Bool);
//!     b.cond("divisible_by_five", DomainKind::Bool);
//!     b.table(|r| {
//!         r.row([F, F], RowResult::arg("n"));
//!         r.row([T, F], "Fizz");
//!         r.row([F, T], "Buzz");
//!         r.row([T, T], "FizzBuzz");
//!     });
//! })
//! .unwrap();
//!
//! assert!(table.validate().is_success());
//! ```

use crate::config::EngineConfig;
use crate::dispatch::Dispatcher;
use crate::domain::{Condition, DomainKind};
use crate::error::{Error, Result};
use crate::expand::{expand_rows, ExpandedRow};
use crate::outcome::ValidationOutcome;
use crate::ruleset::{ArgCapability, Args, Capability, FnCapability, Ruleset};
use crate::value::{Literal, Value};
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

static IDENTIFIER: OnceLock<Regex> = OnceLock::new();

fn is_identifier(name: &str) -> bool {
    IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"))
        .is_match(name)
}

/// What a row produces when it matches
#[derive(Debug, Clone)]
pub enum RowResult {
    /// A fixed value
    Literal(Literal),
    /// A value computed from named runtime arguments
    Computed(Arc<dyn Capability>),
}

impl RowResult {
    /// A computed result that returns the runtime argument `name` unchanged
    pub fn arg(name: impl Into<String>) -> Self {
        RowResult::Computed(Arc::new(ArgCapability::new(name)))
    }

    /// A computed result backed by a closure over the declared params
    pub fn computed<I, S, F>(params: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Args) -> Literal + Send + Sync + 'static,
    {
        RowResult::Computed(Arc::new(FnCapability::new(params, func)))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, RowResult::Computed(_))
    }

    /// Argument names this result needs at dispatch time
    pub fn params(&self) -> &[String] {
        match self {
            RowResult::Literal(_) => &[],
            RowResult::Computed(cap) => cap.params(),
        }
    }
}

impl std::fmt::Display for RowResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowResult::Literal(l) => write!(f, "{}", l),
            RowResult::Computed(cap) => write!(f, "computed({})", cap.params().join(", ")),
        }
    }
}

impl Serialize for RowResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RowResult::Literal(l) => l.serialize(serializer),
            RowResult::Computed(cap) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("computed", cap.params())?;
                map.end()
            }
        }
    }
}

impl From<Literal> for RowResult {
    fn from(l: Literal) -> Self {
        RowResult::Literal(l)
    }
}

impl From<bool> for RowResult {
    fn from(b: bool) -> Self {
        RowResult::Literal(Literal::Bool(b))
    }
}

impl From<i64> for RowResult {
    fn from(i: i64) -> Self {
        RowResult::Literal(Literal::Int(i))
    }
}

impl From<i32> for RowResult {
    fn from(i: i32) -> Self {
        RowResult::Literal(Literal::from(i))
    }
}

impl From<&str> for RowResult {
    fn from(s: &str) -> Self {
        RowResult::Literal(Literal::from(s))
    }
}

impl From<String> for RowResult {
    fn from(s: String) -> Self {
        RowResult::Literal(Literal::String(s))
    }
}

/// A row as the author wrote it, possibly with wildcards
#[derive(Debug, Clone)]
pub struct AuthoredRow {
    /// One value per condition, in condition order
    pub conditions: Vec<Value>,
    pub result: RowResult,
}

/// An immutable, validated-on-construction decision table.
///
/// Cloning is cheap; clones share the same rows and expansion cache.
#[derive(Debug, Clone)]
pub struct DecisionTable {
    inner: Arc<TableInner>,
}

#[derive(Debug)]
struct TableInner {
    name: String,
    args: Vec<String>,
    conditions: Vec<Condition>,
    rows: Vec<AuthoredRow>,
    expanded: OnceLock<Vec<ExpandedRow>>,
}

impl DecisionTable {
    /// Declare a table with the default [`EngineConfig`]
    pub fn define<F>(name: impl Into<String>, f: F) -> Result<Self>
    where
        F: FnOnce(&mut TableBuilder),
    {
        Self::define_with(name, &EngineConfig::default(), f)
    }

    /// Declare a table under explicit engine limits
    pub fn define_with<F>(name: impl Into<String>, config: &EngineConfig, f: F) -> Result<Self>
    where
        F: FnOnce(&mut TableBuilder),
    {
        let mut builder = TableBuilder::default();
        f(&mut builder);
        builder.build(name.into(), config)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Declared runtime argument names
    pub fn args(&self) -> &[String] {
        &self.inner.args
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.inner.conditions
    }

    pub fn condition_names(&self) -> Vec<&str> {
        self.inner.conditions.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[AuthoredRow] {
        &self.inner.rows
    }

    /// Wildcard-free rows, computed once and cached
    pub fn expanded(&self) -> &[ExpandedRow] {
        self.inner
            .expanded
            .get_or_init(|| expand_rows(&self.inner.rows, &self.inner.conditions))
    }

    /// Check the table is exhaustive and free of duplicate combinations
    pub fn validate(&self) -> ValidationOutcome {
        crate::validate::validate(self)
    }

    /// Bind a ruleset, producing a reusable dispatcher
    pub fn bind_ruleset(&self, ruleset: Ruleset) -> Result<Dispatcher> {
        Dispatcher::new(self.clone(), ruleset)
    }

    /// Stable digest of the table's declared shape, for change detection
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.inner.name.as_bytes());
        for arg in &self.inner.args {
            hasher.update(b"\0arg:");
            hasher.update(arg.as_bytes());
        }
        for cond in &self.inner.conditions {
            hasher.update(b"\0cond:");
            hasher.update(cond.name.as_bytes());
            for v in &cond.domain {
                hasher.update(b"|");
                hasher.update(v.to_string().as_bytes());
            }
        }
        for row in &self.inner.rows {
            hasher.update(b"\0row:");
            for v in &row.conditions {
                hasher.update(v.to_string().as_bytes());
                hasher.update(b"|");
            }
            hasher.update(row.result.to_string().as_bytes());
        }
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }
}

/// Collects conditions, arguments and rows for [`DecisionTable::define`]
#[derive(Debug, Default)]
pub struct TableBuilder {
    args: Vec<String>,
    conditions: Vec<(String, DomainKind)>,
    rows: Option<Vec<AuthoredRow>>,
    table_declarations: usize,
}

impl TableBuilder {
    /// Record an expected runtime argument name
    pub fn arg(&mut self, name: impl Into<String>) -> &mut Self {
        self.args.push(name.into());
        self
    }

    /// Register a condition
    pub fn cond(&mut self, name: impl Into<String>, kind: DomainKind) -> &mut Self {
        self.conditions.push((name.into(), kind));
        self
    }

    /// Declare the rows
    pub fn table<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut RowsBuilder),
    {
        let mut rows = RowsBuilder::default();
        f(&mut rows);
        self.rows = Some(rows.rows);
        self.table_declarations += 1;
        self
    }

    fn build(self, name: String, config: &EngineConfig) -> Result<DecisionTable> {
        if name.trim().is_empty() {
            return Err(Error::Definition("Table name is required".into()));
        }

        let mut seen_args = HashSet::new();
        for arg in &self.args {
            if !is_identifier(arg) {
                return Err(Error::Definition(format!(
                    "Argument name `{}` is not an identifier",
                    arg
                )));
            }
            if !seen_args.insert(arg.as_str()) {
                return Err(Error::Definition(format!("Duplicate argument: {}", arg)));
            }
        }

        let mut seen_conds = HashSet::new();
        let mut universe: u64 = 1;
        for (cond_name, kind) in &self.conditions {
            if !is_identifier(cond_name) {
                return Err(Error::Definition(format!(
                    "Condition name `{}` is not an identifier",
                    cond_name
                )));
            }
            if !seen_conds.insert(cond_name.as_str()) {
                return Err(Error::Definition(format!(
                    "Duplicate condition: {}",
                    cond_name
                )));
            }
            universe = universe.saturating_mul(kind.size());
        }
        if universe > config.max_universe {
            return Err(Error::Definition(format!(
                "Table `{}` has {} condition combinations, above the limit of {}",
                name, universe, config.max_universe
            )));
        }

        let conditions = self
            .conditions
            .iter()
            .map(|(n, kind)| Condition::new(n.clone(), kind))
            .collect::<Result<Vec<_>>>()?;

        if self.table_declarations > 1 {
            return Err(Error::Definition(format!(
                "Table `{}` declares its rows more than once",
                name
            )));
        }
        let rows = self
            .rows
            .ok_or_else(|| Error::Definition(format!("Table `{}` declares no rows", name)))?;

        for (index, row) in rows.iter().enumerate() {
            check_row(index, row, &conditions)?;
        }

        tracing::debug!(
            table = %name,
            conditions = conditions.len(),
            rows = rows.len(),
            universe,
            "defined decision table"
        );

        Ok(DecisionTable {
            inner: Arc::new(TableInner {
                name,
                args: self.args,
                conditions,
                rows,
                expanded: OnceLock::new(),
            }),
        })
    }
}

fn check_row(index: usize, row: &AuthoredRow, conditions: &[Condition]) -> Result<()> {
    if row.conditions.len() != conditions.len() {
        return Err(Error::Definition(format!(
            "Row {} has {} values, expected {}",
            index,
            row.conditions.len(),
            conditions.len()
        )));
    }
    for (value, cond) in row.conditions.iter().zip(conditions) {
        if let Value::Literal(l) = value {
            if !cond.admits(l) {
                return Err(Error::Definition(format!(
                    "Row {}: {} is not in the domain of `{}`",
                    index, l, cond.name
                )));
            }
        }
    }
    Ok(())
}

/// Collects rows inside [`TableBuilder::table`]
#[derive(Debug, Default)]
pub struct RowsBuilder {
    rows: Vec<AuthoredRow>,
}

impl RowsBuilder {
    /// Append a row
    pub fn row<I>(&mut self, values: I, result: impl Into<RowResult>) -> &mut Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.rows.push(AuthoredRow {
            conditions: values.into_iter().collect(),
            result: result.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{lit, ANY, F, T};

    fn two_bool_table() -> Result<DecisionTable> {
        DecisionTable::define("pair", |b| {
            b.cond("a", DomainKind::Bool).cond("b", DomainKind::Bool);
            b.table(|r| {
                r.row([T, ANY], 1).row([F, ANY], 2);
            });
        })
    }

    #[test]
    fn test_define_and_accessors() {
        let table = two_bool_table().unwrap();
        assert_eq!(table.name(), "pair");
        assert_eq!(table.condition_names(), vec!["a", "b"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.expanded().len(), 4);
    }

    #[test]
    fn test_expansion_is_cached() {
        let table = two_bool_table().unwrap();
        let first = table.expanded().as_ptr();
        let clone = table.clone();
        assert_eq!(first, clone.expanded().as_ptr());
    }

    #[test]
    fn test_row_arity_mismatch() {
        let err = DecisionTable::define("bad", |b| {
            b.cond("a", DomainKind::Bool);
            b.table(|r| {
                r.row([T, F], 1);
            });
        })
        .unwrap_err();
        assert!(err.to_string().contains("Row 0 has 2 values, expected 1"));
    }

    #[test]
    fn test_literal_outside_domain() {
        let err = DecisionTable::define("bad", |b| {
            b.cond("a", DomainKind::Bool);
            b.table(|r| {
                r.row([lit("yes")], 1);
            });
        })
        .unwrap_err();
        assert!(matches!(err, Error::Definition(_)));
    }

    #[test]
    fn test_duplicate_condition_name() {
        let err = DecisionTable::define("bad", |b| {
            b.cond("a", DomainKind::Bool).cond("a", DomainKind::Bool);
            b.table(|_| {});
        })
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate condition: a"));
    }

    #[test]
    fn test_missing_table_block() {
        let err = DecisionTable::define("bad", |b| {
            b.cond("a", DomainKind::Bool);
        })
        .unwrap_err();
        assert!(err.to_string().contains("declares no rows"));
    }

    #[test]
    fn test_universe_limit() {
        let config = EngineConfig { max_universe: 4 };
        let err = DecisionTable::define_with("big", &config, |b| {
            b.cond("a", DomainKind::Bool)
                .cond("b", DomainKind::Bool)
                .cond("c", DomainKind::Bool);
            b.table(|_| {});
        })
        .unwrap_err();
        assert!(err.to_string().contains("above the limit of 4"));
    }

    #[test]
    fn test_invalid_identifier() {
        assert!(DecisionTable::define("bad", |b| {
            b.cond("divisible by three", DomainKind::Bool);
            b.table(|_| {});
        })
        .is_err());
    }

    #[test]
    fn test_fingerprint_tracks_rows() {
        let a = two_bool_table().unwrap();
        let b = two_bool_table().unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert!(a.fingerprint().starts_with("sha256:"));

        let c = DecisionTable::define("pair", |b| {
            b.cond("a", DomainKind::Bool).cond("b", DomainKind::Bool);
            b.table(|r| {
                r.row([T, ANY], 1).row([F, ANY], 3);
            });
        })
        .unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_result_params() {
        assert!(RowResult::from("Fizz").params().is_empty());
        let computed = RowResult::arg("n");
        assert!(computed.is_computed());
        assert_eq!(computed.params(), &["n".to_string()]);
        assert_eq!(computed.to_string(), "computed(n)");
    }
}
