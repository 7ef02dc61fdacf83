//! Serializable table definitions
//!
//! Tables can be authored in YAML or JSON instead of through the builder.
//! Computed results are limited to echoing a named argument; closures
//! only exist in code.
//!
//! ## Example
//!
//! ```yaml
//! name: FizzBuzz
//! args: [n]
//! conditions:
//!   - name: divisible_by_three
//!     type: bool
//!   - name: divisible_by_five
//!     type: bool
//! rows:
//!   - when: [f, f]
//!     then: { arg: n }
//!   - when: [t, f]
//!     then: Fizz
//!   - when: [f, t]
//!     then: Buzz
//!   - when: [t, t]
//!     then: FizzBuzz
//! ```
//!
//! In `when`, the string `any` is the wildcard. `t` and `f` are accepted
//! for boolean conditions.

use crate::config::EngineConfig;
use crate::domain::DomainKind;
use crate::error::{Error, Result};
use crate::table::{DecisionTable, RowResult};
use crate::value::{Literal, Value};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cell text standing for every value of its column
const WILDCARD: &str = "any";

/// A complete table definition
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Decision Table", description = "Decision table definition")]
pub struct TableDefinition {
    /// Table name
    pub name: String,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Runtime argument names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Conditions, in column order
    #[serde(default)]
    pub conditions: Vec<ConditionDef>,

    /// Rows, in declaration order
    #[serde(default)]
    pub rows: Vec<RowDef>,
}

/// A condition column
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConditionDef {
    pub name: String,

    #[serde(rename = "type")]
    pub typ: ConditionType,

    /// For enums: the ordered outcomes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    /// For ints: inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    /// For ints: inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Condition column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    Bool,
    Enum,
    Int,
}

impl ConditionDef {
    /// Resolve the column's domain kind
    pub fn kind(&self) -> Result<DomainKind> {
        match self.typ {
            ConditionType::Bool => Ok(DomainKind::Bool),
            ConditionType::Enum => {
                let values = self.values.clone().ok_or_else(|| {
                    Error::Definition(format!("Enum condition `{}` needs `values`", self.name))
                })?;
                // `any` is the wildcard cell and can't name a variant
                if values.iter().any(|v| v == WILDCARD) {
                    return Err(Error::Definition(format!(
                        "Enum condition `{}` can't have a value named `{}`",
                        self.name, WILDCARD
                    )));
                }
                Ok(DomainKind::Enum(values))
            }
            ConditionType::Int => match (self.min, self.max) {
                (Some(min), Some(max)) => Ok(DomainKind::Int { min, max }),
                _ => Err(Error::Definition(format!(
                    "Int condition `{}` needs `min` and `max`",
                    self.name
                ))),
            },
        }
    }
}

/// A row: condition cells and a result
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RowDef {
    pub when: Vec<Literal>,
    pub then: ResultDef,
}

/// Row result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ResultDef {
    /// Echo a runtime argument
    Arg { arg: String },
    /// Fixed value
    Literal(Literal),
}

impl TableDefinition {
    /// Parse a definition from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Parse a definition from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a definition file, choosing the format by extension
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Build the table under the given limits
    pub fn into_table(&self, config: &EngineConfig) -> Result<DecisionTable> {
        let kinds = self
            .conditions
            .iter()
            .map(|c| -> Result<(String, DomainKind)> { Ok((c.name.clone(), c.kind()?)) })
            .collect::<Result<Vec<_>>>()?;

        let rows: Vec<(Vec<Value>, RowResult)> = self
            .rows
            .iter()
            .map(|row| -> Result<(Vec<Value>, RowResult)> {
                let cells = row
                    .when
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| self.cell(i, cell))
                    .collect::<Result<Vec<_>>>()?;
                Ok((cells, self.result(&row.then)))
            })
            .collect::<Result<_>>()?;

        DecisionTable::define_with(self.name.clone(), config, |b| {
            for arg in &self.args {
                b.arg(arg.clone());
            }
            for (name, kind) in kinds {
                b.cond(name, kind);
            }
            b.table(|r| {
                for (cells, result) in rows {
                    r.row(cells, result);
                }
            });
        })
    }

    fn cell(&self, position: usize, cell: &Literal) -> Result<Value> {
        let typ = self.conditions.get(position).map(|c| c.typ);
        match (cell, typ) {
            (Literal::String(s), _) if s == WILDCARD => Ok(Value::Any),
            (Literal::String(s), Some(ConditionType::Bool)) => match s.as_str() {
                "t" => Ok(Value::Literal(Literal::Bool(true))),
                "f" => Ok(Value::Literal(Literal::Bool(false))),
                other => Err(Error::Definition(format!(
                    "`{}` is not a boolean cell (use true, false, t, f or any)",
                    other
                ))),
            },
            (l, _) => Ok(Value::Literal(l.clone())),
        }
    }

    fn result(&self, then: &ResultDef) -> RowResult {
        match then {
            ResultDef::Arg { arg } => RowResult::arg(arg.clone()),
            ResultDef::Literal(l) => RowResult::Literal(l.clone()),
        }
    }
}
