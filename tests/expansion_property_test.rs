//! Property-based tests for expansion and validation
//!
//! Uses proptest to generate random boolean tables and check invariants

use makes_sense::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![Just(T), Just(F), Just(ANY)]
}

/// (condition count, rows)
fn any_table() -> impl Strategy<Value = (usize, Vec<Vec<Value>>)> {
    (1usize..=4).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(prop::collection::vec(cell(), n), 0..6),
        )
    })
}

fn build(n: usize, rows: &[Vec<Value>]) -> DecisionTable {
    DecisionTable::define("generated", |b| {
        for i in 0..n {
            b.cond(format!("c{}", i), DomainKind::Bool);
        }
        b.table(|r| {
            for (i, row) in rows.iter().enumerate() {
                r.row(row.clone(), i as i64);
            }
        });
    })
    .unwrap()
}

proptest! {
    #[test]
    fn prop_expanded_rows_are_concrete_and_sized((n, rows) in any_table()) {
        let table = build(n, &rows);
        let expected: usize = rows
            .iter()
            .map(|row| 1usize << row.iter().filter(|v| v.is_any()).count())
            .sum();
        prop_assert_eq!(table.expanded().len(), expected);
        for row in table.expanded() {
            prop_assert_eq!(row.conditions.len(), n);
        }
    }

    #[test]
    fn prop_expansion_only_varies_wildcards((n, rows) in any_table()) {
        let table = build(n, &rows);
        for expanded in table.expanded() {
            let authored = &rows[expanded.source_row];
            for (cell, value) in authored.iter().zip(&expanded.conditions) {
                if let Some(l) = cell.as_literal() {
                    prop_assert_eq!(l, value);
                }
            }
        }
    }

    #[test]
    fn prop_missing_plus_distinct_covers_universe((n, rows) in any_table()) {
        let table = build(n, &rows);
        let distinct: HashSet<_> = table.expanded().iter().map(|r| r.conditions.clone()).collect();
        let outcome = table.validate();
        let issues = outcome.issues().map(|i| i.to_vec()).unwrap_or_default();
        let missing = issues.iter().filter(|i| i.is_missing()).count();
        let duplicates = issues.iter().filter(|i| i.is_duplicate()).count();

        prop_assert_eq!(missing + distinct.len(), 1usize << n);
        prop_assert_eq!(duplicates + distinct.len(), table.expanded().len());
        prop_assert_eq!(outcome.is_success(), missing == 0 && duplicates == 0);
    }

    #[test]
    fn prop_missing_map_zips_names((n, rows) in any_table()) {
        let table = build(n, &rows);
        if let Ok(issues) = table.validate().issues() {
            for issue in issues {
                if let Issue::Missing { expected_conditions, expected } = issue {
                    for (i, value) in expected_conditions.iter().enumerate() {
                        prop_assert_eq!(expected.get(&format!("c{}", i)), Some(value));
                    }
                }
            }
        }
    }
}
