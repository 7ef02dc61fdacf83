//! Shared tables and dispatchers across threads

use makes_sense::*;
use std::thread;

#[test]
fn test_dispatch_from_many_threads() {
    let table = DecisionTable::define("parity", |b| {
        b.arg("n");
        b.cond("even", DomainKind::Bool);
        b.table(|r| {
            r.row([T], RowResult::computed(["n"], |a| {
                Literal::Int(a.get("n").and_then(Literal::as_int).unwrap_or(0) / 2)
            }));
            r.row([F], "odd");
        });
    })
    .unwrap();

    let dispatcher = table
        .bind_ruleset(Ruleset::new().condition("even", ["n"], |a| {
            Literal::Bool(a.get("n").and_then(Literal::as_int).unwrap_or(1) % 2 == 0)
        }))
        .unwrap();

    let handles: Vec<_> = (0..8i64)
        .map(|i| {
            let d = dispatcher.clone();
            let t = table.clone();
            thread::spawn(move || {
                assert!(t.validate().is_success());
                d.dispatch(&Args::new().with("n", i)).unwrap()
            })
        })
        .collect();

    let results: Vec<Literal> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, result) in results.iter().enumerate() {
        let expected = if i % 2 == 0 {
            Literal::Int(i as i64 / 2)
        } else {
            Literal::from("odd")
        };
        assert_eq!(result, &expected);
    }
}
