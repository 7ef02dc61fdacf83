//! Condition space: the universe of every legal condition tuple

use crate::domain::Condition;
use crate::value::Literal;

/// Cartesian product of a list of ordered sequences.
///
/// The first sequence varies slowest. An empty list yields one empty
/// tuple; a single sequence yields one 1-tuple per element.
pub fn cartesian_product<T: Clone>(sets: &[Vec<T>]) -> Vec<Vec<T>> {
    sets.iter().fold(vec![Vec::new()], |acc, set| {
        acc.iter()
            .flat_map(|prefix| {
                set.iter().map(move |item| {
                    let mut tuple = prefix.clone();
                    tuple.push(item.clone());
                    tuple
                })
            })
            .collect()
    })
}

/// Every ordered tuple of literals the conditions can produce.
///
/// Condition order runs outer-to-inner; each domain is walked in
/// declared order.
pub fn universe(conditions: &[Condition]) -> Vec<Vec<Literal>> {
    let domains: Vec<Vec<Literal>> = conditions.iter().map(|c| c.domain.clone()).collect();
    cartesian_product(&domains)
}

/// Size of the universe, saturating instead of overflowing
pub fn universe_size(conditions: &[Condition]) -> u64 {
    conditions
        .iter()
        .fold(1u64, |acc, c| acc.saturating_mul(c.domain.len() as u64))
}
