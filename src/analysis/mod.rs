//! Descriptive statistics and correlation over a loaded [`Table`](crate::data::model::Table).

pub mod correlation;
pub mod summary;

use std::collections::HashMap;
use std::hash::Hash;

/// Round to `places` decimals, exact ties going to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Index of the most frequent key; ties go to the first one encountered.
pub(crate) fn most_frequent<K: Hash + Eq>(keys: impl IntoIterator<Item = K>) -> Option<usize> {
    // key -> (count, first index)
    let mut counts: HashMap<K, (usize, usize)> = HashMap::new();
    for (i, key) in keys.into_iter().enumerate() {
        counts.entry(key).or_insert((0, i)).0 += 1;
    }
    counts
        .into_values()
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(_, first)| first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.5811, 1), 1.6);
        assert_eq!(round_to(-0.2694, 2), -0.27);
        assert_eq!(round_to(29.699, 1), 29.7);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_to(30.25, 1), 30.2);
        assert_eq!(round_to(30.75, 1), 30.8);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(-2.5, 0), -2.0);
    }

    #[test]
    fn most_frequent_prefers_first_on_tie() {
        assert_eq!(most_frequent(["b", "a", "a", "b"]), Some(0));
        assert_eq!(most_frequent(["c", "a", "a"]), Some(1));
        assert_eq!(most_frequent(Vec::<&str>::new()), None);
    }
}
