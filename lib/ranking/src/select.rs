use std::cmp::Ordering;

/// Selects the top K candidates by final score.
///
/// Sorting is stable: candidates with equal scores keep their input order.
/// NaN scores sink to the end so they never appear as top candidates.
#[derive(Debug, Clone, Copy)]
pub struct TopKSelector {
    pub k: usize,
}

impl Default for TopKSelector {
    fn default() -> Self {
        Self { k: 10 }
    }
}

impl TopKSelector {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Sort by `score` descending and truncate to `k`.
    pub fn select<C, F>(&self, candidates: Vec<C>, score: F) -> Vec<C>
    where
        F: Fn(&C) -> f64,
    {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| descending(score(a), score(b)));
        sorted.truncate(self.k);
        sorted
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_highest_first() {
        let selector = TopKSelector::new(2);
        let picked = selector.select(vec![("a", 1.0), ("b", 3.0), ("c", 2.0)], |c| c.1);
        assert_eq!(picked, vec![("b", 3.0), ("c", 2.0)]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let selector = TopKSelector::new(10);
        let picked = selector.select(
            vec![("a", 1.0), ("b", 2.0), ("c", 1.0), ("d", 2.0)],
            |c| c.1,
        );
        let ids: Vec<_> = picked.iter().map(|c| c.0).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_fewer_than_k_returns_all() {
        let selector = TopKSelector::default();
        let picked = selector.select(vec![("a", 1.0), ("b", 0.5)], |c| c.1);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_nan_sinks() {
        let selector = TopKSelector::new(2);
        let picked = selector.select(vec![("a", f64::NAN), ("b", 0.0), ("c", -1.0)], |c| c.1);
        let ids: Vec<_> = picked.iter().map(|c| c.0).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
