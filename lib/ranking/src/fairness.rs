//! Fairness injection for candidates without behavioral history
//!
//! A candidate with no behavioral data has no comparable score, so a pure
//! score sort would never select it. After the scored top-K is chosen, a
//! small random number of such candidates is inserted at random positions.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Upper bound on unscored candidates injected into a full result.
pub const DEFAULT_MAX_INJECTED: usize = 5;

/// Inserts unscored candidates into a scored top-K list
#[derive(Debug, Clone, Copy)]
pub struct FairnessInjector {
    max_injected: usize,
}

impl Default for FairnessInjector {
    fn default() -> Self {
        Self {
            max_injected: DEFAULT_MAX_INJECTED,
        }
    }
}

impl FairnessInjector {
    pub fn new(max_injected: usize) -> Self {
        Self { max_injected }
    }

    /// Merge `unscored` candidates into the scored `top` list
    ///
    /// # Arguments
    /// * `top` - Scored candidates, best first, at most `k` of them
    /// * `unscored` - Candidates with no behavioral data, in any order
    /// * `k` - Requested result size
    ///
    /// # Returns
    /// `min(k, top.len() + unscored.len())` candidates.
    ///
    /// With no scored candidates, up to `k` shuffled unscored candidates are
    /// returned. Otherwise `m` is drawn from `[1, min(max_injected, |unscored|)]`
    /// and `max(m, open slots)` unscored candidates (bounded by availability)
    /// replace the lowest scored entries, each inserted at a random position.
    pub fn inject<C, R>(&self, mut top: Vec<C>, mut unscored: Vec<C>, k: usize, rng: &mut R) -> Vec<C>
    where
        R: Rng + ?Sized,
    {
        top.truncate(k);
        if unscored.is_empty() || k == 0 {
            return top;
        }

        if top.is_empty() {
            unscored.shuffle(rng);
            unscored.truncate(k);
            debug!(injected = unscored.len(), "no scored candidates, returning shuffled unscored");
            return unscored;
        }

        let cap = self.max_injected.min(unscored.len());
        let drawn = if cap == 0 { 0 } else { rng.random_range(1..=cap) };
        let open = k - top.len();
        let inject = drawn.max(open).min(unscored.len()).min(k);
        if inject == 0 {
            return top;
        }

        top.truncate(k - inject);
        unscored.shuffle(rng);
        for candidate in unscored.into_iter().take(inject) {
            let position = rng.random_range(0..=top.len());
            top.insert(position, candidate);
        }

        debug!(drawn, injected = inject, result = top.len(), "injected unscored candidates");
        top
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone, PartialEq)]
    enum Entry {
        Scored(usize),
        Unscored(usize),
    }

    fn scored(n: usize) -> Vec<Entry> {
        (0..n).map(Entry::Scored).collect()
    }

    fn unscored(n: usize) -> Vec<Entry> {
        (0..n).map(Entry::Unscored).collect()
    }

    fn count_unscored(result: &[Entry]) -> usize {
        result.iter().filter(|e| matches!(e, Entry::Unscored(_))).count()
    }

    #[test]
    fn test_nine_scored_one_unscored() {
        let injector = FairnessInjector::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = injector.inject(scored(9), unscored(1), 10, &mut rng);

            assert_eq!(result.len(), 10);
            assert_eq!(count_unscored(&result), 1);
            for i in 0..9 {
                assert!(result.contains(&Entry::Scored(i)));
            }
        }
    }

    #[test]
    fn test_full_top_drops_lowest_and_caps_injection() {
        let injector = FairnessInjector::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = injector.inject(scored(10), unscored(30), 10, &mut rng);

            assert_eq!(result.len(), 10);
            let injected = count_unscored(&result);
            assert!((1..=5).contains(&injected), "injected {}", injected);

            // The surviving scored entries are the best ones, in order.
            let kept: Vec<_> = result
                .iter()
                .filter_map(|e| match e {
                    Entry::Scored(i) => Some(*i),
                    Entry::Unscored(_) => None,
                })
                .collect();
            assert_eq!(kept, (0..10 - injected).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_cap_bounded_by_unscored_count() {
        let injector = FairnessInjector::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = injector.inject(scored(10), unscored(2), 10, &mut rng);
            assert!(count_unscored(&result) <= 2);
            assert_eq!(result.len(), 10);
        }
    }

    #[test]
    fn test_only_unscored() {
        let injector = FairnessInjector::default();
        let mut rng = StdRng::seed_from_u64(3);
        let result = injector.inject(Vec::new(), unscored(25), 10, &mut rng);
        assert_eq!(result.len(), 10);
        assert_eq!(count_unscored(&result), 10);

        let mut rng = StdRng::seed_from_u64(3);
        let result = injector.inject(Vec::new(), unscored(4), 10, &mut rng);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_no_unscored_keeps_top() {
        let injector = FairnessInjector::default();
        let mut rng = StdRng::seed_from_u64(3);
        let result = injector.inject(scored(7), Vec::new(), 10, &mut rng);
        assert_eq!(result, scored(7));
    }

    #[test]
    fn test_result_length_property() {
        let injector = FairnessInjector::default();
        let mut rng = StdRng::seed_from_u64(11);
        for k in 0..13 {
            for n_scored in 0..13 {
                for n_unscored in 0..9 {
                    let top = scored(n_scored.min(k));
                    let result = injector.inject(top, unscored(n_unscored), k, &mut rng);
                    assert_eq!(result.len(), k.min(n_scored + n_unscored));
                    if n_scored + 5 >= k && n_scored > 0 {
                        assert!(count_unscored(&result) <= n_unscored.min(5));
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_max_injected_only_fills_open_slots() {
        let injector = FairnessInjector::new(0);
        let mut rng = StdRng::seed_from_u64(5);
        let full = injector.inject(scored(10), unscored(5), 10, &mut rng);
        assert_eq!(full, scored(10));

        let partial = injector.inject(scored(8), unscored(5), 10, &mut rng);
        assert_eq!(count_unscored(&partial), 2);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let injector = FairnessInjector::default();
        let a = injector.inject(scored(10), unscored(10), 10, &mut StdRng::seed_from_u64(42));
        let b = injector.inject(scored(10), unscored(10), 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
