//! Score aggregation
//!
//! Sums normalized static fields into a base score once per population and
//! combines it with the query-time distance score into a final score.

use crate::normalize::{normalize_field, round_score};
use crate::schema::{FieldSpec, ScoringSchema};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use waitrank_core::{haversine_km, Candidate, Coordinate, Field};

/// Query-independent scores of one candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseScore {
    /// Sum of the normalized static field scores
    pub base_score: f64,
    /// Score mass the candidate could not earn because of missing static fields
    pub fairness_budget: f64,
    /// Per-field normalized scores, 0.0 for missing fields
    pub field_scores: BTreeMap<Field, f64>,
    /// Static fields the candidate lacks
    pub missing_fields: Vec<Field>,
}

impl BaseScore {
    fn record(&mut self, field: Field, score: Option<f64>, max_score: f64) {
        match score {
            Some(score) => {
                self.base_score += score;
                self.field_scores.insert(field, score);
            }
            None => {
                self.fairness_budget += max_score;
                self.field_scores.insert(field, 0.0);
                self.missing_fields.push(field);
            }
        }
    }
}

/// Compute base scores for the whole population
///
/// Each static field is normalized once across all candidates. The
/// fairness budget is tracked next to the base score and never folded into it.
pub fn aggregate_base_scores(candidates: &[Candidate], schema: &ScoringSchema) -> Vec<BaseScore> {
    let mut base = vec![BaseScore::default(); candidates.len()];

    for field in Field::STATIC {
        let spec = schema.spec(field);
        let values: Vec<Option<f64>> = candidates
            .iter()
            .map(|c| c.static_value(field).map(|v| v as f64))
            .collect();

        for (entry, score) in base.iter_mut().zip(normalize_field(&values, &spec)) {
            entry.record(field, score, spec.max_score);
        }
    }

    for entry in &mut base {
        entry.base_score = round_score(entry.base_score);
        entry.fairness_budget = round_score(entry.fairness_budget);
    }

    base
}

/// Distance in kilometres from each candidate to the query location,
/// `None` for candidates without a location
pub fn query_distances(candidates: &[Candidate], query: &Coordinate) -> Vec<Option<f64>> {
    candidates
        .iter()
        .map(|c| c.location.as_ref().map(|loc| haversine_km(loc, query)))
        .collect()
}

/// Query-time score of one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalScore {
    /// Normalized distance score, 0.0 when the candidate has no location
    pub distance_score: f64,
    /// Base budget plus the distance max score if the location is missing
    pub fairness_budget: f64,
    /// Base + distance + randomized fairness bonus
    pub final_score: f64,
}

/// Combines base and distance scores into a final score
#[derive(Debug, Clone, Copy)]
pub struct ScoreAggregator {
    budget_bonus: bool,
}

impl ScoreAggregator {
    /// `budget_bonus` enables the `u * fairness_budget` term, `u ~ U[0, 1)`
    pub fn new(budget_bonus: bool) -> Self {
        Self { budget_bonus }
    }

    /// Compute the final score
    ///
    /// The random draw is only taken for candidates with a positive budget,
    /// so candidates with complete data score deterministically.
    pub fn final_score<R: Rng + ?Sized>(
        &self,
        base: &BaseScore,
        distance_score: Option<f64>,
        distance_spec: &FieldSpec,
        rng: &mut R,
    ) -> FinalScore {
        let (distance_score, fairness_budget) = match distance_score {
            Some(score) => (score, base.fairness_budget),
            None => (0.0, round_score(base.fairness_budget + distance_spec.max_score)),
        };

        let bonus = if self.budget_bonus && fairness_budget > 0.0 {
            rng.random::<f64>() * fairness_budget
        } else {
            0.0
        };

        FinalScore {
            distance_score,
            fairness_budget,
            final_score: round_score(base.base_score + distance_score + bonus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate(id: &str, age: Option<u64>, accepted: Option<u64>) -> Candidate {
        Candidate::new(id).with_behavior(age, accepted, Some(0), Some(10))
    }

    #[test]
    fn test_base_scores_sum_fields() {
        let schema = ScoringSchema::default();
        let candidates = vec![
            candidate("a", Some(30), Some(1)),
            candidate("b", Some(60), Some(5)),
        ];
        let base = aggregate_base_scores(&candidates, &schema);

        // canceled/reply are tied, so only age and accepted separate them.
        assert_eq!(base[0].base_score, 0.0);
        assert_eq!(base[1].base_score, 1.0 + 3.0);
        assert_eq!(base[1].field_scores[&Field::Age], 1.0);
        assert_eq!(base[1].field_scores[&Field::AcceptedOffers], 3.0);
        assert!(base.iter().all(|b| b.fairness_budget == 0.0));
    }

    #[test]
    fn test_missing_fields_fill_budget() {
        let schema = ScoringSchema::default();
        let candidates = vec![
            candidate("a", None, Some(1)),
            candidate("b", Some(60), None),
            Candidate::new("c"),
        ];
        let base = aggregate_base_scores(&candidates, &schema);

        assert_eq!(base[0].fairness_budget, 1.0);
        assert_eq!(base[0].missing_fields, vec![Field::Age]);
        assert_eq!(base[1].fairness_budget, 3.0);
        assert_eq!(base[2].fairness_budget, schema.static_total_score());
        assert_eq!(base[2].base_score, 0.0);
        assert_eq!(base[2].field_scores.len(), 4);
    }

    #[test]
    fn test_base_score_bounded() {
        let schema = ScoringSchema::default();
        let candidates: Vec<Candidate> = (0..20)
            .map(|i| {
                Candidate::new(format!("p{}", i)).with_behavior(
                    Some(i * 3 % 7),
                    if i % 4 == 0 { None } else { Some(i) },
                    Some(20 - i),
                    Some(i % 5),
                )
            })
            .collect();
        let max = schema.static_total_score();

        for entry in aggregate_base_scores(&candidates, &schema) {
            assert!(entry.base_score >= 0.0 && entry.base_score <= max);
        }
    }

    #[test]
    fn test_final_score_without_budget_is_deterministic() {
        let aggregator = ScoreAggregator::new(true);
        let base = BaseScore {
            base_score: 4.5,
            ..BaseScore::default()
        };
        let spec = FieldSpec::lower_is_better(1.0);
        let mut rng = StdRng::seed_from_u64(7);

        let score = aggregator.final_score(&base, Some(0.25), &spec, &mut rng);
        assert_eq!(score.final_score, 4.75);
        assert_eq!(score.fairness_budget, 0.0);
    }

    #[test]
    fn test_missing_location_adds_distance_budget() {
        let aggregator = ScoreAggregator::new(true);
        let base = BaseScore {
            base_score: 2.0,
            fairness_budget: 3.0,
            ..BaseScore::default()
        };
        let spec = FieldSpec::lower_is_better(1.0);
        let mut rng = StdRng::seed_from_u64(7);

        let score = aggregator.final_score(&base, None, &spec, &mut rng);
        assert_eq!(score.distance_score, 0.0);
        assert_eq!(score.fairness_budget, 4.0);
        assert!(score.final_score >= 2.0 && score.final_score < 6.0);
    }

    #[test]
    fn test_bonus_disabled() {
        let aggregator = ScoreAggregator::new(false);
        let base = BaseScore {
            base_score: 2.0,
            fairness_budget: 3.0,
            ..BaseScore::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let score = aggregator.final_score(&base, Some(0.5), &FieldSpec::lower_is_better(1.0), &mut rng);
        assert_eq!(score.final_score, 2.5);
    }

    #[test]
    fn test_query_distances() {
        let query = Coordinate::new(0.0, 0.0).unwrap();
        let candidates = vec![
            Candidate::new("a").with_location(query),
            Candidate::new("b"),
        ];
        assert_eq!(query_distances(&candidates, &query), vec![Some(0.0), None]);
    }
}
