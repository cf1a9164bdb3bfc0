//! Query-time ranking engine
//!
//! Scores a [`Population`] against a query location, selects the scored
//! top-K and merges in unscored candidates for fairness. Every score computed
//! here is query-local; the population is only read.

use crate::aggregate::{query_distances, ScoreAggregator};
use crate::config::RankingConfig;
use crate::fairness::FairnessInjector;
use crate::normalize::normalize_field;
use crate::population::{Population, PopulationHandle};
use crate::select::TopKSelector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;
use waitrank_core::{Candidate, CandidateId, Coordinate, Field, Result};

/// One entry of a ranking result with its score breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub id: CandidateId,
    pub name: String,
    /// Base + distance + fairness bonus
    pub final_score: f64,
    /// Kilometres to the query location, `None` without a location
    pub distance_km: Option<f64>,
    /// Score mass the candidate could not earn from data
    pub fairness_budget: f64,
    /// Set for candidates without behavioral data merged in by the fairness policy
    pub injected: bool,
    /// Per-field normalized scores, distance included
    pub field_scores: BTreeMap<Field, f64>,
}

impl RankedCandidate {
    fn new(
        candidate: &Candidate,
        mut field_scores: BTreeMap<Field, f64>,
        distance_km: Option<f64>,
        distance_score: f64,
        fairness_budget: f64,
        final_score: f64,
    ) -> Self {
        field_scores.insert(Field::Distance, distance_score);
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            final_score,
            distance_km,
            fairness_budget,
            injected: false,
            field_scores,
        }
    }
}

/// Ranks populations against query locations
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankingConfig,
}

impl Ranker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank `population` for a query at `query`
    ///
    /// # Arguments
    /// * `population` - Pre-scored candidates
    /// * `query` - Validated query location
    /// * `k` - Requested result size
    /// * `rng` - Random source for the fairness bonus and injection
    ///
    /// # Returns
    /// `min(k, population.len())` candidates, best first, with unscored
    /// candidates at random positions.
    pub fn rank<R>(
        &self,
        population: &Population,
        query: &Coordinate,
        k: usize,
        rng: &mut R,
    ) -> Vec<RankedCandidate>
    where
        R: Rng + ?Sized,
    {
        let candidates = population.candidates();
        let distance_spec = population.schema().spec(Field::Distance);
        let distances = query_distances(candidates, query);
        let distance_scores = normalize_field(&distances, &distance_spec);
        let aggregator = ScoreAggregator::new(self.config.fairness.budget_bonus);

        let mut scored = Vec::with_capacity(candidates.len());
        let mut unscored = Vec::new();

        for (idx, (candidate, base)) in candidates
            .iter()
            .zip(population.base_scores())
            .enumerate()
        {
            let score = aggregator.final_score(base, distance_scores[idx], &distance_spec, rng);
            let mut entry = RankedCandidate::new(
                candidate,
                base.field_scores.clone(),
                distances[idx],
                score.distance_score,
                score.fairness_budget,
                score.final_score,
            );

            if candidate.has_behavior_data() {
                scored.push(entry);
            } else {
                entry.injected = true;
                unscored.push(entry);
            }
        }

        let scored_count = scored.len();
        let unscored_count = unscored.len();
        let top = TopKSelector::new(k).select(scored, |c| c.final_score);
        let result = FairnessInjector::new(self.config.fairness.max_injected)
            .inject(top, unscored, k, rng);

        debug!(
            latitude = query.latitude(),
            longitude = query.longitude(),
            k,
            scored = scored_count,
            unscored = unscored_count,
            returned = result.len(),
            "ranked population"
        );

        result
    }

    /// Rank with a fresh OS-seeded random source and return only the ids
    ///
    /// `k` falls back to [`RankingConfig::default_k`]. Fails with
    /// `Error::InvalidLocation` when the query is out of range.
    pub fn rank_top(
        &self,
        population: &Population,
        latitude: f64,
        longitude: f64,
        k: Option<usize>,
    ) -> Result<Vec<CandidateId>> {
        let query = Coordinate::new(latitude, longitude)?;
        let k = k.unwrap_or(self.config.default_k);
        let mut rng = StdRng::from_os_rng();

        Ok(self
            .rank(population, &query, k, &mut rng)
            .into_iter()
            .map(|c| c.id)
            .collect())
    }
}

/// Top-`k` candidate ids for a query location using the default configuration
pub fn rank_top(
    handle: &PopulationHandle,
    latitude: f64,
    longitude: f64,
    k: usize,
) -> Result<Vec<CandidateId>> {
    Ranker::default().rank_top(handle, latitude, longitude, Some(k))
}
