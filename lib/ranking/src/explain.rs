//! Explainability for ranking results
//!
//! Output structures showing how each final score was assembled, with
//! per-field contributions and fairness information.

use crate::engine::RankedCandidate;
use serde::Serialize;
use std::collections::BTreeMap;
use waitrank_core::{CandidateId, Field};

/// A ranked candidate with its score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedCandidate {
    pub id: CandidateId,
    /// Final score
    pub score: f64,
    /// Merged in by the fairness policy rather than selected by score
    pub injected: bool,
    pub fairness_budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Per-field normalized scores
    pub explain: BTreeMap<Field, f64>,
}

impl ExplainedCandidate {
    pub fn from_ranked(ranked: RankedCandidate) -> Self {
        Self {
            id: ranked.id,
            score: ranked.final_score,
            injected: ranked.injected,
            fairness_budget: ranked.fairness_budget,
            distance_km: ranked.distance_km,
            explain: ranked.field_scores,
        }
    }
}

/// Response body for explained ranking queries
#[derive(Debug, Clone, Serialize)]
pub struct RankingResponse {
    pub result: Vec<ExplainedCandidate>,
    pub stats: RankingStats,
}

impl RankingResponse {
    /// Build the response; `candidates_count` is the population size.
    pub fn from_ranked(ranked: Vec<RankedCandidate>, candidates_count: usize) -> Self {
        let stats = RankingStats::compute(&ranked, candidates_count);
        Self {
            result: ranked.into_iter().map(ExplainedCandidate::from_ranked).collect(),
            stats,
        }
    }
}

/// Summary statistics for one ranking query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    pub results_count: usize,
    /// Results contributed by the fairness policy
    pub unscored_injected: usize,
    /// Average final score over scored results
    pub avg_score: f64,
    /// Best final score among scored results
    pub best_score: f64,
    /// Field that contributed most to the best scored result
    pub top_contributing_field: Option<Field>,
}

impl RankingStats {
    pub fn compute(results: &[RankedCandidate], candidates_count: usize) -> Self {
        let scored: Vec<&RankedCandidate> = results.iter().filter(|r| !r.injected).collect();
        let unscored_injected = results.len() - scored.len();

        // Scored entries keep their relative order, so the first is the best.
        let Some(best) = scored.first() else {
            return Self {
                candidates_count,
                results_count: results.len(),
                unscored_injected,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_field: None,
            };
        };

        let avg_score = scored.iter().map(|r| r.final_score).sum::<f64>() / scored.len() as f64;

        let top_contributing_field = best
            .field_scores
            .iter()
            .filter(|(_, score)| **score > 0.0)
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(field, _)| *field);

        Self {
            candidates_count,
            results_count: results.len(),
            unscored_injected,
            avg_score,
            best_score: best.final_score,
            top_contributing_field,
        }
    }
}
