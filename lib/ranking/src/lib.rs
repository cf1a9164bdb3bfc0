//! # waitrank Ranking
//!
//! A rank-normalized, fairness-aware top-K engine for waitlist candidates.
//!
//! ## Features
//!
//! - **Scoring Schema**: per-field weights and directions
//! - **Rank Normalization**: raw values mapped to `[0, maxScore]` by rank, ties share a score
//! - **Fairness Budget**: missing data earns a randomized bonus instead of a hard zero
//! - **Fairness Injection**: candidates with no history still reach the result list
//! - **Explainability**: per-field breakdown of every final score
//!
//! ## Example
//!
//! ```rust
//! use waitrank_ranking::{load_population_from_values, Ranker, ScoringSchema};
//! use serde_json::json;
//!
//! let population = load_population_from_values(
//!     vec![
//!         json!({"id": "a", "age": 30, "location": {"latitude": 46.0, "longitude": 8.0}}),
//!         json!({"id": "b", "age": 60, "location": {"latitude": 46.0, "longitude": 8.0}}),
//!     ],
//!     &ScoringSchema::default(),
//! )
//! .unwrap();
//!
//! let top = Ranker::default().rank_top(&population, 46.1, 8.0, Some(1)).unwrap();
//! assert_eq!(top[0].as_str(), "b");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Records   │────>│ Normalizer  │────>│ Population  │
//! │  (JSON)     │     │ (per field) │     │ (base score)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!       query location ──> distance score ───────┤
//!                                                v
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Fairness   │<────│  Top-K      │
//!                     │  injection  │     │  selection  │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod explain;
pub mod fairness;
pub mod normalize;
pub mod population;
pub mod schema;
pub mod select;

// Re-export main types for convenience
pub use aggregate::{aggregate_base_scores, query_distances, BaseScore, FinalScore, ScoreAggregator};
pub use config::{FairnessConfig, RankingConfig, DEFAULT_TOP_K};
pub use engine::{rank_top, RankedCandidate, Ranker};
pub use explain::{ExplainedCandidate, RankingResponse, RankingStats};
pub use fairness::{FairnessInjector, DEFAULT_MAX_INJECTED};
pub use normalize::{normalize_field, round_score, SCORE_PRECISION};
pub use population::{
    load_population, load_population_from_values, Population, PopulationHandle, RejectedRecord,
};
pub use schema::{FieldSpec, ScoringSchema, SchemaError};
pub use select::TopKSelector;
