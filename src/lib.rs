//! # waitrank
//!
//! A fairness-aware ranking service for waitlists.
//!
//! waitrank picks the candidates most likely to accept an offer at a given
//! location. Behavioral history is rank-normalized per field, combined with
//! geographic distance to the facility, and candidates with little or no
//! history still get a fair chance to appear in the result.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! waitrank --data-file patients.json --http-port 8000
//! curl 'http://localhost:8000/patients?location=46.1,8.2'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use waitrank::prelude::*;
//! use serde_json::json;
//!
//! let store = PopulationStore::new(RankingConfig::default());
//! store.load_values(vec![
//!     json!({"id": "a", "age": 52, "acceptedOffers": 4, "canceledOffers": 1, "averageReplyTime": 300,
//!            "location": {"latitude": "46.10", "longitude": "8.21"}}),
//!     json!({"id": "b", "age": 31, "acceptedOffers": 1, "canceledOffers": 6, "averageReplyTime": 2100,
//!            "location": {"latitude": "46.52", "longitude": "8.90"}}),
//! ]).unwrap();
//!
//! let population = store.current().unwrap();
//! let top = store.ranker().rank_top(&population, 46.0, 8.2, Some(10)).unwrap();
//! assert_eq!(top[0].as_str(), "a");
//! ```
//!
//! ## Crate Structure
//!
//! - `waitrank-core` - Candidate records, coordinates, fields and errors
//! - `waitrank-ranking` - Normalization, scoring, top-K selection and fairness injection
//! - `waitrank-storage` - Record loading and the current population snapshot
//! - `waitrank-api` - REST API

// Re-export core types
pub use waitrank_core::{
    haversine_km, Candidate, CandidateId, Coordinate, Error, Field, LocationError, RawRecord,
    Result, ValidationError,
};

// Re-export ranking
pub use waitrank_ranking::{
    load_population, load_population_from_values, rank_top, FairnessConfig, FairnessInjector,
    FieldSpec, Population, PopulationHandle, RankedCandidate, Ranker, RankingConfig,
    RankingResponse, RankingStats, ScoringSchema, TopKSelector,
};

// Re-export storage
pub use waitrank_storage::{read_records, PopulationStore};

// Re-export API
pub use waitrank_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Candidate, CandidateId, Coordinate, Error, Field, Population, PopulationHandle,
        PopulationStore, RankedCandidate, Ranker, RankingConfig, RawRecord, RestApi, Result,
        ScoringSchema,
    };
}
