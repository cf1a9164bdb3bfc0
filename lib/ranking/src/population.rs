//! Validated, pre-scored candidate populations
//!
//! A [`Population`] is built once per load: records are validated, static
//! fields are normalized and base scores are stored next to the candidates.
//! After construction it is read-only and shared between queries through a
//! [`PopulationHandle`].

use crate::aggregate::{aggregate_base_scores, BaseScore};
use crate::schema::ScoringSchema;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use waitrank_core::{Candidate, CandidateId, Error, RawRecord, Result, ValidationError};

/// Shared, immutable population snapshot
pub type PopulationHandle = Arc<Population>;

/// A record dropped during validation
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position of the record in the input batch
    pub index: usize,
    pub error: ValidationError,
}

#[derive(Debug, Clone)]
pub struct Population {
    candidates: Vec<Candidate>,
    base_scores: Vec<BaseScore>,
    schema: ScoringSchema,
    rejected: Vec<RejectedRecord>,
}

impl Population {
    /// Build a population from already validated candidates.
    ///
    /// Later candidates with an id seen before are rejected.
    pub fn from_candidates(candidates: Vec<Candidate>, schema: ScoringSchema) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();

        for (index, candidate) in candidates.into_iter().enumerate() {
            if seen.insert(candidate.id.clone()) {
                kept.push(candidate);
            } else {
                rejected.push(RejectedRecord {
                    index,
                    error: ValidationError::DuplicateId(candidate.id.to_string()),
                });
            }
        }

        Self::build(kept, rejected, schema)
    }

    fn build(
        candidates: Vec<Candidate>,
        rejected: Vec<RejectedRecord>,
        schema: ScoringSchema,
    ) -> Result<Self> {
        schema
            .validate()
            .map_err(|e| Error::InternalRanking(e.to_string()))?;

        for record in &rejected {
            warn!(index = record.index, error = %record.error, "dropping invalid record");
        }

        if candidates.is_empty() {
            return Err(Error::EmptyPopulation {
                rejected: rejected.len(),
            });
        }

        let base_scores = aggregate_base_scores(&candidates, &schema);
        let population = Self {
            candidates,
            base_scores,
            schema,
            rejected,
        };

        info!(
            candidates = population.len(),
            unscored = population.unscored_count(),
            rejected = population.rejected.len(),
            "population loaded"
        );

        Ok(population)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Base scores, index-aligned with [`Population::candidates`]
    #[inline]
    pub fn base_scores(&self) -> &[BaseScore] {
        &self.base_scores
    }

    #[inline]
    pub fn schema(&self) -> &ScoringSchema {
        &self.schema
    }

    /// Records dropped while loading
    #[inline]
    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    /// Number of candidates without any behavioral data
    pub fn unscored_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| !c.has_behavior_data())
            .count()
    }

    /// Look up a candidate and its base score by id
    pub fn get(&self, id: &CandidateId) -> Option<(&Candidate, &BaseScore)> {
        self.candidates
            .iter()
            .position(|c| &c.id == id)
            .map(|idx| (&self.candidates[idx], &self.base_scores[idx]))
    }
}

/// Validate raw records and build a shared population
///
/// Malformed records are dropped and reported through
/// [`Population::rejected`]. Fails with [`Error::EmptyPopulation`] when no
/// record survives validation.
pub fn load_population(records: Vec<RawRecord>, schema: &ScoringSchema) -> Result<PopulationHandle> {
    load_validated(records.into_iter().map(Ok), schema)
}

/// Same as [`load_population`], starting from arbitrary JSON values.
pub fn load_population_from_values(values: Vec<Value>, schema: &ScoringSchema) -> Result<PopulationHandle> {
    load_validated(values.into_iter().map(RawRecord::from_value), schema)
}

fn load_validated<I>(records: I, schema: &ScoringSchema) -> Result<PopulationHandle>
where
    I: Iterator<Item = std::result::Result<RawRecord, ValidationError>>,
{
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut rejected = Vec::new();

    for (index, record) in records.enumerate() {
        let validated = record
            .and_then(|raw| Candidate::from_raw(&raw))
            .and_then(|candidate| {
                if seen.insert(candidate.id.clone()) {
                    Ok(candidate)
                } else {
                    Err(ValidationError::DuplicateId(candidate.id.to_string()))
                }
            });

        match validated {
            Ok(candidate) => candidates.push(candidate),
            Err(error) => rejected.push(RejectedRecord { index, error }),
        }
    }

    Population::build(candidates, rejected, schema.clone()).map(Arc::new)
}
