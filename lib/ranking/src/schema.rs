//! Scoring schema definitions
//!
//! Declares, per scored field, which direction is favorable and how much of
//! the total achievable score the field is worth. The weights form a closed
//! budget: a candidate that is best on every field scores the schema total.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use waitrank_core::Field;

/// Scoring schema version 1
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringSchema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Field specifications keyed by field
    pub fields: BTreeMap<Field, FieldSpec>,
}

fn default_version() -> u32 {
    1
}

impl Default for ScoringSchema {
    /// Reference weighting: age 1, accepted offers 3, canceled offers 3,
    /// reply time 2, distance 1.
    fn default() -> Self {
        let fields = BTreeMap::from([
            (Field::Age, FieldSpec::higher_is_better(1.0)),
            (Field::AcceptedOffers, FieldSpec::higher_is_better(3.0)),
            (Field::CanceledOffers, FieldSpec::lower_is_better(3.0)),
            (Field::AverageReplyTime, FieldSpec::lower_is_better(2.0)),
            (Field::Distance, FieldSpec::lower_is_better(1.0)),
        ]);
        Self::new(fields)
    }
}

impl ScoringSchema {
    /// Create a new scoring schema with the given fields
    pub fn new(fields: BTreeMap<Field, FieldSpec>) -> Self {
        Self { version: 1, fields }
    }

    /// Validate the schema
    /// - Every scored field must be configured
    /// - Max scores must be finite and non-negative
    /// - The total must be positive
    pub fn validate(&self) -> Result<(), SchemaError> {
        for field in Field::ALL {
            let spec = self
                .fields
                .get(&field)
                .ok_or(SchemaError::MissingField(field))?;
            if !spec.max_score.is_finite() || spec.max_score < 0.0 {
                return Err(SchemaError::InvalidMaxScore(field, spec.max_score));
            }
        }

        if self.total_score() <= 0.0 {
            return Err(SchemaError::ZeroTotalScore);
        }

        Ok(())
    }

    /// Get a field spec. Only valid after [`ScoringSchema::validate`].
    pub fn spec(&self, field: Field) -> FieldSpec {
        self.fields.get(&field).copied().unwrap_or_default()
    }

    /// Total achievable score across all fields.
    pub fn total_score(&self) -> f64 {
        self.fields.values().map(|spec| spec.max_score).sum()
    }

    /// Total achievable score across the static fields only.
    pub fn static_total_score(&self) -> f64 {
        Field::STATIC.iter().map(|field| self.spec(*field).max_score).sum()
    }
}

/// Configuration for a single scored field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Whether larger raw values are more favorable
    pub higher_is_better: bool,

    /// Score awarded to the most favorable candidate
    pub max_score: f64,
}

impl FieldSpec {
    pub fn higher_is_better(max_score: f64) -> Self {
        Self {
            higher_is_better: true,
            max_score,
        }
    }

    pub fn lower_is_better(max_score: f64) -> Self {
        Self {
            higher_is_better: false,
            max_score,
        }
    }
}

/// Errors that can occur during schema validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Field '{0}' is not configured")]
    MissingField(Field),

    #[error("Field '{0}' has invalid max score {1}")]
    InvalidMaxScore(Field, f64),

    #[error("Total max score must be positive")]
    ZeroTotalScore,
}
