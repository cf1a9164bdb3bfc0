use crate::fairness::DEFAULT_MAX_INJECTED;
use crate::schema::ScoringSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use waitrank_core::{Error, Result};

/// Default number of candidates returned per query.
pub const DEFAULT_TOP_K: usize = 10;

/// Configuration for the ranking engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Result size used when a query does not ask for one
    pub default_k: usize,
    /// Per-field weights and directions
    pub schema: ScoringSchema,
    /// Fairness policy for data-poor candidates
    pub fairness: FairnessConfig,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_k: DEFAULT_TOP_K,
            schema: ScoringSchema::default(),
            fairness: FairnessConfig::default(),
        }
    }
}

impl RankingConfig {
    /// Load a JSON config file; absent keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RankingConfig =
            serde_json::from_str(&contents).map_err(|e| Error::Serialization(e.to_string()))?;
        config
            .schema
            .validate()
            .map_err(|e| Error::InternalRanking(e.to_string()))?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairnessConfig {
    /// Most unscored candidates injected into a full result
    pub max_injected: usize,
    /// Add `u * fairness_budget` to final scores of partially scored candidates
    pub budget_bonus: bool,
}

impl Default for FairnessConfig {
    fn default() -> Self {
        Self {
            max_injected: DEFAULT_MAX_INJECTED,
            budget_bonus: true,
        }
    }
}
