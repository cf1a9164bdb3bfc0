use crate::loader::read_records;
use parking_lot::RwLock;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};
use waitrank_core::Result;
use waitrank_ranking::{load_population_from_values, PopulationHandle, Ranker, RankingConfig};

/// Holds the current population snapshot
///
/// Loads replace the snapshot atomically. Queries clone the handle and keep
/// ranking against it even if a reload happens meanwhile. A failed load
/// leaves the previous snapshot in place.
pub struct PopulationStore {
    current: RwLock<Option<PopulationHandle>>,
    ranker: Ranker,
}

impl PopulationStore {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            current: RwLock::new(None),
            ranker: Ranker::new(config),
        }
    }

    /// Load a JSON data file and make it the current population
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<PopulationHandle> {
        let records = read_records(path)?;
        self.load_values(records)
    }

    /// Validate `records` and make them the current population
    pub fn load_values(&self, records: Vec<Value>) -> Result<PopulationHandle> {
        let population = match load_population_from_values(records, &self.ranker.config().schema) {
            Ok(population) => population,
            Err(e) => {
                warn!("Population load failed, keeping previous snapshot: {}", e);
                return Err(e);
            }
        };

        *self.current.write() = Some(population.clone());
        info!(
            "Population replaced: {} candidates, {} rejected",
            population.len(),
            population.rejected().len()
        );
        Ok(population)
    }

    /// The current snapshot, if any population has been loaded
    #[inline]
    pub fn current(&self) -> Option<PopulationHandle> {
        self.current.read().clone()
    }

    #[inline]
    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }
}

impl Default for PopulationStore {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}
