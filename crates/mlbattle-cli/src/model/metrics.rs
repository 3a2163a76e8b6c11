use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use mlbattle_engine::{Algorithm, Fighter, PerformanceMetrics, RandomSource, create_fighter};
use tracing::{debug, warn};

use crate::util::read_json_file;

/// Model metrics per algorithm, read from a JSON object keyed by algorithm
/// name or registry key.
#[derive(Debug, Clone, Default)]
pub struct MetricsTable {
    by_algorithm: BTreeMap<Algorithm, PerformanceMetrics>,
}

impl MetricsTable {
    /// Loads `path`, or returns an empty table when the file is missing or
    /// malformed so fighters fall back to baseline stats.
    pub fn load_or_baseline(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match read_json_file("metrics", path) {
            Ok(raw) => Self::from_raw(raw),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "using baseline stats");
                Self::default()
            }
        }
    }

    fn from_raw(raw: BTreeMap<String, PerformanceMetrics>) -> Self {
        let mut by_algorithm = BTreeMap::new();
        for (name, metrics) in raw {
            match Algorithm::from_name(&name) {
                Some(algorithm) => {
                    by_algorithm.insert(algorithm, metrics);
                }
                None => warn!(%name, "ignoring metrics for unknown algorithm"),
            }
        }
        debug!(count = by_algorithm.len(), "metrics loaded");
        Self { by_algorithm }
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&PerformanceMetrics> {
        self.by_algorithm.get(&algorithm)
    }

    pub fn create_fighter<R>(&self, algorithm: Algorithm, rng: &mut R) -> anyhow::Result<Fighter>
    where
        R: RandomSource + ?Sized,
    {
        create_fighter(algorithm.name(), self.get(algorithm), rng)
            .with_context(|| format!("Failed to create fighter for {algorithm}"))
    }
}

#[cfg(test)]
mod tests {
    use mlbattle_engine::ScriptedRandom;

    use super::*;

    #[test]
    fn test_keys_resolve_by_name_or_alias() {
        let raw: BTreeMap<String, PerformanceMetrics> = serde_json::from_str(
            r#"{
                "random forest": { "precision": 0.9, "recall": 0.8, "fit_time": 2.0 },
                "SVM": { "accuracy": 0.95 },
                "Quantum Annealer": { "accuracy": 0.5 }
            }"#,
        )
        .unwrap();
        let table = MetricsTable::from_raw(raw);
        assert!(table.get(Algorithm::SupportVectorMachine).is_some());
        assert!(table.get(Algorithm::NeuralNetwork).is_none());

        let mut rng = ScriptedRandom::constant(0.5);
        let fighter = table
            .create_fighter(Algorithm::RandomForest, &mut rng)
            .unwrap();
        assert_eq!(fighter.max_health(), 83);
    }

    #[test]
    fn test_missing_file_degrades_to_baseline() {
        let table = MetricsTable::load_or_baseline(Some(Path::new("/nonexistent/metrics.json")));
        assert!(table.get(Algorithm::RandomForest).is_none());
    }
}
