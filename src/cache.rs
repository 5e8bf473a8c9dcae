// SEC-GRADE Result Cache
// Optional memoization wrapper around the pure engine

use crate::engine::ValidationEngine;
use crate::normalize::normalize;
use crate::types::{ValidateError, ValidationResult};
use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// Memoizing wrapper keyed by `(exercise_id, normalized answer text)`
///
/// The engine itself stays pure; this layer sits outside it. Reads take the
/// read lock only; a miss recomputes outside any lock and then takes a
/// short write lock to publish. Two threads racing on the same miss both
/// recompute and publish the same deterministic result.
///
/// Verdicts are identical with and without the cache; spec-not-found errors
/// are never cached.
pub struct CachedValidator {
    engine: ValidationEngine,
    results: RwLock<FxHashMap<(String, String), ValidationResult>>,
}

impl CachedValidator {
    /// Wrap an engine
    pub fn new(engine: ValidationEngine) -> Self {
        Self {
            engine,
            results: RwLock::new(FxHashMap::default()),
        }
    }

    /// Grade one answer, consulting the cache first
    pub fn validate(
        &self,
        exercise_id: &str,
        raw_answer: &str,
    ) -> Result<ValidationResult, ValidateError> {
        let key = (exercise_id.to_string(), normalize(raw_answer).text);

        // A poisoned lock degrades to a recompute rather than an error
        if let Ok(cache) = self.results.read() {
            if let Some(hit) = cache.get(&key) {
                log::debug!("cache hit for exercise '{}'", exercise_id);
                return Ok(hit.clone());
            }
        }

        let result = self.engine.validate(exercise_id, raw_answer)?;

        if let Ok(mut cache) = self.results.write() {
            cache.insert(key, result.clone());
        }

        Ok(result)
    }

    /// Number of memoized results
    pub fn len(&self) -> usize {
        self.results.read().map(|c| c.len()).unwrap_or(0)
    }

    /// True when nothing is memoized yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all memoized results (call after replacing exercise content)
    pub fn clear(&self) {
        if let Ok(mut cache) = self.results.write() {
            cache.clear();
        }
    }
}
