// SEC-GRADE Validation Engine
// Orchestrates the filter and tier pipeline into one grading decision

use crate::filter::InvalidAnswerFilter;
use crate::matchers::{default_matchers, Matcher};
use crate::normalize::normalize;
use crate::spec::SpecStore;
use crate::types::{Tier, TierResult, ValidateError, ValidationResult};

/// Numeric cutoffs for the tier pipeline
///
/// Every threshold the tiers apply lives here, so a deployment can tune
/// the false-accept/false-reject tradeoff without code changes. `Default`
/// carries the shipped values.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Tier 2: minimum fraction of required keywords covered
    pub semantic_min_coverage: f32,
    /// Tier 2: minimum count of distinct matched keywords
    pub semantic_min_keywords: usize,
    /// Tier 2: minimum resulting confidence
    pub semantic_min_confidence: f32,
    /// Tier 3: confidence for a single pattern hit
    pub pattern_base_confidence: f32,
    /// Tier 3: confidence increment per additional distinct hit
    pub pattern_step: f32,
    /// Tier 3: confidence ceiling
    pub pattern_cap: f32,
    /// Tier 4: coverage fraction required unless the spec overrides it
    pub concept_min_coverage: f32,
    /// Tier 4: minimum resulting confidence
    pub concept_min_confidence: f32,
    /// Tier 5: minimum normalized answer length to attempt similarity
    pub fuzzy_min_len: usize,
    /// Tier 5: minimum similarity ratio
    pub fuzzy_min_ratio: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            semantic_min_coverage: 0.60,
            semantic_min_keywords: 2,
            semantic_min_confidence: 85.0,
            pattern_base_confidence: 80.0,
            pattern_step: 5.0,
            pattern_cap: 95.0,
            concept_min_coverage: 0.85,
            concept_min_confidence: 75.0,
            fuzzy_min_len: 8,
            fuzzy_min_ratio: 0.85,
        }
    }
}

/// The answer validation engine
///
/// Pure and stateless per call: `validate` reads the spec store and the
/// configured matchers, mutates nothing, and is safe to share across
/// threads without locking.
pub struct ValidationEngine {
    store: Box<dyn SpecStore>,
    matchers: Vec<Box<dyn Matcher>>,
    filter: InvalidAnswerFilter,
    thresholds: Thresholds,
}

impl ValidationEngine {
    /// Engine with the default pipeline, filter, and thresholds
    pub fn new(store: Box<dyn SpecStore>) -> Self {
        Self {
            store,
            matchers: default_matchers(),
            filter: InvalidAnswerFilter::new(),
            thresholds: Thresholds::default(),
        }
    }

    /// Replace the threshold configuration
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replace the invalid-answer filter
    pub fn with_filter(mut self, filter: InvalidAnswerFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the matcher pipeline (evaluated in the given order)
    pub fn with_matchers(mut self, matchers: Vec<Box<dyn Matcher>>) -> Self {
        self.matchers = matchers;
        self
    }

    /// Grade one answer for one exercise
    ///
    /// Pipeline: normalize → invalid-answer filter (may short-circuit
    /// reject) → tiers in priority order, first match wins. A fault inside
    /// one tier is logged and treated as "did not match". A missing spec is
    /// the one hard error: grading cannot proceed without one.
    pub fn validate(
        &self,
        exercise_id: &str,
        raw_answer: &str,
    ) -> Result<ValidationResult, ValidateError> {
        let spec =
            self.store
                .load_spec(exercise_id)
                .ok_or_else(|| ValidateError::SpecNotFound {
                    exercise_id: exercise_id.to_string(),
                })?;

        let answer = normalize(raw_answer);

        if let Some(reason) = self.filter.check(&answer) {
            return Ok(ValidationResult::rejected(
                0.0,
                format!("{}: {}", reason.as_str(), reason.guidance()),
            ));
        }

        let mut best_miss: Option<TierResult> = None;

        for matcher in &self.matchers {
            match matcher.evaluate(&answer, spec, &self.thresholds) {
                Ok(result) if result.matched => {
                    let feedback = accept_feedback(&result);
                    return Ok(ValidationResult::accepted(result, feedback));
                }
                Ok(result) => {
                    let closer = best_miss
                        .as_ref()
                        .map(|b| result.confidence > b.confidence)
                        .unwrap_or(true);
                    if closer {
                        best_miss = Some(result);
                    }
                }
                Err(e) => {
                    log::warn!(
                        "exercise '{}': {} tier skipped: {}",
                        exercise_id,
                        matcher.tier(),
                        e
                    );
                }
            }
        }

        let confidence = best_miss.as_ref().map(|b| b.confidence).unwrap_or(0.0);
        Ok(ValidationResult::rejected(
            confidence,
            reject_feedback(best_miss.as_ref()),
        ))
    }
}

/// Feedback for an accepted answer
fn accept_feedback(result: &TierResult) -> String {
    match result.tier {
        Tier::Exact => "Correct.".to_string(),
        Tier::Semantic => format!(
            "Correct. You named the key elements: {}.",
            result.matched_terms.join(", ")
        ),
        Tier::Pattern => format!(
            "Correct. Your answer shows the technique in action ({}).",
            result.matched_terms.join(", ")
        ),
        Tier::Concept => format!(
            "Correct. You covered the important concepts: {}.",
            result.matched_terms.join(", ")
        ),
        Tier::Fuzzy => "Correct. Accepted with a minor spelling difference.".to_string(),
    }
}

/// Feedback for a rejected answer, synthesized from the closest failed tier
///
/// Actionable but non-revealing: guides the learner toward what kind of
/// detail is missing without quoting any canonical answer.
fn reject_feedback(best_miss: Option<&TierResult>) -> String {
    // Tier-specific guidance applies only when the closest tier reached at
    // least this confidence
    const NEAR_MISS_FLOOR: f32 = 50.0;

    let best = match best_miss {
        Some(b) if b.confidence >= NEAR_MISS_FLOOR => b,
        _ => {
            return "Not correct. Review the scenario and describe the vulnerability \
                    and how it is exploited."
                .to_string()
        }
    };

    match best.tier {
        Tier::Exact => "Not correct. Name the vulnerability precisely.".to_string(),
        Tier::Semantic => format!(
            "Not quite. You mentioned {}, but key terms are still missing. \
             Name the technique more completely.",
            best.matched_terms.join(", ")
        ),
        Tier::Pattern => {
            "Not quite. Describe the concrete mechanics: the characters, commands, \
             or functions that make the attack work."
                .to_string()
        }
        Tier::Concept => format!(
            "Partially there ({}). Your answer should also address the remaining \
             concepts this exercise covers.",
            best.rationale
        ),
        Tier::Fuzzy => {
            "Very close to an accepted phrasing. Check your spelling and wording."
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ExerciseAnswerSpec, InMemorySpecStore, TechnicalPattern};
    use crate::types::Verdict;

    fn engine() -> ValidationEngine {
        let store = InMemorySpecStore::from_specs([ExerciseAnswerSpec::new("web-01")
            .with_canonical_answers(["authentication bypass"])
            .with_synonym_groups([["bypass", "bypasses", "circumvent"]])
            .with_domain_concepts(["session", "token", "authentication"])
            .with_technical_patterns([TechnicalPattern::regex(
                "session token",
                r"\b(cookie|jwt|token)\b",
            )])]);
        ValidationEngine::new(Box::new(store))
    }

    #[test]
    fn test_exact_wins_first() {
        let result = engine().validate("web-01", "authentication bypass").unwrap();
        assert_eq!(result.verdict, Verdict::Accept);
        assert_eq!(result.matched_tier, Some(Tier::Exact));
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn test_spec_not_found_is_hard_error() {
        let result = engine().validate("nope-99", "authentication bypass");
        assert!(matches!(
            result,
            Err(ValidateError::SpecNotFound { .. })
        ));
    }

    #[test]
    fn test_filter_reject_carries_reason() {
        let result = engine().validate("web-01", "i don't know").unwrap();
        assert_eq!(result.verdict, Verdict::Reject);
        assert!(result.feedback.contains("non-answer"));

        let result = engine().validate("web-01", "no.").unwrap();
        assert!(result.feedback.contains("too short"));
    }

    #[test]
    fn test_reject_feedback_is_non_revealing() {
        let result = engine()
            .validate("web-01", "something about broken login maybe")
            .unwrap();
        assert_eq!(result.verdict, Verdict::Reject);
        assert!(!result.feedback.contains("authentication bypass"));
    }

    #[test]
    fn test_tier_fault_does_not_abort_pipeline() {
        // All patterns malformed -> pattern tier errors; fuzzy still grades
        let store = InMemorySpecStore::from_specs([ExerciseAnswerSpec::new("x")
            .with_canonical_answers(["directory traversal"])
            .with_technical_patterns([TechnicalPattern::regex("broken", "(unclosed")])]);
        let engine = ValidationEngine::new(Box::new(store));

        let result = engine.validate("x", "directory traversel").unwrap();
        assert_eq!(result.verdict, Verdict::Accept);
        assert_eq!(result.matched_tier, Some(Tier::Fuzzy));
    }

    #[test]
    fn test_default_thresholds_match_shipped_values() {
        let t = Thresholds::default();
        assert_eq!(t.semantic_min_confidence, 85.0);
        assert_eq!(t.semantic_min_keywords, 2);
        assert_eq!(t.pattern_base_confidence, 80.0);
        assert_eq!(t.concept_min_coverage, 0.85);
        assert_eq!(t.fuzzy_min_ratio, 0.85);
    }
}
