// SEC-GRADE Fuzzy Matcher
// Tier 5: string similarity against canonical answers

use crate::engine::Thresholds;
use crate::similarity::{similarity_ratio, token_set_ratio};
use crate::spec::ExerciseAnswerSpec;
use crate::types::{NormalizedAnswer, Tier, TierError, TierResult};

use super::Matcher;

/// Maximum similarity ratio between the answer and any canonical answer
///
/// Takes the better of plain edit-distance similarity and the
/// word-order-insensitive token-set ratio, so both typos and reordered
/// phrasings are tolerated. Short answers are ineligible; tiny strings
/// produce spuriously high ratios.
pub struct FuzzyMatcher;

impl Matcher for FuzzyMatcher {
    fn tier(&self) -> Tier {
        Tier::Fuzzy
    }

    fn evaluate(
        &self,
        answer: &NormalizedAnswer,
        spec: &ExerciseAnswerSpec,
        cfg: &Thresholds,
    ) -> Result<TierResult, TierError> {
        if answer.length < cfg.fuzzy_min_len {
            return Ok(TierResult::miss(Tier::Fuzzy)
                .with_rationale("answer too short for similarity comparison"));
        }

        let mut best_ratio = 0.0f32;
        for canonical in &spec.canonical_answers {
            if canonical.is_empty() {
                continue;
            }
            let ratio = similarity_ratio(&answer.text, canonical)
                .max(token_set_ratio(&answer.text, canonical));
            if ratio > best_ratio {
                best_ratio = ratio;
            }
        }

        let confidence = (100.0 * best_ratio).min(100.0);
        let matched = best_ratio >= cfg.fuzzy_min_ratio;

        let mut result = TierResult {
            tier: Tier::Fuzzy,
            matched,
            confidence,
            matched_terms: Vec::new(),
            rationale: format!("best similarity ratio {:.2}", best_ratio),
        };
        if matched {
            result.matched_terms = vec![answer.text.clone()];
        }

        Ok(result)
    }
}
