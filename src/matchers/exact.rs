// SEC-GRADE Exact Matcher
// Tier 1: verbatim match against canonical answers

use crate::engine::Thresholds;
use crate::spec::ExerciseAnswerSpec;
use crate::types::{NormalizedAnswer, Tier, TierError, TierResult};

use super::Matcher;

/// Set membership against the spec's normalized canonical answers
///
/// Confidence is fixed at 100; there is no partial credit here.
pub struct ExactMatcher;

impl Matcher for ExactMatcher {
    fn tier(&self) -> Tier {
        Tier::Exact
    }

    fn evaluate(
        &self,
        answer: &NormalizedAnswer,
        spec: &ExerciseAnswerSpec,
        _cfg: &Thresholds,
    ) -> Result<TierResult, TierError> {
        if !answer.is_empty()
            && spec
                .canonical_answers
                .iter()
                .any(|canonical| canonical == &answer.text)
        {
            return Ok(TierResult::hit(Tier::Exact, 100.0)
                .with_terms(vec![answer.text.clone()])
                .with_rationale("matched a canonical answer verbatim"));
        }

        Ok(TierResult::miss(Tier::Exact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn spec() -> ExerciseAnswerSpec {
        ExerciseAnswerSpec::new("web-01")
            .with_canonical_answers(["authentication bypass", "session fixation"])
    }

    fn evaluate(raw: &str) -> TierResult {
        ExactMatcher
            .evaluate(&normalize(raw), &spec(), &Thresholds::default())
            .unwrap()
    }

    #[test]
    fn test_verbatim_match() {
        let result = evaluate("authentication bypass");
        assert!(result.matched);
        assert_eq!(result.confidence, 100.0);
        assert_eq!(result.matched_terms, vec!["authentication bypass"]);
    }

    #[test]
    fn test_match_is_case_and_punctuation_insensitive() {
        // Normalization handles the folding before the matcher sees the text
        let result = evaluate("  Authentication BYPASS!  ");
        assert!(result.matched);
    }

    #[test]
    fn test_second_canonical_matches() {
        assert!(evaluate("session fixation").matched);
    }

    #[test]
    fn test_near_miss_is_not_exact() {
        let result = evaluate("authentication bypas");
        assert!(!result.matched);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_empty_answer_never_matches() {
        let empty_canonical_spec = ExerciseAnswerSpec::new("x").with_canonical_answers([""]);
        let result = ExactMatcher
            .evaluate(&normalize(""), &empty_canonical_spec, &Thresholds::default())
            .unwrap();
        assert!(!result.matched);
    }
}
