// SEC-GRADE Semantic Matcher
// Tier 2: required-keyword coverage with synonym expansion

use crate::engine::Thresholds;
use crate::spec::ExerciseAnswerSpec;
use crate::types::{NormalizedAnswer, Tier, TierError, TierResult};
use rustc_hash::FxHashSet;

use super::{significant_tokens, Matcher};

/// Keyword coverage against each canonical answer, counting a synonym as
/// satisfying its group
///
/// Requires at least two tokens in the answer; single words cannot clear
/// this tier. Confidence is `100 × coverage`, so a strictly larger matched
/// keyword set always scores at least as high.
pub struct SemanticMatcher;

impl Matcher for SemanticMatcher {
    fn tier(&self) -> Tier {
        Tier::Semantic
    }

    fn evaluate(
        &self,
        answer: &NormalizedAnswer,
        spec: &ExerciseAnswerSpec,
        cfg: &Thresholds,
    ) -> Result<TierResult, TierError> {
        if answer.tokens.len() < 2 {
            return Ok(TierResult::miss(Tier::Semantic)
                .with_rationale("single-word answers are not eligible"));
        }

        let user_tokens: FxHashSet<&str> = answer.tokens.iter().map(String::as_str).collect();
        let mut best = TierResult::miss(Tier::Semantic);

        for canonical in &spec.canonical_answers {
            let required = significant_tokens(canonical);
            if required.is_empty() {
                continue;
            }

            let matched: Vec<&str> = required
                .iter()
                .copied()
                .filter(|kw| keyword_covered(kw, &user_tokens, &spec.synonym_groups))
                .collect();

            let coverage = matched.len() as f32 / required.len() as f32;
            let confidence = (100.0 * coverage).min(100.0);

            let accepted = coverage >= cfg.semantic_min_coverage
                && matched.len() >= cfg.semantic_min_keywords
                && confidence >= cfg.semantic_min_confidence;

            // A matching result always beats a non-matching one; within the
            // same match state, higher confidence wins
            let replace = if accepted != best.matched {
                accepted
            } else {
                confidence > best.confidence
            };

            if replace {
                best = TierResult {
                    tier: Tier::Semantic,
                    matched: accepted,
                    confidence,
                    matched_terms: matched.iter().map(|s| s.to_string()).collect(),
                    rationale: format!(
                        "{} of {} required keywords covered",
                        matched.len(),
                        required.len()
                    ),
                };
            }
        }

        Ok(best)
    }
}

/// A keyword is covered when the answer contains it directly, or contains
/// any member of a synonym group the keyword belongs to
fn keyword_covered(
    keyword: &str,
    user_tokens: &FxHashSet<&str>,
    synonym_groups: &[Vec<String>],
) -> bool {
    if user_tokens.contains(keyword) {
        return true;
    }

    synonym_groups.iter().any(|group| {
        group.iter().any(|term| term == keyword)
            && group.iter().any(|term| user_tokens.contains(term.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn spec() -> ExerciseAnswerSpec {
        ExerciseAnswerSpec::new("web-01")
            .with_canonical_answers(["authentication bypass"])
            .with_synonym_groups([
                vec!["bypass", "bypasses", "bypassing", "circumvent"],
                vec!["authentication", "auth", "login"],
            ])
    }

    fn evaluate(raw: &str) -> TierResult {
        SemanticMatcher
            .evaluate(&normalize(raw), &spec(), &Thresholds::default())
            .unwrap()
    }

    #[test]
    fn test_synonym_coverage_accepts() {
        let result = evaluate("bypasses authentication");
        assert!(result.matched);
        assert!(result.confidence >= 85.0);
        assert_eq!(result.matched_terms.len(), 2);
    }

    #[test]
    fn test_direct_keywords_accept() {
        let result = evaluate("authentication bypass through the reset flow");
        assert!(result.matched);
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn test_single_word_ineligible() {
        // "authentication" alone covers 1 of 2 keywords and is one token
        let result = evaluate("authentication");
        assert!(!result.matched);
    }

    #[test]
    fn test_partial_coverage_rejected_but_scored() {
        let result = evaluate("broken authentication somewhere");
        assert!(!result.matched);
        assert_eq!(result.confidence, 50.0);
        assert_eq!(result.matched_terms, vec!["authentication"]);
    }

    #[test]
    fn test_keyword_superset_monotonicity() {
        let spec = ExerciseAnswerSpec::new("x")
            .with_canonical_answers(["weak password hashing algorithm"]);
        let cfg = Thresholds::default();

        let a = SemanticMatcher
            .evaluate(&normalize("weak hashing used"), &spec, &cfg)
            .unwrap();
        let b = SemanticMatcher
            .evaluate(&normalize("weak password hashing used"), &spec, &cfg)
            .unwrap();

        assert!(b.matched_terms.len() > a.matched_terms.len());
        assert!(b.confidence >= a.confidence);
    }

    #[test]
    fn test_unrelated_answer_scores_zero() {
        let result = evaluate("buffer overflow in the image parser");
        assert!(!result.matched);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_best_canonical_wins() {
        let spec = ExerciseAnswerSpec::new("x").with_canonical_answers([
            "cross site request forgery",
            "missing csrf token validation",
        ]);
        let result = SemanticMatcher
            .evaluate(
                &normalize("missing csrf token validation on the form"),
                &spec,
                &Thresholds::default(),
            )
            .unwrap();

        assert!(result.matched);
        assert_eq!(result.confidence, 100.0);
    }
}
