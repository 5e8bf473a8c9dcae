// SEC-GRADE Concept Matcher
// Tier 4: coverage of the exercise's required domain concepts

use crate::engine::Thresholds;
use crate::spec::ExerciseAnswerSpec;
use crate::types::{NormalizedAnswer, Tier, TierError, TierResult};

use super::Matcher;

/// Fraction of required domain concepts present in the answer
///
/// Coverage uses plain containment over a flat keyword set: a concept
/// counts when the answer text contains it, or a token of the answer shares
/// its light stem (trailing `ing`/`ed`/`es`/`s` trimmed). No weighting and
/// no dictionary stemmer.
///
/// Confidence is `75 + 20 × coverage`, capped at 95; acceptance needs
/// coverage at or above the spec's `min_concept_coverage` (default from
/// [`Thresholds`]) and at least two tokens in the answer.
pub struct ConceptMatcher;

impl Matcher for ConceptMatcher {
    fn tier(&self) -> Tier {
        Tier::Concept
    }

    fn evaluate(
        &self,
        answer: &NormalizedAnswer,
        spec: &ExerciseAnswerSpec,
        cfg: &Thresholds,
    ) -> Result<TierResult, TierError> {
        if spec.domain_concepts.is_empty() {
            return Ok(TierResult::miss(Tier::Concept));
        }
        if answer.tokens.len() < 2 {
            return Ok(TierResult::miss(Tier::Concept)
                .with_rationale("single-word answers are not eligible"));
        }

        let covered: Vec<String> = spec
            .domain_concepts
            .iter()
            .filter(|concept| concept_covered(answer, concept))
            .cloned()
            .collect();

        let coverage = covered.len() as f32 / spec.domain_concepts.len() as f32;
        let required = spec
            .min_concept_coverage
            .unwrap_or(cfg.concept_min_coverage);

        let confidence = (75.0 + 20.0 * coverage).min(95.0);
        let accepted = coverage >= required && confidence >= cfg.concept_min_confidence;

        let rationale = format!(
            "{} of {} domain concepts covered",
            covered.len(),
            spec.domain_concepts.len()
        );

        Ok(TierResult {
            tier: Tier::Concept,
            matched: accepted,
            // A zero-coverage answer reports 0, not the 75-point floor
            confidence: if covered.is_empty() { 0.0 } else { confidence },
            matched_terms: covered,
            rationale,
        })
    }
}

fn concept_covered(answer: &NormalizedAnswer, concept: &str) -> bool {
    if answer.text.contains(concept) {
        return true;
    }

    // Single-word concepts also match on shared stems ("sanitize" covers
    // "sanitizing"); multi-word concepts are containment-only
    if !concept.contains(' ') {
        let concept_stem = stem(concept);
        return answer.tokens.iter().any(|t| stem(t) == concept_stem);
    }

    false
}

/// Trim one common suffix, keeping at least three characters of stem
fn stem(word: &str) -> &str {
    for suffix in ["ing", "ed", "es", "s"] {
        if let Some(stripped) = word.strip_suffix(suffix) {
            if stripped.chars().count() >= 3 {
                return stripped;
            }
        }
    }
    word
}
