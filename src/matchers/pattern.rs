// SEC-GRADE Pattern Matcher
// Tier 3: technical pattern hits for the exercise's vulnerability class

use crate::engine::Thresholds;
use crate::spec::ExerciseAnswerSpec;
use crate::types::{NormalizedAnswer, Tier, TierError, TierResult};
use regex::Regex;

use super::Matcher;

/// Scans the normalized answer for the spec's technical patterns: payload
/// characters, attack-primitive substrings, characteristic function names
///
/// One hit is enough to match. Confidence starts at the base value and
/// grows by a fixed step per additional distinct pattern, up to the cap.
///
/// A pattern entry whose regex fails to compile is skipped with a warning;
/// the tier only errors when every entry in a non-empty library is unusable.
pub struct PatternMatcher;

impl Matcher for PatternMatcher {
    fn tier(&self) -> Tier {
        Tier::Pattern
    }

    fn evaluate(
        &self,
        answer: &NormalizedAnswer,
        spec: &ExerciseAnswerSpec,
        cfg: &Thresholds,
    ) -> Result<TierResult, TierError> {
        if spec.technical_patterns.is_empty() || answer.is_empty() {
            return Ok(TierResult::miss(Tier::Pattern));
        }

        let mut hits: Vec<String> = Vec::new();
        let mut unusable = 0usize;

        for entry in &spec.technical_patterns {
            let hit = if entry.regex {
                match Regex::new(&entry.pattern) {
                    Ok(re) => re.is_match(&answer.text),
                    Err(e) => {
                        log::warn!(
                            "exercise '{}': skipping pattern '{}': {}",
                            spec.exercise_id,
                            entry.label,
                            e
                        );
                        unusable += 1;
                        continue;
                    }
                }
            } else {
                answer.text.contains(&entry.pattern)
            };

            if hit && !hits.contains(&entry.label) {
                hits.push(entry.label.clone());
            }
        }

        if unusable == spec.technical_patterns.len() {
            return Err(TierError::MalformedEntry(format!(
                "all {} technical patterns for exercise '{}' failed to compile",
                unusable, spec.exercise_id
            )));
        }

        if hits.is_empty() {
            return Ok(TierResult::miss(Tier::Pattern));
        }

        let extra = (hits.len() - 1) as f32;
        let confidence = (cfg.pattern_base_confidence + cfg.pattern_step * extra)
            .min(cfg.pattern_cap);
        let rationale = format!("{} technical pattern(s) recognized", hits.len());

        Ok(TierResult::hit(Tier::Pattern, confidence)
            .with_terms(hits)
            .with_rationale(rationale))
    }
}
