// SEC-GRADE Matchers
// The five matching tiers behind one uniform interface

pub mod concept;
pub mod exact;
pub mod fuzzy;
pub mod pattern;
pub mod semantic;

pub use concept::ConceptMatcher;
pub use exact::ExactMatcher;
pub use fuzzy::FuzzyMatcher;
pub use pattern::PatternMatcher;
pub use semantic::SemanticMatcher;

use crate::engine::Thresholds;
use crate::spec::ExerciseAnswerSpec;
use crate::types::{NormalizedAnswer, Tier, TierError, TierResult};

/// One matching strategy in the pipeline
///
/// Implementations are pure: same answer and spec always yield the same
/// result. A tier that cannot evaluate (malformed knowledge-base entry)
/// returns `Err`; the orchestrator logs it and moves on.
pub trait Matcher: Send + Sync {
    /// Which tier this matcher implements
    fn tier(&self) -> Tier;

    /// Evaluate the answer against the spec
    fn evaluate(
        &self,
        answer: &NormalizedAnswer,
        spec: &ExerciseAnswerSpec,
        cfg: &Thresholds,
    ) -> Result<TierResult, TierError>;
}

/// The full pipeline in priority order: Exact, Semantic, Pattern, Concept, Fuzzy
pub fn default_matchers() -> Vec<Box<dyn Matcher>> {
    vec![
        Box::new(ExactMatcher),
        Box::new(SemanticMatcher),
        Box::new(PatternMatcher),
        Box::new(ConceptMatcher),
        Box::new(FuzzyMatcher),
    ]
}

/// Words that carry no keyword weight in canonical answers
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "of", "to", "in", "on", "for", "and", "or", "is", "are", "was", "be", "by",
    "with", "it", "its", "this", "that", "as", "at", "from", "via", "using", "use",
];

pub(crate) fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Tokens of `text` that count as required keywords: stop words and
/// single-character tokens dropped
pub(crate) fn significant_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|t| t.chars().count() > 1 && !is_stop_word(t))
        .collect()
}
