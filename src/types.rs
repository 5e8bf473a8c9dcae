// SEC-GRADE Type Definitions
// Core types for answer validation verdicts and tier results

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Matching tiers, in pipeline priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Verbatim match against a canonical answer (confidence fixed at 100)
    Exact,

    /// Keyword coverage with synonym expansion
    /// Requires ≥ 2 tokens; single-word answers cannot pass this tier
    Semantic,

    /// Technical pattern hits (payload characters, attack primitives)
    Pattern,

    /// Domain concept coverage over the exercise's keyword set
    Concept,

    /// String similarity against canonical answers (typo tolerance)
    Fuzzy,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Exact => write!(f, "Exact"),
            Tier::Semantic => write!(f, "Semantic"),
            Tier::Pattern => write!(f, "Pattern"),
            Tier::Concept => write!(f, "Concept"),
            Tier::Fuzzy => write!(f, "Fuzzy"),
        }
    }
}

/// Final grading verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accept => write!(f, "ACCEPT"),
            Verdict::Reject => write!(f, "REJECT"),
        }
    }
}

/// Canonicalized form of a raw answer, produced fresh per validation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAnswer {
    /// Normalized text (lowercased, whitespace-collapsed, accent-folded)
    pub text: String,

    /// Whitespace-split tokens of `text`
    pub tokens: Vec<String>,

    /// Character count of `text`
    pub length: usize,
}

impl NormalizedAnswer {
    /// True if normalization produced no text at all
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// True if `token` appears verbatim in the token list
    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// Outcome of evaluating one tier against one answer
#[derive(Debug, Clone, Serialize)]
pub struct TierResult {
    /// Which tier produced this result
    pub tier: Tier,

    /// Whether the tier's acceptance criteria were met
    pub matched: bool,

    /// Match strength within this tier, 0-100 (not comparable across tiers)
    pub confidence: f32,

    /// Terms that contributed to the match
    pub matched_terms: Vec<String>,

    /// Short explanation of how the score was reached
    pub rationale: String,
}

impl TierResult {
    /// Create a non-matching result with zero confidence
    pub fn miss(tier: Tier) -> Self {
        Self {
            tier,
            matched: false,
            confidence: 0.0,
            matched_terms: Vec::new(),
            rationale: String::new(),
        }
    }

    /// Create a matching result with the given confidence
    pub fn hit(tier: Tier, confidence: f32) -> Self {
        Self {
            tier,
            matched: true,
            confidence,
            matched_terms: Vec::new(),
            rationale: String::new(),
        }
    }

    /// Set the confidence without changing the match flag
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set matched terms
    pub fn with_terms(mut self, terms: Vec<String>) -> Self {
        self.matched_terms = terms;
        self
    }

    /// Set the rationale string
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }
}

/// The engine's sole output: verdict plus grading metadata
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Accept or reject
    pub verdict: Verdict,

    /// Tier that accepted the answer (None on reject)
    pub matched_tier: Option<Tier>,

    /// Confidence of the winning tier, or of the closest failed tier on reject
    pub confidence: f32,

    /// Learner-facing feedback; on reject, actionable but non-revealing
    pub feedback: String,

    /// Keywords/terms that contributed to the match
    pub matched_keywords: Vec<String>,
}

impl ValidationResult {
    /// Build an accepting result from a winning tier result
    pub fn accepted(tier: TierResult, feedback: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Accept,
            matched_tier: Some(tier.tier),
            confidence: tier.confidence,
            feedback: feedback.into(),
            matched_keywords: tier.matched_terms,
        }
    }

    /// Build a rejecting result
    pub fn rejected(confidence: f32, feedback: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Reject,
            matched_tier: None,
            confidence,
            feedback: feedback.into(),
            matched_keywords: Vec::new(),
        }
    }

    /// True when the verdict is Accept
    pub fn is_accept(&self) -> bool {
        self.verdict == Verdict::Accept
    }
}

/// Errors surfaced to the caller of [`validate`](crate::ValidationEngine::validate)
///
/// Grading outcomes (wrong or gaming answers) are not errors; they come back
/// as Reject verdicts. Only operational failures land here.
#[derive(Debug, Clone, Error)]
pub enum ValidateError {
    #[error("no answer spec registered for exercise '{exercise_id}'")]
    SpecNotFound { exercise_id: String },

    #[error("failed to parse spec document: {0}")]
    SpecParse(String),
}

/// Internal fault inside one tier's evaluation
///
/// Recovered by the orchestrator: the tier is treated as not matched and the
/// pipeline continues. Never propagates to the caller.
#[derive(Debug, Clone, Error)]
pub enum TierError {
    #[error("malformed knowledge-base entry: {0}")]
    MalformedEntry(String),
}
