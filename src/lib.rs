//! # SEC-GRADE: Security Answer Validation Engine
//!
//! Grades free-text answers to security training challenges: a learner types
//! what they found, the engine decides whether that counts as correct.
//!
//! ## Five Matching Tiers
//!
//! Tiers run in fixed priority order; the first one whose acceptance
//! criteria are met wins:
//!
//! 1. **Exact** - Verbatim match against a canonical answer (confidence 100)
//! 2. **Semantic** - Required-keyword coverage with synonym expansion
//! 3. **Pattern** - Technical pattern hits (payload characters, primitives)
//! 4. **Concept** - Coverage of the exercise's domain concept keywords
//! 5. **Fuzzy** - Edit-distance similarity against canonical answers
//!
//! Before any tier runs, an invalid-answer filter rejects degenerate input
//! (too short, boilerplate "idk"-style non-answers, repeated characters).
//!
//! ## Example Usage
//!
//! ```
//! use secgrade::{ExerciseAnswerSpec, InMemorySpecStore, ValidationEngine, Verdict};
//!
//! let spec = ExerciseAnswerSpec::new("web-01")
//!     .with_canonical_answers(["authentication bypass"])
//!     .with_synonym_groups([["bypass", "bypasses", "circumvent"]]);
//!
//! let mut store = InMemorySpecStore::new();
//! store.insert(spec);
//!
//! let engine = ValidationEngine::new(Box::new(store));
//!
//! let result = engine.validate("web-01", "Authentication Bypass!")?;
//! assert_eq!(result.verdict, Verdict::Accept);
//!
//! let result = engine.validate("web-01", "bypasses authentication")?;
//! assert_eq!(result.verdict, Verdict::Accept);
//! # Ok::<(), secgrade::ValidateError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Normalizer** - Canonicalizes raw input into comparable form
//! - **Invalid-Answer Filter** - Rejects gaming submissions up front
//! - **Spec Store** - Per-exercise answer specifications (injected)
//! - **Matchers** - The five tiers behind one uniform trait
//! - **Validation Engine** - Orchestrates the pipeline, synthesizes feedback
//! - **Cached Validator** - Optional memoization wrapper
//!
//! The engine is pure and stateless per call: no I/O, no hidden state, the
//! same spec and answer always produce the same result.

pub mod cache;
pub mod engine;
pub mod filter;
pub mod matchers;
pub mod normalize;
pub mod similarity;
pub mod spec;
pub mod types;

// Re-export main types and functions for convenience
pub use cache::CachedValidator;
pub use engine::{Thresholds, ValidationEngine};
pub use filter::{InvalidAnswerFilter, RejectReason};
pub use matchers::{default_matchers, Matcher};
pub use normalize::normalize;
pub use spec::{ExerciseAnswerSpec, InMemorySpecStore, SpecStore, TechnicalPattern};
pub use types::{
    NormalizedAnswer, Tier, TierError, TierResult, ValidateError, ValidationResult, Verdict,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
