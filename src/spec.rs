// SEC-GRADE Knowledge Base
// Per-exercise answer specifications and the store that provides them

use crate::normalize::normalize;
use crate::types::ValidateError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Current spec document schema version
pub const SCHEMA_VERSION: u32 = 1;

/// One technical pattern an answer can hit (tier 3)
///
/// Either a literal substring of the normalized answer text, or a regex
/// source string when `regex` is true. Patterns are authored per exercise
/// vulnerability class; a pattern that fails to compile is skipped at
/// evaluation time, never a hard failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalPattern {
    /// Short label shown in feedback (e.g. "statement separator")
    pub label: String,

    /// Substring literal, or regex source when `regex` is set
    pub pattern: String,

    /// Interpret `pattern` as a regex instead of a literal
    #[serde(default)]
    pub regex: bool,
}

impl TechnicalPattern {
    /// Literal substring pattern
    pub fn literal(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
            regex: false,
        }
    }

    /// Regex pattern
    pub fn regex(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
            regex: true,
        }
    }
}

/// Read-only answer specification for one exercise
///
/// Plain serializable data: canonical answers, synonym groups, required
/// domain concepts, and the technical pattern library for the exercise's
/// vulnerability class. All text fields are normalized once at load time
/// so matching never re-normalizes spec content per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseAnswerSpec {
    /// Exercise this spec grades
    pub exercise_id: String,

    /// Document schema version
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Author-provided correct answers (normalized at load)
    pub canonical_answers: Vec<String>,

    /// Groups of interchangeable terms (normalized at load)
    #[serde(default)]
    pub synonym_groups: Vec<Vec<String>>,

    /// Required concept keywords for the concept tier (normalized at load)
    #[serde(default)]
    pub domain_concepts: Vec<String>,

    /// Technical pattern library for the pattern tier
    #[serde(default)]
    pub technical_patterns: Vec<TechnicalPattern>,

    /// Override for the concept-coverage acceptance fraction
    #[serde(default)]
    pub min_concept_coverage: Option<f32>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl ExerciseAnswerSpec {
    /// Empty spec for the given exercise; populate with the `with_*` builders
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            schema_version: SCHEMA_VERSION,
            canonical_answers: Vec::new(),
            synonym_groups: Vec::new(),
            domain_concepts: Vec::new(),
            technical_patterns: Vec::new(),
            min_concept_coverage: None,
        }
    }

    /// Add canonical answers (normalized immediately)
    pub fn with_canonical_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.canonical_answers
            .extend(answers.into_iter().map(|a| normalize(a.as_ref()).text));
        self
    }

    /// Add synonym groups (normalized immediately)
    pub fn with_synonym_groups<I, G, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.synonym_groups.extend(groups.into_iter().map(|g| {
            g.into_iter()
                .map(|s| normalize(s.as_ref()).text)
                .collect::<Vec<_>>()
        }));
        self
    }

    /// Add required domain concepts (normalized immediately)
    pub fn with_domain_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domain_concepts
            .extend(concepts.into_iter().map(|c| normalize(c.as_ref()).text));
        self
    }

    /// Add technical patterns (kept verbatim; patterns are matched against
    /// normalized answer text, so author them lowercased)
    pub fn with_technical_patterns<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = TechnicalPattern>,
    {
        self.technical_patterns.extend(patterns);
        self
    }

    /// Override the concept-coverage acceptance fraction
    pub fn with_min_concept_coverage(mut self, coverage: f32) -> Self {
        self.min_concept_coverage = Some(coverage);
        self
    }

    /// Normalize all text fields in place
    ///
    /// Idempotent; called by the stores after deserialization so that spec
    /// files authored by hand compare correctly against normalized answers.
    pub fn finalize(&mut self) {
        for answer in &mut self.canonical_answers {
            *answer = normalize(answer).text;
        }
        for group in &mut self.synonym_groups {
            for term in group.iter_mut() {
                *term = normalize(term).text;
            }
        }
        for concept in &mut self.domain_concepts {
            *concept = normalize(concept).text;
        }
    }
}

/// Provisioning seam for answer specs
///
/// Implemented by whatever owns exercise content (an in-memory table here;
/// a database or content service in a deployment). The engine only ever
/// reads through this trait.
pub trait SpecStore: Send + Sync {
    /// Fetch the spec for an exercise, if one is registered
    fn load_spec(&self, exercise_id: &str) -> Option<&ExerciseAnswerSpec>;
}

/// Spec store backed by a hash map, loadable from a JSON document
#[derive(Debug, Clone, Default)]
pub struct InMemorySpecStore {
    specs: FxHashMap<String, ExerciseAnswerSpec>,
}

/// On-disk spec document: `{ "schema_version": 1, "exercises": [...] }`
#[derive(Debug, Deserialize)]
struct SpecFile {
    #[serde(default = "default_schema_version")]
    #[allow(dead_code)]
    schema_version: u32,
    exercises: Vec<ExerciseAnswerSpec>,
}

impl InMemorySpecStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec, normalizing its text fields
    pub fn insert(&mut self, mut spec: ExerciseAnswerSpec) {
        spec.finalize();
        self.specs.insert(spec.exercise_id.clone(), spec);
    }

    /// Build a store from an iterator of specs
    pub fn from_specs<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = ExerciseAnswerSpec>,
    {
        let mut store = Self::new();
        for spec in specs {
            store.insert(spec);
        }
        store
    }

    /// Parse a JSON spec document
    ///
    /// # Example document
    /// ```json
    /// {
    ///   "schema_version": 1,
    ///   "exercises": [
    ///     {
    ///       "exercise_id": "web-01",
    ///       "canonical_answers": ["authentication bypass"],
    ///       "synonym_groups": [["bypass", "bypasses", "circumvent"]]
    ///     }
    ///   ]
    /// }
    /// ```
    pub fn from_json(doc: &str) -> Result<Self, ValidateError> {
        let file: SpecFile =
            serde_json::from_str(doc).map_err(|e| ValidateError::SpecParse(e.to_string()))?;
        Ok(Self::from_specs(file.exercises))
    }

    /// Number of registered specs
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when no specs are registered
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl SpecStore for InMemorySpecStore {
    fn load_spec(&self, exercise_id: &str) -> Option<&ExerciseAnswerSpec> {
        self.specs.get(exercise_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_normalizes() {
        let spec = ExerciseAnswerSpec::new("web-01")
            .with_canonical_answers(["  SQL Injection!  "])
            .with_synonym_groups([["Bypass", "Bypasses"]])
            .with_domain_concepts(["Sanitize"]);

        assert_eq!(spec.canonical_answers, vec!["sql injection"]);
        assert_eq!(spec.synonym_groups[0], vec!["bypass", "bypasses"]);
        assert_eq!(spec.domain_concepts, vec!["sanitize"]);
    }

    #[test]
    fn test_finalize_idempotent() {
        let mut spec =
            ExerciseAnswerSpec::new("web-01").with_canonical_answers(["cross site scripting"]);
        spec.finalize();
        let once = spec.clone();
        spec.finalize();
        assert_eq!(spec.canonical_answers, once.canonical_answers);
    }

    #[test]
    fn test_store_lookup() {
        let store = InMemorySpecStore::from_specs([
            ExerciseAnswerSpec::new("web-01").with_canonical_answers(["xss"]),
            ExerciseAnswerSpec::new("web-02").with_canonical_answers(["csrf"]),
        ]);

        assert_eq!(store.len(), 2);
        assert!(store.load_spec("web-01").is_some());
        assert!(store.load_spec("web-99").is_none());
    }

    #[test]
    fn test_from_json() {
        let doc = r#"{
            "schema_version": 1,
            "exercises": [
                {
                    "exercise_id": "inj-01",
                    "canonical_answers": ["Command Injection"],
                    "technical_patterns": [
                        {"label": "statement separator", "pattern": ";"}
                    ],
                    "min_concept_coverage": 0.75
                }
            ]
        }"#;

        let store = InMemorySpecStore::from_json(doc).unwrap();
        let spec = store.load_spec("inj-01").unwrap();

        // Normalized at load
        assert_eq!(spec.canonical_answers, vec!["command injection"]);
        assert_eq!(spec.technical_patterns.len(), 1);
        assert!(!spec.technical_patterns[0].regex);
        assert_eq!(spec.min_concept_coverage, Some(0.75));
    }

    #[test]
    fn test_from_json_defaults() {
        let doc = r#"{
            "exercises": [
                {"exercise_id": "a", "canonical_answers": ["buffer overflow"]}
            ]
        }"#;

        let store = InMemorySpecStore::from_json(doc).unwrap();
        let spec = store.load_spec("a").unwrap();
        assert_eq!(spec.schema_version, SCHEMA_VERSION);
        assert!(spec.synonym_groups.is_empty());
        assert!(spec.technical_patterns.is_empty());
        assert_eq!(spec.min_concept_coverage, None);
    }

    #[test]
    fn test_from_json_malformed() {
        let result = InMemorySpecStore::from_json("{ not json");
        assert!(matches!(result, Err(ValidateError::SpecParse(_))));
    }

    #[test]
    fn test_pattern_constructors() {
        let lit = TechnicalPattern::literal("separator", ";");
        assert!(!lit.regex);

        let re = TechnicalPattern::regex("separator", ";|\\bsemicolon\\b");
        assert!(re.regex);
    }
}
