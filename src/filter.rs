// SEC-GRADE Invalid-Answer Filter
// Rejects low-effort and gaming submissions before any matching work

use crate::types::NormalizedAnswer;
use rustc_hash::FxHashSet;

/// Minimum normalized character count for an answer to be graded
pub const MIN_ANSWER_CHARS: usize = 5;

/// Boilerplate non-answers rejected regardless of exercise
///
/// Whole-string matches against the normalized text only; partial matches
/// never fire, so a real answer that happens to contain "unknown" survives.
const DEFAULT_BLACKLIST: &[&str] = &[
    "i don't know",
    "i dont know",
    "i do not know",
    "idk",
    "dunno",
    "no idea",
    "not sure",
    "unsure",
    "unknown",
    "nothing",
    "none",
    "n/a",
    "help",
    "skip",
    "pass",
    "test",
    "testing",
    "random",
    "asdf",
    "asdfgh",
    "qwerty",
];

/// Why the filter rejected an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooShort,
    NonAnswer,
    RepeatedChars,
}

impl RejectReason {
    /// Stable machine-readable reason string
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::TooShort => "too short",
            RejectReason::NonAnswer => "non-answer",
            RejectReason::RepeatedChars => "repeated characters",
        }
    }

    /// Learner-facing guidance for this rejection
    pub fn guidance(&self) -> &'static str {
        match self {
            RejectReason::TooShort => {
                "describe the vulnerability in at least a short sentence"
            }
            RejectReason::NonAnswer => {
                "a placeholder answer cannot be graded; explain what you found"
            }
            RejectReason::RepeatedChars => {
                "explain the issue in your own words rather than filler text"
            }
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-pipeline guard for degenerate submissions
///
/// Every rule requires the whole string to be degenerate; an answer a tier
/// could accept is never filtered out.
#[derive(Debug, Clone)]
pub struct InvalidAnswerFilter {
    blacklist: FxHashSet<String>,
    min_chars: usize,
}

impl InvalidAnswerFilter {
    /// Filter with the default blacklist and length floor
    pub fn new() -> Self {
        Self {
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
            min_chars: MIN_ANSWER_CHARS,
        }
    }

    /// Add extra blacklisted phrases (compared against normalized text)
    pub fn with_blacklisted<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            self.blacklist
                .insert(crate::normalize::normalize(entry.as_ref()).text);
        }
        self
    }

    /// Override the minimum character count
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Check an answer; `Some(reason)` means reject before any tier runs
    ///
    /// Rules apply in order, first hit wins:
    /// 1. normalized length below the floor
    /// 2. blacklisted boilerplate or bare numerics
    /// 3. a single character repeated across the whole string
    pub fn check(&self, answer: &NormalizedAnswer) -> Option<RejectReason> {
        if answer.length < self.min_chars {
            return Some(RejectReason::TooShort);
        }

        if self.blacklist.contains(&answer.text) || is_bare_numeric(&answer.text) {
            return Some(RejectReason::NonAnswer);
        }

        if is_repeated_char(&answer.text) {
            return Some(RejectReason::RepeatedChars);
        }

        None
    }
}

impl Default for InvalidAnswerFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Digits (and spaces) only, e.g. "123" or "12 34"
fn is_bare_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

/// One distinct non-space character across the entire string, e.g. "aaaaa"
fn is_repeated_char(text: &str) -> bool {
    let mut chars = text.chars().filter(|c| *c != ' ');
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}
