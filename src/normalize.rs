// SEC-GRADE Text Normalizer
// Canonicalizes raw answers into a comparable form

use crate::types::NormalizedAnswer;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Answers are truncated to this many characters before any other
/// processing; longer input never reaches the matchers.
pub const MAX_ANSWER_CHARS: usize = 2000;

/// Normalize a raw answer string into a [`NormalizedAnswer`]
///
/// Applied in order:
/// 1. Truncate to [`MAX_ANSWER_CHARS`] characters
/// 2. Unicode NFD decomposition, then strip combining marks (accent folding)
/// 3. Lowercase
/// 4. Replace commas with spaces, collapse whitespace runs, trim
/// 5. Strip terminal `.` / `!` / `?` runs
///
/// Payload symbols that carry meaning in technical answers (quotes,
/// semicolons, parentheses, angle brackets, shell operators, mid-token
/// periods) are preserved so pattern matching can see them.
///
/// Never fails; empty input yields an empty answer with `length == 0`.
///
/// # Examples
/// ```
/// # use secgrade::normalize::normalize;
/// let n = normalize("  Authentication   Bypass!  ");
/// assert_eq!(n.text, "authentication bypass");
/// assert_eq!(n.tokens, vec!["authentication", "bypass"]);
///
/// let n = normalize("'; DROP TABLE users--");
/// assert!(n.text.contains("';"));
/// ```
pub fn normalize(raw: &str) -> NormalizedAnswer {
    let bounded: String = raw.chars().take(MAX_ANSWER_CHARS).collect();

    // Accent folding: NFD then drop combining marks, so "café" == "cafe"
    let folded: String = bounded
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    // Commas separate clauses, never payload syntax worth keeping
    let despaced: String = folded
        .chars()
        .map(|c| if c == ',' || c.is_whitespace() { ' ' } else { c })
        .collect();

    let collapsed = despaced.split_whitespace().collect::<Vec<_>>().join(" ");

    // Terminal sentence punctuation carries no semantic weight
    let text = collapsed
        .trim_end_matches(['.', '!', '?'])
        .trim_end()
        .to_string();

    let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    let length = text.chars().count();

    NormalizedAnswer {
        text,
        tokens,
        length,
    }
}
