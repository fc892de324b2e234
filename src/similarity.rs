//! Pairwise similarity scoring for normalized text.
//!
//! The score blends two signals: normalized Damerau-Levenshtein distance over
//! the full strings, and a fuzzy token-overlap ratio over content words.
//! Character distance carries typos; token overlap carries reordering and
//! keeps phrases that share only function words ("what is the ...") from
//! looking related. Weights are tuned against the matcher's acceptance
//! bounds: small typos stay above 0.6, unrelated phrases stay below 0.3.

use strsim::normalized_damerau_levenshtein;

/// Weight of the character-level distance signal.
const CHAR_WEIGHT: f64 = 0.45;
/// Weight of the token-overlap signal.
const TOKEN_WEIGHT: f64 = 0.55;
/// Minimum per-token similarity for two tokens to count as a pair.
/// Below this, token resemblance is treated as coincidence.
const TOKEN_MATCH_FLOOR: f64 = 0.72;
/// Character similarity above which the char signal alone can carry the
/// score, covering missing/extra-space typos that break tokenization.
const CHAR_RESCUE_FLOOR: f64 = 0.55;
/// Slope of the char-only rescue term.
const CHAR_RESCUE_SLOPE: f64 = 2.2;
/// Tokens shorter than this are noise ("s" left over from "what's").
const MIN_TOKEN_LEN: usize = 2;

/// Function words carry no intent on their own. Filtering them keeps
/// question scaffolding ("what is the ...") from inflating overlap between
/// unrelated phrases. Greetings are deliberately absent: they are catalog
/// content in this domain, not filler.
const STOP_WORDS: &[&str] = &[
    // pronouns
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your",
    "yours", "he", "him", "his", "she", "her", "hers", "it", "its", "they",
    "them", "their", "theirs",
    // copulas and auxiliaries
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does",
    "did", "have", "has", "had", "will", "would", "can", "could", "should",
    "shall", "may", "might", "must",
    // question words
    "what", "whats", "which", "who", "whos", "whom", "whose", "when",
    "where", "why", "how",
    // articles and demonstratives
    "a", "an", "the", "this", "that", "these", "those", "there", "here",
    // prepositions and connectives
    "to", "of", "in", "on", "at", "by", "for", "with", "from", "about",
    "into", "and", "or", "but", "if", "then", "else", "as", "so", "not",
    "no", "nor",
    // intensifiers and politeness
    "just", "very", "too", "some", "any", "please",
];

/// Scores the similarity of two normalized strings in `[0.0, 1.0]`.
///
/// Symmetric, and `1.0` exactly when the strings are equal. A score against
/// the empty string is `0.0`. Cost is O(n*m) in the string lengths.
pub fn score(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let char_sim = normalized_damerau_levenshtein(a, b);
    let token_sim = token_overlap(a, b);

    let blended = CHAR_WEIGHT * char_sim + TOKEN_WEIGHT * token_sim;
    // Near-identical character forms (missing or extra space) can have zero
    // token overlap; let the character signal carry those on its own.
    let char_dominant = CHAR_RESCUE_SLOPE * (char_sim - CHAR_RESCUE_FLOOR).max(0.0);

    blended.max(char_dominant).min(1.0)
}

/// Fuzzy overlap ratio over the content tokens of the two strings.
///
/// Each token is paired with its best counterpart on the other side; pairs
/// below [`TOKEN_MATCH_FLOOR`] count as zero, so typo'd tokens still pair up
/// while coincidental resemblance does not. The ratio is the Dice-style mean
/// of both directions, which keeps it symmetric.
fn token_overlap(a: &str, b: &str) -> f64 {
    let a_all = tokenize(a);
    let b_all = tokenize(b);

    let a_content = content_tokens(&a_all);
    let b_content = content_tokens(&b_all);

    // When either side is nothing but function words, filtered comparison
    // would be comparing against an empty set; fall back to the raw tokens
    // for both sides so phrases like "how are you" stay comparable.
    let (a_tokens, b_tokens) = if a_content.is_empty() || b_content.is_empty() {
        (&a_all, &b_all)
    } else {
        (&a_content, &b_content)
    };

    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }

    let forward: f64 = a_tokens.iter().map(|t| best_pair(t, b_tokens)).sum();
    let backward: f64 = b_tokens.iter().map(|t| best_pair(t, a_tokens)).sum();

    (forward + backward) / (a_tokens.len() + b_tokens.len()) as f64
}

/// Best similarity of `token` against any token in `others`, floored to
/// zero below [`TOKEN_MATCH_FLOOR`].
fn best_pair(token: &str, others: &[String]) -> f64 {
    let best = others
        .iter()
        .map(|other| normalized_damerau_levenshtein(token, other))
        .fold(0.0_f64, f64::max);
    if best >= TOKEN_MATCH_FLOOR {
        best
    } else {
        0.0
    }
}

/// Splits text into alphanumeric runs. Duplicates are kept; order is not
/// significant for scoring.
fn tokenize(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }

    out
}

fn content_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(&t.as_str()))
        .cloned()
        .collect()
}
