//! Input normalization shared by matching and history analysis.
//!
//! Matching quality depends on both sides of a comparison being in the same
//! canonical form, so catalog keys and user input go through the same
//! function. Normalization is deliberately shallow: lowercase, trim, and
//! collapse whitespace runs. No stemming, no punctuation stripping.

/// Produces the canonical form of `input`: lowercased, trimmed, with every
/// internal whitespace run collapsed to a single space.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
