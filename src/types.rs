//! Core types for match results and history analysis.

use serde::{Deserialize, Serialize};

/// Outcome of a single catalog match attempt.
///
/// "No match" is a normal outcome, not an error: `matched_key` and
/// `response` are `None` while `confidence` still reports the best score
/// the scan saw, so callers can log near-misses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    /// Catalog key that won the scan, if any cleared the threshold.
    pub matched_key: Option<String>,
    /// Response text for the winning key.
    pub response: Option<String>,
    /// Best similarity seen during the scan, in `[0, 1]`.
    pub confidence: f64,
}

impl MatchResult {
    /// A successful match.
    pub fn matched(key: impl Into<String>, response: impl Into<String>, confidence: f64) -> Self {
        Self {
            matched_key: Some(key.into()),
            response: Some(response.into()),
            confidence,
        }
    }

    /// A miss, still reporting the best confidence the scan produced.
    pub fn none(confidence: f64) -> Self {
        Self {
            matched_key: None,
            response: None,
            confidence,
        }
    }

    /// Whether the scan produced a usable response.
    pub fn is_match(&self) -> bool {
        self.matched_key.is_some()
    }
}

/// Result of analyzing one input against the catalog and recent history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternAnalysis {
    /// The raw input as the caller supplied it.
    pub input: String,
    /// Whether the catalog produced a match.
    pub matched: bool,
    /// Confidence of the underlying match attempt.
    pub confidence: f64,
    /// The catalog key that matched, if any.
    pub matched_key: Option<String>,
    /// True when this input has been seen repeatedly without a good answer
    /// and a catalog addition is worth a human look.
    pub recommended_addition: bool,
    /// Suggested catalog key for the addition.
    pub recommended_pattern: Option<String>,
    /// Suggested response for the addition.
    pub recommended_response: Option<String>,
}

/// Counters describing matcher activity since construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatcherStats {
    /// Number of entries currently in the catalog.
    pub catalog_size: usize,
    /// Total `find_best_match` calls, including empty-input fast paths.
    pub total_queries: u64,
    /// Total key comparisons performed by the similarity engine. Does not
    /// advance on the empty-input fast path.
    pub total_comparisons: u64,
    /// Scans that hit the soft time budget and returned a partial best.
    pub timed_out_scans: u64,
}

/// Summary of the analyzer's history buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Entries currently buffered.
    pub total_entries: usize,
    /// Distinct normalized entries currently buffered.
    pub unique_entries: usize,
    /// Mean character length of buffered raw entries.
    pub average_length: f64,
}
