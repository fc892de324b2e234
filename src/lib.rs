//! # Intent Matcher Plugin
//!
//! Maps free-form user text to canned conversational responses with fuzzy
//! string matching. No LLM, no network, no persistence: one catalog of
//! pattern → response entries, a similarity score that tolerates typos, and
//! an analyzer that watches match history and drafts catalog additions for
//! the inputs it keeps failing on.
//!
//! ## Features
//!
//! - Typo-tolerant matching (edit distance blended with token overlap)
//! - Insertion-ordered catalog with deterministic tie-breaking
//! - Soft per-query time budget; over-budget scans return a partial best
//! - Bounded match-history analysis with human-reviewable suggestions
//! - Memory-pressure guard behind an injectable capability trait
//!
//! ## Example
//!
//! ```rust
//! use elizaos_plugin_intent_matcher::{PatternAnalyzer, ResponseMatcher};
//! use std::sync::Arc;
//!
//! let matcher = Arc::new(ResponseMatcher::with_default_responses());
//!
//! let result = matcher.find_best_match("hullo");
//! assert_eq!(result.matched_key.as_deref(), Some("hello"));
//!
//! let analyzer = PatternAnalyzer::new(matcher);
//! let analysis = analyzer.analyze("do you like trains");
//! println!("matched={} confidence={:.2}", analysis.matched, analysis.confidence);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod monitor;
pub mod normalize;
pub mod responses;
pub mod similarity;
pub mod suggestions;
pub mod types;

// Re-export main types
pub use analyzer::PatternAnalyzer;
pub use catalog::ResponseCatalog;
pub use config::{MatcherConfig, MatcherConfigUpdate, MatcherProfile};
pub use error::{MatcherError, Result};
pub use matcher::ResponseMatcher;
pub use monitor::{NoopMonitor, ProcessMemoryMonitor, ResourceMonitor};
pub use normalize::normalize;
pub use responses::default_responses;
pub use types::{HistoryStats, MatchResult, MatcherStats, PatternAnalysis};

/// Plugin metadata
pub const PLUGIN_NAME: &str = "intent-matcher";
/// Plugin description
pub const PLUGIN_DESCRIPTION: &str =
    "Fuzzy intent matching over a catalog of canned responses, with history-driven suggestions";
/// Plugin version
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_plugin_metadata() {
        assert_eq!(PLUGIN_NAME, "intent-matcher");
        assert!(!PLUGIN_DESCRIPTION.is_empty());
        assert!(!PLUGIN_VERSION.is_empty());
    }

    #[test]
    fn test_default_matcher_answers_greetings() {
        let matcher = ResponseMatcher::with_default_responses();
        let result = matcher.find_best_match("Hello");
        assert!(result.is_match());
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_public_surface_wires_together() {
        let matcher = Arc::new(ResponseMatcher::with_profile(
            default_responses(),
            MatcherProfile::Balanced,
        ));
        let analyzer = PatternAnalyzer::with_monitor(matcher.clone(), Arc::new(NoopMonitor));

        let analysis = analyzer.analyze("whut is yor name");
        assert!(analysis.matched);
        assert!(analysis.confidence > 0.6);
        assert_eq!(analyzer.get_history().len(), 1);
        assert_eq!(matcher.stats().total_queries, 1);
    }
}
