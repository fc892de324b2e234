//! Match-history analysis and catalog-addition recommendations.
//!
//! The analyzer wraps a matcher, keeps a bounded buffer of raw inputs, and
//! flags inputs that keep coming back without a good answer. A flagged
//! input comes with a drafted (pattern, response) pair for a human to
//! review; the analyzer never edits the catalog itself.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use crate::matcher::ResponseMatcher;
use crate::monitor::{ProcessMemoryMonitor, ResourceMonitor};
use crate::normalize::normalize;
use crate::suggestions::suggest_addition;
use crate::types::{HistoryStats, PatternAnalysis};

/// Default bound on the history buffer.
const DEFAULT_MAX_HISTORY: usize = 1000;
/// A match at or below this confidence counts as a weak answer.
const LOW_CONFIDENCE_CEILING: f64 = 0.6;
/// Recommendations require the confidence to be strictly below this.
const RECOMMEND_CONFIDENCE_CAP: f64 = 0.4;
/// Normalized inputs shorter than this are too thin to become patterns.
const MIN_PATTERN_CHARS: usize = 3;
/// How many times an input must have been seen before the current call.
const MIN_PRIOR_OCCURRENCES: usize = 2;

/// Observes match traffic and recommends catalog additions.
pub struct PatternAnalyzer {
    matcher: Arc<ResponseMatcher>,
    monitor: Arc<dyn ResourceMonitor>,
    history: Mutex<VecDeque<String>>,
    max_history: usize,
}

impl PatternAnalyzer {
    /// Creates an analyzer over `matcher` guarded by the process memory
    /// monitor.
    pub fn new(matcher: Arc<ResponseMatcher>) -> Self {
        Self::with_monitor(matcher, Arc::new(ProcessMemoryMonitor::new()))
    }

    /// Creates an analyzer with an explicit memory-pressure signal.
    pub fn with_monitor(matcher: Arc<ResponseMatcher>, monitor: Arc<dyn ResourceMonitor>) -> Self {
        Self {
            matcher,
            monitor,
            history: Mutex::new(VecDeque::new()),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }

    /// Sets the history buffer bound.
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    /// Matches `input` against the catalog and records it into history.
    ///
    /// The recommendation flag goes up only for inputs that (a) missed or
    /// matched weakly, (b) are at least three characters once normalized,
    /// (c) had already been recorded at least twice before this call, and
    /// (d) scored below 0.4. Counting only prior occurrences means the
    /// third identical call is the first that can recommend.
    pub fn analyze(&self, input: &str) -> PatternAnalysis {
        if self.monitor.is_memory_critical() {
            let mut history = self.history.lock().expect("history lock");
            if !history.is_empty() {
                tracing::warn!(
                    dropped = history.len(),
                    "memory pressure critical, clearing input history"
                );
                history.clear();
            }
        }

        let result = self.matcher.find_best_match(input);
        let normalized = normalize(input);

        let prior_occurrences = {
            let mut history = self.history.lock().expect("history lock");
            let prior = history
                .iter()
                .filter(|entry| normalize(entry) == normalized)
                .count();
            history.push_back(input.to_string());
            if history.len() > self.max_history {
                let keep = self.max_history * 4 / 5;
                let excess = history.len() - keep;
                history.drain(..excess);
                tracing::debug!(dropped = excess, kept = keep, "history buffer trimmed");
            }
            prior
        };

        let weak_answer = !result.is_match() || result.confidence <= LOW_CONFIDENCE_CEILING;
        let recommended_addition = weak_answer
            && normalized.chars().count() >= MIN_PATTERN_CHARS
            && prior_occurrences >= MIN_PRIOR_OCCURRENCES
            && result.confidence < RECOMMEND_CONFIDENCE_CAP;

        let (recommended_pattern, recommended_response) = if recommended_addition {
            let (pattern, response) = suggest_addition(input, &normalized);
            (Some(pattern), Some(response))
        } else {
            (None, None)
        };

        PatternAnalysis {
            input: input.to_string(),
            matched: result.is_match(),
            confidence: result.confidence,
            matched_key: result.matched_key,
            recommended_addition,
            recommended_pattern,
            recommended_response,
        }
    }

    /// A copy of the buffered raw inputs, oldest first.
    pub fn get_history(&self) -> Vec<String> {
        self.history
            .lock()
            .expect("history lock")
            .iter()
            .cloned()
            .collect()
    }

    /// Empties the history buffer.
    pub fn clear_history(&self) {
        self.history.lock().expect("history lock").clear();
    }

    /// Size and shape of the current buffer.
    pub fn history_stats(&self) -> HistoryStats {
        let history = self.history.lock().expect("history lock");
        let total_entries = history.len();
        let unique_entries = history
            .iter()
            .map(|entry| normalize(entry))
            .collect::<HashSet<_>>()
            .len();
        let average_length = if total_entries == 0 {
            0.0
        } else {
            let chars: usize = history.iter().map(|entry| entry.chars().count()).sum();
            chars as f64 / total_entries as f64
        };
        HistoryStats {
            total_entries,
            unique_entries,
            average_length,
        }
    }

    /// Normalized inputs buffered at least `min_count` times, with their
    /// counts, most frequent first.
    pub fn frequent_inputs(&self, min_count: usize) -> Vec<(String, usize)> {
        let history = self.history.lock().expect("history lock");
        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in history.iter() {
            *counts.entry(normalize(entry)).or_insert(0) += 1;
        }
        let mut frequent: Vec<(String, usize)> = counts
            .into_iter()
            .filter(|(_, count)| *count >= min_count)
            .collect();
        frequent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        frequent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResponseCatalog;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Deterministic stand-in for the process memory signal.
    struct FlaggedMonitor {
        critical: AtomicBool,
    }

    impl FlaggedMonitor {
        fn new() -> Self {
            Self {
                critical: AtomicBool::new(false),
            }
        }

        fn set_critical(&self, critical: bool) {
            self.critical.store(critical, Ordering::Relaxed);
        }
    }

    impl ResourceMonitor for FlaggedMonitor {
        fn is_memory_critical(&self) -> bool {
            self.critical.load(Ordering::Relaxed)
        }
    }

    fn greeting_matcher() -> Arc<ResponseMatcher> {
        Arc::new(ResponseMatcher::new(ResponseCatalog::from_entries([(
            "hello",
            "Hi there!",
        )])))
    }

    fn quiet_analyzer() -> PatternAnalyzer {
        PatternAnalyzer::with_monitor(greeting_matcher(), Arc::new(FlaggedMonitor::new()))
    }

    #[test]
    fn test_third_identical_call_recommends() {
        let analyzer = quiet_analyzer();
        let input = "purple monkey dishwasher";

        assert!(!analyzer.analyze(input).recommended_addition);
        assert!(!analyzer.analyze(input).recommended_addition);

        let third = analyzer.analyze(input);
        assert!(third.recommended_addition);
        assert_eq!(third.recommended_pattern.as_deref(), Some(input));
        assert!(third
            .recommended_response
            .as_deref()
            .unwrap()
            .contains("purple monkey dishwasher"));
    }

    #[test]
    fn test_matched_input_never_recommends() {
        let analyzer = quiet_analyzer();
        for _ in 0..4 {
            let analysis = analyzer.analyze("hello");
            assert!(analysis.matched);
            assert_eq!(analysis.confidence, 1.0);
            assert!(!analysis.recommended_addition);
        }
    }

    #[test]
    fn test_short_input_never_recommends() {
        let analyzer = quiet_analyzer();
        for _ in 0..4 {
            assert!(!analyzer.analyze("zq").recommended_addition);
        }
    }

    #[test]
    fn test_case_and_whitespace_variants_count_together() {
        let analyzer = quiet_analyzer();
        assert!(!analyzer.analyze("purple monkey dishwasher").recommended_addition);
        assert!(!analyzer.analyze("  PURPLE   monkey DISHWASHER ").recommended_addition);
        assert!(analyzer.analyze("Purple Monkey Dishwasher").recommended_addition);
    }

    #[test]
    fn test_keyword_rules_shape_the_suggestion() {
        let analyzer = quiet_analyzer();
        let input = "tell me a good joke";
        analyzer.analyze(input);
        analyzer.analyze(input);
        let third = analyzer.analyze(input);

        assert!(third.recommended_addition);
        assert_eq!(third.recommended_pattern.as_deref(), Some("tell me a joke"));
        assert!(third.recommended_response.as_deref().unwrap().contains("chatbot"));
    }

    #[test]
    fn test_memory_pressure_clears_history() {
        let monitor = Arc::new(FlaggedMonitor::new());
        let analyzer = PatternAnalyzer::with_monitor(greeting_matcher(), monitor.clone());

        analyzer.analyze("first input");
        analyzer.analyze("second input");
        assert_eq!(analyzer.get_history().len(), 2);

        monitor.set_critical(true);
        analyzer.analyze("third input");

        // The clear runs before the current input is recorded.
        assert_eq!(analyzer.get_history(), vec!["third input"]);
    }

    #[test]
    fn test_memory_pressure_resets_recommendation_counting() {
        let monitor = Arc::new(FlaggedMonitor::new());
        let analyzer = PatternAnalyzer::with_monitor(greeting_matcher(), monitor.clone());
        let input = "purple monkey dishwasher";

        analyzer.analyze(input);
        analyzer.analyze(input);
        monitor.set_critical(true);

        // History was wiped, so the streak starts over.
        assert!(!analyzer.analyze(input).recommended_addition);
    }

    #[test]
    fn test_history_bound_trims_in_batch() {
        let analyzer = quiet_analyzer().with_max_history(10);
        for i in 1..=10 {
            analyzer.analyze(&format!("input number {i}"));
        }
        assert_eq!(analyzer.get_history().len(), 10);

        // The 11th entry breaches the bound; the buffer drops to 80%.
        analyzer.analyze("input number 11");
        let history = analyzer.get_history();
        assert_eq!(history.len(), 8);
        assert_eq!(history.first().map(String::as_str), Some("input number 4"));
        assert_eq!(history.last().map(String::as_str), Some("input number 11"));
    }

    #[test]
    fn test_get_history_is_a_copy() {
        let analyzer = quiet_analyzer();
        analyzer.analyze("only entry");

        let mut copy = analyzer.get_history();
        copy.push("tampered".to_string());
        assert_eq!(analyzer.get_history(), vec!["only entry"]);
    }

    #[test]
    fn test_clear_history() {
        let analyzer = quiet_analyzer();
        analyzer.analyze("something");
        analyzer.clear_history();
        assert!(analyzer.get_history().is_empty());
    }

    #[test]
    fn test_history_stats() {
        let analyzer = quiet_analyzer();
        analyzer.analyze("Hello");
        analyzer.analyze("HELLO");
        analyzer.analyze("bye");

        let stats = analyzer.history_stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.unique_entries, 2);
        assert!((stats.average_length - 13.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequent_inputs_orders_by_count() {
        let analyzer = quiet_analyzer();
        for _ in 0..3 {
            analyzer.analyze("purple monkey dishwasher");
        }
        for _ in 0..2 {
            analyzer.analyze("zebra quilt");
        }
        analyzer.analyze("once only");

        let frequent = analyzer.frequent_inputs(2);
        assert_eq!(
            frequent,
            vec![
                ("purple monkey dishwasher".to_string(), 3),
                ("zebra quilt".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_recorded_but_never_recommended() {
        let analyzer = quiet_analyzer();
        for _ in 0..4 {
            let analysis = analyzer.analyze("");
            assert!(!analysis.matched);
            assert_eq!(analysis.confidence, 0.0);
            assert!(!analysis.recommended_addition);
        }
        assert_eq!(analyzer.get_history().len(), 4);
    }
}
