//! The response matcher: scans the catalog for the key most similar to the
//! input and applies the configured confidence threshold.
//!
//! All operations are total. The match path never returns an error: bad
//! input degrades to a no-match result, an over-budget scan returns the
//! best candidate seen so far. Mutations (catalog merges, config updates)
//! serialize behind write locks while lookups share read access.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::catalog::ResponseCatalog;
use crate::config::{MatcherConfig, MatcherConfigUpdate, MatcherProfile};
use crate::normalize::normalize;
use crate::responses::default_responses;
use crate::similarity;
use crate::types::{MatchResult, MatcherStats};

/// Fuzzy matcher over a catalog of canned responses.
///
/// The catalog is injected at construction; there is no ambient default
/// instance. Shared use across threads needs no external locking.
#[derive(Debug)]
pub struct ResponseMatcher {
    catalog: RwLock<ResponseCatalog>,
    config: RwLock<MatcherConfig>,
    total_queries: AtomicU64,
    total_comparisons: AtomicU64,
    timed_out_scans: AtomicU64,
}

impl ResponseMatcher {
    /// Creates a matcher over `catalog` with the default configuration.
    pub fn new(catalog: ResponseCatalog) -> Self {
        Self::with_config(catalog, MatcherConfig::default())
    }

    /// Creates a matcher with an explicit configuration.
    pub fn with_config(catalog: ResponseCatalog, config: MatcherConfig) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            config: RwLock::new(config.sanitized()),
            total_queries: AtomicU64::new(0),
            total_comparisons: AtomicU64::new(0),
            timed_out_scans: AtomicU64::new(0),
        }
    }

    /// Creates a matcher tuned by a preset profile.
    pub fn with_profile(catalog: ResponseCatalog, profile: MatcherProfile) -> Self {
        Self::with_config(catalog, profile.config())
    }

    /// Creates a matcher preloaded with the built-in response catalog.
    pub fn with_default_responses() -> Self {
        Self::new(default_responses())
    }

    /// Finds the catalog entry most similar to `input`.
    ///
    /// Total over any string. Empty (or whitespace-only) input returns a
    /// zero-confidence miss without touching the catalog. A best score
    /// below the threshold returns a miss that still carries the score.
    /// Ties go to the earliest-inserted key.
    pub fn find_best_match(&self, input: &str) -> MatchResult {
        self.total_queries.fetch_add(1, Ordering::Relaxed);

        let config = self.config.read().expect("config lock").clone();
        let normalized = normalize(truncate_chars(input, config.max_input_length));
        if normalized.is_empty() {
            return MatchResult::none(0.0);
        }

        let catalog = self.catalog.read().expect("catalog lock");
        let deadline = Instant::now() + Duration::from_millis(config.max_processing_time_ms);

        let mut best_entry: Option<(&str, &str)> = None;
        let mut best_score = 0.0_f64;
        let mut comparisons = 0_u64;
        let mut timed_out = false;

        for (key, response) in catalog.iter() {
            comparisons += 1;
            let score = similarity::score(&normalized, key);
            // Strictly greater, so an earlier key keeps a tied score.
            if score > best_score {
                best_score = score;
                best_entry = Some((key, response));
                if score >= 1.0 {
                    break;
                }
            }
            if Instant::now() >= deadline {
                timed_out = true;
                break;
            }
        }

        self.total_comparisons.fetch_add(comparisons, Ordering::Relaxed);
        if timed_out {
            self.timed_out_scans.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                budget_ms = config.max_processing_time_ms,
                scanned = comparisons,
                "catalog scan hit its time budget, returning partial best"
            );
        }

        match best_entry {
            Some((key, response)) if best_score >= config.confidence_threshold => {
                MatchResult::matched(key, response, best_score)
            }
            _ => MatchResult::none(best_score),
        }
    }

    /// Merges `entries` into the catalog. Keys are normalized; an existing
    /// key keeps its scan position and gets the new response.
    pub fn add_responses<I, K, V>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut catalog = self.catalog.write().expect("catalog lock");
        catalog.merge(entries);
        tracing::debug!(catalog_size = catalog.len(), "catalog additions merged");
    }

    /// Snapshot of the current configuration.
    pub fn get_config(&self) -> MatcherConfig {
        self.config.read().expect("config lock").clone()
    }

    /// Applies a partial configuration update and returns the new
    /// configuration. Fields not set in `update` keep their values.
    pub fn update_config(&self, update: MatcherConfigUpdate) -> MatcherConfig {
        let mut config = self.config.write().expect("config lock");
        let merged = update.apply_to(&config);
        *config = merged;
        tracing::debug!(
            confidence_threshold = config.confidence_threshold,
            max_processing_time_ms = config.max_processing_time_ms,
            max_input_length = config.max_input_length,
            "matcher configuration updated"
        );
        config.clone()
    }

    /// Number of catalog entries.
    pub fn catalog_size(&self) -> usize {
        self.catalog.read().expect("catalog lock").len()
    }

    /// Activity counters since construction.
    pub fn stats(&self) -> MatcherStats {
        MatcherStats {
            catalog_size: self.catalog_size(),
            total_queries: self.total_queries.load(Ordering::Relaxed),
            total_comparisons: self.total_comparisons.load(Ordering::Relaxed),
            timed_out_scans: self.timed_out_scans.load(Ordering::Relaxed),
        }
    }
}

/// Truncates to at most `max_chars` characters without splitting a
/// code point.
fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &input[..byte_index],
        None => input,
    }
}
