//! Matcher configuration, partial updates, and tuning profiles.

use serde::{Deserialize, Serialize};

fn default_confidence_threshold() -> f64 {
    0.65
}

fn default_max_processing_time_ms() -> u64 {
    50
}

fn default_max_input_length() -> usize {
    500
}

/// Runtime configuration for the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    /// Minimum similarity for a scan result to count as a match.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    /// Soft wall-clock budget for one catalog scan. When exceeded, the scan
    /// stops and returns the best candidate seen so far.
    #[serde(default = "default_max_processing_time_ms")]
    pub max_processing_time_ms: u64,
    /// Inputs longer than this many characters are truncated before
    /// matching. Truncation, not rejection: the matcher stays total.
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            max_processing_time_ms: default_max_processing_time_ms(),
            max_input_length: default_max_input_length(),
        }
    }
}

impl MatcherConfig {
    /// Returns a copy with out-of-range values brought back into range.
    ///
    /// The threshold is clamped into `[0, 1]`; a non-finite threshold falls
    /// back to the default. Out-of-range values are accepted rather than
    /// rejected so configuration can never make the matcher fallible.
    pub fn sanitized(&self) -> Self {
        let confidence_threshold = if self.confidence_threshold.is_finite() {
            self.confidence_threshold.clamp(0.0, 1.0)
        } else {
            default_confidence_threshold()
        };
        if confidence_threshold != self.confidence_threshold {
            tracing::debug!(
                requested = self.confidence_threshold,
                applied = confidence_threshold,
                "confidence threshold out of range, clamped"
            );
        }
        Self {
            confidence_threshold,
            max_processing_time_ms: self.max_processing_time_ms,
            max_input_length: self.max_input_length,
        }
    }
}

/// Partial configuration change. Unset fields keep their current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherConfigUpdate {
    /// New confidence threshold, if changing.
    pub confidence_threshold: Option<f64>,
    /// New scan budget in milliseconds, if changing.
    pub max_processing_time_ms: Option<u64>,
    /// New input length cap, if changing.
    pub max_input_length: Option<usize>,
}

impl MatcherConfigUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the confidence threshold.
    pub fn with_confidence_threshold(mut self, value: f64) -> Self {
        self.confidence_threshold = Some(value);
        self
    }

    /// Sets the scan time budget in milliseconds.
    pub fn with_max_processing_time_ms(mut self, value: u64) -> Self {
        self.max_processing_time_ms = Some(value);
        self
    }

    /// Sets the input length cap in characters.
    pub fn with_max_input_length(mut self, value: usize) -> Self {
        self.max_input_length = Some(value);
        self
    }

    /// Merges this update into `current`, sanitizing the result.
    pub fn apply_to(&self, current: &MatcherConfig) -> MatcherConfig {
        MatcherConfig {
            confidence_threshold: self
                .confidence_threshold
                .unwrap_or(current.confidence_threshold),
            max_processing_time_ms: self
                .max_processing_time_ms
                .unwrap_or(current.max_processing_time_ms),
            max_input_length: self.max_input_length.unwrap_or(current.max_input_length),
        }
        .sanitized()
    }
}

/// Preset configurations for common latency/precision trade-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherProfile {
    /// Tight scan budget for latency-sensitive hosts.
    Fast,
    /// The defaults.
    Balanced,
    /// Larger budget and a stricter threshold; fewer wrong answers at the
    /// cost of more misses.
    Accurate,
}

impl MatcherProfile {
    /// The configuration this profile stands for.
    pub fn config(self) -> MatcherConfig {
        match self {
            MatcherProfile::Fast => MatcherConfig {
                max_processing_time_ms: 20,
                ..MatcherConfig::default()
            },
            MatcherProfile::Balanced => MatcherConfig::default(),
            MatcherProfile::Accurate => MatcherConfig {
                confidence_threshold: 0.7,
                max_processing_time_ms: 100,
                ..MatcherConfig::default()
            },
        }
    }
}
