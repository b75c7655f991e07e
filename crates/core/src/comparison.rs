// Copyright 2026 Langbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Cross-language comparison types.
//!
//! A [`Comparison`] is built once from a set of reports and is read-only
//! afterwards. All maps are ordered by language key so that serialized
//! output and rendered reports are stable across runs.

use crate::report::SystemInfo;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-language metadata carried into the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Total run time in seconds.
    pub total_time: f64,
    /// Effective runtime version.
    pub version: String,
    /// Host information from the report.
    pub system: SystemInfo,
}

/// Outcome of one test for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    /// The test ran and produced numbers.
    Measured {
        /// Duration in milliseconds.
        duration_ms: f64,
        /// Memory used in bytes.
        memory_bytes: i64,
        /// Operations per second.
        ops_per_sec: f64,
        /// Duration relative to the fastest language, `None` when undefined.
        speed_ratio: Option<f64>,
    },
    /// The runner could not measure the test.
    Unavailable {
        /// Message reported by the runner, possibly empty.
        #[serde(default)]
        error: String,
    },
}

impl TestOutcome {
    /// Whether this outcome carries measurements.
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured { .. })
    }

    /// Duration in milliseconds, if measured.
    pub fn duration_ms(&self) -> Option<f64> {
        match self {
            Self::Measured { duration_ms, .. } => Some(*duration_ms),
            Self::Unavailable { .. } => None,
        }
    }

    /// Speed ratio, if measured and defined.
    pub fn speed_ratio(&self) -> Option<f64> {
        match self {
            Self::Measured { speed_ratio, .. } => *speed_ratio,
            Self::Unavailable { .. } => None,
        }
    }
}

/// All languages' outcomes for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestComparison {
    /// Test name.
    pub test: String,
    /// Outcome per language; languages without the test are absent.
    pub results: BTreeMap<String, TestOutcome>,
    /// Fastest measured language, `None` if nothing was measured.
    pub fastest: Option<String>,
}

impl TestComparison {
    /// Results ordered for display.
    ///
    /// Measured entries come first by ascending duration, then every
    /// unavailable entry. The sort is stable, so equal entries keep
    /// language key order.
    pub fn ranked_results(&self) -> Vec<(&str, &TestOutcome)> {
        let mut ranked: Vec<(&str, &TestOutcome)> = self
            .results
            .iter()
            .map(|(language, outcome)| (language.as_str(), outcome))
            .collect();

        ranked.sort_by(|(_, a), (_, b)| match (a.duration_ms(), b.duration_ms()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ranked
    }
}

/// Overall ranking by total run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Language with the smallest total time.
    pub fastest_overall: String,
    /// Language with the largest total time.
    pub slowest_overall: String,
    /// Slowest total divided by fastest total; 0 when undefined.
    pub speed_difference: f64,
    /// Total time per language.
    pub total_times: BTreeMap<String, f64>,
}

/// Aggregated comparison of several language reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// When the comparison was generated.
    pub timestamp: DateTime<Local>,
    /// Metadata per language.
    pub languages: BTreeMap<String, LanguageInfo>,
    /// One entry per distinct test name, sorted by name.
    pub test_comparisons: Vec<TestComparison>,
    /// Overall ranking.
    pub summary: Summary,
}

impl Comparison {
    /// Comparison entry for `test`.
    pub fn test(&self, test: &str) -> Option<&TestComparison> {
        self.test_comparisons.iter().find(|entry| entry.test == test)
    }

    /// Languages by ascending total time, ties in key order.
    pub fn ranked_languages(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .summary
            .total_times
            .iter()
            .map(|(language, total)| (language.as_str(), *total))
            .collect();
        ranked.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        ranked
    }

    /// Total time of `language` relative to the fastest overall.
    pub fn overall_ratio(&self, language: &str) -> Option<f64> {
        let fastest = *self.summary.total_times.get(&self.summary.fastest_overall)?;
        let total = *self.summary.total_times.get(language)?;
        (fastest > 0.0).then(|| total / fastest)
    }
}
