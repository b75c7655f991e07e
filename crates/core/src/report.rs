// Copyright 2026 Langbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Single-language benchmark report types.
//!
//! A [`BenchmarkReport`] is written by one language runner and read back by
//! the comparator. Producers are not uniform: the runtime version arrives
//! under language-specific field names, optional fields may be `null`, and
//! some runtimes write integers as floats. The types here absorb those
//! differences at deserialization time so the rest of the crate sees one
//! shape.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Legacy version fields, checked in order when `version` is empty.
///
/// C and C++ runners report the compiler version under `compiler`.
pub const LEGACY_VERSION_FIELDS: &[&str] = &[
    "go_version",
    "php_version",
    "python_version",
    "node_version",
    "rust_version",
    "java_version",
    "jvm_version",
    "kotlin_version",
    "dotnet_version",
    "swift_version",
    "ruby_version",
    "runtime_version",
    "compiler",
];

/// Host information recorded by the producing runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    /// Operating system name.
    pub os: String,
    /// CPU architecture.
    pub arch: String,
    /// Logical CPU count.
    pub cpus: u32,
}

/// One measured test from a single language run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Test name, the join key across languages.
    pub test: String,
    /// Duration in nanoseconds. Negative means the measurement is unavailable.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub duration_ns: i64,
    /// Memory used in bytes.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub memory_bytes: i64,
    /// Number of operations performed.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub operations: i64,
    /// Operations per second.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ops_per_sec: f64,
    /// Failure message; empty on success.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub error: String,
}

impl BenchmarkResult {
    /// Create a successful result.
    pub fn new(test: impl Into<String>, duration_ns: i64) -> Self {
        Self {
            test: test.into(),
            duration_ns,
            ..Self::default()
        }
    }

    /// Create a result for a test that failed with `error`.
    pub fn failed(test: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            duration_ns: -1,
            error: error.into(),
            ..Self::default()
        }
    }

    /// Set memory usage.
    pub fn with_memory(mut self, memory_bytes: i64) -> Self {
        self.memory_bytes = memory_bytes;
        self
    }

    /// Set operation count and throughput.
    pub fn with_operations(mut self, operations: i64, ops_per_sec: f64) -> Self {
        self.operations = operations;
        self.ops_per_sec = ops_per_sec;
        self
    }

    /// Whether the numeric fields of this result must be ignored.
    pub fn is_unavailable(&self) -> bool {
        !self.error.is_empty() || self.duration_ns < 0
    }
}

/// Complete benchmark output of one language runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Language key, used verbatim.
    pub language: String,
    /// Producer-local timestamp, informational only.
    #[serde(default)]
    pub timestamp: String,
    /// Runtime version under its primary name.
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Host information.
    #[serde(default)]
    pub system: SystemInfo,
    /// Results in the order the runner produced them.
    #[serde(default)]
    pub tests: Vec<BenchmarkResult>,
    /// Wall-clock time of the whole run.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_time_seconds: f64,
    /// Fields this schema does not name, including legacy version fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl BenchmarkReport {
    /// Create an empty report for `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Append a test result.
    pub fn with_test(mut self, result: BenchmarkResult) -> Self {
        self.tests.push(result);
        self
    }

    /// Set the total run time.
    pub fn with_total_time(mut self, seconds: f64) -> Self {
        self.total_time_seconds = seconds;
        self
    }

    /// First result named `test`.
    ///
    /// Later entries with the same name are ignored.
    pub fn find_test(&self, test: &str) -> Option<&BenchmarkResult> {
        self.tests.iter().find(|result| result.test == test)
    }

    /// Runtime version, falling back to legacy field names.
    pub fn effective_version(&self) -> &str {
        if !self.version.is_empty() {
            return &self.version;
        }

        LEGACY_VERSION_FIELDS
            .iter()
            .find_map(|field| self.extra_string(field))
            .or_else(|| {
                self.extra
                    .iter()
                    .filter(|(key, _)| key.ends_with("_version"))
                    .find_map(|(key, _)| self.extra_string(key))
            })
            .unwrap_or("")
    }

    fn extra_string(&self, key: &str) -> Option<&str> {
        match self.extra.get(key) {
            Some(serde_json::Value::String(value)) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number
        .and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)))
        .unwrap_or(0))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| n.as_f64()).unwrap_or(0.0))
}
