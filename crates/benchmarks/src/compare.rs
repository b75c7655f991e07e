//! Cross-language comparison engine.
//!
//! [`compare`] merges any number of [`BenchmarkReport`]s into one
//! [`Comparison`]. It performs no I/O and cannot fail: tests a runner could
//! not measure become [`TestOutcome::Unavailable`] entries rather than errors.
//!
//! Ordering is deterministic. Test comparisons are sorted by name, maps are
//! keyed by language, and ties (fastest per test, fastest and slowest
//! overall) go to the language whose report came first in the input.

use chrono::{DateTime, Local};
use langbench_core::{
    BenchmarkReport, Comparison, LanguageInfo, Summary, TestComparison, TestOutcome,
};
use std::collections::{BTreeMap, BTreeSet};

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Compare `reports`, stamping the result with the current time.
///
/// Returns `None` for an empty input.
pub fn compare(reports: &[BenchmarkReport]) -> Option<Comparison> {
    compare_at(reports, Local::now())
}

/// Compare `reports` with an explicit generation time.
pub fn compare_at(
    reports: &[BenchmarkReport],
    generated_at: DateTime<Local>,
) -> Option<Comparison> {
    if reports.is_empty() {
        return None;
    }

    let reports = latest_per_language(reports);

    let languages = reports
        .iter()
        .map(|report| {
            (
                report.language.clone(),
                LanguageInfo {
                    total_time: report.total_time_seconds,
                    version: report.effective_version().to_string(),
                    system: report.system.clone(),
                },
            )
        })
        .collect();

    let test_names: BTreeSet<&str> = reports
        .iter()
        .flat_map(|report| report.tests.iter().map(|result| result.test.as_str()))
        .collect();

    let test_comparisons = test_names
        .into_iter()
        .map(|test| compare_test(test, &reports))
        .collect();

    Some(Comparison {
        timestamp: generated_at,
        languages,
        test_comparisons,
        summary: summarize(&reports),
    })
}

/// Collapse reports sharing a language key.
///
/// The later report replaces the earlier one but keeps its position, so the
/// language's tie-break priority is where it first appeared.
fn latest_per_language(reports: &[BenchmarkReport]) -> Vec<&BenchmarkReport> {
    let mut kept: Vec<&BenchmarkReport> = Vec::with_capacity(reports.len());
    for report in reports {
        match kept.iter_mut().find(|seen| seen.language == report.language) {
            Some(slot) => *slot = report,
            None => kept.push(report),
        }
    }
    kept
}

fn compare_test(test: &str, reports: &[&BenchmarkReport]) -> TestComparison {
    let mut results = BTreeMap::new();
    let mut fastest: Option<(&str, f64)> = None;

    for report in reports {
        let Some(result) = report.find_test(test) else {
            continue;
        };

        if result.is_unavailable() {
            results.insert(
                report.language.clone(),
                TestOutcome::Unavailable {
                    error: result.error.clone(),
                },
            );
            continue;
        }

        let duration_ms = result.duration_ns as f64 / NANOS_PER_MILLI;
        if fastest.map_or(true, |(_, best)| duration_ms < best) {
            fastest = Some((report.language.as_str(), duration_ms));
        }

        results.insert(
            report.language.clone(),
            TestOutcome::Measured {
                duration_ms,
                memory_bytes: result.memory_bytes,
                ops_per_sec: result.ops_per_sec,
                speed_ratio: None,
            },
        );
    }

    if let Some((_, fastest_ms)) = fastest {
        for outcome in results.values_mut() {
            if let TestOutcome::Measured {
                duration_ms,
                speed_ratio,
                ..
            } = outcome
            {
                *speed_ratio = ratio(*duration_ms, fastest_ms);
            }
        }
    }

    TestComparison {
        test: test.to_string(),
        results,
        fastest: fastest.map(|(language, _)| language.to_string()),
    }
}

/// `duration / fastest`, defined as 1.0 when both are zero.
fn ratio(duration_ms: f64, fastest_ms: f64) -> Option<f64> {
    if fastest_ms > 0.0 {
        Some(duration_ms / fastest_ms)
    } else if duration_ms == 0.0 {
        Some(1.0)
    } else {
        None
    }
}

fn summarize(reports: &[&BenchmarkReport]) -> Summary {
    let mut fastest: Option<(&str, f64)> = None;
    let mut slowest: Option<(&str, f64)> = None;

    for report in reports {
        let total = report.total_time_seconds;
        if fastest.map_or(true, |(_, best)| total < best) {
            fastest = Some((report.language.as_str(), total));
        }
        if slowest.map_or(true, |(_, worst)| total > worst) {
            slowest = Some((report.language.as_str(), total));
        }
    }

    let speed_difference = match (fastest, slowest) {
        (Some((_, min)), Some((_, max))) if min > 0.0 => max / min,
        _ => 0.0,
    };

    Summary {
        fastest_overall: fastest.map(|(language, _)| language.to_string()).unwrap_or_default(),
        slowest_overall: slowest.map(|(language, _)| language.to_string()).unwrap_or_default(),
        speed_difference,
        total_times: reports
            .iter()
            .map(|report| (report.language.clone(), report.total_time_seconds))
            .collect(),
    }
}
