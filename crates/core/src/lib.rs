// Copyright 2026 Langbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared data model for langbench.
//!
//! - [`report`] - the per-language report written by each benchmark runner
//! - [`comparison`] - the cross-language comparison built from those reports

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod comparison;
pub mod report;

pub use comparison::{Comparison, LanguageInfo, Summary, TestComparison, TestOutcome};
pub use report::{BenchmarkReport, BenchmarkResult, SystemInfo};
