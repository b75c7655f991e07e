//! Cross-language benchmark comparison for langbench.
//!
//! Every language runner writes its own JSON report. This crate finds the
//! newest report per language, merges them into one [`Comparison`], renders
//! it for the console or as Markdown, and persists it as a JSON artifact.
//!
//! # Quick Start
//!
//! ```no_run
//! use langbench_benchmarks::{compare, discover, load_reports, write_comparison, LoaderConfig};
//!
//! let config = LoaderConfig::new("..");
//! let files = discover(&config)?;
//! let outcome = load_reports(files.iter().map(|file| &file.path));
//!
//! if let Some(comparison) = compare(&outcome.reports) {
//!     let path = write_comparison(&comparison, "..")?;
//!     println!("saved {}", path.display());
//! }
//! # Ok::<(), langbench_benchmarks::BenchError>(())
//! ```
//!
//! # Modules
//!
//! - [`loader`] - report discovery and parsing
//! - [`compare`] - the aggregation engine
//! - [`console`] - human-readable rendering
//! - [`markdown`] - Markdown report generation
//! - [`io`] - reading and writing comparison artifacts
//! - [`settings`] - layered configuration

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod compare;
pub mod console;
pub mod error;
pub mod io;
pub mod loader;
pub mod markdown;
pub mod settings;

pub use compare::{compare, compare_at};
pub use console::{print_comparison, render_comparison, RenderOptions};
pub use error::{BenchError, Result};
pub use io::{read_comparison, update_readme, write_comparison, write_markdown};
pub use loader::{
    discover, load_all, load_report, load_reports, DiscoveredFile, LanguageSource, LoadFailure,
    LoadOutcome, LoaderConfig,
};
pub use settings::Settings;

pub use langbench_core::{BenchmarkReport, BenchmarkResult, Comparison, TestOutcome};
