//! Report discovery and loading.
//!
//! Each language runner writes `benchmark_<lang>_<timestamp>.json` files into
//! its own directory. Discovery picks the most recently modified match per
//! configured language; loading parses every selected file and keeps going
//! when one of them is unreadable.

use crate::error::{BenchError, Result};
use langbench_core::BenchmarkReport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Languages searched by default, in tie-break priority order.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "go",
    "php",
    "python3",
    "rust",
    "javascript",
    "typescript",
    "java",
    "kotlin",
    "cpp",
    "ruby",
    "c",
    "csharp",
    "python2",
    "swift",
];

/// Where to look for one language's reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSource {
    /// Language key, used in log messages.
    pub language: String,
    /// Glob pattern, relative to the base directory unless absolute.
    pub pattern: String,
}

impl LanguageSource {
    /// Source using the conventional `<lang>/benchmark_*.json` layout.
    pub fn for_language(language: impl Into<String>) -> Self {
        let language = language.into();
        let pattern = format!("{language}/benchmark_*.json");
        Self { language, pattern }
    }

    /// Full glob pattern for this source under `base_dir`.
    ///
    /// An empty `base_dir` means the working directory.
    pub fn resolve(&self, base_dir: &Path) -> String {
        if Path::new(&self.pattern).is_absolute() || base_dir.as_os_str().is_empty() {
            return self.pattern.clone();
        }
        let base = glob::Pattern::escape(&base_dir.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), self.pattern)
    }
}

/// Sources for [`DEFAULT_LANGUAGES`].
pub fn default_sources() -> Vec<LanguageSource> {
    DEFAULT_LANGUAGES
        .iter()
        .map(|language| LanguageSource::for_language(*language))
        .collect()
}

/// Discovery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory the relative patterns are resolved against.
    pub base_dir: PathBuf,
    /// Sources in priority order.
    pub sources: Vec<LanguageSource>,
}

impl LoaderConfig {
    /// Default sources under `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            sources: default_sources(),
        }
    }

    /// Replace the source list.
    pub fn with_sources(mut self, sources: Vec<LanguageSource>) -> Self {
        self.sources = sources;
        self
    }
}

/// The file selected for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Language the source was configured for.
    pub language: String,
    /// Most recently modified match.
    pub path: PathBuf,
}

/// A file that was selected but could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    /// The offending file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub error: BenchError,
}

/// Reports that loaded, plus the files that did not.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Parsed reports in input order.
    pub reports: Vec<BenchmarkReport>,
    /// Files skipped because of read or parse errors.
    pub failures: Vec<LoadFailure>,
}

/// Select the newest matching file for every configured source.
///
/// Sources without a match are skipped. An invalid pattern aborts discovery.
pub fn discover(config: &LoaderConfig) -> Result<Vec<DiscoveredFile>> {
    let mut found = Vec::new();

    for source in &config.sources {
        let pattern = source.resolve(&config.base_dir);
        match newest_match(&pattern)? {
            Some(path) => {
                debug!(language = %source.language, path = %path.display(), "selected report");
                found.push(DiscoveredFile {
                    language: source.language.clone(),
                    path,
                });
            }
            None => debug!(language = %source.language, %pattern, "no report found"),
        }
    }

    Ok(found)
}

fn newest_match(pattern: &str) -> Result<Option<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|source| BenchError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                warn!(%pattern, error = %err, "skipping unreadable path");
                continue;
            }
        };

        let metadata = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => continue,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file without metadata");
                continue;
            }
        };
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        let is_newer = match &newest {
            Some((best_time, best_path)) => (modified, &path) > (*best_time, best_path),
            None => true,
        };
        if is_newer {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, path)| path))
}

/// Read and parse one report.
pub fn load_report(path: impl AsRef<Path>) -> Result<BenchmarkReport> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| BenchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| BenchError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every path, collecting failures instead of stopping at them.
pub fn load_reports<I, P>(paths: I) -> LoadOutcome
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut outcome = LoadOutcome::default();

    for path in paths {
        let path = path.as_ref();
        match load_report(path) {
            Ok(report) => {
                info!(
                    language = %report.language,
                    tests = report.tests.len(),
                    path = %path.display(),
                    "loaded report"
                );
                outcome.reports.push(report);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping report");
                outcome.failures.push(LoadFailure {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }

    outcome
}

/// Discover and load in one step.
pub fn load_all(config: &LoaderConfig) -> Result<LoadOutcome> {
    let files = discover(config)?;
    Ok(load_reports(files.iter().map(|file| &file.path)))
}
