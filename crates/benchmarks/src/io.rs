//! I/O operations for comparison artifacts.
//!
//! Comparisons are written as pretty-printed JSON named after their
//! generation time, e.g. `comparison_20250101_120000.json`. Files are
//! written to a temporary name first and moved into place, so a failed
//! write never leaves a partial artifact behind.

use crate::error::{BenchError, Result};
use crate::markdown;
use langbench_core::Comparison;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// File name prefix of comparison artifacts.
pub const ARTIFACT_PREFIX: &str = "comparison";

/// File stem for `comparison`, without any uniqueness suffix.
pub fn artifact_stem(comparison: &Comparison) -> String {
    format!(
        "{}_{}",
        ARTIFACT_PREFIX,
        comparison.timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Write `comparison` as JSON into `output_dir` and return the file path.
///
/// The directory is created if needed. If an artifact with the same
/// timestamp exists, a `_2`, `_3`, ... suffix is appended.
pub fn write_comparison(comparison: &Comparison, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|source| BenchError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let json = serde_json::to_string_pretty(comparison).map_err(BenchError::Encode)?;
    let stem = artifact_stem(comparison);

    let mut attempt = 1;
    loop {
        let path = candidate_path(output_dir, &stem, attempt, "json");
        if !path.exists() {
            match write_new(&path, json.as_bytes()) {
                Ok(()) => {
                    info!(path = %path.display(), "comparison saved");
                    return Ok(path);
                }
                Err(WriteNewError::Exists) => {}
                Err(WriteNewError::Io(source)) => return Err(BenchError::Write { path, source }),
            }
        }
        attempt += 1;
    }
}

/// Write the Markdown summary next to a JSON artifact.
///
/// The summary shares the artifact's stem with an `.md` extension.
pub fn write_markdown(comparison: &Comparison, json_artifact: impl AsRef<Path>) -> Result<PathBuf> {
    let path = json_artifact.as_ref().with_extension("md");
    let summary = markdown::generate_summary(comparison);

    replace_file(&path, summary.as_bytes())?;

    info!(path = %path.display(), "markdown summary saved");
    Ok(path)
}

/// Replace the results block of the README at `readme`.
///
/// The block between the results markers is rewritten to link `json_artifact`
/// (relative to the README when possible) and embed the Markdown summary.
/// Returns `false` and leaves the file untouched when the markers are absent.
pub fn update_readme(
    comparison: &Comparison,
    json_artifact: impl AsRef<Path>,
    readme: impl AsRef<Path>,
) -> Result<bool> {
    let readme = readme.as_ref();
    let content = fs::read_to_string(readme).map_err(|source| BenchError::Read {
        path: readme.to_path_buf(),
        source,
    })?;

    let link = artifact_link(json_artifact.as_ref(), readme);
    let section = markdown::readme_section(comparison, &link);
    let Some(updated) = markdown::splice_results(&content, &section) else {
        warn!(path = %readme.display(), "no results markers found, README left unchanged");
        return Ok(false);
    };

    replace_file(readme, updated.as_bytes())?;
    info!(path = %readme.display(), "README results updated");
    Ok(true)
}

/// Read a comparison artifact back.
pub fn read_comparison(path: impl AsRef<Path>) -> Result<Comparison> {
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

/// Atomically replace (or create) `path` with `contents`.
fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    let write_error = |source| BenchError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = NamedTempFile::new_in(parent_dir(path)).map_err(write_error)?;
    file.write_all(contents).map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

/// Link target for `artifact` as seen from the directory of `readme`.
fn artifact_link(artifact: &Path, readme: &Path) -> String {
    let relative = artifact.strip_prefix(parent_dir(readme)).unwrap_or(artifact);
    relative.to_string_lossy().replace('\\', "/")
}

fn candidate_path(dir: &Path, stem: &str, attempt: u32, extension: &str) -> PathBuf {
    if attempt == 1 {
        dir.join(format!("{stem}.{extension}"))
    } else {
        dir.join(format!("{stem}_{attempt}.{extension}"))
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

enum WriteNewError {
    Exists,
    Io(std::io::Error),
}

/// Write `contents` to `path` atomically, refusing to replace an existing file.
fn write_new(path: &Path, contents: &[u8]) -> std::result::Result<(), WriteNewError> {
    let mut file = NamedTempFile::new_in(parent_dir(path)).map_err(WriteNewError::Io)?;
    file.write_all(contents).map_err(WriteNewError::Io)?;
    file.flush().map_err(WriteNewError::Io)?;
    file.persist_noclobber(path).map_err(|err| {
        if err.error.kind() == std::io::ErrorKind::AlreadyExists {
            WriteNewError::Exists
        } else {
            WriteNewError::Io(err.error)
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_at;
    use chrono::{Local, TimeZone};
    use langbench_core::{BenchmarkReport, BenchmarkResult};
    use tempfile::TempDir;

    fn sample() -> Comparison {
        let at = Local.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
        let reports = vec![
            BenchmarkReport::new("go")
                .with_total_time(1.0)
                .with_test(BenchmarkResult::new("Sort", 1_000_000)),
            BenchmarkReport::new("php")
                .with_total_time(2.0)
                .with_test(BenchmarkResult::failed("Sort", "out of memory")),
        ];
        compare_at(&reports, at).unwrap()
    }

    #[test]
    fn test_artifact_stem_uses_generation_time() {
        assert_eq!(artifact_stem(&sample()), "comparison_20250314_150926");
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().unwrap();
        let comparison = sample();

        let path = write_comparison(&comparison, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("comparison_20250314_150926.json"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"languages\": {"), "not pretty-printed: {content}");
        assert!(content.contains("\"status\": \"unavailable\""));

        assert_eq!(read_comparison(&path).unwrap(), comparison);
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("comparisons");

        let path = write_comparison(&sample(), &nested).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.is_file());
    }

    #[test]
    fn test_same_timestamp_gets_unique_name() {
        let dir = TempDir::new().unwrap();
        let comparison = sample();

        let first = write_comparison(&comparison, dir.path()).unwrap();
        let second = write_comparison(&comparison, dir.path()).unwrap();
        let third = write_comparison(&comparison, dir.path()).unwrap();

        assert_ne!(first, second);
        assert_eq!(second, dir.path().join("comparison_20250314_150926_2.json"));
        assert_eq!(third, dir.path().join("comparison_20250314_150926_3.json"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file in the way").unwrap();

        let result = write_comparison(&sample(), &blocker);
        assert!(matches!(result, Err(BenchError::Write { .. })));

        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_write_markdown_next_to_artifact() {
        let dir = TempDir::new().unwrap();
        let comparison = sample();
        let json = write_comparison(&comparison, dir.path()).unwrap();

        let md = write_markdown(&comparison, &json).unwrap();
        assert_eq!(md, dir.path().join("comparison_20250314_150926.md"));
        assert!(fs::read_to_string(md)
            .unwrap()
            .starts_with("# Language Performance Comparison"));
    }

    #[test]
    fn test_update_readme_splices_results() {
        let dir = TempDir::new().unwrap();
        let comparison = sample();
        let json = write_comparison(&comparison, dir.path()).unwrap();
        let readme = dir.path().join("README.md");
        fs::write(
            &readme,
            "# Bench\n<!-- BENCHMARK_RESULTS_START -->\nold\n<!-- BENCHMARK_RESULTS_END -->\nend\n",
        )
        .unwrap();

        assert!(update_readme(&comparison, &json, &readme).unwrap());

        let content = fs::read_to_string(&readme).unwrap();
        assert!(content.starts_with("# Bench\n<!-- BENCHMARK_RESULTS_START -->\n"));
        assert!(content.contains("[Latest comparison JSON](comparison_20250314_150926.json)"));
        assert!(content.contains("| Php | not measured (out of memory) | - | - | - |"));
        assert!(content.ends_with("<!-- BENCHMARK_RESULTS_END -->\nend\n"));
        assert!(!content.contains("\nold\n"));
    }

    #[test]
    fn test_update_readme_without_markers_is_untouched() {
        let dir = TempDir::new().unwrap();
        let readme = dir.path().join("README.md");
        fs::write(&readme, "# Bench\n").unwrap();

        let json = dir.path().join("out").join("comparison_x.json");
        assert!(!update_readme(&sample(), &json, &readme).unwrap());
        assert_eq!(fs::read_to_string(&readme).unwrap(), "# Bench\n");

        let missing = dir.path().join("MISSING.md");
        assert!(matches!(
            update_readme(&sample(), &json, &missing),
            Err(BenchError::Read { .. })
        ));
    }

    #[test]
    fn test_read_comparison_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("comparison_bad.json");
        fs::write(&path, "[]").unwrap();

        assert!(matches!(read_comparison(&path), Err(BenchError::Parse { .. })));
        assert!(matches!(
            read_comparison(dir.path().join("absent.json")),
            Err(BenchError::Read { .. })
        ));
    }
}
