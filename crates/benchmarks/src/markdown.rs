//! Markdown output generation for comparisons.
//!
//! Produces a document with an overall ranking table and one table per
//! test, suitable for committing next to the JSON artifact. The same
//! summary can be spliced into a README between
//! [`RESULTS_START_MARKER`] and [`RESULTS_END_MARKER`].

use crate::console::{display_name, not_measured_label};
use langbench_core::{Comparison, TestComparison, TestOutcome};
use std::fmt::{self, Write};

/// Opens the generated results block in a README.
pub const RESULTS_START_MARKER: &str = "<!-- BENCHMARK_RESULTS_START -->";

/// Closes the generated results block in a README.
pub const RESULTS_END_MARKER: &str = "<!-- BENCHMARK_RESULTS_END -->";

/// Generate the Markdown summary of `comparison`.
pub fn generate_summary(comparison: &Comparison) -> String {
    let mut output = String::new();
    // fmt::Write for String never fails.
    let _ = write_summary(&mut output, comparison);
    output
}

/// Write the Markdown summary of `comparison` into `output`.
pub fn write_summary<W: Write>(output: &mut W, comparison: &Comparison) -> fmt::Result {
    let summary = &comparison.summary;

    writeln!(output, "# Language Performance Comparison")?;
    writeln!(output)?;
    writeln!(output, "Generated: {}", comparison.timestamp.to_rfc3339())?;
    writeln!(output)?;
    writeln!(output, "## Overall Results")?;
    writeln!(output)?;
    writeln!(output, "| Rank | Language | Version | Total Time (s) | Ratio |")?;
    writeln!(output, "|------|----------|---------|----------------|-------|")?;

    for (rank, (language, total)) in comparison.ranked_languages().into_iter().enumerate() {
        let version = comparison
            .languages
            .get(language)
            .map(|info| info.version.as_str())
            .unwrap_or("");
        writeln!(
            output,
            "| {} | {} | {} | {:.3} | {} |",
            rank + 1,
            escape(&display_name(language)),
            escape(version),
            total,
            ratio_cell(comparison.overall_ratio(language))
        )?;
    }

    writeln!(output)?;
    writeln!(
        output,
        "**Fastest:** {} | **Slowest:** {} | **Speed difference:** ×{:.2}",
        escape(&display_name(&summary.fastest_overall)),
        escape(&display_name(&summary.slowest_overall)),
        summary.speed_difference
    )?;
    writeln!(output)?;
    writeln!(output, "## Test-by-Test Comparison")?;

    for test in &comparison.test_comparisons {
        write_test(output, test)?;
    }

    writeln!(output)?;
    writeln!(output, "---")?;
    writeln!(
        output,
        "Languages compared: {} | Tests compared: {}",
        comparison.languages.len(),
        comparison.test_comparisons.len()
    )
}

/// README results block for `comparison`, markers included.
///
/// `artifact` is the link target of the saved JSON comparison.
pub fn readme_section(comparison: &Comparison, artifact: &str) -> String {
    format!(
        "{RESULTS_START_MARKER}\n[Latest comparison JSON]({artifact})\n\
         <details><summary>Details</summary>\n\n{}\n</details>\n{RESULTS_END_MARKER}",
        generate_summary(comparison).trim_end()
    )
}

/// Replace the first marked results block in `content` with `section`.
///
/// Returns `None` when `content` has no complete marker pair.
pub fn splice_results(content: &str, section: &str) -> Option<String> {
    let start = content.find(RESULTS_START_MARKER)?;
    let end = start + content[start..].find(RESULTS_END_MARKER)? + RESULTS_END_MARKER.len();
    Some(format!("{}{}{}", &content[..start], section, &content[end..]))
}

fn write_test<W: Write>(output: &mut W, test: &TestComparison) -> fmt::Result {
    writeln!(output)?;
    writeln!(output, "### {}", escape(&test.test))?;
    writeln!(output)?;
    match &test.fastest {
        Some(language) => writeln!(output, "Fastest: **{}**", escape(&display_name(language)))?,
        None => writeln!(output, "Fastest: none")?,
    }
    writeln!(output)?;
    writeln!(output, "| Language | Duration (ms) | Ratio | Memory (bytes) | Ops/sec |")?;
    writeln!(output, "|----------|---------------|-------|----------------|---------|")?;

    for (language, outcome) in test.ranked_results() {
        let name = escape(&display_name(language));
        match outcome {
            TestOutcome::Measured {
                duration_ms,
                memory_bytes,
                ops_per_sec,
                speed_ratio,
            } => writeln!(
                output,
                "| {} | {:.2} | {} | {} | {:.0} |",
                name,
                duration_ms,
                ratio_cell(*speed_ratio),
                memory_bytes,
                ops_per_sec
            )?,
            TestOutcome::Unavailable { error } => writeln!(
                output,
                "| {} | {} | - | - | - |",
                name,
                escape(&not_measured_label(error))
            )?,
        }
    }
    Ok(())
}

fn ratio_cell(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "n/a".to_string(), |ratio| format!("×{ratio:.2}"))
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use langbench_core::{BenchmarkReport, BenchmarkResult};

    fn sample() -> Comparison {
        let mut go = BenchmarkReport::new("go")
            .with_total_time(1.0)
            .with_test(BenchmarkResult::new("Sort | large", 2_000_000).with_memory(512));
        go.version = "go1.22.0".to_string();
        let ruby = BenchmarkReport::new("ruby")
            .with_total_time(3.0)
            .with_test(BenchmarkResult::failed("Sort | large", "out of memory"));
        compare(&[ruby, go]).unwrap()
    }

    #[test]
    fn test_generate_summary_sections() {
        let markdown = generate_summary(&sample());

        assert!(markdown.starts_with("# Language Performance Comparison\n"));
        assert!(markdown.contains("| 1 | Go | go1.22.0 | 1.000 | ×1.00 |"), "{markdown}");
        assert!(markdown.contains("| 2 | Ruby |  | 3.000 | ×3.00 |"), "{markdown}");
        let headline = "**Fastest:** Go | **Slowest:** Ruby | **Speed difference:** ×3.00";
        assert!(markdown.contains(headline), "{markdown}");
        assert!(markdown.contains("Languages compared: 2 | Tests compared: 1"));
    }

    #[test]
    fn test_readme_section_links_artifact() {
        let section = readme_section(&sample(), "comparison_20250101_000000.json");

        assert!(section.starts_with(RESULTS_START_MARKER));
        assert!(section.ends_with(RESULTS_END_MARKER));
        assert!(section.contains("[Latest comparison JSON](comparison_20250101_000000.json)"));
        assert!(section.contains("# Language Performance Comparison"));
    }

    #[test]
    fn test_splice_results_replaces_marked_block_only() {
        let readme = format!(
            "# Bench\n\nintro\n{RESULTS_START_MARKER}\nstale\n{RESULTS_END_MARKER}\n\n## Usage\n"
        );
        let section = format!("{RESULTS_START_MARKER}\nfresh\n{RESULTS_END_MARKER}");

        let updated = splice_results(&readme, &section).unwrap();
        assert_eq!(updated, format!("# Bench\n\nintro\n{section}\n\n## Usage\n"));
        assert!(!updated.contains("stale"));
    }

    #[test]
    fn test_splice_results_needs_both_markers() {
        assert!(splice_results("# Bench\n", "x").is_none());
        let only_start = format!("{RESULTS_START_MARKER}\n");
        assert!(splice_results(&only_start, "x").is_none());
        let reversed = format!("{RESULTS_END_MARKER}\n{RESULTS_START_MARKER}\n");
        assert!(splice_results(&reversed, "x").is_none());
    }

    #[test]
    fn test_test_table_escapes_and_labels() {
        let markdown = generate_summary(&sample());

        assert!(markdown.contains("### Sort \\| large"));
        assert!(markdown.contains("Fastest: **Go**"));
        assert!(markdown.contains("| Go | 2.00 | ×1.00 | 512 | 0 |"), "{markdown}");
        assert!(markdown.contains("| Ruby | not measured (out of memory) | - | - | - |"));
    }
}
