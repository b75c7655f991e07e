//! Console rendering of a comparison.
//!
//! The report lists languages by total time, then every test with its
//! fastest language and the per-language results. Results a runner could not
//! measure are labelled "not measured" and always listed after measured ones.

use colored::{ColoredString, Colorize};
use langbench_core::{Comparison, TestComparison, TestOutcome};
use std::fmt;

/// Rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI colours.
    pub color: bool,
}

impl RenderOptions {
    /// Options with colours disabled.
    pub fn plain() -> Self {
        Self { color: false }
    }
}

/// Displayable console report.
pub struct ConsoleReport<'a> {
    comparison: &'a Comparison,
    options: RenderOptions,
}

impl<'a> ConsoleReport<'a> {
    /// Wrap `comparison` for display.
    pub fn new(comparison: &'a Comparison, options: RenderOptions) -> Self {
        Self {
            comparison,
            options,
        }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.options.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_overall(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.comparison.summary;

        writeln!(f, "{}", self.paint("## Overall Results", |s| s.bold()))?;
        for (language, total) in self.comparison.ranked_languages() {
            writeln!(
                f,
                "{:<10}: {:.3}s ({})",
                display_name(language),
                total,
                format_ratio(self.comparison.overall_ratio(language))
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Fastest: {}",
            self.paint(&display_name(&summary.fastest_overall), |s| s.green().bold())
        )?;
        writeln!(f, "Speed difference: ×{:.2}", summary.speed_difference)?;
        writeln!(f)
    }

    fn write_test(&self, f: &mut fmt::Formatter<'_>, test: &TestComparison) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.paint(&format!("### {}", test.test), |s| s.bold()))?;

        let fastest = test
            .fastest
            .as_deref()
            .map(display_name)
            .unwrap_or_else(|| "none".to_string());
        writeln!(f, "Fastest: {}", self.paint(&fastest, |s| s.green()))?;

        for (language, outcome) in test.ranked_results() {
            let name = format!("{:<10}", display_name(language));
            match outcome {
                TestOutcome::Measured {
                    duration_ms,
                    memory_bytes,
                    ops_per_sec,
                    speed_ratio,
                } => writeln!(
                    f,
                    "{}: {:>8.2}ms ({}) | {:>10} bytes | {:>12.0} ops/sec",
                    name,
                    duration_ms,
                    format_ratio(*speed_ratio),
                    memory_bytes,
                    ops_per_sec
                )?,
                TestOutcome::Unavailable { error } => {
                    let label = not_measured_label(error);
                    writeln!(f, "{}: {}", name, self.paint(&label, |s| s.yellow()))?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            self.paint("=== LANGUAGE PERFORMANCE COMPARISON ===", |s| s.cyan().bold())
        )?;
        writeln!(f, "Generated: {}", self.comparison.timestamp.to_rfc3339())?;
        writeln!(f)?;

        self.write_overall(f)?;

        writeln!(f, "{}", self.paint("## Test-by-Test Comparison", |s| s.bold()))?;
        for test in &self.comparison.test_comparisons {
            self.write_test(f, test)?;
        }
        Ok(())
    }
}

/// Render `comparison` to a string.
pub fn render_comparison(comparison: &Comparison, options: RenderOptions) -> String {
    ConsoleReport::new(comparison, options).to_string()
}

/// Print `comparison` to stdout.
pub fn print_comparison(comparison: &Comparison, options: RenderOptions) {
    print!("{}", ConsoleReport::new(comparison, options));
}

/// Language key with its first character upper-cased.
pub fn display_name(language: &str) -> String {
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Label used in place of numbers for an unavailable result.
pub fn not_measured_label(error: &str) -> String {
    if error.is_empty() {
        "not measured".to_string()
    } else {
        format!("not measured ({error})")
    }
}

fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(ratio) => format!("×{ratio:.2}"),
        None => "×n/a".to_string(),
    }
}
