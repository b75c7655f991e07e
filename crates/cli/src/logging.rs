//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,langbench_benchmarks=debug,langbench_cli=debug";

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub(crate) fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
