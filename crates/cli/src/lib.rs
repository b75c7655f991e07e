//! CLI for langbench.
//!
//! This crate provides the `langbench` command: `compare` aggregates the
//! newest report of every language, `show` re-renders a saved comparison and
//! `status` prints the effective configuration.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

mod logging;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use langbench_benchmarks::{
    compare, discover, load_reports, print_comparison, read_comparison, update_readme,
    write_comparison, write_markdown, RenderOptions, Settings,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

/// langbench CLI.
#[derive(Parser, Debug)]
#[command(name = "langbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the newest report of every language and save the result.
    ///
    /// Reports are discovered as `<lang>/benchmark_*.json` under the base
    /// directory unless files are given explicitly. The comparison is
    /// printed and written to `<output-dir>/comparison_<timestamp>.json`.
    Compare(CompareArgs),

    /// Render a previously saved comparison.
    Show {
        /// Comparison JSON file.
        path: PathBuf,

        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },

    /// Show the effective configuration.
    Status {
        /// Also list every report pattern.
        #[arg(short, long)]
        detailed: bool,

        /// Settings file (defaults to ./langbench.toml when present).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Arguments of the `compare` command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Report files to compare instead of discovering them.
    pub files: Vec<PathBuf>,

    /// Settings file (defaults to ./langbench.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing one sub-directory per language.
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// Directory the comparison is written to.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also write a Markdown summary next to the JSON artifact.
    #[arg(long, conflicts_with = "no_save")]
    pub markdown: bool,

    /// Rewrite the results block of this README to point at the new artifact.
    #[arg(long, value_name = "FILE", conflicts_with = "no_save")]
    pub readme: Option<PathBuf>,

    /// Print the comparison without saving it.
    #[arg(long)]
    pub no_save: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);
    execute(cli)
}

/// Execute an already parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compare(args) => compare_command(args),
        Commands::Show { path, no_color } => {
            let comparison = read_comparison(&path)?;
            print_comparison(&comparison, render_options(no_color));
            Ok(())
        }
        Commands::Status { detailed, config } => status_command(detailed, config),
    }
}

fn compare_command(args: CompareArgs) -> Result<()> {
    let mut settings =
        Settings::load(args.config.as_deref()).context("failed to load settings")?;
    if let Some(base_dir) = args.base_dir {
        settings.base_dir = base_dir;
    }
    if let Some(output_dir) = args.output_dir {
        settings.output_dir = output_dir;
    }
    debug!(?settings, "effective settings");

    let files: Vec<PathBuf> = if args.files.is_empty() {
        discover(&settings.loader_config())?
            .into_iter()
            .map(|file| file.path)
            .collect()
    } else {
        args.files
    };

    if files.is_empty() {
        bail!(
            "no benchmark files found under {}; run the language benchmarks first",
            settings.base_dir.display()
        );
    }

    println!("Found benchmark files:");
    for file in &files {
        println!("  {}", file.display());
    }

    let outcome = load_reports(&files);
    for failure in &outcome.failures {
        println!("Skipping report: {}", failure.error);
    }

    let Some(comparison) = compare(&outcome.reports) else {
        bail!("no valid benchmark data found");
    };

    print_comparison(&comparison, render_options(args.no_color));

    if args.no_save {
        return Ok(());
    }

    let path = write_comparison(&comparison, &settings.output_dir)
        .context("failed to save comparison")?;
    println!("\nComparison saved to: {}", path.display());

    if args.markdown {
        let summary = write_markdown(&comparison, &path).context("failed to save markdown")?;
        println!("Markdown summary saved to: {}", summary.display());
    }

    if let Some(readme) = args.readme {
        if update_readme(&comparison, &path, &readme).context("failed to update README")? {
            println!("README updated: {}", readme.display());
        } else {
            println!("README has no results markers: {}", readme.display());
        }
    }

    Ok(())
}

fn status_command(detailed: bool, config: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load(config.as_deref()).context("failed to load settings")?;

    println!("langbench comparison tool");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Base directory: {}", settings.base_dir.display());
    println!("Output directory: {}", settings.output_dir.display());
    println!("Languages: {}", settings.languages.len());

    if detailed {
        println!("\nReport patterns:");
        for source in &settings.languages {
            println!(
                "  - {:<10} {}",
                source.language,
                source.resolve(&settings.base_dir)
            );
        }
    }

    Ok(())
}

fn render_options(no_color: bool) -> RenderOptions {
    RenderOptions {
        color: !no_color && std::io::stdout().is_terminal(),
    }
}
