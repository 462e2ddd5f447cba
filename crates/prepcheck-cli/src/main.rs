//! prepcheck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "prepcheck", version, about = "Study-content progress and statistics toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show chapter progress
    Progress {
        /// Path to a chapter .toml file or directory
        #[arg(long)]
        chapter: PathBuf,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Save a progress snapshot JSON to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Compute statistics for a worked-example dataset
    Stats {
        /// Path to a chapter .toml file
        #[arg(long)]
        chapter: PathBuf,

        /// Dataset id within the chapter
        #[arg(long)]
        dataset: String,

        /// Keep only observations with this tag, e.g. "market=Down"
        #[arg(long = "where")]
        filter: Option<String>,

        /// Compare spread against another dataset id
        #[arg(long)]
        compare_with: Option<String>,
    },

    /// Grade a quiz response
    Check {
        /// Path to a chapter .toml file
        #[arg(long)]
        chapter: PathBuf,

        /// Quiz id within the chapter
        #[arg(long)]
        quiz: String,

        /// Selections, e.g. "below_five=6,east_beats_west=6"
        #[arg(long)]
        answers: String,
    },

    /// Validate chapter TOML files
    Validate {
        /// Path to a chapter file or directory
        #[arg(long)]
        chapter: PathBuf,
    },

    /// Compare two progress snapshots
    Compare {
        /// Baseline snapshot JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current snapshot JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if any lesson regressed
        #[arg(long)]
        fail_on_regression: bool,
    },

    /// Create a starter chapter file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prepcheck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Progress {
            chapter,
            format,
            save,
        } => commands::progress::execute(chapter, format, save),
        Commands::Stats {
            chapter,
            dataset,
            filter,
            compare_with,
        } => commands::stats::execute(chapter, dataset, filter, compare_with),
        Commands::Check {
            chapter,
            quiz,
            answers,
        } => commands::check::execute(chapter, quiz, answers),
        Commands::Validate { chapter } => commands::validate::execute(chapter),
        Commands::Compare {
            baseline,
            current,
            format,
            fail_on_regression,
        } => commands::compare::execute(baseline, current, format, fail_on_regression),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
