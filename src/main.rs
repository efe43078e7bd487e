//! # wikilinks CLI
//!
//! Searches for the shortest link path between two Wikipedia articles.
//!
//! ## Usage
//!
//! ```bash
//! wikilinks --config ./config/wikilinks.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `wikilinks search` | Find a path; prompts for anything not given as a flag |
//! | `wikilinks validate <url>` | Check a URL and print its article id |
//! | `wikilinks log clear` | Truncate the activity log |
//!
//! The config file is optional. Without it the built-in defaults are used
//! (Russian Wikipedia, depth 3).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use wikilinks::config;
use wikilinks::progress::ProgressMode;
use wikilinks::render::OutputFormat;
use wikilinks::search_cmd::{self, SearchArgs};

/// wikilinks — find how one Wikipedia article leads to another.
#[derive(Parser)]
#[command(
    name = "wikilinks",
    about = "wikilinks — find the shortest chain of links between two Wikipedia articles",
    version,
    long_about = "wikilinks runs a breadth-first search over article links, starting at one \
    Wikipedia article and stopping when the goal article is found or the depth budget runs out. \
    Every hop is printed with the sentence the link appears in."
)]
struct Cli {
    /// Path to configuration file (TOML). Built-in defaults apply if it does not exist.
    #[arg(long, global = true, default_value = "./config/wikilinks.toml")]
    config: PathBuf,

    /// Increase diagnostic output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search for a link path between two articles.
    ///
    /// Any of `--from`, `--to`, `--depth` left out is asked for
    /// interactively; an empty answer uses the configured default.
    /// The activity log is cleared before the search starts.
    Search {
        /// Start article URL (`https://<lang>.wikipedia.org/wiki/<id>`).
        #[arg(long)]
        from: Option<String>,

        /// Goal article URL.
        #[arg(long)]
        to: Option<String>,

        /// Maximum number of hops.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        depth: Option<u64>,

        /// Output format for the result.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Progress reporting on stderr. Defaults to `human` on a TTY, `off` otherwise.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Validate an article URL and print its id and display name.
    Validate {
        /// Article URL or bare article id.
        url: String,
    },

    /// Manage the activity log.
    Log {
        #[command(subcommand)]
        action: LogAction,
    },
}

/// Activity log subcommands.
#[derive(Subcommand)]
enum LogAction {
    /// Truncate the activity log file.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::load_or_minimal(&cli.config)?;

    match cli.command {
        Commands::Search {
            from,
            to,
            depth,
            format,
            progress,
        } => {
            let args = SearchArgs {
                from,
                to,
                depth: depth.map(|d| d as usize),
                format,
                progress: progress.unwrap_or_else(ProgressMode::default_for_tty),
            };
            search_cmd::run_search(&cfg, args).await?;
        }
        Commands::Validate { url } => {
            search_cmd::run_validate(&cfg, &url)?;
        }
        Commands::Log { action } => match action {
            LogAction::Clear => {
                search_cmd::run_log_clear(&cfg)?;
            }
        },
    }

    Ok(())
}
