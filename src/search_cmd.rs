//! Command implementations behind `wikilinks search`, `validate`, and `log`.
//!
//! Missing search inputs are asked for interactively. An empty answer keeps
//! the configured sample URL or depth.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use wikilinks_core::models::{ArticleId, Level};

use crate::activity_log::ActivityLog;
use crate::config::Config;
use crate::crawl::PathFinder;
use crate::progress::ProgressMode;
use crate::render::{render_json, render_text, OutputFormat};
use crate::validate::validate_url;

/// Arguments of `wikilinks search`, as given on the command line.
#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub depth: Option<Level>,
    pub format: OutputFormat,
    pub progress: ProgressMode,
}

/// Resolved inputs of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInputs {
    pub start: ArticleId,
    pub goal: ArticleId,
    pub max_depth: Level,
}

/// Fill in whatever `args` lacks by prompting on `input`/`output`, then
/// validate both URLs.
pub fn resolve_inputs<R: BufRead, W: Write>(
    cfg: &Config,
    args: &SearchArgs,
    input: &mut R,
    output: &mut W,
) -> Result<SearchInputs> {
    let lang = &cfg.corpus.lang;

    let from = match &args.from {
        Some(url) => url.clone(),
        None => ask(
            input,
            output,
            "Write URL you want to start searching from (or tap Enter to go with example URL): ",
        )?
        .unwrap_or_else(|| cfg.corpus.sample_start.clone()),
    };
    let start = validate_url(&from, lang).with_context(|| format!("Invalid start URL '{}'", from))?;

    let to = match &args.to {
        Some(url) => url.clone(),
        None => ask(
            input,
            output,
            "Write URL you want to find (or tap Enter to go with example URL): ",
        )?
        .unwrap_or_else(|| cfg.corpus.sample_goal.clone()),
    };
    let goal = validate_url(&to, lang).with_context(|| format!("Invalid goal URL '{}'", to))?;

    let max_depth = match args.depth {
        Some(depth) => depth,
        None => {
            let question = format!(
                "Maximum number of hops (or tap Enter for {}): ",
                cfg.search.max_depth
            );
            match ask(input, output, &question)? {
                Some(answer) => parse_depth(&answer)?,
                None => cfg.search.max_depth,
            }
        }
    };

    Ok(SearchInputs {
        start,
        goal,
        max_depth,
    })
}

/// Print `question`, read one line, and return it trimmed (`None` if empty or EOF).
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<Option<String>> {
    output.write_all(question.as_bytes())?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read answer")?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

fn parse_depth(answer: &str) -> Result<Level> {
    let depth: Level = answer
        .parse()
        .with_context(|| format!("Depth must be a positive number, got '{}'", answer))?;
    if depth == 0 {
        bail!("Depth must be >= 1");
    }
    Ok(depth)
}

/// `wikilinks search`: resolve inputs, run the search, print the result.
///
/// Found and not-found both return `Ok`; validation and fetch errors do not.
pub async fn run_search(cfg: &Config, args: SearchArgs) -> Result<()> {
    let log = ActivityLog::from_config(cfg);
    if let Err(e) = log.clear() {
        tracing::warn!(error = %e, "could not clear activity log");
    }

    let inputs = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stderr();
        resolve_inputs(cfg, &args, &mut input, &mut output)?
    };

    let finder = PathFinder::from_config(cfg)?
        .with_max_depth(inputs.max_depth)
        .with_progress(args.progress.reporter());

    let outcome = finder.search_path(&inputs.start, &inputs.goal).await?;

    let base_url = cfg.corpus.base_url();
    let rendered = match args.format {
        OutputFormat::Text => render_text(&outcome, &inputs.start, &inputs.goal, &base_url),
        OutputFormat::Json => {
            let mut json = render_json(&outcome, &inputs.start, &inputs.goal, &base_url)?;
            json.push('\n');
            json
        }
    };
    print!("{}", rendered);
    Ok(())
}

/// `wikilinks validate <url>`: print the article id and display name.
pub fn run_validate(cfg: &Config, url: &str) -> Result<()> {
    let id = validate_url(url, &cfg.corpus.lang)?;
    println!("{}\t{}", id, id.display_name());
    Ok(())
}

/// `wikilinks log clear`.
pub fn run_log_clear(cfg: &Config) -> Result<()> {
    let log = ActivityLog::from_config(cfg);
    match log.path() {
        Some(path) => {
            log.clear()
                .with_context(|| format!("Failed to clear {}", path.display()))?;
            println!("Cleared {}", path.display());
        }
        None => println!("Activity log is disabled."),
    }
    Ok(())
}
