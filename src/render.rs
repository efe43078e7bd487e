//! Presentation of search results for the terminal or for scripts.

use serde::Serialize;
use wikilinks_core::models::{ArticleId, Level, SearchOutcome};

use crate::fetch::display_url;

/// Output format of `wikilinks search`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Narrative form: each hop's sentence followed by the article it leads to.
pub fn render_text(
    outcome: &SearchOutcome,
    start: &ArticleId,
    goal: &ArticleId,
    base_url: &str,
) -> String {
    let Some(path) = outcome.path() else {
        return "Path not found :(\n".to_string();
    };
    if path.is_empty() {
        return format!(
            "\"{}\" is the start and the goal; nothing to search.\n",
            start.display_name()
        );
    }

    let mut out = format!(
        "\n ------ Path from \"{}\" to \"{}\" ------ \n",
        start.display_name(),
        goal.display_name()
    );
    for hop in &path.hops {
        out.push_str(&format!(
            "\n{}\n-> {} <-\n",
            hop.sentence,
            display_url(base_url, &hop.article)
        ));
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonHop<'a> {
    level: Level,
    parent: &'a ArticleId,
    article: &'a ArticleId,
    url: String,
    sentence: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    found: bool,
    start: &'a ArticleId,
    goal: &'a ArticleId,
    hops: Vec<JsonHop<'a>>,
    pages_fetched: usize,
    links_recorded: usize,
}

/// One JSON document describing the outcome, hop URLs included.
pub fn render_json(
    outcome: &SearchOutcome,
    start: &ArticleId,
    goal: &ArticleId,
    base_url: &str,
) -> serde_json::Result<String> {
    let hops = outcome
        .path()
        .map(|path| {
            path.hops
                .iter()
                .map(|hop| JsonHop {
                    level: hop.level,
                    parent: &hop.parent,
                    article: &hop.article,
                    url: display_url(base_url, &hop.article),
                    sentence: &hop.sentence,
                })
                .collect()
        })
        .unwrap_or_default();
    let stats = outcome.stats();
    serde_json::to_string_pretty(&JsonReport {
        found: outcome.is_found(),
        start,
        goal,
        hops,
        pages_fetched: stats.pages_fetched,
        links_recorded: stats.links_recorded,
    })
}
