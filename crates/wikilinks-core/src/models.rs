//! Core data models used throughout wikilinks.
//!
//! These types describe the articles, edges, and paths that flow through the
//! breadth-first search: an [`ArticleId`] names a page, a [`PathHop`] is one
//! edge of the answer, and a [`SearchOutcome`] is what a finished search
//! hands back to the caller.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// BFS depth from the start article. The start article itself is level 0.
pub type Level = usize;

/// Opaque identifier of a corpus page (the URL path segment after `/wiki/`).
///
/// Always stored percent-decoded, e.g. `Nintendo_3DS` or `Москва`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable title: underscores become spaces.
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ArticleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One hop of a found path: `parent` links to `article` inside `sentence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathHop {
    pub level: Level,
    pub parent: ArticleId,
    pub article: ArticleId,
    pub sentence: String,
}

/// Ordered hops from level 1 up to the goal's level.
///
/// An empty path means the start and goal articles are the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkPath {
    pub hops: Vec<PathHop>,
}

impl LinkPath {
    pub fn new(hops: Vec<PathHop>) -> Self {
        Self { hops }
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// The article the path ends at, if any hop exists.
    pub fn goal(&self) -> Option<&ArticleId> {
        self.hops.last().map(|h| &h.article)
    }
}

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Pages successfully fetched and parsed.
    pub pages_fetched: usize,
    /// Distinct articles recorded in the level store.
    pub links_recorded: usize,
    /// Deepest level whose frontier was expanded.
    pub deepest_level: Level,
}

/// Terminal result of a search that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found { path: LinkPath, stats: SearchStats },
    NotFound { stats: SearchStats },
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&LinkPath> {
        match self {
            SearchOutcome::Found { path, .. } => Some(path),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found { stats, .. } | SearchOutcome::NotFound { stats } => stats,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}
