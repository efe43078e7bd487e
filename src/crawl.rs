//! Breadth-first traversal from a start article to a goal article.
//!
//! # Algorithm
//!
//! 1. Seed the frontier with the start article and mark it scheduled.
//! 2. Pop up to `batch_size` articles, fetch and extract them concurrently
//!    (at most `concurrency` in flight), and wait for the whole batch.
//! 3. Merge the batch into the [`LevelStore`] at `level + 1`, in ascending
//!    parent id and then ascending child id. The first edge reaching the goal
//!    in that order wins, which makes the result deterministic for a fixed
//!    graph.
//! 4. When the frontier is drained, advance one level: the next frontier is
//!    every article discovered at the new level that was never scheduled.
//! 5. Stop with `NotFound` once reaching the goal would need more than
//!    `max_depth` hops, or when a level discovers nothing new.
//!
//! Any fetch failure aborts the in-flight batch and the whole search. The
//! level store and visited registry are owned by the coordinating task;
//! workers only return owned results through their join handles.

use anyhow::Result;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use wikilinks_core::error::SearchError;
use wikilinks_core::extract::{HtmlLinkExtractor, LinkExtractor, LinkMap};
use wikilinks_core::models::{ArticleId, Level, LinkPath, SearchOutcome, SearchStats};
use wikilinks_core::path::reconstruct;
use wikilinks_core::store::{LevelStore, VisitedRegistry};

use crate::activity_log::ActivityLog;
use crate::config::{Config, SearchConfig};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::progress::{NoProgress, SearchProgressEvent, SearchProgressReporter};

/// Traversal limits, decoupled from application config.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Maximum number of hops from start to goal.
    pub max_depth: Level,
    /// Frontier entries popped per batch.
    pub batch_size: usize,
    /// Fetches in flight at once.
    pub concurrency: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl SearchOptions {
    /// Raise `batch_size` and `concurrency` to at least one.
    ///
    /// A zero batch never drains the frontier and a zero-permit semaphore
    /// never admits a fetch.
    pub fn clamped(self) -> Self {
        Self {
            batch_size: self.batch_size.max(1),
            concurrency: self.concurrency.max(1),
            ..self
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            max_depth: cfg.max_depth,
            batch_size: cfg.batch_size,
            concurrency: cfg.concurrency,
        }
        .clamped()
    }
}

type BatchResult = (ArticleId, LinkMap);

/// Drives one or more searches with a fixed fetcher, extractor and limits.
pub struct PathFinder {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    options: SearchOptions,
    log: ActivityLog,
    progress: Box<dyn SearchProgressReporter>,
}

impl PathFinder {
    /// Zero `batch_size` or `concurrency` in `options` is treated as one.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
        options: SearchOptions,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            options: options.clamped(),
            log: ActivityLog::disabled(),
            progress: Box::new(NoProgress),
        }
    }

    /// HTTP fetcher, HTML extractor, and activity log as configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(
            Arc::new(fetcher),
            Arc::new(HtmlLinkExtractor::new()),
            SearchOptions::from(&config.search),
        )
        .with_activity_log(ActivityLog::from_config(config)))
    }

    pub fn with_activity_log(mut self, log: ActivityLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn SearchProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Level) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Search for the shortest link path from `start` to `goal`.
    ///
    /// `start == goal` is found immediately with an empty path and no fetch.
    pub async fn search_path(
        &self,
        start: &ArticleId,
        goal: &ArticleId,
    ) -> Result<SearchOutcome, SearchError> {
        let mut stats = SearchStats::default();
        if start == goal {
            return Ok(SearchOutcome::Found {
                path: LinkPath::default(),
                stats,
            });
        }

        let mut store = LevelStore::new();
        let mut visited = VisitedRegistry::new();
        let semaphore = Arc::new(Semaphore::new(self.options.concurrency));

        visited.mark_scheduled(start);
        self.log.record(start);
        let mut frontier = VecDeque::from([start.clone()]);
        let mut level: Level = 0;

        tracing::info!(%start, %goal, max_depth = self.options.max_depth, "search started");

        while level < self.options.max_depth {
            stats.deepest_level = level;
            self.progress.report(SearchProgressEvent::LevelStarted {
                level,
                frontier: frontier.len(),
            });

            while !frontier.is_empty() {
                let take = self.options.batch_size.min(frontier.len());
                let batch: Vec<ArticleId> = frontier.drain(..take).collect();

                let mut results = self.run_batch(batch, &semaphore).await?;
                stats.pages_fetched += results.len();
                results.sort_by(|a, b| a.0.cmp(&b.0));

                for (parent, links) in &results {
                    for (child, sentence) in links {
                        if child == start {
                            continue;
                        }
                        if store.record_discovery(level + 1, child, parent, sentence) {
                            stats.links_recorded += 1;
                        }
                        if child == goal {
                            let path = reconstruct(&store, goal, level + 1)?;
                            tracing::info!(level = level + 1, hops = path.len(), "goal found");
                            self.progress
                                .report(SearchProgressEvent::Found { level: level + 1 });
                            return Ok(SearchOutcome::Found { path, stats });
                        }
                    }
                }

                self.progress.report(SearchProgressEvent::BatchCompleted {
                    level,
                    fetched: stats.pages_fetched as u64,
                    remaining: frontier.len() as u64,
                });
            }

            level += 1;
            if level >= self.options.max_depth {
                break;
            }

            frontier = store
                .next_frontier(level, &visited)
                .into_iter()
                .filter(|id| visited.mark_scheduled(id))
                .collect();
            self.log.record_all(&frontier);

            tracing::debug!(level, frontier = frontier.len(), "level advanced");
            if frontier.is_empty() {
                break;
            }
        }

        tracing::info!(
            pages = stats.pages_fetched,
            links = stats.links_recorded,
            "goal not reachable within depth budget"
        );
        self.progress.report(SearchProgressEvent::Exhausted { level });
        Ok(SearchOutcome::NotFound { stats })
    }

    /// Fetch and extract every article of `batch`, waiting for all of them.
    ///
    /// The first failure aborts the remaining tasks of the batch.
    async fn run_batch(
        &self,
        batch: Vec<ArticleId>,
        semaphore: &Arc<Semaphore>,
    ) -> Result<Vec<BatchResult>, SearchError> {
        let mut tasks = JoinSet::new();
        for id in batch {
            let fetcher = Arc::clone(&self.fetcher);
            let extractor = Arc::clone(&self.extractor);
            let semaphore = Arc::clone(semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| SearchError::Worker(e.to_string()))?;
                tracing::debug!(%id, "fetching");
                let content = fetcher.fetch(&id).await?;
                let links = tokio::task::spawn_blocking(move || extractor.extract_links(&content))
                    .await
                    .map_err(|e| SearchError::Worker(e.to_string()))?;
                Ok::<BatchResult, SearchError>((id, links))
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|e| SearchError::Worker(e.to_string()));
            match outcome.and_then(|r| r) {
                Ok(result) => results.push(result),
                Err(e) => {
                    tasks.abort_all();
                    tracing::warn!(error = %e, "batch aborted");
                    return Err(e);
                }
            }
        }
        Ok(results)
    }
}
