//! Per-run search bookkeeping: the visited registry and the level store.
//!
//! Both structures are owned by a single search run and mutated only by the
//! orchestrator, which merges worker results after each batch. Workers never
//! touch them, so plain `&mut self` methods are enough.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{ArticleId, Level};

/// Articles already scheduled for fetch during this run.
///
/// Ids are added at schedule time, not when the fetch completes, so an
/// article is never dispatched twice even while its fetch is in flight.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    scheduled: HashSet<ArticleId>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test-and-insert. Returns `false` if `id` was already scheduled.
    pub fn mark_scheduled(&mut self, id: &ArticleId) -> bool {
        if self.scheduled.contains(id) {
            return false;
        }
        self.scheduled.insert(id.clone())
    }

    pub fn contains(&self, id: &ArticleId) -> bool {
        self.scheduled.contains(id)
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }
}

/// Discoveries and parent links of a single level.
#[derive(Debug, Default)]
pub struct LevelEntries {
    discoveries: HashMap<ArticleId, String>,
    parents: HashMap<ArticleId, ArticleId>,
}

impl LevelEntries {
    pub fn sentence(&self, id: &ArticleId) -> Option<&str> {
        self.discoveries.get(id).map(String::as_str)
    }

    pub fn parent(&self, id: &ArticleId) -> Option<&ArticleId> {
        self.parents.get(id)
    }

    pub fn len(&self) -> usize {
        self.discoveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discoveries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ArticleId> {
        self.discoveries.keys()
    }
}

/// Everything discovered so far, indexed by level (1-based).
///
/// Each article is recorded at most once across all levels: the first
/// discovery wins and later edges to it are ignored.
#[derive(Debug, Default)]
pub struct LevelStore {
    levels: BTreeMap<Level, LevelEntries>,
    first_seen: HashMap<ArticleId, Level>,
}

impl LevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `parent -> id` at `level`. Returns `false` (and changes
    /// nothing) if `id` is already known at this or any other level.
    pub fn record_discovery(
        &mut self,
        level: Level,
        id: &ArticleId,
        parent: &ArticleId,
        sentence: &str,
    ) -> bool {
        if self.first_seen.contains_key(id) {
            return false;
        }
        self.first_seen.insert(id.clone(), level);

        let entries = self.levels.entry(level).or_default();
        entries.discoveries.insert(id.clone(), sentence.to_string());
        entries.parents.insert(id.clone(), parent.clone());
        true
    }

    /// Ids discovered at `level` that have not been scheduled yet, sorted.
    pub fn next_frontier(&self, level: Level, visited: &VisitedRegistry) -> Vec<ArticleId> {
        let mut frontier: Vec<ArticleId> = self
            .levels
            .get(&level)
            .map(|entries| {
                entries
                    .ids()
                    .filter(|id| !visited.contains(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        frontier.sort();
        frontier
    }

    pub fn level(&self, level: Level) -> Option<&LevelEntries> {
        self.levels.get(&level)
    }

    /// The level at which `id` was first discovered.
    pub fn level_of(&self, id: &ArticleId) -> Option<Level> {
        self.first_seen.get(id).copied()
    }

    pub fn level_len(&self, level: Level) -> usize {
        self.levels.get(&level).map_or(0, LevelEntries::len)
    }

    pub fn total_discoveries(&self) -> usize {
        self.first_seen.len()
    }
}
