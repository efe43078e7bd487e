//! Backtracking from a discovered goal to the start article.

use crate::error::ReconstructionError;
use crate::models::{ArticleId, Level, LinkPath, PathHop};
use crate::store::LevelStore;

/// Walk parent links from `goal` at `goal_level` down to level 1.
///
/// The hop at level `k` always has the article of hop `k - 1` as its parent.
/// A missing sentence or parent means the store is inconsistent with how the
/// orchestrator filled it.
pub fn reconstruct(
    store: &LevelStore,
    goal: &ArticleId,
    goal_level: Level,
) -> Result<LinkPath, ReconstructionError> {
    let mut hops = Vec::with_capacity(goal_level);
    let mut current = goal.clone();

    for level in (1..=goal_level).rev() {
        let missing = || ReconstructionError {
            level,
            id: current.clone(),
        };
        let entries = store.level(level).ok_or_else(missing)?;
        let sentence = entries.sentence(&current).ok_or_else(missing)?;
        let parent = entries.parent(&current).ok_or_else(missing)?.clone();

        hops.push(PathHop {
            level,
            parent: parent.clone(),
            article: current,
            sentence: sentence.to_string(),
        });
        current = parent;
    }

    hops.reverse();
    Ok(LinkPath::new(hops))
}
