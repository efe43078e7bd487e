//! Search progress reporting.
//!
//! Reports observable progress while a search runs so users can see which
//! depth is being expanded and how much of the frontier is left. Progress is
//! emitted on **stderr** so stdout stays parseable for scripts.

use std::io::Write;
use wikilinks_core::models::Level;

/// A single progress event emitted by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchProgressEvent {
    /// Expansion of `level` begins; `frontier` articles are queued.
    LevelStarted { level: Level, frontier: usize },
    /// A batch at `level` finished; `fetched` pages so far, `remaining` queued.
    BatchCompleted {
        level: Level,
        fetched: u64,
        remaining: u64,
    },
    /// The goal was discovered at `level`.
    Found { level: Level },
    /// The depth budget or the graph ran out.
    Exhausted { level: Level },
}

/// Reports search progress. Implementations write to stderr (human or JSON).
pub trait SearchProgressReporter: Send + Sync {
    fn report(&self, event: SearchProgressEvent);
}

/// Human-friendly progress on stderr: "depth 2  fetched 1,234  remaining 5,000".
pub struct StderrProgress;

impl SearchProgressReporter for StderrProgress {
    fn report(&self, event: SearchProgressEvent) {
        let line = match &event {
            SearchProgressEvent::LevelStarted { level, frontier } => format!(
                "Searching at depth {} ({} articles queued)...\n",
                level + 1,
                format_number(*frontier as u64)
            ),
            SearchProgressEvent::BatchCompleted {
                level,
                fetched,
                remaining,
            } => format!(
                "depth {}  fetched {}  remaining {}\n",
                level + 1,
                format_number(*fetched),
                format_number(*remaining)
            ),
            SearchProgressEvent::Found { level } => format!("goal found at depth {}\n", level),
            SearchProgressEvent::Exhausted { level } => {
                format!("search exhausted after depth {}\n", level)
            }
        };
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl SearchProgressReporter for JsonProgress {
    fn report(&self, event: SearchProgressEvent) {
        let obj = match &event {
            SearchProgressEvent::LevelStarted { level, frontier } => serde_json::json!({
                "event": "level_started",
                "level": level,
                "frontier": frontier
            }),
            SearchProgressEvent::BatchCompleted {
                level,
                fetched,
                remaining,
            } => serde_json::json!({
                "event": "batch_completed",
                "level": level,
                "fetched": fetched,
                "remaining": remaining
            }),
            SearchProgressEvent::Found { level } => serde_json::json!({
                "event": "found",
                "level": level
            }),
            SearchProgressEvent::Exhausted { level } => serde_json::json!({
                "event": "exhausted",
                "level": level
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
            let _ = stderr.flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl SearchProgressReporter for NoProgress {
    fn report(&self, _event: SearchProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn SearchProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_comma() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}
