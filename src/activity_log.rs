//! Append-only log of every article scheduled for fetch.
//!
//! Each line reads `[<local timestamp>] <base_url>/<id>`. The log is a side
//! channel: nothing reads it back, and a failed write is reported as a
//! warning without interrupting the search.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use wikilinks_core::models::ArticleId;

use crate::config::Config;
use crate::fetch::display_url;

pub struct ActivityLog {
    path: Option<PathBuf>,
    base_url: String,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            base_url: base_url.into(),
        }
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self {
            path: None,
            base_url: String::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.log.enabled {
            Self::new(&config.log.path, config.corpus.base_url())
        } else {
            Self::disabled()
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Truncate the log file, creating it if needed.
    pub fn clear(&self) -> io::Result<()> {
        match &self.path {
            Some(path) => File::create(path).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Append one line per id. Failures are logged and swallowed.
    pub fn record_all<'a>(&self, ids: impl IntoIterator<Item = &'a ArticleId>) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = self.append(path, ids) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write activity log");
        }
    }

    pub fn record(&self, id: &ArticleId) {
        self.record_all(std::iter::once(id));
    }

    fn append<'a>(&self, path: &Path, ids: impl IntoIterator<Item = &'a ArticleId>) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
        let mut buf = String::new();
        for id in ids {
            buf.push_str(&format!(
                "[{}] {}\n",
                timestamp,
                display_url(&self.base_url, id)
            ));
        }
        file.write_all(buf.as_bytes())
    }
}
