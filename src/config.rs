//! TOML configuration.
//!
//! Every section and field is optional; missing values fall back to the
//! defaults below, so an empty file (or no file at all, see
//! [`Config::minimal`]) searches the Russian Wikipedia three levels deep.
//!
//! ```toml
//! [corpus]
//! lang = "ru"
//! # base_url = "https://ru.wikipedia.org/wiki"
//!
//! [search]
//! max_depth = 3
//! batch_size = 100
//! concurrency = 100
//!
//! [http]
//! timeout_secs = 30
//!
//! [log]
//! enabled = true
//! path = "entry_log.txt"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    /// Language edition, i.e. the first label of `<lang>.wikipedia.org`.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Overrides the article base URL derived from `lang`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Used when the start URL prompt is left empty.
    #[serde(default = "default_sample_start")]
    pub sample_start: String,
    /// Used when the goal URL prompt is left empty.
    #[serde(default = "default_sample_goal")]
    pub sample_goal: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            base_url: None,
            sample_start: default_sample_start(),
            sample_goal: default_sample_goal(),
        }
    }
}

impl CorpusConfig {
    /// Base URL articles are fetched from, without a trailing slash.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.wikipedia.org/wiki", self.lang),
        }
    }
}

fn default_lang() -> String {
    "ru".to_string()
}
fn default_sample_start() -> String {
    "https://ru.wikipedia.org/wiki/Xbox_360_S".to_string()
}
fn default_sample_goal() -> String {
    "https://ru.wikipedia.org/wiki/Nintendo_3DS".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Maximum number of hops from start to goal.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// How many frontier entries are popped per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// How many fetches may be in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_max_depth() -> usize {
    3
}
fn default_batch_size() -> usize {
    100
}
fn default_concurrency() -> usize {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!("wikilinks/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_enabled")]
    pub enabled: bool,
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: default_log_enabled(),
            path: default_log_path(),
        }
    }
}

fn default_log_enabled() -> bool {
    true
}
fn default_log_path() -> PathBuf {
    PathBuf::from("entry_log.txt")
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

fn validate(config: &Config) -> Result<()> {
    let lang = &config.corpus.lang;
    if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
        bail!("corpus.lang must be a lowercase language code, got '{}'", lang);
    }
    if let Some(url) = &config.corpus.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("corpus.base_url must be an http(s) URL, got '{}'", url);
        }
    }

    if config.search.max_depth == 0 {
        bail!("search.max_depth must be >= 1");
    }
    if config.search.batch_size == 0 {
        bail!("search.batch_size must be >= 1");
    }
    if config.search.concurrency == 0 {
        bail!("search.concurrency must be >= 1");
    }

    if config.http.timeout_secs == 0 {
        bail!("http.timeout_secs must be >= 1");
    }

    Ok(())
}
