//! Link extraction from article HTML.
//!
//! Scans every `<p>` block of a page. Each anchor in a block whose `href`
//! points into the corpus (`/wiki/<id>`) becomes an outgoing edge, and the
//! block's cleaned text becomes that edge's sentence. Links sharing a block
//! share a sentence. When one article is linked from several blocks of the
//! same page, the last block wins.
//!
//! Extraction never fails: malformed markup or a page without prose simply
//! yields an empty [`LinkMap`].

use percent_encoding::percent_decode_str;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::ArticleId;

/// Outgoing links of one page, keyed by target, valued by context sentence.
pub type LinkMap = BTreeMap<ArticleId, String>;

/// Path prefix of in-corpus article links.
pub const WIKI_PATH_PREFIX: &str = "/wiki/";

/// Turns page content into outgoing links with their context sentences.
///
/// Implementations must be pure: identical content yields an identical map.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, content: &str) -> LinkMap;
}

static SELECTORS: OnceLock<BlockSelectors> = OnceLock::new();
static FOOTNOTE: OnceLock<Regex> = OnceLock::new();

struct BlockSelectors {
    paragraph: Selector,
    anchor: Selector,
}

impl BlockSelectors {
    fn get() -> &'static Self {
        SELECTORS.get_or_init(|| Self {
            paragraph: Selector::parse("p").expect("paragraph selector must parse"),
            anchor: Selector::parse("a[href]").expect("anchor selector must parse"),
        })
    }
}

/// Extractor for HTML pages laid out like Wikipedia articles.
#[derive(Debug, Clone)]
pub struct HtmlLinkExtractor {
    prefix: String,
}

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self::with_prefix(WIKI_PATH_PREFIX)
    }

    /// Use a different in-corpus path prefix (must include both slashes).
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn article_id(&self, href: &str) -> Option<ArticleId> {
        let raw = href.strip_prefix(self.prefix.as_str())?;
        let raw = raw.split('#').next().unwrap_or_default();
        if raw.is_empty() {
            return None;
        }
        let decoded = percent_decode_str(raw).decode_utf8_lossy();
        Some(ArticleId::new(decoded.into_owned()))
    }
}

impl Default for HtmlLinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, content: &str) -> LinkMap {
        let selectors = BlockSelectors::get();
        let document = Html::parse_document(content);
        let mut links = LinkMap::new();

        for block in document.select(&selectors.paragraph) {
            let mut sentence: Option<String> = None;
            for anchor in block.select(&selectors.anchor) {
                let Some(id) = anchor
                    .value()
                    .attr("href")
                    .and_then(|href| self.article_id(href))
                else {
                    continue;
                };
                let text = sentence
                    .get_or_insert_with(|| clean_sentence(&block.text().collect::<String>()));
                links.insert(id, text.clone());
            }
        }

        links
    }
}

/// Strip footnote markers like `[12]` or `[note 3]` and non-breaking spaces.
pub fn clean_sentence(text: &str) -> String {
    let footnote = FOOTNOTE
        .get_or_init(|| Regex::new(r"\[[^\[\]]*\d\]").expect("footnote regex must compile"));
    let text = text.replace('\u{a0}', " ");
    footnote.replace_all(&text, "").trim().to_string()
}
