//! Turning user-supplied URLs into article identifiers.
//!
//! Accepted form: `https://<lang>.wikipedia.org/wiki/<id>`, where `<lang>` is
//! the configured language edition. A bare identifier without any `/` (e.g.
//! `Nintendo_3DS`) is accepted as-is. Percent-encoded ids are decoded.

use percent_encoding::percent_decode_str;
use url::Url;
use wikilinks_core::extract::WIKI_PATH_PREFIX;
use wikilinks_core::models::ArticleId;

/// Why a URL was rejected before any search started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Not an https URL on `wikipedia.org`.
    #[error("Wrong URL!")]
    WrongUrl,

    /// A Wikipedia URL, but for another language edition.
    #[error("Only the '{expected}' language edition is searched, got '{found}'")]
    WrongLang { expected: String, found: String },

    /// Right host, but not an article path.
    #[error("Wiki URL for parsing must be in format like \"https://{lang}.wikipedia.org/wiki/SOME_ARTICLE\"")]
    NotWiki { lang: String },
}

/// Validate `raw` against the `lang` edition and return its article id.
pub fn validate_url(raw: &str, lang: &str) -> Result<ArticleId, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::WrongUrl);
    }
    if !raw.contains('/') && !raw.contains(':') {
        return Ok(decode(raw));
    }

    let url = Url::parse(raw).map_err(|_| ValidationError::WrongUrl)?;
    if url.scheme() != "https" {
        return Err(ValidationError::WrongUrl);
    }
    let host = url.host_str().ok_or(ValidationError::WrongUrl)?;
    let (label, domain) = host.split_once('.').ok_or(ValidationError::WrongUrl)?;
    if domain != "wikipedia.org" {
        return Err(ValidationError::WrongUrl);
    }
    if label != lang {
        return Err(ValidationError::WrongLang {
            expected: lang.to_string(),
            found: label.to_string(),
        });
    }

    let not_wiki = || ValidationError::NotWiki {
        lang: lang.to_string(),
    };
    let id = url.path().strip_prefix(WIKI_PATH_PREFIX).ok_or_else(not_wiki)?;
    if id.is_empty() {
        return Err(not_wiki());
    }
    Ok(decode(id))
}

fn decode(raw: &str) -> ArticleId {
    ArticleId::new(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}
