//! Synthetic article graphs shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use wikilinks::fetch::PageFetcher;
use wikilinks_core::error::FetchError;
use wikilinks_core::models::ArticleId;

/// Render one article page: one paragraph per outgoing link.
pub fn page_html(id: &str, children: &[&str]) -> String {
    let mut body = format!("<html><head><title>{}</title></head><body>", id);
    body.push_str(r#"<div class="nav"><a href="/wiki/Main_Page">Main</a></div>"#);
    for child in children {
        body.push_str(&format!(
            r#"<p>{} mentions <a href="/wiki/{}">{}</a>.[1]</p>"#,
            id, child, child
        ));
    }
    body.push_str("</body></html>");
    body
}

/// Build `id -> html` for every node named in `edges`.
pub fn graph_pages(edges: &[(&str, &str)]) -> HashMap<String, String> {
    let mut adjacency: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for &(parent, child) in edges {
        adjacency.entry(parent).or_default().push(child);
        adjacency.entry(child).or_default();
    }
    adjacency
        .into_iter()
        .map(|(id, children)| (id.to_string(), page_html(id, &children)))
        .collect()
}

type Pages = Arc<HashMap<String, String>>;

async fn page(Path(id): Path<String>, State(pages): State<Pages>) -> Result<Html<String>, StatusCode> {
    pages.get(&id).cloned().map(Html).ok_or(StatusCode::NOT_FOUND)
}

/// Serve `pages` under `/wiki/<id>` on a local port and return the base URL.
pub async fn serve(pages: HashMap<String, String>) -> String {
    serve_router(
        Router::new()
            .route("/wiki/{*id}", get(page))
            .with_state(Arc::new(pages)),
    )
    .await
}

/// Serve `app` on a local port and return `http://<addr>/wiki`.
pub async fn serve_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/wiki", addr)
}

/// In-memory fetcher over a synthetic graph that counts every fetch.
pub struct GraphFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl GraphFetcher {
    pub fn new(edges: &[(&str, &str)]) -> Self {
        Self {
            pages: graph_pages(edges),
            failing: HashSet::new(),
            fetches: Mutex::new(HashMap::new()),
        }
    }

    /// Drop the page of `id`, so fetching it answers HTTP 404.
    pub fn without_page(mut self, id: &str) -> Self {
        self.pages.remove(id);
        self
    }

    /// Answer `id` with HTTP 503.
    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn fetched_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.fetches.lock().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn max_fetches_per_id(&self) -> usize {
        self.fetches.lock().unwrap().values().copied().max().unwrap_or(0)
    }
}

#[async_trait]
impl PageFetcher for GraphFetcher {
    async fn fetch(&self, id: &ArticleId) -> Result<String, FetchError> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_insert(0) += 1;
        tokio::task::yield_now().await;

        let url = format!("memory:///wiki/{}", id);
        if self.failing.contains(id.as_str()) {
            return Err(FetchError::Status { url, status: 503 });
        }
        self.pages
            .get(id.as_str())
            .cloned()
            .ok_or(FetchError::Status { url, status: 404 })
    }
}
