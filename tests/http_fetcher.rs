//! HTTP fetcher and end-to-end search against a local article server.

mod common;

use axum::routing::get;
use axum::Router;
use common::serve;
use std::time::Duration;
use wikilinks::config::{Config, HttpConfig};
use wikilinks::crawl::PathFinder;
use wikilinks::fetch::{HttpFetcher, PageFetcher};
use wikilinks_core::error::{FetchError, SearchError};
use wikilinks_core::models::ArticleId;

fn fetcher(base_url: &str) -> HttpFetcher {
    HttpFetcher::new(base_url, &HttpConfig::default()).unwrap()
}

#[tokio::test]
async fn fetches_page_body() {
    let base = serve(common::graph_pages(&[("A", "B")])).await;
    let body = fetcher(&base).fetch(&ArticleId::new("A")).await.unwrap();
    assert!(body.contains(r#"<a href="/wiki/B">B</a>"#));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let base = serve(common::graph_pages(&[("A", "B")])).await;
    let err = fetcher(&base)
        .fetch(&ArticleId::new("Missing"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FetchError::Status {
            url: format!("{}/Missing", base),
            status: 404
        }
    );
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    // Bind and drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher(&format!("http://{}/wiki", addr))
        .fetch(&ArticleId::new("A"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Connection { .. }), "{:?}", err);
}

#[tokio::test]
async fn slow_response_times_out_as_connection_error() {
    let app = Router::new().route(
        "/wiki/{*id}",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "too late"
        }),
    );
    let base = common::serve_router(app).await;
    let http = HttpConfig {
        timeout_secs: 1,
        ..HttpConfig::default()
    };

    let err = HttpFetcher::new(&base, &http)
        .unwrap()
        .fetch(&ArticleId::new("Slow"))
        .await
        .unwrap_err();
    match err {
        FetchError::Connection { url, message } => {
            assert_eq!(url, format!("{}/Slow", base));
            assert!(message.contains("timed out"), "{}", message);
        }
        other => panic!("expected connection error, got {:?}", other),
    }
}

#[tokio::test]
async fn end_to_end_search_over_http() {
    let base = serve(common::graph_pages(&[
        ("Xbox_360_S", "Microsoft"),
        ("Microsoft", "Nintendo"),
        ("Nintendo", "Nintendo_3DS"),
        ("Xbox_360_S", "Console"),
    ]))
    .await;

    let mut cfg = Config::minimal();
    cfg.corpus.base_url = Some(base);
    cfg.log.enabled = false;

    let outcome = PathFinder::from_config(&cfg)
        .unwrap()
        .search_path(&ArticleId::new("Xbox_360_S"), &ArticleId::new("Nintendo_3DS"))
        .await
        .unwrap();

    let path = outcome.path().unwrap();
    let ids: Vec<_> = path.hops.iter().map(|h| h.article.as_str()).collect();
    assert_eq!(ids, vec!["Microsoft", "Nintendo", "Nintendo_3DS"]);
    assert_eq!(path.hops[2].sentence, "Nintendo mentions Nintendo_3DS.");
    assert_eq!(outcome.stats().pages_fetched, 4);
}

#[tokio::test]
async fn http_failure_mid_search_aborts() {
    let mut pages = common::graph_pages(&[("A", "B"), ("A", "C"), ("C", "Goal")]);
    pages.remove("B");
    let base = serve(pages).await;

    let mut cfg = Config::minimal();
    cfg.corpus.base_url = Some(base);
    cfg.log.enabled = false;

    let err = PathFinder::from_config(&cfg)
        .unwrap()
        .search_path(&ArticleId::new("A"), &ArticleId::new("Goal"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Fetch(FetchError::Status { status: 404, .. })
    ));
}
