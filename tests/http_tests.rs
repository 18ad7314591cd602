//! End-to-end identification over HTTP against an in-process axum server.

use std::path::Path;
use std::time::Duration;

use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use version_solver::fetch::http::{FetchConfig, HttpFetcher};
use version_solver::{FetchError, Fetcher, Identification, VersionIdentifier};

/// Serve `app` on an ephemeral loopback port and return its base URL
async fn spawn_site(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(FetchConfig {
        timeout: Duration::from_secs(5),
        ..FetchConfig::default()
    })
    .unwrap()
}

fn identifier() -> VersionIdentifier<HttpFetcher> {
    let identifier = VersionIdentifier::new(fetcher());
    identifier
        .load_versions_signatures(
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/wordpress_versions.json"),
        )
        .unwrap();
    identifier
}

#[tokio::test]
async fn test_http_fetch_success_and_failure() {
    let app = Router::new()
        .route("/readme.html", get(|| async { "hello" }))
        .route(
            "/private.html",
            get(|| async { (StatusCode::FORBIDDEN, "denied") }),
        );
    let base = spawn_site(app).await;
    let fetcher = fetcher();

    let body = fetcher.fetch(&format!("{base}readme.html")).await.unwrap();
    assert_eq!(body, b"hello");

    let err = fetcher
        .fetch(&format!("{base}private.html"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 403, .. }));

    let err = fetcher.fetch(&format!("{base}missing.js")).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_http_body_size_limit() {
    let app = Router::new().route("/big.js", get(|| async { "x".repeat(1024) }));
    let base = spawn_site(app).await;
    let fetcher = HttpFetcher::new(FetchConfig {
        max_body_size: 16,
        ..FetchConfig::default()
    })
    .unwrap();

    let err = fetcher.fetch(&format!("{base}big.js")).await.unwrap_err();
    assert!(matches!(err, FetchError::BodyTooLarge { limit: 16, .. }));
}

#[tokio::test]
async fn test_http_body_size_limit_without_content_length() {
    fn chunked(chunks: usize) -> Body {
        let parts = (0..chunks).map(|_| Ok::<_, std::io::Error>("x".repeat(64)));
        Body::from_stream(futures::stream::iter(parts))
    }

    let app = Router::new()
        .route("/big.js", get(|| async { chunked(4) }))
        .route("/small.js", get(|| async { chunked(1) }));
    let base = spawn_site(app).await;
    let fetcher = HttpFetcher::new(FetchConfig {
        max_body_size: 100,
        ..FetchConfig::default()
    })
    .unwrap();

    let err = fetcher.fetch(&format!("{base}big.js")).await.unwrap_err();
    assert!(matches!(err, FetchError::BodyTooLarge { limit: 100, .. }));

    let body = fetcher.fetch(&format!("{base}small.js")).await.unwrap();
    assert_eq!(body.len(), 64);
}

#[tokio::test]
async fn test_http_identify_exact_match() {
    let app = Router::new()
        .route("/readme.html", get(|| async { "ReadMe file for 2.0 version." }))
        .route("/style.css", get(|| async { "This is the style file." }))
        .route(
            "/wp-includes/js/file.js",
            get(|| async { "file.js for 2.0 version." }),
        );
    let base = spawn_site(app).await;

    let version = identifier().identify_version(&base).await;

    assert_eq!(
        version,
        Identification::Exact {
            version: "2.0".to_string()
        }
    );
}

#[tokio::test]
async fn test_http_identify_closest_match_with_missing_file() {
    // readme.html is removed by the operator, which is common hardening advice
    let app = Router::new()
        .route("/style.css", get(|| async { "This is the style file." }))
        .route(
            "/wp-includes/js/file.js",
            get(|| async { "file.js for 1.0 version." }),
        );
    let base = spawn_site(app).await;

    let report = identifier().identify_version_report(&base).await;

    assert_eq!(report.identification.label(), "1.0");
    assert!(!report.identification.is_exact());
    assert_eq!(report.files_fetched, 2);
    assert_eq!(report.paths_requested, 3);
}

#[tokio::test]
async fn test_http_identify_base_url_without_trailing_slash() {
    let app = Router::new()
        .route("/blog/readme.html", get(|| async { "ReadMe file for 1.0 version." }))
        .route("/blog/style.css", get(|| async { "This is the style file." }))
        .route(
            "/blog/wp-includes/js/file.js",
            get(|| async { "file.js for 1.0 version." }),
        );
    let base = spawn_site(app).await;

    let version = identifier()
        .identify_version(&format!("{base}blog"))
        .await;

    assert_eq!(version.label(), "1.0");
    assert!(version.is_exact());
}

#[tokio::test]
async fn test_http_identify_unrelated_site_is_unknown() {
    let app = Router::new().route("/readme.html", get(|| async { "Not WordPress" }));
    let base = spawn_site(app).await;

    assert!(identifier().identify_version(&base).await.is_unknown());
}
