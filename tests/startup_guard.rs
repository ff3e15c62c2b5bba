use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::{Router, middleware, routing::get};
use pico_backend::create_app;
use pico_backend::middlewares::startup_guard::startup_guard;
use pico_backend::test_helpers::unreachable_config;
use tower::util::ServiceExt; // for oneshot

async fn send(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.expect("request failed");
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap_or("").to_string());
    let body = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    (status, content_type, String::from_utf8(body.to_vec()).expect("utf8"))
}

#[tokio::test]
async fn unreachable_database_returns_fixed_500() {
    let app = create_app(unreachable_config());
    let (status, content_type, body) = send(app, "/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Database connection failed");
    assert!(content_type.unwrap_or_default().starts_with("text/plain"));
}

#[tokio::test]
async fn unmatched_route_is_guarded_too() {
    let app = create_app(unreachable_config());
    let (status, _, body) = send(app, "/nope").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Database connection failed");
}

#[tokio::test]
async fn failure_is_identical_across_requests() {
    let app = create_app(unreachable_config());

    for _ in 0..3 {
        let (status, _, body) = send(app.clone(), "/health").await;
        assert_eq!(status.as_u16(), 500);
        assert_eq!(body, "Database connection failed");
    }
}

#[tokio::test]
async fn handler_never_runs_after_connection_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let config = Arc::new(unreachable_config());

    let app = Router::new()
        .route(
            "/",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    "handler output"
                }
            }),
        )
        .layer(middleware::from_fn_with_state(config, startup_guard));

    let (status, _, body) = send(app, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Database connection failed");
    assert!(!body.contains("handler output"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn config_is_untouched_by_failed_attempts() {
    let config = Arc::new(unreachable_config());
    let snapshot = (*config).clone();

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .layer(middleware::from_fn_with_state(config.clone(), startup_guard));

    let (status, _, _) = send(app.clone(), "/").await;
    assert_eq!(status.as_u16(), 500);
    let (status, _, _) = send(app, "/").await;
    assert_eq!(status.as_u16(), 500);

    assert_eq!(*config, snapshot);
    assert_eq!(format!("{:?}", config), format!("{:?}", snapshot));
}
