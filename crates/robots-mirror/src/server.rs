//! HTTP server for the robots mirror
//!
//! Provides `/`, `/robots` and `/health`.

use crate::error::ServeError;
use crate::mirror::RobotsMirror;
use crate::render::{render_pre, POINTER_TEXT};
use crate::types::HealthResponse;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub mirror: RobotsMirror,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(mirror: RobotsMirror) -> Self {
        Self {
            mirror,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/robots", get(robots))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, addr: SocketAddr) -> std::io::Result<()> {
    let router = create_router(state);
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Refresh the cached file, then point the caller at `/robots`
async fn index(State(state): State<SharedState>) -> Html<String> {
    state.mirror.refresh().await;
    Html(render_pre(POINTER_TEXT))
}

/// Serve the cached robots.txt, fetching it first if there is no copy
async fn robots(State(state): State<SharedState>) -> Result<Response, ServeError> {
    let served = state.mirror.robots_txt().await?;
    let cache_header = if served.from_cache { "HIT" } else { "MISS" };

    Ok(([("X-Cache", cache_header)], Html(render_pre(&served.text))).into_response())
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let cache_stats = state.mirror.cache().stats().await;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        upstream: state.mirror.upstream().url().to_string(),
        cache: cache_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use robots_upstream::UpstreamClient;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;
    use text_file_cache::TextFileCache;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ROBOTS_BODY: &str = "User-agent: *\nDisallow: /search\nAllow: /";
    const ROBOTS_HTML: &str = "<pre>User-agent: *<br>Disallow: /search<br>Allow: /</pre>";
    const POINTER_HTML: &str = "<pre>Please go to /robots to read the robots.txt file.</pre>";

    fn create_test_state(upstream_url: &str, cache_path: PathBuf) -> SharedState {
        let upstream = UpstreamClient::new(upstream_url).unwrap();
        let cache = TextFileCache::new(cache_path);
        Arc::new(ServerState::new(RobotsMirror::new(upstream, cache)))
    }

    fn upstream_url(server: &MockServer) -> String {
        format!("{}/robots.txt", server.uri())
    }

    async fn mount_upstream(server: &MockServer, status: u16, body: &str, calls: u64) {
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    async fn send_get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn read_cache(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[tokio::test]
    async fn test_robots_fetches_and_caches() {
        let server = MockServer::start().await;
        mount_upstream(&server, 200, ROBOTS_BODY, 1).await;

        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("robots.txt");
        let router = create_router(create_test_state(&upstream_url(&server), cache_path.clone()));

        let response = send_get(router, "/robots").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-cache"], "MISS");
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(body_string(response).await, ROBOTS_HTML);

        assert_eq!(read_cache(&cache_path), ROBOTS_BODY);
    }

    #[tokio::test]
    async fn test_robots_serves_cache_when_upstream_unreachable() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("robots.txt");
        std::fs::write(&cache_path, "User-agent: *\nDisallow: /cached").unwrap();

        let state = create_test_state("http://127.0.0.1:1/robots.txt", cache_path);
        let response = send_get(create_router(state), "/robots").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-cache"], "HIT");
        assert_eq!(
            body_string(response).await,
            "<pre>User-agent: *<br>Disallow: /cached</pre>"
        );
    }

    #[tokio::test]
    async fn test_robots_upstream_not_found() {
        let server = MockServer::start().await;
        mount_upstream(&server, 404, "Not Found", 1).await;

        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("robots.txt");
        let router = create_router(create_test_state(&upstream_url(&server), cache_path.clone()));

        let response = send_get(router, "/robots").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["detail"], "Failed to fetch robots.txt");
        assert!(!cache_path.exists());
    }

    #[tokio::test]
    async fn test_robots_upstream_redirect_is_echoed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/moved.txt"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/moved.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved body"))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("robots.txt");
        let router = create_router(create_test_state(&upstream_url(&server), cache_path.clone()));

        let response = send_get(router, "/robots").await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert!(!cache_path.exists());
    }

    #[tokio::test]
    async fn test_robots_upstream_empty_body() {
        let server = MockServer::start().await;
        mount_upstream(&server, 200, "", 1).await;

        let dir = tempdir().unwrap();
        let router = create_router(create_test_state(
            &upstream_url(&server),
            dir.path().join("robots.txt"),
        ));

        let response = send_get(router, "/robots").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["detail"], "Failed to fetch robots.txt");
    }

    #[tokio::test]
    async fn test_robots_upstream_unreachable_without_cache() {
        let dir = tempdir().unwrap();
        let state = create_test_state("http://127.0.0.1:1/robots.txt", dir.path().join("robots.txt"));

        let response = send_get(create_router(state), "/robots").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_robots_is_idempotent_with_cache() {
        let server = MockServer::start().await;
        // Only the first request may reach upstream
        mount_upstream(&server, 200, ROBOTS_BODY, 1).await;

        let dir = tempdir().unwrap();
        let router = create_router(create_test_state(
            &upstream_url(&server),
            dir.path().join("robots.txt"),
        ));

        let first = body_string(send_get(router.clone(), "/robots").await).await;

        let second = send_get(router.clone(), "/robots").await;
        assert_eq!(second.headers()["x-cache"], "HIT");
        let second = body_string(second).await;

        let third = body_string(send_get(router, "/robots").await).await;

        assert_eq!(first, ROBOTS_HTML);
        assert_eq!(second, first);
        assert_eq!(third, first);
    }

    #[tokio::test]
    async fn test_index_refreshes_cache() {
        let server = MockServer::start().await;
        mount_upstream(&server, 200, ROBOTS_BODY, 1).await;

        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("robots.txt");
        std::fs::write(&cache_path, "stale").unwrap();
        let router = create_router(create_test_state(&upstream_url(&server), cache_path.clone()));

        let response = send_get(router, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, POINTER_HTML);

        assert_eq!(read_cache(&cache_path), ROBOTS_BODY);
    }

    #[tokio::test]
    async fn test_index_ignores_upstream_error() {
        let server = MockServer::start().await;
        mount_upstream(&server, 503, "", 1).await;

        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("robots.txt");
        std::fs::write(&cache_path, "kept").unwrap();
        let router = create_router(create_test_state(&upstream_url(&server), cache_path.clone()));

        let response = send_get(router, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, POINTER_HTML);
        assert_eq!(read_cache(&cache_path), "kept");
    }

    #[tokio::test]
    async fn test_index_ignores_unreachable_upstream() {
        let dir = tempdir().unwrap();
        let state = create_test_state("http://127.0.0.1:1/robots.txt", dir.path().join("robots.txt"));

        let response = send_get(create_router(state), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, POINTER_HTML);
    }

    #[tokio::test]
    async fn test_concurrent_misses_leave_a_whole_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ROBOTS_BODY))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("robots.txt");
        let router = create_router(create_test_state(&upstream_url(&server), cache_path.clone()));

        let requests = (0..4).map(|_| send_get(router.clone(), "/robots"));
        for response in futures::future::join_all(requests).await {
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_string(response).await, ROBOTS_HTML);
        }

        assert_eq!(read_cache(&cache_path), ROBOTS_BODY);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("robots.txt");
        std::fs::write(&cache_path, "abc").unwrap();
        let state = create_test_state("http://127.0.0.1:1/robots.txt", cache_path);

        let response = send_get(create_router(state), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["uptime_secs"].as_u64().is_some());
        assert_eq!(json["upstream"], "http://127.0.0.1:1/robots.txt");
        assert_eq!(json["cache"]["present"], true);
        assert_eq!(json["cache"]["size"], 3);
    }

    #[test]
    fn test_server_state_new() {
        let dir = tempdir().unwrap();
        let state = create_test_state("http://127.0.0.1:1/robots.txt", dir.path().join("r.txt"));

        // started_at should be close to now
        let diff = (Utc::now() - state.started_at).num_seconds();
        assert!((0..5).contains(&diff));
    }
}
