use super::*;
use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode as HttpStatus},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{error::SearchError, settings::SearchSettings};

#[derive(Clone, Copy)]
enum Reply {
    Users,
    RateLimited,
    TooManyRequests,
    ServerError,
    Malformed,
    MissingItems,
    Slow,
}

#[derive(Clone)]
struct SearchServerState {
    reply: Reply,
    seen_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    seen_headers: Arc<Mutex<Vec<HeaderMap>>>,
}

async fn handle_search(
    State(state): State<SearchServerState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (HttpStatus, String) {
    state.seen_queries.lock().await.push(query);
    state.seen_headers.lock().await.push(headers);
    match state.reply {
        Reply::Users => (
            HttpStatus::OK,
            r#"{"total_count":2,"incomplete_results":false,"items":[
                {"id":1,"login":"octocat","type":"User"},
                {"id":2,"login":"octodog","type":"User"}
            ]}"#
            .to_string(),
        ),
        Reply::RateLimited => (
            HttpStatus::FORBIDDEN,
            r#"{"message":"API rate limit exceeded"}"#.to_string(),
        ),
        Reply::TooManyRequests => (HttpStatus::TOO_MANY_REQUESTS, String::new()),
        Reply::ServerError => (HttpStatus::BAD_GATEWAY, "upstream down".to_string()),
        Reply::Malformed => (HttpStatus::OK, "{\"items\": [".to_string()),
        Reply::MissingItems => (
            HttpStatus::OK,
            r#"{"message":"Validation Failed"}"#.to_string(),
        ),
        Reply::Slow => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (HttpStatus::OK, r#"{"items":[]}"#.to_string())
        }
    }
}

async fn spawn_search_server(reply: Reply) -> anyhow::Result<(String, SearchServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = SearchServerState {
        reply,
        seen_queries: Arc::new(Mutex::new(Vec::new())),
        seen_headers: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/search/users", get(handle_search))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/search/users"), state))
}

fn client_for(endpoint: &str, timeout: Duration, token: Option<&str>) -> GithubUserSearch {
    let mut settings = SearchSettings::defaults()
        .and_then(|settings| settings.with_endpoint(endpoint))
        .expect("endpoint");
    settings.request_timeout = timeout;
    settings.github_token = token.map(str::to_string);
    GithubUserSearch::new(&settings).expect("client")
}

#[tokio::test]
async fn parses_items_and_sends_paging_parameters() {
    let (endpoint, state) = spawn_search_server(Reply::Users).await.expect("spawn server");
    let client = client_for(&endpoint, Duration::from_secs(5), None);

    let users = client.search_users("octo cat", 1, 20).await.expect("search");
    assert_eq!(
        users,
        vec![UserRef::new(1, "octocat"), UserRef::new(2, "octodog")]
    );

    let queries = state.seen_queries.lock().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("q").map(String::as_str), Some("octo cat"));
    assert_eq!(queries[0].get("page").map(String::as_str), Some("1"));
    assert_eq!(queries[0].get("per_page").map(String::as_str), Some("20"));

    let headers = state.seen_headers.lock().await;
    let user_agent = headers[0]
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(user_agent.starts_with("user-search-form/"));
    assert_eq!(
        headers[0].get("accept").and_then(|v| v.to_str().ok()),
        Some("application/vnd.github+json")
    );
    assert!(headers[0].get("authorization").is_none());
}

#[tokio::test]
async fn sends_bearer_token_when_configured() {
    let (endpoint, state) = spawn_search_server(Reply::Users).await.expect("spawn server");
    let client = client_for(&endpoint, Duration::from_secs(5), Some("ghp_test"));

    client.search_users("octocat", 1, 20).await.expect("search");

    let headers = state.seen_headers.lock().await;
    assert_eq!(
        headers[0].get("authorization").and_then(|v| v.to_str().ok()),
        Some("Bearer ghp_test")
    );
}

#[tokio::test]
async fn forbidden_maps_to_rate_limit() {
    let (endpoint, _state) = spawn_search_server(Reply::RateLimited)
        .await
        .expect("spawn server");
    let client = client_for(&endpoint, Duration::from_secs(5), None);

    let err = client.search_users("octocat", 1, 20).await.expect_err("403");
    assert!(matches!(err, SearchError::RateLimited { status } if status == StatusCode::FORBIDDEN));
    assert!(err.code().is_rate_limit());
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limit() {
    let (endpoint, _state) = spawn_search_server(Reply::TooManyRequests)
        .await
        .expect("spawn server");
    let client = client_for(&endpoint, Duration::from_secs(5), None);

    let err = client.search_users("octocat", 1, 20).await.expect_err("429");
    assert!(matches!(err, SearchError::RateLimited { .. }));
}

#[tokio::test]
async fn other_statuses_surface_as_unexpected() {
    let (endpoint, _state) = spawn_search_server(Reply::ServerError)
        .await
        .expect("spawn server");
    let client = client_for(&endpoint, Duration::from_secs(5), None);

    let err = client.search_users("octocat", 1, 20).await.expect_err("502");
    assert!(
        matches!(err, SearchError::UnexpectedStatus { status } if status == StatusCode::BAD_GATEWAY)
    );
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let (endpoint, _state) = spawn_search_server(Reply::Malformed)
        .await
        .expect("spawn server");
    let client = client_for(&endpoint, Duration::from_secs(5), None);

    let err = client.search_users("octocat", 1, 20).await.expect_err("bad json");
    assert!(matches!(err, SearchError::Malformed(_)));
}

#[tokio::test]
async fn success_status_without_items_is_malformed() {
    let (endpoint, _state) = spawn_search_server(Reply::MissingItems)
        .await
        .expect("spawn server");
    let client = client_for(&endpoint, Duration::from_secs(5), None);

    let err = client
        .search_users("octocat", 1, 20)
        .await
        .expect_err("missing items");
    assert!(matches!(err, SearchError::Malformed(_)));
}

#[tokio::test]
async fn slow_server_times_out() {
    let (endpoint, _state) = spawn_search_server(Reply::Slow).await.expect("spawn server");
    let client = client_for(&endpoint, Duration::from_millis(100), None);

    let err = client.search_users("octocat", 1, 20).await.expect_err("timeout");
    assert!(matches!(err, SearchError::Timeout(timeout) if timeout == Duration::from_millis(100)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

    let client = client_for(
        &format!("http://{addr}/search/users"),
        Duration::from_secs(5),
        None,
    );
    let err = client.search_users("octocat", 1, 20).await.expect_err("refused");
    assert!(matches!(err, SearchError::Transport(_)));
}
