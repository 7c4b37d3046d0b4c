// Exercises the homework API client against a local stub server.

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use homework_bot::api::{HomeworkApi, PracticumClient};
use homework_bot::config::Config;
use homework_bot::review::check_response;
use homework_bot::WatchError;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(endpoint: String) -> Config {
    Config {
        practicum_token: "secret-token".to_string(),
        telegram_token: "unused".to_string(),
        telegram_chat_id: 1,
        endpoint,
        retry_interval: Duration::from_secs(600),
        backoff_interval: Duration::from_secs(5),
        request_timeout: Duration::from_secs(5),
        initial_timestamp: 0,
    }
}

async fn statuses(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "OAuth secret-token")
        .unwrap_or(false);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "not_authenticated"})),
        );
    }

    let from_date: i64 = params
        .get("from_date")
        .and_then(|v| v.parse().ok())
        .unwrap_or(-1);

    (
        StatusCode::OK,
        Json(json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved", "id": 17}],
            "current_date": from_date + 60
        })),
    )
}

#[tokio::test]
async fn test_sends_token_and_from_date() {
    let base = spawn_stub(Router::new().route("/api/statuses/", get(statuses))).await;
    let client = PracticumClient::new(&config(format!("{}/api/statuses/", base))).unwrap();

    let body = client.homework_statuses(1_700_000_000).await.unwrap();
    let result = check_response(body).unwrap();

    assert_eq!(result.current_date, 1_700_000_060);
    assert_eq!(result.latest().unwrap().homework_name, "hw1");
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let base = spawn_stub(Router::new().route("/api/statuses/", get(statuses))).await;
    let mut cfg = config(format!("{}/api/statuses/", base));
    cfg.practicum_token = "wrong".to_string();
    let client = PracticumClient::new(&cfg).unwrap();

    match client.homework_statuses(0).await {
        Err(WatchError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("not_authenticated"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let app = Router::new().route("/api/statuses/", get(|| async { "<html>oops</html>" }));
    let base = spawn_stub(app).await;
    let client = PracticumClient::new(&config(format!("{}/api/statuses/", base))).unwrap();

    let err = client.homework_statuses(0).await.unwrap_err();
    assert!(matches!(err, WatchError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Bind then drop to get a local port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PracticumClient::new(&config(format!("http://{}/", addr))).unwrap();
    let err = client.homework_statuses(0).await.unwrap_err();
    assert!(err.is_transport(), "got {:?}", err);
}
