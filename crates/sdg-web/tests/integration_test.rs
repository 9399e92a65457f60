//! Integration tests for sdg-web crate.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sdg_common::test_utils::fixtures;
use sdg_config::{ColumnsConfig, Config};
use sdg_data::{normalize, read_raw_table};
use sdg_web::{router, serve_with_shutdown, AppState};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

fn state_from(csv: &str) -> AppState {
    let raw = read_raw_table(csv.as_bytes(), &ColumnsConfig::default()).unwrap();
    AppState::new(normalize(raw), Config::default())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_api_charts_scenario() {
    let state = state_from(&fixtures::csv_with_rows(&[
        ("IND_A", "Fiji ", "2019", "10"),
        ("IND_A", "fiji", "2019", "20"),
        ("IND_A", "Tonga", "2020", "5"),
    ]));

    let (status, json) = get_json(router(state), "/api/charts?indicator=IND_A").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "charts");
    assert_eq!(json["totals"]["fiji"], 30.0);
    assert_eq!(json["totals"]["tonga"], 5.0);
    assert_eq!(json["pivot"]["fiji"]["2019"], 15.0);
    assert_eq!(json["box_summary"]["tonga"]["upper_fence"], 5.0);
}

#[tokio::test]
async fn test_api_charts_unknown_indicator() {
    let app = router(state_from(fixtures::SAMPLE_CSV));
    let (status, json) = get_json(app, "/api/charts?indicator=IND_NONE").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "empty");
    assert_eq!(json["indicator"], "IND_NONE");
}

#[tokio::test]
async fn test_api_charts_repeated_requests_hit_cache() {
    let state = state_from(fixtures::SAMPLE_CSV);
    let app = router(state.clone());

    for _ in 0..2 {
        let (status, _) =
            get_json(app.clone(), "/api/charts?indicator=SL_TLF_UEM&periods=2019").await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(state.pipeline.metrics().misses(), 1);
    assert_eq!(state.pipeline.metrics().hits(), 1);
}

#[tokio::test]
async fn test_api_catalog() {
    let app = router(state_from(fixtures::SAMPLE_CSV));
    let (status, json) = get_json(app, "/api/catalog").await;

    assert_eq!(status, StatusCode::OK);
    let categories = json.as_array().unwrap();
    assert_eq!(categories.len(), 4);
    assert_eq!(categories[0]["key"], "economic_growth");
    assert_eq!(categories[1]["indicators"][0]["code"], "SL_TLF_UEM");
}

#[tokio::test]
async fn test_serve_until_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_shutdown(
        listener,
        state_from(fixtures::SAMPLE_CSV),
        async {
            let _ = rx.await;
        },
    ));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("\"status\":\"ok\""));

    tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
