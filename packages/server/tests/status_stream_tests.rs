//! SSE progress stream over GET /status-stream/:request_id.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use gifting_core::kernel::TestDependencies;
use std::time::Duration;
use test_context::test_context;

fn stream_request(request_id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/status-stream/{}", request_id))
        .body(Body::empty())
        .expect("valid request")
}

/// `data:` payloads of an SSE body, in order.
fn data_lines(body: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(body)
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(str::to_string)
        .collect()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn finished_request_yields_complete_and_closes(ctx: &TestHarness) {
    let mocks = TestDependencies::new();
    mocks.status.publish("done-1", "Complete").await;
    let app = ctx.app_with(mocks);

    let response = tower::ServiceExt::oneshot(app, stream_request("done-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(data_lines(&body), vec![r#"{"status":"Complete"}"#.to_string()]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn progress_is_streamed_until_complete(ctx: &TestHarness) {
    let mocks = TestDependencies::new();
    let board = mocks.status.clone();
    board.publish("job-7", "Extracting card details...").await;
    let app = ctx.app_with(mocks);

    let publisher = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        board.publish("job-7", "Complete").await;
    });

    let (status, body) = send(app, stream_request("job-7")).await;
    publisher.await.unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        data_lines(&body),
        vec![
            r#"{"status":"Extracting card details..."}"#.to_string(),
            r#"{"status":"Complete"}"#.to_string(),
        ]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn error_status_ends_the_stream(ctx: &TestHarness) {
    let mocks = TestDependencies::new();
    mocks
        .status
        .publish("bad-3", "Error: Failed to save upload")
        .await;
    let app = ctx.app_with(mocks);

    let (_, body) = send(app, stream_request("bad-3")).await;

    assert_eq!(
        data_lines(&body),
        vec![r#"{"status":"Error: Failed to save upload"}"#.to_string()]
    );
}
