use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use vocara::application::ports::{TranscriptionEngine, TranscriptionError};
use vocara::infrastructure::stt::AssemblyAiEngine;

async fn serve(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

/// Mock AssemblyAI: upload and transcript creation always succeed, polls walk
/// through `poll_responses` (sticking on the last one).
async fn start_mock_assembly_server(
    poll_responses: Vec<serde_json::Value>,
) -> (String, oneshot::Sender<()>) {
    let counter = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/v2/upload",
            post(|| async { Json(json!({"upload_url": "https://cdn/audio/1"})) }),
        )
        .route(
            "/v2/transcript",
            post(|| async { Json(json!({"id": "t1", "status": "queued"})) }),
        )
        .route(
            "/v2/transcript/{id}",
            get(move || {
                let counter = Arc::clone(&counter);
                let responses = poll_responses.clone();
                async move {
                    let i = counter
                        .fetch_add(1, Ordering::SeqCst)
                        .min(responses.len() - 1);
                    Json(responses[i].clone())
                }
            }),
        );

    serve(app).await
}

fn test_engine(base_url: &str) -> AssemblyAiEngine {
    AssemblyAiEngine::new("test-key".to_string(), Some(base_url.to_string()))
        .with_polling(Duration::from_millis(10), 5)
}

#[tokio::test]
async fn given_processing_then_completed_when_transcribing_then_returns_text() {
    let (base_url, shutdown_tx) = start_mock_assembly_server(vec![
        json!({"id": "t1", "status": "processing"}),
        json!({"id": "t1", "status": "completed", "text": "  Hello from the booth "}),
    ])
    .await;

    let result = test_engine(&base_url).transcribe(b"fake audio").await;

    assert_eq!(result.unwrap(), "Hello from the booth");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_completed_without_text_when_transcribing_then_returns_empty_string() {
    let (base_url, shutdown_tx) =
        start_mock_assembly_server(vec![json!({"id": "t1", "status": "completed"})]).await;

    let result = test_engine(&base_url).transcribe(b"silent audio").await;

    assert_eq!(result.unwrap(), "");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_returns_transcription_failed() {
    let (base_url, shutdown_tx) = start_mock_assembly_server(vec![
        json!({"id": "t1", "status": "error", "error": "bad audio"}),
    ])
    .await;

    let result = test_engine(&base_url).transcribe(b"bad audio").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::TranscriptionFailed(msg)) if msg == "bad audio"
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_upload_rejected_when_transcribing_then_returns_api_error() {
    let app = Router::new().route(
        "/v2/upload",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down").into_response() }),
    );
    let (base_url, shutdown_tx) = serve(app).await;

    let result = test_engine(&base_url).transcribe(b"fake audio").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_transcript_never_completing_when_polling_then_returns_timeout() {
    let (base_url, shutdown_tx) =
        start_mock_assembly_server(vec![json!({"id": "t1", "status": "processing"})]).await;

    let engine = AssemblyAiEngine::new("test-key".to_string(), Some(base_url))
        .with_polling(Duration::from_millis(5), 3);

    let result = engine.transcribe(b"fake audio").await;

    assert!(matches!(result, Err(TranscriptionError::Timeout)));
    shutdown_tx.send(()).ok();
}
