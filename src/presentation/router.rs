use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    agent_chat_handler, generate_text_handler, generate_voice_handler, health_handler,
    llm_query_handler, transcribe_file_handler, tts_echo_handler, tts_handler,
    upload_audio_handler, voices_handler,
};
use crate::presentation::state::AppState;

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/voices", get(voices_handler))
        .route("/generate-voice", post(generate_voice_handler))
        .route("/tts", post(tts_handler))
        .route("/upload-audio", post(upload_audio_handler))
        .route("/transcribe/file", post(transcribe_file_handler))
        .route("/tts/echo", post(tts_echo_handler))
        .route("/llm/query", post(llm_query_handler))
        .route("/agent/chat/{session_id}", post(agent_chat_handler))
        .route("/generate-text", post(generate_text_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
