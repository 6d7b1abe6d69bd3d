use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{AgentError, TurnReply};
use crate::domain::SessionId;
use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::{error_response, read_audio_field};

#[derive(Serialize)]
struct SpokenResponse {
    transcription: String,
    llm_text: String,
    murf_audio_url: String,
}

#[derive(Serialize)]
struct FallbackResponse {
    transcription: String,
    llm_text: String,
    murf_audio_url: Option<String>,
    fallback: bool,
    fallback_text: String,
}

#[derive(Serialize)]
struct EchoResponse {
    murf_audio_url: String,
}

fn turn_reply_response(reply: TurnReply) -> Response {
    match reply {
        TurnReply::Spoken {
            transcription,
            reply_text,
            audio_url,
        } => (
            StatusCode::OK,
            Json(SpokenResponse {
                transcription,
                llm_text: reply_text,
                murf_audio_url: audio_url,
            }),
        )
            .into_response(),
        TurnReply::Fallback {
            transcription,
            reply_text,
            fallback_text,
        } => (
            StatusCode::OK,
            Json(FallbackResponse {
                transcription,
                llm_text: reply_text,
                murf_audio_url: None,
                fallback: true,
                fallback_text,
            }),
        )
            .into_response(),
    }
}

fn agent_error_response(e: AgentError) -> Response {
    let status = if e.is_unconfigured() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    error_response(status, e.to_string())
}

#[tracing::instrument(skip_all, fields(session = %session_id))]
pub async fn agent_chat_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let session_id = SessionId::from(session_id);

    // This endpoint never answers 5xx: an unreadable upload degrades the same
    // way silent audio does.
    let audio = match read_audio_field(&mut multipart).await {
        Ok(upload) => {
            tracing::debug!(
                filename = %upload.filename,
                bytes = upload.data.len(),
                "Received conversational audio"
            );
            upload.data
        }
        Err((_, detail)) => {
            tracing::warn!(detail = %detail, "Unreadable upload, treating as silent audio");
            Bytes::new()
        }
    };

    let reply = state.agent_service.converse(&session_id, &audio).await;

    if let TurnReply::Spoken { transcription, .. } = &reply {
        tracing::info!(transcription = %sanitize_text(transcription), "Conversational turn completed");
    }

    turn_reply_response(reply)
}

#[tracing::instrument(skip(state, multipart))]
pub async fn llm_query_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let upload = match read_audio_field(&mut multipart).await {
        Ok(u) => u,
        Err((status, detail)) => return error_response(status, detail),
    };

    tracing::debug!(filename = %upload.filename, bytes = upload.data.len(), "Received query audio");

    match state.agent_service.query_once(&upload.data).await {
        Ok(reply) => turn_reply_response(reply),
        Err(e) => {
            tracing::error!(error = %e, "Single-shot query failed");
            agent_error_response(e)
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn tts_echo_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let upload = match read_audio_field(&mut multipart).await {
        Ok(u) => u,
        Err((status, detail)) => return error_response(status, detail),
    };

    match state.agent_service.echo(&upload.data).await {
        Ok(audio_url) => (
            StatusCode::OK,
            Json(EchoResponse {
                murf_audio_url: audio_url,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Echo failed");
            agent_error_response(e)
        }
    }
}
