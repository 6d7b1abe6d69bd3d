use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::{error_response, read_audio_field};

#[derive(Serialize)]
struct TranscriptionResponse {
    transcription: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_file_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let upload = match read_audio_field(&mut multipart).await {
        Ok(u) => u,
        Err((status, detail)) => return error_response(status, detail),
    };

    let Some(transcriber) = state.transcriber.as_ref() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "transcription is not configured",
        );
    };

    match transcriber.transcribe(&upload.data).await {
        Ok(text) => {
            tracing::info!(transcription = %sanitize_text(&text), "File transcribed");
            (
                StatusCode::OK,
                Json(TranscriptionResponse {
                    transcription: text,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
