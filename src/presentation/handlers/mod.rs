mod agent;
mod generate_text;
mod health;
mod speech;
mod transcribe;
mod upload;
mod voices;

pub use agent::{agent_chat_handler, llm_query_handler, tts_echo_handler};
pub use generate_text::{GenerateTextParams, generate_text_handler};
pub use health::health_handler;
pub use speech::{GenerateVoiceRequest, TtsRequest, generate_voice_handler, tts_handler};
pub use transcribe::transcribe_file_handler;
pub use upload::upload_audio_handler;
pub use voices::voices_handler;

use axum::Json;
use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error body convention: `{"detail": "..."}` with the mapped status code.
#[derive(Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

pub(crate) fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDetail {
            detail: detail.into(),
        }),
    )
        .into_response()
}

pub(crate) struct UploadedAudio {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Reads the first multipart field as the uploaded audio file.
pub(crate) async fn read_audio_field(
    multipart: &mut Multipart,
) -> Result<UploadedAudio, (StatusCode, String)> {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return Err((StatusCode::BAD_REQUEST, "No file uploaded".to_string()));
        }
        Err(e) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart: {}", e),
            ));
        }
    };

    let filename = field.file_name().unwrap_or("unknown").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e)))?;

    Ok(UploadedAudio {
        filename,
        content_type,
        data,
    })
}
