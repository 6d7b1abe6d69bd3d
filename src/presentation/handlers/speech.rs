use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::error_response;

#[derive(Deserialize)]
pub struct GenerateVoiceRequest {
    pub text: String,
    #[serde(rename = "voiceId")]
    pub voice_id: String,
}

#[derive(Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "voiceId", default)]
    pub voice_id: Option<String>,
}

#[derive(Serialize)]
struct TtsResponse {
    url: String,
}

/// Raw provider passthrough, for exercising voices from API tooling.
#[tracing::instrument(skip(state, request))]
pub async fn generate_voice_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateVoiceRequest>,
) -> Response {
    let Some(synthesizer) = state.synthesizer.as_ref() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "synthesis is not configured",
        );
    };

    match synthesizer
        .synthesize_raw(&request.text, &request.voice_id)
        .await
    {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Speech generation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn tts_handler(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> Response {
    let text = match request.text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => return error_response(StatusCode::BAD_REQUEST, "Text is required"),
    };

    let Some(synthesizer) = state.synthesizer.as_ref() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "synthesis is not configured",
        );
    };

    let voice_id = request
        .voice_id
        .unwrap_or_else(|| state.settings.synthesis.voice_id.clone());

    match synthesizer.synthesize(&text, &voice_id).await {
        Ok(url) => (StatusCode::OK, Json(TtsResponse { url })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Speech generation failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error calling speech API: {}", e),
            )
        }
    }
}
