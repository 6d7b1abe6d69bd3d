use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::presentation::state::AppState;

use super::error_response;

/// Provider voice-catalog passthrough.
#[tracing::instrument(skip(state))]
pub async fn voices_handler(State(state): State<AppState>) -> Response {
    let Some(synthesizer) = state.synthesizer.as_ref() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "synthesis is not configured",
        );
    };

    match synthesizer.list_voices().await {
        Ok(voices) => (StatusCode::OK, Json(voices)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Voice listing failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch voices: {}", e),
            )
        }
    }
}
