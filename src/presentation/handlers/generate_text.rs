use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::error_response;

#[derive(Deserialize)]
pub struct GenerateTextParams {
    pub prompt: String,
}

/// Plain text completion for a prompt passed as a query parameter.
#[tracing::instrument(skip(state, params))]
pub async fn generate_text_handler(
    State(state): State<AppState>,
    Query(params): Query<GenerateTextParams>,
) -> Response {
    tracing::debug!(prompt = %sanitize_text(&params.prompt), "Processing text generation");

    let Some(generator) = state.generator.as_ref() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "generation is not configured",
        );
    };

    match generator.generate(&params.prompt).await {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Text generation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
