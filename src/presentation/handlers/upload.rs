use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::presentation::state::AppState;

use super::{error_response, read_audio_field};

#[derive(Serialize)]
struct UploadResponse {
    filename: String,
    content_type: String,
    size: u64,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_audio_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let upload = match read_audio_field(&mut multipart).await {
        Ok(u) => u,
        Err((status, detail)) => return error_response(status, detail),
    };

    // Only the final path component of the client-supplied name is kept.
    let filename = std::path::Path::new(&upload.filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let dir = &state.settings.uploads.dir;
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        tracing::error!(error = %e, "Failed to create upload directory");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to store file: {}", e),
        );
    }

    let path = dir.join(&filename);
    if let Err(e) = tokio::fs::write(&path, &upload.data).await {
        tracing::error!(error = %e, path = %path.display(), "Failed to store file");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to store file: {}", e),
        );
    }

    tracing::info!(
        filename = %filename,
        bytes = upload.data.len(),
        "Audio file stored"
    );

    (
        StatusCode::OK,
        Json(UploadResponse {
            filename,
            content_type: upload.content_type,
            size: upload.data.len() as u64,
        }),
    )
        .into_response()
}
