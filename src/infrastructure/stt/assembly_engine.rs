use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_POLLS: u32 = 15;

/// AssemblyAI transcription: upload the audio bytes, create a transcript job,
/// then poll it to completion.
pub struct AssemblyAiEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl AssemblyAiEngine {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    pub fn with_polling(mut self, poll_interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = poll_interval;
        self.max_polls = max_polls;
        self
    }

    async fn upload(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/upload", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("authorization", &self.api_key)
            .body(audio_data.to_vec())
            .send()
            .await
            .map_err(map_transport)?;

        let response = check_status(response).await?;

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("upload body: {}", e)))?;

        Ok(upload.upload_url)
    }

    async fn create_transcript(&self, audio_url: &str) -> Result<String, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("authorization", &self.api_key)
            .json(&serde_json::json!({ "audio_url": audio_url }))
            .send()
            .await
            .map_err(map_transport)?;

        let response = check_status(response).await?;

        let transcript: TranscriptResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("transcript body: {}", e)))?;

        Ok(transcript.id)
    }

    async fn poll_transcript(&self, id: &str) -> Result<String, TranscriptionError> {
        for _ in 0..self.max_polls {
            let response = self
                .client
                .get(format!("{}/v2/transcript/{}", self.base_url, id))
                .timeout(REQUEST_TIMEOUT)
                .header("authorization", &self.api_key)
                .send()
                .await
                .map_err(map_transport)?;

            let response = check_status(response).await?;

            let transcript: TranscriptResponse = response.json().await.map_err(|e| {
                TranscriptionError::InvalidResponse(format!("transcript body: {}", e))
            })?;

            match transcript.status.as_str() {
                "completed" => {
                    let text = transcript.text.unwrap_or_default();
                    tracing::info!(chars = text.len(), "AssemblyAI transcription completed");
                    return Ok(text.trim().to_string());
                }
                "error" => {
                    return Err(TranscriptionError::TranscriptionFailed(
                        transcript
                            .error
                            .unwrap_or_else(|| "unknown transcription error".to_string()),
                    ));
                }
                _ => tokio::time::sleep(self.poll_interval).await,
            }
        }

        Err(TranscriptionError::Timeout)
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    id: String,
    status: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl TranscriptionEngine for AssemblyAiEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        tracing::debug!(bytes = audio_data.len(), "Sending audio to AssemblyAI");

        let audio_url = self.upload(audio_data).await?;
        let transcript_id = self.create_transcript(&audio_url).await?;
        self.poll_transcript(&transcript_id).await
    }
}

fn map_transport(e: reqwest::Error) -> TranscriptionError {
    if e.is_timeout() {
        TranscriptionError::Timeout
    } else {
        TranscriptionError::ApiRequestFailed(format!("request: {}", e))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TranscriptionError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(TranscriptionError::ApiRequestFailed(format!(
        "status {}: {}",
        status, body
    )))
}
