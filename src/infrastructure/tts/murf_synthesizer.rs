use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

const DEFAULT_BASE_URL: &str = "https://api.murf.ai";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Murf speech-generation client. The provider returns a URL to the rendered
/// audio file rather than the audio itself.
pub struct MurfSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MurfSynthesizer {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    #[serde(rename = "voiceId")]
    voice_id: &'a str,
    text: &'a str,
    format: &'a str,
}

#[async_trait]
impl SpeechSynthesizer for MurfSynthesizer {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<String, SynthesisError> {
        let body = self.synthesize_raw(text, voice_id).await?;

        body.get("audioFile")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or(SynthesisError::MissingAudioUrl)
    }

    async fn synthesize_raw(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<serde_json::Value, SynthesisError> {
        let request = SpeechRequest {
            voice_id,
            text,
            format: "mp3",
        };

        tracing::debug!(voice_id = %voice_id, chars = text.len(), "Requesting speech generation");

        let response = self
            .client
            .post(format!("{}/v1/speech/generate", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport)?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("parse response: {}", e)))
    }

    async fn list_voices(&self) -> Result<serde_json::Value, SynthesisError> {
        let response = self
            .client
            .get(format!("{}/v1/speech/voices", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("api-key", &self.api_key)
            .send()
            .await
            .map_err(map_transport)?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("parse response: {}", e)))
    }
}

fn map_transport(e: reqwest::Error) -> SynthesisError {
    if e.is_timeout() {
        SynthesisError::Timeout
    } else {
        SynthesisError::ApiRequestFailed(format!("request: {}", e))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SynthesisError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(SynthesisError::ApiRequestFailed(format!(
        "status {}: {}",
        status, body
    )))
}
