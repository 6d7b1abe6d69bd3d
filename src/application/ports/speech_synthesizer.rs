use async_trait::async_trait;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` with the given voice and returns the generated-audio URL.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<String, SynthesisError>;

    /// Synthesizes and returns the provider's raw response body.
    async fn synthesize_raw(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<serde_json::Value, SynthesisError>;

    /// Lists the provider's available voices, passed through verbatim.
    async fn list_voices(&self) -> Result<serde_json::Value, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("request timed out")]
    Timeout,
    #[error("no audio file in response")]
    MissingAudioUrl,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
