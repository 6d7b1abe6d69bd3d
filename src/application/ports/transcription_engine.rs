use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribes raw audio bytes into plain text.
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("request timed out")]
    Timeout,
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
