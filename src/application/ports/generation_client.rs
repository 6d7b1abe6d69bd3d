use async_trait::async_trait;

#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Produces a text completion for the rendered conversation prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("request timed out")]
    Timeout,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
