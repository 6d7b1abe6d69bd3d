use async_trait::async_trait;

use crate::domain::{SessionId, Turn};

/// Per-session conversation history. Sessions are created on first reference
/// and live for the lifetime of the store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn history(&self, id: &SessionId) -> Result<Vec<Turn>, SessionStoreError>;

    async fn append(&self, id: &SessionId, turn: Turn) -> Result<(), SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
