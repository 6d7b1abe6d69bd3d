use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionId, Turn};

/// Process-wide session map. Sessions are created on first append and are
/// never evicted; an unknown session reads as empty history. The mutex
/// serializes appends so concurrent turns cannot corrupt the turn order.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Vec<Turn>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn history(&self, id: &SessionId) -> Result<Vec<Turn>, SessionStoreError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(id.as_str()).cloned().unwrap_or_default())
    }

    async fn append(&self, id: &SessionId, turn: Turn) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        sessions.entry(id.as_str().to_string()).or_default().push(turn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TurnRole;

    #[tokio::test]
    async fn given_unknown_session_when_reading_history_then_empty() {
        let store = InMemorySessionStore::new();

        let history = store.history(&SessionId::from("missing")).await.unwrap();

        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn given_appends_when_reading_history_then_order_preserved() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("s1");

        store.append(&id, Turn::user("Hello")).await.unwrap();
        store.append(&id, Turn::assistant("Hi there")).await.unwrap();

        let history = store.history(&id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, TurnRole::User);
        assert_eq!(history[0].content, "Hello");
        assert_eq!(history[1].role, TurnRole::Assistant);
        assert_eq!(history[1].content, "Hi there");
    }

    #[tokio::test]
    async fn given_two_sessions_when_appending_then_histories_isolated() {
        let store = InMemorySessionStore::new();

        store
            .append(&SessionId::from("a"), Turn::user("for a"))
            .await
            .unwrap();
        store
            .append(&SessionId::from("b"), Turn::user("for b"))
            .await
            .unwrap();

        let a = store.history(&SessionId::from("a")).await.unwrap();
        let b = store.history(&SessionId::from("b")).await.unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(a[0].content, "for a");
        assert_eq!(b[0].content, "for b");
    }

    #[tokio::test]
    async fn given_concurrent_appends_when_reading_then_all_turns_present() {
        let store = std::sync::Arc::new(InMemorySessionStore::new());
        let id = SessionId::from("shared");

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = std::sync::Arc::clone(&store);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                store.append(&id, Turn::user(format!("turn {}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let history = store.history(&id).await.unwrap();
        assert_eq!(history.len(), 16);
    }
}
