use crate::core::session::ChatSession;
use crate::providers::ChatProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub type SharedSession = Arc<Mutex<ChatSession>>;

/// Live conversations keyed by session id. Each session keeps its own mutex
/// so concurrent callers of one conversation are serialized rather than
/// interleaved; the registry lock only guards the map itself.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self, provider: Arc<dyn ChatProvider>) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(ChatSession::new(provider)));
        self.sessions.write().await.insert(id, session.clone());
        log::info!("created chat session {}", id);
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AppState {
    pub sessions: SessionRegistry,
    pub provider: Arc<dyn ChatProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BankbotError;
    use crate::providers::Message;
    use async_trait::async_trait;

    struct NullProvider;

    #[async_trait]
    impl crate::providers::ChatProvider for NullProvider {
        async fn complete(&self, _messages: &[Message]) -> Result<String, BankbotError> {
            Ok(String::new())
        }

        fn model(&self) -> &str {
            "null-model"
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_the_same_session() {
        let registry = SessionRegistry::new();
        let provider: Arc<dyn ChatProvider> = Arc::new(NullProvider);

        let (id, created) = registry.create(provider).await;
        let fetched = registry.get(id).await.expect("session should exist");

        assert!(Arc::ptr_eq(&created, &fetched));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let registry = SessionRegistry::new();
        assert!(registry.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let registry = SessionRegistry::new();
        let provider: Arc<dyn ChatProvider> = Arc::new(NullProvider);

        let (a, session_a) = registry.create(provider.clone()).await;
        let (b, _session_b) = registry.create(provider).await;
        assert_ne!(a, b);

        session_a
            .lock()
            .await
            .replace_transcript(vec![Message::user("only in a")]);

        let b_history_len = registry.get(b).await.unwrap().lock().await.history().len();
        assert_eq!(b_history_len, 0);
    }
}
