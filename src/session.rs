//! Session store
//!
//! In-memory map of chat sessions. One session per client id, mutated only
//! under the store's write lock; nothing is persisted across restarts.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::advisor::{AdvisorSession, TurnReply};
use crate::conversation::Message;

/// Shared handle to all live chat sessions
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, AdvisorSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Route one user turn into the session, creating it on first contact.
    /// Returns the advisor reply and the session epoch the turn ran under.
    pub async fn handle_message(&self, session_id: Uuid, text: &str) -> (TurnReply, u64) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id).or_insert_with(|| {
            info!(%session_id, "Session created");
            AdvisorSession::new()
        });

        let reply = session.handle_message(text);
        (reply, session.epoch())
    }

    /// Append a delayed advisor message (the next quiz question), unless the
    /// session was reset or dropped since the append was scheduled. Returns
    /// whether the message reached the log.
    pub async fn append_delayed(&self, session_id: Uuid, epoch: u64, text: &str) -> bool {
        let mut sessions = self.sessions.write().await;

        let Some(session) = sessions.get_mut(&session_id) else {
            debug!(%session_id, "Dropping delayed message for unknown session");
            return false;
        };

        if session.epoch() != epoch {
            debug!(
                %session_id,
                scheduled_epoch = epoch,
                current_epoch = session.epoch(),
                "Dropping stale delayed message"
            );
            return false;
        }

        session.append_advisor(text);
        true
    }

    /// Ordered transcript for a session, if it exists
    pub async fn history(&self, session_id: Uuid) -> Option<Vec<Message>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .map(|session| session.log().messages().cloned().collect())
    }

    /// Reset a session in place. Creates nothing: resetting an unknown
    /// session is a no-op.
    pub async fn reset(&self, session_id: Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session_id) {
            Some(session) => {
                session.reset();
                true
            }
            None => false,
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sessions_are_created_on_first_message() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        assert_eq!(store.session_count().await, 0);

        let (reply, epoch) = store.handle_message(id, "how do I save?").await;
        assert_eq!(epoch, 0);
        assert_eq!(reply.messages.len(), 1);
        assert_eq!(store.session_count().await, 1);

        let history = store.history(id).await.expect("session exists");
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.handle_message(a, "quiz").await;
        store.handle_message(b, "tell me about debt").await;

        assert_eq!(store.history(a).await.expect("session a").len(), 3);
        assert_eq!(store.history(b).await.expect("session b").len(), 2);
    }

    #[tokio::test]
    async fn test_delayed_append_lands_on_live_session() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();

        store.handle_message(id, "quiz").await;
        let (reply, epoch) = store.handle_message(id, "1").await;
        let question = reply.delayed_question.expect("next question scheduled");

        assert!(store.append_delayed(id, epoch, &question).await);
        let history = store.history(id).await.expect("session exists");
        assert_eq!(
            history.last().map(|m| m.text.clone()),
            Some(question)
        );
    }

    #[tokio::test]
    async fn test_stale_delayed_append_is_dropped_after_reset() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();

        store.handle_message(id, "quiz").await;
        let (reply, epoch) = store.handle_message(id, "1").await;
        let question = reply.delayed_question.expect("next question scheduled");

        // Reset supersedes the pending delayed append.
        assert!(store.reset(id).await);
        assert!(!store.append_delayed(id, epoch, &question).await);

        let history = store.history(id).await.expect("session exists");
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_delayed_append_for_unknown_session_is_dropped() {
        let store = SessionStore::new();
        assert!(!store.append_delayed(Uuid::new_v4(), 0, "Question 2/5: ...").await);
    }

    #[tokio::test]
    async fn test_reset_unknown_session_is_noop() {
        let store = SessionStore::new();
        assert!(!store.reset(Uuid::new_v4()).await);
        assert_eq!(store.session_count().await, 0);
    }
}
