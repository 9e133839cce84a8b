use chrono::{DateTime, Duration, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Live login sessions, keyed by session id.
/// Held in process memory, so a restart logs everyone out.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
}

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: i32,
    expires_at: DateTime<Utc>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user_id`. Returns the new session id and its expiry.
    pub async fn create(&self, user_id: i32, ttl_secs: i64) -> (Uuid, DateTime<Utc>) {
        let id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::seconds(ttl_secs);
        self.sessions
            .lock()
            .await
            .insert(id, SessionEntry { user_id, expires_at });
        (id, expires_at)
    }

    /// True if the session exists, belongs to `user_id` and has not expired.
    pub async fn is_active(&self, session_id: Uuid, user_id: i32) -> bool {
        let sessions = self.sessions.lock().await;
        sessions
            .get(&session_id)
            .map(|s| s.user_id == user_id && s.expires_at > Utc::now())
            .unwrap_or(false)
    }

    pub async fn destroy(&self, session_id: Uuid) -> bool {
        self.sessions.lock().await.remove(&session_id).is_some()
    }

    /// Drop expired sessions. Returns how many were removed.
    pub async fn cleanup(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }
}
