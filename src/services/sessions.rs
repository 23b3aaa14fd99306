use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use tokio::sync::Mutex as AsyncMutex;

use crate::models::Session;

pub type SessionHandle = Arc<AsyncMutex<Session>>;

/// Ephemeral per-conversation state, keyed by session id. Each session sits
/// behind its own async lock so one conversation's turns run one at a time
/// while other conversations proceed independently.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionHandle>>,
    ttl: Duration,
    welcome: String,
}

impl SessionStore {
    pub fn new(ttl: Duration, welcome: impl Into<String>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            welcome: welcome.into(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the session for `id`, creating it (with a fresh id when none is
    /// given) on first use.
    pub fn get_or_create(&self, id: Option<&str>) -> (String, SessionHandle) {
        let id = id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let mut sessions = self.lock();
        self.purge_expired(&mut sessions);

        let handle = sessions
            .entry(id.clone())
            .or_insert_with(|| {
                tracing::info!(session = %id, "starting new session");
                Arc::new(AsyncMutex::new(Session::new(id.clone(), &self.welcome, self.ttl)))
            })
            .clone();
        (id, handle)
    }

    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        let mut sessions = self.lock();
        self.purge_expired(&mut sessions);
        sessions.get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Sessions busy in a turn are skipped; they get checked again next time.
    fn purge_expired(&self, sessions: &mut HashMap<String, SessionHandle>) {
        let now = Utc::now();
        sessions.retain(|id, handle| match handle.try_lock() {
            Ok(session) if session.is_expired(now) => {
                tracing::debug!(session = %id, "discarding expired session");
                false
            }
            _ => true,
        });
    }
}
