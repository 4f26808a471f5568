use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::{Context, error::Result};

/// Session information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub graph_id: String,
    pub current_task_id: String,
    pub status_message: Option<String>,
    #[serde(skip)]
    pub context: Context,
}

impl Session {
    pub fn new_from_task(sid: String, task_name: &str) -> Self {
        Self {
            id: sid,
            graph_id: "default".to_string(),
            current_task_id: task_name.to_string(),
            status_message: None,
            context: Context::new(),
        }
    }
}

/// Trait for storing and retrieving sessions
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, session: Session) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Session>>;
    /// Returns whether a session was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// In-memory implementation of SessionStorage.
///
/// With a time-to-live, a session that has not been saved within the TTL is
/// dropped: `get` treats it as missing and every `save` sweeps the map.
pub struct InMemorySessionStorage {
    sessions: Arc<DashMap<String, StoredSession>>,
    ttl: Option<Duration>,
}

struct StoredSession {
    session: Session,
    saved_at: Instant,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: None,
        }
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: Some(ttl),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Remove every expired session, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| stored.saved_at.elapsed() < ttl);
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            debug!(purged, "expired sessions removed");
        }
        purged
    }

    fn is_expired(&self, stored: &StoredSession) -> bool {
        self.ttl
            .is_some_and(|ttl| stored.saved_at.elapsed() >= ttl)
    }
}

impl Default for InMemorySessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn save(&self, session: Session) -> Result<()> {
        self.purge_expired();
        self.sessions.insert(
            session.id.clone(),
            StoredSession {
                session,
                saved_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        // The map guard must be dropped before an expired entry is removed.
        let found = self
            .sessions
            .get(id)
            .map(|stored| (stored.session.clone(), self.is_expired(&stored)));

        match found {
            Some((_, true)) => {
                self.sessions.remove(id);
                debug!(session_id = id, "session expired");
                Ok(None)
            }
            Some((session, false)) => Ok(Some(session)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.sessions.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_without_ttl_stay() {
        let storage = InMemorySessionStorage::new();
        storage
            .save(Session::new_from_task("s1".to_string(), "start"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(storage.purge_expired(), 0);
        assert!(storage.get("s1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let storage = InMemorySessionStorage::with_ttl(Duration::from_millis(50));
        storage
            .save(Session::new_from_task("old".to_string(), "start"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(storage.get("old").await.unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn save_sweeps_expired_sessions() {
        let storage = InMemorySessionStorage::with_ttl(Duration::from_millis(50));
        for id in ["a", "b"] {
            storage
                .save(Session::new_from_task(id.to_string(), "start"))
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(80)).await;

        storage
            .save(Session::new_from_task("fresh".to_string(), "start"))
            .await
            .unwrap();
        assert_eq!(storage.len(), 1);
        assert!(storage.get("fresh").await.unwrap().is_some());
    }
}
