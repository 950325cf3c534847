//! In-memory session manager.
//!
//! A session binds a random UUID v4 to a username. It is valid until
//! `created_at + ttl`; lookups never extend it.

pub mod cookie;

pub use cookie::{SessionCookies, SESSION_COOKIE_NAME};

use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::RwLock, task::JoinHandle, time::Instant};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    username: String,
    created_at: Instant,
}

impl Session {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

#[derive(Debug)]
pub struct SessionManager {
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionManager {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a new session for `username`.
    pub async fn create(&self, username: &str) -> Session {
        let mut sessions = self.sessions.write().await;
        let mut id = Uuid::new_v4();
        while sessions.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let session = Session {
            id,
            username: username.to_string(),
            created_at: Instant::now(),
        };
        sessions.insert(id, session.clone());
        debug!(session_id = %id, "session created");
        session
    }

    /// Resolve a live session. Expired entries are dropped on the way.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&id) {
                None => return None,
                Some(session) if !session.is_expired(self.ttl) => return Some(session.clone()),
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write().await;
        if sessions
            .get(&id)
            .is_some_and(|session| session.is_expired(self.ttl))
        {
            sessions.remove(&id);
            debug!(session_id = %id, "session expired");
        }
        None
    }

    /// Remove a session. Returns `true` if it existed.
    pub async fn destroy(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop every expired session and return how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.ttl));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Periodically purge expired sessions until the handle is aborted.
    pub fn spawn_reaper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = self.purge_expired().await;
                if purged > 0 {
                    debug!("purged {} expired sessions", purged);
                }
            }
        })
    }
}
