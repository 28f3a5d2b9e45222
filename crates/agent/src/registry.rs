//! Session registry
//!
//! Shared table of live booking sessions keyed by session identifier.
//! Lookup/insert/remove on the table are short critical sections behind a
//! `parking_lot::RwLock`; each session sits behind its own async mutex so a
//! turn (which may await the chat model) serializes per identifier while
//! different sessions proceed in parallel. The idle sweep `try_lock`s each
//! session and skips any with a turn in flight.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use fleur_core::Language;

use crate::session::BookingSession;
use crate::AgentError;

/// Shared, concurrency-safe session table
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<BookingSession>>>>,
    timeout: Duration,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            timeout,
            max_sessions,
        }
    }

    /// Fetch the session for `id`, creating it on first sight.
    pub fn get_or_create(
        &self,
        id: &str,
        language: Language,
    ) -> Result<Arc<Mutex<BookingSession>>, AgentError> {
        if let Some(session) = self.sessions.read().get(id) {
            return Ok(Arc::clone(session));
        }

        let mut sessions = self.sessions.write();
        // Racing creators may both reach here; the second finds the entry.
        if let Some(session) = sessions.get(id) {
            return Ok(Arc::clone(session));
        }
        if sessions.len() >= self.max_sessions {
            return Err(AgentError::CapacityExceeded(sessions.len()));
        }
        let session = Arc::new(Mutex::new(BookingSession::new(language)));
        sessions.insert(id.to_string(), Arc::clone(&session));
        debug!(session_id = id, "session created");
        Ok(session)
    }

    /// Drop a session (finalized booking or boundary cleanup)
    pub fn remove(&self, id: &str) {
        if self.sessions.write().remove(id).is_some() {
            debug!(session_id = id, "session removed");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Reclaim sessions idle past the timeout. Sessions whose mutex is held
    /// (a turn is in flight) are left alone; the turn itself refreshes the
    /// idle timestamp.
    pub fn sweep(&self) -> usize {
        let candidates: Vec<(String, Arc<Mutex<BookingSession>>)> = self
            .sessions
            .read()
            .iter()
            .map(|(id, session)| (id.clone(), Arc::clone(session)))
            .collect();

        let mut expired = Vec::new();
        for (id, session) in candidates {
            if let Ok(guard) = session.try_lock() {
                if guard.idle_for() > self.timeout {
                    expired.push(id);
                }
            }
        }

        let removed = expired.len();
        if removed > 0 {
            let mut sessions = self.sessions.write();
            for id in &expired {
                sessions.remove(id);
            }
            info!(removed, "idle sessions reclaimed");
        }
        removed
    }

    /// Spawn the periodic idle sweep. Flip the watch sender to stop it.
    pub fn start_sweep_task(
        self: &Arc<Self>,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        registry.sweep();
                    }
                    _ = shutdown.changed() => {
                        if *shutdown.borrow() {
                            debug!("sweep task shutting down");
                            break;
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(timeout: Duration) -> SessionRegistry {
        SessionRegistry::new(timeout, 4)
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_entry() {
        let registry = registry(Duration::from_secs(60));
        let a = registry.get_or_create("s1", Language::English).unwrap();
        let b = registry.get_or_create("s1", Language::English).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_capacity_limit() {
        let registry = registry(Duration::from_secs(60));
        for i in 0..4 {
            registry.get_or_create(&format!("s{i}"), Language::English).unwrap();
        }
        let err = registry.get_or_create("s5", Language::English).unwrap_err();
        assert!(matches!(err, AgentError::CapacityExceeded(4)));
        // An existing id still resolves at capacity.
        assert!(registry.get_or_create("s0", Language::English).is_ok());
    }

    #[tokio::test]
    async fn test_sweep_reclaims_only_idle_sessions() {
        let registry = registry(Duration::from_millis(10));
        registry.get_or_create("old", Language::English).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        let fresh = registry.get_or_create("fresh", Language::Hindi).unwrap();
        fresh.lock().await.touch();

        assert_eq!(registry.sweep(), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.get_or_create("fresh", Language::Hindi).is_ok());
    }

    #[tokio::test]
    async fn test_sweep_skips_locked_sessions() {
        let registry = registry(Duration::from_millis(1));
        let session = registry.get_or_create("busy", Language::English).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let guard = session.lock().await;
        assert_eq!(registry.sweep(), 0, "in-flight session must survive the sweep");
        drop(guard);
        assert_eq!(registry.sweep(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = registry(Duration::from_secs(60));
        registry.get_or_create("s1", Language::English).unwrap();
        registry.remove("s1");
        assert!(registry.is_empty());
    }
}
