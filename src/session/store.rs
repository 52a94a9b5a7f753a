use super::keys::{current_key, historical_key, is_historical_key};
use super::storage::KeyValueStore;
use crate::models::{now, Session, UserId, CURRENT_SESSION_ID};
use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, warn};

/// Persists one user's sessions in a [`KeyValueStore`].
///
/// Nothing here returns an error: unreadable or corrupt entries are treated
/// as absent and failed writes are logged, leaving the caller's in-memory
/// state authoritative.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn load_current(&self, user: &UserId) -> Option<Session> {
        let key = current_key(user);
        let raw = match self.backend.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("failed to read {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(mut session) => {
                session.id = CURRENT_SESSION_ID.to_string();
                Some(session)
            }
            Err(e) => {
                warn!("discarding corrupt current session {}: {}", key, e);
                self.remove(&key);
                None
            }
        }
    }

    /// Writes `session` as the current session, stamped with the save instant.
    ///
    /// An empty session is not stored; the current key is removed instead.
    /// Returns the session as stamped.
    pub fn save_current(&self, user: &UserId, session: &Session) -> Session {
        let mut stamped = session.clone();
        stamped.id = CURRENT_SESSION_ID.to_string();
        stamped.timestamp = now();

        if stamped.is_empty() {
            self.delete_current(user);
        } else {
            self.write(&current_key(user), &stamped);
        }
        stamped
    }

    /// All archived sessions of `user`, unordered.
    pub fn list_historical(&self, user: &UserId) -> Vec<Session> {
        let keys = match self.backend.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("failed to list sessions for {}: {}", user, e);
                return Vec::new();
            }
        };

        keys.into_iter()
            .filter(|key| is_historical_key(user, key))
            .filter_map(|key| {
                let raw = match self.backend.get(&key) {
                    Ok(raw) => raw?,
                    Err(e) => {
                        warn!("failed to read {}: {}", key, e);
                        return None;
                    }
                };
                match serde_json::from_str::<Session>(&raw) {
                    Ok(mut session) => {
                        session.id = key;
                        Some(session)
                    }
                    Err(e) => {
                        warn!("skipping unparsable history entry {}: {}", key, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Stores a snapshot of `session` under a historical id derived from its
    /// timestamp.
    ///
    /// An entry already stored under that id is only replaced when it holds
    /// the same content. Otherwise the instant moves forward one millisecond
    /// at a time until a free id is found. Empty sessions are never archived.
    pub fn archive(&self, user: &UserId, session: &Session) -> Option<Session> {
        if session.is_empty() {
            return None;
        }

        let mut timestamp = session.timestamp;
        let mut id = historical_key(user, &timestamp);
        while self.is_taken_by_other(&id, session) {
            timestamp += Duration::milliseconds(1);
            id = historical_key(user, &timestamp);
        }

        let archived = Session {
            id: id.clone(),
            timestamp,
            source_id: None,
            ..session.clone()
        };
        self.write(&id, &archived);
        debug!("archived session {} ({} messages)", id, archived.messages.len());
        Some(archived)
    }

    pub fn delete_current(&self, user: &UserId) {
        self.remove(&current_key(user));
    }

    /// Unreadable keys count as free; unparsable entries count as taken.
    fn is_taken_by_other(&self, key: &str, session: &Session) -> bool {
        match self.backend.get(key) {
            Ok(Some(raw)) => serde_json::from_str::<Session>(&raw)
                .map(|stored| !stored.same_content(session))
                .unwrap_or(true),
            Ok(None) => false,
            Err(e) => {
                warn!("failed to read {}: {}", key, e);
                false
            }
        }
    }

    fn write(&self, key: &str, session: &Session) {
        let content = match serde_json::to_string(session) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to serialize session {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.backend.set(key, &content) {
            warn!("failed to write {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!("failed to remove {}: {}", key, e);
        }
    }
}
