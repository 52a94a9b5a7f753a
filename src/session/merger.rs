use super::store::SessionStore;
use crate::models::{Session, UserId, CURRENT_SESSION_ID};
use std::collections::BTreeMap;
use tracing::debug;

/// Archived sessions keyed by id; inserting an existing id replaces it.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: BTreeMap<String, Session>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &SessionStore, user: &UserId) -> Self {
        let mut history = Self::new();
        for session in store.list_historical(user) {
            history.insert(session);
        }
        history
    }

    /// Last write wins; returns the entry that was replaced, if any.
    pub fn insert(&mut self, session: Session) -> Option<Session> {
        self.entries.insert(session.id.clone(), session)
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in id order.
    pub fn sessions(&self) -> Vec<Session> {
        self.entries.values().cloned().collect()
    }
}

/// Current (when non-empty) plus historical sessions, newest first.
///
/// The sort is stable, so sessions sharing a timestamp keep their input
/// order.
pub fn build_display_list(current: &Session, historical: &[Session]) -> Vec<Session> {
    let mut list = Vec::with_capacity(historical.len() + 1);
    if !current.is_empty() {
        let mut current = current.clone();
        current.id = CURRENT_SESSION_ID.to_string();
        list.push(current);
    }
    list.extend(historical.iter().filter(|s| !s.is_current()).cloned());
    list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    list
}

/// Archives `current` before the user switches to `target`, unless there is
/// nothing new to keep.
///
/// Nothing is archived when `current` is empty, when it is `target` itself,
/// or when it is an unmodified copy of an entry already in `history`
/// (tracked through `source_id`). The archived entry is added to `history`
/// and returned.
pub fn reconcile_on_switch(
    store: &SessionStore,
    user: &UserId,
    current: &Session,
    history: &mut History,
    target: &Session,
) -> Option<Session> {
    if current.is_empty() || target.is_current() || current.same_content(target) {
        return None;
    }

    if let Some(source) = current.source_id.as_deref() {
        if history.contains(source) {
            debug!("current session unchanged since loading {}; not archiving", source);
            return None;
        }
    }

    let archived = store.archive(user, current)?;
    if history.insert(archived.clone()).is_some() {
        debug!("replaced history entry {}", archived.id);
    }
    Some(archived)
}

/// Archives a non-empty `current` unconditionally, then drops the current key.
///
/// Archive happens first: an interruption in between leaves a duplicate,
/// never a lost conversation.
pub fn reconcile_on_logout(
    store: &SessionStore,
    user: &UserId,
    current: &Session,
) -> Option<Session> {
    let archived = if current.is_empty() {
        None
    } else {
        store.archive(user, current)
    };
    store.delete_current(user);
    archived
}
