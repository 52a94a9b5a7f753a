use crate::models::{now, Message, Session, UserId, CURRENT_SESSION_ID};
use crate::session::{
    build_display_list, reconcile_on_logout, reconcile_on_switch, History, SessionStore,
};
use tracing::debug;

/// Owns the active session of one user and keeps it persisted.
///
/// Every mutating call is followed by exactly one `save_current` with the
/// state as it stands after the mutation.
pub struct ChatController {
    store: SessionStore,
    user: UserId,
    current: Session,
    history: History,
}

impl ChatController {
    /// Resumes the user's stored current session, or starts an empty one.
    pub fn open(store: SessionStore, user: UserId) -> Self {
        let current = store
            .load_current(&user)
            .unwrap_or_else(Session::new_current);
        let history = History::load(&store, &user);
        debug!(
            "opened chat for {} ({} messages, {} archived sessions)",
            user,
            current.messages.len(),
            history.len()
        );
        Self {
            store,
            user,
            current,
            history,
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn current(&self) -> &Session {
        &self.current
    }

    pub fn messages(&self) -> &[Message] {
        &self.current.messages
    }

    /// Attached document as `(name, text)`.
    pub fn document(&self) -> Option<(&str, &str)> {
        let name = self.current.pdf_name.as_deref()?;
        Some((name, self.current.pdf_text.as_deref().unwrap_or("")))
    }

    pub fn archived(&self) -> &History {
        &self.history
    }

    /// Current plus archived sessions, newest first.
    pub fn history(&self) -> Vec<Session> {
        build_display_list(&self.current, &self.history.sessions())
    }

    pub fn find(&self, id: &str) -> Option<Session> {
        if id == CURRENT_SESSION_ID {
            Some(self.current.clone())
        } else {
            self.history.get(id).cloned()
        }
    }

    pub fn append_message(&mut self, message: Message) {
        self.current.messages.push(message);
        self.persist();
    }

    pub fn set_document(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.current.pdf_name = Some(name.into());
        self.current.pdf_text = Some(text.into());
        self.persist();
    }

    pub fn clear_document(&mut self) {
        self.current.pdf_name = None;
        self.current.pdf_text = None;
        self.persist();
    }

    /// Makes `target` the working session, archiving the current one first
    /// when it holds anything not yet kept. Returns the archived entry.
    pub fn switch_to(&mut self, target: &Session) -> Option<Session> {
        if target.is_current() {
            return None;
        }

        let archived = reconcile_on_switch(
            &self.store,
            &self.user,
            &self.current,
            &mut self.history,
            target,
        );

        self.current = Session {
            id: CURRENT_SESSION_ID.to_string(),
            messages: target.messages.clone(),
            pdf_name: target.pdf_name.clone(),
            pdf_text: target.pdf_text.clone(),
            timestamp: now(),
            source_id: Some(target.id.clone()),
        };
        self.current = self.store.save_current(&self.user, &self.current);
        debug!("switched {} to {}", self.user, target.id);
        archived
    }

    /// Logout path: archives a non-empty current session and resets to empty.
    pub fn end_session(&mut self) -> Option<Session> {
        let archived = reconcile_on_logout(&self.store, &self.user, &self.current);
        if let Some(ref session) = archived {
            self.history.insert(session.clone());
        }
        self.current = Session::new_current();
        archived
    }

    // A mutation detaches the session from the entry it was loaded from.
    fn persist(&mut self) {
        self.current.source_id = None;
        self.current = self.store.save_current(&self.user, &self.current);
    }
}
