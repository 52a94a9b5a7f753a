//! Storage key layout.
//!
//! Every record of user `U` lives under `session_U_*`: the in-progress
//! session at `session_U_current`, archived ones at `session_U_<instant>`.

use crate::models::{UserId, CURRENT_SESSION_ID};
use chrono::{DateTime, SecondsFormat, Utc};

const KEY_PREFIX: &str = "session";

pub fn user_prefix(user: &UserId) -> String {
    format!("{}_{}_", KEY_PREFIX, user)
}

pub fn current_key(user: &UserId) -> String {
    format!("{}{}", user_prefix(user), CURRENT_SESSION_ID)
}

pub fn historical_key(user: &UserId, timestamp: &DateTime<Utc>) -> String {
    format!(
        "{}{}",
        user_prefix(user),
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// True only for archived-session keys owned by `user`.
///
/// The suffix must parse as an instant; a plain prefix match would also
/// accept keys of a user whose identity extends this one (`a` vs `a_b`).
pub fn is_historical_key(user: &UserId, key: &str) -> bool {
    key.strip_prefix(&user_prefix(user))
        .map(|suffix| DateTime::parse_from_rfc3339(suffix).is_ok())
        .unwrap_or(false)
}
