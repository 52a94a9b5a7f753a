use crate::error::Result;

/// Flat string key-value namespace that session records are persisted in.
///
/// Each call is atomic for the single key it touches; there is no multi-key
/// transaction.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// List every key currently stored
    fn keys(&self) -> Result<Vec<String>>;
}
