mod filesystem;
pub mod keys;
mod memory;
pub mod merger;
mod storage;
mod store;

pub use filesystem::FilesystemKvStore;
pub use memory::MemoryKvStore;
pub use merger::{build_display_list, reconcile_on_logout, reconcile_on_switch, History};
pub use storage::KeyValueStore;
pub use store::SessionStore;
