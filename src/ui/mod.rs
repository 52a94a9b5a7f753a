mod output;

pub use output::{display_history, display_message, display_session, history_label};
