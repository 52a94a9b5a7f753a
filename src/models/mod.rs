mod session;
mod user;

pub use session::{now, Message, MessageKind, Session, CURRENT_SESSION_ID};
pub use user::UserId;
