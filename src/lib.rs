pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod logging;
pub mod models;
pub mod session;
pub mod ui;

pub use chat::ChatSession;
pub use controller::ChatController;
pub use error::{ChatError, Result};
