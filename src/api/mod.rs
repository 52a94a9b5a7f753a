pub mod client;
pub mod models;

pub use client::{BackendClient, NO_ANSWER_FALLBACK};
