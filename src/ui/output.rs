use crate::models::{Message, MessageKind, Session};
use chrono::Local;
use colored::*;

const PREVIEW_CHARS: usize = 60;

/// Display a single chat message with a role label
pub fn display_message(message: &Message) {
    let label = match message.kind {
        MessageKind::User => "you".cyan().bold(),
        MessageKind::Bot => "bot".green().bold(),
        MessageKind::System => "system".yellow(),
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    println!("{} {} {}", format!("[{}]", time).dimmed(), label, message.content);
}

/// Display the whole conversation of a session
pub fn display_session(session: &Session) {
    if let Some(name) = session.pdf_name.as_deref() {
        println!("{}", format!("Document: {}", name).dimmed());
    }
    if session.messages.is_empty() {
        println!("{}", "No messages yet.".dimmed());
        return;
    }
    for message in &session.messages {
        display_message(message);
    }
}

/// Display the history list with 1-based indexes
pub fn display_history(sessions: &[Session]) {
    if sessions.is_empty() {
        println!("{}", "No chat history.".dimmed());
        return;
    }

    for (index, session) in sessions.iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            index + 1,
            history_label(session).bold(),
            preview(session).dimmed()
        );
    }
}

pub fn history_label(session: &Session) -> String {
    if session.is_current() {
        "current session".to_string()
    } else {
        session
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

fn preview(session: &Session) -> String {
    let text = session
        .first_user_message()
        .or(session.pdf_name.as_deref())
        .unwrap_or("");
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    format!("({} messages) {}", session.messages.len(), preview)
}
