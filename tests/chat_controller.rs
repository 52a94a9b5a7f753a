use pdfchat::models::{Message, MessageKind, Session, UserId};
use pdfchat::session::keys::current_key;
use pdfchat::session::{KeyValueStore, MemoryKvStore, SessionStore};
use pdfchat::ChatController;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

fn user() -> UserId {
    UserId::parse("alice@example.com").unwrap()
}

// Timestamps have millisecond resolution; keep them apart for ordering.
fn tick() {
    sleep(Duration::from_millis(5));
}

fn setup() -> (Arc<MemoryKvStore>, SessionStore, ChatController) {
    let backend = Arc::new(MemoryKvStore::new());
    let store = SessionStore::new(backend.clone());
    let controller = ChatController::open(store.clone(), user());
    (backend, store, controller)
}

#[test]
fn test_open_starts_empty() {
    let (_, _, controller) = setup();
    assert!(controller.current().is_current());
    assert!(controller.messages().is_empty());
    assert!(controller.document().is_none());
    assert!(controller.history().is_empty());
}

#[test]
fn test_every_append_is_persisted_in_order() {
    let (_, store, mut controller) = setup();
    let mut expected = Vec::new();

    for i in 0..5 {
        let message = if i % 2 == 0 {
            Message::user(format!("question {}", i))
        } else {
            Message::bot(format!("answer {}", i))
        };
        expected.push(message.clone());
        controller.append_message(message);

        let stored = store.load_current(&user()).unwrap();
        assert_eq!(stored.messages, expected);
    }
}

#[test]
fn test_send_and_answer_scenario() {
    let (backend, store, mut controller) = setup();

    controller.append_message(Message::user("Hello"));
    controller.append_message(Message::bot("Hi there"));

    assert!(backend.get(&current_key(&user())).unwrap().is_some());
    let stored = store.load_current(&user()).unwrap();
    let pairs: Vec<(MessageKind, &str)> = stored
        .messages
        .iter()
        .map(|m| (m.kind, m.content.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![(MessageKind::User, "Hello"), (MessageKind::Bot, "Hi there")]
    );
}

#[test]
fn test_set_and_clear_document() {
    let (_, store, mut controller) = setup();

    controller.set_document("report.pdf", "...");
    assert_eq!(controller.document(), Some(("report.pdf", "...")));
    let stored = store.load_current(&user()).unwrap();
    assert_eq!(stored.pdf_name.as_deref(), Some("report.pdf"));
    assert_eq!(stored.pdf_text.as_deref(), Some("..."));

    // Document only, no messages: clearing leaves an empty session.
    controller.clear_document();
    assert!(controller.document().is_none());
    assert!(store.load_current(&user()).is_none());
}

#[test]
fn test_reopen_resumes_current_session() {
    let backend = Arc::new(MemoryKvStore::new());
    let store = SessionStore::new(backend.clone());
    {
        let mut controller = ChatController::open(store.clone(), user());
        controller.append_message(Message::user("Hello"));
        controller.set_document("report.pdf", "text");
    }

    let controller = ChatController::open(store, user());
    assert_eq!(controller.messages().len(), 1);
    assert_eq!(controller.document(), Some(("report.pdf", "text")));
}

#[test]
fn test_switch_archives_previous_session_first() {
    let (_, store, mut controller) = setup();
    controller.append_message(Message::user("earlier question"));
    controller.end_session();
    let target = controller.history()[0].clone();

    controller.append_message(Message::user("prior message"));
    let archived = controller.switch_to(&target).unwrap();

    assert_eq!(archived.messages[0].content, "prior message");
    assert!(!archived.is_current());
    assert_eq!(store.list_historical(&user()).len(), 2);
    assert_eq!(controller.messages()[0].content, "earlier question");

    let stored = store.load_current(&user()).unwrap();
    assert_eq!(stored.messages[0].content, "earlier question");
    assert_eq!(stored.source_id.as_deref(), Some(target.id.as_str()));
}

#[test]
fn test_repeated_switches_without_edits_do_not_duplicate() {
    let (_, store, mut controller) = setup();

    controller.append_message(Message::user("first"));
    let first = controller.end_session().unwrap();
    controller.append_message(Message::user("second"));
    let second = controller.end_session().unwrap();
    assert_ne!(first.id, second.id);

    controller.switch_to(&first);
    assert!(controller.switch_to(&second).is_none());
    assert!(controller.switch_to(&first).is_none());

    assert_eq!(store.list_historical(&user()).len(), 2);
    assert_eq!(controller.archived().len(), 2);
}

#[test]
fn test_edit_after_switch_is_archived() {
    let (_, store, mut controller) = setup();

    controller.append_message(Message::user("first"));
    let first = controller.end_session().unwrap();
    controller.append_message(Message::user("second"));
    let second = controller.end_session().unwrap();

    controller.switch_to(&first);
    controller.append_message(Message::bot("follow-up"));
    let archived = controller.switch_to(&second).unwrap();

    assert_eq!(archived.messages.len(), 2);
    assert_eq!(store.list_historical(&user()).len(), 3);
}

#[test]
fn test_switch_to_current_is_noop() {
    let (_, store, mut controller) = setup();
    controller.append_message(Message::user("Hello"));
    let current = controller.history()[0].clone();
    assert!(current.is_current());

    assert!(controller.switch_to(&current).is_none());
    assert!(store.list_historical(&user()).is_empty());
    assert_eq!(controller.messages().len(), 1);
}

#[test]
fn test_switch_with_empty_current_archives_nothing() {
    let (_, store, mut controller) = setup();
    controller.append_message(Message::user("kept"));
    let kept = controller.end_session().unwrap();

    assert!(controller.switch_to(&kept).is_none());
    assert_eq!(store.list_historical(&user()).len(), 1);
    assert_eq!(controller.messages()[0].content, "kept");
}

#[test]
fn test_logout_with_empty_session() {
    let (backend, store, mut controller) = setup();
    backend
        .set(&current_key(&user()), &serde_json::to_string(&Session::new_current()).unwrap())
        .unwrap();

    assert!(controller.end_session().is_none());
    assert!(store.list_historical(&user()).is_empty());
    assert!(backend.get(&current_key(&user())).unwrap().is_none());
}

#[test]
fn test_logout_archives_and_clears() {
    let (backend, store, mut controller) = setup();
    controller.append_message(Message::user("Hello"));

    let archived = controller.end_session().unwrap();

    assert!(controller.messages().is_empty());
    assert!(backend.get(&current_key(&user())).unwrap().is_none());
    let history = store.list_historical(&user());
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, archived.id);
}

#[test]
fn test_history_lists_current_first_then_newest() {
    let (_, _, mut controller) = setup();
    controller.append_message(Message::user("one"));
    controller.end_session();
    tick();
    controller.append_message(Message::user("two"));
    controller.end_session();
    tick();
    controller.append_message(Message::user("three"));

    let history = controller.history();
    let labels: Vec<&str> = history
        .iter()
        .map(|s| s.first_user_message().unwrap())
        .collect();
    assert_eq!(labels, vec!["three", "two", "one"]);
    assert!(history[0].is_current());
}

#[test]
fn test_back_to_back_archives_keep_both_conversations() {
    for _ in 0..50 {
        let (_, store, mut controller) = setup();
        controller.append_message(Message::user("conversation A"));
        let first = controller.end_session().unwrap();
        controller.append_message(Message::user("conversation B"));
        let second = controller.end_session().unwrap();

        assert_ne!(first.id, second.id);
        let mut contents: Vec<String> = store
            .list_historical(&user())
            .into_iter()
            .map(|s| s.messages[0].content.clone())
            .collect();
        contents.sort();
        assert_eq!(contents, vec!["conversation A", "conversation B"]);
    }
}
