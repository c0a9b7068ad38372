use std::sync::Arc;
use std::time::Duration;

use chatbox::{ConversationStore, DuckdbConversationStore, Message, Role, REJECTION_MESSAGE};
use tempfile::tempdir;

#[tokio::test]
async fn duckdb_store_roundtrip_conversation_and_messages() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("chatbox.duckdb");

    let store = Arc::new(DuckdbConversationStore::new(&db_path).expect("duckdb init"));

    let conversation = store
        .create_conversation("New Coding Chat")
        .await
        .expect("create");
    let id = conversation.id().to_string();

    let question = Message::user("How do I reverse a Vec?", Some(id.clone()));
    let answer = Message::answer("Call `v.reverse()`.", Some(id.clone()));
    store.insert_message(&question).await.expect("insert question");
    store.insert_message(&answer).await.expect("insert answer");

    let found = store
        .find_conversation(&id)
        .await
        .expect("find")
        .expect("conversation exists");
    assert_eq!(found.title(), "New Coding Chat");

    let messages = store.list_messages(&id).await.expect("list");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], question);
    assert_eq!(messages[1].role(), Role::Assistant);
    assert_eq!(messages[1].content(), "Call `v.reverse()`.");
}

#[tokio::test]
async fn duckdb_store_persists_rejection_marking() {
    let dir = tempdir().expect("tempdir");
    let store = DuckdbConversationStore::new(&dir.path().join("chatbox.duckdb")).expect("init");
    let conversation = store.create_conversation("t").await.expect("create");

    let rejection = Message::rejection(REJECTION_MESSAGE, Some(conversation.id().to_string()));
    store.insert_message(&rejection).await.expect("insert");

    let messages = store.list_messages(conversation.id()).await.expect("list");
    assert!(messages[0].is_rejection());
    assert_eq!(messages[0].is_coding_related(), Some(false));
}

#[tokio::test]
async fn duckdb_store_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("chatbox.duckdb");

    let id = {
        let store = DuckdbConversationStore::new(&db_path).expect("init");
        let conversation = store.create_conversation("t").await.expect("create");
        let msg = Message::user("What is a trait object?", Some(conversation.id().to_string()));
        store.insert_message(&msg).await.expect("insert");
        conversation.id().to_string()
    };

    let reopened = DuckdbConversationStore::new(&db_path).expect("reopen");
    let messages = reopened.list_messages(&id).await.expect("list");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content(), "What is a trait object?");
}

#[tokio::test]
async fn duckdb_store_lists_newest_conversation_first() {
    let store = DuckdbConversationStore::in_memory().expect("init");

    let older = store.create_conversation("older").await.expect("create");
    tokio::time::sleep(Duration::from_millis(5)).await;
    let newer = store.create_conversation("newer").await.expect("create");

    let listed = store.list_conversations().await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id(), newer.id());
    assert_eq!(listed[1].id(), older.id());
}

#[tokio::test]
async fn duckdb_store_rejects_unknown_conversation() {
    let store = DuckdbConversationStore::in_memory().expect("init");

    let orphan = Message::user("lost", Some("missing".to_string()));
    let err = store.insert_message(&orphan).await.unwrap_err();
    assert!(err.is_not_found());

    assert!(store.list_messages("missing").await.expect("list").is_empty());
    assert!(store.find_conversation("missing").await.expect("find").is_none());
}
