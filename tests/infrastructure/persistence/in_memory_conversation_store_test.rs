use std::time::Duration;

use chatterbox::application::ports::ConversationStore;
use chatterbox::domain::{Message, MessageRole, SessionId};
use chatterbox::infrastructure::persistence::InMemoryConversationStore;

const SYSTEM_PROMPT: &str = "seed prompt";

fn create_store() -> InMemoryConversationStore {
    InMemoryConversationStore::new(SYSTEM_PROMPT, Duration::from_secs(3600))
}

#[tokio::test]
async fn given_unseen_session_when_get_or_init_then_returns_seeded_conversation() {
    let store = create_store();
    let session_id = SessionId::new();

    let conversation = store.get_or_init(session_id).await.unwrap();

    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation.messages[0].role, MessageRole::System);
    assert_eq!(conversation.messages[0].content, SYSTEM_PROMPT);
    assert_eq!(conversation.session_id, session_id);
}

#[tokio::test]
async fn given_existing_session_when_get_or_init_twice_then_does_not_reseed() {
    let store = create_store();
    let session_id = SessionId::new();
    store.append(session_id, Message::user("hi")).await.unwrap();

    let conversation = store.get_or_init(session_id).await.unwrap();

    assert_eq!(conversation.len(), 2);
    assert_eq!(store.session_count(), 1);
}

#[tokio::test]
async fn given_unseen_session_when_appending_then_message_follows_seed() {
    let store = create_store();

    let conversation = store
        .append(SessionId::new(), Message::user("first"))
        .await
        .unwrap();

    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation.messages[1].content, "first");
}

#[tokio::test]
async fn given_conversation_when_reset_then_next_access_reseeds_with_same_prompt() {
    let store = create_store();
    let session_id = SessionId::new();
    store.append(session_id, Message::user("hi")).await.unwrap();
    store.append(session_id, Message::assistant("hello")).await.unwrap();

    store.reset(session_id).await.unwrap();
    let conversation = store.get_or_init(session_id).await.unwrap();

    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation.messages[0].content, SYSTEM_PROMPT);
}

#[tokio::test]
async fn given_unknown_session_when_reset_then_succeeds() {
    let store = create_store();
    assert!(store.reset(SessionId::new()).await.is_ok());
}

#[tokio::test]
async fn given_idle_session_when_timeout_elapses_then_it_is_evicted() {
    let store = InMemoryConversationStore::new(SYSTEM_PROMPT, Duration::from_millis(20));
    let session_id = SessionId::new();
    store.append(session_id, Message::user("hi")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    let conversation = store.get_or_init(session_id).await.unwrap();

    assert_eq!(conversation.len(), 1);
}

#[tokio::test]
async fn given_active_session_within_timeout_when_other_session_accessed_then_it_is_kept() {
    let store = create_store();
    let active = SessionId::new();
    store.append(active, Message::user("hi")).await.unwrap();

    store.get_or_init(SessionId::new()).await.unwrap();

    assert_eq!(store.session_count(), 2);
    assert_eq!(store.get_or_init(active).await.unwrap().len(), 2);
}

#[tokio::test]
async fn given_idle_session_when_another_session_only_appends_then_idle_one_is_swept() {
    let store = InMemoryConversationStore::new(SYSTEM_PROMPT, Duration::from_millis(20));
    store.append(SessionId::new(), Message::user("stale")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    store.append(SessionId::new(), Message::user("fresh")).await.unwrap();

    assert_eq!(store.session_count(), 1);
}

#[tokio::test]
async fn given_idle_session_when_appending_to_it_then_it_is_reseeded_first() {
    let store = InMemoryConversationStore::new(SYSTEM_PROMPT, Duration::from_millis(20));
    let session_id = SessionId::new();
    store.append(session_id, Message::user("old")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    let conversation = store.append(session_id, Message::user("new")).await.unwrap();

    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation.messages[1].content, "new");
}

#[tokio::test]
async fn given_session_when_read_then_last_active_time_advances() {
    let store = create_store();
    let session_id = SessionId::new();
    let first = store.get_or_init(session_id).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = store.get_or_init(session_id).await.unwrap();

    assert!(second.last_active_at > first.last_active_at);
}
