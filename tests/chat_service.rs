mod common;

#[cfg(test)]
mod tests {
    use crate::common::FakeProvider;
    use knowall_site::api::models::{ChatRequest, IncomingMessage};
    use knowall_site::chat::{self, ClientMeta, COULD_NOT_PROCESS};
    use knowall_site::llm::models::ChatOptions;
    use knowall_site::store::{MemoryTranscriptStore, TranscriptStore};

    fn request(messages: Vec<(&str, &str)>, conversation_id: Option<&str>) -> ChatRequest {
        ChatRequest {
            messages: messages
                .into_iter()
                .map(|(role, content)| IncomingMessage {
                    role: role.to_string(),
                    content: content.to_string(),
                })
                .collect(),
            conversation_id: conversation_id.map(|id| id.to_string()),
        }
    }

    #[tokio::test]
    async fn test_provider_success_returns_content_and_persists_one_turn() {
        let provider = FakeProvider::replying("We offer AI consultancy...");
        let store = MemoryTranscriptStore::new();

        let reply = chat::run_exchange(
            &provider,
            &store,
            request(vec![("user", "What services do you offer?")], Some("ABC12345")),
            ChatOptions::default(),
            ClientMeta::default(),
        )
        .await;

        assert_eq!(reply.role, "assistant");
        assert_eq!(reply.content, "We offer AI consultancy...");
        assert_eq!(reply.conversation_id, "ABC12345");

        let turns = store.list_all();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].id, "ABC12345");
        assert_eq!(turns[0].user_message, "What services do you offer?");
        assert_eq!(turns[0].assistant_response, "We offer AI consultancy...");
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_and_still_persists() {
        let provider = FakeProvider::failing();
        let store = MemoryTranscriptStore::new();

        let reply = chat::run_exchange(
            &provider,
            &store,
            request(vec![("user", "Tell me about Copilots")], Some("XYZ99")),
            ChatOptions::default(),
            ClientMeta::default(),
        )
        .await;

        assert!(reply.content.contains("Tell me about Copilots"));
        assert!(reply.content.contains("technical difficulties"));

        let turns = store.list_all();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].assistant_response, reply.content);
    }

    #[tokio::test]
    async fn test_empty_provider_content_becomes_canned_reply() {
        let provider = FakeProvider::empty();
        let store = MemoryTranscriptStore::new();

        let reply = chat::run_exchange(
            &provider,
            &store,
            request(vec![("user", "hello?")], Some("EMPTY1")),
            ChatOptions::default(),
            ClientMeta::default(),
        )
        .await;

        assert_eq!(reply.content, COULD_NOT_PROCESS);
        assert_eq!(store.list_all()[0].assistant_response, COULD_NOT_PROCESS);
    }

    #[tokio::test]
    async fn test_system_prompt_is_injected_first_with_conversation_id() {
        let provider = FakeProvider::replying("ok");
        let store = MemoryTranscriptStore::new();

        chat::run_exchange(
            &provider,
            &store,
            request(
                vec![("user", "hi"), ("assistant", "hello"), ("user", "bye")],
                Some("ABC12345"),
            ),
            ChatOptions::default(),
            ClientMeta::default(),
        )
        .await;

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].role, "system");
        assert!(seen[0].content.contains("ABC12345"));
        assert!(!seen[0].content.contains("{{CONVERSATION_ID}}"));
        assert_eq!(seen[1].role, "user");
        assert_eq!(seen[2].role, "assistant");
        assert_eq!(seen[3].content, "bye");
    }

    #[tokio::test]
    async fn test_conversation_id_is_generated_when_missing() {
        let provider = FakeProvider::replying("ok");
        let store = MemoryTranscriptStore::new();

        let reply = chat::run_exchange(
            &provider,
            &store,
            request(vec![("user", "hi")], None),
            ChatOptions::default(),
            ClientMeta::default(),
        )
        .await;

        assert!(!reply.conversation_id.is_empty());
        assert!(reply.conversation_id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(store.list_all()[0].id, reply.conversation_id);
    }

    #[tokio::test]
    async fn test_persisted_user_message_is_last_user_entry() {
        let provider = FakeProvider::replying("ok");
        let store = MemoryTranscriptStore::new();

        chat::run_exchange(
            &provider,
            &store,
            request(
                vec![
                    ("user", "first question"),
                    ("assistant", "first answer"),
                    ("user", "second question"),
                ],
                Some("MULTI1"),
            ),
            ChatOptions::default(),
            ClientMeta::default(),
        )
        .await;

        assert_eq!(store.list_all()[0].user_message, "second question");
    }

    #[tokio::test]
    async fn test_no_user_entry_persists_empty_user_message() {
        let provider = FakeProvider::failing();
        let store = MemoryTranscriptStore::new();

        let reply = chat::run_exchange(
            &provider,
            &store,
            request(vec![("assistant", "only me here")], Some("NOUSER")),
            ChatOptions::default(),
            ClientMeta::default(),
        )
        .await;

        assert_eq!(store.list_all()[0].user_message, "");
        assert!(reply.content.contains("technical difficulties"));
    }

    #[tokio::test]
    async fn test_client_meta_is_recorded() {
        let provider = FakeProvider::replying("ok");
        let store = MemoryTranscriptStore::new();

        chat::run_exchange(
            &provider,
            &store,
            request(vec![("user", "hi")], Some("META1")),
            ChatOptions::default(),
            ClientMeta {
                ip: Some("203.0.113.7".to_string()),
                user_agent: Some("widget-test".to_string()),
            },
        )
        .await;

        let turns = store.list_all();
        assert_eq!(turns[0].user_ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(turns[0].user_agent.as_deref(), Some("widget-test"));
    }
}
