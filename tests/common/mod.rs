#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use knowall_site::config::{
    AdminConfig, AppConfig, LlmConfig, OpenAiConfig, ServerConfig, StorageConfig,
};
use knowall_site::llm::models::{ChatOptions, ChatResponse, Message};
use knowall_site::llm::{LlmError, LlmProvider};

pub enum Behavior {
    Reply(&'static str),
    Empty,
    Fail,
}

/// Deterministic stand-in for the upstream model provider. Records the
/// message list it was called with so tests can assert prompt assembly.
pub struct FakeProvider {
    behavior: Behavior,
    pub seen: Mutex<Vec<Message>>,
}

impl FakeProvider {
    pub fn replying(text: &'static str) -> Self {
        Self {
            behavior: Behavior::Reply(text),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self {
            behavior: Behavior::Empty,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn chat(
        &self,
        messages: &[Message],
        _options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        *self.seen.lock().unwrap() = messages.to_vec();
        match self.behavior {
            Behavior::Reply(text) => Ok(ChatResponse {
                content: text.to_string(),
                model: "fake-model".to_string(),
                usage: None,
            }),
            Behavior::Empty => Ok(ChatResponse {
                content: String::new(),
                model: "fake-model".to_string(),
                usage: None,
            }),
            Behavior::Fail => Err(LlmError::Api("simulated upstream failure".to_string())),
        }
    }
}

pub fn test_config(openai_key: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        storage: StorageConfig {
            path: "unused.json".to_string(),
        },
        admin: AdminConfig {
            api_key: "test-admin-key".to_string(),
        },
        llm: LlmConfig {
            provider: "openai".to_string(),
            openai: Some(OpenAiConfig {
                api_base: "http://localhost".to_string(),
                api_key: openai_key.to_string(),
                default_model: "gpt-4o".to_string(),
                max_tokens: 500,
            }),
        },
    }
}
