pub mod models;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use openai::OpenAiProvider;
use thiserror::Error;

use crate::config::AppConfig;
use models::{ChatOptions, ChatResponse, Message};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network Error: {0}")]
    Network(String),
    #[error("API Error: {0}")]
    Api(String),
    #[error("Authentication Failed")]
    Auth,
    #[error("Rate Limited")]
    RateLimited,
}

/// Capability seam to the external model provider. Handlers depend on this
/// trait so tests can exercise the success and failure branches with a fake.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn chat(&self, messages: &[Message], options: ChatOptions) -> Result<ChatResponse, LlmError>;
}

/// A registry or factory trait to initialize providers from config.
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_default(config: &AppConfig) -> Option<Arc<dyn LlmProvider>> {
        match config.llm.provider.as_str() {
            "openai" => {
                let cfg = config.llm.openai.as_ref()?;
                Some(Arc::new(OpenAiProvider::new(
                    cfg.api_key.clone(),
                    cfg.api_base.clone(),
                    cfg.default_model.clone(),
                )))
            }
            _ => None,
        }
    }
}
