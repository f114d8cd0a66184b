//! One request/response cycle of the conversational interface: prompt
//! assembly, the provider call, fallback synthesis, and transcript capture.

use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::api::models::{AssistantReply, ChatRequest};
use crate::llm::{
    models::{ChatOptions, Message},
    LlmError, LlmProvider,
};
use crate::prompt;
use crate::store::{ConversationTurn, TranscriptStore};

/// Returned when the provider answers successfully but with empty content.
pub const COULD_NOT_PROCESS: &str = "I'm sorry, I couldn't process your request.";

/// Request metadata recorded alongside the transcript.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Run one full exchange. The provider error path never escapes: any
/// upstream failure degrades into a synthesized fallback reply, and exactly
/// one turn is appended to the store either way.
pub async fn run_exchange(
    provider: &dyn LlmProvider,
    store: &dyn TranscriptStore,
    request: ChatRequest,
    options: ChatOptions,
    meta: ClientMeta,
) -> AssistantReply {
    let conversation_id = request
        .conversation_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());

    let mut messages = vec![Message {
        role: "system".to_string(),
        content: prompt::build_system_prompt(&conversation_id),
    }];
    messages.extend(request.messages.iter().map(|m| Message {
        role: m.role.clone(),
        content: m.content.clone(),
    }));

    debug!(
        "Sending {} messages to provider {} for conversation {}",
        messages.len(),
        provider.name(),
        conversation_id
    );

    let user_message = latest_user_message(&request);

    let content = match provider.chat(&messages, options).await {
        Ok(response) => {
            if let Some(usage) = &response.usage {
                debug!(
                    "Provider usage: {} input / {} output tokens",
                    usage.input_tokens, usage.output_tokens
                );
            }
            if response.content.trim().is_empty() {
                COULD_NOT_PROCESS.to_string()
            } else {
                response.content
            }
        }
        Err(e) => {
            log_provider_error(&e);
            info!("Using fallback static response");
            fallback_reply(&user_message)
        }
    };

    let turn = ConversationTurn::new(
        conversation_id.clone(),
        user_message,
        content.clone(),
        meta.ip,
        meta.user_agent,
    );
    if !store.append(turn) {
        error!(
            "Failed to persist conversation turn for {}",
            conversation_id
        );
    }

    AssistantReply {
        id: Uuid::new_v4().to_string(),
        role: "assistant".to_string(),
        content,
        conversation_id,
    }
}

/// The last user-role entry of the incoming history, empty if there is none.
fn latest_user_message(request: &ChatRequest) -> String {
    request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

fn fallback_reply(user_message: &str) -> String {
    format!(
        "I received your message: \"{}\". However, I'm currently experiencing some technical difficulties connecting to my knowledge base. {} Please try again later or contact us directly for more information about our services.",
        user_message,
        prompt::first_sentence()
    )
}

/// Classification is for the operator log only; every provider failure takes
/// the same fallback path.
fn log_provider_error(e: &LlmError) {
    match e {
        LlmError::Auth => {
            error!("OpenAI API error: authentication failed, check the configured API key")
        }
        LlmError::RateLimited => error!("OpenAI API error: rate limited, too many requests"),
        LlmError::Api(detail) => error!("OpenAI API error: upstream failure: {}", detail),
        LlmError::Network(detail) => error!("OpenAI API error: network failure: {}", detail),
    }
}
