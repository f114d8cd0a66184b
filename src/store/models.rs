use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted user/assistant exchange.
///
/// Serialized with camelCase field names to stay compatible with the
/// historical chat-logs.json format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    /// The conversation identifier. Turns of the same chat session share it.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub assistant_response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ConversationTurn {
    pub fn new(
        id: String,
        user_message: String,
        assistant_response: String,
        user_ip: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            user_message,
            assistant_response,
            user_ip,
            user_agent,
        }
    }
}
