use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<IncomingMessage>,
    pub conversation_id: Option<String>,
}

/// Role and content only; any other fields the widget sends are dropped at
/// deserialization.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub id: String,
    pub role: String,
    pub content: String,
    pub conversation_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub id: Option<String>,
}
