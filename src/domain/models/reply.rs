use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ChartData;

#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub prompt: String,
    pub format: String,
}

impl ChatRequest {
    pub fn new(prompt: &str) -> ChatRequest {
        return ChatRequest {
            prompt: prompt.to_string(),
            format: "json".to_string(),
        };
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(default)]
    pub data: ChartData,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub options: serde_json::Value,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A chat response decoded once at the transport boundary. The API answers
/// with either a plain text body or a JSON document carrying a message, an
/// optional chart, and optional raw data.
#[derive(Clone, Debug)]
pub enum ChatReply {
    Text(String),
    Structured(ChatPayload),
}

impl ChatReply {
    pub fn message_text(&self) -> String {
        match self {
            ChatReply::Text(text) => return text.to_string(),
            ChatReply::Structured(payload) => {
                if let Some(message) = &payload.message {
                    return message.to_string();
                }
                return serde_json::to_string(payload).unwrap_or_default();
            }
        }
    }
}
