#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Error,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
    mtype: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_id: Option<String>,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string(),
            mtype: MessageType::Normal,
            chart_id: None,
        };
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string(),
            mtype,
            chart_id: None,
        };
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    /// Links this message to the dashboard it was promoted into.
    pub fn attach_chart(&mut self, dashboard_id: &str) {
        self.chart_id = Some(dashboard_id.to_string());
    }
}
