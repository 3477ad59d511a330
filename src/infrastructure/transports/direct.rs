#[cfg(test)]
#[path = "direct_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use super::decode_reply;
use super::Transport;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;

/// A one-shot request straight to the absolute API URL, with a fresh client
/// per call.
pub struct DirectTransport {
    url: String,
}

impl Default for DirectTransport {
    fn default() -> DirectTransport {
        return DirectTransport::new(&Config::get(ConfigKey::ApiUrl));
    }
}

impl DirectTransport {
    pub fn new(url: &str) -> DirectTransport {
        return DirectTransport {
            url: url.to_string(),
        };
    }
}

#[async_trait]
impl Transport for DirectTransport {
    fn name(&self) -> &'static str {
        return "direct";
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat", url = self.url))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        return decode_reply(res).await;
    }
}
