#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use super::decode_reply;
use super::Transport;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;

/// Routes the POST through a public relay that wraps the target URL as a
/// query string. Last resort when nothing can reach the API host directly.
pub struct RelayTransport {
    relay_url: String,
    api_url: String,
}

impl Default for RelayTransport {
    fn default() -> RelayTransport {
        return RelayTransport::new(
            &Config::get(ConfigKey::RelayUrl),
            &Config::get(ConfigKey::ApiUrl),
        );
    }
}

impl RelayTransport {
    pub fn new(relay_url: &str, api_url: &str) -> RelayTransport {
        return RelayTransport {
            relay_url: relay_url.to_string(),
            api_url: api_url.to_string(),
        };
    }
}

#[async_trait]
impl Transport for RelayTransport {
    fn name(&self) -> &'static str {
        return "relay";
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        if self.relay_url.is_empty() {
            bail!("Relay URL is not configured");
        }

        let target = format!("{url}/v1/chat", url = self.api_url);
        let wrapped = format!(
            "{relay}{target}",
            relay = self.relay_url,
            target = urlencoding::encode(&target)
        );

        let res = reqwest::Client::new()
            .post(wrapped)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        return decode_reply(res).await;
    }
}
