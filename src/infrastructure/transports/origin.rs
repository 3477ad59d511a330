#[cfg(test)]
#[path = "origin_test.rs"]
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

/// Posts against a separately configured origin, for setups where a local
/// proxy or gateway fronts the API on a different host than the API URL.
pub struct OriginTransport {
    url: String,
}

impl Default for OriginTransport {
    fn default() -> OriginTransport {
        return OriginTransport::new(&Config::get(ConfigKey::OriginUrl));
    }
}

impl OriginTransport {
    pub fn new(url: &str) -> OriginTransport {
        return OriginTransport {
            url: url.to_string(),
        };
    }
}

#[async_trait]
impl Transport for OriginTransport {
    fn name(&self) -> &'static str {
        return "origin";
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        if self.url.is_empty() {
            bail!("Origin URL is not configured");
        }

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat", url = self.url))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        return decode_reply(res).await;
    }
}
