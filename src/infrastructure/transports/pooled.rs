#[cfg(test)]
#[path = "pooled_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use super::decode_reply;
use super::Transport;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;

/// A preconfigured client reused across calls, carrying the global request
/// timeout.
pub struct PooledTransport {
    url: String,
    client: reqwest::Client,
}

impl Default for PooledTransport {
    fn default() -> PooledTransport {
        let timeout = Config::get(ConfigKey::ChatTimeout)
            .parse::<u64>()
            .unwrap_or(30000);

        return PooledTransport::new(&Config::get(ConfigKey::ApiUrl), timeout);
    }
}

impl PooledTransport {
    pub fn new(url: &str, timeout_ms: u64) -> PooledTransport {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap();

        return PooledTransport {
            url: url.to_string(),
            client,
        };
    }
}

#[async_trait]
impl Transport for PooledTransport {
    fn name(&self) -> &'static str {
        return "pooled-client";
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let res = self
            .client
            .post(format!("{url}/v1/chat", url = self.url))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        return decode_reply(res).await;
    }
}
