#[cfg(test)]
#[path = "fallback_test.rs"]
mod tests;

pub mod direct;
pub mod origin;
pub mod pooled;
pub mod relay;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatPayload;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;

/// One concrete way of getting a chat request to the API.
#[async_trait]
pub trait Transport {
    fn name(&self) -> &'static str;
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply>;
}

pub type TransportBox = Box<dyn Transport + Send + Sync>;

/// Decodes a chat response once at the transport boundary. JSON bodies
/// become structured payloads, anything else is plain text. Error statuses
/// and unparseable JSON both fail the strategy that produced them.
pub async fn decode_reply(res: reqwest::Response) -> Result<ChatReply> {
    let status = res.status().as_u16();
    if status >= 400 {
        bail!(format!("HTTP error status {status}"));
    }

    let is_json = res
        .headers()
        .get("content-type")
        .and_then(|e| return e.to_str().ok())
        .map(|e| return e.contains("application/json"))
        .unwrap_or(false);

    let body = res.text().await?;
    if is_json {
        let payload: ChatPayload = serde_json::from_str(&body)?;
        return Ok(ChatReply::Structured(payload));
    }

    return Ok(ChatReply::Text(body));
}

pub struct TransportManager {
    strategies: Vec<TransportBox>,
}

impl Default for TransportManager {
    fn default() -> TransportManager {
        return TransportManager::new(vec![
            Box::<direct::DirectTransport>::default(),
            Box::<pooled::PooledTransport>::default(),
            Box::<origin::OriginTransport>::default(),
            Box::<relay::RelayTransport>::default(),
        ]);
    }
}

impl TransportManager {
    pub fn new(strategies: Vec<TransportBox>) -> TransportManager {
        return TransportManager { strategies };
    }

    /// Tries each strategy exactly once, in order, returning the first
    /// success. Failures are logged and swallowed until the list runs out,
    /// at which point the last error surfaces. No idempotency key is sent:
    /// a request that dies mid-flight may still have been applied server
    /// side, so a later strategy can double submit.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let mut last_err: Option<anyhow::Error> = None;

        for transport in self.strategies.iter() {
            match transport.send(request).await {
                Ok(reply) => {
                    tracing::debug!(transport = transport.name(), "Chat request succeeded");
                    return Ok(reply);
                }
                Err(err) => {
                    tracing::warn!(transport = transport.name(), err = ?err, "Transport failed");
                    last_err = Some(err);
                }
            }
        }

        return Err(last_err.unwrap_or_else(|| return anyhow!("No transports are configured")));
    }
}

/// Sequential connectivity probes for the doctor command, mirroring the
/// transport order: the API index, a preflight on the chat endpoint, then
/// the configured origin when there is one.
pub async fn test_connection() -> Result<String> {
    let api_url = Config::get(ConfigKey::ApiUrl);
    let client = reqwest::Client::new();

    let mut probes = vec![
        ("API index", reqwest::Method::GET, api_url.to_string()),
        (
            "Chat endpoint preflight",
            reqwest::Method::OPTIONS,
            format!("{api_url}/v1/chat"),
        ),
    ];

    let origin_url = Config::get(ConfigKey::OriginUrl);
    if !origin_url.is_empty() {
        probes.push((
            "Origin preflight",
            reqwest::Method::OPTIONS,
            format!("{origin_url}/v1/chat"),
        ));
    }

    for (label, method, url) in probes {
        match client.request(method, &url).send().await {
            Ok(res) if res.status().as_u16() < 400 => {
                return Ok(format!(
                    "{label} reachable at {url} (status {status})",
                    status = res.status().as_u16()
                ));
            }
            Ok(res) => {
                tracing::warn!(probe = label, status = res.status().as_u16(), "Probe failed");
            }
            Err(err) => {
                tracing::warn!(probe = label, err = ?err, "Probe failed");
            }
        }
    }

    bail!("Could not connect to the API via any method");
}
