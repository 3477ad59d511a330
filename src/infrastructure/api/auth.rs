#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// What a successful login hands back: the bearer token plus the user it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionResponse {
    user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

pub struct AuthClient {
    url: String,
    token: Option<String>,
}

impl Default for AuthClient {
    fn default() -> AuthClient {
        return AuthClient::new(&Config::get(ConfigKey::ApiUrl), None);
    }
}

impl AuthClient {
    pub fn new(url: &str, token: Option<String>) -> AuthClient {
        return AuthClient {
            url: url.to_string(),
            token,
        };
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = reqwest::Client::new()
            .request(method, format!("{url}{path}", url = self.url))
            .header("Content-Type", "application/json");

        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        return req;
    }

    /// Prefers the server's own message field over the generic fallback.
    async fn error_from(res: reqwest::Response, fallback: &str) -> anyhow::Error {
        let body = res.text().await.unwrap_or_default();
        let parsed: ApiMessage = serde_json::from_str(&body).unwrap_or_default();
        if parsed.message.is_empty() {
            return anyhow!(fallback.to_string());
        }

        return anyhow!(parsed.message);
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let res = self
            .request(reqwest::Method::POST, "/auth/register")
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(AuthClient::error_from(res, "Registration failed").await);
        }

        return Ok(());
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession> {
        let res = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(AuthClient::error_from(res, "Login failed").await);
        }

        let session = res.json::<AuthSession>().await?;
        return Ok(session);
    }

    pub async fn session(&self) -> Result<User> {
        let res = self
            .request(reqwest::Method::GET, "/auth/session")
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(AuthClient::error_from(res, "Failed to get user session").await);
        }

        let session = res.json::<SessionResponse>().await?;
        return Ok(session.user);
    }

    pub async fn logout(&self) -> Result<()> {
        let res = self
            .request(reqwest::Method::POST, "/auth/logout")
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(AuthClient::error_from(res, "Logout failed").await);
        }

        return Ok(());
    }
}
