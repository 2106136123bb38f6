//! The chat collaborator: the backend that turns a user message into a reply.
//!
//! The widget only knows the [`ChatCollaborator`] trait. [`HttpCollaborator`]
//! is the production implementation that speaks the JSON contract:
//!
//! ```text
//! POST <endpoint>   { "message": "..." }
//! 200 OK            { "response": "..." }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ExchangeFailed;

/// Request body sent to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Trimmed user text.
    #[serde(default)]
    pub message: String,
}

/// Reply body returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Text to render as the bot bubble.
    pub response: String,
    /// Matched intent tag, if the backend reports one.
    #[serde(default)]
    pub intent: Option<String>,
}

/// Something that can answer one user message.
#[async_trait]
pub trait ChatCollaborator: Send + Sync {
    /// Perform one request/response exchange.
    async fn exchange(&self, message: &str) -> Result<String, ExchangeFailed>;
}

/// Collaborator reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpCollaborator {
    /// Create a collaborator posting to `endpoint`.
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create a collaborator with a custom reqwest client.
    pub fn with_client(endpoint: Url, http: reqwest::Client) -> Self {
        Self { endpoint, http }
    }

    /// Get the endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatCollaborator for HttpCollaborator {
    async fn exchange(&self, message: &str) -> Result<String, ExchangeFailed> {
        let body = ChatRequest {
            message: message.to_string(),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ExchangeFailed::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let reply: ChatReply = serde_json::from_str(&text)?;
        Ok(reply.response)
    }
}
