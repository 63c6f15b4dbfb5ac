//! Assistant backend abstraction.
//!
//! The remote assistant is an opaque request/response service: one POST per
//! turn to `{base_url}/chat`, authenticated with a client key header.

use crate::context::ConversationContext;
use crate::error::TransportError;
use async_trait::async_trait;
use excursions_core::{ChatSessionId, Result};
use serde::{Deserialize, Serialize};

/// Header carrying the client credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Where the assistant lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEndpoint {
    /// Base URL of the assistant service, without the `/chat` suffix.
    pub base_url: String,
    /// Client credential sent in the `x-api-key` header.
    #[serde(default)]
    pub api_key: String,
}

impl ChatEndpoint {
    /// Creates a new endpoint configuration.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Full URL of the chat route.
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url.trim_end_matches('/'))
    }
}

/// One outbound turn.
///
/// Besides `message` and `sessionId` the body carries the current `context`,
/// so the backend gets back exactly what it last returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<ChatSessionId>,
    pub context: ConversationContext,
}

/// A successful reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    /// Raw session identifier. May be blank, in which case the client keeps
    /// the identifier it already has.
    pub session_id: String,
    pub language: String,
    pub context: ConversationContext,
}

/// Trait for sending a turn to the assistant.
///
/// Futures are not `Send`: in the browser the call runs on the single UI
/// thread via `spawn_local`.
#[async_trait(?Send)]
pub trait ChatBackend {
    /// Sends one turn and waits for the reply.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

/// `reqwest`-based backend. Works natively and in WASM (browser `fetch`).
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: ChatEndpoint,
}

impl HttpChatBackend {
    /// Creates a backend for the given endpoint.
    #[must_use]
    pub fn new(endpoint: ChatEndpoint) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait(?Send)]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let url = self.endpoint.chat_url();

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.endpoint.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
            }
            .into());
        }

        let reply = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| TransportError::MalformedBody {
                reason: e.to_string(),
            })?;

        tracing::debug!(url = %url, language = %reply.language, "Assistant replied");

        Ok(reply)
    }
}
