//! Chat endpoint lookup for the browser.

use excursions_conversation::ChatEndpoint;
use leptos::prelude::*;

/// Server function returning where the chat widget sends its turns.
#[server]
pub async fn get_chat_endpoint() -> Result<ChatEndpoint, ServerFnError> {
    use crate::error::ChatConfigError;
    use axum::Extension;

    let Extension(endpoint): Extension<ChatEndpoint> =
        leptos_axum::extract().await.map_err(|e| {
            tracing::error!(error = %e, "Chat endpoint missing from request extensions");
            ChatConfigError::Missing.into_server_error()
        })?;

    if endpoint.base_url.trim().is_empty() {
        tracing::warn!("Chat endpoint requested but CHAT__BASE_URL is empty");
        return Err(ChatConfigError::EmptyBaseUrl.into_server_error());
    }

    Ok(endpoint)
}
