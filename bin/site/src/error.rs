//! Domain error types for server operations.
//!
//! Server functions log the detailed error and hand the browser a
//! user-safe `ServerFnError`.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Chat endpoint lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatConfigError {
    /// The endpoint was not attached to the request.
    Missing,
    /// The endpoint has no base URL.
    EmptyBaseUrl,
}

impl fmt::Display for ChatConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "chat endpoint is not available to server functions"),
            Self::EmptyBaseUrl => write!(f, "chat endpoint base URL is empty"),
        }
    }
}

impl std::error::Error for ChatConfigError {}

impl ChatConfigError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match self {
            ChatConfigError::Missing | ChatConfigError::EmptyBaseUrl => {
                ServerFnError::new("Chat is not available")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_hides_details() {
        let message = ChatConfigError::EmptyBaseUrl.into_server_error().to_string();
        assert!(message.contains("Chat is not available"));
        assert!(!message.contains("base URL"));
    }
}
