//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested keys (`CHAT__BASE_URL`, `CHAT__API_KEY`).
//!
//! See [`ChatEndpoint`] for the assistant backend settings.

use excursions_conversation::ChatEndpoint;
use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    /// Assistant backend the chat widget talks to.
    pub chat: ChatEndpoint,
}

impl SiteConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
