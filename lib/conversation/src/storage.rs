//! Durable storage side-channel for the conversation.
//!
//! Only two keys ever live in durable storage: the raw session identifier
//! and the serialized context. They are read once when the widget mounts and
//! written only after a successful turn. Message history, draft text and the
//! pending flag never reach storage.

use crate::context::ConversationContext;
use crate::error::StorageError;
use excursions_core::{ChatSessionId, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Storage key holding the raw session identifier.
pub const SESSION_ID_KEY: &str = "chatSessionId";

/// Storage key holding the JSON-serialized context.
pub const CONTEXT_KEY: &str = "chatContext";

/// Synchronous string key/value store that survives a page reload.
///
/// Mirrors the browser `localStorage` contract: reads cannot fail (a missing
/// or unreadable entry is `None`), writes can.
pub trait DurableStore {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store backed by a `HashMap`. Nothing is kept across reloads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Session identity and context as restored from durable storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedSession {
    pub session_id: Option<ChatSessionId>,
    pub context: ConversationContext,
}

impl PersistedSession {
    /// Reads both keys. A blank session id counts as absent and a context that
    /// does not parse is replaced by the default context.
    pub fn restore(store: &impl DurableStore) -> Self {
        let session_id = store
            .get(SESSION_ID_KEY)
            .and_then(|raw| ChatSessionId::new(raw).ok());
        let context = store
            .get(CONTEXT_KEY)
            .map(|raw| ConversationContext::parse_or_default(&raw))
            .unwrap_or_default();

        Self {
            session_id,
            context,
        }
    }
}

/// Persists the session identifier.
pub fn persist_session_id(
    store: &impl DurableStore,
    session_id: &ChatSessionId,
) -> Result<(), StorageError> {
    store.set(SESSION_ID_KEY, session_id.as_str())
}

/// Persists the context as JSON.
pub fn persist_context(
    store: &impl DurableStore,
    context: &ConversationContext,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(context).map_err(|e| StorageError::SerializeFailed {
        key: CONTEXT_KEY.to_string(),
        reason: e.to_string(),
    })?;
    store.set(CONTEXT_KEY, &json)
}
