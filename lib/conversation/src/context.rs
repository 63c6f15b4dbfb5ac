//! Server-owned conversation context.
//!
//! The assistant backend returns a context record with every reply and the
//! client echoes it back on the next turn. The client never reads the fields,
//! so the record is held as a raw JSON object: whatever the backend sends is
//! stored and forwarded exactly, including fields with unexpected types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Keys of the empty context, all `null` except the group booking flag.
const NULL_FIELDS: [&str; 6] = [
    "lastTopic",
    "flightTime",
    "flightDestination",
    "lastServiceType",
    "groupDetails",
    "lastQuery",
];

/// Opaque conversation context, replaced wholesale on every successful turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationContext(Map<String, JsonValue>);

impl Default for ConversationContext {
    fn default() -> Self {
        let mut fields: Map<String, JsonValue> = NULL_FIELDS
            .iter()
            .map(|key| ((*key).to_string(), JsonValue::Null))
            .collect();
        fields.insert("isGroupBooking".to_string(), JsonValue::Bool(false));
        Self(fields)
    }
}

impl ConversationContext {
    /// Parses a persisted context, falling back to the empty context when the
    /// stored text is not a JSON object.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable persisted chat context");
                Self::default()
            }
        }
    }

    /// Raw value of one field, for diagnostics.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// The underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }
}

impl From<Map<String, JsonValue>> for ConversationContext {
    fn from(fields: Map<String, JsonValue>) -> Self {
        Self(fields)
    }
}
