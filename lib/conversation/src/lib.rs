//! Assistant conversation client for the excursions site.
//!
//! This crate provides:
//!
//! - **Conversation state**: message history, session identifier, opaque
//!   context and the single in-flight turn state machine
//! - **Durable storage contract**: what survives a page reload and how it is
//!   restored
//! - **Chat backend**: the request/response contract with the remote
//!   assistant service and its HTTP implementation
//! - **Formatter**: turns raw assistant text into paragraphs and map links

pub mod backend;
pub mod context;
pub mod error;
pub mod format;
pub mod message;
pub mod session;
pub mod storage;

pub use backend::{ChatBackend, ChatEndpoint, ChatRequest, ChatResponse, HttpChatBackend};
pub use context::ConversationContext;
pub use error::{StorageError, TransportError};
pub use format::{MapLink, MessageBody, Paragraph, Span, format_message};
pub use message::{Message, MessageRole};
pub use session::{ConversationState, FALLBACK_REPLY, GREETING, TurnOutcome};
pub use storage::{DurableStore, MemoryStore, PersistedSession};
