//! Reusable UI components.

pub mod chat_bubble;
pub mod message_content;

pub use chat_bubble::ChatBubble;
pub use message_content::MessageContent;
