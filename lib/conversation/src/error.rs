//! Error types for the conversation crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `TransportError`: Failures talking to the assistant backend
//! - `StorageError`: Failures writing to durable storage
//!
//! Neither ever escapes a turn. The session client turns transport errors
//! into a fallback reply and logs storage errors.

use std::fmt;

/// Errors from a chat turn against the assistant backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No endpoint is configured for the backend.
    NotConfigured,
    /// The request could not be sent or no response arrived.
    RequestFailed { reason: String },
    /// The backend answered with a non-success status.
    UnexpectedStatus { status: u16 },
    /// The response body did not match the reply shape.
    MalformedBody { reason: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "assistant endpoint is not configured"),
            Self::RequestFailed { reason } => {
                write!(f, "assistant request failed: {reason}")
            }
            Self::UnexpectedStatus { status } => {
                write!(f, "assistant responded with status {status}")
            }
            Self::MalformedBody { reason } => {
                write!(f, "malformed assistant response: {reason}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Errors from durable storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is not available in this runtime.
    Unavailable,
    /// The store refused the write (quota, privacy mode).
    WriteFailed { key: String, reason: String },
    /// The value could not be serialized.
    SerializeFailed { key: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "durable storage is unavailable"),
            Self::WriteFailed { key, reason } => {
                write!(f, "failed to write '{key}': {reason}")
            }
            Self::SerializeFailed { key, reason } => {
                write!(f, "failed to serialize '{key}': {reason}")
            }
        }
    }
}

impl std::error::Error for StorageError {}
