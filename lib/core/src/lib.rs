//! Core domain types and utilities for the excursions site.
//!
//! This crate provides the error handling foundation and the identifier
//! types shared by the conversation library and the site itself.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ChatSessionId, ParseIdError};
