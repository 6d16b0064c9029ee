//! Chat session management
//!
//! This module provides the `ChatManager` abstraction that manages:
//! - The single owned chat session and its ordered transcript
//! - Replaying prior turns to the remote model on every send
//! - Swallowing transport failures into a canned assistant reply
//! - Rejecting empty input and concurrent sends

mod manager;
mod message;

pub use manager::{ChatError, ChatManager, FALLBACK_REPLY, GREETING};
pub use message::{ChatMessage, ChatRole};
