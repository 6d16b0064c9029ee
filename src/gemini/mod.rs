//! Gemini generateContent client
//!
//! Wire types and the reqwest-based client for the remote generative service,
//! plus the `GenerativeBackend` trait that the chat and analysis components
//! depend on instead of a concrete client.

mod client;
mod types;

pub use client::{GeminiClient, GenerativeBackend, TransportError};
pub use types::{Candidate, Content, GenerateContentResponse, InlineData, Part};
