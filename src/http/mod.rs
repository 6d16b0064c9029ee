//! HTTP API server for the assistant UI
//!
//! This module provides a REST API over the chat, analysis, and voice
//! components:
//! - POST /chat/send - Send a message on the chat session
//! - GET /chat/transcript - Get the ordered transcript
//! - POST /chat/reset - Discard the conversation
//! - POST /plants/analyze - Analyze an uploaded plant image
//! - POST /voice/start, /voice/stop - Control voice capture
//! - GET /voice/state - Observe capture state and transcript
//! - POST /voice/event - Feed recognition events from a client recognizer
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
