use super::message::{ChatMessage, ChatRole};
use crate::gemini::{Content, GenerativeBackend};
use crate::inflight::InFlightGuard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Seed assistant turn shown before the user says anything
pub const GREETING: &str = "Hello! How can I help you today?";

/// Canned assistant reply substituted for a failed send
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Caller-facing rejections from `send` and `reset`
///
/// Transport failures are deliberately absent here: the manager absorbs them
/// into [`FALLBACK_REPLY`] so the transcript always stays a valid sequence of
/// turns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("another send is already in flight")]
    SendInFlight,
}

/// Owns the single chat session and its ordered transcript
///
/// The remote generateContent API is stateless, so the session handle is the
/// transcript itself: every send replays the prior turns in order, minus the
/// local greeting (the remote contract expects a user turn first). Exactly one
/// send may be in flight at a time; concurrent sends are rejected, not queued.
pub struct ChatManager {
    backend: Arc<dyn GenerativeBackend>,

    /// Model the session is bound to
    model: String,

    /// Session identifier, for logging
    session_id: String,

    /// Ordered conversation turns, greeting first
    transcript: Arc<Mutex<Vec<ChatMessage>>>,

    /// Whether a send is currently in flight
    in_flight: Arc<AtomicBool>,
}

impl ChatManager {
    /// Create the session, seeding the transcript with the greeting
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>) -> Self {
        let session_id = format!("chat-{}", uuid::Uuid::new_v4());
        info!("Creating chat session: {}", session_id);

        Self {
            backend,
            model: model.into(),
            session_id,
            transcript: Arc::new(Mutex::new(vec![ChatMessage::new(ChatRole::Model, GREETING)])),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Append the user turn, send the full history, append the reply
    ///
    /// The user turn is appended before the request goes out. A transport
    /// failure still produces an assistant turn ([`FALLBACK_REPLY`]) so the
    /// transcript grows by exactly two entries either way.
    pub async fn send(&self, text: &str) -> Result<ChatMessage, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        // Released on drop, so a cancelled send cannot wedge the session
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("Rejecting concurrent send on session {}", self.session_id);
            return Err(ChatError::SendInFlight);
        };

        let history = {
            let mut transcript = self.transcript.lock().await;
            transcript.push(ChatMessage::new(ChatRole::User, trimmed));
            transcript
                .iter()
                // The greeting is UI-only; the wire history starts with the
                // user's first turn, as the remote contract expects
                .skip(1)
                .map(|m| Content::text(m.role.as_str(), m.text.clone()))
                .collect::<Vec<_>>()
        };

        info!(
            "Sending turn {} on session {}",
            history.len(),
            self.session_id
        );

        let reply = match self.backend.generate(&self.model, &history).await {
            Ok(text) => ChatMessage::new(ChatRole::Model, text),
            Err(e) => {
                warn!("Send failed on session {}: {}", self.session_id, e);
                ChatMessage::new(ChatRole::Model, FALLBACK_REPLY)
            }
        };

        {
            let mut transcript = self.transcript.lock().await;
            transcript.push(reply.clone());
        }

        Ok(reply)
    }

    /// Snapshot of the ordered transcript
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        let transcript = self.transcript.lock().await;
        transcript.clone()
    }

    /// Whether a send is currently in flight
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Discard the conversation and re-seed the greeting
    pub async fn reset(&self) -> Result<(), ChatError> {
        if self.in_flight.load(Ordering::SeqCst) {
            return Err(ChatError::SendInFlight);
        }

        info!("Resetting chat session: {}", self.session_id);

        let mut transcript = self.transcript.lock().await;
        transcript.clear();
        transcript.push(ChatMessage::new(ChatRole::Model, GREETING));

        Ok(())
    }
}
