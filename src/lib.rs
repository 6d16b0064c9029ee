pub mod analysis;
pub mod chat;
pub mod config;
pub mod gemini;
pub mod http;
pub mod inflight;
pub mod media;
pub mod render;
pub mod voice;

pub use analysis::{AnalysisError, PlantAnalyzer, DEFAULT_PROMPT};
pub use chat::{ChatError, ChatManager, ChatMessage, ChatRole, FALLBACK_REPLY, GREETING};
pub use config::Config;
pub use gemini::{Content, GeminiClient, GenerativeBackend, InlineData, Part, TransportError};
pub use http::{create_router, AppState};
pub use inflight::InFlightGuard;
pub use media::{ImagePayload, MediaError, MAX_IMAGE_BYTES};
pub use render::{Formatter, RenderMode};
pub use voice::{ChannelSource, RecognitionEvent, RecognitionFeed, VoiceCapture, VoiceState};
