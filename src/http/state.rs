use crate::analysis::PlantAnalyzer;
use crate::chat::ChatManager;
use crate::render::Formatter;
use crate::voice::{RecognitionFeed, VoiceCapture};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single chat session for this service instance
    pub chat: Arc<ChatManager>,

    /// One-shot plant analysis requester
    pub analyzer: Arc<PlantAnalyzer>,

    /// Voice capture adapter (may be unsupported)
    pub voice: Arc<VoiceCapture>,

    /// Producer half of the recognition source, absent when voice is disabled
    pub recognition_feed: Option<RecognitionFeed>,

    /// Response formatter decided at startup
    pub formatter: Formatter,

    /// Whether an analysis request is currently in flight
    pub analysis_in_flight: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(
        chat: Arc<ChatManager>,
        analyzer: Arc<PlantAnalyzer>,
        voice: Arc<VoiceCapture>,
        recognition_feed: Option<RecognitionFeed>,
        formatter: Formatter,
    ) -> Self {
        Self {
            chat,
            analyzer,
            voice,
            recognition_feed,
            formatter,
            analysis_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }
}
