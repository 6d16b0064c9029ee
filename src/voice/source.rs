use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Event emitted by a recognition source while capture is active
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// A recognized segment; interim until `is_final` is set
    Segment { text: String, is_final: bool },

    /// Internal recognizer failure; capture deactivates silently
    Error(String),

    /// Natural end of speech detected by the recognizer
    End,
}

/// Speech recognition event source
///
/// Decouples the capture state machine from any concrete recognizer. `start`
/// returns the channel that delivers events until `stop` or until the source
/// ends on its own.
#[async_trait::async_trait]
pub trait RecognitionSource: Send + Sync {
    /// Begin recognition and return the event channel
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>>;

    /// End recognition; closes the event channel
    async fn stop(&mut self) -> Result<()>;

    /// Get source name for logging
    fn name(&self) -> &str;
}

/// Recognition source fed by an external producer
///
/// The service has no microphone of its own: a client-side recognizer (or any
/// speech-to-text feed) pushes segments through the paired [`RecognitionFeed`].
pub struct ChannelSource {
    tx: Arc<Mutex<Option<mpsc::Sender<RecognitionEvent>>>>,
}

/// Producer half of a [`ChannelSource`]; cheap to clone
#[derive(Clone)]
pub struct RecognitionFeed {
    tx: Arc<Mutex<Option<mpsc::Sender<RecognitionEvent>>>>,
}

impl ChannelSource {
    pub fn new() -> (Self, RecognitionFeed) {
        let tx = Arc::new(Mutex::new(None));
        (
            Self {
                tx: Arc::clone(&tx),
            },
            RecognitionFeed { tx },
        )
    }
}

#[async_trait::async_trait]
impl RecognitionSource for ChannelSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        let (tx, rx) = mpsc::channel(64);
        let mut slot = self.tx.lock().await;
        *slot = Some(tx);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        // Dropping the sender closes the event channel
        let mut slot = self.tx.lock().await;
        *slot = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "channel"
    }
}

impl RecognitionFeed {
    /// Push an event toward the capture adapter
    ///
    /// Returns false when no capture is active (the event is discarded).
    pub async fn push(&self, event: RecognitionEvent) -> bool {
        let slot = self.tx.lock().await;
        match slot.as_ref() {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }
}
