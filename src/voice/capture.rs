use super::source::{RecognitionEvent, RecognitionSource};
use anyhow::Result;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Observable capture state
#[derive(Debug, Clone, Serialize)]
pub struct VoiceState {
    /// Whether capture is in the Listening state
    pub is_listening: bool,

    /// Finalized segments plus the current interim segment
    pub transcript: String,

    /// Whether a recognition source is available at all
    pub supported: bool,
}

/// Accumulated transcript: finalized text plus a replaceable interim tail
#[derive(Debug, Default)]
struct TranscriptState {
    finalized: String,
    interim: String,
}

impl TranscriptState {
    fn combined(&self) -> String {
        format!("{}{}", self.finalized, self.interim)
    }
}

/// Voice capture adapter with {Idle, Listening} semantics
///
/// `start_listening` and `stop_listening` are idempotent; a recognizer error
/// or end-of-speech event forces Idle on its own, so observers must read
/// `is_listening` rather than assume it stays set. Built without a source, the
/// adapter reports `supported = false` and every command is a no-op.
pub struct VoiceCapture {
    /// Recognition source, absent when the capability is unavailable
    source: Option<Mutex<Box<dyn RecognitionSource>>>,

    /// Whether capture is currently active
    listening: Arc<AtomicBool>,

    /// Accumulated transcript text
    transcript: Arc<Mutex<TranscriptState>>,

    /// Handle for the event consumer task
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl VoiceCapture {
    pub fn new(source: Option<Box<dyn RecognitionSource>>) -> Self {
        if source.is_none() {
            warn!("No recognition source available; voice capture disabled");
        }

        Self {
            source: source.map(Mutex::new),
            listening: Arc::new(AtomicBool::new(false)),
            transcript: Arc::new(Mutex::new(TranscriptState::default())),
            task_handle: Mutex::new(None),
        }
    }

    /// Whether a recognition source is available
    pub fn supported(&self) -> bool {
        self.source.is_some()
    }

    /// Idle -> Listening; clears the transcript
    ///
    /// No-op while already Listening (the transcript is not reset a second
    /// time) and no-op when unsupported.
    pub async fn start_listening(&self) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };

        if self
            .listening
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        {
            let mut transcript = self.transcript.lock().await;
            *transcript = TranscriptState::default();
        }

        let rx = {
            let mut source = source.lock().await;
            match source.start().await {
                Ok(rx) => {
                    info!("Voice capture started ({})", source.name());
                    rx
                }
                Err(e) => {
                    self.listening.store(false, Ordering::SeqCst);
                    return Err(e);
                }
            }
        };

        let listening = Arc::clone(&self.listening);
        let transcript = Arc::clone(&self.transcript);

        let task = tokio::spawn(async move {
            let mut rx = rx;

            while let Some(event) = rx.recv().await {
                if !listening.load(Ordering::SeqCst) {
                    break;
                }

                match event {
                    RecognitionEvent::Segment { text, is_final } => {
                        let mut state = transcript.lock().await;
                        if is_final {
                            state.finalized.push_str(&text);
                            state.interim.clear();
                        } else {
                            // Interim text is replaced wholesale, never appended
                            state.interim = text;
                        }
                    }
                    RecognitionEvent::Error(message) => {
                        warn!("Speech recognition error: {}", message);
                        break;
                    }
                    RecognitionEvent::End => {
                        info!("Speech recognition ended");
                        break;
                    }
                }
            }

            listening.store(false, Ordering::SeqCst);
        });

        {
            let mut handle = self.task_handle.lock().await;
            *handle = Some(task);
        }

        Ok(())
    }

    /// Listening -> Idle; keeps the transcript for the caller to consume
    ///
    /// No-op while Idle.
    pub async fn stop_listening(&self) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };

        if self
            .listening
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        {
            let mut source = source.lock().await;
            if let Err(e) = source.stop().await {
                error!("Failed to stop recognition source: {}", e);
            }
        }

        {
            let mut handle = self.task_handle.lock().await;
            if let Some(task) = handle.take() {
                if let Err(e) = task.await {
                    error!("Voice capture task panicked: {}", e);
                }
            }
        }

        info!("Voice capture stopped");

        Ok(())
    }

    /// Current observable state
    pub async fn state(&self) -> VoiceState {
        let transcript = self.transcript.lock().await;

        VoiceState {
            is_listening: self.listening.load(Ordering::SeqCst),
            transcript: transcript.combined(),
            supported: self.supported(),
        }
    }
}
