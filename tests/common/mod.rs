// Shared test doubles for the generative backend seam.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use verdant::{Content, GenerativeBackend, TransportError};

/// Backend that pops a scripted reply per call and records the request
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    calls: AtomicUsize,
    last_contents: Mutex<Option<Vec<Content>>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
            last_contents: Mutex::new(None),
        }
    }

    pub fn with_reply(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing() -> Self {
        Self::new(vec![Err(TransportError::Request(
            "connection refused".to_string(),
        ))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_contents(&self) -> Option<Vec<Content>> {
        self.last_contents.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate(&self, _model: &str, contents: &[Content]) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_contents.lock().unwrap() = Some(contents.to_vec());

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::EmptyResponse))
    }
}

/// Backend that signals when a request arrives and waits to be released
pub struct BlockingBackend {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl BlockingBackend {
    pub fn new() -> Self {
        Self {
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for BlockingBackend {
    async fn generate(
        &self,
        _model: &str,
        _contents: &[Content],
    ) -> Result<String, TransportError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok("released".to_string())
    }
}
