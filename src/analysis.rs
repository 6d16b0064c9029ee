//! One-shot plant identification requests
//!
//! Unlike the chat path, analysis keeps no session state and propagates
//! failures to the caller: the result pane shows errors explicitly instead of
//! folding them into a conversation.

use crate::gemini::{Content, GenerativeBackend, Part, TransportError};
use crate::media::ImagePayload;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Instruction sent when the caller asks no specific question
pub const DEFAULT_PROMPT: &str = "Identify the plant in this image. Provide its common and \
    scientific names. Then, give detailed care instructions including watering, sunlight, \
    soil, and fertilizer needs. Format the response clearly.";

#[derive(Debug, Error)]
#[error("plant analysis failed: {0}")]
pub struct AnalysisError(#[from] pub TransportError);

/// Stateless requester for image + instruction analysis
pub struct PlantAnalyzer {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
}

impl PlantAnalyzer {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Send one image + instruction request and return the analysis text
    ///
    /// A blank or absent question falls back to [`DEFAULT_PROMPT`]. Each call
    /// is independent; nothing is retained between calls.
    pub async fn analyze(
        &self,
        image: ImagePayload,
        question: Option<&str>,
    ) -> Result<String, AnalysisError> {
        let instruction = question
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_PROMPT);

        info!(
            "Analyzing {} image ({} base64 chars)",
            image.mime_type,
            image.data.len()
        );

        let contents = vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::InlineData {
                    inline_data: image.into_inline_data(),
                },
                Part::Text {
                    text: instruction.to_string(),
                },
            ],
        }];

        let text = self.backend.generate(&self.model, &contents).await?;

        Ok(text)
    }
}
