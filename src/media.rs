//! Image payload encoding
//!
//! Converts user-supplied image bytes or files into the base64 inline payload
//! the generative service expects. Enforces a hard size ceiling before any
//! request can be built.

use crate::gemini::InlineData;
use base64::Engine;
use std::path::Path;
use thiserror::Error;

/// Hard ceiling for uploaded images (4 MiB)
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("image is {size} bytes, exceeding the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },

    #[error("failed to read image: {0}")]
    Read(String),
}

/// Transport-safe image payload: base64 data plus its declared MIME type
///
/// Transient by design: built immediately before a request and dropped after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: String,
    pub mime_type: String,
}

impl ImagePayload {
    /// Encode raw image bytes, rejecting anything over [`MAX_IMAGE_BYTES`]
    ///
    /// The MIME type is taken verbatim from the caller's declaration. Encoding
    /// is deterministic: the same bytes always produce the same payload.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Result<Self, MediaError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::FileTooLarge {
                size: bytes.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }

        Ok(Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        })
    }

    /// Read and encode an image file
    pub async fn from_file(
        path: impl AsRef<Path>,
        mime_type: impl Into<String>,
    ) -> Result<Self, MediaError> {
        let bytes = tokio::fs::read(path.as_ref())
            .await
            .map_err(|e| MediaError::Read(e.to_string()))?;

        Self::from_bytes(&bytes, mime_type)
    }

    /// Convert into the wire-level inline data part
    pub fn into_inline_data(self) -> InlineData {
        InlineData {
            mime_type: self.mime_type,
            data: self.data,
        }
    }
}
