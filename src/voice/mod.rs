//! Voice capture
//!
//! This module provides the `VoiceCapture` adapter that manages:
//! - The {Idle, Listening} capture state machine
//! - Accumulating finalized segments plus a replaceable interim segment
//! - Silent deactivation on recognizer errors and end-of-speech
//! - Capability detection via an optional `RecognitionSource`

mod capture;
mod source;

pub use capture::{VoiceCapture, VoiceState};
pub use source::{ChannelSource, RecognitionEvent, RecognitionFeed, RecognitionSource};
