use super::state::AppState;
use crate::chat::{ChatError, ChatMessage};
use crate::inflight::InFlightGuard;
use crate::media::{ImagePayload, MediaError};
use crate::voice::{RecognitionEvent, VoiceState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// The user's message text
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    /// The assistant's reply text
    pub reply: String,

    /// Reply rendered as safe HTML
    pub reply_html: String,

    /// Number of turns in the transcript after this exchange
    pub transcript_len: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    /// Optional custom question; the default care prompt is used when absent
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Raw analysis text from the model
    pub analysis: String,

    /// Analysis rendered as safe HTML
    pub analysis_html: String,
}

/// Recognition event pushed by a client-side recognizer
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoiceEventRequest {
    Segment {
        text: String,
        #[serde(default)]
        is_final: bool,
    },
    Error {
        message: String,
    },
    End,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Chat Handlers
// ============================================================================

/// POST /chat/send
/// Send a message on the chat session
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    match state.chat.send(&req.message).await {
        Ok(reply) => {
            let transcript_len = state.chat.transcript().await.len();
            (
                StatusCode::OK,
                Json(SendMessageResponse {
                    reply_html: state.formatter.format(&reply.text),
                    reply: reply.text,
                    transcript_len,
                }),
            )
                .into_response()
        }
        Err(ChatError::EmptyMessage) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message must not be empty".to_string(),
            }),
        )
            .into_response(),
        Err(ChatError::SendInFlight) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "a send is already in flight".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /chat/transcript
/// Get the ordered conversation transcript
pub async fn get_transcript(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.chat.transcript().await)
}

/// POST /chat/reset
/// Discard the conversation and start over
pub async fn reset_chat(State(state): State<AppState>) -> Response {
    match state.chat.reset().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "reset".to_string(),
            }),
        )
            .into_response(),
        Err(_) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "cannot reset while a send is in flight".to_string(),
            }),
        )
            .into_response(),
    }
}

// ============================================================================
// Analysis Handlers
// ============================================================================

/// POST /plants/analyze
/// Analyze an uploaded plant image; the request body is the raw image bytes
pub async fn analyze_plant(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // At most one analysis in flight; concurrent submissions are rejected.
    // The guard releases on drop, covering a disconnecting client too.
    let Some(_guard) = InFlightGuard::acquire(&state.analysis_in_flight) else {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "an analysis is already in flight".to_string(),
            }),
        )
            .into_response();
    };

    run_analysis(&state, &params, &headers, &body).await
}

async fn run_analysis(
    state: &AppState,
    params: &AnalyzeParams,
    headers: &HeaderMap,
    body: &Bytes,
) -> Response {
    let Some(mime_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Content-Type header is required".to_string(),
            }),
        )
            .into_response();
    };

    let payload = match ImagePayload::from_bytes(body, mime_type) {
        Ok(p) => p,
        Err(e @ MediaError::FileTooLarge { .. }) => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    info!("Analyzing uploaded image ({} bytes)", body.len());

    match state.analyzer.analyze(payload, params.question.as_deref()).await {
        Ok(analysis) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                analysis_html: state.formatter.format(&analysis),
                analysis,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Analysis failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Voice Handlers
// ============================================================================

/// POST /voice/start
/// Begin voice capture; no-op while listening or unsupported
pub async fn voice_start(State(state): State<AppState>) -> Response {
    if let Err(e) = state.voice.start_listening().await {
        error!("Failed to start voice capture: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to start voice capture: {}", e),
            }),
        )
            .into_response();
    }

    (StatusCode::OK, Json(state.voice.state().await)).into_response()
}

/// POST /voice/stop
/// End voice capture; no-op while idle
pub async fn voice_stop(State(state): State<AppState>) -> Response {
    if let Err(e) = state.voice.stop_listening().await {
        error!("Failed to stop voice capture: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to stop voice capture: {}", e),
            }),
        )
            .into_response();
    }

    (StatusCode::OK, Json(state.voice.state().await)).into_response()
}

/// GET /voice/state
/// Observe capture state and the accumulated transcript
pub async fn voice_state(State(state): State<AppState>) -> Json<VoiceState> {
    Json(state.voice.state().await)
}

/// POST /voice/event
/// Feed a recognition event from a client-side recognizer
pub async fn voice_event(
    State(state): State<AppState>,
    Json(req): Json<VoiceEventRequest>,
) -> Response {
    let Some(feed) = &state.recognition_feed else {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "voice capture is not supported".to_string(),
            }),
        )
            .into_response();
    };

    let event = match req {
        VoiceEventRequest::Segment { text, is_final } => {
            RecognitionEvent::Segment { text, is_final }
        }
        VoiceEventRequest::Error { message } => RecognitionEvent::Error(message),
        VoiceEventRequest::End => RecognitionEvent::End,
    };

    if feed.push(event).await {
        (
            StatusCode::OK,
            Json(StatusResponse {
                status: "accepted".to_string(),
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "voice capture is not listening".to_string(),
            }),
        )
            .into_response()
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
