//! Voice tool endpoints
//!
//! The protocol surface for the agent host: validates tool inputs against
//! their declared ranges before anything reaches the orchestrator, and maps
//! orchestrator failures to structured error responses. Credential values
//! never appear in error bodies.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};

use super::ApiState;
use crate::Error;
use crate::voice::{ConverseOptions, ListenOptions, SpeakOptions};

/// Upper bound for a `listen_for_speech` recording, in seconds
const MAX_LISTEN_SECONDS: u32 = 60;

/// Upper bound for a `converse` reply window, in seconds
const MAX_REPLY_SECONDS: u32 = 120;

/// Upper bound for the (inert) minimum-listen parameter, in seconds
const MAX_MIN_LISTEN_SECONDS: u32 = 60;

/// Build the tools router
#[must_use]
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/listen_for_speech", post(listen_for_speech))
        .route("/speak_text", post(speak_text))
        .route("/converse", post(converse))
        .with_state(state)
}

/// `listen_for_speech` tool input
#[derive(Debug, Deserialize)]
pub struct ListenRequest {
    /// Maximum length of the recording in seconds (1..=60)
    #[serde(rename = "maxDurationSeconds", default = "default_listen_seconds")]
    pub max_duration_seconds: u32,

    /// Language hint for the STT engine (e.g. "en")
    #[serde(default)]
    pub language: Option<String>,
}

const fn default_listen_seconds() -> u32 {
    5
}

/// `listen_for_speech` tool output
#[derive(Debug, Serialize)]
pub struct ListenResponse {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Record short audio from the microphone and transcribe it to text
async fn listen_for_speech(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ListenRequest>,
) -> Result<Json<ListenResponse>, ToolError> {
    if !(1..=MAX_LISTEN_SECONDS).contains(&request.max_duration_seconds) {
        return Err(ToolError::BadRequest(
            "maxDurationSeconds must be between 1 and 60",
        ));
    }

    let result = state
        .orchestrator
        .listen_for_speech(ListenOptions {
            max_duration_seconds: request.max_duration_seconds,
            language: request.language,
        })
        .await?;

    Ok(Json(ListenResponse {
        text: result.text,
        language: result.language,
    }))
}

/// `speak_text` tool input
#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    /// The message to speak
    pub text: String,

    /// Voice identifier to use for TTS
    #[serde(rename = "voiceId", default)]
    pub voice_id: Option<String>,

    /// Language hint for the TTS engine
    #[serde(default)]
    pub language: Option<String>,
}

/// `speak_text` tool output
#[derive(Debug, Serialize)]
pub struct SpeakResponse {
    pub ok: bool,
}

/// Convert text to speech and play it through the speakers
async fn speak_text(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SpeakRequest>,
) -> Result<Json<SpeakResponse>, ToolError> {
    if request.text.is_empty() {
        return Err(ToolError::BadRequest("text must not be empty"));
    }

    state
        .orchestrator
        .speak_text(SpeakOptions {
            text: request.text,
            voice_id: request.voice_id,
            language: request.language,
        })
        .await?;

    Ok(Json(SpeakResponse { ok: true }))
}

/// `converse` tool input
#[derive(Debug, Deserialize)]
pub struct ConverseRequest {
    /// The assistant message to speak aloud
    pub message: String,

    /// Whether to listen for a reply after speaking
    #[serde(default = "default_true")]
    pub wait_for_response: bool,

    /// Maximum time to listen for a response, in seconds (1..=120)
    #[serde(default = "default_reply_seconds")]
    pub listen_duration: u32,

    /// Minimum recording time before silence detection could end listening.
    /// Accepted and ignored: no silence detection is implemented.
    #[serde(default = "default_min_listen_seconds")]
    pub min_listen_duration: u32,

    /// Voice identifier to use for TTS
    #[serde(default)]
    pub voice: Option<String>,

    /// Language hint for both synthesis and transcription
    #[serde(default)]
    pub language: Option<String>,

    /// Reserved provider hint; accepted and ignored
    #[serde(default)]
    pub tts_provider: Option<String>,

    /// Reserved model hint; accepted and ignored
    #[serde(default)]
    pub tts_model: Option<String>,

    /// Reserved style hint; accepted and ignored
    #[serde(default)]
    pub tts_instructions: Option<String>,
}

const fn default_true() -> bool {
    true
}

const fn default_reply_seconds() -> u32 {
    30
}

const fn default_min_listen_seconds() -> u32 {
    1
}

/// `converse` tool output
#[derive(Debug, Serialize)]
pub struct ConverseResponse {
    pub spoken_message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heard_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heard_language: Option<String>,
}

/// Speak a message aloud and optionally listen for a spoken response
async fn converse(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ConverseRequest>,
) -> Result<Json<ConverseResponse>, ToolError> {
    if request.message.is_empty() {
        return Err(ToolError::BadRequest("message must not be empty"));
    }
    if !(1..=MAX_REPLY_SECONDS).contains(&request.listen_duration) {
        return Err(ToolError::BadRequest(
            "listen_duration must be between 1 and 120",
        ));
    }
    if !(1..=MAX_MIN_LISTEN_SECONDS).contains(&request.min_listen_duration) {
        return Err(ToolError::BadRequest(
            "min_listen_duration must be between 1 and 60",
        ));
    }

    let outcome = state
        .orchestrator
        .converse(ConverseOptions {
            message: request.message,
            wait_for_response: request.wait_for_response,
            listen_duration_seconds: request.listen_duration,
            min_listen_duration_seconds: request.min_listen_duration,
            voice_id: request.voice,
            language: request.language,
            tts_provider: request.tts_provider,
            tts_model: request.tts_model,
            tts_instructions: request.tts_instructions,
        })
        .await?;

    Ok(Json(ConverseResponse {
        spoken_message: outcome.spoken_message,
        heard_text: outcome.heard_text,
        heard_language: outcome.heard_language,
    }))
}

/// Tool endpoint errors
#[derive(Debug)]
pub enum ToolError {
    /// Input failed validation before reaching the orchestrator
    BadRequest(&'static str),

    /// The orchestrator operation failed
    Tool(Error),
}

impl From<Error> for ToolError {
    fn from(err: Error) -> Self {
        Self::Tool(err)
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: ErrorBody,
        }

        #[derive(Serialize)]
        struct ErrorBody {
            code: &'static str,
            message: String,
        }

        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.to_string()),
            Self::Tool(err) => {
                let (status, code) = match &err {
                    Error::Config(_) => (StatusCode::SERVICE_UNAVAILABLE, "not_configured"),
                    Error::RemoteService { .. } => {
                        (StatusCode::BAD_GATEWAY, "remote_service_failure")
                    }
                    Error::Process(_) => (StatusCode::INTERNAL_SERVER_ERROR, "process_failure"),
                    Error::Io(_) | Error::Http(_) | Error::Serialization(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                    }
                };
                (status, code, err.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorBody { code, message },
            }),
        )
            .into_response()
    }
}
