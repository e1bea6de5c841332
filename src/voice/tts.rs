//! Text-to-speech (TTS) engines

use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::{Error, Result};

/// Model used when neither the caller nor the config names one
const FALLBACK_MODEL: &str = "tts-1";

/// Voice used when neither the caller nor the config names one
const FALLBACK_VOICE: &str = "alloy";

/// Audio container requested from the endpoint; matches what the playback
/// command expects by convention
const RESPONSE_FORMAT: &str = "wav";

/// Options for a single synthesis call
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    /// Voice identifier override
    pub voice_id: Option<String>,

    /// Language hint; forwarded only when present
    pub language: Option<String>,

    /// Model override
    pub model: Option<String>,

    /// Stylistic instructions; forwarded only when present
    pub instructions: Option<String>,
}

/// A pluggable synthesis backend
#[async_trait::async_trait]
pub trait TtsEngine: Send + Sync {
    /// Synthesize a complete audio clip for the text
    ///
    /// # Errors
    ///
    /// Returns an engine-specific error; no partial audio survives a
    /// failure.
    async fn synthesize(&self, text: &str, opts: &SynthesisOptions) -> Result<Vec<u8>>;
}

/// Build the TTS engine from configuration
///
/// # Errors
///
/// Returns `Error::Config` when no endpoint URL is configured.
pub fn create_tts_engine(config: &Config) -> Result<Arc<dyn TtsEngine>> {
    let url = config
        .tts
        .api_url
        .clone()
        .ok_or_else(|| Error::Config("TTS_API_URL must be set for remote TTS".to_string()))?;

    Ok(Arc::new(RemoteTtsEngine::new(
        url,
        config.tts.api_key.clone(),
        config.tts.voice.clone(),
        config.tts.model.clone(),
    )))
}

/// Request body for the remote synthesis endpoint
#[derive(Debug, Serialize)]
struct RemoteTtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    response_format: &'a str,
    voice: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

/// Synthesizes speech via a remote JSON HTTP endpoint
///
/// Response bytes are returned verbatim; compatibility between what the
/// endpoint emits and what playback consumes is the caller's concern.
pub struct RemoteTtsEngine {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    default_voice: Option<String>,
    default_model: Option<String>,
}

impl RemoteTtsEngine {
    /// Create a remote TTS engine for the given endpoint
    #[must_use]
    pub fn new(
        url: String,
        api_key: Option<String>,
        default_voice: Option<String>,
        default_model: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
            default_voice,
            default_model,
        }
    }

    /// Resolve overrides against configured defaults and fixed fallbacks
    fn build_request<'a>(&'a self, text: &'a str, opts: &'a SynthesisOptions) -> RemoteTtsRequest<'a> {
        RemoteTtsRequest {
            model: opts
                .model
                .as_deref()
                .or(self.default_model.as_deref())
                .unwrap_or(FALLBACK_MODEL),
            input: text,
            response_format: RESPONSE_FORMAT,
            voice: opts
                .voice_id
                .as_deref()
                .or(self.default_voice.as_deref())
                .unwrap_or(FALLBACK_VOICE),
            language: opts.language.as_deref(),
            instructions: opts.instructions.as_deref(),
        }
    }
}

#[async_trait::async_trait]
impl TtsEngine for RemoteTtsEngine {
    async fn synthesize(&self, text: &str, opts: &SynthesisOptions) -> Result<Vec<u8>> {
        let body = self.build_request(text, opts);
        tracing::debug!(
            chars = text.len(),
            model = body.model,
            voice = body.voice,
            "starting synthesis"
        );

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "TTS API error");
            return Err(Error::RemoteService {
                service: "TTS",
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await?;
        tracing::debug!(bytes = audio.len(), "synthesis complete");
        Ok(audio.to_vec())
    }
}
