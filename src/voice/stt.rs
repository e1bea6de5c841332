//! Speech-to-text (STT) engines

use std::sync::Arc;

use serde::Deserialize;

use crate::config::{Config, SttMode};
use crate::{Error, Result};

/// Model identifier sent to the remote transcription endpoint
const STT_MODEL: &str = "whisper-1";

/// Options for a single transcription call
#[derive(Debug, Clone, Default)]
pub struct TranscribeOptions {
    /// Language hint (e.g. "en"); forwarded only when present
    pub language: Option<String>,
}

/// Result returned from an STT engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    /// Transcribed text; empty when no speech was detected, never absent
    pub text: String,

    /// Detected language code, when the provider reports one
    pub language: Option<String>,
}

/// A pluggable transcription backend
#[async_trait::async_trait]
pub trait SttEngine: Send + Sync {
    /// Transcribe a complete audio clip to text
    ///
    /// # Errors
    ///
    /// Returns an engine-specific error; no partial transcript survives a
    /// failure.
    async fn transcribe(&self, audio: Vec<u8>, opts: &TranscribeOptions) -> Result<Transcription>;
}

/// Build the STT engine selected by configuration
///
/// Engine selection is a pure function of the config snapshot; an
/// unsupported mode or missing endpoint fails here, at startup, before
/// any network call is attempted.
///
/// # Errors
///
/// Returns `Error::Config` for the reserved `os_cli` mode or when the
/// remote mode has no endpoint URL.
pub fn create_stt_engine(config: &Config) -> Result<Arc<dyn SttEngine>> {
    match config.stt.mode {
        SttMode::Remote => {
            let url = config.stt.api_url.clone().ok_or_else(|| {
                Error::Config("STT_API_URL must be set when using remote STT".to_string())
            })?;
            Ok(Arc::new(RemoteSttEngine::new(
                url,
                config.stt.api_key.clone(),
            )))
        }
        SttMode::OsCli => Err(Error::Config(
            "STT mode `os_cli` is not implemented yet".to_string(),
        )),
    }
}

/// Response shape shared by the supported transcription providers
///
/// Providers disagree on field names; both spellings of each field are
/// accepted and anything else in the body is ignored.
#[derive(Debug, Deserialize)]
struct RemoteSttResponse {
    #[serde(default, alias = "transcript")]
    text: Option<String>,

    #[serde(default, alias = "lang")]
    language: Option<String>,
}

/// Transcribes speech via a remote multipart HTTP endpoint
pub struct RemoteSttEngine {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl RemoteSttEngine {
    /// Create a remote STT engine for the given endpoint
    #[must_use]
    pub fn new(url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl SttEngine for RemoteSttEngine {
    async fn transcribe(&self, audio: Vec<u8>, opts: &TranscribeOptions) -> Result<Transcription> {
        tracing::debug!(audio_bytes = audio.len(), "starting transcription");

        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio)
                    .file_name("audio.wav")
                    .mime_str("audio/wav")?,
            )
            .text("model", STT_MODEL);

        if let Some(language) = &opts.language {
            form = form.text("language", language.clone());
        }

        let mut request = self.client.post(&self.url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "STT API error");
            return Err(Error::RemoteService {
                service: "STT",
                status: status.as_u16(),
                body,
            });
        }

        let parsed: RemoteSttResponse = response.json().await?;
        let transcription = Transcription {
            text: parsed.text.unwrap_or_default(),
            language: parsed.language,
        };

        tracing::info!(transcript = %transcription.text, "transcription complete");
        Ok(transcription)
    }
}
