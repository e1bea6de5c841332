//! Voice orchestration
//!
//! Sequences capture, transcription, synthesis, and playback into the three
//! tool operations. The orchestrator holds no mutable state; every call
//! reads the same immutable engines and command templates, so concurrent
//! calls cannot interfere. Callers wanting exclusive use of the physical
//! microphone/speaker must serialize at the call site.

use std::sync::Arc;

use crate::config::Config;
use crate::voice::stt::{SttEngine, TranscribeOptions, Transcription, create_stt_engine};
use crate::voice::tts::{SynthesisOptions, TtsEngine, create_tts_engine};
use crate::voice::{capture, playback};
use crate::Result;

/// Default reply-listening window for `converse`, in seconds
pub const DEFAULT_LISTEN_SECONDS: u32 = 30;

/// Options for [`VoiceOrchestrator::listen_for_speech`]
#[derive(Debug, Clone)]
pub struct ListenOptions {
    /// Upper bound on the recording, in seconds
    pub max_duration_seconds: u32,

    /// Language hint for transcription
    pub language: Option<String>,
}

/// Options for [`VoiceOrchestrator::speak_text`]
#[derive(Debug, Clone)]
pub struct SpeakOptions {
    /// The message to synthesize and play
    pub text: String,

    /// Voice identifier override
    pub voice_id: Option<String>,

    /// Language hint for synthesis
    pub language: Option<String>,
}

/// Options for [`VoiceOrchestrator::converse`]
#[derive(Debug, Clone)]
pub struct ConverseOptions {
    /// The assistant message to speak aloud
    pub message: String,

    /// Whether to listen for a reply after speaking
    pub wait_for_response: bool,

    /// Maximum time to listen for a reply, in seconds
    pub listen_duration_seconds: u32,

    /// Minimum recording time before silence detection could end listening.
    /// Accepted for wire compatibility; no silence detection is implemented,
    /// so this has no effect.
    pub min_listen_duration_seconds: u32,

    /// Voice identifier override for the spoken message
    pub voice_id: Option<String>,

    /// Language hint for both synthesis and transcription
    pub language: Option<String>,

    /// Reserved provider hint; accepted and currently ignored
    pub tts_provider: Option<String>,

    /// Reserved model hint; accepted and currently ignored
    pub tts_model: Option<String>,

    /// Reserved style hint; accepted and currently ignored
    pub tts_instructions: Option<String>,
}

impl ConverseOptions {
    /// Converse options for a message, with the default listen behavior
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            wait_for_response: true,
            listen_duration_seconds: DEFAULT_LISTEN_SECONDS,
            min_listen_duration_seconds: 1,
            voice_id: None,
            language: None,
            tts_provider: None,
            tts_model: None,
            tts_instructions: None,
        }
    }
}

/// Result of a [`VoiceOrchestrator::converse`] call
///
/// The heard fields are present iff the call waited for and obtained a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverseOutcome {
    /// The message that was spoken
    pub spoken_message: String,

    /// Transcribed reply text
    pub heard_text: Option<String>,

    /// Detected reply language
    pub heard_language: Option<String>,
}

/// Sequences STT, TTS, and audio I/O into the tool operations
pub struct VoiceOrchestrator {
    stt: Arc<dyn SttEngine>,
    tts: Arc<dyn TtsEngine>,
    record_cmd: Vec<String>,
    play_cmd: Vec<String>,
}

impl VoiceOrchestrator {
    /// Build an orchestrator with already-resolved dependencies
    ///
    /// Exists so tests can inject fake engines and stub commands.
    #[must_use]
    pub fn new(
        stt: Arc<dyn SttEngine>,
        tts: Arc<dyn TtsEngine>,
        record_cmd: Vec<String>,
        play_cmd: Vec<String>,
    ) -> Self {
        Self {
            stt,
            tts,
            record_cmd,
            play_cmd,
        }
    }

    /// Build an orchestrator from configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when an engine cannot be constructed from the
    /// snapshot; nothing is deferred to first use.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            create_stt_engine(config)?,
            create_tts_engine(config)?,
            config.audio.record_cmd.clone(),
            config.audio.play_cmd.clone(),
        ))
    }

    /// Record for up to `max_duration_seconds`, then transcribe
    ///
    /// An atomic two-step pipeline: the captured buffer moves unmodified
    /// into transcription, and no partial result survives a failure of
    /// either step.
    ///
    /// # Errors
    ///
    /// Propagates `Error::Process` from capture and the transcription
    /// engine's errors unchanged.
    pub async fn listen_for_speech(&self, opts: ListenOptions) -> Result<Transcription> {
        let audio = capture::record_to_buffer(&self.record_cmd, opts.max_duration_seconds).await?;
        self.stt
            .transcribe(
                audio,
                &TranscribeOptions {
                    language: opts.language,
                },
            )
            .await
    }

    /// Synthesize the text, then play it
    ///
    /// # Errors
    ///
    /// Propagates the synthesis engine's errors and `Error::Process` from
    /// playback unchanged.
    pub async fn speak_text(&self, opts: SpeakOptions) -> Result<()> {
        let audio = self
            .tts
            .synthesize(
                &opts.text,
                &SynthesisOptions {
                    voice_id: opts.voice_id,
                    language: opts.language,
                    ..SynthesisOptions::default()
                },
            )
            .await?;
        playback::play_buffer(&self.play_cmd, &audio).await
    }

    /// Speak a message, then optionally listen for a reply
    ///
    /// Phases run strictly in order: a speak failure aborts before any
    /// capture is attempted. Which phase failed is visible from the error
    /// itself (the remote-service tag and process messages name the stage)
    /// and from the per-phase trace events.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from either phase; no retries.
    pub async fn converse(&self, opts: ConverseOptions) -> Result<ConverseOutcome> {
        tracing::debug!(phase = "speak", chars = opts.message.len(), "converse");
        self.speak_text(SpeakOptions {
            text: opts.message.clone(),
            voice_id: opts.voice_id,
            language: opts.language.clone(),
        })
        .await?;

        if !opts.wait_for_response {
            return Ok(ConverseOutcome {
                spoken_message: opts.message,
                heard_text: None,
                heard_language: None,
            });
        }

        tracing::debug!(
            phase = "listen",
            duration_seconds = opts.listen_duration_seconds,
            "converse"
        );
        let heard = self
            .listen_for_speech(ListenOptions {
                max_duration_seconds: opts.listen_duration_seconds,
                language: opts.language,
            })
            .await?;

        Ok(ConverseOutcome {
            spoken_message: opts.message,
            heard_text: Some(heard.text),
            heard_language: heard.language,
        })
    }
}
