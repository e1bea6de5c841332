//! Shared test fixtures: fake engines and stub audio commands
//!
//! Lets the voice pipeline run end to end without audio hardware or
//! network access. Capture/playback commands are small shell scripts and
//! the engines are in-memory fakes that record what they receive.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use aria_gateway::voice::{
    SttEngine, SynthesisOptions, TranscribeOptions, Transcription, TtsEngine,
};
use aria_gateway::{Error, Result};

/// STT engine returning a canned transcription and recording every call
pub struct FakeStt {
    reply: Transcription,
    pub calls: Mutex<Vec<(Vec<u8>, Option<String>)>>,
}

impl FakeStt {
    pub fn replying(text: &str, language: Option<&str>) -> Self {
        Self {
            reply: Transcription {
                text: text.to_string(),
                language: language.map(ToString::to_string),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl SttEngine for FakeStt {
    async fn transcribe(&self, audio: Vec<u8>, opts: &TranscribeOptions) -> Result<Transcription> {
        self.calls
            .lock()
            .unwrap()
            .push((audio, opts.language.clone()));
        Ok(self.reply.clone())
    }
}

/// TTS engine returning canned audio bytes and recording every call
pub struct FakeTts {
    audio: Vec<u8>,
    pub calls: Mutex<Vec<(String, SynthesisOptions)>>,
}

impl FakeTts {
    pub fn replying(audio: &[u8]) -> Self {
        Self {
            audio: audio.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl TtsEngine for FakeTts {
    async fn synthesize(&self, text: &str, opts: &SynthesisOptions) -> Result<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), opts.clone()));
        Ok(self.audio.clone())
    }
}

/// TTS engine that always fails with a remote-service error
pub struct FailingTts;

#[async_trait::async_trait]
impl TtsEngine for FailingTts {
    async fn synthesize(&self, _text: &str, _opts: &SynthesisOptions) -> Result<Vec<u8>> {
        Err(Error::RemoteService {
            service: "TTS",
            status: 500,
            body: "synthesis unavailable".to_string(),
        })
    }
}

/// Stub record command that echoes the arguments appended by capture
///
/// The capture adapter appends `-d <seconds>`, so the "recording" is the
/// literal text of those flags - handy for asserting flag propagation.
pub fn record_cmd_echoing_args() -> Vec<String> {
    shell(r#"printf '%s ' "$@""#)
}

/// Stub record command producing fixed bytes
pub fn record_cmd_emitting(bytes: &str) -> Vec<String> {
    shell(&format!("printf '{bytes}'"))
}

/// Stub record command that fails
pub fn record_cmd_failing() -> Vec<String> {
    shell("exit 1")
}

/// Stub play command that swallows its input
pub fn play_cmd_discarding() -> Vec<String> {
    shell("cat > /dev/null")
}

/// Stub play command writing its input to `path`
pub fn play_cmd_writing_to(path: &str) -> Vec<String> {
    shell(&format!("cat > {path}"))
}

/// Stub play command that fails
pub fn play_cmd_failing() -> Vec<String> {
    shell("cat > /dev/null; exit 3")
}

fn shell(script: &str) -> Vec<String> {
    vec![
        "sh".to_string(),
        "-c".to_string(),
        script.to_string(),
        "stub".to_string(),
    ]
}

static SCRATCH_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A unique scratch file path for one test
pub fn scratch_path(tag: &str) -> String {
    let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("aria-test-{}-{tag}-{n}", std::process::id()))
        .to_string_lossy()
        .into_owned()
}
