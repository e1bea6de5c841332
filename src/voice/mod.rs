//! Voice pipeline: audio I/O, STT/TTS engines, and the orchestrator

pub mod capture;
pub mod orchestrator;
pub mod playback;
pub mod stt;
pub mod tts;

pub use capture::record_to_buffer;
pub use orchestrator::{
    ConverseOptions, ConverseOutcome, DEFAULT_LISTEN_SECONDS, ListenOptions, SpeakOptions,
    VoiceOrchestrator,
};
pub use playback::play_buffer;
pub use stt::{RemoteSttEngine, SttEngine, TranscribeOptions, Transcription, create_stt_engine};
pub use tts::{RemoteTtsEngine, SynthesisOptions, TtsEngine, create_tts_engine};
