//! Aria Gateway - Voice tool gateway for AI assistants
//!
//! This library exposes voice capabilities — audio capture, transcription,
//! speech synthesis, and playback — as callable tools behind an HTTP API,
//! so an AI agent host can hear and speak through the local machine's
//! microphone and speakers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Agent host                        │
//! └────────────────────┬────────────────────────────────┘
//!                      │ tool calls
//! ┌────────────────────▼────────────────────────────────┐
//! │              Tool surface (api)                      │
//! │   listen_for_speech │ speak_text │ converse          │
//! └────────────────────┬────────────────────────────────┘
//! ┌────────────────────▼────────────────────────────────┐
//! │           Voice orchestrator (voice)                 │
//! │   capture │ STT engine │ TTS engine │ playback      │
//! └──────┬─────────┬────────────┬────────────┬──────────┘
//!    recorder    STT API      TTS API      player
//!    process     (remote)     (remote)     process
//! ```
//!
//! Data flows strictly downward; no component depends on anything above it,
//! and nothing is shared between concurrent calls.

pub mod api;
pub mod config;
pub mod error;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use voice::VoiceOrchestrator;
