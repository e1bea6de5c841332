//! Configuration management for the Aria gateway
//!
//! Settings resolve once at startup with precedence env > config file >
//! default, into an immutable [`Config`] snapshot. Nothing re-reads the
//! environment after startup; changing configuration requires a restart.

pub mod file;

use std::str::FromStr;

use crate::{Error, Result};

/// Default API server port
pub const DEFAULT_PORT: u16 = 18791;

/// Aria gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Speech-to-text engine settings
    pub stt: SttConfig,

    /// Text-to-speech engine settings
    pub tts: TtsConfig,

    /// Audio capture/playback command templates
    pub audio: AudioConfig,

    /// HTTP API server settings
    pub server: ServerConfig,
}

/// Which STT engine to run
///
/// A closed set: adding an engine means adding a variant here and a matching
/// arm in the engine factory, so misconfiguration fails at startup rather
/// than at first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SttMode {
    /// Remote HTTP transcription endpoint
    Remote,
    /// Local CLI transcriber (reserved, not yet implemented)
    OsCli,
}

impl FromStr for SttMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "remote" => Ok(Self::Remote),
            "os_cli" => Ok(Self::OsCli),
            other => Err(Error::Config(format!("unknown STT mode: {other}"))),
        }
    }
}

/// Speech-to-text engine settings
#[derive(Debug, Clone)]
pub struct SttConfig {
    /// Engine selection
    pub mode: SttMode,

    /// Remote STT endpoint URL (required for `SttMode::Remote`)
    pub api_url: Option<String>,

    /// Bearer credential for the STT endpoint
    pub api_key: Option<String>,
}

/// Text-to-speech engine settings
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Remote TTS endpoint URL (required)
    pub api_url: Option<String>,

    /// Bearer credential for the TTS endpoint
    pub api_key: Option<String>,

    /// Default voice identifier; the engine falls back to "alloy"
    pub voice: Option<String>,

    /// Default TTS model; the engine falls back to "tts-1"
    pub model: Option<String>,
}

/// Audio capture/playback command templates
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Capture command; must emit a complete WAV clip to stdout and accept
    /// a trailing `-d <seconds>` duration flag
    pub record_cmd: Vec<String>,

    /// Playback command; must consume audio bytes from stdin
    pub play_cmd: Vec<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            record_cmd: default_record_cmd(),
            play_cmd: default_play_cmd(),
        }
    }
}

/// HTTP API server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment and the optional config file
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `STT_MODE` names an unknown engine.
    pub fn load() -> Result<Self> {
        let fc = file::load_config_file();

        let mode = match env_var("STT_MODE").or(fc.stt.mode) {
            Some(raw) => raw.parse()?,
            None => SttMode::Remote,
        };

        let stt = SttConfig {
            mode,
            api_url: env_var("STT_API_URL").or(fc.stt.api_url),
            api_key: env_var("STT_API_KEY").or(fc.stt.api_key),
        };

        let tts = TtsConfig {
            api_url: env_var("TTS_API_URL").or(fc.tts.api_url),
            api_key: env_var("TTS_API_KEY").or(fc.tts.api_key),
            voice: env_var("TTS_VOICE").or(fc.tts.voice),
            model: env_var("TTS_MODEL").or(fc.tts.model),
        };

        let audio = AudioConfig {
            record_cmd: env_var("RECORD_CMD")
                .map(|raw| split_command(&raw))
                .or(fc.audio.record_cmd)
                .unwrap_or_else(default_record_cmd),
            play_cmd: env_var("PLAY_CMD")
                .map(|raw| split_command(&raw))
                .or(fc.audio.play_cmd)
                .unwrap_or_else(default_play_cmd),
        };

        let server = ServerConfig {
            port: env_var("ARIA_PORT")
                .and_then(|s| s.parse().ok())
                .or(fc.server.port)
                .unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            stt,
            tts,
            audio,
            server,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Split a command string from the environment on whitespace
///
/// Operators overriding `RECORD_CMD`/`PLAY_CMD` must keep the command and
/// its flags space-separated; there is no shell quoting.
#[must_use]
pub fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(ToString::to_string).collect()
}

/// Default capture command, suited to most Linux installs
#[must_use]
pub fn default_record_cmd() -> Vec<String> {
    ["arecord", "-f", "cd", "-t", "wav", "-q"]
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Default playback command
#[must_use]
pub fn default_play_cmd() -> Vec<String> {
    ["aplay", "-q"].into_iter().map(ToString::to_string).collect()
}
