//! TOML configuration file loading
//!
//! Supports `~/.config/aria/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults,
//! and environment variables take precedence over it.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct AriaConfigFile {
    /// Speech-to-text configuration
    #[serde(default)]
    pub stt: SttFileConfig,

    /// Text-to-speech configuration
    #[serde(default)]
    pub tts: TtsFileConfig,

    /// Audio capture/playback commands
    #[serde(default)]
    pub audio: AudioFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,
}

/// Speech-to-text configuration
#[derive(Debug, Default, Deserialize)]
pub struct SttFileConfig {
    /// Engine mode ("remote"; "os_cli" is reserved)
    pub mode: Option<String>,

    /// Remote STT endpoint URL
    pub api_url: Option<String>,

    /// Bearer credential for the STT endpoint
    pub api_key: Option<String>,
}

/// Text-to-speech configuration
#[derive(Debug, Default, Deserialize)]
pub struct TtsFileConfig {
    /// Remote TTS endpoint URL
    pub api_url: Option<String>,

    /// Bearer credential for the TTS endpoint
    pub api_key: Option<String>,

    /// Default voice identifier (e.g. "alloy")
    pub voice: Option<String>,

    /// Default TTS model (e.g. "tts-1")
    pub model: Option<String>,
}

/// Audio command configuration
#[derive(Debug, Default, Deserialize)]
pub struct AudioFileConfig {
    /// Capture command and arguments, e.g. ["arecord", "-f", "cd", "-t", "wav", "-q"]
    pub record_cmd: Option<Vec<String>>,

    /// Playback command and arguments, e.g. ["aplay", "-q"]
    pub play_cmd: Option<Vec<String>>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// API server port
    pub port: Option<u16>,
}

/// Load the TOML config file from the standard path
///
/// Returns `AriaConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> AriaConfigFile {
    let Some(path) = config_file_path() else {
        return AriaConfigFile::default();
    };

    if !path.exists() {
        return AriaConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                AriaConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            AriaConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/aria/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("aria").join("config.toml"))
}
