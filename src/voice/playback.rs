//! Audio playback via an external player process
//!
//! The counterpart to [`crate::voice::capture`]: an operator-configured
//! command such as `aplay` or `paplay` consumes audio bytes on stdin. The
//! buffer format must match what the player expects; both synthesis and
//! capture default to WAV by convention.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::{Error, Result};

/// Play raw audio bytes through the system speakers
///
/// Streams the whole buffer to the player's stdin, closes it, and waits
/// for the process to exit. The child is reaped on every path, including
/// when writing fails midway.
///
/// # Errors
///
/// Returns `Error::Process` if the command is empty, cannot be launched,
/// rejects the audio stream, or exits non-zero.
pub async fn play_buffer(play_cmd: &[String], audio: &[u8]) -> Result<()> {
    let (bin, args) = play_cmd
        .split_first()
        .ok_or_else(|| Error::Process("play command is empty".to_string()))?;

    tracing::debug!(command = %bin, bytes = audio.len(), "starting audio playback");

    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::Process(format!("failed to launch play command `{bin}`: {e}")))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::Process(format!("play command `{bin}` has no stdin")))?;

    let written = stdin.write_all(audio).await;
    // Close stdin to signal EOF before waiting.
    drop(stdin);

    if let Err(e) = written {
        let _ = child.wait().await;
        return Err(Error::Process(format!(
            "failed to stream audio to play command `{bin}`: {e}"
        )));
    }

    let status = child
        .wait()
        .await
        .map_err(|e| Error::Process(format!("play command `{bin}` failed: {e}")))?;

    if !status.success() {
        return Err(Error::Process(format!(
            "play command `{bin}` exited with {status}"
        )));
    }

    tracing::debug!("playback complete");
    Ok(())
}
