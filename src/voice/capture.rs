//! Audio capture via an external recorder process
//!
//! Device access is delegated to an operator-configured command such as
//! `arecord` or `parec`; this module only owns process lifecycle and byte
//! plumbing. The command must write a complete WAV clip to stdout and
//! self-terminate after the `-d <seconds>` bound appended here.

use std::process::Stdio;

use tokio::process::Command;

use crate::{Error, Result};

/// Record audio from the system microphone and return the raw WAV bytes
///
/// The recorder's stderr is inherited rather than captured so its
/// diagnostics reach the operator directly. A recorder killed before the
/// duration elapses still yields whatever bytes it wrote, provided it
/// exited zero.
///
/// # Errors
///
/// Returns `Error::Process` if the command is empty, cannot be launched,
/// or exits non-zero.
pub async fn record_to_buffer(record_cmd: &[String], duration_seconds: u32) -> Result<Vec<u8>> {
    let (bin, args) = record_cmd
        .split_first()
        .ok_or_else(|| Error::Process("record command is empty".to_string()))?;

    tracing::debug!(command = %bin, duration_seconds, "starting audio capture");

    let child = Command::new(bin)
        .args(args)
        .arg("-d")
        .arg(duration_seconds.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::Process(format!("failed to launch record command `{bin}`: {e}")))?;

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| Error::Process(format!("record command `{bin}` failed: {e}")))?;

    if !output.status.success() {
        return Err(Error::Process(format!(
            "record command `{bin}` exited with {}",
            output.status
        )));
    }

    tracing::debug!(bytes = output.stdout.len(), "capture complete");
    Ok(output.stdout)
}
