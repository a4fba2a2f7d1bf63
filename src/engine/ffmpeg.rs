//! FFmpeg subprocess wrapper

use std::ffi::OsString;
use std::process::{Command, Stdio};

use crate::error::{Result, VoicePrepError};

pub const FFMPEG_BIN: &str = "ffmpeg";
pub const FFPROBE_BIN: &str = "ffprobe";

/// Check whether the ffmpeg binary is callable in the current environment.
pub fn is_available() -> bool {
    Command::new(FFMPEG_BIN)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Fail with `EngineNotAvailable` unless ffmpeg is callable.
pub fn check_available() -> Result<()> {
    if is_available() {
        Ok(())
    } else {
        Err(VoicePrepError::EngineNotAvailable)
    }
}

/// Run ffmpeg with diagnostics streaming to the terminal. Blocks until the
/// child exits; no timeout is imposed.
pub fn run_streaming(args: &[OsString]) -> Result<()> {
    log::debug!("running: {} {:?}", FFMPEG_BIN, args);

    let status = Command::new(FFMPEG_BIN).args(args).status()?;
    if !status.success() {
        // Diagnostics already went to the terminal
        return Err(VoicePrepError::engine_failed(FFMPEG_BIN, status, String::new()));
    }
    Ok(())
}

/// Run ffmpeg with diagnostics captured. Returns the stderr text on
/// success; on a non-zero exit the captured diagnostics ride along in the
/// error so the cause still reaches the user.
pub fn run_captured(args: &[OsString]) -> Result<String> {
    log::debug!("running: {} {:?}", FFMPEG_BIN, args);

    let output = Command::new(FFMPEG_BIN).args(args).output()?;
    let diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        return Err(VoicePrepError::engine_failed(FFMPEG_BIN, output.status, diagnostics));
    }
    Ok(diagnostics)
}
