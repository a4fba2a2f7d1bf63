//! Error types

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum VoicePrepError {
    #[error("ffmpeg not found. Please install ffmpeg to use this tool")]
    EngineNotAvailable,

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("{} exited with status {}{}", .tool, .status, diagnostics_suffix(.diagnostics))]
    EngineFailed {
        tool: String,
        status: String,
        diagnostics: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("could not parse ffprobe output: {0}")]
    ProbeOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VoicePrepError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn probe_output<S: Into<String>>(msg: S) -> Self {
        Self::ProbeOutput(msg.into())
    }

    /// Non-zero exit from a child engine process. Captured diagnostics ride
    /// along so the user still sees the engine's own explanation.
    pub fn engine_failed(tool: &str, status: ExitStatus, diagnostics: String) -> Self {
        let status = match status.code() {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        };
        Self::EngineFailed {
            tool: tool.to_string(),
            status,
            diagnostics,
        }
    }
}

fn diagnostics_suffix(diagnostics: &str) -> String {
    if diagnostics.trim().is_empty() {
        String::new()
    } else {
        format!(":\n{}", diagnostics.trim_end())
    }
}

pub type Result<T> = std::result::Result<T, VoicePrepError>;
