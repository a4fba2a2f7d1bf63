//! Media metadata probe (ffprobe)
//!
//! Optional input context only; processing never depends on it.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::engine::ffmpeg::FFPROBE_BIN;
use crate::error::{Result, VoicePrepError};

#[derive(Debug, Clone, Deserialize)]
pub struct MediaInfo {
    pub format: Option<FormatInfo>,
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatInfo {
    pub format_name: Option<String>,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamInfo {
    pub codec_name: Option<String>,
    pub codec_type: Option<String>,
    pub sample_rate: Option<String>,
    pub channels: Option<u32>,
}

impl MediaInfo {
    pub fn duration_seconds(&self) -> Option<f64> {
        self.format.as_ref()?.duration.as_ref()?.parse().ok()
    }

    pub fn first_audio_stream(&self) -> Option<&StreamInfo> {
        self.streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("audio"))
    }

    /// Short single-line summary for verbose output.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(stream) = self.first_audio_stream() {
            if let Some(codec) = &stream.codec_name {
                parts.push(codec.clone());
            }
            if let Some(rate) = &stream.sample_rate {
                parts.push(format!("{} Hz", rate));
            }
            if let Some(channels) = stream.channels {
                parts.push(format!("{} ch", channels));
            }
        }
        if let Some(duration) = self.duration_seconds() {
            parts.push(format!("{:.1}s", duration));
        }

        if parts.is_empty() {
            "unknown format".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Query container and stream metadata for an input file.
pub fn probe_media(input: &Path) -> Result<MediaInfo> {
    let output = Command::new(FFPROBE_BIN)
        .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
        .arg(input)
        .output()?;

    if !output.status.success() {
        return Err(VoicePrepError::engine_failed(
            FFPROBE_BIN,
            output.status,
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }

    serde_json::from_slice(&output.stdout).map_err(|e| VoicePrepError::probe_output(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBE_JSON: &str = r#"{
        "streams": [
            {
                "codec_name": "mp3",
                "codec_type": "audio",
                "sample_rate": "44100",
                "channels": 2
            }
        ],
        "format": {
            "format_name": "mp3",
            "duration": "123.456000",
            "bit_rate": "128000"
        }
    }"#;

    #[test]
    fn test_parse_probe_output() {
        let info: MediaInfo = serde_json::from_str(PROBE_JSON).unwrap();
        assert_eq!(info.streams.len(), 1);

        let stream = info.first_audio_stream().unwrap();
        assert_eq!(stream.codec_name.as_deref(), Some("mp3"));
        assert_eq!(stream.channels, Some(2));

        let duration = info.duration_seconds().unwrap();
        assert!((duration - 123.456).abs() < 1e-6);
    }

    #[test]
    fn test_summary() {
        let info: MediaInfo = serde_json::from_str(PROBE_JSON).unwrap();
        assert_eq!(info.summary(), "mp3, 44100 Hz, 2 ch, 123.5s");
    }

    #[test]
    fn test_summary_handles_missing_fields() {
        let info: MediaInfo = serde_json::from_str(r#"{"streams": []}"#).unwrap();
        assert_eq!(info.summary(), "unknown format");
    }
}
