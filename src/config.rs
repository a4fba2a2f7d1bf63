//! Configuration management for voice processing

use crate::error::{Result, VoicePrepError};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub verbose: bool,
    pub analyze: bool,
    pub silence: SilenceConfig,
    pub filters: FilterConfig,
    pub output: OutputConfig,
}

/// Silence detection and truncation parameters. Threshold and durations are
/// kept as strings: they pass through to the engine verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SilenceConfig {
    pub threshold: String,
    pub min_duration: String,
    pub max_retained: String,
}

/// Filter-stage descriptors, each in the engine's own filter syntax.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub noise_reduction: String,
    pub equalizers: Vec<String>,
    pub compressor: String,
    pub target_loudness: String,
    pub true_peak: String,
    pub loudness_range: String,
}

/// Output encoding constraints passed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub sample_rate: u32,
    pub channels: u32,
    pub codec: String,
    pub bitrate: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.mp3"),
            output_path: PathBuf::from("output.mp3"),
            verbose: false,
            analyze: false,
            silence: SilenceConfig::default(),
            filters: FilterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            threshold: "-35dB".to_string(),
            min_duration: "0.4".to_string(),
            // Longer pauses are compressed down to this much silence
            max_retained: "0.5".to_string(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            // afftdn = adaptive FFT denoiser
            noise_reduction: "afftdn=nf=-25".to_string(),
            equalizers: vec![
                "highpass=f=100".to_string(),             // low rumble / room noise
                "lowpass=f=10000".to_string(),            // high-frequency hiss
                "equalizer=f=150:t=q:w=1:g=-3".to_string(), // low-end rumble
                "equalizer=f=200:t=q:w=1:g=-2".to_string(), // boominess
                "equalizer=f=3000:t=q:w=2:g=3".to_string(), // clarity / presence
            ],
            compressor: "acompressor=threshold=-20dB:ratio=4:attack=5:release=50".to_string(),
            // -16 LUFS is the usual podcast target
            target_loudness: "-16".to_string(),
            true_peak: "-1.5".to_string(),
            loudness_range: "11".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 1,
            codec: "libmp3lame".to_string(),
            bitrate: "96k".to_string(),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "voiceprep", about = "Process voice recordings with normalization, compression, and silence removal", version)]
pub struct Args {
    #[arg(help = "Input audio file (MP3, WAV, M4A, etc.)")]
    pub input: PathBuf,

    #[arg(help = "Output audio file (defaults to <input stem>_processed<ext>)")]
    pub output: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", help = "Show detailed processing information")]
    pub verbose: bool,

    #[arg(short = 'a', long = "analyze", help = "Analyze silence patterns without processing")]
    pub analyze: bool,

    #[arg(long = "silence-threshold", default_value = "-35dB", allow_hyphen_values = true, help = "Silence detection threshold")]
    pub silence_threshold: String,

    #[arg(long = "silence-duration", default_value = "0.4", help = "Minimum silence duration to remove in seconds")]
    pub silence_duration: String,

    #[arg(long = "target-loudness", default_value = "-16", allow_hyphen_values = true, help = "Target loudness in LUFS (podcast standard)")]
    pub target_loudness: String,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        // First load config file (if provided)
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        config.silence.threshold = args.silence_threshold;
        config.silence.min_duration = args.silence_duration;
        config.filters.target_loudness = args.target_loudness;
        config.verbose = args.verbose;
        config.analyze = args.analyze;
        config.output_path = args
            .output
            .unwrap_or_else(|| default_output_path(&args.input));
        config.input_path = args.input;

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file. Missing fields fall back to the
    /// built-in defaults, so partial files are fine.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VoicePrepError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| VoicePrepError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Validate configuration parameter validity
    ///
    /// Only the numeric output constraints are checked here. Filter-stage
    /// strings pass through unvalidated; the engine is the authority on
    /// their syntax.
    pub fn validate(&self) -> Result<()> {
        if self.output.sample_rate == 0 {
            return Err(VoicePrepError::config("Sample rate must be greater than 0"));
        }
        if self.output.sample_rate > 192000 {
            return Err(VoicePrepError::config("Sample rate cannot exceed 192000 Hz"));
        }

        if self.output.channels == 0 {
            return Err(VoicePrepError::config("Channel count must be greater than 0"));
        }

        if self.output.codec.is_empty() {
            return Err(VoicePrepError::config("Output codec must not be empty"));
        }
        if self.output.bitrate.is_empty() {
            return Err(VoicePrepError::config("Output bitrate must not be empty"));
        }

        Ok(())
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VoicePrepError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| VoicePrepError::config(format!("Failed to write config file: {}", e)))
    }
}

/// Default output path: the input path with `_processed` appended to the
/// filename stem, same directory and extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let name = match input.extension() {
        Some(ext) => format!("{}_processed.{}", stem, ext.to_string_lossy()),
        None => format!("{}_processed", stem),
    };

    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
