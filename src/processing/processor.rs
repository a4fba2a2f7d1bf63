//! Audio processing pipeline
//!
//! One run walks: input validation, chain construction, a single blocking
//! engine invocation, then a size report read back from the filesystem.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::engine;
use crate::error::{Result, VoicePrepError};
use crate::processing::FilterChain;

#[derive(Debug)]
pub struct AudioProcessor {
    config: Config,
}

impl AudioProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process the input file through the full filter chain.
    ///
    /// Blocks until the engine exits; no timeout is imposed. In quiet mode
    /// engine diagnostics are captured and surface only on failure.
    pub fn process_file(&self) -> Result<ProcessingResult> {
        let start_time = Instant::now();
        let input = &self.config.input_path;
        let output = &self.config.output_path;

        if !input.exists() {
            return Err(VoicePrepError::InputNotFound(input.clone()));
        }

        let chain = FilterChain::from_config(&self.config);

        if self.config.verbose {
            println!("\nProcessing: {}", input.display());
            println!("Output: {}", output.display());
            println!("\nFilter chain: {}\n", chain.render());
        }

        let args = self.engine_args(&chain.render());
        if self.config.verbose {
            engine::run_streaming(&args)?;
        } else {
            engine::run_captured(&args)?;
        }

        // Sizes are read after the child exits so the output is complete
        let input_size = fs::metadata(input)?.len();
        let output_size = fs::metadata(output)?.len();

        Ok(ProcessingResult {
            input_path: input.clone(),
            output_path: output.clone(),
            input_size,
            output_size,
            processing_time: start_time.elapsed(),
        })
    }

    /// Engine argument list for one processing invocation.
    fn engine_args(&self, chain: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        if !self.config.verbose {
            args.push("-loglevel".into());
            args.push("error".into());
        }

        args.push("-i".into());
        args.push(self.config.input_path.clone().into_os_string());
        args.push("-af".into());
        args.push(chain.into());
        args.push("-ar".into());
        args.push(self.config.output.sample_rate.to_string().into());
        args.push("-ac".into());
        args.push(self.config.output.channels.to_string().into());
        args.push("-c:a".into());
        args.push(self.config.output.codec.clone().into());
        args.push("-b:a".into());
        args.push(self.config.output.bitrate.clone().into());
        args.push("-y".into());
        args.push(self.config.output_path.clone().into_os_string());

        args
    }
}

#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
    pub processing_time: Duration,
}

impl ProcessingResult {
    pub fn input_megabytes(&self) -> f64 {
        self.input_size as f64 / 1024.0 / 1024.0
    }

    pub fn output_megabytes(&self) -> f64 {
        self.output_size as f64 / 1024.0 / 1024.0
    }

    /// Size reduction as a percentage of the input size. Negative when the
    /// output grew.
    pub fn reduction_percent(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        (self.input_size as f64 - self.output_size as f64) / self.input_size as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_config(input: &Path, output: &Path) -> Config {
        let mut config = Config::default();
        config.input_path = input.to_path_buf();
        config.output_path = output.to_path_buf();
        config
    }

    #[test]
    fn test_missing_input_fails_before_invocation() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("missing.mp3");
        let output = temp_dir.path().join("missing_processed.mp3");

        let processor = AudioProcessor::new(test_config(&input, &output));
        match processor.process_file() {
            Err(VoicePrepError::InputNotFound(path)) => assert_eq!(path, input),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
        // No engine ran, so nothing may have been written
        assert!(!output.exists());
    }

    #[test]
    fn test_engine_args_layout() {
        let config = test_config(Path::new("talk.mp3"), Path::new("talk_processed.mp3"));
        let processor = AudioProcessor::new(config);
        let chain = FilterChain::from_config(&Config::default()).render();
        let args = processor.engine_args(&chain);

        // Quiet mode suppresses engine chatter up front
        assert_eq!(args[0], OsString::from("-loglevel"));
        assert_eq!(args[1], OsString::from("error"));

        let position = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert_eq!(args[position("-i") + 1], OsString::from("talk.mp3"));
        assert_eq!(args[position("-af") + 1], OsString::from(chain.as_str()));
        assert_eq!(args[position("-ar") + 1], OsString::from("44100"));
        assert_eq!(args[position("-ac") + 1], OsString::from("1"));
        assert_eq!(args[position("-c:a") + 1], OsString::from("libmp3lame"));
        assert_eq!(args[position("-b:a") + 1], OsString::from("96k"));

        // Overwrite flag, then the output path last
        assert_eq!(args[args.len() - 2], OsString::from("-y"));
        assert_eq!(args[args.len() - 1], OsString::from("talk_processed.mp3"));
    }

    #[test]
    fn test_engine_args_verbose_streams_diagnostics() {
        let mut config = test_config(Path::new("talk.mp3"), Path::new("out.mp3"));
        config.verbose = true;
        let processor = AudioProcessor::new(config);
        let args = processor.engine_args("anull");

        assert!(!args.iter().any(|a| a == "-loglevel"));
        assert_eq!(args[0], OsString::from("-i"));
    }

    #[test]
    fn test_reduction_percent() {
        let result = ProcessingResult {
            input_path: PathBuf::from("a.mp3"),
            output_path: PathBuf::from("b.mp3"),
            input_size: 1000,
            output_size: 250,
            processing_time: Duration::from_secs(1),
        };
        assert!((result.reduction_percent() - 75.0).abs() < 1e-9);

        let grown = ProcessingResult {
            output_size: 1500,
            ..result.clone()
        };
        assert!((grown.reduction_percent() + 50.0).abs() < 1e-9);

        let empty = ProcessingResult {
            input_size: 0,
            ..result
        };
        assert_eq!(empty.reduction_percent(), 0.0);
    }
}
