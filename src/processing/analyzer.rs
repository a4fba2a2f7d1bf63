//! Silence analysis
//!
//! Diagnostic pass over the input: reports detected silence periods without
//! producing an output file. The engine renders to the null muxer, so
//! nothing is ever written.

use std::ffi::OsString;

use crate::config::Config;
use crate::engine;
use crate::error::Result;

/// One detected silence period, parsed from engine diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SilencePeriod {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

/// Result of one silencedetect pass.
#[derive(Debug, Clone, Default)]
pub struct SilenceReport {
    /// Raw silencedetect diagnostic lines, in engine order.
    pub raw_lines: Vec<String>,
    pub periods: Vec<SilencePeriod>,
}

impl SilenceReport {
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }
}

#[derive(Debug)]
pub struct SilenceAnalyzer<'a> {
    config: &'a Config,
}

impl<'a> SilenceAnalyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Detection filter for the diagnostic pass.
    pub fn detection_filter(&self) -> String {
        format!(
            "silencedetect=noise={}:d={}",
            self.config.silence.threshold, self.config.silence.min_duration
        )
    }

    /// Run the engine in analysis mode and collect detected silence periods.
    pub fn analyze(&self) -> Result<SilenceReport> {
        let args: Vec<OsString> = vec![
            "-i".into(),
            self.config.input_path.clone().into_os_string(),
            "-af".into(),
            self.detection_filter().into(),
            "-f".into(),
            "null".into(),
            "-".into(),
        ];

        // silencedetect reports on stderr
        let diagnostics = engine::run_captured(&args)?;
        Ok(parse_report(&diagnostics))
    }
}

/// Extract silencedetect lines from engine diagnostics and pair
/// start/end events into periods.
pub fn parse_report(diagnostics: &str) -> SilenceReport {
    let mut report = SilenceReport::default();
    let mut pending_start: Option<f64> = None;

    for line in diagnostics.lines() {
        if !line.contains("silencedetect") || !line.contains("silence_") {
            continue;
        }
        report.raw_lines.push(line.to_string());

        if line.contains("silence_start:") {
            pending_start = field_value(line, "silence_start:").and_then(|v| v.parse().ok());
        } else if line.contains("silence_end:") {
            let end = field_value(line, "silence_end:").and_then(|v| v.parse().ok());
            let duration = field_value(line, "silence_duration:").and_then(|v| v.parse().ok());
            if let (Some(end), Some(duration)) = (end, duration) {
                let start = pending_start.take().unwrap_or(end - duration);
                report.periods.push(SilencePeriod { start, end, duration });
            }
        }
    }

    report
}

/// Value token following `key` in a diagnostic line.
fn field_value<'l>(line: &'l str, key: &str) -> Option<&'l str> {
    let rest = &line[line.find(key)? + key.len()..];
    rest.split_whitespace().next()
}
