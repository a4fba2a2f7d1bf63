//! Filter chain construction
//!
//! Builds the filter-graph string handed to the engine's `-af` argument.
//! Stage order is fixed: each stage operates on the previous stage's output,
//! so reordering changes the audio outcome.

use crate::config::{Config, FilterConfig, SilenceConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChain {
    stages: Vec<String>,
}

impl FilterChain {
    /// Assemble the chain: noise reduction, silence removal, EQ stages in
    /// listed order, compression, loudness normalization.
    pub fn from_config(config: &Config) -> Self {
        let mut stages = Vec::with_capacity(config.filters.equalizers.len() + 4);

        // Denoising works best on the raw signal
        stages.push(config.filters.noise_reduction.clone());

        // Removing "thinking pauses" is the whole point of this tool
        stages.push(silence_removal_stage(&config.silence));

        stages.extend(config.filters.equalizers.iter().cloned());
        stages.push(config.filters.compressor.clone());
        stages.push(loudness_stage(&config.filters));

        Self { stages }
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    /// Comma-joined graph suitable for the engine's filter argument.
    pub fn render(&self) -> String {
        self.stages.join(",")
    }
}

/// Strip leading silence and truncate pauses. `stop_periods=-1` leaves the
/// trailing cutoff open-ended.
fn silence_removal_stage(silence: &SilenceConfig) -> String {
    format!(
        "silenceremove=start_periods=1:start_silence={}:start_threshold={}:\
         stop_periods=-1:stop_silence={}:stop_threshold={}:detection=peak",
        silence.min_duration, silence.threshold, silence.min_duration, silence.threshold
    )
}

fn loudness_stage(filters: &FilterConfig) -> String {
    format!(
        "loudnorm=I={}:TP={}:LRA={}",
        filters.target_loudness, filters.true_peak, filters.loudness_range
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chain() {
        let chain = FilterChain::from_config(&Config::default());
        assert_eq!(
            chain.render(),
            "afftdn=nf=-25,\
             silenceremove=start_periods=1:start_silence=0.4:start_threshold=-35dB:\
             stop_periods=-1:stop_silence=0.4:stop_threshold=-35dB:detection=peak,\
             highpass=f=100,\
             lowpass=f=10000,\
             equalizer=f=150:t=q:w=1:g=-3,\
             equalizer=f=200:t=q:w=1:g=-2,\
             equalizer=f=3000:t=q:w=2:g=3,\
             acompressor=threshold=-20dB:ratio=4:attack=5:release=50,\
             loudnorm=I=-16:TP=-1.5:LRA=11"
        );
    }

    #[test]
    fn test_chain_is_deterministic() {
        let config = Config::default();
        let first = FilterChain::from_config(&config);
        let second = FilterChain::from_config(&config);
        assert_eq!(first, second);
        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn test_stage_order() {
        let rendered = FilterChain::from_config(&Config::default()).render();

        let denoise = rendered.find("afftdn").unwrap();
        let silence = rendered.find("silenceremove").unwrap();
        let first_eq = rendered.find("highpass").unwrap();
        let last_eq = rendered.find("equalizer=f=3000").unwrap();
        let compressor = rendered.find("acompressor").unwrap();
        let loudness = rendered.find("loudnorm").unwrap();

        assert!(denoise < silence);
        assert!(silence < first_eq);
        assert!(first_eq < last_eq);
        assert!(last_eq < compressor);
        assert!(compressor < loudness);
    }

    #[test]
    fn test_overrides_appear_verbatim() {
        let mut config = Config::default();
        config.silence.threshold = "-50dB".to_string();
        config.silence.min_duration = "1.25".to_string();
        config.filters.target_loudness = "-20".to_string();

        let rendered = FilterChain::from_config(&config).render();
        assert!(rendered.contains("start_threshold=-50dB"));
        assert!(rendered.contains("stop_threshold=-50dB"));
        assert!(rendered.contains("start_silence=1.25"));
        assert!(rendered.contains("stop_silence=1.25"));
        assert!(rendered.contains("loudnorm=I=-20:"));
    }

    #[test]
    fn test_custom_equalizer_list_keeps_listed_order() {
        let mut config = Config::default();
        config.filters.equalizers = vec![
            "highpass=f=80".to_string(),
            "equalizer=f=5000:t=q:w=2:g=2".to_string(),
        ];

        let chain = FilterChain::from_config(&config);
        let stages = chain.stages();
        assert_eq!(stages.len(), 6);
        assert_eq!(stages[2], "highpass=f=80");
        assert_eq!(stages[3], "equalizer=f=5000:t=q:w=2:g=2");
    }
}
