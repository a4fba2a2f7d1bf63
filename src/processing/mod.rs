//! Processing Pipeline

pub mod analyzer;
pub mod filter_chain;
pub mod processor;

pub use analyzer::{SilenceAnalyzer, SilencePeriod, SilenceReport};
pub use filter_chain::FilterChain;
pub use processor::{AudioProcessor, ProcessingResult};
