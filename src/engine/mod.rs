//! External engine integration
//!
//! Everything that touches the ffmpeg/ffprobe binaries lives here.

pub mod ffmpeg;
pub mod probe;

pub use ffmpeg::{check_available, is_available, run_captured, run_streaming, FFMPEG_BIN, FFPROBE_BIN};
pub use probe::{probe_media, MediaInfo};
