//! Audio stream relay
//!
//! Forwards decoded PCM from the conferencing session into an external
//! encoder process (FFmpeg) for re-streaming to a destination such as an
//! internet radio endpoint:
//! - StreamRelay lifecycle state machine (configure/start/stop/toggle)
//! - EncoderSink/EncoderLauncher abstraction over the encoder subprocess

pub mod encoder;
pub mod relay;
pub mod state;

pub use encoder::{EncoderLauncher, EncoderSink, FfmpegLauncher};
pub use relay::StreamRelay;
pub use state::{RelayState, StreamStatus};
