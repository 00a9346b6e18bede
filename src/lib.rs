//! audio-relay - Side-channel relays for a real-time audio conferencing server.
//!
//! Two independent sinks, both fed by the server's real-time pipelines:
//!
//! - [`stream::StreamRelay`] (the core): receives one fixed-size PCM frame
//!   per audio tick and, while active, forwards the raw bytes into an
//!   external encoder process (FFmpeg) that re-streams to a configured
//!   destination. Owns the encoder lifecycle: enable/disable,
//!   reconfigure-while-live restart, idempotent teardown.
//! - [`chat::MessageRelay`] (unix only): writes incoming chat messages to a
//!   per-instance named pipe for an external reader.
//!
//! Failures are contained inside the relays; the hosting server's audio and
//! chat pipelines never see a fault from this crate.
//!
//! ```no_run
//! use audio_relay::StreamRelay;
//!
//! let relay = StreamRelay::new();
//! relay.configure("rtmp://radio.example/live");
//! relay.start();
//!
//! // Once per audio tick, from the mixing context:
//! let frame = vec![0i16; 2 * 960];
//! relay.forward(960, &frame);
//!
//! relay.stop();
//! ```

#[cfg(unix)]
pub mod chat;
pub mod stream;
pub mod utils;

#[cfg(unix)]
pub use chat::MessageRelay;
pub use stream::{RelayState, StreamRelay, StreamStatus};
pub use utils::error::{RelayError, RelayResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
///
/// For hosts that do not install their own subscriber; call once during
/// server startup. Respects `RUST_LOG`.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audio_relay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
